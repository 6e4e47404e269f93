//! SurrealDB implementation of [`DepartmentRepository`].

use chrono::{DateTime, Utc};
use medira_core::error::MediraResult;
use medira_core::models::department::{CreateDepartment, Department};
use medira_core::repository::{DepartmentRepository, Pagination, PaginatedResult};
use surrealdb::{Connection, Surreal};
use surrealdb_types::SurrealValue;
use uuid::Uuid;

use crate::error::DbError;

#[derive(Debug, SurrealValue)]
struct DepartmentRow {
    tenant_id: String,
    name: String,
    description: Option<String>,
    head_name: Option<String>,
    email: Option<String>,
    phone: Option<String>,
    created_at: DateTime<Utc>,
}

#[derive(Debug, SurrealValue)]
struct DepartmentRowWithId {
    record_id: String,
    tenant_id: String,
    name: String,
    description: Option<String>,
    head_name: Option<String>,
    email: Option<String>,
    phone: Option<String>,
    created_at: DateTime<Utc>,
}

#[derive(Debug, SurrealValue)]
struct CountRow {
    total: u64,
}

fn row_to_department(row: DepartmentRow, id: Uuid) -> Result<Department, DbError> {
    let tenant_id = Uuid::parse_str(&row.tenant_id)
        .map_err(|e| DbError::Query(format!("invalid tenant UUID: {e}")))?;
    Ok(Department {
        id,
        tenant_id,
        name: row.name,
        description: row.description,
        head_name: row.head_name,
        email: row.email,
        phone: row.phone,
        created_at: row.created_at,
    })
}

impl DepartmentRowWithId {
    fn try_into_department(self) -> Result<Department, DbError> {
        let id = Uuid::parse_str(&self.record_id)
            .map_err(|e| DbError::Query(format!("invalid UUID: {e}")))?;
        row_to_department(
            DepartmentRow {
                tenant_id: self.tenant_id,
                name: self.name,
                description: self.description,
                head_name: self.head_name,
                email: self.email,
                phone: self.phone,
                created_at: self.created_at,
            },
            id,
        )
    }
}

/// SurrealDB implementation of the Department repository.
#[derive(Clone)]
pub struct SurrealDepartmentRepository<C: Connection> {
    db: Surreal<C>,
}

impl<C: Connection> SurrealDepartmentRepository<C> {
    pub fn new(db: Surreal<C>) -> Self {
        Self { db }
    }
}

impl<C: Connection> DepartmentRepository for SurrealDepartmentRepository<C> {
    async fn create(&self, tenant_id: Uuid, input: CreateDepartment) -> MediraResult<Department> {
        input.validate()?;

        let id = Uuid::new_v4();
        let id_str = id.to_string();

        let result = self
            .db
            .query(
                "CREATE type::record('department', $id) SET \
                 tenant_id = $tenant_id, \
                 name = $name, \
                 description = $description, \
                 head_name = $head_name, \
                 email = $email, \
                 phone = $phone",
            )
            .bind(("id", id_str.clone()))
            .bind(("tenant_id", tenant_id.to_string()))
            .bind(("name", input.name))
            .bind(("description", input.description))
            .bind(("head_name", input.head_name))
            .bind(("email", input.email))
            .bind(("phone", input.phone))
            .await
            .map_err(DbError::from)?;

        let mut result = result
            .check()
            .map_err(|e| DbError::Query(e.to_string()))?;

        let rows: Vec<DepartmentRow> = result.take(0).map_err(DbError::from)?;
        let row = rows.into_iter().next().ok_or_else(|| DbError::NotFound {
            entity: "department".into(),
            id: id_str,
        })?;

        Ok(row_to_department(row, id)?)
    }

    async fn get_by_id(&self, tenant_id: Uuid, id: Uuid) -> MediraResult<Department> {
        let id_str = id.to_string();

        let mut result = self
            .db
            .query(
                "SELECT meta::id(id) AS record_id, * FROM department \
                 WHERE meta::id(id) = $id AND tenant_id = $tenant_id",
            )
            .bind(("id", id_str.clone()))
            .bind(("tenant_id", tenant_id.to_string()))
            .await
            .map_err(DbError::from)?;

        let rows: Vec<DepartmentRowWithId> = result.take(0).map_err(DbError::from)?;
        let row = rows.into_iter().next().ok_or_else(|| DbError::NotFound {
            entity: "department".into(),
            id: id_str,
        })?;

        Ok(row.try_into_department()?)
    }

    async fn list(
        &self,
        tenant_id: Uuid,
        page: Pagination,
    ) -> MediraResult<PaginatedResult<Department>> {
        let tenant = tenant_id.to_string();

        let mut count_result = self
            .db
            .query(
                "SELECT count() AS total FROM department \
                 WHERE tenant_id = $tenant_id GROUP ALL",
            )
            .bind(("tenant_id", tenant.clone()))
            .await
            .map_err(DbError::from)?;
        let count_rows: Vec<CountRow> = count_result.take(0).map_err(DbError::from)?;
        let total = count_rows.first().map(|r| r.total).unwrap_or(0);

        let mut result = self
            .db
            .query(
                "SELECT meta::id(id) AS record_id, * FROM department \
                 WHERE tenant_id = $tenant_id \
                 ORDER BY created_at ASC LIMIT $limit START $offset",
            )
            .bind(("tenant_id", tenant))
            .bind(("limit", page.limit))
            .bind(("offset", page.offset))
            .await
            .map_err(DbError::from)?;

        let rows: Vec<DepartmentRowWithId> = result.take(0).map_err(DbError::from)?;
        let items = rows
            .into_iter()
            .map(DepartmentRowWithId::try_into_department)
            .collect::<Result<Vec<_>, _>>()?;

        Ok(PaginatedResult {
            items,
            total,
            offset: page.offset,
            limit: page.limit,
        })
    }
}
