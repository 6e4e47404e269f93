//! SurrealDB implementation of [`DoctorRepository`].

use chrono::{DateTime, Utc};
use medira_core::error::MediraResult;
use medira_core::models::doctor::{CreateDoctor, Doctor, DoctorStatus};
use medira_core::repository::{DoctorRepository, Pagination, PaginatedResult};
use surrealdb::{Connection, Surreal};
use surrealdb_types::SurrealValue;
use uuid::Uuid;

use crate::error::DbError;
use crate::repository::check_tenant_reference;

#[derive(Debug, SurrealValue)]
struct DoctorRow {
    tenant_id: String,
    department_id: Option<String>,
    first_name: String,
    last_name: String,
    specialization: String,
    email: String,
    phone: String,
    license_number: Option<String>,
    experience_years: Option<u32>,
    status: String,
    created_at: DateTime<Utc>,
}

#[derive(Debug, SurrealValue)]
struct DoctorRowWithId {
    record_id: String,
    tenant_id: String,
    department_id: Option<String>,
    first_name: String,
    last_name: String,
    specialization: String,
    email: String,
    phone: String,
    license_number: Option<String>,
    experience_years: Option<u32>,
    status: String,
    created_at: DateTime<Utc>,
}

#[derive(Debug, SurrealValue)]
struct CountRow {
    total: u64,
}

fn row_to_doctor(row: DoctorRow, id: Uuid) -> Result<Doctor, DbError> {
    let tenant_id = Uuid::parse_str(&row.tenant_id)
        .map_err(|e| DbError::Query(format!("invalid tenant UUID: {e}")))?;
    let department_id = row
        .department_id
        .as_deref()
        .map(Uuid::parse_str)
        .transpose()
        .map_err(|e| DbError::Query(format!("invalid department UUID: {e}")))?;
    let status = DoctorStatus::parse(&row.status)
        .ok_or_else(|| DbError::Query(format!("unknown doctor status: {}", row.status)))?;
    Ok(Doctor {
        id,
        tenant_id,
        department_id,
        first_name: row.first_name,
        last_name: row.last_name,
        specialization: row.specialization,
        email: row.email,
        phone: row.phone,
        license_number: row.license_number,
        experience_years: row.experience_years,
        status,
        created_at: row.created_at,
    })
}

impl DoctorRowWithId {
    fn try_into_doctor(self) -> Result<Doctor, DbError> {
        let id = Uuid::parse_str(&self.record_id)
            .map_err(|e| DbError::Query(format!("invalid UUID: {e}")))?;
        row_to_doctor(
            DoctorRow {
                tenant_id: self.tenant_id,
                department_id: self.department_id,
                first_name: self.first_name,
                last_name: self.last_name,
                specialization: self.specialization,
                email: self.email,
                phone: self.phone,
                license_number: self.license_number,
                experience_years: self.experience_years,
                status: self.status,
                created_at: self.created_at,
            },
            id,
        )
    }
}

/// SurrealDB implementation of the Doctor repository.
#[derive(Clone)]
pub struct SurrealDoctorRepository<C: Connection> {
    db: Surreal<C>,
}

impl<C: Connection> SurrealDoctorRepository<C> {
    pub fn new(db: Surreal<C>) -> Self {
        Self { db }
    }
}

impl<C: Connection> DoctorRepository for SurrealDoctorRepository<C> {
    async fn create(&self, tenant_id: Uuid, input: CreateDoctor) -> MediraResult<Doctor> {
        input.validate()?;

        if let Some(department_id) = input.department_id {
            check_tenant_reference(
                &self.db,
                "department",
                "department_id",
                department_id,
                tenant_id,
            )
            .await?;
        }

        let id = Uuid::new_v4();
        let id_str = id.to_string();

        let result = self
            .db
            .query(
                "CREATE type::record('doctor', $id) SET \
                 tenant_id = $tenant_id, \
                 department_id = $department_id, \
                 first_name = $first_name, \
                 last_name = $last_name, \
                 specialization = $specialization, \
                 email = $email, \
                 phone = $phone, \
                 license_number = $license_number, \
                 experience_years = $experience_years, \
                 status = $status",
            )
            .bind(("id", id_str.clone()))
            .bind(("tenant_id", tenant_id.to_string()))
            .bind(("department_id", input.department_id.map(|d| d.to_string())))
            .bind(("first_name", input.first_name))
            .bind(("last_name", input.last_name))
            .bind(("specialization", input.specialization))
            .bind(("email", input.email))
            .bind(("phone", input.phone))
            .bind(("license_number", input.license_number))
            .bind(("experience_years", input.experience_years))
            .bind(("status", DoctorStatus::Active.as_str().to_string()))
            .await
            .map_err(DbError::from)?;

        let mut result = result
            .check()
            .map_err(|e| DbError::Query(e.to_string()))?;

        let rows: Vec<DoctorRow> = result.take(0).map_err(DbError::from)?;
        let row = rows.into_iter().next().ok_or_else(|| DbError::NotFound {
            entity: "doctor".into(),
            id: id_str,
        })?;

        Ok(row_to_doctor(row, id)?)
    }

    async fn get_by_id(&self, tenant_id: Uuid, id: Uuid) -> MediraResult<Doctor> {
        let id_str = id.to_string();

        let mut result = self
            .db
            .query(
                "SELECT meta::id(id) AS record_id, * FROM doctor \
                 WHERE meta::id(id) = $id AND tenant_id = $tenant_id",
            )
            .bind(("id", id_str.clone()))
            .bind(("tenant_id", tenant_id.to_string()))
            .await
            .map_err(DbError::from)?;

        let rows: Vec<DoctorRowWithId> = result.take(0).map_err(DbError::from)?;
        let row = rows.into_iter().next().ok_or_else(|| DbError::NotFound {
            entity: "doctor".into(),
            id: id_str,
        })?;

        Ok(row.try_into_doctor()?)
    }

    async fn list(
        &self,
        tenant_id: Uuid,
        page: Pagination,
    ) -> MediraResult<PaginatedResult<Doctor>> {
        let tenant = tenant_id.to_string();

        let mut count_result = self
            .db
            .query(
                "SELECT count() AS total FROM doctor \
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
                "SELECT meta::id(id) AS record_id, * FROM doctor \
                 WHERE tenant_id = $tenant_id \
                 ORDER BY created_at ASC LIMIT $limit START $offset",
            )
            .bind(("tenant_id", tenant))
            .bind(("limit", page.limit))
            .bind(("offset", page.offset))
            .await
            .map_err(DbError::from)?;

        let rows: Vec<DoctorRowWithId> = result.take(0).map_err(DbError::from)?;
        let items = rows
            .into_iter()
            .map(DoctorRowWithId::try_into_doctor)
            .collect::<Result<Vec<_>, _>>()?;

        Ok(PaginatedResult {
            items,
            total,
            offset: page.offset,
            limit: page.limit,
        })
    }
}
