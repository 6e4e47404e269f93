//! SurrealDB implementation of [`PatientRepository`].

use chrono::{DateTime, NaiveDate, Utc};
use medira_core::error::MediraResult;
use medira_core::models::patient::{CreatePatient, Patient};
use medira_core::repository::{Pagination, PaginatedResult, PatientRepository};
use surrealdb::{Connection, Surreal};
use surrealdb_types::SurrealValue;
use uuid::Uuid;

use crate::error::DbError;

#[derive(Debug, SurrealValue)]
struct PatientRow {
    tenant_id: String,
    first_name: String,
    last_name: String,
    email: String,
    phone: String,
    date_of_birth: String,
    gender: Option<String>,
    blood_group: Option<String>,
    address: Option<String>,
    created_at: DateTime<Utc>,
}

#[derive(Debug, SurrealValue)]
struct PatientRowWithId {
    record_id: String,
    tenant_id: String,
    first_name: String,
    last_name: String,
    email: String,
    phone: String,
    date_of_birth: String,
    gender: Option<String>,
    blood_group: Option<String>,
    address: Option<String>,
    created_at: DateTime<Utc>,
}

#[derive(Debug, SurrealValue)]
struct CountRow {
    total: u64,
}

fn row_to_patient(row: PatientRow, id: Uuid) -> Result<Patient, DbError> {
    let tenant_id = Uuid::parse_str(&row.tenant_id)
        .map_err(|e| DbError::Query(format!("invalid tenant UUID: {e}")))?;
    let date_of_birth = NaiveDate::parse_from_str(&row.date_of_birth, "%Y-%m-%d")
        .map_err(|e| DbError::Query(format!("invalid date of birth: {e}")))?;
    Ok(Patient {
        id,
        tenant_id,
        first_name: row.first_name,
        last_name: row.last_name,
        email: row.email,
        phone: row.phone,
        date_of_birth,
        gender: row.gender,
        blood_group: row.blood_group,
        address: row.address,
        created_at: row.created_at,
    })
}

impl PatientRowWithId {
    fn try_into_patient(self) -> Result<Patient, DbError> {
        let id = Uuid::parse_str(&self.record_id)
            .map_err(|e| DbError::Query(format!("invalid UUID: {e}")))?;
        row_to_patient(
            PatientRow {
                tenant_id: self.tenant_id,
                first_name: self.first_name,
                last_name: self.last_name,
                email: self.email,
                phone: self.phone,
                date_of_birth: self.date_of_birth,
                gender: self.gender,
                blood_group: self.blood_group,
                address: self.address,
                created_at: self.created_at,
            },
            id,
        )
    }
}

/// SurrealDB implementation of the Patient repository.
#[derive(Clone)]
pub struct SurrealPatientRepository<C: Connection> {
    db: Surreal<C>,
}

impl<C: Connection> SurrealPatientRepository<C> {
    pub fn new(db: Surreal<C>) -> Self {
        Self { db }
    }
}

impl<C: Connection> PatientRepository for SurrealPatientRepository<C> {
    async fn create(&self, tenant_id: Uuid, input: CreatePatient) -> MediraResult<Patient> {
        input.validate()?;

        let id = Uuid::new_v4();
        let id_str = id.to_string();

        let result = self
            .db
            .query(
                "CREATE type::record('patient', $id) SET \
                 tenant_id = $tenant_id, \
                 first_name = $first_name, \
                 last_name = $last_name, \
                 email = $email, \
                 phone = $phone, \
                 date_of_birth = $date_of_birth, \
                 gender = $gender, \
                 blood_group = $blood_group, \
                 address = $address",
            )
            .bind(("id", id_str.clone()))
            .bind(("tenant_id", tenant_id.to_string()))
            .bind(("first_name", input.first_name))
            .bind(("last_name", input.last_name))
            .bind(("email", input.email))
            .bind(("phone", input.phone))
            .bind((
                "date_of_birth",
                input.date_of_birth.format("%Y-%m-%d").to_string(),
            ))
            .bind(("gender", input.gender))
            .bind(("blood_group", input.blood_group))
            .bind(("address", input.address))
            .await
            .map_err(DbError::from)?;

        let mut result = result
            .check()
            .map_err(|e| DbError::Query(e.to_string()))?;

        let rows: Vec<PatientRow> = result.take(0).map_err(DbError::from)?;
        let row = rows.into_iter().next().ok_or_else(|| DbError::NotFound {
            entity: "patient".into(),
            id: id_str,
        })?;

        Ok(row_to_patient(row, id)?)
    }

    async fn get_by_id(&self, tenant_id: Uuid, id: Uuid) -> MediraResult<Patient> {
        let id_str = id.to_string();

        let mut result = self
            .db
            .query(
                "SELECT meta::id(id) AS record_id, * FROM patient \
                 WHERE meta::id(id) = $id AND tenant_id = $tenant_id",
            )
            .bind(("id", id_str.clone()))
            .bind(("tenant_id", tenant_id.to_string()))
            .await
            .map_err(DbError::from)?;

        let rows: Vec<PatientRowWithId> = result.take(0).map_err(DbError::from)?;
        let row = rows.into_iter().next().ok_or_else(|| DbError::NotFound {
            entity: "patient".into(),
            id: id_str,
        })?;

        Ok(row.try_into_patient()?)
    }

    async fn list(
        &self,
        tenant_id: Uuid,
        page: Pagination,
    ) -> MediraResult<PaginatedResult<Patient>> {
        let tenant = tenant_id.to_string();

        let mut count_result = self
            .db
            .query(
                "SELECT count() AS total FROM patient \
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
                "SELECT meta::id(id) AS record_id, * FROM patient \
                 WHERE tenant_id = $tenant_id \
                 ORDER BY created_at ASC LIMIT $limit START $offset",
            )
            .bind(("tenant_id", tenant))
            .bind(("limit", page.limit))
            .bind(("offset", page.offset))
            .await
            .map_err(DbError::from)?;

        let rows: Vec<PatientRowWithId> = result.take(0).map_err(DbError::from)?;
        let items = rows
            .into_iter()
            .map(PatientRowWithId::try_into_patient)
            .collect::<Result<Vec<_>, _>>()?;

        Ok(PaginatedResult {
            items,
            total,
            offset: page.offset,
            limit: page.limit,
        })
    }
}
