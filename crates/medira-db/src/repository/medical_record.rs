//! SurrealDB implementation of [`MedicalRecordRepository`].

use chrono::{DateTime, Utc};
use medira_core::error::MediraResult;
use medira_core::models::medical_record::{CreateMedicalRecord, MedicalRecord};
use medira_core::repository::{MedicalRecordRepository, Pagination, PaginatedResult};
use surrealdb::{Connection, Surreal};
use surrealdb_types::SurrealValue;
use uuid::Uuid;

use crate::error::DbError;
use crate::repository::check_tenant_reference;

#[derive(Debug, SurrealValue)]
struct MedicalRecordRow {
    tenant_id: String,
    patient_id: String,
    doctor_id: Option<String>,
    diagnosis: Option<String>,
    treatment: Option<String>,
    prescription: Option<String>,
    created_at: DateTime<Utc>,
}

#[derive(Debug, SurrealValue)]
struct MedicalRecordRowWithId {
    record_id: String,
    tenant_id: String,
    patient_id: String,
    doctor_id: Option<String>,
    diagnosis: Option<String>,
    treatment: Option<String>,
    prescription: Option<String>,
    created_at: DateTime<Utc>,
}

#[derive(Debug, SurrealValue)]
struct CountRow {
    total: u64,
}

fn row_to_record(row: MedicalRecordRow, id: Uuid) -> Result<MedicalRecord, DbError> {
    let tenant_id = Uuid::parse_str(&row.tenant_id)
        .map_err(|e| DbError::Query(format!("invalid tenant UUID: {e}")))?;
    let patient_id = Uuid::parse_str(&row.patient_id)
        .map_err(|e| DbError::Query(format!("invalid patient UUID: {e}")))?;
    let doctor_id = row
        .doctor_id
        .as_deref()
        .map(Uuid::parse_str)
        .transpose()
        .map_err(|e| DbError::Query(format!("invalid doctor UUID: {e}")))?;
    Ok(MedicalRecord {
        id,
        tenant_id,
        patient_id,
        doctor_id,
        diagnosis: row.diagnosis,
        treatment: row.treatment,
        prescription: row.prescription,
        created_at: row.created_at,
    })
}

impl MedicalRecordRowWithId {
    fn try_into_record(self) -> Result<MedicalRecord, DbError> {
        let id = Uuid::parse_str(&self.record_id)
            .map_err(|e| DbError::Query(format!("invalid UUID: {e}")))?;
        row_to_record(
            MedicalRecordRow {
                tenant_id: self.tenant_id,
                patient_id: self.patient_id,
                doctor_id: self.doctor_id,
                diagnosis: self.diagnosis,
                treatment: self.treatment,
                prescription: self.prescription,
                created_at: self.created_at,
            },
            id,
        )
    }
}

/// SurrealDB implementation of the MedicalRecord repository.
#[derive(Clone)]
pub struct SurrealMedicalRecordRepository<C: Connection> {
    db: Surreal<C>,
}

impl<C: Connection> SurrealMedicalRecordRepository<C> {
    pub fn new(db: Surreal<C>) -> Self {
        Self { db }
    }
}

impl<C: Connection> MedicalRecordRepository for SurrealMedicalRecordRepository<C> {
    async fn create(
        &self,
        tenant_id: Uuid,
        input: CreateMedicalRecord,
    ) -> MediraResult<MedicalRecord> {
        check_tenant_reference(&self.db, "patient", "patient_id", input.patient_id, tenant_id)
            .await?;
        if let Some(doctor_id) = input.doctor_id {
            check_tenant_reference(&self.db, "doctor", "doctor_id", doctor_id, tenant_id).await?;
        }

        let id = Uuid::new_v4();
        let id_str = id.to_string();

        let result = self
            .db
            .query(
                "CREATE type::record('medical_record', $id) SET \
                 tenant_id = $tenant_id, \
                 patient_id = $patient_id, \
                 doctor_id = $doctor_id, \
                 diagnosis = $diagnosis, \
                 treatment = $treatment, \
                 prescription = $prescription",
            )
            .bind(("id", id_str.clone()))
            .bind(("tenant_id", tenant_id.to_string()))
            .bind(("patient_id", input.patient_id.to_string()))
            .bind(("doctor_id", input.doctor_id.map(|d| d.to_string())))
            .bind(("diagnosis", input.diagnosis))
            .bind(("treatment", input.treatment))
            .bind(("prescription", input.prescription))
            .await
            .map_err(DbError::from)?;

        let mut result = result
            .check()
            .map_err(|e| DbError::Query(e.to_string()))?;

        let rows: Vec<MedicalRecordRow> = result.take(0).map_err(DbError::from)?;
        let row = rows.into_iter().next().ok_or_else(|| DbError::NotFound {
            entity: "medical_record".into(),
            id: id_str,
        })?;

        Ok(row_to_record(row, id)?)
    }

    async fn get_by_id(&self, tenant_id: Uuid, id: Uuid) -> MediraResult<MedicalRecord> {
        let id_str = id.to_string();

        let mut result = self
            .db
            .query(
                "SELECT meta::id(id) AS record_id, * FROM medical_record \
                 WHERE meta::id(id) = $id AND tenant_id = $tenant_id",
            )
            .bind(("id", id_str.clone()))
            .bind(("tenant_id", tenant_id.to_string()))
            .await
            .map_err(DbError::from)?;

        let rows: Vec<MedicalRecordRowWithId> = result.take(0).map_err(DbError::from)?;
        let row = rows.into_iter().next().ok_or_else(|| DbError::NotFound {
            entity: "medical_record".into(),
            id: id_str,
        })?;

        Ok(row.try_into_record()?)
    }

    async fn list(
        &self,
        tenant_id: Uuid,
        page: Pagination,
    ) -> MediraResult<PaginatedResult<MedicalRecord>> {
        let tenant = tenant_id.to_string();

        let mut count_result = self
            .db
            .query(
                "SELECT count() AS total FROM medical_record \
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
                "SELECT meta::id(id) AS record_id, * FROM medical_record \
                 WHERE tenant_id = $tenant_id \
                 ORDER BY created_at ASC LIMIT $limit START $offset",
            )
            .bind(("tenant_id", tenant))
            .bind(("limit", page.limit))
            .bind(("offset", page.offset))
            .await
            .map_err(DbError::from)?;

        let rows: Vec<MedicalRecordRowWithId> = result.take(0).map_err(DbError::from)?;
        let items = rows
            .into_iter()
            .map(MedicalRecordRowWithId::try_into_record)
            .collect::<Result<Vec<_>, _>>()?;

        Ok(PaginatedResult {
            items,
            total,
            offset: page.offset,
            limit: page.limit,
        })
    }
}
