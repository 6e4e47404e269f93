//! SurrealDB implementation of [`AppointmentRepository`].
//!
//! Both referenced parties are checked against the owning tenant before
//! the row is written, so a rejected booking leaves no trace.

use chrono::{DateTime, Utc};
use medira_core::error::MediraResult;
use medira_core::models::appointment::{Appointment, AppointmentStatus, CreateAppointment};
use medira_core::repository::{AppointmentRepository, Pagination, PaginatedResult};
use surrealdb::{Connection, Surreal};
use surrealdb_types::SurrealValue;
use uuid::Uuid;

use crate::error::DbError;
use crate::repository::check_tenant_reference;

#[derive(Debug, SurrealValue)]
struct AppointmentRow {
    tenant_id: String,
    patient_id: String,
    doctor_id: String,
    scheduled_at: DateTime<Utc>,
    reason: Option<String>,
    notes: Option<String>,
    status: String,
    created_at: DateTime<Utc>,
}

#[derive(Debug, SurrealValue)]
struct AppointmentRowWithId {
    record_id: String,
    tenant_id: String,
    patient_id: String,
    doctor_id: String,
    scheduled_at: DateTime<Utc>,
    reason: Option<String>,
    notes: Option<String>,
    status: String,
    created_at: DateTime<Utc>,
}

#[derive(Debug, SurrealValue)]
struct CountRow {
    total: u64,
}

fn row_to_appointment(row: AppointmentRow, id: Uuid) -> Result<Appointment, DbError> {
    let tenant_id = Uuid::parse_str(&row.tenant_id)
        .map_err(|e| DbError::Query(format!("invalid tenant UUID: {e}")))?;
    let patient_id = Uuid::parse_str(&row.patient_id)
        .map_err(|e| DbError::Query(format!("invalid patient UUID: {e}")))?;
    let doctor_id = Uuid::parse_str(&row.doctor_id)
        .map_err(|e| DbError::Query(format!("invalid doctor UUID: {e}")))?;
    let status = AppointmentStatus::parse(&row.status)
        .ok_or_else(|| DbError::Query(format!("unknown appointment status: {}", row.status)))?;
    Ok(Appointment {
        id,
        tenant_id,
        patient_id,
        doctor_id,
        scheduled_at: row.scheduled_at,
        reason: row.reason,
        notes: row.notes,
        status,
        created_at: row.created_at,
    })
}

impl AppointmentRowWithId {
    fn try_into_appointment(self) -> Result<Appointment, DbError> {
        let id = Uuid::parse_str(&self.record_id)
            .map_err(|e| DbError::Query(format!("invalid UUID: {e}")))?;
        row_to_appointment(
            AppointmentRow {
                tenant_id: self.tenant_id,
                patient_id: self.patient_id,
                doctor_id: self.doctor_id,
                scheduled_at: self.scheduled_at,
                reason: self.reason,
                notes: self.notes,
                status: self.status,
                created_at: self.created_at,
            },
            id,
        )
    }
}

/// SurrealDB implementation of the Appointment repository.
#[derive(Clone)]
pub struct SurrealAppointmentRepository<C: Connection> {
    db: Surreal<C>,
}

impl<C: Connection> SurrealAppointmentRepository<C> {
    pub fn new(db: Surreal<C>) -> Self {
        Self { db }
    }
}

impl<C: Connection> AppointmentRepository for SurrealAppointmentRepository<C> {
    async fn create(&self, tenant_id: Uuid, input: CreateAppointment) -> MediraResult<Appointment> {
        check_tenant_reference(&self.db, "patient", "patient_id", input.patient_id, tenant_id)
            .await?;
        check_tenant_reference(&self.db, "doctor", "doctor_id", input.doctor_id, tenant_id)
            .await?;

        let id = Uuid::new_v4();
        let id_str = id.to_string();

        let result = self
            .db
            .query(
                "CREATE type::record('appointment', $id) SET \
                 tenant_id = $tenant_id, \
                 patient_id = $patient_id, \
                 doctor_id = $doctor_id, \
                 scheduled_at = $scheduled_at, \
                 reason = $reason, \
                 notes = $notes, \
                 status = $status",
            )
            .bind(("id", id_str.clone()))
            .bind(("tenant_id", tenant_id.to_string()))
            .bind(("patient_id", input.patient_id.to_string()))
            .bind(("doctor_id", input.doctor_id.to_string()))
            .bind(("scheduled_at", input.scheduled_at))
            .bind(("reason", input.reason))
            .bind(("notes", input.notes))
            .bind(("status", AppointmentStatus::Scheduled.as_str().to_string()))
            .await
            .map_err(DbError::from)?;

        let mut result = result
            .check()
            .map_err(|e| DbError::Query(e.to_string()))?;

        let rows: Vec<AppointmentRow> = result.take(0).map_err(DbError::from)?;
        let row = rows.into_iter().next().ok_or_else(|| DbError::NotFound {
            entity: "appointment".into(),
            id: id_str,
        })?;

        Ok(row_to_appointment(row, id)?)
    }

    async fn get_by_id(&self, tenant_id: Uuid, id: Uuid) -> MediraResult<Appointment> {
        let id_str = id.to_string();

        let mut result = self
            .db
            .query(
                "SELECT meta::id(id) AS record_id, * FROM appointment \
                 WHERE meta::id(id) = $id AND tenant_id = $tenant_id",
            )
            .bind(("id", id_str.clone()))
            .bind(("tenant_id", tenant_id.to_string()))
            .await
            .map_err(DbError::from)?;

        let rows: Vec<AppointmentRowWithId> = result.take(0).map_err(DbError::from)?;
        let row = rows.into_iter().next().ok_or_else(|| DbError::NotFound {
            entity: "appointment".into(),
            id: id_str,
        })?;

        Ok(row.try_into_appointment()?)
    }

    async fn list(
        &self,
        tenant_id: Uuid,
        page: Pagination,
    ) -> MediraResult<PaginatedResult<Appointment>> {
        let tenant = tenant_id.to_string();

        let mut count_result = self
            .db
            .query(
                "SELECT count() AS total FROM appointment \
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
                "SELECT meta::id(id) AS record_id, * FROM appointment \
                 WHERE tenant_id = $tenant_id \
                 ORDER BY created_at ASC LIMIT $limit START $offset",
            )
            .bind(("tenant_id", tenant))
            .bind(("limit", page.limit))
            .bind(("offset", page.offset))
            .await
            .map_err(DbError::from)?;

        let rows: Vec<AppointmentRowWithId> = result.take(0).map_err(DbError::from)?;
        let items = rows
            .into_iter()
            .map(AppointmentRowWithId::try_into_appointment)
            .collect::<Result<Vec<_>, _>>()?;

        Ok(PaginatedResult {
            items,
            total,
            offset: page.offset,
            limit: page.limit,
        })
    }
}
