//! SurrealDB repository implementations.

use medira_core::error::{MediraError, MediraResult};
use surrealdb::{Connection, Surreal};
use surrealdb_types::SurrealValue;
use uuid::Uuid;

use crate::error::DbError;

mod appointment;
mod department;
mod doctor;
mod hospital;
mod medical_record;
mod patient;
mod session;
mod user;

pub use appointment::SurrealAppointmentRepository;
pub use department::SurrealDepartmentRepository;
pub use doctor::SurrealDoctorRepository;
pub use hospital::SurrealHospitalRepository;
pub use medical_record::SurrealMedicalRecordRepository;
pub use patient::SurrealPatientRepository;
pub use session::SurrealSessionRepository;
pub use user::SurrealUserRepository;

#[derive(Debug, SurrealValue)]
struct TenantRefRow {
    tenant_id: String,
}

/// Resolve the owning tenant of a referenced row and enforce the
/// same-tenant invariant for foreign keys.
///
/// An id owned by another tenant fails with `CrossTenantReference`; an
/// id that exists nowhere fails validation on the referencing field.
/// Callers run this before inserting, so a rejected reference leaves
/// nothing behind.
pub(crate) async fn check_tenant_reference<C: Connection>(
    db: &Surreal<C>,
    table: &'static str,
    field: &'static str,
    id: Uuid,
    tenant_id: Uuid,
) -> MediraResult<()> {
    let mut result = db
        .query(format!(
            "SELECT tenant_id FROM type::record('{table}', $id)"
        ))
        .bind(("id", id.to_string()))
        .await
        .map_err(DbError::from)?;

    let rows: Vec<TenantRefRow> = result.take(0).map_err(DbError::from)?;
    let Some(row) = rows.into_iter().next() else {
        return Err(MediraError::validation(field, format!("unknown {table}")));
    };

    let owner = Uuid::parse_str(&row.tenant_id)
        .map_err(|e| DbError::Query(format!("invalid tenant UUID: {e}")))?;
    if owner != tenant_id {
        return Err(MediraError::CrossTenantReference {
            entity: table.into(),
            id: id.to_string(),
        });
    }
    Ok(())
}
