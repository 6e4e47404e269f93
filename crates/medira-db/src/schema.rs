//! Schema definitions and migration runner for SurrealDB.
//!
//! All table definitions use SCHEMAFULL mode for data integrity.
//! UUIDs are stored as strings. Enums are stored as strings with
//! ASSERT constraints. Uniqueness (hospital license, admin email, user
//! email, session token) is enforced here, at the storage layer, with
//! UNIQUE indexes rather than by application-level pre-checks.

use surrealdb::{Connection, Surreal};
use surrealdb_types::SurrealValue;
use tracing::info;

use crate::error::DbError;

// -----------------------------------------------------------------------
// Migration tracking
// -----------------------------------------------------------------------

const MIGRATION_TABLE_DDL: &str = "\
DEFINE TABLE IF NOT EXISTS _migration SCHEMAFULL;
DEFINE FIELD IF NOT EXISTS version ON TABLE _migration TYPE int;
DEFINE FIELD IF NOT EXISTS name ON TABLE _migration TYPE string;
DEFINE FIELD IF NOT EXISTS applied_at ON TABLE _migration TYPE datetime \
    DEFAULT time::now();
DEFINE INDEX IF NOT EXISTS idx_migration_version ON TABLE _migration \
    COLUMNS version UNIQUE;
";

#[derive(Debug, SurrealValue)]
struct MigrationRecord {
    version: u32,
    #[allow(dead_code)]
    name: String,
}

struct Migration {
    version: u32,
    name: &'static str,
    sql: &'static str,
}

static MIGRATIONS: &[Migration] = &[Migration {
    version: 1,
    name: "initial_schema",
    sql: SCHEMA_V1,
}];

// -----------------------------------------------------------------------
// Schema v1 — initial table definitions
// -----------------------------------------------------------------------

const SCHEMA_V1: &str = "\
-- =======================================================================
-- Hospitals (tenants, global scope)
-- =======================================================================
DEFINE TABLE hospital SCHEMAFULL;
DEFINE FIELD name ON TABLE hospital TYPE string;
DEFINE FIELD address ON TABLE hospital TYPE string;
DEFINE FIELD contact_phone ON TABLE hospital TYPE string;
DEFINE FIELD license_number ON TABLE hospital TYPE string;
DEFINE FIELD admin_email ON TABLE hospital TYPE string;
DEFINE FIELD status ON TABLE hospital TYPE string \
    ASSERT $value IN ['Pending', 'Verified', 'Active', 'Suspended', \
    'Inactive'];
DEFINE FIELD created_at ON TABLE hospital TYPE datetime \
    DEFAULT time::now();
DEFINE FIELD updated_at ON TABLE hospital TYPE datetime \
    DEFAULT time::now();
DEFINE INDEX idx_hospital_license ON TABLE hospital \
    COLUMNS license_number UNIQUE;
DEFINE INDEX idx_hospital_admin_email ON TABLE hospital \
    COLUMNS admin_email UNIQUE;

-- =======================================================================
-- Users (belong to one tenant; email unique across ALL tenants)
-- =======================================================================
DEFINE TABLE user SCHEMAFULL;
DEFINE FIELD tenant_id ON TABLE user TYPE string;
DEFINE FIELD first_name ON TABLE user TYPE string;
DEFINE FIELD last_name ON TABLE user TYPE string;
DEFINE FIELD email ON TABLE user TYPE string;
DEFINE FIELD password_hash ON TABLE user TYPE string;
DEFINE FIELD created_at ON TABLE user TYPE datetime \
    DEFAULT time::now();
DEFINE FIELD updated_at ON TABLE user TYPE datetime \
    DEFAULT time::now();
DEFINE INDEX idx_user_email ON TABLE user COLUMNS email UNIQUE;
DEFINE INDEX idx_user_tenant ON TABLE user COLUMNS tenant_id;

-- =======================================================================
-- Sessions (opaque-token lookup table)
-- =======================================================================
DEFINE TABLE session SCHEMAFULL;
DEFINE FIELD tenant_id ON TABLE session TYPE string;
DEFINE FIELD user_id ON TABLE session TYPE string;
DEFINE FIELD token_hash ON TABLE session TYPE string;
DEFINE FIELD display_name ON TABLE session TYPE string;
DEFINE FIELD expires_at ON TABLE session TYPE datetime;
DEFINE FIELD created_at ON TABLE session TYPE datetime \
    DEFAULT time::now();
DEFINE INDEX idx_session_token ON TABLE session \
    COLUMNS token_hash UNIQUE;
DEFINE INDEX idx_session_user ON TABLE session COLUMNS user_id;

-- =======================================================================
-- Patients (tenant scope)
-- =======================================================================
DEFINE TABLE patient SCHEMAFULL;
DEFINE FIELD tenant_id ON TABLE patient TYPE string;
DEFINE FIELD first_name ON TABLE patient TYPE string;
DEFINE FIELD last_name ON TABLE patient TYPE string;
DEFINE FIELD email ON TABLE patient TYPE string;
DEFINE FIELD phone ON TABLE patient TYPE string;
DEFINE FIELD date_of_birth ON TABLE patient TYPE string;
DEFINE FIELD gender ON TABLE patient TYPE option<string>;
DEFINE FIELD blood_group ON TABLE patient TYPE option<string>;
DEFINE FIELD address ON TABLE patient TYPE option<string>;
DEFINE FIELD created_at ON TABLE patient TYPE datetime \
    DEFAULT time::now();
DEFINE INDEX idx_patient_tenant ON TABLE patient COLUMNS tenant_id;

-- =======================================================================
-- Departments (tenant scope)
-- =======================================================================
DEFINE TABLE department SCHEMAFULL;
DEFINE FIELD tenant_id ON TABLE department TYPE string;
DEFINE FIELD name ON TABLE department TYPE string;
DEFINE FIELD description ON TABLE department TYPE option<string>;
DEFINE FIELD head_name ON TABLE department TYPE option<string>;
DEFINE FIELD email ON TABLE department TYPE option<string>;
DEFINE FIELD phone ON TABLE department TYPE option<string>;
DEFINE FIELD created_at ON TABLE department TYPE datetime \
    DEFAULT time::now();
DEFINE INDEX idx_department_tenant ON TABLE department \
    COLUMNS tenant_id;

-- =======================================================================
-- Doctors (tenant scope)
-- =======================================================================
DEFINE TABLE doctor SCHEMAFULL;
DEFINE FIELD tenant_id ON TABLE doctor TYPE string;
DEFINE FIELD department_id ON TABLE doctor TYPE option<string>;
DEFINE FIELD first_name ON TABLE doctor TYPE string;
DEFINE FIELD last_name ON TABLE doctor TYPE string;
DEFINE FIELD specialization ON TABLE doctor TYPE string;
DEFINE FIELD email ON TABLE doctor TYPE string;
DEFINE FIELD phone ON TABLE doctor TYPE string;
DEFINE FIELD license_number ON TABLE doctor TYPE option<string>;
DEFINE FIELD experience_years ON TABLE doctor TYPE option<int>;
DEFINE FIELD status ON TABLE doctor TYPE string \
    ASSERT $value IN ['Active', 'Inactive'];
DEFINE FIELD created_at ON TABLE doctor TYPE datetime \
    DEFAULT time::now();
DEFINE INDEX idx_doctor_tenant ON TABLE doctor COLUMNS tenant_id;

-- =======================================================================
-- Appointments (tenant scope)
-- =======================================================================
DEFINE TABLE appointment SCHEMAFULL;
DEFINE FIELD tenant_id ON TABLE appointment TYPE string;
DEFINE FIELD patient_id ON TABLE appointment TYPE string;
DEFINE FIELD doctor_id ON TABLE appointment TYPE string;
DEFINE FIELD scheduled_at ON TABLE appointment TYPE datetime;
DEFINE FIELD reason ON TABLE appointment TYPE option<string>;
DEFINE FIELD notes ON TABLE appointment TYPE option<string>;
DEFINE FIELD status ON TABLE appointment TYPE string \
    ASSERT $value IN ['Scheduled', 'Completed', 'Cancelled'];
DEFINE FIELD created_at ON TABLE appointment TYPE datetime \
    DEFAULT time::now();
DEFINE INDEX idx_appointment_tenant ON TABLE appointment \
    COLUMNS tenant_id;

-- =======================================================================
-- Medical records (tenant scope)
-- =======================================================================
DEFINE TABLE medical_record SCHEMAFULL;
DEFINE FIELD tenant_id ON TABLE medical_record TYPE string;
DEFINE FIELD patient_id ON TABLE medical_record TYPE string;
DEFINE FIELD doctor_id ON TABLE medical_record TYPE option<string>;
DEFINE FIELD diagnosis ON TABLE medical_record TYPE option<string>;
DEFINE FIELD treatment ON TABLE medical_record TYPE option<string>;
DEFINE FIELD prescription ON TABLE medical_record TYPE option<string>;
DEFINE FIELD created_at ON TABLE medical_record TYPE datetime \
    DEFAULT time::now();
DEFINE INDEX idx_medical_record_tenant ON TABLE medical_record \
    COLUMNS tenant_id;
";

// -----------------------------------------------------------------------
// Public API
// -----------------------------------------------------------------------

/// Run all pending migrations against the given SurrealDB client.
///
/// Creates a `_migration` tracking table on first run, then applies
/// each migration whose version exceeds the current maximum.
/// All DEFINE statements are idempotent so re-running is safe.
pub async fn run_migrations<C: Connection>(db: &Surreal<C>) -> Result<(), DbError> {
    // Ensure migration tracking table exists (idempotent).
    db.query(MIGRATION_TABLE_DDL)
        .await?
        .check()
        .map_err(|e| DbError::Migration(e.to_string()))?;

    // Determine current schema version.
    let mut result = db
        .query("SELECT * FROM _migration ORDER BY version DESC LIMIT 1")
        .await?;
    let records: Vec<MigrationRecord> = result.take(0)?;
    let current_version = records.first().map(|m| m.version).unwrap_or(0);

    for migration in MIGRATIONS {
        if migration.version > current_version {
            info!(
                version = migration.version,
                name = migration.name,
                "Applying migration"
            );
            db.query(migration.sql).await?.check().map_err(|e| {
                DbError::Migration(format!(
                    "Migration v{} '{}' failed: {}",
                    migration.version, migration.name, e,
                ))
            })?;

            // Record the applied migration.
            db.query(
                "CREATE _migration SET version = $version, \
                 name = $name",
            )
            .bind(("version", migration.version))
            .bind(("name", migration.name))
            .await?
            .check()
            .map_err(|e| {
                DbError::Migration(format!(
                    "Failed to record migration v{}: {}",
                    migration.version, e,
                ))
            })?;

            info!(
                version = migration.version,
                "Migration applied successfully"
            );
        }
    }

    Ok(())
}

/// Returns the raw schema DDL for version 1.
///
/// Exposed for testing with in-memory SurrealDB instances that
/// bypass the migration runner.
pub fn schema_v1() -> &'static str {
    SCHEMA_V1
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn schema_v1_is_nonempty() {
        assert!(!SCHEMA_V1.is_empty());
    }

    #[test]
    fn schema_v1_covers_all_tables() {
        for table in [
            "hospital",
            "user",
            "session",
            "patient",
            "department",
            "doctor",
            "appointment",
            "medical_record",
        ] {
            assert!(
                SCHEMA_V1.contains(&format!("DEFINE TABLE {table} SCHEMAFULL")),
                "missing table definition for {table}"
            );
        }
    }

    #[test]
    fn migrations_are_ordered() {
        for window in MIGRATIONS.windows(2) {
            assert!(
                window[0].version < window[1].version,
                "Migrations must be in ascending version order"
            );
        }
    }
}
