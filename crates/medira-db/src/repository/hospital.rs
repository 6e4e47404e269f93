//! SurrealDB implementation of [`HospitalRepository`].
//!
//! Registration creates the hospital row and its admin user inside one
//! `BEGIN…COMMIT` transaction; the unique index on `license_number` is
//! the single source of truth for duplicate detection, so the second of
//! two racing registrations fails at commit and is surfaced as
//! `DuplicateLicense`.

use chrono::{DateTime, Utc};
use medira_core::error::{MediraError, MediraResult};
use medira_core::models::hospital::{Hospital, HospitalStatus, RegisterHospital};
use medira_core::models::user::{CreateUser, User};
use medira_core::repository::HospitalRepository;
use surrealdb::{Connection, Surreal};
use surrealdb_types::SurrealValue;
use uuid::Uuid;

use medira_auth::password::hash_password;

use crate::error::{DbError, unique_index_violation};
use crate::repository::user::UserRow;

/// DB-side row struct for queries where the UUID is already known.
#[derive(Debug, SurrealValue)]
struct HospitalRow {
    name: String,
    address: String,
    contact_phone: String,
    license_number: String,
    admin_email: String,
    status: String,
    created_at: DateTime<Utc>,
    updated_at: DateTime<Utc>,
}

impl HospitalRow {
    fn into_hospital(self, id: Uuid) -> Result<Hospital, DbError> {
        let status = HospitalStatus::parse(&self.status)
            .ok_or_else(|| DbError::Query(format!("unknown hospital status: {}", self.status)))?;
        Ok(Hospital {
            id,
            name: self.name,
            address: self.address,
            contact_phone: self.contact_phone,
            license_number: self.license_number,
            admin_email: self.admin_email,
            status,
            created_at: self.created_at,
            updated_at: self.updated_at,
        })
    }
}

/// Map a registration failure, turning unique-index violations into
/// their domain errors.
fn map_register_error(e: surrealdb::Error, license_number: &str) -> MediraError {
    match unique_index_violation(&e).as_deref() {
        Some("idx_hospital_license") => MediraError::DuplicateLicense {
            license_number: license_number.to_string(),
        },
        Some("idx_hospital_admin_email") | Some("idx_user_email") => {
            MediraError::validation("admin_email", "email address already registered")
        }
        _ => DbError::Query(e.to_string()).into(),
    }
}

/// SurrealDB implementation of the Hospital repository.
#[derive(Clone)]
pub struct SurrealHospitalRepository<C: Connection> {
    db: Surreal<C>,
    /// Optional server-side pepper for password hashing.
    pepper: Option<String>,
}

impl<C: Connection> SurrealHospitalRepository<C> {
    pub fn new(db: Surreal<C>) -> Self {
        Self { db, pepper: None }
    }

    pub fn with_pepper(db: Surreal<C>, pepper: String) -> Self {
        Self {
            db,
            pepper: Some(pepper),
        }
    }
}

impl<C: Connection> HospitalRepository for SurrealHospitalRepository<C> {
    async fn register(
        &self,
        hospital: RegisterHospital,
        admin: CreateUser,
    ) -> MediraResult<(Hospital, User)> {
        hospital.validate()?;
        admin.validate()?;

        let hospital_id = Uuid::new_v4();
        let hospital_id_str = hospital_id.to_string();
        let user_id = Uuid::new_v4();
        let user_id_str = user_id.to_string();

        let license_number = hospital.license_number.clone();
        let password_hash =
            hash_password(&admin.password, self.pepper.as_deref()).map_err(MediraError::from)?;

        // Both rows commit together or not at all.
        let query = self
            .db
            .query(
                "BEGIN TRANSACTION; \
                 CREATE type::record('hospital', $hospital_id) SET \
                 name = $name, address = $address, \
                 contact_phone = $contact_phone, \
                 license_number = $license_number, \
                 admin_email = $admin_email, \
                 status = $status; \
                 CREATE type::record('user', $user_id) SET \
                 tenant_id = $hospital_id, \
                 first_name = $first_name, last_name = $last_name, \
                 email = $email, password_hash = $password_hash; \
                 COMMIT TRANSACTION;",
            )
            .bind(("hospital_id", hospital_id_str.clone()))
            .bind(("name", hospital.name))
            .bind(("address", hospital.address))
            .bind(("contact_phone", hospital.contact_phone))
            .bind(("license_number", hospital.license_number))
            .bind(("admin_email", hospital.admin_email))
            .bind(("status", HospitalStatus::Pending.as_str().to_string()))
            .bind(("user_id", user_id_str.clone()))
            .bind(("first_name", admin.first_name))
            .bind(("last_name", admin.last_name))
            .bind(("email", admin.email))
            .bind(("password_hash", password_hash));

        let result = match query.await {
            Ok(r) => r,
            Err(e) => return Err(map_register_error(e, &license_number)),
        };
        let mut result = match result.check() {
            Ok(r) => r,
            Err(e) => return Err(map_register_error(e, &license_number)),
        };

        // The response indexes BEGIN as statement 0, so the hospital
        // CREATE is statement 1 and the user CREATE statement 2.
        let hospital_rows: Vec<HospitalRow> = result.take(1).map_err(DbError::from)?;
        let hospital_row = hospital_rows
            .into_iter()
            .next()
            .ok_or_else(|| DbError::NotFound {
                entity: "hospital".into(),
                id: hospital_id_str,
            })?;

        let user_rows: Vec<UserRow> = result.take(2).map_err(DbError::from)?;
        let user_row = user_rows.into_iter().next().ok_or_else(|| DbError::NotFound {
            entity: "user".into(),
            id: user_id_str,
        })?;

        Ok((
            hospital_row.into_hospital(hospital_id)?,
            user_row.into_user(user_id)?,
        ))
    }

    async fn get_by_id(&self, id: Uuid) -> MediraResult<Hospital> {
        let id_str = id.to_string();

        let mut result = self
            .db
            .query("SELECT * FROM type::record('hospital', $id)")
            .bind(("id", id_str.clone()))
            .await
            .map_err(DbError::from)?;

        let rows: Vec<HospitalRow> = result.take(0).map_err(DbError::from)?;
        let row = rows.into_iter().next().ok_or_else(|| DbError::NotFound {
            entity: "hospital".into(),
            id: id_str,
        })?;

        Ok(row.into_hospital(id)?)
    }

    async fn update_status(&self, id: Uuid, status: HospitalStatus) -> MediraResult<Hospital> {
        let current = self.get_by_id(id).await?;
        current.check_transition(status)?;

        let id_str = id.to_string();
        let result = self
            .db
            .query(
                "UPDATE type::record('hospital', $id) SET \
                 status = $status, updated_at = time::now()",
            )
            .bind(("id", id_str.clone()))
            .bind(("status", status.as_str().to_string()))
            .await
            .map_err(DbError::from)?;

        let mut result = result
            .check()
            .map_err(|e| DbError::Query(e.to_string()))?;

        let rows: Vec<HospitalRow> = result.take(0).map_err(DbError::from)?;
        let row = rows.into_iter().next().ok_or_else(|| DbError::NotFound {
            entity: "hospital".into(),
            id: id_str,
        })?;

        Ok(row.into_hospital(id)?)
    }
}
