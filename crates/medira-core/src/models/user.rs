//! User domain model.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::error::MediraResult;
use crate::validate;

/// A user account. Every user belongs to exactly one hospital; the
/// email address is unique across ALL hospitals, which lets login look
/// a user up without knowing the tenant first.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct User {
    pub id: Uuid,
    pub tenant_id: Uuid,
    pub first_name: String,
    pub last_name: String,
    pub email: String,
    /// Argon2id PHC-format hash. Plaintext is never stored.
    pub password_hash: String,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

impl User {
    pub fn display_name(&self) -> String {
        format!("{} {}", self.first_name, self.last_name)
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CreateUser {
    pub tenant_id: Uuid,
    pub first_name: String,
    pub last_name: String,
    pub email: String,
    /// Raw password; hashed with Argon2id before storage.
    pub password: String,
}

impl CreateUser {
    pub fn validate(&self) -> MediraResult<()> {
        validate::require("first_name", &self.first_name)?;
        validate::require("last_name", &self.last_name)?;
        validate::require_email("email", &self.email)?;
        validate::require("password", &self.password)?;
        Ok(())
    }
}
