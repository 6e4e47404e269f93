//! Error types for the Medira system.

use thiserror::Error;

#[derive(Debug, Error)]
pub enum MediraError {
    /// Missing or malformed input, named per field.
    #[error("Validation failed on '{field}': {message}")]
    Validation { field: String, message: String },

    /// A hospital with this license number is already registered.
    #[error("License number already registered: {license_number}")]
    DuplicateLicense { license_number: String },

    /// A foreign-key reference points at a row owned by another tenant.
    #[error("Reference crosses tenant boundary: {entity} with id {id}")]
    CrossTenantReference { entity: String, id: String },

    /// Row absent, or owned by another tenant. The two cases are merged
    /// so callers cannot probe for other tenants' data.
    #[error("Entity not found: {entity} with id {id}")]
    NotFound { entity: String, id: String },

    /// Login failure. Unknown email and wrong password both produce this
    /// exact value, message included.
    #[error("invalid email or password")]
    InvalidCredentials,

    /// Missing, unknown, or expired session token on a protected
    /// operation.
    #[error("authentication required")]
    Unauthenticated,

    #[error("Database error: {0}")]
    Database(String),

    #[error("Cryptography error: {0}")]
    Crypto(String),
}

impl MediraError {
    pub fn validation(field: impl Into<String>, message: impl Into<String>) -> Self {
        Self::Validation {
            field: field.into(),
            message: message.into(),
        }
    }
}

pub type MediraResult<T> = Result<T, MediraError>;
