//! Authentication error types.

use medira_core::error::MediraError;
use thiserror::Error;

#[derive(Debug, Error)]
pub enum AuthError {
    #[error("invalid credentials")]
    InvalidCredentials,

    #[error("session token is not recognized")]
    SessionInvalid,

    #[error("session has expired")]
    SessionExpired,

    #[error("cryptography error: {0}")]
    Crypto(String),
}

impl From<AuthError> for MediraError {
    fn from(err: AuthError) -> Self {
        match err {
            AuthError::InvalidCredentials => MediraError::InvalidCredentials,
            AuthError::SessionInvalid | AuthError::SessionExpired => MediraError::Unauthenticated,
            AuthError::Crypto(msg) => MediraError::Crypto(msg),
        }
    }
}
