//! Session domain model.
//!
//! Sessions are an explicit lookup table keyed by the SHA-256 digest of
//! an opaque token handed to the client at login. There is no ambient
//! session state anywhere in the core.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Session {
    pub id: Uuid,
    pub tenant_id: Uuid,
    pub user_id: Uuid,
    /// SHA-256 hex digest of the raw token. The raw token exists only
    /// client-side after login.
    pub token_hash: String,
    pub display_name: String,
    pub expires_at: DateTime<Utc>,
    pub created_at: DateTime<Utc>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CreateSession {
    pub tenant_id: Uuid,
    pub user_id: Uuid,
    pub token_hash: String,
    pub display_name: String,
    pub expires_at: DateTime<Utc>,
}

/// The authenticated user + tenant context attached to a request.
///
/// Produced by `authenticate`, re-derived from the token by
/// `require_session`, and the only way to obtain a tenant-bound
/// clinical handle.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct SessionIdentity {
    pub user_id: Uuid,
    pub tenant_id: Uuid,
    pub display_name: String,
}

impl Session {
    pub fn identity(&self) -> SessionIdentity {
        SessionIdentity {
            user_id: self.user_id,
            tenant_id: self.tenant_id,
            display_name: self.display_name.clone(),
        }
    }

    pub fn is_expired(&self, now: DateTime<Utc>) -> bool {
        self.expires_at <= now
    }
}
