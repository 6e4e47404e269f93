//! Authentication service — login, session gating, and logout.

use chrono::{DateTime, Duration, Utc};
use medira_core::error::{MediraError, MediraResult};
use medira_core::models::session::{CreateSession, SessionIdentity};
use medira_core::repository::{SessionRepository, UserRepository};
use tracing::debug;

use crate::config::AuthConfig;
use crate::error::AuthError;
use crate::password;
use crate::token;

/// Successful login result.
#[derive(Debug)]
pub struct LoginOutput {
    /// Raw opaque session token (return to client, not stored).
    pub session_token: String,
    /// Who logged in, and into which hospital.
    pub identity: SessionIdentity,
    pub expires_at: DateTime<Utc>,
}

/// Authentication service.
///
/// Generic over repository implementations so that the auth layer
/// has no dependency on the database crate.
pub struct AuthService<U: UserRepository, S: SessionRepository> {
    user_repo: U,
    session_repo: S,
    config: AuthConfig,
}

impl<U: UserRepository, S: SessionRepository> AuthService<U, S> {
    pub fn new(user_repo: U, session_repo: S, config: AuthConfig) -> Self {
        Self {
            user_repo,
            session_repo,
            config,
        }
    }

    /// Authenticate with email + password and open a session.
    ///
    /// Unknown email and wrong password return the identical
    /// `InvalidCredentials` value, so a caller cannot probe which
    /// emails are registered.
    pub async fn authenticate(&self, email: &str, password: &str) -> MediraResult<LoginOutput> {
        let user = match self.user_repo.get_by_email(email).await {
            Ok(u) => u,
            Err(MediraError::NotFound { .. }) => {
                return Err(AuthError::InvalidCredentials.into());
            }
            Err(e) => return Err(e),
        };

        let valid = password::verify_password(
            password,
            &user.password_hash,
            self.config.pepper.as_deref(),
        )
        .map_err(MediraError::from)?;
        if !valid {
            return Err(AuthError::InvalidCredentials.into());
        }

        let raw_token = token::generate_session_token();
        let expires_at = Utc::now() + Duration::seconds(self.config.session_lifetime_secs as i64);

        let session = self
            .session_repo
            .create(CreateSession {
                tenant_id: user.tenant_id,
                user_id: user.id,
                token_hash: token::hash_session_token(&raw_token),
                display_name: user.display_name(),
                expires_at,
            })
            .await?;

        debug!(user_id = %user.id, tenant_id = %user.tenant_id, "session opened");

        Ok(LoginOutput {
            session_token: raw_token,
            identity: session.identity(),
            expires_at: session.expires_at,
        })
    }

    /// Resolve a raw session token into the identity it belongs to.
    ///
    /// Every protected operation calls this first; there is no other
    /// way to obtain a [`SessionIdentity`]. Unknown and expired tokens
    /// both fail with `Unauthenticated`, and an expired session row is
    /// deleted on discovery.
    pub async fn require_session(&self, raw_token: &str) -> MediraResult<SessionIdentity> {
        let token_hash = token::hash_session_token(raw_token);

        let session = match self.session_repo.get_by_token_hash(&token_hash).await {
            Ok(s) => s,
            Err(MediraError::NotFound { .. }) => {
                return Err(AuthError::SessionInvalid.into());
            }
            Err(e) => return Err(e),
        };

        if session.is_expired(Utc::now()) {
            debug!(session_id = %session.id, "expired session purged");
            self.session_repo.delete(session.id).await?;
            return Err(AuthError::SessionExpired.into());
        }

        Ok(session.identity())
    }

    /// Close the session behind a raw token. Unknown tokens are a
    /// no-op, so logout is idempotent.
    pub async fn logout(&self, raw_token: &str) -> MediraResult<()> {
        let token_hash = token::hash_session_token(raw_token);
        match self.session_repo.get_by_token_hash(&token_hash).await {
            Ok(session) => self.session_repo.delete(session.id).await,
            Err(MediraError::NotFound { .. }) => Ok(()),
            Err(e) => Err(e),
        }
    }
}
