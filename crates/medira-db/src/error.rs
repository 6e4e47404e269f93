//! Database-specific error types and conversions.

use medira_core::error::MediraError;

/// Database-layer error type.
#[derive(Debug, thiserror::Error)]
pub enum DbError {
    #[error("SurrealDB error: {0}")]
    Surreal(#[from] surrealdb::Error),

    #[error("Query failed: {0}")]
    Query(String),

    #[error("Migration failed: {0}")]
    Migration(String),

    #[error("Record not found: {entity} with id {id}")]
    NotFound { entity: String, id: String },
}

impl From<DbError> for MediraError {
    fn from(err: DbError) -> Self {
        match err {
            DbError::NotFound { entity, id } => MediraError::NotFound { entity, id },
            other => MediraError::Database(other.to_string()),
        }
    }
}

/// If the error is a unique-index violation, return the index name.
///
/// SurrealDB reports these as
/// `Database index 'idx_x' already contains ...` (the quoting style has
/// varied across releases, so both backticks and single quotes are
/// accepted). The unique indexes defined in the schema are the single
/// source of truth for uniqueness, so repositories turn this error into
/// the matching domain error instead of pre-checking.
pub(crate) fn unique_index_violation(err: &surrealdb::Error) -> Option<String> {
    let msg = err.to_string();
    if !msg.contains("already contains") {
        return None;
    }
    let start = msg.find("index")? + "index".len();
    let rest = msg[start..].trim_start();
    let quote = rest.chars().next()?;
    if quote != '`' && quote != '\'' {
        return None;
    }
    let rest = &rest[1..];
    let end = rest.find(quote)?;
    Some(rest[..end].to_string())
}
