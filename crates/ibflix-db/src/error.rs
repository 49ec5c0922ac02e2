//! Database-specific error types and conversions.

use ibflix_core::error::IbflixError;

/// Database-layer error type.
#[derive(Debug, thiserror::Error)]
pub enum DbError {
    #[error("SurrealDB error: {0}")]
    Surreal(#[from] surrealdb::Error),

    #[error("Cannot connect to {url}: {reason}")]
    Connection { url: String, reason: String },

    #[error("Migration failed: {0}")]
    Migration(String),

    #[error("Query failed: {0}")]
    Query(String),

    #[error("Stored {entity} record could not be decoded: {reason}")]
    Decode { entity: &'static str, reason: String },

    #[error("Record not found: {entity} with id {id}")]
    NotFound { entity: String, id: String },
}

impl From<DbError> for IbflixError {
    fn from(err: DbError) -> Self {
        match err {
            DbError::NotFound { entity, id } => IbflixError::NotFound { entity, id },
            DbError::Decode { .. } => IbflixError::Internal(err.to_string()),
            other => IbflixError::Store(other.to_string()),
        }
    }
}
