//! Error types for the IB FLIX backend.

use thiserror::Error;

#[derive(Debug, Error)]
pub enum IbflixError {
    #[error("Entity not found: {entity} with id {id}")]
    NotFound { entity: String, id: String },

    #[error("Validation error on `{field}`: {message}")]
    Validation { field: String, message: String },

    #[error("Store error: {0}")]
    Store(String),

    #[error("Internal error: {0}")]
    Internal(String),
}

impl IbflixError {
    pub fn not_found(entity: &str, id: impl ToString) -> Self {
        Self::NotFound {
            entity: entity.into(),
            id: id.to_string(),
        }
    }
}

pub type IbflixResult<T> = Result<T, IbflixError>;
