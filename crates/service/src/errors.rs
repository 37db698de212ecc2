use sea_orm::DbErr;
use thiserror::Error;

#[derive(Debug, Error)]
pub enum ServiceError {
    #[error("validation error: {0}")]
    Validation(String),
    #[error("not found: {0}")]
    NotFound(String),
    #[error("database error: {0}")]
    Db(String),
    #[error("internal error: {0}")]
    Internal(String),
    #[error("model error: {0}")]
    Model(#[from] models::errors::ModelError),
}

impl ServiceError {
    pub fn not_found(entity: &str) -> Self { Self::NotFound(format!("{} not found", entity)) }

    /// Storage failures, duplicate keys included, keep the driver's text.
    pub fn from_db(e: DbErr) -> Self { Self::Db(e.to_string()) }

    /// Stable category for clients and logs.
    pub fn kind(&self) -> &'static str {
        match self {
            ServiceError::Validation(_) | ServiceError::Model(_) => "validation_error",
            ServiceError::NotFound(_) => "not_found",
            ServiceError::Db(_) | ServiceError::Internal(_) => "internal_error",
        }
    }
}
