use thiserror::Error;

#[derive(Debug, Error)]
pub enum RepositoryError {
    #[error("Entity not found: {0}")]
    NotFound(String),
    #[error("Forbidden: {0}")]
    Forbidden(String),
    #[error("{0}")]
    Conflict(String),
    #[error("{0}")]
    ValidationError(String),
    #[error("{0} is not available: {1}")]
    NotAvailable(String, String),
    #[error("Invalid status transition: {0}")]
    InvalidTransition(String),
    #[error("Database error: {0}")]
    DatabaseError(#[from] diesel::result::Error),
    #[error("Connection pool error: {0}")]
    ConnectionPoolError(#[from] diesel::r2d2::PoolError),
    #[error("Worker error: {0}")]
    WorkerError(String),
}

impl RepositoryError {
    /// Maps diesel errors for single-row lookups, turning `NotFound` and
    /// unique-key violations into their domain variants.
    pub fn from_diesel(err: diesel::result::Error, entity: &str) -> Self {
        use diesel::result::{DatabaseErrorKind, Error};
        match err {
            Error::NotFound => RepositoryError::NotFound(entity.to_string()),
            Error::DatabaseError(DatabaseErrorKind::UniqueViolation, info) => {
                RepositoryError::Conflict(format!("{entity} already exists: {}", info.message()))
            }
            other => RepositoryError::DatabaseError(other),
        }
    }
}
