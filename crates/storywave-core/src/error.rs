//! Domain-level error types.

use thiserror::Error;

/// Domain errors - business logic failures.
#[derive(Debug, Error)]
pub enum DomainError {
    /// A caller-supplied argument did not resolve to anything usable,
    /// e.g. an acting user id that does not exist or a negative page index.
    #[error("Invalid argument: {0}")]
    InvalidArgument(String),

    /// Store failures are passed through untouched.
    #[error(transparent)]
    Repository(#[from] RepoError),
}

impl DomainError {
    pub fn invalid_argument(msg: impl Into<String>) -> Self {
        Self::InvalidArgument(msg.into())
    }
}

/// Repository-level errors.
#[derive(Debug, Error)]
pub enum RepoError {
    #[error("Database connection failed: {0}")]
    Connection(String),

    #[error("Query execution failed: {0}")]
    Query(String),

    #[error("Entity not found")]
    NotFound,

    #[error("Constraint violation: {0}")]
    Constraint(String),
}

/// Result alias used by the service layer.
pub type DomainResult<T> = Result<T, DomainError>;
