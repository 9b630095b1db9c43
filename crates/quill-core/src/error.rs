//! Domain-level error types.

use thiserror::Error;

use crate::validation::FieldErrors;

/// Domain errors - business logic failures.
#[derive(Debug, Error)]
pub enum DomainError {
    #[error("{entity_type} not found: {key}")]
    NotFound {
        entity_type: &'static str,
        key: String,
    },

    #[error("Validation failed on: {0}")]
    Validation(FieldErrors),

    #[error("Conflict: {0}")]
    Conflict(String),

    #[error("Store failure: {0}")]
    Store(String),
}

impl DomainError {
    pub fn not_found(entity_type: &'static str, key: impl ToString) -> Self {
        Self::NotFound {
            entity_type,
            key: key.to_string(),
        }
    }
}

impl From<FieldErrors> for DomainError {
    fn from(errors: FieldErrors) -> Self {
        Self::Validation(errors)
    }
}

impl From<validator::ValidationErrors> for DomainError {
    fn from(errors: validator::ValidationErrors) -> Self {
        Self::Validation(errors.into())
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

/// Store failures that are not a business outcome collapse into `Store`.
/// `NotFound` and `Constraint` are mapped by the services, which know the
/// entity and key involved.
impl From<RepoError> for DomainError {
    fn from(err: RepoError) -> Self {
        match err {
            RepoError::NotFound => DomainError::NotFound {
                entity_type: "Entity",
                key: String::new(),
            },
            RepoError::Constraint(msg) => DomainError::Conflict(msg),
            RepoError::Connection(msg) | RepoError::Query(msg) => DomainError::Store(msg),
        }
    }
}
