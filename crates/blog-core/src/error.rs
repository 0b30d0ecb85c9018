//! Domain-level error types.

use thiserror::Error;

use crate::ports::{MailError, MediaError};

/// Domain errors - business logic failures.
#[derive(Debug, Error)]
pub enum DomainError {
    /// The acting user does not own the entity it tried to change.
    #[error("You are not author of this {0}")]
    NotAuthor(&'static str),

    #[error("{0}")]
    NotFound(String),

    #[error("{0}")]
    Validation(String),

    #[error("{0}")]
    Duplicate(String),

    #[error("Email or password is incorrect.")]
    InvalidCredentials,

    /// Activation or password-reset token is expired or malformed.
    #[error("Link expired. Please signup again")]
    LinkExpired,

    #[error("Upstream service failed: {0}")]
    Upstream(String),

    #[error("Internal error: {0}")]
    Internal(String),
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

    /// A foreign key points at a row that does not exist (or no longer does).
    #[error("Missing referenced row: {0}")]
    MissingReference(String),
}

impl From<RepoError> for DomainError {
    fn from(err: RepoError) -> Self {
        match err {
            RepoError::Constraint(msg) => DomainError::Duplicate(msg),
            RepoError::MissingReference(detail) => {
                tracing::debug!(detail = %detail, "Write referenced a missing row");
                DomainError::NotFound("Referenced record no longer exists".to_string())
            }
            other => DomainError::Internal(other.to_string()),
        }
    }
}

impl From<MailError> for DomainError {
    fn from(err: MailError) -> Self {
        DomainError::Upstream(err.to_string())
    }
}

impl From<MediaError> for DomainError {
    fn from(err: MediaError) -> Self {
        DomainError::Upstream(err.to_string())
    }
}
