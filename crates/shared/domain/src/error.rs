//! Domain-level errors.
//!
//! These errors represent business rule violations and domain logic failures.
//! They are independent of infrastructure concerns (HTTP, database).

use thiserror::Error;

/// Domain-specific errors for business rule violations.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum DomainError {
    /// Validation failed for a field or input
    #[error("Validation error: {0}")]
    Validation(String),

    /// Value already taken by another entity (conflict)
    #[error("{0} already exists")]
    Conflict(String),

    /// Attempt to change a field that is fixed after creation
    #[error("{0} cannot be modified")]
    RejectedFieldChange(String),

    /// Internal domain error
    #[error("Internal error: {0}")]
    Internal(String),
}

impl DomainError {
    /// Create a validation error
    pub fn validation(msg: impl Into<String>) -> Self {
        DomainError::Validation(msg.into())
    }

    /// Create a conflict error
    pub fn conflict(field: impl Into<String>) -> Self {
        DomainError::Conflict(field.into())
    }

    /// Create a rejected field change error
    pub fn rejected_field_change(field: impl Into<String>) -> Self {
        DomainError::RejectedFieldChange(field.into())
    }

    /// Create an internal error
    pub fn internal(msg: impl Into<String>) -> Self {
        DomainError::Internal(msg.into())
    }
}

/// Result type alias for domain operations
pub type DomainResult<T> = Result<T, DomainError>;
