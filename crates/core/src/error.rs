//! Domain error model.

use thiserror::Error;

/// Result type used across the domain layer.
pub type DomainResult<T> = Result<T, DomainError>;

/// Domain-level error taxonomy.
///
/// Every variant is terminal for the triggering operation: nothing in the core
/// is silently retried. `Unauthorized` is deliberately uninformative so that
/// callers cannot distinguish "bad token" from "token valid but account gone".
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum DomainError {
    /// Missing, invalid, or expired credential/token.
    #[error("unauthorized")]
    Unauthorized,

    /// Valid principal lacking the required privilege.
    #[error("forbidden")]
    Forbidden,

    /// Structurally disallowed action (e.g. deleting your own account).
    #[error("invalid operation: {0}")]
    InvalidOperation(String),

    /// A referenced entity is absent.
    #[error("not found")]
    NotFound,

    /// A principal with this email is already registered.
    #[error("email already registered")]
    DuplicateEmail,

    /// The candidate customer matches an existing record under the
    /// name + contact-info rule.
    #[error("customer with this contact info already exists")]
    DuplicateCustomer,

    /// A transaction referenced a customer that does not exist.
    #[error("unknown customer")]
    UnknownCustomer,

    /// A stored credential digest is malformed. Distinct from a plain
    /// password mismatch, which is a normal `Ok(false)` outcome.
    #[error("corrupt stored credential")]
    CorruptCredential,

    /// A value failed validation (e.g. malformed input).
    #[error("validation failed: {0}")]
    Validation(String),

    /// Generic passthrough for transient storage failures.
    #[error("storage unavailable: {0}")]
    StorageUnavailable(String),
}

impl DomainError {
    pub fn invalid_operation(msg: impl Into<String>) -> Self {
        Self::InvalidOperation(msg.into())
    }

    pub fn validation(msg: impl Into<String>) -> Self {
        Self::Validation(msg.into())
    }

    pub fn invalid_id(msg: impl Into<String>) -> Self {
        Self::Validation(msg.into())
    }

    pub fn storage(msg: impl Into<String>) -> Self {
        Self::StorageUnavailable(msg.into())
    }
}
