use thiserror::Error;

/// Errors raised by the domain model, its operations and the store contract
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum DomainError {
    /// Entity id or referenced foreign entity is absent
    #[error("{0}")]
    NotFound(String),

    /// Missing required field, id supplied on create, malformed partial update
    #[error("{0}")]
    InvalidArgument(String),

    /// Lifecycle transition attempted from the wrong state
    #[error("{0}")]
    InvalidTransition(String),

    /// Start timestamp lies after end timestamp
    #[error("{0}")]
    Validation(String),

    /// Unique constraint violated
    #[error("{0}")]
    Conflict(String),

    /// Connectivity or unexpected storage failure
    #[error("Store error: {0}")]
    Store(String),
}

pub type DomainResult<T> = Result<T, DomainError>;

impl DomainError {
    pub fn not_found(message: impl Into<String>) -> Self {
        Self::NotFound(message.into())
    }

    pub fn invalid_argument(message: impl Into<String>) -> Self {
        Self::InvalidArgument(message.into())
    }

    pub fn store(message: impl Into<String>) -> Self {
        Self::Store(message.into())
    }
}
