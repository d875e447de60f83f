//! Domain error taxonomy shared by every service.

use thiserror::Error;

#[derive(Debug, Error)]
pub enum DomainError {
    #[error("Not found: {entity} with {field}={value}")]
    NotFound {
        entity: &'static str,
        field: &'static str,
        value: String,
    },

    #[error("Invalid input: {0}")]
    InvalidInput(String),

    #[error("Invalid booking duration: end must be after start")]
    InvalidDuration,

    #[error("No available spaces")]
    NoAvailability,

    #[error("Insufficient wallet balance")]
    InsufficientFunds,

    #[error("No {0} linked to this account")]
    InstrumentNotLinked(&'static str),

    #[error("Payment gateway declined transaction")]
    GatewayDeclined,

    #[error("Payment already completed for this reservation")]
    AlreadySettled,

    #[error("Insufficient reward points")]
    InsufficientPoints,

    #[error("Resource busy, retry: {0}")]
    Busy(&'static str),

    #[error("Forbidden: {0}")]
    Forbidden(String),

    #[error("Already exists: {0}")]
    Conflict(String),

    #[error("Storage error: {0}")]
    StorageError(String),
}

impl DomainError {
    /// Whether the caller may retry the same operation and expect it to
    /// succeed (lock contention, simulated gateway decline).
    pub fn is_retryable(&self) -> bool {
        matches!(self, DomainError::Busy(_) | DomainError::GatewayDeclined)
    }
}

/// Result type for domain operations
pub type DomainResult<T> = Result<T, DomainError>;

// ── Tests ──────────────────────────────────────────────────────
