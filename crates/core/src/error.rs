//! Domain error model.

use thiserror::Error;

/// Result type used across the domain layer.
pub type DomainResult<T> = Result<T, DomainError>;

/// Domain-level error.
///
/// Covers every failure the service surfaces to a caller: validation,
/// duplicate receipt numbers, missing records, and storage failures.
/// The HTTP layer maps each variant to a status code in one place.
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum DomainError {
    /// A required field was missing or malformed.
    #[error("validation failed: {0}")]
    Validation(String),

    /// A receipt with the given receipt number already exists.
    ///
    /// Surfaced distinctly from other conflicts so the caller can prompt
    /// the operator for a different number.
    #[error("duplicate receipt number: {0}")]
    DuplicateReceiptNo(String),

    /// The requested receipt does not exist. Terminal, not a fault.
    #[error("receipt not found")]
    NotFound,

    /// Connectivity or unexpected storage failure.
    #[error("storage failure: {0}")]
    Storage(String),
}

impl DomainError {
    pub fn validation(msg: impl Into<String>) -> Self {
        Self::Validation(msg.into())
    }

    pub fn duplicate(receipt_no: impl Into<String>) -> Self {
        Self::DuplicateReceiptNo(receipt_no.into())
    }

    pub fn storage(msg: impl Into<String>) -> Self {
        Self::Storage(msg.into())
    }

    pub fn not_found() -> Self {
        Self::NotFound
    }
}
