//! Error types for the gateway.

use roster_core::{CoreError, EmployeeId, ValidationError};
use roster_store::StoreError;
use thiserror::Error;

/// Errors that can occur during gateway operations.
#[derive(Debug, Error)]
pub enum GatewayError {
    /// The document store failed or could not be reached.
    #[error("storage error: {0}")]
    Store(#[from] StoreError),

    /// A stored document could not be decoded into a record.
    #[error("decode error: {0}")]
    Decode(#[from] CoreError),

    /// The record was rejected before writing.
    #[error("validation error: {0}")]
    Validation(#[from] ValidationError),

    /// No record exists for the id.
    #[error("employee not found: {0}")]
    NotFound(EmployeeId),
}

/// Result type for gateway operations.
pub type Result<T> = std::result::Result<T, GatewayError>;
