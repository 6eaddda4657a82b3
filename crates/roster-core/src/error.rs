//! Error types for Roster Core.

use thiserror::Error;

/// Errors converting between raw input, documents and records.
#[derive(Debug, Error)]
pub enum CoreError {
    #[error("invalid employee id: {0:?}")]
    InvalidEmployeeId(String),

    #[error("invalid date {input:?}: expected YYYY-MM-DD")]
    InvalidDate { input: String },

    #[error("document {key} is missing field {field}")]
    MissingField { key: String, field: &'static str },

    #[error("document {key} field {field} has type {found}, expected {expected}")]
    FieldType {
        key: String,
        field: &'static str,
        expected: &'static str,
        found: &'static str,
    },

    #[error("document key {key} does not match stored employeeId {stored}")]
    KeyMismatch { key: String, stored: i64 },
}

/// Structural validation errors for records.
#[derive(Debug, Error, PartialEq, Eq)]
pub enum ValidationError {
    #[error("field {0} must not be blank")]
    BlankField(&'static str),
}
