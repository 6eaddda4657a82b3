//! # Roster Core
//!
//! Pure types for Roster: employee records and the document fields they are
//! stored as.
//!
//! This crate contains no I/O, no storage, no networking. It is pure
//! conversion and comparison over plain data.
//!
//! ## Key Types
//!
//! - [`Employee`] - A complete employee record
//! - [`EmployeeId`] - Integer identifier, also the document key
//! - [`EmployeeUpdate`] - A partial record used for diff-based updates
//! - [`FieldChanges`] - The subset of fields that actually differ
//! - [`Document`] / [`Fields`] / [`FieldValue`] - The stored shape of a record
//!
//! ## Document Shape
//!
//! Records are stored as one document per employee, keyed by the decimal
//! string of the id. See the [`document`] and [`employee`] modules.

pub mod document;
pub mod employee;
pub mod error;
pub mod types;
pub mod validation;

pub use document::{Document, FieldValue, Fields};
pub use employee::{
    parse_birthdate, sample_employees, Employee, EmployeeUpdate, FieldChanges, BIRTHDATE,
    EMPLOYEE_ID, FIRST_NAME, LAST_NAME,
};
pub use error::{CoreError, ValidationError};
pub use types::EmployeeId;
pub use validation::{validate_employee, validate_update};
