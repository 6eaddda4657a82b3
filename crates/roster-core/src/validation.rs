//! Structural checks on records before they are written.

use crate::employee::{Employee, EmployeeUpdate, FIRST_NAME, LAST_NAME};
use crate::error::ValidationError;

/// Validate a full record.
///
/// First and last names must contain something other than whitespace.
pub fn validate_employee(employee: &Employee) -> Result<(), ValidationError> {
    require_text(FIRST_NAME, &employee.first_name)?;
    require_text(LAST_NAME, &employee.last_name)?;
    Ok(())
}

/// Validate the supplied fields of a partial record.
pub fn validate_update(update: &EmployeeUpdate) -> Result<(), ValidationError> {
    if let Some(v) = &update.first_name {
        require_text(FIRST_NAME, v)?;
    }
    if let Some(v) = &update.last_name {
        require_text(LAST_NAME, v)?;
    }
    Ok(())
}

fn require_text(field: &'static str, value: &str) -> Result<(), ValidationError> {
    if value.trim().is_empty() {
        return Err(ValidationError::BlankField(field));
    }
    Ok(())
}
