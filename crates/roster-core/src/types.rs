//! Strong type definitions for Roster.
//!
//! Identifiers are newtypes so an employee id can't be confused with any
//! other integer.

use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

use crate::error::CoreError;

/// An employee identifier.
///
/// Unique within the collection and immutable once a record exists. Its
/// decimal string form is the document key. Ids parsed from text are
/// non-negative.
#[derive(Clone, Copy, Default, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct EmployeeId(pub i64);

impl EmployeeId {
    /// Create a new EmployeeId.
    pub const fn new(id: i64) -> Self {
        Self(id)
    }

    /// Get the raw integer.
    pub const fn get(&self) -> i64 {
        self.0
    }

    /// The document key addressing this record.
    pub fn document_key(&self) -> String {
        self.0.to_string()
    }

    /// Parse a document key back into an id.
    pub fn from_document_key(key: &str) -> Result<Self, CoreError> {
        key.parse()
    }
}

impl fmt::Debug for EmployeeId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "EmployeeId({})", self.0)
    }
}

impl fmt::Display for EmployeeId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

impl From<i64> for EmployeeId {
    fn from(id: i64) -> Self {
        Self(id)
    }
}

impl FromStr for EmployeeId {
    type Err = CoreError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().parse::<i64>() {
            Ok(id) if id >= 0 => Ok(Self(id)),
            _ => Err(CoreError::InvalidEmployeeId(s.to_string())),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_document_key_roundtrip() {
        let id = EmployeeId::new(42);
        assert_eq!(id.document_key(), "42");
        assert_eq!(EmployeeId::from_document_key("42").unwrap(), id);
    }

    #[test]
    fn test_parse_trims_whitespace() {
        assert_eq!(" 7 ".parse::<EmployeeId>().unwrap(), EmployeeId(7));
    }

    #[test]
    fn test_parse_rejects_garbage() {
        assert!(matches!(
            "abc".parse::<EmployeeId>(),
            Err(CoreError::InvalidEmployeeId(s)) if s == "abc"
        ));
        assert!("-1".parse::<EmployeeId>().is_err());
        assert!("".parse::<EmployeeId>().is_err());
    }

    #[test]
    fn test_employee_id_debug() {
        assert_eq!(format!("{:?}", EmployeeId(3)), "EmployeeId(3)");
    }
}
