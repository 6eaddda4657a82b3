//! Employee records and diff-based updates.
//!
//! An [`Employee`] is stored as a document with four fields. Updates are
//! expressed as an [`EmployeeUpdate`] (any subset of the mutable fields) and
//! reduced to [`FieldChanges`] against the currently stored record, so only
//! fields whose value actually differs are written.

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

use crate::document::{Document, FieldValue, Fields};
use crate::error::CoreError;
use crate::types::EmployeeId;

/// Stored field name of the id.
pub const EMPLOYEE_ID: &str = "employeeId";
/// Stored field name of the first name.
pub const FIRST_NAME: &str = "firstName";
/// Stored field name of the last name.
pub const LAST_NAME: &str = "lastName";
/// Stored field name of the birthdate.
pub const BIRTHDATE: &str = "birthdate";

/// Date format accepted from form input (`<input type="date">`).
const DATE_FORMAT: &str = "%Y-%m-%d";

/// Parse a `YYYY-MM-DD` date.
pub fn parse_birthdate(input: &str) -> Result<NaiveDate, CoreError> {
    NaiveDate::parse_from_str(input.trim(), DATE_FORMAT).map_err(|_| CoreError::InvalidDate {
        input: input.to_string(),
    })
}

/// A complete employee record.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Employee {
    pub employee_id: EmployeeId,
    pub first_name: String,
    pub last_name: String,
    pub birthdate: NaiveDate,
}

impl Employee {
    pub fn new(
        employee_id: impl Into<EmployeeId>,
        first_name: impl Into<String>,
        last_name: impl Into<String>,
        birthdate: NaiveDate,
    ) -> Self {
        Self {
            employee_id: employee_id.into(),
            first_name: first_name.into(),
            last_name: last_name.into(),
            birthdate,
        }
    }

    /// Build a record from raw form values.
    ///
    /// The id must be an integer and the birthdate must be `YYYY-MM-DD`.
    pub fn from_form(
        employee_id: &str,
        first_name: &str,
        last_name: &str,
        birthdate: &str,
    ) -> Result<Self, CoreError> {
        Ok(Self {
            employee_id: employee_id.parse()?,
            first_name: first_name.to_string(),
            last_name: last_name.to_string(),
            birthdate: parse_birthdate(birthdate)?,
        })
    }

    /// The document key of this record.
    pub fn key(&self) -> String {
        self.employee_id.document_key()
    }

    /// All four stored fields.
    pub fn to_fields(&self) -> Fields {
        let mut fields = Fields::new();
        fields.insert(EMPLOYEE_ID.into(), FieldValue::Integer(self.employee_id.get()));
        fields.insert(FIRST_NAME.into(), FieldValue::Text(self.first_name.clone()));
        fields.insert(LAST_NAME.into(), FieldValue::Text(self.last_name.clone()));
        fields.insert(BIRTHDATE.into(), FieldValue::Date(self.birthdate));
        fields
    }

    /// The full document for this record.
    pub fn to_document(&self) -> Document {
        Document::new(self.key(), self.to_fields())
    }

    /// Decode a stored document.
    ///
    /// Fails if a field is missing or mistyped, or if the stored id does not
    /// match the document key.
    pub fn from_document(doc: &Document) -> Result<Self, CoreError> {
        let employee_id = field(doc, EMPLOYEE_ID, "integer", FieldValue::as_integer)?;
        if doc.key != employee_id.to_string() {
            return Err(CoreError::KeyMismatch {
                key: doc.key.clone(),
                stored: employee_id,
            });
        }

        Ok(Self {
            employee_id: EmployeeId(employee_id),
            first_name: field(doc, FIRST_NAME, "text", |v| v.as_text().map(String::from))?,
            last_name: field(doc, LAST_NAME, "text", |v| v.as_text().map(String::from))?,
            birthdate: field(doc, BIRTHDATE, "date", FieldValue::as_date)?,
        })
    }
}

fn field<T>(
    doc: &Document,
    name: &'static str,
    expected: &'static str,
    extract: impl FnOnce(&FieldValue) -> Option<T>,
) -> Result<T, CoreError> {
    let value = doc.get(name).ok_or_else(|| CoreError::MissingField {
        key: doc.key.clone(),
        field: name,
    })?;
    extract(value).ok_or_else(|| CoreError::FieldType {
        key: doc.key.clone(),
        field: name,
        expected,
        found: value.type_name(),
    })
}

/// A partial record: the id plus any mutable fields to set.
///
/// `None` means "leave as stored".
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct EmployeeUpdate {
    pub employee_id: EmployeeId,
    pub first_name: Option<String>,
    pub last_name: Option<String>,
    pub birthdate: Option<NaiveDate>,
}

impl EmployeeUpdate {
    /// An update that changes nothing yet.
    pub fn new(employee_id: impl Into<EmployeeId>) -> Self {
        Self {
            employee_id: employee_id.into(),
            ..Default::default()
        }
    }

    pub fn first_name(mut self, first_name: impl Into<String>) -> Self {
        self.first_name = Some(first_name.into());
        self
    }

    pub fn last_name(mut self, last_name: impl Into<String>) -> Self {
        self.last_name = Some(last_name.into());
        self
    }

    pub fn birthdate(mut self, birthdate: NaiveDate) -> Self {
        self.birthdate = Some(birthdate);
        self
    }

    /// Build an update from raw form values.
    ///
    /// Empty form values are treated as "not supplied".
    pub fn from_form(
        employee_id: &str,
        first_name: &str,
        last_name: &str,
        birthdate: &str,
    ) -> Result<Self, CoreError> {
        let birthdate = match birthdate.trim() {
            "" => None,
            s => Some(parse_birthdate(s)?),
        };
        Ok(Self {
            employee_id: employee_id.parse()?,
            first_name: non_empty(first_name),
            last_name: non_empty(last_name),
            birthdate,
        })
    }

    /// The fields of this update that differ from `current`.
    ///
    /// Birthdates compare by calendar date.
    pub fn diff(&self, current: &Employee) -> FieldChanges {
        FieldChanges {
            first_name: self
                .first_name
                .as_ref()
                .filter(|v| **v != current.first_name)
                .cloned(),
            last_name: self
                .last_name
                .as_ref()
                .filter(|v| **v != current.last_name)
                .cloned(),
            birthdate: self.birthdate.filter(|v| *v != current.birthdate),
        }
    }
}

fn non_empty(s: &str) -> Option<String> {
    (!s.is_empty()).then(|| s.to_string())
}

impl From<Employee> for EmployeeUpdate {
    fn from(e: Employee) -> Self {
        Self {
            employee_id: e.employee_id,
            first_name: Some(e.first_name),
            last_name: Some(e.last_name),
            birthdate: Some(e.birthdate),
        }
    }
}

impl From<&Employee> for EmployeeUpdate {
    fn from(e: &Employee) -> Self {
        Self::from(e.clone())
    }
}

/// The fields that actually changed.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct FieldChanges {
    pub first_name: Option<String>,
    pub last_name: Option<String>,
    pub birthdate: Option<NaiveDate>,
}

impl FieldChanges {
    pub fn is_empty(&self) -> bool {
        self.first_name.is_none() && self.last_name.is_none() && self.birthdate.is_none()
    }

    /// Stored names of the changed fields.
    pub fn field_names(&self) -> Vec<&'static str> {
        let mut names = Vec::new();
        if self.first_name.is_some() {
            names.push(FIRST_NAME);
        }
        if self.last_name.is_some() {
            names.push(LAST_NAME);
        }
        if self.birthdate.is_some() {
            names.push(BIRTHDATE);
        }
        names
    }

    /// Only the changed fields, ready for a partial write.
    pub fn to_fields(&self) -> Fields {
        let mut fields = Fields::new();
        if let Some(v) = &self.first_name {
            fields.insert(FIRST_NAME.into(), FieldValue::Text(v.clone()));
        }
        if let Some(v) = &self.last_name {
            fields.insert(LAST_NAME.into(), FieldValue::Text(v.clone()));
        }
        if let Some(v) = self.birthdate {
            fields.insert(BIRTHDATE.into(), FieldValue::Date(v));
        }
        fields
    }

    /// Apply the changes to a record.
    pub fn apply_to(&self, employee: &mut Employee) {
        if let Some(v) = &self.first_name {
            employee.first_name = v.clone();
        }
        if let Some(v) = &self.last_name {
            employee.last_name = v.clone();
        }
        if let Some(v) = self.birthdate {
            employee.birthdate = v;
        }
    }
}

/// The three sample employees used to seed an empty collection.
pub fn sample_employees() -> Vec<Employee> {
    vec![
        Employee::new(1, "John", "Doe", ymd(1978, 10, 12)),
        Employee::new(2, "Jane", "Smith", ymd(1970, 2, 10)),
        Employee::new(3, "Keith", "Johnson", ymd(1989, 3, 2)),
    ]
}

fn ymd(year: i32, month: u32, day: u32) -> NaiveDate {
    NaiveDate::from_ymd_opt(year, month, day).unwrap_or_default()
}
