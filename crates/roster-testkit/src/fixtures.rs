//! Test fixtures and helpers.
//!
//! Known records for integration tests.

use roster_core::{parse_birthdate, sample_employees, Employee, EmployeeId};

/// The sample employees as the JSON a client would submit.
pub const SAMPLE_JSON: &str = r#"[
  { "employeeId": 1, "firstName": "John", "lastName": "Doe", "birthdate": "1978-10-12" },
  { "employeeId": 2, "firstName": "Jane", "lastName": "Smith", "birthdate": "1970-02-10" },
  { "employeeId": 3, "firstName": "Keith", "lastName": "Johnson", "birthdate": "1989-03-02" }
]"#;

/// Build a record, panicking on a malformed date.
pub fn employee(id: i64, first: &str, last: &str, birthdate: &str) -> Employee {
    let birthdate = parse_birthdate(birthdate).expect("fixture birthdate must be YYYY-MM-DD");
    Employee::new(id, first, last, birthdate)
}

fn sample(id: i64) -> Employee {
    sample_employees()
        .into_iter()
        .find(|e| e.employee_id == EmployeeId(id))
        .expect("sample employee exists")
}

pub fn john_doe() -> Employee {
    sample(1)
}

pub fn jane_smith() -> Employee {
    sample(2)
}

pub fn keith_johnson() -> Employee {
    sample(3)
}

/// Parse a JSON array of records.
pub fn employees_from_json(json: &str) -> serde_json::Result<Vec<Employee>> {
    serde_json::from_str(json)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_sample_json_matches_fixtures() {
        let parsed = employees_from_json(SAMPLE_JSON).unwrap();
        assert_eq!(parsed, vec![john_doe(), jane_smith(), keith_johnson()]);
    }

    #[test]
    fn test_named_fixtures_are_the_samples() {
        assert_eq!(john_doe(), employee(1, "John", "Doe", "1978-10-12"));
        assert_eq!(
            vec![john_doe(), jane_smith(), keith_johnson()],
            sample_employees()
        );
    }

    #[test]
    fn test_malformed_json_rejected() {
        let json = r#"[{ "employeeId": 1, "firstName": "John", "lastName": "Doe", "birthdate": "12/10/1978" }]"#;
        assert!(employees_from_json(json).is_err());
    }
}
