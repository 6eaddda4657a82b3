//! Proptest generators for property-based testing.

use std::collections::BTreeMap;

use chrono::{Duration, NaiveDate};
use proptest::prelude::*;

use roster_core::{Employee, EmployeeId, EmployeeUpdate};

/// Generate an employee id.
pub fn employee_id() -> impl Strategy<Value = EmployeeId> {
    (0i64..1_000_000).prop_map(EmployeeId)
}

/// Generate a non-blank name.
pub fn name() -> impl Strategy<Value = String> {
    "[A-Z][a-z]{1,11}( [A-Z][a-z]{1,11})?".prop_map(String::from)
}

/// Generate a birthdate between 1900 and roughly 2009.
pub fn birthdate() -> impl Strategy<Value = NaiveDate> {
    (0i64..40_000).prop_map(|days| {
        NaiveDate::from_ymd_opt(1900, 1, 1).expect("valid epoch") + Duration::days(days)
    })
}

/// Generate a valid employee.
pub fn employee() -> impl Strategy<Value = Employee> {
    (employee_id(), name(), name(), birthdate()).prop_map(|(id, first, last, birthdate)| {
        Employee {
            employee_id: id,
            first_name: first,
            last_name: last,
            birthdate,
        }
    })
}

/// Generate up to `max` employees with pairwise distinct ids.
pub fn distinct_employees(max: usize) -> impl Strategy<Value = Vec<Employee>> {
    prop::collection::vec(employee(), 0..=max).prop_map(|employees| {
        employees
            .into_iter()
            .map(|e| (e.employee_id, e))
            .collect::<BTreeMap<_, _>>()
            .into_values()
            .collect()
    })
}

/// Generate a partial update for the given id.
pub fn update_for(id: EmployeeId) -> impl Strategy<Value = EmployeeUpdate> {
    (
        proptest::option::of(name()),
        proptest::option::of(name()),
        proptest::option::of(birthdate()),
    )
        .prop_map(move |(first_name, last_name, birthdate)| EmployeeUpdate {
            employee_id: id,
            first_name,
            last_name,
            birthdate,
        })
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashSet;

    proptest! {
        #[test]
        fn test_document_roundtrip(e in employee()) {
            let doc = e.to_document();
            prop_assert_eq!(Employee::from_document(&doc).unwrap(), e);
        }

        #[test]
        fn test_distinct_ids(employees in distinct_employees(20)) {
            let ids: HashSet<_> = employees.iter().map(|e| e.employee_id).collect();
            prop_assert_eq!(ids.len(), employees.len());
        }

        #[test]
        fn test_generated_employees_are_valid(e in employee()) {
            prop_assert!(roster_core::validate_employee(&e).is_ok());
        }

        #[test]
        fn test_diff_never_contains_equal_fields(e in employee(), u in update_for(EmployeeId(0))) {
            let changes = u.diff(&e);
            if let Some(first) = &changes.first_name {
                prop_assert_ne!(first, &e.first_name);
            }
            if let Some(last) = &changes.last_name {
                prop_assert_ne!(last, &e.last_name);
            }
            if let Some(date) = changes.birthdate {
                prop_assert_ne!(date, e.birthdate);
            }
        }
    }
}
