//! Employee normalization
//!
//! Maps whatever record shape the remote store returns into the canonical
//! [`Employee`]. Optional fields fall back to their defaults when the raw value
//! is absent, `null` or falsy (`""`, `false`, `0`). A salary of exactly `0`
//! therefore cannot be told apart from a missing salary.
//!
//! `id`, `name` and `email` are passed through without validation.

use serde_json::Value;

use crate::models::{
    DEFAULT_DEPARTMENT, DEFAULT_HIRE_DATE, DEFAULT_POSITION, DEFAULT_SALARY, Employee, EmployeeId,
    RawEmployee,
};

/// Normalize one raw record
pub fn normalize(raw: &RawEmployee) -> Employee {
    let id = raw.id.as_ref().and_then(id_value);
    if id.is_none() {
        tracing::debug!(raw_id = ?raw.id, "remote employee record has no usable id");
    }

    Employee {
        id,
        name: raw.name.as_ref().map(render_text).unwrap_or_default(),
        email: raw.email.as_ref().map(render_text).unwrap_or_default(),
        position: text_or(raw.position.as_ref(), DEFAULT_POSITION),
        department: text_or(raw.department.as_ref(), DEFAULT_DEPARTMENT),
        salary: salary_or_default(raw.salary.as_ref()),
        hire_date: text_or(raw.hire_date.as_ref(), DEFAULT_HIRE_DATE),
    }
}

/// Normalize a full list, preserving remote order
pub fn normalize_all(raws: &[RawEmployee]) -> Vec<Employee> {
    raws.iter().map(normalize).collect()
}

/// JavaScript-style truthiness of a JSON value
fn is_truthy(value: &Value) -> bool {
    match value {
        Value::Null => false,
        Value::Bool(b) => *b,
        Value::Number(n) => n.as_f64().is_some_and(|f| f != 0.0),
        Value::String(s) => !s.is_empty(),
        Value::Array(_) | Value::Object(_) => true,
    }
}

fn render_text(value: &Value) -> String {
    match value {
        Value::String(s) => s.clone(),
        Value::Null => String::new(),
        other => other.to_string(),
    }
}

fn text_or(value: Option<&Value>, default: &str) -> String {
    match value {
        Some(v) if is_truthy(v) => render_text(v),
        _ => default.to_string(),
    }
}

fn salary_or_default(value: Option<&Value>) -> f64 {
    let parsed = match value {
        Some(v) if is_truthy(v) => match v {
            Value::Number(n) => n.as_f64(),
            Value::String(s) => s.trim().parse::<f64>().ok(),
            _ => None,
        },
        _ => None,
    };

    parsed
        .filter(|salary| salary.is_finite() && *salary != 0.0)
        .unwrap_or(DEFAULT_SALARY)
}

fn id_value(value: &Value) -> Option<EmployeeId> {
    match value {
        Value::Number(n) => n.as_i64().or_else(|| {
            n.as_f64()
                .filter(|f| f.fract() == 0.0 && f.abs() < i64::MAX as f64)
                .map(|f| f as EmployeeId)
        }),
        Value::String(s) => s.trim().parse().ok(),
        _ => None,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    fn raw(value: Value) -> RawEmployee {
        RawEmployee::from_json(value).unwrap()
    }

    #[test]
    fn test_minimal_record_gets_all_defaults() {
        let employee = normalize(&raw(json!({ "id": 1, "name": "Ana", "email": "a@x.com" })));

        assert_eq!(
            employee,
            Employee {
                id: Some(1),
                name: "Ana".to_string(),
                email: "a@x.com".to_string(),
                position: "Not Specified".to_string(),
                department: "Not Assigned".to_string(),
                salary: 0.0,
                hire_date: "Not Available".to_string(),
            }
        );
    }

    #[test]
    fn test_each_missing_field_defaults_independently() {
        let base = json!({
            "id": 2,
            "name": "Bo",
            "email": "b@x.com",
            "position": "Engineer",
            "department": "R&D",
            "salary": 50000,
            "hireDate": "2020-01-15"
        });

        let cases = [
            ("position", "Not Specified"),
            ("department", "Not Assigned"),
            ("hireDate", "Not Available"),
        ];
        for (key, expected) in cases {
            let mut value = base.clone();
            value.as_object_mut().unwrap().remove(key);
            let employee = normalize(&raw(value));
            let json = serde_json::to_value(&employee).unwrap();
            assert_eq!(json[key], expected, "default for {key}");
        }

        let mut value = base.clone();
        value.as_object_mut().unwrap().remove("salary");
        assert_eq!(normalize(&raw(value)).salary, 0.0);
    }

    #[test]
    fn test_falsy_values_take_defaults() {
        let employee = normalize(&raw(json!({
            "id": 3,
            "name": "Cy",
            "email": "c@x.com",
            "position": "",
            "department": null,
            "salary": "",
            "hireDate": false
        })));

        assert_eq!(employee.position, DEFAULT_POSITION);
        assert_eq!(employee.department, DEFAULT_DEPARTMENT);
        assert_eq!(employee.salary, DEFAULT_SALARY);
        assert_eq!(employee.hire_date, DEFAULT_HIRE_DATE);
    }

    #[test]
    fn test_zero_salary_indistinguishable_from_missing() {
        let zero = normalize(&raw(json!({ "id": 4, "salary": 0 })));
        let missing = normalize(&raw(json!({ "id": 4 })));
        assert_eq!(zero, missing);
    }

    #[test]
    fn test_present_values_pass_through() {
        let employee = normalize(&raw(json!({
            "id": 5,
            "name": "Di",
            "email": "d@x.com",
            "position": "Manager",
            "department": "Sales",
            "salary": 72000.5,
            "hireDate": "2019-07-01"
        })));

        assert_eq!(employee.position, "Manager");
        assert_eq!(employee.department, "Sales");
        assert_eq!(employee.salary, 72000.5);
        assert_eq!(employee.hire_date, "2019-07-01");
    }

    #[test]
    fn test_numeric_strings_are_coerced() {
        let employee = normalize(&raw(json!({ "id": "9", "salary": "4100" })));
        assert_eq!(employee.id, Some(9));
        assert_eq!(employee.salary, 4100.0);

        let garbage = normalize(&raw(json!({ "id": "abc", "salary": "lots" })));
        assert_eq!(garbage.id, None);
        assert_eq!(garbage.salary, 0.0);
    }

    #[test]
    fn test_missing_identity_fields_are_empty_not_errors() {
        let employee = normalize(&raw(json!({ "position": "Intern" })));
        assert_eq!(employee.id, None);
        assert_eq!(employee.name, "");
        assert_eq!(employee.email, "");
        assert_eq!(employee.position, "Intern");
    }

    #[test]
    fn test_normalize_is_idempotent() {
        let inputs = [
            json!({ "id": 1, "name": "Ana", "email": "a@x.com" }),
            json!({ "id": 2, "name": "Bo", "salary": 31000, "position": "Lead" }),
            json!({ "name": "No Id", "hireDate": "2022-02-02" }),
        ];

        for input in inputs {
            let once = normalize(&raw(input));
            let reserialized = raw(serde_json::to_value(&once).unwrap());
            assert_eq!(normalize(&reserialized), once);
            assert_eq!(normalize(&RawEmployee::from(&once)), once);
        }
    }

    #[test]
    fn test_normalize_all_keeps_order() {
        let raws = vec![
            raw(json!({ "id": 30 })),
            raw(json!({ "id": 10 })),
            raw(json!({ "id": 20 })),
        ];
        let ids: Vec<_> = normalize_all(&raws).into_iter().map(|e| e.id).collect();
        assert_eq!(ids, vec![Some(30), Some(10), Some(20)]);
    }
}
