//! Employee Model

use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};

/// Shown when the remote record carries no position
pub const DEFAULT_POSITION: &str = "Not Specified";
/// Shown when the remote record carries no department
pub const DEFAULT_DEPARTMENT: &str = "Not Assigned";
/// Used when the remote record carries no salary
pub const DEFAULT_SALARY: f64 = 0.0;
/// Sentinel for a missing hire date
pub const DEFAULT_HIRE_DATE: &str = "Not Available";
/// Fixed `age` sent with every create/update body
pub const PLACEHOLDER_AGE: u32 = 25;

/// Remote-assigned employee identifier
pub type EmployeeId = i64;

/// Employee entity (canonical, client-side)
///
/// Built fresh by [`crate::normalize`] on every successful fetch and never
/// mutated in place afterwards.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Employee {
    /// Absent when the remote record had no usable id
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub id: Option<EmployeeId>,
    pub name: String,
    pub email: String,
    pub position: String,
    pub department: String,
    pub salary: f64,
    /// ISO-8601 date or [`DEFAULT_HIRE_DATE`]
    pub hire_date: String,
}

/// Employee record exactly as the remote store returned it
///
/// Known keys are kept as untyped JSON so the normalizer can apply its
/// defaulting rules; unknown keys land in `extra`.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct RawEmployee {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub id: Option<Value>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub name: Option<Value>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub email: Option<Value>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub position: Option<Value>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub department: Option<Value>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub salary: Option<Value>,
    #[serde(default, rename = "hireDate", skip_serializing_if = "Option::is_none")]
    pub hire_date: Option<Value>,
    #[serde(flatten)]
    pub extra: Map<String, Value>,
}

impl RawEmployee {
    /// Decode a raw record from an arbitrary JSON value
    pub fn from_json(value: Value) -> Result<Self, serde_json::Error> {
        serde_json::from_value(value)
    }

    /// Record echoing a create/update body, for replies that carry none
    pub fn from_payload(id: Option<EmployeeId>, payload: &EmployeePayload) -> Self {
        let mut extra = Map::new();
        extra.insert("age".to_string(), Value::from(payload.age));
        Self {
            id: id.map(Value::from),
            name: Some(Value::from(payload.name.as_str())),
            email: Some(Value::from(payload.email.as_str())),
            extra,
            ..Self::default()
        }
    }
}

impl From<&Employee> for RawEmployee {
    fn from(employee: &Employee) -> Self {
        Self {
            id: employee.id.map(Value::from),
            name: Some(Value::from(employee.name.as_str())),
            email: Some(Value::from(employee.email.as_str())),
            position: Some(Value::from(employee.position.as_str())),
            department: Some(Value::from(employee.department.as_str())),
            salary: Some(Value::from(employee.salary)),
            hire_date: Some(Value::from(employee.hire_date.as_str())),
            extra: Map::new(),
        }
    }
}

/// Create/update body accepted by the remote collection
///
/// Only `name`, `email` and a fixed `age` are transmitted. Position,
/// department, salary and hire date are collected by the form but the
/// current endpoint contract never receives them.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct EmployeePayload {
    pub name: String,
    pub email: String,
    pub age: u32,
}

impl EmployeePayload {
    pub fn new(name: impl Into<String>, email: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            email: email.into(),
            age: PLACEHOLDER_AGE,
        }
    }
}
