//! Create/edit form draft
//!
//! The draft is a string-valued mirror of every editable [`Employee`] field.
//! Salary stays a string until submit-time coercion.

use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};
use thiserror::Error;

use crate::models::{DEFAULT_SALARY, Employee, EmployeePayload};

/// Editable form fields, named after the form inputs
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub enum FormField {
    Name,
    Email,
    Position,
    Department,
    Salary,
    HireDate,
}

impl FormField {
    pub const ALL: [FormField; 6] = [
        Self::Name,
        Self::Email,
        Self::Position,
        Self::Department,
        Self::Salary,
        Self::HireDate,
    ];

    /// Input name as used by the form
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Name => "name",
            Self::Email => "email",
            Self::Position => "position",
            Self::Department => "department",
            Self::Salary => "salary",
            Self::HireDate => "hireDate",
        }
    }
}

impl fmt::Display for FormField {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Unknown form input name
#[derive(Debug, Clone, PartialEq, Eq, Error)]
#[error("Unknown form field: {0}")]
pub struct FieldParseError(pub String);

impl FromStr for FormField {
    type Err = FieldParseError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::ALL
            .into_iter()
            .find(|field| field.as_str() == s)
            .ok_or_else(|| FieldParseError(s.to_string()))
    }
}

/// Pending form values
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct FormDraft {
    pub name: String,
    pub email: String,
    pub position: String,
    pub department: String,
    pub salary: String,
    pub hire_date: String,
}

impl FormDraft {
    /// All-empty draft for create mode
    pub fn empty() -> Self {
        Self::default()
    }

    /// Seed a draft from an existing employee (edit mode)
    pub fn from_employee(employee: &Employee) -> Self {
        Self {
            name: employee.name.clone(),
            email: employee.email.clone(),
            position: employee.position.clone(),
            department: employee.department.clone(),
            salary: employee.salary.to_string(),
            hire_date: employee.hire_date.clone(),
        }
    }

    pub fn get(&self, field: FormField) -> &str {
        match field {
            FormField::Name => &self.name,
            FormField::Email => &self.email,
            FormField::Position => &self.position,
            FormField::Department => &self.department,
            FormField::Salary => &self.salary,
            FormField::HireDate => &self.hire_date,
        }
    }

    /// Overwrite exactly one field
    pub fn set(&mut self, field: FormField, value: impl Into<String>) {
        let slot = match field {
            FormField::Name => &mut self.name,
            FormField::Email => &mut self.email,
            FormField::Position => &mut self.position,
            FormField::Department => &mut self.department,
            FormField::Salary => &mut self.salary,
            FormField::HireDate => &mut self.hire_date,
        };
        *slot = value.into();
    }

    /// Submit-time coercion: salary string to number, `0` when unparsable
    pub fn coerce(&self) -> SubmittedForm {
        let salary = self
            .salary
            .trim()
            .parse::<f64>()
            .ok()
            .filter(|s| s.is_finite())
            .unwrap_or(DEFAULT_SALARY);

        SubmittedForm {
            name: self.name.clone(),
            email: self.email.clone(),
            position: self.position.clone(),
            department: self.department.clone(),
            salary,
            hire_date: self.hire_date.clone(),
        }
    }
}

/// Draft values after submit-time coercion
#[derive(Debug, Clone, PartialEq)]
pub struct SubmittedForm {
    pub name: String,
    pub email: String,
    pub position: String,
    pub department: String,
    pub salary: f64,
    pub hire_date: String,
}

impl SubmittedForm {
    /// Body for the remote store
    ///
    /// Drops position, department, salary and hire date: the endpoint only
    /// accepts `{name, email, age}`.
    pub fn to_payload(&self) -> EmployeePayload {
        EmployeePayload::new(self.name.as_str(), self.email.as_str())
    }
}
