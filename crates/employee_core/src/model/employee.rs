//! Employee domain model.
//!
//! # Responsibility
//! - Define the persisted employee row and the caller-built payload.
//! - Validate text fields before they reach SQL.
//!
//! # Invariants
//! - `name`, `email` and `country` are non-empty after trimming.
//! - No field exceeds the column bound of 100 characters.

use crate::db::schema::MAX_TEXT_LEN;
use serde::{Deserialize, Serialize};
use std::error::Error;
use std::fmt::{Display, Formatter};

/// Store-assigned employee identifier.
pub type EmployeeId = i64;

/// Mutable employee field, used to point at validation failures.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum EmployeeField {
    Name,
    Email,
    Country,
}

impl EmployeeField {
    pub fn as_str(self) -> &'static str {
        match self {
            Self::Name => "name",
            Self::Email => "email",
            Self::Country => "country",
        }
    }
}

/// Validation errors for employee payloads.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum EmployeeValidationError {
    EmptyField(EmployeeField),
    FieldTooLong { field: EmployeeField, max: usize },
}

impl Display for EmployeeValidationError {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::EmptyField(field) => write!(f, "{} must not be empty", field.as_str()),
            Self::FieldTooLong { field, max } => {
                write!(f, "{} must be at most {max} characters", field.as_str())
            }
        }
    }
}

impl Error for EmployeeValidationError {}

/// Persisted employee row.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Employee {
    pub id: EmployeeId,
    pub name: String,
    pub email: String,
    pub country: String,
}

impl Display for Employee {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        write!(
            f,
            "Employee{{id={}, name='{}', email='{}', country='{}'}}",
            self.id, self.name, self.email, self.country
        )
    }
}

/// Field values for inserts and updates.
///
/// Carries no id; the store assigns one on insert and updates keep the
/// existing id.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct NewEmployee {
    pub name: String,
    pub email: String,
    pub country: String,
}

impl NewEmployee {
    pub fn new(
        name: impl Into<String>,
        email: impl Into<String>,
        country: impl Into<String>,
    ) -> Self {
        Self {
            name: name.into(),
            email: email.into(),
            country: country.into(),
        }
    }

    /// Checks the payload against column constraints.
    ///
    /// # Errors
    /// - `EmptyField` when a field is empty or whitespace-only.
    /// - `FieldTooLong` when a field exceeds [`MAX_TEXT_LEN`] characters.
    pub fn validate(&self) -> Result<(), EmployeeValidationError> {
        validate_text(EmployeeField::Name, &self.name)?;
        validate_text(EmployeeField::Email, &self.email)?;
        validate_text(EmployeeField::Country, &self.country)?;
        Ok(())
    }

    /// Attaches a store-assigned id.
    pub fn with_id(self, id: EmployeeId) -> Employee {
        Employee {
            id,
            name: self.name,
            email: self.email,
            country: self.country,
        }
    }
}

fn validate_text(field: EmployeeField, value: &str) -> Result<(), EmployeeValidationError> {
    if value.trim().is_empty() {
        return Err(EmployeeValidationError::EmptyField(field));
    }
    if value.chars().count() > MAX_TEXT_LEN {
        return Err(EmployeeValidationError::FieldTooLong {
            field,
            max: MAX_TEXT_LEN,
        });
    }
    Ok(())
}
