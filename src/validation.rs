//! Field validation primitives shared by the plate grammar and policy requests.
//!
//! Validators never stop at the first problem: every rule that fails is
//! pushed into a [`ValidationErrors`] so the caller can show the whole list.

use serde::Serialize;
use std::fmt;

/// Validation error with a user-facing message.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ValidationError {
    /// The field that failed validation
    pub field: String,
    /// Human-readable error message in Russian
    pub message: String,
}

impl ValidationError {
    pub fn new(field: impl Into<String>, message: impl Into<String>) -> Self {
        Self {
            field: field.into(),
            message: message.into(),
        }
    }

    /// Create error for empty required field
    pub fn empty_field(field: &str, label: &str) -> Self {
        Self::new(field, format!("Не указано поле «{}»", label))
    }

    /// Create error for a value longer than allowed
    pub fn too_long(field: &str, label: &str, max: usize) -> Self {
        Self::new(
            field,
            format!("Поле «{}» не должно превышать {} символов", label, max),
        )
    }

    /// Create error for characters outside the allowed set
    pub fn invalid_charset(field: &str, label: &str) -> Self {
        Self::new(
            field,
            format!(
                "Поле «{}» может содержать только кириллицу, цифры, пробелы и знаки . , - / №",
                label
            ),
        )
    }

    /// Create error for invalid date format
    pub fn invalid_date_format(field: &str, value: &str) -> Self {
        Self::new(
            field,
            format!("Дата '{}' должна быть в формате ДД.ММ.ГГГГ", value),
        )
    }
}

impl fmt::Display for ValidationError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "[{}] {}", self.field, self.message)
    }
}

impl std::error::Error for ValidationError {}

/// Collection of validation errors with formatted output.
#[derive(Debug, Default, Clone, PartialEq, Eq, Serialize)]
#[serde(transparent)]
pub struct ValidationErrors {
    errors: Vec<ValidationError>,
}

impl ValidationErrors {
    pub fn new() -> Self {
        Self { errors: Vec::new() }
    }

    pub fn add(&mut self, error: ValidationError) {
        self.errors.push(error);
    }

    pub fn extend(&mut self, other: ValidationErrors) {
        self.errors.extend(other.errors);
    }

    pub fn is_empty(&self) -> bool {
        self.errors.is_empty()
    }

    pub fn is_valid(&self) -> bool {
        self.is_empty()
    }

    pub fn len(&self) -> usize {
        self.errors.len()
    }

    pub fn iter(&self) -> impl Iterator<Item = &ValidationError> {
        self.errors.iter()
    }

    /// Whether any collected error belongs to `field`.
    pub fn has_field(&self, field: &str) -> bool {
        self.errors.iter().any(|e| e.field == field)
    }

    /// All messages joined with `"; "`, the shape the form shows under the submit button.
    pub fn joined(&self) -> String {
        self.errors
            .iter()
            .map(|e| e.message.as_str())
            .collect::<Vec<_>>()
            .join("; ")
    }
}

impl From<ValidationError> for ValidationErrors {
    fn from(error: ValidationError) -> Self {
        Self {
            errors: vec![error],
        }
    }
}

impl IntoIterator for ValidationErrors {
    type Item = ValidationError;
    type IntoIter = std::vec::IntoIter<ValidationError>;

    fn into_iter(self) -> Self::IntoIter {
        self.errors.into_iter()
    }
}

// ============================================================================
// Validation functions
// ============================================================================

/// Validate that a string is not empty after trimming
pub fn validate_required(value: &str, field: &str, label: &str, errors: &mut ValidationErrors) {
    if value.trim().is_empty() {
        errors.add(ValidationError::empty_field(field, label));
    }
}

/// Validate the maximum length in characters (not bytes)
pub fn validate_max_len(
    value: &str,
    max: usize,
    field: &str,
    label: &str,
    errors: &mut ValidationErrors,
) {
    if value.chars().count() > max {
        errors.add(ValidationError::too_long(field, label, max));
    }
}
