//! Validation error types and handling

use crate::field::FieldRef;
use serde::{Deserialize, Serialize};
use std::fmt;
use thiserror::Error;

pub type ValidationResult<T> = Result<T, ValidationErrors>;

/// Closed set of validation failure codes.
///
/// The numeric values are stable and safe to hand to clients.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum ErrorCode {
    Generic,
    MandatoryField,
    MinLengthViolated,
    MaxLengthViolated,
    InvalidNumber,
    MinValueViolated,
    MaxValueViolated,
    InvalidNumberRange,
    InvalidDate,
    InvalidDateRange,
    InvalidCardNumber,
    InvalidArray,
    InvalidObject,
}

impl ErrorCode {
    pub const ALL: [ErrorCode; 13] = [
        ErrorCode::Generic,
        ErrorCode::MandatoryField,
        ErrorCode::MinLengthViolated,
        ErrorCode::MaxLengthViolated,
        ErrorCode::InvalidNumber,
        ErrorCode::MinValueViolated,
        ErrorCode::MaxValueViolated,
        ErrorCode::InvalidNumberRange,
        ErrorCode::InvalidDate,
        ErrorCode::InvalidDateRange,
        ErrorCode::InvalidCardNumber,
        ErrorCode::InvalidArray,
        ErrorCode::InvalidObject,
    ];

    /// Numeric code for programmatic handling
    pub fn code(self) -> u16 {
        match self {
            ErrorCode::Generic => 1000,
            ErrorCode::MandatoryField => 1001,
            ErrorCode::MinLengthViolated => 1002,
            ErrorCode::MaxLengthViolated => 1003,
            ErrorCode::InvalidNumber => 1004,
            ErrorCode::MinValueViolated => 1005,
            ErrorCode::MaxValueViolated => 1006,
            ErrorCode::InvalidNumberRange => 1007,
            ErrorCode::InvalidDate => 1008,
            ErrorCode::InvalidDateRange => 1009,
            ErrorCode::InvalidCardNumber => 1010,
            ErrorCode::InvalidArray => 1011,
            ErrorCode::InvalidObject => 1012,
        }
    }

    /// Look up a code by its numeric value
    pub fn from_code(code: u16) -> Option<Self> {
        Self::ALL.into_iter().find(|candidate| candidate.code() == code)
    }

    /// Symbolic name, as used in serialized output
    pub fn as_str(self) -> &'static str {
        match self {
            ErrorCode::Generic => "GENERIC",
            ErrorCode::MandatoryField => "MANDATORY_FIELD",
            ErrorCode::MinLengthViolated => "MIN_LENGTH_VIOLATED",
            ErrorCode::MaxLengthViolated => "MAX_LENGTH_VIOLATED",
            ErrorCode::InvalidNumber => "INVALID_NUMBER",
            ErrorCode::MinValueViolated => "MIN_VALUE_VIOLATED",
            ErrorCode::MaxValueViolated => "MAX_VALUE_VIOLATED",
            ErrorCode::InvalidNumberRange => "INVALID_NUMBER_RANGE",
            ErrorCode::InvalidDate => "INVALID_DATE",
            ErrorCode::InvalidDateRange => "INVALID_DATE_RANGE",
            ErrorCode::InvalidCardNumber => "INVALID_CARD_NUMBER",
            ErrorCode::InvalidArray => "INVALID_ARRAY",
            ErrorCode::InvalidObject => "INVALID_OBJECT",
        }
    }
}

impl fmt::Display for ErrorCode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// A single failed check
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct ValidationError {
    /// Error code for programmatic handling
    pub code: ErrorCode,
    /// Human-readable error message
    pub message: String,
    /// The field that failed validation; range rules report no field
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub field: Option<FieldRef>,
}

impl ValidationError {
    /// Create an error that is not attributed to a field
    pub fn new(code: ErrorCode, message: impl Into<String>) -> Self {
        Self {
            code,
            message: message.into(),
            field: None,
        }
    }

    /// Create an error attributed to `field`
    pub fn for_field(code: ErrorCode, message: impl Into<String>, field: impl Into<FieldRef>) -> Self {
        Self {
            code,
            message: message.into(),
            field: Some(field.into()),
        }
    }

    /// Set the field the error refers to
    pub fn with_field(mut self, field: impl Into<FieldRef>) -> Self {
        self.field = Some(field.into());
        self
    }

    /// Check whether this error is attributed to `field` (dotted form for paths)
    pub fn is_for(&self, field: &str) -> bool {
        self.field.as_ref().is_some_and(|f| f.to_string() == field)
    }
}

impl fmt::Display for ValidationError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match &self.field {
            Some(field) => write!(f, "{}: {}", field, self.message),
            None => f.write_str(&self.message),
        }
    }
}

/// Ordered collection of validation errors, in rule order
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize, Error)]
pub struct ValidationErrors {
    pub errors: Vec<ValidationError>,
}

impl ValidationErrors {
    /// Create a new empty validation errors collection
    pub fn new() -> Self {
        Self { errors: Vec::new() }
    }

    /// Add a single validation error
    pub fn add(&mut self, error: ValidationError) {
        self.errors.push(error);
    }

    /// Check if there are any validation errors
    pub fn is_empty(&self) -> bool {
        self.errors.is_empty()
    }

    /// Total number of validation errors
    pub fn len(&self) -> usize {
        self.errors.len()
    }

    /// First error in rule order
    pub fn first(&self) -> Option<&ValidationError> {
        self.errors.first()
    }

    pub fn iter(&self) -> std::slice::Iter<'_, ValidationError> {
        self.errors.iter()
    }

    /// Get errors for a specific field (dotted form for paths)
    pub fn get_field_errors(&self, field: &str) -> Vec<&ValidationError> {
        self.errors.iter().filter(|error| error.is_for(field)).collect()
    }

    /// Check if a specific field has errors
    pub fn has_field_errors(&self, field: &str) -> bool {
        self.errors.iter().any(|error| error.is_for(field))
    }

    /// Check if any error carries `code`
    pub fn has_code(&self, code: ErrorCode) -> bool {
        self.errors.iter().any(|error| error.code == code)
    }

    /// Append another collection, keeping order
    pub fn merge(&mut self, other: ValidationErrors) {
        self.errors.extend(other.errors);
    }

    pub fn into_vec(self) -> Vec<ValidationError> {
        self.errors
    }

    /// Convert to a JSON-serializable format for API responses
    pub fn to_json(&self) -> serde_json::Value {
        let fields: Vec<serde_json::Value> = self
            .errors
            .iter()
            .map(|error| {
                serde_json::json!({
                    "code": error.code.code(),
                    "name": error.code.as_str(),
                    "message": error.message,
                    "field": error.field.as_ref().map(|f| f.to_string()),
                })
            })
            .collect();

        serde_json::json!({
            "error": {
                "code": "validation_failed",
                "message": "Validation failed",
                "errors": fields
            }
        })
    }
}

impl fmt::Display for ValidationErrors {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        if self.errors.is_empty() {
            write!(f, "No validation errors")
        } else {
            write!(f, "Validation failed with {} error(s):", self.errors.len())?;
            for error in &self.errors {
                write!(f, "\n  [{}] {}", error.code, error)?;
            }
            Ok(())
        }
    }
}

impl From<ValidationError> for ValidationErrors {
    fn from(error: ValidationError) -> Self {
        Self { errors: vec![error] }
    }
}

impl From<Vec<ValidationError>> for ValidationErrors {
    fn from(errors: Vec<ValidationError>) -> Self {
        Self { errors }
    }
}

impl IntoIterator for ValidationErrors {
    type Item = ValidationError;
    type IntoIter = std::vec::IntoIter<ValidationError>;

    fn into_iter(self) -> Self::IntoIter {
        self.errors.into_iter()
    }
}

impl<'a> IntoIterator for &'a ValidationErrors {
    type Item = &'a ValidationError;
    type IntoIter = std::slice::Iter<'a, ValidationError>;

    fn into_iter(self) -> Self::IntoIter {
        self.errors.iter()
    }
}

/// Errors raised while loading configuration or rule schemas
#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("Invalid value for field '{field}': '{value}'. Expected: {expected}")]
    InvalidValue {
        field: String,
        value: String,
        expected: String,
    },

    #[error("YAML error: {0}")]
    Yaml(#[from] serde_yaml::Error),

    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),
}

impl ConfigError {
    /// Create an invalid value error
    pub fn invalid_value(
        field: impl Into<String>,
        value: impl Into<String>,
        expected: impl Into<String>,
    ) -> Self {
        Self::InvalidValue {
            field: field.into(),
            value: value.into(),
            expected: expected.into(),
        }
    }
}
