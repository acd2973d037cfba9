//! Presence checks shared by every field rule

use crate::error::{ErrorCode, ValidationError};
use crate::field::FieldRef;
use serde_json::Value;

/// Absent, `null`, or zero-length (empty string or empty array)
pub fn is_missing(value: Option<&Value>) -> bool {
    match value {
        None | Some(Value::Null) => true,
        Some(Value::String(s)) => s.is_empty(),
        Some(Value::Array(items)) => items.is_empty(),
        Some(_) => false,
    }
}

/// Absent or `null`; empty containers count as present
pub fn is_absent(value: Option<&Value>) -> bool {
    matches!(value, None | Some(Value::Null))
}

pub fn mandatory(field: &FieldRef, label: &str) -> ValidationError {
    ValidationError::for_field(
        ErrorCode::MandatoryField,
        format!("{} is required.", label),
        field.clone(),
    )
}
