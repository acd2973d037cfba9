//! Number and number range rules

use super::required::{is_missing, mandatory};
use crate::error::{ErrorCode, ValidationError};
use crate::rule::{NumberRangeRule, NumberRule};
use crate::traits::{EvalContext, FieldCheck, RangeCheck};
use serde_json::Value;

/// Extract a finite number from a JSON number or a numeric string.
///
/// Strings follow the usual form-input conventions: surrounding whitespace is
/// ignored, a blank string reads as `0`, and `0x`/`0o`/`0b` prefixes select
/// hex, octal and binary integers.
pub fn coerce_number(value: &Value) -> Option<f64> {
    let number = match value {
        Value::Number(num) => num.as_f64(),
        Value::String(s) => parse_numeric_str(s.trim()),
        _ => None,
    }?;

    number.is_finite().then_some(number)
}

fn parse_numeric_str(s: &str) -> Option<f64> {
    if s.is_empty() {
        return Some(0.0);
    }

    let radix = match s.get(..2).map(str::to_ascii_lowercase).as_deref() {
        Some("0x") => Some(16),
        Some("0o") => Some(8),
        Some("0b") => Some(2),
        _ => None,
    };

    match radix {
        // Signs are not allowed after a radix prefix
        Some(radix) => u64::from_str_radix(&s[2..], radix)
            .ok()
            .filter(|_| !s[2..].starts_with('+'))
            .map(|n| n as f64),
        None => s.parse::<f64>().ok(),
    }
}

impl FieldCheck for NumberRule {
    fn check(&self, value: Option<&Value>, _ctx: &EvalContext<'_>) -> Option<ValidationError> {
        if is_missing(value) {
            return self.required.then(|| mandatory(&self.field, &self.label));
        }

        let number = match value.and_then(coerce_number) {
            Some(number) => number,
            None => {
                return Some(ValidationError::for_field(
                    ErrorCode::InvalidNumber,
                    format!("{} is not a valid number.", self.label),
                    self.field.clone(),
                ));
            }
        };

        if let Some(min) = self.min_value {
            if number < min {
                return Some(ValidationError::for_field(
                    ErrorCode::MinValueViolated,
                    format!("{} must be at least {}.", self.label, min),
                    self.field.clone(),
                ));
            }
        }

        if let Some(max) = self.max_value {
            if number > max {
                return Some(ValidationError::for_field(
                    ErrorCode::MaxValueViolated,
                    format!("{} must not be greater than {}.", self.label, max),
                    self.field.clone(),
                ));
            }
        }

        None
    }
}

impl RangeCheck for NumberRangeRule {
    fn check_range(
        &self,
        min: Option<&Value>,
        max: Option<&Value>,
        _ctx: &EvalContext<'_>,
    ) -> Option<ValidationError> {
        // Non-numeric bounds are left to the per-field number rules
        let min = min.and_then(coerce_number)?;
        let max = max.and_then(coerce_number)?;

        (min > max).then(|| {
            ValidationError::new(
                ErrorCode::InvalidNumberRange,
                format!("Min value of {} must not be greater than max value.", self.label),
            )
        })
    }
}
