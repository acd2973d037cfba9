//! Array rule

use super::required::{is_absent, mandatory};
use crate::error::{ErrorCode, ValidationError};
use crate::rule::ArrayRule;
use crate::traits::{EvalContext, FieldCheck};
use serde_json::Value;

impl FieldCheck for ArrayRule {
    fn check(&self, value: Option<&Value>, _ctx: &EvalContext<'_>) -> Option<ValidationError> {
        // An empty array is present; its size is the length checks' business
        if is_absent(value) {
            return self.required.then(|| mandatory(&self.field, &self.label));
        }

        let items = match value {
            Some(Value::Array(items)) => items,
            _ => {
                return Some(ValidationError::for_field(
                    ErrorCode::InvalidArray,
                    format!("{} is not a valid array.", self.label),
                    self.field.clone(),
                ));
            }
        };

        // Optional arrays are only shape-checked
        if !self.required {
            return None;
        }

        if let Some(min) = self.min_length {
            if items.len() < min {
                return Some(ValidationError::for_field(
                    ErrorCode::MinLengthViolated,
                    format!("Length of {} must be at least {} element(s).", self.label, min),
                    self.field.clone(),
                ));
            }
        }

        if let Some(max) = self.max_length {
            if items.len() > max {
                return Some(ValidationError::for_field(
                    ErrorCode::MaxLengthViolated,
                    format!("Length of {} must not be more than {} element(s).", self.label, max),
                    self.field.clone(),
                ));
            }
        }

        None
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    fn check(rule: &ArrayRule, value: Option<Value>) -> Option<ErrorCode> {
        rule.check(value.as_ref(), &EvalContext::default()).map(|e| e.code)
    }

    #[test]
    fn test_not_an_array() {
        let rule = ArrayRule::new("tags", "Tags");

        assert_eq!(check(&rule, Some(json!("a,b"))), Some(ErrorCode::InvalidArray));
        assert_eq!(check(&rule, Some(json!({"0": "a"}))), Some(ErrorCode::InvalidArray));

        let error = rule.check(Some(&json!(3)), &EvalContext::default()).unwrap();
        assert_eq!(error.message, "Tags is not a valid array.");
    }

    #[test]
    fn test_required_array() {
        let rule = ArrayRule::new("tags", "Tags").required(true);

        assert_eq!(check(&rule, None), Some(ErrorCode::MandatoryField));
        assert_eq!(check(&rule, Some(Value::Null)), Some(ErrorCode::MandatoryField));
        assert_eq!(check(&rule, Some(json!([]))), None);
    }

    #[test]
    fn test_optional_array_absent() {
        let rule = ArrayRule::new("tags", "Tags").min_length(1);
        assert_eq!(check(&rule, None), None);
    }

    #[test]
    fn test_element_count_bounds() {
        let rule = ArrayRule::new("tags", "Tags").required(true).min_length(1).max_length(3);

        assert_eq!(check(&rule, Some(json!([]))), Some(ErrorCode::MinLengthViolated));
        assert_eq!(check(&rule, Some(json!(["a"]))), None);
        assert_eq!(check(&rule, Some(json!(["a", "b", "c"]))), None);
        assert_eq!(check(&rule, Some(json!(["a", "b", "c", "d"]))), Some(ErrorCode::MaxLengthViolated));

        let error = rule.check(Some(&json!([1, 2, 3, 4])), &EvalContext::default()).unwrap();
        assert_eq!(error.message, "Length of Tags must not be more than 3 element(s).");
    }

    #[test]
    fn test_optional_array_skips_bounds() {
        let rule = ArrayRule::new("tags", "Tags").min_length(3).max_length(1);

        assert_eq!(check(&rule, Some(json!(["a", "b"]))), None);
        assert_eq!(check(&rule, Some(json!([]))), None);
        assert_eq!(check(&rule, Some(json!("a"))), Some(ErrorCode::InvalidArray));
    }

    #[test]
    fn test_zero_max_means_empty() {
        let rule = ArrayRule::new("errors", "Errors").required(true).max_length(0);
        assert_eq!(check(&rule, Some(json!([]))), None);
        assert_eq!(check(&rule, Some(json!(["x"]))), Some(ErrorCode::MaxLengthViolated));
    }
}
