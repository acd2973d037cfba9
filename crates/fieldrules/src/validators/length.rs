//! String length rule

use super::required::{is_missing, mandatory};
use crate::error::{ErrorCode, ValidationError};
use crate::rule::StringRule;
use crate::traits::{EvalContext, FieldCheck};
use serde_json::Value;

/// Unicode-aware length; values without a length are not length-checked
fn text_length(value: &Value) -> Option<usize> {
    match value {
        Value::String(s) => Some(s.chars().count()),
        Value::Array(items) => Some(items.len()),
        _ => None,
    }
}

impl FieldCheck for StringRule {
    fn check(&self, value: Option<&Value>, _ctx: &EvalContext<'_>) -> Option<ValidationError> {
        if is_missing(value) {
            return self.required.then(|| mandatory(&self.field, &self.label));
        }

        let length = value.and_then(text_length)?;

        // A zero bound means "no bound"
        if let Some(min) = self.min_length.filter(|min| *min > 0) {
            if length < min {
                return Some(ValidationError::for_field(
                    ErrorCode::MinLengthViolated,
                    format!("Length of {} must be at least {} char(s).", self.label, min),
                    self.field.clone(),
                ));
            }
        }

        if let Some(max) = self.max_length.filter(|max| *max > 0) {
            if length > max {
                return Some(ValidationError::for_field(
                    ErrorCode::MaxLengthViolated,
                    format!("Length of {} must not be greater than {} char(s).", self.label, max),
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

    fn name_rule() -> StringRule {
        StringRule::new("name", "Name").required(true).min_length(3).max_length(10)
    }

    fn check(rule: &StringRule, value: Value) -> Option<ErrorCode> {
        rule.check(Some(&value), &EvalContext::default()).map(|e| e.code)
    }

    #[test]
    fn test_length_bounds() {
        let rule = name_rule();

        assert_eq!(check(&rule, json!("ab")), Some(ErrorCode::MinLengthViolated));
        assert_eq!(check(&rule, json!("abcdefghijk")), Some(ErrorCode::MaxLengthViolated));
        assert_eq!(check(&rule, json!("abc")), None);
        assert_eq!(check(&rule, json!("abcdefghij")), None);
    }

    #[test]
    fn test_required_string() {
        let rule = name_rule();
        let ctx = EvalContext::default();

        let error = rule.check(None, &ctx).unwrap();
        assert_eq!(error.code, ErrorCode::MandatoryField);
        assert_eq!(error.message, "Name is required.");
        assert_eq!(check(&rule, json!("")), Some(ErrorCode::MandatoryField));
        assert_eq!(check(&rule, Value::Null), Some(ErrorCode::MandatoryField));
    }

    #[test]
    fn test_optional_string_absent() {
        let rule = StringRule::new("nickname", "Nickname").min_length(3);
        let ctx = EvalContext::default();

        assert!(rule.check(None, &ctx).is_none());
        assert!(rule.check(Some(&json!("")), &ctx).is_none());
        assert_eq!(check(&rule, json!("ab")), Some(ErrorCode::MinLengthViolated));
    }

    #[test]
    fn test_messages() {
        let rule = name_rule();
        let ctx = EvalContext::default();

        let short = rule.check(Some(&json!("ab")), &ctx).unwrap();
        assert_eq!(short.message, "Length of Name must be at least 3 char(s).");
        assert!(short.is_for("name"));

        let long = rule.check(Some(&json!("abcdefghijk")), &ctx).unwrap();
        assert_eq!(long.message, "Length of Name must not be greater than 10 char(s).");
    }

    #[test]
    fn test_unicode_length() {
        let rule = StringRule::new("name", "Name").max_length(3);
        assert_eq!(check(&rule, json!("héé")), None);
        assert_eq!(check(&rule, json!("日本語!")), Some(ErrorCode::MaxLengthViolated));
    }

    #[test]
    fn test_zero_bounds_are_unbounded() {
        let rule = StringRule::new("name", "Name").min_length(0).max_length(0);
        assert_eq!(check(&rule, json!("anything at all")), None);
    }

    #[test]
    fn test_values_without_length_pass() {
        let rule = name_rule();
        assert_eq!(check(&rule, json!(12)), None);
        assert_eq!(check(&rule, json!(true)), None);
    }
}
