//! Object rule

use super::required::mandatory;
use crate::error::{ErrorCode, ValidationError};
use crate::rule::ObjectRule;
use crate::traits::{EvalContext, FieldCheck};
use serde_json::Value;

impl FieldCheck for ObjectRule {
    fn check(&self, value: Option<&Value>, _ctx: &EvalContext<'_>) -> Option<ValidationError> {
        match value {
            None | Some(Value::Null) => {
                self.required.then(|| mandatory(&self.field, &self.label))
            }
            Some(Value::Object(_)) => None,
            _ => Some(ValidationError::for_field(
                ErrorCode::InvalidObject,
                format!("{} is not an object.", self.label),
                self.field.clone(),
            )),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_object_rule() {
        let rule = ObjectRule {
            field: "address".into(),
            label: "Address".to_string(),
            required: true,
        };
        let ctx = EvalContext::default();

        assert!(rule.check(Some(&json!({"city": "X"})), &ctx).is_none());
        assert!(rule.check(Some(&json!({})), &ctx).is_none());
        assert_eq!(rule.check(None, &ctx).map(|e| e.code), Some(ErrorCode::MandatoryField));

        let error = rule.check(Some(&json!("Main St")), &ctx).unwrap();
        assert_eq!(error.code, ErrorCode::InvalidObject);
        assert_eq!(error.message, "Address is not an object.");
        assert_eq!(
            rule.check(Some(&json!([1, 2])), &ctx).map(|e| e.code),
            Some(ErrorCode::InvalidObject)
        );
    }

    #[test]
    fn test_optional_object_absent() {
        let rule = ObjectRule {
            field: "meta".into(),
            label: "Meta".to_string(),
            required: false,
        };
        assert!(rule.check(Some(&Value::Null), &EvalContext::default()).is_none());
    }
}
