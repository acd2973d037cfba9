//! Cross-field function rule

use crate::error::{ErrorCode, ValidationError};
use crate::field::FieldRef;
use crate::rule::FunctionRule;
use serde_json::Value;

impl FunctionRule {
    /// Hand the whole object to the predicate; its result passes through untouched
    pub fn evaluate(&self, object: &Value) -> Option<ValidationError> {
        let result = self.call(object);
        if let Some(ref error) = result {
            tracing::debug!(rule = %self.name, code = %error.code, "function rule reported an error");
        }
        result
    }
}

/// Predicate helper: the values at two fields must be equal, such as a
/// password and its confirmation
pub fn fields_match(
    field: impl Into<FieldRef>,
    confirmation: impl Into<FieldRef>,
    label: impl Into<String>,
) -> FunctionRule {
    let field = field.into();
    let confirmation = confirmation.into();
    let label = label.into();
    let name = format!("{}_matches_{}", field, confirmation);

    FunctionRule::new(name, move |object| {
        let left = field.resolve(object);
        let right = confirmation.resolve(object);
        (left != right).then(|| {
            ValidationError::for_field(
                ErrorCode::Generic,
                format!("{} does not match.", label),
                confirmation.clone(),
            )
        })
    })
}
