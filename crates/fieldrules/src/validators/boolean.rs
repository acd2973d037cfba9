//! Boolean rule (always required)

use super::required::{is_missing, mandatory};
use crate::error::ValidationError;
use crate::rule::BooleanRule;
use crate::traits::{EvalContext, FieldCheck};
use serde_json::Value;

impl FieldCheck for BooleanRule {
    fn check(&self, value: Option<&Value>, _ctx: &EvalContext<'_>) -> Option<ValidationError> {
        // `false` is an answer, not a missing one
        is_missing(value).then(|| mandatory(&self.field, &self.label))
    }
}
