//! Per-kind rule evaluators
//!
//! Each rule kind implements [`FieldCheck`] or [`RangeCheck`] in its own
//! module; [`evaluate`] resolves the rule's fields and dispatches on kind.

pub mod array;
pub mod boolean;
pub mod credit_card;
pub mod custom;
pub mod date;
pub mod length;
pub mod numeric;
pub mod object;
pub mod required;

pub use credit_card::CardBrand;
pub use custom::fields_match;

use crate::error::ValidationError;
use crate::rule::Rule;
use crate::traits::{EvalContext, FieldCheck, RangeCheck};
use serde_json::Value;

/// Evaluate one rule against `object`
pub fn evaluate(rule: &Rule, object: &Value, ctx: &EvalContext<'_>) -> Option<ValidationError> {
    match rule {
        Rule::String(rule) => rule.check(rule.field.resolve(object), ctx),
        Rule::Number(rule) => rule.check(rule.field.resolve(object), ctx),
        Rule::NumberRange(rule) => rule.check_range(
            rule.min_field.resolve(object),
            rule.max_field.resolve(object),
            ctx,
        ),
        Rule::Date(rule) => rule.check(rule.field.resolve(object), ctx),
        Rule::DateRange(rule) => rule.check_range(
            rule.min_field.resolve(object),
            rule.max_field.resolve(object),
            ctx,
        ),
        Rule::Boolean(rule) => rule.check(rule.field.resolve(object), ctx),
        Rule::Array(rule) => rule.check(rule.field.resolve(object), ctx),
        Rule::CreditCard(rule) => rule.check(rule.field.resolve(object), ctx),
        Rule::Object(rule) => rule.check(rule.field.resolve(object), ctx),
        Rule::Function(rule) => rule.evaluate(object),
    }
}
