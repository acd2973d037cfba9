//! Date and date range rules

use super::required::{is_missing, mandatory};
use crate::error::{ErrorCode, ValidationError};
use crate::rule::{DateRangeRule, DateRule};
use crate::traits::{EvalContext, FieldCheck, RangeCheck};
use chrono::NaiveDate;
use serde_json::Value;

impl DateRule {
    /// A bound that does not parse is skipped rather than reported against the data
    fn bound(&self, bound: Option<&str>, name: &str, ctx: &EvalContext<'_>) -> Option<NaiveDate> {
        let bound = bound?;
        let parsed = ctx.parse_date(bound);
        if parsed.is_none() {
            tracing::warn!(
                field = %self.field,
                bound = name,
                value = bound,
                date_format = ctx.date_format,
                "ignoring date bound that does not match the date format"
            );
        }
        parsed
    }
}

impl FieldCheck for DateRule {
    fn check(&self, value: Option<&Value>, ctx: &EvalContext<'_>) -> Option<ValidationError> {
        if is_missing(value) {
            return self.required.then(|| mandatory(&self.field, &self.label));
        }

        let date = match value.and_then(Value::as_str).and_then(|s| ctx.parse_date(s)) {
            Some(date) => date,
            None => {
                return Some(ValidationError::for_field(
                    ErrorCode::InvalidDate,
                    format!("{} is not a valid date.", self.label),
                    self.field.clone(),
                ));
            }
        };

        if let Some(min) = self.bound(self.min_value.as_deref(), "min_value", ctx) {
            if ctx.dates.is_before(date, min) {
                return Some(ValidationError::for_field(
                    ErrorCode::MinValueViolated,
                    format!(
                        "{} must not be smaller than {}.",
                        self.label,
                        self.min_value.as_deref().unwrap_or_default()
                    ),
                    self.field.clone(),
                ));
            }
        }

        if let Some(max) = self.bound(self.max_value.as_deref(), "max_value", ctx) {
            if ctx.dates.is_before(max, date) {
                return Some(ValidationError::for_field(
                    ErrorCode::MaxValueViolated,
                    format!(
                        "{} must not be greater than {}.",
                        self.label,
                        self.max_value.as_deref().unwrap_or_default()
                    ),
                    self.field.clone(),
                ));
            }
        }

        None
    }
}

impl RangeCheck for DateRangeRule {
    fn check_range(
        &self,
        min: Option<&Value>,
        max: Option<&Value>,
        ctx: &EvalContext<'_>,
    ) -> Option<ValidationError> {
        // Missing or malformed ends are left to the per-field date rules
        let start = min.and_then(Value::as_str).and_then(|s| ctx.parse_date(s))?;
        let end = max.and_then(Value::as_str).and_then(|s| ctx.parse_date(s))?;

        ctx.dates.is_before(end, start).then(|| {
            ValidationError::new(
                ErrorCode::InvalidDateRange,
                format!("End date of {} must not be before start date.", self.label),
            )
        })
    }
}
