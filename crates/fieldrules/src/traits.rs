//! Evaluation traits shared by the per-kind validators

use crate::date::{DateComparator, SystemDates, DEFAULT_DATE_FORMAT};
use crate::error::ValidationError;
use chrono::NaiveDate;
use serde_json::Value;

/// What an evaluator may consult besides the values it is handed
#[derive(Clone, Copy)]
pub struct EvalContext<'a> {
    pub dates: &'a dyn DateComparator,
    pub date_format: &'a str,
}

impl<'a> EvalContext<'a> {
    pub fn new(dates: &'a dyn DateComparator, date_format: &'a str) -> Self {
        Self { dates, date_format }
    }

    /// Parse a date string with the configured format
    pub fn parse_date(&self, input: &str) -> Option<NaiveDate> {
        self.dates.parse(input, self.date_format)
    }
}

impl Default for EvalContext<'static> {
    fn default() -> Self {
        Self::new(&SystemDates, DEFAULT_DATE_FORMAT)
    }
}

impl std::fmt::Debug for EvalContext<'_> {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("EvalContext")
            .field("date_format", &self.date_format)
            .finish_non_exhaustive()
    }
}

/// Check for rules that look at a single resolved field
pub trait FieldCheck {
    /// `value` is `None` when the field could not be resolved
    fn check(&self, value: Option<&Value>, ctx: &EvalContext<'_>) -> Option<ValidationError>;
}

/// Check for rules that compare two resolved fields
pub trait RangeCheck {
    fn check_range(
        &self,
        min: Option<&Value>,
        max: Option<&Value>,
        ctx: &EvalContext<'_>,
    ) -> Option<ValidationError>;
}
