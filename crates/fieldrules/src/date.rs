//! Date parsing and comparison capability
//!
//! The evaluators never compare date strings directly. Everything goes
//! through [`DateComparator`], so `2024-5-1` and `2024-05-01` are the same day
//! and the clock can be pinned in tests.

use chrono::{Local, NaiveDate};
use std::fmt::Write;

/// Default date format (`YYYY-MM-DD`)
pub const DEFAULT_DATE_FORMAT: &str = "%Y-%m-%d";

/// Date capability used by the date rules
pub trait DateComparator: Send + Sync {
    /// Parse `input` with a chrono format string; `None` when it is not a valid date
    fn parse(&self, input: &str, format: &str) -> Option<NaiveDate> {
        NaiveDate::parse_from_str(input.trim(), format).ok()
    }

    /// Current calendar day
    fn today(&self) -> NaiveDate;

    /// Whole days from `b` to `a` (positive when `a` is later)
    fn diff_days(&self, a: NaiveDate, b: NaiveDate) -> i64 {
        a.signed_duration_since(b).num_days()
    }

    fn is_before(&self, a: NaiveDate, b: NaiveDate) -> bool {
        self.diff_days(a, b) < 0
    }

    fn is_before_or_equal(&self, a: NaiveDate, b: NaiveDate) -> bool {
        self.diff_days(a, b) <= 0
    }

    /// Today rendered with `format`; `None` when the format cannot render a date
    fn today_string(&self, format: &str) -> Option<String> {
        let mut rendered = String::new();
        write!(rendered, "{}", self.today().format(format)).ok()?;
        Some(rendered)
    }

    fn is_past(&self, date: NaiveDate) -> bool {
        self.is_before(date, self.today())
    }

    fn is_past_or_today(&self, date: NaiveDate) -> bool {
        self.is_before_or_equal(date, self.today())
    }

    fn is_future(&self, date: NaiveDate) -> bool {
        self.is_before(self.today(), date)
    }

    fn is_today_or_future(&self, date: NaiveDate) -> bool {
        self.is_before_or_equal(self.today(), date)
    }

    /// Inclusive range check; an absent bound is open
    fn is_between(&self, date: NaiveDate, from: Option<NaiveDate>, to: Option<NaiveDate>) -> bool {
        let after_start = from.map_or(true, |from| self.is_before_or_equal(from, date));
        let before_end = to.map_or(true, |to| self.is_before_or_equal(date, to));
        after_start && before_end
    }
}

/// Dates against the local system clock
#[derive(Debug, Clone, Copy, Default)]
pub struct SystemDates;

impl DateComparator for SystemDates {
    fn today(&self) -> NaiveDate {
        Local::now().date_naive()
    }
}

/// Dates against a pinned "today", for reproducible validation runs
#[derive(Debug, Clone, Copy)]
pub struct FixedDates {
    today: NaiveDate,
}

impl FixedDates {
    pub fn new(today: NaiveDate) -> Self {
        Self { today }
    }
}

impl DateComparator for FixedDates {
    fn today(&self) -> NaiveDate {
        self.today
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn ymd(y: i32, m: u32, d: u32) -> NaiveDate {
        NaiveDate::from_ymd_opt(y, m, d).unwrap()
    }

    #[test]
    fn test_parse_fixed_format() {
        let dates = SystemDates;

        assert_eq!(dates.parse("2024-05-01", DEFAULT_DATE_FORMAT), Some(ymd(2024, 5, 1)));
        assert_eq!(dates.parse("2024-5-1", DEFAULT_DATE_FORMAT), Some(ymd(2024, 5, 1)));
        assert_eq!(dates.parse("2024-02-30", DEFAULT_DATE_FORMAT), None);
        assert_eq!(dates.parse("01/05/2024", DEFAULT_DATE_FORMAT), None);
        assert_eq!(dates.parse("", DEFAULT_DATE_FORMAT), None);
        assert_eq!(dates.parse("01/05/2024", "%d/%m/%Y"), Some(ymd(2024, 5, 1)));
    }

    #[test]
    fn test_ordering_is_by_calendar_not_text() {
        let dates = SystemDates;
        // "2024-10-01" < "2024-9-30" lexically, but not on the calendar
        let october = dates.parse("2024-10-01", DEFAULT_DATE_FORMAT).unwrap();
        let september = dates.parse("2024-9-30", DEFAULT_DATE_FORMAT).unwrap();

        assert!(dates.is_before(september, october));
        assert!(!dates.is_before(october, september));
        assert_eq!(dates.diff_days(october, september), 1);
    }

    #[test]
    fn test_before_or_equal() {
        let dates = SystemDates;
        let day = ymd(2024, 1, 1);

        assert!(dates.is_before_or_equal(day, day));
        assert!(!dates.is_before(day, day));
    }

    #[test]
    fn test_relative_to_today() {
        let dates = FixedDates::new(ymd(2024, 6, 15));

        assert_eq!(dates.today_string(DEFAULT_DATE_FORMAT).as_deref(), Some("2024-06-15"));
        assert!(dates.is_past(ymd(2024, 6, 14)));
        assert!(!dates.is_past(ymd(2024, 6, 15)));
        assert!(dates.is_past_or_today(ymd(2024, 6, 15)));
        assert!(dates.is_future(ymd(2024, 6, 16)));
        assert!(dates.is_today_or_future(ymd(2024, 6, 15)));
        assert!(!dates.is_future(ymd(2024, 6, 15)));
    }

    #[test]
    fn test_today_string_with_unrenderable_format() {
        let dates = FixedDates::new(ymd(2024, 6, 15));

        assert_eq!(dates.today_string("%H:%M"), None);
        assert_eq!(dates.today_string("%Q"), None);
        assert_eq!(dates.today_string("%d/%m/%Y").as_deref(), Some("15/06/2024"));
    }

    #[test]
    fn test_is_between() {
        let dates = SystemDates;
        let date = ymd(2024, 3, 10);

        assert!(dates.is_between(date, Some(ymd(2024, 3, 1)), Some(ymd(2024, 3, 31))));
        assert!(dates.is_between(date, Some(date), Some(date)));
        assert!(dates.is_between(date, None, None));
        assert!(!dates.is_between(date, Some(ymd(2024, 3, 11)), None));
        assert!(!dates.is_between(date, None, Some(ymd(2024, 3, 9))));
    }
}
