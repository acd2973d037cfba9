//! Validation engine: applies an ordered rule sequence to an object

use crate::config::{ValidationMode, ValidatorConfig};
use crate::date::{DateComparator, SystemDates};
use crate::error::{ConfigError, ValidationError, ValidationErrors, ValidationResult};
use crate::rule::Rule;
use crate::traits::EvalContext;
use crate::validators;
use serde_json::Value;
use std::sync::Arc;

/// Findings of a validation run that found at least one error
#[derive(Debug, Clone, PartialEq)]
pub enum Outcome {
    /// The first failing rule's error (`FirstErrorOnly`)
    First(ValidationError),
    /// Every failing rule's error in rule order (`CollectAll`), never empty
    All(ValidationErrors),
}

impl Outcome {
    /// First error in rule order
    pub fn first(&self) -> Option<&ValidationError> {
        match self {
            Outcome::First(error) => Some(error),
            Outcome::All(errors) => errors.first(),
        }
    }

    pub fn len(&self) -> usize {
        match self {
            Outcome::First(_) => 1,
            Outcome::All(errors) => errors.len(),
        }
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    pub fn into_errors(self) -> ValidationErrors {
        match self {
            Outcome::First(error) => ValidationErrors::from(error),
            Outcome::All(errors) => errors,
        }
    }
}

/// Applies rules to data objects.
///
/// A validator holds no per-call state and can be shared across threads.
#[derive(Clone)]
pub struct Validator {
    config: ValidatorConfig,
    dates: Arc<dyn DateComparator>,
}

impl Validator {
    /// Create a validator backed by the system clock.
    ///
    /// An unusable date format is logged; use [`Validator::try_new`] to
    /// reject it instead.
    pub fn new(config: ValidatorConfig) -> Self {
        if let Err(err) = config.validate() {
            tracing::warn!(error = %err, "validator created with invalid configuration");
        }

        Self {
            config,
            dates: Arc::new(SystemDates),
        }
    }

    /// Create a validator after checking `config`
    pub fn try_new(config: ValidatorConfig) -> Result<Self, ConfigError> {
        config.validate()?;
        Ok(Self::new(config))
    }

    /// Swap the date capability, e.g. for a pinned clock
    pub fn with_dates(mut self, dates: impl DateComparator + 'static) -> Self {
        self.dates = Arc::new(dates);
        self
    }

    pub fn config(&self) -> &ValidatorConfig {
        &self.config
    }

    /// Validate using the configured mode
    pub fn validate<R>(&self, object: &Value, rules: &R) -> Option<Outcome>
    where
        R: AsRef<[Rule]> + ?Sized,
    {
        self.validate_with_mode(object, rules, self.config.mode)
    }

    /// Evaluate `rules` in order against `object`; `None` means no errors
    pub fn validate_with_mode<R>(&self, object: &Value, rules: &R, mode: ValidationMode) -> Option<Outcome>
    where
        R: AsRef<[Rule]> + ?Sized,
    {
        let rules = rules.as_ref();
        let ctx = EvalContext::new(&*self.dates, &self.config.date_format);
        let mut errors = ValidationErrors::new();

        tracing::debug!(rules = rules.len(), ?mode, "validating object");

        for (index, rule) in rules.iter().enumerate() {
            let Some(error) = validators::evaluate(rule, object, &ctx) else {
                tracing::trace!(index, kind = %rule.kind(), "rule passed");
                continue;
            };

            tracing::debug!(
                index,
                kind = %rule.kind(),
                label = rule.label(),
                code = %error.code,
                "rule failed"
            );

            match mode {
                ValidationMode::FirstErrorOnly => return Some(Outcome::First(error)),
                ValidationMode::CollectAll => errors.add(error),
            }
        }

        if errors.is_empty() {
            None
        } else {
            Some(Outcome::All(errors))
        }
    }

    /// First error in rule order, if any
    pub fn validate_first<R>(&self, object: &Value, rules: &R) -> Option<ValidationError>
    where
        R: AsRef<[Rule]> + ?Sized,
    {
        match self.validate_with_mode(object, rules, ValidationMode::FirstErrorOnly)? {
            Outcome::First(error) => Some(error),
            Outcome::All(errors) => errors.into_vec().into_iter().next(),
        }
    }

    /// Every error in rule order
    pub fn validate_all<R>(&self, object: &Value, rules: &R) -> ValidationResult<()>
    where
        R: AsRef<[Rule]> + ?Sized,
    {
        match self.validate_with_mode(object, rules, ValidationMode::CollectAll) {
            Some(outcome) => Err(outcome.into_errors()),
            None => Ok(()),
        }
    }

    pub fn is_valid<R>(&self, object: &Value, rules: &R) -> bool
    where
        R: AsRef<[Rule]> + ?Sized,
    {
        self.validate_first(object, rules).is_none()
    }
}

impl Default for Validator {
    fn default() -> Self {
        Self::new(ValidatorConfig::default())
    }
}

impl std::fmt::Debug for Validator {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Validator")
            .field("config", &self.config)
            .finish_non_exhaustive()
    }
}

/// Validate `object` against one rule or an ordered sequence of rules with
/// the default configuration and the system clock
pub fn validate<R>(object: &Value, rules: &R, mode: ValidationMode) -> Option<Outcome>
where
    R: AsRef<[Rule]> + ?Sized,
{
    Validator::default().validate_with_mode(object, rules, mode)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::date::FixedDates;
    use crate::error::ErrorCode;
    use crate::rules::Rules;
    use chrono::NaiveDate;
    use serde_json::json;

    fn signup_rules() -> Rules {
        Rules::new()
            .rule(Rule::string("name", "Name", true, Some(3), Some(10)))
            .rule(Rule::number("age", "Age", true, Some(18.0), Some(65.0)))
            .rule(Rule::boolean("terms", "Terms"))
    }

    #[test]
    fn test_no_errors_is_none() {
        let data = json!({"name": "Grace", "age": 30, "terms": true});
        assert_eq!(validate(&data, &signup_rules(), ValidationMode::CollectAll), None);
        assert_eq!(validate(&data, &signup_rules(), ValidationMode::FirstErrorOnly), None);
    }

    #[test]
    fn test_first_error_only() {
        let data = json!({"name": "ab", "age": "5", "terms": true});

        let outcome = validate(&data, &signup_rules(), ValidationMode::FirstErrorOnly).unwrap();
        match outcome {
            Outcome::First(error) => assert_eq!(error.code, ErrorCode::MinLengthViolated),
            other => panic!("expected a single error, got {:?}", other),
        }
    }

    #[test]
    fn test_collect_all_keeps_rule_order() {
        let data = json!({"name": "ab", "age": "5"});

        let outcome = validate(&data, &signup_rules(), ValidationMode::CollectAll).unwrap();
        let codes: Vec<ErrorCode> = outcome.into_errors().iter().map(|e| e.code).collect();
        assert_eq!(
            codes,
            vec![
                ErrorCode::MinLengthViolated,
                ErrorCode::MinValueViolated,
                ErrorCode::MandatoryField
            ]
        );
    }

    #[test]
    fn test_single_rule_input() {
        let rule = Rule::string("name", "Name", true, Some(3), Some(10));

        let outcome = validate(&json!({"name": "abcdefghijk"}), &rule, ValidationMode::CollectAll).unwrap();
        assert_eq!(outcome.len(), 1);
        assert_eq!(outcome.first().map(|e| e.code), Some(ErrorCode::MaxLengthViolated));
        assert!(validate(&json!({"name": "abc"}), &rule, ValidationMode::CollectAll).is_none());
    }

    #[test]
    fn test_slice_and_vec_inputs() {
        let rules = vec![Rule::boolean("a", "A"), Rule::boolean("b", "B")];

        assert_eq!(validate(&json!({}), &rules, ValidationMode::CollectAll).map(|o| o.len()), Some(2));
        assert_eq!(validate(&json!({}), &rules[1..], ValidationMode::CollectAll).map(|o| o.len()), Some(1));
        assert!(validate(&json!({}), &Vec::<Rule>::new(), ValidationMode::CollectAll).is_none());
    }

    #[test]
    fn test_configured_mode_and_helpers() {
        let validator = Validator::new(ValidatorConfig::new().mode(ValidationMode::CollectAll));
        let data = json!({"name": "ab", "age": 70, "terms": true});

        let outcome = validator.validate(&data, &signup_rules()).unwrap();
        assert!(matches!(outcome, Outcome::All(ref errors) if errors.len() == 2));

        assert_eq!(
            validator.validate_first(&data, &signup_rules()).map(|e| e.code),
            Some(ErrorCode::MinLengthViolated)
        );

        let errors = validator.validate_all(&data, &signup_rules()).unwrap_err();
        assert!(errors.has_field_errors("name"));
        assert!(errors.has_field_errors("age"));
        assert!(!validator.is_valid(&data, &signup_rules()));
        assert!(validator.is_valid(&json!({"name": "abc", "age": 20, "terms": false}), &signup_rules()));
    }

    #[test]
    fn test_custom_date_format_with_function_rule() {
        let validator = Validator::new(ValidatorConfig::new().date_format("%d/%m/%Y"));

        let not_in_future = Rule::function("not_in_future", |object| {
            let day = object["day"].as_str()?;
            let day = NaiveDate::parse_from_str(day, "%d/%m/%Y").ok()?;
            (day > NaiveDate::from_ymd_opt(2024, 6, 15)?)
                .then(|| ValidationError::for_field(ErrorCode::InvalidDate, "Day is in the future.", "day"))
        });
        let rules = Rules::new()
            .rule(Rule::date("day", "Day", true, Some("01/01/2024"), None))
            .rule(not_in_future);

        assert!(validator.validate(&json!({"day": "15/06/2024"}), &rules).is_none());
        assert_eq!(
            validator.validate_first(&json!({"day": "16/06/2024"}), &rules).map(|e| e.code),
            Some(ErrorCode::InvalidDate)
        );
        assert_eq!(
            validator.validate_first(&json!({"day": "31/12/2023"}), &rules).map(|e| e.code),
            Some(ErrorCode::MinValueViolated)
        );
    }

    #[test]
    fn test_swapped_date_capability_is_used() {
        // Treats every input as the same day, so no bound can be violated
        struct OneDay(NaiveDate);

        impl DateComparator for OneDay {
            fn parse(&self, _input: &str, _format: &str) -> Option<NaiveDate> {
                Some(self.0)
            }

            fn today(&self) -> NaiveDate {
                self.0
            }
        }

        let day = NaiveDate::from_ymd_opt(2024, 6, 15).unwrap();
        let validator = Validator::default().with_dates(OneDay(day));
        let rule = Rule::date("day", "Day", true, Some("2030-01-01"), None);

        assert!(validator.validate(&json!({"day": "not even a date"}), &rule).is_none());

        let pinned = Validator::default().with_dates(FixedDates::new(day));
        assert_eq!(
            pinned.validate_first(&json!({"day": "2024-06-14"}), &rule).map(|e| e.code),
            Some(ErrorCode::MinValueViolated)
        );
    }

    #[test]
    fn test_try_new_checks_date_format() {
        let err = Validator::try_new(ValidatorConfig::new().date_format("%Q")).unwrap_err();
        assert!(matches!(err, ConfigError::InvalidValue { ref field, .. } if field == "date_format"));

        assert!(Validator::try_new(ValidatorConfig::new().date_format("%H:%M")).is_err());

        let validator = Validator::try_new(ValidatorConfig::new().date_format("%d.%m.%Y")).unwrap();
        assert!(validator.is_valid(&json!({"day": "15.06.2024"}), &Rule::date("day", "Day", true, None, None)));
    }

    #[test]
    fn test_idempotent() {
        let data = json!({"name": "ab", "age": "abc"});
        let rules = signup_rules();

        let first = validate(&data, &rules, ValidationMode::CollectAll);
        let second = validate(&data, &rules, ValidationMode::CollectAll);
        assert_eq!(first, second);
    }

    #[test]
    fn test_validator_is_shareable() {
        fn assert_send_sync<T: Send + Sync>() {}
        assert_send_sync::<Validator>();
        assert_send_sync::<Rules>();
    }
}
