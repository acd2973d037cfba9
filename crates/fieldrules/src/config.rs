//! Validator configuration
//!
//! Configuration can be built in code, read from `FIELDRULES_*` environment
//! variables, or loaded from a YAML/JSON document:
//!
//! ```yaml
//! mode: collect_all
//! date_format: "%Y-%m-%d"
//! ```

use crate::date::DEFAULT_DATE_FORMAT;
use crate::error::ConfigError;
use chrono::format::{Item, StrftimeItems};
use chrono::NaiveDate;
use serde::{Deserialize, Serialize};
use std::fmt::Write;
use std::str::FromStr;

pub const ENV_MODE: &str = "FIELDRULES_MODE";
pub const ENV_DATE_FORMAT: &str = "FIELDRULES_DATE_FORMAT";

/// How many findings a validation run reports
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ValidationMode {
    /// Stop at the first failing rule
    #[default]
    FirstErrorOnly,
    /// Evaluate every rule and report all failures in rule order
    CollectAll,
}

impl FromStr for ValidationMode {
    type Err = ConfigError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "first" | "first_error_only" => Ok(ValidationMode::FirstErrorOnly),
            "all" | "collect_all" => Ok(ValidationMode::CollectAll),
            _ => Err(ConfigError::invalid_value(
                "mode",
                s,
                "first, first_error_only, all or collect_all",
            )),
        }
    }
}

/// Configuration for a [`crate::Validator`]
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct ValidatorConfig {
    /// Aggregation mode used by [`crate::Validator::validate`]
    pub mode: ValidationMode,
    /// chrono format for date values and date bounds
    pub date_format: String,
}

impl Default for ValidatorConfig {
    fn default() -> Self {
        Self {
            mode: ValidationMode::FirstErrorOnly,
            date_format: DEFAULT_DATE_FORMAT.to_string(),
        }
    }
}

impl ValidatorConfig {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn mode(mut self, mode: ValidationMode) -> Self {
        self.mode = mode;
        self
    }

    pub fn date_format(mut self, format: impl Into<String>) -> Self {
        self.date_format = format.into();
        self
    }

    /// Read configuration from the process environment
    pub fn from_env() -> Result<Self, ConfigError> {
        Self::from_lookup(|key| std::env::var(key).ok())
    }

    /// Read configuration through `lookup`; unset keys keep their defaults
    pub fn from_lookup<F>(lookup: F) -> Result<Self, ConfigError>
    where
        F: Fn(&str) -> Option<String>,
    {
        let mut config = Self::default();

        if let Some(mode) = lookup(ENV_MODE) {
            config.mode = mode.parse()?;
        }
        if let Some(format) = lookup(ENV_DATE_FORMAT) {
            config.date_format = format;
        }

        config.validate()?;
        Ok(config)
    }

    pub fn from_yaml_str(yaml: &str) -> Result<Self, ConfigError> {
        let config: Self = serde_yaml::from_str(yaml)?;
        config.validate()?;
        Ok(config)
    }

    pub fn from_json_str(json: &str) -> Result<Self, ConfigError> {
        let config: Self = serde_json::from_str(json)?;
        config.validate()?;
        Ok(config)
    }

    /// The date format must be able to write and read back a full calendar date
    pub fn validate(&self) -> Result<(), ConfigError> {
        let invalid = || {
            ConfigError::invalid_value(
                "date_format",
                &self.date_format,
                "a chrono format with year, month and day, e.g. %Y-%m-%d",
            )
        };

        if StrftimeItems::new(&self.date_format).any(|item| matches!(item, Item::Error)) {
            return Err(invalid());
        }

        let probe = NaiveDate::from_ymd_opt(2001, 2, 3).ok_or_else(invalid)?;
        let mut rendered = String::new();
        write!(rendered, "{}", probe.format(&self.date_format)).map_err(|_| invalid())?;

        match NaiveDate::parse_from_str(&rendered, &self.date_format) {
            Ok(parsed) if parsed == probe => Ok(()),
            _ => Err(invalid()),
        }
    }
}
