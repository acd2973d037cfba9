//! # fieldrules
//!
//! Declarative, rule-based field validation for JSON-shaped data.
//! Rules are plain data built once and reused; the engine applies them in
//! order and reports structured errors.
//!
//! ```
//! use fieldrules::{validate, FieldRef, Rule, Rules, ValidationMode};
//! use serde_json::json;
//!
//! let rules = Rules::new()
//!     .rule(Rule::string("name", "Name", true, Some(3), Some(10)))
//!     .rule(Rule::string(FieldRef::path(["address", "city"]), "City", true, None, None));
//!
//! let outcome = validate(&json!({"name": "ab"}), &rules, ValidationMode::CollectAll);
//! assert_eq!(outcome.map(|o| o.len()), Some(2));
//! ```

pub mod config;
pub mod date;
pub mod engine;
pub mod error;
pub mod field;
pub mod rule;
pub mod rules;
pub mod traits;
pub mod validators;

// Re-exports for easy access
pub use config::{ValidationMode, ValidatorConfig};
pub use date::{DateComparator, FixedDates, SystemDates, DEFAULT_DATE_FORMAT};
pub use engine::{validate, Outcome, Validator};
pub use error::{ConfigError, ErrorCode, ValidationError, ValidationErrors, ValidationResult};
pub use field::{resolve, FieldRef};
pub use rule::{
    ArrayRule, BooleanRule, CreditCardRule, DateRangeRule, DateRule, FunctionRule, NumberRangeRule,
    NumberRule, ObjectRule, Rule, RuleFn, RuleKind, StringRule,
};
pub use rules::Rules;
pub use traits::{EvalContext, FieldCheck, RangeCheck};
pub use validators::{fields_match, CardBrand};
