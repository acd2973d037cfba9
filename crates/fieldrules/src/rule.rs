//! Declarative rule definitions
//!
//! A [`Rule`] is plain data: which field(s) to look at, how to label them in
//! messages, and the bounds to enforce. The checks themselves live in
//! [`crate::validators`], keyed by [`RuleKind`].

use crate::error::ValidationError;
use crate::field::FieldRef;
use serde::{Deserialize, Serialize};
use serde_json::Value;
use std::fmt;
use std::sync::Arc;

/// Discriminant of a [`Rule`]
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum RuleKind {
    String,
    Number,
    NumberRange,
    Date,
    DateRange,
    Boolean,
    Array,
    CreditCard,
    Object,
    Function,
}

impl RuleKind {
    /// Name used for the `type` tag in rule schemas
    pub fn as_str(self) -> &'static str {
        match self {
            RuleKind::String => "string",
            RuleKind::Number => "number",
            RuleKind::NumberRange => "number_range",
            RuleKind::Date => "date",
            RuleKind::DateRange => "date_range",
            RuleKind::Boolean => "bool",
            RuleKind::Array => "array",
            RuleKind::CreditCard => "credit",
            RuleKind::Object => "obj",
            RuleKind::Function => "func",
        }
    }

    /// Kind named by a schema `type` tag
    pub fn from_tag(tag: &str) -> Option<Self> {
        let kind = match tag {
            "string" => RuleKind::String,
            "number" => RuleKind::Number,
            "number_range" => RuleKind::NumberRange,
            "date" => RuleKind::Date,
            "date_range" => RuleKind::DateRange,
            "bool" => RuleKind::Boolean,
            "array" => RuleKind::Array,
            "credit" => RuleKind::CreditCard,
            "obj" => RuleKind::Object,
            "func" => RuleKind::Function,
            _ => return None,
        };
        Some(kind)
    }
}

impl fmt::Display for RuleKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// A single validation rule
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "type")]
pub enum Rule {
    #[serde(rename = "string")]
    String(StringRule),
    #[serde(rename = "number")]
    Number(NumberRule),
    #[serde(rename = "number_range")]
    NumberRange(NumberRangeRule),
    #[serde(rename = "date")]
    Date(DateRule),
    #[serde(rename = "date_range")]
    DateRange(DateRangeRule),
    #[serde(rename = "bool")]
    Boolean(BooleanRule),
    #[serde(rename = "array")]
    Array(ArrayRule),
    #[serde(rename = "credit")]
    CreditCard(CreditCardRule),
    #[serde(rename = "obj")]
    Object(ObjectRule),
    /// Host predicates cannot be expressed in a schema
    #[serde(skip)]
    Function(FunctionRule),
}

impl Rule {
    /// Length-bounded string field
    pub fn string(
        field: impl Into<FieldRef>,
        label: impl Into<String>,
        required: bool,
        min_length: Option<usize>,
        max_length: Option<usize>,
    ) -> Self {
        Rule::String(StringRule {
            field: field.into(),
            label: label.into(),
            required,
            min_length,
            max_length,
        })
    }

    /// Number (or numeric string) with optional bounds
    pub fn number(
        field: impl Into<FieldRef>,
        label: impl Into<String>,
        required: bool,
        min_value: Option<f64>,
        max_value: Option<f64>,
    ) -> Self {
        Rule::Number(NumberRule {
            field: field.into(),
            label: label.into(),
            required,
            min_value,
            max_value,
        })
    }

    /// Value at `min_field` must not exceed the value at `max_field`
    pub fn number_range(
        min_field: impl Into<FieldRef>,
        max_field: impl Into<FieldRef>,
        label: impl Into<String>,
    ) -> Self {
        Rule::NumberRange(NumberRangeRule {
            min_field: min_field.into(),
            max_field: max_field.into(),
            label: label.into(),
        })
    }

    /// Date bounds are date strings in the validator's configured format
    pub fn date(
        field: impl Into<FieldRef>,
        label: impl Into<String>,
        required: bool,
        min_value: Option<&str>,
        max_value: Option<&str>,
    ) -> Self {
        Rule::Date(DateRule {
            field: field.into(),
            label: label.into(),
            required,
            min_value: min_value.map(str::to_string),
            max_value: max_value.map(str::to_string),
        })
    }

    /// Date at `max_field` must not be before the date at `min_field`
    pub fn date_range(
        min_field: impl Into<FieldRef>,
        max_field: impl Into<FieldRef>,
        label: impl Into<String>,
    ) -> Self {
        Rule::DateRange(DateRangeRule {
            min_field: min_field.into(),
            max_field: max_field.into(),
            label: label.into(),
        })
    }

    /// Boolean rules have no optional form
    pub fn boolean(field: impl Into<FieldRef>, label: impl Into<String>) -> Self {
        Rule::Boolean(BooleanRule {
            field: field.into(),
            label: label.into(),
        })
    }

    /// Array field with optional element-count bounds
    pub fn array(
        field: impl Into<FieldRef>,
        label: impl Into<String>,
        required: bool,
        min_length: Option<usize>,
        max_length: Option<usize>,
    ) -> Self {
        Rule::Array(ArrayRule {
            field: field.into(),
            label: label.into(),
            required,
            min_length,
            max_length,
        })
    }

    /// American Express, Visa or MasterCard number
    pub fn credit_card(field: impl Into<FieldRef>, label: impl Into<String>, required: bool) -> Self {
        Rule::CreditCard(CreditCardRule {
            field: field.into(),
            label: label.into(),
            required,
        })
    }

    /// Field holding a JSON object
    pub fn object(field: impl Into<FieldRef>, label: impl Into<String>, required: bool) -> Self {
        Rule::Object(ObjectRule {
            field: field.into(),
            label: label.into(),
            required,
        })
    }

    /// Cross-field rule backed by a host predicate over the whole object
    pub fn function<F>(name: impl Into<String>, predicate: F) -> Self
    where
        F: Fn(&Value) -> Option<ValidationError> + Send + Sync + 'static,
    {
        Rule::Function(FunctionRule::new(name, predicate))
    }

    /// Discriminant of this rule
    pub fn kind(&self) -> RuleKind {
        match self {
            Rule::String(_) => RuleKind::String,
            Rule::Number(_) => RuleKind::Number,
            Rule::NumberRange(_) => RuleKind::NumberRange,
            Rule::Date(_) => RuleKind::Date,
            Rule::DateRange(_) => RuleKind::DateRange,
            Rule::Boolean(_) => RuleKind::Boolean,
            Rule::Array(_) => RuleKind::Array,
            Rule::CreditCard(_) => RuleKind::CreditCard,
            Rule::Object(_) => RuleKind::Object,
            Rule::Function(_) => RuleKind::Function,
        }
    }

    /// Display label; function rules are identified by name instead
    pub fn label(&self) -> &str {
        match self {
            Rule::String(rule) => &rule.label,
            Rule::Number(rule) => &rule.label,
            Rule::NumberRange(rule) => &rule.label,
            Rule::Date(rule) => &rule.label,
            Rule::DateRange(rule) => &rule.label,
            Rule::Boolean(rule) => &rule.label,
            Rule::Array(rule) => &rule.label,
            Rule::CreditCard(rule) => &rule.label,
            Rule::Object(rule) => &rule.label,
            Rule::Function(rule) => &rule.name,
        }
    }

    /// Fields this rule reads, in resolution order
    pub fn fields(&self) -> Vec<&FieldRef> {
        match self {
            Rule::String(rule) => vec![&rule.field],
            Rule::Number(rule) => vec![&rule.field],
            Rule::NumberRange(rule) => vec![&rule.min_field, &rule.max_field],
            Rule::Date(rule) => vec![&rule.field],
            Rule::DateRange(rule) => vec![&rule.min_field, &rule.max_field],
            Rule::Boolean(rule) => vec![&rule.field],
            Rule::Array(rule) => vec![&rule.field],
            Rule::CreditCard(rule) => vec![&rule.field],
            Rule::Object(rule) => vec![&rule.field],
            Rule::Function(_) => Vec::new(),
        }
    }
}

impl AsRef<[Rule]> for Rule {
    fn as_ref(&self) -> &[Rule] {
        std::slice::from_ref(self)
    }
}

/// Text length bounds on a string field
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct StringRule {
    pub field: FieldRef,
    pub label: String,
    #[serde(default)]
    pub required: bool,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub min_length: Option<usize>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub max_length: Option<usize>,
}

impl StringRule {
    /// Create an optional rule for `field`
    pub fn new(field: impl Into<FieldRef>, label: impl Into<String>) -> Self {
        Self {
            field: field.into(),
            label: label.into(),
            required: false,
            min_length: None,
            max_length: None,
        }
    }

    /// Set whether the field must be present
    pub fn required(mut self, required: bool) -> Self {
        self.required = required;
        self
    }

    /// Set the minimum length
    pub fn min_length(mut self, min: usize) -> Self {
        self.min_length = Some(min);
        self
    }

    /// Set the maximum length
    pub fn max_length(mut self, max: usize) -> Self {
        self.max_length = Some(max);
        self
    }
}

/// Numeric bounds on a field holding a number or a numeric string
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct NumberRule {
    pub field: FieldRef,
    pub label: String,
    #[serde(default)]
    pub required: bool,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub min_value: Option<f64>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub max_value: Option<f64>,
}

impl NumberRule {
    /// Create an optional rule for `field`
    pub fn new(field: impl Into<FieldRef>, label: impl Into<String>) -> Self {
        Self {
            field: field.into(),
            label: label.into(),
            required: false,
            min_value: None,
            max_value: None,
        }
    }

    /// Set whether the field must be present
    pub fn required(mut self, required: bool) -> Self {
        self.required = required;
        self
    }

    /// Set the lower bound (inclusive)
    pub fn min_value(mut self, min: f64) -> Self {
        self.min_value = Some(min);
        self
    }

    /// Set the upper bound (inclusive)
    pub fn max_value(mut self, max: f64) -> Self {
        self.max_value = Some(max);
        self
    }

    /// Set both bounds
    pub fn range(mut self, min: f64, max: f64) -> Self {
        self.min_value = Some(min);
        self.max_value = Some(max);
        self
    }
}

/// The value at `min_field` must not exceed the value at `max_field`
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct NumberRangeRule {
    pub min_field: FieldRef,
    pub max_field: FieldRef,
    pub label: String,
}

/// Date field with optional inclusive bounds
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct DateRule {
    pub field: FieldRef,
    pub label: String,
    #[serde(default)]
    pub required: bool,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub min_value: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub max_value: Option<String>,
}

impl DateRule {
    /// Create an optional rule for `field`
    pub fn new(field: impl Into<FieldRef>, label: impl Into<String>) -> Self {
        Self {
            field: field.into(),
            label: label.into(),
            required: false,
            min_value: None,
            max_value: None,
        }
    }

    /// Set whether the field must be present
    pub fn required(mut self, required: bool) -> Self {
        self.required = required;
        self
    }

    /// Set the lower bound (inclusive)
    pub fn min_value(mut self, min: impl Into<String>) -> Self {
        self.min_value = Some(min.into());
        self
    }

    /// Set the upper bound (inclusive)
    pub fn max_value(mut self, max: impl Into<String>) -> Self {
        self.max_value = Some(max.into());
        self
    }
}

/// The date at `max_field` must not be before the date at `min_field`
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct DateRangeRule {
    pub min_field: FieldRef,
    pub max_field: FieldRef,
    pub label: String,
}

/// Always-required flag; `false` is a value
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct BooleanRule {
    pub field: FieldRef,
    pub label: String,
}

/// Element-count bounds on an array field
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ArrayRule {
    pub field: FieldRef,
    pub label: String,
    #[serde(default)]
    pub required: bool,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub min_length: Option<usize>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub max_length: Option<usize>,
}

impl ArrayRule {
    /// Create an optional rule for `field`
    pub fn new(field: impl Into<FieldRef>, label: impl Into<String>) -> Self {
        Self {
            field: field.into(),
            label: label.into(),
            required: false,
            min_length: None,
            max_length: None,
        }
    }

    /// Set whether the field must be present
    pub fn required(mut self, required: bool) -> Self {
        self.required = required;
        self
    }

    /// Set the minimum length
    pub fn min_length(mut self, min: usize) -> Self {
        self.min_length = Some(min);
        self
    }

    /// Set the maximum length
    pub fn max_length(mut self, max: usize) -> Self {
        self.max_length = Some(max);
        self
    }
}

/// American Express, Visa or MasterCard number
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CreditCardRule {
    pub field: FieldRef,
    pub label: String,
    #[serde(default)]
    pub required: bool,
}

/// Nested JSON object
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ObjectRule {
    pub field: FieldRef,
    pub label: String,
    #[serde(default)]
    pub required: bool,
}

/// Signature of a cross-field predicate
pub type RuleFn = Arc<dyn Fn(&Value) -> Option<ValidationError> + Send + Sync>;

/// Host-supplied predicate over the whole object
#[derive(Clone)]
pub struct FunctionRule {
    /// Name used in logs
    pub name: String,
    predicate: RuleFn,
}

impl FunctionRule {
    /// Wrap `predicate` under `name`
    pub fn new<F>(name: impl Into<String>, predicate: F) -> Self
    where
        F: Fn(&Value) -> Option<ValidationError> + Send + Sync + 'static,
    {
        Self {
            name: name.into(),
            predicate: Arc::new(predicate),
        }
    }

    /// Run the predicate against `object`
    pub fn call(&self, object: &Value) -> Option<ValidationError> {
        (self.predicate)(object)
    }
}

impl fmt::Debug for FunctionRule {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("FunctionRule")
            .field("name", &self.name)
            .finish_non_exhaustive()
    }
}

/// Two function rules are equal when they share the same predicate
impl PartialEq for FunctionRule {
    fn eq(&self, other: &Self) -> bool {
        self.name == other.name && Arc::ptr_eq(&self.predicate, &other.predicate)
    }
}

macro_rules! impl_into_rule {
    ($($rule:ident => $variant:ident),* $(,)?) => {
        $(
            impl From<$rule> for Rule {
                fn from(rule: $rule) -> Self {
                    Rule::$variant(rule)
                }
            }
        )*
    };
}

impl_into_rule! {
    StringRule => String,
    NumberRule => Number,
    NumberRangeRule => NumberRange,
    DateRule => Date,
    DateRangeRule => DateRange,
    BooleanRule => Boolean,
    ArrayRule => Array,
    CreditCardRule => CreditCard,
    ObjectRule => Object,
    FunctionRule => Function,
}
