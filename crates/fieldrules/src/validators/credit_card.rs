//! Credit card number rule

use super::required::{is_missing, mandatory};
use crate::error::{ErrorCode, ValidationError};
use crate::rule::CreditCardRule;
use crate::traits::{EvalContext, FieldCheck};
use once_cell::sync::Lazy;
use regex::Regex;
use serde_json::Value;

static AMERICAN_EXPRESS: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"^3[47][0-9]{13}$").expect("American Express pattern is valid"));
static VISA: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"^4[0-9]{12}(?:[0-9]{3})?$").expect("Visa pattern is valid"));
static MASTERCARD: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"^5[1-5][0-9]{14}$").expect("MasterCard pattern is valid"));

/// Card networks recognised by [`CreditCardRule`]
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CardBrand {
    AmericanExpress,
    Visa,
    MasterCard,
}

impl CardBrand {
    /// Detect the brand of a card number; spaces are ignored
    pub fn detect(number: &str) -> Option<Self> {
        let digits = number.replace(' ', "");

        if AMERICAN_EXPRESS.is_match(&digits) {
            Some(CardBrand::AmericanExpress)
        } else if VISA.is_match(&digits) {
            Some(CardBrand::Visa)
        } else if MASTERCARD.is_match(&digits) {
            Some(CardBrand::MasterCard)
        } else {
            None
        }
    }
}

impl FieldCheck for CreditCardRule {
    fn check(&self, value: Option<&Value>, _ctx: &EvalContext<'_>) -> Option<ValidationError> {
        if is_missing(value) {
            return self.required.then(|| mandatory(&self.field, &self.label));
        }

        let brand = match value {
            Some(Value::String(number)) => CardBrand::detect(number),
            Some(Value::Number(number)) => CardBrand::detect(&number.to_string()),
            _ => None,
        };

        match brand {
            Some(brand) => {
                tracing::trace!(field = %self.field, ?brand, "card number matched");
                None
            }
            None => Some(ValidationError::for_field(
                ErrorCode::InvalidCardNumber,
                format!("{} is not valid format.", self.label),
                self.field.clone(),
            )),
        }
    }
}
