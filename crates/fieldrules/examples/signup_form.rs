//! Validates a few signup payloads and prints what the engine reports.
//!
//! Run with `RUST_LOG=fieldrules=debug` to see per-rule tracing output.

use fieldrules::{
    fields_match, FieldRef, Rule, Rules, ValidationMode, Validator, ValidatorConfig,
};
use serde_json::json;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt, EnvFilter};

fn main() -> Result<(), Box<dyn std::error::Error>> {
    tracing_subscriber::registry()
        .with(EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("fieldrules=info")))
        .with(tracing_subscriber::fmt::layer())
        .init();

    let config = ValidatorConfig::from_env()?;
    let validator = Validator::new(config.mode(ValidationMode::CollectAll));

    let mut rules = Rules::from_yaml_str(
        r#"
- type: string
  field: name
  label: Name
  required: true
  min_length: 3
  max_length: 40
- type: number
  field: age
  label: Age
  required: true
  min_value: 18
  max_value: 120
- type: string
  field: [address, city]
  label: City
  required: true
- type: date_range
  min_field: [stay, from]
  max_field: [stay, to]
  label: Stay
- type: credit
  field: card
  label: Card number
  required: true
- type: bool
  field: terms
  label: Terms and conditions
"#,
    )?;
    rules.push(fields_match("password", "password_confirmation", "Password confirmation"));

    let payloads = [
        json!({
            "name": "Grace Hopper",
            "age": "85",
            "address": {"city": "Arlington"},
            "stay": {"from": "2024-05-10", "to": "2024-05-20"},
            "card": "4111 1111 1111 1111",
            "terms": true,
            "password": "cobol",
            "password_confirmation": "cobol"
        }),
        json!({
            "name": "Al",
            "age": "abc",
            "address": null,
            "stay": {"from": "2024-05-10", "to": "2024-05-01"},
            "card": "1234567890123456",
            "password": "one",
            "password_confirmation": "two"
        }),
    ];

    for (index, payload) in payloads.iter().enumerate() {
        println!("Payload #{}", index + 1);
        match validator.validate_all(payload, &rules) {
            Ok(()) => println!("  valid"),
            Err(errors) => {
                for error in &errors {
                    println!("  [{} {}] {}", error.code.code(), error.code, error);
                }
                println!("  {}", serde_json::to_string_pretty(&errors.to_json())?);
            }
        }
    }

    let city = FieldRef::path(["address", "city"]);
    println!("city of payload #1: {:?}", city.resolve(&payloads[0]));

    let single = Rule::credit_card("card", "Card number", true);
    println!(
        "single rule, first error only: {:?}",
        validator.validate_with_mode(&payloads[1], &single, ValidationMode::FirstErrorOnly)
    );

    Ok(())
}
