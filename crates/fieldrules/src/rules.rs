//! Ordered rule collections and schema loading

use crate::error::ConfigError;
use crate::rule::{Rule, RuleKind};
use serde::{Deserialize, Serialize, Serializer};
use serde_json::Value;

/// Ordered list of rules, evaluated in insertion order.
///
/// Serializes as a schema list. Function rules only exist in code and are
/// left out of the serialized form.
#[derive(Debug, Clone, Default, PartialEq, Deserialize)]
#[serde(transparent)]
pub struct Rules {
    rules: Vec<Rule>,
}

impl Serialize for Rules {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.collect_seq(self.rules.iter().filter(|rule| rule.kind() != RuleKind::Function))
    }
}

impl Rules {
    /// Create a new empty rules collection
    pub fn new() -> Self {
        Self { rules: Vec::new() }
    }

    /// Append a rule
    pub fn rule(mut self, rule: impl Into<Rule>) -> Self {
        self.rules.push(rule.into());
        self
    }

    pub fn push(&mut self, rule: impl Into<Rule>) {
        self.rules.push(rule.into());
    }

    pub fn len(&self) -> usize {
        self.rules.len()
    }

    pub fn is_empty(&self) -> bool {
        self.rules.is_empty()
    }

    pub fn iter(&self) -> std::slice::Iter<'_, Rule> {
        self.rules.iter()
    }

    /// Load a YAML list of rule definitions
    pub fn from_yaml_str(yaml: &str) -> Result<Self, ConfigError> {
        let entries: Vec<Value> = serde_yaml::from_str(yaml)?;
        Self::from_entries(entries)
    }

    /// Load a JSON array of rule definitions
    pub fn from_json_str(json: &str) -> Result<Self, ConfigError> {
        let entries: Vec<Value> = serde_json::from_str(json)?;
        Self::from_entries(entries)
    }

    /// Entries of an unknown kind, and function rules (which only exist in
    /// code), are skipped with a warning. A known kind with bad parameters
    /// fails the whole schema.
    fn from_entries(entries: Vec<Value>) -> Result<Self, ConfigError> {
        let mut rules = Self::new();

        for (index, entry) in entries.into_iter().enumerate() {
            let tag = entry.get("type").and_then(Value::as_str).map(str::to_string);
            match tag.as_deref().and_then(RuleKind::from_tag) {
                Some(RuleKind::Function) | None => {
                    tracing::warn!(index, rule_type = ?tag, "skipping unsupported rule definition");
                }
                Some(_) => rules.push(serde_json::from_value::<Rule>(entry)?),
            }
        }

        tracing::debug!(count = rules.len(), "loaded rule schema");
        Ok(rules)
    }
}

impl AsRef<[Rule]> for Rules {
    fn as_ref(&self) -> &[Rule] {
        &self.rules
    }
}

impl From<Rule> for Rules {
    fn from(rule: Rule) -> Self {
        Self { rules: vec![rule] }
    }
}

impl From<Vec<Rule>> for Rules {
    fn from(rules: Vec<Rule>) -> Self {
        Self { rules }
    }
}

impl FromIterator<Rule> for Rules {
    fn from_iter<I: IntoIterator<Item = Rule>>(iter: I) -> Self {
        Self {
            rules: iter.into_iter().collect(),
        }
    }
}

impl Extend<Rule> for Rules {
    fn extend<I: IntoIterator<Item = Rule>>(&mut self, iter: I) {
        self.rules.extend(iter);
    }
}

impl IntoIterator for Rules {
    type Item = Rule;
    type IntoIter = std::vec::IntoIter<Rule>;

    fn into_iter(self) -> Self::IntoIter {
        self.rules.into_iter()
    }
}

impl<'a> IntoIterator for &'a Rules {
    type Item = &'a Rule;
    type IntoIter = std::slice::Iter<'a, Rule>;

    fn into_iter(self) -> Self::IntoIter {
        self.rules.iter()
    }
}
