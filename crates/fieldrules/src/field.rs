//! Field references and value resolution

use serde::{Deserialize, Serialize};
use serde_json::Value;
use std::fmt;

/// Location of a value inside a data object.
///
/// A `Single` key reads a direct property; a `Path` walks nested objects one
/// key at a time. The shape is fixed when the rule is built, so resolution
/// never has to inspect what kind of reference it was given.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(untagged)]
pub enum FieldRef {
    Single(String),
    Path(Vec<String>),
}

impl FieldRef {
    /// Reference a direct property
    pub fn key(key: impl Into<String>) -> Self {
        FieldRef::Single(key.into())
    }

    /// Reference a nested property by its ordered list of keys
    pub fn path<I, S>(keys: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        FieldRef::Path(keys.into_iter().map(Into::into).collect())
    }

    /// Keys walked during resolution, in order
    pub fn segments(&self) -> &[String] {
        match self {
            FieldRef::Single(key) => std::slice::from_ref(key),
            FieldRef::Path(keys) => keys,
        }
    }

    /// Resolve this reference against `object`
    pub fn resolve<'a>(&self, object: &'a Value) -> Option<&'a Value> {
        resolve(object, self)
    }
}

impl fmt::Display for FieldRef {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            FieldRef::Single(key) => f.write_str(key),
            FieldRef::Path(keys) => f.write_str(&keys.join(".")),
        }
    }
}

impl From<&str> for FieldRef {
    fn from(key: &str) -> Self {
        FieldRef::Single(key.to_string())
    }
}

impl From<String> for FieldRef {
    fn from(key: String) -> Self {
        FieldRef::Single(key)
    }
}

impl From<Vec<String>> for FieldRef {
    fn from(keys: Vec<String>) -> Self {
        FieldRef::Path(keys)
    }
}

impl From<Vec<&str>> for FieldRef {
    fn from(keys: Vec<&str>) -> Self {
        FieldRef::path(keys)
    }
}

impl<const N: usize> From<[&str; N]> for FieldRef {
    fn from(keys: [&str; N]) -> Self {
        FieldRef::path(keys)
    }
}

/// Resolve `field` inside `object`.
///
/// Returns `None` as soon as an intermediate step is missing, `null`, or not
/// a container. Numeric segments index into arrays.
pub fn resolve<'a>(object: &'a Value, field: &FieldRef) -> Option<&'a Value> {
    let resolved = match field {
        FieldRef::Single(key) => step(object, key),
        FieldRef::Path(keys) if keys.is_empty() => None,
        FieldRef::Path(keys) => keys
            .iter()
            .try_fold(object, |current, key| step(current, key)),
    };

    tracing::trace!(field = %field, found = resolved.is_some(), "resolved field");
    resolved
}

fn step<'a>(current: &'a Value, key: &str) -> Option<&'a Value> {
    match current {
        Value::Object(map) => map.get(key),
        Value::Array(items) => key.parse::<usize>().ok().and_then(|index| items.get(index)),
        _ => None,
    }
}
