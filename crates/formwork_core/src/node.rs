//! Validation error trees.
//!
//! Form libraries report errors in several shapes: a single string, a
//! severity-tagged object, or arbitrarily nested objects and arrays mirroring
//! the form values. [`ErrorNode`] captures all of them in one sum type.

use indexmap::IndexMap;
use serde::{Deserialize, Deserializer, Serialize};
use serde_json::Value;

/// A non-blocking advisory attached to a field (`info`, `warning`, ...).
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SeverityCheck {
    pub message: String,
    pub severity: String,
}

impl SeverityCheck {
    pub fn new(message: impl Into<String>, severity: impl Into<String>) -> Self {
        Self {
            message: message.into(),
            severity: severity.into(),
        }
    }
}

/// A node of a validation error tree.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(untagged)]
pub enum ErrorNode {
    /// Plain message (legacy single-message format).
    Message(String),
    /// Severity-tagged leaf.
    Severity(SeverityCheck),
    /// Errors of an array field, by index.
    List(Vec<ErrorNode>),
    /// Errors of an object field, by key in insertion order.
    Map(IndexMap<String, ErrorNode>),
}

impl ErrorNode {
    pub fn message(message: impl Into<String>) -> Self {
        Self::Message(message.into())
    }

    pub fn severity(message: impl Into<String>, severity: impl Into<String>) -> Self {
        Self::Severity(SeverityCheck::new(message, severity))
    }

    pub fn list(items: impl IntoIterator<Item = ErrorNode>) -> Self {
        Self::List(items.into_iter().collect())
    }

    pub fn map<K: Into<String>>(entries: impl IntoIterator<Item = (K, ErrorNode)>) -> Self {
        Self::Map(entries.into_iter().map(|(k, v)| (k.into(), v)).collect())
    }

    /// True when the node carries nothing to display.
    pub fn is_empty(&self) -> bool {
        match self {
            Self::Message(message) => message.is_empty(),
            Self::Severity(_) => false,
            Self::List(items) => items.is_empty(),
            Self::Map(entries) => entries.is_empty(),
        }
    }

    /// Convert a JSON value, dropping `null` leaves.
    ///
    /// Returns `None` for `null` itself.
    pub fn from_json(value: Value) -> Option<Self> {
        match value {
            Value::Null => None,
            Value::String(s) => Some(Self::Message(s)),
            Value::Bool(b) => Some(Self::Message(b.to_string())),
            Value::Number(n) => Some(Self::Message(n.to_string())),
            Value::Array(items) => Some(Self::List(
                items.into_iter().filter_map(Self::from_json).collect(),
            )),
            Value::Object(map) => {
                if let Some(check) = severity_leaf(&map) {
                    return Some(Self::Severity(check));
                }
                Some(Self::Map(
                    map.into_iter()
                        .filter_map(|(k, v)| Self::from_json(v).map(|node| (k, node)))
                        .collect(),
                ))
            }
        }
    }
}

impl From<Value> for ErrorNode {
    fn from(value: Value) -> Self {
        Self::from_json(value).unwrap_or_else(|| Self::Map(IndexMap::new()))
    }
}

impl From<&str> for ErrorNode {
    fn from(message: &str) -> Self {
        Self::Message(message.to_string())
    }
}

impl<'de> Deserialize<'de> for ErrorNode {
    fn deserialize<D>(deserializer: D) -> Result<Self, D::Error>
    where
        D: Deserializer<'de>,
    {
        let value = Value::deserialize(deserializer)?;
        Ok(Self::from(value))
    }
}

// Both fields must be present and non-empty; anything else is a plain map.
fn severity_leaf(map: &serde_json::Map<String, Value>) -> Option<SeverityCheck> {
    let message = map.get("message")?.as_str().filter(|s| !s.is_empty())?;
    let severity = map.get("severity")?.as_str().filter(|s| !s.is_empty())?;
    Some(SeverityCheck::new(message, severity))
}
