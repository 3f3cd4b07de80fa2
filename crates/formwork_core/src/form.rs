//! Form state as seen by field components.
//!
//! The canonical state belongs to the host's form library. Components only
//! read values and errors through [`FormState`] and write back through
//! [`FormState::set_field_value`].

use serde::{Deserialize, Serialize};
use serde_json::Value;
use tracing::debug;

use crate::error::CoreResult;
use crate::node::ErrorNode;
use crate::path::{get_in, set_in};

/// Read/write access to an externally owned form.
pub trait FormState {
    fn values(&self) -> &Value;

    fn initial_values(&self) -> &Value;

    fn errors(&self) -> &Value;

    fn initial_errors(&self) -> &Value;

    /// Errors reported out of band (e.g. by a failed submission).
    fn status(&self) -> Option<&Value> {
        None
    }

    fn set_field_value(&mut self, path: &str, value: Value) -> CoreResult<()>;

    /// Error to display for `path`.
    ///
    /// An explicit error wins, then the live error. An initial error is only
    /// shown while the field still holds its initial value; `default` stands
    /// in for a missing value on either side of that comparison.
    fn field_error(
        &self,
        path: &str,
        explicit: Option<&ErrorNode>,
        default: &Value,
    ) -> Option<ErrorNode> {
        if let Some(error) = explicit.filter(|e| !e.is_empty()) {
            return Some(error.clone());
        }
        if let Some(error) = error_at(self.errors(), path) {
            return Some(error);
        }
        let value = get_in(self.values(), path).unwrap_or(default);
        let initial = get_in(self.initial_values(), path).unwrap_or(default);
        if value == initial {
            return error_at(self.initial_errors(), path);
        }
        None
    }
}

fn error_at(tree: &Value, path: &str) -> Option<ErrorNode> {
    get_in(tree, path)
        .cloned()
        .and_then(ErrorNode::from_json)
        .filter(|node| !node.is_empty())
}

/// Plain JSON-backed form state.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct FormSnapshot {
    #[serde(default = "empty_object")]
    pub values: Value,
    #[serde(default = "empty_object")]
    pub initial_values: Value,
    #[serde(default = "empty_object")]
    pub errors: Value,
    #[serde(default = "empty_object")]
    pub initial_errors: Value,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub status: Option<Value>,
}

fn empty_object() -> Value {
    Value::Object(serde_json::Map::new())
}

impl Default for FormSnapshot {
    fn default() -> Self {
        Self::new(empty_object())
    }
}

impl FormSnapshot {
    /// A pristine form whose current values equal `initial_values`.
    pub fn new(initial_values: Value) -> Self {
        Self {
            values: initial_values.clone(),
            initial_values,
            errors: empty_object(),
            initial_errors: empty_object(),
            status: None,
        }
    }

    pub fn with_errors(mut self, errors: Value) -> Self {
        self.errors = errors;
        self
    }

    pub fn with_initial_errors(mut self, errors: Value) -> Self {
        self.initial_errors = errors;
        self
    }

    pub fn with_status(mut self, status: Value) -> Self {
        self.status = Some(status);
        self
    }
}

impl FormState for FormSnapshot {
    fn values(&self) -> &Value {
        &self.values
    }

    fn initial_values(&self) -> &Value {
        &self.initial_values
    }

    fn errors(&self) -> &Value {
        &self.errors
    }

    fn initial_errors(&self) -> &Value {
        &self.initial_errors
    }

    fn status(&self) -> Option<&Value> {
        self.status.as_ref().filter(|s| !s.is_null())
    }

    fn set_field_value(&mut self, path: &str, value: Value) -> CoreResult<()> {
        debug!(path, "set field value");
        set_in(&mut self.values, path, value)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_explicit_error_wins() {
        let form = FormSnapshot::new(json!({"title": ""}))
            .with_errors(json!({"title": "Live error"}));
        let explicit = ErrorNode::message("Explicit");
        assert_eq!(
            form.field_error("title", Some(&explicit), &json!("")),
            Some(explicit)
        );
        assert_eq!(
            form.field_error("title", None, &json!("")),
            Some(ErrorNode::message("Live error"))
        );
    }

    #[test]
    fn test_initial_error_hidden_after_edit() {
        let mut form = FormSnapshot::new(json!({"title": "Draft"}))
            .with_initial_errors(json!({"title": "Title too short"}));

        assert_eq!(
            form.field_error("title", None, &json!("")),
            Some(ErrorNode::message("Title too short"))
        );

        form.set_field_value("title", json!("A much better title")).unwrap();
        assert_eq!(form.field_error("title", None, &json!("")), None);
    }

    #[test]
    fn test_missing_values_use_default() {
        let form = FormSnapshot::default()
            .with_initial_errors(json!({"subjects": "Pick at least one"}));
        assert!(form.field_error("subjects", None, &json!([])).is_some());
    }

    #[test]
    fn test_snapshot_deserializes_camel_case() {
        let form: FormSnapshot = serde_json::from_value(json!({
            "values": {"a": 1},
            "initialErrors": {"a": "bad"}
        }))
        .unwrap();
        assert_eq!(form.initial_errors, json!({"a": "bad"}));
        assert_eq!(form.initial_values, json!({}));
        assert!(form.status().is_none());
    }
}
