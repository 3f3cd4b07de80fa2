//! Dropdown select field.

use serde::{Deserialize, Serialize};
use serde_json::Value;

use crate::error::CoreResult;
use crate::feedback::Feedback;
use crate::form::FormState;
use crate::node::ErrorNode;
use crate::path::get_in;

/// One entry of a dropdown.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SelectOption {
    pub key: String,
    pub text: String,
    pub value: String,
}

impl SelectOption {
    pub fn new(key: impl Into<String>, text: impl Into<String>, value: impl Into<String>) -> Self {
        Self {
            key: key.into(),
            text: text.into(),
            value: value.into(),
        }
    }

    /// Option whose key and label are the value itself.
    pub fn from_value(value: impl Into<String>) -> Self {
        let value = value.into();
        Self::new(value.clone(), value.clone(), value)
    }
}

/// Options de-duplicated by value, in first-seen order.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct SelectOptions {
    options: Vec<SelectOption>,
}

impl SelectOptions {
    pub fn new(options: impl IntoIterator<Item = SelectOption>) -> Self {
        let mut merged = Self::default();
        merged.merge(options);
        merged
    }

    pub fn contains(&self, value: &str) -> bool {
        self.options.iter().any(|o| o.value == value)
    }

    /// Add options whose value is not listed yet. Returns how many were added.
    pub fn merge(&mut self, incoming: impl IntoIterator<Item = SelectOption>) -> usize {
        let before = self.options.len();
        for option in incoming {
            if !self.contains(&option.value) {
                self.options.push(option);
            }
        }
        self.options.len() - before
    }

    pub fn as_slice(&self) -> &[SelectOption] {
        &self.options
    }

    pub fn len(&self) -> usize {
        self.options.len()
    }

    pub fn is_empty(&self) -> bool {
        self.options.is_empty()
    }
}

/// A select field bound to a form path.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SelectField {
    pub field_path: String,
    pub options: SelectOptions,
    #[serde(default)]
    pub multiple: bool,
    #[serde(default)]
    pub allow_additions: bool,
    #[serde(default)]
    pub default_value: Option<Value>,
}

impl SelectField {
    pub fn new(field_path: impl Into<String>, options: impl IntoIterator<Item = SelectOption>) -> Self {
        Self {
            field_path: field_path.into(),
            options: SelectOptions::new(options),
            multiple: false,
            allow_additions: false,
            default_value: None,
        }
    }

    pub fn multiple(mut self, multiple: bool) -> Self {
        self.multiple = multiple;
        self
    }

    pub fn allow_additions(mut self, allow: bool) -> Self {
        self.allow_additions = allow;
        self
    }

    pub fn default_value(mut self, value: Value) -> Self {
        self.default_value = Some(value);
        self
    }

    fn empty_value(&self) -> Value {
        if self.multiple {
            Value::Array(Vec::new())
        } else {
            Value::String(String::new())
        }
    }

    /// Current value; a multi-select always yields an array.
    pub fn value<F: FormState + ?Sized>(&self, form: &F) -> Value {
        let value = get_in(form.values(), &self.field_path)
            .cloned()
            .or_else(|| self.default_value.clone().filter(|v| !is_blank(v)))
            .unwrap_or_else(|| self.empty_value());
        if self.multiple && is_blank(&value) {
            return Value::Array(Vec::new());
        }
        value
    }

    /// Options to render: the configured ones plus any selected value
    /// missing from them.
    pub fn dropdown_options<F: FormState + ?Sized>(&self, form: &F) -> Vec<SelectOption> {
        let mut options = self.options.clone();
        let value = self.value(form);
        let selected: Vec<&Value> = match &value {
            Value::Array(items) => items.iter().collect(),
            single => vec![single],
        };
        options.merge(
            selected
                .into_iter()
                .filter_map(option_value)
                .map(SelectOption::from_value),
        );
        options.options
    }

    /// Error to show under the field, if any.
    pub fn feedback<F: FormState + ?Sized>(
        &self,
        form: &F,
        explicit: Option<&ErrorNode>,
    ) -> Option<Feedback> {
        form.field_error(&self.field_path, explicit, &self.empty_value())
            .and_then(|error| Feedback::from_error(&error))
    }

    /// Selection changed.
    pub fn on_change<F: FormState + ?Sized>(&self, form: &mut F, value: Value) -> CoreResult<()> {
        form.set_field_value(&self.field_path, value)
    }

    /// A free-text option was created: list it and select it.
    pub fn add_item<F: FormState + ?Sized>(&mut self, form: &mut F, new_value: &str) -> CoreResult<()> {
        self.options.merge([SelectOption::from_value(new_value)]);

        let new_value = Value::String(new_value.to_string());
        let value = if self.multiple {
            let mut current = match self.value(form) {
                Value::Array(items) => items,
                other if is_blank(&other) => Vec::new(),
                other => vec![other],
            };
            current.push(new_value);
            Value::Array(current)
        } else {
            new_value
        };
        form.set_field_value(&self.field_path, value)
    }
}

fn is_blank(value: &Value) -> bool {
    match value {
        Value::Null => true,
        Value::String(s) => s.is_empty(),
        _ => false,
    }
}

fn option_value(value: &Value) -> Option<String> {
    match value {
        Value::String(s) if !s.is_empty() => Some(s.clone()),
        Value::Number(n) => Some(n.to_string()),
        Value::Bool(b) => Some(b.to_string()),
        _ => None,
    }
}
