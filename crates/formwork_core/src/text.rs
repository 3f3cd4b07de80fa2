//! Single-line text input bound to a form path.

use serde::{Deserialize, Serialize};
use serde_json::Value;

use crate::error::CoreResult;
use crate::feedback::Feedback;
use crate::form::FormState;
use crate::node::ErrorNode;
use crate::path::get_in;

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct TextField {
    pub field_path: String,
    pub label: String,
    #[serde(default)]
    pub help_text: Option<String>,
    #[serde(default)]
    pub required: bool,
    #[serde(default)]
    pub disabled: bool,
}

impl TextField {
    pub fn new(field_path: impl Into<String>, label: impl Into<String>) -> Self {
        Self {
            field_path: field_path.into(),
            label: label.into(),
            ..Default::default()
        }
    }

    pub fn required(mut self, required: bool) -> Self {
        self.required = required;
        self
    }

    pub fn help_text(mut self, text: impl Into<String>) -> Self {
        self.help_text = Some(text.into());
        self
    }

    pub fn value<F: FormState + ?Sized>(&self, form: &F) -> String {
        match get_in(form.values(), &self.field_path) {
            Some(Value::String(s)) => s.clone(),
            Some(Value::Null) | None => String::new(),
            Some(other) => other.to_string(),
        }
    }

    /// Text inputs only show the live error of their own path.
    pub fn feedback<F: FormState + ?Sized>(&self, form: &F) -> Option<Feedback> {
        get_in(form.errors(), &self.field_path)
            .cloned()
            .and_then(ErrorNode::from_json)
            .and_then(|error| Feedback::from_error(&error))
    }

    pub fn on_change<F: FormState + ?Sized>(&self, form: &mut F, text: &str) -> CoreResult<()> {
        if self.disabled {
            return Ok(());
        }
        form.set_field_value(&self.field_path, Value::String(text.to_string()))
    }
}
