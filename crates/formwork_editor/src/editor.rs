//! Rich text input bound to a form field.

use serde_json::Value;

use formwork_core::{ErrorNode, Feedback, FormState};

use crate::config::EditorConfig;
use crate::error::EditorResult;

/// A rich text input writing HTML into the form at `field_path`.
#[derive(Debug, Clone)]
pub struct RichInputField {
    pub field_path: String,
    pub label: Option<String>,
    pub required: bool,
    pub disabled: bool,
    pub config: EditorConfig,
}

impl RichInputField {
    pub fn new(field_path: impl Into<String>) -> Self {
        Self {
            field_path: field_path.into(),
            label: None,
            required: false,
            disabled: false,
            config: EditorConfig::default(),
        }
    }

    pub fn label(mut self, label: impl Into<String>) -> Self {
        self.label = Some(label.into());
        self
    }

    pub fn required(mut self, required: bool) -> Self {
        self.required = required;
        self
    }

    pub fn disabled(mut self, disabled: bool) -> Self {
        self.disabled = disabled;
        self
    }

    pub fn config(mut self, config: EditorConfig) -> Self {
        self.config = config;
        self
    }

    pub fn init_options(&self) -> Value {
        self.config.to_init_json(self.disabled)
    }

    /// Current HTML content; missing values read as empty.
    pub fn value<F: FormState + ?Sized>(&self, form: &F) -> String {
        formwork_core::get_in(form.values(), &self.field_path)
            .and_then(Value::as_str)
            .unwrap_or_default()
            .to_string()
    }

    pub fn feedback<F: FormState + ?Sized>(&self, form: &F, explicit: Option<&ErrorNode>) -> Option<Feedback> {
        form.field_error(&self.field_path, explicit, &Value::String(String::new()))
            .and_then(|error| Feedback::from_error(&error))
    }

    /// Editor content changed.
    pub fn on_editor_change<F: FormState + ?Sized>(&self, form: &mut F, content: &str) -> EditorResult<()> {
        if self.disabled {
            return Ok(());
        }
        form.set_field_value(&self.field_path, Value::String(content.to_string()))?;
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use formwork_core::FormSnapshot;
    use serde_json::json;

    #[test]
    fn test_editor_change_updates_form() {
        let field = RichInputField::new("metadata.description");
        let mut form = FormSnapshot::default();
        field.on_editor_change(&mut form, "<p>Hello</p>").unwrap();
        assert_eq!(field.value(&form), "<p>Hello</p>");
    }

    #[test]
    fn test_disabled_field_ignores_changes() {
        let field = RichInputField::new("metadata.description").disabled(true);
        let mut form = FormSnapshot::new(json!({"metadata": {"description": "<p>Old</p>"}}));
        field.on_editor_change(&mut form, "<p>New</p>").unwrap();
        assert_eq!(field.value(&form), "<p>Old</p>");
        assert!(field.init_options()["content_style"]
            .as_str()
            .unwrap()
            .contains("opacity"));
    }

    #[test]
    fn test_initial_error_hidden_after_edit() {
        let field = RichInputField::new("metadata.description");
        let mut form = FormSnapshot::new(json!({"metadata": {"description": ""}}))
            .with_initial_errors(json!({"metadata": {"description": "Description is required."}}));
        assert_eq!(
            field.feedback(&form, None).unwrap().text,
            "Description is required."
        );

        field.on_editor_change(&mut form, "<p>Now described</p>").unwrap();
        assert!(field.feedback(&form, None).is_none());
    }
}
