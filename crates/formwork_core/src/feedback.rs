//! Inline feedback label shown next to a field.

use serde::Serialize;

use crate::classify::classify;
use crate::node::ErrorNode;

/// What a feedback label displays for one field.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Feedback {
    /// Visible text: the first hard error, or the advisory message.
    pub text: String,
    /// Severity level of the first advisory, used as CSS class.
    pub severity: Option<String>,
    /// Advisory message, shown in a popup next to the label.
    pub severity_message: Option<String>,
    /// Render as a red prompt label (hard error without advisory).
    pub prompt: bool,
}

impl Feedback {
    /// Build the label for a field's error tree. Empty trees show nothing.
    pub fn from_error(error: &ErrorNode) -> Option<Self> {
        if error.is_empty() {
            return None;
        }

        let classified = classify(error);
        let error_text = classified
            .first_error()
            .map(|(_, message)| message.to_string())
            .unwrap_or_default();
        let (severity, severity_message) = match classified.first_severity() {
            Some((_, check)) => (Some(check.severity.clone()), Some(check.message.clone())),
            None => (None, None),
        };

        let prompt = severity.is_none() && !error_text.is_empty();
        let text = if error_text.is_empty() {
            severity_message.clone().unwrap_or_default()
        } else {
            error_text
        };

        Some(Self {
            text,
            severity,
            severity_message,
            prompt,
        })
    }

    /// CSS class of the label.
    pub fn class_name(&self) -> &str {
        self.severity.as_deref().unwrap_or("")
    }
}
