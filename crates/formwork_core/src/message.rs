//! Block error message listing several field errors at once.

use indexmap::IndexMap;
use serde::{Deserialize, Serialize};

use crate::classify::{Classified, ROOT_ERROR_KEY};

/// Field name used by the backend for errors not tied to a field.
pub const SCHEMA_FIELD: &str = "_schema";

/// All messages reported for one field.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct FieldErrors {
    pub field: String,
    pub messages: Vec<String>,
}

/// One rendered line of the message list.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum MessageItem {
    /// A single message, shown inline after the optional field label.
    Inline { label: Option<String>, message: String },
    /// Several messages, shown as a nested list under the optional label.
    Nested { label: Option<String>, messages: Vec<String> },
}

/// Error message box: header, free content, and a list of field errors.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct ErrorMessage {
    pub header: Option<String>,
    pub content: Option<String>,
    pub icon: Option<String>,
    #[serde(default)]
    pub errors: Vec<FieldErrors>,
}

impl ErrorMessage {
    /// Simple message, e.g. an HTTP error response.
    pub fn simple(header: impl Into<String>, content: impl Into<String>) -> Self {
        Self {
            header: Some(header.into()),
            content: Some(content.into()),
            ..Default::default()
        }
    }

    /// One entry per flattened path, messages grouped by path.
    ///
    /// A root-level message is reported under [`SCHEMA_FIELD`].
    pub fn from_classified(header: impl Into<String>, classified: &Classified) -> Self {
        let mut grouped: IndexMap<String, Vec<String>> = IndexMap::new();
        for (path, message) in &classified.flattened {
            let field = if path == ROOT_ERROR_KEY {
                SCHEMA_FIELD.to_string()
            } else {
                path.clone()
            };
            grouped.entry(field).or_default().push(message.clone());
        }
        Self {
            header: Some(header.into()),
            errors: grouped
                .into_iter()
                .map(|(field, messages)| FieldErrors { field, messages })
                .collect(),
            ..Default::default()
        }
    }

    pub fn icon(mut self, icon: impl Into<String>) -> Self {
        self.icon = Some(icon.into());
        self
    }

    pub fn items(&self) -> Vec<MessageItem> {
        self.errors
            .iter()
            .filter(|e| !e.messages.is_empty())
            .map(|error| {
                let label = (error.field != SCHEMA_FIELD).then(|| error.field.clone());
                match error.messages.as_slice() {
                    [message] => MessageItem::Inline {
                        label,
                        message: message.clone(),
                    },
                    messages => MessageItem::Nested {
                        label,
                        messages: messages.to_vec(),
                    },
                }
            })
            .collect()
    }
}
