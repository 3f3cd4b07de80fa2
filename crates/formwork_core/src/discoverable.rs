//! "Add field" modal for optional custom fields.
//!
//! Users pick fields from a catalogue; picked fields are batched and handed
//! to the host when the modal closes.

use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};
use tracing::debug;

/// Catalogue entry describing how to render a custom field.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct FieldDefinition {
    pub label: String,
    pub ui_widget: String,
    #[serde(default, flatten)]
    pub props: Map<String, Value>,
}

/// A field added through the modal.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct AddedField {
    /// Full form path, `{field_path}.{field}`.
    pub key: String,
    pub field: String,
    pub definition: FieldDefinition,
}

#[derive(Debug, Clone, Default)]
pub struct DiscoverableFields {
    field_path: String,
    open: bool,
    selected: Option<(String, FieldDefinition)>,
    pending: Vec<AddedField>,
    existing: Vec<String>,
}

impl DiscoverableFields {
    /// `existing` holds full paths of fields already on the form.
    pub fn new(field_path: impl Into<String>, existing: Vec<String>) -> Self {
        Self {
            field_path: field_path.into(),
            existing,
            ..Default::default()
        }
    }

    pub fn open(&mut self) {
        self.open = true;
    }

    pub fn is_open(&self) -> bool {
        self.open
    }

    pub fn selected(&self) -> Option<&str> {
        self.selected.as_ref().map(|(name, _)| name.as_str())
    }

    pub fn existing(&self) -> &[String] {
        &self.existing
    }

    fn key_for(&self, field: &str) -> String {
        format!("{}.{}", self.field_path, field)
    }

    /// Whether `field` can still be added.
    pub fn is_available(&self, field: &str) -> bool {
        !self.existing.contains(&self.key_for(field))
    }

    /// Highlight a catalogue entry; replaces any previous selection.
    pub fn select(&mut self, field: impl Into<String>, definition: FieldDefinition) {
        self.selected = Some((field.into(), definition));
    }

    /// Add the highlighted field.
    ///
    /// With `close`, the modal closes and the whole batch added since the
    /// last close is returned.
    pub fn add_selected(&mut self, close: bool) -> Option<Vec<AddedField>> {
        if let Some((field, definition)) = self.selected.take() {
            let key = self.key_for(&field);
            debug!(key = %key, "custom field added");
            self.existing.push(key.clone());
            self.pending.push(AddedField {
                key,
                field,
                definition,
            });
        }
        close.then(|| self.flush())
    }

    /// Close without adding the highlighted field; fields added so far are
    /// still handed over.
    pub fn cancel(&mut self) -> Vec<AddedField> {
        self.selected = None;
        self.flush()
    }

    /// A field was removed from the form and becomes available again.
    pub fn remove(&mut self, key: &str) -> bool {
        let before = self.existing.len();
        self.existing.retain(|existing| existing != key);
        before != self.existing.len()
    }

    fn flush(&mut self) -> Vec<AddedField> {
        self.open = false;
        std::mem::take(&mut self.pending)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    fn definition(label: &str) -> FieldDefinition {
        serde_json::from_value(json!({
            "label": label,
            "ui_widget": "Input",
            "placeholder": "Type here"
        }))
        .unwrap()
    }

    #[test]
    fn test_add_batch_and_close() {
        let mut modal = DiscoverableFields::new("custom_fields", vec![]);
        modal.open();

        modal.select("cern:experiment", definition("Experiment"));
        assert_eq!(modal.add_selected(false), None);
        assert!(modal.is_open());

        modal.select("cern:beam", definition("Beam"));
        let batch = modal.add_selected(true).unwrap();
        assert!(!modal.is_open());
        assert_eq!(batch.len(), 2);
        assert_eq!(batch[0].key, "custom_fields.cern:experiment");
        assert_eq!(batch[1].definition.props["placeholder"], json!("Type here"));
        assert!(!modal.is_available("cern:beam"));
    }

    #[test]
    fn test_cancel_hands_over_added_fields() {
        let mut modal = DiscoverableFields::new("custom_fields", vec![]);
        modal.open();
        modal.select("a", definition("A"));
        modal.add_selected(false);
        modal.select("b", definition("B"));

        let batch = modal.cancel();
        assert_eq!(batch.len(), 1);
        assert!(modal.selected().is_none());
        assert!(modal.is_available("b"));
    }

    #[test]
    fn test_remove_makes_field_available() {
        let mut modal =
            DiscoverableFields::new("custom_fields", vec!["custom_fields.a".to_string()]);
        assert!(!modal.is_available("a"));
        assert!(modal.remove("custom_fields.a"));
        assert!(modal.is_available("a"));
        assert!(!modal.remove("custom_fields.a"));
    }
}
