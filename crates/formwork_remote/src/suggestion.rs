//! Suggestion records and their serializers.

use std::fmt;
use std::sync::Arc;

use indexmap::IndexMap;
use serde::{Deserialize, Serialize};
use serde_json::Value;
use tracing::debug;

/// A selectable entry derived from a remote search hit.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Suggestion {
    pub text: String,
    /// Identity of the suggestion; used for de-duplication and selection.
    pub value: String,
    pub key: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub extra: Option<Value>,
}

impl Suggestion {
    pub fn new(text: impl Into<String>, value: impl Into<String>, key: impl Into<String>) -> Self {
        Self {
            text: text.into(),
            value: value.into(),
            key: key.into(),
            extra: None,
        }
    }

    /// Suggestion whose text, value and key are all `text`.
    pub fn from_text(text: impl Into<String>) -> Self {
        let text = text.into();
        Self::new(text.clone(), text.clone(), text)
    }

    pub fn with_extra(mut self, extra: Value) -> Self {
        self.extra = Some(extra);
        self
    }
}

/// Suggestions unique by `value`, in insertion order.
///
/// Inserting a value that is already present keeps the first occurrence.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct SuggestionSet {
    items: IndexMap<String, Suggestion>,
}

impl SuggestionSet {
    pub fn new() -> Self {
        Self::default()
    }

    /// Returns false when the value was already present.
    pub fn insert(&mut self, suggestion: Suggestion) -> bool {
        if self.items.contains_key(&suggestion.value) {
            return false;
        }
        self.items.insert(suggestion.value.clone(), suggestion);
        true
    }

    pub fn extend(&mut self, suggestions: impl IntoIterator<Item = Suggestion>) {
        for suggestion in suggestions {
            self.insert(suggestion);
        }
    }

    /// `self` followed by the values of `other` not present yet.
    pub fn union(&self, other: &SuggestionSet) -> SuggestionSet {
        let mut merged = self.clone();
        merged.extend(other.iter().cloned());
        merged
    }

    pub fn contains(&self, value: &str) -> bool {
        self.items.contains_key(value)
    }

    pub fn get(&self, value: &str) -> Option<&Suggestion> {
        self.items.get(value)
    }

    pub fn iter(&self) -> impl Iterator<Item = &Suggestion> {
        self.items.values()
    }

    pub fn values(&self) -> Vec<&str> {
        self.items.keys().map(String::as_str).collect()
    }

    pub fn len(&self) -> usize {
        self.items.len()
    }

    pub fn is_empty(&self) -> bool {
        self.items.is_empty()
    }

    pub fn to_vec(&self) -> Vec<Suggestion> {
        self.items.values().cloned().collect()
    }
}

impl FromIterator<Suggestion> for SuggestionSet {
    fn from_iter<I: IntoIterator<Item = Suggestion>>(iter: I) -> Self {
        let mut set = Self::new();
        set.extend(iter);
        set
    }
}

impl Serialize for SuggestionSet {
    fn serialize<S: serde::Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.collect_seq(self.items.values())
    }
}

/// Turns raw search hits into suggestions.
pub trait SuggestionSerializer: Send + Sync {
    fn serialize(&self, hits: &[Value]) -> Vec<Suggestion>;
}

impl<F> SuggestionSerializer for F
where
    F: Fn(&[Value]) -> Vec<Suggestion> + Send + Sync,
{
    fn serialize(&self, hits: &[Value]) -> Vec<Suggestion> {
        self(hits)
    }
}

/// Default serializer: `title` as text, `id` as value and key.
#[derive(Debug, Clone, Copy, Default)]
pub struct TitleIdSerializer;

impl SuggestionSerializer for TitleIdSerializer {
    fn serialize(&self, hits: &[Value]) -> Vec<Suggestion> {
        hits.iter()
            .filter_map(|hit| {
                let Some(id) = hit.get("id").and_then(scalar_to_string) else {
                    debug!("skipping suggestion hit without id");
                    return None;
                };
                let text = hit
                    .get("title")
                    .and_then(scalar_to_string)
                    .unwrap_or_else(|| id.clone());
                Some(Suggestion::new(text, id.clone(), id))
            })
            .collect()
    }
}

pub(crate) fn scalar_to_string(value: &Value) -> Option<String> {
    match value {
        Value::String(s) => Some(s.clone()),
        Value::Number(n) => Some(n.to_string()),
        _ => None,
    }
}

/// Builds a suggestion from free text typed by the user.
#[derive(Clone)]
pub struct AddedValueSerializer(Arc<dyn Fn(&str) -> Suggestion + Send + Sync>);

impl AddedValueSerializer {
    pub fn new(f: impl Fn(&str) -> Suggestion + Send + Sync + 'static) -> Self {
        Self(Arc::new(f))
    }

    pub fn serialize(&self, text: &str) -> Suggestion {
        (self.0)(text)
    }
}

impl Default for AddedValueSerializer {
    fn default() -> Self {
        Self::new(|text| Suggestion::from_text(text))
    }
}

impl fmt::Debug for AddedValueSerializer {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str("AddedValueSerializer")
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_set_keeps_first_occurrence() {
        let mut set = SuggestionSet::new();
        assert!(set.insert(Suggestion::new("CERN", "01ggx4157", "01ggx4157")));
        assert!(!set.insert(Suggestion::new("CERN (dup)", "01ggx4157", "x")));
        assert_eq!(set.len(), 1);
        assert_eq!(set.get("01ggx4157").unwrap().text, "CERN");
    }

    #[test]
    fn test_union_order() {
        let selected: SuggestionSet = vec![Suggestion::from_text("b")].into_iter().collect();
        let fetched: SuggestionSet = vec![Suggestion::from_text("a"), Suggestion::from_text("b")]
            .into_iter()
            .collect();
        assert_eq!(selected.union(&fetched).values(), vec!["b", "a"]);
    }

    #[test]
    fn test_title_id_serializer() {
        let hits = vec![
            json!({"id": "cc-by-4.0", "title": "Creative Commons Attribution 4.0"}),
            json!({"id": 42}),
            json!({"title": "no id"}),
        ];
        let suggestions = TitleIdSerializer.serialize(&hits);
        assert_eq!(suggestions.len(), 2);
        assert_eq!(suggestions[0].text, "Creative Commons Attribution 4.0");
        assert_eq!(suggestions[0].value, "cc-by-4.0");
        assert_eq!(suggestions[1].value, "42");
        assert_eq!(suggestions[1].text, "42");
    }

    #[test]
    fn test_closure_serializer() {
        let serializer = |hits: &[Value]| -> Vec<Suggestion> {
            hits.iter()
                .filter_map(|h| h["name"].as_str())
                .map(Suggestion::from_text)
                .collect()
        };
        let suggestions = serializer.serialize(&[json!({"name": "Ada"})]);
        assert_eq!(suggestions, vec![Suggestion::from_text("Ada")]);
    }

    #[test]
    fn test_default_added_value() {
        let suggestion = AddedValueSerializer::default().serialize("New keyword");
        assert_eq!(suggestion, Suggestion::from_text("New keyword"));
    }

    #[test]
    fn test_set_serializes_as_list() {
        let set: SuggestionSet = vec![Suggestion::from_text("a")].into_iter().collect();
        assert_eq!(
            serde_json::to_value(&set).unwrap(),
            json!([{"text": "a", "value": "a", "key": "a"}])
        );
    }
}
