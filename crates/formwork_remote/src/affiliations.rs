//! Person and organization suggestions.
//!
//! Turns creator/affiliation search hits into suggestions with a display
//! header: name and acronym, identifier links and a short subheader.

use serde::{Deserialize, Serialize};
use serde_json::Value;

use crate::suggestion::{scalar_to_string, Suggestion, SuggestionSerializer};

pub const MANUAL_ENTRY: &str = "Manual entry";
pub const MANUAL_ENTRY_KEY: &str = "manual-entry";

/// A scheme/identifier pair attached to a record.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Identifier {
    pub scheme: String,
    pub identifier: String,
}

/// How one identifier is displayed.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(untagged)]
pub enum IdentifierEntry {
    Link {
        href: String,
        icon: String,
        /// Visible text next to the icon; only ORCID shows the identifier.
        label: Option<String>,
    },
    Text(String),
}

impl IdentifierEntry {
    /// `None` for schemes that are never shown (ROR, ISNI, GRID).
    pub fn from_identifier(id: &Identifier) -> Option<Self> {
        match id.scheme.as_str() {
            "orcid" => Some(Self::Link {
                href: format!("https://orcid.org/{}", id.identifier),
                icon: "/static/images/orcid.svg".to_string(),
                label: Some(id.identifier.clone()),
            }),
            "gnd" => Some(Self::Link {
                href: format!("https://d-nb.info/gnd/{}", id.identifier),
                icon: "/static/images/gnd-icon.svg".to_string(),
                label: None,
            }),
            "ror" | "isni" | "grid" => None,
            other => Some(Self::Text(format!("{}: {}", other, id.identifier))),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum AffiliationContent {
    Record {
        header: String,
        identifiers: Vec<IdentifierEntry>,
        subheader: String,
    },
    ManualEntry,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct AffiliationSuggestion {
    #[serde(flatten)]
    pub suggestion: Suggestion,
    pub id: Option<String>,
    pub content: AffiliationContent,
}

impl AffiliationSuggestion {
    /// Plain suggestion carrying the raw record, id and rendered content in
    /// `extra` as `{"record", "id", "content"}`.
    pub fn into_suggestion(self) -> Suggestion {
        let mut extra = serde_json::Map::new();
        extra.insert(
            "record".to_string(),
            self.suggestion.extra.clone().unwrap_or(Value::Null),
        );
        extra.insert("id".to_string(), self.id.map_or(Value::Null, Value::String));
        extra.insert(
            "content".to_string(),
            serde_json::to_value(&self.content).unwrap_or(Value::Null),
        );
        self.suggestion.with_extra(Value::Object(extra))
    }
}

/// Serializer for person or organization search hits.
#[derive(Debug, Clone, Copy, Default)]
pub struct AffiliationsSuggestions {
    pub is_organization: bool,
    pub show_manual_entry: bool,
}

impl AffiliationsSuggestions {
    pub fn people() -> Self {
        Self::default()
    }

    pub fn organizations() -> Self {
        Self {
            is_organization: true,
            ..Self::default()
        }
    }

    pub fn with_manual_entry(mut self) -> Self {
        self.show_manual_entry = true;
        self
    }

    pub fn render(&self, hits: &[Value]) -> Vec<AffiliationSuggestion> {
        let mut results: Vec<AffiliationSuggestion> = hits.iter().map(|hit| self.render_one(hit)).collect();
        if self.show_manual_entry {
            results.push(AffiliationSuggestion {
                suggestion: Suggestion::new(MANUAL_ENTRY, MANUAL_ENTRY, MANUAL_ENTRY_KEY)
                    .with_extra(Value::String(MANUAL_ENTRY.to_string())),
                id: None,
                content: AffiliationContent::ManualEntry,
            });
        }
        results
    }

    fn render_one(&self, hit: &Value) -> AffiliationSuggestion {
        let name = str_field(hit, "name").unwrap_or_default();
        let header = match str_field(hit, "acronym").filter(|a| !a.is_empty()) {
            Some(acronym) => format!("{name} ({acronym})"),
            None => name.clone(),
        };
        let identifiers = hit
            .get("identifiers")
            .and_then(Value::as_array)
            .map(|ids| {
                ids.iter()
                    .filter_map(|id| serde_json::from_value::<Identifier>(id.clone()).ok())
                    .filter_map(|id| IdentifierEntry::from_identifier(&id))
                    .collect()
            })
            .unwrap_or_default();

        AffiliationSuggestion {
            suggestion: Suggestion::new(name.clone(), name.clone(), name).with_extra(hit.clone()),
            id: hit.get("id").and_then(scalar_to_string),
            content: AffiliationContent::Record {
                header,
                identifiers,
                subheader: self.subheader(hit),
            },
        }
    }

    fn subheader(&self, hit: &Value) -> String {
        if !self.is_organization {
            return hit
                .get("affiliations")
                .and_then(Value::as_array)
                .map(|affiliations| {
                    affiliations
                        .iter()
                        .filter_map(|a| str_field(a, "name"))
                        .collect::<Vec<_>>()
                        .join(", ")
                })
                .unwrap_or_default();
        }

        let location = ["location_name", "country_name"]
            .iter()
            .filter_map(|key| str_field(hit, key))
            .filter(|part| !part.is_empty())
            .collect::<Vec<_>>()
            .join(", ");
        let types = hit
            .get("types")
            .and_then(Value::as_array)
            .map(|types| {
                types
                    .iter()
                    .filter_map(Value::as_str)
                    .map(capitalize)
                    .collect::<Vec<_>>()
                    .join(", ")
            })
            .unwrap_or_default();

        let separator = if !location.is_empty() && !types.is_empty() {
            " — "
        } else {
            ""
        };
        format!("{location}{separator}{types}").trim().to_string()
    }
}

impl SuggestionSerializer for AffiliationsSuggestions {
    fn serialize(&self, hits: &[Value]) -> Vec<Suggestion> {
        self.render(hits)
            .into_iter()
            .map(AffiliationSuggestion::into_suggestion)
            .collect()
    }
}

fn str_field(value: &Value, key: &str) -> Option<String> {
    value.get(key).and_then(Value::as_str).map(str::to_string)
}

fn capitalize(word: &str) -> String {
    let mut chars = word.chars();
    match chars.next() {
        Some(first) => first.to_uppercase().chain(chars).collect(),
        None => String::new(),
    }
}
