//! Collapsible form sections that flag errors in the fields they contain.

use serde::{Deserialize, Serialize};
use serde_json::Value;

use crate::classify::{classify, path_is_under, Classified};
use crate::form::FormState;
use crate::node::ErrorNode;
use crate::path::get_in;

/// CSS classes added to a section that contains errors.
pub const ERROR_CLASS: &str = "error secondary";

/// A form section tracking a set of `group.field` paths.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct AccordionField {
    pub label: String,
    /// Paths this section is responsible for, e.g. `metadata.title`.
    pub includes_paths: Vec<String>,
    /// Whether the section starts expanded.
    pub active: bool,
}

impl AccordionField {
    pub fn new(label: impl Into<String>) -> Self {
        Self {
            label: label.into(),
            includes_paths: Vec::new(),
            active: true,
        }
    }

    pub fn include(mut self, path: impl Into<String>) -> Self {
        self.includes_paths.push(path.into());
        self
    }

    pub fn active(mut self, active: bool) -> Self {
        self.active = active;
        self
    }

    /// Whether the section should be highlighted.
    ///
    /// A submission status, when present, is the only source consulted.
    /// Otherwise live errors count, as do initial errors on fields that
    /// still hold their initial value.
    pub fn has_error<F: FormState + ?Sized>(&self, form: &F) -> bool {
        if let Some(status) = form.status() {
            return self.flags(status, None);
        }
        self.flags(form.errors(), None)
            || self.flags(
                form.initial_errors(),
                Some((form.initial_values(), form.values())),
            )
    }

    pub fn error_class<F: FormState + ?Sized>(&self, form: &F) -> &'static str {
        if self.has_error(form) {
            ERROR_CLASS
        } else {
            ""
        }
    }

    /// Live errors of this section, flattened.
    pub fn section_errors<F: FormState + ?Sized>(&self, form: &F) -> Classified {
        let mut classified = classify(&ErrorNode::from(form.errors().clone()));
        let tracked = |path: &String| {
            self.includes_paths
                .iter()
                .any(|prefix| path_is_under(path, prefix))
        };
        classified.flattened.retain(|path, _| tracked(path));
        classified.severity_checks.retain(|path, _| tracked(path));
        classified
    }

    // Only the first two levels are inspected: `group.field`.
    fn flags(&self, errors: &Value, values: Option<(&Value, &Value)>) -> bool {
        let unset = Value::String(String::new());
        for (group, fields) in entries(errors) {
            for (field, _) in entries(fields) {
                let path = format!("{}.{}", group, field);
                if !self.includes_paths.iter().any(|p| p == &path) {
                    continue;
                }
                let unchanged = match values {
                    None => true,
                    Some((initial, current)) => {
                        get_in(initial, &path).unwrap_or(&unset)
                            == get_in(current, &path).unwrap_or(&unset)
                    }
                };
                if unchanged {
                    return true;
                }
            }
        }
        false
    }
}

fn entries(value: &Value) -> Vec<(String, &Value)> {
    match value {
        Value::Object(map) => map.iter().map(|(k, v)| (k.clone(), v)).collect(),
        Value::Array(items) => items
            .iter()
            .enumerate()
            .map(|(i, v)| (i.to_string(), v))
            .collect(),
        _ => Vec::new(),
    }
}

/// Which panel of an accordion is expanded.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct AccordionState {
    active_index: Option<usize>,
}

impl AccordionState {
    pub fn new(active: bool) -> Self {
        Self {
            active_index: active.then_some(0),
        }
    }

    pub fn is_active(&self, index: usize) -> bool {
        self.active_index == Some(index)
    }

    /// Title clicked: expand it, or collapse it when already expanded.
    pub fn toggle(&mut self, index: usize) {
        self.active_index = if self.is_active(index) { None } else { Some(index) };
    }

    /// Keyboard activation of a title. Returns whether the key was handled.
    pub fn handle_key(&mut self, key: &str, index: usize) -> bool {
        match key {
            "Enter" | " " => {
                self.toggle(index);
                true
            }
            _ => false,
        }
    }
}
