//! Flattening and categorization of error trees.

use indexmap::IndexMap;
use serde::Serialize;

use crate::node::{ErrorNode, SeverityCheck};

/// Key used for a message that sits at the root of the tree.
pub const ROOT_ERROR_KEY: &str = "error";

/// Path → message for hard validation errors.
pub type FlattenedErrors = IndexMap<String, String>;

/// Path → advisory for severity-tagged leaves.
pub type SeverityChecks = IndexMap<String, SeverityCheck>;

/// Result of classifying an error tree.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct Classified {
    pub flattened: FlattenedErrors,
    pub severity_checks: SeverityChecks,
}

impl Classified {
    pub fn is_empty(&self) -> bool {
        self.flattened.is_empty() && self.severity_checks.is_empty()
    }

    /// Number of errors that block submission. Advisories never count.
    pub fn blocking_count(&self) -> usize {
        self.flattened.len()
    }

    /// First hard error in tree order.
    pub fn first_error(&self) -> Option<(&str, &str)> {
        self.flattened
            .first()
            .map(|(path, message)| (path.as_str(), message.as_str()))
    }

    /// First advisory in tree order.
    pub fn first_severity(&self) -> Option<(&str, &SeverityCheck)> {
        self.severity_checks
            .first()
            .map(|(path, check)| (path.as_str(), check))
    }

    /// Whether any hard error lives at or below one of `prefixes`.
    ///
    /// `metadata.creators` matches `metadata.creators[0].name` but not
    /// `metadata.creatorsExtra`.
    pub fn has_errors_under<S: AsRef<str>>(&self, prefixes: &[S]) -> bool {
        self.flattened.keys().any(|path| {
            prefixes
                .iter()
                .any(|prefix| path_is_under(path, prefix.as_ref()))
        })
    }

    /// Entries at or below one of `prefixes`, in both maps.
    pub fn retain_under<S: AsRef<str>>(self, prefixes: &[S]) -> Classified {
        let keep = |path: &String| prefixes.iter().any(|p| path_is_under(path, p.as_ref()));
        Classified {
            flattened: self.flattened.into_iter().filter(|(path, _)| keep(path)).collect(),
            severity_checks: self
                .severity_checks
                .into_iter()
                .filter(|(path, _)| keep(path))
                .collect(),
        }
    }

    /// Union with `other`; on key collision the entry from `other` wins.
    pub fn merge(&mut self, other: Classified) {
        self.flattened.extend(other.flattened);
        self.severity_checks.extend(other.severity_checks);
    }
}

/// Classify `node` from the root.
pub fn classify(node: &ErrorNode) -> Classified {
    classify_at(node, "")
}

/// Classify `node`, prefixing every produced path with `prefix`.
pub fn classify_at(node: &ErrorNode, prefix: &str) -> Classified {
    let mut out = Classified::default();
    match node {
        ErrorNode::Message(message) => {
            out.flattened.insert(root_key(prefix), message.clone());
        }
        ErrorNode::Severity(check) => {
            out.severity_checks.insert(root_key(prefix), check.clone());
        }
        ErrorNode::List(items) => {
            for (index, item) in items.iter().enumerate() {
                collect(&mut out, item, format!("{}[{}]", prefix, index));
            }
        }
        ErrorNode::Map(entries) => {
            for (key, value) in entries {
                let path = if prefix.is_empty() {
                    key.clone()
                } else {
                    format!("{}.{}", prefix, key)
                };
                collect(&mut out, value, path);
            }
        }
    }
    out
}

fn collect(out: &mut Classified, node: &ErrorNode, path: String) {
    match node {
        // Leaves are recorded as-is; a string is never walked character-wise.
        ErrorNode::Message(message) => {
            out.flattened.insert(path, message.clone());
        }
        ErrorNode::Severity(check) => {
            out.severity_checks.insert(path, check.clone());
        }
        ErrorNode::List(_) | ErrorNode::Map(_) => out.merge(classify_at(node, &path)),
    }
}

fn root_key(prefix: &str) -> String {
    if prefix.is_empty() {
        ROOT_ERROR_KEY.to_string()
    } else {
        prefix.to_string()
    }
}

pub(crate) fn path_is_under(path: &str, prefix: &str) -> bool {
    match path.strip_prefix(prefix) {
        Some("") => true,
        Some(rest) => rest.starts_with('.') || rest.starts_with('['),
        None => false,
    }
}
