//! Outbound suggestion requests.

use std::collections::BTreeMap;

use indexmap::IndexMap;
use serde_json::Value;
use url::Url;

use crate::error::RemoteResult;

/// Number of hits requested unless the caller overrides `size`.
pub const DEFAULT_SUGGESTION_SIZE: u32 = 20;

/// One GET request against a suggestion endpoint.
#[derive(Debug, Clone, PartialEq)]
pub struct SuggestionQuery {
    pub endpoint: Url,
    /// The search text as typed (after the field's transform).
    pub query: String,
    /// Query parameters, serialized in key order.
    pub params: BTreeMap<String, Value>,
    pub headers: IndexMap<String, String>,
}

impl SuggestionQuery {
    pub fn new(endpoint: Url, param_name: &str, query: impl Into<String>) -> Self {
        let query = query.into();
        let mut params = BTreeMap::new();
        params.insert(param_name.to_string(), Value::String(query.clone()));
        params.insert("size".to_string(), Value::from(DEFAULT_SUGGESTION_SIZE));
        Self {
            endpoint,
            query,
            params,
            headers: IndexMap::new(),
        }
    }

    /// Add caller parameters; they override the search text and `size`.
    pub fn with_params<'a>(mut self, params: impl IntoIterator<Item = (&'a String, &'a Value)>) -> Self {
        for (key, value) in params {
            self.params.insert(key.clone(), value.clone());
        }
        self
    }

    pub fn with_headers<'a>(mut self, headers: impl IntoIterator<Item = (&'a String, &'a String)>) -> Self {
        for (key, value) in headers {
            self.headers.insert(key.clone(), value.clone());
        }
        self
    }

    /// Full request URL.
    ///
    /// Arrays repeat their key (`type=a&type=b`), `null` is sent as a bare
    /// key.
    pub fn to_url(&self) -> Url {
        let mut url = self.endpoint.clone();
        {
            let mut pairs = url.query_pairs_mut();
            for (key, value) in &self.params {
                match value {
                    Value::Array(items) => {
                        for item in items.iter().filter(|item| !item.is_null()) {
                            pairs.append_pair(key, &param_text(item));
                        }
                    }
                    Value::Null => {
                        pairs.append_key_only(key);
                    }
                    other => {
                        pairs.append_pair(key, &param_text(other));
                    }
                }
            }
        }
        url
    }
}

fn param_text(value: &Value) -> String {
    match value {
        Value::String(s) => s.clone(),
        other => other.to_string(),
    }
}

/// Resolve a possibly relative endpoint against `base`.
pub fn resolve_endpoint(url: &str, base: Option<&str>) -> RemoteResult<Url> {
    match (Url::parse(url), base) {
        (Ok(url), _) => Ok(url),
        (Err(url::ParseError::RelativeUrlWithoutBase), Some(base)) => {
            Ok(Url::parse(base)?.join(url)?)
        }
        (Err(e), _) => Err(e.into()),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    fn endpoint() -> Url {
        Url::parse("https://example.org/api/affiliations").unwrap()
    }

    #[test]
    fn test_default_params() {
        let query = SuggestionQuery::new(endpoint(), "suggest", "cern");
        assert_eq!(
            query.to_url().as_str(),
            "https://example.org/api/affiliations?size=20&suggest=cern"
        );
    }

    #[test]
    fn test_arrays_repeat_keys() {
        let extra: IndexMap<String, Value> = [
            ("type".to_string(), json!(["person", "organization"])),
            ("size".to_string(), json!(5)),
        ]
        .into_iter()
        .collect();
        let query = SuggestionQuery::new(endpoint(), "q", "ada lovelace").with_params(&extra);
        assert_eq!(
            query.to_url().query(),
            Some("q=ada+lovelace&size=5&type=person&type=organization")
        );
    }

    #[test]
    fn test_null_param_is_bare_key() {
        let extra: IndexMap<String, Value> = [("facets".to_string(), Value::Null)].into_iter().collect();
        let query = SuggestionQuery::new(endpoint(), "suggest", "x").with_params(&extra);
        assert_eq!(query.to_url().query(), Some("facets&size=20&suggest=x"));
    }

    #[test]
    fn test_resolve_relative_endpoint() {
        let url = resolve_endpoint("/api/subjects", Some("https://zenodo.org/deposit")).unwrap();
        assert_eq!(url.as_str(), "https://zenodo.org/api/subjects");
        assert!(resolve_endpoint("/api/subjects", None).is_err());
    }
}
