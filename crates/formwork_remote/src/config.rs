//! Remote select configuration.

use std::fmt;
use std::sync::Arc;
use std::time::Duration;

use indexmap::IndexMap;
use serde::{Deserialize, Serialize};
use serde_json::Value;
use url::Url;

use crate::error::RemoteResult;
use crate::query::{resolve_endpoint, SuggestionQuery};
use crate::suggestion::{AddedValueSerializer, SuggestionSerializer, TitleIdSerializer};

/// Texts shown in place of the option list.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct SuggestionMessages {
    pub loading: String,
    pub error: String,
    pub no_query: String,
    pub no_results: String,
}

impl Default for SuggestionMessages {
    fn default() -> Self {
        Self {
            loading: "Loading...".to_string(),
            error: "Something went wrong...".to_string(),
            no_query: "Search...".to_string(),
            no_results: "No results found.".to_string(),
        }
    }
}

/// Configuration of one remote select field.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct RemoteSelectConfig {
    /// Path of the field in the form values
    pub field_path: String,
    /// Suggestion endpoint, absolute or relative to `base_url`
    pub suggestion_api_url: String,
    pub base_url: Option<String>,
    /// Extra query parameters; these override `size` and the search text
    pub query_params: IndexMap<String, Value>,
    pub headers: IndexMap<String, String>,
    pub search_query_param_name: String,
    pub debounce_ms: u64,
    pub multiple: bool,
    /// Search as soon as the field gains focus
    pub search_on_focus: bool,
    pub preserve_query_on_blur: bool,
    pub allow_additions: bool,
    /// Raw hits for values already selected when the field is created
    pub initial_suggestions: Vec<Value>,
    pub messages: SuggestionMessages,
}

impl Default for RemoteSelectConfig {
    fn default() -> Self {
        Self {
            field_path: String::new(),
            suggestion_api_url: String::new(),
            base_url: None,
            query_params: IndexMap::new(),
            headers: IndexMap::new(),
            search_query_param_name: "suggest".to_string(),
            debounce_ms: 500,
            multiple: false,
            search_on_focus: false,
            preserve_query_on_blur: false,
            allow_additions: false,
            initial_suggestions: Vec::new(),
            messages: SuggestionMessages::default(),
        }
    }
}

impl RemoteSelectConfig {
    pub fn new(field_path: impl Into<String>, suggestion_api_url: impl Into<String>) -> Self {
        Self {
            field_path: field_path.into(),
            suggestion_api_url: suggestion_api_url.into(),
            ..Default::default()
        }
    }

    pub fn base_url(mut self, base_url: impl Into<String>) -> Self {
        self.base_url = Some(base_url.into());
        self
    }

    pub fn query_param(mut self, key: impl Into<String>, value: impl Into<Value>) -> Self {
        self.query_params.insert(key.into(), value.into());
        self
    }

    pub fn header(mut self, name: impl Into<String>, value: impl Into<String>) -> Self {
        self.headers.insert(name.into(), value.into());
        self
    }

    pub fn search_query_param_name(mut self, name: impl Into<String>) -> Self {
        self.search_query_param_name = name.into();
        self
    }

    pub fn debounce(mut self, debounce: Duration) -> Self {
        self.debounce_ms = debounce.as_millis() as u64;
        self
    }

    pub fn multiple(mut self, multiple: bool) -> Self {
        self.multiple = multiple;
        self
    }

    /// Searching on focus also keeps the query when the field loses focus.
    pub fn search_on_focus(mut self, enabled: bool) -> Self {
        self.search_on_focus = enabled;
        self.preserve_query_on_blur = enabled;
        self
    }

    pub fn preserve_query_on_blur(mut self, preserve: bool) -> Self {
        self.preserve_query_on_blur = preserve;
        self
    }

    pub fn allow_additions(mut self, allow: bool) -> Self {
        self.allow_additions = allow;
        self
    }

    pub fn initial_suggestions(mut self, hits: Vec<Value>) -> Self {
        self.initial_suggestions = hits;
        self
    }

    pub fn messages(mut self, messages: SuggestionMessages) -> Self {
        self.messages = messages;
        self
    }

    pub fn debounce_duration(&self) -> Duration {
        Duration::from_millis(self.debounce_ms)
    }

    pub fn endpoint(&self) -> RemoteResult<Url> {
        resolve_endpoint(&self.suggestion_api_url, self.base_url.as_deref())
    }

    /// Request for `query` against an already resolved endpoint.
    pub fn build_query(&self, endpoint: &Url, query: &str) -> SuggestionQuery {
        SuggestionQuery::new(endpoint.clone(), &self.search_query_param_name, query)
            .with_params(&self.query_params)
            .with_headers(&self.headers)
    }
}

type QueryTransform = Arc<dyn Fn(&str) -> String + Send + Sync>;

/// Callbacks that shape a field's searches and selections.
#[derive(Clone)]
pub struct SearchHooks {
    pub serializer: Arc<dyn SuggestionSerializer>,
    pub pre_search_change: QueryTransform,
    pub added_value: AddedValueSerializer,
}

impl Default for SearchHooks {
    fn default() -> Self {
        Self {
            serializer: Arc::new(TitleIdSerializer),
            pre_search_change: Arc::new(|query| query.to_string()),
            added_value: AddedValueSerializer::default(),
        }
    }
}

impl SearchHooks {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn serializer(mut self, serializer: impl SuggestionSerializer + 'static) -> Self {
        self.serializer = Arc::new(serializer);
        self
    }

    /// Rewrite the search text before it is sent.
    pub fn pre_search_change(mut self, f: impl Fn(&str) -> String + Send + Sync + 'static) -> Self {
        self.pre_search_change = Arc::new(f);
        self
    }

    pub fn added_value(mut self, serializer: AddedValueSerializer) -> Self {
        self.added_value = serializer;
        self
    }
}

impl fmt::Debug for SearchHooks {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("SearchHooks")
            .field("added_value", &self.added_value)
            .finish_non_exhaustive()
    }
}
