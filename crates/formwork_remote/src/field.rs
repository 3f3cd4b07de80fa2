//! Remote select field coordinator.
//!
//! Owns a field's [`SuggestionState`] and drives searches against a
//! [`SuggestionSource`]: debounced search input, one live request per
//! field, stale responses discarded.

use std::sync::Arc;

use parking_lot::Mutex;
use serde_json::Value;
use tokio::task::JoinHandle;
use tracing::{debug, error};
use url::Url;

use formwork_core::FormState;

use crate::cancel::CancelHandle;
use crate::config::{RemoteSelectConfig, SearchHooks};
use crate::error::RemoteResult;
use crate::source::SuggestionSource;
use crate::state::{NoResultsMessage, SuggestionEvent, SuggestionState};
use crate::suggestion::{Suggestion, SuggestionSerializer};

struct Inner {
    state: SuggestionState,
    in_flight: Option<CancelHandle>,
    mounted: bool,
}

impl Inner {
    fn apply(&mut self, event: SuggestionEvent) {
        let state = std::mem::take(&mut self.state);
        self.state = state.reduce(event);
    }
}

struct Shared<S> {
    config: RemoteSelectConfig,
    endpoint: Url,
    hooks: SearchHooks,
    source: S,
    lifetime: CancelHandle,
    inner: Mutex<Inner>,
}

impl<S: SuggestionSource> Shared<S> {
    fn cancel_in_flight(&self) {
        if let Some(handle) = self.inner.lock().in_flight.take() {
            handle.cancel();
        }
    }

    /// Send `query` under `handle`.
    async fn request(&self, handle: &CancelHandle, query: &str) -> RemoteResult<Vec<Value>> {
        let request = self.config.build_query(&self.endpoint, query);
        handle.run(self.source.fetch(&request)).await
    }

    async fn execute_search(&self, raw_query: &str) {
        let query = (self.hooks.pre_search_change)(raw_query);
        let handle = {
            let mut inner = self.inner.lock();
            if !inner.mounted {
                return;
            }
            inner.apply(SuggestionEvent::SearchStarted {
                query: query.clone(),
            });
            let handle = self.lifetime.child();
            if let Some(previous) = inner.in_flight.replace(handle.clone()) {
                if !previous.is_cancelled() {
                    debug!(field = %self.config.field_path, "superseding in-flight suggestion request");
                }
                previous.cancel();
            }
            handle
        };

        let result = self.request(&handle, &query).await;

        let mut inner = self.inner.lock();
        if handle.is_cancelled() || !inner.mounted {
            debug!(field = %self.config.field_path, query = %query, "discarding cancelled suggestion result");
            return;
        }
        match result {
            Ok(hits) => {
                let suggestions = self.hooks.serializer.serialize(&hits);
                debug!(
                    field = %self.config.field_path,
                    query = %query,
                    count = suggestions.len(),
                    "applying suggestions"
                );
                inner.apply(SuggestionEvent::FetchSucceeded(suggestions));
            }
            Err(e) if e.is_cancelled() => {
                debug!(field = %self.config.field_path, query = %query, "suggestion request cancelled");
            }
            Err(e) => {
                error!(field = %self.config.field_path, query = %query, error = %e, "failed to fetch suggestions");
                inner.apply(SuggestionEvent::FetchFailed);
            }
        }
    }
}

/// A select field whose options come from a remote search endpoint.
///
/// Debounced searching spawns tokio tasks, so [`on_search_change`] must be
/// called from within a runtime. Dropping the field unmounts it.
///
/// [`on_search_change`]: RemoteSelectField::on_search_change
pub struct RemoteSelectField<S> {
    shared: Arc<Shared<S>>,
    debounce: Mutex<Option<JoinHandle<()>>>,
}

impl<S: SuggestionSource + 'static> RemoteSelectField<S> {
    pub fn new(config: RemoteSelectConfig, source: S) -> RemoteResult<Self> {
        Self::with_hooks(config, source, SearchHooks::default())
    }

    pub fn with_hooks(config: RemoteSelectConfig, source: S, hooks: SearchHooks) -> RemoteResult<Self> {
        let endpoint = config.endpoint()?;
        let initial = hooks.serializer.serialize(&config.initial_suggestions);
        Ok(Self {
            shared: Arc::new(Shared {
                config,
                endpoint,
                hooks,
                source,
                lifetime: CancelHandle::new(),
                inner: Mutex::new(Inner {
                    state: SuggestionState::with_initial(initial),
                    in_flight: None,
                    mounted: true,
                }),
            }),
            debounce: Mutex::new(None),
        })
    }

    pub fn config(&self) -> &RemoteSelectConfig {
        &self.shared.config
    }

    pub fn source(&self) -> &S {
        &self.shared.source
    }

    /// Snapshot of the current state.
    pub fn state(&self) -> SuggestionState {
        self.shared.inner.lock().state.clone()
    }

    pub fn is_mounted(&self) -> bool {
        self.shared.inner.lock().mounted
    }

    /// Search text changed.
    ///
    /// The search runs once the debounce window passes without another
    /// change. An empty query cancels the pending search and leaves the
    /// current options untouched.
    pub fn on_search_change(&self, query: &str) {
        if let Some(pending) = self.debounce.lock().take() {
            pending.abort();
        }
        if query.is_empty() {
            debug!(field = %self.shared.config.field_path, "ignoring empty search query");
            return;
        }
        if !self.is_mounted() {
            return;
        }

        let shared = Arc::clone(&self.shared);
        let query = query.to_string();
        let delay = shared.config.debounce_duration();
        let timer = tokio::spawn(async move {
            tokio::time::sleep(delay).await;
            shared.cancel_in_flight();
            tokio::spawn(async move {
                shared.execute_search(&query).await;
            });
        });

        *self.debounce.lock() = Some(timer);
    }

    /// Run a search now, bypassing the debounce.
    pub async fn execute_search(&self, query: &str) {
        self.shared.execute_search(query).await;
    }

    /// Raw hits for `query`, leaving the field's state and its live search
    /// alone. Cancelled only by unmounting.
    pub async fn fetch_suggestions(&self, query: &str) -> RemoteResult<Vec<Value>> {
        let handle = self.shared.lifetime.child();
        self.shared.request(&handle, query).await
    }

    /// Values were picked from the dropdown. Returns the new selection.
    pub fn on_select_value(&self, values: &[String]) -> Vec<Suggestion> {
        let mut inner = self.shared.inner.lock();
        inner.apply(SuggestionEvent::ValueSelected {
            values: values.to_vec(),
            multiple: self.shared.config.multiple,
        });
        inner.state.selected_suggestions.to_vec()
    }

    /// Like [`on_select_value`](Self::on_select_value), also storing the
    /// value in the form.
    pub fn on_select_value_into<F: FormState + ?Sized>(
        &self,
        form: &mut F,
        values: &[String],
    ) -> RemoteResult<Vec<Suggestion>> {
        let selected = self.on_select_value(values);
        let value = if self.shared.config.multiple {
            Value::Array(values.iter().cloned().map(Value::String).collect())
        } else {
            Value::String(values.first().cloned().unwrap_or_default())
        };
        form.set_field_value(&self.shared.config.field_path, value)?;
        Ok(selected)
    }

    /// Free text was added as a new value. Returns the new selection.
    pub fn handle_addition(&self, text: &str) -> Vec<Suggestion> {
        let suggestion = self.shared.hooks.added_value.serialize(text);
        let mut inner = self.shared.inner.lock();
        inner.apply(SuggestionEvent::ValueAdded(suggestion));
        inner.state.selected_suggestions.to_vec()
    }

    pub async fn on_focus(&self) {
        let query = {
            let mut inner = self.shared.inner.lock();
            inner.apply(SuggestionEvent::Focused);
            inner.state.search_query.clone().unwrap_or_default()
        };
        if self.shared.config.search_on_focus {
            self.shared.execute_search(&query).await;
        }
    }

    pub fn on_blur(&self) {
        self.shared.inner.lock().apply(SuggestionEvent::Blurred {
            preserve_query: self.shared.config.preserve_query_on_blur,
        });
    }

    pub fn on_close(&self) {
        self.shared.inner.lock().apply(SuggestionEvent::Closed);
    }

    pub fn no_results_message(&self) -> NoResultsMessage {
        self.shared
            .inner
            .lock()
            .state
            .no_results_message(&self.shared.config.messages)
    }

    pub fn allow_additions(&self) -> bool {
        self.shared
            .inner
            .lock()
            .state
            .allow_additions(self.shared.config.allow_additions)
    }

    /// Stop the pending debounce and the in-flight request. Results that
    /// arrive afterwards are dropped.
    pub fn unmount(&self) {
        if let Some(pending) = self.debounce.lock().take() {
            pending.abort();
        }
        let mut inner = self.shared.inner.lock();
        if !inner.mounted {
            return;
        }
        inner.mounted = false;
        if let Some(handle) = inner.in_flight.take() {
            handle.cancel();
        }
        self.shared.lifetime.cancel();
        debug!(field = %self.shared.config.field_path, "remote select unmounted");
    }
}

impl<S> Drop for RemoteSelectField<S> {
    fn drop(&mut self) {
        if let Some(pending) = self.debounce.get_mut().take() {
            pending.abort();
        }
        let mut inner = self.shared.inner.lock();
        inner.mounted = false;
        if let Some(handle) = inner.in_flight.take() {
            handle.cancel();
        }
        self.shared.lifetime.cancel();
    }
}
