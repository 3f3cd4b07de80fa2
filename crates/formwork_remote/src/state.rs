//! Remote select state and its reducer.
//!
//! Every transition of a remote select field is a [`SuggestionEvent`]
//! applied by [`SuggestionState::reduce`]. The fetch lifecycle
//! (`Idle → Fetching → Success | Error → Idle`) and the open/closed
//! overlay are independent.

use serde::Serialize;

use crate::config::SuggestionMessages;
use crate::suggestion::{Suggestion, SuggestionSet};

#[derive(Debug, Clone, Default, PartialEq, Serialize)]
pub struct SuggestionState {
    pub is_fetching: bool,
    /// Options offered by the dropdown.
    pub suggestions: SuggestionSet,
    pub selected_suggestions: SuggestionSet,
    pub error: bool,
    /// Last search text; `None` when no search is active.
    pub search_query: Option<String>,
    pub open: bool,
    /// Number of fetch outcomes (success or failure) applied so far.
    pub applied_results: u64,
}

#[derive(Debug, Clone, PartialEq)]
pub enum SuggestionEvent {
    SearchStarted { query: String },
    FetchSucceeded(Vec<Suggestion>),
    FetchFailed,
    ValueSelected { values: Vec<String>, multiple: bool },
    ValueAdded(Suggestion),
    Focused,
    Blurred { preserve_query: bool },
    Closed,
}

/// What to show when the dropdown has no options to list.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum NoResultsMessage {
    Loading(String),
    Error(String),
    NoQuery(String),
    NoResults(String),
}

impl NoResultsMessage {
    pub fn text(&self) -> &str {
        match self {
            Self::Loading(text) | Self::Error(text) | Self::NoQuery(text) | Self::NoResults(text) => text,
        }
    }

    pub fn is_error(&self) -> bool {
        matches!(self, Self::Error(_))
    }
}

impl SuggestionState {
    /// State seeded with the suggestions for already selected values.
    pub fn with_initial(initial: Vec<Suggestion>) -> Self {
        let selected: SuggestionSet = initial.into_iter().collect();
        Self {
            suggestions: selected.clone(),
            selected_suggestions: selected,
            ..Default::default()
        }
    }

    pub fn reduce(mut self, event: SuggestionEvent) -> Self {
        match event {
            SuggestionEvent::SearchStarted { query } => {
                self.is_fetching = true;
                self.search_query = Some(query);
            }
            SuggestionEvent::FetchSucceeded(fetched) => {
                let fetched: SuggestionSet = fetched.into_iter().collect();
                self.suggestions = self.selected_suggestions.union(&fetched);
                self.is_fetching = false;
                self.error = false;
                self.open = true;
                self.applied_results += 1;
            }
            SuggestionEvent::FetchFailed => {
                self.error = true;
                self.is_fetching = false;
                self.applied_results += 1;
            }
            SuggestionEvent::ValueSelected { values, multiple } => {
                self.selected_suggestions = self
                    .suggestions
                    .iter()
                    .filter(|s| values.iter().any(|v| *v == s.value))
                    .cloned()
                    .collect();
                self.search_query = None;
                self.error = false;
                self.open = multiple;
            }
            SuggestionEvent::ValueAdded(suggestion) => {
                self.selected_suggestions.insert(suggestion);
                self.suggestions = self.suggestions.union(&self.selected_suggestions);
            }
            SuggestionEvent::Focused => {
                self.open = true;
            }
            SuggestionEvent::Blurred { preserve_query } => {
                self.open = false;
                self.error = false;
                if !preserve_query {
                    self.search_query = None;
                    self.suggestions = self.selected_suggestions.clone();
                }
            }
            SuggestionEvent::Closed => {
                self.open = false;
            }
        }
        self
    }

    pub fn no_results_message(&self, messages: &SuggestionMessages) -> NoResultsMessage {
        if self.is_fetching {
            NoResultsMessage::Loading(messages.loading.clone())
        } else if self.error {
            NoResultsMessage::Error(messages.error.clone())
        } else if self.search_query.as_deref().map_or(true, str::is_empty) {
            NoResultsMessage::NoQuery(messages.no_query.clone())
        } else {
            NoResultsMessage::NoResults(messages.no_results.clone())
        }
    }

    /// Free-text additions are refused while the last fetch failed.
    pub fn allow_additions(&self, configured: bool) -> bool {
        configured && !self.error
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn s(value: &str) -> Suggestion {
        Suggestion::from_text(value)
    }

    fn searching(query: &str) -> SuggestionState {
        SuggestionState::default().reduce(SuggestionEvent::SearchStarted {
            query: query.to_string(),
        })
    }

    #[test]
    fn test_fetch_success_merges_selected_first() {
        let state = SuggestionState::with_initial(vec![s("b")])
            .reduce(SuggestionEvent::SearchStarted { query: "x".into() })
            .reduce(SuggestionEvent::FetchSucceeded(vec![s("a"), s("b"), s("c")]));

        assert_eq!(state.suggestions.values(), vec!["b", "a", "c"]);
        assert!(!state.is_fetching);
        assert!(state.open);
        assert_eq!(state.applied_results, 1);
    }

    #[test]
    fn test_fetch_failure_keeps_suggestions() {
        let state = searching("x")
            .reduce(SuggestionEvent::FetchSucceeded(vec![s("a")]))
            .reduce(SuggestionEvent::SearchStarted { query: "xy".into() })
            .reduce(SuggestionEvent::FetchFailed);

        assert!(state.error);
        assert!(!state.is_fetching);
        assert_eq!(state.suggestions.values(), vec!["a"]);
        assert!(!state.allow_additions(true));
    }

    #[test]
    fn test_select_filters_suggestions() {
        let state = searching("x")
            .reduce(SuggestionEvent::FetchSucceeded(vec![s("a"), s("b"), s("c")]))
            .reduce(SuggestionEvent::ValueSelected {
                values: vec!["c".into(), "a".into(), "zzz".into()],
                multiple: false,
            });

        assert_eq!(state.selected_suggestions.values(), vec!["a", "c"]);
        assert_eq!(state.search_query, None);
        assert!(!state.open);
    }

    #[test]
    fn test_multiple_select_stays_open() {
        let state = searching("x")
            .reduce(SuggestionEvent::FetchSucceeded(vec![s("a")]))
            .reduce(SuggestionEvent::ValueSelected {
                values: vec!["a".into()],
                multiple: true,
            });
        assert!(state.open);
    }

    #[test]
    fn test_addition_unions_into_suggestions() {
        let state = SuggestionState::with_initial(vec![s("a")])
            .reduce(SuggestionEvent::ValueAdded(s("new")))
            .reduce(SuggestionEvent::ValueAdded(s("new")));

        assert_eq!(state.selected_suggestions.values(), vec!["a", "new"]);
        assert_eq!(state.suggestions.values(), vec!["a", "new"]);
    }

    #[test]
    fn test_blur_resets_to_selection() {
        let fetched = SuggestionState::with_initial(vec![s("a")])
            .reduce(SuggestionEvent::Focused)
            .reduce(SuggestionEvent::SearchStarted { query: "q".into() })
            .reduce(SuggestionEvent::FetchSucceeded(vec![s("b")]));

        let kept = fetched
            .clone()
            .reduce(SuggestionEvent::Blurred { preserve_query: true });
        assert_eq!(kept.search_query.as_deref(), Some("q"));
        assert_eq!(kept.suggestions.len(), 2);
        assert!(!kept.open);

        let reset = fetched.reduce(SuggestionEvent::Blurred { preserve_query: false });
        assert_eq!(reset.search_query, None);
        assert_eq!(reset.suggestions.values(), vec!["a"]);
    }

    #[test]
    fn test_no_results_message_priority() {
        let messages = SuggestionMessages::default();

        let idle = SuggestionState::default();
        assert_eq!(idle.no_results_message(&messages), NoResultsMessage::NoQuery("Search...".into()));

        let fetching = searching("q");
        assert_eq!(fetching.no_results_message(&messages).text(), "Loading...");

        let failed = fetching.clone().reduce(SuggestionEvent::FetchFailed);
        assert!(failed.no_results_message(&messages).is_error());

        let empty = fetching.reduce(SuggestionEvent::FetchSucceeded(Vec::new()));
        assert_eq!(empty.no_results_message(&messages).text(), "No results found.");
    }

    #[test]
    fn test_close_only_touches_open() {
        let opened = SuggestionState::default().reduce(SuggestionEvent::Focused);
        let closed = opened.clone().reduce(SuggestionEvent::Closed);
        assert!(!closed.open);
        assert_eq!(closed.suggestions, opened.suggestions);
    }
}
