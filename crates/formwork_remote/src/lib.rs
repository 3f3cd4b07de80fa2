//! # formwork_remote
//!
//! Remote suggestions for select fields.
//!
//! # Features
//!
//! - **Debounced search**: trailing debounce on search input
//! - **Cancellation**: one live request per field, stale results dropped
//! - **Pure state**: every transition is a reducer step on [`SuggestionState`]
//! - **Serializers**: map search hits to suggestions (title/id, affiliations)
//! - **Mock source**: canned replies and captured queries for tests
//!
//! # Example
//!
//! ```rust,no_run
//! use formwork_remote::{HttpSuggestionSource, RemoteSelectConfig, RemoteSelectField};
//!
//! # async fn example() -> formwork_remote::RemoteResult<()> {
//! let config = RemoteSelectConfig::new("metadata.subjects", "/api/subjects")
//!     .base_url("https://zenodo.org")
//!     .multiple(true);
//! let field = RemoteSelectField::new(config, HttpSuggestionSource::new())?;
//!
//! field.execute_search("physics").await;
//! for suggestion in field.state().suggestions.iter() {
//!     println!("{} ({})", suggestion.text, suggestion.value);
//! }
//! # Ok(())
//! # }
//! ```

pub mod affiliations;
pub mod cancel;
pub mod config;
pub mod error;
pub mod field;
pub mod mock;
pub mod query;
pub mod source;
pub mod state;
pub mod suggestion;

pub use affiliations::{AffiliationContent, AffiliationSuggestion, AffiliationsSuggestions, IdentifierEntry};
pub use cancel::{with_cancel, CancelHandle};
pub use config::{RemoteSelectConfig, SearchHooks, SuggestionMessages};
pub use error::{RemoteError, RemoteResult};
pub use field::RemoteSelectField;
pub use mock::MockSuggestionSource;
pub use query::{resolve_endpoint, SuggestionQuery, DEFAULT_SUGGESTION_SIZE};
pub use source::{parse_hits, HttpSuggestionSource, SuggestionSource};
pub use state::{NoResultsMessage, SuggestionEvent, SuggestionState};
pub use suggestion::{AddedValueSerializer, Suggestion, SuggestionSerializer, SuggestionSet, TitleIdSerializer};
