//! Mock suggestion source for testing.
//!
//! Returns canned hits per search text, optionally after a delay, and
//! records every query so tests can verify what was requested.

use std::collections::HashMap;
use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::Arc;
use std::time::Duration;

use async_trait::async_trait;
use parking_lot::RwLock;
use serde_json::Value;

use crate::error::{RemoteError, RemoteResult};
use crate::query::SuggestionQuery;
use crate::source::SuggestionSource;

/// Canned answer for one search text.
#[derive(Debug, Clone)]
pub enum MockReply {
    Hits(Vec<Value>),
    Failure(String),
}

#[derive(Debug, Clone)]
struct MockEntry {
    reply: MockReply,
    delay: Duration,
}

#[derive(Clone, Default)]
pub struct MockSuggestionSource {
    replies: Arc<RwLock<HashMap<String, MockEntry>>>,
    captured: Arc<RwLock<Vec<SuggestionQuery>>>,
    completed: Arc<AtomicUsize>,
}

impl MockSuggestionSource {
    pub fn new() -> Self {
        Self::default()
    }

    /// Answer `query` with `hits`.
    pub fn respond(self, query: impl Into<String>, hits: Vec<Value>) -> Self {
        self.respond_after(query, hits, Duration::ZERO)
    }

    /// Answer `query` with `hits` once `delay` has elapsed.
    pub fn respond_after(self, query: impl Into<String>, hits: Vec<Value>, delay: Duration) -> Self {
        self.replies.write().insert(
            query.into(),
            MockEntry {
                reply: MockReply::Hits(hits),
                delay,
            },
        );
        self
    }

    /// Fail `query` with a transport-like error.
    pub fn fail(self, query: impl Into<String>, message: impl Into<String>) -> Self {
        self.replies.write().insert(
            query.into(),
            MockEntry {
                reply: MockReply::Failure(message.into()),
                delay: Duration::ZERO,
            },
        );
        self
    }

    pub fn get_calls(&self) -> Vec<SuggestionQuery> {
        self.captured.read().clone()
    }

    /// Search texts requested so far, in order.
    pub fn queries(&self) -> Vec<String> {
        self.captured.read().iter().map(|q| q.query.clone()).collect()
    }

    pub fn call_count(&self) -> usize {
        self.captured.read().len()
    }

    /// Requests whose reply was produced (not dropped by cancellation).
    pub fn completed_count(&self) -> usize {
        self.completed.load(Ordering::SeqCst)
    }
}

#[async_trait]
impl SuggestionSource for MockSuggestionSource {
    async fn fetch(&self, query: &SuggestionQuery) -> RemoteResult<Vec<Value>> {
        self.captured.write().push(query.clone());

        let entry = self.replies.read().get(&query.query).cloned();
        let Some(entry) = entry else {
            self.completed.fetch_add(1, Ordering::SeqCst);
            return Ok(Vec::new());
        };

        if !entry.delay.is_zero() {
            tokio::time::sleep(entry.delay).await;
        }
        self.completed.fetch_add(1, Ordering::SeqCst);

        match entry.reply {
            MockReply::Hits(hits) => Ok(hits),
            MockReply::Failure(message) => Err(RemoteError::Status {
                status: 503,
                body: message,
            }),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;
    use url::Url;

    fn query(text: &str) -> SuggestionQuery {
        SuggestionQuery::new(Url::parse("https://example.org/api").unwrap(), "suggest", text)
    }

    #[tokio::test]
    async fn test_mock_source_replies_and_captures() {
        let source = MockSuggestionSource::new()
            .respond("cern", vec![json!({"id": "cern"})])
            .fail("boom", "service unavailable");

        assert_eq!(source.fetch(&query("cern")).await.unwrap().len(), 1);
        assert!(source.fetch(&query("other")).await.unwrap().is_empty());
        assert!(source.fetch(&query("boom")).await.is_err());

        assert_eq!(source.queries(), vec!["cern", "other", "boom"]);
        assert_eq!(source.completed_count(), 3);
    }
}
