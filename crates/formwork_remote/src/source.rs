//! Remote suggestion sources.

use std::sync::Arc;
use std::time::Duration;

use async_trait::async_trait;
use serde::Deserialize;
use serde_json::Value;
use tracing::debug;

use crate::error::{RemoteError, RemoteResult};
use crate::query::SuggestionQuery;

/// Anything that can answer a suggestion query with raw search hits.
#[async_trait]
pub trait SuggestionSource: Send + Sync {
    async fn fetch(&self, query: &SuggestionQuery) -> RemoteResult<Vec<Value>>;
}

#[async_trait]
impl<S: SuggestionSource + ?Sized> SuggestionSource for Arc<S> {
    async fn fetch(&self, query: &SuggestionQuery) -> RemoteResult<Vec<Value>> {
        (**self).fetch(query).await
    }
}

#[derive(Debug, Deserialize)]
struct SearchResponse {
    hits: SearchHits,
}

#[derive(Debug, Deserialize)]
struct SearchHits {
    hits: Vec<Value>,
}

/// Extract `hits.hits` from a search response body.
pub fn parse_hits(body: &[u8]) -> RemoteResult<Vec<Value>> {
    let response: SearchResponse =
        serde_json::from_slice(body).map_err(|e| RemoteError::Decode(e.to_string()))?;
    Ok(response.hits.hits)
}

/// Suggestion source backed by an HTTP search API.
#[derive(Debug, Clone)]
pub struct HttpSuggestionSource {
    client: reqwest::Client,
}

impl Default for HttpSuggestionSource {
    fn default() -> Self {
        Self::new()
    }
}

impl HttpSuggestionSource {
    pub fn new() -> Self {
        Self {
            client: reqwest::Client::new(),
        }
    }

    /// Use a preconfigured client (proxies, TLS, default headers).
    pub fn with_client(client: reqwest::Client) -> Self {
        Self { client }
    }

    pub fn with_timeout(timeout: Duration) -> RemoteResult<Self> {
        let client = reqwest::Client::builder().timeout(timeout).build()?;
        Ok(Self { client })
    }
}

#[async_trait]
impl SuggestionSource for HttpSuggestionSource {
    async fn fetch(&self, query: &SuggestionQuery) -> RemoteResult<Vec<Value>> {
        let url = query.to_url();
        debug!(url = %url, "fetching suggestions");

        let mut request = self
            .client
            .get(url)
            .header(reqwest::header::ACCEPT, "application/json");
        for (name, value) in &query.headers {
            request = request.header(name.as_str(), value.as_str());
        }

        let response = request.send().await?;
        let status = response.status();
        if !status.is_success() {
            let body = response.text().await.unwrap_or_default();
            return Err(RemoteError::Status {
                status: status.as_u16(),
                body,
            });
        }

        let body = response.bytes().await?;
        parse_hits(&body)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_hits() {
        let body = br#"{"hits": {"hits": [{"id": "a"}, {"id": "b"}], "total": 2}, "aggregations": {}}"#;
        let hits = parse_hits(body).unwrap();
        assert_eq!(hits.len(), 2);
        assert_eq!(hits[1]["id"], "b");
    }

    #[test]
    fn test_parse_hits_rejects_other_shapes() {
        let err = parse_hits(br#"{"results": []}"#).unwrap_err();
        assert!(matches!(err, RemoteError::Decode(_)));
        assert!(parse_hits(b"not json").is_err());
    }

    #[tokio::test]
    async fn test_invalid_header_is_transport_error() {
        let source = HttpSuggestionSource::with_timeout(Duration::from_millis(200)).unwrap();
        let endpoint = url::Url::parse("http://localhost/api/suggest").unwrap();
        let mut query = SuggestionQuery::new(endpoint, "suggest", "x");
        query.headers.insert("bad header".to_string(), "1".to_string());

        let err = source.fetch(&query).await.unwrap_err();
        assert!(matches!(err, RemoteError::Http(_)));
        assert!(!err.is_cancelled());
    }
}
