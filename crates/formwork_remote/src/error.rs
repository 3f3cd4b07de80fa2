//! Error types for the remote suggestion module.

use thiserror::Error;

/// Result type alias for remote operations.
pub type RemoteResult<T> = Result<T, RemoteError>;

/// Errors that can occur while fetching suggestions.
#[derive(Error, Debug)]
pub enum RemoteError {
    /// The request was superseded or its field was unmounted.
    #[error("Request cancelled")]
    Cancelled,

    #[error("Invalid suggestion URL: {0}")]
    InvalidUrl(#[from] url::ParseError),

    #[error("HTTP error: {0}")]
    Http(#[from] reqwest::Error),

    #[error("Suggestion API returned {status}: {body}")]
    Status { status: u16, body: String },

    #[error("Unexpected suggestion response: {0}")]
    Decode(String),

    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),

    #[error("Form update failed: {0}")]
    Form(#[from] formwork_core::CoreError),
}

impl RemoteError {
    /// Cancellation is expected control flow, not a failure.
    pub fn is_cancelled(&self) -> bool {
        matches!(self, Self::Cancelled)
    }
}
