//! Error types for editor file operations.

use thiserror::Error;

/// Result type alias for editor operations.
pub type EditorResult<T> = Result<T, EditorError>;

#[derive(Error, Debug)]
pub enum EditorError {
    #[error("Upload rejected: {0}")]
    Rejected(String),

    #[error("File not found: {0}")]
    NotFound(String),

    #[error("Transport error: {0}")]
    Transport(String),

    #[error("Form update failed: {0}")]
    Form(#[from] formwork_core::CoreError),
}
