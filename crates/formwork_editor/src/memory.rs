//! In-memory file transport.

use std::collections::HashMap;
use std::sync::Arc;

use async_trait::async_trait;
use parking_lot::RwLock;
use uuid::Uuid;

use crate::attachments::{FileTransport, UploadOptions};
use crate::error::{EditorError, EditorResult};
use crate::files::FileEntry;

/// Stores uploads in memory. Useful for previews and tests.
#[derive(Debug, Clone, Default)]
pub struct MemoryTransport {
    stored: Arc<RwLock<HashMap<String, Vec<u8>>>>,
    max_size: Option<u64>,
    base_url: String,
}

impl MemoryTransport {
    pub fn new() -> Self {
        Self::default()
    }

    /// Reject payloads larger than `bytes`.
    pub fn max_size(mut self, bytes: u64) -> Self {
        self.max_size = Some(bytes);
        self
    }

    /// Prefix for generated download links.
    pub fn base_url(mut self, base_url: impl Into<String>) -> Self {
        self.base_url = base_url.into();
        self
    }

    pub fn contents(&self, file_id: &str) -> Option<Vec<u8>> {
        self.stored.read().get(file_id).cloned()
    }

    pub fn len(&self) -> usize {
        self.stored.read().len()
    }

    pub fn is_empty(&self) -> bool {
        self.stored.read().is_empty()
    }
}

#[async_trait]
impl FileTransport for MemoryTransport {
    async fn upload(&self, filename: &str, payload: Vec<u8>, _options: &UploadOptions) -> EditorResult<FileEntry> {
        let size = payload.len() as u64;
        if let Some(max) = self.max_size {
            if size > max {
                return Err(EditorError::Rejected(format!(
                    "{filename} exceeds the maximum size of {max} bytes"
                )));
            }
        }
        let file_id = Uuid::new_v4().to_string();
        self.stored.write().insert(file_id.clone(), payload);
        let href = format!("{}/files/{}", self.base_url.trim_end_matches('/'), file_id);
        Ok(FileEntry::new(file_id, filename, size).download_link(href))
    }

    async fn delete(&self, file: &FileEntry) -> EditorResult<()> {
        self.stored
            .write()
            .remove(&file.file_id)
            .map(|_| ())
            .ok_or_else(|| EditorError::NotFound(file.file_id.clone()))
    }
}
