//! Editor attachments: concurrent uploads and deletions through a
//! host-provided [`FileTransport`].

use std::fmt;

use async_trait::async_trait;
use futures::future::join_all;
use serde::{Deserialize, Serialize};
use tracing::{debug, warn};

use crate::error::{EditorError, EditorResult};
use crate::files::{files_list, FileEntry, FileListItem};

/// Options passed along with each upload.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct UploadOptions {
    pub content_type: Option<String>,
}

/// Moves file bytes to and from the host's storage.
#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait FileTransport: Send + Sync {
    async fn upload(&self, filename: &str, payload: Vec<u8>, options: &UploadOptions) -> EditorResult<FileEntry>;

    async fn delete(&self, file: &FileEntry) -> EditorResult<()>;
}

/// A file waiting to be uploaded.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PendingUpload {
    pub filename: String,
    pub payload: Vec<u8>,
    pub options: UploadOptions,
}

impl PendingUpload {
    pub fn new(filename: impl Into<String>, payload: Vec<u8>) -> Self {
        Self {
            filename: filename.into(),
            payload,
            options: UploadOptions::default(),
        }
    }

    pub fn content_type(mut self, content_type: impl Into<String>) -> Self {
        self.options.content_type = Some(content_type.into());
        self
    }
}

/// A failed file operation.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct FileError {
    pub filename: String,
    pub message: String,
}

impl FileError {
    fn new(filename: &str, error: &EditorError) -> Self {
        Self {
            filename: filename.to_string(),
            message: error.to_string(),
        }
    }
}

type FilesChanged = Box<dyn Fn(&[FileEntry]) + Send + Sync>;

/// Files attached to a rich text field.
pub struct AttachmentManager<T> {
    transport: T,
    files: Vec<FileEntry>,
    errors: Vec<FileError>,
    on_files_change: Option<FilesChanged>,
}

impl<T: FileTransport> AttachmentManager<T> {
    pub fn new(transport: T) -> Self {
        Self {
            transport,
            files: Vec::new(),
            errors: Vec::new(),
            on_files_change: None,
        }
    }

    pub fn with_files(mut self, files: Vec<FileEntry>) -> Self {
        self.files = files;
        self
    }

    /// Called with the full file list whenever it changes.
    pub fn on_files_change(mut self, f: impl Fn(&[FileEntry]) + Send + Sync + 'static) -> Self {
        self.on_files_change = Some(Box::new(f));
        self
    }

    pub fn files(&self) -> &[FileEntry] {
        &self.files
    }

    pub fn errors(&self) -> &[FileError] {
        &self.errors
    }

    pub fn clear_errors(&mut self) {
        self.errors.clear();
    }

    pub fn transport(&self) -> &T {
        &self.transport
    }

    pub fn list_items(&self) -> Vec<FileListItem> {
        files_list(&self.files, true)
    }

    /// Upload all files concurrently.
    ///
    /// Successes are appended in input order; each failure is recorded
    /// without affecting the others. Returns the number of files added.
    pub async fn upload_files(&mut self, uploads: Vec<PendingUpload>) -> usize {
        if uploads.is_empty() {
            return 0;
        }
        let transport = &self.transport;
        let results = join_all(uploads.iter().map(|upload| async move {
            transport
                .upload(&upload.filename, upload.payload.clone(), &upload.options)
                .await
        }))
        .await;

        let mut added = 0;
        for (upload, result) in uploads.iter().zip(results) {
            match result {
                Ok(entry) => {
                    debug!(filename = %upload.filename, file_id = %entry.file_id, "file uploaded");
                    self.files.push(entry);
                    added += 1;
                }
                Err(e) => {
                    warn!(filename = %upload.filename, error = %e, "file upload failed");
                    self.errors.push(FileError::new(&upload.filename, &e));
                }
            }
        }

        if added > 0 {
            self.notify();
        }
        added
    }

    /// Delete the file with `file_id`.
    pub async fn delete_file(&mut self, file_id: &str) -> bool {
        let Some(position) = self.files.iter().position(|f| f.file_id == file_id) else {
            let error = EditorError::NotFound(file_id.to_string());
            warn!(file_id = %file_id, "cannot delete unknown file");
            self.errors.push(FileError::new(file_id, &error));
            return false;
        };

        let file = self.files[position].clone();
        match self.transport.delete(&file).await {
            Ok(()) => {
                debug!(filename = %file.original_filename, "file deleted");
                self.files.remove(position);
                self.notify();
                true
            }
            Err(e) => {
                warn!(filename = %file.original_filename, error = %e, "file deletion failed");
                self.errors.push(FileError::new(&file.original_filename, &e));
                false
            }
        }
    }

    fn notify(&self) {
        if let Some(callback) = &self.on_files_change {
            callback(&self.files);
        }
    }
}

impl<T> fmt::Debug for AttachmentManager<T> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("AttachmentManager")
            .field("files", &self.files)
            .field("errors", &self.errors)
            .finish_non_exhaustive()
    }
}
