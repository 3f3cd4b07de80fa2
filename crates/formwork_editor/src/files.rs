//! Uploaded file records and their list labels.

use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct FileLinks {
    #[serde(default)]
    pub download_html: String,
}

/// A file as returned by the upload endpoint.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct FileEntry {
    pub file_id: String,
    pub original_filename: String,
    pub size: u64,
    #[serde(default)]
    pub links: FileLinks,
}

impl FileEntry {
    pub fn new(file_id: impl Into<String>, original_filename: impl Into<String>, size: u64) -> Self {
        Self {
            file_id: file_id.into(),
            original_filename: original_filename.into(),
            size,
            links: FileLinks::default(),
        }
    }

    pub fn download_link(mut self, href: impl Into<String>) -> Self {
        self.links.download_html = href.into();
        self
    }

    /// `"report.pdf (1.50 KB)"`
    pub fn label(&self) -> String {
        format!(
            "{} ({})",
            self.original_filename,
            human_readable_bytes(self.size, true)
        )
    }
}

/// Format a byte count with two decimals, using 1024 steps when `binary`.
pub fn human_readable_bytes(bytes: u64, binary: bool) -> String {
    let kilo: f64 = if binary { 1024.0 } else { 1000.0 };
    let value = bytes as f64;
    if value < kilo {
        format!("{bytes} bytes")
    } else if value < kilo.powi(2) {
        format!("{:.2} KB", value / kilo)
    } else if value < kilo.powi(3) {
        format!("{:.2} MB", value / kilo.powi(2))
    } else {
        format!("{:.2} GB", value / kilo.powi(3))
    }
}

/// One row of a rendered file list.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct FileListItem {
    pub key: String,
    pub label: String,
    pub href: String,
    pub removable: bool,
}

/// Rows for `files`; removable only when the host can delete files.
pub fn files_list(files: &[FileEntry], can_delete: bool) -> Vec<FileListItem> {
    files
        .iter()
        .map(|file| FileListItem {
            key: file.file_id.clone(),
            label: file.label(),
            href: file.links.download_html.clone(),
            removable: can_delete,
        })
        .collect()
}
