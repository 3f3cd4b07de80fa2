//! # formwork_editor
//!
//! Rich text editing for formwork forms.
//!
//! # Features
//!
//! - **Editor config**: default init options with caller overrides
//! - **Rich input field**: HTML content bound to a form path
//! - **Attachments**: concurrent uploads and deletions with per-file errors
//! - **File lists**: labels with human readable sizes
//!
//! # Example
//!
//! ```rust
//! use formwork_editor::{AttachmentManager, MemoryTransport, PendingUpload};
//!
//! # async fn example() {
//! let mut attachments = AttachmentManager::new(MemoryTransport::new().max_size(1024))
//!     .on_files_change(|files| println!("{} attached", files.len()));
//!
//! attachments
//!     .upload_files(vec![PendingUpload::new("figure.png", vec![0; 128])])
//!     .await;
//! assert_eq!(attachments.files().len(), 1);
//! # }
//! ```

pub mod attachments;
pub mod config;
pub mod editor;
pub mod error;
pub mod files;
pub mod memory;

pub use attachments::{AttachmentManager, FileError, FileTransport, PendingUpload, UploadOptions};
pub use config::{content_style, EditorConfig, ToolbarButton};
pub use editor::RichInputField;
pub use error::{EditorError, EditorResult};
pub use files::{files_list, human_readable_bytes, FileEntry, FileLinks, FileListItem};
pub use memory::MemoryTransport;
