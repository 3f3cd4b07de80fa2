//! # formwork_core
//!
//! Form-field logic shared by all formwork components.
//!
//! # Features
//!
//! - **Error classification**: flatten nested validation errors into
//!   path → message and path → advisory maps
//! - **Feedback labels**: pick what to show next to a field
//! - **Form state**: a small trait over the host's form library, with a
//!   JSON-backed implementation
//! - **Field logic**: select options, text inputs, accordion sections,
//!   error message boxes, custom-field modal
//!
//! # Example
//!
//! ```rust
//! use formwork_core::{classify, ErrorNode};
//! use serde_json::json;
//!
//! let errors = ErrorNode::from(json!({
//!     "metadata": {"creators": [{"name": "Required"}]},
//!     "access": {"message": "Record will be public", "severity": "info"}
//! }));
//!
//! let result = classify(&errors);
//! assert_eq!(result.flattened["metadata.creators[0].name"], "Required");
//! assert_eq!(result.severity_checks["access"].severity, "info");
//! ```

pub mod accordion;
pub mod classify;
pub mod discoverable;
pub mod error;
pub mod feedback;
pub mod form;
pub mod message;
pub mod node;
pub mod path;
pub mod select;
pub mod text;

pub use accordion::{AccordionField, AccordionState};
pub use classify::{classify, classify_at, Classified, FlattenedErrors, SeverityChecks};
pub use discoverable::{AddedField, DiscoverableFields, FieldDefinition};
pub use error::{CoreError, CoreResult};
pub use feedback::Feedback;
pub use form::{FormSnapshot, FormState};
pub use message::{ErrorMessage, FieldErrors, MessageItem};
pub use node::{ErrorNode, SeverityCheck};
pub use path::{get_in, set_in, FieldPath, PathSegment, MAX_INDEX_GAP};
pub use select::{SelectField, SelectOption, SelectOptions};
pub use text::TextField;
