//! Partial-update documents and the engines that apply them.
//!
//! Two document formats are supported:
//!
//! - [`JsonPatch`] - RFC 6902 ordered operation sequences
//!   (`application/json-patch+json`)
//! - [`MergePatch`] - RFC 7396 recursive structural merges
//!   (`application/merge-patch+json`)
//!
//! Both engines are pure functions over [`serde_json::Value`]: they never
//! mutate the caller's document and hold no shared state, so requests can apply
//! them concurrently without coordination.
//!
//! # Example
//!
//! ```rust
//! use book_server::patch::{PatchDocument, PatchKind};
//! use serde_json::json;
//!
//! let target = json!({"pages": 100, "title": "X"});
//! let document = PatchDocument::parse(
//!     PatchKind::JsonPatch,
//!     br#"[{"op":"replace","path":"/pages","value":250}]"#,
//! ).unwrap();
//!
//! let patched = document.apply(&target).unwrap();
//! assert_eq!(patched, json!({"pages": 250, "title": "X"}));
//! ```

pub mod json_patch;
pub mod merge;
pub mod parser;
pub mod pointer;

pub use json_patch::{JsonPatch, PatchOperation};
pub use merge::MergePatch;
pub use parser::{PatchDocument, PatchKind};
pub use pointer::JsonPointer;

/// Failures raised while parsing or applying a patch document.
///
/// Every variant is detected before anything is written to storage.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum PatchError {
    /// The document is not structurally valid
    #[error("Malformed patch document: {message}")]
    Malformed { message: String },

    /// A `path` or `from` location does not resolve in the target
    #[error("Patch target '{path}' does not exist")]
    TargetMissing { path: String },

    /// An array index lies beyond the end of the array
    #[error("Array index at '{path}' is out of range (array length {length})")]
    IndexOutOfRange { path: String, length: usize },

    /// A move whose destination lies inside its source
    #[error("Cannot move '{from}' into its own descendant '{path}'")]
    InvalidMove { from: String, path: String },

    /// A `test` operation did not match
    #[error("Test operation failed at '{path}'")]
    TestFailed { path: String },
}

impl PatchError {
    pub fn malformed(message: impl Into<String>) -> Self {
        Self::Malformed {
            message: message.into(),
        }
    }

    pub(crate) fn target_missing(path: &JsonPointer) -> Self {
        Self::TargetMissing {
            path: path.to_string(),
        }
    }
}

pub type PatchResult<T> = Result<T, PatchError>;
