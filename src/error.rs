//! Error types for book server operations.
//!
//! [`BookError`] is the single tagged error every service operation returns.
//! The operation handler translates each variant into a status code and a
//! structured error payload in one place
//! ([`create_error_response`](crate::operation_handler::create_error_response)).

use crate::patch::PatchError;
use crate::resource::book::{BookId, BookIdError};
use crate::resource::page::PageError;
use crate::resource::version::{BookVersion, CONFLICT_MESSAGE};
use crate::storage::StorageError;
use crate::validation::ViolationSet;

/// Main error type for book operations.
#[derive(Debug, thiserror::Error)]
pub enum BookError {
    /// The patch document was malformed or could not be applied
    #[error("{0}")]
    Patch(#[from] PatchError),

    /// The reconstructed book violates one or more constraints
    #[error("Validation failed: {0}")]
    ValidationFailed(ViolationSet),

    /// A lookup by id or title found nothing
    #[error("{description}")]
    ResourceNotFound { description: String },

    /// A listing found no books at all
    #[error("No book found")]
    NoResourceFound,

    /// The stored version moved on since the caller read it
    #[error("{}", CONFLICT_MESSAGE)]
    OptimisticConflict {
        id: BookId,
        expected: BookVersion,
        /// `None` when the record vanished before the write was committed
        current: Option<BookVersion>,
    },

    /// The request body was declared with a media type this operation rejects
    #[error("{content_type} media type is not supported. Supported media types are {}", .supported.join(", "))]
    UnsupportedMediaType {
        content_type: String,
        supported: Vec<&'static str>,
    },

    /// The request itself could not be understood
    #[error("{message}")]
    MalformedRequest { message: String },

    /// The storage backend failed
    #[error("Storage error: {message}")]
    Storage { message: String },

    #[error("Internal server error: {message}")]
    Internal { message: String },
}

/// Errors that can occur while building a server.
///
/// Only configuration can be wrong; the provider is supplied up front.
#[derive(Debug, thiserror::Error)]
pub enum BuildError {
    #[error("Invalid configuration: {message}")]
    InvalidConfiguration { message: String },
}

impl BookError {
    pub fn not_found_by_id(id: BookId) -> Self {
        Self::ResourceNotFound {
            description: format!("Book with id {id} not found"),
        }
    }

    pub fn not_found_by_title(title: &str, author: Option<&str>) -> Self {
        let description = match author {
            Some(author) => format!("Book with title {title} and author {author} not found"),
            None => format!("Book with title {title} not found"),
        };
        Self::ResourceNotFound { description }
    }

    pub fn unsupported_media_type(content_type: impl Into<String>, supported: &[&'static str]) -> Self {
        Self::UnsupportedMediaType {
            content_type: content_type.into(),
            supported: supported.to_vec(),
        }
    }

    pub fn malformed_request(message: impl Into<String>) -> Self {
        Self::MalformedRequest {
            message: message.into(),
        }
    }

    pub fn internal(message: impl Into<String>) -> Self {
        Self::Internal {
            message: message.into(),
        }
    }

    /// True when a caller could succeed by re-reading the book and retrying.
    pub fn is_conflict(&self) -> bool {
        matches!(
            self,
            Self::OptimisticConflict { .. } | Self::Patch(PatchError::TestFailed { .. })
        )
    }
}

impl From<StorageError> for BookError {
    fn from(error: StorageError) -> Self {
        Self::Storage {
            message: error.to_string(),
        }
    }
}

impl From<BookIdError> for BookError {
    fn from(error: BookIdError) -> Self {
        Self::malformed_request(error.to_string())
    }
}

impl From<PageError> for BookError {
    fn from(error: PageError) -> Self {
        Self::malformed_request(error.to_string())
    }
}

pub type BookResult<T> = Result<T, BookError>;
pub type BuildResult<T> = Result<T, BuildError>;
