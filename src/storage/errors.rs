//! Storage-specific error types.

/// Errors that can occur during storage operations.
///
/// Version conflicts are not errors at this level; they are reported through
/// [`ConditionalResult`](crate::resource::ConditionalResult).
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum StorageError {
    /// No further ids can be assigned
    #[error("Book id space exhausted")]
    IdExhausted,

    /// The backend could not serve the request
    #[error("Storage unavailable: {message}")]
    Unavailable { message: String },
}

impl StorageError {
    pub fn unavailable(message: impl Into<String>) -> Self {
        Self::Unavailable {
            message: message.into(),
        }
    }
}
