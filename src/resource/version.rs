//! Version tokens for optimistic concurrency control.
//!
//! Every stored book carries a [`BookVersion`] that starts at zero and is
//! bumped by exactly one on each successful write. Writers state the version
//! they last saw; the store only commits when it still matches, otherwise the
//! write comes back as a [`ConditionalResult::VersionMismatch`].
//!
//! Versions are exposed over the wire both as the plain `version` number of
//! the book representation and as a weak ETag (`W/"3"`).
//!
//! ```rust
//! use book_server::resource::version::BookVersion;
//!
//! let version = BookVersion::initial().next();
//! assert_eq!(version.to_etag(), "W/\"1\"");
//! assert!(version > BookVersion::initial());
//! ```

use serde::{Deserialize, Serialize};
use std::fmt;

/// Message reported to callers that lost an optimistic-concurrency race.
pub const CONFLICT_MESSAGE: &str =
    "The record has been updated by another user; please reload it and resubmit your changes";

/// A monotonically increasing version number.
#[derive(
    Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Default, Serialize, Deserialize,
)]
#[serde(transparent)]
pub struct BookVersion(u64);

impl BookVersion {
    pub fn new(value: u64) -> Self {
        Self(value)
    }

    /// Version of a freshly created record.
    pub fn initial() -> Self {
        Self(0)
    }

    pub fn next(self) -> Self {
        Self(self.0.saturating_add(1))
    }

    pub fn value(self) -> u64 {
        self.0
    }

    /// Render as a weak ETag header value.
    pub fn to_etag(self) -> String {
        format!("W/\"{}\"", self.0)
    }
}

impl fmt::Display for BookVersion {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// Outcome of a conditional (compare-and-swap) write.
#[derive(Debug, Clone, PartialEq)]
pub enum ConditionalResult<T> {
    /// The write was committed
    Success(T),

    /// The stored version moved on since the caller read it
    VersionMismatch(VersionConflict),

    /// No record exists under the identifier
    NotFound,
}

impl<T> ConditionalResult<T> {
    pub fn is_success(&self) -> bool {
        matches!(self, ConditionalResult::Success(_))
    }

    pub fn is_not_found(&self) -> bool {
        matches!(self, ConditionalResult::NotFound)
    }

    pub fn into_success(self) -> Option<T> {
        match self {
            ConditionalResult::Success(value) => Some(value),
            _ => None,
        }
    }
}

/// Details of a lost optimistic-concurrency race.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct VersionConflict {
    /// Version the writer based its change on
    pub expected: BookVersion,

    /// Version currently stored
    pub current: BookVersion,

    pub message: String,
}

impl VersionConflict {
    pub fn new(expected: BookVersion, current: BookVersion) -> Self {
        Self {
            expected,
            current,
            message: CONFLICT_MESSAGE.to_string(),
        }
    }
}
