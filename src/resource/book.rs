//! The persisted book entity and its value objects.

use super::version::BookVersion;
use chrono::{NaiveDate, NaiveDateTime};
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

/// Wire pattern for `publicationDate` (`dd/MM/yyyy`).
pub const DATE_FORMAT: &str = "%d/%m/%Y";

/// Wire pattern for the audit timestamps (`dd/MM/yyyy hh:mm:ss a`).
pub const TIMESTAMP_FORMAT: &str = "%d/%m/%Y %I:%M:%S %p";

/// Store-assigned book identifier. Always at least 1.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct BookId(u64);

impl BookId {
    /// Wrap a raw identifier, rejecting zero.
    pub fn new(value: u64) -> Option<Self> {
        (value >= 1).then_some(Self(value))
    }

    pub fn value(self) -> u64 {
        self.0
    }
}

impl fmt::Display for BookId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum BookIdError {
    #[error("id should be a positive integer, got '{0}'")]
    NotANumber(String),

    #[error("id must be greater than or equal to 1")]
    Zero,
}

impl FromStr for BookId {
    type Err = BookIdError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let value: u64 = s
            .trim()
            .parse()
            .map_err(|_| BookIdError::NotANumber(s.to_string()))?;
        Self::new(value).ok_or(BookIdError::Zero)
    }
}

/// Publication format of a book.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum BookFormat {
    Paperback,
    Hardback,
    Digital,
    Audio,
}

impl BookFormat {
    pub const ALL: [BookFormat; 4] = [
        BookFormat::Paperback,
        BookFormat::Hardback,
        BookFormat::Digital,
        BookFormat::Audio,
    ];

    pub fn label(self) -> &'static str {
        match self {
            Self::Paperback => "Paperback",
            Self::Hardback => "Hardback",
            Self::Digital => "Digital",
            Self::Audio => "Audio",
        }
    }

    /// Look up a format by its exact label.
    pub fn from_label(label: &str) -> Option<Self> {
        Self::ALL.into_iter().find(|format| format.label() == label)
    }
}

impl fmt::Display for BookFormat {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.label())
    }
}

/// The writable, already validated fields of a book.
///
/// Values of this type only come out of the validator, so every invariant of
/// the field constraints holds.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct BookFields {
    pub title: String,
    pub author: String,
    pub publication_date: NaiveDate,
    pub publisher: String,
    pub isbn: Option<String>,
    pub format: Option<BookFormat>,
    pub pages: Option<u32>,
}

/// A stored book.
///
/// `id`, `created_date` and `updated_date` are owned by the store; callers can
/// read them but never set them.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Book {
    pub id: BookId,
    pub fields: BookFields,
    pub version: BookVersion,
    pub created_date: NaiveDateTime,
    pub updated_date: NaiveDateTime,
}

impl Book {
    pub fn title(&self) -> &str {
        &self.fields.title
    }

    pub fn author(&self) -> &str {
        &self.fields.author
    }

    /// Weak ETag for the current version.
    pub fn etag(&self) -> String {
        self.version.to_etag()
    }
}
