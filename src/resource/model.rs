//! Unvalidated write model of a book.

use super::book::{Book, BookFormat};
use chrono::NaiveDate;

/// The writable fields of a book as submitted or reconstructed from a patched
/// tree.
///
/// Every field is optional because nothing has been validated yet; missing
/// required fields are reported by the validator rather than here. Numeric
/// fields are wider than their stored form so that out-of-range input reaches
/// the validator instead of failing to bind.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct BookModel {
    pub title: Option<String>,
    pub author: Option<String>,
    pub publication_date: Option<NaiveDate>,
    pub publisher: Option<String>,
    pub isbn: Option<String>,
    pub format: Option<BookFormat>,
    pub pages: Option<i64>,
    pub version: Option<u64>,
}

impl From<&Book> for BookModel {
    fn from(book: &Book) -> Self {
        Self {
            title: Some(book.fields.title.clone()),
            author: Some(book.fields.author.clone()),
            publication_date: Some(book.fields.publication_date),
            publisher: Some(book.fields.publisher.clone()),
            isbn: book.fields.isbn.clone(),
            format: book.fields.format,
            pages: book.fields.pages.map(i64::from),
            version: Some(book.version.value()),
        }
    }
}
