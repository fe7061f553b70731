//! Storage abstraction layer for books.
//!
//! The `StorageProvider` trait covers record keeping only: it assigns ids,
//! stamps audit timestamps and enforces the version check on writes. It knows
//! nothing about patch documents, validation or HTTP semantics, which all live
//! in the provider layer above it.
//!
//! # Optimistic concurrency
//!
//! Every update goes through [`StorageProvider::compare_and_swap`]. The write
//! is committed only when the stored version still equals the version the
//! caller based its change on; the version is then bumped by one. There is no
//! lock held across the read-modify-write cycle of a request, so conflicting
//! writers are detected at commit time rather than serialised up front.
//!
//! # Example Usage
//!
//! ```rust
//! use book_server::storage::{InMemoryStorage, StorageProvider};
//! use book_server::resource::{BookFields, BookVersion, ConditionalResult};
//! use chrono::{NaiveDate, Utc};
//!
//! # async fn example() -> Result<(), Box<dyn std::error::Error>> {
//! let storage = InMemoryStorage::new();
//! let fields = BookFields {
//!     title: "Dune".to_string(),
//!     author: "Frank Herbert".to_string(),
//!     publication_date: NaiveDate::from_ymd_opt(1965, 8, 1).unwrap(),
//!     publisher: "Chilton".to_string(),
//!     isbn: None,
//!     format: None,
//!     pages: Some(412),
//! };
//!
//! let now = Utc::now().naive_utc();
//! let book = storage.insert(fields.clone(), now).await?;
//! assert_eq!(book.version, BookVersion::initial());
//!
//! let updated = storage
//!     .compare_and_swap(book.id, book.version, fields, now)
//!     .await?;
//! assert!(matches!(updated, ConditionalResult::Success(_)));
//! # Ok(())
//! # }
//! ```

pub mod errors;
pub mod in_memory;


pub use errors::StorageError;
pub use in_memory::InMemoryStorage;

use crate::resource::book::{Book, BookFields, BookId};
use crate::resource::version::{BookVersion, ConditionalResult};
use chrono::NaiveDateTime;
use std::future::Future;

/// Persistence backend for books.
pub trait StorageProvider: Send + Sync {
    /// The error type returned by storage operations.
    type Error: std::error::Error + Send + Sync + 'static;

    /// Store a new book and return it.
    ///
    /// The store assigns the id, sets the initial version and uses `at` for
    /// both audit timestamps.
    fn insert(
        &self,
        fields: BookFields,
        at: NaiveDateTime,
    ) -> impl Future<Output = Result<Book, Self::Error>> + Send;

    /// Retrieve a book by id.
    fn get(&self, id: BookId) -> impl Future<Output = Result<Option<Book>, Self::Error>> + Send;

    /// Replace the fields of a book if its stored version equals `expected`.
    ///
    /// On success the version is bumped, `updated_date` is set to `at` and the
    /// stored book is returned. `created_date` is never touched.
    fn compare_and_swap(
        &self,
        id: BookId,
        expected: BookVersion,
        fields: BookFields,
        at: NaiveDateTime,
    ) -> impl Future<Output = Result<ConditionalResult<Book>, Self::Error>> + Send;

    /// Delete a book.
    ///
    /// Returns `true` if the book existed.
    fn delete(&self, id: BookId) -> impl Future<Output = Result<bool, Self::Error>> + Send;

    /// List books in id order, skipping `offset` and returning at most `limit`.
    fn list(
        &self,
        offset: usize,
        limit: usize,
    ) -> impl Future<Output = Result<Vec<Book>, Self::Error>> + Send;

    /// All books in id order.
    fn list_all(&self) -> impl Future<Output = Result<Vec<Book>, Self::Error>> + Send;

    /// The first book (lowest id) with exactly this title, and this author
    /// when one is given.
    fn find_by_title(
        &self,
        title: &str,
        author: Option<&str>,
    ) -> impl Future<Output = Result<Option<Book>, Self::Error>> + Send;

    fn count(&self) -> impl Future<Output = Result<usize, Self::Error>> + Send;

    /// Remove every book. Id assignment is not reset.
    fn clear(&self) -> impl Future<Output = Result<(), Self::Error>> + Send;
}
