//! The book provider trait.
//!
//! A provider owns the business rules of the book service: how a write is
//! validated, how partial updates are merged into the current record, whether
//! a full replacement creates or updates, and how a lost concurrency race is
//! reported. Transport concerns stay in the operation handler.

use crate::error::BookResult;
use crate::patch::{JsonPatch, MergePatch, PatchDocument};
use crate::resource::{Book, BookId, MappedModel, Page, PageRequest, RequestContext};
use std::future::Future;

/// Result of a full replacement.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum UpsertOutcome {
    /// No book existed under the requested id; a new one was created
    Created(Book),
    /// The existing book was overwritten
    Updated(Book),
}

impl UpsertOutcome {
    pub fn is_created(&self) -> bool {
        matches!(self, UpsertOutcome::Created(_))
    }

    /// HTTP status matching the outcome.
    pub fn status(&self) -> u16 {
        match self {
            UpsertOutcome::Created(_) => 201,
            UpsertOutcome::Updated(_) => 200,
        }
    }

    pub fn book(&self) -> &Book {
        match self {
            UpsertOutcome::Created(book) | UpsertOutcome::Updated(book) => book,
        }
    }

    pub fn into_book(self) -> Book {
        match self {
            UpsertOutcome::Created(book) | UpsertOutcome::Updated(book) => book,
        }
    }
}

/// Book operations with create/update, partial update and concurrency rules.
pub trait BookProvider {
    /// Get a book by id.
    fn get_book(
        &self,
        id: BookId,
        context: &RequestContext,
    ) -> impl Future<Output = BookResult<Book>> + Send;

    /// Find a book by exact title, and exact author when given.
    fn find_book(
        &self,
        title: &str,
        author: Option<&str>,
        context: &RequestContext,
    ) -> impl Future<Output = BookResult<Book>> + Send;

    /// All books ordered by title.
    ///
    /// Fails with `NoResourceFound` when there are none.
    fn list_books(
        &self,
        context: &RequestContext,
    ) -> impl Future<Output = BookResult<Vec<Book>>> + Send;

    /// One page of books.
    ///
    /// Fails with `NoResourceFound` when the page is empty.
    fn list_page(
        &self,
        request: &PageRequest,
        context: &RequestContext,
    ) -> impl Future<Output = BookResult<Page<Book>>> + Send;

    /// Create a book from a bound model. Any id or version in the model is
    /// ignored.
    fn create_book(
        &self,
        model: MappedModel,
        context: &RequestContext,
    ) -> impl Future<Output = BookResult<Book>> + Send;

    /// Replace the book under `id`, or create a new one if there is none.
    ///
    /// The model must carry the version the caller last saw.
    fn replace_book(
        &self,
        id: BookId,
        model: MappedModel,
        context: &RequestContext,
    ) -> impl Future<Output = BookResult<UpsertOutcome>> + Send;

    /// Apply a partial update of either format to an existing book.
    fn apply_patch(
        &self,
        id: BookId,
        document: &PatchDocument,
        context: &RequestContext,
    ) -> impl Future<Output = BookResult<Book>> + Send;

    /// Apply an RFC 7396 merge patch to an existing book.
    fn merge_book(
        &self,
        id: BookId,
        patch: &MergePatch,
        context: &RequestContext,
    ) -> impl Future<Output = BookResult<Book>> + Send;

    /// Apply an RFC 6902 JSON Patch to an existing book.
    fn patch_book(
        &self,
        id: BookId,
        patch: &JsonPatch,
        context: &RequestContext,
    ) -> impl Future<Output = BookResult<Book>> + Send;

    /// Delete a book. Fails with `ResourceNotFound` if it does not exist.
    fn delete_book(
        &self,
        id: BookId,
        context: &RequestContext,
    ) -> impl Future<Output = BookResult<()>> + Send;
}
