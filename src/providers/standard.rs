//! Standard book provider with pluggable storage.
//!
//! Every write follows the same path: bind the incoming representation to a
//! [`BookModel`](crate::resource::BookModel), validate it, then commit through
//! the storage compare-and-swap. Partial updates first project the current
//! record to its JSON tree and run the patch engine over it, so a patch can
//! only ever produce a value that a full replacement could also have produced.
//!
//! Nothing reaches storage before parsing, patching and validation have all
//! succeeded.
//!
//! # Example Usage
//!
//! ```rust
//! use book_server::providers::{BookProvider, StandardBookProvider};
//! use book_server::resource::{RequestContext, model_from_tree};
//! use book_server::storage::InMemoryStorage;
//! use serde_json::json;
//!
//! # async fn example() -> Result<(), Box<dyn std::error::Error>> {
//! let provider = StandardBookProvider::new(InMemoryStorage::new());
//! let context = RequestContext::with_generated_id();
//!
//! let body = json!({
//!     "title": "Dune",
//!     "author": "Frank Herbert",
//!     "publicationDate": "01/08/1965",
//!     "publisher": "Chilton"
//! });
//! let book = provider.create_book(model_from_tree(&body), &context).await?;
//! assert_eq!(book.title(), "Dune");
//! # Ok(())
//! # }
//! ```

use super::provider::{BookProvider, UpsertOutcome};
use crate::error::{BookError, BookResult};
use crate::patch::{JsonPatch, MergePatch, PatchDocument, PatchResult};
use crate::resource::version::VersionConflict;
use crate::resource::{
    Book, BookId, BookVersion, ConditionalResult, MappedModel, Page, PageRequest, RequestContext,
    book_to_tree, model_from_tree,
};
use crate::storage::StorageProvider;
use crate::validation::{BookValidator, ValidatedBook, ValidationMode};
use chrono::{NaiveDate, NaiveDateTime, Utc};
use log::{debug, info, trace, warn};
use serde_json::Value;

/// Book provider with a pluggable storage backend.
#[derive(Debug, Clone)]
pub struct StandardBookProvider<S: StorageProvider> {
    storage: S,
    // Fixed "today" for date validation; the current UTC date when unset.
    today: Option<NaiveDate>,
}

impl<S: StorageProvider> StandardBookProvider<S> {
    pub fn new(storage: S) -> Self {
        Self {
            storage,
            today: None,
        }
    }

    /// Validate publication dates against a fixed day instead of the clock.
    pub fn with_fixed_today(mut self, today: NaiveDate) -> Self {
        self.today = Some(today);
        self
    }

    pub fn storage(&self) -> &S {
        &self.storage
    }

    fn validator(&self) -> BookValidator {
        self.today
            .map_or_else(BookValidator::new, BookValidator::with_today)
    }

    fn now() -> NaiveDateTime {
        Utc::now().naive_utc()
    }

    async fn load(&self, id: BookId) -> BookResult<Book> {
        self.storage
            .get(id)
            .await
            .map_err(|e| storage_error("read", e))?
            .ok_or_else(|| BookError::not_found_by_id(id))
    }

    /// Commit validated fields if the stored version still equals `expected`.
    async fn commit(
        &self,
        id: BookId,
        expected: BookVersion,
        validated: ValidatedBook,
        context: &RequestContext,
    ) -> BookResult<Book> {
        let result = self
            .storage
            .compare_and_swap(id, expected, validated.fields, Self::now())
            .await
            .map_err(|e| storage_error("update", e))?;

        match result {
            ConditionalResult::Success(book) => Ok(book),
            ConditionalResult::VersionMismatch(VersionConflict {
                expected, current, ..
            }) => {
                warn!(
                    "Version conflict on book {} (expected {}, current {}) (request: '{}')",
                    id, expected, current, context.request_id
                );
                Err(BookError::OptimisticConflict {
                    id,
                    expected,
                    current: Some(current),
                })
            }
            ConditionalResult::NotFound => {
                warn!(
                    "Book {} was deleted before the update committed (request: '{}')",
                    id, context.request_id
                );
                Err(BookError::OptimisticConflict {
                    id,
                    expected,
                    current: None,
                })
            }
        }
    }

    /// Shared pipeline for both partial update formats.
    async fn update_with<F>(
        &self,
        id: BookId,
        kind: &str,
        apply: F,
        context: &RequestContext,
    ) -> BookResult<Book>
    where
        F: FnOnce(&Value) -> PatchResult<Value> + Send,
    {
        info!(
            "Applying {} to book {} (request: '{}')",
            kind, id, context.request_id
        );

        let current = self.load(id).await?;
        let tree = book_to_tree(&current);
        let patched = apply(&tree)?;
        trace!("Patched tree for book {}: {}", id, patched);

        let validated = self
            .validator()
            .validate(model_from_tree(&patched), ValidationMode::Patch)?;

        // A patch may state the version it was written against; otherwise the
        // version just loaded is assumed.
        let expected = validated.version.unwrap_or(current.version);
        let book = self.commit(id, expected, validated, context).await?;

        debug!(
            "Book {} updated by {} to version {} (request: '{}')",
            id, kind, book.version, context.request_id
        );
        Ok(book)
    }
}

fn storage_error<E: std::error::Error>(operation: &str, error: E) -> BookError {
    BookError::Storage {
        message: format!("{} failed: {}", operation, error),
    }
}

impl<S: StorageProvider> BookProvider for StandardBookProvider<S> {
    async fn get_book(&self, id: BookId, context: &RequestContext) -> BookResult<Book> {
        debug!("Getting book {} (request: '{}')", id, context.request_id);
        self.load(id).await
    }

    async fn find_book(
        &self,
        title: &str,
        author: Option<&str>,
        context: &RequestContext,
    ) -> BookResult<Book> {
        debug!(
            "Searching book by title '{}' and author {:?} (request: '{}')",
            title, author, context.request_id
        );
        self.storage
            .find_by_title(title, author)
            .await
            .map_err(|e| storage_error("search", e))?
            .ok_or_else(|| BookError::not_found_by_title(title, author))
    }

    async fn list_books(&self, context: &RequestContext) -> BookResult<Vec<Book>> {
        debug!("Listing all books (request: '{}')", context.request_id);

        let mut books = self
            .storage
            .list_all()
            .await
            .map_err(|e| storage_error("list", e))?;
        if books.is_empty() {
            return Err(BookError::NoResourceFound);
        }

        // Stable sort keeps id order among equal titles.
        books.sort_by(|a, b| a.fields.title.cmp(&b.fields.title));
        Ok(books)
    }

    async fn list_page(
        &self,
        request: &PageRequest,
        context: &RequestContext,
    ) -> BookResult<Page<Book>> {
        debug!(
            "Listing page {} (size {}, sort {:?}) (request: '{}')",
            request.page, request.size, request.sort, context.request_id
        );

        let (content, total) = match request.sort {
            None => {
                let total = self
                    .storage
                    .count()
                    .await
                    .map_err(|e| storage_error("count", e))?;
                let content = self
                    .storage
                    .list(request.offset(), request.size)
                    .await
                    .map_err(|e| storage_error("list", e))?;
                (content, total)
            }
            Some(order) => {
                let mut all = self
                    .storage
                    .list_all()
                    .await
                    .map_err(|e| storage_error("list", e))?;
                all.sort_by(|a, b| order.compare(a, b));
                let total = all.len();
                let content = all
                    .into_iter()
                    .skip(request.offset())
                    .take(request.size)
                    .collect();
                (content, total)
            }
        };

        let page = Page::new(content, request, total);
        if page.is_empty() {
            return Err(BookError::NoResourceFound);
        }
        Ok(page)
    }

    async fn create_book(&self, model: MappedModel, context: &RequestContext) -> BookResult<Book> {
        info!("Creating book (request: '{}')", context.request_id);
        trace!("Create model: {:?}", model.model);

        let validated = self.validator().validate(model, ValidationMode::Create)?;
        let book = self
            .storage
            .insert(validated.fields, Self::now())
            .await
            .map_err(|e| storage_error("create", e))?;

        debug!(
            "Created book {} (request: '{}')",
            book.id, context.request_id
        );
        Ok(book)
    }

    async fn replace_book(
        &self,
        id: BookId,
        model: MappedModel,
        context: &RequestContext,
    ) -> BookResult<UpsertOutcome> {
        info!("Replacing book {} (request: '{}')", id, context.request_id);
        trace!("Replace model: {:?}", model.model);

        let validated = self
            .validator()
            .validate(model, ValidationMode::FullReplace)?;

        let existing = self
            .storage
            .get(id)
            .await
            .map_err(|e| storage_error("read", e))?;

        match existing {
            Some(current) => {
                let expected = validated.version.unwrap_or(current.version);
                let book = self.commit(id, expected, validated, context).await?;
                debug!(
                    "Updated book {} to version {} (request: '{}')",
                    id, book.version, context.request_id
                );
                Ok(UpsertOutcome::Updated(book))
            }
            None => {
                let book = self
                    .storage
                    .insert(validated.fields, Self::now())
                    .await
                    .map_err(|e| storage_error("create", e))?;
                info!(
                    "Book {} not found; created book {} instead (request: '{}')",
                    id, book.id, context.request_id
                );
                Ok(UpsertOutcome::Created(book))
            }
        }
    }

    async fn apply_patch(
        &self,
        id: BookId,
        document: &PatchDocument,
        context: &RequestContext,
    ) -> BookResult<Book> {
        match document {
            PatchDocument::Json(patch) => self.patch_book(id, patch, context).await,
            PatchDocument::Merge(patch) => self.merge_book(id, patch, context).await,
        }
    }

    async fn merge_book(
        &self,
        id: BookId,
        patch: &MergePatch,
        context: &RequestContext,
    ) -> BookResult<Book> {
        self.update_with(id, "merge patch", |tree| Ok(patch.apply(tree)), context)
            .await
    }

    async fn patch_book(
        &self,
        id: BookId,
        patch: &JsonPatch,
        context: &RequestContext,
    ) -> BookResult<Book> {
        self.update_with(id, "JSON patch", |tree| patch.apply(tree), context)
            .await
    }

    async fn delete_book(&self, id: BookId, context: &RequestContext) -> BookResult<()> {
        info!("Deleting book {} (request: '{}')", id, context.request_id);

        let deleted = self
            .storage
            .delete(id)
            .await
            .map_err(|e| storage_error("delete", e))?;
        if !deleted {
            return Err(BookError::not_found_by_id(id));
        }
        Ok(())
    }
}
