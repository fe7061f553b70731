//! Book operations exposed by the server.
//!
//! Each method takes the request pieces as they arrive (path segment, query
//! values, body bytes, declared media type), decodes them and delegates to the
//! provider. Media type checks and body parsing happen here, so a request that
//! fails either never reaches the provider.

use super::core::BookServer;
use crate::error::{BookError, BookResult};
use crate::patch::{PatchDocument, PatchKind, parser::media_type_essence};
use crate::providers::{BookProvider, UpsertOutcome};
use crate::resource::{Book, BookId, MappedModel, Page, RequestContext, model_from_tree};
use log::debug;
use serde_json::Value;

/// Media type accepted for whole-book bodies.
pub const JSON_MEDIA_TYPE: &str = "application/json";

/// Reported when a request declares no media type at all.
const DEFAULT_MEDIA_TYPE: &str = "application/octet-stream";

/// Message returned for bodies that are not JSON.
pub const MALFORMED_JSON_MESSAGE: &str = "Malformed JSON request";

impl<P: BookProvider> BookServer<P> {
    pub async fn get_book(&self, id: &str, context: &RequestContext) -> BookResult<Book> {
        let id: BookId = id.parse()?;
        self.provider.get_book(id, context).await
    }

    pub async fn search_book(
        &self,
        title: &str,
        author: Option<&str>,
        context: &RequestContext,
    ) -> BookResult<Book> {
        self.provider.find_book(title, author, context).await
    }

    pub async fn list_books(&self, context: &RequestContext) -> BookResult<Vec<Book>> {
        self.provider.list_books(context).await
    }

    pub async fn list_page(
        &self,
        page: Option<usize>,
        size: Option<usize>,
        sort: Option<&str>,
        context: &RequestContext,
    ) -> BookResult<Page<Book>> {
        let request = self.page_request(page, size, sort)?;
        self.provider.list_page(&request, context).await
    }

    /// Create a book from an `application/json` body.
    pub async fn create_book(
        &self,
        content_type: Option<&str>,
        body: &[u8],
        context: &RequestContext,
    ) -> BookResult<Book> {
        let model = self.decode_book_body(content_type, body, context)?;
        self.provider.create_book(model, context).await
    }

    /// Replace or create the book under `id` from an `application/json` body.
    pub async fn replace_book(
        &self,
        id: &str,
        content_type: Option<&str>,
        body: &[u8],
        context: &RequestContext,
    ) -> BookResult<UpsertOutcome> {
        let id: BookId = id.parse()?;
        let model = self.decode_book_body(content_type, body, context)?;
        self.provider.replace_book(id, model, context).await
    }

    /// Apply an `application/merge-patch+json` body.
    pub async fn merge_book(
        &self,
        id: &str,
        content_type: Option<&str>,
        body: &[u8],
        context: &RequestContext,
    ) -> BookResult<Book> {
        self.apply_patch_body(PatchKind::MergePatch, id, content_type, body, context)
            .await
    }

    /// Apply an `application/json-patch+json` body.
    pub async fn patch_book(
        &self,
        id: &str,
        content_type: Option<&str>,
        body: &[u8],
        context: &RequestContext,
    ) -> BookResult<Book> {
        self.apply_patch_body(PatchKind::JsonPatch, id, content_type, body, context)
            .await
    }

    pub async fn delete_book(&self, id: &str, context: &RequestContext) -> BookResult<()> {
        let id: BookId = id.parse()?;
        self.provider.delete_book(id, context).await
    }

    async fn apply_patch_body(
        &self,
        kind: PatchKind,
        id: &str,
        content_type: Option<&str>,
        body: &[u8],
        context: &RequestContext,
    ) -> BookResult<Book> {
        let declared = content_type.unwrap_or(DEFAULT_MEDIA_TYPE);
        if PatchKind::from_content_type(declared) != Some(kind) {
            return Err(BookError::unsupported_media_type(
                media_type_essence(declared),
                &[kind.media_type()],
            ));
        }

        let id: BookId = id.parse()?;
        let document = PatchDocument::parse(kind, body)?;
        debug!(
            "Decoded {} body for book {} (request: '{}')",
            kind.media_type(),
            id,
            context.request_id
        );
        self.provider.apply_patch(id, &document, context).await
    }

    fn decode_book_body(
        &self,
        content_type: Option<&str>,
        body: &[u8],
        context: &RequestContext,
    ) -> BookResult<MappedModel> {
        let declared = content_type.unwrap_or(DEFAULT_MEDIA_TYPE);
        let essence = media_type_essence(declared);
        if !essence.eq_ignore_ascii_case(JSON_MEDIA_TYPE) {
            return Err(BookError::unsupported_media_type(essence, &[JSON_MEDIA_TYPE]));
        }

        let tree: Value = serde_json::from_slice(body).map_err(|e| {
            debug!(
                "Rejected book body: {} (request: '{}')",
                e, context.request_id
            );
            BookError::malformed_request(MALFORMED_JSON_MESSAGE)
        })?;
        Ok(model_from_tree(&tree))
    }
}
