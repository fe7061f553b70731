//! Operation handler modules
//!
//! - CRUD operations (get, create, replace, delete)
//! - Query operations (search, list all, paged list)
//! - Partial updates (merge patch, JSON Patch)

pub mod crud;
pub mod patch;
pub mod query;

use crate::{
    error::{BookError, BookResult},
    operation_handler::core::{BookOperationHandler, BookOperationResponse, OperationMetadata},
    providers::BookProvider,
    resource::{Book, RequestContext},
};

/// Build a successful response carrying a single book.
pub(super) fn book_response<P: BookProvider + Sync>(
    handler: &BookOperationHandler<P>,
    status: u16,
    book: &Book,
    context: &RequestContext,
) -> BookOperationResponse {
    BookOperationResponse {
        status,
        success: true,
        data: Some(handler.server().render(book)),
        error: None,
        error_code: None,
        metadata: OperationMetadata {
            request_id: context.request_id.clone(),
            resource_id: Some(book.id.to_string()),
            version: Some(book.version.value()),
            etag: Some(book.etag()),
            location: Some(handler.server().config().location_for(book.id)),
            resource_count: Some(1),
            total_results: None,
        },
    }
}

/// The path id of a request, or a malformed-request error naming the operation.
pub(super) fn require_id(resource_id: Option<String>, operation: &str) -> BookResult<String> {
    resource_id.ok_or_else(|| {
        BookError::malformed_request(format!("Missing resource_id for {} operation", operation))
    })
}
