//! Partial update handlers

use super::{book_response, require_id};
use crate::{
    error::BookResult,
    operation_handler::core::{BookOperationHandler, BookOperationRequest, BookOperationResponse},
    providers::BookProvider,
    resource::RequestContext,
};

/// Handle RFC 7396 merge patch operations.
pub async fn handle_merge<P: BookProvider + Sync>(
    handler: &BookOperationHandler<P>,
    request: BookOperationRequest,
    context: &RequestContext,
) -> BookResult<BookOperationResponse> {
    let id = require_id(request.resource_id, "merge")?;
    let body = request.body.unwrap_or_default();
    let book = handler
        .server()
        .merge_book(
            &id,
            request.content_type.as_deref(),
            body.as_bytes(),
            context,
        )
        .await?;
    Ok(book_response(handler, 200, &book, context))
}

/// Handle RFC 6902 JSON Patch operations.
pub async fn handle_patch<P: BookProvider + Sync>(
    handler: &BookOperationHandler<P>,
    request: BookOperationRequest,
    context: &RequestContext,
) -> BookResult<BookOperationResponse> {
    let id = require_id(request.resource_id, "patch")?;
    let body = request.body.unwrap_or_default();
    let book = handler
        .server()
        .patch_book(
            &id,
            request.content_type.as_deref(),
            body.as_bytes(),
            context,
        )
        .await?;
    Ok(book_response(handler, 200, &book, context))
}
