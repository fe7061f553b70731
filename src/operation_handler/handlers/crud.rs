//! CRUD operation handlers

use super::{book_response, require_id};
use crate::{
    error::BookResult,
    operation_handler::core::{
        BookOperationHandler, BookOperationRequest, BookOperationResponse, OperationMetadata,
    },
    providers::BookProvider,
    resource::RequestContext,
};

/// Handle get operations.
pub async fn handle_get<P: BookProvider + Sync>(
    handler: &BookOperationHandler<P>,
    request: BookOperationRequest,
    context: &RequestContext,
) -> BookResult<BookOperationResponse> {
    let id = require_id(request.resource_id, "get")?;
    let book = handler.server().get_book(&id, context).await?;
    Ok(book_response(handler, 200, &book, context))
}

/// Handle create operations.
pub async fn handle_create<P: BookProvider + Sync>(
    handler: &BookOperationHandler<P>,
    request: BookOperationRequest,
    context: &RequestContext,
) -> BookResult<BookOperationResponse> {
    let body = request.body.unwrap_or_default();
    let book = handler
        .server()
        .create_book(request.content_type.as_deref(), body.as_bytes(), context)
        .await?;
    Ok(book_response(handler, 201, &book, context))
}

/// Handle replace operations. Answers 201 when the book had to be created.
pub async fn handle_replace<P: BookProvider + Sync>(
    handler: &BookOperationHandler<P>,
    request: BookOperationRequest,
    context: &RequestContext,
) -> BookResult<BookOperationResponse> {
    let id = require_id(request.resource_id, "replace")?;
    let body = request.body.unwrap_or_default();
    let outcome = handler
        .server()
        .replace_book(
            &id,
            request.content_type.as_deref(),
            body.as_bytes(),
            context,
        )
        .await?;
    Ok(book_response(handler, outcome.status(), outcome.book(), context))
}

/// Handle delete operations.
pub async fn handle_delete<P: BookProvider + Sync>(
    handler: &BookOperationHandler<P>,
    request: BookOperationRequest,
    context: &RequestContext,
) -> BookResult<BookOperationResponse> {
    let id = require_id(request.resource_id, "delete")?;
    handler.server().delete_book(&id, context).await?;

    Ok(BookOperationResponse {
        status: 204,
        success: true,
        data: None,
        error: None,
        error_code: None,
        metadata: OperationMetadata {
            request_id: context.request_id.clone(),
            resource_id: Some(id),
            ..OperationMetadata::default()
        },
    })
}
