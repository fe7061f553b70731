//! Query operation handlers

use crate::{
    error::{BookError, BookResult},
    operation_handler::core::{
        BookOperationHandler, BookOperationRequest, BookOperationResponse, BookQuery,
        OperationMetadata,
    },
    providers::BookProvider,
    resource::RequestContext,
};
use serde_json::Value;

/// Handle search by title, and author when given.
pub async fn handle_search<P: BookProvider + Sync>(
    handler: &BookOperationHandler<P>,
    request: BookOperationRequest,
    context: &RequestContext,
) -> BookResult<BookOperationResponse> {
    let query = request.query.unwrap_or_default();
    let title = query.title.ok_or_else(|| {
        BookError::malformed_request("Missing title for search operation")
    })?;

    let book = handler
        .server()
        .search_book(&title, query.author.as_deref(), context)
        .await?;
    Ok(super::book_response(handler, 200, &book, context))
}

/// Handle listing every book ordered by title.
pub async fn handle_list_all<P: BookProvider + Sync>(
    handler: &BookOperationHandler<P>,
    _request: BookOperationRequest,
    context: &RequestContext,
) -> BookResult<BookOperationResponse> {
    let books = handler.server().list_books(context).await?;
    let count = books.len();
    let data: Vec<Value> = books
        .iter()
        .map(|book| handler.server().render(book))
        .collect();

    Ok(list_response(Value::Array(data), count, count, context))
}

/// Handle paged listing.
pub async fn handle_list_page<P: BookProvider + Sync>(
    handler: &BookOperationHandler<P>,
    request: BookOperationRequest,
    context: &RequestContext,
) -> BookResult<BookOperationResponse> {
    let BookQuery {
        page, size, sort, ..
    } = request.query.unwrap_or_default();

    let page = handler
        .server()
        .list_page(page, size, sort.as_deref(), context)
        .await?
        .map(|book| handler.server().render(&book));

    let (count, total) = (page.number_of_elements, page.total_elements);
    let data = serde_json::to_value(&page)
        .map_err(|e| BookError::internal(format!("Failed to serialize page: {}", e)))?;

    Ok(list_response(data, count, total, context))
}

fn list_response(
    data: Value,
    count: usize,
    total: usize,
    context: &RequestContext,
) -> BookOperationResponse {
    BookOperationResponse {
        status: 200,
        success: true,
        data: Some(data),
        error: None,
        error_code: None,
        metadata: OperationMetadata {
            request_id: context.request_id.clone(),
            resource_count: Some(count),
            total_results: Some(total),
            ..OperationMetadata::default()
        },
    }
}
