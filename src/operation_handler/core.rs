//! Core operation handler infrastructure
//!
//! This module contains the request and response types and the dispatcher
//! that routes each request to its handler.

use crate::{BookServer, providers::BookProvider, resource::RequestContext};
use log::{debug, info, warn};
use serde::{Deserialize, Serialize};
use serde_json::Value;

/// Framework-agnostic operation handler for book operations
///
/// The handler performs book operations without being tied to a transport
/// layer. Every outcome, success or failure, becomes a
/// [`BookOperationResponse`] carrying the status code a transport should use.
pub struct BookOperationHandler<P: BookProvider> {
    pub(super) server: BookServer<P>,
}

/// Structured request for book operations
#[derive(Debug, Clone, PartialEq)]
pub struct BookOperationRequest {
    /// The type of operation to perform
    pub operation: BookOperationType,
    /// Book id taken from the request path
    pub resource_id: Option<String>,
    /// Raw request body
    pub body: Option<String>,
    /// Declared media type of the body
    pub content_type: Option<String>,
    /// Query parameters for search and listing operations
    pub query: Option<BookQuery>,
    /// Request ID for tracing and correlation
    pub request_id: Option<String>,
}

/// Book operations supported by the handler
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum BookOperationType {
    /// `GET /books/{id}`
    Get,
    /// `GET /books/search?title&author`
    Search,
    /// `GET /books/`, every book ordered by title
    ListAll,
    /// `GET /books?page&size&sort`
    ListPage,
    /// `POST /books/`
    Create,
    /// `PUT /books/{id}`, replace or create
    Replace,
    /// `PATCH /books/merge/{id}`
    Merge,
    /// `PATCH /books/patch/{id}`
    Patch,
    /// `DELETE /books/{id}`
    Delete,
}

/// Query parameters for search and listing operations
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct BookQuery {
    pub title: Option<String>,
    pub author: Option<String>,
    /// Zero-based page number
    pub page: Option<usize>,
    pub size: Option<usize>,
    /// Sort in `property[,asc|desc]` form
    pub sort: Option<String>,
}

/// Structured response from book operations
#[derive(Debug, Clone, PartialEq)]
pub struct BookOperationResponse {
    /// Status code a transport should report
    pub status: u16,
    /// Whether the operation succeeded
    pub success: bool,
    /// The primary data returned by the operation
    pub data: Option<Value>,
    /// Error payload if the operation failed
    pub error: Option<ErrorResponse>,
    /// Error code for programmatic handling
    pub error_code: Option<String>,
    pub metadata: OperationMetadata,
}

/// Uniform error payload.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ErrorResponse {
    pub status: u16,
    pub message: String,
    /// Itemised problems, e.g. one line per constraint violation
    pub errors: Vec<String>,
}

/// Metadata about a book operation
#[derive(Debug, Clone, Default, PartialEq)]
pub struct OperationMetadata {
    /// Request ID for tracing
    pub request_id: String,
    /// Book id if applicable
    pub resource_id: Option<String>,
    /// Current version of the returned (or conflicting) book
    pub version: Option<u64>,
    /// Weak ETag for `version`
    pub etag: Option<String>,
    /// URL of the returned book
    pub location: Option<String>,
    /// Number of books returned
    pub resource_count: Option<usize>,
    /// Total number of books available (for pagination)
    pub total_results: Option<usize>,
}

impl<P: BookProvider + Sync> BookOperationHandler<P> {
    /// Create a new operation handler with the given book server.
    pub fn new(server: BookServer<P>) -> Self {
        Self { server }
    }

    /// Handle a structured book operation request.
    ///
    /// This is the main entry point that dispatches to specific operation
    /// handlers based on the operation type.
    pub async fn handle_operation(&self, request: BookOperationRequest) -> BookOperationResponse {
        let request_id = request
            .request_id
            .clone()
            .unwrap_or_else(|| uuid::Uuid::new_v4().to_string());

        info!(
            "Book operation handler processing {:?} (request: '{}')",
            request.operation, request_id
        );

        let context = RequestContext::new(request_id.clone());

        let result = match request.operation {
            BookOperationType::Get => {
                super::handlers::crud::handle_get(self, request, &context).await
            }
            BookOperationType::Create => {
                super::handlers::crud::handle_create(self, request, &context).await
            }
            BookOperationType::Replace => {
                super::handlers::crud::handle_replace(self, request, &context).await
            }
            BookOperationType::Delete => {
                super::handlers::crud::handle_delete(self, request, &context).await
            }
            BookOperationType::Search => {
                super::handlers::query::handle_search(self, request, &context).await
            }
            BookOperationType::ListAll => {
                super::handlers::query::handle_list_all(self, request, &context).await
            }
            BookOperationType::ListPage => {
                super::handlers::query::handle_list_page(self, request, &context).await
            }
            BookOperationType::Merge => {
                super::handlers::patch::handle_merge(self, request, &context).await
            }
            BookOperationType::Patch => {
                super::handlers::patch::handle_patch(self, request, &context).await
            }
        };

        match &result {
            Ok(response) => {
                debug!(
                    "Book operation handler completed with status {} (request: '{}')",
                    response.status, request_id
                );
            }
            Err(e) => {
                warn!(
                    "Book operation handler failed: {} (request: '{}')",
                    e, request_id
                );
            }
        }

        result.unwrap_or_else(|e| super::errors::create_error_response(e, request_id))
    }

    /// Get access to the underlying book server.
    pub fn server(&self) -> &BookServer<P> {
        &self.server
    }
}
