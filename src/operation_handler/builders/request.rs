//! Request builder utilities for BookOperationRequest

use crate::{
    book_server::operations::JSON_MEDIA_TYPE,
    operation_handler::core::{BookOperationRequest, BookOperationType, BookQuery},
    patch::{PatchKind, parser::JSON_PATCH_MEDIA_TYPE, parser::MERGE_PATCH_MEDIA_TYPE},
};
use serde_json::Value;

impl BookOperationRequest {
    fn bare(operation: BookOperationType) -> Self {
        Self {
            operation,
            resource_id: None,
            body: None,
            content_type: None,
            query: None,
            request_id: None,
        }
    }

    /// Create a new get operation request.
    pub fn get(resource_id: impl Into<String>) -> Self {
        Self::bare(BookOperationType::Get).with_resource_id(resource_id)
    }

    /// Create a search by exact title and, optionally, exact author.
    pub fn search(title: impl Into<String>, author: Option<String>) -> Self {
        let mut request = Self::bare(BookOperationType::Search);
        request.query = Some(BookQuery {
            title: Some(title.into()),
            author,
            ..BookQuery::default()
        });
        request
    }

    /// Create a request listing every book.
    pub fn list_all() -> Self {
        Self::bare(BookOperationType::ListAll)
    }

    /// Create a paged listing request.
    pub fn list_page(page: Option<usize>, size: Option<usize>, sort: Option<String>) -> Self {
        let mut request = Self::bare(BookOperationType::ListPage);
        request.query = Some(BookQuery {
            page,
            size,
            sort,
            ..BookQuery::default()
        });
        request
    }

    /// Create a new create operation request with a JSON body.
    pub fn create(data: Value) -> Self {
        Self::bare(BookOperationType::Create).with_body(data.to_string(), JSON_MEDIA_TYPE)
    }

    /// Create a full replacement request with a JSON body.
    pub fn replace(resource_id: impl Into<String>, data: Value) -> Self {
        Self::bare(BookOperationType::Replace)
            .with_resource_id(resource_id)
            .with_body(data.to_string(), JSON_MEDIA_TYPE)
    }

    /// Create an RFC 7396 merge patch request.
    pub fn merge(resource_id: impl Into<String>, patch: Value) -> Self {
        Self::bare(BookOperationType::Merge)
            .with_resource_id(resource_id)
            .with_body(patch.to_string(), MERGE_PATCH_MEDIA_TYPE)
    }

    /// Create an RFC 6902 JSON Patch request.
    pub fn patch(resource_id: impl Into<String>, operations: Value) -> Self {
        Self::bare(BookOperationType::Patch)
            .with_resource_id(resource_id)
            .with_body(operations.to_string(), JSON_PATCH_MEDIA_TYPE)
    }

    /// Create a partial update request for either patch format.
    pub fn partial(kind: PatchKind, resource_id: impl Into<String>, document: Value) -> Self {
        match kind {
            PatchKind::JsonPatch => Self::patch(resource_id, document),
            PatchKind::MergePatch => Self::merge(resource_id, document),
        }
    }

    /// Create a new delete operation request.
    pub fn delete(resource_id: impl Into<String>) -> Self {
        Self::bare(BookOperationType::Delete).with_resource_id(resource_id)
    }

    pub fn with_resource_id(mut self, resource_id: impl Into<String>) -> Self {
        self.resource_id = Some(resource_id.into());
        self
    }

    /// Replace the body and its declared media type with raw values.
    pub fn with_body(mut self, body: impl Into<String>, content_type: impl Into<String>) -> Self {
        self.body = Some(body.into());
        self.content_type = Some(content_type.into());
        self
    }

    /// Override only the declared media type.
    pub fn with_content_type(mut self, content_type: impl Into<String>) -> Self {
        self.content_type = Some(content_type.into());
        self
    }

    /// Add a request ID to the request.
    pub fn with_request_id(mut self, request_id: impl Into<String>) -> Self {
        self.request_id = Some(request_id.into());
        self
    }
}
