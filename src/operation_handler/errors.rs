//! Translation of [`BookError`] into operation responses.
//!
//! This is the only place that decides which status code and error code a
//! failure is reported with.

use crate::{
    error::BookError,
    operation_handler::core::{BookOperationResponse, ErrorResponse, OperationMetadata},
    patch::PatchError,
};

/// Create an error response from a BookError.
pub fn create_error_response(error: BookError, request_id: String) -> BookOperationResponse {
    let (status, error_code) = status_and_code(&error);

    let (message, errors) = match &error {
        BookError::ValidationFailed(violations) => {
            ("Validation failed".to_string(), violations.messages())
        }
        BookError::Patch(patch_error) => {
            ("Invalid patch".to_string(), vec![patch_error.to_string()])
        }
        _ => (error.to_string(), Vec::new()),
    };

    let mut metadata = OperationMetadata {
        request_id,
        ..OperationMetadata::default()
    };

    // Let the caller see what it has to reload.
    if let BookError::OptimisticConflict { id, current, .. } = &error {
        metadata.resource_id = Some(id.to_string());
        metadata.version = current.map(|v| v.value());
        metadata.etag = current.map(|v| v.to_etag());
    }

    BookOperationResponse {
        status,
        success: false,
        data: None,
        error: Some(ErrorResponse {
            status,
            message,
            errors,
        }),
        error_code: Some(error_code.to_string()),
        metadata,
    }
}

fn status_and_code(error: &BookError) -> (u16, &'static str) {
    match error {
        BookError::Patch(patch_error) => match patch_error {
            PatchError::Malformed { .. } => (400, "PATCH_MALFORMED"),
            PatchError::TargetMissing { .. } => (400, "PATCH_TARGET_MISSING"),
            PatchError::IndexOutOfRange { .. } => (400, "PATCH_INDEX_OUT_OF_RANGE"),
            PatchError::InvalidMove { .. } => (400, "PATCH_INVALID_MOVE"),
            PatchError::TestFailed { .. } => (409, "PATCH_TEST_FAILED"),
        },
        BookError::ValidationFailed(_) => (400, "VALIDATION_FAILED"),
        BookError::ResourceNotFound { .. } => (404, "RESOURCE_NOT_FOUND"),
        BookError::NoResourceFound => (404, "NO_RESOURCE_FOUND"),
        BookError::OptimisticConflict { .. } => (409, "OPTIMISTIC_CONFLICT"),
        BookError::UnsupportedMediaType { .. } => (415, "UNSUPPORTED_MEDIA_TYPE"),
        BookError::MalformedRequest { .. } => (400, "MALFORMED_REQUEST"),
        BookError::Storage { .. } => (500, "STORAGE_ERROR"),
        BookError::Internal { .. } => (500, "INTERNAL_ERROR"),
    }
}
