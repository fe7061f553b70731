//! RFC 6902 updates against stored books.

use crate::common::{builders::BookBodyBuilder, create_book, error_lines, get_book, test_handler};
use crate::{assert_failure, assert_success};
use book_server::BookOperationRequest;
use serde_json::json;

#[tokio::test]
async fn test_replace_and_add_fields() {
    let handler = test_handler();
    let id = create_book(&handler, BookBodyBuilder::new().build()).await;

    let response = handler
        .handle_operation(BookOperationRequest::patch(
            id.clone(),
            json!([
                {"op": "replace", "path": "/title", "value": "Dune Messiah"},
                {"op": "add", "path": "/pages", "value": 256},
                {"op": "add", "path": "/format", "value": "Paperback"}
            ]),
        ))
        .await;
    assert_success!(response, 200);
    assert_eq!(response.metadata.version, Some(1));
    assert_eq!(response.metadata.etag.as_deref(), Some("W/\"1\""));

    let data = response.data.unwrap();
    assert_eq!(data["title"], "Dune Messiah");
    assert_eq!(data["pages"], 256);
    assert_eq!(data["format"], "Paperback");
    assert_eq!(data["author"], "Frank Herbert");
}

#[tokio::test]
async fn test_remove_optional_field() {
    let handler = test_handler();
    let id = create_book(&handler, BookBodyBuilder::full().build()).await;

    let response = handler
        .handle_operation(BookOperationRequest::patch(
            id.clone(),
            json!([{"op": "remove", "path": "/isbn"}]),
        ))
        .await;
    assert_success!(response, 200);
    assert!(response.data.unwrap()["isbn"].is_null());
}

#[tokio::test]
async fn test_remove_required_field_fails_validation() {
    let handler = test_handler();
    let id = create_book(&handler, BookBodyBuilder::new().build()).await;

    let response = handler
        .handle_operation(BookOperationRequest::patch(
            id.clone(),
            json!([{"op": "remove", "path": "/author"}]),
        ))
        .await;
    assert_failure!(response, 400, "VALIDATION_FAILED");
    assert_eq!(error_lines(&response), vec!["Book author must not be blank"]);

    // Nothing was written.
    let current = get_book(&handler, &id).await;
    assert_eq!(current.metadata.version, Some(0));
    assert_eq!(current.data.unwrap()["author"], "Frank Herbert");
}

#[tokio::test]
async fn test_failed_test_operation_is_a_conflict() {
    let handler = test_handler();
    let id = create_book(&handler, BookBodyBuilder::new().build()).await;

    let response = handler
        .handle_operation(BookOperationRequest::patch(
            id.clone(),
            json!([
                {"op": "test", "path": "/title", "value": "Emma"},
                {"op": "replace", "path": "/title", "value": "Persuasion"}
            ]),
        ))
        .await;
    assert_failure!(response, 409, "PATCH_TEST_FAILED");

    let current = get_book(&handler, &id).await;
    assert_eq!(current.data.unwrap()["title"], "Dune");
}

#[tokio::test]
async fn test_successful_test_operation_guards_update() {
    let handler = test_handler();
    let id = create_book(&handler, BookBodyBuilder::new().build()).await;

    let response = handler
        .handle_operation(BookOperationRequest::patch(
            id,
            json!([
                {"op": "test", "path": "/title", "value": "Dune"},
                {"op": "copy", "from": "/author", "path": "/publisher"}
            ]),
        ))
        .await;
    assert_success!(response, 200);
    assert_eq!(response.data.unwrap()["publisher"], "Frank Herbert");
}

#[tokio::test]
async fn test_move_between_fields() {
    let handler = test_handler();
    let id = create_book(
        &handler,
        BookBodyBuilder::new().with("isbn", json!("0306406152")).build(),
    )
    .await;

    let response = handler
        .handle_operation(BookOperationRequest::patch(
            id,
            json!([{"op": "move", "from": "/isbn", "path": "/title"}]),
        ))
        .await;
    assert_success!(response, 200);
    let data = response.data.unwrap();
    assert_eq!(data["title"], "0306406152");
    assert!(data["isbn"].is_null());
}

#[tokio::test]
async fn test_missing_target_is_rejected() {
    let handler = test_handler();
    let id = create_book(&handler, BookBodyBuilder::new().build()).await;

    let response = handler
        .handle_operation(BookOperationRequest::patch(
            id.clone(),
            json!([{"op": "replace", "path": "/subtitle", "value": "x"}]),
        ))
        .await;
    assert_failure!(response, 400, "PATCH_TARGET_MISSING");

    let response = handler
        .handle_operation(BookOperationRequest::patch(
            id,
            json!([{"op": "remove", "path": "/series/name"}]),
        ))
        .await;
    assert_failure!(response, 400, "PATCH_TARGET_MISSING");
}

#[tokio::test]
async fn test_malformed_documents() {
    let handler = test_handler();
    let id = create_book(&handler, BookBodyBuilder::new().build()).await;

    for document in [
        json!({"op": "replace", "path": "/title", "value": "x"}),
        json!([{"path": "/title", "value": "x"}]),
        json!([{"op": "replace", "path": "/title"}]),
        json!([{"op": "move", "path": "/title"}]),
        json!([{"op": "shuffle", "path": "/title"}]),
        json!([{"op": "replace", "path": "title", "value": "x"}]),
    ] {
        let response = handler
            .handle_operation(BookOperationRequest::patch(id.clone(), document.clone()))
            .await;
        assert_failure!(response, 400, "PATCH_MALFORMED");
    }

    let response = handler
        .handle_operation(
            BookOperationRequest::patch(id, json!([]))
                .with_body("[{", "application/json-patch+json"),
        )
        .await;
    assert_failure!(response, 400, "PATCH_MALFORMED");
}

#[tokio::test]
async fn test_patch_of_missing_book() {
    let handler = test_handler();

    let response = handler
        .handle_operation(BookOperationRequest::patch(
            "12",
            json!([{"op": "replace", "path": "/title", "value": "x"}]),
        ))
        .await;
    assert_failure!(response, 404, "RESOURCE_NOT_FOUND");
}

#[tokio::test]
async fn test_patch_requires_json_patch_media_type() {
    let handler = test_handler();
    let id = create_book(&handler, BookBodyBuilder::new().build()).await;

    let response = handler
        .handle_operation(
            BookOperationRequest::patch(id.clone(), json!([])).with_content_type("application/json"),
        )
        .await;
    assert_failure!(response, 415, "UNSUPPORTED_MEDIA_TYPE");
    assert_eq!(
        response.error.unwrap().message,
        "application/json media type is not supported. Supported media types are application/json-patch+json"
    );

    let response = handler
        .handle_operation(
            BookOperationRequest::patch(id, json!([]))
                .with_content_type("Application/JSON-Patch+JSON; charset=utf-8"),
        )
        .await;
    assert_success!(response, 200);
}

#[tokio::test]
async fn test_read_only_fields_are_silently_kept() {
    let handler = test_handler();
    let id = create_book(&handler, BookBodyBuilder::new().build()).await;

    let response = handler
        .handle_operation(BookOperationRequest::patch(
            id.clone(),
            json!([
                {"op": "replace", "path": "/id", "value": 999},
                {"op": "replace", "path": "/createdDate", "value": "01/01/2000 01:00:00 AM"}
            ]),
        ))
        .await;
    assert_success!(response, 200);
    let data = response.data.unwrap();
    assert_eq!(data["id"], 1);
    assert_ne!(data["createdDate"], "01/01/2000 01:00:00 AM");
}

#[tokio::test]
async fn test_stale_version_in_patch_is_rejected() {
    let handler = test_handler();
    let id = create_book(&handler, BookBodyBuilder::new().build()).await;

    // Move to version 1.
    handler
        .handle_operation(BookOperationRequest::patch(
            id.clone(),
            json!([{"op": "replace", "path": "/pages", "value": 10}]),
        ))
        .await;

    let response = handler
        .handle_operation(BookOperationRequest::patch(
            id,
            json!([
                {"op": "replace", "path": "/version", "value": 0},
                {"op": "replace", "path": "/pages", "value": 20}
            ]),
        ))
        .await;
    assert_failure!(response, 409, "OPTIMISTIC_CONFLICT");
    assert_eq!(response.metadata.version, Some(1));
    assert_eq!(
        response.error.unwrap().message,
        "The record has been updated by another user; please reload it and resubmit your changes"
    );
}
