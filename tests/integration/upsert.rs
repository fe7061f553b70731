//! Full replacement and its create fallback.

use crate::common::{builders::BookBodyBuilder, create_book, error_lines, get_book, test_handler};
use crate::{assert_failure, assert_success};
use book_server::BookOperationRequest;

#[tokio::test]
async fn test_replace_existing_book() {
    let handler = test_handler();
    let id = create_book(&handler, BookBodyBuilder::full().build()).await;

    let body = BookBodyBuilder::new()
        .title("Children of Dune")
        .version(0)
        .build();
    let response = handler
        .handle_operation(BookOperationRequest::replace(id.clone(), body))
        .await;
    assert_success!(response, 200);
    assert_eq!(response.metadata.resource_id.as_deref(), Some(id.as_str()));
    assert_eq!(response.metadata.version, Some(1));

    // Fields left out of a full replacement are cleared.
    let data = response.data.unwrap();
    assert_eq!(data["title"], "Children of Dune");
    assert!(data["isbn"].is_null());
    assert!(data["pages"].is_null());
}

#[tokio::test]
async fn test_replace_missing_book_creates_one() {
    let handler = test_handler();
    create_book(&handler, BookBodyBuilder::new().build()).await;

    let response = handler
        .handle_operation(BookOperationRequest::replace(
            "50",
            BookBodyBuilder::new().title("Emma").version(0).build(),
        ))
        .await;
    assert_success!(response, 201);
    // The store assigns the id; the path id is not reused.
    assert_eq!(response.metadata.resource_id.as_deref(), Some("2"));
    assert_eq!(response.metadata.version, Some(0));

    assert_failure!(get_book(&handler, "50").await, 404, "RESOURCE_NOT_FOUND");
}

#[tokio::test]
async fn test_replace_requires_version() {
    let handler = test_handler();
    let id = create_book(&handler, BookBodyBuilder::new().build()).await;

    // Other problems are not reported until a version is supplied.
    let body = BookBodyBuilder::new().without("title").build();
    let response = handler
        .handle_operation(BookOperationRequest::replace(id, body))
        .await;
    assert_failure!(response, 400, "VALIDATION_FAILED");
    assert_eq!(error_lines(&response), vec!["Book version must not be null"]);
}

#[tokio::test]
async fn test_replace_missing_book_still_requires_version() {
    let handler = test_handler();

    let response = handler
        .handle_operation(BookOperationRequest::replace(
            "8",
            BookBodyBuilder::new().build(),
        ))
        .await;
    assert_failure!(response, 400, "VALIDATION_FAILED");
}

#[tokio::test]
async fn test_replace_with_stale_version() {
    let handler = test_handler();
    let id = create_book(&handler, BookBodyBuilder::new().build()).await;

    let first = handler
        .handle_operation(BookOperationRequest::replace(
            id.clone(),
            BookBodyBuilder::new().title("First").version(0).build(),
        ))
        .await;
    assert_success!(first, 200);

    let second = handler
        .handle_operation(BookOperationRequest::replace(
            id.clone(),
            BookBodyBuilder::new().title("Second").version(0).build(),
        ))
        .await;
    assert_failure!(second, 409, "OPTIMISTIC_CONFLICT");
    assert_eq!(second.metadata.etag.as_deref(), Some("W/\"1\""));

    assert_eq!(get_book(&handler, &id).await.data.unwrap()["title"], "First");
}

#[tokio::test]
async fn test_replace_validation_after_version() {
    let handler = test_handler();
    let id = create_book(&handler, BookBodyBuilder::new().build()).await;

    let body = BookBodyBuilder::new()
        .title(" ")
        .with("pages", serde_json::json!(-4))
        .version(0)
        .build();
    let response = handler
        .handle_operation(BookOperationRequest::replace(id, body))
        .await;
    assert_failure!(response, 400, "VALIDATION_FAILED");
    assert_eq!(
        error_lines(&response),
        vec![
            "Book title must not be blank",
            "Book pages must be greater than 0"
        ]
    );
}
