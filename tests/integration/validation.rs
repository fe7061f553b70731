//! Constraint violations on every write path.

use crate::common::{builders::BookBodyBuilder, create_book, error_lines, test_handler};
use crate::{assert_failure, assert_success};
use book_server::BookOperationRequest;
use serde_json::json;

#[tokio::test]
async fn test_every_violation_is_reported() {
    let handler = test_handler();
    let body = json!({
        "title": "",
        "publicationDate": "01/01/2030",
        "publisher": "Ace",
        "isbn": "12-34",
        "pages": 0
    });

    let response = handler
        .handle_operation(BookOperationRequest::create(body))
        .await;
    assert_failure!(response, 400, "VALIDATION_FAILED");
    assert_eq!(response.error.as_ref().unwrap().message, "Validation failed");
    assert_eq!(
        error_lines(&response),
        vec![
            "Book title must not be blank",
            "Book title size must be between 1 and 255",
            "Book author must not be blank",
            "Book publicationDate must be a past date",
            "Book isbn must be a valid ISBN-10 or ISBN-13",
            "Book pages must be greater than 0"
        ]
    );
}

#[tokio::test]
async fn test_text_length_limit() {
    let handler = test_handler();

    let at_limit = BookBodyBuilder::new().title(&"a".repeat(255)).build();
    let response = handler
        .handle_operation(BookOperationRequest::create(at_limit))
        .await;
    assert_success!(response, 201);

    let over_limit = BookBodyBuilder::new().author(&"a".repeat(256)).build();
    let response = handler
        .handle_operation(BookOperationRequest::create(over_limit))
        .await;
    assert_failure!(response, 400, "VALIDATION_FAILED");
    assert_eq!(
        error_lines(&response),
        vec!["Book author size must be between 1 and 255"]
    );
}

#[tokio::test]
async fn test_publication_date_must_be_before_today() {
    let handler = test_handler();

    // The suites fix "today" at 01/06/2024.
    let today = BookBodyBuilder::new()
        .with("publicationDate", json!("01/06/2024"))
        .build();
    let response = handler
        .handle_operation(BookOperationRequest::create(today))
        .await;
    assert_failure!(response, 400, "VALIDATION_FAILED");

    let yesterday = BookBodyBuilder::new()
        .with("publicationDate", json!("31/05/2024"))
        .build();
    let response = handler
        .handle_operation(BookOperationRequest::create(yesterday))
        .await;
    assert_success!(response, 201);
}

#[tokio::test]
async fn test_isbn_forms() {
    let handler = test_handler();

    for isbn in ["0-306-40615-2", "ISBN-13: 978-0-306-40615-7", "030640615X"] {
        let body = BookBodyBuilder::new().with("isbn", json!(isbn)).build();
        let response = handler
            .handle_operation(BookOperationRequest::create(body))
            .await;
        assert_success!(response, 201);
    }

    for isbn in ["ISBN0306406152", "978-0-306-40615-X", "12345"] {
        let body = BookBodyBuilder::new().with("isbn", json!(isbn)).build();
        let response = handler
            .handle_operation(BookOperationRequest::create(body))
            .await;
        assert_failure!(response, 400, "VALIDATION_FAILED");
    }
}

#[tokio::test]
async fn test_page_count_bounds() {
    let handler = test_handler();

    let body = BookBodyBuilder::new().with("pages", json!(9_999_999)).build();
    let response = handler
        .handle_operation(BookOperationRequest::create(body))
        .await;
    assert_success!(response, 201);

    let body = BookBodyBuilder::new().with("pages", json!(10_000_000)).build();
    let response = handler
        .handle_operation(BookOperationRequest::create(body))
        .await;
    assert_failure!(response, 400, "VALIDATION_FAILED");
    assert_eq!(
        error_lines(&response),
        vec!["Book pages numeric value out of bounds (<7 digits>.<0 digits> expected)"]
    );

    let body = BookBodyBuilder::new().with("pages", json!(12.5)).build();
    let response = handler
        .handle_operation(BookOperationRequest::create(body))
        .await;
    assert_eq!(error_lines(&response), vec!["Book pages must be an integer"]);
}

#[tokio::test]
async fn test_patched_result_is_validated() {
    let handler = test_handler();
    let id = create_book(&handler, BookBodyBuilder::new().build()).await;

    let response = handler
        .handle_operation(BookOperationRequest::patch(
            id.clone(),
            json!([
                {"op": "replace", "path": "/publisher", "value": ""},
                {"op": "replace", "path": "/isbn", "value": "nope"}
            ]),
        ))
        .await;
    assert_failure!(response, 400, "VALIDATION_FAILED");
    assert_eq!(
        error_lines(&response),
        vec![
            "Book publisher must not be blank",
            "Book publisher size must be between 1 and 255",
            "Book isbn must be a valid ISBN-10 or ISBN-13"
        ]
    );
}

#[tokio::test]
async fn test_patch_does_not_require_version() {
    let handler = test_handler();
    let id = create_book(&handler, BookBodyBuilder::new().build()).await;

    let response = handler
        .handle_operation(BookOperationRequest::patch(
            id,
            json!([{"op": "remove", "path": "/version"}]),
        ))
        .await;
    assert_success!(response, 200);
    assert_eq!(response.metadata.version, Some(1));
}

#[tokio::test]
async fn test_numeric_extremes_are_rejected_without_writing() {
    let handler = test_handler();
    let id = create_book(&handler, BookBodyBuilder::new().build()).await;

    let response = handler
        .handle_operation(BookOperationRequest::merge(
            id.clone(),
            json!({"pages": i64::MIN}),
        ))
        .await;
    assert_failure!(response, 400, "VALIDATION_FAILED");
    assert_eq!(
        error_lines(&response),
        vec![
            "Book pages must be greater than 0",
            "Book pages numeric value out of bounds (<7 digits>.<0 digits> expected)"
        ]
    );

    let response = handler
        .handle_operation(BookOperationRequest::merge(
            id.clone(),
            json!({"pages": i64::MAX}),
        ))
        .await;
    assert_failure!(response, 400, "VALIDATION_FAILED");
    assert_eq!(
        error_lines(&response),
        vec!["Book pages numeric value out of bounds (<7 digits>.<0 digits> expected)"]
    );

    let response = handler
        .handle_operation(BookOperationRequest::merge(
            id.clone(),
            json!({"pages": u64::MAX}),
        ))
        .await;
    assert_eq!(error_lines(&response), vec!["Book pages must be an integer"]);

    let stored = crate::common::get_book(&handler, &id).await;
    assert_eq!(stored.metadata.version, Some(0));
}

#[tokio::test]
async fn test_largest_version_binds_and_conflicts() {
    let handler = test_handler();
    let id = create_book(&handler, BookBodyBuilder::new().build()).await;

    let response = handler
        .handle_operation(BookOperationRequest::merge(
            id,
            json!({"version": u64::MAX}),
        ))
        .await;
    assert_failure!(response, 409, "OPTIMISTIC_CONFLICT");
    assert_eq!(response.metadata.version, Some(0));
}
