//! Get, search, create and delete.

use crate::common::{self, builders::BookBodyBuilder, create_book, get_book, test_handler};
use crate::{assert_failure, assert_success};
use book_server::BookOperationRequest;
use serde_json::json;

#[tokio::test]
async fn test_create_then_get() {
    common::init_logging();
    let handler = test_handler();

    let response = handler
        .handle_operation(BookOperationRequest::create(BookBodyBuilder::full().build()))
        .await;
    assert_success!(response, 201);
    assert_eq!(response.metadata.resource_id.as_deref(), Some("1"));
    assert_eq!(response.metadata.version, Some(0));
    assert_eq!(response.metadata.etag.as_deref(), Some("W/\"0\""));
    assert_eq!(
        response.metadata.location.as_deref(),
        Some("https://localhost/books/1")
    );

    let fetched = get_book(&handler, "1").await;
    assert_success!(fetched, 200);
    let data = fetched.data.unwrap();
    assert_eq!(data["id"], 1);
    assert_eq!(data["title"], "Dune");
    assert_eq!(data["publicationDate"], "01/08/1965");
    assert_eq!(data["format"], "Hardback");
    assert_eq!(data["pages"], 412);
    assert_eq!(data["version"], 0);
}

#[tokio::test]
async fn test_representation_field_order() {
    let handler = test_handler();
    let id = create_book(&handler, BookBodyBuilder::new().build()).await;

    let data = get_book(&handler, &id).await.data.unwrap();
    let keys: Vec<&str> = data.as_object().unwrap().keys().map(String::as_str).collect();
    assert_eq!(
        keys,
        vec![
            "id",
            "title",
            "author",
            "publicationDate",
            "publisher",
            "isbn",
            "format",
            "pages",
            "updatedDate",
            "createdDate",
            "version"
        ]
    );
    assert!(data["isbn"].is_null());
}

#[tokio::test]
async fn test_create_ignores_client_id_and_version() {
    let handler = test_handler();
    let body = BookBodyBuilder::new()
        .with("id", json!(77))
        .version(9)
        .build();

    let response = handler
        .handle_operation(BookOperationRequest::create(body))
        .await;
    assert_success!(response, 201);
    assert_eq!(response.metadata.resource_id.as_deref(), Some("1"));
    assert_eq!(response.metadata.version, Some(0));
}

#[tokio::test]
async fn test_get_missing_book() {
    let handler = test_handler();

    let response = get_book(&handler, "42").await;
    assert_failure!(response, 404, "RESOURCE_NOT_FOUND");
    assert_eq!(response.error.unwrap().message, "Book with id 42 not found");
}

#[tokio::test]
async fn test_get_with_invalid_id() {
    let handler = test_handler();

    assert_failure!(get_book(&handler, "abc").await, 400, "MALFORMED_REQUEST");
    assert_failure!(get_book(&handler, "0").await, 400, "MALFORMED_REQUEST");
}

#[tokio::test]
async fn test_search_by_title_and_author() {
    let handler = test_handler();
    create_book(&handler, BookBodyBuilder::new().build()).await;
    create_book(
        &handler,
        BookBodyBuilder::new().author("Brian Herbert").build(),
    )
    .await;

    let response = handler
        .handle_operation(BookOperationRequest::search("Dune", None))
        .await;
    assert_success!(response, 200);
    assert_eq!(response.metadata.resource_id.as_deref(), Some("1"));

    let response = handler
        .handle_operation(BookOperationRequest::search(
            "Dune",
            Some("Brian Herbert".to_string()),
        ))
        .await;
    assert_success!(response, 200);
    assert_eq!(response.data.unwrap()["author"], "Brian Herbert");

    let response = handler
        .handle_operation(BookOperationRequest::search(
            "Dune",
            Some("Kevin J. Anderson".to_string()),
        ))
        .await;
    assert_failure!(response, 404, "RESOURCE_NOT_FOUND");
    assert_eq!(
        response.error.unwrap().message,
        "Book with title Dune and author Kevin J. Anderson not found"
    );

    let response = handler
        .handle_operation(BookOperationRequest::search("Emma", None))
        .await;
    assert_eq!(
        response.error.unwrap().message,
        "Book with title Emma not found"
    );
}

#[tokio::test]
async fn test_create_rejects_malformed_json() {
    let handler = test_handler();
    let request = BookOperationRequest::create(json!({}))
        .with_body("{\"title\": \"Dune\",", "application/json");

    let response = handler.handle_operation(request).await;
    assert_failure!(response, 400, "MALFORMED_REQUEST");
    assert_eq!(response.error.unwrap().message, "Malformed JSON request");
}

#[tokio::test]
async fn test_create_rejects_other_media_types() {
    let handler = test_handler();
    let request = BookOperationRequest::create(BookBodyBuilder::new().build())
        .with_content_type("application/xml");

    let response = handler.handle_operation(request).await;
    assert_failure!(response, 415, "UNSUPPORTED_MEDIA_TYPE");
    assert_eq!(
        response.error.unwrap().message,
        "application/xml media type is not supported. Supported media types are application/json"
    );
}

#[tokio::test]
async fn test_delete() {
    let handler = test_handler();
    let id = create_book(&handler, BookBodyBuilder::new().build()).await;

    let response = handler
        .handle_operation(BookOperationRequest::delete(id.clone()))
        .await;
    assert_success!(response, 204);
    assert!(response.data.is_none());

    assert_failure!(get_book(&handler, &id).await, 404, "RESOURCE_NOT_FOUND");

    let again = handler
        .handle_operation(BookOperationRequest::delete(id))
        .await;
    assert_failure!(again, 404, "RESOURCE_NOT_FOUND");
}

#[tokio::test]
async fn test_request_id_is_echoed() {
    let handler = test_handler();

    let response = handler
        .handle_operation(BookOperationRequest::get("5").with_request_id("trace-5"))
        .await;
    assert_eq!(response.metadata.request_id, "trace-5");

    let generated = handler
        .handle_operation(BookOperationRequest::get("5"))
        .await;
    assert!(!generated.metadata.request_id.is_empty());
}
