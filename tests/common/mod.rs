//! Common test utilities for the book server suites.

use book_server::{
    BookOperationHandler, BookOperationRequest, BookOperationResponse, BookServer,
    providers::StandardBookProvider, storage::InMemoryStorage,
};
use chrono::NaiveDate;
use serde_json::Value;

pub mod builders;

pub type TestProvider = StandardBookProvider<InMemoryStorage>;
pub type TestHandler = BookOperationHandler<TestProvider>;

/// The day every suite treats as "today" for publication date checks.
pub fn fixed_today() -> NaiveDate {
    NaiveDate::from_ymd_opt(2024, 6, 1).unwrap()
}

pub fn test_provider() -> TestProvider {
    StandardBookProvider::new(InMemoryStorage::new()).with_fixed_today(fixed_today())
}

pub fn test_handler() -> TestHandler {
    BookOperationHandler::new(BookServer::new(test_provider()).expect("default config is valid"))
}

/// Route log output through env_logger once per test binary.
pub fn init_logging() {
    let _ = env_logger::builder().is_test(true).try_init();
}

/// Create a book and return its id.
pub async fn create_book(handler: &TestHandler, body: Value) -> String {
    let response = handler
        .handle_operation(BookOperationRequest::create(body))
        .await;
    assert_eq!(response.status, 201, "create failed: {:?}", response.error);
    response
        .metadata
        .resource_id
        .expect("created book carries its id")
}

pub async fn get_book(handler: &TestHandler, id: &str) -> BookOperationResponse {
    handler
        .handle_operation(BookOperationRequest::get(id))
        .await
}

/// The itemised error lines of a failed response.
pub fn error_lines(response: &BookOperationResponse) -> Vec<String> {
    response
        .error
        .as_ref()
        .map(|e| e.errors.clone())
        .unwrap_or_default()
}

/// Assert the status and error code of a failed response.
#[macro_export]
macro_rules! assert_failure {
    ($response:expr, $status:expr, $code:expr) => {{
        let response = &$response;
        assert!(
            !response.success,
            "Expected failure {} ({}), got success",
            $status, $code
        );
        assert_eq!(response.status, $status, "unexpected status: {:?}", response.error);
        assert_eq!(response.error_code.as_deref(), Some($code));
    }};
}

/// Assert that a response succeeded with the given status.
#[macro_export]
macro_rules! assert_success {
    ($response:expr, $status:expr) => {{
        let response = &$response;
        assert!(
            response.success,
            "Expected status {}, got failure {:?}",
            $status, response.error
        );
        assert_eq!(response.status, $status);
    }};
}
