//! Book Lifecycle Example
//!
//! Walks one book through create, JSON Patch, merge patch, a stale full
//! replacement and delete, printing the status and payload of each response.
//!
//! Run with `RUST_LOG=debug` to see the provider's log output.

use book_server::{
    BookOperationHandler, BookOperationRequest, BookOperationResponse, BookServerBuilder,
    providers::StandardBookProvider, storage::InMemoryStorage,
};
use serde_json::json;

fn report(step: &str, response: &BookOperationResponse) {
    if response.success {
        println!(
            "✅ {} -> {} (etag {})",
            step,
            response.status,
            response.metadata.etag.as_deref().unwrap_or("-")
        );
        if let Some(data) = &response.data {
            println!("   {}", data);
        }
    } else if let Some(error) = &response.error {
        println!("❌ {} -> {} {}", step, response.status, error.message);
        for line in &error.errors {
            println!("   - {}", line);
        }
    }
}

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("info")).init();

    println!("📚 Book Lifecycle Example");
    println!("=========================\n");

    let provider = StandardBookProvider::new(InMemoryStorage::new());
    let server = BookServerBuilder::new(provider)
        .with_base_url("http://localhost:8080")
        .build()?;
    let handler = BookOperationHandler::new(server);

    let created = handler
        .handle_operation(BookOperationRequest::create(json!({
            "title": "Dune",
            "author": "Frank Herbert",
            "publicationDate": "01/08/1965",
            "publisher": "Chilton",
            "format": "Hardback"
        })))
        .await;
    report("create", &created);
    let id = created
        .metadata
        .resource_id
        .clone()
        .ok_or("create returned no id")?;

    let patched = handler
        .handle_operation(BookOperationRequest::patch(
            id.clone(),
            json!([
                {"op": "test", "path": "/title", "value": "Dune"},
                {"op": "add", "path": "/pages", "value": 412},
                {"op": "add", "path": "/isbn", "value": "978-0-441-17271-9"}
            ]),
        ))
        .await;
    report("json patch", &patched);

    let merged = handler
        .handle_operation(BookOperationRequest::merge(
            id.clone(),
            json!({"format": "Paperback", "isbn": null}),
        ))
        .await;
    report("merge patch", &merged);

    let invalid = handler
        .handle_operation(BookOperationRequest::merge(
            id.clone(),
            json!({"title": "", "pages": 0}),
        ))
        .await;
    report("invalid merge", &invalid);

    // Version 0 is long gone by now.
    let stale = handler
        .handle_operation(BookOperationRequest::replace(
            id.clone(),
            json!({
                "title": "Dune",
                "author": "Frank Herbert",
                "publicationDate": "01/08/1965",
                "publisher": "Ace",
                "version": 0
            }),
        ))
        .await;
    report("stale replace", &stale);

    let deleted = handler
        .handle_operation(BookOperationRequest::delete(id.clone()))
        .await;
    report("delete", &deleted);

    let missing = handler
        .handle_operation(BookOperationRequest::get(id))
        .await;
    report("get after delete", &missing);

    Ok(())
}
