//! Book resource service with an RFC 6902 / RFC 7396 partial-update engine.
//!
//! Provides CRUD over a single `Book` resource, full replacement with upsert
//! semantics, JSON Patch and JSON Merge Patch updates, constraint validation of
//! the patched result, and optimistic concurrency on a per-book version.
//!
//! # Core Components
//!
//! - [`patch`] - Pure JSON Patch and Merge Patch engines over `serde_json::Value`
//! - [`BookProvider`] - Service operations with validation and version checks
//! - [`BookServer`] - Decoding of raw request pieces, plus configuration
//! - [`BookOperationHandler`] - Transport-agnostic request/response handling
//!
//! # Quick Start
//!
//! ```rust
//! use book_server::{BookOperationHandler, BookOperationRequest, BookServer};
//! use book_server::providers::StandardBookProvider;
//! use book_server::storage::InMemoryStorage;
//! use serde_json::json;
//!
//! # async fn example() -> Result<(), Box<dyn std::error::Error>> {
//! let provider = StandardBookProvider::new(InMemoryStorage::new());
//! let handler = BookOperationHandler::new(BookServer::new(provider)?);
//!
//! let created = handler
//!     .handle_operation(BookOperationRequest::create(json!({
//!         "title": "Dune",
//!         "author": "Frank Herbert",
//!         "publicationDate": "01/08/1965",
//!         "publisher": "Chilton"
//!     })))
//!     .await;
//! assert_eq!(created.status, 201);
//!
//! let patched = handler
//!     .handle_operation(BookOperationRequest::patch(
//!         "1",
//!         json!([{"op": "replace", "path": "/pages", "value": 412}]),
//!     ))
//!     .await;
//! assert_eq!(patched.metadata.etag.as_deref(), Some("W/\"1\""));
//! # Ok(())
//! # }
//! ```

pub mod book_server;
pub mod error;
pub mod operation_handler;
pub mod patch;
pub mod providers;
pub mod resource;
pub mod storage;
pub mod validation;

// Re-export commonly used types for convenience
pub use book_server::{BookServer, BookServerBuilder, BookServerConfig};
pub use error::{BookError, BookResult, BuildError, BuildResult};
pub use patch::{JsonPatch, MergePatch, PatchDocument, PatchError, PatchKind};
pub use providers::{BookProvider, StandardBookProvider, UpsertOutcome};
pub use resource::{Book, BookFormat, BookId, BookVersion, RequestContext};

pub use operation_handler::{
    BookOperationHandler, BookOperationRequest, BookOperationResponse, ErrorResponse,
    OperationMetadata,
};
