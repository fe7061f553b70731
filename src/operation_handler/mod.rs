//! Framework-agnostic book operation handler.
//!
//! This module provides structured request/response handling for the book
//! service. A transport layer maps its requests onto
//! [`BookOperationRequest`] and writes back the status, body and metadata of
//! the [`BookOperationResponse`]; every failure has already been translated
//! by [`create_error_response`].
//!
//! # Key Types
//!
//! - [`BookOperationHandler`] - Main handler for processing book operations
//! - [`BookOperationRequest`] - Structured request wrapper
//! - [`BookOperationResponse`] - Response with status, payload and ETag metadata
//!
//! # Examples
//!
//! ```rust
//! use book_server::operation_handler::{BookOperationHandler, BookOperationRequest};
//! use book_server::{BookServer, providers::StandardBookProvider};
//! use book_server::storage::InMemoryStorage;
//! use serde_json::json;
//!
//! # async fn example() -> Result<(), Box<dyn std::error::Error>> {
//! let provider = StandardBookProvider::new(InMemoryStorage::new());
//! let handler = BookOperationHandler::new(BookServer::new(provider)?);
//!
//! let request = BookOperationRequest::merge("1", json!({"pages": 320}));
//! let response = handler.handle_operation(request).await;
//! assert_eq!(response.status, 404);
//! # Ok(())
//! # }
//! ```

mod builders;
mod core;
mod errors;
mod handlers;

pub use core::{
    BookOperationHandler, BookOperationRequest, BookOperationResponse, BookOperationType,
    BookQuery, ErrorResponse, OperationMetadata,
};

pub use builders::*;

pub use errors::create_error_response;
