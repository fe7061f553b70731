//! Book server: configuration plus the transport-neutral entry points.
//!
//! The server sits between the operation handler and a [`BookProvider`]. It
//! turns raw request pieces (path ids, query strings, bodies and their
//! declared media types) into typed values and hands them to the provider.
//!
//! # Module Organization
//!
//! * [`builder`] - [`BookServerConfig`] and the fluent [`BookServerBuilder`]
//! * [`core`] - the [`BookServer`] struct and its helpers
//! * [`operations`] - one method per book operation
//!
//! [`BookProvider`]: crate::providers::BookProvider

pub mod builder;
pub mod core;
pub mod operations;

pub use builder::{BookServerBuilder, BookServerConfig};
pub use core::BookServer;
