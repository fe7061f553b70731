//! Book provider implementations.
//!
//! * [`BookProvider`] - the operations of the book service
//! * [`StandardBookProvider`] - implementation over any
//!   [`StorageProvider`](crate::storage::StorageProvider)

pub mod provider;
pub mod standard;

pub use provider::{BookProvider, UpsertOutcome};
pub use standard::StandardBookProvider;
