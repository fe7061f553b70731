//! Builder utilities for operation handler types
//!
//! Builder implementations live in impl blocks on the core types, so there
//! is nothing to re-export.

pub mod request;
