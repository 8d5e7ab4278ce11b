//! Data models
//!
//! Shared between the client controllers and any presentation layer.
//! Remote ids are `i64`.

pub mod employee;

// Re-exports
pub use employee::*;
