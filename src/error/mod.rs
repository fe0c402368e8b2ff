//! Error handling
//!
//! Defines error types and handling for the file manager core.

pub mod handlers;
pub mod types;

pub use handlers::{ErrorKind, error_kind, handle_error, storage_error_kind};
pub use types::*;
