//! File system storage management
//!
//! Handles directory/file creation, batch deletion, properties and launching.

pub mod format;
pub mod launcher;
pub mod operations;
pub mod owner;
pub mod properties;
pub mod results;

pub use format::{format_mode, format_size};
pub use launcher::Launcher;
pub use operations::{create_directory, create_file, delete_many, delete_many_with_policy};
pub use properties::{EntryKind, PropertiesSnapshot, read_properties};
pub use results::{BatchResult, DeleteOutcome, PendingOperation};
