//! User bookmarks
//!
//! Named saved paths persisted one per line beneath the user config directory.

pub mod record;
pub mod store;

pub use record::Bookmark;
pub use store::{BookmarkStore, LoadReport};
