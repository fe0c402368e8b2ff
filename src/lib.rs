pub mod bookmarks;
pub mod config;
pub mod devices;
pub mod error;
pub mod navigate;
pub mod permissions;
pub mod shell;
pub mod storage;
pub mod utils;

pub use crate::config::EngineConfig;
pub use crate::navigate::NavigationController;
