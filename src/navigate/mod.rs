//! Navigate module
//!
//! Handles path resolution and the navigation state machine, including
//! offering privilege escalation when a location cannot be read.

mod controller;
mod resolver;
mod results;

// Re-export public types and functions
pub use controller::NavigationController;
pub use resolver::{Location, normalize, resolve};
pub use results::{NavigationOutcome, NavigationState};
