//! Line-oriented shell over the navigation engine
//!
//! Stands in for a graphical front-end: one command per line on stdin.

mod handlers;
mod parser;

pub use handlers::{CommandResult, CommandStatus, HELP, Session};
pub use parser::{Command, parse_command};
