//! Shell protocol implementation
//!
//! Handles command parsing, dispatch to the file system, and response
//! generation.

pub mod commands;
pub mod handlers;
pub mod parser;
pub mod responses;

pub use commands::{Command, CommandResult, CommandStatus};
pub use handlers::handle_command;
pub use parser::parse_command;
