//! Error handling
//!
//! Defines error types and handling for the file system and its shell.

pub mod handlers;
pub mod types;

pub use types::*;
