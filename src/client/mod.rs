//! Interactive session management
//!
//! Handles the shell session loop and its per-session state.

pub mod handler;
pub mod state;

pub use handler::run_session;
pub use state::Session;
