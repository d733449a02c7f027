//! User management
//!
//! Handles the user registry, input validation for user records, and the
//! bootstrap users file.

pub mod loader;
pub mod registry;
pub mod user;
pub mod validator;

pub use loader::{load_users_file, parse_users};
pub use registry::UserRegistry;
pub use user::{User, UserEntry};
