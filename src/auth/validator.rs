//! User input validation
//!
//! Checks usernames, home paths and permission strings before they reach the
//! registry.

use crate::error::RegistryError;
use crate::storage::permissions::Permission;
use crate::storage::validation::{split_path, validate_segment};

/// Longest accepted username
pub const MAX_USERNAME_LENGTH: usize = 32;

/// Performs basic input sanitation on a username.
fn is_valid_input(input: &str, max_length: usize) -> bool {
    !input.trim().is_empty()
        && input.len() <= max_length
        && !input.contains(['\r', '\n', '\0', '/'])
        && !input.contains(char::is_whitespace)
}

/// Validates the format of a username.
pub fn validate_username(username: &str) -> Result<(), RegistryError> {
    if !is_valid_input(username, MAX_USERNAME_LENGTH) {
        return Err(RegistryError::InvalidUsername(username.to_string()));
    }
    Ok(())
}

/// Parses a 3-character capability string.
pub fn parse_permission(permission: &str) -> Result<Permission, RegistryError> {
    permission
        .parse()
        .map_err(RegistryError::InvalidPermission)
}

/// Validates that a home path is absolute and made of usable segments.
pub fn validate_home(home: &str) -> Result<(), RegistryError> {
    if !home.starts_with('/') {
        return Err(RegistryError::InvalidHome(home.to_string()));
    }
    for segment in split_path(home) {
        validate_segment(segment).map_err(|_| RegistryError::InvalidHome(home.to_string()))?;
    }
    Ok(())
}
