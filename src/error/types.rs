//! Error types
//!
//! Defines domain-specific error types for the tree engine, the user
//! registry, the users-file loader and the shell.

use std::io;
use thiserror::Error;

/// Tree engine errors.
///
/// Every variant is recoverable: the failing operation leaves the tree as it
/// was before the call.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum FsError {
    #[error("Path not found: {0}")]
    PathNotFound(String),

    #[error("Path already exists: {0}")]
    PathAlreadyExists(String),

    #[error("Permission denied: {0}")]
    PermissionDenied(String),

    #[error("Invalid operation: {0}")]
    InvalidOperation(String),

    #[error("Unknown user: {0}")]
    UnknownUser(String),

    /// A broken tree invariant, never caused by caller input.
    #[error("Internal error: {0}")]
    Internal(String),
}

pub type FsResult<T> = Result<T, FsError>;

/// User registry errors
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum RegistryError {
    #[error("User already exists: {0}")]
    UserAlreadyExists(String),

    #[error("User not found: {0}")]
    UserNotFound(String),

    #[error("Invalid username: {0}")]
    InvalidUsername(String),

    #[error("User cannot be removed: {0}")]
    ProtectedUser(String),

    #[error("Invalid permission string: {0}")]
    InvalidPermission(String),

    #[error("Invalid home path: {0}")]
    InvalidHome(String),

    #[error("Failed to create home directory: {0}")]
    HomeCreation(#[from] FsError),
}

/// Users-file loading errors
#[derive(Error, Debug)]
pub enum LoadError {
    #[error("IO error: {0}")]
    Io(#[from] io::Error),

    #[error("Malformed entry on line {line}: {reason}")]
    Malformed { line: usize, reason: String },

    #[error("Registry error on line {line}: {source}")]
    Registry {
        line: usize,
        #[source]
        source: RegistryError,
    },
}

/// Umbrella error for the shell binary
#[derive(Error, Debug)]
pub enum ShellError {
    #[error("File system error: {0}")]
    Fs(#[from] FsError),

    #[error("Registry error: {0}")]
    Registry(#[from] RegistryError),

    #[error("Users file error: {0}")]
    Load(#[from] LoadError),

    #[error("Configuration error: {0}")]
    Config(#[from] config::ConfigError),

    #[error("I/O error: {0}")]
    Io(#[from] io::Error),
}
