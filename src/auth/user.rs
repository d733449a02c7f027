//! User records
//!
//! Defines the registered user and the raw entry parsed from a users file.

use crate::storage::permissions::Permission;

/// A registered user.
///
/// `permission` is the capability granted to the user on its own home
/// directory when it is registered.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct User {
    name: String,
    permission: Permission,
    home: String,
}

impl User {
    pub fn new(name: &str, permission: Permission, home: &str) -> Self {
        Self {
            name: name.to_string(),
            permission,
            home: home.to_string(),
        }
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn permission(&self) -> Permission {
        self.permission
    }

    pub fn home(&self) -> &str {
        &self.home
    }
}

/// One line of a users file, not yet validated.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct UserEntry {
    pub line: usize,
    pub name: String,
    pub home: String,
    pub permission: String,
}
