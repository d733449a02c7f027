//! User registry
//!
//! Tracks registered users by name. The registry is always seeded with
//! `root`, which can never be removed.

use crate::auth::user::User;
use crate::error::RegistryError;
use crate::storage::permissions::{Permission, ROOT_USER};

/// Registered users, in registration order
#[derive(Debug, Clone)]
pub struct UserRegistry {
    users: Vec<User>,
}

impl UserRegistry {
    pub fn new() -> Self {
        Self {
            users: vec![User::new(ROOT_USER, Permission::FULL, "/")],
        }
    }

    pub fn get(&self, name: &str) -> Option<&User> {
        self.users.iter().find(|u| u.name() == name)
    }

    pub fn contains(&self, name: &str) -> bool {
        self.get(name).is_some()
    }

    /// Registers `user`; a duplicate name leaves the registry unchanged.
    pub fn insert(&mut self, user: User) -> Result<(), RegistryError> {
        if self.contains(user.name()) {
            return Err(RegistryError::UserAlreadyExists(user.name().to_string()));
        }
        self.users.push(user);
        Ok(())
    }

    pub fn remove(&mut self, name: &str) -> Result<User, RegistryError> {
        if name == ROOT_USER {
            return Err(RegistryError::ProtectedUser(name.to_string()));
        }
        let index = self
            .users
            .iter()
            .position(|u| u.name() == name)
            .ok_or_else(|| RegistryError::UserNotFound(name.to_string()))?;
        Ok(self.users.remove(index))
    }

    pub fn iter(&self) -> impl Iterator<Item = &User> {
        self.users.iter()
    }

    pub fn len(&self) -> usize {
        self.users.len()
    }

    pub fn is_empty(&self) -> bool {
        self.users.is_empty()
    }
}

impl Default for UserRegistry {
    fn default() -> Self {
        Self::new()
    }
}
