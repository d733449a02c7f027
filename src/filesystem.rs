//! File system facade
//!
//! `FileSystem` owns the tree and the user registry and is the only entry
//! point to either. Every tree operation is made on behalf of a registered
//! acting user.

use log::{info, warn};

use crate::auth::validator::{parse_permission, validate_home, validate_username};
use crate::auth::{User, UserEntry, UserRegistry};
use crate::error::{FsError, FsResult, LoadError, RegistryError};
use crate::navigate::resolve;
use crate::storage::operations;
use crate::storage::{Listing, Offset, Permission, ROOT_USER, Tree};

/// An in-memory, permission-checked namespace seeded with `/` and `root`.
#[derive(Debug, Clone, Default)]
pub struct FileSystem {
    tree: Tree,
    users: UserRegistry,
}

impl FileSystem {
    pub fn new() -> Self {
        Self {
            tree: Tree::new(),
            users: UserRegistry::new(),
        }
    }

    pub fn users(&self) -> &UserRegistry {
        &self.users
    }

    /// Read-only view of the tree.
    pub fn tree(&self) -> &Tree {
        &self.tree
    }

    /// Registers a user and grants it `permission` on its home directory,
    /// creating the directory as `root` when absent.
    ///
    /// Nothing changes when any step fails.
    pub fn add_user(&mut self, name: &str, permission: &str, home: &str) -> Result<(), RegistryError> {
        validate_username(name)?;
        let permission = parse_permission(permission)?;
        validate_home(home)?;
        if self.users.contains(name) {
            return Err(RegistryError::UserAlreadyExists(name.to_string()));
        }

        let home_id = operations::mkdir(&mut self.tree, home, ROOT_USER)?;
        self.tree.node_mut(home_id)?.set_permission(name, permission);
        self.users.insert(User::new(name, permission, home))?;

        info!("Registered user {} with {} on {}", name, permission, home);
        Ok(())
    }

    /// Unregisters a user and revokes every grant it held, so a later user
    /// of the same name starts from a clean slate. Nodes it owns keep their
    /// owner name.
    pub fn remove_user(&mut self, name: &str) -> Result<(), RegistryError> {
        self.users.remove(name)?;
        let revoked = self.tree.revoke_all(name);
        info!("Removed user {} ({} grants revoked)", name, revoked);
        Ok(())
    }

    /// Registers every entry of a users file, stopping at the first failure.
    ///
    /// Entries naming an already registered user are skipped with a warning.
    pub fn bootstrap(&mut self, entries: &[UserEntry]) -> Result<usize, LoadError> {
        let mut added = 0;
        for entry in entries {
            match self.add_user(&entry.name, &entry.permission, &entry.home) {
                Ok(()) => added += 1,
                Err(RegistryError::UserAlreadyExists(name)) => {
                    warn!("Skipping duplicate user {} on line {}", name, entry.line);
                }
                Err(source) => {
                    return Err(LoadError::Registry {
                        line: entry.line,
                        source,
                    });
                }
            }
        }
        Ok(added)
    }

    /// Rejects users that are not registered.
    fn acting(&self, username: &str) -> FsResult<()> {
        if self.users.contains(username) {
            Ok(())
        } else {
            Err(FsError::PermissionDenied(format!(
                "unknown user {}",
                username
            )))
        }
    }

    pub fn mkdir(&mut self, path: &str, username: &str) -> FsResult<()> {
        self.acting(username)?;
        operations::mkdir(&mut self.tree, path, username).map(|_| ())
    }

    pub fn touch(&mut self, path: &str, username: &str) -> FsResult<()> {
        self.acting(username)?;
        operations::touch(&mut self.tree, path, username).map(|_| ())
    }

    /// Returns the number of removed nodes.
    pub fn rm(&mut self, path: &str, username: &str, recursive: bool) -> FsResult<usize> {
        self.acting(username)?;
        operations::rm(&mut self.tree, path, username, recursive)
    }

    /// Returns the file size after the write.
    pub fn write(&mut self, path: &str, username: &str, append: bool, buffer: &[u8]) -> FsResult<usize> {
        self.acting(username)?;
        operations::write(&mut self.tree, path, username, append, buffer)
    }

    /// Returns the number of bytes copied into `buffer`.
    pub fn read(
        &self,
        path: &str,
        username: &str,
        buffer: &mut [u8],
        offset: &mut Offset,
    ) -> FsResult<usize> {
        self.acting(username)?;
        operations::read(&self.tree, path, username, buffer, offset)
    }

    pub fn mv(&mut self, old_path: &str, new_path: &str, username: &str) -> FsResult<()> {
        self.acting(username)?;
        operations::mv(&mut self.tree, old_path, new_path, username)
    }

    pub fn cp(&mut self, src_path: &str, dst_path: &str, username: &str, recursive: bool) -> FsResult<()> {
        self.acting(username)?;
        operations::cp(&mut self.tree, src_path, dst_path, username, recursive).map(|_| ())
    }

    pub fn chmod(&mut self, path: &str, username: &str, target_user: &str, permission: &str) -> FsResult<()> {
        self.acting(username)?;
        let permission: Permission = permission.parse().map_err(|p| {
            FsError::InvalidOperation(format!("invalid permission string {:?}", p))
        })?;
        if !self.users.contains(target_user) {
            return Err(FsError::UnknownUser(target_user.to_string()));
        }
        operations::chmod(&mut self.tree, path, username, target_user, permission)
    }

    pub fn ls(&self, path: &str, username: &str, recursive: bool) -> FsResult<Listing> {
        self.acting(username)?;
        operations::ls(&self.tree, path, username, recursive)
    }

    /// Returns whether `path` currently resolves to a node.
    pub fn exists(&self, path: &str) -> bool {
        resolve(&self.tree, path).is_ok()
    }

    /// Size of the file at `path` in bytes, bypassing permissions.
    pub fn file_size(&self, path: &str) -> FsResult<usize> {
        let id = resolve(&self.tree, path)?;
        let node = self.tree.node(id)?;
        if node.is_dir() {
            return Err(FsError::InvalidOperation(format!("{} is a directory", path)));
        }
        Ok(node.size())
    }

    /// Snapshot of a file's bytes, bypassing permissions.
    pub fn file_content(&self, path: &str) -> FsResult<Vec<u8>> {
        let id = resolve(&self.tree, path)?;
        self.tree
            .node(id)?
            .content()
            .map(<[u8]>::to_vec)
            .ok_or_else(|| FsError::InvalidOperation(format!("{} is a directory", path)))
    }
}
