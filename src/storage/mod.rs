//! In-memory storage
//!
//! Handles the node arena, permissions, path validation and the tree
//! operations built on them.

pub mod node;
pub mod operations;
pub mod permissions;
pub mod results;
pub mod tree;
pub mod validation;

// Re-export commonly used types
pub use node::{Node, NodeId, NodeKind};
pub use permissions::{Permission, PermissionBit, ROOT_USER, has_permission};
pub use results::{EntryKind, ListEntry, Listing, Offset};
pub use tree::Tree;
