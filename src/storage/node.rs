//! Node model
//!
//! Defines the two node variants held in the tree arena.

use std::collections::HashMap;

use crate::storage::permissions::Permission;

/// Stable handle of a node inside the tree arena.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct NodeId(pub(crate) u64);

impl NodeId {
    /// The root directory is always the first node allocated.
    pub const ROOT: NodeId = NodeId(0);
}

/// What a node holds.
///
/// A directory keeps its children in insertion order; a file keeps bytes.
/// There is no way to express a file with children.
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum NodeKind {
    Directory { children: Vec<NodeId> },
    File { content: Vec<u8> },
}

/// A directory or a file.
///
/// The node records its own segment name and its parent handle; its absolute
/// path is derived by walking parents, so relocating a subtree only touches
/// the moved node.
#[derive(Clone, Debug)]
pub struct Node {
    name: String,
    owner: String,
    permissions: HashMap<String, Permission>,
    parent: Option<NodeId>,
    kind: NodeKind,
}

impl Node {
    pub fn directory(name: &str, owner: &str, parent: Option<NodeId>) -> Self {
        Self::new(name, owner, parent, NodeKind::Directory { children: Vec::new() })
    }

    pub fn file(name: &str, owner: &str, parent: Option<NodeId>) -> Self {
        Self::new(name, owner, parent, NodeKind::File { content: Vec::new() })
    }

    fn new(name: &str, owner: &str, parent: Option<NodeId>, kind: NodeKind) -> Self {
        Self {
            name: name.to_string(),
            owner: owner.to_string(),
            permissions: HashMap::new(),
            parent,
            kind,
        }
    }

    // --------------------
    // Getter methods
    // --------------------

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn owner(&self) -> &str {
        &self.owner
    }

    pub fn parent(&self) -> Option<NodeId> {
        self.parent
    }

    pub fn kind(&self) -> &NodeKind {
        &self.kind
    }

    pub fn is_file(&self) -> bool {
        matches!(self.kind, NodeKind::File { .. })
    }

    pub fn is_dir(&self) -> bool {
        matches!(self.kind, NodeKind::Directory { .. })
    }

    /// Explicit grant for `username`, if any.
    pub fn permission_for(&self, username: &str) -> Option<Permission> {
        self.permissions.get(username).copied()
    }

    /// Children in insertion order; empty for files.
    pub fn children(&self) -> &[NodeId] {
        match &self.kind {
            NodeKind::Directory { children } => children,
            NodeKind::File { .. } => &[],
        }
    }

    /// File content; `None` for directories.
    pub fn content(&self) -> Option<&[u8]> {
        match &self.kind {
            NodeKind::File { content } => Some(content),
            NodeKind::Directory { .. } => None,
        }
    }

    /// Content length for files, 0 for directories.
    pub fn size(&self) -> usize {
        self.content().map_or(0, <[u8]>::len)
    }

    // --------------------
    // Setter methods
    // --------------------

    /// Upserts the grant for `username` on this node only.
    pub fn set_permission(&mut self, username: &str, permission: Permission) {
        self.permissions.insert(username.to_string(), permission);
    }

    /// Drops any grant held by `username`. Returns whether one existed.
    pub(crate) fn revoke(&mut self, username: &str) -> bool {
        self.permissions.remove(username).is_some()
    }

    pub(crate) fn set_name(&mut self, name: &str) {
        self.name = name.to_string();
    }

    pub(crate) fn set_parent(&mut self, parent: Option<NodeId>) {
        self.parent = parent;
    }

    pub(crate) fn children_mut(&mut self) -> Option<&mut Vec<NodeId>> {
        match &mut self.kind {
            NodeKind::Directory { children } => Some(children),
            NodeKind::File { .. } => None,
        }
    }

    pub(crate) fn content_mut(&mut self) -> Option<&mut Vec<u8>> {
        match &mut self.kind {
            NodeKind::File { content } => Some(content),
            NodeKind::Directory { .. } => None,
        }
    }
}
