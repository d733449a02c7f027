//! Tree arena
//!
//! Owns every node of the namespace, addressed by `NodeId`. Structural edits
//! (attach, detach, free) only rewrite handles; they never deep-copy.

use std::collections::HashMap;

use crate::error::{FsError, FsResult};
use crate::storage::node::{Node, NodeId};
use crate::storage::permissions::{Permission, ROOT_USER};

/// Arena of nodes rooted at `NodeId::ROOT`.
#[derive(Debug, Clone)]
pub struct Tree {
    nodes: HashMap<NodeId, Node>,
    next_id: u64,
}

impl Default for Tree {
    fn default() -> Self {
        Self::new()
    }
}

impl Tree {
    /// Creates a tree holding only the root directory `/`, owned by `root`.
    pub fn new() -> Self {
        let mut root = Node::directory("/", ROOT_USER, None);
        root.set_permission(ROOT_USER, Permission::FULL);

        let mut nodes = HashMap::new();
        nodes.insert(NodeId::ROOT, root);
        Self { nodes, next_id: 1 }
    }

    pub fn root(&self) -> NodeId {
        NodeId::ROOT
    }

    /// Number of live nodes, root included.
    pub fn len(&self) -> usize {
        self.nodes.len()
    }

    pub fn is_empty(&self) -> bool {
        self.nodes.is_empty()
    }

    /// Removes every grant `username` holds anywhere in the tree. Returns the
    /// number of nodes that lost a grant.
    pub fn revoke_all(&mut self, username: &str) -> usize {
        self.nodes
            .values_mut()
            .filter_map(|node| node.revoke(username).then_some(()))
            .count()
    }

    pub fn node(&self, id: NodeId) -> FsResult<&Node> {
        self.nodes
            .get(&id)
            .ok_or_else(|| FsError::Internal(format!("dangling node handle {:?}", id)))
    }

    pub fn node_mut(&mut self, id: NodeId) -> FsResult<&mut Node> {
        self.nodes
            .get_mut(&id)
            .ok_or_else(|| FsError::Internal(format!("dangling node handle {:?}", id)))
    }

    /// Looks up a direct child of `dir` by exact name.
    pub fn child(&self, dir: NodeId, name: &str) -> FsResult<Option<NodeId>> {
        for &child in self.node(dir)?.children() {
            if self.node(child)?.name() == name {
                return Ok(Some(child));
            }
        }
        Ok(None)
    }

    /// Allocates `node` and links it as the last child of `parent`.
    pub fn insert_child(&mut self, parent: NodeId, node: Node) -> FsResult<NodeId> {
        let id = NodeId(self.next_id);
        self.next_id += 1;

        let name = node.name().to_string();
        self.nodes.insert(id, node);
        if let Err(e) = self.attach(parent, id, &name) {
            self.nodes.remove(&id);
            return Err(e);
        }
        Ok(id)
    }

    /// Links an allocated, parentless node under `parent` as `name`.
    pub fn attach(&mut self, parent: NodeId, id: NodeId, name: &str) -> FsResult<()> {
        if self.node(parent)?.is_file() {
            let parent_path = self.path_of(parent)?;
            return Err(FsError::InvalidOperation(format!("{} is a file", parent_path)));
        }
        if self.child(parent, name)?.is_some() {
            let parent_path = self.path_of(parent)?;
            return Err(FsError::PathAlreadyExists(join_path(&parent_path, name)));
        }

        if let Some(children) = self.node_mut(parent)?.children_mut() {
            children.push(id);
        }

        let node = self.node_mut(id)?;
        node.set_name(name);
        node.set_parent(Some(parent));
        Ok(())
    }

    /// Unlinks `id` from its parent, leaving it allocated but unreachable.
    pub fn detach(&mut self, id: NodeId) -> FsResult<()> {
        let parent = self
            .node(id)?
            .parent()
            .ok_or_else(|| FsError::Internal("the root directory cannot be detached".into()))?;

        if let Some(children) = self.node_mut(parent)?.children_mut() {
            children.retain(|&child| child != id);
        }
        self.node_mut(id)?.set_parent(None);
        Ok(())
    }

    /// Detaches `id` and frees it with all its descendants.
    ///
    /// Returns the number of freed nodes.
    pub fn remove_subtree(&mut self, id: NodeId) -> FsResult<usize> {
        let doomed = self.descendants(id)?;
        self.detach(id)?;
        for node in &doomed {
            self.nodes.remove(node);
        }
        Ok(doomed.len())
    }

    /// `id` followed by every node below it, depth-first pre-order.
    pub fn descendants(&self, id: NodeId) -> FsResult<Vec<NodeId>> {
        let mut out = Vec::new();
        let mut stack = vec![id];
        while let Some(current) = stack.pop() {
            out.push(current);
            // Reverse so that children pop in insertion order
            stack.extend(self.node(current)?.children().iter().rev());
        }
        Ok(out)
    }

    /// Returns whether `ancestor` is `id` or lies on its parent chain.
    pub fn is_ancestor_or_self(&self, ancestor: NodeId, id: NodeId) -> FsResult<bool> {
        let mut current = Some(id);
        while let Some(node) = current {
            if node == ancestor {
                return Ok(true);
            }
            current = self.node(node)?.parent();
        }
        Ok(false)
    }

    /// Derives the absolute path of `id` from its lineage.
    pub fn path_of(&self, id: NodeId) -> FsResult<String> {
        let mut segments = Vec::new();
        let mut current = id;
        while let Some(parent) = self.node(current)?.parent() {
            segments.push(self.node(current)?.name().to_string());
            current = parent;
        }
        if current != NodeId::ROOT {
            return Err(FsError::Internal(format!(
                "node {:?} is not reachable from the root",
                id
            )));
        }
        segments.reverse();
        Ok(format!("/{}", segments.join("/")))
    }
}

/// Joins a parent path and a leaf name without doubling the root slash.
pub fn join_path(parent: &str, name: &str) -> String {
    if parent.ends_with('/') {
        format!("{}{}", parent, name)
    } else {
        format!("{}/{}", parent, name)
    }
}
