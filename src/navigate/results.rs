//! Result types for navigate operations

use crate::storage::node::NodeId;

/// The directory that holds (or would hold) the last segment of a path.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ParentLookup {
    pub parent: NodeId,
    pub parent_path: String,
    pub leaf: String,
}

/// How far a path could be followed through existing directories.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PartialResolution {
    /// Deepest existing directory on the path
    pub deepest: NodeId,
    pub deepest_path: String,
    /// Segments below `deepest` that do not exist yet
    pub missing: Vec<String>,
}
