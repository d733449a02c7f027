//! Path resolution implementation

use crate::error::{FsError, FsResult};
use crate::navigate::results::{ParentLookup, PartialResolution};
use crate::storage::node::NodeId;
use crate::storage::tree::{Tree, join_path};
use crate::storage::validation::split_path;

/// Walks `path` from the root and returns the node it names.
///
/// Fails with `PathNotFound` carrying the first missing prefix, or with
/// `InvalidOperation` when a file sits in the middle of the path.
pub fn resolve(tree: &Tree, path: &str) -> FsResult<NodeId> {
    let mut current = tree.root();
    let mut prefix = String::from("/");

    for segment in split_path(path) {
        if tree.node(current)?.is_file() {
            return Err(FsError::InvalidOperation(format!(
                "cannot descend into file {}",
                prefix
            )));
        }
        prefix = join_path(&prefix, segment);
        current = tree
            .child(current, segment)?
            .ok_or_else(|| FsError::PathNotFound(prefix.clone()))?;
    }

    Ok(current)
}

/// Resolves the parent directory of `path` and returns it with the leaf name.
///
/// The leaf itself need not exist.
pub fn resolve_parent(tree: &Tree, path: &str) -> FsResult<ParentLookup> {
    let mut segments = split_path(path);
    let leaf = segments
        .pop()
        .ok_or_else(|| FsError::InvalidOperation("the root directory has no parent".into()))?;

    let parent_path = format!("/{}", segments.join("/"));
    let parent = resolve(tree, &parent_path)?;
    if tree.node(parent)?.is_file() {
        return Err(FsError::InvalidOperation(format!(
            "{} is a file, not a directory",
            parent_path
        )));
    }

    Ok(ParentLookup {
        parent,
        parent_path,
        leaf: leaf.to_string(),
    })
}

/// Follows `path` through existing directories as far as possible.
///
/// Fails with `InvalidOperation` if an existing segment is a file.
pub fn resolve_existing_prefix(tree: &Tree, path: &str) -> FsResult<PartialResolution> {
    let segments = split_path(path);
    let mut deepest = tree.root();
    let mut deepest_path = String::from("/");

    for (i, segment) in segments.iter().enumerate() {
        match tree.child(deepest, segment)? {
            Some(child) => {
                let child_path = join_path(&deepest_path, segment);
                if tree.node(child)?.is_file() {
                    return Err(FsError::InvalidOperation(format!(
                        "{} is a file, not a directory",
                        child_path
                    )));
                }
                deepest = child;
                deepest_path = child_path;
            }
            None => {
                return Ok(PartialResolution {
                    deepest,
                    deepest_path,
                    missing: segments[i..].iter().map(|s| s.to_string()).collect(),
                });
            }
        }
    }

    Ok(PartialResolution {
        deepest,
        deepest_path,
        missing: Vec::new(),
    })
}

/// Returns whether `inner` names `outer` or a path below it, segment-wise.
pub fn is_same_or_nested(outer: &str, inner: &str) -> bool {
    let outer = split_path(outer);
    let inner = split_path(inner);
    inner.len() >= outer.len() && inner[..outer.len()] == outer[..]
}
