//! Storage operations
//!
//! Permission-checked tree mutators: create, remove, move, copy, read, write,
//! grant and list. Every operation validates and checks permissions before
//! its first structural edit, so a failing call leaves the tree untouched.

use log::{debug, info};

use crate::error::{FsError, FsResult};
use crate::navigate::{
    ParentLookup, is_same_or_nested, resolve, resolve_existing_prefix, resolve_parent,
};
use crate::storage::node::{Node, NodeId, NodeKind};
use crate::storage::permissions::{Permission, PermissionBit, ROOT_USER, has_permission};
use crate::storage::results::{EntryKind, ListEntry, Listing, Offset};
use crate::storage::tree::{Tree, join_path};
use crate::storage::validation::{
    is_root_path, normalize_path, split_path, validate_file_path, validate_segment,
};

/// Fails with `PermissionDenied` unless `username` holds `bit` on `id`.
fn require(tree: &Tree, id: NodeId, username: &str, bit: PermissionBit) -> FsResult<()> {
    if has_permission(tree.node(id)?, username, bit) {
        return Ok(());
    }
    let path = tree.path_of(id)?;
    debug!("Denied {:?} on {} to {}", bit, path, username);
    Err(FsError::PermissionDenied(format!(
        "{} lacks {:?} permission on {}",
        username, bit, path
    )))
}

/// Same as `require`, applied to `root` and every node below it.
fn require_subtree(tree: &Tree, root: NodeId, username: &str, bit: PermissionBit) -> FsResult<()> {
    if username == ROOT_USER {
        return Ok(());
    }
    for id in tree.descendants(root)? {
        require(tree, id, username, bit)?;
    }
    Ok(())
}

/// Existing child `leaf` of a resolved parent, or `PathNotFound`.
fn existing_child(tree: &Tree, lookup: &ParentLookup) -> FsResult<NodeId> {
    tree.child(lookup.parent, &lookup.leaf)?
        .ok_or_else(|| FsError::PathNotFound(join_path(&lookup.parent_path, &lookup.leaf)))
}

/// A fresh node owned by `username`, who gets full rights on it.
fn owned_node(node: Node, username: &str) -> Node {
    let mut node = node;
    node.set_permission(username, Permission::FULL);
    node
}

/// Creates every missing directory along `path`, left to right.
///
/// Existing directories are traversed, so the call is idempotent and `/` is a
/// no-op. The user needs write on the deepest existing directory; the
/// directories it creates are owned by, and fully granted to, that user.
pub fn mkdir(tree: &mut Tree, path: &str, username: &str) -> FsResult<NodeId> {
    if let Ok(existing) = resolve(tree, path) {
        if tree.node(existing)?.is_file() {
            return Err(FsError::PathAlreadyExists(normalize_path(path)));
        }
        return Ok(existing);
    }

    let partial = resolve_existing_prefix(tree, path)?;
    for segment in &partial.missing {
        validate_segment(segment)?;
    }
    require(tree, partial.deepest, username, PermissionBit::Write)?;

    let mut current = partial.deepest;
    for segment in &partial.missing {
        let node = owned_node(Node::directory(segment, username, None), username);
        current = tree.insert_child(current, node)?;
    }

    info!(
        "Created directory {} for {} ({} new segments)",
        normalize_path(path),
        username,
        partial.missing.len()
    );
    Ok(current)
}

/// Creates an empty file, creating missing parent directories first.
pub fn touch(tree: &mut Tree, path: &str, username: &str) -> FsResult<NodeId> {
    validate_file_path(path)?;
    let mut segments = split_path(path);
    let leaf = segments
        .pop()
        .ok_or_else(|| FsError::InvalidOperation("empty file path".into()))?;
    validate_segment(leaf)?;
    let parent_path = format!("/{}", segments.join("/"));

    if let Ok(parent) = resolve(tree, &parent_path) {
        if tree.node(parent)?.is_file() {
            return Err(FsError::InvalidOperation(format!(
                "{} is a file, not a directory",
                parent_path
            )));
        }
    }

    let parent = mkdir(tree, &parent_path, username)?;
    require(tree, parent, username, PermissionBit::Write)?;
    if tree.child(parent, leaf)?.is_some() {
        return Err(FsError::PathAlreadyExists(join_path(&parent_path, leaf)));
    }

    let id = tree.insert_child(parent, owned_node(Node::file(leaf, username, None), username))?;
    info!("Created file {} for {}", join_path(&parent_path, leaf), username);
    Ok(id)
}

/// Replaces or extends the content of a file. Returns the new size.
pub fn write(
    tree: &mut Tree,
    path: &str,
    username: &str,
    append: bool,
    buffer: &[u8],
) -> FsResult<usize> {
    let id = resolve(tree, path)?;
    if tree.node(id)?.is_dir() {
        return Err(FsError::InvalidOperation(format!(
            "cannot write to directory {}",
            normalize_path(path)
        )));
    }
    require(tree, id, username, PermissionBit::Write)?;

    let content = tree
        .node_mut(id)?
        .content_mut()
        .ok_or_else(|| FsError::Internal(format!("{} lost its content", path)))?;
    if !append {
        content.clear();
    }
    content.extend_from_slice(buffer);
    let size = content.len();

    info!(
        "{} {} bytes to {} for {} (size {})",
        if append { "Appended" } else { "Wrote" },
        buffer.len(),
        normalize_path(path),
        username,
        size
    );
    Ok(size)
}

/// Copies bytes from `offset` into `buffer` and advances `offset`.
///
/// The offset is first clamped to the file size; reading at or past the end
/// returns 0 without error.
pub fn read(
    tree: &Tree,
    path: &str,
    username: &str,
    buffer: &mut [u8],
    offset: &mut Offset,
) -> FsResult<usize> {
    let id = resolve(tree, path)?;
    let node = tree.node(id)?;
    let content = node.content().ok_or_else(|| {
        FsError::InvalidOperation(format!("cannot read directory {}", normalize_path(path)))
    })?;
    require(tree, id, username, PermissionBit::Read)?;

    offset.clamp_to(content.len());
    let start = offset.value();
    let count = buffer.len().min(content.len() - start);
    buffer[..count].copy_from_slice(&content[start..start + count]);
    offset.advance(count);

    debug!(
        "Read {} bytes from {} at offset {} for {}",
        count,
        normalize_path(path),
        start,
        username
    );
    Ok(count)
}

/// Removes a file or directory. Returns the number of removed nodes.
///
/// A non-empty directory needs `recursive`, and then the user must hold write
/// on every node of the subtree; the sweep runs before anything is detached.
pub fn rm(tree: &mut Tree, path: &str, username: &str, recursive: bool) -> FsResult<usize> {
    if is_root_path(path) {
        return Err(FsError::PermissionDenied(
            "the root directory cannot be removed".into(),
        ));
    }

    let lookup = resolve_parent(tree, path)?;
    let target = existing_child(tree, &lookup)?;
    require(tree, target, username, PermissionBit::Write)?;

    if !tree.node(target)?.children().is_empty() {
        if !recursive {
            return Err(FsError::InvalidOperation(format!(
                "directory {} is not empty",
                normalize_path(path)
            )));
        }
        require_subtree(tree, target, username, PermissionBit::Write)?;
    }

    let removed = tree.remove_subtree(target)?;
    info!(
        "Removed {} for {} ({} nodes)",
        normalize_path(path),
        username,
        removed
    );
    Ok(removed)
}

/// Relocates a node under an existing directory, renaming it to the last
/// segment of `new_path`.
pub fn mv(tree: &mut Tree, old_path: &str, new_path: &str, username: &str) -> FsResult<()> {
    if is_root_path(old_path) {
        return Err(FsError::InvalidOperation(
            "the root directory cannot be moved".into(),
        ));
    }
    if is_same_or_nested(old_path, new_path) {
        return Err(FsError::InvalidOperation(format!(
            "cannot move {} into itself",
            normalize_path(old_path)
        )));
    }

    let source = resolve_parent(tree, old_path)?;
    let target = existing_child(tree, &source)?;
    require(tree, target, username, PermissionBit::Write)?;

    let destination = resolve_parent(tree, new_path)?;
    validate_segment(&destination.leaf)?;
    if tree.child(destination.parent, &destination.leaf)?.is_some() {
        return Err(FsError::PathAlreadyExists(normalize_path(new_path)));
    }
    if tree.is_ancestor_or_self(target, destination.parent)? {
        return Err(FsError::InvalidOperation(format!(
            "cannot move {} below itself",
            normalize_path(old_path)
        )));
    }

    tree.detach(target)?;
    tree.attach(destination.parent, target, &destination.leaf)?;
    info!(
        "Moved {} to {} for {}",
        normalize_path(old_path),
        tree.path_of(target)?,
        username
    );
    Ok(())
}

/// Copies a file or, with `recursive`, a whole directory.
///
/// `dst_path` may name an existing directory, which receives the copy under
/// the source's name, or a free path whose parent directory exists. Copies are
/// owned by the copying user, who gets full rights on each copied node and no
/// other grants carry over.
pub fn cp(
    tree: &mut Tree,
    src_path: &str,
    dst_path: &str,
    username: &str,
    recursive: bool,
) -> FsResult<NodeId> {
    let source = resolve(tree, src_path)?;
    let (dest_dir, name) = match resolve(tree, dst_path) {
        Ok(existing) if tree.node(existing)?.is_dir() => {
            (existing, tree.node(source)?.name().to_string())
        }
        Ok(_) => return Err(FsError::PathAlreadyExists(normalize_path(dst_path))),
        Err(FsError::PathNotFound(_)) => {
            let lookup = resolve_parent(tree, dst_path)?;
            (lookup.parent, lookup.leaf)
        }
        Err(e) => return Err(e),
    };

    require(tree, source, username, PermissionBit::Read)?;
    require(tree, dest_dir, username, PermissionBit::Write)?;

    if tree.node(source)?.is_dir() {
        if !recursive {
            return Err(FsError::PermissionDenied(format!(
                "copying directory {} requires recursive mode",
                normalize_path(src_path)
            )));
        }
        if tree.is_ancestor_or_self(source, dest_dir)? {
            return Err(FsError::InvalidOperation(format!(
                "cannot copy {} into itself",
                normalize_path(src_path)
            )));
        }
        require_subtree(tree, source, username, PermissionBit::Read)?;
    }

    validate_segment(&name)?;
    if tree.child(dest_dir, &name)?.is_some() {
        let dest_path = tree.path_of(dest_dir)?;
        return Err(FsError::PathAlreadyExists(join_path(&dest_path, &name)));
    }

    let copy = clone_subtree(tree, source, dest_dir, &name, username)?;
    info!(
        "Copied {} to {} for {}",
        normalize_path(src_path),
        tree.path_of(copy)?,
        username
    );
    Ok(copy)
}

/// Clones `source` and everything below it under `dest_dir` as `name`.
///
/// `source` must not be an ancestor of `dest_dir`.
fn clone_subtree(
    tree: &mut Tree,
    source: NodeId,
    dest_dir: NodeId,
    name: &str,
    username: &str,
) -> FsResult<NodeId> {
    let (node, children) = {
        let original = tree.node(source)?;
        match original.kind() {
            NodeKind::File { content } => {
                let mut file = Node::file(name, username, None);
                if let Some(bytes) = file.content_mut() {
                    bytes.extend_from_slice(content);
                }
                (file, Vec::new())
            }
            NodeKind::Directory { children } => {
                (Node::directory(name, username, None), children.clone())
            }
        }
    };

    let copy = tree.insert_child(dest_dir, owned_node(node, username))?;
    for child in children {
        let child_name = tree.node(child)?.name().to_string();
        clone_subtree(tree, child, copy, &child_name, username)?;
    }
    Ok(copy)
}

/// Upserts `target_user`'s capability on the node at `path`.
pub fn chmod(
    tree: &mut Tree,
    path: &str,
    username: &str,
    target_user: &str,
    permission: Permission,
) -> FsResult<()> {
    let id = resolve(tree, path)?;
    require(tree, id, username, PermissionBit::Write)?;
    tree.node_mut(id)?.set_permission(target_user, permission);
    info!(
        "Granted {} to {} on {} by {}",
        permission,
        target_user,
        normalize_path(path),
        username
    );
    Ok(())
}

/// Lists a directory's children in insertion order, or a file by itself.
///
/// Recursive listings descend depth-first. A subdirectory the user cannot
/// read is still listed, flagged `denied`, and its children are skipped.
pub fn ls(tree: &Tree, path: &str, username: &str, recursive: bool) -> FsResult<Listing> {
    let id = resolve(tree, path)?;
    require(tree, id, username, PermissionBit::Read)?;

    let mut entries = Vec::new();
    if tree.node(id)?.is_file() {
        entries.push(list_entry(tree, id, username, 0)?);
    } else {
        collect_entries(tree, id, username, recursive, 0, &mut entries)?;
    }

    Ok(Listing {
        path: tree.path_of(id)?,
        entries,
    })
}

fn collect_entries(
    tree: &Tree,
    dir: NodeId,
    username: &str,
    recursive: bool,
    depth: usize,
    entries: &mut Vec<ListEntry>,
) -> FsResult<()> {
    for &child in tree.node(dir)?.children() {
        let mut entry = list_entry(tree, child, username, depth)?;
        let node = tree.node(child)?;
        if recursive && node.is_dir() {
            if has_permission(node, username, PermissionBit::Read) {
                entries.push(entry);
                collect_entries(tree, child, username, recursive, depth + 1, entries)?;
            } else {
                entry.denied = true;
                entries.push(entry);
            }
        } else {
            entries.push(entry);
        }
    }
    Ok(())
}

fn list_entry(tree: &Tree, id: NodeId, username: &str, depth: usize) -> FsResult<ListEntry> {
    let node = tree.node(id)?;
    let permission = if username == ROOT_USER {
        Permission::FULL
    } else {
        node.permission_for(username).unwrap_or(Permission::NONE)
    };

    Ok(ListEntry {
        depth,
        name: node.name().to_string(),
        kind: if node.is_dir() {
            EntryKind::Directory
        } else {
            EntryKind::File
        },
        owner: node.owner().to_string(),
        size: node.size(),
        permission: permission.to_string(),
        denied: false,
    })
}
