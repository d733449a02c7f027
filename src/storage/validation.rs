//! Path validation
//!
//! Handles path tokenisation and checks on user-supplied names.

use crate::error::{FsError, FsResult};

/// Splits a `/`-delimited path into its non-empty segments.
///
/// `/a//b/`, `a/b` and `/a/b` all yield `["a", "b"]`.
pub fn split_path(path: &str) -> Vec<&str> {
    path.split('/').filter(|s| !s.is_empty()).collect()
}

/// Returns whether `path` denotes the root directory.
pub fn is_root_path(path: &str) -> bool {
    split_path(path).is_empty()
}

/// Canonical form of `path`: leading slash, single separators, no trailing slash.
pub fn normalize_path(path: &str) -> String {
    format!("/{}", split_path(path).join("/"))
}

/// Validate that a name can be given to a new node
pub fn validate_segment(name: &str) -> FsResult<()> {
    if name.is_empty() || name == "." || name == ".." || name.contains('\0') {
        return Err(FsError::InvalidOperation(format!("invalid name: {:?}", name)));
    }
    Ok(())
}

/// Validate that `path` is shaped like a file: not root, no trailing slash.
pub fn validate_file_path(path: &str) -> FsResult<()> {
    if is_root_path(path) {
        return Err(FsError::InvalidOperation(
            "the root directory is not a file".into(),
        ));
    }
    if path.ends_with('/') {
        return Err(FsError::InvalidOperation(format!(
            "file path cannot end with '/': {}",
            path
        )));
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_split_ignores_empty_segments() {
        assert_eq!(split_path("/a//b/"), vec!["a", "b"]);
        assert_eq!(split_path("a/b"), vec!["a", "b"]);
        assert!(split_path("/").is_empty());
        assert!(split_path("").is_empty());
    }

    #[test]
    fn test_normalize() {
        assert_eq!(normalize_path("//a///b/"), "/a/b");
        assert_eq!(normalize_path("/"), "/");
    }

    #[test]
    fn test_validate_segment() {
        assert!(validate_segment("notes.txt").is_ok());
        assert!(validate_segment("..").is_err());
        assert!(validate_segment(".").is_err());
        assert!(validate_segment("").is_err());
    }

    #[test]
    fn test_validate_file_path() {
        assert!(validate_file_path("/home/a.txt").is_ok());
        assert!(validate_file_path("/").is_err());
        assert!(validate_file_path("//").is_err());
        assert!(validate_file_path("/home/dir/").is_err());
    }
}
