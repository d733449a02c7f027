//! Navigate module
//!
//! Handles path resolution from the root of the tree, including parent/leaf
//! splitting for operations that edit a directory's children.

mod operations;
mod results;

// Re-export public types and functions
pub use operations::{is_same_or_nested, resolve, resolve_existing_prefix, resolve_parent};
pub use results::{ParentLookup, PartialResolution};
