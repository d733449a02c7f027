//! Module `state`
//!
//! Defines the `Session` struct holding per-session shell state: the acting
//! user and the read offsets recorded for each file.

use std::collections::HashMap;

use crate::navigate::is_same_or_nested;
use crate::storage::Offset;
use crate::storage::validation::normalize_path;

/// State of one interactive shell session.
#[derive(Debug, Clone)]
pub struct Session {
    username: String,
    offsets: HashMap<String, Offset>,
}

impl Session {
    pub fn new(username: &str) -> Self {
        Self {
            username: username.to_string(),
            offsets: HashMap::new(),
        }
    }

    /// Returns the user commands are issued on behalf of.
    pub fn username(&self) -> &str {
        &self.username
    }

    /// Switches the acting user. Recorded offsets are dropped.
    pub fn set_username(&mut self, username: &str) {
        self.username = username.to_string();
        self.offsets.clear();
    }

    /// Recorded read offset for `path`, starting at 0.
    pub fn offset(&self, path: &str) -> Offset {
        self.offsets
            .get(&normalize_path(path))
            .copied()
            .unwrap_or_default()
    }

    pub fn set_offset(&mut self, path: &str, offset: Offset) {
        self.offsets.insert(normalize_path(path), offset);
    }

    /// Drops offsets recorded for `path` and anything below it.
    pub fn forget(&mut self, path: &str) {
        self.offsets.retain(|recorded, _| !is_same_or_nested(path, recorded));
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_offsets_are_keyed_by_normalized_path() {
        let mut session = Session::new("alice");
        session.set_offset("//a/f/", Offset::new(4));
        assert_eq!(session.offset("/a/f").value(), 4);
        assert_eq!(session.offset("/a/g").value(), 0);
    }

    #[test]
    fn test_forget_subtree() {
        let mut session = Session::new("alice");
        session.set_offset("/a/f", Offset::new(1));
        session.set_offset("/ab", Offset::new(2));
        session.forget("/a");
        assert_eq!(session.offset("/a/f").value(), 0);
        assert_eq!(session.offset("/ab").value(), 2);
    }

    #[test]
    fn test_switching_user_resets_offsets() {
        let mut session = Session::new("alice");
        session.set_offset("/f", Offset::new(3));
        session.set_username("bob");
        assert_eq!(session.username(), "bob");
        assert_eq!(session.offset("/f").value(), 0);
    }
}
