//! Storage result types
//!
//! Defines result structures returned by storage operations.

use std::fmt;

/// Read cursor carried between successive `read` calls on the same file.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct Offset(usize);

impl Offset {
    pub fn new(value: usize) -> Self {
        Self(value)
    }

    pub fn value(&self) -> usize {
        self.0
    }

    pub(crate) fn clamp_to(&mut self, size: usize) {
        self.0 = self.0.min(size);
    }

    pub(crate) fn advance(&mut self, by: usize) {
        self.0 += by;
    }
}

/// Kind of a listed node
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum EntryKind {
    Directory,
    File,
}

/// One line of a directory listing
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ListEntry {
    /// 0 for direct children of the listed directory
    pub depth: usize,
    pub name: String,
    pub kind: EntryKind,
    pub owner: String,
    pub size: usize,
    /// The listing user's own capability on the entry, `---` when absent
    pub permission: String,
    /// Set on directories the listing user could not read during a
    /// recursive listing; their children are not included.
    pub denied: bool,
}

/// Result of a directory listing operation
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Listing {
    pub path: String,
    pub entries: Vec<ListEntry>,
}

impl Listing {
    /// Human-readable rendering, one line per entry, two spaces per level.
    pub fn render(&self) -> String {
        let mut out = String::new();
        for entry in &self.entries {
            out.push_str(&entry.to_string());
            out.push('\n');
        }
        out
    }
}

impl fmt::Display for ListEntry {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let kind = match self.kind {
            EntryKind::Directory => 'd',
            EntryKind::File => '-',
        };
        let suffix = if self.kind == EntryKind::Directory { "/" } else { "" };
        write!(
            f,
            "{}{}{} {:<8} {:>8} {}{}",
            "  ".repeat(self.depth),
            kind,
            self.permission,
            self.owner,
            self.size,
            self.name,
            suffix
        )?;
        if self.denied {
            write!(f, " (permission denied)")?;
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_offset_clamp_and_advance() {
        let mut offset = Offset::new(10);
        offset.clamp_to(4);
        assert_eq!(offset.value(), 4);
        offset.advance(3);
        assert_eq!(offset.value(), 7);
    }

    #[test]
    fn test_render_indents_by_depth() {
        let listing = Listing {
            path: "/".into(),
            entries: vec![
                ListEntry {
                    depth: 0,
                    name: "home".into(),
                    kind: EntryKind::Directory,
                    owner: "root".into(),
                    size: 0,
                    permission: "rwx".into(),
                    denied: false,
                },
                ListEntry {
                    depth: 1,
                    name: "notes.txt".into(),
                    kind: EntryKind::File,
                    owner: "alice".into(),
                    size: 5,
                    permission: "r--".into(),
                    denied: true,
                },
            ],
        };

        let text = listing.render();
        let lines: Vec<&str> = text.lines().collect();
        assert_eq!(lines.len(), 2);
        assert!(lines[0].starts_with("drwx root"));
        assert!(lines[0].ends_with("home/"));
        assert!(lines[1].starts_with("  -r-- alice"));
        assert!(lines[1].ends_with("notes.txt (permission denied)"));
    }
}
