//! Node permissions
//!
//! Handles the 3-character `rwx` capability strings and the per-user
//! permission check applied by every tree operation.

use std::fmt;
use std::str::FromStr;

use crate::storage::node::Node;

/// The user that bypasses every permission check
pub const ROOT_USER: &str = "root";

/// A single capability bit
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PermissionBit {
    Read,
    Write,
    Execute,
}

impl PermissionBit {
    fn symbol(self) -> char {
        match self {
            PermissionBit::Read => 'r',
            PermissionBit::Write => 'w',
            PermissionBit::Execute => 'x',
        }
    }
}

/// A parsed capability string such as `rw-`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct Permission {
    read: bool,
    write: bool,
    execute: bool,
}

impl Permission {
    pub const FULL: Permission = Permission {
        read: true,
        write: true,
        execute: true,
    };

    pub const NONE: Permission = Permission {
        read: false,
        write: false,
        execute: false,
    };

    /// Returns whether this capability grants `bit`.
    pub fn grants(&self, bit: PermissionBit) -> bool {
        match bit {
            PermissionBit::Read => self.read,
            PermissionBit::Write => self.write,
            PermissionBit::Execute => self.execute,
        }
    }
}

impl FromStr for Permission {
    type Err = String;

    /// Parses exactly three positional characters over `{r,-}{w,-}{x,-}`.
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let chars: Vec<char> = s.chars().collect();
        if chars.len() != 3 {
            return Err(s.to_string());
        }

        let bits = [PermissionBit::Read, PermissionBit::Write, PermissionBit::Execute];
        let mut flags = [false; 3];
        for (i, (c, bit)) in chars.iter().zip(bits).enumerate() {
            if *c == bit.symbol() {
                flags[i] = true;
            } else if *c != '-' {
                return Err(s.to_string());
            }
        }

        Ok(Permission {
            read: flags[0],
            write: flags[1],
            execute: flags[2],
        })
    }
}

impl fmt::Display for Permission {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for bit in [PermissionBit::Read, PermissionBit::Write, PermissionBit::Execute] {
            let c = if self.grants(bit) { bit.symbol() } else { '-' };
            write!(f, "{}", c)?;
        }
        Ok(())
    }
}

/// Checks whether `username` holds `bit` on `node`.
///
/// `root` always passes. Otherwise only an explicit grant on the node itself
/// counts; there is no "other" class and no inheritance from ancestors.
pub fn has_permission(node: &Node, username: &str, bit: PermissionBit) -> bool {
    if username == ROOT_USER {
        return true;
    }
    node.permission_for(username)
        .is_some_and(|permission| permission.grants(bit))
}
