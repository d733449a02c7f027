//! Users file loading
//!
//! Parses the line-oriented bootstrap list of users. Each non-blank line not
//! starting with `#` reads `name home permission`.

use log::info;
use std::path::Path;

use crate::auth::user::UserEntry;
use crate::error::LoadError;

/// Parses the users file text into raw entries.
pub fn parse_users(text: &str) -> Result<Vec<UserEntry>, LoadError> {
    let mut entries = Vec::new();

    for (index, raw) in text.lines().enumerate() {
        let line = index + 1;
        let trimmed = raw.trim();
        if trimmed.is_empty() || trimmed.starts_with('#') {
            continue;
        }

        let fields: Vec<&str> = trimmed.split_whitespace().collect();
        match fields.as_slice() {
            [name, home, permission] => entries.push(UserEntry {
                line,
                name: name.to_string(),
                home: home.to_string(),
                permission: permission.to_string(),
            }),
            _ => {
                return Err(LoadError::Malformed {
                    line,
                    reason: format!("expected `name home permission`, got {:?}", trimmed),
                });
            }
        }
    }

    Ok(entries)
}

/// Reads and parses a users file.
pub async fn load_users_file(path: &Path) -> Result<Vec<UserEntry>, LoadError> {
    let text = tokio::fs::read_to_string(path).await?;
    let entries = parse_users(&text)?;
    info!("Loaded {} user entries from {}", entries.len(), path.display());
    Ok(entries)
}
