//! Shell response handling
//!
//! Defines response codes and formatting.

pub const OK: u16 = 200;
pub const READY: u16 = 220;
pub const GOODBYE: u16 = 221;
pub const PATH_EXISTS: u16 = 450;
pub const INTERNAL_ERROR: u16 = 451;
pub const UNKNOWN_COMMAND: u16 = 500;
pub const PERMISSION_DENIED: u16 = 530;
pub const PATH_NOT_FOUND: u16 = 550;
pub const REGISTRY_ERROR: u16 = 551;
pub const INVALID_OPERATION: u16 = 553;

/// Format a single-line response
pub fn format_response(code: u16, message: &str) -> String {
    format!("{} {}\n", code, message)
}

/// Format a multi-line body followed by its status line
pub fn format_body_response(body: &str, code: u16, message: &str) -> String {
    let mut out = String::from(body);
    if !out.is_empty() && !out.ends_with('\n') {
        out.push('\n');
    }
    out.push_str(&format_response(code, message));
    out
}
