//! Command handlers for the treefs shell.
//!
//! Each handler runs one command against the file system on behalf of the
//! session's acting user and turns the outcome into a response.

use log::{error, info, warn};

use crate::client::Session;
use crate::config::ShellConfig;
use crate::error::handlers::{fs_error_code, registry_error_code};
use crate::error::{FsError, RegistryError};
use crate::filesystem::FileSystem;
use crate::protocol::responses::{self, format_body_response, format_response};
use crate::protocol::{Command, CommandResult, CommandStatus};
use crate::storage::Offset;

const HELP_TEXT: &str = "\
USER <name>                     switch acting user
WHOAMI                          show acting user
ADDUSER <name> <perm> <home>    register a user
DELUSER <name>                  unregister a user
MKDIR <path>                    create directories
TOUCH <path>                    create an empty file
RM [-r] <path>                  remove a file or directory
WRITE [-a] <path> <text>        replace or append file content; text starts
                                after the single space following <path>
READ <path> [len]               read from the recorded offset
SEEK <path> <offset>            set the recorded offset
MV <src> <dst>                  move or rename
CP [-r] <src> <dst>             copy
CHMOD <path> <user> <perm>      grant a permission
LS [-r] [path]                  list a directory
QUIT                            end the session";

/// Dispatches a parsed command to its handler.
pub fn handle_command(
    fs: &mut FileSystem,
    session: &mut Session,
    command: &Command,
    config: &ShellConfig,
) -> CommandResult {
    match command {
        Command::Quit => handle_cmd_quit(session),
        Command::Help => CommandResult::success(format_body_response(
            HELP_TEXT,
            responses::OK,
            "End of help",
        )),
        Command::Whoami => CommandResult::success(format_response(
            responses::OK,
            session.username(),
        )),
        Command::User(name) => handle_cmd_user(fs, session, name),
        Command::AddUser {
            name,
            permission,
            home,
        } => registry_result(fs.add_user(name, permission, home), || {
            format!("User {} added", name)
        }),
        Command::DelUser(name) => {
            registry_result(fs.remove_user(name), || format!("User {} removed", name))
        }
        Command::Mkdir(path) => fs_result(fs.mkdir(path, session.username()), |_| {
            format!("Directory {} ready", path)
        }),
        Command::Touch(path) => fs_result(fs.touch(path, session.username()), |_| {
            format!("File {} created", path)
        }),
        Command::Rm { path, recursive } => {
            let result = fs.rm(path, session.username(), *recursive);
            if result.is_ok() {
                session.forget(path);
            }
            fs_result(result, |count| format!("Removed {} ({} nodes)", path, count))
        }
        Command::Write { path, append, text } => fs_result(
            fs.write(path, session.username(), *append, text.as_bytes()),
            |size| format!("Wrote {} bytes to {} (size {})", text.len(), path, size),
        ),
        Command::Read { path, len } => {
            handle_cmd_read(fs, session, path, len.unwrap_or(config.default_read_size))
        }
        Command::Seek { path, offset } => {
            session.set_offset(path, Offset::new(*offset));
            CommandResult::success(format_response(
                responses::OK,
                &format!("Offset of {} set to {}", path, offset),
            ))
        }
        Command::Mv { src, dst } => {
            let result = fs.mv(src, dst, session.username());
            if result.is_ok() {
                session.forget(src);
            }
            fs_result(result, |_| format!("Moved {} to {}", src, dst))
        }
        Command::Cp {
            src,
            dst,
            recursive,
        } => fs_result(fs.cp(src, dst, session.username(), *recursive), |_| {
            format!("Copied {} to {}", src, dst)
        }),
        Command::Chmod {
            path,
            target,
            permission,
        } => fs_result(
            fs.chmod(path, session.username(), target, permission),
            |_| format!("Granted {} to {} on {}", permission, target, path),
        ),
        Command::Ls { path, recursive } => match fs.ls(path, session.username(), *recursive) {
            Ok(listing) => CommandResult::success(format_body_response(
                &listing.render(),
                responses::OK,
                &format!("{} entries in {}", listing.entries.len(), listing.path),
            )),
            Err(e) => fs_failure(&e),
        },
        Command::Unknown(raw) => handle_cmd_unknown(raw),
    }
}

/// Handles QUIT: signals the end of the session.
fn handle_cmd_quit(session: &Session) -> CommandResult {
    info!("Session of {} ending", session.username());
    CommandResult {
        status: CommandStatus::CloseConnection,
        message: Some(format_response(responses::GOODBYE, "Goodbye")),
    }
}

/// Handles USER: switches the acting user if it is registered.
fn handle_cmd_user(fs: &FileSystem, session: &mut Session, name: &str) -> CommandResult {
    if !fs.users().contains(name) {
        return registry_failure(&RegistryError::UserNotFound(name.to_string()));
    }
    session.set_username(name);
    info!("Acting user is now {}", name);
    CommandResult::success(format_response(
        responses::OK,
        &format!("Acting as {}", name),
    ))
}

/// Handles READ: reads up to `len` bytes from the session's recorded offset
/// and records the advanced offset.
fn handle_cmd_read(
    fs: &FileSystem,
    session: &mut Session,
    path: &str,
    len: usize,
) -> CommandResult {
    let mut offset = session.offset(path);
    // Never allocate more than the file can yield from this offset
    let available = fs
        .file_size(path)
        .map(|size| size.saturating_sub(offset.value()))
        .unwrap_or(0);
    let mut buffer = vec![0u8; len.min(available)];
    match fs.read(path, session.username(), &mut buffer, &mut offset) {
        Ok(count) => {
            session.set_offset(path, offset);
            let body = String::from_utf8_lossy(&buffer[..count]);
            CommandResult::success(format_body_response(
                &body,
                responses::OK,
                &format!("Read {} bytes (offset {})", count, offset.value()),
            ))
        }
        Err(e) => fs_failure(&e),
    }
}

fn handle_cmd_unknown(raw: &str) -> CommandResult {
    warn!("Unknown or malformed command: {:?}", raw);
    CommandResult::failure(
        "Unknown command".into(),
        format_response(
            responses::UNKNOWN_COMMAND,
            "Unknown or malformed command (try HELP)",
        ),
    )
}

fn fs_result<T>(result: Result<T, FsError>, message: impl FnOnce(T) -> String) -> CommandResult {
    match result {
        Ok(value) => CommandResult::success(format_response(responses::OK, &message(value))),
        Err(e) => fs_failure(&e),
    }
}

fn fs_failure(err: &FsError) -> CommandResult {
    if let FsError::Internal(_) = err {
        error!("Internal file system error: {}", err);
    }
    CommandResult::failure(
        err.to_string(),
        format_response(fs_error_code(err), &err.to_string()),
    )
}

fn registry_result(result: Result<(), RegistryError>, message: impl FnOnce() -> String) -> CommandResult {
    match result {
        Ok(()) => CommandResult::success(format_response(responses::OK, &message())),
        Err(e) => registry_failure(&e),
    }
}

fn registry_failure(err: &RegistryError) -> CommandResult {
    CommandResult::failure(
        err.to_string(),
        format_response(registry_error_code(err), &err.to_string()),
    )
}
