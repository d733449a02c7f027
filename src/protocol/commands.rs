//! Module `commands`
//!
//! Defines the shell commands and the data structures describing the result
//! of executing one.

/// A shell command parsed from one input line.
///
/// Commands that take arguments carry them already split; anything malformed
/// parses to `Unknown` with the original line.
#[derive(Debug, PartialEq, Eq)]
pub enum Command {
    Quit,
    Help,
    Whoami,
    User(String),
    AddUser {
        name: String,
        permission: String,
        home: String,
    },
    DelUser(String),
    Mkdir(String),
    Touch(String),
    Rm {
        path: String,
        recursive: bool,
    },
    Write {
        path: String,
        append: bool,
        text: String,
    },
    Read {
        path: String,
        len: Option<usize>,
    },
    Seek {
        path: String,
        offset: usize,
    },
    Mv {
        src: String,
        dst: String,
    },
    Cp {
        src: String,
        dst: String,
        recursive: bool,
    },
    Chmod {
        path: String,
        target: String,
        permission: String,
    },
    Ls {
        path: String,
        recursive: bool,
    },
    Unknown(String),
}

/// Represents the outcome status of executing a command.
#[derive(Debug, PartialEq, Eq)]
pub enum CommandStatus {
    Success,
    Failure(String),
    CloseConnection,
}

/// Struct encapsulating the full result of a command execution.
#[derive(Debug)]
pub struct CommandResult {
    pub status: CommandStatus,
    pub message: Option<String>,
}

impl CommandResult {
    pub fn success(message: String) -> Self {
        Self {
            status: CommandStatus::Success,
            message: Some(message),
        }
    }

    pub fn failure(reason: String, message: String) -> Self {
        Self {
            status: CommandStatus::Failure(reason),
            message: Some(message),
        }
    }
}
