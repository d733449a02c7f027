//! Command parsing
//!
//! Turns a raw input line into a `Command`.

use crate::protocol::Command;

/// Strips a leading flag such as `-r` from an argument string.
fn take_flag<'a>(arg: &'a str, flag: &str) -> (bool, &'a str) {
    match arg.split_once(char::is_whitespace) {
        Some((first, rest)) if first == flag => (true, rest.trim_start()),
        None if arg == flag => (true, ""),
        _ => (false, arg),
    }
}

/// Splits an argument string into whitespace-separated words.
fn words(arg: &str) -> Vec<String> {
    arg.split_whitespace().map(str::to_string).collect()
}

/// Parses a raw line into the `Command` enum.
///
/// The verb is case-insensitive. Returns `Unknown` if a known command is
/// missing arguments or has too many.
pub fn parse_command(raw: &str) -> Command {
    let trimmed = raw.trim();
    let mut parts = trimmed.splitn(2, char::is_whitespace);
    let cmd = parts.next().unwrap_or("").to_ascii_uppercase();
    let arg = parts.next().unwrap_or("").trim();
    let unknown = || Command::Unknown(trimmed.to_string());

    match cmd.as_str() {
        "QUIT" | "Q" | "EXIT" => Command::Quit,
        "HELP" | "?" => Command::Help,
        "WHOAMI" => Command::Whoami,
        "USER" => match words(arg).as_slice() {
            [name] => Command::User(name.clone()),
            _ => unknown(),
        },
        "ADDUSER" => match words(arg).as_slice() {
            [name, permission, home] => Command::AddUser {
                name: name.clone(),
                permission: permission.clone(),
                home: home.clone(),
            },
            _ => unknown(),
        },
        "DELUSER" => match words(arg).as_slice() {
            [name] => Command::DelUser(name.clone()),
            _ => unknown(),
        },
        "MKDIR" => match words(arg).as_slice() {
            [path] => Command::Mkdir(path.clone()),
            _ => unknown(),
        },
        "TOUCH" => match words(arg).as_slice() {
            [path] => Command::Touch(path.clone()),
            _ => unknown(),
        },
        "RM" => {
            let (recursive, rest) = take_flag(arg, "-r");
            match words(rest).as_slice() {
                [path] => Command::Rm {
                    path: path.clone(),
                    recursive,
                },
                _ => unknown(),
            }
        }
        "WRITE" => {
            let (append, rest) = take_flag(arg, "-a");
            // One separator is consumed; the rest of the line is the text as typed
            match rest.split_once(char::is_whitespace) {
                Some((path, text)) => Command::Write {
                    path: path.to_string(),
                    append,
                    text: text.to_string(),
                },
                None if !rest.is_empty() => Command::Write {
                    path: rest.to_string(),
                    append,
                    text: String::new(),
                },
                None => unknown(),
            }
        }
        "READ" => match words(arg).as_slice() {
            [path] => Command::Read {
                path: path.clone(),
                len: None,
            },
            [path, len] => match len.parse() {
                Ok(len) => Command::Read {
                    path: path.clone(),
                    len: Some(len),
                },
                Err(_) => unknown(),
            },
            _ => unknown(),
        },
        "SEEK" => match words(arg).as_slice() {
            [path, offset] => match offset.parse() {
                Ok(offset) => Command::Seek {
                    path: path.clone(),
                    offset,
                },
                Err(_) => unknown(),
            },
            _ => unknown(),
        },
        "MV" => match words(arg).as_slice() {
            [src, dst] => Command::Mv {
                src: src.clone(),
                dst: dst.clone(),
            },
            _ => unknown(),
        },
        "CP" => {
            let (recursive, rest) = take_flag(arg, "-r");
            match words(rest).as_slice() {
                [src, dst] => Command::Cp {
                    src: src.clone(),
                    dst: dst.clone(),
                    recursive,
                },
                _ => unknown(),
            }
        }
        "CHMOD" => match words(arg).as_slice() {
            [path, target, permission] => Command::Chmod {
                path: path.clone(),
                target: target.clone(),
                permission: permission.clone(),
            },
            _ => unknown(),
        },
        "LS" => {
            let (recursive, rest) = take_flag(arg, "-r");
            match words(rest).as_slice() {
                [] => Command::Ls {
                    path: "/".to_string(),
                    recursive,
                },
                [path] => Command::Ls {
                    path: path.clone(),
                    recursive,
                },
                _ => unknown(),
            }
        }
        _ => unknown(),
    }
}
