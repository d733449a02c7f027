use log::{debug, info, warn};
use tokio::io::{AsyncBufRead, AsyncBufReadExt, AsyncWrite, AsyncWriteExt};

use crate::client::Session;
use crate::config::ShellConfig;
use crate::error::ShellError;
use crate::filesystem::FileSystem;
use crate::protocol::responses::{self, format_response};
use crate::protocol::{CommandStatus, handle_command, parse_command};
use crate::storage::ROOT_USER;

/// Runs an interactive shell session until QUIT or end of input.
///
/// - Reads one command per line from `reader`.
/// - Dispatches commands using `handle_command`, acting as `root` until a
///   `USER` command switches identity.
/// - Writes every response to `writer`, flushing after each command.
pub async fn run_session<R, W>(
    mut reader: R,
    mut writer: W,
    fs: &mut FileSystem,
    config: &ShellConfig,
) -> Result<(), ShellError>
where
    R: AsyncBufRead + Unpin,
    W: AsyncWrite + Unpin,
{
    let mut session = Session::new(ROOT_USER);
    let mut bytes = Vec::new();

    writer
        .write_all(format_response(responses::READY, "treefs ready (type HELP)").as_bytes())
        .await?;

    loop {
        writer.write_all(config.prompt.as_bytes()).await?;
        writer.flush().await?;

        bytes.clear();
        if reader.read_until(b'\n', &mut bytes).await? == 0 {
            info!("End of input, closing session of {}", session.username());
            break;
        }

        // Enforce command length limit
        if bytes.len() > config.max_command_length {
            warn!("Rejected command of {} bytes", bytes.len());
            writer
                .write_all(format_response(responses::UNKNOWN_COMMAND, "Command too long").as_bytes())
                .await?;
            continue;
        }

        let line = match std::str::from_utf8(&bytes) {
            Ok(line) => line,
            Err(e) => {
                warn!("Rejected command that is not valid UTF-8: {}", e);
                writer
                    .write_all(
                        format_response(responses::UNKNOWN_COMMAND, "Command is not valid UTF-8")
                            .as_bytes(),
                    )
                    .await?;
                continue;
            }
        };

        let trimmed = line.trim();
        if trimmed.is_empty() {
            continue;
        }

        let command = parse_command(trimmed);
        debug!("Received from {}: {:?}", session.username(), &command);

        let result = handle_command(fs, &mut session, &command, config);
        if let Some(msg) = &result.message {
            writer.write_all(msg.as_bytes()).await?;
        }

        match result.status {
            CommandStatus::CloseConnection => break,
            CommandStatus::Failure(reason) => debug!("Command failed: {}", reason),
            CommandStatus::Success => {}
        }
    }

    writer.flush().await?;
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use tokio::io::BufReader;

    async fn transcript(input: &str, fs: &mut FileSystem) -> String {
        transcript_bytes(input.as_bytes(), fs).await
    }

    async fn transcript_bytes(input: &[u8], fs: &mut FileSystem) -> String {
        let config = ShellConfig {
            prompt: String::new(),
            ..ShellConfig::default()
        };
        let mut output = Vec::new();
        run_session(BufReader::new(input), &mut output, fs, &config)
            .await
            .unwrap();
        String::from_utf8(output).unwrap()
    }

    #[tokio::test]
    async fn test_session_runs_commands_in_order() {
        let mut fs = FileSystem::new();
        let out = transcript(
            "ADDUSER alice rwx /home/alice\nUSER alice\nTOUCH /home/alice/f\nWRITE /home/alice/f hi\nREAD /home/alice/f\nQUIT\nLS /\n",
            &mut fs,
        )
        .await;

        let lines: Vec<&str> = out.lines().collect();
        assert_eq!(
            lines,
            vec![
                "220 treefs ready (type HELP)",
                "200 User alice added",
                "200 Acting as alice",
                "200 File /home/alice/f created",
                "200 Wrote 2 bytes to /home/alice/f (size 2)",
                "hi",
                "200 Read 2 bytes (offset 2)",
                "221 Goodbye",
            ]
        );
        assert_eq!(fs.file_content("/home/alice/f").unwrap(), b"hi");
    }

    #[tokio::test]
    async fn test_session_ends_at_eof_and_skips_blank_lines() {
        let mut fs = FileSystem::new();
        let out = transcript("\n   \nMKDIR /a\n", &mut fs).await;
        assert!(out.ends_with("200 Directory /a ready\n"));
        assert!(fs.exists("/a"));
    }

    #[tokio::test]
    async fn test_session_rejects_long_lines() {
        let mut fs = FileSystem::new();
        let long = format!("MKDIR /{}\n", "x".repeat(600));
        let out = transcript(&long, &mut fs).await;
        assert!(out.contains("500 Command too long"));
        assert_eq!(fs.tree().len(), 1);
    }

    #[tokio::test]
    async fn test_session_survives_invalid_utf8_line() {
        let mut fs = FileSystem::new();
        let out = transcript_bytes(b"MKDIR /caf\xe7\nMKDIR /after\nQUIT\n", &mut fs).await;

        let lines: Vec<&str> = out.lines().collect();
        assert_eq!(
            lines,
            vec![
                "220 treefs ready (type HELP)",
                "500 Command is not valid UTF-8",
                "200 Directory /after ready",
                "221 Goodbye",
            ]
        );
        assert!(fs.exists("/after"));
        assert_eq!(fs.tree().len(), 2);
    }
}
