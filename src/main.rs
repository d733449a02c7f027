//! treefs - Entry Point
//!
//! An in-memory, permission-checked file system driven from an interactive
//! shell on stdin/stdout.

use log::info;
use std::path::Path;
use tokio::io::BufReader;

use treefs::FileSystem;
use treefs::auth::load_users_file;
use treefs::client::run_session;
use treefs::config::ShellConfig;
use treefs::error::ShellError;
use treefs::error::handlers::handle_error;

#[tokio::main]
async fn main() -> Result<(), ShellError> {
    let config = ShellConfig::load()?;

    // RUST_LOG takes precedence over the configured level
    env_logger::Builder::from_env(
        env_logger::Env::default().default_filter_or(config.log_level.as_str()),
    )
    .init();

    info!("Launching treefs shell...");

    let mut fs = FileSystem::new();
    if let Some(users_file) = &config.users_file {
        let entries = load_users_file(Path::new(users_file)).await?;
        let added = fs.bootstrap(&entries)?;
        info!("Registered {} users from {}", added, users_file);
    }

    let stdin = BufReader::new(tokio::io::stdin());
    let stdout = tokio::io::stdout();
    if let Err(e) = run_session(stdin, stdout, &mut fs, &config).await {
        handle_error(&e);
        return Err(e);
    }

    info!("treefs shell stopped");
    Ok(())
}
