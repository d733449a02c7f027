//! Configuration management for the treefs shell
//!
//! Layers built-in defaults, an optional `config.toml` and `TREEFS_*`
//! environment variables.

use config::{Config, ConfigBuilder, ConfigError, Environment, File, builder::DefaultState};
use serde::Deserialize;
use std::path::Path;

/// Candidate config file locations, without extension
const CONFIG_PATHS: [&str; 2] = [
    "treefs/config", // Packaged layout: ./treefs/config.toml
    "config",        // Local development: ./config.toml
];

/// Complete shell configuration
#[derive(Debug, Deserialize, Clone)]
pub struct ShellConfig {
    /// Users file registered at startup, one `name home permission` per line
    /// Environment: TREEFS_USERS_FILE
    pub users_file: Option<String>,

    /// Longest accepted input line, in bytes
    pub max_command_length: usize,

    /// Bytes returned by `READ` when no length is given
    pub default_read_size: usize,

    /// Printed before each command; may be empty
    pub prompt: String,

    /// Default `env_logger` filter when RUST_LOG is unset
    pub log_level: String,
}

impl Default for ShellConfig {
    fn default() -> Self {
        Self {
            users_file: None,
            max_command_length: 512,
            default_read_size: 64,
            prompt: "treefs> ".to_string(),
            log_level: "info".to_string(),
        }
    }
}

impl ShellConfig {
    /// Load configuration from the first `config.toml` found, with
    /// environment overrides. Missing files fall back to defaults.
    pub fn load() -> Result<Self, ConfigError> {
        let mut builder = Self::defaults()?;
        for config_path in &CONFIG_PATHS {
            builder = builder.add_source(File::with_name(config_path).required(false));
        }
        Self::finish(builder)
    }

    /// Load configuration from an explicit file, with environment overrides.
    pub fn load_from(path: &Path) -> Result<Self, ConfigError> {
        let builder = Self::defaults()?.add_source(File::from(path));
        Self::finish(builder)
    }

    fn defaults() -> Result<ConfigBuilder<DefaultState>, ConfigError> {
        let defaults = ShellConfig::default();
        Config::builder()
            .set_default("max_command_length", defaults.max_command_length as i64)?
            .set_default("default_read_size", defaults.default_read_size as i64)?
            .set_default("prompt", defaults.prompt)?
            .set_default("log_level", defaults.log_level)
    }

    fn finish(builder: ConfigBuilder<DefaultState>) -> Result<Self, ConfigError> {
        let settings = builder
            .add_source(
                Environment::with_prefix("TREEFS")
                    .prefix_separator("_")
                    .separator("__")
                    .try_parsing(true),
            )
            .build()?;
        let config: ShellConfig = settings.try_deserialize()?;
        config.validate()?;
        Ok(config)
    }

    /// Validation for all configuration values
    fn validate(&self) -> Result<(), ConfigError> {
        if self.max_command_length == 0 {
            return Err(ConfigError::Message(
                "max_command_length must be greater than 0".into(),
            ));
        }

        if self.default_read_size == 0 {
            return Err(ConfigError::Message(
                "default_read_size must be greater than 0".into(),
            ));
        }

        if let Some(users_file) = &self.users_file {
            if users_file.trim().is_empty() {
                return Err(ConfigError::Message("users_file cannot be empty".into()));
            }
        }

        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;

    fn write_config(contents: &str) -> tempfile::NamedTempFile {
        let mut file = tempfile::Builder::new().suffix(".toml").tempfile().unwrap();
        file.write_all(contents.as_bytes()).unwrap();
        file
    }

    #[test]
    fn test_load_partial_file_keeps_defaults() {
        let file = write_config("default_read_size = 8\nusers_file = \"users.txt\"\n");
        let config = ShellConfig::load_from(file.path()).unwrap();
        assert_eq!(config.default_read_size, 8);
        assert_eq!(config.users_file.as_deref(), Some("users.txt"));
        assert_eq!(config.max_command_length, 512);
        assert_eq!(config.prompt, "treefs> ");
    }

    #[test]
    fn test_validation_rejects_zero_sizes() {
        let file = write_config("max_command_length = 0\n");
        assert!(ShellConfig::load_from(file.path()).is_err());

        let file = write_config("default_read_size = 0\n");
        assert!(ShellConfig::load_from(file.path()).is_err());
    }

    #[test]
    fn test_empty_users_file_is_rejected() {
        let file = write_config("users_file = \"  \"\n");
        assert!(ShellConfig::load_from(file.path()).is_err());
    }
}
