//! Typed configuration for expense-rs.
//!
//! Every section uses container-level `#[serde(default)]`, so any key left
//! out of the layered sources falls back to the section's `Default`.

use std::path::PathBuf;

use serde::{Deserialize, Serialize};

use crate::config::error::ConfigError;
use crate::logger::{ConsoleConfig, FileConfig, LogFormat, LoggerConfig};
use crate::utils::id::DEFAULT_ID_LENGTH;

/// Name and build version reported in startup logs
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct ApplicationConfig {
    pub name: String,
    pub version: String,
}

impl Default for ApplicationConfig {
    fn default() -> Self {
        Self {
            name: "expense-rs".to_string(),
            version: crate::pkg_version().to_string(),
        }
    }
}

/// HTTP listener
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct ServerConfig {
    pub host: String,
    pub port: u16,

    /// Seconds to wait for in-flight requests after a shutdown signal
    pub request_timeout: u64,

    /// Allowed CORS origins; empty allows any origin
    pub cors_origins: Vec<String>,
}

impl ServerConfig {
    /// `host:port` as passed to the listener
    pub fn address(&self) -> String {
        format!("{}:{}", self.host, self.port)
    }
}

impl Default for ServerConfig {
    fn default() -> Self {
        Self {
            host: "127.0.0.1".to_string(),
            port: 3000,
            request_timeout: 30,
            cors_origins: Vec::new(),
        }
    }
}

/// PostgreSQL pool
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct DatabaseConfig {
    /// Empty until supplied by a config file or `EXPENSE_DATABASE__URL`
    pub url: String,
    pub max_connections: u32,
    pub min_connections: u32,

    /// Seconds to wait when acquiring a pooled connection
    pub connection_timeout: u64,

    /// Whether `serve` applies pending migrations before listening
    pub auto_migrate: bool,
}

impl Default for DatabaseConfig {
    fn default() -> Self {
        Self {
            url: String::new(),
            max_connections: 10,
            min_connections: 1,
            connection_timeout: 30,
            auto_migrate: false,
        }
    }
}

/// Bearer token verification.
///
/// `secret` must match the issuer's signing key; pass it via
/// `EXPENSE_JWT__SECRET` rather than a committed file.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct JwtConfig {
    pub secret: String,

    /// Lifetime in hours of tokens minted by the `token` command
    pub access_token_expiration: i64,
}

impl Default for JwtConfig {
    fn default() -> Self {
        Self {
            secret: String::new(),
            access_token_expiration: 24,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct ConsoleSettings {
    pub enabled: bool,
    pub colored: bool,
}

impl Default for ConsoleSettings {
    fn default() -> Self {
        Self {
            enabled: true,
            colored: true,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct FileSettings {
    pub enabled: bool,
    pub path: String,
    pub append: bool,

    /// One of `full`, `compact`, `json`
    pub format: String,
}

impl Default for FileSettings {
    fn default() -> Self {
        Self {
            enabled: false,
            path: "logs/expense-rs.log".to_string(),
            append: true,
            format: "json".to_string(),
        }
    }
}

impl FileSettings {
    pub fn into_file_config(self) -> Result<FileConfig, ConfigError> {
        let format = self
            .format
            .parse::<LogFormat>()
            .map_err(|e| ConfigError::validation("logger.file.format", e.to_string()))?;

        FileConfig::new(self.enabled, PathBuf::from(self.path), self.append, format)
            .map_err(|e| ConfigError::validation("logger.file", e.to_string()))
    }
}

/// `[logger]` as written in config files; see [`LoggerConfig`] for the
/// runtime form.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct LoggerSettings {
    pub level: String,
    pub console: ConsoleSettings,
    pub file: FileSettings,
}

impl Default for LoggerSettings {
    fn default() -> Self {
        Self {
            level: "info".to_string(),
            console: ConsoleSettings::default(),
            file: FileSettings::default(),
        }
    }
}

impl LoggerSettings {
    pub fn into_logger_config(self) -> Result<LoggerConfig, ConfigError> {
        let console = ConsoleConfig::new(self.console.enabled, self.console.colored);
        let file = self.file.into_file_config()?;

        LoggerConfig::new(console, file, self.level)
            .map_err(|e| ConfigError::validation("logger", e.to_string()))
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct ExpenseSettings {
    /// Length of generated expense ids
    pub id_length: usize,
}

impl Default for ExpenseSettings {
    fn default() -> Self {
        Self {
            id_length: DEFAULT_ID_LENGTH,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, Default)]
#[serde(default)]
pub struct Settings {
    pub application: ApplicationConfig,
    pub server: ServerConfig,
    pub database: DatabaseConfig,
    pub jwt: JwtConfig,
    pub logger: LoggerSettings,
    pub expenses: ExpenseSettings,
}

#[cfg(test)]
mod tests {
    use super::*;
    use proptest::prelude::*;

    proptest! {
        #![proptest_config(ProptestConfig::with_cases(64))]

        /// Only the keys present in the file change; the rest keep defaults.
        #[test]
        fn prop_partial_file_overrides_only_given_keys(
            port in 1u16..=65535,
            id_length in 6usize..=21,
            level in prop::sample::select(vec!["trace", "debug", "info", "warn", "error"]),
        ) {
            let toml_str = format!(
                "[server]\nport = {port}\n[expenses]\nid_length = {id_length}\n[logger]\nlevel = \"{level}\"\n"
            );
            let settings: Settings = toml::from_str(&toml_str).unwrap();

            let mut expected = Settings::default();
            expected.server.port = port;
            expected.expenses.id_length = id_length;
            expected.logger.level = level.to_string();
            prop_assert_eq!(settings, expected);
        }
    }

    #[test]
    fn test_defaults() {
        let settings = Settings::default();
        assert_eq!(settings.application.name, "expense-rs");
        assert_eq!(settings.application.version, crate::pkg_version());
        assert_eq!(settings.server.address(), "127.0.0.1:3000");
        assert_eq!(settings.database.max_connections, 10);
        assert!(!settings.database.auto_migrate);
        assert_eq!(settings.jwt.access_token_expiration, 24);
        assert_eq!(settings.expenses.id_length, 11);
    }

    #[test]
    fn test_empty_file_is_default() {
        let settings: Settings = toml::from_str("").unwrap();
        assert_eq!(settings, Settings::default());
    }

    #[test]
    fn test_logger_settings_into_logger_config() {
        let settings = LoggerSettings {
            level: "debug".to_string(),
            console: ConsoleSettings {
                enabled: true,
                colored: false,
            },
            file: FileSettings {
                enabled: true,
                path: "logs/app.log".to_string(),
                append: false,
                format: "compact".to_string(),
            },
        };

        let config = settings.into_logger_config().unwrap();
        assert_eq!(config.level, "debug");
        assert!(!config.console.colored);
        assert!(config.file.enabled);
        assert!(!config.file.append);
        assert_eq!(config.file.format, LogFormat::Compact);
        assert_eq!(config.file.path, PathBuf::from("logs/app.log"));
    }

    #[test]
    fn test_logger_settings_invalid_format() {
        let mut settings = LoggerSettings::default();
        settings.file.format = "xml".to_string();

        match settings.into_logger_config() {
            Err(ConfigError::ValidationError { field, .. }) => {
                assert_eq!(field, "logger.file.format")
            }
            other => panic!("Expected ValidationError, got {:?}", other),
        }
    }

    #[test]
    fn test_logger_settings_both_outputs_disabled() {
        let mut settings = LoggerSettings::default();
        settings.console.enabled = false;
        settings.file.enabled = false;

        assert!(settings.into_logger_config().is_err());
    }
}
