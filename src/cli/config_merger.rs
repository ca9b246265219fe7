//! Configuration merger for CLI arguments and config files
//!
//! CLI arguments override values loaded from configuration files and
//! `EXPENSE_*` environment variables.

use super::parser::{Cli, Commands};
use crate::config::error::ConfigError;
use crate::config::{ConfigLoader, Settings};

/// Applies CLI overrides on top of file-based configuration.
///
/// The merged result is not validated here; each command validates the
/// sections it needs.
pub struct ConfigurationMerger {
    base_config: Settings,
}

impl ConfigurationMerger {
    /// Create a new configuration merger with base configuration
    pub fn new(base_config: Settings) -> Self {
        Self { base_config }
    }

    /// Loads the base configuration honouring `--config` and `--env`.
    ///
    /// # Errors
    /// Returns ConfigError if the loader cannot be created or loading fails
    pub fn from_cli(cli: &Cli) -> Result<Self, ConfigError> {
        let mut loader = ConfigLoader::new()?;

        if let Some(ref path) = cli.config {
            loader = loader.with_config_file(path);
        }

        if let Some(env) = cli.env {
            loader = loader.with_environment(env.into());
        }

        tracing::debug!(environment = %loader.environment(), "Loading configuration");
        Ok(Self::new(loader.load()?))
    }

    /// Merge CLI arguments with the base configuration
    ///
    /// Precedence, highest first:
    /// 1. Command flags (`serve --host/--port/--log-level`)
    /// 2. Global flags (`--verbose`, `--quiet`)
    /// 3. Configuration files and environment variables
    pub fn merge_cli_args(&self, cli: &Cli) -> Settings {
        let mut config = self.base_config.clone();

        if cli.verbose {
            config.logger.level = "debug".to_string();
        } else if cli.quiet {
            config.logger.level = "error".to_string();
        }

        if let Some(Commands::Serve {
            host,
            port,
            log_level,
            ..
        }) = &cli.command
        {
            if let Some(host) = host {
                config.server.host = host.clone();
            }
            if let Some(port) = port {
                config.server.port = *port;
            }
            if let Some(level) = log_level {
                config.logger.level = level.as_str().to_string();
            }
        }

        config
    }

    /// Get the base configuration
    pub fn config(&self) -> &Settings {
        &self.base_config
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use clap::Parser;

    fn merged(args: &[&str]) -> Settings {
        let cli = Cli::try_parse_from(args).unwrap();
        ConfigurationMerger::new(Settings::default()).merge_cli_args(&cli)
    }

    #[test]
    fn test_no_flags_keep_base() {
        let merger = ConfigurationMerger::new(Settings::default());
        let cli = Cli::try_parse_from(["expense-rs"]).unwrap();
        assert_eq!(&merger.merge_cli_args(&cli), merger.config());
    }

    #[test]
    fn test_global_log_flags() {
        assert_eq!(merged(&["expense-rs", "--verbose"]).logger.level, "debug");
        assert_eq!(merged(&["expense-rs", "--quiet"]).logger.level, "error");
    }

    #[test]
    fn test_serve_overrides() {
        let config = merged(&["expense-rs", "serve", "--host", "0.0.0.0", "--port", "8080"]);
        assert_eq!(config.server.host, "0.0.0.0");
        assert_eq!(config.server.port, 8080);
    }

    #[test]
    fn test_command_log_level_overrides_global() {
        let config = merged(&["expense-rs", "--verbose", "serve", "--log-level", "warn"]);
        assert_eq!(config.logger.level, "warn");
    }
}
