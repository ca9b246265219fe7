//! Configuration loader for expense-rs
//!
//! Loads `Settings` from layered TOML files and `EXPENSE_*` environment
//! variables with a fixed precedence.

use std::path::{Path, PathBuf};

use config::builder::DefaultState;
use config::{Config, ConfigBuilder, Environment, File, FileFormat};

use crate::config::environment::Environment as AppEnvironment;
use crate::config::error::ConfigError;
use crate::config::settings::Settings;

/// Environment variable for configuration directory
const CONFIG_DIR_ENV: &str = "EXPENSE_CONFIG_DIR";

/// Environment variable for a single configuration file
const CONFIG_FILE_ENV: &str = "EXPENSE_CONFIG_FILE";

const DEFAULT_CONFIG_DIR: &str = "config";

/// Prefix for configuration overrides, e.g. `EXPENSE_SERVER__PORT`
const ENV_PREFIX: &str = "EXPENSE";

/// Separator for nested keys in environment variables
const ENV_SEPARATOR: &str = "__";

/// Configuration loader that handles layered configuration loading
///
/// Sources, lowest priority first:
/// 1. `default.toml` (required)
/// 2. `{environment}.toml` (optional)
/// 3. `local.toml` (optional, not committed)
/// 4. `EXPENSE_*` environment variables
///
/// When a single file is configured it replaces steps 1-3.
#[derive(Debug, Clone)]
pub struct ConfigLoader {
    config_dir: PathBuf,
    config_file: Option<PathBuf>,
    environment: AppEnvironment,
}

impl ConfigLoader {
    /// Creates a loader from `EXPENSE_CONFIG_DIR`, `EXPENSE_CONFIG_FILE` and
    /// `EXPENSE_APP_ENV`.
    ///
    /// # Errors
    ///
    /// Returns an error if both `EXPENSE_CONFIG_DIR` and `EXPENSE_CONFIG_FILE`
    /// are set.
    pub fn new() -> Result<Self, ConfigError> {
        let config_dir = std::env::var(CONFIG_DIR_ENV).ok().map(PathBuf::from);
        let config_file = std::env::var(CONFIG_FILE_ENV).ok().map(PathBuf::from);

        if config_dir.is_some() && config_file.is_some() {
            return Err(ConfigError::mutual_exclusivity(
                "EXPENSE_CONFIG_DIR and EXPENSE_CONFIG_FILE cannot both be set. \
                 Use EXPENSE_CONFIG_DIR for layered configuration or \
                 EXPENSE_CONFIG_FILE for a single configuration file.",
            ));
        }

        Ok(Self {
            config_dir: config_dir.unwrap_or_else(|| PathBuf::from(DEFAULT_CONFIG_DIR)),
            config_file,
            environment: AppEnvironment::from_env(),
        })
    }

    /// Loads only `path` (plus environment variables), as `--config` does.
    pub fn with_config_file(mut self, path: impl Into<PathBuf>) -> Self {
        self.config_file = Some(path.into());
        self
    }

    /// Layers files from `dir` instead of `config/`.
    pub fn with_config_dir(mut self, dir: impl Into<PathBuf>) -> Self {
        self.config_dir = dir.into();
        self.config_file = None;
        self
    }

    /// Selects which `{environment}.toml` is layered in.
    pub fn with_environment(mut self, environment: AppEnvironment) -> Self {
        self.environment = environment;
        self
    }

    pub fn environment(&self) -> AppEnvironment {
        self.environment
    }

    /// Load configuration from all sources.
    ///
    /// The result is not validated; callers validate the sections their
    /// command actually needs.
    ///
    /// # Errors
    ///
    /// - `FileNotFound` if `default.toml` (or the single file) is missing
    /// - `ParseError` if the merged sources do not fit `Settings`
    pub fn load(&self) -> Result<Settings, ConfigError> {
        self.build_config()?
            .try_deserialize()
            .map_err(|e| ConfigError::ParseError(format!("Failed to deserialize configuration: {e}")))
    }

    fn build_config(&self) -> Result<Config, ConfigError> {
        let builder = Config::builder();

        let builder = match self.config_file {
            Some(ref file) => add_file_source(builder, file, true)?,
            None => self.add_layered_sources(builder)?,
        };

        // EXPENSE_SERVER__PORT -> server.port
        let builder = builder.add_source(
            Environment::with_prefix(ENV_PREFIX)
                .prefix_separator("_")
                .separator(ENV_SEPARATOR)
                .ignore_empty(true)
                .try_parsing(true),
        );

        builder.build().map_err(ConfigError::from)
    }

    fn add_layered_sources(
        &self,
        builder: ConfigBuilder<DefaultState>,
    ) -> Result<ConfigBuilder<DefaultState>, ConfigError> {
        let builder = add_file_source(builder, &self.config_dir.join("default.toml"), true)?;

        let env_file = self
            .config_dir
            .join(format!("{}.toml", self.environment.as_str()));
        let builder = add_file_source(builder, &env_file, false)?;

        add_file_source(builder, &self.config_dir.join("local.toml"), false)
    }
}

fn add_file_source(
    builder: ConfigBuilder<DefaultState>,
    path: &Path,
    required: bool,
) -> Result<ConfigBuilder<DefaultState>, ConfigError> {
    if required && !path.exists() {
        return Err(ConfigError::file_not_found(format!(
            "Required configuration file not found: {}",
            path.display()
        )));
    }

    Ok(builder.add_source(File::from(path).format(FileFormat::Toml).required(required)))
}
