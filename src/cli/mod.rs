//! CLI module for expense-rs
//!
//! This module provides command-line interface functionality including:
//! - Argument parsing with clap
//! - Configuration merging (CLI args + config files)
//! - Command handlers for serve, migrate and token

pub mod config_merger;
pub mod executor;
pub mod handlers;
pub mod parser;
pub mod validation;

pub use config_merger::ConfigurationMerger;
pub use executor::execute_command;
pub use parser::{Cli, Commands, Environment, LogLevel};

use anyhow::Context;

use crate::config::Settings;
use crate::logger::init_logger;

/// Load configuration and apply CLI overrides
///
/// 1. Load base configuration from files and environment variables
/// 2. Merge CLI argument overrides
///
/// Validation is left to the command that runs.
///
/// # Errors
/// Returns error if configuration loading fails
pub fn load_and_merge_config(cli: &Cli) -> anyhow::Result<Settings> {
    let merger = ConfigurationMerger::from_cli(cli).context("Configuration error")?;
    Ok(merger.merge_cli_args(cli))
}

/// Initialize logger from settings
///
/// # Errors
/// Returns error if the logger settings are invalid or a subscriber is
/// already installed
pub fn init_logger_from_settings(settings: &Settings) -> anyhow::Result<()> {
    settings
        .logger
        .validate()
        .context("Logger configuration error")?;

    let logger_config = settings
        .logger
        .clone()
        .into_logger_config()
        .context("Logger configuration error")?;

    init_logger(&logger_config).context("Logger initialization error")
}
