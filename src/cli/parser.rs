//! CLI argument parsing with clap
//!
//! This module defines the command-line interface structure using clap,
//! including all commands, arguments, and their documentation.

use clap::{Parser, Subcommand, ValueEnum};
use std::path::PathBuf;

use crate::build;

/// Expense records API server
#[derive(Parser, Debug)]
#[command(name = "expense-rs")]
#[command(about = "Expense records API server")]
#[command(long_about = "
expense-rs serves a JSON API for recording, listing, updating and deleting
the expenses of authenticated users, backed by PostgreSQL.

EXAMPLES:
    # Start the server with default configuration
    expense-rs serve

    # Start server on custom host and port
    expense-rs serve --host 0.0.0.0 --port 8080

    # Use a single configuration file
    expense-rs --config /etc/expense-rs/production.toml serve

    # Check configuration without starting the server
    expense-rs serve --dry-run

    # Apply pending database migrations
    expense-rs migrate

    # Rollback the last migration
    expense-rs migrate --rollback 1

    # Mint a bearer token for local testing
    expense-rs token --user u1
")]
#[command(version = build::CLAP_LONG_VERSION)]
pub struct Cli {
    /// Subcommand to execute
    #[command(subcommand)]
    pub command: Option<Commands>,

    /// Configuration file path
    ///
    /// Load only this TOML file (plus EXPENSE_* environment variables)
    /// instead of the layered files under config/.
    #[arg(short, long, value_name = "FILE", value_parser = super::validation::validate_config_file_path)]
    pub config: Option<PathBuf>,

    /// Override environment detection
    ///
    /// Selects which config/{env}.toml is layered in. Takes precedence over
    /// EXPENSE_APP_ENV.
    #[arg(short, long, value_enum)]
    pub env: Option<Environment>,

    /// Enable verbose logging (debug level)
    #[arg(short, long)]
    pub verbose: bool,

    /// Only log errors
    #[arg(short, long, conflicts_with = "verbose")]
    pub quiet: bool,
}

/// Available subcommands
#[derive(Subcommand, Debug, Clone, PartialEq, Eq)]
pub enum Commands {
    /// Start the web server (default)
    ///
    /// Examples:
    ///   expense-rs serve                           # Start with defaults
    ///   expense-rs serve --host 0.0.0.0 --port 80  # Bind to all interfaces on port 80
    ///   expense-rs serve --dry-run                 # Validate config without starting
    Serve {
        /// Host address to bind to
        #[arg(long, value_name = "ADDRESS", value_parser = super::validation::validate_host_address)]
        host: Option<String>,

        /// Port number to listen on
        #[arg(short, long, value_name = "PORT", value_parser = super::validation::validate_port)]
        port: Option<u16>,

        /// Log level override
        ///
        /// Overrides both the configuration file and --verbose/--quiet.
        #[arg(long, value_enum)]
        log_level: Option<LogLevel>,

        /// Validate configuration and exit
        #[arg(long)]
        dry_run: bool,
    },
    /// Database migration operations
    ///
    /// Examples:
    ///   expense-rs migrate                    # Apply all pending migrations
    ///   expense-rs migrate --dry-run          # Show pending migrations without applying
    ///   expense-rs migrate --rollback 1       # Revert the most recent migration
    Migrate {
        /// Show pending migrations without applying
        #[arg(long, conflicts_with = "rollback")]
        dry_run: bool,

        /// Number of migrations to rollback (1-100)
        #[arg(long, value_name = "STEPS", conflicts_with = "dry_run", value_parser = super::validation::validate_rollback_steps)]
        rollback: Option<u32>,
    },
    /// Issue a bearer token for local testing
    ///
    /// Signs a token with the configured jwt.secret. There is no login
    /// endpoint; tokens are normally issued by the account service.
    Token {
        /// User id placed in the `sub` claim
        #[arg(short, long, value_name = "USER_ID", value_parser = super::validation::validate_user_id)]
        user: String,

        /// Token lifetime in hours; defaults to jwt.access_token_expiration
        #[arg(long, value_name = "HOURS")]
        hours: Option<i64>,
    },
}

/// Environment options
#[derive(ValueEnum, Clone, Copy, Debug, PartialEq, Eq)]
pub enum Environment {
    #[value(name = "development", alias = "dev")]
    Development,
    #[value(name = "test")]
    Test,
    #[value(name = "staging", alias = "stage")]
    Staging,
    #[value(name = "production", alias = "prod")]
    Production,
}

/// Log level options
#[derive(ValueEnum, Clone, Copy, Debug, PartialEq, Eq)]
pub enum LogLevel {
    #[value(name = "error")]
    Error,
    #[value(name = "warn", alias = "warning")]
    Warn,
    #[value(name = "info")]
    Info,
    #[value(name = "debug")]
    Debug,
    #[value(name = "trace")]
    Trace,
}

impl LogLevel {
    pub fn as_str(&self) -> &'static str {
        match self {
            LogLevel::Error => "error",
            LogLevel::Warn => "warn",
            LogLevel::Info => "info",
            LogLevel::Debug => "debug",
            LogLevel::Trace => "trace",
        }
    }
}

impl From<Environment> for crate::config::Environment {
    fn from(env: Environment) -> Self {
        match env {
            Environment::Development => crate::config::Environment::Development,
            Environment::Test => crate::config::Environment::Test,
            Environment::Staging => crate::config::Environment::Staging,
            Environment::Production => crate::config::Environment::Production,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use clap::CommandFactory;

    #[test]
    fn verify_cli() {
        Cli::command().debug_assert();
    }

    #[test]
    fn test_version_flag() {
        let err = Cli::try_parse_from(["expense-rs", "--version"]).unwrap_err();
        assert_eq!(err.kind(), clap::error::ErrorKind::DisplayVersion);
    }

    #[test]
    fn test_default_behavior() {
        let cli = Cli::try_parse_from(["expense-rs"]).unwrap();
        assert!(cli.command.is_none());
        assert!(!cli.verbose);
        assert!(!cli.quiet);
        assert!(cli.config.is_none());
        assert!(cli.env.is_none());
    }

    #[test]
    fn test_serve_command() {
        let cli = Cli::try_parse_from([
            "expense-rs", "serve", "--host", "0.0.0.0", "--port", "8080", "--log-level", "warning",
        ])
        .unwrap();

        assert_eq!(
            cli.command,
            Some(Commands::Serve {
                host: Some("0.0.0.0".to_string()),
                port: Some(8080),
                log_level: Some(LogLevel::Warn),
                dry_run: false,
            })
        );
    }

    #[test]
    fn test_serve_rejects_port_zero() {
        assert!(Cli::try_parse_from(["expense-rs", "serve", "--port", "0"]).is_err());
    }

    #[test]
    fn test_migrate_command() {
        let cli = Cli::try_parse_from(["expense-rs", "migrate", "--rollback", "2"]).unwrap();
        assert_eq!(
            cli.command,
            Some(Commands::Migrate {
                dry_run: false,
                rollback: Some(2),
            })
        );
    }

    #[test]
    fn test_migrate_dry_run_conflicts_with_rollback() {
        let err = Cli::try_parse_from(["expense-rs", "migrate", "--dry-run", "--rollback", "1"])
            .unwrap_err();
        assert_eq!(err.kind(), clap::error::ErrorKind::ArgumentConflict);
    }

    #[test]
    fn test_token_command() {
        let cli = Cli::try_parse_from(["expense-rs", "token", "--user", "u1"]).unwrap();
        assert_eq!(
            cli.command,
            Some(Commands::Token {
                user: "u1".to_string(),
                hours: None,
            })
        );

        assert!(Cli::try_parse_from(["expense-rs", "token"]).is_err());
        assert!(Cli::try_parse_from(["expense-rs", "token", "--user", " "]).is_err());
    }

    #[test]
    fn test_env_aliases() {
        let cli = Cli::try_parse_from(["expense-rs", "--env", "prod"]).unwrap();
        assert_eq!(cli.env, Some(Environment::Production));
        assert_eq!(
            crate::config::Environment::from(Environment::Staging),
            crate::config::Environment::Staging
        );
    }

    #[test]
    fn test_conflicting_verbose_quiet() {
        let err = Cli::try_parse_from(["expense-rs", "--verbose", "--quiet"]).unwrap_err();
        assert_eq!(err.kind(), clap::error::ErrorKind::ArgumentConflict);
    }
}
