//! Command executor for dispatching CLI commands
//!
//! This module provides the main entry point for executing CLI commands
//! after parsing and configuration loading.

use super::handlers::{MigrateCommandHandler, ServeCommandHandler, TokenCommandHandler};
use super::parser::{Cli, Commands};
use crate::config::Settings;

/// Ports below this usually need elevated privileges
const PRIVILEGED_PORT_LIMIT: u16 = 1024;

/// Execute a CLI command with the given settings
///
/// Running without a subcommand is the same as `serve`.
///
/// # Errors
/// Returns errors from command handlers, including configuration
/// validation failures for the sections the command needs.
pub async fn execute_command(cli: &Cli, settings: Settings) -> anyhow::Result<()> {
    match &cli.command {
        Some(Commands::Serve { dry_run, .. }) => serve(settings, *dry_run).await,
        None => serve(settings, false).await,
        Some(Commands::Migrate { dry_run, rollback }) => {
            MigrateCommandHandler::new(settings)
                .execute(*dry_run, *rollback)
                .await?;
            Ok(())
        }
        Some(Commands::Token { user, hours }) => {
            TokenCommandHandler::new(settings.jwt).execute(user, *hours)?;
            Ok(())
        }
    }
}

async fn serve(settings: Settings, dry_run: bool) -> anyhow::Result<()> {
    if settings.server.port < PRIVILEGED_PORT_LIMIT {
        tracing::warn!(
            port = settings.server.port,
            "Binding to a privileged port typically requires root privileges"
        );
    }

    ServeCommandHandler::new(settings).execute(dry_run).await
}
