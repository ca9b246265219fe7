//! Serve command handler
//!
//! Handles the serve command including dry-run validation and server startup.

use crate::config::Settings;
use crate::error::AppResult;
use crate::server::Server;

/// Handler for the serve command
pub struct ServeCommandHandler {
    config: Settings,
}

impl ServeCommandHandler {
    /// Create a new serve command handler
    pub fn new(config: Settings) -> Self {
        Self { config }
    }

    /// Validates the full configuration, then either reports and exits
    /// (`dry_run`) or runs the server until shutdown.
    ///
    /// # Errors
    /// - Configuration validation errors
    /// - Server startup and runtime errors (if not dry-run)
    pub async fn execute(self, dry_run: bool) -> anyhow::Result<()> {
        self.validate_only()?;

        if dry_run {
            println!("Dry run completed successfully - configuration is ready for deployment");
            return Ok(());
        }

        Server::new(self.config).run().await
    }

    /// Validate configuration without starting the server
    pub fn validate_only(&self) -> AppResult<()> {
        self.config.validate()?;

        tracing::info!(
            address = %self.config.server.address(),
            id_length = self.config.expenses.id_length,
            "Configuration is valid"
        );
        Ok(())
    }

    /// Get the configuration
    pub fn config(&self) -> &Settings {
        &self.config
    }
}
