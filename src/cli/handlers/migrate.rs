//! Migrate command handler
//!
//! Handles database migration operations including dry-run and rollback.
//! Migrations are embedded in the binary and run over a blocking
//! `PgConnection` on the blocking thread pool.

use diesel::Connection;
use diesel::pg::PgConnection;
use diesel_migrations::MigrationHarness;

use crate::config::Settings;
use crate::db::MIGRATIONS;
use crate::error::{AppError, AppResult, FieldError};
use crate::server::run_pending_migrations;

/// Handler for the migrate command
pub struct MigrateCommandHandler {
    config: Settings,
}

impl MigrateCommandHandler {
    /// Create a new migrate command handler
    pub fn new(config: Settings) -> Self {
        Self { config }
    }

    /// Execute the migrate command with dry-run and rollback support
    ///
    /// # Arguments
    /// * `dry_run` - If true, shows pending migrations without applying them
    /// * `rollback` - Optional number of migrations to rollback
    ///
    /// # Errors
    /// - Database configuration validation errors
    /// - Database connection errors
    /// - Migration execution errors
    pub async fn execute(&self, dry_run: bool, rollback: Option<u32>) -> AppResult<()> {
        if rollback == Some(0) {
            return Err(rollback_error("Number of rollback steps must be greater than 0"));
        }

        self.config.database.validate()?;

        if dry_run {
            return self.show_pending_migrations().await;
        }

        match rollback {
            Some(steps) => self.rollback_migrations(steps).await,
            None => self.run_migrations().await,
        }
    }

    /// Show pending migrations without applying them
    async fn show_pending_migrations(&self) -> AppResult<()> {
        println!("Checking for pending migrations...");

        let pending = self
            .with_connection("check pending migrations", |conn| {
                conn.pending_migrations(MIGRATIONS)
                    .map(|pending| pending.iter().map(|m| m.name().to_string()).collect::<Vec<_>>())
                    .map_err(|e| anyhow::anyhow!(e))
            })
            .await?;

        if pending.is_empty() {
            println!("✓ No pending migrations found - database is up to date");
        } else {
            println!("Found {} pending migration(s):", pending.len());
            for name in &pending {
                println!("  - {name}");
            }
            println!("\nRun without --dry-run to apply these migrations");
        }

        Ok(())
    }

    /// Run pending migrations
    async fn run_migrations(&self) -> AppResult<()> {
        println!("Running database migrations...");

        let applied = run_pending_migrations(self.config.database.url.clone()).await?;

        if applied.is_empty() {
            println!("✓ No migrations to apply - database is already up to date");
        } else {
            println!("✓ Applied {} migration(s):", applied.len());
            for migration in &applied {
                println!("  - {migration}");
            }
        }

        Ok(())
    }

    /// Rollback the specified number of migrations
    async fn rollback_migrations(&self, steps: u32) -> AppResult<()> {
        println!("Rolling back {steps} migration(s)...");

        let available = self
            .with_connection("get applied migrations", |conn| {
                conn.applied_migrations()
                    .map(|applied| applied.len())
                    .map_err(|e| anyhow::anyhow!(e))
            })
            .await?;

        if available < steps as usize {
            return Err(rollback_error(format!(
                "Cannot rollback {steps} migrations - only {available} applied migrations available"
            )));
        }

        let reverted = self
            .with_connection("revert migrations", move |conn| {
                (0..steps)
                    .map(|_| {
                        conn.revert_last_migration(MIGRATIONS)
                            .map(|version| version.to_string())
                            .map_err(|e| anyhow::anyhow!(e))
                    })
                    .collect::<Result<Vec<_>, _>>()
            })
            .await?;

        println!("✓ Rolled back {} migration(s):", reverted.len());
        for version in &reverted {
            println!("  - {version}");
        }

        Ok(())
    }

    /// Opens a blocking connection and runs `work` on the blocking pool.
    async fn with_connection<T, F>(&self, operation: &'static str, work: F) -> AppResult<T>
    where
        T: Send + 'static,
        F: FnOnce(&mut PgConnection) -> anyhow::Result<T> + Send + 'static,
    {
        let database_url = self.config.database.url.clone();

        tokio::task::spawn_blocking(move || {
            let mut conn = PgConnection::establish(&database_url).map_err(|e| AppError::Database {
                operation: format!("establish connection to {operation}"),
                source: anyhow::Error::new(e),
            })?;

            work(&mut conn).map_err(|source| AppError::Database {
                operation: operation.to_string(),
                source,
            })
        })
        .await
        .map_err(|e| AppError::internal("Migration task failed", e))?
    }

    /// Get the configuration
    pub fn config(&self) -> &Settings {
        &self.config
    }
}

fn rollback_error(message: impl Into<String>) -> AppError {
    AppError::Validation {
        errors: vec![FieldError {
            field: "rollback_steps".to_string(),
            message: message.into(),
        }],
    }
}
