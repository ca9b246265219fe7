//! Server module for managing HTTP server lifecycle
//!
//! This module handles server initialization, startup, and graceful shutdown.

use std::future::IntoFuture;
use std::time::Duration;

use tokio::net::TcpListener;
use tokio::signal;
use tokio::sync::watch;

use crate::api::routes::create_router;
use crate::config::Settings;
use crate::db::{MIGRATIONS, establish_async_connection_pool};
use crate::error::{AppError, AppResult};
use crate::state::AppState;

/// HTTP server manager
pub struct Server {
    settings: Settings,
}

impl Server {
    /// Create a new server with the given settings
    pub fn new(settings: Settings) -> Self {
        Self { settings }
    }

    /// Start the server and run until a shutdown signal
    ///
    /// This method:
    /// 1. Logs startup information
    /// 2. Runs pending migrations when `database.auto_migrate` is set
    /// 3. Initializes the database connection pool and application state
    /// 4. Binds to the configured address
    /// 5. Serves until Ctrl+C/SIGTERM, then drains in-flight requests for at
    ///    most `server.request_timeout` seconds
    ///
    /// # Errors
    /// - Migration or connection pool initialization errors
    /// - Address binding errors
    /// - Server runtime errors
    pub async fn run(self) -> anyhow::Result<()> {
        let settings = &self.settings;

        tracing::info!(
            app_name = %settings.application.name,
            app_version = %settings.application.version,
            "Application starting"
        );

        tracing::info!(
            host = %settings.server.host,
            port = %settings.server.port,
            request_timeout = %settings.server.request_timeout,
            cors_origins = ?settings.server.cors_origins,
            "Server configuration loaded"
        );

        // The URL carries credentials, so it is never logged
        tracing::info!(
            max_connections = %settings.database.max_connections,
            min_connections = %settings.database.min_connections,
            connection_timeout = %settings.database.connection_timeout,
            auto_migrate = %settings.database.auto_migrate,
            "Database configuration loaded"
        );

        tracing::info!(
            access_token_expiration = %settings.jwt.access_token_expiration,
            secret_configured = %(!settings.jwt.secret.is_empty()),
            "JWT configuration loaded"
        );

        if settings.database.auto_migrate {
            let applied = run_pending_migrations(settings.database.url.clone()).await?;
            tracing::info!(applied = applied.len(), migrations = ?applied, "Migrations applied");
        }

        tracing::info!("Initializing database connection pool...");
        let pool = establish_async_connection_pool(&settings.database).await?;
        tracing::info!("Database connection pool initialized");

        let state = AppState::new(pool, settings);
        let router = create_router(state, &settings.server);
        tracing::info!("Router configured");

        let address = settings.server.address();
        let listener = TcpListener::bind(&address).await.map_err(|e| {
            tracing::error!(error = %e, address = %address, "Failed to bind to address");
            anyhow::anyhow!("Failed to bind to {}: {}", address, e)
        })?;

        tracing::info!(address = %address, "Server listening");

        let (shutdown_tx, mut shutdown_rx) = watch::channel(false);
        let server = axum::serve(listener, router)
            .with_graceful_shutdown(async move {
                shutdown_signal().await;
                let _ = shutdown_tx.send(true);
            })
            .into_future();

        let drain_timeout = Duration::from_secs(settings.server.request_timeout);
        let drain_deadline = async move {
            if shutdown_rx.changed().await.is_ok() {
                tokio::time::sleep(drain_timeout).await;
            } else {
                std::future::pending::<()>().await;
            }
        };

        tokio::select! {
            result = server => result?,
            _ = drain_deadline => {
                tracing::warn!(
                    timeout_secs = drain_timeout.as_secs(),
                    "In-flight requests did not finish in time, forcing shutdown"
                );
            }
        }

        tracing::info!("Server shutdown complete");

        Ok(())
    }
}

/// Applies pending embedded migrations over a blocking `PgConnection`.
///
/// # Returns
/// Versions of the migrations that were applied
pub async fn run_pending_migrations(database_url: String) -> AppResult<Vec<String>> {
    tokio::task::spawn_blocking(move || {
        use diesel::Connection;
        use diesel::pg::PgConnection;
        use diesel_migrations::MigrationHarness;

        let mut conn = PgConnection::establish(&database_url).map_err(|e| AppError::Database {
            operation: "establish connection for migrations".to_string(),
            source: anyhow::Error::new(e),
        })?;

        let applied = conn
            .run_pending_migrations(MIGRATIONS)
            .map_err(|e| AppError::Database {
                operation: "run pending migrations".to_string(),
                source: anyhow::anyhow!(e),
            })?;

        Ok(applied.iter().map(|m| m.to_string()).collect())
    })
    .await
    .map_err(|e| AppError::internal("Migration task failed", e))?
}

/// Waits for a shutdown signal (Ctrl+C or SIGTERM).
///
/// If a handler cannot be installed, that signal source is ignored and the
/// other one still triggers shutdown.
async fn shutdown_signal() {
    let ctrl_c = async {
        if let Err(e) = signal::ctrl_c().await {
            tracing::error!(error = %e, "Failed to install Ctrl+C handler");
            std::future::pending::<()>().await;
        }
    };

    #[cfg(unix)]
    let terminate = async {
        match signal::unix::signal(signal::unix::SignalKind::terminate()) {
            Ok(mut stream) => {
                stream.recv().await;
            }
            Err(e) => {
                tracing::error!(error = %e, "Failed to install SIGTERM handler");
                std::future::pending::<()>().await;
            }
        }
    };

    #[cfg(not(unix))]
    let terminate = std::future::pending::<()>();

    tokio::select! {
        _ = ctrl_c => {
            tracing::info!("Received Ctrl+C, initiating graceful shutdown");
        }
        _ = terminate => {
            tracing::info!("Received SIGTERM, initiating graceful shutdown");
        }
    }
}
