//! Application state for Axum web framework.
//!
//! Contains shared services and resources that are accessible
//! across all request handlers.

use crate::config::{JwtConfig, Settings};
use crate::db::AsyncDbPool;
use crate::repositories::Repositories;
use crate::services::Services;

/// Application state containing all shared services and resources.
///
/// Cloning is cheap since services only hold `Arc`s and the pool is
/// reference counted.
#[derive(Clone)]
pub struct AppState {
    /// All business logic services
    pub services: Services,
    /// JWT configuration for token validation
    pub jwt_config: JwtConfig,
}

impl AppState {
    /// Creates a new AppState from a database connection pool.
    ///
    /// Initializes all repositories and services from the provided pool.
    ///
    /// # Example
    /// ```ignore
    /// let pool = establish_async_connection_pool(&settings.database).await?;
    /// let state = AppState::new(pool, &settings);
    /// ```
    pub fn new(pool: AsyncDbPool, settings: &Settings) -> Self {
        let repos = Repositories::new(pool);
        let services = Services::new(repos, &settings.expenses);
        Self::from_parts(services, settings.jwt.clone())
    }

    /// Creates an AppState from already-built services, e.g. over an
    /// in-memory store.
    pub fn from_parts(services: Services, jwt_config: JwtConfig) -> Self {
        Self {
            services,
            jwt_config,
        }
    }
}
