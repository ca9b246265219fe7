//! Database connection pool module.
//!
//! Provides async PostgreSQL connection pooling using diesel_async with bb8,
//! and the embedded schema migrations used by the `migrate` command.

mod pool;

use diesel_migrations::{EmbeddedMigrations, embed_migrations};

pub use pool::{AsyncDbPool, establish_async_connection_pool};

/// Migrations compiled into the binary from `migrations/`.
pub const MIGRATIONS: EmbeddedMigrations = embed_migrations!("migrations");
