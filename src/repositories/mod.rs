//! Repository layer for data access operations.
//!
//! The service layer talks to persistence only through the `ExpenseStore`
//! trait; `ExpenseRepository` is the diesel_async implementation.

mod expense_repo;
#[cfg(test)]
pub(crate) mod memory;

pub use expense_repo::{ExpenseRepository, ExpenseStore};

use crate::db::AsyncDbPool;

/// Aggregates all repositories for convenient access.
///
/// Since `AsyncDbPool` uses `Arc` internally, cloning is cheap.
#[derive(Clone)]
pub struct Repositories {
    pub expenses: ExpenseRepository,
}

impl Repositories {
    /// Creates a new Repositories instance with all repositories initialized.
    pub fn new(pool: AsyncDbPool) -> Self {
        Self {
            expenses: ExpenseRepository::new(pool),
        }
    }
}
