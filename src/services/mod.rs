//! Service layer for business logic operations.
//!
//! Services encapsulate business logic and coordinate between
//! repositories and handlers.

mod expense_service;

pub use expense_service::{ExpenseService, messages};

use std::sync::Arc;

use crate::config::settings::ExpenseSettings;
use crate::repositories::Repositories;
use crate::utils::id::NanoIdGenerator;

/// Aggregates all services for convenient access.
///
/// Cloning is cheap since services only hold `Arc`s.
#[derive(Clone)]
pub struct Services {
    pub expenses: ExpenseService,
}

impl Services {
    /// Creates a new Services instance from Repositories.
    pub fn new(repos: Repositories, settings: &ExpenseSettings) -> Self {
        Self {
            expenses: ExpenseService::new(
                Arc::new(repos.expenses),
                Arc::new(NanoIdGenerator::new(settings.id_length)),
            ),
        }
    }
}
