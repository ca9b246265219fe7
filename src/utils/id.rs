//! Expense identifier generation.

use nanoid::nanoid;

/// Length of generated expense identifiers.
pub const DEFAULT_ID_LENGTH: usize = 11;

/// Source of fresh record identifiers.
///
/// Injected into the service so tests can substitute deterministic ids.
pub trait IdGenerator: Send + Sync {
    /// Produces a new identifier of exactly `self.length()` characters.
    fn generate(&self) -> String;

    fn length(&self) -> usize;
}

/// URL-safe nanoid generator (alphabet `A-Za-z0-9_-`).
#[derive(Debug, Clone, Copy)]
pub struct NanoIdGenerator {
    length: usize,
}

impl NanoIdGenerator {
    pub fn new(length: usize) -> Self {
        Self { length }
    }
}

impl Default for NanoIdGenerator {
    fn default() -> Self {
        Self::new(DEFAULT_ID_LENGTH)
    }
}

impl IdGenerator for NanoIdGenerator {
    fn generate(&self) -> String {
        let size = self.length;
        nanoid!(size)
    }

    fn length(&self) -> usize {
        self.length
    }
}
