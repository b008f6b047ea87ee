//! Persistence ports.
//!
//! Each port is an async trait the domain services depend on, implemented by
//! the Diesel adapters in `outbound::persistence` and by in-memory variants
//! used for tests and for running without a database.

mod checklist_repository;
mod custom_product_repository;
mod product_repository;
mod settings_repository;
mod user_repository;

use thiserror::Error;

pub use checklist_repository::{ChecklistRepository, InMemoryChecklistRepository};
pub use custom_product_repository::{CustomProductRepository, InMemoryCustomProductRepository};
pub use product_repository::{InMemoryProductRepository, ProductRepository};
pub use settings_repository::{InMemorySettingsRepository, SettingsRepository};
pub use user_repository::{InMemoryUserRepository, UserRepository};

/// Failure surfaced by any persistence port.
#[derive(Debug, Error)]
pub enum PersistenceError {
    #[error("failed to obtain a database connection: {message}")]
    Connection { message: String },
    #[error("query failed: {message}")]
    Query { message: String },
}

impl PersistenceError {
    pub fn connection(message: impl Into<String>) -> Self {
        Self::Connection {
            message: message.into(),
        }
    }

    pub fn query(message: impl Into<String>) -> Self {
        Self::Query {
            message: message.into(),
        }
    }
}
