//! Custom product registry persistence port.

use std::sync::Mutex;

use async_trait::async_trait;

use super::PersistenceError;
use crate::domain::product::CustomProduct;

/// Stores per-user unknown-code registration rows.
#[async_trait]
pub trait CustomProductRepository: Send + Sync {
    /// Append a registration row. Duplicate codes are allowed.
    async fn insert(&self, custom: CustomProduct) -> Result<(), PersistenceError>;

    /// All rows registered by `username`, in insertion order.
    async fn list_for_user(&self, username: &str)
        -> Result<Vec<CustomProduct>, PersistenceError>;
}

/// Mutex-guarded vector implementation for tests and database-less runs.
#[derive(Default)]
pub struct InMemoryCustomProductRepository {
    rows: Mutex<Vec<CustomProduct>>,
}

impl InMemoryCustomProductRepository {
    pub fn new() -> Self {
        Self::default()
    }

    fn locked(&self) -> Result<std::sync::MutexGuard<'_, Vec<CustomProduct>>, PersistenceError> {
        self.rows
            .lock()
            .map_err(|_| PersistenceError::query("custom product state lock poisoned"))
    }
}

#[async_trait]
impl CustomProductRepository for InMemoryCustomProductRepository {
    async fn insert(&self, custom: CustomProduct) -> Result<(), PersistenceError> {
        self.locked()?.push(custom);
        Ok(())
    }

    async fn list_for_user(
        &self,
        username: &str,
    ) -> Result<Vec<CustomProduct>, PersistenceError> {
        Ok(self
            .locked()?
            .iter()
            .filter(|row| row.username == username)
            .cloned()
            .collect())
    }
}
