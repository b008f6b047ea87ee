//! Product catalog persistence port.

use std::sync::Mutex;

use async_trait::async_trait;

use super::PersistenceError;
use crate::domain::product::{JanCode, Product};

/// Stores master product records keyed by barcode.
#[async_trait]
pub trait ProductRepository: Send + Sync {
    /// All products in insertion order.
    async fn list_all(&self) -> Result<Vec<Product>, PersistenceError>;

    /// Look up one product by its barcode.
    async fn find_by_jancode(
        &self,
        jancode: &JanCode,
    ) -> Result<Option<Product>, PersistenceError>;

    /// Look up several products at once; absent codes are simply omitted.
    async fn find_by_jancodes(
        &self,
        jancodes: &[JanCode],
    ) -> Result<Vec<Product>, PersistenceError>;

    /// Append a product record. No uniqueness is enforced beyond the store's
    /// own key constraints.
    async fn insert(&self, product: Product) -> Result<(), PersistenceError>;

    /// Total number of catalog rows.
    async fn count(&self) -> Result<i64, PersistenceError>;

    /// The row at `offset` in the store's natural order, if any.
    async fn nth(&self, offset: i64) -> Result<Option<Product>, PersistenceError>;
}

/// Mutex-guarded vector implementation for tests and database-less runs.
#[derive(Default)]
pub struct InMemoryProductRepository {
    products: Mutex<Vec<Product>>,
}

impl InMemoryProductRepository {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_products(products: impl IntoIterator<Item = Product>) -> Self {
        Self {
            products: Mutex::new(products.into_iter().collect()),
        }
    }

    fn locked(&self) -> Result<std::sync::MutexGuard<'_, Vec<Product>>, PersistenceError> {
        self.products
            .lock()
            .map_err(|_| PersistenceError::query("product state lock poisoned"))
    }
}

#[async_trait]
impl ProductRepository for InMemoryProductRepository {
    async fn list_all(&self) -> Result<Vec<Product>, PersistenceError> {
        Ok(self.locked()?.clone())
    }

    async fn find_by_jancode(
        &self,
        jancode: &JanCode,
    ) -> Result<Option<Product>, PersistenceError> {
        Ok(self
            .locked()?
            .iter()
            .find(|product| &product.jancode == jancode)
            .cloned())
    }

    async fn find_by_jancodes(
        &self,
        jancodes: &[JanCode],
    ) -> Result<Vec<Product>, PersistenceError> {
        Ok(self
            .locked()?
            .iter()
            .filter(|product| jancodes.contains(&product.jancode))
            .cloned()
            .collect())
    }

    async fn insert(&self, product: Product) -> Result<(), PersistenceError> {
        self.locked()?.push(product);
        Ok(())
    }

    async fn count(&self) -> Result<i64, PersistenceError> {
        Ok(self.locked()?.len() as i64)
    }

    async fn nth(&self, offset: i64) -> Result<Option<Product>, PersistenceError> {
        let products = self.locked()?;
        let index = usize::try_from(offset)
            .map_err(|_| PersistenceError::query("negative row offset"))?;
        Ok(products.get(index).cloned())
    }
}
