//! Product catalog reads and unknown-code registration.

use std::sync::Arc;

use tracing::{info, warn};

use super::error::Error;
use super::ports::{CustomProductRepository, ProductRepository};
use super::product::{CustomProduct, JanCode, Product};

/// Catalog operations over the product and custom-product repositories.
pub struct CatalogService {
    products: Arc<dyn ProductRepository>,
    custom_products: Arc<dyn CustomProductRepository>,
}

impl CatalogService {
    pub fn new(
        products: Arc<dyn ProductRepository>,
        custom_products: Arc<dyn CustomProductRepository>,
    ) -> Self {
        Self {
            products,
            custom_products,
        }
    }

    /// Every master product record.
    pub async fn list_all(&self) -> Result<Vec<Product>, Error> {
        self.products.list_all().await.map_err(|error| {
            warn!(%error, "product listing failed");
            Error::internal("Failed to fetch products")
        })
    }

    /// One product by barcode.
    pub async fn find(&self, jancode: &JanCode) -> Result<Product, Error> {
        self.products
            .find_by_jancode(jancode)
            .await
            .map_err(|error| {
                warn!(%error, "product lookup failed");
                Error::internal("Failed to fetch product")
            })?
            .ok_or_else(|| Error::not_found("Product not found"))
    }

    /// Record a scanned code that has no master record.
    ///
    /// A placeholder product is inserted only when the code is absent from
    /// the catalog, but an audit row attributed to the registrant is appended
    /// unconditionally, so repeat registrations accumulate. The returned
    /// product is the placeholder built from the inputs, whether or not the
    /// catalog already held a record for the code.
    pub async fn register_unknown(
        &self,
        jancode: JanCode,
        dateline: &str,
        registrant: &str,
    ) -> Result<(Product, CustomProduct), Error> {
        let map_store = |error| {
            warn!(%error, "unknown-code registration failed");
            Error::internal("Failed to create product")
        };

        let placeholder = Product::no_master(jancode.clone(), dateline);
        let existing = self
            .products
            .find_by_jancode(&jancode)
            .await
            .map_err(map_store)?;
        if existing.is_none() {
            self.products
                .insert(placeholder.clone())
                .await
                .map_err(map_store)?;
        }

        let custom = CustomProduct::from_registration(&placeholder, registrant);
        self.custom_products
            .insert(custom.clone())
            .await
            .map_err(map_store)?;

        info!(jancode = %placeholder.jancode, registrant, "registered unknown code");
        Ok((placeholder, custom))
    }

    /// Audit rows registered by `owner`.
    pub async fn list_custom(&self, owner: &str) -> Result<Vec<CustomProduct>, Error> {
        self.custom_products
            .list_for_user(owner)
            .await
            .map_err(|error| {
                warn!(%error, "custom product listing failed");
                Error::internal("Failed to fetch custom products")
            })
    }
}
