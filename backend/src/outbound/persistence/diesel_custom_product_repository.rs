//! Diesel-backed custom product registry repository.

use async_trait::async_trait;
use diesel::prelude::*;
use diesel_async::RunQueryDsl;

use super::error_mapping::{map_diesel_error, map_pool_error};
use super::models::CustomProductRow;
use super::pool::DbPool;
use super::schema::custom_products::dsl;
use crate::domain::ports::{CustomProductRepository, PersistenceError};
use crate::domain::CustomProduct;

/// PostgreSQL adapter for the custom product port.
#[derive(Clone)]
pub struct DieselCustomProductRepository {
    pool: DbPool,
}

impl DieselCustomProductRepository {
    pub fn new(pool: DbPool) -> Self {
        Self { pool }
    }
}

#[async_trait]
impl CustomProductRepository for DieselCustomProductRepository {
    async fn insert(&self, custom: CustomProduct) -> Result<(), PersistenceError> {
        let mut conn = self.pool.get().await.map_err(map_pool_error)?;
        diesel::insert_into(dsl::custom_products)
            .values(CustomProductRow::from_domain(&custom))
            .execute(&mut conn)
            .await
            .map_err(map_diesel_error)?;
        Ok(())
    }

    async fn list_for_user(
        &self,
        username: &str,
    ) -> Result<Vec<CustomProduct>, PersistenceError> {
        let mut conn = self.pool.get().await.map_err(map_pool_error)?;
        let rows = dsl::custom_products
            .filter(dsl::username.eq(username))
            .select(CustomProductRow::as_select())
            .load::<CustomProductRow>(&mut conn)
            .await
            .map_err(map_diesel_error)?;
        rows.into_iter().map(CustomProductRow::into_domain).collect()
    }
}
