//! Diesel-backed product catalog repository.

use async_trait::async_trait;
use diesel::prelude::*;
use diesel_async::RunQueryDsl;

use super::error_mapping::{map_diesel_error, map_pool_error};
use super::models::ProductRow;
use super::pool::DbPool;
use super::schema::products::dsl;
use crate::domain::ports::{PersistenceError, ProductRepository};
use crate::domain::{JanCode, Product};

/// PostgreSQL adapter for the product port.
#[derive(Clone)]
pub struct DieselProductRepository {
    pool: DbPool,
}

impl DieselProductRepository {
    pub fn new(pool: DbPool) -> Self {
        Self { pool }
    }
}

#[async_trait]
impl ProductRepository for DieselProductRepository {
    async fn list_all(&self) -> Result<Vec<Product>, PersistenceError> {
        let mut conn = self.pool.get().await.map_err(map_pool_error)?;
        let rows = dsl::products
            .select(ProductRow::as_select())
            .load::<ProductRow>(&mut conn)
            .await
            .map_err(map_diesel_error)?;
        rows.into_iter().map(ProductRow::into_domain).collect()
    }

    async fn find_by_jancode(
        &self,
        jancode: &JanCode,
    ) -> Result<Option<Product>, PersistenceError> {
        let mut conn = self.pool.get().await.map_err(map_pool_error)?;
        let row = dsl::products
            .filter(dsl::jancode.eq(jancode.as_ref()))
            .select(ProductRow::as_select())
            .first::<ProductRow>(&mut conn)
            .await
            .optional()
            .map_err(map_diesel_error)?;
        row.map(ProductRow::into_domain).transpose()
    }

    async fn find_by_jancodes(
        &self,
        jancodes: &[JanCode],
    ) -> Result<Vec<Product>, PersistenceError> {
        let mut conn = self.pool.get().await.map_err(map_pool_error)?;
        let codes: Vec<&str> = jancodes.iter().map(AsRef::as_ref).collect();
        let rows = dsl::products
            .filter(dsl::jancode.eq_any(codes))
            .select(ProductRow::as_select())
            .load::<ProductRow>(&mut conn)
            .await
            .map_err(map_diesel_error)?;
        rows.into_iter().map(ProductRow::into_domain).collect()
    }

    async fn insert(&self, product: Product) -> Result<(), PersistenceError> {
        let mut conn = self.pool.get().await.map_err(map_pool_error)?;
        diesel::insert_into(dsl::products)
            .values(ProductRow::from_domain(&product))
            .execute(&mut conn)
            .await
            .map_err(map_diesel_error)?;
        Ok(())
    }

    async fn count(&self) -> Result<i64, PersistenceError> {
        let mut conn = self.pool.get().await.map_err(map_pool_error)?;
        dsl::products
            .count()
            .get_result::<i64>(&mut conn)
            .await
            .map_err(map_diesel_error)
    }

    async fn nth(&self, offset: i64) -> Result<Option<Product>, PersistenceError> {
        let mut conn = self.pool.get().await.map_err(map_pool_error)?;
        let row = dsl::products
            .order(dsl::jancode.asc())
            .offset(offset)
            .limit(1)
            .select(ProductRow::as_select())
            .first::<ProductRow>(&mut conn)
            .await
            .optional()
            .map_err(map_diesel_error)?;
        row.map(ProductRow::into_domain).transpose()
    }
}
