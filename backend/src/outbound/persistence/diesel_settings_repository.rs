//! Diesel-backed OCR settings repository.

use async_trait::async_trait;
use diesel::prelude::*;
use diesel_async::RunQueryDsl;
use uuid::Uuid;

use super::error_mapping::{map_diesel_error, map_pool_error};
use super::models::OcrSettingRow;
use super::pool::DbPool;
use super::schema::ocr_settings::dsl;
use crate::domain::ports::{PersistenceError, SettingsRepository};
use crate::domain::OcrSetting;

/// PostgreSQL adapter for the settings port.
#[derive(Clone)]
pub struct DieselSettingsRepository {
    pool: DbPool,
}

impl DieselSettingsRepository {
    pub fn new(pool: DbPool) -> Self {
        Self { pool }
    }
}

#[async_trait]
impl SettingsRepository for DieselSettingsRepository {
    async fn list_all(&self) -> Result<Vec<OcrSetting>, PersistenceError> {
        let mut conn = self.pool.get().await.map_err(map_pool_error)?;
        let rows = dsl::ocr_settings
            .select(OcrSettingRow::as_select())
            .load::<OcrSettingRow>(&mut conn)
            .await
            .map_err(map_diesel_error)?;
        Ok(rows.into_iter().map(OcrSettingRow::into_domain).collect())
    }

    async fn insert(&self, setting: OcrSetting) -> Result<(), PersistenceError> {
        let mut conn = self.pool.get().await.map_err(map_pool_error)?;
        diesel::insert_into(dsl::ocr_settings)
            .values(OcrSettingRow::from_domain(&setting))
            .execute(&mut conn)
            .await
            .map_err(map_diesel_error)?;
        Ok(())
    }

    async fn delete(&self, id: Uuid) -> Result<bool, PersistenceError> {
        let mut conn = self.pool.get().await.map_err(map_pool_error)?;
        let deleted = diesel::delete(dsl::ocr_settings.filter(dsl::id.eq(id)))
            .execute(&mut conn)
            .await
            .map_err(map_diesel_error)?;
        Ok(deleted > 0)
    }
}
