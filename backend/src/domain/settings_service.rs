//! OCR settings collection management.

use std::sync::Arc;

use tracing::warn;
use uuid::Uuid;

use super::error::Error;
use super::ports::SettingsRepository;
use super::settings::OcrSetting;

/// OCR setting operations over the settings repository.
pub struct SettingsService {
    settings: Arc<dyn SettingsRepository>,
}

impl SettingsService {
    pub fn new(settings: Arc<dyn SettingsRepository>) -> Self {
        Self { settings }
    }

    /// Every stored setting.
    pub async fn list(&self) -> Result<Vec<OcrSetting>, Error> {
        self.settings.list_all().await.map_err(|error| {
            warn!(%error, "settings listing failed");
            Error::internal("Failed to fetch settings_ocr")
        })
    }

    /// Store a new value, returning it with its generated identifier.
    pub async fn add(&self, value: String) -> Result<OcrSetting, Error> {
        let setting = OcrSetting::new(value);
        self.settings
            .insert(setting.clone())
            .await
            .map_err(|error| {
                warn!(%error, "settings insert failed");
                Error::internal("Failed to insert settings_ocr")
            })?;
        Ok(setting)
    }

    /// Remove a setting by identifier.
    pub async fn remove(&self, id: Uuid) -> Result<(), Error> {
        let deleted = self.settings.delete(id).await.map_err(|error| {
            warn!(%error, "settings delete failed");
            Error::internal("Failed to delete settings_ocr")
        })?;
        if !deleted {
            return Err(Error::not_found("settings_ocr not found"));
        }
        Ok(())
    }
}
