//! OCR settings persistence port.

use std::sync::Mutex;

use async_trait::async_trait;
use uuid::Uuid;

use super::PersistenceError;
use crate::domain::settings::OcrSetting;

/// Stores OCR configuration values.
#[async_trait]
pub trait SettingsRepository: Send + Sync {
    /// All settings in insertion order.
    async fn list_all(&self) -> Result<Vec<OcrSetting>, PersistenceError>;

    /// Append a setting row.
    async fn insert(&self, setting: OcrSetting) -> Result<(), PersistenceError>;

    /// Remove the setting with the given identifier, returning whether a row
    /// was deleted.
    async fn delete(&self, id: Uuid) -> Result<bool, PersistenceError>;
}

/// Mutex-guarded vector implementation for tests and database-less runs.
#[derive(Default)]
pub struct InMemorySettingsRepository {
    settings: Mutex<Vec<OcrSetting>>,
}

impl InMemorySettingsRepository {
    pub fn new() -> Self {
        Self::default()
    }

    fn locked(&self) -> Result<std::sync::MutexGuard<'_, Vec<OcrSetting>>, PersistenceError> {
        self.settings
            .lock()
            .map_err(|_| PersistenceError::query("settings state lock poisoned"))
    }
}

#[async_trait]
impl SettingsRepository for InMemorySettingsRepository {
    async fn list_all(&self) -> Result<Vec<OcrSetting>, PersistenceError> {
        Ok(self.locked()?.clone())
    }

    async fn insert(&self, setting: OcrSetting) -> Result<(), PersistenceError> {
        self.locked()?.push(setting);
        Ok(())
    }

    async fn delete(&self, id: Uuid) -> Result<bool, PersistenceError> {
        let mut settings = self.locked()?;
        let before = settings.len();
        settings.retain(|setting| setting.id != id);
        Ok(settings.len() < before)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[tokio::test]
    async fn delete_removes_only_the_target() {
        let repo = InMemorySettingsRepository::new();
        let keep = OcrSetting::new("lang=jpn");
        let drop = OcrSetting::new("psm=6");
        repo.insert(keep.clone()).await.expect("insert");
        repo.insert(drop.clone()).await.expect("insert");

        assert!(repo.delete(drop.id).await.expect("delete"));
        let remaining = repo.list_all().await.expect("query");
        assert_eq!(remaining, vec![keep]);
    }

    #[tokio::test]
    async fn delete_of_unknown_id_reports_false() {
        let repo = InMemorySettingsRepository::new();
        assert!(!repo.delete(Uuid::new_v4()).await.expect("delete"));
    }
}
