//! Checklist persistence port.

use std::sync::Mutex;

use async_trait::async_trait;
use chrono::{DateTime, Utc};

use super::PersistenceError;
use crate::domain::checklist::{Checklist, ChecklistDetail};
use crate::domain::product::JanCode;

/// Stores checklists and their detail rows.
///
/// `checklist_id` carries no uniqueness constraint; `max_checklist_id` and the
/// subsequent insert are separate operations, so concurrent creators can both
/// observe the same maximum.
#[async_trait]
pub trait ChecklistRepository: Send + Sync {
    /// The highest assigned checklist identifier, or `None` when the store is
    /// empty.
    async fn max_checklist_id(&self) -> Result<Option<i32>, PersistenceError>;

    /// Append a checklist header row.
    async fn insert_checklist(&self, checklist: Checklist) -> Result<(), PersistenceError>;

    /// Append detail rows, preserving their order.
    async fn insert_details(
        &self,
        details: Vec<ChecklistDetail>,
    ) -> Result<(), PersistenceError>;

    /// All checklists owned by `username`, newest creation date first.
    async fn list_for_owner(&self, username: &str) -> Result<Vec<Checklist>, PersistenceError>;

    /// Every detail row in the store, in insertion order.
    async fn list_all_details(&self) -> Result<Vec<ChecklistDetail>, PersistenceError>;

    /// Set the dateline and update instant on every detail matching the
    /// checklist identifier and barcode, returning whether any row matched.
    async fn update_detail(
        &self,
        checklist_id: i32,
        jancode: &JanCode,
        dateline: &str,
        datetime: DateTime<Utc>,
    ) -> Result<bool, PersistenceError>;
}

#[derive(Default)]
struct ChecklistState {
    checklists: Vec<Checklist>,
    details: Vec<ChecklistDetail>,
}

/// Mutex-guarded implementation for tests and database-less runs.
#[derive(Default)]
pub struct InMemoryChecklistRepository {
    state: Mutex<ChecklistState>,
}

impl InMemoryChecklistRepository {
    pub fn new() -> Self {
        Self::default()
    }

    fn locked(&self) -> Result<std::sync::MutexGuard<'_, ChecklistState>, PersistenceError> {
        self.state
            .lock()
            .map_err(|_| PersistenceError::query("checklist state lock poisoned"))
    }
}

#[async_trait]
impl ChecklistRepository for InMemoryChecklistRepository {
    async fn max_checklist_id(&self) -> Result<Option<i32>, PersistenceError> {
        Ok(self
            .locked()?
            .checklists
            .iter()
            .map(|checklist| checklist.checklist_id)
            .max())
    }

    async fn insert_checklist(&self, checklist: Checklist) -> Result<(), PersistenceError> {
        self.locked()?.checklists.push(checklist);
        Ok(())
    }

    async fn insert_details(
        &self,
        details: Vec<ChecklistDetail>,
    ) -> Result<(), PersistenceError> {
        self.locked()?.details.extend(details);
        Ok(())
    }

    async fn list_for_owner(&self, username: &str) -> Result<Vec<Checklist>, PersistenceError> {
        let mut owned: Vec<Checklist> = self
            .locked()?
            .checklists
            .iter()
            .filter(|checklist| checklist.username == username)
            .cloned()
            .collect();
        // ISO date strings sort lexicographically in date order.
        owned.sort_by(|a, b| b.date_create.cmp(&a.date_create));
        Ok(owned)
    }

    async fn list_all_details(&self) -> Result<Vec<ChecklistDetail>, PersistenceError> {
        Ok(self.locked()?.details.clone())
    }

    async fn update_detail(
        &self,
        checklist_id: i32,
        jancode: &JanCode,
        dateline: &str,
        datetime: DateTime<Utc>,
    ) -> Result<bool, PersistenceError> {
        let mut state = self.locked()?;
        let mut matched = false;
        for detail in state
            .details
            .iter_mut()
            .filter(|detail| detail.checklist_id == checklist_id && &detail.jancode == jancode)
        {
            detail.dateline = Some(dateline.to_owned());
            detail.datetime = Some(datetime);
            matched = true;
        }
        Ok(matched)
    }
}
