//! Demonstrates the non-atomic checklist identifier assignment.
//!
//! Identifier assignment reads the current maximum and inserts separately,
//! with no unique index on `checklist_id`. Two creators that interleave
//! between the read and the write are both assigned the same identifier.
//! This test pins that behaviour down rather than asserting safety.

use std::sync::Arc;

use async_trait::async_trait;
use chrono::{DateTime, Utc};
use tokio::sync::Barrier;

use shelfcheck_backend::domain::ports::{
    ChecklistRepository, InMemoryChecklistRepository, InMemoryProductRepository, PersistenceError,
};
use shelfcheck_backend::domain::{Checklist, ChecklistDetail, ChecklistService, JanCode};

/// Wrapper that parks every `max_checklist_id` call on a barrier, forcing
/// concurrent creators to read the maximum before either of them inserts.
struct GatedChecklistRepository {
    inner: InMemoryChecklistRepository,
    gate: Barrier,
}

impl GatedChecklistRepository {
    fn for_two_creators() -> Self {
        Self {
            inner: InMemoryChecklistRepository::new(),
            gate: Barrier::new(2),
        }
    }
}

#[async_trait]
impl ChecklistRepository for GatedChecklistRepository {
    async fn max_checklist_id(&self) -> Result<Option<i32>, PersistenceError> {
        let max = self.inner.max_checklist_id().await?;
        self.gate.wait().await;
        Ok(max)
    }

    async fn insert_checklist(&self, checklist: Checklist) -> Result<(), PersistenceError> {
        self.inner.insert_checklist(checklist).await
    }

    async fn insert_details(
        &self,
        details: Vec<ChecklistDetail>,
    ) -> Result<(), PersistenceError> {
        self.inner.insert_details(details).await
    }

    async fn list_for_owner(&self, username: &str) -> Result<Vec<Checklist>, PersistenceError> {
        self.inner.list_for_owner(username).await
    }

    async fn list_all_details(&self) -> Result<Vec<ChecklistDetail>, PersistenceError> {
        self.inner.list_all_details().await
    }

    async fn update_detail(
        &self,
        checklist_id: i32,
        jancode: &JanCode,
        dateline: &str,
        datetime: DateTime<Utc>,
    ) -> Result<bool, PersistenceError> {
        self.inner
            .update_detail(checklist_id, jancode, dateline, datetime)
            .await
    }
}

fn jancode(raw: &str) -> JanCode {
    JanCode::new(raw).expect("valid code")
}

#[tokio::test]
async fn concurrent_creators_can_collide_on_the_same_identifier() {
    let service = Arc::new(ChecklistService::new(
        Arc::new(GatedChecklistRepository::for_two_creators()),
        Arc::new(InMemoryProductRepository::new()),
    ));

    let first = {
        let service = Arc::clone(&service);
        async move { service.create("alice", vec![jancode("111")]).await }
    };
    let second = {
        let service = Arc::clone(&service);
        async move { service.create("bob", vec![jancode("222")]).await }
    };

    let (first, second) = tokio::join!(first, second);
    let first = first.expect("first create succeeds");
    let second = second.expect("second create succeeds");

    // Both creators observed the same maximum and were assigned the same id.
    assert_eq!(first.checklist.checklist_id, 1);
    assert_eq!(second.checklist.checklist_id, 1);
}

#[tokio::test]
async fn sequential_creators_get_strictly_increasing_identifiers() {
    let service = ChecklistService::new(
        Arc::new(InMemoryChecklistRepository::new()),
        Arc::new(InMemoryProductRepository::new()),
    );

    let mut previous = 0;
    for code in ["111", "222", "333"] {
        let created = service
            .create("alice", vec![jancode(code)])
            .await
            .expect("create checklist");
        assert!(created.checklist.checklist_id > previous);
        previous = created.checklist.checklist_id;
    }
}
