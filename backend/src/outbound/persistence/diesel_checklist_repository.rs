//! Diesel-backed checklist repository.

use async_trait::async_trait;
use chrono::{DateTime, Utc};
use diesel::dsl::max;
use diesel::prelude::*;
use diesel_async::RunQueryDsl;

use super::error_mapping::{map_diesel_error, map_pool_error};
use super::models::{ChecklistDetailRow, ChecklistRow, NewChecklistDetailRow, NewChecklistRow};
use super::pool::DbPool;
use super::schema::{checklist_details, checklists};
use crate::domain::ports::{ChecklistRepository, PersistenceError};
use crate::domain::{Checklist, ChecklistDetail, JanCode};

/// PostgreSQL adapter for the checklist port.
///
/// `max_checklist_id` and the subsequent insert run as separate statements
/// with no locking, preserving the read-then-write identifier assignment.
#[derive(Clone)]
pub struct DieselChecklistRepository {
    pool: DbPool,
}

impl DieselChecklistRepository {
    pub fn new(pool: DbPool) -> Self {
        Self { pool }
    }
}

#[async_trait]
impl ChecklistRepository for DieselChecklistRepository {
    async fn max_checklist_id(&self) -> Result<Option<i32>, PersistenceError> {
        let mut conn = self.pool.get().await.map_err(map_pool_error)?;
        checklists::dsl::checklists
            .select(max(checklists::dsl::checklist_id))
            .first::<Option<i32>>(&mut conn)
            .await
            .map_err(map_diesel_error)
    }

    async fn insert_checklist(&self, checklist: Checklist) -> Result<(), PersistenceError> {
        let mut conn = self.pool.get().await.map_err(map_pool_error)?;
        diesel::insert_into(checklists::dsl::checklists)
            .values(NewChecklistRow::from_domain(&checklist))
            .execute(&mut conn)
            .await
            .map_err(map_diesel_error)?;
        Ok(())
    }

    async fn insert_details(
        &self,
        details: Vec<ChecklistDetail>,
    ) -> Result<(), PersistenceError> {
        let mut conn = self.pool.get().await.map_err(map_pool_error)?;
        let rows: Vec<NewChecklistDetailRow> = details
            .iter()
            .enumerate()
            .map(|(seq, detail)| NewChecklistDetailRow::from_domain(detail, seq as i32))
            .collect();
        diesel::insert_into(checklist_details::dsl::checklist_details)
            .values(rows)
            .execute(&mut conn)
            .await
            .map_err(map_diesel_error)?;
        Ok(())
    }

    async fn list_for_owner(&self, username: &str) -> Result<Vec<Checklist>, PersistenceError> {
        use checklists::dsl;
        let mut conn = self.pool.get().await.map_err(map_pool_error)?;
        let rows = dsl::checklists
            .filter(dsl::username.eq(username))
            .order(dsl::date_create.desc())
            .select(ChecklistRow::as_select())
            .load::<ChecklistRow>(&mut conn)
            .await
            .map_err(map_diesel_error)?;
        Ok(rows.into_iter().map(ChecklistRow::into_domain).collect())
    }

    async fn list_all_details(&self) -> Result<Vec<ChecklistDetail>, PersistenceError> {
        use checklist_details::dsl;
        let mut conn = self.pool.get().await.map_err(map_pool_error)?;
        let rows = dsl::checklist_details
            .order((dsl::checklist_id.asc(), dsl::seq.asc()))
            .select(ChecklistDetailRow::as_select())
            .load::<ChecklistDetailRow>(&mut conn)
            .await
            .map_err(map_diesel_error)?;
        rows.into_iter().map(ChecklistDetailRow::into_domain).collect()
    }

    async fn update_detail(
        &self,
        checklist_id: i32,
        jancode: &JanCode,
        dateline: &str,
        datetime: DateTime<Utc>,
    ) -> Result<bool, PersistenceError> {
        use checklist_details::dsl;
        let mut conn = self.pool.get().await.map_err(map_pool_error)?;
        let updated = diesel::update(
            dsl::checklist_details
                .filter(dsl::checklist_id.eq(checklist_id))
                .filter(dsl::jancode.eq(jancode.as_ref())),
        )
        .set((
            dsl::dateline.eq(Some(dateline.to_owned())),
            dsl::datetime.eq(Some(datetime)),
        ))
        .execute(&mut conn)
        .await
        .map_err(map_diesel_error)?;
        Ok(updated > 0)
    }
}
