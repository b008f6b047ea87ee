//! Diesel-backed user repository.

use async_trait::async_trait;
use diesel::prelude::*;
use diesel_async::RunQueryDsl;

use super::error_mapping::{map_diesel_error, map_pool_error};
use super::models::UserRow;
use super::pool::DbPool;
use super::schema::users::dsl;
use crate::domain::ports::{PersistenceError, UserRepository};
use crate::domain::{Mode, UserAccount};

/// PostgreSQL adapter for the user port.
#[derive(Clone)]
pub struct DieselUserRepository {
    pool: DbPool,
}

impl DieselUserRepository {
    pub fn new(pool: DbPool) -> Self {
        Self { pool }
    }
}

#[async_trait]
impl UserRepository for DieselUserRepository {
    async fn find_by_username(
        &self,
        username: &str,
    ) -> Result<Option<UserAccount>, PersistenceError> {
        let mut conn = self.pool.get().await.map_err(map_pool_error)?;
        let row = dsl::users
            .filter(dsl::username.eq(username))
            .select(UserRow::as_select())
            .first::<UserRow>(&mut conn)
            .await
            .optional()
            .map_err(map_diesel_error)?;
        row.map(UserRow::into_domain).transpose()
    }

    async fn list_all(&self) -> Result<Vec<UserAccount>, PersistenceError> {
        let mut conn = self.pool.get().await.map_err(map_pool_error)?;
        let rows = dsl::users
            .order(dsl::username.asc())
            .select(UserRow::as_select())
            .load::<UserRow>(&mut conn)
            .await
            .map_err(map_diesel_error)?;
        rows.into_iter().map(UserRow::into_domain).collect()
    }

    async fn set_mode(
        &self,
        username: &str,
        mode: Mode,
    ) -> Result<Option<UserAccount>, PersistenceError> {
        let mut conn = self.pool.get().await.map_err(map_pool_error)?;
        let row = diesel::update(dsl::users.filter(dsl::username.eq(username)))
            .set(dsl::mode.eq(i16::from(mode.as_u8())))
            .returning(UserRow::as_returning())
            .get_result::<UserRow>(&mut conn)
            .await
            .optional()
            .map_err(map_diesel_error)?;
        row.map(UserRow::into_domain).transpose()
    }
}
