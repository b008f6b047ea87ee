//! User account persistence port.

use std::collections::BTreeMap;
use std::sync::Mutex;

use async_trait::async_trait;

use super::PersistenceError;
use crate::domain::user::{Mode, UserAccount};

/// Stores login records.
#[async_trait]
pub trait UserRepository: Send + Sync {
    /// Look up one account by username.
    async fn find_by_username(
        &self,
        username: &str,
    ) -> Result<Option<UserAccount>, PersistenceError>;

    /// All accounts, in username order.
    async fn list_all(&self) -> Result<Vec<UserAccount>, PersistenceError>;

    /// Overwrite an account's mode, returning the updated record, or `None`
    /// when no such account exists.
    async fn set_mode(
        &self,
        username: &str,
        mode: Mode,
    ) -> Result<Option<UserAccount>, PersistenceError>;
}

/// Mutex-guarded map implementation for tests and database-less runs.
#[derive(Default)]
pub struct InMemoryUserRepository {
    accounts: Mutex<BTreeMap<String, UserAccount>>,
}

impl InMemoryUserRepository {
    pub fn new() -> Self {
        Self::default()
    }

    /// Seed the store with the given accounts.
    pub fn with_accounts(accounts: impl IntoIterator<Item = UserAccount>) -> Self {
        let map = accounts
            .into_iter()
            .map(|account| (account.username.clone(), account))
            .collect();
        Self {
            accounts: Mutex::new(map),
        }
    }

    fn locked(
        &self,
    ) -> Result<std::sync::MutexGuard<'_, BTreeMap<String, UserAccount>>, PersistenceError> {
        self.accounts
            .lock()
            .map_err(|_| PersistenceError::query("user state lock poisoned"))
    }
}

#[async_trait]
impl UserRepository for InMemoryUserRepository {
    async fn find_by_username(
        &self,
        username: &str,
    ) -> Result<Option<UserAccount>, PersistenceError> {
        Ok(self.locked()?.get(username).cloned())
    }

    async fn list_all(&self) -> Result<Vec<UserAccount>, PersistenceError> {
        Ok(self.locked()?.values().cloned().collect())
    }

    async fn set_mode(
        &self,
        username: &str,
        mode: Mode,
    ) -> Result<Option<UserAccount>, PersistenceError> {
        let mut accounts = self.locked()?;
        Ok(accounts.get_mut(username).map(|account| {
            account.mode = mode;
            account.clone()
        }))
    }
}
