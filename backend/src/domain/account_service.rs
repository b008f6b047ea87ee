//! Login, account listing, and mode toggling.

use std::sync::Arc;

use tracing::{info, warn};

use super::error::Error;
use super::password;
use super::ports::UserRepository;
use super::token::TokenService;
use super::user::User;

/// User-facing account operations over the user repository.
pub struct AccountService {
    users: Arc<dyn UserRepository>,
    tokens: Arc<TokenService>,
}

impl AccountService {
    pub fn new(users: Arc<dyn UserRepository>, tokens: Arc<TokenService>) -> Self {
        Self { users, tokens }
    }

    /// Authenticate a user and issue a bearer token.
    ///
    /// The returned record excludes the stored credential.
    pub async fn login(&self, username: &str, pass: &str) -> Result<(User, String), Error> {
        let account = self
            .users
            .find_by_username(username)
            .await
            .map_err(|error| {
                warn!(%error, "login lookup failed");
                Error::internal("Login failed")
            })?
            .ok_or_else(|| Error::unauthorized("Invalid username or password"))?;

        if !password::verify(pass, &account.password) {
            return Err(Error::unauthorized("Invalid username or password"));
        }

        let token = self.tokens.issue(&account.username, account.mode)?;
        info!(username = %account.username, "user logged in");
        Ok((account.public(), token))
    }

    /// All accounts, with credentials stripped.
    pub async fn list_all(&self) -> Result<Vec<User>, Error> {
        let accounts = self.users.list_all().await.map_err(|error| {
            warn!(%error, "account listing failed");
            Error::internal("Failed to fetch users")
        })?;
        Ok(accounts.iter().map(|account| account.public()).collect())
    }

    /// Flip a user's mode flag, returning the updated record.
    pub async fn toggle_mode(&self, username: &str) -> Result<User, Error> {
        let map_store = |error| {
            warn!(%error, "mode update failed");
            Error::internal("Failed to change mode")
        };
        let account = self
            .users
            .find_by_username(username)
            .await
            .map_err(map_store)?
            .ok_or_else(|| Error::not_found("User not found"))?;

        let updated = self
            .users
            .set_mode(username, account.mode.toggled())
            .await
            .map_err(map_store)?
            .ok_or_else(|| Error::not_found("User not found"))?;

        Ok(updated.public())
    }
}
