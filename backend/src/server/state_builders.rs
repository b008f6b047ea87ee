//! Builders wiring repositories and services into the HTTP state.

use std::sync::Arc;

use crate::domain::ports::{
    InMemoryChecklistRepository, InMemoryCustomProductRepository, InMemoryProductRepository,
    InMemorySettingsRepository, InMemoryUserRepository,
};
use crate::domain::{
    AccountService, CatalogService, ChecklistService, SettingsService, TokenService, UserAccount,
};
use crate::inbound::http::HttpState;
use crate::outbound::persistence::{
    DbPool, DieselChecklistRepository, DieselCustomProductRepository, DieselProductRepository,
    DieselSettingsRepository, DieselUserRepository,
};

/// HTTP state backed by PostgreSQL adapters.
pub fn http_state_with_pool(pool: DbPool, tokens: Arc<TokenService>) -> HttpState {
    let users = Arc::new(DieselUserRepository::new(pool.clone()));
    let products = Arc::new(DieselProductRepository::new(pool.clone()));
    let custom_products = Arc::new(DieselCustomProductRepository::new(pool.clone()));
    let checklists = Arc::new(DieselChecklistRepository::new(pool.clone()));
    let settings = Arc::new(DieselSettingsRepository::new(pool));

    HttpState {
        accounts: Arc::new(AccountService::new(users, tokens.clone())),
        catalog: Arc::new(CatalogService::new(products.clone(), custom_products)),
        checklists: Arc::new(ChecklistService::new(checklists, products)),
        settings: Arc::new(SettingsService::new(settings)),
        tokens,
    }
}

/// HTTP state backed by in-memory stores, for database-less runs and tests.
pub fn http_state_in_memory(
    tokens: Arc<TokenService>,
    seed_accounts: Vec<UserAccount>,
) -> HttpState {
    let users = Arc::new(InMemoryUserRepository::with_accounts(seed_accounts));
    let products = Arc::new(InMemoryProductRepository::new());
    let custom_products = Arc::new(InMemoryCustomProductRepository::new());
    let checklists = Arc::new(InMemoryChecklistRepository::new());
    let settings = Arc::new(InMemorySettingsRepository::new());

    HttpState {
        accounts: Arc::new(AccountService::new(users, tokens.clone())),
        catalog: Arc::new(CatalogService::new(products.clone(), custom_products)),
        checklists: Arc::new(ChecklistService::new(checklists, products)),
        settings: Arc::new(SettingsService::new(settings)),
        tokens,
    }
}
