//! Shared HTTP adapter state.
//!
//! HTTP handlers accept this state via `actix_web::web::Data` so they only
//! depend on domain services and remain testable without I/O.

use std::sync::Arc;

use crate::domain::{
    AccountService, CatalogService, ChecklistService, SettingsService, TokenService,
};

/// Dependency bundle for HTTP handlers.
#[derive(Clone)]
pub struct HttpState {
    pub accounts: Arc<AccountService>,
    pub catalog: Arc<CatalogService>,
    pub checklists: Arc<ChecklistService>,
    pub settings: Arc<SettingsService>,
    pub tokens: Arc<TokenService>,
}
