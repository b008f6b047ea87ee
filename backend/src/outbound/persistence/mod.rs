//! PostgreSQL persistence adapters implementing the domain ports.

mod diesel_checklist_repository;
mod diesel_custom_product_repository;
mod diesel_product_repository;
mod diesel_settings_repository;
mod diesel_user_repository;
mod error_mapping;
pub mod migrations;
pub mod models;
pub mod pool;
pub mod schema;

pub use diesel_checklist_repository::DieselChecklistRepository;
pub use diesel_custom_product_repository::DieselCustomProductRepository;
pub use diesel_product_repository::DieselProductRepository;
pub use diesel_settings_repository::DieselSettingsRepository;
pub use diesel_user_repository::DieselUserRepository;
pub use pool::{DbPool, PoolConfig, PoolError};
