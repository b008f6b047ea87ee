//! HTTP inbound adapter exposing REST endpoints.

pub mod auth;
pub mod checklists;
pub mod error;
pub mod greeting;
pub mod products;
pub mod settings;
pub mod state;
pub mod users;

pub use state::HttpState;
