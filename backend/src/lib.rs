//! Inventory checklist backend library modules.

pub mod domain;
pub mod inbound;
pub mod middleware;
pub mod outbound;
pub mod server;

pub use middleware::RequestLog;
