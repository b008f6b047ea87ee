//! Shared error mapping from pool and Diesel failures to the port error.

use tracing::debug;

use super::pool::PoolError;
use crate::domain::ports::PersistenceError;

/// Map a pool failure to a connection error.
pub fn map_pool_error(error: PoolError) -> PersistenceError {
    let message = match error {
        PoolError::Checkout { message } | PoolError::Build { message } => message,
    };
    PersistenceError::connection(message)
}

/// Map Diesel failures, logging detail and keeping the port message generic.
pub fn map_diesel_error(error: diesel::result::Error) -> PersistenceError {
    use diesel::result::{DatabaseErrorKind, Error as DieselError};

    match &error {
        DieselError::DatabaseError(kind, info) => {
            debug!(?kind, message = info.message(), "diesel operation failed");
        }
        other => debug!(error = %other, "diesel operation failed"),
    }

    match error {
        DieselError::DatabaseError(DatabaseErrorKind::ClosedConnection, _) => {
            PersistenceError::connection("database connection error")
        }
        DieselError::NotFound => PersistenceError::query("record not found"),
        _ => PersistenceError::query("database error"),
    }
}
