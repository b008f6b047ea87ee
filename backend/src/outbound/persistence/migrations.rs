//! Embedded schema migrations.
//!
//! Migrations run over a synchronous connection on a blocking thread before
//! the server starts accepting requests.

use diesel::{Connection, PgConnection};
use diesel_migrations::{embed_migrations, EmbeddedMigrations, MigrationHarness};
use thiserror::Error;
use tracing::info;

pub const MIGRATIONS: EmbeddedMigrations = embed_migrations!("migrations");

/// Errors surfaced when applying embedded migrations.
#[derive(Debug, Error)]
pub enum MigrationError {
    #[error("failed to connect for migrations: {message}")]
    Connect { message: String },
    #[error("failed to apply migrations: {message}")]
    Apply { message: String },
    #[error("migration task failed: {message}")]
    Task { message: String },
}

/// Apply any pending migrations against `database_url`.
pub async fn run_pending(database_url: &str) -> Result<(), MigrationError> {
    let url = database_url.to_owned();
    let applied = tokio::task::spawn_blocking(move || {
        let mut conn = PgConnection::establish(&url).map_err(|err| MigrationError::Connect {
            message: err.to_string(),
        })?;
        conn.run_pending_migrations(MIGRATIONS)
            .map(|versions| versions.len())
            .map_err(|err| MigrationError::Apply {
                message: err.to_string(),
            })
    })
    .await
    .map_err(|err| MigrationError::Task {
        message: err.to_string(),
    })??;

    info!(applied, "database migrations up to date");
    Ok(())
}
