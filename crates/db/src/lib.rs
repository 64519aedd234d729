//! PostgreSQL integration: pool factory, migration runner and the core
//! `db` module that owns the pool for the lifetime of the application.

use std::time::Duration;

use bookshelf_kernel::settings::DatabaseSettings;
use sqlx::postgres::{PgPool, PgPoolOptions};
use tracing::instrument;

pub mod error;
pub mod migrate;
pub mod module;

pub use error::{DbError, DbResult};
pub use migrate::migrate;
pub use module::DatabaseModule;

/// Open a connection pool using the configured limits.
#[instrument(skip(settings), fields(max_connections = settings.max_connections))]
pub async fn connect(settings: &DatabaseSettings) -> DbResult<PgPool> {
    let pool = PgPoolOptions::new()
        .max_connections(settings.max_connections)
        .min_connections(settings.min_connections)
        .acquire_timeout(Duration::from_secs(settings.connect_timeout_secs))
        .connect(&settings.url)
        .await
        .map_err(|e| DbError::Connection {
            message: e.to_string(),
        })?;

    tracing::info!(target: "bookshelf-db", "database pool established");

    Ok(pool)
}
