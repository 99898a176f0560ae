//! Database connection pool management
//!
//! SQLite-backed pool creation plus startup migrations. The store is a single
//! write-once table, so the only structural requirement on the engine is
//! atomic auto-increment id assignment, which SQLite provides natively.

use crate::config::DatabaseConfig;
use sqlx::sqlite::{SqliteConnectOptions, SqlitePoolOptions};
use sqlx::SqlitePool;
use std::str::FromStr;
use tracing::info;

/// Create the SQLite connection pool, creating the database file when it does
/// not exist yet.
pub async fn create_pool(config: &DatabaseConfig) -> Result<SqlitePool, sqlx::Error> {
    let options = SqliteConnectOptions::from_str(&config.url)?.create_if_missing(true);

    let pool = SqlitePoolOptions::new()
        .max_connections(config.max_connections)
        .connect_with(options)
        .await?;

    info!(max_connections = config.max_connections, "database pool created");
    Ok(pool)
}

/// Apply pending migrations at startup.
pub async fn run_migrations(pool: &SqlitePool) -> Result<(), sqlx::migrate::MigrateError> {
    sqlx::migrate!("./migrations").run(pool).await
}
