//! Database initialization

use anyhow::Result;
use sqlx::postgres::PgPoolOptions;
use sqlx::PgPool;
use std::time::Duration;
use tracing::{error, info};

use crate::Config;

/// Open the pool backing the `maccms` and `jiexi` tables.
///
/// Only used when `database.url` is set; the binary runs the migrations
/// afterwards.
pub async fn init_database(config: &Config) -> Result<PgPool> {
    let db = &config.database;
    info!(
        min_connections = db.min_connections,
        max_connections = db.max_connections,
        "Connecting to registry database"
    );

    let pool = PgPoolOptions::new()
        .max_connections(db.max_connections)
        .min_connections(db.min_connections)
        .acquire_timeout(Duration::from_secs(db.connect_timeout_seconds))
        .idle_timeout(Duration::from_secs(db.idle_timeout_seconds))
        .connect(config.database_url())
        .await
        .map_err(|e| {
            error!("Failed to connect to registry database: {}", e);
            anyhow::anyhow!("Database connection failed: {e}")
        })?;

    info!(pool_size = pool.size(), "Registry database connected");

    Ok(pool)
}
