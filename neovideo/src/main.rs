mod server;

use anyhow::Result;
use tracing::{error, info, warn};

use neovideo_core::{
    bootstrap::{init_database, init_services, load_config, Stores},
    logging,
};

use server::NeovideoServer;

#[tokio::main]
async fn main() -> Result<()> {
    // 1. Load and validate configuration
    let config = load_config()?;

    // 2. Initialize logging
    logging::init_logging(&config.logging)?;
    info!("Neovideo server starting...");
    info!("HTTP address: {}", config.http_address());

    // 3. Storage: PostgreSQL when configured, otherwise in-process tables
    let stores = if config.uses_database() {
        let pool = init_database(&config).await?;

        info!("Running database migrations...");
        sqlx::migrate!("../migrations")
            .run(&pool)
            .await
            .map_err(|e| {
                error!("Failed to run migrations: {}", e);
                anyhow::anyhow!("Migration failed: {e}")
            })?;
        info!("Migrations completed");

        Stores::postgres(pool)
    } else {
        warn!("No database configured, CMS sources and parse proxies are kept in memory");
        Stores::in_memory()
    };

    // 4. Initialize services
    let services = init_services(stores, &config)?;

    // 5. Serve until shutdown
    NeovideoServer::new(config, services).start().await?;

    info!("Neovideo server stopped");
    Ok(())
}
