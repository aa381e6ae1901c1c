//! Service initialization and dependency injection

use std::sync::Arc;

use sqlx::PgPool;
use tracing::info;

use crate::{
    repository::{
        CmsSourceRepository, CmsSourceStore, JiexiRepository, JiexiStore, MemoryCmsSourceStore,
        MemoryJiexiStore,
    },
    service::{Aggregator, BackendFactory, JiexiService, MaccmsBackendFactory, VodService},
    Config,
};

/// Storage backends handed to the services
#[derive(Clone)]
pub struct Stores {
    pub cms_sources: Arc<dyn CmsSourceStore>,
    pub jiexi: Arc<dyn JiexiStore>,
}

impl Stores {
    #[must_use]
    pub fn postgres(pool: PgPool) -> Self {
        Self {
            cms_sources: Arc::new(CmsSourceRepository::new(pool.clone())),
            jiexi: Arc::new(JiexiRepository::new(pool)),
        }
    }

    /// Process-local stores; contents are lost on restart.
    #[must_use]
    pub fn in_memory() -> Self {
        Self {
            cms_sources: Arc::new(MemoryCmsSourceStore::new()),
            jiexi: Arc::new(MemoryJiexiStore::new()),
        }
    }
}

/// Container for all initialized services
#[derive(Clone)]
pub struct Services {
    /// Home aggregate, per-source category and search
    pub vod: Arc<VodService>,
    /// Parse-proxy records and bulk import
    pub jiexi: Arc<JiexiService>,
    /// Registry administration goes straight to storage
    pub cms_sources: Arc<dyn CmsSourceStore>,
}

/// Initialize all core services with MacCMS backends.
///
/// Must be called from within a Tokio runtime: it starts the cache sweep.
pub fn init_services(stores: Stores, config: &Config) -> anyhow::Result<Services> {
    let factory = MaccmsBackendFactory::new(&config.upstream.http_client_options())?;
    info!(
        timeout_seconds = config.upstream.timeout_seconds,
        "Upstream HTTP client initialized"
    );
    Ok(init_services_with_factory(stores, Arc::new(factory), config))
}

/// Initialize all core services with a caller-supplied backend factory.
pub fn init_services_with_factory(
    stores: Stores,
    factory: Arc<dyn BackendFactory>,
    config: &Config,
) -> Services {
    let vod = Arc::new(VodService::new(
        Arc::clone(&stores.cms_sources),
        Aggregator::new(factory),
        &config.cache,
    ));
    vod.start_cache_cleanup();
    info!(
        ttl_seconds = config.cache.ttl_seconds,
        cleanup_interval_seconds = config.cache.cleanup_interval_seconds,
        "Home cache initialized"
    );

    let jiexi = Arc::new(JiexiService::new(stores.jiexi));

    Services {
        vod,
        jiexi,
        cms_sources: stores.cms_sources,
    }
}
