//! Video catalog service
//!
//! Serves the cached home aggregate and forwards per-source category and
//! search requests to the matching backend.
//!
//! The home view is cached under two keys with independent expiry: the
//! registry snapshot and the rendered aggregate. Concurrent misses on either
//! key share one load.

use std::sync::Arc;

use neovideo_providers::{Category, ListResult};
use tracing::{debug, info};

use super::Aggregator;
use crate::cache::{SingleFlight, TtlCache};
use crate::config::CacheConfig;
use crate::models::{CmsSource, HomeItem};
use crate::repository::CmsSourceStore;
use crate::{Error, Result};

/// Cache slots used by the home view.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum HomeCacheKey {
    /// Snapshot of the source registry
    Sources,
    /// Rendered aggregate
    Rendered,
}

#[derive(Debug, Clone)]
pub enum HomeCacheValue {
    Sources(Arc<Vec<CmsSource>>),
    Rendered(Arc<Vec<HomeItem>>),
}

pub struct VodService {
    store: Arc<dyn CmsSourceStore>,
    aggregator: Aggregator,
    cache: TtlCache<HomeCacheKey, HomeCacheValue>,
    sources_flight: SingleFlight<HomeCacheKey, Arc<Vec<CmsSource>>, Error>,
    home_flight: SingleFlight<HomeCacheKey, Arc<Vec<HomeItem>>, Error>,
}

impl std::fmt::Debug for VodService {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("VodService")
            .field("cache", &self.cache)
            .finish_non_exhaustive()
    }
}

impl VodService {
    /// Create the service. The cache sweep is not started; see
    /// [`VodService::start_cache_cleanup`].
    #[must_use]
    pub fn new(
        store: Arc<dyn CmsSourceStore>,
        aggregator: Aggregator,
        cache: &CacheConfig,
    ) -> Self {
        Self {
            store,
            aggregator,
            cache: TtlCache::new(cache.ttl(), cache.cleanup_interval()),
            sources_flight: SingleFlight::new(),
            home_flight: SingleFlight::new(),
        }
    }

    /// Start the background sweep of expired cache entries.
    pub fn start_cache_cleanup(&self) {
        self.cache.start_cleanup();
    }

    pub fn stop_cache_cleanup(&self) {
        self.cache.stop_cleanup();
    }

    /// Home aggregate: one item per registered source, sorted by id.
    ///
    /// Fails with [`Error::EmptyRegistry`] before contacting any backend when
    /// no source is registered. That failure is not cached.
    pub async fn home(&self) -> Result<Arc<Vec<HomeItem>>> {
        if let Some(HomeCacheValue::Rendered(items)) = self.cache.get(&HomeCacheKey::Rendered) {
            debug!(key = ?HomeCacheKey::Rendered, "Home cache hit");
            return Ok(items);
        }
        debug!(key = ?HomeCacheKey::Rendered, "Home cache miss");

        self.home_flight
            .do_work(HomeCacheKey::Rendered, async {
                let sources = self.sources().await?;
                if sources.is_empty() {
                    return Err(Error::EmptyRegistry);
                }

                let items = Arc::new(self.aggregator.fetch_all(&sources).await);
                info!(
                    sources = items.len(),
                    failed = items.iter().filter(|item| !item.is_ok()).count(),
                    "Home aggregate refreshed"
                );
                self.cache
                    .set(HomeCacheKey::Rendered, HomeCacheValue::Rendered(Arc::clone(&items)));
                Ok(items)
            })
            .await
            .map_err(|e| {
                e.into_inner_or(|| Error::Internal("home aggregation abandoned".to_string()))
            })
    }

    /// Registry snapshot, served from cache when fresh.
    async fn sources(&self) -> Result<Arc<Vec<CmsSource>>> {
        if let Some(HomeCacheValue::Sources(sources)) = self.cache.get(&HomeCacheKey::Sources) {
            debug!(key = ?HomeCacheKey::Sources, "Home cache hit");
            return Ok(sources);
        }
        debug!(key = ?HomeCacheKey::Sources, "Home cache miss");

        self.sources_flight
            .do_work(HomeCacheKey::Sources, async {
                let sources = Arc::new(self.store.list().await?);
                // An empty registry is re-read on every request until the
                // first source is registered.
                if !sources.is_empty() {
                    self.cache
                        .set(HomeCacheKey::Sources, HomeCacheValue::Sources(Arc::clone(&sources)));
                }
                Ok(sources)
            })
            .await
            .map_err(|e| {
                e.into_inner_or(|| Error::Internal("source registry load abandoned".to_string()))
            })
    }

    /// Category table of one source.
    pub async fn categories(&self, source_id: i64) -> Result<Vec<Category>> {
        let source = self.store.get(source_id).await?;
        let backend = self.aggregator.factory().backend_for(&source)?;
        Ok(backend.fetch_categories().await?)
    }

    /// Keyword search on one source. Pages start at 1; 0 is treated as 1.
    pub async fn search(&self, source_id: i64, keyword: &str, page: u32) -> Result<ListResult> {
        let keyword = keyword.trim();
        if keyword.is_empty() {
            return Err(Error::InvalidInput("search keyword must not be empty".to_string()));
        }

        let source = self.store.get(source_id).await?;
        let backend = self.aggregator.factory().backend_for(&source)?;
        Ok(backend.search(keyword, page.max(1)).await?)
    }

    /// Detail of one video on one source.
    pub async fn detail(&self, source_id: i64, video_id: u64) -> Result<ListResult> {
        let source = self.store.get(source_id).await?;
        let backend = self.aggregator.factory().backend_for(&source)?;
        Ok(backend.fetch_detail(video_id).await?)
    }
}
