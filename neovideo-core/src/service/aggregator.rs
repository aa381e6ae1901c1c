//! Home fan-out
//!
//! Queries every registered source at once and collects one [`HomeItem`] per
//! source. A failing, panicking or misconfigured source only marks its own
//! item; it never fails the whole aggregate or cancels its siblings.

use std::sync::Arc;

use futures::future::join_all;
use tracing::{debug, warn};

use super::BackendFactory;
use crate::models::{CmsSource, HomeItem};

#[derive(Clone)]
pub struct Aggregator {
    factory: Arc<dyn BackendFactory>,
}

impl std::fmt::Debug for Aggregator {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Aggregator").finish_non_exhaustive()
    }
}

impl Aggregator {
    #[must_use]
    pub fn new(factory: Arc<dyn BackendFactory>) -> Self {
        Self { factory }
    }

    #[must_use]
    pub fn factory(&self) -> &Arc<dyn BackendFactory> {
        &self.factory
    }

    /// Fetch the home listing of every source concurrently.
    ///
    /// Returns exactly one item per input source, sorted ascending by id.
    pub async fn fetch_all(&self, sources: &[CmsSource]) -> Vec<HomeItem> {
        // Slot i of `handles` belongs to `sources[i]`.
        let handles: Vec<_> = sources
            .iter()
            .cloned()
            .map(|source| {
                let factory = Arc::clone(&self.factory);
                tokio::spawn(async move { fetch_one(factory.as_ref(), &source).await })
            })
            .collect();

        let mut items: Vec<HomeItem> = join_all(handles)
            .await
            .into_iter()
            .zip(sources)
            .map(|(joined, source)| {
                joined.unwrap_or_else(|e| {
                    warn!(source_id = source.id, error = %e, "Home fetch task failed");
                    HomeItem::failed(source, format!("fetch task failed: {e}"))
                })
            })
            .collect();

        items.sort_by_key(|item| item.id);

        debug!(
            sources = items.len(),
            failed = items.iter().filter(|item| !item.is_ok()).count(),
            "Home aggregate collected"
        );
        items
    }
}

async fn fetch_one(factory: &dyn BackendFactory, source: &CmsSource) -> HomeItem {
    let backend = match factory.backend_for(source) {
        Ok(backend) => backend,
        Err(e) => {
            warn!(source_id = source.id, error = %e, "Cannot build CMS backend");
            return HomeItem::failed(source, e.to_string());
        }
    };

    match backend.fetch_home().await {
        Ok(data) => HomeItem::loaded(source, data),
        Err(e) => {
            warn!(source_id = source.id, api = %source.api, error = %e, "CMS home fetch failed");
            HomeItem::failed(source, e.to_string())
        }
    }
}
