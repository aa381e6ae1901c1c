//! Scripted backends for service tests

use std::collections::HashMap;
use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::Arc;
use std::time::Duration;

use async_trait::async_trait;
use chrono::Utc;
use neovideo_providers::{
    Category, CmsBackend, ListAttributes, ListResult, ProviderClientError, VideoSummary,
};
use parking_lot::Mutex;

use super::BackendFactory;
use crate::models::{CmsSource, NewCmsSource};

/// What the backend for one source id does when asked.
#[derive(Debug, Clone)]
pub(crate) enum FakeBehavior {
    Respond(ListResult),
    Fail(ProviderClientError),
    /// Responds after sleeping, for overlap and ordering tests
    Slow(Duration, ListResult),
    Panic,
    /// The factory refuses to build a backend
    Unbuildable,
}

#[derive(Default)]
pub(crate) struct FakeBackendFactory {
    behaviors: Mutex<HashMap<i64, FakeBehavior>>,
    builds: AtomicUsize,
    calls: Arc<AtomicUsize>,
}

impl FakeBackendFactory {
    pub(crate) fn new() -> Self {
        Self::default()
    }

    pub(crate) fn with(self, id: i64, behavior: FakeBehavior) -> Self {
        self.behaviors.lock().insert(id, behavior);
        self
    }

    /// Number of backends built so far.
    pub(crate) fn builds(&self) -> usize {
        self.builds.load(Ordering::SeqCst)
    }

    /// Number of backend calls made so far.
    pub(crate) fn calls(&self) -> usize {
        self.calls.load(Ordering::SeqCst)
    }
}

impl BackendFactory for FakeBackendFactory {
    fn backend_for(&self, source: &CmsSource) -> Result<Arc<dyn CmsBackend>, ProviderClientError> {
        self.builds.fetch_add(1, Ordering::SeqCst);
        let behavior = self
            .behaviors
            .lock()
            .get(&source.id)
            .cloned()
            .unwrap_or_else(|| FakeBehavior::Respond(listing(source.id as u64)));

        if matches!(behavior, FakeBehavior::Unbuildable) {
            return Err(ProviderClientError::InvalidConfig(format!(
                "unknown response format '{}'",
                source.resp_type
            )));
        }

        Ok(Arc::new(FakeBackend {
            behavior,
            calls: Arc::clone(&self.calls),
        }))
    }
}

struct FakeBackend {
    behavior: FakeBehavior,
    calls: Arc<AtomicUsize>,
}

impl FakeBackend {
    async fn respond(&self) -> Result<ListResult, ProviderClientError> {
        self.calls.fetch_add(1, Ordering::SeqCst);
        match &self.behavior {
            FakeBehavior::Respond(result) => Ok(result.clone()),
            FakeBehavior::Fail(err) => Err(err.clone()),
            FakeBehavior::Slow(delay, result) => {
                tokio::time::sleep(*delay).await;
                Ok(result.clone())
            }
            FakeBehavior::Panic => panic!("scripted backend panic"),
            FakeBehavior::Unbuildable => unreachable!("unbuildable backends are never handed out"),
        }
    }
}

#[async_trait]
impl CmsBackend for FakeBackend {
    async fn fetch_home(&self) -> Result<ListResult, ProviderClientError> {
        self.respond().await
    }

    async fn fetch_categories(&self) -> Result<Vec<Category>, ProviderClientError> {
        Ok(self.respond().await?.categories)
    }

    async fn search(&self, keyword: &str, page: u32) -> Result<ListResult, ProviderClientError> {
        let mut result = self.respond().await?;
        result.attributes.page = u64::from(page);
        result.videos.retain(|v| v.name.contains(keyword));
        Ok(result)
    }

    async fn fetch_detail(&self, id: u64) -> Result<ListResult, ProviderClientError> {
        Err(ProviderClientError::NotImplemented(format!("detail for {id}")))
    }
}

/// A one-page listing whose single video carries `video_id`.
pub(crate) fn listing(video_id: u64) -> ListResult {
    ListResult {
        attributes: ListAttributes {
            page_count: 1,
            page: 1,
            record_count: 1,
        },
        videos: vec![VideoSummary {
            id: video_id,
            category_id: 1,
            name: format!("video {video_id}"),
            ..VideoSummary::default()
        }],
        categories: vec![Category {
            id: 1,
            name: "电影".to_string(),
        }],
    }
}

pub(crate) fn source(id: i64) -> CmsSource {
    CmsSource {
        id,
        name: format!("source {id}"),
        api: format!("https://cms{id}.example.com/api.php/provide/vod"),
        resp_type: "json".to_string(),
        created_at: Utc::now(),
    }
}

pub(crate) fn new_source(name: &str) -> NewCmsSource {
    NewCmsSource {
        name: name.to_string(),
        api: format!("https://{name}.example.com/api.php/provide/vod"),
        resp_type: "json".to_string(),
    }
}
