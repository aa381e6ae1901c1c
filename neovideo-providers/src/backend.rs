//! CMS backend interface
//!
//! Callers (the aggregator, the vod HTTP routes) only see this trait; which
//! wire format a source speaks is decided when its client is built.

use async_trait::async_trait;

use crate::error::ProviderClientError;
use crate::model::{Category, ListResult};

/// One configured upstream CMS source.
#[async_trait]
pub trait CmsBackend: Send + Sync {
    /// Fetch the source's home listing (first page, no filters).
    async fn fetch_home(&self) -> Result<ListResult, ProviderClientError>;

    /// Fetch the source's category table.
    async fn fetch_categories(&self) -> Result<Vec<Category>, ProviderClientError>;

    /// Keyword search, `page` is 1-based.
    async fn search(&self, keyword: &str, page: u32) -> Result<ListResult, ProviderClientError>;

    /// Detail lookup for a single video.
    ///
    /// Not available yet: implementations answer `NotImplemented`, which
    /// callers must treat as a missing capability rather than an outage.
    async fn fetch_detail(&self, id: u64) -> Result<ListResult, ProviderClientError>;
}
