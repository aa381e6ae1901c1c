//! Storage for registered CMS sources and parse-proxy records
//!
//! Services depend on the store traits only. Postgres repositories back a
//! deployed server; the in-memory stores back tests and database-less runs.

pub mod cms_source;
pub mod jiexi;
pub mod memory;

use async_trait::async_trait;

use crate::models::{CmsSource, JiexiSource, NewCmsSource, ParseRecord};
use crate::Result;

pub use cms_source::CmsSourceRepository;
pub use jiexi::JiexiRepository;
pub use memory::{MemoryCmsSourceStore, MemoryJiexiStore};

/// Registry of upstream CMS sources
#[async_trait]
pub trait CmsSourceStore: Send + Sync {
    /// All sources, oldest first.
    async fn list(&self) -> Result<Vec<CmsSource>>;

    /// Fails with `NotFound` when no source has this id.
    async fn get(&self, id: i64) -> Result<CmsSource>;

    async fn create(&self, source: &NewCmsSource) -> Result<CmsSource>;

    /// Fails with `NotFound` when no source has this id.
    async fn delete(&self, id: i64) -> Result<()>;
}

/// Parse-proxy records
#[async_trait]
pub trait JiexiStore: Send + Sync {
    async fn list(&self) -> Result<Vec<JiexiSource>>;

    async fn create(&self, record: &ParseRecord) -> Result<JiexiSource>;

    /// Insert all records in one batch, returning how many were written.
    async fn create_batch(&self, records: &[ParseRecord]) -> Result<u64>;

    async fn delete(&self, id: i64) -> Result<()>;
}
