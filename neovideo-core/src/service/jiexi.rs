//! Parse-proxy service
//!
//! CRUD over stored parse-proxy records plus bulk import of pasted lists.

use std::sync::Arc;

use tracing::info;

use crate::ingest::parse_jiexi;
use crate::models::{JiexiSource, ParseRecord};
use crate::repository::JiexiStore;
use crate::{Error, Result};

/// Result of a bulk import.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ImportOutcome {
    /// Nothing usable in the input; nothing was written
    Empty,
    /// Number of records written
    Imported(u64),
}

pub struct JiexiService {
    store: Arc<dyn JiexiStore>,
}

impl std::fmt::Debug for JiexiService {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("JiexiService").finish_non_exhaustive()
    }
}

impl JiexiService {
    #[must_use]
    pub fn new(store: Arc<dyn JiexiStore>) -> Self {
        Self { store }
    }

    pub async fn list(&self) -> Result<Vec<JiexiSource>> {
        self.store.list().await
    }

    pub async fn create(&self, record: ParseRecord) -> Result<JiexiSource> {
        let url = record.url.trim();
        if url.is_empty() {
            return Err(Error::InvalidInput("url must not be empty".to_string()));
        }
        let name = record.name.map(|n| n.trim().to_string());
        self.store.create(&ParseRecord::new(name, url)).await
    }

    pub async fn delete(&self, id: i64) -> Result<()> {
        self.store.delete(id).await
    }

    /// Parse `raw` and persist every record it yields in one batch.
    pub async fn batch_import(&self, raw: &str) -> Result<ImportOutcome> {
        if raw.is_empty() {
            return Ok(ImportOutcome::Empty);
        }

        let records = parse_jiexi(raw);
        if records.is_empty() {
            info!(input_bytes = raw.len(), "Parse-proxy import found no records");
            return Ok(ImportOutcome::Empty);
        }

        let written = self.store.create_batch(&records).await?;
        info!(parsed = records.len(), written, "Parse-proxy import stored");
        Ok(ImportOutcome::Imported(written))
    }
}
