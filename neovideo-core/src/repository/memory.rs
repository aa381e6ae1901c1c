//! In-memory stores
//!
//! Used when no database is configured and by service tests. Ids are
//! assigned from 1 upwards and never reused.

use std::collections::BTreeMap;

use async_trait::async_trait;
use chrono::Utc;
use parking_lot::RwLock;

use super::{CmsSourceStore, JiexiStore};
use crate::models::{CmsSource, JiexiSource, NewCmsSource, ParseRecord};
use crate::{Error, Result};

#[derive(Debug)]
struct Table<T> {
    rows: BTreeMap<i64, T>,
    next_id: i64,
}

impl<T> Default for Table<T> {
    fn default() -> Self {
        Self {
            rows: BTreeMap::new(),
            next_id: 1,
        }
    }
}

impl<T> Table<T> {
    fn allocate_id(&mut self) -> i64 {
        let id = self.next_id;
        self.next_id += 1;
        id
    }
}

#[derive(Debug, Default)]
pub struct MemoryCmsSourceStore {
    table: RwLock<Table<CmsSource>>,
}

impl MemoryCmsSourceStore {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Store pre-populated with the given sources, ids assigned in order.
    #[must_use]
    pub fn with_sources(sources: impl IntoIterator<Item = NewCmsSource>) -> Self {
        let store = Self::new();
        {
            let mut table = store.table.write();
            for source in sources {
                let id = table.allocate_id();
                table.rows.insert(id, build_source(id, &source));
            }
        }
        store
    }
}

fn build_source(id: i64, source: &NewCmsSource) -> CmsSource {
    CmsSource {
        id,
        name: source.name.clone(),
        api: source.api.clone(),
        resp_type: source.resp_type.clone(),
        created_at: Utc::now(),
    }
}

#[async_trait]
impl CmsSourceStore for MemoryCmsSourceStore {
    async fn list(&self) -> Result<Vec<CmsSource>> {
        Ok(self.table.read().rows.values().cloned().collect())
    }

    async fn get(&self, id: i64) -> Result<CmsSource> {
        self.table
            .read()
            .rows
            .get(&id)
            .cloned()
            .ok_or_else(|| Error::NotFound(format!("CMS source {id} not found")))
    }

    async fn create(&self, source: &NewCmsSource) -> Result<CmsSource> {
        let mut table = self.table.write();
        let id = table.allocate_id();
        let created = build_source(id, source);
        table.rows.insert(id, created.clone());
        Ok(created)
    }

    async fn delete(&self, id: i64) -> Result<()> {
        self.table
            .write()
            .rows
            .remove(&id)
            .map(|_| ())
            .ok_or_else(|| Error::NotFound(format!("CMS source {id} not found")))
    }
}

#[derive(Debug, Default)]
pub struct MemoryJiexiStore {
    table: RwLock<Table<JiexiSource>>,
}

impl MemoryJiexiStore {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }
}

fn build_jiexi(id: i64, record: &ParseRecord) -> JiexiSource {
    JiexiSource {
        id,
        name: record.name.clone(),
        url: record.url.clone(),
        created_at: Utc::now(),
    }
}

#[async_trait]
impl JiexiStore for MemoryJiexiStore {
    async fn list(&self) -> Result<Vec<JiexiSource>> {
        Ok(self.table.read().rows.values().cloned().collect())
    }

    async fn create(&self, record: &ParseRecord) -> Result<JiexiSource> {
        let mut table = self.table.write();
        let id = table.allocate_id();
        let created = build_jiexi(id, record);
        table.rows.insert(id, created.clone());
        Ok(created)
    }

    async fn create_batch(&self, records: &[ParseRecord]) -> Result<u64> {
        let mut table = self.table.write();
        for record in records {
            let id = table.allocate_id();
            table.rows.insert(id, build_jiexi(id, record));
        }
        Ok(records.len() as u64)
    }

    async fn delete(&self, id: i64) -> Result<()> {
        self.table
            .write()
            .rows
            .remove(&id)
            .map(|_| ())
            .ok_or_else(|| Error::NotFound(format!("Parse proxy {id} not found")))
    }
}
