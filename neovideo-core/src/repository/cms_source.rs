// CMS source repository
//
// Postgres access for the `maccms` table.

use async_trait::async_trait;
use sqlx::PgPool;

use super::CmsSourceStore;
use crate::models::{CmsSource, NewCmsSource};
use crate::{Error, Result};

pub struct CmsSourceRepository {
    pool: PgPool,
}

impl std::fmt::Debug for CmsSourceRepository {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("CmsSourceRepository")
            .field("pool", &"PgPool")
            .finish()
    }
}

impl CmsSourceRepository {
    #[must_use]
    pub const fn new(pool: PgPool) -> Self {
        Self { pool }
    }
}

#[async_trait]
impl CmsSourceStore for CmsSourceRepository {
    async fn list(&self) -> Result<Vec<CmsSource>> {
        let sources = sqlx::query_as::<_, CmsSource>(
            "SELECT id, name, api, resp_type, created_at FROM maccms ORDER BY id",
        )
        .fetch_all(&self.pool)
        .await?;

        Ok(sources)
    }

    async fn get(&self, id: i64) -> Result<CmsSource> {
        sqlx::query_as::<_, CmsSource>(
            "SELECT id, name, api, resp_type, created_at FROM maccms WHERE id = $1",
        )
        .bind(id)
        .fetch_optional(&self.pool)
        .await?
        .ok_or_else(|| Error::NotFound(format!("CMS source {id} not found")))
    }

    async fn create(&self, source: &NewCmsSource) -> Result<CmsSource> {
        let created = sqlx::query_as::<_, CmsSource>(
            r"
            INSERT INTO maccms (name, api, resp_type)
            VALUES ($1, $2, $3)
            RETURNING id, name, api, resp_type, created_at
            ",
        )
        .bind(&source.name)
        .bind(&source.api)
        .bind(&source.resp_type)
        .fetch_one(&self.pool)
        .await?;

        Ok(created)
    }

    async fn delete(&self, id: i64) -> Result<()> {
        let result = sqlx::query("DELETE FROM maccms WHERE id = $1")
            .bind(id)
            .execute(&self.pool)
            .await?;

        if result.rows_affected() == 0 {
            return Err(Error::NotFound(format!("CMS source {id} not found")));
        }

        Ok(())
    }
}
