// Parse-proxy repository
//
// Postgres access for the `jiexi` table.

use async_trait::async_trait;
use sqlx::PgPool;

use super::JiexiStore;
use crate::models::{JiexiSource, ParseRecord};
use crate::{Error, Result};

pub struct JiexiRepository {
    pool: PgPool,
}

impl std::fmt::Debug for JiexiRepository {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("JiexiRepository")
            .field("pool", &"PgPool")
            .finish()
    }
}

impl JiexiRepository {
    #[must_use]
    pub const fn new(pool: PgPool) -> Self {
        Self { pool }
    }
}

#[async_trait]
impl JiexiStore for JiexiRepository {
    async fn list(&self) -> Result<Vec<JiexiSource>> {
        let records = sqlx::query_as::<_, JiexiSource>(
            "SELECT id, name, url, created_at FROM jiexi ORDER BY id",
        )
        .fetch_all(&self.pool)
        .await?;

        Ok(records)
    }

    async fn create(&self, record: &ParseRecord) -> Result<JiexiSource> {
        let created = sqlx::query_as::<_, JiexiSource>(
            r"
            INSERT INTO jiexi (name, url)
            VALUES ($1, $2)
            RETURNING id, name, url, created_at
            ",
        )
        .bind(&record.name)
        .bind(&record.url)
        .fetch_one(&self.pool)
        .await?;

        Ok(created)
    }

    async fn create_batch(&self, records: &[ParseRecord]) -> Result<u64> {
        if records.is_empty() {
            return Ok(0);
        }

        let names: Vec<Option<String>> = records.iter().map(|r| r.name.clone()).collect();
        let urls: Vec<String> = records.iter().map(|r| r.url.clone()).collect();

        // Single statement, so the batch is all-or-nothing.
        let result = sqlx::query(
            r"
            INSERT INTO jiexi (name, url)
            SELECT * FROM UNNEST($1::text[], $2::text[])
            ",
        )
        .bind(names)
        .bind(urls)
        .execute(&self.pool)
        .await?;

        Ok(result.rows_affected())
    }

    async fn delete(&self, id: i64) -> Result<()> {
        let result = sqlx::query("DELETE FROM jiexi WHERE id = $1")
            .bind(id)
            .execute(&self.pool)
            .await?;

        if result.rows_affected() == 0 {
            return Err(Error::NotFound(format!("Parse proxy {id} not found")));
        }

        Ok(())
    }
}
