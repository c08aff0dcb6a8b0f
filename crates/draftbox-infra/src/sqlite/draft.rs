//! SQLite implementation of `DraftEngine`.
//!
//! Drafts live in the `drafts` table. Writes go through the single-connection
//! writer pool, so SQLite's one-writer rule is the only concurrency control.
//! The pool is opened lazily on first use and shared by every later call.

use chrono::{DateTime, SecondsFormat, Utc};
use sqlx::query::Query;
use sqlx::sqlite::{Sqlite, SqliteArguments};
use sqlx::Row;
use tokio::sync::OnceCell;
use tracing::debug;

use draftbox_core::repository::draft::DraftEngine;
use draftbox_types::draft::{DraftId, DraftRecord, DraftTypeSummary};
use draftbox_types::error::RepositoryError;

use super::classify;
use super::pool::{DatabasePool, PoolSettings};

const SELECT_COLUMNS: &str = "SELECT id, title, data, draft_type, created_at, updated_at FROM drafts";

/// SQLite-backed draft engine.
pub struct SqliteDraftEngine {
    settings: Option<PoolSettings>,
    pool: OnceCell<DatabasePool>,
}

impl SqliteDraftEngine {
    /// Engine that connects on first use.
    pub fn new(settings: PoolSettings) -> Self {
        Self {
            settings: Some(settings),
            pool: OnceCell::new(),
        }
    }

    /// Engine over an already opened pool.
    pub fn from_pool(pool: DatabasePool) -> Self {
        Self {
            settings: None,
            pool: OnceCell::new_with(Some(pool)),
        }
    }

    async fn pool(&self) -> Result<&DatabasePool, RepositoryError> {
        self.pool
            .get_or_try_init(|| async {
                let settings = self.settings.as_ref().ok_or_else(|| {
                    RepositoryError::Unavailable("no database configured".to_string())
                })?;
                DatabasePool::connect(settings)
                    .await
                    .map_err(|e| RepositoryError::Unavailable(e.to_string()))
            })
            .await
    }

    async fn fetch_records<'q>(
        &self,
        query: Query<'q, Sqlite, SqliteArguments<'q>>,
    ) -> Result<Vec<DraftRecord>, RepositoryError> {
        let pool = self.pool().await?;
        let rows = query.fetch_all(&pool.reader).await.map_err(classify)?;

        let mut records = Vec::with_capacity(rows.len());
        for row in &rows {
            records.push(DraftRow::from_row(row).map_err(classify)?.into_record()?);
        }
        Ok(records)
    }
}

// ---------------------------------------------------------------------------
// Private Row type for SQLite-to-domain mapping
// ---------------------------------------------------------------------------

struct DraftRow {
    id: String,
    title: String,
    data: String,
    draft_type: String,
    created_at: String,
    updated_at: String,
}

impl DraftRow {
    fn from_row(row: &sqlx::sqlite::SqliteRow) -> Result<Self, sqlx::Error> {
        Ok(Self {
            id: row.try_get("id")?,
            title: row.try_get("title")?,
            data: row.try_get("data")?,
            draft_type: row.try_get("draft_type")?,
            created_at: row.try_get("created_at")?,
            updated_at: row.try_get("updated_at")?,
        })
    }

    fn into_record(self) -> Result<DraftRecord, RepositoryError> {
        let corrupt = |reason: String| RepositoryError::Corrupt {
            id: self.id.clone(),
            reason,
        };
        let data: serde_json::Value = serde_json::from_str(&self.data)
            .map_err(|e| corrupt(format!("invalid JSON data: {e}")))?;
        let created_at = parse_datetime(&self.created_at).map_err(&corrupt)?;
        let updated_at = parse_datetime(&self.updated_at).map_err(&corrupt)?;

        Ok(DraftRecord {
            id: DraftId::from(self.id),
            title: self.title,
            data,
            draft_type: self.draft_type,
            created_at,
            updated_at,
        })
    }
}

// ---------------------------------------------------------------------------
// Helpers
// ---------------------------------------------------------------------------

fn parse_datetime(s: &str) -> Result<DateTime<Utc>, String> {
    DateTime::parse_from_rfc3339(s)
        .map(|dt| dt.with_timezone(&Utc))
        .map_err(|e| format!("invalid datetime '{s}': {e}"))
}

/// Fixed-width so that string order in the `updated_at` index is time order.
fn format_datetime(dt: &DateTime<Utc>) -> String {
    dt.to_rfc3339_opts(SecondsFormat::Nanos, true)
}

// ---------------------------------------------------------------------------
// DraftEngine implementation
// ---------------------------------------------------------------------------

impl DraftEngine for SqliteDraftEngine {
    async fn open(&self) -> Result<(), RepositoryError> {
        self.pool().await.map(|_| ())
    }

    async fn get(&self, id: &DraftId) -> Result<Option<DraftRecord>, RepositoryError> {
        let pool = self.pool().await?;
        let row = sqlx::query(&format!("{SELECT_COLUMNS} WHERE id = ?"))
            .bind(id.as_str())
            .fetch_optional(&pool.reader)
            .await
            .map_err(classify)?;

        debug!(draft_id = %id, found = row.is_some(), "draft lookup");
        match row {
            Some(row) => Ok(Some(
                DraftRow::from_row(&row).map_err(classify)?.into_record()?,
            )),
            None => Ok(None),
        }
    }

    async fn get_all_by_type(&self, draft_type: &str) -> Result<Vec<DraftRecord>, RepositoryError> {
        let sql = format!("{SELECT_COLUMNS} WHERE draft_type = ? ORDER BY updated_at DESC");
        self.fetch_records(sqlx::query(&sql).bind(draft_type)).await
    }

    async fn get_all(&self) -> Result<Vec<DraftRecord>, RepositoryError> {
        let sql = format!("{SELECT_COLUMNS} ORDER BY updated_at DESC");
        self.fetch_records(sqlx::query(&sql)).await
    }

    async fn get_by_title(
        &self,
        draft_type: &str,
        title: &str,
    ) -> Result<Vec<DraftRecord>, RepositoryError> {
        let sql =
            format!("{SELECT_COLUMNS} WHERE title = ? AND draft_type = ? ORDER BY updated_at DESC");
        self.fetch_records(sqlx::query(&sql).bind(title).bind(draft_type))
            .await
    }

    async fn draft_types(&self) -> Result<Vec<DraftTypeSummary>, RepositoryError> {
        let pool = self.pool().await?;
        let rows = sqlx::query(
            r#"SELECT draft_type, COUNT(*) AS count, MAX(updated_at) AS last_updated_at
               FROM drafts GROUP BY draft_type ORDER BY last_updated_at DESC"#,
        )
        .fetch_all(&pool.reader)
        .await
        .map_err(classify)?;

        let mut summaries = Vec::with_capacity(rows.len());
        for row in &rows {
            let draft_type: String = row.try_get("draft_type").map_err(classify)?;
            let count: i64 = row.try_get("count").map_err(classify)?;
            let last: String = row.try_get("last_updated_at").map_err(classify)?;
            let last_updated_at = parse_datetime(&last).map_err(|reason| RepositoryError::Corrupt {
                id: format!("type:{draft_type}"),
                reason,
            })?;
            summaries.push(DraftTypeSummary {
                draft_type,
                count: count as u64,
                last_updated_at,
            });
        }
        Ok(summaries)
    }

    async fn count_by_type(&self, draft_type: &str) -> Result<u64, RepositoryError> {
        let pool = self.pool().await?;
        let (count,): (i64,) = sqlx::query_as("SELECT COUNT(*) FROM drafts WHERE draft_type = ?")
            .bind(draft_type)
            .fetch_one(&pool.reader)
            .await
            .map_err(classify)?;
        Ok(count as u64)
    }

    async fn put(&self, record: &DraftRecord) -> Result<(), RepositoryError> {
        let pool = self.pool().await?;
        let data = serde_json::to_string(&record.data)
            .map_err(|e| RepositoryError::Transaction(format!("failed to serialize data: {e}")))?;

        sqlx::query(
            r#"INSERT OR REPLACE INTO drafts (id, title, data, draft_type, created_at, updated_at)
               VALUES (?, ?, ?, ?, ?, ?)"#,
        )
        .bind(record.id.as_str())
        .bind(&record.title)
        .bind(&data)
        .bind(&record.draft_type)
        .bind(format_datetime(&record.created_at))
        .bind(format_datetime(&record.updated_at))
        .execute(&pool.writer)
        .await
        .map_err(classify)?;

        debug!(draft_id = %record.id, draft_type = %record.draft_type, "draft stored");
        Ok(())
    }

    async fn delete(&self, id: &DraftId) -> Result<(), RepositoryError> {
        let pool = self.pool().await?;
        let result = sqlx::query("DELETE FROM drafts WHERE id = ?")
            .bind(id.as_str())
            .execute(&pool.writer)
            .await
            .map_err(classify)?;

        debug!(draft_id = %id, removed = result.rows_affected(), "draft delete");
        Ok(())
    }

    async fn clear(&self) -> Result<(), RepositoryError> {
        let pool = self.pool().await?;
        let result = sqlx::query("DELETE FROM drafts")
            .execute(&pool.writer)
            .await
            .map_err(classify)?;

        debug!(removed = result.rows_affected(), "drafts cleared");
        Ok(())
    }
}
