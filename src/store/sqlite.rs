use std::str::FromStr;

use async_trait::async_trait;
use chrono::{DateTime, Utc};
use sqlx::Row;
use sqlx::sqlite::{SqliteConnectOptions, SqlitePool, SqlitePoolOptions, SqliteRow};
use tracing::{info, instrument};

use super::DocumentStore;
use crate::types::{DocumentRecord, NewDocument, Outcome, ScoreVector};
use crate::{DocsortError, Result};

const SCHEMA: &str = r#"
CREATE TABLE IF NOT EXISTS documents (
    id INTEGER PRIMARY KEY AUTOINCREMENT,
    filename TEXT NOT NULL,
    content TEXT NOT NULL,
    upload_time TEXT NOT NULL,
    predicted_category TEXT NOT NULL,
    confidence_scores TEXT NOT NULL,
    outcome TEXT NOT NULL
)
"#;

const SELECT_COLUMNS: &str =
    "SELECT id, filename, content, upload_time, predicted_category, confidence_scores, outcome FROM documents";

/// SQLite-backed store. Scores and outcome are kept as JSON text.
#[derive(Debug, Clone)]
pub struct SqliteStore {
    pool: SqlitePool,
}

impl SqliteStore {
    /// Open (creating if needed) the database at `url` and apply the schema.
    ///
    /// `sqlite::memory:` is held on a single connection so every query sees
    /// the same database.
    pub async fn connect(url: &str) -> Result<Self> {
        let options = SqliteConnectOptions::from_str(url)
            .map_err(|e| DocsortError::Configuration(format!("invalid database_url: {e}")))?
            .create_if_missing(true);

        let pool_options = if url.contains(":memory:") {
            SqlitePoolOptions::new()
                .max_connections(1)
                .idle_timeout(None)
                .max_lifetime(None)
        } else {
            SqlitePoolOptions::new().max_connections(5)
        };

        let pool = pool_options
            .connect_with(options)
            .await
            .map_err(|e| DocsortError::Storage(format!("failed to open {url}: {e}")))?;

        let store = Self::from_pool(pool).await?;
        info!(url, "document store ready");
        Ok(store)
    }

    /// Wrap an existing pool, applying the schema.
    pub async fn from_pool(pool: SqlitePool) -> Result<Self> {
        sqlx::query(SCHEMA)
            .execute(&pool)
            .await
            .map_err(storage_error)?;
        Ok(Self { pool })
    }

    pub fn pool(&self) -> &SqlitePool {
        &self.pool
    }
}

#[async_trait]
impl DocumentStore for SqliteStore {
    #[instrument(skip(self, doc), fields(filename = %doc.filename))]
    async fn insert(&self, doc: NewDocument) -> Result<DocumentRecord> {
        let scores = serde_json::to_string(&doc.classification.scores)?;
        let outcome = serde_json::to_string(&doc.classification.outcome)?;

        let result = sqlx::query(
            r#"
            INSERT INTO documents (filename, content, upload_time, predicted_category, confidence_scores, outcome)
            VALUES (?1, ?2, ?3, ?4, ?5, ?6)
            "#,
        )
        .bind(&doc.filename)
        .bind(&doc.content)
        .bind(doc.upload_time.to_rfc3339())
        .bind(&doc.classification.category)
        .bind(scores)
        .bind(outcome)
        .execute(&self.pool)
        .await
        .map_err(storage_error)?;

        Ok(DocumentRecord::from_new(result.last_insert_rowid(), doc))
    }

    #[instrument(skip(self))]
    async fn get(&self, id: i64) -> Result<Option<DocumentRecord>> {
        let row = sqlx::query(&format!("{SELECT_COLUMNS} WHERE id = ?1"))
            .bind(id)
            .fetch_optional(&self.pool)
            .await
            .map_err(storage_error)?;

        row.as_ref().map(record_from_row).transpose()
    }

    #[instrument(skip(self))]
    async fn list(&self) -> Result<Vec<DocumentRecord>> {
        let rows = sqlx::query(&format!("{SELECT_COLUMNS} ORDER BY id"))
            .fetch_all(&self.pool)
            .await
            .map_err(storage_error)?;

        rows.iter().map(record_from_row).collect()
    }
}

fn record_from_row(row: &SqliteRow) -> Result<DocumentRecord> {
    let upload_time: String = row.try_get("upload_time").map_err(storage_error)?;
    let upload_time = DateTime::parse_from_rfc3339(&upload_time)
        .map_err(|e| DocsortError::Storage(format!("bad upload_time {upload_time:?}: {e}")))?
        .with_timezone(&Utc);

    let scores: String = row.try_get("confidence_scores").map_err(storage_error)?;
    let outcome: String = row.try_get("outcome").map_err(storage_error)?;

    Ok(DocumentRecord {
        id: row.try_get("id").map_err(storage_error)?,
        filename: row.try_get("filename").map_err(storage_error)?,
        content: row.try_get("content").map_err(storage_error)?,
        upload_time,
        predicted_category: row.try_get("predicted_category").map_err(storage_error)?,
        confidence_scores: serde_json::from_str::<ScoreVector>(&scores)?,
        outcome: serde_json::from_str::<Outcome>(&outcome)?,
    })
}

fn storage_error(e: sqlx::Error) -> DocsortError {
    DocsortError::Storage(e.to_string())
}
