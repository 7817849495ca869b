use super::model::{ContentRecord, ContentStatus};
use crate::common::error::AppError;
use async_trait::async_trait;
use sqlx::{FromRow, PgPool};
use std::collections::HashMap;
use time::OffsetDateTime;
use tokio::sync::RwLock;
use uuid::Uuid;

#[async_trait]
pub trait ContentStore: Send + Sync {
    async fn insert(&self, record: &ContentRecord) -> Result<ContentRecord, AppError>;
    async fn find_by_id(&self, id: Uuid) -> Result<Option<ContentRecord>, AppError>;
    /// Overwrites every mutable column. Missing ids are a `NotFound`.
    async fn update(&self, record: &ContentRecord) -> Result<ContentRecord, AppError>;
    /// Newest first.
    async fn list(&self) -> Result<Vec<ContentRecord>, AppError>;
}

fn not_found(id: Uuid) -> AppError {
    AppError::NotFound(format!("Content record {} not found", id))
}

// --- POSTGRES ---

#[derive(Debug, FromRow)]
struct ContentRow {
    id: Uuid,
    status: String,
    progress: i32,
    error_details: Option<String>,
    metadata: serde_json::Value,
    source_url: Option<String>,
    video_id: Option<String>,
    processed_at: Option<OffsetDateTime>,
    created_at: OffsetDateTime,
    updated_at: OffsetDateTime,
}

impl TryFrom<ContentRow> for ContentRecord {
    type Error = AppError;

    fn try_from(row: ContentRow) -> Result<Self, Self::Error> {
        let status = row
            .status
            .parse::<ContentStatus>()
            .map_err(AppError::Persistence)?;

        Ok(Self {
            id: row.id,
            status,
            progress: row.progress,
            error_details: row.error_details,
            metadata: row.metadata,
            source_url: row.source_url,
            video_id: row.video_id,
            processed_at: row.processed_at,
            created_at: row.created_at,
            updated_at: row.updated_at,
        })
    }
}

const CONTENT_COLUMNS: &str = "id, status, progress, error_details, metadata, source_url, video_id, processed_at, created_at, updated_at";

pub struct PgContentRepository {
    pool: PgPool,
}

impl PgContentRepository {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }
}

#[async_trait]
impl ContentStore for PgContentRepository {
    async fn insert(&self, record: &ContentRecord) -> Result<ContentRecord, AppError> {
        let row = sqlx::query_as::<_, ContentRow>(&format!(
            r#"
            INSERT INTO educational_content
                (id, status, progress, error_details, metadata, source_url, video_id, processed_at, created_at, updated_at)
            VALUES ($1, $2, $3, $4, $5, $6, $7, $8, $9, $10)
            RETURNING {CONTENT_COLUMNS}
            "#
        ))
        .bind(record.id)
        .bind(record.status.as_str())
        .bind(record.progress)
        .bind(&record.error_details)
        .bind(&record.metadata)
        .bind(&record.source_url)
        .bind(&record.video_id)
        .bind(record.processed_at)
        .bind(record.created_at)
        .bind(record.updated_at)
        .fetch_one(&self.pool)
        .await?;

        row.try_into()
    }

    async fn find_by_id(&self, id: Uuid) -> Result<Option<ContentRecord>, AppError> {
        let row = sqlx::query_as::<_, ContentRow>(&format!(
            "SELECT {CONTENT_COLUMNS} FROM educational_content WHERE id = $1"
        ))
        .bind(id)
        .fetch_optional(&self.pool)
        .await?;

        row.map(ContentRecord::try_from).transpose()
    }

    async fn update(&self, record: &ContentRecord) -> Result<ContentRecord, AppError> {
        let row = sqlx::query_as::<_, ContentRow>(&format!(
            r#"
            UPDATE educational_content
            SET
                status = $2,
                progress = $3,
                error_details = $4,
                metadata = $5,
                processed_at = $6,
                updated_at = NOW()
            WHERE id = $1
            RETURNING {CONTENT_COLUMNS}
            "#
        ))
        .bind(record.id)
        .bind(record.status.as_str())
        .bind(record.progress)
        .bind(&record.error_details)
        .bind(&record.metadata)
        .bind(record.processed_at)
        .fetch_optional(&self.pool)
        .await?
        .ok_or_else(|| not_found(record.id))?;

        row.try_into()
    }

    async fn list(&self) -> Result<Vec<ContentRecord>, AppError> {
        let rows = sqlx::query_as::<_, ContentRow>(&format!(
            "SELECT {CONTENT_COLUMNS} FROM educational_content ORDER BY created_at DESC"
        ))
        .fetch_all(&self.pool)
        .await?;

        rows.into_iter().map(ContentRecord::try_from).collect()
    }
}

// --- IN MEMORY ---

/// Process-local store, used when no database is configured.
#[derive(Default)]
pub struct InMemoryContentStore {
    records: RwLock<HashMap<Uuid, ContentRecord>>,
}

impl InMemoryContentStore {
    pub fn new() -> Self {
        Self::default()
    }
}

#[async_trait]
impl ContentStore for InMemoryContentStore {
    async fn insert(&self, record: &ContentRecord) -> Result<ContentRecord, AppError> {
        let mut records = self.records.write().await;
        if records.contains_key(&record.id) {
            return Err(AppError::Persistence(format!(
                "Content record {} already exists",
                record.id
            )));
        }
        records.insert(record.id, record.clone());
        Ok(record.clone())
    }

    async fn find_by_id(&self, id: Uuid) -> Result<Option<ContentRecord>, AppError> {
        Ok(self.records.read().await.get(&id).cloned())
    }

    async fn update(&self, record: &ContentRecord) -> Result<ContentRecord, AppError> {
        let mut records = self.records.write().await;
        let stored = records.get_mut(&record.id).ok_or_else(|| not_found(record.id))?;

        stored.status = record.status;
        stored.progress = record.progress;
        stored.error_details = record.error_details.clone();
        stored.metadata = record.metadata.clone();
        stored.processed_at = record.processed_at;
        stored.updated_at = OffsetDateTime::now_utc();

        Ok(stored.clone())
    }

    async fn list(&self) -> Result<Vec<ContentRecord>, AppError> {
        let mut records: Vec<ContentRecord> = self.records.read().await.values().cloned().collect();
        records.sort_by(|a, b| b.created_at.cmp(&a.created_at));
        Ok(records)
    }
}
