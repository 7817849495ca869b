use super::model::LearningPath;
use crate::common::error::AppError;
use async_trait::async_trait;
use sqlx::PgPool;
use std::collections::HashMap;
use tokio::sync::RwLock;
use uuid::Uuid;

#[async_trait]
pub trait LearningPathStore: Send + Sync {
    async fn insert(&self, path: &LearningPath) -> Result<LearningPath, AppError>;
    async fn find_by_id(&self, id: Uuid) -> Result<Option<LearningPath>, AppError>;
    async fn find_by_share_code(&self, share_code: &str) -> Result<Vec<LearningPath>, AppError>;
    /// Newest first.
    async fn list(&self) -> Result<Vec<LearningPath>, AppError>;
    async fn delete(&self, id: Uuid) -> Result<(), AppError>;
}

fn not_found(id: Uuid) -> AppError {
    AppError::NotFound(format!("Learning path {} not found", id))
}

const PATH_COLUMNS: &str = "id, title, description, steps, subject, grade_level, share_code, created_at";

pub struct PgLearningPathRepository {
    pool: PgPool,
}

impl PgLearningPathRepository {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }
}

#[async_trait]
impl LearningPathStore for PgLearningPathRepository {
    async fn insert(&self, path: &LearningPath) -> Result<LearningPath, AppError> {
        let path = sqlx::query_as::<_, LearningPath>(&format!(
            r#"
            INSERT INTO learning_paths (id, title, description, steps, subject, grade_level, share_code, created_at)
            VALUES ($1, $2, $3, $4, $5, $6, $7, $8)
            RETURNING {PATH_COLUMNS}
            "#
        ))
        .bind(path.id)
        .bind(&path.title)
        .bind(&path.description)
        .bind(&path.steps)
        .bind(&path.subject)
        .bind(&path.grade_level)
        .bind(&path.share_code)
        .bind(path.created_at)
        .fetch_one(&self.pool)
        .await?;

        Ok(path)
    }

    async fn find_by_id(&self, id: Uuid) -> Result<Option<LearningPath>, AppError> {
        let path = sqlx::query_as::<_, LearningPath>(&format!(
            "SELECT {PATH_COLUMNS} FROM learning_paths WHERE id = $1"
        ))
        .bind(id)
        .fetch_optional(&self.pool)
        .await?;

        Ok(path)
    }

    async fn find_by_share_code(&self, share_code: &str) -> Result<Vec<LearningPath>, AppError> {
        let paths = sqlx::query_as::<_, LearningPath>(&format!(
            "SELECT {PATH_COLUMNS} FROM learning_paths WHERE share_code = $1 ORDER BY created_at DESC"
        ))
        .bind(share_code)
        .fetch_all(&self.pool)
        .await?;

        Ok(paths)
    }

    async fn list(&self) -> Result<Vec<LearningPath>, AppError> {
        let paths = sqlx::query_as::<_, LearningPath>(&format!(
            "SELECT {PATH_COLUMNS} FROM learning_paths ORDER BY created_at DESC"
        ))
        .fetch_all(&self.pool)
        .await?;

        Ok(paths)
    }

    async fn delete(&self, id: Uuid) -> Result<(), AppError> {
        let result = sqlx::query("DELETE FROM learning_paths WHERE id = $1")
            .bind(id)
            .execute(&self.pool)
            .await?;

        if result.rows_affected() == 0 {
            return Err(not_found(id));
        }

        Ok(())
    }
}

#[derive(Default)]
pub struct InMemoryLearningPathStore {
    paths: RwLock<HashMap<Uuid, LearningPath>>,
}

impl InMemoryLearningPathStore {
    pub fn new() -> Self {
        Self::default()
    }

    async fn sorted(&self, filter: impl Fn(&LearningPath) -> bool) -> Vec<LearningPath> {
        let mut paths: Vec<LearningPath> = self
            .paths
            .read()
            .await
            .values()
            .filter(|p| filter(p))
            .cloned()
            .collect();
        paths.sort_by(|a, b| b.created_at.cmp(&a.created_at));
        paths
    }
}

#[async_trait]
impl LearningPathStore for InMemoryLearningPathStore {
    async fn insert(&self, path: &LearningPath) -> Result<LearningPath, AppError> {
        let mut paths = self.paths.write().await;
        if paths.values().any(|p| p.id == path.id || p.share_code == path.share_code) {
            return Err(AppError::Persistence(format!(
                "Learning path {} conflicts with an existing record",
                path.id
            )));
        }
        paths.insert(path.id, path.clone());
        Ok(path.clone())
    }

    async fn find_by_id(&self, id: Uuid) -> Result<Option<LearningPath>, AppError> {
        Ok(self.paths.read().await.get(&id).cloned())
    }

    async fn find_by_share_code(&self, share_code: &str) -> Result<Vec<LearningPath>, AppError> {
        Ok(self.sorted(|p| p.share_code == share_code).await)
    }

    async fn list(&self) -> Result<Vec<LearningPath>, AppError> {
        Ok(self.sorted(|_| true).await)
    }

    async fn delete(&self, id: Uuid) -> Result<(), AppError> {
        self.paths
            .write()
            .await
            .remove(&id)
            .map(|_| ())
            .ok_or_else(|| not_found(id))
    }
}
