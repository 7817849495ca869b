use super::dto::{CreateLearningPathRequest, LearningPathQuery};
use super::model::LearningPath;
use crate::common::error::AppError;
use crate::state::AppState;
use time::OffsetDateTime;
use tracing::info;
use uuid::Uuid;
use validator::Validate;

const SHARE_CODE_LEN: usize = 8;

pub struct LearningPathService;

impl LearningPathService {
    fn generate_share_code() -> String {
        Uuid::new_v4().as_simple().to_string()[..SHARE_CODE_LEN].to_uppercase()
    }

    pub async fn create(state: &AppState, mut req: CreateLearningPathRequest) -> Result<LearningPath, AppError> {
        // Length checks apply to the title as stored.
        req.title = req.title.trim().to_string();
        req.validate()?;

        let path = LearningPath {
            id: Uuid::new_v4(),
            title: req.title,
            description: req.description,
            steps: serde_json::Value::Array(req.steps),
            subject: req.subject,
            grade_level: req.grade_level,
            share_code: Self::generate_share_code(),
            created_at: OffsetDateTime::now_utc(),
        };

        let path = state.learning_paths.insert(&path).await?;
        info!(learning_path_id = %path.id, share_code = %path.share_code, "Learning path created");
        Ok(path)
    }

    pub async fn list(state: &AppState, query: LearningPathQuery) -> Result<Vec<LearningPath>, AppError> {
        match query.share_code.as_deref() {
            Some(code) => state.learning_paths.find_by_share_code(code).await,
            None => state.learning_paths.list().await,
        }
    }

    pub async fn find_by_id(state: &AppState, id: Uuid) -> Result<LearningPath, AppError> {
        state
            .learning_paths
            .find_by_id(id)
            .await?
            .ok_or_else(|| AppError::NotFound(format!("Learning path {} not found", id)))
    }

    pub async fn delete(state: &AppState, id: Uuid) -> Result<(), AppError> {
        state.learning_paths.delete(id).await?;
        info!(learning_path_id = %id, "Learning path deleted");
        Ok(())
    }
}
