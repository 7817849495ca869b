use super::dto::ImportStatus;
use super::model::{ContentRecord, ContentStatus};
use crate::common::error::AppError;
use crate::modules::video::extractor::{extract_video_id, VideoIdentifier};
use crate::modules::video::service::INVALID_URL_MESSAGE;
use crate::state::AppState;
use time::OffsetDateTime;
use tracing::{info, warn};
use uuid::Uuid;

/// Progress reported while the metadata fetch is underway.
const FETCHING_PROGRESS: i32 = 10;

pub struct ImportService;

impl ImportService {
    async fn load(state: &AppState, id: Uuid) -> Result<ContentRecord, AppError> {
        state
            .contents
            .find_by_id(id)
            .await?
            .ok_or_else(|| AppError::NotFound(format!("Content record {} not found", id)))
    }

    async fn advance(
        state: &AppState,
        id: Uuid,
        next: ContentStatus,
        apply: impl FnOnce(&mut ContentRecord),
    ) -> Result<ContentRecord, AppError> {
        let mut record = Self::load(state, id).await?;

        if !record.status.can_advance_to(next) {
            return Err(AppError::Validation(format!(
                "Cannot move content record {} from {} to {}",
                id, record.status, next
            )));
        }

        record.status = next;
        apply(&mut record);
        state.contents.update(&record).await
    }

    pub async fn check_import_status(state: &AppState, id: Uuid) -> Result<ImportStatus, AppError> {
        let record = Self::load(state, id).await?;
        Ok(ImportStatus::from(&record))
    }

    /// Marks the record completed and stores `metadata`, whatever its prior
    /// status. Re-finalizing overwrites earlier metadata.
    pub async fn process_video_import(
        state: &AppState,
        id: Uuid,
        metadata: serde_json::Value,
    ) -> Result<ContentRecord, AppError> {
        let mut record = Self::load(state, id).await?;

        record.status = ContentStatus::Completed;
        record.set_progress(100);
        record.error_details = None;
        record.metadata = metadata;
        record.processed_at = Some(OffsetDateTime::now_utc());

        let record = state.contents.update(&record).await?;
        info!(content_id = %id, "Import finalized");
        Ok(record)
    }

    /// Creates the pending record for `url`. URLs without a video id are
    /// rejected before anything is stored.
    pub async fn begin_import(
        state: &AppState,
        url: &str,
    ) -> Result<(ContentRecord, VideoIdentifier), AppError> {
        let video_id = extract_video_id(url)
            .ok_or_else(|| AppError::Validation(INVALID_URL_MESSAGE.to_string()))?;

        let record = ContentRecord::pending(Some(url.to_string()), Some(video_id.to_string()));
        let record = state.contents.insert(&record).await?;
        info!(content_id = %record.id, video_id = %video_id, "Import accepted");
        Ok((record, video_id))
    }

    pub async fn mark_processing(state: &AppState, id: Uuid) -> Result<ContentRecord, AppError> {
        Self::advance(state, id, ContentStatus::Processing, |record| {
            record.set_progress(FETCHING_PROGRESS);
        })
        .await
    }

    pub async fn mark_failed(state: &AppState, id: Uuid, message: &str) -> Result<ContentRecord, AppError> {
        warn!(content_id = %id, "Import failed: {}", message);
        Self::advance(state, id, ContentStatus::Failed, |record| {
            record.error_details = Some(message.to_string());
        })
        .await
    }

    /// Runs the whole pipeline for one URL. Fetch failures end up on the
    /// record; store failures are returned.
    pub async fn import_video(state: &AppState, url: &str) -> Result<ContentRecord, AppError> {
        let (record, video_id) = Self::begin_import(state, url).await?;
        let record = Self::mark_processing(state, record.id).await?;

        match state.videos.get_metadata(&video_id).await {
            Ok(metadata) => {
                let payload = serde_json::to_value(&metadata)
                    .map_err(|e| AppError::Persistence(format!("Failed to encode metadata: {}", e)))?;
                Self::process_video_import(state, record.id, payload).await
            }
            Err(e) => Self::mark_failed(state, record.id, &e.to_string()).await,
        }
    }

    pub async fn list_imports(state: &AppState) -> Result<Vec<ContentRecord>, AppError> {
        state.contents.list().await
    }
}
