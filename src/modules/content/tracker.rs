use super::dto::ImportStatus;
use super::service::ImportService;
use crate::state::AppState;
use tracing::warn;
use uuid::Uuid;

/// Status view for polling clients. Every poll re-reads the store, and any
/// failure along the way is reported as a `failed` status instead of an error.
pub struct ImportTracker;

impl ImportTracker {
    pub async fn poll(state: &AppState, id: Uuid) -> ImportStatus {
        match ImportService::check_import_status(state, id).await {
            Ok(status) => status,
            Err(e) => {
                warn!(content_id = %id, "Import status unavailable: {}", e);
                ImportStatus::failed(e.to_string())
            }
        }
    }
}
