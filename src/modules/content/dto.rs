use super::model::{ContentRecord, ContentStatus};
use serde::{Deserialize, Serialize};
use utoipa::ToSchema;

#[derive(Debug, Deserialize, ToSchema)]
pub struct StartImportRequest {
    pub url: String,
}

#[derive(Debug, Deserialize, ToSchema)]
pub struct CompleteImportRequest {
    #[schema(value_type = Object)]
    pub metadata: serde_json::Value,
}

/// What a polling client sees for one record.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, ToSchema)]
pub struct ImportStatus {
    pub status: ContentStatus,
    pub progress: i32,
    pub error: Option<String>,
}

impl ImportStatus {
    pub fn failed(message: impl Into<String>) -> Self {
        Self {
            status: ContentStatus::Failed,
            progress: 0,
            error: Some(message.into()),
        }
    }
}

impl From<&ContentRecord> for ImportStatus {
    fn from(record: &ContentRecord) -> Self {
        Self {
            status: record.status,
            progress: record.progress,
            error: record.error_details.clone(),
        }
    }
}
