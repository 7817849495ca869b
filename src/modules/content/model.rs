use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;
use time::OffsetDateTime;
use utoipa::ToSchema;
use uuid::Uuid;

#[derive(Debug, Serialize, Deserialize, Clone, Copy, PartialEq, Eq, ToSchema)]
#[serde(rename_all = "lowercase")]
pub enum ContentStatus {
    Pending,
    Processing,
    Completed,
    Failed,
}

impl ContentStatus {
    pub fn as_str(&self) -> &'static str {
        match self {
            ContentStatus::Pending => "pending",
            ContentStatus::Processing => "processing",
            ContentStatus::Completed => "completed",
            ContentStatus::Failed => "failed",
        }
    }

    pub fn is_terminal(&self) -> bool {
        matches!(self, ContentStatus::Completed | ContentStatus::Failed)
    }

    /// Forward-only transitions. Finalization bypasses this check.
    pub fn can_advance_to(&self, next: ContentStatus) -> bool {
        matches!(
            (self, next),
            (ContentStatus::Pending, ContentStatus::Processing)
                | (ContentStatus::Pending, ContentStatus::Failed)
                | (ContentStatus::Processing, ContentStatus::Failed)
        )
    }
}

impl fmt::Display for ContentStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for ContentStatus {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "pending" => Ok(ContentStatus::Pending),
            "processing" => Ok(ContentStatus::Processing),
            "completed" => Ok(ContentStatus::Completed),
            "failed" => Ok(ContentStatus::Failed),
            other => Err(format!("Unknown content status: {}", other)),
        }
    }
}

/// One ingested educational item and where its import stands.
#[derive(Debug, Serialize, Deserialize, Clone, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct ContentRecord {
    pub id: Uuid,
    pub status: ContentStatus,
    pub progress: i32,
    pub error_details: Option<String>,
    #[schema(value_type = Object)]
    pub metadata: serde_json::Value,
    pub source_url: Option<String>,
    pub video_id: Option<String>,
    #[serde(with = "time::serde::rfc3339::option")]
    #[schema(value_type = Option<String>, format = DateTime)]
    pub processed_at: Option<OffsetDateTime>,
    #[serde(with = "time::serde::rfc3339")]
    #[schema(value_type = String, format = DateTime)]
    pub created_at: OffsetDateTime,
    #[serde(with = "time::serde::rfc3339")]
    #[schema(value_type = String, format = DateTime)]
    pub updated_at: OffsetDateTime,
}

impl ContentRecord {
    pub fn pending(source_url: Option<String>, video_id: Option<String>) -> Self {
        let now = OffsetDateTime::now_utc();
        Self {
            id: Uuid::new_v4(),
            status: ContentStatus::Pending,
            progress: 0,
            error_details: None,
            metadata: serde_json::Value::Object(Default::default()),
            source_url,
            video_id,
            processed_at: None,
            created_at: now,
            updated_at: now,
        }
    }

    pub fn set_progress(&mut self, progress: i32) {
        self.progress = progress.clamp(0, 100);
    }
}
