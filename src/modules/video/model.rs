use serde::{Deserialize, Serialize};
use utoipa::ToSchema;

/// Snapshot of a video's public metadata, fetched fresh per request.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct VideoMetadata {
    pub id: String,
    pub title: String,
    pub description: String,
    pub thumbnail_url: Option<String>,
    /// ISO-8601 duration exactly as reported, e.g. `PT4M13S`.
    pub duration: Option<String>,
    pub duration_seconds: Option<u64>,
    pub published_at: Option<String>,
    pub channel_title: Option<String>,
    pub view_count: Option<u64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub is_short: Option<bool>,
}
