use super::dto::VideoUrlRequest;
use super::extractor::VideoIdentifier;
use super::model::VideoMetadata;
use super::service::INVALID_URL_MESSAGE;
use crate::common::error::AppError;
use crate::common::response::{ApiError, ApiSuccess, ErrorBody};
use crate::state::AppState;
use axum::{
    extract::{rejection::JsonRejection, Path, State},
    http::StatusCode,
    response::IntoResponse,
    Json,
};
use tracing::error;

fn failure(e: AppError) -> axum::response::Response {
    error!("Video metadata request failed: {}", e);
    ApiError::from(e).into_response()
}

/// Get video metadata by id
#[utoipa::path(
    get,
    path = "/api/v1/youtube/{video_id}",
    params(
        ("video_id" = String, Path, description = "YouTube video ID")
    ),
    responses(
        (status = 200, description = "Video metadata", body = VideoMetadata),
        (status = 400, description = "Malformed video ID", body = ErrorBody),
        (status = 500, description = "Upstream failure", body = ErrorBody)
    ),
    tag = "YouTube"
)]
pub async fn get_video(
    State(state): State<AppState>,
    Path(video_id): Path<String>,
) -> impl IntoResponse {
    let Some(video_id) = VideoIdentifier::parse(&video_id) else {
        return ApiError("Invalid video ID".to_string(), StatusCode::BAD_REQUEST).into_response();
    };

    match state.videos.get_metadata(&video_id).await {
        Ok(metadata) => ApiSuccess(metadata, StatusCode::OK).into_response(),
        Err(e) => failure(e),
    }
}

/// Resolve a YouTube URL and return its metadata
#[utoipa::path(
    post,
    path = "/api/v1/youtube",
    request_body = VideoUrlRequest,
    responses(
        (status = 200, description = "Video metadata", body = VideoMetadata),
        (status = 400, description = "Invalid YouTube URL", body = ErrorBody),
        (status = 500, description = "Upstream failure", body = ErrorBody)
    ),
    tag = "YouTube"
)]
pub async fn resolve_video_url(
    State(state): State<AppState>,
    payload: Result<Json<VideoUrlRequest>, JsonRejection>,
) -> impl IntoResponse {
    let Json(req) = match payload {
        Ok(body) => body,
        Err(rejection) => {
            error!("Rejected video URL payload: {}", rejection.body_text());
            return ApiError(INVALID_URL_MESSAGE.to_string(), StatusCode::BAD_REQUEST).into_response();
        }
    };

    match state.videos.get_metadata_for_url(&req.url).await {
        Ok(metadata) => ApiSuccess(metadata, StatusCode::OK).into_response(),
        Err(e) => failure(e),
    }
}
