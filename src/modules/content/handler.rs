use super::dto::{CompleteImportRequest, ImportStatus, StartImportRequest};
use super::model::ContentRecord;
use super::service::ImportService;
use super::tracker::ImportTracker;
use crate::common::response::{ApiError, ApiSuccess, ErrorBody};
use crate::state::AppState;
use axum::{
    extract::{
        rejection::{JsonRejection, PathRejection},
        Path, State,
    },
    http::StatusCode,
    response::IntoResponse,
    Json,
};
use tracing::{error, warn};
use uuid::Uuid;

fn bad_body(rejection: JsonRejection) -> axum::response::Response {
    error!("Rejected import payload: {}", rejection.body_text());
    ApiError(rejection.body_text(), StatusCode::BAD_REQUEST).into_response()
}

/// Import a YouTube video as educational content
#[utoipa::path(
    post,
    path = "/api/v1/imports",
    request_body = StartImportRequest,
    responses(
        (status = 201, description = "Import processed; the record holds the outcome", body = ContentRecord),
        (status = 400, description = "Invalid YouTube URL", body = ErrorBody),
        (status = 500, description = "Internal Server Error", body = ErrorBody)
    ),
    tag = "Imports"
)]
pub async fn start_import(
    State(state): State<AppState>,
    payload: Result<Json<StartImportRequest>, JsonRejection>,
) -> impl IntoResponse {
    let Json(req) = match payload {
        Ok(body) => body,
        Err(rejection) => return bad_body(rejection),
    };

    match ImportService::import_video(&state, &req.url).await {
        Ok(record) => ApiSuccess(record, StatusCode::CREATED).into_response(),
        Err(e) => {
            error!("Failed to import {}: {}", req.url, e);
            ApiError::from(e).into_response()
        }
    }
}

/// List imported content, newest first
#[utoipa::path(
    get,
    path = "/api/v1/imports",
    responses(
        (status = 200, description = "Content records", body = Vec<ContentRecord>),
        (status = 500, description = "Internal Server Error", body = ErrorBody)
    ),
    tag = "Imports"
)]
pub async fn list_imports(State(state): State<AppState>) -> impl IntoResponse {
    match ImportService::list_imports(&state).await {
        Ok(records) => ApiSuccess(records, StatusCode::OK).into_response(),
        Err(e) => {
            error!("Failed to list imports: {}", e);
            ApiError::from(e).into_response()
        }
    }
}

/// Poll the status of an import
#[utoipa::path(
    get,
    path = "/api/v1/imports/{id}/status",
    params(
        ("id" = String, Path, description = "Content record ID")
    ),
    responses(
        (status = 200, description = "Latest known status; lookup failures read as failed", body = ImportStatus)
    ),
    tag = "Imports"
)]
pub async fn get_import_status(
    State(state): State<AppState>,
    Path(id): Path<String>,
) -> impl IntoResponse {
    let status = match Uuid::parse_str(&id) {
        Ok(id) => ImportTracker::poll(&state, id).await,
        Err(_) => ImportStatus::failed(format!("Invalid content record id: {}", id)),
    };

    ApiSuccess(status, StatusCode::OK)
}

/// Finalize an import with its metadata
#[utoipa::path(
    post,
    path = "/api/v1/imports/{id}/complete",
    params(
        ("id" = Uuid, Path, description = "Content record ID")
    ),
    request_body = CompleteImportRequest,
    responses(
        (status = 200, description = "Record marked completed", body = ContentRecord),
        (status = 400, description = "Bad Request", body = ErrorBody),
        (status = 404, description = "Record not found", body = ErrorBody),
        (status = 500, description = "Internal Server Error", body = ErrorBody)
    ),
    tag = "Imports"
)]
pub async fn complete_import(
    State(state): State<AppState>,
    id: Result<Path<Uuid>, PathRejection>,
    payload: Result<Json<CompleteImportRequest>, JsonRejection>,
) -> impl IntoResponse {
    let Path(id) = match id {
        Ok(id) => id,
        Err(rejection) => {
            warn!("Rejected import id: {}", rejection.body_text());
            return ApiError::from(rejection).into_response();
        }
    };
    let Json(req) = match payload {
        Ok(body) => body,
        Err(rejection) => return bad_body(rejection),
    };

    match ImportService::process_video_import(&state, id, req.metadata).await {
        Ok(record) => ApiSuccess(record, StatusCode::OK).into_response(),
        Err(e) => {
            error!("Failed to finalize import {}: {}", id, e);
            ApiError::from(e).into_response()
        }
    }
}
