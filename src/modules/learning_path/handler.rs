use super::dto::{CreateLearningPathRequest, LearningPathQuery};
use super::model::LearningPath;
use super::service::LearningPathService;
use crate::common::response::{ApiError, ApiSuccess, ErrorBody};
use crate::state::AppState;
use axum::{
    extract::{
        rejection::{JsonRejection, PathRejection},
        Path, Query, State,
    },
    http::StatusCode,
    response::IntoResponse,
    Json,
};
use tracing::{error, warn};
use uuid::Uuid;

/// Create a learning path
#[utoipa::path(
    post,
    path = "/api/v1/learning-paths",
    request_body = CreateLearningPathRequest,
    responses(
        (status = 201, description = "Learning path created", body = LearningPath),
        (status = 400, description = "Bad Request", body = ErrorBody),
        (status = 500, description = "Internal Server Error", body = ErrorBody)
    ),
    tag = "Learning Paths"
)]
pub async fn create_learning_path(
    State(state): State<AppState>,
    payload: Result<Json<CreateLearningPathRequest>, JsonRejection>,
) -> impl IntoResponse {
    let Json(req) = match payload {
        Ok(body) => body,
        Err(rejection) => {
            error!("Rejected learning path payload: {}", rejection.body_text());
            return ApiError(rejection.body_text(), StatusCode::BAD_REQUEST).into_response();
        }
    };

    match LearningPathService::create(&state, req).await {
        Ok(path) => ApiSuccess(path, StatusCode::CREATED).into_response(),
        Err(e) => {
            error!("Failed to create learning path: {}", e);
            ApiError::from(e).into_response()
        }
    }
}

/// List learning paths, optionally by share code
#[utoipa::path(
    get,
    path = "/api/v1/learning-paths",
    params(LearningPathQuery),
    responses(
        (status = 200, description = "Learning paths, newest first", body = Vec<LearningPath>),
        (status = 500, description = "Internal Server Error", body = ErrorBody)
    ),
    tag = "Learning Paths"
)]
pub async fn list_learning_paths(
    State(state): State<AppState>,
    Query(query): Query<LearningPathQuery>,
) -> impl IntoResponse {
    match LearningPathService::list(&state, query).await {
        Ok(paths) => ApiSuccess(paths, StatusCode::OK).into_response(),
        Err(e) => {
            error!("Failed to list learning paths: {}", e);
            ApiError::from(e).into_response()
        }
    }
}

/// Get a learning path by ID
#[utoipa::path(
    get,
    path = "/api/v1/learning-paths/{id}",
    params(
        ("id" = Uuid, Path, description = "Learning path ID")
    ),
    responses(
        (status = 200, description = "Learning path", body = LearningPath),
        (status = 400, description = "Malformed ID", body = ErrorBody),
        (status = 404, description = "Learning path not found", body = ErrorBody)
    ),
    tag = "Learning Paths"
)]
pub async fn get_learning_path(
    State(state): State<AppState>,
    id: Result<Path<Uuid>, PathRejection>,
) -> impl IntoResponse {
    let Path(id) = match id {
        Ok(id) => id,
        Err(rejection) => {
            warn!("Rejected learning path id: {}", rejection.body_text());
            return ApiError::from(rejection).into_response();
        }
    };

    match LearningPathService::find_by_id(&state, id).await {
        Ok(path) => ApiSuccess(path, StatusCode::OK).into_response(),
        Err(e) => ApiError::from(e).into_response(),
    }
}

/// Delete a learning path
#[utoipa::path(
    delete,
    path = "/api/v1/learning-paths/{id}",
    params(
        ("id" = Uuid, Path, description = "Learning path ID")
    ),
    responses(
        (status = 204, description = "Learning path deleted"),
        (status = 400, description = "Malformed ID", body = ErrorBody),
        (status = 404, description = "Learning path not found", body = ErrorBody)
    ),
    tag = "Learning Paths"
)]
pub async fn delete_learning_path(
    State(state): State<AppState>,
    id: Result<Path<Uuid>, PathRejection>,
) -> impl IntoResponse {
    let Path(id) = match id {
        Ok(id) => id,
        Err(rejection) => {
            warn!("Rejected learning path id: {}", rejection.body_text());
            return ApiError::from(rejection).into_response();
        }
    };

    match LearningPathService::delete(&state, id).await {
        Ok(()) => StatusCode::NO_CONTENT.into_response(),
        Err(e) => {
            error!("Failed to delete learning path {}: {}", id, e);
            ApiError::from(e).into_response()
        }
    }
}
