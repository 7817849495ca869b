use crate::common::response::ApiError;
use crate::infrastructure::youtube::client::FetchError;
use axum::http::StatusCode;
use thiserror::Error;

#[derive(Debug, Error)]
pub enum AppError {
    #[error("{0}")]
    Validation(String),

    #[error("{0}")]
    NotFound(String),

    #[error(transparent)]
    Upstream(#[from] FetchError),

    #[error("{0}")]
    Persistence(String),
}

impl AppError {
    pub fn status_code(&self) -> StatusCode {
        match self {
            AppError::Validation(_) => StatusCode::BAD_REQUEST,
            AppError::NotFound(_) => StatusCode::NOT_FOUND,
            AppError::Upstream(_) | AppError::Persistence(_) => StatusCode::INTERNAL_SERVER_ERROR,
        }
    }
}

impl From<sqlx::Error> for AppError {
    fn from(e: sqlx::Error) -> Self {
        AppError::Persistence(format!("Database error: {}", e))
    }
}

impl From<validator::ValidationErrors> for AppError {
    fn from(e: validator::ValidationErrors) -> Self {
        AppError::Validation(e.to_string())
    }
}

impl From<AppError> for ApiError {
    fn from(e: AppError) -> Self {
        let status = e.status_code();
        ApiError(e.to_string(), status)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn maps_each_kind_to_its_status() {
        assert_eq!(AppError::Validation("bad".into()).status_code(), StatusCode::BAD_REQUEST);
        assert_eq!(AppError::NotFound("gone".into()).status_code(), StatusCode::NOT_FOUND);
        assert_eq!(
            AppError::Persistence("down".into()).status_code(),
            StatusCode::INTERNAL_SERVER_ERROR
        );
        assert_eq!(
            AppError::Upstream(FetchError::Status(403)).status_code(),
            StatusCode::INTERNAL_SERVER_ERROR
        );
    }

    #[test]
    fn api_error_keeps_the_message() {
        let api: ApiError = AppError::Validation("Invalid YouTube URL".into()).into();
        assert_eq!(api.0, "Invalid YouTube URL");
        assert_eq!(api.1, StatusCode::BAD_REQUEST);
    }
}
