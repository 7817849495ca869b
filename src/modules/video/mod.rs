use crate::state::AppState;
use axum::routing::{get, post};
use axum::Router;

pub mod dto;
pub mod extractor;
pub mod handler;
pub mod model;
pub mod service;

pub fn router() -> Router<AppState> {
    Router::new()
        .route("/", post(handler::resolve_video_url))
        .route("/{video_id}", get(handler::get_video))
}
