use crate::state::AppState;
use axum::routing::get;
use axum::Router;

pub mod dto;
pub mod handler;
pub mod model;
pub mod repository;
pub mod service;

pub fn router() -> Router<AppState> {
    Router::new()
        .route(
            "/",
            get(handler::list_learning_paths).post(handler::create_learning_path),
        )
        .route(
            "/{id}",
            get(handler::get_learning_path).delete(handler::delete_learning_path),
        )
}
