use crate::state::AppState;
use axum::routing::{get, post};
use axum::Router;

pub mod dto;
pub mod handler;
pub mod model;
pub mod repository;
pub mod service;
pub mod tracker;

pub fn router() -> Router<AppState> {
    Router::new()
        .route("/", get(handler::list_imports).post(handler::start_import))
        .route("/{id}/status", get(handler::get_import_status))
        .route("/{id}/complete", post(handler::complete_import))
}
