use crate::state::AppState;
use axum::Router;
use tower_http::limit::RequestBodyLimitLayer;
use tower_http::trace::TraceLayer;

const MAX_BODY_BYTES: usize = 1024 * 1024;

pub fn create_app(state: AppState) -> Router {
    crate::routes::configure_routes()
        .layer(TraceLayer::new_for_http())
        .layer(RequestBodyLimitLayer::new(MAX_BODY_BYTES))
        .with_state(state)
}
