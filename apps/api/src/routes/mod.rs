pub mod health;

use axum::{
    extract::DefaultBodyLimit,
    routing::{get, post},
    Router,
};

use crate::personality::handlers;
use crate::state::AppState;

pub fn build_router(state: AppState) -> Router {
    let upload_limit = state.config.max_upload_bytes;

    Router::new()
        .route("/", get(handlers::handle_index))
        .route(
            "/predict",
            post(handlers::handle_predict).layer(DefaultBodyLimit::max(upload_limit)),
        )
        .route("/health", get(health::health_handler))
        .with_state(state)
}
