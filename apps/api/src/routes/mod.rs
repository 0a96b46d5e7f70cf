pub mod health;

use axum::{routing::get, Router};

use crate::review::handlers;
use crate::state::AppState;

pub fn build_router(state: AppState) -> Router {
    Router::new()
        .route("/health", get(health::health_handler))
        // Review API
        .route("/api/v1/resumes/:id/review", get(handlers::handle_get_review))
        .route(
            "/api/v1/resumes/:id/document",
            get(handlers::handle_get_document),
        )
        .route(
            "/api/v1/resumes/:id/preview",
            get(handlers::handle_get_preview),
        )
        .with_state(state)
}
