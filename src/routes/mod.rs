pub mod error;
pub mod health;
pub mod puzzles;
pub mod sessions;

use std::sync::Arc;

use axum::{
    routing::{get, post},
    Router,
};

use crate::AppState;

pub fn create_routes() -> Router<Arc<AppState>> {
    Router::new()
        .route("/health", get(health::health_check))
        .nest("/api", api_routes())
}

fn api_routes() -> Router<Arc<AppState>> {
    Router::new()
        .route("/puzzles", post(puzzles::generate_puzzle))
        .route("/sessions", post(sessions::create_session))
        .route(
            "/sessions/{id}",
            get(sessions::get_session).delete(sessions::delete_session),
        )
        .route("/sessions/{id}/selections", post(sessions::submit_selection))
        .route("/sessions/{id}/hint", post(sessions::request_hint))
        .route("/sessions/{id}/time", post(sessions::add_time))
        .route("/sessions/{id}/pause", post(sessions::pause_session))
        .route("/sessions/{id}/resume", post(sessions::resume_session))
        .route("/sessions/{id}/finish", post(sessions::finish_session))
        .route("/sessions/{id}/next", post(sessions::next_level))
}
