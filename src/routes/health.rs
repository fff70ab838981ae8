use std::sync::Arc;

use axum::{extract::State, Json};
use serde_json::{json, Value};

use crate::AppState;

/// Health check endpoint
pub async fn health_check(State(state): State<Arc<AppState>>) -> Json<Value> {
    Json(json!({
        "status": "ok",
        "service": "word-finder-backend",
        "version": env!("CARGO_PKG_VERSION"),
        "words": state.word_list.len(),
        "sessions": state.sessions.len()
    }))
}
