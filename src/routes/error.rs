use axum::{
    http::StatusCode,
    response::{IntoResponse, Response},
    Json,
};
use serde_json::json;
use uuid::Uuid;

use crate::game::{GenerationError, SessionError};

/// Error returned by API handlers as `{ "error": code, "message": text }`
#[derive(Debug)]
pub struct ApiError {
    pub status: StatusCode,
    pub code: &'static str,
    pub message: String,
}

impl ApiError {
    pub fn new(status: StatusCode, code: &'static str, message: impl Into<String>) -> Self {
        Self {
            status,
            code,
            message: message.into(),
        }
    }

    pub fn session_not_found(session_id: Uuid) -> Self {
        Self::new(
            StatusCode::NOT_FOUND,
            "session_not_found",
            format!("no session with id {}", session_id),
        )
    }

    pub fn level_locked(message: impl Into<String>) -> Self {
        Self::new(StatusCode::FORBIDDEN, "level_locked", message)
    }
}

impl From<GenerationError> for ApiError {
    fn from(err: GenerationError) -> Self {
        let code = match err {
            GenerationError::MissingConfig => "missing_config",
            GenerationError::InvalidGridSize { .. } => "invalid_grid_size",
            GenerationError::NoCandidateWords { .. } => "no_candidate_words",
            GenerationError::RunInProgress => "run_in_progress",
            GenerationError::NoRunInProgress => "no_run_in_progress",
        };
        let status = match err {
            GenerationError::RunInProgress | GenerationError::NoRunInProgress => {
                StatusCode::CONFLICT
            }
            _ => StatusCode::UNPROCESSABLE_ENTITY,
        };
        if err.is_configuration_error() {
            tracing::error!("Rejected level config: {}", err);
        } else {
            tracing::warn!("Puzzle generation failed: {}", err);
        }
        Self::new(status, code, err.to_string())
    }
}

impl From<SessionError> for ApiError {
    fn from(err: SessionError) -> Self {
        let (status, code) = match err {
            SessionError::NotActive => (StatusCode::CONFLICT, "session_not_active"),
            SessionError::InvalidSelection { .. } => {
                (StatusCode::UNPROCESSABLE_ENTITY, "invalid_selection")
            }
            SessionError::InvalidTime(_) => (StatusCode::UNPROCESSABLE_ENTITY, "invalid_time"),
            SessionError::HintLimitReached(_) => (StatusCode::CONFLICT, "hint_limit_reached"),
            SessionError::NoWordsRemaining => (StatusCode::CONFLICT, "no_words_remaining"),
            SessionError::NotEndless => (StatusCode::CONFLICT, "not_endless"),
            SessionError::LevelNotComplete => (StatusCode::CONFLICT, "level_not_complete"),
        };
        tracing::debug!("Session request rejected: {}", err);
        Self::new(status, code, err.to_string())
    }
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        let body = Json(json!({
            "error": self.code,
            "message": self.message,
        }));
        (self.status, body).into_response()
    }
}
