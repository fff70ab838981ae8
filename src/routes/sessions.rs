use std::{sync::Arc, time::Instant};

use axum::{
    extract::{Path, State},
    http::StatusCode,
    Json,
};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::{
    game::{
        levels::{self, ClassicLevel, ENDLESS_START_TIME},
        GameSession, GenerationError, SessionSnapshot,
    },
    models::{Coordinate, GameMode, GridConfig, SelectionOutcome, SessionResult, SessionStatus},
    routes::{
        error::ApiError,
        puzzles::{build_puzzle, random_seed},
    },
    ActiveSession, AppState,
};

#[derive(Debug, Deserialize)]
pub struct CreateSessionRequest {
    pub mode: GameMode,
    /// Required for custom sessions, ignored otherwise
    pub config: Option<GridConfig>,
    pub seed: Option<u64>,
    /// Stars the player has collected, checked against classic level locks
    #[serde(default)]
    pub stars: u32,
}

#[derive(Debug, Deserialize)]
pub struct SelectionRequest {
    pub start: Coordinate,
    pub end: Coordinate,
}

#[derive(Debug, Serialize)]
pub struct SelectionResponse {
    pub outcome: SelectionOutcome,
    pub status: SessionStatus,
    pub score: i32,
    pub time_remaining: f32,
}

#[derive(Debug, Serialize)]
pub struct HintResponse {
    pub start: Coordinate,
    pub letter: Option<char>,
    pub hints_remaining: u32,
}

#[derive(Debug, Deserialize)]
pub struct AddTimeRequest {
    pub seconds: f32,
}

/// Syncs the session clock and runs `f` against it. The map guard never outlives `f`.
fn with_session<T>(
    state: &AppState,
    session_id: Uuid,
    f: impl FnOnce(&mut GameSession) -> Result<T, ApiError>,
) -> Result<T, ApiError> {
    let mut entry = state
        .sessions
        .get_mut(&session_id)
        .ok_or_else(|| ApiError::session_not_found(session_id))?;
    entry.sync(Instant::now());
    f(&mut entry.session)
}

/// Resolve the grid config and countdown for a new session
fn session_config(
    state: &AppState,
    mode: GameMode,
    config: Option<GridConfig>,
    stars: u32,
) -> Result<(GridConfig, f32), ApiError> {
    let words = state.word_list.words();
    match mode {
        GameMode::Classic { stage, index } => {
            let level = ClassicLevel::new(stage, index).ok_or_else(|| {
                ApiError::new(
                    StatusCode::UNPROCESSABLE_ENTITY,
                    "invalid_level",
                    format!("stage {} has no level {}", stage, index),
                )
            })?;
            if !level.is_unlocked(stars) {
                return Err(ApiError::level_locked(format!(
                    "stage {} needs {} stars, player has {}",
                    stage,
                    level.stars_required(),
                    stars
                )));
            }
            Ok((level.config(words), level.time_limit()))
        }
        GameMode::Endless { level } => {
            if level == 0 {
                return Err(ApiError::new(
                    StatusCode::UNPROCESSABLE_ENTITY,
                    "invalid_level",
                    "endless levels start at 1",
                ));
            }
            Ok((
                levels::endless_config(level, words, ENDLESS_START_TIME),
                ENDLESS_START_TIME,
            ))
        }
        GameMode::Custom => {
            let config = config.ok_or(GenerationError::MissingConfig)?;
            let max_time = config.max_time;
            Ok((config, max_time))
        }
    }
}

/// Start a new session with a freshly generated puzzle
pub async fn create_session(
    State(state): State<Arc<AppState>>,
    Json(payload): Json<CreateSessionRequest>,
) -> Result<(StatusCode, Json<SessionSnapshot>), ApiError> {
    let (config, max_time) = session_config(&state, payload.mode, payload.config, payload.stars)?;
    let seed = payload.seed.unwrap_or_else(random_seed);

    let puzzle = build_puzzle(
        &config,
        seed,
        state.config.game.limits,
        &state.config.game.filler_alphabet,
    )
    .await?;

    let session = GameSession::new(payload.mode, puzzle, max_time, state.config.game.max_hints);
    let snapshot = session.snapshot();
    tracing::info!(
        "Created session {} ({:?}, {}s)",
        session.session_id,
        session.mode,
        max_time
    );
    state
        .sessions
        .insert(session.session_id, ActiveSession::new(session));

    Ok((StatusCode::CREATED, Json(snapshot)))
}

pub async fn get_session(
    State(state): State<Arc<AppState>>,
    Path(session_id): Path<Uuid>,
) -> Result<Json<SessionSnapshot>, ApiError> {
    with_session(&state, session_id, |session| Ok(Json(session.snapshot())))
}

pub async fn delete_session(
    State(state): State<Arc<AppState>>,
    Path(session_id): Path<Uuid>,
) -> Result<StatusCode, ApiError> {
    state
        .sessions
        .remove(&session_id)
        .ok_or_else(|| ApiError::session_not_found(session_id))?;
    tracing::info!("Cleared session {}", session_id);
    Ok(StatusCode::NO_CONTENT)
}

pub async fn submit_selection(
    State(state): State<Arc<AppState>>,
    Path(session_id): Path<Uuid>,
    Json(payload): Json<SelectionRequest>,
) -> Result<Json<SelectionResponse>, ApiError> {
    with_session(&state, session_id, |session| {
        let outcome = session.submit_selection(payload.start, payload.end)?;
        Ok(Json(SelectionResponse {
            outcome,
            status: session.status(),
            score: session.score(),
            time_remaining: session.time_remaining().as_secs_f32(),
        }))
    })
}

pub async fn request_hint(
    State(state): State<Arc<AppState>>,
    Path(session_id): Path<Uuid>,
) -> Result<Json<HintResponse>, ApiError> {
    with_session(&state, session_id, |session| {
        let start = session.hint()?;
        Ok(Json(HintResponse {
            start,
            letter: session.puzzle().letter_at(start),
            hints_remaining: session.hints_remaining(),
        }))
    })
}

pub async fn add_time(
    State(state): State<Arc<AppState>>,
    Path(session_id): Path<Uuid>,
    Json(payload): Json<AddTimeRequest>,
) -> Result<Json<SessionSnapshot>, ApiError> {
    with_session(&state, session_id, |session| {
        session.add_time(payload.seconds)?;
        Ok(Json(session.snapshot()))
    })
}

pub async fn pause_session(
    State(state): State<Arc<AppState>>,
    Path(session_id): Path<Uuid>,
) -> Result<Json<SessionSnapshot>, ApiError> {
    with_session(&state, session_id, |session| {
        session.pause()?;
        Ok(Json(session.snapshot()))
    })
}

pub async fn resume_session(
    State(state): State<Arc<AppState>>,
    Path(session_id): Path<Uuid>,
) -> Result<Json<SessionSnapshot>, ApiError> {
    with_session(&state, session_id, |session| {
        session.resume()?;
        Ok(Json(session.snapshot()))
    })
}

pub async fn finish_session(
    State(state): State<Arc<AppState>>,
    Path(session_id): Path<Uuid>,
) -> Result<Json<SessionResult>, ApiError> {
    with_session(&state, session_id, |session| {
        let result = session.force_finish();
        tracing::info!("Session {} finished: {:?}", session_id, result);
        Ok(Json(result))
    })
}

/// Endless mode: generate the next level and move the session onto it
pub async fn next_level(
    State(state): State<Arc<AppState>>,
    Path(session_id): Path<Uuid>,
) -> Result<Json<SessionSnapshot>, ApiError> {
    let config = with_session(&state, session_id, |session| {
        Ok(session.next_level_config(state.word_list.words())?)
    })?;

    let puzzle = build_puzzle(
        &config,
        random_seed(),
        state.config.game.limits,
        &state.config.game.filler_alphabet,
    )
    .await?;

    with_session(&state, session_id, |session| {
        session.start_next_level(puzzle)?;
        Ok(Json(session.snapshot()))
    })
}
