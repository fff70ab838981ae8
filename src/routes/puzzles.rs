use std::sync::Arc;

use axum::{extract::State, Json};
use rand::Rng;
use serde::{Deserialize, Serialize};

use crate::{
    game::{GenerationError, GenerationLimits, GridGenerator, WordOutcome},
    models::{GridConfig, Puzzle},
    routes::error::ApiError,
    utils::letters::FillerAlphabet,
    AppState,
};

#[derive(Debug, Deserialize)]
pub struct GeneratePuzzleRequest {
    pub config: Option<GridConfig>,
    /// Random seed; a fresh one is drawn when absent
    pub seed: Option<u64>,
}

#[derive(Debug, Serialize)]
pub struct PuzzleResponse {
    pub puzzle: Puzzle,
    /// Fewer words were placed than requested
    pub shortfall: bool,
}

/// Generate a standalone puzzle from a caller supplied config
pub async fn generate_puzzle(
    State(state): State<Arc<AppState>>,
    Json(payload): Json<GeneratePuzzleRequest>,
) -> Result<Json<PuzzleResponse>, ApiError> {
    let config = payload.config.ok_or(GenerationError::MissingConfig)?;
    let seed = payload.seed.unwrap_or_else(random_seed);

    let puzzle = build_puzzle(
        &config,
        seed,
        state.config.game.limits,
        &state.config.game.filler_alphabet,
    )
    .await?;

    Ok(Json(PuzzleResponse {
        shortfall: puzzle.is_shortfall(),
        puzzle,
    }))
}

pub fn random_seed() -> u64 {
    rand::rng().random()
}

/// Runs a generation one word at a time, yielding to the runtime between words
pub async fn build_puzzle(
    config: &GridConfig,
    seed: u64,
    limits: GenerationLimits,
    alphabet: &FillerAlphabet,
) -> Result<Puzzle, GenerationError> {
    let mut generator = GridGenerator::new(limits, alphabet.clone());
    generator.begin(config, seed)?;

    while let Some(outcome) = generator.step() {
        match outcome {
            WordOutcome::Placed { word, attempts } => tracing::debug!(
                "Placed '{}' from ({}, {}) to ({}, {}) after {} attempts",
                word.word,
                word.start.x,
                word.start.y,
                word.end.x,
                word.end.y,
                attempts
            ),
            WordOutcome::Abandoned { word, dropped } => tracing::debug!(
                "Run with seed {} abandoned '{}' and {} more",
                seed,
                word,
                dropped - 1
            ),
        }
        tokio::task::yield_now().await;
    }

    let puzzle = generator.finish()?;
    tracing::info!(
        "Generated {}x{} puzzle with {} of {} words (seed {})",
        puzzle.width,
        puzzle.height,
        puzzle.words.len(),
        puzzle.requested_words,
        seed
    );
    Ok(puzzle)
}
