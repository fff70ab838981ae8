use std::time::Duration;

use chrono::{DateTime, Utc};
use serde::Serialize;
use thiserror::Error;
use uuid::Uuid;

use crate::{
    game::{levels, scorer::Scorer, validator::SelectionValidator},
    models::{
        Coordinate, GameMode, GridConfig, Puzzle, SelectionOutcome, SessionResult, SessionStatus,
    },
};

#[derive(Debug, Error, Clone, PartialEq)]
pub enum SessionError {
    #[error("session is not active")]
    NotActive,
    #[error("selection from ({}, {}) to ({}, {}) is not a straight line inside the grid", start.x, start.y, end.x, end.y)]
    InvalidSelection { start: Coordinate, end: Coordinate },
    #[error("{0} is not a valid number of seconds")]
    InvalidTime(f32),
    #[error("hint limit of {0} reached")]
    HintLimitReached(u32),
    #[error("every word has already been found")]
    NoWordsRemaining,
    #[error("only endless sessions advance to a next level")]
    NotEndless,
    #[error("the current level is not complete")]
    LevelNotComplete,
}

/// A word as the player sees it; coordinates are only revealed once found
#[derive(Debug, Clone, Serialize)]
pub struct WordStatus {
    pub word: String,
    pub found: bool,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub start: Option<Coordinate>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub end: Option<Coordinate>,
}

#[derive(Debug, Clone, Serialize)]
pub struct SessionSnapshot {
    pub session_id: Uuid,
    pub mode: GameMode,
    pub status: SessionStatus,
    pub width: i32,
    pub height: i32,
    pub grid: Vec<Vec<char>>,
    pub words: Vec<WordStatus>,
    pub time_remaining: f32,
    pub time_taken: f32,
    pub correct_selections: u32,
    pub wrong_selections: u32,
    pub score: i32,
    pub hints_remaining: u32,
    pub created_at: DateTime<Utc>,
}

/// One played puzzle: countdown, found words, hints and selection counters
#[derive(Debug, Clone)]
pub struct GameSession {
    pub session_id: Uuid,
    pub mode: GameMode,
    pub created_at: DateTime<Utc>,
    puzzle: Puzzle,
    found: Vec<bool>,
    status: SessionStatus,
    /// Countdown the current level started with, in seconds
    max_time: f32,
    time_remaining: Duration,
    time_taken: Duration,
    correct_selections: u32,
    wrong_selections: u32,
    score: i32,
    hints_used: u32,
    max_hints: u32,
}

impl GameSession {
    pub fn new(mode: GameMode, puzzle: Puzzle, max_time: f32, max_hints: u32) -> Self {
        let found = vec![false; puzzle.words.len()];
        Self {
            session_id: Uuid::new_v4(),
            mode,
            created_at: Utc::now(),
            puzzle,
            found,
            status: SessionStatus::Active,
            max_time,
            time_remaining: Duration::try_from_secs_f32(max_time).unwrap_or(Duration::ZERO),
            time_taken: Duration::ZERO,
            correct_selections: 0,
            wrong_selections: 0,
            score: 0,
            hints_used: 0,
            max_hints,
        }
    }

    pub fn status(&self) -> SessionStatus {
        self.status
    }

    pub fn puzzle(&self) -> &Puzzle {
        &self.puzzle
    }

    pub fn score(&self) -> i32 {
        self.score
    }

    pub fn time_remaining(&self) -> Duration {
        self.time_remaining
    }

    pub fn hints_remaining(&self) -> u32 {
        self.max_hints.saturating_sub(self.hints_used)
    }

    /// Runs the countdown. Paused and finished sessions ignore the elapsed time.
    pub fn advance(&mut self, elapsed: Duration) {
        if self.status != SessionStatus::Active {
            return;
        }

        self.time_taken += elapsed;
        self.time_remaining = self.time_remaining.saturating_sub(elapsed);
        if self.time_remaining.is_zero() {
            tracing::info!("Session {} ran out of time", self.session_id);
            self.status = SessionStatus::GameOver;
        }
    }

    pub fn pause(&mut self) -> Result<(), SessionError> {
        match self.status {
            SessionStatus::Active | SessionStatus::Paused => {
                self.status = SessionStatus::Paused;
                Ok(())
            }
            _ => Err(SessionError::NotActive),
        }
    }

    pub fn resume(&mut self) -> Result<(), SessionError> {
        match self.status {
            SessionStatus::Active | SessionStatus::Paused => {
                self.status = SessionStatus::Active;
                Ok(())
            }
            _ => Err(SessionError::NotActive),
        }
    }

    /// Adds seconds to the countdown; negative values take time away.
    /// Taking away more than is left ends the game.
    pub fn add_time(&mut self, seconds: f32) -> Result<(), SessionError> {
        if self.status.is_finished() {
            return Err(SessionError::NotActive);
        }
        let amount = Duration::try_from_secs_f32(seconds.abs())
            .map_err(|_| SessionError::InvalidTime(seconds))?;
        self.shift_time(amount, seconds >= 0.0);
        Ok(())
    }

    fn shift_time(&mut self, amount: Duration, gain: bool) {
        if gain {
            self.time_remaining = self.time_remaining.saturating_add(amount);
        } else if amount > self.time_remaining {
            self.time_remaining = Duration::ZERO;
            tracing::info!("Session {} lost its remaining time", self.session_id);
            self.status = SessionStatus::GameOver;
        } else {
            self.time_remaining -= amount;
        }
    }

    /// Checks the letters between `start` and `end` against the hidden words
    pub fn submit_selection(
        &mut self,
        start: Coordinate,
        end: Coordinate,
    ) -> Result<SelectionOutcome, SessionError> {
        if self.status != SessionStatus::Active {
            return Err(SessionError::NotActive);
        }

        let selected = SelectionValidator::extract_word(&self.puzzle, start, end)
            .ok_or(SessionError::InvalidSelection { start, end })?;

        let outcome =
            match SelectionValidator::find_word(&self.puzzle.words, &self.found, &selected) {
                Some(index) if !self.found[index] => {
                    self.found[index] = true;
                    let placed = &self.puzzle.words[index];
                    SelectionOutcome::Found {
                        word: placed.word.clone(),
                        start: placed.start,
                        end: placed.end,
                    }
                }
                Some(index) => SelectionOutcome::AlreadyFound {
                    word: self.puzzle.words[index].word.clone(),
                },
                None => SelectionOutcome::NotFound { selected },
            };

        let correct = outcome.is_correct();
        if correct {
            self.correct_selections += 1;
        } else {
            self.wrong_selections += 1;
        }

        if let GameMode::Endless { level } = self.mode {
            let tier = Scorer::endless_tier(level);
            self.score = Scorer::add_points(self.score, Scorer::selection_points(tier, correct));
            let bonus = Duration::from_secs(tier.timer_bonus.unsigned_abs());
            self.shift_time(bonus, correct);
        }

        if correct && self.status == SessionStatus::Active && self.found.iter().all(|f| *f) {
            tracing::info!(
                "Session {} found all {} words",
                self.session_id,
                self.found.len()
            );
            self.status = SessionStatus::Completed;
        }

        Ok(outcome)
    }

    /// Start coordinate of the first word not found yet
    pub fn hint(&mut self) -> Result<Coordinate, SessionError> {
        if self.status.is_finished() {
            return Err(SessionError::NotActive);
        }
        if self.hints_used >= self.max_hints {
            return Err(SessionError::HintLimitReached(self.max_hints));
        }

        let index = self
            .found
            .iter()
            .position(|found| !found)
            .ok_or(SessionError::NoWordsRemaining)?;

        self.hints_used += 1;
        Ok(self.puzzle.words[index].start)
    }

    /// Ends the game now, keeping `Completed` if every word was already found
    pub fn force_finish(&mut self) -> SessionResult {
        if !self.status.is_finished() {
            self.status = SessionStatus::GameOver;
        }
        self.result()
    }

    pub fn result(&self) -> SessionResult {
        let stars = match (self.status, self.mode) {
            (SessionStatus::Completed, GameMode::Endless { .. }) => 0,
            (SessionStatus::Completed, _) => {
                Scorer::stars(self.max_time, self.time_taken.as_secs_f32())
            }
            _ => 0,
        };

        SessionResult {
            time_taken: self.time_taken.as_secs_f32(),
            correct_selections: self.correct_selections,
            wrong_selections: self.wrong_selections,
            stars,
            score: self.score,
        }
    }

    /// Config of the following endless level, carrying the remaining time
    pub fn next_level_config(&self, words: &[String]) -> Result<GridConfig, SessionError> {
        let GameMode::Endless { level } = self.mode else {
            return Err(SessionError::NotEndless);
        };
        if self.status != SessionStatus::Completed {
            return Err(SessionError::LevelNotComplete);
        }
        Ok(levels::endless_config(
            level.saturating_add(1),
            words,
            self.time_remaining.as_secs_f32(),
        ))
    }

    /// Moves a completed endless session onto its next puzzle.
    /// Score and remaining time carry over; per-level counters start again.
    pub fn start_next_level(&mut self, puzzle: Puzzle) -> Result<(), SessionError> {
        let GameMode::Endless { level } = self.mode else {
            return Err(SessionError::NotEndless);
        };
        if self.status != SessionStatus::Completed {
            return Err(SessionError::LevelNotComplete);
        }

        let next = level.saturating_add(1);
        self.mode = GameMode::Endless { level: next };
        self.found = vec![false; puzzle.words.len()];
        self.puzzle = puzzle;
        self.max_time = self.time_remaining.as_secs_f32();
        self.time_taken = Duration::ZERO;
        self.correct_selections = 0;
        self.wrong_selections = 0;
        self.status = SessionStatus::Active;

        tracing::info!("Session {} advanced to endless level {}", self.session_id, next);
        Ok(())
    }

    pub fn snapshot(&self) -> SessionSnapshot {
        let words = self
            .puzzle
            .words
            .iter()
            .zip(&self.found)
            .map(|(placed, &found)| WordStatus {
                word: placed.word.clone(),
                found,
                start: found.then_some(placed.start),
                end: found.then_some(placed.end),
            })
            .collect();

        SessionSnapshot {
            session_id: self.session_id,
            mode: self.mode,
            status: self.status,
            width: self.puzzle.width,
            height: self.puzzle.height,
            grid: self.puzzle.grid.clone(),
            words,
            time_remaining: self.time_remaining.as_secs_f32(),
            time_taken: self.time_taken.as_secs_f32(),
            correct_selections: self.correct_selections,
            wrong_selections: self.wrong_selections,
            score: self.score,
            hints_remaining: self.hints_remaining(),
            created_at: self.created_at,
        }
    }
}
