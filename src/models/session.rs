use serde::{Deserialize, Serialize};

use super::Coordinate;

/// How a session's puzzles are chosen
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq)]
#[serde(tag = "type", rename_all = "snake_case")]
pub enum GameMode {
    /// A fixed level from the staged level selection
    Classic { stage: u32, index: u32 },
    /// Ever larger grids, carrying the remaining time over
    Endless { level: u32 },
    /// A caller supplied grid config
    Custom,
}

#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "snake_case")]
pub enum SessionStatus {
    Active,
    Paused,
    /// Every word was found
    Completed,
    /// The countdown ran out or the game was finished early
    GameOver,
}

impl SessionStatus {
    pub fn is_finished(self) -> bool {
        matches!(self, SessionStatus::Completed | SessionStatus::GameOver)
    }
}

/// What a single start/end selection turned out to be
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
#[serde(tag = "result", rename_all = "snake_case")]
pub enum SelectionOutcome {
    Found {
        word: String,
        start: Coordinate,
        end: Coordinate,
    },
    AlreadyFound {
        word: String,
    },
    NotFound {
        selected: String,
    },
}

impl SelectionOutcome {
    pub fn is_correct(&self) -> bool {
        matches!(self, SelectionOutcome::Found { .. })
    }
}

/// End of game summary
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct SessionResult {
    /// Seconds spent playing, pauses excluded
    pub time_taken: f32,
    pub correct_selections: u32,
    pub wrong_selections: u32,
    pub stars: u8,
    pub score: i32,
}
