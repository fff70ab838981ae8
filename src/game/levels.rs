use crate::models::{DirectionFlags, GridConfig};

/// Stages in the level selection; the last one plays on 11x11 grids
pub const STAGES: u32 = 9;
/// Levels shown per stage in the level selection
pub const LEVELS_PER_STAGE: u32 = 9;
/// Stars needed per stage already behind the player
pub const STARS_PER_STAGE: u32 = 15;
/// Countdown seconds granted per grid row in classic mode
pub const SECONDS_PER_ROW: f32 = 10.0;
/// Countdown at the start of an endless run
pub const ENDLESS_START_TIME: f32 = 31.0;
/// Endless grids stop growing at this size
pub const MAX_ENDLESS_GRID: i32 = 11;

/// A level from the staged level selection
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ClassicLevel {
    pub stage: u32,
    pub index: u32,
}

impl ClassicLevel {
    /// `stage` runs from 1 to `STAGES`, `index` is the position inside the stage
    pub fn new(stage: u32, index: u32) -> Option<Self> {
        if stage == 0 || stage > STAGES || index >= LEVELS_PER_STAGE {
            return None;
        }
        Some(Self { stage, index })
    }

    /// Grids are square; this is also the number of words
    pub fn grid_size(&self) -> i32 {
        self.stage as i32 + 2
    }

    pub fn stars_required(&self) -> u32 {
        STARS_PER_STAGE * (self.stage - 1)
    }

    pub fn is_unlocked(&self, player_stars: u32) -> bool {
        player_stars >= self.stars_required()
    }

    pub fn time_limit(&self) -> f32 {
        self.grid_size() as f32 * SECONDS_PER_ROW
    }

    pub fn config(&self, words: &[String]) -> GridConfig {
        let size = self.grid_size();
        GridConfig {
            width: size,
            height: size,
            directions: DirectionFlags::forward(),
            word_count: size as usize,
            possible_words: words.to_vec(),
            max_time: self.time_limit(),
        }
    }
}

/// Endless levels start at 1 with a 3x3 grid and grow one row per level
pub fn endless_grid_size(level: u32) -> i32 {
    level.saturating_add(2).clamp(3, MAX_ENDLESS_GRID as u32) as i32
}

/// Grid config for an endless level. `max_time` is whatever is left on the clock.
pub fn endless_config(level: u32, words: &[String], max_time: f32) -> GridConfig {
    let size = endless_grid_size(level);
    GridConfig {
        width: size,
        height: size,
        directions: DirectionFlags::forward(),
        word_count: size as usize,
        possible_words: words.to_vec(),
        max_time,
    }
}
