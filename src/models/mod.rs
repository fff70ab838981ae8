pub mod puzzle;
pub mod session;

pub use puzzle::{
    // Generator input/output
    Coordinate, DirectionFlags, GridConfig, PlacedWord, Puzzle,
};
pub use session::{
    // Play state
    GameMode, SelectionOutcome, SessionResult, SessionStatus,
};
