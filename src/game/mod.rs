// Puzzle generation and play

pub mod board;
pub mod direction;
pub mod generator;
pub mod levels;
pub mod scorer;
pub mod session;
pub mod validator;

pub use generator::{GenerationError, GenerationLimits, GridGenerator, WordOutcome};
pub use session::{GameSession, SessionError, SessionSnapshot};
