//! Error type for bracket construction, addressing and state decoding

use crate::address::MAX_LEAVES;

/// Errors raised by the bracket engine
#[derive(Debug, thiserror::Error)]
pub enum BracketError {
    #[error("a bracket needs at least one player")]
    NoPlayers,

    #[error("{0} players do not fit in a bracket (max {max})", max = MAX_LEAVES)]
    TooManyPlayers(usize),

    #[error("{players} players were given {seeds} seeds")]
    SeedCountMismatch { players: usize, seeds: usize },

    #[error("{0} is not a supported elimination type")]
    InvalidEliminationType(i32),

    #[error("malformed seat id: {0:?}")]
    InvalidSeatId(String),

    #[error("slot {0} lies outside the bracket")]
    OutOfBounds(String),

    #[error("bracket state is corrupt: {0}")]
    StateCorruption(String),

    #[error("state snapshot could not be (de)serialized: {0}")]
    Snapshot(#[from] serde_json::Error),
}

/// Result alias for bracket operations
pub type Result<T> = std::result::Result<T, BracketError>;
