//! Session and store error types

use brackets_core::BracketError;

use crate::store::BracketId;

/// Errors raised by a bracket store
#[derive(Debug, thiserror::Error)]
pub enum StoreError {
    #[error("store I/O failed: {0}")]
    Io(#[from] std::io::Error),

    #[error("store file is not valid JSON: {0}")]
    Serde(#[from] serde_json::Error),

    #[error("no bracket with id {0}")]
    NotFound(BracketId),
}

/// Result type for store operations
pub type StoreResult<T> = Result<T, StoreError>;

/// Errors raised by session operations
#[derive(Debug, thiserror::Error)]
pub enum SessionError {
    #[error("no bracket has been created")]
    BracketNotCreated,

    #[error(transparent)]
    Bracket(#[from] BracketError),

    #[error(transparent)]
    Store(#[from] StoreError),
}

/// Result type for session operations
pub type SessionResult<T> = Result<T, SessionError>;
