use thiserror::Error;

use crate::session::SessionStatus;

/// Recoverable errors returned synchronously by session transitions.
///
/// None of these are fatal; the caller shows feedback and keeps the
/// previous session value.
#[derive(Debug, Error, Clone, PartialEq, Eq)]
#[non_exhaustive]
pub enum SessionError {
    #[error("no content available for session")]
    EmptyContent,

    #[error("index {index} is out of range for {len} items")]
    InvalidIndex { index: usize, len: usize },

    #[error("item {index} is already resolved")]
    AlreadyResolved { index: usize },

    #[error("option {option} is out of range for {options} options")]
    InvalidOption { option: usize, options: usize },

    #[error("card {position} cannot be flipped twice in one move")]
    SameCard { position: usize },

    #[error("board is still showing the last mismatch")]
    BoardLocked,

    #[error("session is not running (status: {status})")]
    NotRunning { status: SessionStatus },

    #[error("session is not paused (status: {status})")]
    NotPaused { status: SessionStatus },

    #[error("session has already started (status: {status})")]
    AlreadyStarted { status: SessionStatus },
}
