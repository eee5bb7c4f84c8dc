//! Error types for the playback facade

use std::path::PathBuf;

use thiserror::Error;

#[derive(Debug, Error)]
pub enum PlayerError {
    /// A command was issued before `setup()`.
    #[error("player has not been set up")]
    NotSetUp,

    /// The engine thread is gone.
    #[error("playback engine is not running")]
    Disconnected,

    #[error("audio output unavailable: {0}")]
    Output(String),

    #[error("track index {index} is out of range for a queue of {len}")]
    IndexOutOfRange { index: usize, len: usize },

    #[error("invalid seek position: {0}s")]
    InvalidSeek(f64),

    #[error("cannot play {path:?}: {reason}")]
    TrackUnavailable { path: PathBuf, reason: String },
}

/// Result type for facade commands
pub type Result<T> = std::result::Result<T, PlayerError>;
