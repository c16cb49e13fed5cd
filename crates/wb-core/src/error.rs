//! Error types for the word caller.

use std::path::PathBuf;

/// Errors that can occur while loading words or driving a roll.
///
/// None of these are fatal once the session is running: roll and audio
/// errors are reported to the caller only so it can decide to ignore them.
#[derive(Debug, thiserror::Error)]
pub enum BingoError {
    /// A draw was requested with no words left in the pool.
    #[error("no words left to draw")]
    EmptyPool,

    /// A roll was requested while another roll is still scrambling.
    #[error("a roll is already in progress")]
    RollInProgress,

    /// The audio output is missing or in a state that cannot play a tone.
    #[error("audio unavailable: {0}")]
    AudioUnavailable(String),

    /// A view tried to animate before its display area was ready.
    #[error("display area not ready")]
    AnimationTargetMissing,

    /// The word list file could not be read.
    #[error("cannot read word list {path}: {source}")]
    Io {
        /// The file that failed.
        path: PathBuf,
        /// Underlying IO error.
        source: std::io::Error,
    },

    /// The word list content is malformed.
    #[error("invalid word list: {0}")]
    InvalidWordList(String),
}

/// Convenience result type for word caller operations.
pub type BingoResult<T> = Result<T, BingoError>;
