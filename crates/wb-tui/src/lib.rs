//! Terminal presentation shell for the Wordbingo caller.
//!
//! Provides a ratatui-based stage showing the current word, a review list
//! of called words, presentation mode, an audible roll cue, and confetti.

pub mod app;
pub mod audio;
pub mod confetti;
pub mod input;
pub mod logging;
pub mod shared;
pub mod terminal;
pub mod views;
