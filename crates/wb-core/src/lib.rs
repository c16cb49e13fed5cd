//! Word pool and roll state machine for the Wordbingo caller.
//!
//! Provides the word list loader, a draw-without-replacement word pool,
//! scramble token generation with a cancellable timer, and the
//! idle/rolling/settled state machine that ties them together.

pub mod error;
pub mod pool;
pub mod roll;
pub mod scramble;
pub mod words;

pub use error::{BingoError, BingoResult};
pub use pool::WordPool;
pub use roll::{PLACEHOLDER, RollMachine, RollOutcome, RollSession, RollStatus, TickEvent};
pub use scramble::{ALPHABET, SCRAMBLE_DURATION, SCRAMBLE_TICK, ScrambleTimer, TimerStep, scramble_token};
pub use words::WordList;
