//! The word pool: draw without replacement and reset.

use rand::Rng;

use crate::error::{BingoError, BingoResult};
use crate::words::WordList;

/// Words not yet called, plus the ordered history of called words.
///
/// Every word of the original list is in exactly one of `available` and
/// `called` at all times.
#[derive(Debug, Clone, Default)]
pub struct WordPool {
    original: Vec<String>,
    available: Vec<String>,
    called: Vec<String>,
}

impl WordPool {
    /// Create a pool holding every word of the list.
    pub fn new(list: WordList) -> Self {
        let original = list.into_words();
        Self {
            available: original.clone(),
            original,
            called: Vec::new(),
        }
    }

    /// Draw one word uniformly at random, moving it to the called list.
    ///
    /// Each draw samples independently over whatever is left, so the
    /// distribution does not depend on earlier draws.
    pub fn draw<R: Rng + ?Sized>(&mut self, rng: &mut R) -> BingoResult<String> {
        if self.available.is_empty() {
            return Err(BingoError::EmptyPool);
        }
        let index = rng.random_range(0..self.available.len());
        let word = self.available.remove(index);
        self.called.push(word.clone());
        Ok(word)
    }

    /// Restore every word to the available list and forget the history.
    pub fn reset(&mut self) {
        self.available = self.original.clone();
        self.called.clear();
    }

    /// Number of words still available.
    pub fn remaining_count(&self) -> usize {
        self.available.len()
    }

    /// Number of words called so far.
    pub fn called_count(&self) -> usize {
        self.called.len()
    }

    /// Returns true when nothing is left to draw.
    pub fn is_exhausted(&self) -> bool {
        self.available.is_empty()
    }

    /// Words still available, in original order.
    pub fn available(&self) -> &[String] {
        &self.available
    }

    /// Words called so far, in call order.
    pub fn called(&self) -> &[String] {
        &self.called
    }

    /// The full list the pool was created from.
    pub fn original(&self) -> &[String] {
        &self.original
    }
}
