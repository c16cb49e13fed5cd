//! Startup word list loading and normalization.

use std::collections::HashSet;
use std::path::Path;

use serde::Deserialize;

use crate::error::{BingoError, BingoResult};

/// The word list compiled into the binary, used when no file is given.
const BUILTIN_WORDS: &str = include_str!("../data/words.json");

/// On-disk shapes accepted for a word list.
#[derive(Deserialize)]
#[serde(untagged)]
enum WordSource {
    Object { words: Vec<String> },
    Bare(Vec<String>),
}

/// An ordered, deduplicated list of non-empty words.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct WordList {
    words: Vec<String>,
}

impl WordList {
    /// Build a list from raw entries, trimming them and dropping empty
    /// entries and later duplicates.
    pub fn new<I, S>(entries: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: AsRef<str>,
    {
        let mut seen = HashSet::new();
        let mut words = Vec::new();
        for entry in entries {
            let word = entry.as_ref().trim();
            if word.is_empty() {
                tracing::warn!("dropping empty word list entry");
                continue;
            }
            if !seen.insert(word.to_string()) {
                tracing::warn!(word, "dropping duplicate word list entry");
                continue;
            }
            words.push(word.to_string());
        }
        Self { words }
    }

    /// Parse a JSON word list, either `{"words": [...]}` or a bare array.
    pub fn from_json_str(json: &str) -> BingoResult<Self> {
        let source: WordSource = serde_json::from_str(json)
            .map_err(|e| BingoError::InvalidWordList(e.to_string()))?;
        let entries = match source {
            WordSource::Object { words } | WordSource::Bare(words) => words,
        };
        Ok(Self::new(entries))
    }

    /// Read and parse a JSON word list from disk.
    pub fn load(path: &Path) -> BingoResult<Self> {
        let json = std::fs::read_to_string(path).map_err(|source| BingoError::Io {
            path: path.to_path_buf(),
            source,
        })?;
        let list = Self::from_json_str(&json)?;
        tracing::info!(path = %path.display(), count = list.len(), "loaded word list");
        Ok(list)
    }

    /// The default list shipped with the binary.
    pub fn builtin() -> Self {
        // Parsing the embedded file is covered by `builtin_list_is_populated`.
        Self::from_json_str(BUILTIN_WORDS).unwrap_or_default()
    }

    /// The words in order.
    pub fn words(&self) -> &[String] {
        &self.words
    }

    /// Number of words.
    pub fn len(&self) -> usize {
        self.words.len()
    }

    /// Returns true if the list has no words.
    pub fn is_empty(&self) -> bool {
        self.words.is_empty()
    }

    /// Consume the list, returning the words.
    pub fn into_words(self) -> Vec<String> {
        self.words
    }
}
