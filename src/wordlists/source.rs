//! Word sources and the fallback picker
//!
//! A `WordSource` may fail for any reason; `WordPicker` then substitutes a word
//! from the embedded fallback vocabulary so a round can always start.

use super::FALLBACK_WORDS;
use super::loader::{load_from_file, words_in_range};
use rand::rngs::StdRng;
use rand::seq::IndexedRandom;
use rand::{Rng, SeedableRng};
use std::io;
use std::path::{Path, PathBuf};
use thiserror::Error;
use tracing::{debug, warn};

/// Default shortest word requested from a source
pub const DEFAULT_MIN_LENGTH: usize = 4;

/// Default longest word requested from a source
pub const DEFAULT_MAX_LENGTH: usize = 10;

/// Why a source could not supply a word
#[derive(Debug, Error)]
pub enum WordSourceError {
    #[error("no word source is configured")]
    Unavailable,
    #[error("no word between {min} and {max} letters is available")]
    NoWordInRange { min: usize, max: usize },
    #[error("failed to read word list {}: {source}", .path.display())]
    Io {
        path: PathBuf,
        #[source]
        source: io::Error,
    },
}

/// Supplier of secret words
pub trait WordSource {
    /// Return a word whose length lies in `min_length..=max_length`
    ///
    /// # Errors
    /// Returns a `WordSourceError` when no suitable word can be produced.
    fn fetch_word(&mut self, min_length: usize, max_length: usize)
    -> Result<String, WordSourceError>;
}

/// Source that never has a word; every round uses the fallback list
#[derive(Debug, Default, Clone, Copy)]
pub struct NoSource;

impl WordSource for NoSource {
    fn fetch_word(&mut self, _: usize, _: usize) -> Result<String, WordSourceError> {
        Err(WordSourceError::Unavailable)
    }
}

/// Random word from an in-memory list
#[derive(Debug, Clone)]
pub struct WordListSource {
    words: Vec<String>,
    rng: StdRng,
}

impl WordListSource {
    #[must_use]
    pub fn new(words: Vec<String>) -> Self {
        Self::with_rng(words, StdRng::from_os_rng())
    }

    #[must_use]
    pub const fn with_rng(words: Vec<String>, rng: StdRng) -> Self {
        Self { words, rng }
    }

    /// Load the list from a newline-separated file
    ///
    /// # Errors
    /// Returns `WordSourceError::Io` if the file cannot be read.
    pub fn from_file(path: &Path) -> Result<Self, WordSourceError> {
        let words = load_from_file(path).map_err(|source| WordSourceError::Io {
            path: path.to_path_buf(),
            source,
        })?;
        debug!(count = words.len(), path = %path.display(), "loaded word list");
        Ok(Self::new(words))
    }
}

impl WordSource for WordListSource {
    fn fetch_word(
        &mut self,
        min_length: usize,
        max_length: usize,
    ) -> Result<String, WordSourceError> {
        let candidates = words_in_range(&self.words, min_length, max_length);
        candidates
            .choose(&mut self.rng)
            .map(|word| (*word).to_string())
            .ok_or(WordSourceError::NoWordInRange {
                min: min_length,
                max: max_length,
            })
    }
}

/// A chosen secret word and where it came from
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PickedWord {
    pub word: String,
    pub from_fallback: bool,
}

/// Draws words from a source, falling back to the embedded list on failure
pub struct WordPicker {
    source: Box<dyn WordSource>,
    rng: StdRng,
    min_length: usize,
    max_length: usize,
}

impl WordPicker {
    #[must_use]
    pub fn new(source: Box<dyn WordSource>, min_length: usize, max_length: usize) -> Self {
        Self::with_rng(source, min_length, max_length, StdRng::from_os_rng())
    }

    #[must_use]
    pub fn with_rng(
        source: Box<dyn WordSource>,
        min_length: usize,
        max_length: usize,
        rng: StdRng,
    ) -> Self {
        Self {
            source,
            rng,
            min_length,
            max_length,
        }
    }

    pub fn pick(&mut self) -> PickedWord {
        match self.source.fetch_word(self.min_length, self.max_length) {
            Ok(word) => {
                debug!(length = word.len(), "word retrieved from source");
                PickedWord {
                    word,
                    from_fallback: false,
                }
            }
            Err(e) => {
                if matches!(e, WordSourceError::Unavailable) {
                    debug!("{e}; using fallback word");
                } else {
                    warn!("{e}; using fallback word");
                }
                PickedWord {
                    word: fallback_word(&mut self.rng).to_string(),
                    from_fallback: true,
                }
            }
        }
    }

    /// Mutable access to the RNG, shared with password generation
    pub fn rng(&mut self) -> &mut StdRng {
        &mut self.rng
    }
}

/// Uniformly random word from the embedded fallback vocabulary
pub fn fallback_word<R: Rng + ?Sized>(rng: &mut R) -> &'static str {
    FALLBACK_WORDS[rng.random_range(0..FALLBACK_WORDS.len())]
}

#[cfg(test)]
mod tests {
    use super::*;

    fn seeded() -> StdRng {
        StdRng::seed_from_u64(11)
    }

    fn list(words: &[&str]) -> Vec<String> {
        words.iter().map(ToString::to_string).collect()
    }

    #[test]
    fn list_source_respects_length_range() {
        let mut source =
            WordListSource::with_rng(list(&["CAT", "HOUSE", "ELEPHANTS"]), seeded());
        for _ in 0..20 {
            assert_eq!(source.fetch_word(4, 6).unwrap(), "HOUSE");
        }
        assert!(matches!(
            source.fetch_word(10, 12),
            Err(WordSourceError::NoWordInRange { min: 10, max: 12 })
        ));
    }

    #[test]
    fn empty_list_has_nothing_to_offer() {
        let mut source = WordListSource::with_rng(Vec::new(), seeded());
        assert!(source.fetch_word(1, 20).is_err());
    }

    #[test]
    fn missing_file_is_an_io_error() {
        let dir = tempfile::tempdir().unwrap();
        let err = WordListSource::from_file(&dir.path().join("nope.txt")).unwrap_err();
        assert!(matches!(err, WordSourceError::Io { .. }));
    }

    #[test]
    fn picker_uses_source_when_it_succeeds() {
        let source = WordListSource::with_rng(list(&["RUSTY"]), seeded());
        let mut picker = WordPicker::with_rng(Box::new(source), 4, 10, seeded());
        assert_eq!(
            picker.pick(),
            PickedWord {
                word: "RUSTY".to_string(),
                from_fallback: false
            }
        );
    }

    #[test]
    fn picker_falls_back_when_source_fails() {
        let mut picker = WordPicker::with_rng(Box::new(NoSource), 4, 10, seeded());
        for _ in 0..10 {
            let picked = picker.pick();
            assert!(picked.from_fallback);
            assert!(FALLBACK_WORDS.contains(&picked.word.as_str()));
        }
    }

    #[test]
    fn picker_falls_back_when_range_is_empty() {
        let source = WordListSource::with_rng(list(&["CAT"]), seeded());
        let mut picker = WordPicker::with_rng(Box::new(source), 4, 10, seeded());
        assert!(picker.pick().from_fallback);
    }
}
