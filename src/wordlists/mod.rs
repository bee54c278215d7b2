//! Word lists for hangman rounds
//!
//! An embedded fallback vocabulary compiled into the binary, a file loader, and
//! the `WordSource` seam the game draws secret words from.

mod embedded;
pub mod loader;
pub mod source;

pub use embedded::{FALLBACK_WORDS, FALLBACK_WORDS_COUNT};
pub use source::{
    DEFAULT_MAX_LENGTH, DEFAULT_MIN_LENGTH, NoSource, PickedWord, WordListSource, WordPicker,
    WordSource, WordSourceError, fallback_word,
};
