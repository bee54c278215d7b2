//! Hangman round state machine
//!
//! A `GameSession` tracks a single round: the hidden word, every letter guessed so
//! far, and the remaining lives. It starts `InProgress` and moves to either `Won`
//! or `Lost`, both terminal.

use rustc_hash::FxHashSet;
use thiserror::Error;

/// Lives at the start of every round (one per gallows stage)
pub const STARTING_LIVES: u8 = 6;

/// Placeholder shown for letters not yet revealed
pub const MASK_PLACEHOLDER: char = '_';

/// Round lifecycle
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum GameStatus {
    InProgress,
    Won,
    Lost,
}

impl GameStatus {
    #[must_use]
    pub const fn is_terminal(self) -> bool {
        !matches!(self, Self::InProgress)
    }
}

/// Result of a single accepted guess
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum GuessOutcome {
    AlreadyGuessed,
    Correct,
    Incorrect,
}

/// Errors raised when starting or driving a round
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum GameError {
    #[error("the word to guess must not be empty")]
    EmptyWord,
    #[error("the word to guess must contain only letters, got {0:?}")]
    InvalidWord(String),
    #[error("'{0}' is not a letter")]
    NotALetter(char),
    #[error("the round is already over")]
    AlreadyComplete,
}

/// Per-round summary numbers
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct GameStats {
    pub total_guesses: usize,
    pub correct_guesses: usize,
    pub wrong_guesses: usize,
    pub lives_remaining: u8,
    pub completion_percent: f64,
}

/// State of one hangman round
#[derive(Debug, Clone)]
pub struct GameSession {
    word: String,
    letters: FxHashSet<char>,
    guessed: Vec<char>,
    correct: FxHashSet<char>,
    wrong: Vec<char>,
    lives: u8,
    status: GameStatus,
}

impl GameSession {
    /// Start a round for `word`, normalized to uppercase
    ///
    /// # Errors
    /// Returns `GameError::EmptyWord` for blank input and `GameError::InvalidWord`
    /// if the word contains anything other than ASCII letters.
    ///
    /// # Examples
    /// ```
    /// use hangman::core::GameSession;
    ///
    /// let game = GameSession::start("cat").unwrap();
    /// assert_eq!(game.word(), "CAT");
    /// assert_eq!(game.render_mask(), "___");
    /// assert!(GameSession::start("  ").is_err());
    /// ```
    pub fn start(word: &str) -> Result<Self, GameError> {
        let word = word.trim().to_ascii_uppercase();

        if word.is_empty() {
            return Err(GameError::EmptyWord);
        }
        if !word.chars().all(|c| c.is_ascii_alphabetic()) {
            return Err(GameError::InvalidWord(word));
        }

        let letters = word.chars().collect();

        Ok(Self {
            word,
            letters,
            guessed: Vec::new(),
            correct: FxHashSet::default(),
            wrong: Vec::new(),
            lives: STARTING_LIVES,
            status: GameStatus::InProgress,
        })
    }

    /// Apply a single-letter guess
    ///
    /// Repeated letters are reported as `AlreadyGuessed` and leave the state untouched.
    ///
    /// # Errors
    /// Returns `GameError::NotALetter` for non-alphabetic input and
    /// `GameError::AlreadyComplete` once the round has been won or lost.
    pub fn guess(&mut self, letter: char) -> Result<GuessOutcome, GameError> {
        if self.status.is_terminal() {
            return Err(GameError::AlreadyComplete);
        }
        if !letter.is_ascii_alphabetic() {
            return Err(GameError::NotALetter(letter));
        }

        let letter = letter.to_ascii_uppercase();
        if self.has_guessed(letter) {
            return Ok(GuessOutcome::AlreadyGuessed);
        }
        self.guessed.push(letter);

        if self.letters.contains(&letter) {
            self.correct.insert(letter);
            if self.letters.is_subset(&self.correct) {
                self.status = GameStatus::Won;
            }
            Ok(GuessOutcome::Correct)
        } else {
            self.wrong.push(letter);
            self.lives = self.lives.saturating_sub(1);
            if self.lives == 0 {
                self.status = GameStatus::Lost;
            }
            Ok(GuessOutcome::Incorrect)
        }
    }

    /// The word with unrevealed positions replaced by `MASK_PLACEHOLDER`
    #[must_use]
    pub fn render_mask(&self) -> String {
        self.word
            .chars()
            .map(|c| {
                if self.correct.contains(&c) {
                    c
                } else {
                    MASK_PLACEHOLDER
                }
            })
            .collect()
    }

    #[inline]
    #[must_use]
    pub fn word(&self) -> &str {
        &self.word
    }

    #[inline]
    #[must_use]
    pub const fn lives(&self) -> u8 {
        self.lives
    }

    #[inline]
    #[must_use]
    pub const fn status(&self) -> GameStatus {
        self.status
    }

    #[inline]
    #[must_use]
    pub const fn is_complete(&self) -> bool {
        self.status.is_terminal()
    }

    #[inline]
    #[must_use]
    pub fn is_won(&self) -> bool {
        self.status == GameStatus::Won
    }

    /// Whether `letter` (any case) was already guessed
    #[must_use]
    pub fn has_guessed(&self, letter: char) -> bool {
        self.guessed.contains(&letter.to_ascii_uppercase())
    }

    /// Every guessed letter, in the order guessed
    #[must_use]
    pub fn guessed_letters(&self) -> &[char] {
        &self.guessed
    }

    /// Guessed letters absent from the word, in the order guessed
    #[must_use]
    pub fn wrong_guesses(&self) -> &[char] {
        &self.wrong
    }

    /// Guessed letters present in the word, sorted
    #[must_use]
    pub fn correct_guesses(&self) -> Vec<char> {
        let mut letters: Vec<char> = self.correct.iter().copied().collect();
        letters.sort_unstable();
        letters
    }

    #[must_use]
    pub fn stats(&self) -> GameStats {
        GameStats {
            total_guesses: self.guessed.len(),
            correct_guesses: self.correct.len(),
            wrong_guesses: self.wrong.len(),
            lives_remaining: self.lives,
            completion_percent: self.correct.len() as f64 / self.letters.len() as f64 * 100.0,
        }
    }
}
