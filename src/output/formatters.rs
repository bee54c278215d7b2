//! Formatting utilities for terminal output

use crate::core::STARTING_LIVES;

/// Gallows drawings indexed by the number of wrong guesses
pub const HANGMAN_STAGES: [&str; 7] = [
    r"
   +---+
   |   |
       |
       |
       |
       |
=========",
    r"
   +---+
   |   |
   O   |
       |
       |
       |
=========",
    r"
   +---+
   |   |
   O   |
   |   |
       |
       |
=========",
    r"
   +---+
   |   |
   O   |
  /|   |
       |
       |
=========",
    r"
   +---+
   |   |
   O   |
  /|\  |
       |
       |
=========",
    r"
   +---+
   |   |
   O   |
  /|\  |
  /    |
       |
=========",
    r"
   +---+
   |   |
   O   |
  /|\  |
  / \  |
       |
=========",
];

/// Gallows drawing for a round with `lives` remaining
#[must_use]
pub fn hangman_stage(lives: u8) -> &'static str {
    let wrong = usize::from(STARTING_LIVES.saturating_sub(lives));
    HANGMAN_STAGES[wrong.min(HANGMAN_STAGES.len() - 1)]
}

/// Separate every character with a space (`C_T` becomes `C _ T`)
#[must_use]
pub fn spaced(mask: &str) -> String {
    let mut out = String::with_capacity(mask.len() * 2);
    for (i, c) in mask.chars().enumerate() {
        if i > 0 {
            out.push(' ');
        }
        out.push(c);
    }
    out
}

/// Sorted, comma-separated letters
#[must_use]
pub fn letter_list(letters: &[char]) -> String {
    let mut sorted = letters.to_vec();
    sorted.sort_unstable();
    sorted
        .iter()
        .map(char::to_string)
        .collect::<Vec<_>>()
        .join(", ")
}

/// Create a progress bar string
#[must_use]
pub fn create_progress_bar(value: f64, max: f64, width: usize) -> String {
    // Cast is safe: values are clamped to [0, width]
    let filled = if max > 0.0 {
        ((value / max) * width as f64) as usize
    } else {
        0
    };
    let filled = filled.min(width);

    format!("{}{}", "█".repeat(filled), "░".repeat(width - filled))
}

/// Hearts for remaining lives, hollow for lost ones
#[must_use]
pub fn lives_meter(lives: u8) -> String {
    let lost = STARTING_LIVES.saturating_sub(lives);
    format!(
        "{}{}",
        "♥".repeat(usize::from(lives.min(STARTING_LIVES))),
        "♡".repeat(usize::from(lost))
    )
}
