//! Word list loading utilities
//!
//! Reads newline-separated word files. Blank lines, `#` comments, and entries
//! containing anything other than ASCII letters are skipped.

use std::fs;
use std::io;
use std::path::Path;

/// Load words from a file, uppercased
///
/// # Errors
///
/// Returns an I/O error if the file cannot be read or opened.
///
/// # Examples
/// ```no_run
/// use hangman::wordlists::loader::load_from_file;
///
/// let words = load_from_file("words.txt").unwrap();
/// println!("Loaded {} words", words.len());
/// ```
pub fn load_from_file<P: AsRef<Path>>(path: P) -> io::Result<Vec<String>> {
    let content = fs::read_to_string(path)?;
    Ok(parse_word_list(&content))
}

/// Parse newline-separated words, keeping only purely alphabetic entries
#[must_use]
pub fn parse_word_list(content: &str) -> Vec<String> {
    content
        .lines()
        .map(str::trim)
        .filter(|line| !line.is_empty() && !line.starts_with('#'))
        .filter(|line| line.chars().all(|c| c.is_ascii_alphabetic()))
        .map(str::to_ascii_uppercase)
        .collect()
}

/// Words whose length lies in `min_length..=max_length`
#[must_use]
pub fn words_in_range<'a, S: AsRef<str>>(
    words: &'a [S],
    min_length: usize,
    max_length: usize,
) -> Vec<&'a str> {
    words
        .iter()
        .map(AsRef::<str>::as_ref)
        .filter(|word| (min_length..=max_length).contains(&word.len()))
        .collect()
}
