//! Runtime configuration
//!
//! Built from command-line flags (each with an environment fallback) and
//! validated once at startup.

use crate::storage::DEFAULT_ACCOUNTS_FILE;
use crate::wordlists::{DEFAULT_MAX_LENGTH, DEFAULT_MIN_LENGTH};
use std::path::PathBuf;
use thiserror::Error;

/// Log filter used when neither `RUST_LOG` nor a level flag is given
pub const DEFAULT_LOG_LEVEL: &str = "warn";

#[derive(Debug, Error, PartialEq, Eq)]
pub enum ConfigError {
    #[error("minimum word length must be at least 1")]
    ZeroMinLength,
    #[error("minimum word length {min} exceeds maximum {max}")]
    InvertedLengthRange { min: usize, max: usize },
    #[error("accounts file path is empty")]
    EmptyAccountsPath,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Config {
    pub accounts_file: PathBuf,
    /// Newline-separated word file; `None` plays from the fallback list only
    pub word_list: Option<PathBuf>,
    pub min_word_length: usize,
    pub max_word_length: usize,
    pub log_level: String,
}

impl Config {
    /// Check the values against each other
    ///
    /// # Errors
    /// Returns the first `ConfigError` found.
    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.accounts_file.as_os_str().is_empty() {
            return Err(ConfigError::EmptyAccountsPath);
        }
        if self.min_word_length == 0 {
            return Err(ConfigError::ZeroMinLength);
        }
        if self.min_word_length > self.max_word_length {
            return Err(ConfigError::InvertedLengthRange {
                min: self.min_word_length,
                max: self.max_word_length,
            });
        }
        Ok(())
    }
}

impl Default for Config {
    fn default() -> Self {
        Self {
            accounts_file: PathBuf::from(DEFAULT_ACCOUNTS_FILE),
            word_list: None,
            min_word_length: DEFAULT_MIN_LENGTH,
            max_word_length: DEFAULT_MAX_LENGTH,
            log_level: DEFAULT_LOG_LEVEL.to_string(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn defaults_are_valid() {
        let config = Config::default();
        assert_eq!(config.accounts_file, PathBuf::from("accounts.json"));
        assert_eq!((config.min_word_length, config.max_word_length), (4, 10));
        assert_eq!(config.validate(), Ok(()));
    }

    #[test]
    fn rejects_bad_length_ranges() {
        let zero = Config {
            min_word_length: 0,
            ..Config::default()
        };
        assert_eq!(zero.validate(), Err(ConfigError::ZeroMinLength));

        let inverted = Config {
            min_word_length: 8,
            max_word_length: 5,
            ..Config::default()
        };
        assert_eq!(
            inverted.validate(),
            Err(ConfigError::InvertedLengthRange { min: 8, max: 5 })
        );

        let single = Config {
            min_word_length: 6,
            max_word_length: 6,
            ..Config::default()
        };
        assert!(single.validate().is_ok());
    }

    #[test]
    fn rejects_empty_accounts_path() {
        let config = Config {
            accounts_file: PathBuf::new(),
            ..Config::default()
        };
        assert_eq!(config.validate(), Err(ConfigError::EmptyAccountsPath));
    }
}
