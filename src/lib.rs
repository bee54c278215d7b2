//! Hangman
//!
//! A console word-guessing game with guest play and a JSON-file account system:
//! registration, login, logout, and statistics that carry over from a guest
//! session into an account.
//!
//! # Quick Start
//!
//! ```rust
//! use hangman::core::{GameSession, GuessOutcome};
//!
//! let mut game = GameSession::start("cat").unwrap();
//! assert_eq!(game.guess('c').unwrap(), GuessOutcome::Correct);
//! assert_eq!(game.guess('x').unwrap(), GuessOutcome::Incorrect);
//! assert_eq!(game.render_mask(), "C__");
//! assert_eq!(game.lives(), 5);
//! ```

// Core domain types
pub mod core;

// Account persistence
pub mod storage;

// Account lifecycle and interactive account flows
pub mod accounts;

// Word lists and word sources
pub mod wordlists;

// Command implementations
pub mod commands;

// Terminal output formatting
pub mod output;

// Console menu loop
pub mod interactive;

// Runtime configuration
pub mod config;
