//! Core domain types for hangman
//!
//! The round state machine, the account record, and the password policy. Nothing
//! here performs I/O; every operation returns a value the caller presents.

mod account;
mod game;
pub mod password;

pub use account::{Account, AccountSummary, GUEST_USERNAME, Tally};
pub use game::{
    GameError, GameSession, GameStats, GameStatus, GuessOutcome, MASK_PLACEHOLDER,
    STARTING_LIVES,
};
