//! One round of hangman
//!
//! Draws a secret word, runs guesses until the round is won or lost, and counts
//! the outcome against the acting identity's session statistics.

use crate::accounts::Session;
use crate::core::GameSession;
use crate::interactive::Console;
use crate::output::display::{
    game_result_text, game_state_text, guess_feedback_text, header_text, session_stats_text,
};
use crate::wordlists::{WordPicker, fallback_word};
use std::io;
use tracing::{debug, warn};

/// Play a full round and record its outcome
///
/// Returns the finished game.
///
/// # Errors
/// Propagates console I/O errors; closed input ends the round unrecorded.
pub fn play_round<C: Console>(
    console: &mut C,
    session: &mut Session,
    picker: &mut WordPicker,
) -> io::Result<GameSession> {
    console.say(&header_text("HANGMAN GAME", 40));

    let mut game = start_game(console, picker)?;
    console.say(&format!("Word length: {} letters", game.word().len()));
    console.say("Good luck!\n");

    while !game.is_complete() {
        console.say(&game_state_text(&game));
        let letter = read_letter(console)?;
        match game.guess(letter) {
            Ok(outcome) => console.say(&guess_feedback_text(letter, outcome)),
            Err(e) => console.say(&e.to_string()),
        }
    }

    console.say(&game_result_text(&game));
    session.record_game(game.is_won());
    debug!(won = game.is_won(), lives = game.lives(), "round finished");
    console.say(&session_stats_text(session.account()));

    Ok(game)
}

fn start_game<C: Console>(console: &mut C, picker: &mut WordPicker) -> io::Result<GameSession> {
    let picked = picker.pick();
    if picked.from_fallback {
        console.say("Using fallback word.");
    }
    match GameSession::start(&picked.word) {
        Ok(game) => Ok(game),
        Err(e) => {
            warn!("{e}; using fallback word");
            console.say("Using fallback word.");
            GameSession::start(fallback_word(picker.rng()))
                .map_err(|e| io::Error::new(io::ErrorKind::InvalidData, e))
        }
    }
}

/// Prompt until the input is exactly one ASCII letter; returns it uppercased
fn read_letter<C: Console>(console: &mut C) -> io::Result<char> {
    loop {
        let input = console.read_line("\nEnter a letter: ")?;
        let mut chars = input.trim().chars();
        if let (Some(letter), None) = (chars.next(), chars.next())
            && letter.is_ascii_alphabetic()
        {
            return Ok(letter.to_ascii_uppercase());
        }
        console.say("Please enter a single letter.");
    }
}
