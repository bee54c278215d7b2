//! Display functions for game and account results
//!
//! The `*_text` builders return strings for the interactive console; the
//! `print_*` functions write command results straight to stdout.

use super::formatters::{
    create_progress_bar, hangman_stage, letter_list, lives_meter, spaced,
};
use crate::core::password::{MAX_PASSWORD_LEN, POLICY_SYMBOLS};
use crate::core::{Account, AccountSummary, GameSession, GuessOutcome};
use crate::storage::{RepairOutcome, StoreFileInfo};
use colored::Colorize;
use std::path::{Path, PathBuf};
use std::time::SystemTime;

/// Title bar framed by `=` rules
#[must_use]
pub fn header_text(title: &str, width: usize) -> String {
    let rule = "=".repeat(width);
    format!("\n{rule}\n{}\n{rule}", title.bold())
}

#[must_use]
pub fn welcome_text() -> String {
    let rule = "=".repeat(50);
    format!(
        "{}\n{}\n     Guess the word letter by letter\n     You have 6 wrong guesses before you lose\n{}",
        rule.cyan(),
        "     WELCOME TO HANGMAN!".bright_cyan().bold(),
        rule.cyan()
    )
}

/// Menu for the acting identity
#[must_use]
pub fn main_menu_text(account: &Account) -> String {
    let mut out = header_text("MAIN MENU", 30);
    if account.is_guest() {
        out.push_str(&format!("\nPlaying as: {}", account.name().bright_white()));
        out.push_str("\n1. Quick Game\n2. Login\n3. Register\n4. Exit");
    } else {
        out.push_str(&format!("\nWelcome back, {}!", account.name().bright_white()));
        out.push_str("\n1. Play Game\n2. Logout\n3. Exit");
    }
    out
}

/// Gallows, masked word, lives, and guesses so far
#[must_use]
pub fn game_state_text(game: &GameSession) -> String {
    let mut out = format!(
        "{}\nWord: {}\nLives remaining: {} {}",
        hangman_stage(game.lives()),
        spaced(&game.render_mask()).bright_yellow().bold(),
        game.lives(),
        lives_meter(game.lives()).red()
    );
    if !game.guessed_letters().is_empty() {
        out.push_str(&format!(
            "\nGuessed letters: {}",
            letter_list(game.guessed_letters())
        ));
    }
    out
}

#[must_use]
pub fn guess_feedback_text(letter: char, outcome: GuessOutcome) -> String {
    let letter = letter.to_ascii_uppercase();
    match outcome {
        GuessOutcome::AlreadyGuessed => "You already guessed that letter!".yellow().to_string(),
        GuessOutcome::Correct => format!("Good guess! '{letter}' is in the word.")
            .green()
            .to_string(),
        GuessOutcome::Incorrect => format!("Sorry, '{letter}' is not in the word.")
            .red()
            .to_string(),
    }
}

/// Final gallows, the answer, and a win/loss banner
#[must_use]
pub fn game_result_text(game: &GameSession) -> String {
    let stats = game.stats();
    let banner = if game.is_won() {
        "🎉 Congratulations! You won! 🎉".bright_green().bold()
    } else {
        "💀 Game over! Better luck next time! 💀".bright_red().bold()
    };
    format!(
        "{}\nThe word was: {}\n{banner}\nGuesses: {} ({} correct, {} wrong)  Revealed: [{}] {:.0}%",
        hangman_stage(game.lives()),
        game.word().bright_yellow().bold(),
        stats.total_guesses,
        stats.correct_guesses,
        stats.wrong_guesses,
        create_progress_bar(stats.completion_percent, 100.0, 20),
        stats.completion_percent
    )
}

#[must_use]
pub fn session_stats_text(account: &Account) -> String {
    let session = account.session();
    format!(
        "\nSession Statistics for {}:\nGames played this session: {}\nWins this session: {}\nLosses this session: {}",
        account.name().bright_white(),
        session.plays,
        session.wins,
        session.losses
    )
}

#[must_use]
pub fn account_summary_text(summary: &AccountSummary) -> String {
    format!(
        "\nAccount Summary for {}:\n- Total Games: {}\n- Total Wins: {}\n- Total Losses: {}\n- Win Rate: {:.1}%\n- Current Session: {} games, {} wins",
        summary.name.bright_white().bold(),
        summary.total_games,
        summary.total_wins,
        summary.total_losses,
        summary.win_rate,
        summary.session_plays,
        summary.session_wins
    )
}

#[must_use]
pub fn password_requirements_text() -> String {
    format!(
        "\nPassword requirements:\n- At least one lowercase letter\n- At least one uppercase letter\n- At least one digit\n- At least one symbol ({POLICY_SYMBOLS})\n- Maximum length of {MAX_PASSWORD_LEN} characters"
    )
}

/// Farewell shown when the player presses Ctrl+C
#[must_use]
pub fn interrupted_text() -> String {
    "\n\nGame interrupted by user. Goodbye!".to_string()
}

/// Print an account's statistics
pub fn print_account_summary(summary: &AccountSummary) {
    println!("{}", account_summary_text(summary));
}

/// Print facts about the account document
pub fn print_file_info(path: &Path, info: &StoreFileInfo) {
    println!("\n{}", "═".repeat(50).cyan());
    println!(
        " {} {}",
        "ACCOUNT FILE:".bright_cyan().bold(),
        path.display()
    );
    println!("{}", "═".repeat(50).cyan());

    println!("   Exists:        {}", yes_no(info.exists));
    println!("   Size:          {} bytes", info.size_bytes);
    println!("   Valid JSON:    {}", yes_no(info.is_valid_json));
    println!("   Accounts:      {}", info.account_count);
    if let Some(modified) = info.last_modified {
        println!("   Last modified: {}", seconds_ago(modified));
    }
}

/// Print what a repair did
pub fn print_repair_outcome(path: &Path, outcome: &RepairOutcome) {
    match outcome {
        RepairOutcome::Intact => {
            println!("{}", format!("✅ {} is valid.", path.display()).green());
        }
        RepairOutcome::Reinitialized { quarantined } => {
            println!(
                "{}",
                format!("⚠ {} was corrupted.", path.display()).yellow().bold()
            );
            if let Some(backup) = quarantined {
                println!("   Corrupted file backed up as: {}", backup.display());
            }
            println!("   Created new empty accounts file.");
        }
    }
}

/// Print the result of a backup
pub fn print_backup_created(path: &Path) {
    println!("{}", format!("✅ Backup created: {}", path.display()).green());
}

/// Print removed backups
pub fn print_cleanup_result(removed: &[PathBuf]) {
    if removed.is_empty() {
        println!("No old backups to remove.");
        return;
    }
    for path in removed {
        println!("Removed old backup: {}", path.display());
    }
}

fn yes_no(flag: bool) -> String {
    if flag {
        "yes".green().to_string()
    } else {
        "no".red().to_string()
    }
}

fn seconds_ago(time: SystemTime) -> String {
    SystemTime::now()
        .duration_since(time)
        .map_or_else(|_| "just now".to_string(), |age| format!("{}s ago", age.as_secs()))
}
