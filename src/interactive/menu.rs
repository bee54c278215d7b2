//! Main menu loop
//!
//! Guests choose between a quick game, login, registration, and exit; a
//! registered player between playing, logout, and exit. Closed input is treated
//! as choosing exit, so registered progress is still saved.

use super::Console;
use crate::accounts::flow::{login, logout, prompt_name, register, say_goodbye};
use crate::accounts::{Departure, GUEST_PLACEHOLDER_NAME, SaveStatus, Session};
use crate::commands::play_round;
use crate::output::display::{main_menu_text, welcome_text};
use crate::storage::AccountStore;
use crate::wordlists::WordPicker;
use std::io;
use tracing::{debug, error, info};

/// A menu choice, already resolved against the acting identity
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum MenuAction {
    Play,
    Login,
    Register,
    Logout,
    Exit,
}

impl MenuAction {
    /// Map a menu entry for a guest (`1`-`4`) or registered player (`1`-`3`)
    ///
    /// # Examples
    /// ```
    /// use hangman::interactive::MenuAction;
    ///
    /// assert_eq!(MenuAction::parse("4", true), Some(MenuAction::Exit));
    /// assert_eq!(MenuAction::parse("4", false), None);
    /// ```
    #[must_use]
    pub fn parse(input: &str, is_guest: bool) -> Option<Self> {
        match (input.trim(), is_guest) {
            ("1", _) => Some(Self::Play),
            ("2", true) => Some(Self::Login),
            ("3", true) => Some(Self::Register),
            ("4", true) | ("3", false) => Some(Self::Exit),
            ("2", false) => Some(Self::Logout),
            _ => None,
        }
    }
}

/// Run the interactive program until the player exits or input closes
///
/// Greets the player, asks for a guest name, then serves the menu. The returned
/// departure carries the final identity and how its progress was saved.
///
/// # Errors
/// Propagates console I/O errors other than closed input. Registered progress
/// is saved before such an error is returned; a failed save is named in it.
pub fn run_session<C: Console>(
    console: &mut C,
    store: AccountStore,
    picker: &mut WordPicker,
) -> io::Result<Departure> {
    console.say(&welcome_text());
    let guest_name = match prompt_name(console) {
        Ok(name) => name,
        Err(e) if e.kind() == io::ErrorKind::UnexpectedEof => GUEST_PLACEHOLDER_NAME.to_string(),
        Err(e) => return Err(e),
    };

    let mut session = Session::new(store, guest_name);
    match serve_menu(console, &mut session, picker) {
        Ok(()) => {}
        Err(e) if e.kind() == io::ErrorKind::UnexpectedEof => {
            info!("input closed; exiting");
            console.say("\nInput closed.");
        }
        Err(e) => {
            error!("console failed: {e}");
            let departure = session.exit();
            return Err(match departure.save {
                SaveStatus::Failed(save_error) => io::Error::new(
                    e.kind(),
                    format!("{e}; final save failed: {save_error}"),
                ),
                SaveStatus::Saved | SaveStatus::Skipped => e,
            });
        }
    }

    let departure = session.exit();
    say_goodbye(console, &departure);
    console.say("Thank you for playing Hangman!");
    Ok(departure)
}

fn serve_menu<C: Console>(
    console: &mut C,
    session: &mut Session,
    picker: &mut WordPicker,
) -> io::Result<()> {
    loop {
        console.say(&main_menu_text(session.account()));
        match read_action(console, session.is_guest())? {
            MenuAction::Play => {
                play_round(console, session, picker)?;
            }
            MenuAction::Login => {
                let outcome = login(console, session)?;
                debug!(?outcome, "login finished");
            }
            MenuAction::Register => {
                let outcome = register(console, session, picker.rng())?;
                debug!(?outcome, "registration finished");
            }
            MenuAction::Logout => logout(console, session)?,
            MenuAction::Exit => return Ok(()),
        }
    }
}

fn read_action<C: Console>(console: &mut C, is_guest: bool) -> io::Result<MenuAction> {
    let hint = if is_guest {
        "Invalid choice. Please enter 1, 2, 3, or 4."
    } else {
        "Invalid choice. Please enter 1, 2, or 3."
    };
    loop {
        let input = console.read_line("\nEnter your choice: ")?;
        if let Some(action) = MenuAction::parse(&input, is_guest) {
            return Ok(action);
        }
        console.say(hint);
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::interactive::ScriptedConsole;
    use crate::storage::DEFAULT_ACCOUNTS_FILE;
    use crate::wordlists::WordListSource;
    use rand::SeedableRng;
    use rand::rngs::StdRng;

    const PASSWORD: &str = "Abcdef1!";

    fn cat_picker() -> WordPicker {
        let source = WordListSource::with_rng(vec!["CAT".to_string()], StdRng::seed_from_u64(1));
        WordPicker::with_rng(Box::new(source), 1, 20, StdRng::seed_from_u64(1))
    }

    fn run(dir: &tempfile::TempDir, inputs: &[&str]) -> (Departure, ScriptedConsole) {
        let store = AccountStore::empty(dir.path().join(DEFAULT_ACCOUNTS_FILE));
        let mut console = ScriptedConsole::new(inputs.iter().copied());
        let departure = run_session(&mut console, store, &mut cat_picker()).unwrap();
        (departure, console)
    }

    fn stored(dir: &tempfile::TempDir) -> AccountStore {
        AccountStore::load(dir.path().join(DEFAULT_ACCOUNTS_FILE)).unwrap()
    }

    #[test]
    fn parse_depends_on_identity() {
        assert_eq!(MenuAction::parse(" 1 ", true), Some(MenuAction::Play));
        assert_eq!(MenuAction::parse("2", true), Some(MenuAction::Login));
        assert_eq!(MenuAction::parse("3", true), Some(MenuAction::Register));
        assert_eq!(MenuAction::parse("4", true), Some(MenuAction::Exit));
        assert_eq!(MenuAction::parse("1", false), Some(MenuAction::Play));
        assert_eq!(MenuAction::parse("2", false), Some(MenuAction::Logout));
        assert_eq!(MenuAction::parse("3", false), Some(MenuAction::Exit));
        assert_eq!(MenuAction::parse("4", false), None);
        assert_eq!(MenuAction::parse("", true), None);
        assert_eq!(MenuAction::parse("five", true), None);
    }

    #[test]
    fn guest_plays_then_exits_without_saving() {
        let dir = tempfile::tempdir().unwrap();
        let (departure, console) = run(&dir, &["", "Ada", "9", "1", "c", "a", "t", "4"]);

        assert!(departure.account.is_guest());
        assert_eq!(departure.account.name(), "Ada");
        assert_eq!(departure.account.session().wins, 1);
        assert!(matches!(departure.save, SaveStatus::Skipped));
        assert!(console.saw("Invalid choice. Please enter 1, 2, 3, or 4."));
        assert!(console.saw("Goodbye, Ada!"));
        assert!(console.saw("Thank you for playing Hangman!"));
        assert!(stored(&dir).is_empty());
    }

    #[test]
    fn guest_wins_carry_into_registration_and_exit_folds() {
        let dir = tempfile::tempdir().unwrap();
        let (departure, console) = run(
            &dir,
            &["Ada", "1", "c", "a", "t", "3", "ada", "1", PASSWORD, "Ada L", "4", "3"],
        );

        assert_eq!(departure.account.username(), "ada");
        assert!(matches!(departure.save, SaveStatus::Saved));
        assert!(console.saw("Invalid choice. Please enter 1, 2, or 3."));

        let account = stored(&dir).get("ada").cloned().unwrap();
        assert_eq!(account.lifetime().wins, 1);
        assert_eq!(account.lifetime().plays, 1);
        assert_eq!(account.session().plays, 0);
    }

    #[test]
    fn logout_then_login_again() {
        let dir = tempfile::tempdir().unwrap();
        let (departure, console) = run(
            &dir,
            &[
                "Ada", "3", "ada", "1", PASSWORD, "", "1", "c", "a", "t", "2", "Bob", "1", "x",
                "y", "z", "q", "w", "e", "2", "ada", PASSWORD, "3",
            ],
        );

        assert!(console.saw("Playing as: "));
        assert!(console.saw("Login successful! Welcome back, ada!"));
        let account = stored(&dir).get("ada").cloned().unwrap();
        assert_eq!(departure.account, account);
        // One win before logout, Bob's guest loss merged at login
        assert_eq!(account.lifetime().wins, 1);
        assert_eq!(account.lifetime().losses, 1);
        assert_eq!(account.lifetime().plays, 2);
    }

    #[test]
    fn closed_input_at_menu_still_saves() {
        let dir = tempfile::tempdir().unwrap();
        let (departure, console) = run(&dir, &["Ada", "3", "ada", "2", "", "1", "c", "a", "t"]);

        assert!(matches!(departure.save, SaveStatus::Saved));
        assert!(console.saw("Input closed."));
        assert_eq!(stored(&dir).get("ada").unwrap().lifetime().wins, 1);
    }

    #[test]
    fn closed_input_before_name_exits_as_guest() {
        let dir = tempfile::tempdir().unwrap();
        let (departure, _) = run(&dir, &[]);
        assert!(departure.account.is_guest());
        assert_eq!(departure.account.name(), GUEST_PLACEHOLDER_NAME);
        assert!(matches!(departure.save, SaveStatus::Skipped));
    }

    #[test]
    fn console_failure_reports_failed_final_save() {
        let dir = tempfile::tempdir().unwrap();
        // A directory at the document path makes every save fail
        let path = dir.path().join(DEFAULT_ACCOUNTS_FILE);
        std::fs::create_dir(&path).unwrap();
        std::fs::write(path.join("keep"), "x").unwrap();

        let mut console = ScriptedConsole::new(["Ada", "3", "ada", "1", PASSWORD, ""])
            .ending_with(io::ErrorKind::BrokenPipe);
        let err = run_session(&mut console, AccountStore::empty(&path), &mut cat_picker())
            .unwrap_err();

        assert_eq!(err.kind(), io::ErrorKind::BrokenPipe);
        assert!(err.to_string().contains("final save failed"));
    }

    #[test]
    fn console_failure_as_guest_passes_error_through() {
        let dir = tempfile::tempdir().unwrap();
        let mut console = ScriptedConsole::new(["Ada"]).ending_with(io::ErrorKind::BrokenPipe);
        let store = AccountStore::empty(dir.path().join(DEFAULT_ACCOUNTS_FILE));

        let err = run_session(&mut console, store, &mut cat_picker()).unwrap_err();
        assert_eq!(err.kind(), io::ErrorKind::BrokenPipe);
        assert!(!err.to_string().contains("final save failed"));
    }

    #[test]
    fn degraded_startup_keeps_unloadable_records() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join(DEFAULT_ACCOUNTS_FILE);
        let original = r#"[{"name":"Ada","username":"ada","password":"Abcdef1!","wins":4,
            "losses":0,"plays":4,"session_wins":0,"session_losses":0,"session_plays":0},
            {"name":"Bob","password":"pw"}]"#;
        std::fs::write(&path, original).unwrap();

        let opened = AccountStore::open(&path);
        assert!(opened.load_error.is_some());
        let backup = opened.quarantined.clone().unwrap();

        let mut console = ScriptedConsole::new(["Zed", "3", "zed", "1", PASSWORD, "", "3"]);
        let departure = run_session(&mut console, opened.store, &mut cat_picker()).unwrap();
        assert!(matches!(departure.save, SaveStatus::Saved));

        assert_eq!(std::fs::read_to_string(&backup).unwrap(), original);
        assert!(stored(&dir).contains("zed"));
    }
}
