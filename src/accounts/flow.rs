//! Interactive login, registration, and logout
//!
//! Each step prompts through a `Console` with a bounded number of attempts. When
//! a budget runs out the user chooses to restart the process or return to the
//! menu; restarting loops back to the first step rather than recursing.

use super::retry::{AttemptBudget, AttemptState, Escalation, Process};
use super::session::{AccountError, Departure, SaveStatus, Session};
use crate::core::password::{check_password, generate_password};
use crate::interactive::Console;
use crate::output::display::{account_summary_text, header_text, password_requirements_text};
use rand::Rng;
use std::io;

/// Guest name used until the player has typed one
pub const GUEST_PLACEHOLDER_NAME: &str = "Guest";

/// How an interactive process ended
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FlowOutcome {
    Completed,
    Aborted,
}

/// One pass through a process, before escalation
enum Pass {
    Done,
    Exhausted,
}

/// Log in, retrying or aborting on exhaustion
///
/// # Errors
/// Propagates console I/O errors.
pub fn login<C: Console>(console: &mut C, session: &mut Session) -> io::Result<FlowOutcome> {
    console.say(&header_text("LOGIN", 30));
    loop {
        match login_pass(console, session)? {
            Pass::Done => return Ok(FlowOutcome::Completed),
            Pass::Exhausted => match escalate(console, Process::Login)? {
                Escalation::Retry => {}
                Escalation::Abort => return Ok(FlowOutcome::Aborted),
            },
        }
    }
}

fn login_pass<C: Console>(console: &mut C, session: &mut Session) -> io::Result<Pass> {
    let Some(username) = prompt_bounded(console, "Enter username: ", |input| {
        session
            .check_existing_username(input)
            .map(|()| input.to_string())
    })?
    else {
        return Ok(Pass::Exhausted);
    };

    let Some(password) = prompt_bounded(console, "Enter password: ", |input| {
        session
            .verify_password(&username, input)
            .map(|()| input.to_string())
    })?
    else {
        return Ok(Pass::Exhausted);
    };

    match session.login(&username, &password) {
        Ok(()) => {
            console.say(&format!(
                "\nLogin successful! Welcome back, {}!",
                session.account().name()
            ));
            Ok(Pass::Done)
        }
        Err(e) => {
            console.say(&e.to_string());
            Ok(Pass::Exhausted)
        }
    }
}

/// Register a new account, retrying or aborting on exhaustion
///
/// # Errors
/// Propagates console I/O errors.
pub fn register<C: Console, R: Rng + ?Sized>(
    console: &mut C,
    session: &mut Session,
    rng: &mut R,
) -> io::Result<FlowOutcome> {
    console.say(&header_text("REGISTER", 30));
    loop {
        match register_pass(console, session, rng)? {
            Pass::Done => return Ok(FlowOutcome::Completed),
            Pass::Exhausted => match escalate(console, Process::Registration)? {
                Escalation::Retry => {}
                Escalation::Abort => return Ok(FlowOutcome::Aborted),
            },
        }
    }
}

fn register_pass<C: Console, R: Rng + ?Sized>(
    console: &mut C,
    session: &mut Session,
    rng: &mut R,
) -> io::Result<Pass> {
    let Some(username) = prompt_bounded(console, "Enter desired username: ", |input| {
        session
            .check_new_username(input)
            .map(|()| input.to_string())
    })?
    else {
        return Ok(Pass::Exhausted);
    };

    let choice = console.read_line(
        "\nWould you like to (1) Enter password manually or (2) Generate automatically? Enter 1 or 2: ",
    )?;

    let password = if choice.trim() == "2" {
        let password = generate_password(rng);
        console.say(&format!("\nGenerated password: {password}"));
        console.say("Please save this password securely!");
        password
    } else {
        console.say(&password_requirements_text());
        let accepted = prompt_bounded(console, "Enter password: ", |input| {
            let violations = check_password(input);
            if violations.is_empty() {
                Ok(input.to_string())
            } else {
                Err(AccountError::WeakPassword(violations))
            }
        })?;
        match accepted {
            Some(password) => password,
            None => return Ok(Pass::Exhausted),
        }
    };

    let name = console.read_line("Enter your display name: ")?;

    match session.register(&username, &password, &name) {
        Ok(save) => {
            console.say(&format!(
                "\nRegistration successful! Welcome, {}!",
                session.account().name()
            ));
            report_save(console, &save);
            Ok(Pass::Done)
        }
        Err(e) => {
            console.say(&e.to_string());
            Ok(Pass::Exhausted)
        }
    }
}

/// Log out a registered identity and start a new guest
///
/// Does nothing for a guest identity.
///
/// # Errors
/// Propagates console I/O errors.
pub fn logout<C: Console>(console: &mut C, session: &mut Session) -> io::Result<()> {
    if session.is_guest() {
        return Ok(());
    }

    // Fold and save before prompting so closed input cannot lose progress
    let Some(departure) = session.logout(GUEST_PLACEHOLDER_NAME) else {
        return Ok(());
    };
    say_goodbye(console, &departure);

    let guest_name = prompt_name(console)?;
    session.rename_guest(guest_name);
    Ok(())
}

/// Farewell lines for a departing identity, including save status
pub fn say_goodbye<C: Console>(console: &mut C, departure: &Departure) {
    console.say(&format!("\nGoodbye, {}!", departure.account.name()));
    if !departure.account.is_guest() {
        console.say(&account_summary_text(&departure.account.summary()));
    }
    report_save(console, &departure.save);
}

/// Ask for a non-empty display name, re-prompting until one is given
///
/// # Errors
/// Propagates console I/O errors.
pub fn prompt_name<C: Console>(console: &mut C) -> io::Result<String> {
    loop {
        let name = console.read_line("Please enter your name: ")?;
        let name = name.trim();
        if !name.is_empty() {
            return Ok(name.to_string());
        }
        console.say("Name cannot be empty. Please try again.");
    }
}

fn report_save<C: Console>(console: &mut C, save: &SaveStatus) {
    match save {
        SaveStatus::Saved => console.say("Your progress has been saved."),
        SaveStatus::Skipped => {}
        SaveStatus::Failed(e) => console.say(&format!(
            "Warning: could not save accounts ({e}). Your progress is kept for this run."
        )),
    }
}

/// Prompt until `accept` succeeds or the attempt budget is spent
fn prompt_bounded<C, T, F>(console: &mut C, prompt: &str, mut accept: F) -> io::Result<Option<T>>
where
    C: Console,
    F: FnMut(&str) -> Result<T, AccountError>,
{
    let mut budget = AttemptBudget::default();
    loop {
        let input = console.read_line(prompt)?;
        match accept(input.trim()) {
            Ok(value) => return Ok(Some(value)),
            Err(e) => {
                console.say(&format!("{e}. Please try again."));
                if budget.record_failure() == AttemptState::Exhausted {
                    return Ok(None);
                }
            }
        }
    }
}

/// Two-choice escalation prompt; re-asks until it gets `1` or `2`
fn escalate<C: Console>(console: &mut C, process: Process) -> io::Result<Escalation> {
    console.say(&format!("\nMaximum attempts reached for {process}."));
    loop {
        let input = console.read_line(
            "Would you like to (1) Try again or (2) Return to main menu? Enter 1 or 2: ",
        )?;
        if let Some(choice) = Escalation::parse(&input) {
            return Ok(choice);
        }
        console.say("Invalid choice. Please enter 1 or 2.");
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::accounts::retry::MAX_ATTEMPTS;
    use crate::core::password::is_valid_password;
    use crate::interactive::ScriptedConsole;
    use crate::storage::{AccountStore, DEFAULT_ACCOUNTS_FILE};
    use rand::SeedableRng;
    use rand::rngs::StdRng;

    const PASSWORD: &str = "Abcdef1!";

    fn fresh_session(dir: &tempfile::TempDir) -> Session {
        Session::new(
            AccountStore::empty(dir.path().join(DEFAULT_ACCOUNTS_FILE)),
            "Visitor",
        )
    }

    fn session_with_ada(dir: &tempfile::TempDir) -> Session {
        let mut session = fresh_session(dir);
        let _ = session.register("ada", PASSWORD, "Ada").unwrap();
        let store = session.store().clone();
        Session::new(store, "Visitor")
    }

    fn repeat(input: &str, times: u32) -> Vec<String> {
        (0..times).map(|_| input.to_string()).collect()
    }

    #[test]
    fn login_succeeds_after_a_typo() {
        let dir = tempfile::tempdir().unwrap();
        let mut session = session_with_ada(&dir);
        let mut console = ScriptedConsole::new(["bob", "ada", "wrong", PASSWORD]);

        let outcome = login(&mut console, &mut session).unwrap();
        assert_eq!(outcome, FlowOutcome::Completed);
        assert_eq!(session.account().username(), "ada");
        assert!(console.saw("was not found"));
        assert!(console.saw("incorrect password"));
        assert!(console.saw("Welcome back, Ada"));
    }

    #[test]
    fn login_username_exhaustion_then_abort() {
        let dir = tempfile::tempdir().unwrap();
        let mut session = session_with_ada(&dir);
        let mut inputs = repeat("nobody", MAX_ATTEMPTS);
        inputs.push("2".to_string());
        let mut console = ScriptedConsole::new(inputs);

        let outcome = login(&mut console, &mut session).unwrap();
        assert_eq!(outcome, FlowOutcome::Aborted);
        assert!(session.is_guest());
        assert!(console.saw("Maximum attempts reached for login."));
        assert_eq!(console.remaining_inputs(), 0);
    }

    #[test]
    fn login_password_exhaustion_then_retry_from_start() {
        let dir = tempfile::tempdir().unwrap();
        let mut session = session_with_ada(&dir);
        let mut inputs = vec!["ada".to_string()];
        inputs.extend(repeat("nope", MAX_ATTEMPTS));
        // Invalid escalation answer is re-prompted, then retry
        inputs.extend(["maybe".to_string(), "1".to_string()]);
        inputs.extend(["ada".to_string(), PASSWORD.to_string()]);
        let mut console = ScriptedConsole::new(inputs);

        let outcome = login(&mut console, &mut session).unwrap();
        assert_eq!(outcome, FlowOutcome::Completed);
        assert!(!session.is_guest());
        assert!(console.saw("Invalid choice. Please enter 1 or 2."));
    }

    #[test]
    fn many_retries_do_not_recurse() {
        let dir = tempfile::tempdir().unwrap();
        let mut session = session_with_ada(&dir);
        let mut inputs = Vec::new();
        for _ in 0..2_000 {
            inputs.extend(repeat("x", MAX_ATTEMPTS));
            inputs.push("1".to_string());
        }
        inputs.extend(repeat("x", MAX_ATTEMPTS));
        inputs.push("2".to_string());
        let mut console = ScriptedConsole::new(inputs);

        assert_eq!(
            login(&mut console, &mut session).unwrap(),
            FlowOutcome::Aborted
        );
    }

    #[test]
    fn login_merges_guest_session() {
        let dir = tempfile::tempdir().unwrap();
        let mut session = session_with_ada(&dir);
        session.record_game(true);
        session.record_game(false);
        let mut console = ScriptedConsole::new(["ada", PASSWORD]);

        login(&mut console, &mut session).unwrap();
        assert_eq!(session.account().session().plays, 2);
        assert_eq!(session.account().session().wins, 1);
    }

    #[test]
    fn register_with_manual_password() {
        let dir = tempfile::tempdir().unwrap();
        let mut session = fresh_session(&dir);
        for _ in 0..3 {
            session.record_game(true);
        }
        let mut console = ScriptedConsole::new(["", "ada", "1", "abc", PASSWORD, "Ada L"]);
        let mut rng = StdRng::seed_from_u64(1);

        let outcome = register(&mut console, &mut session, &mut rng).unwrap();
        assert_eq!(outcome, FlowOutcome::Completed);
        assert!(console.saw("username cannot be empty"));
        assert!(console.saw("password does not meet requirements"));
        assert!(console.saw("Registration successful! Welcome, Ada L!"));

        let account = session.account();
        assert_eq!(account.username(), "ada");
        assert_eq!(account.session().wins, 3);
        assert_eq!(account.lifetime().wins, 0);
        assert!(AccountStore::load(session.store().path()).unwrap().contains("ada"));
    }

    #[test]
    fn register_with_generated_password_and_default_name() {
        let dir = tempfile::tempdir().unwrap();
        let mut session = fresh_session(&dir);
        let mut console = ScriptedConsole::new(["zed", "2", ""]);
        let mut rng = StdRng::seed_from_u64(5);

        register(&mut console, &mut session, &mut rng).unwrap();
        assert_eq!(session.account().name(), "zed");

        let shown = console
            .transcript
            .iter()
            .find_map(|line| line.strip_prefix("\nGenerated password: "))
            .unwrap()
            .to_string();
        assert!(is_valid_password(&shown));
        assert_eq!(shown.len(), 12);
        assert!(session.verify_password("zed", &shown).is_ok());
    }

    #[test]
    fn register_taken_username_exhaustion_then_abort() {
        let dir = tempfile::tempdir().unwrap();
        let mut session = session_with_ada(&dir);
        let mut inputs = repeat("ada", MAX_ATTEMPTS);
        inputs.push("2".to_string());
        let mut console = ScriptedConsole::new(inputs);
        let mut rng = StdRng::seed_from_u64(1);

        let outcome = register(&mut console, &mut session, &mut rng).unwrap();
        assert_eq!(outcome, FlowOutcome::Aborted);
        assert!(console.saw("already taken"));
        assert!(console.saw("Maximum attempts reached for registration."));
        assert!(session.is_guest());
    }

    #[test]
    fn register_weak_password_exhaustion_then_retry() {
        let dir = tempfile::tempdir().unwrap();
        let mut session = fresh_session(&dir);
        let mut inputs = vec!["ada".to_string(), "1".to_string()];
        inputs.extend(repeat("weak", MAX_ATTEMPTS));
        inputs.push("1".to_string());
        inputs.extend(["ada", "1", PASSWORD, ""].map(String::from));
        let mut console = ScriptedConsole::new(inputs);
        let mut rng = StdRng::seed_from_u64(1);

        let outcome = register(&mut console, &mut session, &mut rng).unwrap();
        assert_eq!(outcome, FlowOutcome::Completed);
        assert_eq!(session.account().username(), "ada");
    }

    #[test]
    fn logout_saves_and_prompts_for_guest_name() {
        let dir = tempfile::tempdir().unwrap();
        let mut session = fresh_session(&dir);
        let _ = session.register("ada", PASSWORD, "Ada").unwrap();
        session.record_game(true);
        let mut console = ScriptedConsole::new(["", "Newcomer"]);

        logout(&mut console, &mut session).unwrap();
        assert!(session.is_guest());
        assert_eq!(session.account().name(), "Newcomer");
        assert!(console.saw("Goodbye, Ada!"));
        assert!(console.saw("Your progress has been saved."));
        assert!(console.saw("Name cannot be empty"));

        let stored = AccountStore::load(session.store().path()).unwrap();
        assert_eq!(stored.get("ada").unwrap().lifetime().wins, 1);
    }

    #[test]
    fn logout_as_guest_does_nothing() {
        let dir = tempfile::tempdir().unwrap();
        let mut session = fresh_session(&dir);
        let mut console = ScriptedConsole::new(Vec::<String>::new());

        logout(&mut console, &mut session).unwrap();
        assert!(session.is_guest());
        assert_eq!(session.account().name(), "Visitor");
        assert!(console.transcript.is_empty());
    }
}
