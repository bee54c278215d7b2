//! Account record and statistics counters
//!
//! An account carries two sets of counters: lifetime totals, which are persisted,
//! and session counters accumulated since the process started. Game outcomes only
//! touch the session counters; logout and exit fold them into the lifetime totals.

use serde::{Deserialize, Serialize};

/// Username reserved for the unsaved guest identity
pub const GUEST_USERNAME: &str = "guest";

/// A wins/losses/plays triple
#[derive(Debug, Default, Clone, Copy, PartialEq, Eq)]
pub struct Tally {
    pub wins: u32,
    pub losses: u32,
    pub plays: u32,
}

/// One stored account
///
/// The serialized field set is fixed: it is exactly the on-disk record layout.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Account {
    name: String,
    username: String,
    password: String,
    wins: u32,
    losses: u32,
    plays: u32,
    session_wins: u32,
    session_losses: u32,
    session_plays: u32,
}

/// Read-only statistics view for display
#[derive(Debug, Clone, PartialEq)]
pub struct AccountSummary {
    pub name: String,
    pub total_games: u32,
    pub total_wins: u32,
    pub total_losses: u32,
    pub win_rate: f64,
    pub session_plays: u32,
    pub session_wins: u32,
}

impl Account {
    /// Create an account with every counter at zero
    #[must_use]
    pub fn new(
        name: impl Into<String>,
        username: impl Into<String>,
        password: impl Into<String>,
    ) -> Self {
        Self {
            name: name.into(),
            username: username.into(),
            password: password.into(),
            wins: 0,
            losses: 0,
            plays: 0,
            session_wins: 0,
            session_losses: 0,
            session_plays: 0,
        }
    }

    /// Create the ephemeral guest record
    ///
    /// # Examples
    /// ```
    /// use hangman::core::Account;
    ///
    /// let guest = Account::guest("Ada");
    /// assert!(guest.is_guest());
    /// assert_eq!(guest.name(), "Ada");
    /// ```
    #[must_use]
    pub fn guest(name: impl Into<String>) -> Self {
        Self::new(name, GUEST_USERNAME, "")
    }

    #[must_use]
    pub fn is_guest(&self) -> bool {
        self.username == GUEST_USERNAME
    }

    #[inline]
    #[must_use]
    pub fn name(&self) -> &str {
        &self.name
    }

    #[inline]
    #[must_use]
    pub fn username(&self) -> &str {
        &self.username
    }

    /// Replace the display name
    pub fn rename(&mut self, name: impl Into<String>) {
        self.name = name.into();
    }

    /// Exact comparison against the stored password
    #[must_use]
    pub fn password_matches(&self, candidate: &str) -> bool {
        self.password == candidate
    }

    #[must_use]
    pub const fn lifetime(&self) -> Tally {
        Tally {
            wins: self.wins,
            losses: self.losses,
            plays: self.plays,
        }
    }

    #[must_use]
    pub const fn session(&self) -> Tally {
        Tally {
            wins: self.session_wins,
            losses: self.session_losses,
            plays: self.session_plays,
        }
    }

    /// Count one finished round against the session counters
    pub fn record_game(&mut self, won: bool) {
        if won {
            self.session_wins = self.session_wins.saturating_add(1);
        } else {
            self.session_losses = self.session_losses.saturating_add(1);
        }
        self.session_plays = self.session_plays.saturating_add(1);
    }

    /// Add session counters into lifetime totals and zero the session counters
    ///
    /// Zeroing keeps a second fold in the same process from counting the same
    /// rounds twice. Counters saturate at `u32::MAX`.
    pub fn fold_session_into_lifetime(&mut self) {
        self.wins = self.wins.saturating_add(self.session_wins);
        self.losses = self.losses.saturating_add(self.session_losses);
        self.plays = self.plays.saturating_add(self.session_plays);
        self.session_wins = 0;
        self.session_losses = 0;
        self.session_plays = 0;
    }

    /// Copy a guest's session counters over this account's (new registrations)
    pub fn adopt_guest_session(&mut self, guest: &Self) {
        self.session_wins = guest.session_wins;
        self.session_losses = guest.session_losses;
        self.session_plays = guest.session_plays;
    }

    /// Add a guest's session counters onto this account's (logins)
    pub fn absorb_guest_session(&mut self, guest: &Self) {
        self.session_wins = self.session_wins.saturating_add(guest.session_wins);
        self.session_losses = self.session_losses.saturating_add(guest.session_losses);
        self.session_plays = self.session_plays.saturating_add(guest.session_plays);
    }

    /// Whether both counter sets satisfy `plays == wins + losses`
    #[must_use]
    pub const fn is_consistent(&self) -> bool {
        matches!(self.wins.checked_add(self.losses), Some(total) if total == self.plays)
            && matches!(
                self.session_wins.checked_add(self.session_losses),
                Some(total) if total == self.session_plays
            )
    }

    #[must_use]
    pub fn summary(&self) -> AccountSummary {
        let win_rate = if self.plays > 0 {
            f64::from(self.wins) / f64::from(self.plays) * 100.0
        } else {
            0.0
        };

        AccountSummary {
            name: self.name.clone(),
            total_games: self.plays,
            total_wins: self.wins,
            total_losses: self.losses,
            win_rate,
            session_plays: self.session_plays,
            session_wins: self.session_wins,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn guest_with(wins: u32, losses: u32) -> Account {
        let mut guest = Account::guest("visitor");
        for _ in 0..wins {
            guest.record_game(true);
        }
        for _ in 0..losses {
            guest.record_game(false);
        }
        guest
    }

    #[test]
    fn new_account_starts_at_zero() {
        let account = Account::new("Ada", "ada", "Secr3t!");
        assert_eq!(account.lifetime(), Tally::default());
        assert_eq!(account.session(), Tally::default());
        assert!(!account.is_guest());
        assert!(account.password_matches("Secr3t!"));
        assert!(!account.password_matches("secr3t!"));
    }

    #[test]
    fn record_game_keeps_session_invariant() {
        let account = guest_with(2, 3);
        assert_eq!(
            account.session(),
            Tally {
                wins: 2,
                losses: 3,
                plays: 5
            }
        );
        assert!(account.is_consistent());
    }

    #[test]
    fn fold_moves_session_into_lifetime_once() {
        let mut account = Account::new("Ada", "ada", "x");
        account.record_game(true);
        account.record_game(false);

        account.fold_session_into_lifetime();
        assert_eq!(
            account.lifetime(),
            Tally {
                wins: 1,
                losses: 1,
                plays: 2
            }
        );
        assert_eq!(account.session(), Tally::default());

        // A second fold adds nothing
        account.fold_session_into_lifetime();
        assert_eq!(account.lifetime().plays, 2);
        assert!(account.is_consistent());
    }

    #[test]
    fn adopt_copies_guest_session_only() {
        let guest = guest_with(3, 0);
        let mut account = Account::new("Ada", "ada", "x");
        account.adopt_guest_session(&guest);

        assert_eq!(account.session().wins, 3);
        assert_eq!(account.session().plays, 3);
        assert_eq!(account.lifetime().wins, 0);
    }

    #[test]
    fn absorb_adds_to_existing_session() {
        let guest = guest_with(1, 1);
        let mut account = Account::new("Ada", "ada", "x");
        for _ in 0..5 {
            account.record_game(true);
        }
        account.absorb_guest_session(&guest);

        assert_eq!(account.session().plays, 7);
        assert_eq!(account.session().wins, 6);
        assert_eq!(account.session().losses, 1);
    }

    #[test]
    fn summary_win_rate() {
        let mut account = Account::new("Ada", "ada", "x");
        assert!(account.summary().win_rate.abs() < f64::EPSILON);

        account.record_game(true);
        account.record_game(true);
        account.record_game(false);
        account.record_game(true);
        account.fold_session_into_lifetime();

        let summary = account.summary();
        assert_eq!(summary.total_games, 4);
        assert_eq!(summary.total_wins, 3);
        assert!((summary.win_rate - 75.0).abs() < 1e-9);
    }

    #[test]
    fn serializes_flat_record() {
        let account = Account::new("Ada", "ada", "pw");
        let value = serde_json::to_value(&account).unwrap();
        let object = value.as_object().unwrap();

        let mut keys: Vec<&str> = object.keys().map(String::as_str).collect();
        keys.sort_unstable();
        assert_eq!(
            keys,
            [
                "losses",
                "name",
                "password",
                "plays",
                "session_losses",
                "session_plays",
                "session_wins",
                "username",
                "wins"
            ]
        );
    }

    #[test]
    fn record_without_username_fails_to_parse() {
        let json = r#"{"name":"Ada","password":"pw","wins":0,"losses":0,"plays":0,
            "session_wins":0,"session_losses":0,"session_plays":0}"#;
        let err = serde_json::from_str::<Account>(json).unwrap_err();
        assert!(err.to_string().contains("username"));
    }

    #[test]
    fn counters_from_disk_saturate_instead_of_overflowing() {
        let json = format!(
            r#"{{"name":"Max","username":"max","password":"pw","wins":{max},"losses":0,
            "plays":{max},"session_wins":{max},"session_losses":{max},"session_plays":{max}}}"#,
            max = u32::MAX
        );
        let mut account: Account = serde_json::from_str(&json).unwrap();
        assert!(!account.is_consistent());

        account.record_game(true);
        account.absorb_guest_session(&guest_with(2, 2));
        account.fold_session_into_lifetime();

        assert_eq!(account.lifetime().wins, u32::MAX);
        assert_eq!(account.lifetime().plays, u32::MAX);
        assert_eq!(account.lifetime().losses, u32::MAX);
        assert_eq!(account.session(), Tally::default());
    }
}
