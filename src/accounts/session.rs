//! Account lifecycle: guest play, registration, login, logout, exit
//!
//! `Session` owns the store and the acting identity. A registered identity is a
//! working copy of its store record; every change is mirrored back into the
//! store so a save always writes the latest counters.

use crate::core::password::{PolicyViolation, check_password};
use crate::core::{Account, GUEST_USERNAME};
use crate::storage::{AccountStore, StoreError};
use thiserror::Error;
use tracing::{error, info, warn};

/// Reasons a lifecycle operation was refused
#[derive(Debug, Error)]
pub enum AccountError {
    #[error("username cannot be empty")]
    EmptyUsername,
    #[error("username '{0}' is reserved")]
    ReservedUsername(String),
    #[error("username '{0}' is already taken")]
    UsernameTaken(String),
    #[error("username '{0}' was not found")]
    UnknownUsername(String),
    #[error("incorrect password")]
    WrongPassword,
    #[error("password does not meet requirements: {}", describe_violations(.0))]
    WeakPassword(Vec<PolicyViolation>),
    #[error(transparent)]
    Store(#[from] StoreError),
}

fn describe_violations(violations: &[PolicyViolation]) -> String {
    violations
        .iter()
        .map(ToString::to_string)
        .collect::<Vec<_>>()
        .join(", ")
}

/// How a persisting operation ended up on disk
#[derive(Debug)]
#[must_use]
pub enum SaveStatus {
    Saved,
    /// Nothing to persist (guest identity)
    Skipped,
    /// The in-memory state is still valid; only the write failed
    Failed(StoreError),
}

/// The identity that just left, with how its progress was persisted
#[derive(Debug)]
pub struct Departure {
    pub account: Account,
    pub save: SaveStatus,
}

/// Store plus acting identity for one process run
#[derive(Debug)]
pub struct Session {
    store: AccountStore,
    current: Account,
}

impl Session {
    /// Start as a guest named `guest_name`
    #[must_use]
    pub fn new(store: AccountStore, guest_name: impl Into<String>) -> Self {
        Self {
            store,
            current: Account::guest(guest_name),
        }
    }

    /// The acting identity
    #[must_use]
    pub const fn account(&self) -> &Account {
        &self.current
    }

    #[must_use]
    pub const fn store(&self) -> &AccountStore {
        &self.store
    }

    #[must_use]
    pub fn is_guest(&self) -> bool {
        self.current.is_guest()
    }

    /// Change the display name of a guest identity; registered names are fixed
    pub fn rename_guest(&mut self, name: impl Into<String>) -> bool {
        if !self.current.is_guest() {
            return false;
        }
        self.current.rename(name);
        true
    }

    /// Count a finished round for the acting identity
    pub fn record_game(&mut self, won: bool) {
        self.current.record_game(won);
        self.mirror();
    }

    /// Check that `username` may be registered
    ///
    /// # Errors
    /// `EmptyUsername`, `ReservedUsername`, or `UsernameTaken`.
    pub fn check_new_username(&self, username: &str) -> Result<(), AccountError> {
        let username = username.trim();
        if username.is_empty() {
            return Err(AccountError::EmptyUsername);
        }
        if username == GUEST_USERNAME {
            return Err(AccountError::ReservedUsername(username.to_string()));
        }
        if self.store.contains(username) {
            return Err(AccountError::UsernameTaken(username.to_string()));
        }
        Ok(())
    }

    /// Check that `username` names a stored account
    ///
    /// # Errors
    /// `UnknownUsername` if it does not.
    pub fn check_existing_username(&self, username: &str) -> Result<(), AccountError> {
        if self.store.contains(username.trim()) {
            Ok(())
        } else {
            Err(AccountError::UnknownUsername(username.trim().to_string()))
        }
    }

    /// Check `password` against the stored one for `username`
    ///
    /// # Errors
    /// `UnknownUsername` or `WrongPassword`.
    pub fn verify_password(&self, username: &str, password: &str) -> Result<(), AccountError> {
        let account = self
            .store
            .get(username.trim())
            .ok_or_else(|| AccountError::UnknownUsername(username.trim().to_string()))?;

        if account.password_matches(password) {
            Ok(())
        } else {
            Err(AccountError::WrongPassword)
        }
    }

    /// Create, store, and switch to a new account
    ///
    /// A blank `display_name` defaults to the username. A guest's session
    /// counters carry over into the new account; lifetime counters start at zero.
    /// A failed save is reported in the returned status, not as an error.
    ///
    /// # Errors
    /// Username errors from `check_new_username` and `WeakPassword`.
    pub fn register(
        &mut self,
        username: &str,
        password: &str,
        display_name: &str,
    ) -> Result<SaveStatus, AccountError> {
        self.check_new_username(username)?;
        let violations = check_password(password);
        if !violations.is_empty() {
            return Err(AccountError::WeakPassword(violations));
        }

        let username = username.trim();
        let name = match display_name.trim() {
            "" => username,
            name => name,
        };

        let mut account = Account::new(name, username, password);
        if self.current.is_guest() {
            account.adopt_guest_session(&self.current);
        }

        self.store.insert(account.clone())?;
        self.current = account;
        info!(username, "registered new account");

        Ok(self.persist())
    }

    /// Authenticate and switch to an existing account
    ///
    /// A guest's session counters are added to the account's own.
    ///
    /// # Errors
    /// `UnknownUsername` or `WrongPassword`; the identity is unchanged.
    pub fn login(&mut self, username: &str, password: &str) -> Result<(), AccountError> {
        self.verify_password(username, password)?;

        let username = username.trim();
        let Some(mut account) = self.store.get(username).cloned() else {
            return Err(AccountError::UnknownUsername(username.to_string()));
        };

        if self.current.is_guest() {
            account.absorb_guest_session(&self.current);
        }
        self.current = account;
        self.mirror();
        info!(username, "logged in");
        Ok(())
    }

    /// Save a registered identity's progress and fall back to a new guest
    ///
    /// Returns `None` for a guest identity, which is left untouched.
    pub fn logout(&mut self, guest_name: impl Into<String>) -> Option<Departure> {
        if self.current.is_guest() {
            return None;
        }

        let save = self.fold_and_persist();
        let account = std::mem::replace(&mut self.current, Account::guest(guest_name));
        info!(username = account.username(), "logged out");
        Some(Departure { account, save })
    }

    /// Save a registered identity's progress and end the run
    pub fn exit(mut self) -> Departure {
        let save = if self.current.is_guest() {
            SaveStatus::Skipped
        } else {
            self.fold_and_persist()
        };
        Departure {
            account: self.current,
            save,
        }
    }

    fn fold_and_persist(&mut self) -> SaveStatus {
        self.current.fold_session_into_lifetime();
        self.mirror();
        self.persist()
    }

    fn persist(&self) -> SaveStatus {
        match self.store.save() {
            Ok(()) => SaveStatus::Saved,
            Err(e) => {
                error!("{e}");
                SaveStatus::Failed(e)
            }
        }
    }

    fn mirror(&mut self) {
        if !self.current.is_guest() && !self.store.update(self.current.clone()) {
            warn!(
                username = self.current.username(),
                "acting account missing from store"
            );
        }
    }
}
