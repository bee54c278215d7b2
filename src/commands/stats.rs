//! Account statistics lookup

use crate::accounts::AccountError;
use crate::core::AccountSummary;
use crate::storage::AccountStore;

/// Summary for a stored account
///
/// # Errors
/// `AccountError::UnknownUsername` if no record has that username.
pub fn account_stats(store: &AccountStore, username: &str) -> Result<AccountSummary, AccountError> {
    let username = username.trim();
    store
        .get(username)
        .map(crate::core::Account::summary)
        .ok_or_else(|| AccountError::UnknownUsername(username.to_string()))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::accounts::Session;
    use crate::storage::DEFAULT_ACCOUNTS_FILE;

    #[test]
    fn summary_of_stored_account() {
        let dir = tempfile::tempdir().unwrap();
        let store = AccountStore::empty(dir.path().join(DEFAULT_ACCOUNTS_FILE));
        let mut session = Session::new(store, "Visitor");
        let _ = session.register("ada", "Abcdef1!", "Ada").unwrap();
        session.record_game(true);
        session.record_game(false);
        let departure = session.exit();
        assert_eq!(departure.account.lifetime().plays, 2);

        let store = AccountStore::load(dir.path().join(DEFAULT_ACCOUNTS_FILE)).unwrap();
        let summary = account_stats(&store, " ada ").unwrap();
        assert_eq!(summary.name, "Ada");
        assert_eq!(summary.total_games, 2);
        assert_eq!(summary.total_wins, 1);
        assert!((summary.win_rate - 50.0).abs() < 1e-9);
        assert_eq!(summary.session_plays, 0);
    }

    #[test]
    fn unknown_username() {
        let store = AccountStore::empty("unused.json");
        assert!(matches!(
            account_stats(&store, "nobody"),
            Err(AccountError::UnknownUsername(name)) if name == "nobody"
        ));
    }
}
