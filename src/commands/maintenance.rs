//! Account document maintenance
//!
//! Offline operations on the accounts file: repair, inspection, backup, and
//! pruning of old backups.

use crate::storage::{AccountStore, RepairOutcome, StoreError, StoreFileInfo};
use std::path::{Path, PathBuf};

/// Default backup name for `backup_store`
pub const DEFAULT_BACKUP_NAME: &str = "backup";

/// Default number of backups `cleanup_backups` keeps
pub const DEFAULT_BACKUPS_KEPT: usize = 5;

/// Validate the document, quarantining and reinitializing it if corrupt
///
/// # Errors
/// Returns `StoreError::Write` if the document cannot be replaced.
pub fn repair_store(path: &Path) -> Result<RepairOutcome, StoreError> {
    AccountStore::repair(path)
}

#[must_use]
pub fn store_info(path: &Path) -> StoreFileInfo {
    AccountStore::file_info(path)
}

/// Load the document and write its records to `<stem>_<name>.json`
///
/// # Errors
/// Returns the load error for an unreadable or malformed document, or the
/// write error for the backup file.
pub fn backup_store(path: &Path, name: &str) -> Result<PathBuf, StoreError> {
    AccountStore::load(path)?.backup(name)
}

/// Remove all but the `keep` newest backups of the document
///
/// # Errors
/// Returns `StoreError` if the directory cannot be listed or a file removed.
pub fn cleanup_backups(path: &Path, keep: usize) -> Result<Vec<PathBuf>, StoreError> {
    AccountStore::cleanup_old_backups(path, keep)
}
