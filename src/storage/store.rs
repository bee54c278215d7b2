//! JSON-backed account store
//!
//! The whole document is read into memory once and rewritten in full on every
//! save. The on-disk format is a JSON array of account records; in memory the
//! records are keyed by username.

use super::file::{parent_dir, sibling_with_suffix, write_atomic};
use crate::core::Account;
use rustc_hash::FxHashMap;
use std::fs;
use std::io;
use std::path::{Path, PathBuf};
use std::time::SystemTime;
use thiserror::Error;
use tracing::{debug, error, info, warn};

/// Default location of the account document
pub const DEFAULT_ACCOUNTS_FILE: &str = "accounts.json";

/// Suffix given to a quarantined corrupt document
pub const CORRUPTED_BACKUP_SUFFIX: &str = "corrupted_backup";

const EMPTY_DOCUMENT: &str = "[]";

/// Errors from reading, writing, or updating the store
#[derive(Debug, Error)]
pub enum StoreError {
    #[error("failed to read {}: {source}", .path.display())]
    Read {
        path: PathBuf,
        #[source]
        source: io::Error,
    },
    #[error("failed to write {}: {source}", .path.display())]
    Write {
        path: PathBuf,
        #[source]
        source: io::Error,
    },
    #[error("{} is not a valid account document: {source}", .path.display())]
    Malformed {
        path: PathBuf,
        #[source]
        source: serde_json::Error,
    },
    #[error("failed to encode accounts: {0}")]
    Encode(#[source] serde_json::Error),
    #[error("username '{0}' is already taken")]
    UsernameTaken(String),
    #[error("guest records are never stored")]
    GuestRecord,
}

/// Result of opening the store at startup
#[derive(Debug)]
pub struct OpenedStore {
    pub store: AccountStore,
    /// The document did not exist and an empty one was written
    pub created: bool,
    /// Why the store fell back to empty, if it did
    pub load_error: Option<StoreError>,
    /// Where an unloadable document was moved before the empty store took over
    pub quarantined: Option<PathBuf>,
}

/// What `AccountStore::repair` did
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum RepairOutcome {
    /// The document parsed; nothing changed
    Intact,
    /// The document was replaced with an empty one
    Reinitialized { quarantined: Option<PathBuf> },
}

/// Facts about the document on disk
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct StoreFileInfo {
    pub exists: bool,
    pub size_bytes: u64,
    pub account_count: usize,
    pub is_valid_json: bool,
    pub last_modified: Option<SystemTime>,
}

/// In-memory account collection bound to its document path
#[derive(Debug, Clone)]
pub struct AccountStore {
    path: PathBuf,
    accounts: FxHashMap<String, Account>,
}

impl AccountStore {
    /// An empty store that will save to `path`
    #[must_use]
    pub fn empty(path: impl Into<PathBuf>) -> Self {
        Self {
            path: path.into(),
            accounts: FxHashMap::default(),
        }
    }

    /// Read every record from `path`
    ///
    /// A missing document is an empty store. When two records share a username
    /// the later one wins.
    ///
    /// # Errors
    /// Returns `StoreError::Read` if the file exists but cannot be read and
    /// `StoreError::Malformed` if it is not a JSON array of complete records
    /// (a record without a username included).
    pub fn load(path: impl Into<PathBuf>) -> Result<Self, StoreError> {
        let mut store = Self::empty(path);

        let content = match fs::read_to_string(&store.path) {
            Ok(content) => content,
            Err(e) if e.kind() == io::ErrorKind::NotFound => {
                debug!(path = %store.path.display(), "no account document yet");
                return Ok(store);
            }
            Err(source) => {
                return Err(StoreError::Read {
                    path: store.path,
                    source,
                });
            }
        };

        let records: Vec<Account> =
            serde_json::from_str(&content).map_err(|source| StoreError::Malformed {
                path: store.path.clone(),
                source,
            })?;

        for record in records {
            if !record.is_consistent() {
                warn!(
                    username = record.username(),
                    "account counters disagree (plays != wins + losses)"
                );
            }
            if store
                .accounts
                .insert(record.username().to_string(), record)
                .is_some()
            {
                warn!("duplicate username in account document, keeping the last record");
            }
        }

        info!(
            count = store.accounts.len(),
            path = %store.path.display(),
            "loaded accounts"
        );
        Ok(store)
    }

    /// Create `path` holding an empty array if it does not exist
    ///
    /// Returns whether the file was created.
    ///
    /// # Errors
    /// Returns `StoreError::Write` if the file cannot be created.
    pub fn ensure_file(path: &Path) -> Result<bool, StoreError> {
        if path.exists() {
            return Ok(false);
        }
        write_atomic(path, EMPTY_DOCUMENT).map_err(|source| StoreError::Write {
            path: path.to_path_buf(),
            source,
        })?;
        info!(path = %path.display(), "created empty account document");
        Ok(true)
    }

    /// Startup entry point: ensure the document exists, then load it
    ///
    /// Never fails. Any problem is logged, returned in `load_error`, and leaves an
    /// empty store that still saves to `path`. A malformed document is moved
    /// aside first (see `repair`) so the empty store cannot save over it.
    pub fn open(path: impl Into<PathBuf>) -> OpenedStore {
        let path = path.into();

        let created = Self::ensure_file(&path).unwrap_or_else(|e| {
            error!("{e}");
            false
        });

        match Self::load(&path) {
            Ok(store) => OpenedStore {
                store,
                created,
                load_error: None,
                quarantined: None,
            },
            Err(e) => {
                error!("{e}; starting with an empty account set");
                let quarantined = if matches!(e, StoreError::Malformed { .. }) {
                    match Self::repair(&path) {
                        Ok(RepairOutcome::Reinitialized { quarantined }) => quarantined,
                        Ok(RepairOutcome::Intact) => None,
                        Err(repair_error) => {
                            error!("{repair_error}");
                            None
                        }
                    }
                } else {
                    None
                };
                OpenedStore {
                    store: Self::empty(path),
                    created,
                    load_error: Some(e),
                    quarantined,
                }
            }
        }
    }

    /// Write every record to the document, replacing it
    ///
    /// # Errors
    /// Returns `StoreError::Encode` or `StoreError::Write` on failure; the
    /// in-memory records are untouched either way.
    pub fn save(&self) -> Result<(), StoreError> {
        self.write_document(&self.path)?;
        info!(
            count = self.accounts.len(),
            path = %self.path.display(),
            "saved accounts"
        );
        Ok(())
    }

    /// Copy the current records to `<stem>_<name>.json` beside the document
    ///
    /// # Errors
    /// Returns `StoreError::Encode` or `StoreError::Write` on failure.
    pub fn backup(&self, name: &str) -> Result<PathBuf, StoreError> {
        let target = sibling_with_suffix(&self.path, name);
        self.write_document(&target)?;
        info!(path = %target.display(), "backup created");
        Ok(target)
    }

    #[must_use]
    pub fn path(&self) -> &Path {
        &self.path
    }

    #[must_use]
    pub fn get(&self, username: &str) -> Option<&Account> {
        self.accounts.get(username)
    }

    #[must_use]
    pub fn contains(&self, username: &str) -> bool {
        self.accounts.contains_key(username)
    }

    /// Add a new account
    ///
    /// # Errors
    /// Returns `StoreError::UsernameTaken` if the username exists and
    /// `StoreError::GuestRecord` for guest accounts.
    pub fn insert(&mut self, account: Account) -> Result<(), StoreError> {
        if account.is_guest() {
            return Err(StoreError::GuestRecord);
        }
        if self.contains(account.username()) {
            return Err(StoreError::UsernameTaken(account.username().to_string()));
        }
        self.accounts
            .insert(account.username().to_string(), account);
        Ok(())
    }

    /// Replace an existing account with the same username
    ///
    /// Returns `false` (and stores nothing) if the username is unknown.
    pub fn update(&mut self, account: Account) -> bool {
        match self.accounts.get_mut(account.username()) {
            Some(existing) => {
                *existing = account;
                true
            }
            None => false,
        }
    }

    pub fn iter(&self) -> impl Iterator<Item = &Account> {
        self.accounts.values()
    }

    #[must_use]
    pub fn len(&self) -> usize {
        self.accounts.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.accounts.is_empty()
    }

    /// Quarantine a document that does not load as account records and start a
    /// fresh one
    ///
    /// Both broken JSON and well-formed JSON with incomplete records count as
    /// corrupt. An earlier quarantined copy is never overwritten.
    ///
    /// # Errors
    /// Returns `StoreError::Write` if the corrupt file cannot be moved aside or
    /// the empty document cannot be written.
    pub fn repair(path: &Path) -> Result<RepairOutcome, StoreError> {
        if holds_records(path) {
            return Ok(RepairOutcome::Intact);
        }
        warn!(path = %path.display(), "account document appears to be corrupted");

        let quarantined = if path.exists() {
            let backup = quarantine_target(path);
            fs::rename(path, &backup).map_err(|source| StoreError::Write {
                path: backup.clone(),
                source,
            })?;
            info!(path = %backup.display(), "corrupted document moved aside");
            Some(backup)
        } else {
            None
        };

        write_atomic(path, EMPTY_DOCUMENT).map_err(|source| StoreError::Write {
            path: path.to_path_buf(),
            source,
        })?;

        Ok(RepairOutcome::Reinitialized { quarantined })
    }

    /// Inspect the document without loading it into a store
    #[must_use]
    pub fn file_info(path: &Path) -> StoreFileInfo {
        let mut info = StoreFileInfo {
            exists: path.exists(),
            size_bytes: 0,
            account_count: 0,
            is_valid_json: false,
            last_modified: None,
        };

        if let Ok(meta) = fs::metadata(path) {
            info.size_bytes = meta.len();
            info.last_modified = meta.modified().ok();
        }

        if let Ok(content) = fs::read_to_string(path)
            && let Ok(value) = serde_json::from_str::<serde_json::Value>(&content)
        {
            info.is_valid_json = true;
            info.account_count = value.as_array().map_or(0, Vec::len);
        }

        info
    }

    /// Delete all but the `keep` most recent `<stem>_*.json` backups
    ///
    /// Returns the removed paths.
    ///
    /// # Errors
    /// Returns `StoreError::Read` if the directory cannot be listed and
    /// `StoreError::Write` if a backup cannot be removed.
    pub fn cleanup_old_backups(path: &Path, keep: usize) -> Result<Vec<PathBuf>, StoreError> {
        let dir = parent_dir(path);
        let stem = path
            .file_stem()
            .and_then(|s| s.to_str())
            .unwrap_or("accounts");
        let prefix = format!("{stem}_");

        let entries = fs::read_dir(dir).map_err(|source| StoreError::Read {
            path: dir.to_path_buf(),
            source,
        })?;

        let mut backups: Vec<(PathBuf, SystemTime)> = entries
            .filter_map(Result::ok)
            .filter(|entry| {
                let name = entry.file_name();
                let name = name.to_string_lossy();
                name.starts_with(&prefix) && name.ends_with(".json")
            })
            .filter_map(|entry| {
                let modified = entry.metadata().and_then(|m| m.modified()).ok()?;
                Some((entry.path(), modified))
            })
            .collect();

        // Newest first
        backups.sort_by(|a, b| b.1.cmp(&a.1));

        let mut removed = Vec::new();
        for (backup, _) in backups.into_iter().skip(keep) {
            fs::remove_file(&backup).map_err(|source| StoreError::Write {
                path: backup.clone(),
                source,
            })?;
            info!(path = %backup.display(), "removed old backup");
            removed.push(backup);
        }
        Ok(removed)
    }

    fn write_document(&self, target: &Path) -> Result<(), StoreError> {
        let mut records: Vec<&Account> = self.accounts.values().collect();
        records.sort_by(|a, b| a.username().cmp(b.username()));

        let json = serde_json::to_string_pretty(&records).map_err(StoreError::Encode)?;
        write_atomic(target, &json).map_err(|source| StoreError::Write {
            path: target.to_path_buf(),
            source,
        })
    }
}

/// Whether `path` parses as a complete list of account records
fn holds_records(path: &Path) -> bool {
    fs::read_to_string(path)
        .ok()
        .is_some_and(|content| serde_json::from_str::<Vec<Account>>(&content).is_ok())
}

/// `<stem>_corrupted_backup.json`, numbered if that name is already taken
fn quarantine_target(path: &Path) -> PathBuf {
    let first = sibling_with_suffix(path, CORRUPTED_BACKUP_SUFFIX);
    if !first.exists() {
        return first;
    }
    (1u32..)
        .map(|n| sibling_with_suffix(path, &format!("{CORRUPTED_BACKUP_SUFFIX}_{n}")))
        .find(|candidate| !candidate.exists())
        .unwrap_or(first)
}
