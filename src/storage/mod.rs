//! Account persistence
//!
//! A flat JSON document of account records, read whole at startup and rewritten
//! whole on every save.

pub mod file;
mod store;

pub use store::{
    AccountStore, CORRUPTED_BACKUP_SUFFIX, DEFAULT_ACCOUNTS_FILE, OpenedStore, RepairOutcome,
    StoreError, StoreFileInfo,
};
