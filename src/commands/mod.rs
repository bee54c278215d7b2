//! Command implementations

pub mod maintenance;
pub mod play;
pub mod stats;

pub use maintenance::{
    DEFAULT_BACKUP_NAME, DEFAULT_BACKUPS_KEPT, backup_store, cleanup_backups, repair_store,
    store_info,
};
pub use play::play_round;
pub use stats::account_stats;
