//! Terminal output formatting
//!
//! Gallows art, masks, banners, and pretty-printers for command results.

pub mod display;
pub mod formatters;

pub use display::{
    print_account_summary, print_backup_created, print_cleanup_result, print_file_info,
    print_repair_outcome,
};
