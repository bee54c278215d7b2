//! Interactive console mode
//!
//! The `Console` seam and the menu loop that dispatches between game rounds and
//! the account lifecycle.

mod console;
pub mod menu;

#[cfg(test)]
pub use console::ScriptedConsole;
pub use console::{Console, StdConsole};
pub use menu::{MenuAction, run_session};
