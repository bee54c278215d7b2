//! Account lifecycle
//!
//! `Session` holds the account store and the acting identity. The `flow`
//! functions drive login, registration, and logout over a `Console` with
//! bounded retries from `retry`.

pub mod flow;
pub mod retry;
mod session;

pub use flow::{FlowOutcome, GUEST_PLACEHOLDER_NAME};
pub use retry::{AttemptBudget, AttemptState, Escalation, MAX_ATTEMPTS, Process};
pub use session::{AccountError, Departure, SaveStatus, Session};
