//! Bounded attempts and the retry/abort escalation
//!
//! Each prompt gets a fixed budget of failures. Once it is spent the flow is
//! `Exhausted` and the user picks `Retry` (start the whole process again) or
//! `Abort` (back to the menu). Flows drive this with a loop, so a user who keeps
//! retrying never grows the stack.

use std::fmt;

/// Failed inputs allowed per prompt before escalation
pub const MAX_ATTEMPTS: u32 = 5;

/// Which multi-step process is being attempted
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Process {
    Login,
    Registration,
}

impl fmt::Display for Process {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Login => write!(f, "login"),
            Self::Registration => write!(f, "registration"),
        }
    }
}

/// Where a bounded prompt stands
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum AttemptState {
    Prompting { remaining: u32 },
    Exhausted,
}

/// Failure counter for one prompt
#[derive(Debug, Clone)]
pub struct AttemptBudget {
    limit: u32,
    failures: u32,
}

impl AttemptBudget {
    #[must_use]
    pub const fn new(limit: u32) -> Self {
        Self { limit, failures: 0 }
    }

    #[must_use]
    pub const fn state(&self) -> AttemptState {
        if self.failures >= self.limit {
            AttemptState::Exhausted
        } else {
            AttemptState::Prompting {
                remaining: self.limit - self.failures,
            }
        }
    }

    /// Count one rejected input and report the new state
    pub fn record_failure(&mut self) -> AttemptState {
        self.failures = self.failures.saturating_add(1).min(self.limit);
        self.state()
    }
}

impl Default for AttemptBudget {
    fn default() -> Self {
        Self::new(MAX_ATTEMPTS)
    }
}

/// The user's answer once a budget is exhausted
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Escalation {
    Retry,
    Abort,
}

impl Escalation {
    /// `1` retries, `2` aborts; anything else is not a choice
    #[must_use]
    pub fn parse(input: &str) -> Option<Self> {
        match input.trim() {
            "1" => Some(Self::Retry),
            "2" => Some(Self::Abort),
            _ => None,
        }
    }
}
