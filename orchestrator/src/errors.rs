//! Error types for the restart cycle
//!
//! Broadcast delivery problems and status-poll hiccups are logged and
//! tolerated where they occur; this module only models the failures that
//! abort the rest of a cycle.

use std::fmt;

/// A failure that aborts the remainder of the current restart cycle.
#[derive(Debug)]
pub enum CycleError {
    /// The remote console rejected or failed a command. Without the console
    /// there is no in-game warning and no pre-restart save, so the cycle
    /// must not proceed to the restart.
    Console { command: String, reason: String },
}

impl fmt::Display for CycleError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            CycleError::Console { command, reason } => {
                write!(f, "Remote console command '{}' failed: {}", command, reason)
            }
        }
    }
}

impl std::error::Error for CycleError {}
