//! Escalating pre-restart warning sequence

use tokio::time::sleep;
use tracing::info;

use crate::constants::countdown::MILESTONES;
use crate::errors::CycleError;
use crate::notify::Notifier;

/// Runs the fixed warning sequence leading up to a restart.
///
/// Milestones are strictly sequential: the next wait only starts once both
/// delivery attempts for the current warning have resolved, so the lead-time
/// labels players see always decrease monotonically. Every milestone also
/// flushes world state through the console channel; losing that channel
/// aborts the rest of the sequence.
pub struct CountdownSequencer<'a> {
    notifier: &'a Notifier,
}

impl<'a> CountdownSequencer<'a> {
    pub fn new(notifier: &'a Notifier) -> Self {
        Self { notifier }
    }

    /// Walk the milestone table, then emit the final pre-restart warning.
    pub async fn run(&self) -> Result<(), CycleError> {
        for (label, wait_after) in MILESTONES {
            self.notifier
                .notify(&format!("Server will restart in {}!", label), true)
                .await?;
            info!(
                "Warned players ({} remaining), next milestone in {}s",
                label,
                wait_after.as_secs()
            );
            sleep(wait_after).await;
        }

        self.notifier.notify("Restarting server now!", true).await
    }
}
