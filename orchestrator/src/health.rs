//! Post-restart recovery confirmation

use std::sync::Arc;
use std::time::Duration;
use tokio::time::{interval, MissedTickBehavior};
use tracing::{debug, info};

use crate::panel::PanelClient;

/// State string the panel reports once the server is back up.
const RUNNING_STATE: &str = "running";

/// Polls the panel's status endpoint until the managed server reports
/// `running` again.
///
/// The poll runs on a fixed interval with no backoff and no upper bound on
/// attempts; the expected downtime is bounded by the hosting platform's own
/// restart duration. Transient query failures (network errors, non-200
/// responses, malformed bodies) are retried on the same interval.
pub struct HealthPoller {
    panel: Arc<PanelClient>,
    interval: Duration,
}

impl HealthPoller {
    pub fn new(panel: Arc<PanelClient>, interval: Duration) -> Self {
        Self { panel, interval }
    }

    /// Block the current cycle until the server reports `running`.
    pub async fn await_online(&self) {
        let mut ticker = interval(self.interval);
        ticker.set_missed_tick_behavior(MissedTickBehavior::Delay);
        let mut checks: u64 = 0;

        loop {
            ticker.tick().await;
            checks += 1;

            match self.panel.current_state().await {
                Ok(state) if state == RUNNING_STATE => {
                    info!("Server reported running after {} status checks", checks);
                    return;
                }
                Ok(state) => {
                    debug!("Server not yet online (state: '{}')", state);
                }
                Err(e) => {
                    debug!("Status check failed, retrying: {}", e);
                }
            }
        }
    }
}
