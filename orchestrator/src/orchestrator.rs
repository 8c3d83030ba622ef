//! Top-level restart cycle loop

use std::fmt;
use std::sync::Arc;
use std::time::Duration;

use chrono::Utc;
use chrono_tz::Tz;
use tokio::time::sleep;
use tracing::{error, info, warn};

use crate::constants::countdown::LEAD_WINDOW;
use crate::countdown::CountdownSequencer;
use crate::health::HealthPoller;
use crate::notify::Notifier;
use crate::panel::PanelClient;
use crate::schedule::{next_trigger, ScheduleEntry};

/// Where the currently live cycle is in its lifecycle. Exactly one cycle is
/// in flight at a time; the orchestrator owns this value for its lifetime.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CycleState {
    Idle,
    Armed,
    Counting,
    Restarting,
    Polling,
    Recovered,
}

impl fmt::Display for CycleState {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            CycleState::Idle => "idle",
            CycleState::Armed => "armed",
            CycleState::Counting => "counting",
            CycleState::Restarting => "restarting",
            CycleState::Polling => "polling",
            CycleState::Recovered => "recovered",
        };
        write!(f, "{}", name)
    }
}

/// Remaining wait before the countdown may start, given the time left until
/// the trigger instant. A late wake yields a negative remainder; that clamps
/// to zero so the countdown starts immediately instead of panicking on a
/// negative sleep.
pub fn pre_countdown_wait(until_trigger: chrono::Duration) -> Duration {
    let lead = chrono::Duration::seconds(LEAD_WINDOW.as_secs() as i64);
    (until_trigger - lead).to_std().unwrap_or(Duration::ZERO)
}

/// Drives the recurring restart cycle: compute the next trigger, warn with
/// escalating lead-time, save, power-cycle, confirm recovery, repeat.
pub struct RestartOrchestrator {
    timezone: Tz,
    schedule: Vec<ScheduleEntry>,
    notifier: Notifier,
    panel: Arc<PanelClient>,
    poller: HealthPoller,
    state: CycleState,
}

impl RestartOrchestrator {
    pub fn new(
        timezone: Tz,
        schedule: Vec<ScheduleEntry>,
        notifier: Notifier,
        panel: Arc<PanelClient>,
        poller: HealthPoller,
    ) -> Self {
        Self {
            timezone,
            schedule,
            notifier,
            panel,
            poller,
            state: CycleState::Idle,
        }
    }

    fn transition(&mut self, next: CycleState) {
        info!("Cycle state: {} -> {}", self.state, next);
        self.state = next;
    }

    /// Run restart cycles forever. Each iteration recomputes the next trigger
    /// from the current wall clock, never from the previous trigger, so
    /// schedule drift cannot accumulate.
    pub async fn run(mut self) {
        loop {
            let now = Utc::now().with_timezone(&self.timezone);
            let trigger = next_trigger(now, &self.schedule);
            let until_trigger = trigger.signed_duration_since(now);
            info!(
                "Next restart scheduled at: {} (in {} seconds)",
                trigger,
                until_trigger.num_seconds()
            );

            self.transition(CycleState::Armed);
            sleep(pre_countdown_wait(until_trigger)).await;

            self.transition(CycleState::Counting);
            let sequencer = CountdownSequencer::new(&self.notifier);
            if let Err(e) = sequencer.run().await {
                // Skip this restart entirely; re-running the same countdown
                // step would double-fire player-visible warnings. The next
                // trigger is recomputed from the current wall clock.
                error!("Aborting cycle, console channel lost: {}", e);
                self.transition(CycleState::Idle);
                continue;
            }

            self.transition(CycleState::Restarting);
            if let Err(e) = self.panel.restart().await {
                // The platform may be mid-restart even when the request
                // errors, so polling proceeds either way.
                warn!("Restart request failed: {}", e);
            }

            self.transition(CycleState::Polling);
            self.poller.await_online().await;

            self.transition(CycleState::Recovered);
            self.notifier.announce("Server is back online!").await;

            self.transition(CycleState::Idle);
        }
    }
}
