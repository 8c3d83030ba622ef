//! Countdown sequencer behavior under a paused clock: message order, exact
//! waits, and the per-sink failure domains.

use std::sync::{Arc, Mutex};
use std::time::Duration;

use anyhow::{anyhow, Result};
use async_trait::async_trait;
use tokio::time::Instant;

use orchestrator::constants::countdown::{LEAD_WINDOW, MILESTONES};
use orchestrator::countdown::CountdownSequencer;
use orchestrator::notify::{BroadcastSink, ConsoleSink, Notifier};

#[derive(Default)]
struct RecordingBroadcast {
    sent: Mutex<Vec<(String, Instant)>>,
    fail: bool,
}

impl RecordingBroadcast {
    fn failing() -> Self {
        Self {
            sent: Mutex::new(Vec::new()),
            fail: true,
        }
    }
}

#[async_trait]
impl BroadcastSink for RecordingBroadcast {
    async fn broadcast(&self, text: &str) -> Result<()> {
        self.sent
            .lock()
            .unwrap()
            .push((text.to_string(), Instant::now()));
        if self.fail {
            return Err(anyhow!("channel not found"));
        }
        Ok(())
    }
}

struct RecordingConsole {
    messages: Mutex<Vec<(String, Instant)>>,
    saves: Mutex<u32>,
    fail_on: Option<&'static str>,
}

impl RecordingConsole {
    fn new(fail_on: Option<&'static str>) -> Self {
        Self {
            messages: Mutex::new(Vec::new()),
            saves: Mutex::new(0),
            fail_on,
        }
    }
}

#[async_trait]
impl ConsoleSink for RecordingConsole {
    async fn server_message(&self, text: &str) -> Result<()> {
        self.messages
            .lock()
            .unwrap()
            .push((text.to_string(), Instant::now()));
        if let Some(marker) = self.fail_on {
            if text.contains(marker) {
                return Err(anyhow!("rcon exited with exit status: 1"));
            }
        }
        Ok(())
    }

    async fn save_world(&self) -> Result<()> {
        *self.saves.lock().unwrap() += 1;
        Ok(())
    }
}

#[test]
fn milestone_waits_fill_the_lead_window_exactly() {
    let total: Duration = MILESTONES.iter().map(|(_, wait)| *wait).sum();
    assert_eq!(total, LEAD_WINDOW);
}

#[tokio::test(start_paused = true)]
async fn emits_five_warnings_in_order_with_exact_waits() {
    let broadcast = Arc::new(RecordingBroadcast::default());
    let console = Arc::new(RecordingConsole::new(None));
    let notifier = Notifier::new(broadcast.clone(), console.clone());

    let start = Instant::now();
    CountdownSequencer::new(&notifier).run().await.unwrap();
    assert_eq!(start.elapsed(), Duration::from_secs(1800));

    let expected = [
        ("Server will restart in 30 minutes!", 0u64),
        ("Server will restart in 15 minutes!", 900),
        ("Server will restart in 5 minutes!", 1500),
        ("Server will restart in 1 minute!", 1740),
        ("Restarting server now!", 1800),
    ];

    let messages = console.messages.lock().unwrap();
    assert_eq!(messages.len(), expected.len());
    for ((text, at), (want_text, want_offset_secs)) in messages.iter().zip(expected) {
        assert_eq!(text, want_text);
        assert_eq!(*at - start, Duration::from_secs(want_offset_secs));
    }

    // World state flushed at every milestone and before the restart itself.
    assert_eq!(*console.saves.lock().unwrap(), 5);
    assert_eq!(broadcast.sent.lock().unwrap().len(), 5);
}

#[tokio::test(start_paused = true)]
async fn console_failure_aborts_the_remaining_milestones() {
    let broadcast = Arc::new(RecordingBroadcast::default());
    let console = Arc::new(RecordingConsole::new(Some("15 minutes")));
    let notifier = Notifier::new(broadcast.clone(), console.clone());

    let result = CountdownSequencer::new(&notifier).run().await;
    assert!(result.is_err());

    let attempted: Vec<String> = console
        .messages
        .lock()
        .unwrap()
        .iter()
        .map(|(text, _)| text.clone())
        .collect();

    assert!(attempted.iter().any(|t| t.contains("30 minutes")));
    assert!(attempted.iter().any(|t| t.contains("15 minutes")));
    assert!(!attempted.iter().any(|t| t.contains("5 minutes")));
    assert!(!attempted.iter().any(|t| t.contains("Restarting server now")));

    // Only the first milestone got as far as the save command.
    assert_eq!(*console.saves.lock().unwrap(), 1);
}

#[tokio::test(start_paused = true)]
async fn broadcast_failure_does_not_stop_the_sequence() {
    let broadcast = Arc::new(RecordingBroadcast::failing());
    let console = Arc::new(RecordingConsole::new(None));
    let notifier = Notifier::new(broadcast.clone(), console.clone());

    CountdownSequencer::new(&notifier).run().await.unwrap();

    assert_eq!(console.messages.lock().unwrap().len(), 5);
    assert_eq!(*console.saves.lock().unwrap(), 5);
}
