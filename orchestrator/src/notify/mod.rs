//! Dual-channel notification dispatch
//!
//! Every warning goes out on two independent transports with different
//! failure domains: the broadcast channel mentions players outside the game
//! and may fail without consequence, while the in-game console channel also
//! carries the pre-restart world save and must not fail silently.

pub mod broadcast;
pub mod console;

pub use broadcast::DiscordBroadcaster;
pub use console::RconConsole;

use anyhow::Result;
use async_trait::async_trait;
use std::sync::Arc;
use tracing::warn;

use crate::errors::CycleError;

/// Out-of-game announcement channel. Delivery failure is non-fatal.
#[async_trait]
pub trait BroadcastSink: Send + Sync {
    async fn broadcast(&self, text: &str) -> Result<()>;
}

/// Live-server console channel. Carries both chat-style messages and the
/// world-save command; failure aborts the current cycle.
#[async_trait]
pub trait ConsoleSink: Send + Sync {
    async fn server_message(&self, text: &str) -> Result<()>;
    async fn save_world(&self) -> Result<()>;
}

pub struct Notifier {
    broadcast: Arc<dyn BroadcastSink>,
    console: Arc<dyn ConsoleSink>,
}

impl Notifier {
    pub fn new(broadcast: Arc<dyn BroadcastSink>, console: Arc<dyn ConsoleSink>) -> Self {
        Self { broadcast, console }
    }

    /// Deliver one warning on both channels, then flush world state when
    /// requested. Both dispatch attempts resolve before this returns, so the
    /// caller never advances past a milestone with sends still in flight.
    pub async fn notify(&self, text: &str, persist: bool) -> Result<(), CycleError> {
        let (broadcast_result, console_result) = tokio::join!(
            self.broadcast.broadcast(text),
            self.console.server_message(text)
        );

        if let Err(e) = broadcast_result {
            warn!("Broadcast delivery failed, continuing cycle: {}", e);
        }

        console_result.map_err(|e| CycleError::Console {
            command: format!("servermsg \"{}\"", text),
            reason: e.to_string(),
        })?;

        if persist {
            self.console
                .save_world()
                .await
                .map_err(|e| CycleError::Console {
                    command: "save".to_string(),
                    reason: e.to_string(),
                })?;
        }

        Ok(())
    }

    /// Broadcast-only announcement, used for the recovery confirmation.
    pub async fn announce(&self, text: &str) {
        if let Err(e) = self.broadcast.broadcast(text).await {
            warn!("Broadcast delivery failed: {}", e);
        }
    }
}
