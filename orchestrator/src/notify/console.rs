use anyhow::{anyhow, Result};
use async_trait::async_trait;
use tokio::process::Command as AsyncCommand;
use tracing::debug;

use super::ConsoleSink;
use crate::config::RconConfig;

/// Drives the game server's remote console through the external `rcon`
/// binary. Every command is a fresh process invocation; a non-zero exit
/// status is a failed delivery.
pub struct RconConsole {
    binary: String,
    address: String,
    password: String,
}

impl RconConsole {
    pub fn new(config: &RconConfig) -> Self {
        Self {
            binary: config.binary.clone(),
            address: format!("{}:{}", config.host, config.port),
            password: config.password.clone(),
        }
    }

    async fn run(&self, command: &str) -> Result<()> {
        debug!("Executing rcon command: {}", command);

        let output = AsyncCommand::new(&self.binary)
            .arg("-a")
            .arg(&self.address)
            .arg("-p")
            .arg(&self.password)
            .arg(command)
            .output()
            .await
            .map_err(|e| anyhow!("Failed to spawn {}: {}", self.binary, e))?;

        if output.status.success() {
            Ok(())
        } else {
            let stdout = String::from_utf8_lossy(&output.stdout).to_string();
            let stderr = String::from_utf8_lossy(&output.stderr).to_string();
            let detail = if !stderr.trim().is_empty() { stderr } else { stdout };
            Err(anyhow!(
                "rcon exited with {}: {}",
                output.status,
                detail.trim()
            ))
        }
    }
}

#[async_trait]
impl ConsoleSink for RconConsole {
    async fn server_message(&self, text: &str) -> Result<()> {
        self.run(&format!("servermsg \"{}\"", text)).await
    }

    async fn save_world(&self) -> Result<()> {
        self.run("save").await
    }
}
