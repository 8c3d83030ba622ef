pub mod manager;
pub use manager::ConfigManager;

use anyhow::{anyhow, Result};
use chrono_tz::Tz;
use serde::{Deserialize, Serialize};

use crate::constants::polling;
use crate::schedule::{self, ScheduleEntry};

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Config {
    #[serde(default = "default_timezone")]
    pub timezone: String,
    #[serde(default = "default_schedule")]
    pub schedule: Vec<ScheduleEntry>,
    #[serde(default = "default_status_poll_interval")]
    pub status_poll_interval_seconds: u64,
    pub discord: DiscordConfig,
    pub panel: PanelConfig,
    pub rcon: RconConfig,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct DiscordConfig {
    pub channel_id: u64,
    pub mention_role_id: u64,
    pub bot_token: String,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct PanelConfig {
    pub base_url: String,
    pub server_id: String,
    pub api_key: String,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct RconConfig {
    pub host: String,
    #[serde(default = "default_rcon_port")]
    pub port: u16,
    pub password: String,
    #[serde(default = "default_rcon_binary")]
    pub binary: String,
}

fn default_timezone() -> String {
    "Asia/Singapore".to_string()
}

// Deployment default: restarts at 00:30, 06:30, 12:30 and 18:30.
fn default_schedule() -> Vec<ScheduleEntry> {
    vec![
        ScheduleEntry { hour: 0, minute: 30 },
        ScheduleEntry { hour: 6, minute: 30 },
        ScheduleEntry { hour: 12, minute: 30 },
        ScheduleEntry { hour: 18, minute: 30 },
    ]
}

fn default_status_poll_interval() -> u64 {
    polling::DEFAULT_STATUS_POLL_INTERVAL_SECONDS
}

fn default_rcon_port() -> u16 {
    27015
}

fn default_rcon_binary() -> String {
    "./rcon".to_string()
}

impl Config {
    /// Validate everything the orchestrator loop depends on. Any failure here
    /// is fatal at startup; no cycle can run on a broken configuration.
    pub fn validate(&self) -> Result<()> {
        self.parsed_timezone()?;
        schedule::validate_entries(&self.schedule)?;

        if self.status_poll_interval_seconds == 0 {
            return Err(anyhow!("status_poll_interval_seconds must be greater than zero"));
        }
        if self.discord.bot_token.is_empty() {
            return Err(anyhow!("Missing Discord bot token"));
        }
        if self.panel.base_url.is_empty() {
            return Err(anyhow!("Missing panel base URL"));
        }
        if self.panel.server_id.is_empty() {
            return Err(anyhow!("Missing panel server id"));
        }
        if self.panel.api_key.is_empty() {
            return Err(anyhow!("Missing panel API key"));
        }
        if self.rcon.host.is_empty() {
            return Err(anyhow!("Missing rcon host"));
        }
        if self.rcon.password.is_empty() {
            return Err(anyhow!("Missing rcon password"));
        }

        Ok(())
    }

    pub fn parsed_timezone(&self) -> Result<Tz> {
        self.timezone
            .parse::<Tz>()
            .map_err(|e| anyhow!("Invalid timezone '{}': {}", self.timezone, e))
    }
}
