use anyhow::{anyhow, Result};
use async_trait::async_trait;
use reqwest::Client;
use serde_json::json;
use tracing::debug;

use super::BroadcastSink;
use crate::config::DiscordConfig;
use crate::constants::http;

const DISCORD_API_BASE: &str = "https://discord.com/api/v10";

/// Posts role-mention warnings to one Discord channel via the REST API.
pub struct DiscordBroadcaster {
    channel_id: u64,
    mention_role_id: u64,
    bot_token: String,
    client: Client,
}

impl DiscordBroadcaster {
    pub fn new(config: &DiscordConfig) -> Result<Self> {
        let client = Client::builder()
            .timeout(http::REQUEST_TIMEOUT)
            .build()
            .map_err(|e| anyhow!("Failed to build HTTP client: {}", e))?;

        Ok(Self {
            channel_id: config.channel_id,
            mention_role_id: config.mention_role_id,
            bot_token: config.bot_token.clone(),
            client,
        })
    }
}

#[async_trait]
impl BroadcastSink for DiscordBroadcaster {
    async fn broadcast(&self, text: &str) -> Result<()> {
        let url = format!("{}/channels/{}/messages", DISCORD_API_BASE, self.channel_id);
        let content = format!("<@&{}> {}", self.mention_role_id, text);

        let response = self
            .client
            .post(&url)
            .header("Authorization", format!("Bot {}", self.bot_token))
            .json(&json!({ "content": content }))
            .send()
            .await
            .map_err(|e| anyhow!("Discord request failed: {}", e))?;

        if !response.status().is_success() {
            return Err(anyhow!(
                "Discord returned status {} for channel {}",
                response.status(),
                self.channel_id
            ));
        }

        debug!("Broadcast delivered to channel {}", self.channel_id);
        Ok(())
    }
}
