//! Hosting panel power and status API client

use anyhow::{anyhow, Result};
use reqwest::Client;
use serde_json::{json, Value};
use tracing::info;

use crate::config::PanelConfig;
use crate::constants::http;

pub struct PanelClient {
    base_url: String,
    server_id: String,
    api_key: String,
    client: Client,
}

impl PanelClient {
    pub fn new(config: &PanelConfig) -> Result<Self> {
        let client = Client::builder()
            .timeout(http::REQUEST_TIMEOUT)
            .build()
            .map_err(|e| anyhow!("Failed to build HTTP client: {}", e))?;

        Ok(Self {
            base_url: config.base_url.trim_end_matches('/').to_string(),
            server_id: config.server_id.clone(),
            api_key: config.api_key.clone(),
            client,
        })
    }

    /// Issue the power-cycle request. The panel's status code is logged but
    /// never branched on: the platform may already be mid-restart even when
    /// it answers with an error, and re-sending power signals risks a double
    /// restart. Only a transport failure surfaces as an error.
    pub async fn restart(&self) -> Result<()> {
        let url = format!(
            "{}/api/client/servers/{}/power",
            self.base_url, self.server_id
        );

        let response = self
            .client
            .post(&url)
            .header("Accept", "application/json")
            .header("Authorization", format!("Bearer {}", self.api_key))
            .json(&json!({ "signal": "restart" }))
            .send()
            .await
            .map_err(|e| anyhow!("Restart request failed: {}", e))?;

        info!("Server restart HTTP status code: {}", response.status());
        Ok(())
    }

    /// Query the panel's resource endpoint and return the reported
    /// `current_state`. A missing field reads as empty, i.e. not running.
    pub async fn current_state(&self) -> Result<String> {
        let url = format!(
            "{}/api/client/servers/{}/resources",
            self.base_url, self.server_id
        );

        let response = self
            .client
            .get(&url)
            .header("Accept", "application/json")
            .header("Authorization", format!("Bearer {}", self.api_key))
            .send()
            .await
            .map_err(|e| anyhow!("Status request failed: {}", e))?;

        if !response.status().is_success() {
            return Err(anyhow!("Status request returned {}", response.status()));
        }

        let body: Value = response
            .json()
            .await
            .map_err(|e| anyhow!("Failed to parse status response: {}", e))?;

        Ok(body
            .get("attributes")
            .and_then(|attributes| attributes.get("current_state"))
            .and_then(|state| state.as_str())
            .unwrap_or_default()
            .to_string())
    }
}
