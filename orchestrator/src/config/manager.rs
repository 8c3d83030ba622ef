use super::Config;
use anyhow::{anyhow, Result};
use std::sync::Arc;
use tokio::fs;
use tracing::info;

pub struct ConfigManager {
    current_config: Arc<Config>,
}

impl ConfigManager {
    pub async fn new(config_path: &str) -> Result<Self> {
        let config = Self::load_configuration(config_path).await?;
        Ok(Self {
            current_config: Arc::new(config),
        })
    }

    pub fn get_current_config(&self) -> Arc<Config> {
        self.current_config.clone()
    }

    async fn load_configuration(config_path: &str) -> Result<Config> {
        let content = fs::read_to_string(config_path).await
            .map_err(|e| anyhow!("Failed to read config {}: {}", config_path, e))?;

        let config: Config = toml::from_str(&content)
            .map_err(|e| anyhow!("Failed to parse config {}: {}", config_path, e))?;

        config.validate()
            .map_err(|e| anyhow!("Invalid config {}: {}", config_path, e))?;

        info!(
            "Loaded {} daily restart times in {} from {}",
            config.schedule.len(),
            config.timezone,
            config_path
        );

        Ok(config)
    }
}
