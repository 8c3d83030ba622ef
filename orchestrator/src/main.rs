use anyhow::Result;
use std::sync::Arc;
use std::time::Duration;
use tracing::info;
use tracing_subscriber::{fmt, EnvFilter};

use orchestrator::config::ConfigManager;
use orchestrator::health::HealthPoller;
use orchestrator::notify::{DiscordBroadcaster, Notifier, RconConsole};
use orchestrator::orchestrator::RestartOrchestrator;
use orchestrator::panel::PanelClient;

const CONFIG_PATH: &str = "config/orchestrator.toml";

#[tokio::main]
async fn main() -> Result<()> {
    // Initialize logging with reduced verbosity
    let env_filter = EnvFilter::from_default_env()
        .add_directive("orchestrator=info".parse()?)
        .add_directive("hyper=warn".parse()?)
        .add_directive("reqwest=warn".parse()?);

    fmt().with_env_filter(env_filter).init();

    info!("Starting scheduled restart orchestrator");

    // Load configuration
    let config_manager = ConfigManager::new(CONFIG_PATH).await?;
    let config = config_manager.get_current_config();
    let timezone = config.parsed_timezone()?;
    info!(
        "Configuration loaded: {} daily restart times in {}, panel server {}",
        config.schedule.len(),
        config.timezone,
        config.panel.server_id
    );

    // Wire up the two notification sinks
    let broadcaster = Arc::new(DiscordBroadcaster::new(&config.discord)?);
    let console = Arc::new(RconConsole::new(&config.rcon));
    let notifier = Notifier::new(broadcaster, console);

    // Panel client doubles as restart trigger and status source
    let panel = Arc::new(PanelClient::new(&config.panel)?);
    let poller = HealthPoller::new(
        panel.clone(),
        Duration::from_secs(config.status_poll_interval_seconds),
    );

    let orchestrator = RestartOrchestrator::new(
        timezone,
        config.schedule.clone(),
        notifier,
        panel,
        poller,
    );

    orchestrator.run().await;

    Ok(())
}
