pub mod config;
pub mod constants;
pub mod countdown;
pub mod errors;
pub mod health;
pub mod notify;
pub mod orchestrator;
pub mod panel;
pub mod schedule;

// Re-export commonly used types
pub use config::{Config, ConfigManager};
pub use errors::CycleError;
pub use health::HealthPoller;
pub use notify::Notifier;
pub use orchestrator::RestartOrchestrator;
pub use panel::PanelClient;
