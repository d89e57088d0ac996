use config::{Config, ConfigError, Environment, File};
use serde::Deserialize;

#[derive(Debug, Deserialize, Clone)]
pub struct Settings {
    pub database: DatabaseSettings,
    pub sweep: SweepSettings,
}

#[derive(Debug, Deserialize, Clone)]
pub struct DatabaseSettings {
    pub url: String,
    pub name: String,
    pub max_pool_size: Option<u32>,
    pub min_pool_size: Option<u32>,
}

#[derive(Debug, Deserialize, Clone)]
pub struct SweepSettings {
    /// Cron expression for the due-date sweep (seconds granularity).
    pub schedule: String,
    /// Tasks due within this many hours count as near-overdue.
    pub near_due_window_hours: i64,
}

impl Settings {
    pub fn load() -> Result<Self, ConfigError> {
        let config = Config::builder()
            .add_source(File::with_name("config/default").required(false))
            .add_source(File::with_name("config/local").required(false))
            .add_source(
                Environment::default()
                    .separator("__")
                    .prefix("TASKHIVE"),
            )
            .set_default("database.url", "mongodb://localhost:27017")?
            .set_default("database.name", "taskhive")?
            .set_default("sweep.schedule", "0 */15 * * * *")?
            .set_default("sweep.near_due_window_hours", 24)?
            .build()?;

        config.try_deserialize()
    }
}

impl Default for Settings {
    fn default() -> Self {
        Self::load().expect("Failed to load default settings")
    }
}
