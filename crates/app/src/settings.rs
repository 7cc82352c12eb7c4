//! Handles settings for the application.
//!
//! Values come from an optional `settings.toml` in the working directory,
//! overridden by `PREDICTIONS_*` environment variables where nested keys are
//! separated by `__` (e.g. `PREDICTIONS_SERVER__PORT=9000`).
use config::{Config, ConfigError, Environment, File};
use serde::Deserialize;

#[derive(Debug, Deserialize)]
pub struct App {
    pub level: String,
}

/// Where the data lives: `database = "memory"` or
/// `database = { sqlite = "predictions.db" }`.
#[derive(Debug, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Database {
    Memory,
    Sqlite(String),
}

#[derive(Debug, Deserialize)]
pub struct Server {
    pub bind: String,
    pub port: u16,
    pub database: Database,
}

#[derive(Debug, Deserialize)]
pub struct Auth {
    pub secret_key: String,
    pub access_token_expire_minutes: i64,
}

#[derive(Debug, Deserialize)]
pub struct Rules {
    /// Matches an event needs before it can be run.
    pub matches_count: usize,
}

#[derive(Debug, Deserialize)]
pub struct Settings {
    pub app: App,
    pub server: Server,
    pub auth: Auth,
    pub rules: Rules,
}

impl Settings {
    pub fn new() -> Result<Self, ConfigError> {
        let settings = Config::builder()
            .set_default("app.level", "info")?
            .set_default("server.bind", "127.0.0.1")?
            .set_default("server.port", 8000)?
            .set_default("server.database", "memory")?
            .set_default("auth.access_token_expire_minutes", 180)?
            .set_default("rules.matches_count", engine::DEFAULT_MATCHES_COUNT as i64)?
            .add_source(File::with_name("settings").required(false))
            .add_source(
                Environment::with_prefix("PREDICTIONS")
                    .separator("__")
                    .try_parsing(true),
            )
            .build()?;

        settings.try_deserialize()
    }
}
