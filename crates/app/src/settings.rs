//! Application settings, read from `divvy.toml`.
use config::{Config, ConfigError, File};
use serde::Deserialize;

#[derive(Debug, Deserialize)]
pub struct App {
    /// Log level filter (e.g. "info", "debug").
    pub level: String,
    /// Where the cached session lives. Defaults to `config/divvy_state.json`.
    pub state_path: Option<String>,
}

#[derive(Debug, Deserialize)]
pub struct Server {
    pub base_url: String,
}

#[derive(Debug, Deserialize)]
pub struct Extraction {
    pub base_url: String,
}

#[derive(Debug, Deserialize)]
pub struct Settings {
    pub app: App,
    pub server: Server,
    /// Optional: without it, free-text drafting falls back to a blank form.
    pub extraction: Option<Extraction>,
}

impl Settings {
    pub fn new() -> Result<Self, ConfigError> {
        let settings = Config::builder()
            .add_source(File::with_name("divvy"))
            .build()?;

        settings.try_deserialize()
    }
}
