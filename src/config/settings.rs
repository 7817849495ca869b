use crate::config::env::{self, EnvKey};
use std::time::Duration;

pub const DEFAULT_YOUTUBE_API_BASE: &str = "https://www.googleapis.com/youtube/v3";

/// Everything the YouTube client needs, handed over at construction.
#[derive(Clone, Debug)]
pub struct YoutubeConfig {
    pub api_key: String,
    pub api_base: String,
    pub timeout: Duration,
}

impl YoutubeConfig {
    pub fn new(api_key: impl Into<String>) -> Self {
        Self {
            api_key: api_key.into(),
            api_base: DEFAULT_YOUTUBE_API_BASE.to_string(),
            timeout: Duration::from_secs(10),
        }
    }

    pub fn with_api_base(mut self, api_base: impl Into<String>) -> Self {
        self.api_base = api_base.into();
        self
    }
}

#[derive(Clone, Debug)]
pub struct AppConfig {
    pub server_port: u16,
    /// When unset the service keeps its records in memory.
    pub database_url: Option<String>,
    pub youtube: YoutubeConfig,
}

impl AppConfig {
    pub fn new() -> Result<Self, std::env::VarError> {
        let timeout_secs: u64 = env::get_parsed(EnvKey::HttpTimeoutSecs, 10);

        Ok(Self {
            server_port: env::get_parsed(EnvKey::ServerPort, 3000),
            database_url: env::get_optional(EnvKey::DatabaseUrl),
            youtube: YoutubeConfig {
                api_key: env::get(EnvKey::YoutubeApiKey)?,
                api_base: env::get_or(EnvKey::YoutubeApiBase, DEFAULT_YOUTUBE_API_BASE),
                timeout: Duration::from_secs(timeout_secs),
            },
        })
    }
}
