use std::env;
use std::str::FromStr;

pub enum EnvKey {
    ServerPort,
    DatabaseUrl,
    YoutubeApiKey,
    YoutubeApiBase,
    HttpTimeoutSecs,
}

impl EnvKey {
    pub fn as_str(&self) -> &'static str {
        match self {
            EnvKey::ServerPort => "APP_PORT",
            EnvKey::DatabaseUrl => "DATABASE_URL",
            EnvKey::YoutubeApiKey => "YOUTUBE_API_KEY",
            EnvKey::YoutubeApiBase => "YOUTUBE_API_BASE",
            EnvKey::HttpTimeoutSecs => "HTTP_TIMEOUT_SECS",
        }
    }
}

pub fn get(key: EnvKey) -> Result<String, env::VarError> {
    env::var(key.as_str())
}

pub fn get_optional(key: EnvKey) -> Option<String> {
    env::var(key.as_str()).ok().filter(|v| !v.trim().is_empty())
}

pub fn get_or(key: EnvKey, default: &str) -> String {
    env::var(key.as_str()).unwrap_or_else(|_| default.to_string())
}

pub fn get_parsed<T: FromStr>(key: EnvKey, default: T) -> T {
    match get(key) {
        Ok(val) => val.parse::<T>().unwrap_or(default),
        Err(_) => default,
    }
}
