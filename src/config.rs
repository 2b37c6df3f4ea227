//! Client settings, resolved from the environment or `.env`.

use std::path::PathBuf;
use std::time::Duration;

use anyhow::Context;
use log::LevelFilter;

pub const DEFAULT_BASE_URL: &str = "https://api.renti.kz/api";
pub const DEFAULT_TIMEOUT: Duration = Duration::from_millis(30_000);
pub const DEFAULT_FALLBACK_MESSAGE: &str = "Something went wrong";
pub const DEFAULT_TOKEN_PATH: &str = ".renti-session.json";

#[derive(Debug, Clone, PartialEq)]
pub struct Config {
    /// Prefix of every resource path, e.g. `https://api.renti.kz/api`
    pub base_url: String,
    /// Applies to every request including the refresh call
    pub timeout: Duration,
    /// Sent with every request unless the request sets the header itself
    pub default_headers: Vec<(String, String)>,
    /// Toast text when the server didn't send a message
    pub fallback_message: String,
    /// Where the command line keeps its tokens
    pub token_path: PathBuf,
    pub log_level: LevelFilter,
}

impl Default for Config {
    fn default() -> Self {
        Config {
            base_url: DEFAULT_BASE_URL.to_string(),
            timeout: DEFAULT_TIMEOUT,
            default_headers: vec![
                ("Content-Type".to_string(), "application/json".to_string()),
                ("Accept".to_string(), "application/json".to_string()),
            ],
            fallback_message: DEFAULT_FALLBACK_MESSAGE.to_string(),
            token_path: PathBuf::from(DEFAULT_TOKEN_PATH),
            log_level: LevelFilter::Info,
        }
    }
}

impl Config {
    pub fn new(base_url: &str) -> Config {
        Config {
            base_url: normalize_base_url(base_url),
            ..Config::default()
        }
    }

    /// Read `RENTI_*` variables, anything unset keeps its default.
    pub fn from_env() -> anyhow::Result<Config> {
        fn var(key: &str) -> Option<String> {
            dotenv::var(key).ok().filter(|v| !v.trim().is_empty())
        }

        let mut config = Config::default();

        if let Some(url) = var("RENTI_API_URL") {
            config.base_url = normalize_base_url(&url);
        }
        if let Some(ms) = var("RENTI_TIMEOUT_MS") {
            let ms = ms
                .trim()
                .parse::<u64>()
                .with_context(|| format!("parse RENTI_TIMEOUT_MS ({})", ms))?;
            config.timeout = Duration::from_millis(ms);
        }
        if let Some(message) = var("RENTI_FALLBACK_MESSAGE") {
            config.fallback_message = message;
        }
        if let Some(path) = var("RENTI_TOKEN_PATH") {
            config.token_path = PathBuf::from(path);
        }
        if let Some(level) = var("RENTI_LOG_LEVEL") {
            config.log_level = level
                .trim()
                .parse::<LevelFilter>()
                .with_context(|| format!("parse RENTI_LOG_LEVEL ({})", level))?;
        }

        Ok(config)
    }

    /// Example: `config.url("/bookings")` will produce `{base_url}/bookings`
    pub fn url(&self, path: &str) -> String {
        format!("{}{}", self.base_url, path)
    }
}

fn normalize_base_url(url: &str) -> String {
    url.trim().trim_end_matches('/').to_string()
}

#[cfg(test)]
mod tests {
    use std::time::Duration;

    use super::{Config, DEFAULT_BASE_URL};

    #[test]
    fn defaults() {
        let config = Config::default();
        assert_eq!(config.base_url, DEFAULT_BASE_URL);
        assert_eq!(config.timeout, Duration::from_secs(30));
        assert!(config
            .default_headers
            .iter()
            .any(|(k, v)| k == "Content-Type" && v == "application/json"));
    }

    #[test]
    fn trailing_slash_is_trimmed() {
        let config = Config::new("http://localhost:8080/api/");
        assert_eq!(config.url("/auth/login"), "http://localhost:8080/api/auth/login");
    }
}
