//! Runtime configuration resolved once at startup

use std::path::PathBuf;
use std::time::Duration;

pub const DEFAULT_API_URL: &str = "https://api.openweathermap.org/data/2.5/weather";
pub const DEFAULT_TIMEOUT_SECS: u64 = 10;

#[derive(thiserror::Error, Debug, PartialEq)]
pub enum ConfigError {
    #[error("missing OpenWeatherMap API key (set OPENWEATHER_API_KEY or pass --api-key)")]
    MissingApiKey,
    #[error("invalid API url `{0}`: expected http:// or https://")]
    InvalidApiUrl(String),
}

#[derive(Clone, Debug)]
pub struct Config {
    pub api_key: String,
    pub api_url: String,
    pub timeout: Duration,
    /// City submitted as soon as the app starts
    pub initial_city: Option<String>,
    pub log_file: Option<PathBuf>,
}

impl Config {
    pub fn new(
        api_key: Option<String>,
        api_url: String,
        timeout_secs: u64,
        initial_city: Option<String>,
        log_file: Option<PathBuf>,
    ) -> Result<Self, ConfigError> {
        let api_key = api_key
            .map(|key| key.trim().to_string())
            .filter(|key| !key.is_empty())
            .ok_or(ConfigError::MissingApiKey)?;

        let api_url = api_url.trim().trim_end_matches('?').to_string();
        if !(api_url.starts_with("http://") || api_url.starts_with("https://")) {
            return Err(ConfigError::InvalidApiUrl(api_url));
        }

        Ok(Self {
            api_key,
            api_url,
            timeout: Duration::from_secs(timeout_secs.max(1)),
            initial_city: initial_city.filter(|city| !city.trim().is_empty()),
            log_file,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_missing_key_is_rejected() {
        let err = Config::new(None, DEFAULT_API_URL.into(), 10, None, None).unwrap_err();
        assert_eq!(err, ConfigError::MissingApiKey);

        let err = Config::new(Some("  ".into()), DEFAULT_API_URL.into(), 10, None, None)
            .unwrap_err();
        assert_eq!(err, ConfigError::MissingApiKey);
    }

    #[test]
    fn test_invalid_url_is_rejected() {
        let err = Config::new(Some("key".into()), "ftp://x".into(), 10, None, None).unwrap_err();
        assert_eq!(err, ConfigError::InvalidApiUrl("ftp://x".into()));
    }

    #[test]
    fn test_blank_initial_city_is_dropped() {
        let config = Config::new(
            Some("key".into()),
            DEFAULT_API_URL.into(),
            0,
            Some(" ".into()),
            None,
        )
        .unwrap();
        assert!(config.initial_city.is_none());
        assert_eq!(config.timeout, Duration::from_secs(1));
    }
}
