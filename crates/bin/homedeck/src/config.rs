//! Configuration loading: TOML file with environment variable overrides.
//!
//! Looks for `homedeck.toml` in the working directory. The file is optional
//! and environment variables take precedence over it.

use std::time::Duration;

use serde::Deserialize;

/// File read by [`Config::load`].
pub const CONFIG_FILE: &str = "homedeck.toml";

/// Top-level configuration.
#[derive(Debug, Default, Deserialize)]
#[serde(default)]
pub struct Config {
    /// API server settings.
    pub remote: RemoteConfig,
    /// Polling settings.
    pub sync: SyncConfig,
    /// Logging settings.
    pub logging: LoggingConfig,
}

/// Where the API server lives.
#[derive(Debug, Deserialize)]
#[serde(default)]
pub struct RemoteConfig {
    /// Base URL, e.g. `http://127.0.0.1:3000`.
    pub api_url: String,
    /// Per-request timeout in milliseconds.
    pub timeout_ms: u64,
}

#[derive(Debug, Deserialize)]
#[serde(default)]
pub struct SyncConfig {
    /// Milliseconds between two polls.
    pub poll_interval_ms: u64,
}

/// Logging configuration.
#[derive(Debug, Deserialize)]
#[serde(default)]
pub struct LoggingConfig {
    /// Filter directive (`RUST_LOG` syntax).
    pub filter: String,
}

impl Config {
    /// Load configuration from [`CONFIG_FILE`] (if present) then apply
    /// environment-variable overrides.
    ///
    /// # Errors
    ///
    /// Returns an error if the TOML file exists but is malformed, or if the
    /// resulting configuration is invalid.
    pub fn load() -> Result<Self, ConfigError> {
        let mut config = Self::from_file(CONFIG_FILE)?;
        config.apply_overrides(|key| std::env::var(key).ok());
        config.validate()?;
        Ok(config)
    }

    fn from_file(path: &str) -> Result<Self, ConfigError> {
        match std::fs::read_to_string(path) {
            Ok(content) => toml::from_str(&content).map_err(ConfigError::Parse),
            Err(err) if err.kind() == std::io::ErrorKind::NotFound => Ok(Self::default()),
            Err(err) => Err(ConfigError::Io(err)),
        }
    }

    fn apply_overrides(&mut self, var: impl Fn(&str) -> Option<String>) {
        if let Some(val) = var("HOMEDECK_API_URL") {
            self.remote.api_url = val;
        }
        if let Some(val) = var("HOMEDECK_POLL_INTERVAL_MS")
            && let Ok(ms) = val.parse()
        {
            self.sync.poll_interval_ms = ms;
        }
        if let Some(val) = var("HOMEDECK_LOG") {
            self.logging.filter = val;
        }
        if let Some(val) = var("RUST_LOG") {
            self.logging.filter = val;
        }
    }

    fn validate(&self) -> Result<(), ConfigError> {
        if self.remote.api_url.trim().is_empty() {
            return Err(ConfigError::Validation("api url must not be empty".to_string()));
        }
        if self.sync.poll_interval_ms == 0 {
            return Err(ConfigError::Validation(
                "poll interval must be non-zero".to_string(),
            ));
        }
        if self.remote.timeout_ms == 0 {
            return Err(ConfigError::Validation(
                "request timeout must be non-zero".to_string(),
            ));
        }
        Ok(())
    }

    #[must_use]
    pub fn poll_interval(&self) -> Duration {
        Duration::from_millis(self.sync.poll_interval_ms)
    }

    #[must_use]
    pub fn request_timeout(&self) -> Duration {
        Duration::from_millis(self.remote.timeout_ms)
    }
}

impl Default for RemoteConfig {
    fn default() -> Self {
        Self {
            api_url: "http://127.0.0.1:3000".to_string(),
            timeout_ms: 10_000,
        }
    }
}

impl Default for SyncConfig {
    fn default() -> Self {
        Self {
            poll_interval_ms: 5000,
        }
    }
}

impl Default for LoggingConfig {
    fn default() -> Self {
        Self {
            filter: "homedeck=info,warn".to_string(),
        }
    }
}

/// Configuration errors.
#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
    /// TOML parse failure.
    #[error("failed to parse config file")]
    Parse(#[from] toml::de::Error),
    /// File I/O failure.
    #[error("failed to read config file")]
    Io(#[from] std::io::Error),
    /// Semantic validation failure.
    #[error("invalid configuration: {0}")]
    Validation(String),
}

#[cfg(test)]
mod tests {
    use super::*;
    use homedeck_app::sync::DEFAULT_POLL_INTERVAL;

    #[test]
    fn should_produce_sensible_defaults() {
        let config = Config::default();
        assert_eq!(config.remote.api_url, "http://127.0.0.1:3000");
        assert_eq!(config.poll_interval(), DEFAULT_POLL_INTERVAL);
        assert_eq!(
            config.request_timeout(),
            homedeck_adapter_http_reqwest::DEFAULT_TIMEOUT
        );
    }

    #[test]
    fn should_parse_full_toml() {
        let toml = "
            [remote]
            api_url = 'http://10.0.0.2:8080'
            timeout_ms = 2500

            [sync]
            poll_interval_ms = 1000

            [logging]
            filter = 'debug'
        ";
        let config: Config = toml::from_str(toml).unwrap();
        assert_eq!(config.remote.api_url, "http://10.0.0.2:8080");
        assert_eq!(config.request_timeout(), Duration::from_millis(2500));
        assert_eq!(config.poll_interval(), Duration::from_secs(1));
        assert_eq!(config.logging.filter, "debug");
    }

    #[test]
    fn should_return_default_when_file_not_found() {
        let config = Config::from_file("nonexistent.toml").unwrap();
        assert_eq!(config.sync.poll_interval_ms, 5000);
    }

    #[test]
    fn should_apply_env_overrides() {
        let mut config = Config::default();
        config.apply_overrides(|key| match key {
            "HOMEDECK_API_URL" => Some("http://server:3000".to_string()),
            "HOMEDECK_POLL_INTERVAL_MS" => Some("250".to_string()),
            "RUST_LOG" => Some("trace".to_string()),
            _ => None,
        });
        assert_eq!(config.remote.api_url, "http://server:3000");
        assert_eq!(config.poll_interval(), Duration::from_millis(250));
        assert_eq!(config.logging.filter, "trace");
    }

    #[test]
    fn should_reject_zero_poll_interval() {
        let mut config = Config::default();
        config.sync.poll_interval_ms = 0;
        assert!(matches!(config.validate(), Err(ConfigError::Validation(_))));
    }

    #[test]
    fn should_reject_empty_api_url() {
        let mut config = Config::default();
        config.remote.api_url = String::new();
        assert!(config.validate().is_err());
    }

    #[test]
    fn should_accept_defaults() {
        assert!(Config::default().validate().is_ok());
    }
}
