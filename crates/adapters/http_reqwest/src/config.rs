//! Client configuration.

use std::time::Duration;

use crate::error::RemoteError;
use crate::source::HttpDeviceSource;

/// Default per-request timeout.
pub const DEFAULT_TIMEOUT: Duration = Duration::from_secs(10);

/// Configuration for the remote device source.
#[derive(Debug, Clone)]
pub struct Config {
    /// Base URL of the API server, e.g. `http://127.0.0.1:8080`.
    pub base_url: String,
    /// Timeout applied to every request.
    pub timeout: Duration,
}

impl Config {
    /// Configuration with the [`DEFAULT_TIMEOUT`].
    #[must_use]
    pub fn new(base_url: impl Into<String>) -> Self {
        Self {
            base_url: base_url.into(),
            timeout: DEFAULT_TIMEOUT,
        }
    }

    /// Build an [`HttpDeviceSource`] from this configuration.
    ///
    /// # Errors
    ///
    /// Returns [`RemoteError::InvalidUrl`] if the base URL does not parse or
    /// cannot carry a path, or [`RemoteError::Request`] if the HTTP client
    /// cannot be built.
    pub fn build(self) -> Result<HttpDeviceSource, RemoteError> {
        let base = reqwest::Url::parse(&self.base_url)
            .map_err(|err| RemoteError::InvalidUrl(format!("{}: {err}", self.base_url)))?;
        if base.cannot_be_a_base() {
            return Err(RemoteError::InvalidUrl(self.base_url));
        }
        let client = reqwest::Client::builder().timeout(self.timeout).build()?;
        Ok(HttpDeviceSource::new(client, base))
    }
}
