//! Configuration for the verification client.

use std::env;
use std::time::Duration;

use reqwest::Url;

use crate::{Error, Result};

/// Environment variable selecting the backend endpoint.
pub const API_URL_VAR: &str = "EXPLAINCHECK_API_URL";

/// Backend used when no endpoint is configured.
pub const DEFAULT_API_URL: &str = "http://localhost:5000/api";

/// Upper bound on a single backend call.
pub const DEFAULT_REQUEST_TIMEOUT: Duration = Duration::from_secs(30);

/// Client configuration.
#[derive(Debug, Clone)]
pub struct Config {
    /// Base URL of the verification API, without a trailing slash
    pub base_url: String,
    /// How long a verify or demo call may stay outstanding
    pub request_timeout: Duration,
}

impl Config {
    /// Build a configuration for the given base URL.
    pub fn new(base_url: &str) -> Result<Self> {
        let trimmed = base_url.trim().trim_end_matches('/');
        let parsed = Url::parse(trimmed)
            .map_err(|e| Error::Config(format!("invalid API URL '{}': {}", base_url, e)))?;

        if !matches!(parsed.scheme(), "http" | "https") {
            return Err(Error::Config(format!(
                "API URL must use http or https, got '{}'",
                parsed.scheme()
            )));
        }

        Ok(Self {
            base_url: trimmed.to_string(),
            request_timeout: DEFAULT_REQUEST_TIMEOUT,
        })
    }

    /// Load configuration from environment variables.
    pub fn from_env() -> Result<Self> {
        let base_url = env::var(API_URL_VAR).unwrap_or_else(|_| DEFAULT_API_URL.to_string());
        Self::new(&base_url)
    }

    /// Override the request timeout.
    pub fn with_request_timeout(mut self, timeout: Duration) -> Self {
        self.request_timeout = timeout;
        self
    }

    /// Join an endpoint path onto the base URL.
    pub fn endpoint(&self, path: &str) -> String {
        format!("{}/{}", self.base_url, path.trim_start_matches('/'))
    }
}

impl Default for Config {
    fn default() -> Self {
        Self {
            base_url: DEFAULT_API_URL.to_string(),
            request_timeout: DEFAULT_REQUEST_TIMEOUT,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_trailing_slash_trimmed() {
        let config = Config::new("https://verify.example.com/api/").unwrap();
        assert_eq!(config.base_url, "https://verify.example.com/api");
        assert_eq!(config.endpoint("/verify"), "https://verify.example.com/api/verify");
        assert_eq!(config.endpoint("random-demo"), "https://verify.example.com/api/random-demo");
    }

    #[test]
    fn test_rejects_non_http_scheme() {
        let err = Config::new("ftp://verify.example.com").unwrap_err();
        assert!(matches!(err, Error::Config(_)));
    }

    #[test]
    fn test_rejects_garbage() {
        assert!(matches!(Config::new("not a url"), Err(Error::Config(_))));
    }

    #[test]
    fn test_timeout_override() {
        let config = Config::default().with_request_timeout(Duration::from_millis(250));
        assert_eq!(config.request_timeout, Duration::from_millis(250));
        assert_eq!(config.base_url, DEFAULT_API_URL);
    }
}
