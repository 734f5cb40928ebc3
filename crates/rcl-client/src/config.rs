//! RCL client configuration.
//!
//! One base URL, one API key, one request timeout. Defaults point to the
//! hosted service. Override via environment variables or explicit
//! construction for staging/testing.

use url::Url;
use zeroize::Zeroizing;

/// Hosted RCL endpoint.
pub const DEFAULT_BASE_URL: &str = "https://froddy.net";

/// Evaluation deadline used when none is configured.
pub const DEFAULT_TIMEOUT_MS: u64 = 3_000;

/// Configuration for connecting to the RCL API.
///
/// Custom `Debug` implementation redacts the `api_key` field
/// to prevent credential leakage in log output.
#[derive(Clone)]
pub struct RclConfig {
    /// Base URL of the RCL service. Endpoint paths are appended to it.
    pub base_url: Url,
    /// Tenant API key, sent as `X-API-Key`. Empty means no header is sent.
    pub api_key: Zeroizing<String>,
    /// Request timeout in milliseconds. Bounds every call, including
    /// response body reads.
    pub timeout_ms: u64,
}

impl std::fmt::Debug for RclConfig {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("RclConfig")
            .field("base_url", &self.base_url)
            .field("api_key", &"[REDACTED]")
            .field("timeout_ms", &self.timeout_ms)
            .finish()
    }
}

impl RclConfig {
    /// Build a configuration with the default timeout.
    pub fn new(base_url: &str, api_key: &str) -> Result<Self, ConfigError> {
        let base_url = Url::parse(base_url)
            .map_err(|e| ConfigError::InvalidUrl("base_url".to_string(), e.to_string()))?;
        Ok(Self {
            base_url,
            api_key: Zeroizing::new(api_key.to_string()),
            timeout_ms: DEFAULT_TIMEOUT_MS,
        })
    }

    /// Replace the request timeout.
    pub fn with_timeout_ms(mut self, timeout_ms: u64) -> Self {
        self.timeout_ms = timeout_ms;
        self
    }

    /// Load configuration from environment variables.
    ///
    /// Variables:
    /// - `RCL_BASE_URL` (default: `https://froddy.net`)
    /// - `RCL_API_KEY` (required)
    /// - `RCL_TIMEOUT_MS` (default: 3000)
    pub fn from_env() -> Result<Self, ConfigError> {
        let api_key = std::env::var("RCL_API_KEY").map_err(|_| ConfigError::MissingApiKey)?;

        Ok(Self {
            base_url: env_url("RCL_BASE_URL", DEFAULT_BASE_URL)?,
            api_key: Zeroizing::new(api_key),
            timeout_ms: std::env::var("RCL_TIMEOUT_MS")
                .ok()
                .and_then(|s| s.parse().ok())
                .unwrap_or(DEFAULT_TIMEOUT_MS),
        })
    }

    /// Create a configuration pointing to a local mock server (for testing).
    pub fn local_mock(port: u16, key: &str) -> Result<Self, ConfigError> {
        Self::new(&format!("http://127.0.0.1:{port}"), key)
    }

    /// Timeout as a [`std::time::Duration`].
    pub fn timeout(&self) -> std::time::Duration {
        std::time::Duration::from_millis(self.timeout_ms)
    }
}

fn env_url(var: &str, default: &str) -> Result<Url, ConfigError> {
    let raw = std::env::var(var).unwrap_or_else(|_| default.to_string());
    Url::parse(&raw).map_err(|e| ConfigError::InvalidUrl(var.to_string(), e.to_string()))
}

/// Configuration errors.
#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
    #[error("RCL_API_KEY environment variable is required")]
    MissingApiKey,
    #[error("invalid URL for {0}: {1}")]
    InvalidUrl(String, String),
    #[error("API key contains characters not allowed in an HTTP header")]
    InvalidApiKey,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn local_mock_builds_valid_config() {
        let cfg = RclConfig::local_mock(9000, "rcl_test").unwrap();
        assert_eq!(cfg.api_key.as_str(), "rcl_test");
        assert_eq!(cfg.timeout_ms, DEFAULT_TIMEOUT_MS);
        assert_eq!(cfg.base_url.as_str(), "http://127.0.0.1:9000/");
    }

    #[test]
    fn with_timeout_overrides_default() {
        let cfg = RclConfig::new(DEFAULT_BASE_URL, "k").unwrap().with_timeout_ms(250);
        assert_eq!(cfg.timeout(), std::time::Duration::from_millis(250));
    }

    #[test]
    fn new_rejects_invalid_url() {
        let err = RclConfig::new("not a url", "k").unwrap_err();
        assert!(matches!(err, ConfigError::InvalidUrl(ref field, _) if field == "base_url"));
    }

    #[test]
    fn debug_redacts_api_key() {
        let cfg = RclConfig::new(DEFAULT_BASE_URL, "rcl_super_secret").unwrap();
        let rendered = format!("{cfg:?}");
        assert!(!rendered.contains("rcl_super_secret"));
        assert!(rendered.contains("[REDACTED]"));
    }

    #[test]
    fn env_url_uses_default_when_var_absent() {
        let url = env_url("NONEXISTENT_RCL_VAR_12345", "https://example.com").unwrap();
        assert_eq!(url.as_str(), "https://example.com/");
    }

    // One test owns the RCL_* variables; parallel tests share the process env.
    #[test]
    fn from_env_requires_key_and_applies_defaults() {
        std::env::remove_var("RCL_API_KEY");
        std::env::remove_var("RCL_BASE_URL");
        std::env::remove_var("RCL_TIMEOUT_MS");
        let missing = RclConfig::from_env();

        std::env::set_var("RCL_API_KEY", "rcl_env_key");
        let defaults = RclConfig::from_env();

        std::env::set_var("RCL_BASE_URL", "http://127.0.0.1:8080");
        std::env::set_var("RCL_TIMEOUT_MS", "750");
        let overridden = RclConfig::from_env();

        std::env::remove_var("RCL_API_KEY");
        std::env::remove_var("RCL_BASE_URL");
        std::env::remove_var("RCL_TIMEOUT_MS");

        assert!(matches!(missing, Err(ConfigError::MissingApiKey)));

        let defaults = defaults.unwrap();
        assert_eq!(defaults.api_key.as_str(), "rcl_env_key");
        assert_eq!(defaults.base_url.as_str(), "https://froddy.net/");
        assert_eq!(defaults.timeout_ms, 3_000);

        let overridden = overridden.unwrap();
        assert_eq!(overridden.base_url.as_str(), "http://127.0.0.1:8080/");
        assert_eq!(overridden.timeout_ms, 750);
    }

    #[test]
    fn env_url_rejects_invalid_url() {
        std::env::set_var("TEST_BAD_URL_RCL", "not a url");
        let result = env_url("TEST_BAD_URL_RCL", "https://example.com");
        std::env::remove_var("TEST_BAD_URL_RCL");
        assert!(result.is_err());
    }
}
