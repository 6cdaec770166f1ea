use std::time::Duration;

use url::Url;

use crate::error::ApiError;

/// Address of a locally running API server.
pub const DEFAULT_BASE_URL: &str = "http://127.0.0.1:8000";

/// Default connect timeout (TCP handshake + TLS).
pub const DEFAULT_CONNECT_TIMEOUT: Duration = Duration::from_secs(5);

/// Default request timeout (total request/response time).
///
/// Chat and search requests wait on model inference, hence the generous value.
pub const DEFAULT_REQUEST_TIMEOUT: Duration = Duration::from_secs(30);

/// Configuration for an API client.
#[derive(Debug, Clone)]
pub struct ClientConfig {
    /// Absolute base URL the endpoint paths are appended to (e.g., "https://kb.example.com")
    pub base_url: String,

    /// Total time allowed for one request
    pub timeout: Duration,

    /// Time allowed to establish the connection
    pub connect_timeout: Duration,
}

impl Default for ClientConfig {
    fn default() -> Self {
        Self {
            base_url: DEFAULT_BASE_URL.to_string(),
            timeout: DEFAULT_REQUEST_TIMEOUT,
            connect_timeout: DEFAULT_CONNECT_TIMEOUT,
        }
    }
}

impl ClientConfig {
    pub fn new(base_url: impl Into<String>) -> Self {
        Self {
            base_url: base_url.into(),
            ..Default::default()
        }
    }

    pub fn with_timeout(mut self, timeout: Duration) -> Self {
        self.timeout = timeout;
        self
    }

    /// Check the configuration and return the normalized base URL
    /// (no trailing slash).
    pub fn validate(&self) -> Result<String, ApiError> {
        if self.base_url.trim().is_empty() {
            return Err(ApiError::Config("base_url is required".into()));
        }

        let url = Url::parse(self.base_url.trim())
            .map_err(|e| ApiError::Config(format!("base_url is not a valid URL: {}", e)))?;

        if !matches!(url.scheme(), "http" | "https") {
            return Err(ApiError::Config(format!(
                "base_url must use http or https, got {}",
                url.scheme()
            )));
        }

        if self.timeout.is_zero() {
            return Err(ApiError::Config("timeout must be greater than zero".into()));
        }

        Ok(url.as_str().trim_end_matches('/').to_string())
    }
}
