//! Client configuration.

use std::collections::HashMap;
use std::time::Duration;

/// Base URL of the hosted service.
pub const DEFAULT_BASE_URL: &str = "https://api.easybeam.ai/v1";

/// A secret string type for sensitive data like API tokens.
/// Prevents accidental logging or display of secrets.
#[derive(Clone)]
pub struct SecretString(String);

impl SecretString {
    /// Create a new secret string.
    pub fn new(s: String) -> Self {
        Self(s)
    }

    /// Get the underlying secret value.
    pub fn expose_secret(&self) -> &str {
        &self.0
    }
}

impl std::fmt::Debug for SecretString {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str("SecretString([REDACTED])")
    }
}

impl From<String> for SecretString {
    fn from(s: String) -> Self {
        Self::new(s)
    }
}

impl From<&str> for SecretString {
    fn from(s: &str) -> Self {
        Self::new(s.to_string())
    }
}

/// Configuration held for the lifetime of one client.
///
/// # Example
/// ```rust
/// use easybeam::options::ClientConfig;
/// use std::time::Duration;
///
/// let config = ClientConfig::new("eb-token")
///     .with_timeout(Duration::from_secs(30))
///     .with_header("X-Trace".to_string(), "on".to_string());
///
/// assert_eq!(config.base_url, "https://api.easybeam.ai/v1");
/// ```
#[derive(Debug, Clone)]
pub struct ClientConfig {
    /// Bearer token sent on every request
    pub token: SecretString,

    /// Base URL for API endpoints
    pub base_url: String,

    /// Request timeout
    pub timeout: Option<Duration>,

    /// HTTP proxy URL
    pub proxy: Option<String>,

    /// Additional HTTP headers to include in requests
    pub extra_headers: Option<HashMap<String, String>>,
}

impl ClientConfig {
    /// Create a configuration for the hosted service with the given token.
    pub fn new(token: impl Into<SecretString>) -> Self {
        Self {
            token: token.into(),
            base_url: DEFAULT_BASE_URL.to_string(),
            timeout: None,
            proxy: None,
            extra_headers: None,
        }
    }

    /// Set the base URL.
    pub fn with_base_url(mut self, base_url: impl Into<String>) -> Self {
        self.base_url = base_url.into();
        self
    }

    /// Set the timeout.
    pub fn with_timeout(mut self, timeout: Duration) -> Self {
        self.timeout = Some(timeout);
        self
    }

    /// Set the proxy URL.
    pub fn with_proxy(mut self, proxy: String) -> Self {
        self.proxy = Some(proxy);
        self
    }

    /// Set extra headers.
    pub fn with_extra_headers(mut self, headers: HashMap<String, String>) -> Self {
        self.extra_headers = Some(headers);
        self
    }

    /// Add a single extra header.
    pub fn with_header(mut self, key: String, value: String) -> Self {
        self.extra_headers
            .get_or_insert_with(HashMap::new)
            .insert(key, value);
        self
    }

    /// Join a path onto the base URL.
    pub(crate) fn endpoint_url(&self, path: &str) -> String {
        format!("{}/{}", self.base_url.trim_end_matches('/'), path)
    }
}
