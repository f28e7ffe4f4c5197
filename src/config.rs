//! Relay Configuration
//!
//! Explicit configuration object injected into the upstream client and
//! the server at construction time. The API credential is read from the
//! environment exactly once, by `from_env`, and held as a secret.

use secrecy::SecretString;

use crate::error::RelayError;

/// Default upstream API base URL
pub const DEFAULT_BASE_URL: &str = "https://api.kie.ai";

/// Default server bind address
pub const DEFAULT_BIND_ADDR: &str = "127.0.0.1:3000";

/// Environment variable holding the upstream API key
pub const API_KEY_ENV: &str = "KIE_API_KEY";

/// Environment variable overriding the upstream base URL
pub const BASE_URL_ENV: &str = "KIE_BASE_URL";

/// Environment variable overriding the server bind address
pub const BIND_ADDR_ENV: &str = "VIDRELAY_BIND_ADDR";

/// Relay configuration.
///
/// # Example
/// ```rust
/// use vidrelay::config::RelayConfig;
///
/// let config = RelayConfig::new("your-api-key")
///     .with_base_url("https://api.kie.ai");
/// assert!(config.validate().is_ok());
/// ```
#[derive(Debug, Clone)]
pub struct RelayConfig {
    /// Upstream API key (securely stored)
    pub api_key: SecretString,

    /// Base URL for the upstream job API
    pub base_url: String,

    /// Address the relay server binds to
    pub bind_addr: String,
}

impl RelayConfig {
    /// Create a new configuration with the given API key and defaults.
    pub fn new<S: Into<String>>(api_key: S) -> Self {
        Self {
            api_key: SecretString::from(api_key.into()),
            base_url: DEFAULT_BASE_URL.to_string(),
            bind_addr: DEFAULT_BIND_ADDR.to_string(),
        }
    }

    /// Set the upstream base URL.
    pub fn with_base_url<S: Into<String>>(mut self, url: S) -> Self {
        self.base_url = url.into();
        self
    }

    /// Set the server bind address.
    pub fn with_bind_addr<S: Into<String>>(mut self, addr: S) -> Self {
        self.bind_addr = addr.into();
        self
    }

    /// Load configuration from the process environment.
    ///
    /// `KIE_API_KEY` is required; `KIE_BASE_URL` and `VIDRELAY_BIND_ADDR`
    /// fall back to their defaults.
    pub fn from_env() -> Result<Self, RelayError> {
        let api_key = std::env::var(API_KEY_ENV).map_err(|_| {
            RelayError::ConfigurationError(format!("{API_KEY_ENV} is not set"))
        })?;

        let mut config = Self::new(api_key);
        if let Ok(base_url) = std::env::var(BASE_URL_ENV) {
            config.base_url = base_url;
        }
        if let Ok(bind_addr) = std::env::var(BIND_ADDR_ENV) {
            config.bind_addr = bind_addr;
        }
        Ok(config)
    }

    /// Get the authorization header value for upstream requests.
    pub fn auth_header(&self) -> String {
        use secrecy::ExposeSecret;
        format!("Bearer {}", self.api_key.expose_secret())
    }

    /// Validate the configuration.
    pub fn validate(&self) -> Result<(), RelayError> {
        use secrecy::ExposeSecret;
        if self.api_key.expose_secret().is_empty() {
            return Err(RelayError::ConfigurationError(
                "API key cannot be empty".to_string(),
            ));
        }

        if !self.base_url.starts_with("http://") && !self.base_url.starts_with("https://") {
            return Err(RelayError::ConfigurationError(
                "Base URL must start with http:// or https://".to_string(),
            ));
        }

        Ok(())
    }
}
