//! Client configuration.

use std::env;
use std::fmt::{self, Debug, Formatter};
use std::time::Duration;

use reqwest::header::HeaderValue;
use url::Url;

use crate::error::RoverError;

/// Public RoVer registry endpoint.
pub const DEFAULT_BASE_URL: &str = "https://registry.rover.link/api";

pub const ENV_API_KEY: &str = "ROVER_API_KEY";
pub const ENV_BASE_URL: &str = "ROVER_BASE_URL";
pub const ENV_TIMEOUT_SECS: &str = "ROVER_TIMEOUT_SECS";
pub const ENV_PROXY: &str = "ROVER_PROXY";

/// Settings used to open a [`RoverClient`](super::RoverClient).
#[derive(Clone)]
pub struct ClientConfig {
    pub api_key: String,
    pub base_url: String,
    /// Client-wide request timeout. `None` leaves reqwest's default (no timeout).
    pub timeout: Option<Duration>,
    pub user_agent: String,
    /// Optional HTTP proxy, `http://[USER:PASS@]HOST:PORT`.
    pub proxy: Option<String>,
}

impl Debug for ClientConfig {
    fn fmt(&self, f: &mut Formatter<'_>) -> fmt::Result {
        f.debug_struct("ClientConfig")
            .field("api_key", &"<redacted>")
            .field("base_url", &self.base_url)
            .field("timeout", &self.timeout)
            .field("user_agent", &self.user_agent)
            .field("proxy", &self.proxy)
            .finish()
    }
}

impl ClientConfig {
    #[must_use]
    pub fn new(api_key: impl Into<String>) -> Self {
        Self {
            api_key: api_key.into(),
            base_url: DEFAULT_BASE_URL.to_string(),
            timeout: None,
            user_agent: format!("rover_api/{}", env!("CARGO_PKG_VERSION")),
            proxy: None,
        }
    }

    /// Build a configuration from `ROVER_*` environment variables.
    ///
    /// `ROVER_API_KEY` is required; `ROVER_BASE_URL`, `ROVER_TIMEOUT_SECS`
    /// and `ROVER_PROXY` are optional.
    pub fn from_env() -> Result<Self, RoverError> {
        let api_key = env::var(ENV_API_KEY)
            .map_err(|_| RoverError::Config(format!("{ENV_API_KEY} is not set")))?;

        let mut config = Self::new(api_key);
        if let Ok(base_url) = env::var(ENV_BASE_URL) {
            config = config.with_base_url(base_url);
        }
        if let Ok(secs) = env::var(ENV_TIMEOUT_SECS) {
            let secs: u64 = secs.trim().parse().map_err(|_| {
                RoverError::Config(format!("{ENV_TIMEOUT_SECS} must be a whole number of seconds"))
            })?;
            config = config.with_timeout(Duration::from_secs(secs));
        }
        if let Ok(proxy) = env::var(ENV_PROXY) {
            config = config.with_proxy(proxy);
        }
        config.validate()?;
        Ok(config)
    }

    #[must_use]
    pub fn with_base_url(mut self, base_url: impl Into<String>) -> Self {
        self.base_url = base_url.into();
        self
    }

    #[must_use]
    pub fn with_timeout(mut self, timeout: Duration) -> Self {
        self.timeout = Some(timeout);
        self
    }

    #[must_use]
    pub fn with_user_agent(mut self, user_agent: impl Into<String>) -> Self {
        self.user_agent = user_agent.into();
        self
    }

    #[must_use]
    pub fn with_proxy(mut self, proxy: impl Into<String>) -> Self {
        self.proxy = Some(proxy.into());
        self
    }

    /// Proxy URL with a scheme, defaulting to `http://`.
    pub(crate) fn proxy_url(&self) -> Option<String> {
        self.proxy.as_ref().map(|p| {
            if p.starts_with("http://") || p.starts_with("https://") {
                p.clone()
            } else {
                format!("http://{p}")
            }
        })
    }

    /// Validates the configuration.
    ///
    /// # Errors
    ///
    /// Returns [`RoverError::Config`] for an empty key, a key or user agent
    /// that cannot be sent as a header, a base URL that is not http(s), or a
    /// zero timeout.
    pub fn validate(&self) -> Result<(), RoverError> {
        if self.api_key.trim().is_empty() {
            return Err(RoverError::Config("api_key cannot be empty".to_string()));
        }
        if HeaderValue::from_str(&format!("Bearer {}", self.api_key)).is_err() {
            return Err(RoverError::Config(
                "api_key contains characters not allowed in a header".to_string(),
            ));
        }
        if HeaderValue::from_str(&self.user_agent).is_err() {
            return Err(RoverError::Config(
                "user_agent contains characters not allowed in a header".to_string(),
            ));
        }

        let url = Url::parse(&self.base_url)
            .map_err(|e| RoverError::Config(format!("invalid base_url `{}`: {e}", self.base_url)))?;
        if !matches!(url.scheme(), "http" | "https") {
            return Err(RoverError::Config(
                "base_url must start with http:// or https://".to_string(),
            ));
        }

        if self.timeout == Some(Duration::ZERO) {
            return Err(RoverError::Config("timeout must be non-zero".to_string()));
        }

        if let Some(proxy) = self.proxy_url() {
            Url::parse(&proxy)
                .map_err(|e| RoverError::Config(format!("invalid proxy `{proxy}`: {e}")))?;
        }

        Ok(())
    }
}
