//! Outbound HTTP client.
//!
//! Discovery, token exchange and secret fetch share one client so they see
//! the same timeouts, TLS backend and user agent. Calls are strictly
//! sequential, so the pool keeps at most one idle connection per host.

use crate::error::PlatformError;
use reqwest::{Client, ClientBuilder, redirect};
use std::time::Duration;

const DEFAULT_USER_AGENT: &str = concat!("azkvault/", env!("CARGO_PKG_VERSION"));

/// Settings for [`build_http_client`].
#[derive(Debug, Clone)]
pub struct HttpConfig {
    /// Whole-request timeout (default: 30s)
    pub timeout: Duration,
    /// TCP/TLS connect timeout (default: 10s)
    pub connect_timeout: Duration,
    /// Idle connections kept per host (default: 1)
    pub max_idle_per_host: usize,
    /// Sent as `User-Agent`
    pub user_agent: String,
}

impl Default for HttpConfig {
    fn default() -> Self {
        Self {
            timeout: Duration::from_secs(30),
            connect_timeout: Duration::from_secs(10),
            max_idle_per_host: 1,
            user_agent: DEFAULT_USER_AGENT.to_string(),
        }
    }
}

impl HttpConfig {
    /// Override the whole-request timeout.
    #[must_use]
    pub const fn with_timeout(mut self, timeout: Duration) -> Self {
        self.timeout = timeout;
        self
    }

    /// Override the connect timeout.
    #[must_use]
    pub const fn with_connect_timeout(mut self, timeout: Duration) -> Self {
        self.connect_timeout = timeout;
        self
    }

    /// Override the user agent.
    #[must_use]
    pub fn with_user_agent(mut self, user_agent: impl Into<String>) -> Self {
        self.user_agent = user_agent.into();
        self
    }
}

/// Build the shared client.
///
/// Redirects are never followed: the vault's `401` challenge and every
/// other status must reach the caller untouched.
///
/// # Errors
///
/// Returns [`PlatformError::Http`] if the TLS backend cannot be initialized.
///
/// # Examples
///
/// ```
/// use rust_common::{HttpConfig, build_http_client};
/// use std::time::Duration;
///
/// let client = build_http_client(&HttpConfig::default().with_timeout(Duration::from_secs(5)));
/// assert!(client.is_ok());
/// ```
pub fn build_http_client(config: &HttpConfig) -> Result<Client, PlatformError> {
    let client = ClientBuilder::new()
        .use_rustls_tls()
        .redirect(redirect::Policy::none())
        .pool_max_idle_per_host(config.max_idle_per_host)
        .timeout(config.timeout)
        .connect_timeout(config.connect_timeout)
        .user_agent(config.user_agent.as_str())
        .build()?;
    Ok(client)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_defaults_suit_a_one_shot_tool() {
        let config = HttpConfig::default();
        assert_eq!(config.timeout, Duration::from_secs(30));
        assert_eq!(config.connect_timeout, Duration::from_secs(10));
        assert_eq!(config.max_idle_per_host, 1);
        assert_eq!(config.user_agent, DEFAULT_USER_AGENT);
        assert!(config.user_agent.starts_with("azkvault/"));
    }

    #[test]
    fn test_overrides() {
        let config = HttpConfig::default()
            .with_connect_timeout(Duration::from_millis(250))
            .with_user_agent("azkvault-ci");

        assert_eq!(config.connect_timeout, Duration::from_millis(250));
        assert_eq!(config.timeout, Duration::from_secs(30));
        assert_eq!(config.user_agent, "azkvault-ci");
    }

    #[test]
    fn test_client_builds_with_overrides() {
        let config = HttpConfig::default().with_timeout(Duration::from_secs(1));
        assert!(build_http_client(&config).is_ok());
    }
}
