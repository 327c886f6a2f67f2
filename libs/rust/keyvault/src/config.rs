//! Key Vault client configuration.

use rust_common::HttpConfig;
use url::Url;

/// REST API version pinned on every vault request.
pub const DEFAULT_API_VERSION: &str = "2015-06-01";

/// Placeholder secret name used by the discovery probe.
pub const DISCOVERY_SECRET_NAME: &str = "secretname";

/// Key Vault client configuration.
#[derive(Debug, Clone)]
pub struct KeyVaultConfig {
    /// Vault name, the first label of `<name>.vault.azure.net`
    pub vault_name: String,
    /// Base URL override; `None` targets the public Azure cloud
    pub endpoint: Option<String>,
    /// `api-version` query parameter
    pub api_version: String,
    /// Accept `http://` endpoints in challenges (local test servers only)
    pub allow_insecure_endpoints: bool,
    /// Transport settings
    pub http: HttpConfig,
}

impl KeyVaultConfig {
    /// Create a configuration for the named vault in the public cloud.
    #[must_use]
    pub fn new(vault_name: impl Into<String>) -> Self {
        Self {
            vault_name: vault_name.into(),
            endpoint: None,
            api_version: DEFAULT_API_VERSION.to_string(),
            allow_insecure_endpoints: false,
            http: HttpConfig::default(),
        }
    }

    /// Point the client at a different vault base URL.
    #[must_use]
    pub fn with_endpoint(mut self, endpoint: impl Into<String>) -> Self {
        self.endpoint = Some(endpoint.into().trim_end_matches('/').to_string());
        self
    }

    /// Accept plain-HTTP endpoints named by the challenge.
    #[must_use]
    pub const fn with_insecure_endpoints(mut self, allow: bool) -> Self {
        self.allow_insecure_endpoints = allow;
        self
    }

    /// Set transport settings.
    #[must_use]
    pub fn with_http(mut self, http: HttpConfig) -> Self {
        self.http = http;
        self
    }

    /// Base URL of the vault, without trailing slash.
    #[must_use]
    pub fn vault_base_url(&self) -> String {
        self.endpoint
            .clone()
            .unwrap_or_else(|| format!("https://{}.vault.azure.net", self.vault_name))
    }

    /// URL of a named secret.
    ///
    /// The name is percent-encoded as a single path segment. Returns `None`
    /// when the base URL does not parse or cannot carry a path.
    #[must_use]
    pub fn secret_url(&self, secret_name: &str) -> Option<Url> {
        let mut url = Url::parse(&self.vault_base_url()).ok()?;
        url.path_segments_mut()
            .ok()?
            .pop_if_empty()
            .push("secrets")
            .push(secret_name);
        url.query_pairs_mut()
            .append_pair("api-version", &self.api_version);
        Some(url)
    }

    /// URL probed during discovery.
    #[must_use]
    pub fn discovery_url(&self) -> Option<Url> {
        self.secret_url(DISCOVERY_SECRET_NAME)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_public_cloud_urls() {
        let config = KeyVaultConfig::new("myvault");
        assert_eq!(config.vault_base_url(), "https://myvault.vault.azure.net");
        assert_eq!(
            config.secret_url("dbconn").unwrap().as_str(),
            "https://myvault.vault.azure.net/secrets/dbconn?api-version=2015-06-01"
        );
        assert_eq!(
            config.discovery_url().unwrap().as_str(),
            "https://myvault.vault.azure.net/secrets/secretname?api-version=2015-06-01"
        );
    }

    #[test]
    fn test_secret_name_stays_one_path_segment() {
        let config = KeyVaultConfig::new("myvault");
        let url = config.secret_url("dbconn#other").unwrap();
        assert_eq!(url.path(), "/secrets/dbconn%23other");
        assert_eq!(url.query(), Some("api-version=2015-06-01"));
        assert!(url.fragment().is_none());

        let url = config.secret_url("a/../../keys?x=1").unwrap();
        assert_eq!(url.path(), "/secrets/a%2F..%2F..%2Fkeys%3Fx=1");
        assert_eq!(url.query_pairs().count(), 1);
    }

    #[test]
    fn test_unusable_endpoint_yields_no_url() {
        let config = KeyVaultConfig::new("myvault").with_endpoint("not a url");
        assert!(config.secret_url("dbconn").is_none());
        let config = KeyVaultConfig::new("myvault").with_endpoint("mailto:vault@example.com");
        assert!(config.discovery_url().is_none());
    }

    #[test]
    fn test_endpoint_override_trims_slash() {
        let config = KeyVaultConfig::new("myvault").with_endpoint("http://127.0.0.1:8200/");
        assert_eq!(
            config.secret_url("a").unwrap().as_str(),
            "http://127.0.0.1:8200/secrets/a?api-version=2015-06-01"
        );
    }

    #[test]
    fn test_defaults() {
        let config = KeyVaultConfig::new("v");
        assert_eq!(config.api_version, DEFAULT_API_VERSION);
        assert!(!config.allow_insecure_endpoints);
        assert!(config.endpoint.is_none());
    }
}
