//! Storage account connection strings.
//!
//! Parsing is done by [`azure_storage::ConnectionString`]. SDK errors echo
//! the whole input, so they are replaced with messages that name only keys.

use azure_storage::{CloudLocation, ConnectionString, EndpointProtocol, StorageCredentials};
use base64::{Engine, engine::general_purpose::STANDARD as BASE64};

use crate::error::{UploadError, UploadResult};

/// Endpoint suffix of the public Azure cloud.
pub const DEFAULT_ENDPOINT_SUFFIX: &str = "core.windows.net";

/// Parsed storage connection string.
///
/// `Debug` shows which kind of credential is held, never its value.
#[derive(Debug, Clone)]
pub struct StorageConnectionString {
    /// `http` or `https`
    pub protocol: String,
    /// Storage account name
    pub account_name: Option<String>,
    /// DNS suffix of the storage cloud
    pub endpoint_suffix: String,
    /// Explicit blob service endpoint
    pub blob_endpoint: Option<String>,
    credentials: StorageCredentials,
    shared_key: bool,
}

impl StorageConnectionString {
    /// Parse and validate a connection string.
    ///
    /// # Errors
    ///
    /// Returns [`UploadError::InvalidConnectionString`] when the string is
    /// malformed, names no account or blob endpoint, carries no credential,
    /// or has an account key that is not base64.
    ///
    /// # Examples
    ///
    /// ```
    /// use azkv_blob_upload::StorageConnectionString;
    ///
    /// let parsed = StorageConnectionString::parse(
    ///     "DefaultEndpointsProtocol=https;AccountName=acct;AccountKey=a2V5;EndpointSuffix=core.windows.net",
    /// )
    /// .unwrap();
    /// assert_eq!(parsed.blob_endpoint_url(), "https://acct.blob.core.windows.net");
    ///
    /// assert!(StorageConnectionString::parse("").is_err());
    /// ```
    pub fn parse(connection_string: &str) -> UploadResult<Self> {
        if connection_string.trim().is_empty() {
            return Err(UploadError::invalid_connection_string("connection string is empty"));
        }

        let parsed = ConnectionString::new(connection_string).map_err(|_| {
            UploadError::invalid_connection_string(format!(
                "expected Key=Value pairs with known keys, got keys [{}]",
                keys_of(connection_string)
            ))
        })?;

        let account_name = parsed.account_name.map(str::to_string);
        let blob_endpoint = parsed
            .blob_endpoint
            .map(|endpoint| endpoint.trim_end_matches('/').to_string());
        if account_name.is_none() && blob_endpoint.is_none() {
            return Err(UploadError::invalid_connection_string(
                "neither AccountName nor BlobEndpoint is set",
            ));
        }

        let shared_key = parsed.sas.is_none();
        if shared_key {
            if let Some(key) = parsed.account_key {
                if BASE64.decode(key).is_err() {
                    return Err(UploadError::invalid_connection_string(
                        "AccountKey is not valid base64",
                    ));
                }
            }
        }

        let credentials = parsed.storage_credentials().map_err(|_| {
            UploadError::invalid_connection_string(
                "needs AccountName with AccountKey, or SharedAccessSignature",
            )
        })?;

        let protocol = match parsed.default_endpoints_protocol {
            Some(EndpointProtocol::Http) => "http",
            Some(EndpointProtocol::Https) | None => "https",
        };

        Ok(Self {
            protocol: protocol.to_string(),
            account_name,
            endpoint_suffix: parsed
                .endpoint_suffix
                .unwrap_or(DEFAULT_ENDPOINT_SUFFIX)
                .to_string(),
            blob_endpoint,
            credentials,
            shared_key,
        })
    }

    /// Blob service base URL, without trailing slash.
    #[must_use]
    pub fn blob_endpoint_url(&self) -> String {
        self.blob_endpoint.clone().unwrap_or_else(|| {
            format!(
                "{}://{}.blob.{}",
                self.protocol,
                self.account_name.as_deref().unwrap_or_default(),
                self.endpoint_suffix
            )
        })
    }

    /// Whether the default public-cloud endpoint applies.
    #[must_use]
    pub fn uses_public_endpoint(&self) -> bool {
        self.blob_endpoint.is_none()
            && self.protocol == "https"
            && self.endpoint_suffix == DEFAULT_ENDPOINT_SUFFIX
    }

    /// Whether requests are signed with the account key rather than a SAS.
    #[must_use]
    pub const fn uses_shared_key(&self) -> bool {
        self.shared_key
    }

    /// SDK credentials for this account.
    #[must_use]
    pub fn credentials(&self) -> StorageCredentials {
        self.credentials.clone()
    }

    /// Where the blob service lives.
    #[must_use]
    pub fn cloud_location(&self) -> CloudLocation {
        let account = self.account_name.clone().unwrap_or_default();
        if self.uses_public_endpoint() {
            CloudLocation::Public { account }
        } else {
            CloudLocation::Custom {
                account,
                uri: self.blob_endpoint_url(),
            }
        }
    }
}

/// Keys of the `Key=Value` segments, for error messages.
fn keys_of(connection_string: &str) -> String {
    connection_string
        .split(';')
        .filter_map(|segment| segment.split_once('=').map(|(key, _)| key.trim()))
        .filter(|key| !key.is_empty())
        .collect::<Vec<_>>()
        .join(", ")
}
