//! Wire types for the token endpoint and the secrets API.

use secrecy::SecretString;
use serde::Deserialize;

/// Service principal credentials exchanged for an access token.
#[derive(Debug)]
pub struct ClientCredentials {
    /// Application (client) id
    pub client_id: String,
    /// Client secret
    pub client_secret: SecretString,
}

impl ClientCredentials {
    /// Create credentials from an id and a secret.
    #[must_use]
    pub fn new(client_id: impl Into<String>, client_secret: impl Into<String>) -> Self {
        Self {
            client_id: client_id.into(),
            client_secret: SecretString::from(client_secret.into()),
        }
    }
}

/// A secret as returned by `GET /secrets/{name}`.
#[derive(Debug)]
pub struct Secret {
    /// Full secret identifier, including version
    pub id: String,
    /// Secret value
    pub value: SecretString,
    /// Content type set by the writer
    pub content_type: Option<String>,
    /// Lifecycle attributes
    pub attributes: Option<SecretAttributes>,
}

impl Secret {
    /// Placeholder returned in place of a secret that could not be fetched.
    #[must_use]
    pub fn sentinel() -> Self {
        Self {
            id: String::new(),
            value: SecretString::from(String::new()),
            content_type: None,
            attributes: None,
        }
    }
}

/// Secret attributes; timestamps are unix seconds.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct SecretAttributes {
    /// Whether the secret is enabled
    #[serde(default)]
    pub enabled: Option<bool>,
    /// Creation time
    #[serde(default)]
    pub created: Option<i64>,
    /// Last update time
    #[serde(default)]
    pub updated: Option<i64>,
}

/// Secret bundle body; converted into [`Secret`] right after parsing.
#[derive(Deserialize)]
pub(crate) struct SecretBundle {
    id: String,
    value: String,
    #[serde(rename = "contentType", default)]
    content_type: Option<String>,
    #[serde(default)]
    attributes: Option<SecretAttributes>,
}

impl From<SecretBundle> for Secret {
    fn from(bundle: SecretBundle) -> Self {
        Self {
            id: bundle.id,
            value: SecretString::from(bundle.value),
            content_type: bundle.content_type,
            attributes: bundle.attributes,
        }
    }
}

/// Token endpoint response.
#[derive(Deserialize)]
pub(crate) struct TokenResponse {
    pub token_type: String,
    pub access_token: String,
}
