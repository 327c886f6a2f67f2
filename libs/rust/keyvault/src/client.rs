//! Key Vault HTTP client running the discovery, token and fetch steps.

use crate::{
    challenge::parse_challenge_with,
    config::KeyVaultConfig,
    error::{KeyVaultError, KeyVaultResult},
    outcome::{Outcome, StepFailure},
    secrets::{ClientCredentials, Secret, SecretBundle, TokenResponse},
    session::{Endpoints, Session, SessionStage},
};
use reqwest::{
    Client, StatusCode,
    header::{ACCEPT, AUTHORIZATION, CONTENT_TYPE, HeaderMap, HeaderValue},
};
use rust_common::{CLIENT_REQUEST_ID_HEADER, RequestIdGenerator, UuidRequestIds, build_http_client};
use secrecy::{ExposeSecret, SecretString};
use std::sync::Arc;
use tracing::{debug, info, instrument, warn};
use url::{Url, form_urlencoded};

const REGION_HEADER: &str = "x-ms-keyvault-region";
const CHALLENGE_HEADER: &str = "www-authenticate";
const RETURN_REQUEST_ID_HEADER: &str = "return-client-request-id";
const FORM_CONTENT_TYPE: &str = "application/x-www-form-urlencoded";
const JSON_CONTENT_TYPE: &str = "application/json";
const VAULT_NAME_MIN: usize = 3;
const VAULT_NAME_MAX: usize = 24;

/// Sequential client-credential session against one vault.
///
/// Steps are meant to run in order: [`discover_endpoints`](Self::discover_endpoints),
/// [`authenticate`](Self::authenticate), [`get_secret`](Self::get_secret).
/// Each step records what it learned on the [`Session`] and reports an
/// [`Outcome`]; only transport failures are returned as `Err`.
pub struct KeyVaultClient {
    config: KeyVaultConfig,
    http: Client,
    request_ids: Arc<dyn RequestIdGenerator>,
    session: Session,
}

impl KeyVaultClient {
    /// Create a new client with an empty session.
    ///
    /// # Errors
    ///
    /// Returns [`KeyVaultError::InvalidConfig`] when the vault name is not a
    /// valid DNS label and a platform error if the HTTP client cannot be
    /// built.
    pub fn new(config: KeyVaultConfig) -> KeyVaultResult<Self> {
        validate_vault_name(&config.vault_name)?;

        let http = build_http_client(&config.http)?;
        let session = Session::new(config.vault_name.clone());

        Ok(Self {
            config,
            http,
            request_ids: Arc::new(UuidRequestIds),
            session,
        })
    }

    /// Replace the correlation id source.
    #[must_use]
    pub fn with_request_ids(mut self, request_ids: Arc<dyn RequestIdGenerator>) -> Self {
        self.request_ids = request_ids;
        self
    }

    /// Current session state.
    #[must_use]
    pub const fn session(&self) -> &Session {
        &self.session
    }

    /// Client configuration.
    #[must_use]
    pub const fn config(&self) -> &KeyVaultConfig {
        &self.config
    }

    /// Probe the vault without credentials and read its `401` challenge.
    ///
    /// # Errors
    ///
    /// Returns [`KeyVaultError::Transport`] if the request cannot be sent.
    #[instrument(skip(self), fields(vault = %self.config.vault_name))]
    pub async fn discover_endpoints(&mut self) -> KeyVaultResult<Outcome<Endpoints>> {
        let Some(url) = self.config.discovery_url() else {
            let base_url = self.config.vault_base_url();
            warn!(%base_url, "Vault URL is not valid");
            return Ok(Outcome::Failure(StepFailure::InvalidEndpoint(base_url)));
        };

        let response = self
            .http
            .get(url)
            .header(CLIENT_REQUEST_ID_HEADER, self.request_ids.next_id())
            .send()
            .await?;

        let status = response.status();
        self.session.last_status = Some(status.as_u16());

        if status != StatusCode::UNAUTHORIZED {
            warn!(status = status.as_u16(), "Discovery probe was not challenged");
            return Ok(Outcome::Failure(StepFailure::Status(status.as_u16())));
        }

        let headers = response.headers();
        let region = header_str(headers, REGION_HEADER).to_string();
        let challenge = parse_challenge_with(
            header_str(headers, CHALLENGE_HEADER),
            self.config.allow_insecure_endpoints,
        );

        self.session.vault_region = region;
        self.session.login_url = challenge.login_url.clone();
        self.session.resource_url = challenge.resource_url.clone();

        if !challenge.is_complete() {
            warn!(
                login_url = %challenge.login_url,
                resource_url = %challenge.resource_url,
                "Challenge did not name both endpoints"
            );
            return Ok(Outcome::Failure(StepFailure::MalformedChallenge));
        }

        self.session.advance(SessionStage::Discovered);
        info!(
            region = %self.session.vault_region,
            login_url = %self.session.login_url,
            "Discovered identity provider"
        );
        Ok(Outcome::Success(self.session.endpoints()))
    }

    /// Exchange client credentials for an access token.
    ///
    /// Runs against the endpoints held by the session; if discovery failed
    /// the token URL is unusable and the step reports
    /// [`StepFailure::InvalidEndpoint`].
    ///
    /// # Errors
    ///
    /// Returns [`KeyVaultError::Transport`] if the request cannot be sent.
    #[instrument(skip(self, credentials), fields(client_id = %credentials.client_id))]
    pub async fn authenticate(
        &mut self,
        credentials: &ClientCredentials,
    ) -> KeyVaultResult<Outcome<()>> {
        let token_url = format!("{}/oauth2/token", self.session.login_url);
        let Ok(url) = Url::parse(&token_url) else {
            warn!(%token_url, "Token endpoint is not a valid URL");
            return Ok(Outcome::Failure(StepFailure::InvalidEndpoint(token_url)));
        };

        let response = self
            .http
            .post(url)
            .header(CONTENT_TYPE, FORM_CONTENT_TYPE)
            .header(ACCEPT, JSON_CONTENT_TYPE)
            .header(RETURN_REQUEST_ID_HEADER, "true")
            .header(CLIENT_REQUEST_ID_HEADER, self.request_ids.next_id())
            .body(token_request_body(&self.session.resource_url, credentials))
            .send()
            .await?;

        let status = response.status();
        self.session.last_status = Some(status.as_u16());

        if status != StatusCode::OK {
            warn!(status = status.as_u16(), "Token request rejected");
            return Ok(Outcome::Failure(StepFailure::Status(status.as_u16())));
        }

        let text = response.text().await?;
        let token: TokenResponse = match serde_json::from_str(&text) {
            Ok(token) => token,
            Err(e) => {
                warn!(error = %e, "Token response is not valid JSON");
                return Ok(Outcome::Failure(StepFailure::MalformedBody(e.to_string())));
            }
        };

        self.session.token_type = token.token_type;
        self.session.access_token = SecretString::from(token.access_token);
        self.session.advance(SessionStage::Authenticated);

        info!(token_type = %self.session.token_type, "Obtained access token");
        Ok(Outcome::Success(()))
    }

    /// Run discovery followed by the token exchange.
    ///
    /// A failed discovery does not stop the exchange; it then fails on its
    /// own. The returned outcome is the exchange's.
    ///
    /// # Errors
    ///
    /// Returns [`KeyVaultError::Transport`] if either request cannot be sent.
    pub async fn login(&mut self, credentials: &ClientCredentials) -> KeyVaultResult<Outcome<()>> {
        if let Outcome::Failure(reason) = self.discover_endpoints().await? {
            debug!(%reason, "Attempting token exchange after failed discovery");
        }
        self.authenticate(credentials).await
    }

    /// Fetch a secret with the session's token.
    ///
    /// # Errors
    ///
    /// Returns [`KeyVaultError::Transport`] if the request cannot be sent.
    #[instrument(skip(self), fields(vault = %self.config.vault_name))]
    pub async fn get_secret(&mut self, secret_name: &str) -> KeyVaultResult<Outcome<Secret>> {
        let Some(url) = self.config.secret_url(secret_name) else {
            let base_url = self.config.vault_base_url();
            warn!(%base_url, "Vault URL is not valid");
            return Ok(Outcome::Failure(StepFailure::InvalidEndpoint(base_url)));
        };

        let Ok(mut authorization) = HeaderValue::from_str(&self.session.authorization()) else {
            warn!("Access token cannot be sent as a header");
            return Ok(Outcome::Failure(StepFailure::InvalidAuthorization));
        };
        authorization.set_sensitive(true);

        let response = self
            .http
            .get(url)
            .header(ACCEPT, JSON_CONTENT_TYPE)
            .header(CLIENT_REQUEST_ID_HEADER, self.request_ids.next_id())
            .header(AUTHORIZATION, authorization)
            .send()
            .await?;

        let status = response.status();
        self.session.last_status = Some(status.as_u16());

        if status != StatusCode::OK {
            warn!(status = status.as_u16(), "Secret fetch rejected");
            return Ok(Outcome::Failure(StepFailure::Status(status.as_u16())));
        }

        let text = response.text().await?;
        match serde_json::from_str::<SecretBundle>(&text) {
            Ok(bundle) => {
                self.session.advance(SessionStage::SecretFetched);
                debug!("Secret fetched");
                Ok(Outcome::Success(bundle.into()))
            }
            Err(e) => {
                warn!(error = %e, "Secret response is not valid JSON");
                Ok(Outcome::Failure(StepFailure::MalformedBody(e.to_string())))
            }
        }
    }

    /// Fetch a secret as a record plus success flag.
    ///
    /// On failure the record is [`Secret::sentinel`].
    ///
    /// # Errors
    ///
    /// Returns [`KeyVaultError::Transport`] if the request cannot be sent.
    pub async fn get_secret_value(&mut self, secret_name: &str) -> KeyVaultResult<(Secret, bool)> {
        Ok(self.get_secret(secret_name).await?.into_record())
    }
}

/// Vault names become the first label of the vault host: 3 to 24 ASCII
/// letters, digits or hyphens.
fn validate_vault_name(name: &str) -> KeyVaultResult<()> {
    if name.trim().is_empty() {
        return Err(KeyVaultError::invalid_config("vault name is empty"));
    }
    if !(VAULT_NAME_MIN..=VAULT_NAME_MAX).contains(&name.len()) {
        return Err(KeyVaultError::invalid_config(format!(
            "vault name must be {VAULT_NAME_MIN} to {VAULT_NAME_MAX} characters, got {}",
            name.len()
        )));
    }
    if !name.bytes().all(|b| b.is_ascii_alphanumeric() || b == b'-') {
        return Err(KeyVaultError::invalid_config(
            "vault name may only contain letters, digits and hyphens",
        ));
    }
    Ok(())
}

/// Form body of the client-credential grant, fields in wire order.
fn token_request_body(resource_url: &str, credentials: &ClientCredentials) -> String {
    form_urlencoded::Serializer::new(String::new())
        .append_pair("resource", resource_url)
        .append_pair("client_id", &credentials.client_id)
        .append_pair("client_secret", credentials.client_secret.expose_secret())
        .append_pair("grant_type", "client_credentials")
        .finish()
}

fn header_str<'a>(headers: &'a HeaderMap, name: &str) -> &'a str {
    headers
        .get(name)
        .and_then(|value| value.to_str().ok())
        .unwrap_or_default()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_token_request_body_order_and_encoding() {
        let credentials = ClientCredentials::new("0f2c-app", "s3cr3t");
        assert_eq!(
            token_request_body("https://vault.azure.net", &credentials),
            "resource=https%3A%2F%2Fvault.azure.net&client_id=0f2c-app\
             &client_secret=s3cr3t&grant_type=client_credentials"
        );
    }

    #[test]
    fn test_token_request_body_escapes_reserved_characters() {
        let credentials = ClientCredentials::new("id", "a+b&c=d");
        let body = token_request_body("", &credentials);
        assert!(body.contains("client_secret=a%2Bb%26c%3Dd&"));
        assert!(body.starts_with("resource=&client_id=id&"));
    }

    #[test]
    fn test_empty_vault_name_rejected() {
        let result = KeyVaultClient::new(KeyVaultConfig::new("  "));
        assert!(matches!(result, Err(KeyVaultError::InvalidConfig(_))));
    }

    #[test]
    fn test_vault_name_must_be_a_dns_label() {
        let too_long = "a".repeat(25);
        let longest = "A".repeat(24);
        for name in ["evil.example/x?", "ab", &too_long, "my vault", "vault_1", "кv1"] {
            let result = KeyVaultClient::new(KeyVaultConfig::new(name));
            assert!(
                matches!(result, Err(KeyVaultError::InvalidConfig(_))),
                "{name:?} should be rejected"
            );
        }
        for name in ["abc", "my-vault-01", &longest] {
            assert!(KeyVaultClient::new(KeyVaultConfig::new(name)).is_ok(), "{name:?}");
        }
    }

    #[test]
    fn test_new_client_starts_at_init() {
        let client = KeyVaultClient::new(KeyVaultConfig::new("myvault")).unwrap();
        assert_eq!(client.session().stage(), SessionStage::Init);
        assert_eq!(client.session().vault_name(), "myvault");
        assert_eq!(client.config().vault_name, "myvault");
    }
}
