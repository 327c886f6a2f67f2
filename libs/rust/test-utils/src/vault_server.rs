//! Fake vault and identity provider on a local wiremock server.
//!
//! Both roles share one server: the vault serves `/secrets/...` and the
//! identity provider serves `/<tenant>/oauth2/token`. Point the client at
//! [`MockVault::uri`] with insecure endpoints allowed.

use crate::fixtures::{ACCESS_TOKEN, RESOURCE_URL, VAULT_REGION, secret_body, token_body};
use wiremock::matchers::{body_string_contains, header, method, path, query_param};
use wiremock::{Mock, MockServer, Request, ResponseTemplate};

/// Tenant path segment of the fake authority.
pub const TENANT: &str = "72f988bf-86f1-41af-91ab-2d7cd011db47";

/// API version the fake vault expects.
pub const API_VERSION: &str = "2015-06-01";

/// Wiremock server playing vault and identity provider.
pub struct MockVault {
    server: MockServer,
}

impl MockVault {
    /// Start a server with nothing mounted.
    pub async fn start() -> Self {
        Self {
            server: MockServer::start().await,
        }
    }

    /// Base URL of the server.
    #[must_use]
    pub fn uri(&self) -> String {
        self.server.uri()
    }

    /// Authority named in the challenge.
    #[must_use]
    pub fn login_url(&self) -> String {
        format!("{}/{TENANT}", self.uri())
    }

    /// Challenge header pointing at this server.
    #[must_use]
    pub fn challenge_header(&self) -> String {
        format!(
            r#"Bearer authorization="{}", resource="{RESOURCE_URL}""#,
            self.login_url()
        )
    }

    /// Underlying server.
    #[must_use]
    pub const fn server(&self) -> &MockServer {
        &self.server
    }

    /// Answer the discovery probe with a `401` challenge.
    pub async fn mount_challenge(&self) {
        self.mount_challenge_header(&self.challenge_header()).await;
    }

    /// Answer the discovery probe with a `401` and a custom challenge.
    pub async fn mount_challenge_header(&self, challenge: &str) {
        Mock::given(method("GET"))
            .and(path("/secrets/secretname"))
            .and(query_param("api-version", API_VERSION))
            .respond_with(
                ResponseTemplate::new(401)
                    .insert_header("WWW-Authenticate", challenge)
                    .insert_header("x-ms-keyvault-region", VAULT_REGION),
            )
            .mount(&self.server)
            .await;
    }

    /// Answer the discovery probe with an arbitrary status.
    pub async fn mount_discovery_status(&self, status: u16) {
        Mock::given(method("GET"))
            .and(path("/secrets/secretname"))
            .respond_with(ResponseTemplate::new(status))
            .mount(&self.server)
            .await;
    }

    /// Issue [`ACCESS_TOKEN`] for client-credential requests.
    pub async fn mount_token(&self) {
        Mock::given(method("POST"))
            .and(path(format!("/{TENANT}/oauth2/token")))
            .and(header("content-type", "application/x-www-form-urlencoded"))
            .and(body_string_contains("grant_type=client_credentials"))
            .respond_with(ResponseTemplate::new(200).set_body_json(token_body(ACCESS_TOKEN)))
            .mount(&self.server)
            .await;
    }

    /// Answer token requests with a status and raw body.
    pub async fn mount_token_response(&self, status: u16, body: &str) {
        Mock::given(method("POST"))
            .and(path(format!("/{TENANT}/oauth2/token")))
            .respond_with(ResponseTemplate::new(status).set_body_string(body))
            .mount(&self.server)
            .await;
    }

    /// Serve a secret to requests bearing [`ACCESS_TOKEN`].
    pub async fn mount_secret(&self, name: &str, id: &str, value: &str) {
        Mock::given(method("GET"))
            .and(path(format!("/secrets/{name}")))
            .and(query_param("api-version", API_VERSION))
            .and(header("authorization", format!("Bearer {ACCESS_TOKEN}").as_str()))
            .respond_with(ResponseTemplate::new(200).set_body_json(secret_body(id, value)))
            .mount(&self.server)
            .await;
    }

    /// Answer a secret fetch with a status and JSON body.
    pub async fn mount_secret_response(&self, name: &str, status: u16, body: serde_json::Value) {
        Mock::given(method("GET"))
            .and(path(format!("/secrets/{name}")))
            .respond_with(ResponseTemplate::new(status).set_body_json(body))
            .mount(&self.server)
            .await;
    }

    /// Answer a secret fetch with a status and raw body.
    pub async fn mount_secret_raw(&self, name: &str, status: u16, body: &str) {
        Mock::given(method("GET"))
            .and(path(format!("/secrets/{name}")))
            .respond_with(ResponseTemplate::new(status).set_body_string(body))
            .mount(&self.server)
            .await;
    }

    /// Requests received so far, in arrival order.
    pub async fn received(&self) -> Vec<Request> {
        self.server.received_requests().await.unwrap_or_default()
    }

    /// Mount challenge, token and secret for a complete happy path.
    pub async fn mount_happy_path(&self, name: &str, id: &str, value: &str) {
        self.mount_challenge().await;
        self.mount_token().await;
        self.mount_secret(name, id, value).await;
    }
}
