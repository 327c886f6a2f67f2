//! Per-invocation session state shared by the three protocol steps.

use secrecy::{ExposeSecret, SecretString};

/// Furthest step that completed successfully.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord)]
pub enum SessionStage {
    /// Nothing has succeeded yet
    Init,
    /// Discovery found both endpoints
    Discovered,
    /// An access token is held
    Authenticated,
    /// A secret was fetched
    SecretFetched,
}

/// Endpoints learned from the discovery challenge.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Endpoints {
    /// Identity provider authority
    pub login_url: String,
    /// Resource the token is requested for
    pub resource_url: String,
    /// Value of `x-ms-keyvault-region`
    pub region: String,
}

/// Mutable state of one client-credential session.
///
/// Fields start empty and are filled as steps succeed. A failed step leaves
/// them as they were, so later steps run against empty values.
#[derive(Debug)]
pub struct Session {
    pub(crate) vault_name: String,
    pub(crate) vault_region: String,
    pub(crate) login_url: String,
    pub(crate) resource_url: String,
    pub(crate) token_type: String,
    pub(crate) access_token: SecretString,
    pub(crate) last_status: Option<u16>,
    pub(crate) stage: SessionStage,
}

impl Session {
    pub(crate) fn new(vault_name: impl Into<String>) -> Self {
        Self {
            vault_name: vault_name.into(),
            vault_region: String::new(),
            login_url: String::new(),
            resource_url: String::new(),
            token_type: String::new(),
            access_token: SecretString::from(String::new()),
            last_status: None,
            stage: SessionStage::Init,
        }
    }

    /// Name of the vault this session talks to.
    #[must_use]
    pub fn vault_name(&self) -> &str {
        &self.vault_name
    }

    /// Region reported by the vault during discovery.
    #[must_use]
    pub fn vault_region(&self) -> &str {
        &self.vault_region
    }

    /// Identity provider authority; empty until discovery succeeds.
    #[must_use]
    pub fn login_url(&self) -> &str {
        &self.login_url
    }

    /// Token resource; empty until discovery succeeds.
    #[must_use]
    pub fn resource_url(&self) -> &str {
        &self.resource_url
    }

    /// Token type, usually `Bearer`; empty until authentication succeeds.
    #[must_use]
    pub fn token_type(&self) -> &str {
        &self.token_type
    }

    /// Access token; empty until authentication succeeds.
    #[must_use]
    pub const fn access_token(&self) -> &SecretString {
        &self.access_token
    }

    /// Whether a non-empty access token is held.
    #[must_use]
    pub fn has_access_token(&self) -> bool {
        !self.access_token.expose_secret().is_empty()
    }

    /// Status code of the most recent response.
    #[must_use]
    pub const fn last_status(&self) -> Option<u16> {
        self.last_status
    }

    /// Furthest step that succeeded.
    #[must_use]
    pub const fn stage(&self) -> SessionStage {
        self.stage
    }

    /// Endpoints currently held.
    #[must_use]
    pub fn endpoints(&self) -> Endpoints {
        Endpoints {
            login_url: self.login_url.clone(),
            resource_url: self.resource_url.clone(),
            region: self.vault_region.clone(),
        }
    }

    pub(crate) fn advance(&mut self, stage: SessionStage) {
        self.stage = self.stage.max(stage);
    }

    /// `Authorization` header value; `" "` when no token is held.
    pub(crate) fn authorization(&self) -> String {
        format!("{} {}", self.token_type, self.access_token.expose_secret())
    }
}
