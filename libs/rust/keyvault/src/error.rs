//! Key Vault error types using thiserror 2.0.
//!
//! Only failures that should stop the process live here. Rejected
//! requests and unparsable bodies are reported as
//! [`StepFailure`](crate::outcome::StepFailure) values instead.

use rust_common::PlatformError;
use thiserror::Error;

/// Fatal Key Vault client errors.
#[derive(Error, Debug)]
pub enum KeyVaultError {
    /// Network-level failure (DNS, connection refused, TLS)
    #[error("Transport error: {0}")]
    Transport(#[from] reqwest::Error),

    /// Invalid configuration
    #[error("Invalid configuration: {0}")]
    InvalidConfig(String),

    /// Platform error
    #[error(transparent)]
    Platform(#[from] PlatformError),
}

/// Result type for Key Vault operations.
pub type KeyVaultResult<T> = Result<T, KeyVaultError>;

impl KeyVaultError {
    /// Create an invalid configuration error.
    #[must_use]
    pub fn invalid_config(msg: impl Into<String>) -> Self {
        Self::InvalidConfig(msg.into())
    }

    /// Check if the error came from the network layer.
    #[must_use]
    pub const fn is_transport(&self) -> bool {
        match self {
            Self::Transport(_) => true,
            Self::Platform(inner) => inner.is_transport(),
            Self::InvalidConfig(_) => false,
        }
    }
}
