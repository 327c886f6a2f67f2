//! Application errors.

use azkv_keyvault::KeyVaultError;
use thiserror::Error;

use crate::config::ConfigError;

/// Errors that end a run before it completes.
#[derive(Error, Debug)]
pub enum AppError {
    /// Configuration is unusable
    #[error(transparent)]
    Config(#[from] ConfigError),

    /// Vault could not be reached
    #[error("Key Vault error: {0}")]
    KeyVault(#[from] KeyVaultError),

    /// Console output failed
    #[error("Output error: {0}")]
    Output(#[from] std::io::Error),
}

impl AppError {
    /// Process exit code for this error.
    #[must_use]
    pub const fn exit_code(&self) -> u8 {
        match self {
            Self::Config(_) => crate::USAGE_EXIT_CODE,
            Self::KeyVault(_) | Self::Output(_) => 1,
        }
    }
}
