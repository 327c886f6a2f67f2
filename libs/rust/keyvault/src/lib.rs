//! Azure Key Vault client for azkvault.
//!
//! Performs the three-step client-credential flow against a vault:
//! an unauthenticated discovery probe whose `401` challenge names the
//! identity provider, a token exchange, and an authenticated secret fetch.
//! Non-success responses degrade into [`Outcome::Failure`] values instead of
//! errors; only transport failures are returned as [`KeyVaultError`].

pub mod challenge;
pub mod client;
pub mod config;
pub mod error;
pub mod outcome;
pub mod secrets;
pub mod session;

pub use challenge::{Challenge, parse_challenge};
pub use client::KeyVaultClient;
pub use config::KeyVaultConfig;
pub use error::{KeyVaultError, KeyVaultResult};
pub use outcome::{Outcome, StepFailure};
pub use secrets::{ClientCredentials, Secret, SecretAttributes};
pub use session::{Endpoints, Session, SessionStage};
