//! azkvault: fetch a secret from Azure Key Vault and, optionally, use it as
//! a storage connection string to upload a file.
//!
//! The binary wires [`cli::Args`], [`config::Settings`] and
//! [`workflow::Workflow`] together; everything is exposed here so the whole
//! run can be driven from tests.

pub mod cli;
pub mod config;
pub mod error;
pub mod workflow;

pub use cli::Args;
pub use config::{ConfigError, Settings};
pub use error::AppError;
pub use workflow::{Completion, Invocation, UploadTarget, Workflow};

/// Exit code for usage and configuration errors.
pub const USAGE_EXIT_CODE: u8 = 2;
