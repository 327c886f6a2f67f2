//! Shared test utilities for the azkvault crates.
//!
//! This crate provides:
//! - Proptest generators for challenge headers, names and URLs
//! - Mock implementations of the request id source and the uploader
//! - A wiremock-backed fake vault and identity provider
//! - Test fixtures with sample response bodies and files

#![forbid(unsafe_code)]
#![warn(missing_docs)]

pub mod fixtures;
pub mod generators;
pub mod mocks;
pub mod vault_server;

pub use generators::*;
pub use mocks::{MockUploader, RecordedUpload, SequentialRequestIds};
pub use vault_server::MockVault;
