//! Shared plumbing for the azkvault crates.
//!
//! This crate provides centralized implementations for:
//! - Error types for cross-cutting failures
//! - HTTP client configuration and building
//! - Tracing subscriber setup
//! - Per-request correlation id generation

#![forbid(unsafe_code)]
#![warn(missing_docs)]

pub mod error;
pub mod http;
pub mod request_id;
pub mod tracing_config;

pub use error::PlatformError;
pub use http::{HttpConfig, build_http_client};
pub use request_id::{CLIENT_REQUEST_ID_HEADER, RequestIdGenerator, UuidRequestIds};
pub use tracing_config::{TracingConfig, init_tracing};
