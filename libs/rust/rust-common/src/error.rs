//! Centralized error type for the shared plumbing.
//!
//! Failures raised while building transports or installing the global
//! subscriber. Domain crates wrap this type instead of duplicating variants.

use thiserror::Error;

/// Common error type for platform operations.
#[derive(Error, Debug)]
pub enum PlatformError {
    /// HTTP client could not be built or a request failed at transport level
    #[error("HTTP request failed: {0}")]
    Http(#[from] reqwest::Error),

    /// Tracing subscriber could not be installed
    #[error("Tracing setup failed: {0}")]
    Tracing(String),
}

impl PlatformError {
    /// Check if this error comes from the network layer.
    ///
    /// # Examples
    ///
    /// ```
    /// use rust_common::PlatformError;
    ///
    /// let err = PlatformError::tracing("global default already set");
    /// assert!(!err.is_transport());
    /// ```
    #[must_use]
    pub const fn is_transport(&self) -> bool {
        matches!(self, Self::Http(_))
    }

    /// Create a tracing setup error with the given message.
    #[must_use]
    pub fn tracing(msg: impl Into<String>) -> Self {
        Self::Tracing(msg.into())
    }
}
