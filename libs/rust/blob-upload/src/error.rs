//! Upload error types.

use std::path::PathBuf;
use thiserror::Error;

/// Errors raised by the upload phase.
#[derive(Error, Debug)]
pub enum UploadError {
    /// Connection string could not be parsed
    #[error("Invalid storage connection string: {0}")]
    InvalidConnectionString(String),

    /// Upload request is missing a required field
    #[error("Invalid upload request: {0}")]
    InvalidRequest(String),

    /// Local file could not be read
    #[error("Cannot read {}: {source}", path.display())]
    Io {
        /// File that was being read
        path: PathBuf,
        /// Underlying error
        #[source]
        source: std::io::Error,
    },

    /// Storage service rejected an operation
    #[error("Storage error: {0}")]
    Storage(String),
}

/// Result type for upload operations.
pub type UploadResult<T> = Result<T, UploadError>;

impl UploadError {
    /// Create an invalid connection string error.
    #[must_use]
    pub fn invalid_connection_string(msg: impl Into<String>) -> Self {
        Self::InvalidConnectionString(msg.into())
    }

    /// Create an invalid request error.
    #[must_use]
    pub fn invalid_request(msg: impl Into<String>) -> Self {
        Self::InvalidRequest(msg.into())
    }

    /// Create a storage error.
    #[must_use]
    pub fn storage(msg: impl Into<String>) -> Self {
        Self::Storage(msg.into())
    }

    /// Whether the error was detected before any network call.
    #[must_use]
    pub const fn is_local(&self) -> bool {
        !matches!(self, Self::Storage(_))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_error_display() {
        let err = UploadError::invalid_connection_string("empty");
        assert_eq!(err.to_string(), "Invalid storage connection string: empty");

        let err = UploadError::Io {
            path: PathBuf::from("/tmp/missing.bin"),
            source: std::io::Error::from(std::io::ErrorKind::NotFound),
        };
        assert!(err.to_string().starts_with("Cannot read /tmp/missing.bin"));
    }

    #[test]
    fn test_locality() {
        assert!(UploadError::invalid_request("blob").is_local());
        assert!(!UploadError::storage("403").is_local());
    }
}
