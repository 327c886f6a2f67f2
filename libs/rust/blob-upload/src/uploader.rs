//! Upload collaborator interface.

use async_trait::async_trait;
use secrecy::SecretString;
use std::path::PathBuf;

use crate::error::{UploadError, UploadResult};

/// What to upload and where.
#[derive(Debug)]
pub struct UploadRequest {
    /// Storage account connection string
    pub connection_string: SecretString,
    /// Target container, created if absent
    pub container_name: String,
    /// File to upload
    pub local_file_path: PathBuf,
    /// Name of the blob to write
    pub blob_name: String,
}

impl UploadRequest {
    /// Create a request.
    #[must_use]
    pub fn new(
        connection_string: SecretString,
        container_name: impl Into<String>,
        local_file_path: impl Into<PathBuf>,
        blob_name: impl Into<String>,
    ) -> Self {
        Self {
            connection_string,
            container_name: container_name.into(),
            local_file_path: local_file_path.into(),
            blob_name: blob_name.into(),
        }
    }

    /// Check the fields that do not need the network.
    ///
    /// # Errors
    ///
    /// Returns [`UploadError::InvalidRequest`] for an empty container or
    /// blob name.
    pub fn validate(&self) -> UploadResult<()> {
        if self.container_name.trim().is_empty() {
            return Err(UploadError::invalid_request("container name is empty"));
        }
        if self.blob_name.trim().is_empty() {
            return Err(UploadError::invalid_request("blob name is empty"));
        }
        Ok(())
    }
}

/// Result of a completed upload.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct UploadReceipt {
    /// Container written to
    pub container_name: String,
    /// Blob written
    pub blob_name: String,
    /// Bytes uploaded
    pub bytes: u64,
    /// Whether the container had to be created
    pub container_created: bool,
}

/// Uploads a local file to object storage.
#[async_trait]
pub trait ObjectStoreUploader: Send + Sync {
    /// Create the container if needed and upload the file.
    async fn upload(&self, request: &UploadRequest) -> UploadResult<UploadReceipt>;
}
