//! Mock implementations for testing.

use async_trait::async_trait;
use azkv_blob_upload::{
    ObjectStoreUploader, StorageConnectionString, UploadError, UploadReceipt, UploadRequest,
    UploadResult,
};
use rust_common::RequestIdGenerator;
use secrecy::ExposeSecret;
use std::path::PathBuf;
use std::sync::Arc;
use std::sync::atomic::{AtomicU64, Ordering};
use tokio::sync::RwLock;

/// Deterministic request ids: `req-1`, `req-2`, ...
#[derive(Debug, Default)]
pub struct SequentialRequestIds {
    next: AtomicU64,
}

impl SequentialRequestIds {
    /// Create a generator starting at `req-1`.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }
}

impl RequestIdGenerator for SequentialRequestIds {
    fn next_id(&self) -> String {
        let n = self.next.fetch_add(1, Ordering::SeqCst) + 1;
        format!("req-{n}")
    }
}

/// An upload seen by [`MockUploader`].
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RecordedUpload {
    /// Connection string, exposed for assertions
    pub connection_string: String,
    /// Container name
    pub container_name: String,
    /// Local file
    pub local_file_path: PathBuf,
    /// Blob name
    pub blob_name: String,
}

/// Mock uploader for testing.
///
/// Applies the same local checks as the real uploader (connection string,
/// request fields, file readable) and records every upload that passes them.
#[derive(Debug, Default, Clone)]
pub struct MockUploader {
    uploads: Arc<RwLock<Vec<RecordedUpload>>>,
    failure: Option<String>,
}

impl MockUploader {
    /// Create a mock uploader that succeeds.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Create a mock uploader whose storage calls fail with `message`.
    #[must_use]
    pub fn failing(message: impl Into<String>) -> Self {
        Self {
            uploads: Arc::default(),
            failure: Some(message.into()),
        }
    }

    /// Get all recorded uploads.
    pub async fn uploads(&self) -> Vec<RecordedUpload> {
        self.uploads.read().await.clone()
    }

    /// Get upload count.
    pub async fn count(&self) -> usize {
        self.uploads.read().await.len()
    }
}

#[async_trait]
impl ObjectStoreUploader for MockUploader {
    async fn upload(&self, request: &UploadRequest) -> UploadResult<UploadReceipt> {
        StorageConnectionString::parse(request.connection_string.expose_secret())?;
        request.validate()?;

        let metadata = tokio::fs::metadata(&request.local_file_path)
            .await
            .map_err(|source| UploadError::Io {
                path: request.local_file_path.clone(),
                source,
            })?;

        self.uploads.write().await.push(RecordedUpload {
            connection_string: request.connection_string.expose_secret().to_string(),
            container_name: request.container_name.clone(),
            local_file_path: request.local_file_path.clone(),
            blob_name: request.blob_name.clone(),
        });

        if let Some(message) = &self.failure {
            return Err(UploadError::storage(message.clone()));
        }

        Ok(UploadReceipt {
            container_name: request.container_name.clone(),
            blob_name: request.blob_name.clone(),
            bytes: metadata.len(),
            container_created: false,
        })
    }
}
