//! Azure Blob Storage uploader backed by the Azure storage SDK.

use async_trait::async_trait;
use azure_storage_blobs::prelude::*;
use secrecy::ExposeSecret;
use tracing::{debug, info, instrument};

use crate::{
    connection_string::StorageConnectionString,
    error::{UploadError, UploadResult},
    uploader::{ObjectStoreUploader, UploadReceipt, UploadRequest},
};

/// Uploads files as block blobs.
#[derive(Debug, Clone, Copy, Default)]
pub struct AzureBlobUploader;

impl AzureBlobUploader {
    /// Create a new uploader.
    #[must_use]
    pub const fn new() -> Self {
        Self
    }

    fn container_client(
        connection: &StorageConnectionString,
        container_name: &str,
    ) -> ContainerClient {
        ClientBuilder::with_location(connection.cloud_location(), connection.credentials())
            .container_client(container_name)
    }
}

#[async_trait]
impl ObjectStoreUploader for AzureBlobUploader {
    #[instrument(skip(self, request), fields(container = %request.container_name, blob = %request.blob_name))]
    async fn upload(&self, request: &UploadRequest) -> UploadResult<UploadReceipt> {
        let connection =
            StorageConnectionString::parse(request.connection_string.expose_secret())?;
        request.validate()?;

        let content = tokio::fs::read(&request.local_file_path)
            .await
            .map_err(|source| UploadError::Io {
                path: request.local_file_path.clone(),
                source,
            })?;
        let bytes = content.len() as u64;

        debug!(
            endpoint = %connection.blob_endpoint_url(),
            shared_key = connection.uses_shared_key(),
            "Resolved storage account"
        );
        let container = Self::container_client(&connection, &request.container_name);

        let exists = container
            .exists()
            .await
            .map_err(|e| UploadError::storage(e.to_string()))?;
        if !exists {
            info!("Creating container");
            container
                .create()
                .await
                .map_err(|e| UploadError::storage(e.to_string()))?;
        }

        debug!(bytes, "Uploading block blob");
        container
            .blob_client(request.blob_name.clone())
            .put_block_blob(content)
            .await
            .map_err(|e| UploadError::storage(e.to_string()))?;

        info!(bytes, "Upload complete");
        Ok(UploadReceipt {
            container_name: request.container_name.clone(),
            blob_name: request.blob_name.clone(),
            bytes,
            container_created: !exists,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use secrecy::SecretString;

    const CONNECTION: &str = "DefaultEndpointsProtocol=https;AccountName=acct;AccountKey=c2VjcmV0";

    #[tokio::test]
    async fn test_invalid_connection_string_fails_before_network() {
        let request = UploadRequest::new(
            SecretString::from(String::new()),
            "backups",
            "/nonexistent/file.bin",
            "file.bin",
        );
        let err = AzureBlobUploader::new().upload(&request).await.unwrap_err();
        assert!(matches!(err, UploadError::InvalidConnectionString(_)));
    }

    #[tokio::test]
    async fn test_missing_file_fails_before_network() {
        let request = UploadRequest::new(
            SecretString::from(CONNECTION.to_string()),
            "backups",
            "/nonexistent/azkvault/file.bin",
            "file.bin",
        );
        let err = AzureBlobUploader::new().upload(&request).await.unwrap_err();
        assert!(matches!(err, UploadError::Io { .. }));
        assert!(err.is_local());
    }

    #[test]
    fn test_container_client_for_custom_endpoint() {
        let connection = StorageConnectionString::parse(
            "BlobEndpoint=http://127.0.0.1:10000/devstoreaccount1;SharedAccessSignature=sv=2021-06-08&sig=x",
        )
        .unwrap();
        let container = AzureBlobUploader::container_client(&connection, "backups");
        assert_eq!(container.container_name(), "backups");
    }
}
