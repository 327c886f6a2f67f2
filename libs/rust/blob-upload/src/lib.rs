//! Block blob upload driven by a storage connection string.
//!
//! The connection string is validated locally before any network call, so a
//! placeholder or empty value fails fast with
//! [`UploadError::InvalidConnectionString`].

pub mod azure;
pub mod connection_string;
pub mod error;
pub mod uploader;

pub use azure::AzureBlobUploader;
pub use connection_string::{DEFAULT_ENDPOINT_SUFFIX, StorageConnectionString};
pub use error::{UploadError, UploadResult};
pub use uploader::{ObjectStoreUploader, UploadReceipt, UploadRequest};
