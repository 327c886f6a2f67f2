//! One run of the tool: log in, fetch the secret, optionally upload.

use azkv_blob_upload::{ObjectStoreUploader, UploadRequest};
use azkv_keyvault::{ClientCredentials, KeyVaultClient, KeyVaultConfig, Outcome};
use secrecy::ExposeSecret;
use std::io::Write;
use std::path::PathBuf;
use tracing::{error, info, instrument, warn};

use crate::{config::Settings, error::AppError};

/// `asctime`-style timestamp used on upload progress lines.
const TIMESTAMP_FORMAT: &str = "%a %b %e %H:%M:%S %Y";

/// File to upload and the blob to write it to.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct UploadTarget {
    /// Local file
    pub local_file: PathBuf,
    /// Blob name
    pub blob_name: String,
}

/// What a run was asked to do.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Invocation {
    /// Secret to fetch
    pub secret_name: String,
    /// Upload to perform after the fetch
    pub upload: Option<UploadTarget>,
}

/// How a run ended.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Completion {
    /// Secret printed and upload (if any) done
    Success,
    /// The vault did not return the secret
    SecretNotFound,
    /// The upload collaborator reported an error
    UploadFailed,
}

impl Completion {
    /// Process exit code.
    #[must_use]
    pub const fn exit_code(self) -> u8 {
        match self {
            Self::Success => 0,
            Self::SecretNotFound => 1,
            Self::UploadFailed => 3,
        }
    }
}

/// Runs the vault phase and the optional upload phase.
pub struct Workflow<U> {
    settings: Settings,
    vault: KeyVaultConfig,
    uploader: U,
}

impl<U: ObjectStoreUploader> Workflow<U> {
    /// Create a workflow against the vault named in `settings`.
    #[must_use]
    pub fn new(settings: Settings, uploader: U) -> Self {
        let vault = KeyVaultConfig::new(settings.key_vault_name.clone());
        Self {
            settings,
            vault,
            uploader,
        }
    }

    /// Replace the vault client configuration.
    #[must_use]
    pub fn with_vault_config(mut self, vault: KeyVaultConfig) -> Self {
        self.vault = vault;
        self
    }

    /// Loaded settings.
    #[must_use]
    pub const fn settings(&self) -> &Settings {
        &self.settings
    }

    /// Run once, writing progress lines to `out`.
    ///
    /// Failed discovery or token steps do not stop the run; the fetch then
    /// fails and the run ends with [`Completion::SecretNotFound`].
    ///
    /// # Errors
    ///
    /// Returns [`AppError::Config`] when an upload is requested without a
    /// container, [`AppError::KeyVault`] when the vault cannot be reached and
    /// [`AppError::Output`] when `out` cannot be written.
    #[instrument(skip(self, out), fields(vault = %self.settings.key_vault_name))]
    pub async fn run<W: Write>(
        &self,
        invocation: &Invocation,
        out: &mut W,
    ) -> Result<Completion, AppError> {
        let container = match &invocation.upload {
            Some(_) => Some(self.settings.require_blob_container()?),
            None => None,
        };

        writeln!(out, "Authenticating for KeyVault {}...", self.settings.key_vault_name)?;
        writeln!(out, "clientId : {}...", self.settings.client_id)?;

        let mut client = KeyVaultClient::new(self.vault.clone())?;
        let credentials = ClientCredentials::new(
            self.settings.client_id.clone(),
            self.settings.client_secret.expose_secret(),
        );
        if let Outcome::Failure(reason) = client.login(&credentials).await? {
            warn!(%reason, "Login failed, fetching anyway");
        }

        if self.settings.verbose {
            let session = client.session();
            writeln!(out, "Azure Region: {}", session.vault_region())?;
            writeln!(out, "ResourceUrl : {}", session.resource_url())?;
            writeln!(out, "LoginUrl    : {}", session.login_url())?;
            writeln!(out, "{} [REDACTED]", session.token_type())?;
        }

        writeln!(out, "Querying KeyVault Secret {}...", invocation.secret_name)?;
        let (secret, found) = client.get_secret_value(&invocation.secret_name).await?;
        if !found {
            writeln!(out, "Secret doesn't exist")?;
            return Ok(Completion::SecretNotFound);
        }

        writeln!(out, "Secret ID   : {}", secret.id)?;
        writeln!(out, "Secret Value: {}", secret.value.expose_secret())?;

        let (Some(target), Some(container)) = (&invocation.upload, container) else {
            return Ok(Completion::Success);
        };

        writeln!(out, "Using Blob Container: {container}")?;
        writeln!(
            out,
            "{}: Uploading file {}",
            timestamp(),
            target.local_file.display()
        )?;

        let request = UploadRequest::new(
            secret.value,
            container,
            target.local_file.clone(),
            target.blob_name.clone(),
        );
        match self.uploader.upload(&request).await {
            Ok(receipt) => {
                info!(
                    container = %receipt.container_name,
                    blob = %receipt.blob_name,
                    bytes = receipt.bytes,
                    "Upload complete"
                );
                writeln!(out, "{}: Done!", timestamp())?;
                Ok(Completion::Success)
            }
            Err(e) => {
                error!(error = %e, before_network = e.is_local(), "Upload failed");
                writeln!(out, "Error: {e}")?;
                Ok(Completion::UploadFailed)
            }
        }
    }
}

fn timestamp() -> String {
    chrono::Local::now().format(TIMESTAMP_FORMAT).to_string()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_exit_codes() {
        assert_eq!(Completion::Success.exit_code(), 0);
        assert_eq!(Completion::SecretNotFound.exit_code(), 1);
        assert_eq!(Completion::UploadFailed.exit_code(), 3);
    }

    #[test]
    fn test_timestamp_shape() {
        let stamp = timestamp();
        // e.g. "Mon Oct 19 14:03:07 2026"
        assert_eq!(stamp.split_whitespace().count(), 5);
        assert_eq!(stamp.matches(':').count(), 2);
    }
}
