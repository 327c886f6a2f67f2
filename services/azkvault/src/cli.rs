//! Command-line arguments.

use clap::Parser;
use std::path::{Path, PathBuf};

use crate::workflow::{Invocation, UploadTarget};

/// Default configuration file, relative to the working directory.
pub const DEFAULT_CONFIG_PATH: &str = "azkvault.conf";

/// Fetch a Key Vault secret and optionally upload a file with it.
///
/// With a local file and blob name, the secret value is used as the storage
/// account connection string for the upload.
#[derive(Debug, Parser)]
#[command(
    name = "azkvault",
    version,
    about,
    override_usage = "azkvault [OPTIONS] <SECRET_NAME> [<LOCAL_FILE> <BLOB_NAME>]"
)]
pub struct Args {
    /// Name of the secret to fetch
    pub secret_name: String,

    /// File to upload using the secret as connection string
    #[arg(requires = "blob_name")]
    pub local_file: Option<PathBuf>,

    /// Name of the blob to write
    pub blob_name: Option<String>,

    /// Configuration file
    #[arg(
        short,
        long,
        env = "AZKVAULT_CONFIG",
        default_value = DEFAULT_CONFIG_PATH
    )]
    pub config: PathBuf,

    /// Print discovered endpoints and debug logs
    #[arg(short, long)]
    pub verbose: bool,

    /// Emit logs as JSON
    #[arg(long)]
    pub log_json: bool,
}

impl Args {
    /// Configuration file path.
    #[must_use]
    pub fn config_path(&self) -> &Path {
        &self.config
    }

    /// What the workflow should do for these arguments.
    #[must_use]
    pub fn invocation(&self) -> Invocation {
        let upload = match (&self.local_file, &self.blob_name) {
            (Some(local_file), Some(blob_name)) => Some(UploadTarget {
                local_file: local_file.clone(),
                blob_name: blob_name.clone(),
            }),
            _ => None,
        };
        Invocation {
            secret_name: self.secret_name.clone(),
            upload,
        }
    }
}
