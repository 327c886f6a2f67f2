//! Config file loading.
//!
//! The file holds `key=value` lines. Keys match exactly; the value is the
//! text after the first `=`, trimmed.

use secrecy::SecretString;
use std::path::{Path, PathBuf};
use thiserror::Error;
use tracing::warn;

const KEY_VAULT_NAME: &str = "keyVaultName";
const CLIENT_ID: &str = "clientId";
const CLIENT_SECRET: &str = "clientSecret";
const BLOB_CONTAINER: &str = "blobContainer";
const VERBOSE: &str = "verbose";

/// Configuration errors.
#[derive(Error, Debug)]
pub enum ConfigError {
    /// Config file could not be read
    #[error("Cannot read config file {}: {source}", path.display())]
    Read {
        /// File that was read
        path: PathBuf,
        /// Underlying error
        #[source]
        source: std::io::Error,
    },

    /// Missing required field
    #[error("Missing required configuration: {0}")]
    MissingRequired(String),
}

/// A config line that was skipped.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct IgnoredLine {
    /// 1-based line number
    pub line: usize,
    /// Why it was skipped
    pub reason: String,
}

/// Loaded configuration, read-only after load.
#[derive(Debug, Clone)]
pub struct Settings {
    /// Vault to query
    pub key_vault_name: String,
    /// Application (client) id
    pub client_id: String,
    /// Client secret
    pub client_secret: SecretString,
    /// Container for uploads
    pub blob_container: Option<String>,
    /// Print discovered endpoints
    pub verbose: bool,
    /// Lines that were not used
    pub ignored: Vec<IgnoredLine>,
}

impl Settings {
    /// Read and parse a config file.
    ///
    /// # Errors
    ///
    /// Returns [`ConfigError::Read`] if the file cannot be read and
    /// [`ConfigError::MissingRequired`] if a required key is absent.
    pub fn load(path: &Path) -> Result<Self, ConfigError> {
        let text = std::fs::read_to_string(path).map_err(|source| ConfigError::Read {
            path: path.to_path_buf(),
            source,
        })?;
        Self::parse(&text)
    }

    /// Parse config text.
    ///
    /// # Errors
    ///
    /// Returns [`ConfigError::MissingRequired`] if `keyVaultName`, `clientId`
    /// or `clientSecret` is absent or empty.
    ///
    /// # Examples
    ///
    /// ```
    /// use azkvault::Settings;
    ///
    /// let settings = Settings::parse("keyVaultName=myvault\nclientId=app\nclientSecret=s\n").unwrap();
    /// assert_eq!(settings.key_vault_name, "myvault");
    /// assert!(settings.blob_container.is_none());
    /// assert!(!settings.verbose);
    /// ```
    pub fn parse(text: &str) -> Result<Self, ConfigError> {
        let mut key_vault_name = None;
        let mut client_id = None;
        let mut client_secret = None;
        let mut blob_container = None;
        let mut verbose = false;
        let mut ignored = Vec::new();

        for (index, raw) in text.lines().enumerate() {
            let line = raw.trim();
            if line.is_empty() || line.starts_with('#') {
                continue;
            }
            let Some((key, value)) = line.split_once('=') else {
                ignored.push(IgnoredLine {
                    line: index + 1,
                    reason: "no '=' separator".to_string(),
                });
                continue;
            };
            let value = value.trim().to_string();
            match key.trim() {
                KEY_VAULT_NAME => key_vault_name = Some(value),
                CLIENT_ID => client_id = Some(value),
                CLIENT_SECRET => client_secret = Some(value),
                BLOB_CONTAINER => blob_container = Some(value),
                VERBOSE => verbose = value == "true",
                other => ignored.push(IgnoredLine {
                    line: index + 1,
                    reason: format!("unknown key '{other}'"),
                }),
            }
        }

        Ok(Self {
            key_vault_name: required(key_vault_name, KEY_VAULT_NAME)?,
            client_id: required(client_id, CLIENT_ID)?,
            client_secret: SecretString::from(required(client_secret, CLIENT_SECRET)?),
            blob_container: blob_container.filter(|container| !container.is_empty()),
            verbose,
            ignored,
        })
    }

    /// Force verbose on when `verbose` is set.
    #[must_use]
    pub fn with_verbose(mut self, verbose: bool) -> Self {
        self.verbose |= verbose;
        self
    }

    /// Log the lines that were skipped while parsing.
    pub fn warn_ignored(&self) {
        for ignored in &self.ignored {
            warn!(line = ignored.line, reason = %ignored.reason, "Ignoring config line");
        }
    }

    /// Container for the upload phase.
    ///
    /// # Errors
    ///
    /// Returns [`ConfigError::MissingRequired`] if `blobContainer` is not set.
    pub fn require_blob_container(&self) -> Result<&str, ConfigError> {
        self.blob_container
            .as_deref()
            .ok_or_else(|| ConfigError::MissingRequired(BLOB_CONTAINER.to_string()))
    }
}

fn required(value: Option<String>, key: &str) -> Result<String, ConfigError> {
    value
        .filter(|v| !v.is_empty())
        .ok_or_else(|| ConfigError::MissingRequired(key.to_string()))
}

#[cfg(test)]
mod tests {
    use super::*;
    use secrecy::ExposeSecret;

    const MINIMAL: &str = "keyVaultName=myvault\nclientId=app-id\nclientSecret=s3cr3t\n";

    #[test]
    fn test_parse_all_keys() {
        let settings = Settings::parse(
            "keyVaultName=myvault\nclientId=app-id\nclientSecret=s3cr3t\nblobContainer=backups\nverbose=true\n",
        )
        .unwrap();

        assert_eq!(settings.key_vault_name, "myvault");
        assert_eq!(settings.client_id, "app-id");
        assert_eq!(settings.client_secret.expose_secret(), "s3cr3t");
        assert_eq!(settings.blob_container.as_deref(), Some("backups"));
        assert!(settings.verbose);
        assert!(settings.ignored.is_empty());
    }

    #[test]
    fn test_values_are_trimmed_and_may_contain_equals() {
        let settings =
            Settings::parse("keyVaultName =  myvault  \nclientId=app\nclientSecret=a=b==\n").unwrap();
        assert_eq!(settings.key_vault_name, "myvault");
        assert_eq!(settings.client_secret.expose_secret(), "a=b==");
    }

    #[test]
    fn test_verbose_only_for_true() {
        for value in ["false", "TRUE", "yes", "1", ""] {
            let settings = Settings::parse(&format!("{MINIMAL}verbose={value}\n")).unwrap();
            assert!(!settings.verbose, "verbose={value}");
        }
    }

    #[test]
    fn test_keys_match_exactly() {
        // A value mentioning another key must not set it.
        let settings =
            Settings::parse(&format!("{MINIMAL}blobContainerName=verbose\nmyverbose=true\n"))
                .unwrap();
        assert!(!settings.verbose);
        assert!(settings.blob_container.is_none());
        assert_eq!(settings.ignored.len(), 2);
    }

    #[test]
    fn test_comments_blank_and_malformed_lines() {
        let settings = Settings::parse(&format!("# vault\n\n{MINIMAL}just some text\n")).unwrap();
        assert_eq!(
            settings.ignored,
            vec![IgnoredLine {
                line: 6,
                reason: "no '=' separator".to_string()
            }]
        );
    }

    #[test]
    fn test_missing_required_key() {
        let err = Settings::parse("keyVaultName=myvault\nclientId=app\n").unwrap_err();
        assert!(matches!(err, ConfigError::MissingRequired(ref key) if key == "clientSecret"));

        let err = Settings::parse("keyVaultName=\nclientId=app\nclientSecret=s\n").unwrap_err();
        assert!(matches!(err, ConfigError::MissingRequired(ref key) if key == "keyVaultName"));
    }

    #[test]
    fn test_blob_container_required_only_on_demand() {
        let settings = Settings::parse(MINIMAL).unwrap();
        assert!(matches!(
            settings.require_blob_container(),
            Err(ConfigError::MissingRequired(_))
        ));
    }

    #[test]
    fn test_cli_verbose_is_or_ed() {
        let settings = Settings::parse(MINIMAL).unwrap();
        assert!(settings.clone().with_verbose(true).verbose);
        assert!(!settings.with_verbose(false).verbose);

        let settings = Settings::parse(&format!("{MINIMAL}verbose=true\n")).unwrap();
        assert!(settings.with_verbose(false).verbose);
    }

    #[test]
    fn test_missing_file() {
        let err = Settings::load(Path::new("/nonexistent/azkvault.conf")).unwrap_err();
        assert!(matches!(err, ConfigError::Read { .. }));
        assert!(err.to_string().contains("/nonexistent/azkvault.conf"));
    }

    #[test]
    fn test_debug_redacts_client_secret() {
        let settings = Settings::parse(MINIMAL).unwrap();
        assert!(!format!("{settings:?}").contains("s3cr3t"));
    }
}
