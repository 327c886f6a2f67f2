//! Diagnostics logging.
//!
//! Logs go to stderr; stdout carries the tool's console output only.
//! `RUST_LOG` overrides the configured level.

use crate::error::PlatformError;
use tracing_subscriber::{EnvFilter, fmt, layer::SubscriberExt, util::SubscriberInitExt};

const QUIET_LEVEL: &str = "warn";
const VERBOSE_LEVEL: &str = "debug";

/// Logging setup for [`init_tracing`].
#[derive(Debug, Clone)]
pub struct TracingConfig {
    /// Name recorded on the first log line
    pub service_name: String,
    /// Filter used when `RUST_LOG` is unset
    pub log_level: String,
    /// One JSON object per line instead of human-readable text
    pub json_output: bool,
}

impl Default for TracingConfig {
    fn default() -> Self {
        Self {
            service_name: "azkvault".to_string(),
            log_level: QUIET_LEVEL.to_string(),
            json_output: false,
        }
    }
}

impl TracingConfig {
    /// Use an explicit filter directive such as `azkv_keyvault=trace`.
    #[must_use]
    pub fn with_log_level(mut self, level: impl Into<String>) -> Self {
        self.log_level = level.into();
        self
    }

    /// Switch to `debug` when `verbose` is set.
    #[must_use]
    pub fn with_verbose(self, verbose: bool) -> Self {
        if verbose {
            self.with_log_level(VERBOSE_LEVEL)
        } else {
            self
        }
    }

    /// Choose between JSON and text output.
    #[must_use]
    pub const fn with_json_output(mut self, json: bool) -> Self {
        self.json_output = json;
        self
    }
}

/// Install the global subscriber.
///
/// # Errors
///
/// Returns [`PlatformError::Tracing`] if a global subscriber is already set.
pub fn init_tracing(config: &TracingConfig) -> Result<(), PlatformError> {
    let filter =
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(&config.log_level));
    let registry = tracing_subscriber::registry().with(filter);

    let installed = if config.json_output {
        registry
            .with(fmt::layer().json().with_writer(std::io::stderr))
            .try_init()
    } else {
        registry
            .with(fmt::layer().with_writer(std::io::stderr))
            .try_init()
    };
    installed.map_err(|e| PlatformError::tracing(e.to_string()))?;

    tracing::debug!(service = %config.service_name, level = %config.log_level, "Logging ready");
    Ok(())
}
