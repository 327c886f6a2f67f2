//! Test fixtures with sample data.

use std::io::Write;
use tempfile::NamedTempFile;

/// Access token returned by the fake identity provider.
pub const ACCESS_TOKEN: &str = "eyJ0eXAiOiJKV1QiLCJhbGciOiJSUzI1NiJ9.payload.signature";

/// Resource URL named in fake challenges.
pub const RESOURCE_URL: &str = "https://vault.azure.net";

/// Region reported by the fake vault.
pub const VAULT_REGION: &str = "westeurope";

/// Valid storage connection string for the Azurite emulator account.
pub const STORAGE_CONNECTION_STRING: &str = "DefaultEndpointsProtocol=https;AccountName=devstoreaccount1;AccountKey=Eby8vdM02xNOcqFlqUwJPLlmEtlCDXJ1OUzFT50uSRZ6IFsuFq2UVErCz4I6tq/K1SZFPTOtr/KBHBeksoGMGw==;EndpointSuffix=core.windows.net";

/// Token endpoint body in the format of the v1 identity endpoint.
#[must_use]
pub fn token_body(access_token: &str) -> serde_json::Value {
    serde_json::json!({
        "token_type": "Bearer",
        "expires_in": "3599",
        "ext_expires_in": "3599",
        "resource": RESOURCE_URL,
        "access_token": access_token,
    })
}

/// Secret bundle body.
#[must_use]
pub fn secret_body(id: &str, value: &str) -> serde_json::Value {
    serde_json::json!({
        "id": id,
        "value": value,
        "attributes": {
            "enabled": true,
            "created": 1_700_000_000,
            "updated": 1_700_000_500,
            "recoveryLevel": "Recoverable+Purgeable",
        },
    })
}

/// Vault error body for a missing secret.
#[must_use]
pub fn secret_not_found_body(name: &str) -> serde_json::Value {
    serde_json::json!({
        "error": {
            "code": "SecretNotFound",
            "message": format!("A secret with (name/id) {name} was not found in this key vault."),
        }
    })
}

/// Config file contents with the given values.
#[must_use]
pub fn config_file(vault: &str, client_id: &str, client_secret: &str, container: &str) -> String {
    format!(
        "keyVaultName={vault}\nclientId={client_id}\nclientSecret={client_secret}\nblobContainer={container}\nverbose=false\n"
    )
}

/// Write `contents` to a uniquely named file in the temp directory.
///
/// The file is removed when the returned handle drops.
///
/// # Panics
///
/// Panics if the file cannot be written.
#[must_use]
pub fn write_temp_file(prefix: &str, contents: &[u8]) -> NamedTempFile {
    #[allow(clippy::expect_used)]
    let mut file = tempfile::Builder::new()
        .prefix(prefix)
        .tempfile()
        .expect("temp file should be creatable");
    #[allow(clippy::expect_used)]
    file.write_all(contents).expect("temp file should be writable");
    file
}
