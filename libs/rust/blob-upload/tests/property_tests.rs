//! Property-based tests for connection string parsing.
//!
//! Tests validate:
//! - The empty placeholder secret never parses
//! - Arbitrary input is rejected or accepted without panicking
//! - Well-formed account strings always parse to the public endpoint

use azkv_blob_upload::{StorageConnectionString, UploadError};
use proptest::prelude::*;

fn account_name_strategy() -> impl Strategy<Value = String> {
    "[a-z][a-z0-9]{2,23}"
}

fn account_key_strategy() -> impl Strategy<Value = String> {
    prop::collection::vec(any::<u8>(), 16..64).prop_map(|bytes| {
        use base64::Engine;
        base64::engine::general_purpose::STANDARD.encode(bytes)
    })
}

proptest! {
    #![proptest_config(ProptestConfig::with_cases(100))]

    /// Whitespace-only values, like an empty secret, are rejected before any upload.
    #[test]
    fn prop_blank_rejected(blank in "[ \t]{0,8}") {
        let result = StorageConnectionString::parse(&blank);
        prop_assert!(matches!(result, Err(UploadError::InvalidConnectionString(_))));
    }

    /// Parsing arbitrary text never panics.
    #[test]
    fn prop_arbitrary_input_does_not_panic(input in ".{0,200}") {
        let _ = StorageConnectionString::parse(&input);
    }

    /// Database-style connection strings are not storage connection strings.
    #[test]
    fn prop_sql_connection_strings_rejected(server in "[a-z]{3,12}", db in "[a-z]{3,12}") {
        let input = format!("Server={server};Database={db};Trusted_Connection=True;");
        prop_assert!(StorageConnectionString::parse(&input).is_err());
    }

    /// Account name and key strings round into the public blob endpoint.
    #[test]
    fn prop_account_strings_parse(
        account in account_name_strategy(),
        key in account_key_strategy(),
    ) {
        let input = format!(
            "DefaultEndpointsProtocol=https;AccountName={account};AccountKey={key};EndpointSuffix=core.windows.net"
        );
        let parsed = StorageConnectionString::parse(&input).unwrap();

        prop_assert_eq!(parsed.account_name.as_deref(), Some(account.as_str()));
        prop_assert_eq!(
            parsed.blob_endpoint_url(),
            format!("https://{account}.blob.core.windows.net")
        );
        prop_assert!(parsed.uses_shared_key());
        let debug_repr = format!("{parsed:?}");
        prop_assert!(!debug_repr.contains(&key));
    }
}
