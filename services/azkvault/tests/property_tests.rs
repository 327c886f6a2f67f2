//! Property-based tests for config and argument parsing.

use azkvault::{Args, Settings};
use clap::Parser;
use proptest::prelude::*;
use secrecy::ExposeSecret;
use test_utils::{client_id_strategy, config_value_strategy, secret_name_strategy, vault_name_strategy};

proptest! {
    #![proptest_config(ProptestConfig::with_cases(100))]

    /// Values written as `key=value` (with arbitrary padding and key order)
    /// are read back exactly.
    #[test]
    fn prop_config_values_roundtrip(
        vault in vault_name_strategy(),
        client_id in client_id_strategy(),
        secret in config_value_strategy(),
        container in config_value_strategy(),
        pad in "[ \t]{0,3}",
        reversed in any::<bool>(),
    ) {
        let mut lines = vec![
            format!("keyVaultName{pad}={pad}{vault}"),
            format!("clientId={client_id}{pad}"),
            format!("{pad}clientSecret={secret}"),
            format!("blobContainer={container}"),
        ];
        if reversed {
            lines.reverse();
        }

        let settings = Settings::parse(&lines.join("\n")).unwrap();
        prop_assert_eq!(settings.key_vault_name, vault);
        prop_assert_eq!(settings.client_id, client_id);
        prop_assert_eq!(settings.client_secret.expose_secret(), secret.as_str());
        prop_assert_eq!(settings.blob_container, Some(container));
        prop_assert!(settings.ignored.is_empty());
    }

    /// Keys that merely contain a known key never set it.
    #[test]
    fn prop_near_miss_keys_ignored(prefix in "[a-z]{1,5}", value in config_value_strategy()) {
        let text = format!(
            "keyVaultName=v\nclientId=c\nclientSecret=s\n{prefix}verbose=true\n{prefix}blobContainer={value}\n"
        );
        let settings = Settings::parse(&text).unwrap();
        prop_assert!(!settings.verbose);
        prop_assert!(settings.blob_container.is_none());
        prop_assert_eq!(settings.ignored.len(), 2);
    }

    /// Arbitrary text never panics the parser.
    #[test]
    fn prop_parse_never_panics(text in "\\PC{0,200}") {
        let _ = Settings::parse(&text);
    }

    /// Two positional arguments never request an upload; four always do.
    #[test]
    fn prop_upload_needs_both_positionals(
        secret in secret_name_strategy(),
        file in "[a-z]{1,8}\\.bin",
        blob in "[a-z0-9][a-z0-9-]{0,11}",
    ) {
        let args = Args::try_parse_from(["azkvault", secret.as_str()]).unwrap();
        prop_assert!(args.invocation().upload.is_none());

        let args = Args::try_parse_from(["azkvault", secret.as_str(), file.as_str(), blob.as_str()]).unwrap();
        let upload = args.invocation().upload.unwrap();
        prop_assert_eq!(upload.blob_name, blob);
        prop_assert_eq!(upload.local_file, std::path::PathBuf::from(file));
    }
}
