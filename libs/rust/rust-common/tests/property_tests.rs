//! Property-based tests for rust-common crate.
//!
//! These tests verify universal properties across all inputs using proptest.

use proptest::prelude::*;
use rust_common::{
    HttpConfig, PlatformError, RequestIdGenerator, TracingConfig, UuidRequestIds,
    build_http_client,
};
use std::time::Duration;

proptest! {
    #![proptest_config(ProptestConfig::with_cases(100))]

    /// Every generated request id is a valid header value in UUID form.
    #[test]
    fn prop_request_ids_are_header_safe(_n in 0u8..10) {
        let id = UuidRequestIds.next_id();
        prop_assert_eq!(id.len(), 36);
        prop_assert!(id.chars().all(|c| c.is_ascii_hexdigit() || c == '-'));
        prop_assert!(reqwest::header::HeaderValue::from_str(&id).is_ok());
    }

    /// Builder methods set exactly the field they name.
    #[test]
    fn prop_http_config_builder(
        timeout in 1u64..600,
        connect in 1u64..60,
        agent in "[a-z]{1,10}/[0-9]\\.[0-9]",
    ) {
        let config = HttpConfig::default()
            .with_timeout(Duration::from_secs(timeout))
            .with_connect_timeout(Duration::from_secs(connect))
            .with_user_agent(agent.clone());
        prop_assert_eq!(config.timeout, Duration::from_secs(timeout));
        prop_assert_eq!(config.connect_timeout, Duration::from_secs(connect));
        prop_assert_eq!(config.user_agent, agent);
    }

    /// Only transport failures are reported as transport errors.
    #[test]
    fn prop_local_errors_are_not_transport(msg in "[a-zA-Z0-9 ]{1,50}") {
        prop_assert!(!PlatformError::tracing(msg.clone()).is_transport());
        prop_assert!(PlatformError::tracing(msg.clone()).to_string().contains(&msg));
    }

    /// Verbose raises the default level to `debug` and nothing else does.
    #[test]
    fn prop_verbose_level(verbose in any::<bool>()) {
        let config = TracingConfig::default().with_verbose(verbose);
        prop_assert_eq!(config.log_level == "debug", verbose);
    }
}

#[test]
fn test_default_client_builds() {
    assert!(build_http_client(&HttpConfig::default()).is_ok());
}
