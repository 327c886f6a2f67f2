//! Shared proptest generators.

use proptest::prelude::*;

/// Generate vault names (3-24 chars, alphanumeric and dashes).
pub fn vault_name_strategy() -> impl Strategy<Value = String> {
    "[a-z][a-z0-9-]{1,22}[a-z0-9]"
}

/// Generate secret names.
pub fn secret_name_strategy() -> impl Strategy<Value = String> {
    "[A-Za-z][A-Za-z0-9-]{0,30}"
}

/// Generate https URLs with optional path segments and no quotes or spaces.
pub fn https_url_strategy() -> impl Strategy<Value = String> {
    (
        "[a-z][a-z0-9]{1,12}",
        prop_oneof![Just("com"), Just("net"), Just("windows.net"), Just("azure.net")],
        prop::collection::vec("[A-Za-z0-9._-]{1,12}", 0..3),
    )
        .prop_map(|(host, tld, segments)| {
            let mut url = format!("https://{host}.{tld}");
            for segment in segments {
                url.push('/');
                url.push_str(&segment);
            }
            url
        })
}

/// Generate `(header, login_url, resource_url)` challenge triples.
///
/// Headers use either the comma form or the space-only form, with optional
/// surrounding whitespace; the token count is always at least three.
pub fn challenge_header_strategy() -> impl Strategy<Value = (String, String, String)> {
    (
        https_url_strategy(),
        https_url_strategy(),
        prop_oneof![Just("authenticate"), Just("authorization"), Just("authorization_uri")],
        any::<bool>(),
        "[ \t]{0,3}",
        "[ \t]{0,3}",
    )
        .prop_map(|(login, resource, key, comma, lead, trail)| {
            let separator = if comma { ", " } else { " " };
            let header =
                format!(r#"{lead}Bearer {key}="{login}"{separator}resource="{resource}"{trail}"#);
            (header, login, resource)
        })
}

/// Generate client ids in GUID form.
pub fn client_id_strategy() -> impl Strategy<Value = String> {
    any::<u128>().prop_map(|n| uuid::Uuid::from_u128(n).to_string())
}

/// Generate config values without leading or trailing whitespace.
pub fn config_value_strategy() -> impl Strategy<Value = String> {
    "[A-Za-z0-9._~+/=-]{1,40}"
}
