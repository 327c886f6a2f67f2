//! `WWW-Authenticate` challenge parsing.
//!
//! The vault answers an unauthenticated probe with
//! `Bearer authenticate="<login url>", resource="<resource url>"`.
//! Fields are located by position, not by key: the second space-delimited
//! token is the login field and the last token is the resource field.

/// Scheme every endpoint URL is expected to start with.
pub const HTTPS_PREFIX: &str = "https://";

const HTTP_PREFIX: &str = "http://";

/// Endpoints named by a challenge header.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Challenge {
    /// Identity provider authority, e.g. `https://login.windows.net/<tenant>`
    pub login_url: String,
    /// Resource the token must be issued for
    pub resource_url: String,
}

impl Challenge {
    /// Both endpoints were found.
    #[must_use]
    pub fn is_complete(&self) -> bool {
        !self.login_url.is_empty() && !self.resource_url.is_empty()
    }
}

/// Parse a challenge header, accepting `https://` endpoints only.
///
/// # Examples
///
/// ```
/// use azkv_keyvault::parse_challenge;
///
/// let challenge = parse_challenge(
///     r#"Bearer authenticate="https://login.windows.net/tenant", resource="https://vault.azure.net""#,
/// );
/// assert_eq!(challenge.login_url, "https://login.windows.net/tenant");
/// assert_eq!(challenge.resource_url, "https://vault.azure.net");
/// ```
#[must_use]
pub fn parse_challenge(header: &str) -> Challenge {
    parse_challenge_with(header, false)
}

/// Parse a challenge header, optionally also accepting `http://` endpoints.
#[must_use]
pub fn parse_challenge_with(header: &str, allow_http: bool) -> Challenge {
    let tokens: Vec<&str> = header.trim().split(' ').collect();

    // The login field only counts when it is followed by another token.
    let login_url = if tokens.len() >= 3 {
        extract_url(tokens[1], allow_http)
    } else {
        ""
    };
    let resource_url = tokens
        .last()
        .map_or("", |field| extract_url(field, allow_http));

    Challenge {
        login_url: login_url.to_string(),
        resource_url: resource_url.to_string(),
    }
}

/// Cut the URL out of a `key="url"` field.
///
/// Starts at the first scheme prefix and stops before the next `"`, or runs
/// to the end of the field when no closing quote exists. A field without a
/// scheme prefix yields an empty string.
#[must_use]
pub fn extract_url(field: &str, allow_http: bool) -> &str {
    let https = field.find(HTTPS_PREFIX);
    let start = if allow_http {
        match (https, field.find(HTTP_PREFIX)) {
            (Some(a), Some(b)) => Some(a.min(b)),
            (a, b) => a.or(b),
        }
    } else {
        https
    };

    let Some(start) = start else {
        return "";
    };
    let rest = &field[start..];
    let end = rest.find('"').unwrap_or(rest.len());
    &rest[..end]
}
