//! Correlation ids attached to every outbound request.
//!
//! The vault and the identity provider echo `client-request-id` in their
//! logs. The id is for traceability only, never for retries or idempotency.

use uuid::Uuid;

/// Header carrying the per-request correlation id.
pub const CLIENT_REQUEST_ID_HEADER: &str = "client-request-id";

/// Source of fresh correlation ids.
pub trait RequestIdGenerator: Send + Sync {
    /// Produce an id that has not been handed out before.
    fn next_id(&self) -> String;
}

/// Random v4 UUIDs in lowercase hyphenated form.
#[derive(Debug, Clone, Copy, Default)]
pub struct UuidRequestIds;

impl RequestIdGenerator for UuidRequestIds {
    fn next_id(&self) -> String {
        Uuid::new_v4().hyphenated().to_string()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashSet;

    #[test]
    fn test_ids_are_lowercase_uuids() {
        let id = UuidRequestIds.next_id();
        assert_eq!(id.len(), 36);
        assert_eq!(id, id.to_lowercase());
        assert!(Uuid::parse_str(&id).is_ok());
    }

    #[test]
    fn test_ids_are_unique() {
        let ids: HashSet<String> = (0..256).map(|_| UuidRequestIds.next_id()).collect();
        assert_eq!(ids.len(), 256);
    }
}
