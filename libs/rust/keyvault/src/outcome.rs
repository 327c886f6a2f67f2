//! Tagged results of the discovery, token and fetch steps.

use crate::secrets::Secret;
use thiserror::Error;

/// Why a step did not produce data.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum StepFailure {
    /// The server answered with an unexpected status code
    #[error("unexpected status {0}")]
    Status(u16),

    /// The response body was not the expected JSON document
    #[error("malformed response body: {0}")]
    MalformedBody(String),

    /// The `401` challenge did not name both endpoints
    #[error("challenge header did not name both endpoints")]
    MalformedChallenge,

    /// A URL built from earlier steps is not usable
    #[error("invalid endpoint: {0}")]
    InvalidEndpoint(String),

    /// The stored token cannot be sent as an `Authorization` header
    #[error("invalid authorization header")]
    InvalidAuthorization,
}

impl StepFailure {
    /// Status code that caused the failure, if any.
    #[must_use]
    pub const fn status(&self) -> Option<u16> {
        match self {
            Self::Status(code) => Some(*code),
            _ => None,
        }
    }
}

/// Result of a single protocol step.
///
/// A failure never aborts the flow; the next step runs against whatever the
/// session holds.
#[derive(Debug, Clone, PartialEq, Eq)]
#[must_use]
pub enum Outcome<T> {
    /// The step produced its data
    Success(T),
    /// The step degraded
    Failure(StepFailure),
}

impl<T> Outcome<T> {
    /// Whether the step succeeded.
    #[must_use]
    pub const fn is_success(&self) -> bool {
        matches!(self, Self::Success(_))
    }

    /// The failure reason, if the step degraded.
    #[must_use]
    pub const fn failure(&self) -> Option<&StepFailure> {
        match self {
            Self::Success(_) => None,
            Self::Failure(reason) => Some(reason),
        }
    }
}

impl Outcome<Secret> {
    /// Split into the record and a success flag.
    ///
    /// A failed fetch yields the sentinel record with empty `id` and `value`.
    #[must_use]
    pub fn into_record(self) -> (Secret, bool) {
        match self {
            Self::Success(secret) => (secret, true),
            Self::Failure(_) => (Secret::sentinel(), false),
        }
    }
}
