//! Error taxonomy for the client layer.

use fhirmodels_core::OperationOutcome;
use thiserror::Error;

/// Result type for client operations.
pub type ClientResult<T> = Result<T, ClientError>;

/// Errors produced by the client layer.
///
/// Every failure mode is a distinct value; nothing here is retried.
#[derive(Error, Debug)]
pub enum ClientError {
    /// No entity matched where exactly one was expected
    #[error("No {kind} found for id {id}")]
    NotFound {
        /// The entity kind expected
        kind: String,
        /// The identifier searched for
        id: String,
    },

    /// More than one entity matched where exactly one was expected
    #[error("Found {count} {kind} entities for id {id}, expected exactly one")]
    TooManyEntities {
        /// The entity kind expected
        kind: String,
        /// The identifier searched for
        id: String,
        /// How many entities matched
        count: usize,
    },

    /// A 4xx response from the server
    #[error("Domain error (HTTP {status}): {message}")]
    Domain {
        /// HTTP status code
        status: u16,
        /// The parsed OperationOutcome, when the body carried one
        outcome: Option<OperationOutcome>,
        /// Diagnostic message extracted from the response
        message: String,
    },

    /// Content-type mismatch, unexpected status code or transport-shape
    /// problem
    #[error("Protocol error (HTTP {status}): {message}")]
    Protocol {
        /// HTTP status code
        status: u16,
        /// What went wrong
        message: String,
    },

    /// The response promised a structured resource it could not deliver
    #[error("Expected resource type {expected}, found {actual:?}")]
    UnexpectedResourceType {
        /// What the caller asked for
        expected: String,
        /// What the body actually carried
        actual: String,
    },

    /// JSON deserialization failed while building a promised structure
    #[error("Parse error: {0}")]
    Parse(#[from] serde_json::Error),

    /// The HTTP round trip itself failed
    #[error("Transport error: {0}")]
    Transport(#[from] reqwest::Error),
}

impl ClientError {
    /// Create a protocol error.
    pub fn protocol(status: u16, message: impl Into<String>) -> Self {
        Self::Protocol {
            status,
            message: message.into(),
        }
    }

    /// Create an unexpected-resource-type error naming what was found.
    pub fn unexpected_resource(expected: impl Into<String>, actual: impl Into<String>) -> Self {
        Self::UnexpectedResourceType {
            expected: expected.into(),
            actual: actual.into(),
        }
    }
}

/// Enforce exactly-one-match semantics over a count.
pub fn expect_single(count: usize, kind: &str, id: &str) -> ClientResult<()> {
    match count {
        0 => Err(ClientError::NotFound {
            kind: kind.to_string(),
            id: id.to_string(),
        }),
        1 => Ok(()),
        _ => Err(ClientError::TooManyEntities {
            kind: kind.to_string(),
            id: id.to_string(),
            count,
        }),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_expect_single() {
        assert!(expect_single(1, "Patient", "abc").is_ok());
        assert!(matches!(
            expect_single(0, "Patient", "abc"),
            Err(ClientError::NotFound { kind, id }) if kind == "Patient" && id == "abc"
        ));
        assert!(matches!(
            expect_single(3, "Patient", "abc"),
            Err(ClientError::TooManyEntities { count: 3, .. })
        ));
    }

    #[test]
    fn test_error_messages_name_specifics() {
        let err = ClientError::unexpected_resource("Bundle", "Patient");
        assert_eq!(err.to_string(), "Expected resource type Bundle, found \"Patient\"");

        let err = ClientError::protocol(503, "unexpected status");
        assert!(err.to_string().contains("503"));
    }
}
