//! The typed response value produced by classification.

use fhirmodels_core::{Bundle, OperationOutcome};

use crate::error::{ClientError, ClientResult};

/// A classified successful FHIR response.
///
/// Immutable after construction; owned by the code path that issued the
/// request. The raw body is always present; the structured views are
/// populated only when the body's `resourceType` promised them.
#[derive(Debug)]
pub struct FhirResponse {
    /// HTTP status code
    pub status: u16,
    /// Raw response body bytes
    pub body: Vec<u8>,
    /// The `resourceType` tag found in the body, empty when absent
    pub resource_type: String,
    /// Parsed bundle, when the body was a Bundle
    pub bundle: Option<Bundle>,
    /// Parsed outcome, when the body was an OperationOutcome
    pub outcome: Option<OperationOutcome>,
}

impl FhirResponse {
    /// The parsed Bundle, or an error naming the resource type actually
    /// found.
    pub fn bundle(&self) -> ClientResult<&Bundle> {
        self.bundle
            .as_ref()
            .ok_or_else(|| ClientError::unexpected_resource("Bundle", &self.resource_type))
    }

    /// The parsed OperationOutcome, or an error naming the resource
    /// type actually found.
    pub fn operation_outcome(&self) -> ClientResult<&OperationOutcome> {
        self.outcome
            .as_ref()
            .ok_or_else(|| ClientError::unexpected_resource("OperationOutcome", &self.resource_type))
    }

    /// The raw body bytes, asserted to be a resource of the expected
    /// type.
    pub fn resource(&self, expected: &str) -> ClientResult<&[u8]> {
        if self.resource_type == expected {
            Ok(&self.body)
        } else {
            Err(ClientError::unexpected_resource(expected, &self.resource_type))
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn response(resource_type: &str) -> FhirResponse {
        FhirResponse {
            status: 200,
            body: br#"{"resourceType":"Patient","id":"abc"}"#.to_vec(),
            resource_type: resource_type.to_string(),
            bundle: None,
            outcome: None,
        }
    }

    #[test]
    fn test_accessors_name_actual_type_on_mismatch() {
        let r = response("Patient");

        let err = r.bundle().unwrap_err();
        assert!(err.to_string().contains("Patient"), "got: {err}");

        let err = r.operation_outcome().unwrap_err();
        assert!(err.to_string().contains("Patient"), "got: {err}");

        let err = r.resource("Observation").unwrap_err();
        assert!(err.to_string().contains("Patient"), "got: {err}");
    }

    #[test]
    fn test_resource_returns_exact_bytes() {
        let r = response("Patient");
        assert_eq!(
            r.resource("Patient").unwrap(),
            br#"{"resourceType":"Patient","id":"abc"}"#
        );
    }
}
