//! Response classification: one completed HTTP response in, exactly one
//! of {typed success, domain error, protocol error} out.

use serde::Deserialize;

use fhirmodels_core::{Bundle, OperationOutcome};

use crate::error::{ClientError, ClientResult};
use crate::response::FhirResponse;

/// A cheap probe over the raw body: just the discriminator and the
/// free-text message, everything else ignored.
#[derive(Debug, Default, Deserialize)]
struct ResourceHeader {
    #[serde(rename = "resourceType")]
    resource_type: Option<String>,
    message: Option<String>,
}

/// Classify a completed HTTP response.
///
/// The caller has already drained the body (draining releases the
/// underlying connection whatever happens next). Status codes outside
/// 2xx/4xx are rejected before any body parsing, so a 500 never costs a
/// deserialization attempt.
pub fn classify(
    status: u16,
    content_type: Option<&str>,
    body: Vec<u8>,
) -> ClientResult<FhirResponse> {
    let content_type = content_type.unwrap_or("");
    if !content_type.contains("json") {
        return Err(ClientError::protocol(
            status,
            format!("expected JSON response, got content type {content_type:?}"),
        ));
    }

    let success = (200..300).contains(&status);
    let domain = (400..500).contains(&status);
    if !success && !domain {
        return Err(ClientError::protocol(
            status,
            format!("unexpected HTTP status {status}"),
        ));
    }

    let header: ResourceHeader = serde_json::from_slice(&body).unwrap_or_default();
    let resource_type = header.resource_type.unwrap_or_default();

    let mut bundle = None;
    let mut outcome = None;
    match resource_type.as_str() {
        "Bundle" => bundle = Some(serde_json::from_slice::<Bundle>(&body)?),
        "OperationOutcome" => outcome = Some(serde_json::from_slice::<OperationOutcome>(&body)?),
        _ => {}
    }

    if success {
        return Ok(FhirResponse {
            status,
            body,
            resource_type,
            bundle,
            outcome,
        });
    }

    let message = outcome
        .as_ref()
        .and_then(|o| o.first_diagnostics().map(str::to_string))
        .or(header.message)
        .unwrap_or_else(|| format!("HTTP {status}"));
    Err(ClientError::Domain {
        status,
        outcome,
        message,
    })
}
