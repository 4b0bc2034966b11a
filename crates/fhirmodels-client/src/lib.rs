//! # FHIR Models Client
//!
//! The typed REST client layer: classifies completed HTTP responses
//! into success, domain error or protocol error, and wraps a `reqwest`
//! transport with an injectable request-decoration hook.
//!
//! The classifier never performs the HTTP call itself and never
//! retries; retry, auth and logging policy belong to the transport
//! wrapper or to the caller.

#![warn(missing_docs)]
#![warn(clippy::all)]

pub mod classify;
pub mod client;
pub mod error;
pub mod response;

pub use classify::classify;
pub use client::{FhirClient, RequestHook};
pub use error::{ClientError, ClientResult, expect_single};
pub use response::FhirResponse;
