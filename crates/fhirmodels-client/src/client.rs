//! Thin transport wrapper around `reqwest`.
//!
//! The wrapper owns the HTTP client, the base URL and an optional
//! request-decoration hook (auth header injection lives behind that
//! hook, outside this crate). Each call performs exactly one round
//! trip, drains the body, and hands the parts to the classifier. No
//! retries, no timeouts beyond the transport defaults.

use std::sync::Arc;
use tracing::debug;

use crate::classify::classify;
use crate::error::ClientResult;
use crate::response::FhirResponse;

/// Hook applied to every outgoing request before it is sent.
pub type RequestHook = Arc<dyn Fn(reqwest::RequestBuilder) -> reqwest::RequestBuilder + Send + Sync>;

/// A FHIR REST client.
#[derive(Clone)]
pub struct FhirClient {
    http: reqwest::Client,
    base_url: String,
    decorate: Option<RequestHook>,
}

impl FhirClient {
    /// Create a client for a server base URL.
    pub fn new(base_url: impl Into<String>) -> Self {
        Self {
            http: reqwest::Client::new(),
            base_url: base_url.into(),
            decorate: None,
        }
    }

    /// Attach a request-decoration hook, e.g. for auth header injection.
    pub fn with_decorator(mut self, hook: RequestHook) -> Self {
        self.decorate = Some(hook);
        self
    }

    /// Use a preconfigured `reqwest` client (custom TLS, proxies, ...).
    pub fn with_http_client(mut self, http: reqwest::Client) -> Self {
        self.http = http;
        self
    }

    /// GET a path relative to the base URL.
    pub async fn get(&self, path: &str) -> ClientResult<FhirResponse> {
        self.execute(self.http.get(self.url(path))).await
    }

    /// POST a JSON body to a path relative to the base URL.
    pub async fn post(&self, path: &str, body: String) -> ClientResult<FhirResponse> {
        let builder = self
            .http
            .post(self.url(path))
            .header(reqwest::header::CONTENT_TYPE, "application/fhir+json")
            .body(body);
        self.execute(builder).await
    }

    /// PUT a JSON body to a path relative to the base URL.
    pub async fn put(&self, path: &str, body: String) -> ClientResult<FhirResponse> {
        let builder = self
            .http
            .put(self.url(path))
            .header(reqwest::header::CONTENT_TYPE, "application/fhir+json")
            .body(body);
        self.execute(builder).await
    }

    /// DELETE a path relative to the base URL.
    pub async fn delete(&self, path: &str) -> ClientResult<FhirResponse> {
        self.execute(self.http.delete(self.url(path))).await
    }

    fn url(&self, path: &str) -> String {
        join_url(&self.base_url, path)
    }

    async fn execute(&self, builder: reqwest::RequestBuilder) -> ClientResult<FhirResponse> {
        let builder = match &self.decorate {
            Some(hook) => hook(builder),
            None => builder,
        };
        let response = builder.send().await?;
        let status = response.status().as_u16();
        let content_type = response
            .headers()
            .get(reqwest::header::CONTENT_TYPE)
            .and_then(|v| v.to_str().ok())
            .map(str::to_string);

        // Draining the body releases the connection on every path.
        let body = response.bytes().await?;
        debug!(status, bytes = body.len(), "received response");

        classify(status, content_type.as_deref(), body.to_vec())
    }
}

fn join_url(base: &str, path: &str) -> String {
    format!(
        "{}/{}",
        base.trim_end_matches('/'),
        path.trim_start_matches('/')
    )
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_join_url_normalizes_slashes() {
        assert_eq!(join_url("http://x/fhir", "Patient/1"), "http://x/fhir/Patient/1");
        assert_eq!(join_url("http://x/fhir/", "/Patient/1"), "http://x/fhir/Patient/1");
    }

    #[test]
    fn test_decorator_is_applied() {
        // The hook itself is opaque; just make sure attaching one keeps
        // the client usable and cloneable.
        let client = FhirClient::new("http://example.org/fhir").with_decorator(Arc::new(
            |builder: reqwest::RequestBuilder| builder.header("Authorization", "Bearer token"),
        ));
        let _clone = client.clone();
    }
}
