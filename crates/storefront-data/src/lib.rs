//! HTTP client utilities for the storefront.
//!
//! Provides a small builder API over a pluggable [`Transport`] with automatic
//! JSON handling. [`ReqwestTransport`] is the real network implementation;
//! tests substitute their own.
//!
//! # Example
//!
//! ```rust,ignore
//! use storefront_data::FetchClient;
//! use std::time::Duration;
//!
//! let client = FetchClient::http(Duration::from_secs(15))?
//!     .with_base_url("http://localhost:8080/api");
//!
//! let products: serde_json::Value = client
//!     .get("/products")
//!     .query([("page", "1"), ("limit", "12")])
//!     .send()
//!     .await?
//!     .error_for_status()?
//!     .json()?;
//! ```

mod error;
mod multipart;
mod request;
mod response;
mod transport;

pub use error::FetchError;
pub use multipart::{FormPart, MultipartForm};
pub use request::{path_segment, Method, RequestBody, RequestBuilder};
pub use response::Response;
pub use transport::{ReqwestTransport, Transport};

use std::collections::HashMap;
use std::sync::Arc;
use std::time::Duration;

/// HTTP client for making outbound requests.
#[derive(Clone)]
pub struct FetchClient {
    base_url: Option<String>,
    default_headers: HashMap<String, String>,
    transport: Arc<dyn Transport>,
}

impl std::fmt::Debug for FetchClient {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("FetchClient")
            .field("base_url", &self.base_url)
            .field("default_headers", &self.default_headers)
            .finish_non_exhaustive()
    }
}

impl FetchClient {
    /// Create a client over the given transport.
    pub fn new(transport: Arc<dyn Transport>) -> Self {
        Self {
            base_url: None,
            default_headers: HashMap::new(),
            transport,
        }
    }

    /// Create a client that talks to the network through reqwest.
    pub fn http(timeout: Duration) -> Result<Self, FetchError> {
        Ok(Self::new(Arc::new(ReqwestTransport::new(timeout)?)))
    }

    /// Create a client with a base URL that will be prepended to all requests.
    pub fn with_base_url(mut self, base_url: impl Into<String>) -> Self {
        self.base_url = Some(base_url.into());
        self
    }

    /// Add a default header that will be included in all requests.
    pub fn with_default_header(
        mut self,
        key: impl Into<String>,
        value: impl Into<String>,
    ) -> Self {
        self.default_headers.insert(key.into(), value.into());
        self
    }

    pub fn base_url(&self) -> Option<&str> {
        self.base_url.as_deref()
    }

    /// Create a GET request.
    pub fn get(&self, url: impl Into<String>) -> ClientRequestBuilder {
        self.request(Method::Get, url)
    }

    /// Create a POST request.
    pub fn post(&self, url: impl Into<String>) -> ClientRequestBuilder {
        self.request(Method::Post, url)
    }

    /// Create a PUT request.
    pub fn put(&self, url: impl Into<String>) -> ClientRequestBuilder {
        self.request(Method::Put, url)
    }

    /// Create a DELETE request.
    pub fn delete(&self, url: impl Into<String>) -> ClientRequestBuilder {
        self.request(Method::Delete, url)
    }

    /// Create a request with a custom method.
    pub fn request(&self, method: Method, url: impl Into<String>) -> ClientRequestBuilder {
        let url = url.into();
        let full_url = match &self.base_url {
            Some(base) => {
                if url.starts_with("http://") || url.starts_with("https://") {
                    url
                } else {
                    format!("{}{}", base.trim_end_matches('/'), url)
                }
            }
            None => url,
        };

        let mut builder = RequestBuilder::new(method, full_url);
        for (key, value) in &self.default_headers {
            builder = builder.header(key.clone(), value.clone());
        }

        ClientRequestBuilder {
            builder,
            transport: Arc::clone(&self.transport),
        }
    }
}

/// A request builder bound to a client.
pub struct ClientRequestBuilder {
    builder: RequestBuilder,
    transport: Arc<dyn Transport>,
}

impl ClientRequestBuilder {
    /// Add a header to the request.
    pub fn header(mut self, key: impl Into<String>, value: impl Into<String>) -> Self {
        self.builder = self.builder.header(key, value);
        self
    }

    /// Append query-string pairs.
    pub fn query<K, V>(mut self, pairs: impl IntoIterator<Item = (K, V)>) -> Self
    where
        K: Into<String>,
        V: Into<String>,
    {
        self.builder = self.builder.query(pairs);
        self
    }

    /// Set the request body as JSON.
    pub fn json<T: serde::Serialize>(mut self, value: &T) -> Result<Self, FetchError> {
        self.builder = self.builder.json(value)?;
        Ok(self)
    }

    /// Set a multipart form body.
    pub fn multipart(mut self, form: MultipartForm) -> Self {
        self.builder = self.builder.multipart(form);
        self
    }

    /// Add a bearer token authorization header.
    pub fn bearer_auth(mut self, token: impl AsRef<str>) -> Self {
        self.builder = self.builder.bearer_auth(token);
        self
    }

    /// Send the request and return the response.
    pub async fn send(self) -> Result<Response, FetchError> {
        let method = self.builder.method;
        let url = self.builder.url.clone();
        tracing::debug!(%method, %url, "sending request");

        let response = self.transport.send(self.builder).await?;
        tracing::debug!(%method, %url, status = response.status, "response received");
        Ok(response)
    }
}

/// Prelude for convenient imports.
pub mod prelude {
    pub use crate::{FetchClient, FetchError, Method, MultipartForm, Response, Transport};
}

#[cfg(test)]
mod tests {
    use super::*;
    use async_trait::async_trait;
    use std::sync::Mutex;

    #[derive(Default)]
    struct Echo {
        seen: Mutex<Vec<RequestBuilder>>,
    }

    #[async_trait]
    impl Transport for Echo {
        async fn send(&self, request: RequestBuilder) -> Result<Response, FetchError> {
            self.seen.lock().unwrap().push(request);
            Ok(Response::json_body(200, &serde_json::json!({"ok": true})))
        }
    }

    #[tokio::test]
    async fn test_base_url_and_default_headers() {
        let echo = Arc::new(Echo::default());
        let client = FetchClient::new(echo.clone())
            .with_base_url("http://localhost:8080/api/")
            .with_default_header("Accept", "application/json");

        let resp = client.get("/products").send().await.unwrap();
        assert!(resp.is_success());

        let seen = echo.seen.lock().unwrap();
        assert_eq!(seen[0].url(), "http://localhost:8080/api/products");
        assert_eq!(seen[0].header_value("accept"), Some("application/json"));
    }

    #[tokio::test]
    async fn test_absolute_url_bypasses_base() {
        let echo = Arc::new(Echo::default());
        let client = FetchClient::new(echo.clone()).with_base_url("http://localhost:8080/api");

        client
            .delete("https://other.example/x")
            .send()
            .await
            .unwrap();
        let seen = echo.seen.lock().unwrap();
        assert_eq!(seen[0].url(), "https://other.example/x");
        assert_eq!(seen[0].method(), Method::Delete);
    }
}
