//! Authenticated API client.

use crate::{StorefrontConfig, StorefrontError};
use serde::de::DeserializeOwned;
use storefront_auth::AuthStore;
use storefront_cache::Cache;
use storefront_data::{ClientRequestBuilder, FetchClient, Method, Response};

/// [`FetchClient`] bound to the storefront API and the stored session.
///
/// Every request carries `Authorization: Bearer <token>` while a token is stored.
#[derive(Debug, Clone)]
pub struct ApiClient {
    http: FetchClient,
    auth: AuthStore,
}

impl ApiClient {
    pub fn new(http: FetchClient, auth: AuthStore) -> Self {
        Self { http, auth }
    }

    /// Build a reqwest-backed client from configuration.
    pub fn from_config(config: &StorefrontConfig, storage: Cache) -> Result<Self, StorefrontError> {
        let http = FetchClient::http(config.timeout())?
            .with_base_url(config.api.base_url.clone())
            .with_default_header("Accept", "application/json");
        Ok(Self::new(http, AuthStore::new(storage)))
    }

    /// The stored session.
    pub fn auth(&self) -> &AuthStore {
        &self.auth
    }

    /// Start a request to `path`, relative to the API base URL.
    pub fn request(&self, method: Method, path: &str) -> Result<ClientRequestBuilder, StorefrontError> {
        let builder = self.http.request(method, path);
        Ok(match self.auth.token()? {
            Some(token) => builder.bearer_auth(token),
            None => builder,
        })
    }

    /// Send a request; non-2xx responses become [`storefront_data::FetchError::HttpError`].
    pub async fn execute(&self, request: ClientRequestBuilder) -> Result<Response, StorefrontError> {
        let response = request.send().await?;
        match response.error_for_status() {
            Ok(response) => Ok(response),
            Err(e) => {
                tracing::warn!(status = ?e.status(), "request rejected by server");
                Err(e.into())
            }
        }
    }

    /// `GET path` and decode the JSON body.
    pub async fn get_json<T: DeserializeOwned>(&self, path: &str) -> Result<T, StorefrontError> {
        let request = self.request(Method::Get, path)?;
        Ok(self.execute(request).await?.json()?)
    }
}
