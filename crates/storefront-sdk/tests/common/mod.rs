//! Shared fixtures: a recording in-memory transport and a storefront wired to it.

#![allow(dead_code)]

use async_trait::async_trait;
use serde_json::{json, Value};
use std::sync::{Arc, Mutex};
use storefront_sdk::storefront_auth::{AuthStore, AuthUser, Role};
use storefront_sdk::storefront_cache::{Cache, ManualClock};
use storefront_sdk::storefront_data::{
    FetchClient, FetchError, Method, RequestBuilder, Response, Transport,
};
use storefront_sdk::{ApiClient, Storefront, StorefrontConfig};

pub const BASE_URL: &str = "http://shop.test/api";

struct Route {
    method: Method,
    path: String,
    status: u16,
    body: Value,
}

/// Answers requests from registered routes and records every request it sees.
///
/// Later registrations for the same route win. Unknown routes answer 404.
#[derive(Default)]
pub struct MockTransport {
    routes: Mutex<Vec<Route>>,
    requests: Mutex<Vec<RequestBuilder>>,
}

impl MockTransport {
    pub fn respond(&self, method: Method, path: &str, status: u16, body: Value) {
        self.routes.lock().unwrap().push(Route {
            method,
            path: format!("/api{}", path),
            status,
            body,
        });
    }

    pub fn requests(&self) -> Vec<RequestBuilder> {
        self.requests.lock().unwrap().clone()
    }

    /// Number of requests made to `method path`.
    pub fn count(&self, method: Method, path: &str) -> usize {
        let path = format!("/api{}", path);
        self.requests
            .lock()
            .unwrap()
            .iter()
            .filter(|r| r.method() == method && r.path() == path)
            .count()
    }

    pub fn last(&self) -> RequestBuilder {
        self.requests.lock().unwrap().last().cloned().expect("no requests")
    }
}

#[async_trait]
impl Transport for MockTransport {
    async fn send(&self, request: RequestBuilder) -> Result<Response, FetchError> {
        let response = {
            let routes = self.routes.lock().unwrap();
            routes
                .iter()
                .rev()
                .find(|r| r.method == request.method() && r.path == request.path())
                .map(|r| Response::json_body(r.status, &r.body))
                .unwrap_or_else(|| Response::json_body(404, &json!({"message": "Not found"})))
        };
        self.requests.lock().unwrap().push(request);
        Ok(response)
    }
}

pub struct Harness {
    pub transport: Arc<MockTransport>,
    pub clock: Arc<ManualClock>,
    pub storage: Cache,
    pub shop: Storefront,
}

impl Harness {
    pub fn new() -> Self {
        let transport = Arc::new(MockTransport::default());
        let clock = Arc::new(ManualClock::starting_at(1_700_000_000_000));
        let storage = Cache::memory();

        let http = FetchClient::new(transport.clone()).with_base_url(BASE_URL);
        let api = ApiClient::new(http, AuthStore::new(storage.clone()));
        let shop = Storefront::new(api, storage.clone(), clock.clone(), &StorefrontConfig::default());

        Self {
            transport,
            clock,
            storage,
            shop,
        }
    }

    /// Store a session as if the user had logged in.
    pub fn login_as(&self, role: Role) {
        let user = AuthUser {
            name: "Test".into(),
            email: "test@shop.test".into(),
            role,
            token: Some(format!("token-{}", role.as_str())),
            ..Default::default()
        };
        AuthStore::new(self.storage.clone()).persist(&user).unwrap();
    }
}

pub fn product_json(id: &str, name: &str, stock: i64) -> Value {
    json!({
        "_id": id,
        "name": name,
        "slug": name.to_lowercase(),
        "price": 19.99,
        "totalStock": stock,
        "size": ["sm", "md"],
        "colours": ["black"],
        "images": [],
    })
}

pub fn page_json(products: Vec<Value>) -> Value {
    json!({
        "products": products,
        "totalPages": 3,
        "currentPage": 1,
        "totalProducts": 30,
    })
}
