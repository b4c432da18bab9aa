//! Product catalog service with the listing query cache.

use crate::{ApiClient, CartService, StorefrontError};
use std::sync::Arc;
use std::time::Duration;
use storefront_cache::{Cache, Clock, QueryCache, DEFAULT_TTL};
use storefront_commerce::cart::AddToCartRequest;
use storefront_commerce::catalog::{DraftField, Product, ProductDraft, IMAGE_FIELD};
use storefront_commerce::search::{FilterSet, ProductPage};
use storefront_commerce::ProductId;
use storefront_data::{path_segment, Method, MultipartForm};

/// Storage key holding the epoch millis of the last admin mutation.
pub const LAST_CACHE_CLEAR_KEY: &str = "lastCacheClear";

/// How recent a recorded cache clear must be to force a refresh.
pub const CACHE_BUST_WINDOW: Duration = Duration::from_secs(5);

/// Product endpoints.
///
/// Listing responses are memoised per canonical filter key. Any create, update or
/// delete clears the whole memo before the request goes out.
#[derive(Clone)]
pub struct ProductService {
    api: ApiClient,
    listings: Arc<QueryCache<ProductPage>>,
    storage: Cache,
    clock: Arc<dyn Clock>,
}

impl std::fmt::Debug for ProductService {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("ProductService")
            .field("listings", &self.listings)
            .finish_non_exhaustive()
    }
}

impl ProductService {
    /// Create a service with the default 30 second listing TTL.
    pub fn new(api: ApiClient, storage: Cache, clock: Arc<dyn Clock>) -> Self {
        Self::with_ttl(api, storage, clock, DEFAULT_TTL)
    }

    pub fn with_ttl(api: ApiClient, storage: Cache, clock: Arc<dyn Clock>, ttl: Duration) -> Self {
        let listings = Arc::new(QueryCache::new(ttl, Arc::clone(&clock)));
        Self {
            api,
            listings,
            storage,
            clock,
        }
    }

    /// `GET /products` for a filter set, served from cache while fresh.
    ///
    /// Failed fetches are never cached.
    pub async fn get_products(&self, filters: &FilterSet) -> Result<ProductPage, StorefrontError> {
        let key = filters.cache_key();
        if let Some(page) = self.listings.get(&key) {
            return Ok(page);
        }

        tracing::debug!(%key, "listing cache miss");
        let request = self
            .api
            .request(Method::Get, "/products")?
            .query(filters.query_pairs());
        let page: ProductPage = self.api.execute(request).await?.json()?;
        self.listings.put(key, page.clone());
        Ok(page)
    }

    /// `GET /products/id/:id`, used by the admin edit form.
    pub async fn get_product_by_id(&self, id: &ProductId) -> Result<Product, StorefrontError> {
        let path = format!("/products/id/{}", path_segment(id.as_str()));
        self.api.get_json(&path).await
    }

    /// `GET /products/:slug`, the public detail page.
    pub async fn get_product_by_slug(&self, slug: &str) -> Result<Product, StorefrontError> {
        self.api.get_json(&format!("/products/{}", path_segment(slug))).await
    }

    /// `POST /products` as multipart. Admin only.
    pub async fn create_product(&self, draft: &ProductDraft) -> Result<Product, StorefrontError> {
        self.require_admin()?;
        draft.validate()?;
        self.invalidate()?;

        let request = self
            .api
            .request(Method::Post, "/products")?
            .multipart(draft_form(draft));
        let body: serde_json::Value = self.api.execute(request).await?.json()?;
        let product = product_from_body(body)?;
        tracing::info!(id = %product.id, name = %product.name, "product created");
        Ok(product)
    }

    /// `PUT /products/:id` as multipart. Admin only.
    pub async fn update_product(
        &self,
        id: &ProductId,
        draft: &ProductDraft,
    ) -> Result<Product, StorefrontError> {
        self.require_admin()?;
        draft.validate()?;
        self.invalidate()?;

        let request = self
            .api
            .request(Method::Put, &format!("/products/{}", path_segment(id.as_str())))?
            .multipart(draft_form(draft));
        let body: serde_json::Value = self.api.execute(request).await?.json()?;
        let product = product_from_body(body)?;
        tracing::info!(%id, "product updated");
        Ok(product)
    }

    /// `DELETE /products/:id`. Admin only.
    pub async fn delete_product(&self, id: &ProductId) -> Result<(), StorefrontError> {
        self.require_admin()?;
        self.invalidate()?;

        let path = format!("/products/{}", path_segment(id.as_str()));
        let request = self.api.request(Method::Delete, &path)?;
        self.api.execute(request).await?;
        tracing::info!(%id, "product deleted");
        Ok(())
    }

    /// `POST /cart` from a product view.
    pub async fn add_to_cart(&self, request: &AddToCartRequest) -> Result<(), StorefrontError> {
        CartService::new(self.api.clone()).add_item(request).await
    }

    /// Gate for admin views.
    pub fn require_admin(&self) -> Result<(), StorefrontError> {
        self.api.auth().require_admin()?;
        Ok(())
    }

    /// Drop every cached listing.
    pub fn clear_cache(&self) {
        self.listings.clear();
    }

    /// Number of memoised listings, fresh or stale.
    pub fn cached_listings(&self) -> usize {
        self.listings.len()
    }

    /// Clear the cache if a mutation was recorded within [`CACHE_BUST_WINDOW`].
    ///
    /// Returns whether the cache was cleared.
    pub fn refresh_if_recently_cleared(&self) -> Result<bool, StorefrontError> {
        let Some(mark) = self.storage.get_string(LAST_CACHE_CLEAR_KEY)? else {
            return Ok(false);
        };
        let Ok(cleared_at) = mark.trim().parse::<u64>() else {
            tracing::warn!(%mark, "ignoring unreadable cache-clear mark");
            return Ok(false);
        };

        let age = self.clock.now_millis().saturating_sub(cleared_at);
        if age < CACHE_BUST_WINDOW.as_millis() as u64 {
            tracing::debug!(age_ms = age, "recent cache clear, refreshing listings");
            self.listings.clear();
            Ok(true)
        } else {
            Ok(false)
        }
    }

    fn invalidate(&self) -> Result<(), StorefrontError> {
        self.listings.clear();
        let now = self.clock.now_millis().to_string();
        self.storage.set_string(LAST_CACHE_CLEAR_KEY, &now)?;
        Ok(())
    }
}

/// Encode a draft as the multipart form the API expects.
pub fn draft_form(draft: &ProductDraft) -> MultipartForm {
    draft
        .form_fields()
        .into_iter()
        .fold(MultipartForm::new(), |form, field| match field {
            DraftField::Text { name, value } => form.text(name, value),
            DraftField::Image(file) => form.file(
                IMAGE_FIELD,
                file.file_name.clone(),
                file.content_type.clone(),
                file.bytes.clone(),
            ),
        })
}

// Mutations answer either with the product itself or `{ "product": { .. } }`.
fn product_from_body(body: serde_json::Value) -> Result<Product, StorefrontError> {
    let value = match body {
        serde_json::Value::Object(mut map) if map.contains_key("product") => map
            .remove("product")
            .unwrap_or(serde_json::Value::Null),
        other => other,
    };
    serde_json::from_value(value).map_err(|e| storefront_commerce::CommerceError::from(e).into())
}
