//! Server cart endpoints and the local cart mirror.

use crate::{ApiClient, StorefrontError};
use storefront_cache::Cache;
use storefront_commerce::cart::{AddToCartRequest, CartItem, ServerCart};
use storefront_commerce::{CartItemId, CommerceError};
use storefront_data::{path_segment, Method};

/// Storage key of the mirrored cart items.
pub const CART_ITEMS_KEY: &str = "cartItems";

/// `/cart` endpoints. Every call requires a stored token.
#[derive(Debug, Clone)]
pub struct CartService {
    api: ApiClient,
}

impl CartService {
    pub fn new(api: ApiClient) -> Self {
        Self { api }
    }

    /// `GET /cart`.
    pub async fn get_cart(&self) -> Result<ServerCart, StorefrontError> {
        self.api.auth().require_authenticated()?;
        self.api.get_json("/cart").await
    }

    /// `POST /cart`.
    pub async fn add_item(&self, item: &AddToCartRequest) -> Result<(), StorefrontError> {
        self.api.auth().require_authenticated()?;
        let request = self.api.request(Method::Post, "/cart")?.json(item)?;
        self.api.execute(request).await?;
        tracing::info!(product = %item.product_id, quantity = item.quantity, "added to cart");
        Ok(())
    }

    /// `PUT /cart/:id`, then re-read the cart.
    ///
    /// Quantities below 1 are rejected without a request.
    pub async fn update_quantity(
        &self,
        id: &CartItemId,
        quantity: u32,
    ) -> Result<ServerCart, StorefrontError> {
        if quantity < 1 {
            return Err(CommerceError::InvalidQuantity(i64::from(quantity)).into());
        }
        self.api.auth().require_authenticated()?;
        let request = self
            .api
            .request(Method::Put, &format!("/cart/{}", path_segment(id.as_str())))?
            .json(&serde_json::json!({ "quantity": quantity }))?;
        self.api.execute(request).await?;
        self.get_cart().await
    }

    /// `DELETE /cart/:id`, then re-read the cart.
    pub async fn remove_item(&self, id: &CartItemId) -> Result<ServerCart, StorefrontError> {
        self.api.auth().require_authenticated()?;
        let path = format!("/cart/{}", path_segment(id.as_str()));
        let request = self.api.request(Method::Delete, &path)?;
        self.api.execute(request).await?;
        self.get_cart().await
    }

    /// `DELETE /cart`. The server cart is empty afterwards.
    pub async fn clear(&self) -> Result<ServerCart, StorefrontError> {
        self.api.auth().require_authenticated()?;
        let request = self.api.request(Method::Delete, "/cart")?;
        self.api.execute(request).await?;
        tracing::info!("cart cleared");
        Ok(ServerCart::empty())
    }
}

/// Local mirror of the cart that drives the header badge.
///
/// Persisted under [`CART_ITEMS_KEY`]. Mutations are synchronous and
/// last-writer-wins; two processes sharing one store can overwrite each other.
#[derive(Debug)]
pub struct CartMirror {
    storage: Cache,
    items: Vec<CartItem>,
    count: usize,
}

impl CartMirror {
    /// Restore the mirror from storage. Unreadable state counts as empty.
    pub fn load(storage: Cache) -> Self {
        let items = match storage.get::<Vec<CartItem>>(CART_ITEMS_KEY) {
            Ok(items) => items.unwrap_or_default(),
            Err(e) => {
                tracing::warn!(error = %e, "discarding unreadable cart mirror");
                Vec::new()
            }
        };
        let count = items.len();
        Self {
            storage,
            items,
            count,
        }
    }

    pub fn items(&self) -> &[CartItem] {
        &self.items
    }

    /// Badge count. Tracks the item count unless overridden by [`CartMirror::set_count`].
    pub fn count(&self) -> usize {
        self.count
    }

    pub fn is_empty(&self) -> bool {
        self.items.is_empty()
    }

    /// Append an item and persist.
    pub fn add_to_cart(&mut self, item: CartItem) -> Result<(), StorefrontError> {
        self.items.push(item);
        self.count = self.items.len();
        self.persist()
    }

    /// Remove every item with this id and persist.
    pub fn remove_from_cart(&mut self, id: &CartItemId) -> Result<(), StorefrontError> {
        self.items.retain(|item| &item.id != id);
        self.count = self.items.len();
        self.persist()
    }

    /// Empty the mirror and delete the persisted state.
    pub fn clear_cart(&mut self) -> Result<(), StorefrontError> {
        self.items.clear();
        self.count = 0;
        self.storage.delete(CART_ITEMS_KEY)?;
        Ok(())
    }

    /// Override the badge count. Not persisted.
    pub fn set_count(&mut self, count: usize) {
        self.count = count;
    }

    /// Replace the mirror with the lines of a freshly fetched server cart.
    pub fn sync_from_server(&mut self, cart: &ServerCart) -> Result<(), StorefrontError> {
        if cart.is_empty() {
            return self.clear_cart();
        }
        self.items = cart.items.iter().filter_map(CartItem::from_line).collect();
        self.count = self.items.len();
        self.persist()
    }

    fn persist(&self) -> Result<(), StorefrontError> {
        self.storage.set(CART_ITEMS_KEY, &self.items)?;
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn item(id: &str) -> CartItem {
        CartItem::new(id, "p1", "md", "default", 1).unwrap()
    }

    #[test]
    fn test_add_then_remove_is_empty() {
        let storage = Cache::memory();
        let mut mirror = CartMirror::load(storage.clone());

        mirror.add_to_cart(item("i1")).unwrap();
        assert_eq!(mirror.count(), 1);

        mirror.remove_from_cart(&CartItemId::new("i1")).unwrap();
        assert!(mirror.is_empty());
        assert_eq!(mirror.count(), 0);
        assert_eq!(
            storage.get::<Vec<CartItem>>(CART_ITEMS_KEY).unwrap(),
            Some(Vec::new())
        );
    }

    #[test]
    fn test_load_restores_items() {
        let storage = Cache::memory();
        {
            let mut mirror = CartMirror::load(storage.clone());
            mirror.add_to_cart(item("i1")).unwrap();
            mirror.add_to_cart(item("i2")).unwrap();
        }

        let mirror = CartMirror::load(storage);
        assert_eq!(mirror.count(), 2);
        assert_eq!(mirror.items()[1].id.as_str(), "i2");
    }

    #[test]
    fn test_corrupt_state_loads_empty() {
        let storage = Cache::memory();
        storage.set_string(CART_ITEMS_KEY, "{not json").unwrap();

        let mirror = CartMirror::load(storage);
        assert!(mirror.is_empty());
        assert_eq!(mirror.count(), 0);
    }

    #[test]
    fn test_clear_deletes_key() {
        let storage = Cache::memory();
        let mut mirror = CartMirror::load(storage.clone());
        mirror.add_to_cart(item("i1")).unwrap();

        mirror.clear_cart().unwrap();
        assert_eq!(mirror.count(), 0);
        assert!(!storage.exists(CART_ITEMS_KEY).unwrap());
    }

    #[test]
    fn test_set_count_is_not_persisted() {
        let storage = Cache::memory();
        let mut mirror = CartMirror::load(storage.clone());
        mirror.add_to_cart(item("i1")).unwrap();
        mirror.set_count(5);
        assert_eq!(mirror.count(), 5);

        assert_eq!(CartMirror::load(storage).count(), 1);
    }

    #[test]
    fn test_sync_from_server() {
        let storage = Cache::memory();
        let mut mirror = CartMirror::load(storage);
        let cart: ServerCart = serde_json::from_str(
            r#"{"items": [{"_id": "l1", "quantity": 2, "size": "lg",
                           "product": {"_id": "p9", "name": "Hat", "size": ["sm"]}}],
                "totalItems": 2, "totalAmount": 30}"#,
        )
        .unwrap();

        mirror.sync_from_server(&cart).unwrap();
        assert_eq!(mirror.count(), 1);
        assert_eq!(mirror.items()[0].size, "lg");
        assert_eq!(mirror.items()[0].name.as_deref(), Some("Hat"));

        mirror.sync_from_server(&ServerCart::empty()).unwrap();
        assert!(mirror.is_empty());
    }
}
