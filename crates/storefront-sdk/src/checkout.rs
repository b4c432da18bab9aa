//! Demo checkout.

use crate::{ApiClient, CartService, StorefrontError};
use chrono::Utc;
use storefront_commerce::checkout::{OrderConfirmation, OrderRequest};
use storefront_commerce::OrderId;
use storefront_data::Method;

/// Places demo orders for the current cart. No payment is taken.
#[derive(Debug, Clone)]
pub struct CheckoutService {
    api: ApiClient,
}

impl CheckoutService {
    pub fn new(api: ApiClient) -> Self {
        Self { api }
    }

    /// Order everything in the server cart via `POST /checkout`.
    ///
    /// An empty cart fails with [`storefront_commerce::CommerceError::EmptyCart`]
    /// before anything is posted.
    pub async fn place_order(&self) -> Result<OrderConfirmation, StorefrontError> {
        let cart = CartService::new(self.api.clone()).get_cart().await?;
        let order = OrderRequest::from_cart(&cart)?;

        let request = self.api.request(Method::Post, "/checkout")?.json(&order)?;
        let response = self.api.execute(request).await?;
        // The API may answer with an empty body; the order still stands.
        let body: serde_json::Value = response.json().unwrap_or(serde_json::Value::Null);
        let order_id = order_id_from(&body);

        let confirmation = OrderConfirmation::new(&order, order_id, Utc::now());
        tracing::info!(
            order = ?confirmation.order_id,
            total = confirmation.total_amount,
            items = confirmation.item_count,
            "order placed"
        );
        Ok(confirmation)
    }
}

fn order_id_from(body: &serde_json::Value) -> Option<OrderId> {
    let candidates = [
        body.get("orderId"),
        body.get("_id"),
        body.get("order").and_then(|o| o.get("_id")),
    ];
    candidates
        .into_iter()
        .flatten()
        .find_map(|v| v.as_str())
        .map(OrderId::from)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_order_id_shapes() {
        let flat = serde_json::json!({"orderId": "o1"});
        let nested = serde_json::json!({"order": {"_id": "o2"}});
        assert_eq!(order_id_from(&flat).unwrap().as_str(), "o1");
        assert_eq!(order_id_from(&nested).unwrap().as_str(), "o2");
        assert!(order_id_from(&serde_json::Value::Null).is_none());
    }
}
