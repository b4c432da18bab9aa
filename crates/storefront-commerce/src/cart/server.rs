//! The cart as held by the remote API.

use crate::catalog::Product;
use crate::ids::CartItemId;
use serde::{Deserialize, Serialize};

/// One line of the server cart.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CartLine {
    #[serde(rename = "_id")]
    pub id: CartItemId,
    /// Populated product; may be missing if the product was deleted.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub product: Option<Product>,
    pub quantity: u32,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub size: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub colour: Option<String>,
}

impl CartLine {
    /// Unit price times quantity; zero when the product is gone.
    pub fn line_total(&self) -> f64 {
        self.product
            .as_ref()
            .map(|p| p.price * f64::from(self.quantity))
            .unwrap_or(0.0)
    }
}

/// Body of `GET /cart`.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ServerCart {
    #[serde(default)]
    pub items: Vec<CartLine>,
    #[serde(default)]
    pub total_items: u32,
    #[serde(default)]
    pub total_amount: f64,
}

impl ServerCart {
    /// The cart after `DELETE /cart`.
    pub fn empty() -> Self {
        Self::default()
    }

    /// Whether there is nothing to check out.
    pub fn is_empty(&self) -> bool {
        self.items.is_empty() || self.total_items == 0
    }

    /// Find a line by id.
    pub fn line(&self, id: &CartItemId) -> Option<&CartLine> {
        self.items.iter().find(|l| &l.id == id)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_decode_server_cart() {
        let cart: ServerCart = serde_json::from_str(
            r#"{"items": [{"_id": "l1", "quantity": 3, "size": "md",
                 "product": {"_id": "p1", "name": "Mug", "price": 4.5}}],
                "totalItems": 3, "totalAmount": 13.5}"#,
        )
        .unwrap();

        assert!(!cart.is_empty());
        let line = cart.line(&CartItemId::new("l1")).unwrap();
        assert_eq!(line.line_total(), 13.5);
    }

    #[test]
    fn test_missing_product_totals_zero() {
        let line: CartLine = serde_json::from_str(r#"{"_id": "l2", "quantity": 2}"#).unwrap();
        assert_eq!(line.line_total(), 0.0);
    }

    #[test]
    fn test_empty() {
        assert!(ServerCart::empty().is_empty());
        let cart: ServerCart = serde_json::from_str("{}").unwrap();
        assert!(cart.is_empty());
    }
}
