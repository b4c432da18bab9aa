//! Cart items and add-to-cart requests.

use crate::cart::CartLine;
use crate::catalog::Product;
use crate::error::CommerceError;
use crate::ids::{CartItemId, ProductId};
use serde::{Deserialize, Serialize};

/// A cart item as mirrored in local storage for the cart badge.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CartItem {
    /// Item identity.
    #[serde(rename = "_id")]
    pub id: CartItemId,
    pub product_id: ProductId,
    pub size: String,
    pub colour: String,
    /// Always at least 1.
    pub quantity: u32,
    /// Product name, for display.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub name: Option<String>,
}

impl CartItem {
    /// Create a mirror item. Rejects a zero quantity.
    pub fn new(
        id: impl Into<CartItemId>,
        product_id: impl Into<ProductId>,
        size: impl Into<String>,
        colour: impl Into<String>,
        quantity: u32,
    ) -> Result<Self, CommerceError> {
        if quantity == 0 {
            return Err(CommerceError::InvalidQuantity(0));
        }
        Ok(Self {
            id: id.into(),
            product_id: product_id.into(),
            size: size.into(),
            colour: colour.into(),
            quantity,
            name: None,
        })
    }

    /// Mirror a line of the server cart.
    pub fn from_line(line: &CartLine) -> Option<Self> {
        let product = line.product.as_ref()?;
        Some(Self {
            id: line.id.clone(),
            product_id: product.id.clone(),
            size: line.size.clone().unwrap_or_else(|| product.default_size().to_string()),
            colour: line.colour.clone().unwrap_or_else(|| product.default_colour()),
            quantity: line.quantity.max(1),
            name: Some(product.name.clone()),
        })
    }
}

/// Body of `POST /cart`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct AddToCartRequest {
    pub product_id: ProductId,
    pub quantity: u32,
    pub size: String,
    pub colour: String,
}

impl AddToCartRequest {
    /// Create a request with an explicit size and colour.
    pub fn new(
        product_id: impl Into<ProductId>,
        quantity: u32,
        size: impl Into<String>,
        colour: impl Into<String>,
    ) -> Result<Self, CommerceError> {
        if quantity == 0 {
            return Err(CommerceError::InvalidQuantity(0));
        }
        let size = size.into();
        if size.is_empty() {
            return Err(CommerceError::ValidationError(
                "please select a size".to_string(),
            ));
        }
        Ok(Self {
            product_id: product_id.into(),
            quantity,
            size,
            colour: colour.into(),
        })
    }

    /// Quick add from a listing card: one unit, first size, first colour.
    pub fn for_product(product: &Product) -> Self {
        Self {
            product_id: product.id.clone(),
            quantity: 1,
            size: product.default_size().to_string(),
            colour: product.default_colour(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn product(json: &str) -> Product {
        serde_json::from_str(json).unwrap()
    }

    #[test]
    fn test_quick_add_defaults() {
        let req = AddToCartRequest::for_product(&product(r#"{"_id": "p1"}"#));
        assert_eq!(req.quantity, 1);
        assert_eq!(req.size, "md");
        assert_eq!(req.colour, "default");
    }

    #[test]
    fn test_quick_add_uses_first_options() {
        let req = AddToCartRequest::for_product(&product(
            r#"{"_id": "p1", "size": ["xl", "sm"], "colours": ["teal", "red"]}"#,
        ));
        assert_eq!(req.size, "xl");
        assert_eq!(req.colour, "teal");
    }

    #[test]
    fn test_request_wire_names() {
        let req = AddToCartRequest::new("p9", 2, "lg", "black").unwrap();
        let json = serde_json::to_value(&req).unwrap();
        assert_eq!(json["productId"], "p9");
        assert_eq!(json["quantity"], 2);
    }

    #[test]
    fn test_request_validation() {
        assert!(AddToCartRequest::new("p9", 0, "lg", "black").is_err());
        assert!(AddToCartRequest::new("p9", 1, "", "black").is_err());
    }

    #[test]
    fn test_item_rejects_zero_quantity() {
        assert_eq!(
            CartItem::new("i1", "p1", "md", "red", 0),
            Err(CommerceError::InvalidQuantity(0))
        );
    }

    #[test]
    fn test_item_round_trips_storage_shape() {
        let item = CartItem::new("i1", "p1", "md", "red", 2).unwrap();
        let json = serde_json::to_string(&item).unwrap();
        assert!(json.contains(r#""_id":"i1""#));
        assert!(json.contains(r#""productId":"p1""#));
    }
}
