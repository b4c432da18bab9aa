//! Order requests and confirmations.

use crate::cart::{CartLine, ServerCart};
use crate::error::CommerceError;
use crate::ids::OrderId;
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// How an order is paid.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, Default)]
#[serde(rename_all = "lowercase")]
pub enum PaymentMethod {
    /// No real payment is taken.
    #[default]
    Demo,
}

/// Order status.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, Default)]
#[serde(rename_all = "lowercase")]
pub enum OrderStatus {
    Pending,
    #[default]
    Confirmed,
}

impl OrderStatus {
    pub fn as_str(&self) -> &'static str {
        match self {
            OrderStatus::Pending => "pending",
            OrderStatus::Confirmed => "confirmed",
        }
    }
}

/// Body of `POST /checkout`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct OrderRequest {
    pub items: Vec<CartLine>,
    pub total_amount: f64,
    pub payment_method: PaymentMethod,
    pub status: OrderStatus,
}

impl OrderRequest {
    /// Build a demo order for everything in the cart.
    pub fn from_cart(cart: &ServerCart) -> Result<Self, CommerceError> {
        if cart.is_empty() {
            return Err(CommerceError::EmptyCart);
        }
        Ok(Self {
            items: cart.items.clone(),
            total_amount: cart.total_amount,
            payment_method: PaymentMethod::Demo,
            status: OrderStatus::Confirmed,
        })
    }

    /// Number of units ordered.
    pub fn unit_count(&self) -> u32 {
        self.items.iter().map(|l| l.quantity).sum()
    }
}

/// What the client shows after an order is placed.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct OrderConfirmation {
    /// Server order id, when the API returns one.
    pub order_id: Option<OrderId>,
    pub status: OrderStatus,
    pub total_amount: f64,
    pub item_count: u32,
    pub placed_at: DateTime<Utc>,
}

impl OrderConfirmation {
    pub fn new(request: &OrderRequest, order_id: Option<OrderId>, placed_at: DateTime<Utc>) -> Self {
        Self {
            order_id,
            status: request.status,
            total_amount: request.total_amount,
            item_count: request.unit_count(),
            placed_at,
        }
    }
}
