//! Commerce error types.

use thiserror::Error;

/// Errors raised while building or validating storefront records.
#[derive(Error, Debug, Clone, PartialEq)]
pub enum CommerceError {
    /// Page numbers start at 1.
    #[error("Invalid page: {0}")]
    InvalidPage(u32),

    /// Page size outside the preset list.
    #[error("Invalid page size {0}; expected one of {1:?}")]
    InvalidLimit(u32, &'static [u32]),

    /// Unknown sort field or order.
    #[error("Invalid sort option: {0}")]
    InvalidSort(String),

    /// Invalid quantity.
    #[error("Invalid quantity: {0}")]
    InvalidQuantity(i64),

    /// Checkout attempted with nothing in the cart.
    #[error("Cart is empty")]
    EmptyCart,

    /// Item not in cart.
    #[error("Item not in cart: {0}")]
    ItemNotInCart(String),

    /// Validation error.
    #[error("Validation error: {0}")]
    ValidationError(String),

    /// Serialization error.
    #[error("Serialization error: {0}")]
    SerializationError(String),
}

impl From<serde_json::Error> for CommerceError {
    fn from(e: serde_json::Error) -> Self {
        CommerceError::SerializationError(e.to_string())
    }
}
