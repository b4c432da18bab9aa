//! Checkout module.
//!
//! Checkout is simulated: orders are confirmed immediately with the demo payment method.

mod order;

pub use order::{OrderConfirmation, OrderRequest, OrderStatus, PaymentMethod};
