//! Cart module.
//!
//! Contains the locally mirrored cart item, the server cart, and add-to-cart requests.

mod item;
mod server;

pub use item::{AddToCartRequest, CartItem};
pub use server::{CartLine, ServerCart};
