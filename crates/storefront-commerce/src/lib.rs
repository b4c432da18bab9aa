//! Domain records for the storefront client.
//!
//! This crate holds the types every other storefront crate speaks in. It does no I/O:
//!
//! - **Catalog**: Product records, admin product drafts, image uploads
//! - **Search**: The listing filter set, sort options, paginated listing pages
//! - **Cart**: Cart items, the server cart, add-to-cart requests
//! - **Checkout**: Order requests and confirmations
//!
//! # Example
//!
//! ```rust,ignore
//! use storefront_commerce::prelude::*;
//!
//! let mut filters = FilterSet::default();
//! filters.set_page(3)?;
//! filters.apply(FilterChange::Category("books".to_string()));
//! assert_eq!(filters.page, Some(1));
//!
//! // Wire form, empty values omitted
//! let pairs = filters.query_pairs();
//! ```

pub mod error;
pub mod ids;

pub mod catalog;
pub mod cart;
pub mod checkout;
pub mod search;

pub use error::CommerceError;
pub use ids::*;

/// Prelude for convenient imports.
pub mod prelude {
    pub use crate::error::CommerceError;
    pub use crate::ids::*;

    // Catalog
    pub use crate::catalog::{CategoryRef, DashboardStats, ImageFile, Product, ProductDraft};

    // Cart
    pub use crate::cart::{AddToCartRequest, CartItem, CartLine, ServerCart};

    // Checkout
    pub use crate::checkout::{OrderConfirmation, OrderRequest, OrderStatus, PaymentMethod};

    // Search
    pub use crate::search::{
        FilterChange, FilterSet, ProductPage, SortBy, SortOrder, SortSpec, LIMIT_PRESETS,
    };
}
