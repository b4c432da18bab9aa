//! Prelude for convenient imports.
//!
//! ```rust,ignore
//! use storefront_sdk::prelude::*;
//! ```

pub use crate::{
    ApiClient, AuthService, CartMirror, CartService, CheckoutService, ProductListing,
    ProductService, StatsService, Storefront, StorefrontConfig, StorefrontError,
};

pub use storefront_auth::{AuthUser, LoginCredentials, Registration, Role};
pub use storefront_cache::{Cache, Clock, ManualClock, MemoryStore, SystemClock};
pub use storefront_commerce::prelude::*;
pub use storefront_data::{FetchClient, Transport};
