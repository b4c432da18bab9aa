//! # Storefront SDK
//!
//! Typed client for the storefront REST API: product browsing with a short-lived
//! listing cache, the cart and its local mirror, demo checkout, and the auth session.
//!
//! ## Quick Start
//!
//! ```rust,ignore
//! use storefront_sdk::prelude::*;
//!
//! let config = StorefrontConfig::default().with_env_overrides();
//! let shop = Storefront::from_config(&config, Cache::memory())?;
//!
//! let mut listing = shop.listing();
//! listing.apply(FilterChange::Category("hats".to_string()));
//! let page = shop.products.get_products(listing.filters()).await?;
//!
//! shop.auth.login(&LoginCredentials::new("ada@example.com", "secret")).await?;
//! shop.cart.add_item(&AddToCartRequest::for_product(&page.products[0])).await?;
//! let confirmation = shop.checkout.place_order().await?;
//! ```
//!
//! Services talk to the network through [`storefront_data::Transport`]; tests swap in
//! an in-memory transport and [`storefront_cache::MemoryStore`].

mod auth;
mod cart;
mod checkout;
mod client;
mod config;
mod error;
mod listing;
mod products;
mod stats;

pub mod prelude;

pub use auth::AuthService;
pub use cart::{CartMirror, CartService, CART_ITEMS_KEY};
pub use checkout::CheckoutService;
pub use client::ApiClient;
pub use config::{
    ApiConfig, CacheConfig, ListingConfig, StorageConfig, StorefrontConfig, API_URL_ENV,
};
pub use error::StorefrontError;
pub use listing::{Debouncer, ProductListing, DEFAULT_DEBOUNCE};
pub use products::{draft_form, ProductService, CACHE_BUST_WINDOW, LAST_CACHE_CLEAR_KEY};
pub use stats::{StatsService, STATS_FETCH_LIMIT};

// Re-export the underlying crates
pub use storefront_auth;
pub use storefront_cache;
pub use storefront_commerce;
pub use storefront_data;

use std::sync::Arc;
use std::time::Duration;
use storefront_cache::{Cache, Clock, SystemClock};
use storefront_commerce::search::FilterSet;

/// Every service, wired to one API client and one storage.
#[derive(Debug, Clone)]
pub struct Storefront {
    pub products: ProductService,
    pub cart: CartService,
    pub checkout: CheckoutService,
    pub auth: AuthService,
    pub stats: StatsService,
    storage: Cache,
    page_size: u32,
    debounce: Duration,
}

impl Storefront {
    /// Wire services over an existing client.
    pub fn new(api: ApiClient, storage: Cache, clock: Arc<dyn Clock>, config: &StorefrontConfig) -> Self {
        let products =
            ProductService::with_ttl(api.clone(), storage.clone(), clock, config.cache_ttl());
        Self {
            cart: CartService::new(api.clone()),
            checkout: CheckoutService::new(api.clone()),
            auth: AuthService::new(api),
            stats: StatsService::new(products.clone()),
            products,
            storage,
            page_size: config.listing.page_size,
            debounce: config.debounce(),
        }
    }

    /// Build a network-backed storefront from configuration.
    pub fn from_config(config: &StorefrontConfig, storage: Cache) -> Result<Self, StorefrontError> {
        config.validate()?;
        let api = ApiClient::from_config(config, storage.clone())?;
        Ok(Self::new(api, storage, Arc::new(SystemClock), config))
    }

    /// The cart mirror, restored from storage.
    pub fn cart_mirror(&self) -> CartMirror {
        CartMirror::load(self.storage.clone())
    }

    /// A fresh listing state using the configured page size and debounce.
    pub fn listing(&self) -> ProductListing {
        let defaults = FilterSet {
            limit: Some(self.page_size),
            ..FilterSet::default()
        };
        ProductListing::with_defaults(defaults, self.debounce)
    }
}
