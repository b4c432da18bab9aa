//! Key-value persistence and query caching for the storefront client.
//!
//! Two concerns live here:
//!
//! - A persistence port ([`KeyValueStore`]) standing in for browser local storage, with
//!   an in-memory store for tests and a JSON file store for the CLI, wrapped by the typed
//!   [`Cache`] API with automatic JSON serialization.
//! - [`QueryCache`], a time-to-live memo of listing responses driven by an injected
//!   [`Clock`] so expiry can be tested deterministically.
//!
//! # Example
//!
//! ```rust,ignore
//! use storefront_cache::{Cache, ManualClock, QueryCache};
//! use std::sync::Arc;
//!
//! let cache = Cache::memory();
//! cache.set("cartItems", &items)?;
//! let items: Option<Vec<CartItem>> = cache.get("cartItems")?;
//!
//! let clock = Arc::new(ManualClock::new());
//! let listings = QueryCache::with_default_ttl(clock.clone());
//! listings.put("page=1", page);
//! clock.advance(std::time::Duration::from_secs(30));
//! assert!(listings.get("page=1").is_none());
//! ```

mod clock;
mod error;
mod kv;
mod query;

pub use clock::{Clock, ManualClock, SystemClock};
pub use error::CacheError;
pub use kv::{Cache, FileStore, KeyValueStore, MemoryStore};
pub use query::{QueryCache, DEFAULT_TTL};

/// Prelude for convenient imports.
pub mod prelude {
    pub use crate::{Cache, CacheError, Clock, KeyValueStore, QueryCache};
}
