//! Catalog module.
//!
//! Contains the product record, the admin product draft and its upload encoding,
//! and dashboard statistics derived from a listing.

mod draft;
mod product;
mod stats;

pub use draft::{DraftField, ImageFile, ProductDraft, IMAGE_FIELD};
pub use product::{CategoryRef, Product, DEFAULT_COLOUR, DEFAULT_SIZE, LOW_STOCK_THRESHOLD};
pub use stats::DashboardStats;
