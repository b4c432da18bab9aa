//! Search module.
//!
//! Contains the listing filter contract, sort options, and paginated results.

mod filter;
mod results;
mod sort;

pub use filter::{FilterChange, FilterSet, DEFAULT_PAGE_SIZE, LIMIT_PRESETS};
pub use results::ProductPage;
pub use sort::{SortBy, SortOrder, SortSpec};
