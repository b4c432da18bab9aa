//! Listing results.

use crate::catalog::Product;
use serde::{Deserialize, Serialize};

/// One page of `GET /products`.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ProductPage {
    #[serde(default)]
    pub products: Vec<Product>,
    #[serde(default = "default_total_pages")]
    pub total_pages: u32,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub current_page: Option<u32>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub total_products: Option<u64>,
}

fn default_total_pages() -> u32 {
    1
}

impl ProductPage {
    /// Whether the page holds no products.
    pub fn is_empty(&self) -> bool {
        self.products.is_empty()
    }

    /// Whether a page after `page` exists.
    pub fn has_next(&self, page: u32) -> bool {
        page < self.total_pages
    }

    /// Whether a page before `page` exists.
    pub fn has_previous(&self, page: u32) -> bool {
        page > 1
    }
}
