//! The product listing filter set.
//!
//! A [`FilterSet`] is the flat set of query parameters behind a listing request.
//! Unset and empty values never reach the wire, and two filter sets are equal exactly
//! when their wire forms are equal, which is also what the listing cache keys on.

use crate::error::CommerceError;
use crate::search::{SortBy, SortOrder, SortSpec};
use serde::{Deserialize, Serialize};

/// Page sizes offered by the listing views.
pub const LIMIT_PRESETS: &[u32] = &[10, 12, 24, 25, 50];

/// Page size of the default storefront listing.
pub const DEFAULT_PAGE_SIZE: u32 = 12;

/// A single non-pagination filter edit.
#[derive(Debug, Clone, PartialEq)]
pub enum FilterChange {
    Category(String),
    Tag(String),
    MinPrice(Option<f64>),
    MaxPrice(Option<f64>),
    InStock(Option<bool>),
    IsTrending(Option<bool>),
    SortBy(SortBy),
    Order(SortOrder),
    /// Field and order at once (admin sort select).
    Sort(SortSpec),
    /// Committed search text; trimmed on apply.
    Search(String),
}

/// Query parameters for `GET /products`.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct FilterSet {
    pub page: Option<u32>,
    pub limit: Option<u32>,
    pub sort_by: Option<SortBy>,
    pub order: Option<SortOrder>,
    #[serde(default)]
    pub category: String,
    #[serde(default)]
    pub tag: String,
    pub min_price: Option<f64>,
    pub max_price: Option<f64>,
    pub in_stock: Option<bool>,
    pub is_trending: Option<bool>,
    #[serde(default)]
    pub search: String,
}

impl Default for FilterSet {
    /// The storefront's initial listing: first page of 12, newest first.
    fn default() -> Self {
        Self {
            page: Some(1),
            limit: Some(DEFAULT_PAGE_SIZE),
            sort_by: Some(SortBy::CreatedAt),
            order: Some(SortOrder::Desc),
            ..Self::empty()
        }
    }
}

impl PartialEq for FilterSet {
    fn eq(&self, other: &Self) -> bool {
        self.query_pairs() == other.query_pairs()
    }
}

impl FilterSet {
    /// A sparse filter set with nothing set; the server applies its own defaults.
    pub fn empty() -> Self {
        Self {
            page: None,
            limit: None,
            sort_by: None,
            order: None,
            category: String::new(),
            tag: String::new(),
            min_price: None,
            max_price: None,
            in_stock: None,
            is_trending: None,
            search: String::new(),
        }
    }

    /// A sparse filter set carrying only a page size (no preset check).
    pub fn with_limit(limit: u32) -> Self {
        Self {
            limit: Some(limit),
            ..Self::empty()
        }
    }

    /// Apply a filter edit. Every edit returns the listing to its first page.
    pub fn apply(&mut self, change: FilterChange) {
        match change {
            FilterChange::Category(v) => self.category = v,
            FilterChange::Tag(v) => self.tag = v,
            FilterChange::MinPrice(v) => self.min_price = v,
            FilterChange::MaxPrice(v) => self.max_price = v,
            FilterChange::InStock(v) => self.in_stock = v,
            FilterChange::IsTrending(v) => self.is_trending = v,
            FilterChange::SortBy(v) => self.sort_by = Some(v),
            FilterChange::Order(v) => self.order = Some(v),
            FilterChange::Sort(spec) => {
                self.sort_by = Some(spec.by);
                self.order = Some(spec.order);
            }
            FilterChange::Search(v) => self.search = v.trim().to_string(),
        }
        self.page = Some(1);
    }

    /// Builder form of [`FilterSet::apply`].
    pub fn with(mut self, change: FilterChange) -> Self {
        self.apply(change);
        self
    }

    /// Move to an explicit page. Does not touch any other field.
    pub fn set_page(&mut self, page: u32) -> Result<(), CommerceError> {
        if page == 0 {
            return Err(CommerceError::InvalidPage(page));
        }
        self.page = Some(page);
        Ok(())
    }

    /// Change the page size to one of [`LIMIT_PRESETS`]. Keeps the current page.
    pub fn set_limit(&mut self, limit: u32) -> Result<(), CommerceError> {
        if !LIMIT_PRESETS.contains(&limit) {
            return Err(CommerceError::InvalidLimit(limit, LIMIT_PRESETS));
        }
        self.limit = Some(limit);
        Ok(())
    }

    /// Current page, treating unset as the first.
    pub fn current_page(&self) -> u32 {
        self.page.unwrap_or(1)
    }

    /// Whether anything beyond the default listing is in effect.
    pub fn has_active_filters(&self) -> bool {
        !self.search.is_empty()
            || self.min_price.is_some()
            || self.max_price.is_some()
            || !self.category.is_empty()
            || !self.tag.is_empty()
            || self.sort_by.unwrap_or_default() != SortBy::CreatedAt
            || self.order.unwrap_or_default() != SortOrder::Desc
    }

    /// Wire pairs in canonical order, with unset and empty values omitted.
    pub fn query_pairs(&self) -> Vec<(&'static str, String)> {
        let mut pairs = Vec::new();

        if let Some(page) = self.page {
            pairs.push(("page", page.to_string()));
        }
        if let Some(limit) = self.limit {
            pairs.push(("limit", limit.to_string()));
        }
        if let Some(sort_by) = self.sort_by {
            pairs.push(("sortBy", sort_by.as_str().to_string()));
        }
        if let Some(order) = self.order {
            pairs.push(("order", order.as_str().to_string()));
        }
        push_text(&mut pairs, "category", &self.category);
        push_text(&mut pairs, "tag", &self.tag);
        if let Some(min) = self.min_price {
            pairs.push(("minPrice", min.to_string()));
        }
        if let Some(max) = self.max_price {
            pairs.push(("maxPrice", max.to_string()));
        }
        if let Some(in_stock) = self.in_stock {
            pairs.push(("inStock", in_stock.to_string()));
        }
        if let Some(trending) = self.is_trending {
            pairs.push(("isTrending", trending.to_string()));
        }
        push_text(&mut pairs, "search", &self.search);

        pairs
    }

    /// Canonical cache key: the serialized wire pairs.
    pub fn cache_key(&self) -> String {
        let pairs = self.query_pairs();
        let pairs: Vec<[&str; 2]> = pairs.iter().map(|(k, v)| [*k, v.as_str()]).collect();
        // Serializing string pairs cannot fail.
        serde_json::to_string(&pairs).unwrap_or_default()
    }
}

fn push_text(pairs: &mut Vec<(&'static str, String)>, key: &'static str, value: &str) {
    if !value.is_empty() {
        pairs.push((key, value.to_string()));
    }
}
