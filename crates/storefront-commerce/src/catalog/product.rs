//! Product record as served by the remote API.

use crate::ids::ProductId;
use serde::{Deserialize, Serialize};

/// Size picked when a product lists no sizes.
pub const DEFAULT_SIZE: &str = "md";

/// Colour picked when a product lists no colours.
pub const DEFAULT_COLOUR: &str = "default";

/// Stock below this (and above zero) counts as low.
pub const LOW_STOCK_THRESHOLD: i64 = 10;

/// A product's category as the API sends it.
///
/// Listings carry the bare category string; populated lookups carry the category
/// document instead.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum CategoryRef {
    Plain(String),
    Populated {
        #[serde(rename = "_id", default, skip_serializing_if = "Option::is_none")]
        id: Option<String>,
        #[serde(default, skip_serializing_if = "Option::is_none")]
        name: Option<String>,
    },
}

impl CategoryRef {
    /// The value an edit form submits back: the id of a populated category.
    pub fn form_value(&self) -> &str {
        match self {
            CategoryRef::Plain(value) => value,
            CategoryRef::Populated { id, name } => {
                id.as_deref().or(name.as_deref()).unwrap_or_default()
            }
        }
    }

    /// Human-readable label.
    pub fn label(&self) -> &str {
        match self {
            CategoryRef::Plain(value) => value,
            CategoryRef::Populated { id, name } => {
                name.as_deref().or(id.as_deref()).unwrap_or_default()
            }
        }
    }
}

/// A product in the catalog.
///
/// The shape is server-defined; every field except the id is defaulted so that
/// partially populated records (older products, trimmed listing payloads) still decode.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct Product {
    /// Server identity.
    #[serde(rename = "_id")]
    pub id: ProductId,
    /// Display name.
    #[serde(default)]
    pub name: String,
    /// URL slug for the public detail route.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub slug: Option<String>,
    /// Long description.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
    /// Unit price.
    #[serde(default)]
    pub price: f64,
    /// Category, bare or populated.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub category: Option<CategoryRef>,
    /// Free-form tags.
    #[serde(default)]
    pub tags: Vec<String>,
    /// Available sizes.
    #[serde(default)]
    pub size: Vec<String>,
    /// Available colours.
    #[serde(default)]
    pub colours: Vec<String>,
    /// Legacy single colour, still present on older records.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub colour: Option<String>,
    /// Image URLs.
    #[serde(default)]
    pub images: Vec<String>,
    /// Units in stock.
    #[serde(default)]
    pub total_stock: i64,
    /// Explicit stock flag set by admins.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub in_stock: Option<bool>,
    /// Trending flag.
    #[serde(default)]
    pub is_trending: bool,
    /// Soft-delete flag; absent means active.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub is_active: Option<bool>,
    /// Average rating.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub rating: Option<f64>,
    /// Number of reviews.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub review_count: Option<u32>,
    /// Creation timestamp (ISO 8601, as sent).
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub created_at: Option<String>,
}

impl Product {
    /// Whether any units are in stock.
    pub fn is_available(&self) -> bool {
        self.total_stock > 0
    }

    /// Whether stock is positive but below [`LOW_STOCK_THRESHOLD`].
    pub fn is_low_stock(&self) -> bool {
        self.total_stock > 0 && self.total_stock < LOW_STOCK_THRESHOLD
    }

    /// Whether the product is listed (not soft-deleted).
    pub fn is_active(&self) -> bool {
        self.is_active != Some(false)
    }

    /// Colour options, falling back to the legacy single colour.
    pub fn colour_options(&self) -> Vec<String> {
        if !self.colours.is_empty() {
            return self.colours.clone();
        }
        self.colour.iter().cloned().collect()
    }

    /// Size preselected for quick add-to-cart.
    pub fn default_size(&self) -> &str {
        self.size.first().map(String::as_str).unwrap_or(DEFAULT_SIZE)
    }

    /// Colour preselected for quick add-to-cart.
    pub fn default_colour(&self) -> String {
        self.colour_options()
            .into_iter()
            .next()
            .unwrap_or_else(|| DEFAULT_COLOUR.to_string())
    }

    /// First image, if any.
    pub fn primary_image(&self) -> Option<&str> {
        self.images.first().map(String::as_str)
    }
}
