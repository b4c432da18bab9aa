//! Admin dashboard statistics.

use crate::catalog::Product;
use serde::{Deserialize, Serialize};

/// Counts shown on the admin dashboard.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct DashboardStats {
    pub total_products: usize,
    /// No orders endpoint exists yet; always zero.
    pub total_orders: usize,
    pub low_stock_products: usize,
    pub trending_products: usize,
}

impl DashboardStats {
    /// Derive stats from a product listing.
    pub fn from_products(products: &[Product]) -> Self {
        Self {
            total_products: products.len(),
            total_orders: 0,
            low_stock_products: products.iter().filter(|p| p.is_low_stock()).count(),
            trending_products: products.iter().filter(|p| p.is_trending).count(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_counts() {
        let products: Vec<Product> = serde_json::from_str(
            r#"[
                {"_id": "a", "totalStock": 3, "isTrending": true},
                {"_id": "b", "totalStock": 0},
                {"_id": "c", "totalStock": 50, "isTrending": true},
                {"_id": "d", "totalStock": 9}
            ]"#,
        )
        .unwrap();

        let stats = DashboardStats::from_products(&products);
        assert_eq!(stats.total_products, 4);
        assert_eq!(stats.low_stock_products, 2);
        assert_eq!(stats.trending_products, 2);
        assert_eq!(stats.total_orders, 0);
    }
}
