//! Admin dashboard statistics.

use crate::{ProductService, StorefrontError};
use storefront_commerce::catalog::DashboardStats;
use storefront_commerce::search::FilterSet;

/// Page size used to pull the whole catalog for the dashboard.
pub const STATS_FETCH_LIMIT: u32 = 1000;

#[derive(Debug, Clone)]
pub struct StatsService {
    products: ProductService,
}

impl StatsService {
    pub fn new(products: ProductService) -> Self {
        Self { products }
    }

    /// Fetch up to [`STATS_FETCH_LIMIT`] products and summarise them.
    pub async fn dashboard(&self) -> Result<DashboardStats, StorefrontError> {
        self.products.require_admin()?;
        let page = self
            .products
            .get_products(&FilterSet::with_limit(STATS_FETCH_LIMIT))
            .await?;
        Ok(DashboardStats::from_products(&page.products))
    }
}
