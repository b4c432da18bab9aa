//! Admin dashboard counters.

use anyhow::Result;

use super::user_error;
use crate::context::Context;

/// Run the stats command.
pub async fn run(ctx: &Context) -> Result<()> {
    let shop = ctx.storefront()?;

    let spinner = ctx.output.spinner("Loading dashboard...");
    let result = shop.stats.dashboard().await;
    spinner.finish_and_clear();
    let stats = result.map_err(|e| user_error(e, "Failed to load dashboard"))?;

    if ctx.output.is_json() {
        ctx.output.json(&stats);
        return Ok(());
    }

    ctx.output.header("Dashboard");
    ctx.output.kv("products", &stats.total_products.to_string());
    ctx.output.kv("orders", &stats.total_orders.to_string());
    ctx.output.kv("low stock", &stats.low_stock_products.to_string());
    ctx.output.kv("trending", &stats.trending_products.to_string());
    Ok(())
}
