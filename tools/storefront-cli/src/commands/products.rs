//! Catalog browsing commands.

use anyhow::Result;
use storefront_sdk::storefront_commerce::prelude::*;
use storefront_sdk::{ProductListing, Storefront};
use tokio::io::{AsyncBufReadExt, BufReader};

use super::{user_error, FilterArgs, ProductsArgs, ProductsCommand};
use crate::context::Context;
use crate::output::{format_price, stock_badge};

/// Run the products command.
pub async fn run(args: ProductsArgs, ctx: &Context) -> Result<()> {
    let shop = ctx.storefront()?;
    match args.command {
        Some(ProductsCommand::List { filters }) => list(&filters, &shop, ctx).await,
        None => list(&FilterArgs::default(), &shop, ctx).await,
        Some(ProductsCommand::Show { slug }) => show_by_slug(&slug, &shop, ctx).await,
        Some(ProductsCommand::Get { id }) => show_by_id(&id, &shop, ctx).await,
        Some(ProductsCommand::Search) => search(&shop, ctx).await,
    }
}

/// Build listing state from command-line filters.
///
/// Filter edits go first since each one resets the page.
pub(crate) fn listing_from(args: &FilterArgs, shop: &Storefront) -> Result<ProductListing> {
    let mut listing = shop.listing();

    if let Some(category) = &args.category {
        listing.apply(FilterChange::Category(category.clone()));
    }
    if let Some(tag) = &args.tag {
        listing.apply(FilterChange::Tag(tag.clone()));
    }
    if args.min_price.is_some() {
        listing.apply(FilterChange::MinPrice(args.min_price));
    }
    if args.max_price.is_some() {
        listing.apply(FilterChange::MaxPrice(args.max_price));
    }
    if args.in_stock {
        listing.apply(FilterChange::InStock(Some(true)));
    }
    if args.trending {
        listing.apply(FilterChange::IsTrending(Some(true)));
    }
    if let Some(sort) = &args.sort {
        listing.apply(FilterChange::Sort(sort.parse::<SortSpec>()?));
    }
    if let Some(search) = &args.search {
        listing.apply(FilterChange::Search(search.clone()));
    }

    if let Some(limit) = args.limit {
        listing.set_limit(limit)?;
    }
    if let Some(page) = args.page {
        listing.set_page(page)?;
    }

    Ok(listing)
}

async fn list(args: &FilterArgs, shop: &Storefront, ctx: &Context) -> Result<()> {
    let listing = listing_from(args, shop)?;
    if shop.products.refresh_if_recently_cleared()? {
        ctx.output.debug("Catalog changed recently, skipping cached listings");
    }
    show_listing(listing.filters(), shop, ctx).await
}

async fn show_listing(filters: &FilterSet, shop: &Storefront, ctx: &Context) -> Result<()> {
    let spinner = ctx.output.spinner("Loading products...");
    let result = shop.products.get_products(filters).await;
    spinner.finish_and_clear();
    let page = result.map_err(|e| user_error(e, "Failed to fetch products"))?;

    if ctx.output.is_json() {
        ctx.output.json(&page);
        return Ok(());
    }

    if page.is_empty() {
        ctx.output.info("No products found.");
        if filters.has_active_filters() {
            ctx.output.info("Try clearing some filters.");
        }
        return Ok(());
    }

    let widths = [28, 10, 14, 20];
    ctx.output.table_row(&["NAME", "PRICE", "STOCK", "SLUG"], &widths);
    for product in &page.products {
        let price = format_price(product.price);
        let stock = stock_badge(product);
        let slug = product.slug.as_deref().unwrap_or("-");
        let name = if product.is_trending {
            format!("{} *", product.name)
        } else {
            product.name.clone()
        };
        ctx.output.table_row(&[&name, &price, &stock, slug], &widths);
    }

    print_pagination(&page, filters, ctx);
    Ok(())
}

pub(crate) fn print_pagination(page: &ProductPage, filters: &FilterSet, ctx: &Context) {
    let current = filters.current_page();
    let mut footer = format!("Page {} of {}", current, page.total_pages);
    if let Some(total) = page.total_products {
        footer.push_str(&format!(" ({} products)", total));
    }
    if page.has_next(current) {
        footer.push_str(&format!(" - next: --page {}", current + 1));
    }
    ctx.output.info("");
    ctx.output.info(&footer);
}

async fn show_by_slug(slug: &str, shop: &Storefront, ctx: &Context) -> Result<()> {
    let product = shop
        .products
        .get_product_by_slug(slug)
        .await
        .map_err(|e| user_error(e, "Product not found"))?;
    print_product(&product, ctx);
    Ok(())
}

async fn show_by_id(id: &str, shop: &Storefront, ctx: &Context) -> Result<()> {
    let product = shop
        .products
        .get_product_by_id(&ProductId::new(id))
        .await
        .map_err(|e| user_error(e, "Product not found"))?;
    print_product(&product, ctx);
    Ok(())
}

pub(crate) fn print_product(product: &Product, ctx: &Context) {
    if ctx.output.is_json() {
        ctx.output.json(product);
        return;
    }

    ctx.output.header(&product.name);
    ctx.output.kv("id", product.id.as_str());
    ctx.output.kv("price", &format_price(product.price));
    ctx.output.kv("stock", &stock_badge(product));
    if let Some(category) = &product.category {
        ctx.output.kv("category", category.label());
    }
    if !product.size.is_empty() {
        ctx.output.kv("sizes", &product.size.join(", "));
    }
    let colours = product.colour_options();
    if !colours.is_empty() {
        ctx.output.kv("colours", &colours.join(", "));
    }
    if !product.tags.is_empty() {
        ctx.output.kv("tags", &product.tags.join(", "));
    }
    if product.is_trending {
        ctx.output.kv("trending", "yes");
    }
    if let Some(description) = &product.description {
        ctx.output.info("");
        ctx.output.info(description);
    }
    for image in &product.images {
        ctx.output.list_item(image);
    }
}

/// Read search text line by line; results refresh once typing pauses.
async fn search(shop: &Storefront, ctx: &Context) -> Result<()> {
    let mut listing = shop.listing();
    let mut lines = BufReader::new(tokio::io::stdin()).lines();
    ctx.output.info("Type to search, one edit per line. Ctrl-D to finish.");

    loop {
        let pending = listing.has_pending_search();
        tokio::select! {
            line = lines.next_line() => match line? {
                Some(text) => listing.input_search(text),
                None => {
                    if listing.apply_pending_search() {
                        show_listing(listing.filters(), shop, ctx).await?;
                    }
                    return Ok(());
                }
            },
            Some(filters) = async { listing.next_search_commit().await.cloned() }, if pending => {
                show_listing(&filters, shop, ctx).await?;
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use storefront_sdk::storefront_cache::Cache;
    use storefront_sdk::StorefrontConfig;

    fn shop() -> Storefront {
        Storefront::from_config(&StorefrontConfig::default(), Cache::memory()).unwrap()
    }

    #[test]
    fn test_listing_from_flags() {
        let args = FilterArgs {
            page: Some(3),
            limit: Some(24),
            category: Some("hats".into()),
            sort: Some("price-asc".into()),
            in_stock: true,
            ..Default::default()
        };
        let listing = listing_from(&args, &shop()).unwrap();
        let filters = listing.filters();

        assert_eq!(filters.page, Some(3));
        assert_eq!(filters.limit, Some(24));
        assert_eq!(filters.category, "hats");
        assert_eq!(filters.sort_by, Some(SortBy::Price));
        assert_eq!(filters.order, Some(SortOrder::Asc));
        assert_eq!(filters.in_stock, Some(true));
    }

    #[test]
    fn test_listing_from_uses_configured_page_size() {
        let listing = listing_from(&FilterArgs::default(), &shop()).unwrap();
        assert_eq!(listing.filters().limit, Some(12));
        assert_eq!(listing.filters().current_page(), 1);
    }

    #[test]
    fn test_listing_from_rejects_bad_input() {
        let bad_limit = FilterArgs {
            limit: Some(7),
            ..Default::default()
        };
        assert!(listing_from(&bad_limit, &shop()).is_err());

        let bad_sort = FilterArgs {
            sort: Some("colour-up".into()),
            ..Default::default()
        };
        assert!(listing_from(&bad_sort, &shop()).is_err());
    }
}
