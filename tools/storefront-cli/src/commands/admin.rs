//! Product management for admin accounts.

use anyhow::{bail, Result};
use dialoguer::Confirm;
use storefront_sdk::storefront_commerce::prelude::*;

use super::products::{listing_from, print_pagination, print_product};
use super::{read_image, user_error, AdminArgs, AdminCommand, DraftArgs};
use crate::context::Context;
use crate::output::format_price;

/// Page sizes offered by the admin table.
const ADMIN_PAGE_SIZES: &[u32] = &[10, 25, 50];

/// Run the admin command.
pub async fn run(args: AdminArgs, ctx: &Context) -> Result<()> {
    let shop = ctx.storefront()?;
    shop.products
        .require_admin()
        .map_err(|e| user_error(e, "Admin access required"))?;

    match args.command {
        AdminCommand::List { mut filters } => {
            let limit = filters.limit.unwrap_or(ADMIN_PAGE_SIZES[0]);
            if !ADMIN_PAGE_SIZES.contains(&limit) {
                bail!("Page size must be one of 10, 25 or 50");
            }
            filters.limit = Some(limit);

            let listing = listing_from(&filters, &shop)?;
            let spinner = ctx.output.spinner("Loading products...");
            let result = shop.products.get_products(listing.filters()).await;
            spinner.finish_and_clear();
            let page = result.map_err(|e| user_error(e, "Failed to fetch products"))?;

            if ctx.output.is_json() {
                ctx.output.json(&page);
                return Ok(());
            }
            if page.is_empty() {
                ctx.output.info("No products found.");
                return Ok(());
            }

            let widths = [26, 28, 10, 7, 9];
            ctx.output
                .table_row(&["ID", "NAME", "PRICE", "STOCK", "TRENDING"], &widths);
            for product in &page.products {
                let price = format_price(product.price);
                let stock = product.total_stock.to_string();
                let trending = if product.is_trending { "yes" } else { "" };
                ctx.output.table_row(
                    &[product.id.as_str(), &product.name, &price, &stock, trending],
                    &widths,
                );
            }
            print_pagination(&page, listing.filters(), ctx);
        }
        AdminCommand::Create { draft: args } => {
            let (Some(name), Some(price)) = (args.name.clone(), args.price) else {
                bail!("--name and --price are required");
            };
            let mut draft = ProductDraft::new(name, price);
            apply_args(&mut draft, args, ctx)?;

            let spinner = ctx.output.spinner("Creating product...");
            let result = shop.products.create_product(&draft).await;
            spinner.finish_and_clear();
            let product = result.map_err(|e| user_error(e, "Failed to create product"))?;

            ctx.output.success(&format!("Created {}", product.name));
            print_product(&product, ctx);
        }
        AdminCommand::Update { id, draft: args } => {
            let id = ProductId::new(id);
            let current = shop
                .products
                .get_product_by_id(&id)
                .await
                .map_err(|e| user_error(e, "Product not found"))?;
            let mut draft = ProductDraft::from_product(&current);
            apply_args(&mut draft, args, ctx)?;

            let spinner = ctx.output.spinner("Saving product...");
            let result = shop.products.update_product(&id, &draft).await;
            spinner.finish_and_clear();
            let product = result.map_err(|e| user_error(e, "Failed to update product"))?;

            ctx.output.success(&format!("Updated {}", product.name));
            print_product(&product, ctx);
        }
        AdminCommand::Delete { id, yes } => {
            if !yes {
                let confirmed = Confirm::new()
                    .with_prompt(format!("Delete product {}?", id))
                    .default(false)
                    .interact()?;
                if !confirmed {
                    ctx.output.warn("Cancelled");
                    return Ok(());
                }
            }
            shop.products
                .delete_product(&ProductId::new(id.as_str()))
                .await
                .map_err(|e| user_error(e, "Failed to delete product"))?;
            ctx.output.success(&format!("Deleted {}", id));
        }
    }
    Ok(())
}

/// Overlay the flags that were given on a draft.
fn apply_args(draft: &mut ProductDraft, args: DraftArgs, ctx: &Context) -> Result<()> {
    if let Some(name) = args.name {
        draft.name = name;
    }
    if let Some(description) = args.description {
        draft.description = description;
    }
    if let Some(price) = args.price {
        draft.price = price;
    }
    if let Some(category) = args.category {
        draft.category = Some(category).filter(|c| !c.trim().is_empty());
    }
    if let Some(tags) = args.tags {
        draft.tags = ProductDraft::parse_tags(&tags);
    }
    // A single blank `--size ""` clears the list.
    if !args.sizes.is_empty() {
        draft.sizes = non_blank(args.sizes);
    }
    if !args.colours.is_empty() {
        draft.colours = non_blank(args.colours);
    }
    if let Some(stock) = args.stock {
        draft.total_stock = stock;
        draft.in_stock = stock > 0;
    }
    if let Some(trending) = args.trending {
        draft.is_trending = trending;
    }
    for path in &args.images {
        draft.images.push(read_image(ctx, path)?);
    }
    draft.images_to_remove.extend(args.remove_images);
    Ok(())
}

fn non_blank(values: Vec<String>) -> Vec<String> {
    values.into_iter().filter(|v| !v.trim().is_empty()).collect()
}
