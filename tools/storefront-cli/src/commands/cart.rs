//! Shopping cart commands.

use anyhow::Result;
use dialoguer::Confirm;
use storefront_sdk::storefront_commerce::prelude::*;
use storefront_sdk::Storefront;

use super::{user_error, CartArgs, CartCommand};
use crate::context::Context;
use crate::output::format_price;

/// Run the cart command.
pub async fn run(args: CartArgs, ctx: &Context) -> Result<()> {
    let shop = ctx.storefront()?;
    match args.command.unwrap_or(CartCommand::Show) {
        CartCommand::Show => {
            let cart = shop
                .cart
                .get_cart()
                .await
                .map_err(|e| user_error(e, "Failed to fetch cart"))?;
            mirror(&shop, &cart)?;
            print_cart(&cart, ctx);
        }
        CartCommand::Add {
            slug,
            size,
            colour,
            quantity,
        } => {
            let product = shop
                .products
                .get_product_by_slug(&slug)
                .await
                .map_err(|e| user_error(e, "Product not found"))?;
            if !product.is_available() {
                ctx.output.warn(&format!("{} is out of stock", product.name));
                return Ok(());
            }

            let request = if size.is_none() && colour.is_none() && quantity == 1 {
                AddToCartRequest::for_product(&product)
            } else {
                AddToCartRequest::new(
                    product.id.clone(),
                    quantity,
                    size.unwrap_or_else(|| product.default_size().to_string()),
                    colour.unwrap_or_else(|| product.default_colour()),
                )?
            };

            shop.products
                .add_to_cart(&request)
                .await
                .map_err(|e| user_error(e, "Failed to add to cart"))?;
            ctx.output.success(&format!("Added {} to cart", product.name));

            let cart = shop
                .cart
                .get_cart()
                .await
                .map_err(|e| user_error(e, "Failed to fetch cart"))?;
            mirror(&shop, &cart)?;
        }
        CartCommand::Update { id, quantity } => {
            let cart = shop
                .cart
                .update_quantity(&CartItemId::new(id), quantity)
                .await
                .map_err(|e| user_error(e, "Failed to update cart"))?;
            mirror(&shop, &cart)?;
            print_cart(&cart, ctx);
        }
        CartCommand::Remove { id } => {
            let cart = shop
                .cart
                .remove_item(&CartItemId::new(id))
                .await
                .map_err(|e| user_error(e, "Failed to remove item"))?;
            mirror(&shop, &cart)?;
            ctx.output.success("Item removed");
            print_cart(&cart, ctx);
        }
        CartCommand::Clear { yes } => {
            if !yes {
                let confirmed = Confirm::new()
                    .with_prompt("Remove every item from the cart?")
                    .default(false)
                    .interact()?;
                if !confirmed {
                    ctx.output.warn("Cancelled");
                    return Ok(());
                }
            }
            shop.cart
                .clear()
                .await
                .map_err(|e| user_error(e, "Failed to clear cart"))?;
            shop.cart_mirror().clear_cart()?;
            ctx.output.success("Cart cleared");
        }
    }
    Ok(())
}

fn mirror(shop: &Storefront, cart: &ServerCart) -> Result<()> {
    shop.cart_mirror().sync_from_server(cart)?;
    Ok(())
}

pub(crate) fn print_cart(cart: &ServerCart, ctx: &Context) {
    if ctx.output.is_json() {
        ctx.output.json(cart);
        return;
    }

    if cart.is_empty() {
        ctx.output.info("Your cart is empty");
        return;
    }

    let widths = [26, 28, 12, 5, 10];
    ctx.output.table_row(&["ID", "PRODUCT", "OPTIONS", "QTY", "TOTAL"], &widths);
    for line in &cart.items {
        let name = line
            .product
            .as_ref()
            .map(|p| p.name.as_str())
            .unwrap_or("(unavailable)");
        let options = [line.size.as_deref(), line.colour.as_deref()]
            .into_iter()
            .flatten()
            .collect::<Vec<_>>()
            .join("/");
        let quantity = line.quantity.to_string();
        let total = format_price(line.line_total());
        ctx.output
            .table_row(&[line.id.as_str(), name, &options, &quantity, &total], &widths);
    }
    ctx.output.info("");
    ctx.output.kv("items", &cart.total_items.to_string());
    ctx.output.kv("total", &format_price(cart.total_amount));
}
