//! Place a demo order.

use anyhow::Result;
use dialoguer::Confirm;

use super::cart::print_cart;
use super::{user_error, CheckoutArgs};
use crate::context::Context;
use crate::output::format_price;

/// Run the checkout command.
pub async fn run(args: CheckoutArgs, ctx: &Context) -> Result<()> {
    let shop = ctx.storefront()?;

    let cart = shop
        .cart
        .get_cart()
        .await
        .map_err(|e| user_error(e, "Failed to fetch cart"))?;
    if cart.is_empty() {
        ctx.output.info("Your cart is empty");
        return Ok(());
    }

    if !ctx.output.is_json() {
        ctx.output.header("Checkout");
        print_cart(&cart, ctx);
        ctx.output.info("");
        ctx.output.info("This is a demo store: no payment will be taken.");
    }

    if !args.yes {
        let confirmed = Confirm::new()
            .with_prompt(format!("Place order for {}?", format_price(cart.total_amount)))
            .default(true)
            .interact()?;
        if !confirmed {
            ctx.output.warn("Checkout cancelled");
            return Ok(());
        }
    }

    let spinner = ctx.output.spinner("Placing order...");
    let result = shop.checkout.place_order().await;
    spinner.finish_and_clear();
    let confirmation = result.map_err(|e| {
        if e.is_empty_cart() {
            anyhow::anyhow!("Your cart is empty")
        } else {
            user_error(e, "Checkout failed")
        }
    })?;

    shop.cart_mirror().clear_cart()?;

    if ctx.output.is_json() {
        ctx.output.json(&confirmation);
        return Ok(());
    }

    ctx.output.success("Order placed");
    if let Some(id) = &confirmation.order_id {
        ctx.output.kv("order", id.as_str());
    }
    ctx.output.kv("status", confirmation.status.as_str());
    ctx.output.kv("items", &confirmation.item_count.to_string());
    ctx.output.kv("total", &format_price(confirmation.total_amount));
    ctx.output.kv(
        "placed",
        &confirmation.placed_at.format("%Y-%m-%d %H:%M:%S UTC").to_string(),
    );
    Ok(())
}
