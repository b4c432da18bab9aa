//! CLI command implementations.

pub mod admin;
pub mod cart;
pub mod checkout;
pub mod config;
pub mod products;
pub mod session;
pub mod stats;

use anyhow::{anyhow, Context as _, Result};
use clap::{Args, Subcommand};
use storefront_sdk::storefront_commerce::catalog::ImageFile;
use storefront_sdk::StorefrontError;

use crate::context::Context;

/// Turn a service error into what the user sees.
///
/// Auth failures point at `login`; otherwise the server message, or `fallback`.
pub(crate) fn user_error(err: StorefrontError, fallback: &str) -> anyhow::Error {
    tracing::debug!(error = %err, "command failed");
    if err.requires_login() {
        anyhow!("Please log in first: run `storefront login`")
    } else if err.is_permission_error() {
        anyhow!("This command requires an admin account")
    } else {
        anyhow!(err.user_message(fallback))
    }
}

/// Read an image file for upload.
pub(crate) fn read_image(ctx: &Context, path: &str) -> Result<ImageFile> {
    let path = ctx.resolve_path(path);
    let bytes = std::fs::read(&path)
        .with_context(|| format!("Failed to read image: {}", path.display()))?;
    let file_name = path
        .file_name()
        .and_then(|n| n.to_str())
        .unwrap_or("image")
        .to_string();
    Ok(ImageFile::new(file_name, bytes))
}

/// Filter flags shared by listing commands.
#[derive(Args, Debug, Default)]
pub struct FilterArgs {
    /// Page number (starts at 1).
    #[arg(short, long)]
    pub page: Option<u32>,

    /// Page size: 10, 12, 24, 25 or 50.
    #[arg(short, long)]
    pub limit: Option<u32>,

    /// Free-text search.
    #[arg(short, long)]
    pub search: Option<String>,

    /// Category name.
    #[arg(long)]
    pub category: Option<String>,

    /// Tag.
    #[arg(long)]
    pub tag: Option<String>,

    /// Minimum price.
    #[arg(long)]
    pub min_price: Option<f64>,

    /// Maximum price.
    #[arg(long)]
    pub max_price: Option<f64>,

    /// Only products in stock.
    #[arg(long)]
    pub in_stock: bool,

    /// Only trending products.
    #[arg(long)]
    pub trending: bool,

    /// Sort, e.g. `price-asc`, `name-desc`, `createdAt-desc`.
    #[arg(long)]
    pub sort: Option<String>,
}

/// Arguments for the products command.
#[derive(Args)]
pub struct ProductsArgs {
    #[command(subcommand)]
    pub command: Option<ProductsCommand>,
}

#[derive(Subcommand)]
pub enum ProductsCommand {
    /// List products (default).
    List {
        #[command(flatten)]
        filters: FilterArgs,
    },
    /// Show one product by slug.
    Show {
        /// Product slug.
        slug: String,
    },
    /// Show one product by id.
    Get {
        /// Product id.
        id: String,
    },
    /// Search as you type; input is committed after a pause.
    Search,
}

/// Arguments for the login command.
#[derive(Args)]
pub struct LoginArgs {
    /// Account email.
    #[arg(short, long)]
    pub email: Option<String>,

    /// Password (prompted when omitted).
    #[arg(long)]
    pub password: Option<String>,
}

/// Arguments for the register command.
#[derive(Args)]
pub struct RegisterArgs {
    /// Display name.
    #[arg(short, long)]
    pub name: String,

    /// Account email.
    #[arg(short, long)]
    pub email: String,

    /// Password (prompted when omitted).
    #[arg(long)]
    pub password: Option<String>,

    /// Profile image file.
    #[arg(long)]
    pub avatar: Option<String>,
}

/// Arguments for the cart command.
#[derive(Args)]
pub struct CartArgs {
    #[command(subcommand)]
    pub command: Option<CartCommand>,
}

#[derive(Subcommand)]
pub enum CartCommand {
    /// Show the cart (default).
    Show,
    /// Add a product by slug.
    Add {
        /// Product slug.
        slug: String,
        /// Size; defaults to the product's first size.
        #[arg(long)]
        size: Option<String>,
        /// Colour; defaults to the product's first colour.
        #[arg(long)]
        colour: Option<String>,
        /// Quantity.
        #[arg(short, long, default_value = "1")]
        quantity: u32,
    },
    /// Change a line's quantity.
    Update {
        /// Cart item id.
        id: String,
        /// New quantity (at least 1).
        quantity: u32,
    },
    /// Remove a line.
    Remove {
        /// Cart item id.
        id: String,
    },
    /// Empty the cart.
    Clear {
        /// Skip confirmation.
        #[arg(short, long)]
        yes: bool,
    },
}

/// Arguments for the checkout command.
#[derive(Args)]
pub struct CheckoutArgs {
    /// Skip confirmation prompt.
    #[arg(short, long)]
    pub yes: bool,
}

/// Arguments for the admin command.
#[derive(Args)]
pub struct AdminArgs {
    #[command(subcommand)]
    pub command: AdminCommand,
}

/// Product fields for create and update.
#[derive(Args, Debug)]
pub struct DraftArgs {
    /// Product name.
    #[arg(long)]
    pub name: Option<String>,

    /// Description.
    #[arg(long)]
    pub description: Option<String>,

    /// Price.
    #[arg(long)]
    pub price: Option<f64>,

    /// Category.
    #[arg(long)]
    pub category: Option<String>,

    /// Comma-separated tags.
    #[arg(long)]
    pub tags: Option<String>,

    /// Sizes (repeatable).
    #[arg(long = "size")]
    pub sizes: Vec<String>,

    /// Colours (repeatable).
    #[arg(long = "colour")]
    pub colours: Vec<String>,

    /// Units in stock.
    #[arg(long)]
    pub stock: Option<i64>,

    /// Mark as trending.
    #[arg(long)]
    pub trending: Option<bool>,

    /// Image files to upload (repeatable).
    #[arg(long = "image")]
    pub images: Vec<String>,

    /// Existing image URLs to remove (repeatable, update only).
    #[arg(long = "remove-image")]
    pub remove_images: Vec<String>,
}

#[derive(Subcommand)]
pub enum AdminCommand {
    /// List products in the admin table.
    List {
        #[command(flatten)]
        filters: FilterArgs,
    },
    /// Create a product.
    Create {
        #[command(flatten)]
        draft: DraftArgs,
    },
    /// Update a product; unspecified fields keep their current value.
    Update {
        /// Product id.
        id: String,
        #[command(flatten)]
        draft: DraftArgs,
    },
    /// Delete a product.
    Delete {
        /// Product id.
        id: String,
        /// Skip confirmation.
        #[arg(short, long)]
        yes: bool,
    },
}

/// Arguments for the config command.
#[derive(Args)]
pub struct ConfigArgs {
    #[command(subcommand)]
    pub command: ConfigCommand,
}

#[derive(Subcommand)]
pub enum ConfigCommand {
    /// Show current configuration.
    Show,
    /// Initialize a new config file.
    Init {
        /// Force overwrite existing config.
        #[arg(short, long)]
        force: bool,
        /// File format: toml or json.
        #[arg(long, default_value = "toml")]
        format: String,
    },
    /// Validate the configuration.
    Validate,
}
