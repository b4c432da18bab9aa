//! Storefront CLI - browse and shop a storefront from the terminal.
//!
//! Commands:
//! - `storefront products` - List, search and inspect products
//! - `storefront login` / `register` / `logout` / `whoami` - Manage the session
//! - `storefront cart` - Show and edit the cart
//! - `storefront checkout` - Place a demo order
//! - `storefront admin` - Create, update and delete products
//! - `storefront stats` - Admin dashboard numbers
//! - `storefront config` - Manage configuration

mod commands;
mod config;
mod context;
mod output;

use anyhow::Result;
use clap::{Parser, Subcommand};
use tracing_subscriber::{fmt, EnvFilter};

use commands::{
    AdminArgs, CartArgs, CheckoutArgs, ConfigArgs, LoginArgs, ProductsArgs, RegisterArgs,
};

/// Storefront CLI - browse, buy and manage products
#[derive(Parser)]
#[command(name = "storefront")]
#[command(author, version, about, long_about = None)]
#[command(propagate_version = true)]
struct Cli {
    /// Enable verbose output
    #[arg(short, long, global = true)]
    verbose: bool,

    /// Use JSON output format
    #[arg(long, global = true)]
    json: bool,

    /// Config file path
    #[arg(short, long, global = true)]
    config: Option<String>,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Browse the catalog
    Products(ProductsArgs),

    /// Log in and store the session
    Login(LoginArgs),

    /// Create an account
    Register(RegisterArgs),

    /// Forget the stored session
    Logout,

    /// Show the logged-in user
    Whoami,

    /// Show and edit the cart
    Cart(CartArgs),

    /// Place a demo order for the cart
    Checkout(CheckoutArgs),

    /// Manage products (admin)
    Admin(AdminArgs),

    /// Show dashboard statistics (admin)
    Stats,

    /// Manage configuration
    Config(ConfigArgs),
}

fn init_tracing(verbose: bool) {
    let default_level = if verbose { "debug" } else { "warn" };
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(default_level));

    let _ = fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .with_target(false)
        .try_init();
}

#[tokio::main]
async fn main() -> Result<()> {
    let cli = Cli::parse();
    init_tracing(cli.verbose);

    // Setup output formatting
    let output = output::Output::new(cli.verbose, cli.json);

    // Load config
    let config_path = cli.config.as_deref();
    let ctx = context::Context::load(config_path, output)?;

    // Execute command
    let result = match cli.command {
        Commands::Products(args) => commands::products::run(args, &ctx).await,
        Commands::Login(args) => commands::session::login(args, &ctx).await,
        Commands::Register(args) => commands::session::register(args, &ctx).await,
        Commands::Logout => commands::session::logout(&ctx).await,
        Commands::Whoami => commands::session::whoami(&ctx).await,
        Commands::Cart(args) => commands::cart::run(args, &ctx).await,
        Commands::Checkout(args) => commands::checkout::run(args, &ctx).await,
        Commands::Admin(args) => commands::admin::run(args, &ctx).await,
        Commands::Stats => commands::stats::run(&ctx).await,
        Commands::Config(args) => commands::config::run(args, &ctx).await,
    };

    if let Err(e) = result {
        ctx.output.error(&format!("{:#}", e));
        std::process::exit(1);
    }

    Ok(())
}
