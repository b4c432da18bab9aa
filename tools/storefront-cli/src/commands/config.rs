//! Configuration management commands.

use anyhow::{bail, Result};
use storefront_sdk::StorefrontConfig;

use super::{ConfigArgs, ConfigCommand};
use crate::config::{generate_default_config, save};
use crate::context::Context;

/// Run the config command.
pub async fn run(args: ConfigArgs, ctx: &Context) -> Result<()> {
    match args.command {
        ConfigCommand::Show => show_config(ctx).await,
        ConfigCommand::Init { force, format } => init_config(force, &format, ctx).await,
        ConfigCommand::Validate => validate_config(ctx).await,
    }
}

async fn show_config(ctx: &Context) -> Result<()> {
    if ctx.output.is_json() {
        ctx.output.json(&ctx.config);
        return Ok(());
    }

    ctx.output.header("Current Configuration");
    match &ctx.config_path {
        Some(path) => ctx.output.kv("file", &path.display().to_string()),
        None => ctx.output.kv("file", "(defaults)"),
    }

    ctx.output.info("");
    ctx.output.info("[api]");
    ctx.output.kv("base_url", &ctx.config.api.base_url);
    ctx.output.kv("timeout_secs", &ctx.config.api.timeout_secs.to_string());

    ctx.output.info("");
    ctx.output.info("[cache]");
    ctx.output.kv("ttl_ms", &ctx.config.cache.ttl_ms.to_string());

    ctx.output.info("");
    ctx.output.info("[listing]");
    ctx.output.kv("debounce_ms", &ctx.config.listing.debounce_ms.to_string());
    ctx.output.kv("page_size", &ctx.config.listing.page_size.to_string());

    ctx.output.info("");
    ctx.output.info("[storage]");
    ctx.output.kv("path", &ctx.storage_path().display().to_string());

    Ok(())
}

async fn init_config(force: bool, format: &str, ctx: &Context) -> Result<()> {
    let file_name = match format {
        "toml" => "storefront.toml",
        "json" => "storefront.json",
        other => bail!("Unknown config format '{}': use toml or json", other),
    };
    let config_path = ctx.cwd.join(file_name);

    if config_path.exists() && !force {
        bail!(
            "Config file already exists: {}. Use --force to overwrite.",
            config_path.display()
        );
    }

    if format == "json" {
        save(&StorefrontConfig::default(), &config_path)?;
    } else {
        std::fs::write(&config_path, generate_default_config())?;
    }

    ctx.output.success(&format!("Created: {}", config_path.display()));
    Ok(())
}

async fn validate_config(ctx: &Context) -> Result<()> {
    ctx.output.header("Validating configuration");

    let mut errors: Vec<String> = Vec::new();
    let mut warnings: Vec<String> = Vec::new();

    if let Err(e) = ctx.config.validate() {
        errors.push(e.to_string());
    }

    if ctx.config.api.base_url.starts_with("http://")
        && !ctx.config.api.base_url.contains("localhost")
        && !ctx.config.api.base_url.contains("127.0.0.1")
    {
        warnings.push(
            "api.base_url uses plain http; the bearer token is sent unencrypted".to_string(),
        );
    }
    if ctx.config.cache.ttl_ms == 0 {
        warnings.push("cache.ttl_ms is 0; every listing goes to the network".to_string());
    }
    if ctx.config.listing.debounce_ms > 2000 {
        warnings.push(format!(
            "listing.debounce_ms is {}; search will feel slow",
            ctx.config.listing.debounce_ms
        ));
    }

    for warning in &warnings {
        ctx.output.warn(warning);
    }
    for error in &errors {
        ctx.output.error(error);
    }

    if !errors.is_empty() {
        bail!("Configuration has {} error(s)", errors.len());
    }

    if warnings.is_empty() {
        ctx.output.success("Configuration is valid");
    } else {
        ctx.output
            .success(&format!("Configuration is valid with {} warning(s)", warnings.len()));
    }
    Ok(())
}
