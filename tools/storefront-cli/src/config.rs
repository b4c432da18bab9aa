//! Config file loading and saving.

use std::path::Path;

use anyhow::{Context, Result};
use storefront_sdk::StorefrontConfig;

/// File names searched for, in order, in each directory up from the cwd.
pub const CONFIG_NAMES: [&str; 3] = ["storefront.toml", ".storefront.toml", "storefront.json"];

/// Load config from a TOML or JSON file.
pub fn load(path: &Path) -> Result<StorefrontConfig> {
    let content = std::fs::read_to_string(path)
        .with_context(|| format!("Failed to read config file: {}", path.display()))?;

    if is_json(path) {
        serde_json::from_str(&content)
            .with_context(|| format!("Failed to parse JSON config: {}", path.display()))
    } else {
        toml::from_str(&content)
            .with_context(|| format!("Failed to parse TOML config: {}", path.display()))
    }
}

/// Save config to a file, format chosen by extension.
pub fn save(config: &StorefrontConfig, path: &Path) -> Result<()> {
    let content = if is_json(path) {
        serde_json::to_string_pretty(config)?
    } else {
        toml::to_string_pretty(config)?
    };

    std::fs::write(path, content)
        .with_context(|| format!("Failed to write config file: {}", path.display()))
}

fn is_json(path: &Path) -> bool {
    path.extension().map_or(false, |e| e == "json")
}

/// Commented starter config.
pub fn generate_default_config() -> String {
    let defaults = StorefrontConfig::default();
    format!(
        r#"# Storefront CLI configuration

[api]
# Every endpoint path is appended to this URL.
# STOREFRONT_API_URL overrides it.
base_url = "{base_url}"
timeout_secs = {timeout}

[cache]
# How long product listings are reused, in milliseconds.
ttl_ms = {ttl}

[listing]
debounce_ms = {debounce}
# One of 10, 12, 24, 25, 50.
page_size = {page_size}

[storage]
# Local storage file. Defaults to ~/.local/share/storefront-cli/storage.json
# path = "storage.json"
"#,
        base_url = defaults.api.base_url,
        timeout = defaults.api.timeout_secs,
        ttl = defaults.cache.ttl_ms,
        debounce = defaults.listing.debounce_ms,
        page_size = defaults.listing.page_size,
    )
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_config_parses() {
        let parsed: StorefrontConfig = toml::from_str(&generate_default_config()).unwrap();
        assert_eq!(parsed, StorefrontConfig::default());
    }

    #[test]
    fn test_save_and_load_json() {
        let path = std::env::temp_dir().join(format!("storefront-cli-{}.json", std::process::id()));
        let mut config = StorefrontConfig::default();
        config.listing.page_size = 24;

        save(&config, &path).unwrap();
        let loaded = load(&path).unwrap();
        let _ = std::fs::remove_file(&path);

        assert_eq!(loaded.listing.page_size, 24);
    }
}
