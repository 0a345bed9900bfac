use contracts::domain::a001_product::{DEFAULT_LOW_STOCK_THRESHOLD, DEFAULT_MAX_PRICE};
use contracts::usecases::u501_bulk_import::ImportSettings;
use serde::Deserialize;

#[derive(Debug, Deserialize, Clone, PartialEq, Default)]
pub struct StorefrontConfig {
    #[serde(default)]
    pub import: ImportSettings,
    #[serde(default)]
    pub catalog: CatalogSettings,
}

#[derive(Debug, Deserialize, Clone, PartialEq)]
#[serde(default)]
pub struct CatalogSettings {
    pub low_stock_threshold: u32,
    pub max_price_filter: f64,
}

impl Default for CatalogSettings {
    fn default() -> Self {
        Self {
            low_stock_threshold: DEFAULT_LOW_STOCK_THRESHOLD,
            max_price_filter: DEFAULT_MAX_PRICE,
        }
    }
}

/// localStorage key that may hold a TOML override of the default config
pub const CONFIG_STORAGE_KEY: &str = "storefront_config";

/// Default configuration embedded in the bundle
const DEFAULT_CONFIG: &str = r#"
[import]
preview_rows = 10
storage_key = "importedProducts"
placeholder_image = "/placeholder.svg"

[catalog]
low_stock_threshold = 10
max_price_filter = 500.0
"#;

pub fn parse_config(contents: &str) -> anyhow::Result<StorefrontConfig> {
    let config: StorefrontConfig = toml::from_str(contents)?;
    Ok(config)
}

/// Load the storefront configuration
///
/// Search order:
/// 1. TOML override in localStorage under `storefront_config`
/// 2. Falls back to embedded default config
pub fn load_config() -> anyhow::Result<StorefrontConfig> {
    let override_toml = web_sys::window()
        .and_then(|w| w.local_storage().ok().flatten())
        .and_then(|s| s.get_item(CONFIG_STORAGE_KEY).ok().flatten());

    if let Some(contents) = override_toml {
        match parse_config(&contents) {
            Ok(config) => {
                log::info!("Loading config from localStorage key '{}'", CONFIG_STORAGE_KEY);
                return Ok(config);
            }
            Err(e) => log::warn!("Ignoring malformed '{}' override: {}", CONFIG_STORAGE_KEY, e),
        }
    }

    log::info!("Using default embedded configuration");
    parse_config(DEFAULT_CONFIG)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_config_loads() {
        let config = parse_config(DEFAULT_CONFIG).unwrap();
        assert_eq!(config, StorefrontConfig::default());
        assert_eq!(config.import.storage_key, "importedProducts");
        assert_eq!(config.catalog.low_stock_threshold, 10);
    }

    #[test]
    fn test_partial_override_keeps_defaults() {
        let config = parse_config("[catalog]\nmax_price_filter = 1000.0\n").unwrap();
        assert_eq!(config.catalog.max_price_filter, 1000.0);
        assert_eq!(config.catalog.low_stock_threshold, 10);
        assert_eq!(config.import.preview_rows, 10);
    }

    #[test]
    fn test_malformed_override_is_an_error() {
        assert!(parse_config("[import]\npreview_rows = \"ten\"\n").is_err());
    }
}
