use crate::domain::a001_product::PLACEHOLDER_IMAGE;
use serde::Deserialize;

/// Number of rows coerced for the preview step.
pub const DEFAULT_PREVIEW_ROWS: usize = 10;

/// Local storage key holding the imported catalog.
pub const DEFAULT_STORAGE_KEY: &str = "importedProducts";

/// Tunables of the bulk import, loaded from the `[import]` config section.
#[derive(Debug, Clone, PartialEq, Deserialize)]
#[serde(default)]
pub struct ImportSettings {
    pub preview_rows: usize,
    pub storage_key: String,
    pub placeholder_image: String,
}

impl Default for ImportSettings {
    fn default() -> Self {
        Self {
            preview_rows: DEFAULT_PREVIEW_ROWS,
            storage_key: DEFAULT_STORAGE_KEY.to_string(),
            placeholder_image: PLACEHOLDER_IMAGE.to_string(),
        }
    }
}
