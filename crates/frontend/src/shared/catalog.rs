//! Imported catalog context and the browser `localStorage` backend it persists to.

use crate::shared::config::StorefrontConfig;
use contracts::domain::a001_product::Product;
use contracts::usecases::u501_bulk_import::{
    CatalogStore, ImportError, ImportOutcome, ImportWizard, KeyValueStorage, SlotCatalogStore, StoreError,
};
use leptos::prelude::*;
use wasm_bindgen::{JsCast, JsValue};

fn storage() -> Option<web_sys::Storage> {
    web_sys::window().and_then(|w| w.local_storage().ok().flatten())
}

fn js_error_message(e: JsValue) -> String {
    e.dyn_ref::<js_sys::Error>()
        .map(|err| String::from(err.message()))
        .unwrap_or_else(|| format!("{:?}", e))
}

/// `window.localStorage`, looked up on every call.
#[derive(Debug, Clone, Copy, Default)]
pub struct BrowserStorage;

impl KeyValueStorage for BrowserStorage {
    fn get_item(&self, key: &str) -> Result<Option<String>, StoreError> {
        let storage = storage().ok_or(StoreError::Unavailable)?;
        storage
            .get_item(key)
            .map_err(|e| StoreError::Write(js_error_message(e)))
    }

    fn set_item(&self, key: &str, value: &str) -> Result<(), StoreError> {
        let storage = storage().ok_or(StoreError::Unavailable)?;
        storage
            .set_item(key, value)
            .map_err(|e| StoreError::Write(js_error_message(e)))
    }

    fn remove_item(&self, key: &str) -> Result<(), StoreError> {
        let storage = storage().ok_or(StoreError::Unavailable)?;
        storage
            .remove_item(key)
            .map_err(|e| StoreError::Write(js_error_message(e)))
    }
}

/// App-wide access to the imported catalog. `imported` mirrors the storage
/// slot and is refreshed after every commit or clear.
#[derive(Clone, Copy)]
pub struct CatalogContext {
    pub imported: RwSignal<Vec<Product>>,
    pub config: StoredValue<StorefrontConfig>,
}

impl CatalogContext {
    pub fn new(config: StorefrontConfig) -> Self {
        let ctx = Self {
            imported: RwSignal::new(Vec::new()),
            config: StoredValue::new(config),
        };
        ctx.reload();
        ctx
    }

    fn store(&self) -> SlotCatalogStore<BrowserStorage> {
        let key = self.config.with_value(|c| c.import.storage_key.clone());
        SlotCatalogStore::new(BrowserStorage, key)
    }

    /// Re-reads the storage slot.
    pub fn reload(&self) {
        let products = self.store().load().unwrap_or_default();
        log::debug!("Imported catalog loaded: {} products", products.len());
        self.imported.set(products);
    }

    /// Commits the wizard's rows to the slot, then refreshes `imported`.
    pub fn commit(&self, wizard: &mut ImportWizard) -> Result<ImportOutcome, ImportError> {
        let mut store = self.store();
        let outcome = wizard.commit(&mut store)?;
        self.reload();
        Ok(outcome)
    }

    pub fn clear(&self) -> Result<(), StoreError> {
        self.store().clear()?;
        self.imported.set(Vec::new());
        Ok(())
    }
}

pub fn use_catalog() -> CatalogContext {
    use_context::<CatalogContext>().expect("CatalogContext not found")
}
