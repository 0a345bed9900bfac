use super::error::StoreError;
use crate::domain::a001_product::Product;
use std::cell::RefCell;
use std::collections::HashMap;

/// Persisted catalog that the listing reads and the import wizard writes.
pub trait CatalogStore {
    /// Last committed catalog, or `None` when nothing usable is stored.
    fn load(&self) -> Option<Vec<Product>>;

    /// Replaces the stored catalog with `products` in one write.
    fn commit(&mut self, products: &[Product]) -> Result<(), StoreError>;

    fn clear(&mut self) -> Result<(), StoreError>;
}

/// String key-value storage with the shape of the browser `Storage` API.
pub trait KeyValueStorage {
    fn get_item(&self, key: &str) -> Result<Option<String>, StoreError>;
    fn set_item(&self, key: &str, value: &str) -> Result<(), StoreError>;
    fn remove_item(&self, key: &str) -> Result<(), StoreError>;
}

/// In-memory storage. An optional quota (bytes of key plus value) makes
/// oversized writes fail the way a full browser storage does.
#[derive(Debug, Default)]
pub struct MemoryStorage {
    items: RefCell<HashMap<String, String>>,
    quota: Option<usize>,
}

impl MemoryStorage {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_quota(quota: usize) -> Self {
        Self {
            items: RefCell::default(),
            quota: Some(quota),
        }
    }
}

impl KeyValueStorage for MemoryStorage {
    fn get_item(&self, key: &str) -> Result<Option<String>, StoreError> {
        Ok(self.items.borrow().get(key).cloned())
    }

    fn set_item(&self, key: &str, value: &str) -> Result<(), StoreError> {
        if let Some(quota) = self.quota {
            let others: usize = self
                .items
                .borrow()
                .iter()
                .filter(|(k, _)| k.as_str() != key)
                .map(|(k, v)| k.len() + v.len())
                .sum();
            if others + key.len() + value.len() > quota {
                return Err(StoreError::Write(format!(
                    "quota of {} bytes exceeded",
                    quota
                )));
            }
        }
        self.items.borrow_mut().insert(key.to_string(), value.to_string());
        Ok(())
    }

    fn remove_item(&self, key: &str) -> Result<(), StoreError> {
        self.items.borrow_mut().remove(key);
        Ok(())
    }
}

/// Catalog kept as one JSON array under a single storage key.
#[derive(Debug)]
pub struct SlotCatalogStore<S> {
    storage: S,
    key: String,
}

impl<S: KeyValueStorage> SlotCatalogStore<S> {
    pub fn new(storage: S, key: impl Into<String>) -> Self {
        Self {
            storage,
            key: key.into(),
        }
    }

    pub fn key(&self) -> &str {
        &self.key
    }

    pub fn storage(&self) -> &S {
        &self.storage
    }
}

impl<S: KeyValueStorage> CatalogStore for SlotCatalogStore<S> {
    fn load(&self) -> Option<Vec<Product>> {
        let raw = match self.storage.get_item(&self.key) {
            Ok(Some(raw)) => raw,
            Ok(None) => return None,
            Err(e) => {
                log::warn!("Imported catalog could not be read: {}", e);
                return None;
            }
        };

        match serde_json::from_str::<Vec<Product>>(&raw) {
            Ok(products) => Some(products),
            Err(e) => {
                log::warn!("Imported catalog under '{}' is not valid JSON: {}", self.key, e);
                None
            }
        }
    }

    fn commit(&mut self, products: &[Product]) -> Result<(), StoreError> {
        let json = serde_json::to_string(products)?;
        self.storage.set_item(&self.key, &json)?;
        log::info!("Saved {} products under '{}'", products.len(), self.key);
        Ok(())
    }

    fn clear(&mut self) -> Result<(), StoreError> {
        self.storage.remove_item(&self.key)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::a001_product::{demo_catalog, ProductId};

    #[test]
    fn test_commit_then_load_returns_identical_records() {
        let mut products = demo_catalog();
        products[0].price = 0.1 + 0.2;
        products[1].uom_quantity = Some(2.5);
        products[2].id = ProductId::new(1_765_432_109_876);

        let mut store = SlotCatalogStore::new(MemoryStorage::new(), "importedProducts");
        store.commit(&products).unwrap();
        assert_eq!(store.load(), Some(products));
    }

    #[test]
    fn test_empty_slot_and_garbage_load_as_none() {
        let store = SlotCatalogStore::new(MemoryStorage::new(), "importedProducts");
        assert_eq!(store.load(), None);

        store.storage().set_item("importedProducts", "not json").unwrap();
        assert_eq!(store.load(), None);
    }

    #[test]
    fn test_commit_overwrites_previous_catalog() {
        let mut store = SlotCatalogStore::new(MemoryStorage::new(), "importedProducts");
        store.commit(&demo_catalog()).unwrap();
        store.commit(&demo_catalog()[..2]).unwrap();
        assert_eq!(store.load().map(|p| p.len()), Some(2));
    }

    #[test]
    fn test_failed_write_keeps_previous_value() {
        let small = demo_catalog()[..1].to_vec();
        let small_len = serde_json::to_string(&small).unwrap().len();
        let quota = "importedProducts".len() + small_len;

        let mut store = SlotCatalogStore::new(MemoryStorage::with_quota(quota), "importedProducts");
        store.commit(&small).unwrap();

        let result = store.commit(&demo_catalog());
        assert!(matches!(result, Err(StoreError::Write(_))));
        assert_eq!(store.load(), Some(small));
    }

    #[test]
    fn test_clear_removes_slot() {
        let mut store = SlotCatalogStore::new(MemoryStorage::new(), "importedProducts");
        store.commit(&demo_catalog()).unwrap();
        store.clear().unwrap();
        assert_eq!(store.load(), None);
    }
}
