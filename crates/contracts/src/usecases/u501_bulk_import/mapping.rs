use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;

/// Catalog field a spreadsheet column can be mapped onto.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub enum TargetField {
    Name,
    Description,
    Price,
    CompareAtPrice,
    Category,
    Subcategory,
    Supplier,
    Stock,
    Sku,
    Brand,
    Uom,
    UomQuantity,
}

impl TargetField {
    /// All fields in the order the mapping form lists them.
    pub const ALL: [TargetField; 12] = [
        TargetField::Name,
        TargetField::Description,
        TargetField::Price,
        TargetField::CompareAtPrice,
        TargetField::Category,
        TargetField::Subcategory,
        TargetField::Supplier,
        TargetField::Stock,
        TargetField::Sku,
        TargetField::Brand,
        TargetField::Uom,
        TargetField::UomQuantity,
    ];

    /// Key used in serialized mappings and form element ids.
    pub fn key(&self) -> &'static str {
        match self {
            TargetField::Name => "name",
            TargetField::Description => "description",
            TargetField::Price => "price",
            TargetField::CompareAtPrice => "compareAtPrice",
            TargetField::Category => "category",
            TargetField::Subcategory => "subcategory",
            TargetField::Supplier => "supplier",
            TargetField::Stock => "stock",
            TargetField::Sku => "sku",
            TargetField::Brand => "brand",
            TargetField::Uom => "uom",
            TargetField::UomQuantity => "uomQuantity",
        }
    }

    pub fn label(&self) -> &'static str {
        match self {
            TargetField::Name => "Product Name",
            TargetField::Description => "Description",
            TargetField::Price => "Price",
            TargetField::CompareAtPrice => "Compare At Price",
            TargetField::Category => "Category",
            TargetField::Subcategory => "Subcategory",
            TargetField::Supplier => "Supplier",
            TargetField::Stock => "Stock",
            TargetField::Sku => "SKU",
            TargetField::Brand => "Brand",
            TargetField::Uom => "Unit of Measure",
            TargetField::UomQuantity => "UOM Quantity",
        }
    }

    pub fn is_required(&self) -> bool {
        matches!(
            self,
            TargetField::Name
                | TargetField::Price
                | TargetField::Category
                | TargetField::Supplier
                | TargetField::Stock
                | TargetField::Sku
        )
    }

    pub fn is_numeric(&self) -> bool {
        matches!(
            self,
            TargetField::Price | TargetField::CompareAtPrice | TargetField::Stock | TargetField::UomQuantity
        )
    }

    /// Heuristic guess for a header. Rules are checked in a fixed order and
    /// the first hit wins, so "Unit Price" is a price and not a unit.
    /// Compare-at price, subcategory and UOM quantity are never guessed.
    pub fn detect(header: &str) -> Option<Self> {
        let h = header.to_lowercase();
        let has = |needle: &str| h.contains(needle);

        if has("name") || has("product") {
            Some(TargetField::Name)
        } else if has("description") {
            Some(TargetField::Description)
        } else if has("price") && !has("compare") {
            Some(TargetField::Price)
        } else if has("category") {
            Some(TargetField::Category)
        } else if has("supplier") {
            Some(TargetField::Supplier)
        } else if has("stock") || has("quantity") {
            Some(TargetField::Stock)
        } else if has("sku") {
            Some(TargetField::Sku)
        } else if has("brand") {
            Some(TargetField::Brand)
        } else if has("uom") || has("unit") {
            Some(TargetField::Uom)
        } else {
            None
        }
    }
}

/// Which header feeds which catalog field. Absent fields are skipped.
#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize)]
pub struct FieldMapping(BTreeMap<TargetField, String>);

impl FieldMapping {
    pub fn new() -> Self {
        Self::default()
    }

    /// Default mapping for a header row. The first header that matches a
    /// field claims it; later matches for the same field are ignored.
    pub fn auto_detect<S: AsRef<str>>(headers: &[S]) -> Self {
        let mut mapping = Self::new();
        for header in headers {
            let header = header.as_ref();
            if let Some(field) = TargetField::detect(header) {
                mapping.0.entry(field).or_insert_with(|| header.to_string());
            }
        }
        mapping
    }

    /// Assigns `header` to `field`, or clears the field with `None` ("skip").
    pub fn set(&mut self, field: TargetField, header: Option<String>) {
        match header {
            Some(h) => {
                self.0.insert(field, h);
            }
            None => {
                self.0.remove(&field);
            }
        }
    }

    /// Builder form of [`FieldMapping::set`].
    pub fn with(mut self, field: TargetField, header: impl Into<String>) -> Self {
        self.set(field, Some(header.into()));
        self
    }

    pub fn get(&self, field: TargetField) -> Option<&str> {
        self.0.get(&field).map(String::as_str)
    }

    pub fn iter(&self) -> impl Iterator<Item = (TargetField, &str)> {
        self.0.iter().map(|(f, h)| (*f, h.as_str()))
    }

    pub fn len(&self) -> usize {
        self.0.len()
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    /// Required fields with no column assigned, in form order.
    pub fn unmapped_required(&self) -> Vec<TargetField> {
        TargetField::ALL
            .into_iter()
            .filter(|f| f.is_required() && !self.0.contains_key(f))
            .collect()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_detect_rules() {
        assert_eq!(TargetField::detect("Product Name"), Some(TargetField::Name));
        assert_eq!(TargetField::detect("PRODUCT"), Some(TargetField::Name));
        assert_eq!(TargetField::detect("Long Description"), Some(TargetField::Description));
        assert_eq!(TargetField::detect("Unit Price"), Some(TargetField::Price));
        assert_eq!(TargetField::detect("Compare Price"), None);
        assert_eq!(TargetField::detect("Category"), Some(TargetField::Category));
        assert_eq!(TargetField::detect("Subcategory"), Some(TargetField::Category));
        assert_eq!(TargetField::detect("Supplier"), Some(TargetField::Supplier));
        assert_eq!(TargetField::detect("In Stock"), Some(TargetField::Stock));
        assert_eq!(TargetField::detect("Quantity"), Some(TargetField::Stock));
        assert_eq!(TargetField::detect("UOM Quantity"), Some(TargetField::Stock));
        assert_eq!(TargetField::detect("sku"), Some(TargetField::Sku));
        assert_eq!(TargetField::detect("Brand"), Some(TargetField::Brand));
        assert_eq!(TargetField::detect("UOM"), Some(TargetField::Uom));
        assert_eq!(TargetField::detect("Units"), Some(TargetField::Uom));
        assert_eq!(TargetField::detect("Cost"), None);
    }

    #[test]
    fn test_auto_detect_first_header_wins() {
        let headers = ["Product Name", "Supplier Name", "Price", "Sale Price", "Compare Price"];
        let mapping = FieldMapping::auto_detect(&headers);
        assert_eq!(mapping.get(TargetField::Name), Some("Product Name"));
        assert_eq!(mapping.get(TargetField::Price), Some("Price"));
        assert_eq!(mapping.get(TargetField::Supplier), None);
        assert_eq!(mapping.get(TargetField::CompareAtPrice), None);
        assert_eq!(mapping.len(), 2);
    }

    #[test]
    fn test_auto_detect_is_deterministic() {
        let headers = vec![
            "SKU".to_string(),
            "Item Name".to_string(),
            "Category".to_string(),
            "Stock".to_string(),
            "Brand".to_string(),
            "Unit".to_string(),
        ];
        let first = FieldMapping::auto_detect(&headers);
        for _ in 0..5 {
            assert_eq!(FieldMapping::auto_detect(&headers), first);
        }
        assert_eq!(first.len(), 6);
    }

    #[test]
    fn test_never_detected_fields() {
        let headers = ["Compare At", "Subcategory", "UOM Qty"];
        let mapping = FieldMapping::auto_detect(&headers);
        assert_eq!(mapping.get(TargetField::CompareAtPrice), None);
        assert_eq!(mapping.get(TargetField::UomQuantity), None);
        assert_eq!(mapping.get(TargetField::Subcategory), None);
    }

    #[test]
    fn test_set_replaces_and_skip_clears() {
        let mut mapping = FieldMapping::auto_detect(&["Price"]);
        mapping.set(TargetField::Price, Some("Cost".to_string()));
        assert_eq!(mapping.get(TargetField::Price), Some("Cost"));
        mapping.set(TargetField::Price, None);
        assert_eq!(mapping.get(TargetField::Price), None);
        assert!(mapping.is_empty());
    }

    #[test]
    fn test_unmapped_required() {
        let mapping = FieldMapping::new()
            .with(TargetField::Name, "Item")
            .with(TargetField::Sku, "SKU")
            .with(TargetField::Brand, "Maker");
        assert_eq!(
            mapping.unmapped_required(),
            vec![
                TargetField::Price,
                TargetField::Category,
                TargetField::Supplier,
                TargetField::Stock
            ]
        );
    }

    #[test]
    fn test_field_keys_serialize() {
        let keys: std::collections::BTreeSet<_> = TargetField::ALL.iter().map(TargetField::key).collect();
        assert_eq!(keys.len(), TargetField::ALL.len());
        let json = serde_json::to_string(&FieldMapping::new().with(TargetField::UomQuantity, "Pack")).unwrap();
        assert_eq!(json, r#"{"uomQuantity":"Pack"}"#);
    }
}
