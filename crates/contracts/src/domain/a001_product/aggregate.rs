use crate::domain::common::AggregateId;
use serde::{Deserialize, Serialize};

/// Image shown for products that come without one (every imported row).
pub const PLACEHOLDER_IMAGE: &str = "/placeholder.svg";

/// Stock level below which a product is flagged as "Low Stock".
pub const DEFAULT_LOW_STOCK_THRESHOLD: u32 = 10;

// ============================================================================
// ID Type
// ============================================================================
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct ProductId(pub u64);

impl ProductId {
    pub fn new(value: u64) -> Self {
        Self(value)
    }

    pub fn value(&self) -> u64 {
        self.0
    }
}

impl AggregateId for ProductId {
    fn as_string(&self) -> String {
        self.0.to_string()
    }

    fn from_string(s: &str) -> Result<Self, String> {
        s.parse::<u64>()
            .map(ProductId::new)
            .map_err(|e| format!("Invalid product id: {}", e))
    }
}

// ============================================================================
// Aggregate
// ============================================================================

/// One normalized catalog entry, shared by the demo dataset and imported catalogs.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Product {
    #[serde(rename = "id")]
    pub id: ProductId,

    #[serde(rename = "name", default)]
    pub name: String,

    #[serde(rename = "description", default, skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,

    #[serde(rename = "price", default)]
    pub price: f64,

    #[serde(rename = "compareAtPrice", default, skip_serializing_if = "Option::is_none")]
    pub compare_at_price: Option<f64>,

    #[serde(rename = "image", default = "default_image")]
    pub image: String,

    #[serde(rename = "category", default)]
    pub category: String,

    #[serde(rename = "subcategory", default, skip_serializing_if = "Option::is_none")]
    pub subcategory: Option<String>,

    #[serde(rename = "supplier", default)]
    pub supplier: String,

    #[serde(rename = "stock", default)]
    pub stock: u32,

    #[serde(rename = "sku", default)]
    pub sku: String,

    #[serde(rename = "isBestSeller", default)]
    pub is_best_seller: bool,

    #[serde(rename = "availableFrom", default = "default_available_from")]
    pub available_from: u32,

    #[serde(rename = "brand", default, skip_serializing_if = "Option::is_none")]
    pub brand: Option<String>,

    /// Unit of measure, e.g. "Box", "Bottle", "Each"
    #[serde(rename = "uom", default, skip_serializing_if = "Option::is_none")]
    pub uom: Option<String>,

    /// Quantity per unit of measure, e.g. 100 for "Box of 100"
    #[serde(rename = "uomQuantity", default, skip_serializing_if = "Option::is_none")]
    pub uom_quantity: Option<f64>,
}

fn default_image() -> String {
    PLACEHOLDER_IMAGE.to_string()
}

fn default_available_from() -> u32 {
    1
}

/// Stock badge shown on product cards.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum StockStatus {
    OutOfStock,
    LowStock,
    InStock,
}

impl StockStatus {
    pub fn label(&self) -> &'static str {
        match self {
            StockStatus::OutOfStock => "Out of Stock",
            StockStatus::LowStock => "Low Stock",
            StockStatus::InStock => "In Stock",
        }
    }

    /// BEM modifier used by the product card badge.
    pub fn css_modifier(&self) -> &'static str {
        match self {
            StockStatus::OutOfStock => "out",
            StockStatus::LowStock => "low",
            StockStatus::InStock => "in",
        }
    }
}

impl Product {
    /// Record with every required field empty and the fixed import defaults.
    pub fn blank(id: ProductId) -> Self {
        Self {
            id,
            name: String::new(),
            description: None,
            price: 0.0,
            compare_at_price: None,
            image: default_image(),
            category: String::new(),
            subcategory: None,
            supplier: String::new(),
            stock: 0,
            sku: String::new(),
            is_best_seller: false,
            available_from: default_available_from(),
            brand: None,
            uom: None,
            uom_quantity: None,
        }
    }

    /// "Box of 50" when both unit and a non-zero quantity are known,
    /// the bare unit when only it is known, "Each" otherwise.
    pub fn uom_display(&self) -> String {
        match (self.uom.as_deref(), self.uom_quantity) {
            (Some(uom), Some(qty)) if !uom.is_empty() && qty != 0.0 => format!("{} of {}", uom, qty),
            (Some(uom), _) if !uom.is_empty() => uom.to_string(),
            _ => "Each".to_string(),
        }
    }

    pub fn stock_status(&self, low_stock_threshold: u32) -> StockStatus {
        if self.stock == 0 {
            StockStatus::OutOfStock
        } else if self.stock < low_stock_threshold {
            StockStatus::LowStock
        } else {
            StockStatus::InStock
        }
    }

    pub fn is_in_stock(&self) -> bool {
        self.stock > 0
    }

    /// Whole-percent saving against the compare-at price, if there is one.
    pub fn discount_percent(&self) -> Option<u32> {
        let compare = self.compare_at_price?;
        if compare <= self.price || compare <= 0.0 {
            return None;
        }
        Some((((compare - self.price) / compare) * 100.0).round() as u32)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn boxed(uom: Option<&str>, qty: Option<f64>) -> Product {
        let mut p = Product::blank(ProductId::new(1));
        p.uom = uom.map(str::to_string);
        p.uom_quantity = qty;
        p
    }

    #[test]
    fn test_uom_display() {
        assert_eq!(boxed(Some("Box"), Some(50.0)).uom_display(), "Box of 50");
        assert_eq!(boxed(Some("Box"), None).uom_display(), "Box");
        assert_eq!(boxed(None, None).uom_display(), "Each");
        assert_eq!(boxed(None, Some(12.0)).uom_display(), "Each");
        assert_eq!(boxed(Some("Box"), Some(0.0)).uom_display(), "Box");
        assert_eq!(boxed(Some(""), Some(5.0)).uom_display(), "Each");
        assert_eq!(boxed(Some("Pack"), Some(2.5)).uom_display(), "Pack of 2.5");
    }

    #[test]
    fn test_stock_status() {
        let mut p = Product::blank(ProductId::new(1));
        assert_eq!(p.stock_status(DEFAULT_LOW_STOCK_THRESHOLD), StockStatus::OutOfStock);
        p.stock = 9;
        assert_eq!(p.stock_status(DEFAULT_LOW_STOCK_THRESHOLD), StockStatus::LowStock);
        p.stock = 10;
        assert_eq!(p.stock_status(DEFAULT_LOW_STOCK_THRESHOLD), StockStatus::InStock);
        assert_eq!(StockStatus::LowStock.label(), "Low Stock");
    }

    #[test]
    fn test_discount_percent() {
        let mut p = Product::blank(ProductId::new(1));
        p.price = 75.0;
        assert_eq!(p.discount_percent(), None);
        p.compare_at_price = Some(100.0);
        assert_eq!(p.discount_percent(), Some(25));
        p.compare_at_price = Some(50.0);
        assert_eq!(p.discount_percent(), None);
    }

    #[test]
    fn test_serialized_field_names_are_camel_case() {
        let mut p = Product::blank(ProductId::new(7));
        p.compare_at_price = Some(12.5);
        p.uom_quantity = Some(100.0);
        let json = serde_json::to_value(&p).unwrap();
        assert_eq!(json["id"], 7);
        assert_eq!(json["compareAtPrice"], 12.5);
        assert_eq!(json["uomQuantity"], 100.0);
        assert_eq!(json["isBestSeller"], false);
        assert_eq!(json["availableFrom"], 1);
        assert_eq!(json["image"], "/placeholder.svg");
        assert!(json.get("brand").is_none());
    }

    #[test]
    fn test_product_id_string_form() {
        let id = ProductId::new(1700000000123);
        assert_eq!(id.as_string(), "1700000000123");
        assert_eq!(ProductId::from_string("1700000000123"), Ok(id));
    }
}
