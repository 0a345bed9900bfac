//! Listing filters, sorting and catalog-source selection for the product page.

use super::aggregate::Product;
use serde::{Deserialize, Serialize};
use std::collections::BTreeSet;

/// Upper bound of the price slider when filters are reset.
pub const DEFAULT_MAX_PRICE: f64 = 500.0;

/// Which dataset the listing shows.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum CatalogSource {
    Imported,
    #[default]
    Demo,
}

impl CatalogSource {
    pub fn label(&self) -> &'static str {
        match self {
            CatalogSource::Imported => "Imported Catalog",
            CatalogSource::Demo => "Demo Data",
        }
    }

    pub fn toggled(&self) -> Self {
        match self {
            CatalogSource::Imported => CatalogSource::Demo,
            CatalogSource::Demo => CatalogSource::Imported,
        }
    }
}

/// Imported products when they are selected and present, demo products otherwise.
pub fn active_catalog(imported: &[Product], demo: &[Product], source: CatalogSource) -> Vec<Product> {
    match source {
        CatalogSource::Imported if !imported.is_empty() => imported.to_vec(),
        _ => demo.to_vec(),
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum SortOrder {
    #[default]
    Relevance,
    PriceLowToHigh,
    PriceHighToLow,
    Newest,
    Availability,
}

impl SortOrder {
    pub fn all() -> [SortOrder; 5] {
        [
            SortOrder::Relevance,
            SortOrder::PriceLowToHigh,
            SortOrder::PriceHighToLow,
            SortOrder::Newest,
            SortOrder::Availability,
        ]
    }

    /// Value used in `<option value=..>`.
    pub fn as_str(&self) -> &'static str {
        match self {
            SortOrder::Relevance => "relevance",
            SortOrder::PriceLowToHigh => "price-low",
            SortOrder::PriceHighToLow => "price-high",
            SortOrder::Newest => "newest",
            SortOrder::Availability => "availability",
        }
    }

    pub fn label(&self) -> &'static str {
        match self {
            SortOrder::Relevance => "Relevance",
            SortOrder::PriceLowToHigh => "Price: Low to High",
            SortOrder::PriceHighToLow => "Price: High to Low",
            SortOrder::Newest => "Newest First",
            SortOrder::Availability => "Availability",
        }
    }

    /// Parses a `<select>` value; unknown values fall back to relevance.
    pub fn from_value(s: &str) -> Self {
        Self::all()
            .into_iter()
            .find(|o| o.as_str() == s)
            .unwrap_or_default()
    }
}

/// Filter state of the product listing.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ProductQuery {
    pub search: String,
    /// `None` means "All Categories"
    pub category: Option<String>,
    /// `None` means "All Suppliers"
    pub supplier: Option<String>,
    pub min_price: f64,
    pub max_price: f64,
    pub in_stock_only: bool,
    pub sort: SortOrder,
}

impl Default for ProductQuery {
    fn default() -> Self {
        Self::with_max_price(DEFAULT_MAX_PRICE)
    }
}

impl ProductQuery {
    /// Reset state with a configurable price ceiling.
    pub fn with_max_price(max_price: f64) -> Self {
        Self {
            search: String::new(),
            category: None,
            supplier: None,
            min_price: 0.0,
            max_price,
            in_stock_only: true,
            sort: SortOrder::Relevance,
        }
    }

    pub fn matches(&self, product: &Product) -> bool {
        let needle = self.search.trim().to_lowercase();
        if !needle.is_empty() && !product.name.to_lowercase().contains(&needle) {
            return false;
        }
        if let Some(category) = &self.category {
            if &product.category != category {
                return false;
            }
        }
        if let Some(supplier) = &self.supplier {
            if &product.supplier != supplier {
                return false;
            }
        }
        if product.price < self.min_price || product.price > self.max_price {
            return false;
        }
        if self.in_stock_only && !product.is_in_stock() {
            return false;
        }
        true
    }

    /// Filtered and sorted copy of `products`. Sorting is stable, so
    /// `Relevance` keeps catalog order.
    pub fn apply(&self, products: &[Product]) -> Vec<Product> {
        let mut items: Vec<Product> = products.iter().filter(|p| self.matches(p)).cloned().collect();
        match self.sort {
            SortOrder::Relevance => {}
            SortOrder::PriceLowToHigh => items.sort_by(|a, b| a.price.total_cmp(&b.price)),
            SortOrder::PriceHighToLow => items.sort_by(|a, b| b.price.total_cmp(&a.price)),
            SortOrder::Newest => items.sort_by(|a, b| b.id.cmp(&a.id)),
            SortOrder::Availability => items.sort_by(|a, b| b.stock.cmp(&a.stock)),
        }
        items
    }
}

/// Distinct non-empty categories, sorted, for the filter dropdown.
pub fn distinct_categories(products: &[Product]) -> Vec<String> {
    distinct(products.iter().map(|p| p.category.as_str()))
}

/// Distinct non-empty suppliers, sorted, for the filter dropdown.
pub fn distinct_suppliers(products: &[Product]) -> Vec<String> {
    distinct(products.iter().map(|p| p.supplier.as_str()))
}

fn distinct<'a>(values: impl Iterator<Item = &'a str>) -> Vec<String> {
    values
        .filter(|v| !v.trim().is_empty())
        .map(str::to_string)
        .collect::<BTreeSet<_>>()
        .into_iter()
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::a001_product::aggregate::ProductId;
    use crate::domain::a001_product::demo::demo_catalog;

    fn product(id: u64, name: &str, price: f64, stock: u32, category: &str, supplier: &str) -> Product {
        let mut p = Product::blank(ProductId::new(id));
        p.name = name.to_string();
        p.price = price;
        p.stock = stock;
        p.category = category.to_string();
        p.supplier = supplier.to_string();
        p
    }

    fn sample() -> Vec<Product> {
        vec![
            product(1, "Gauze Pads", 12.0, 40, "medical-supplies", "MedSupply Co."),
            product(2, "Exam Gloves", 25.0, 0, "ppe", "VitalCare"),
            product(3, "Oximeter", 35.0, 5, "equipment", "MedEquip Plus"),
            product(4, "Infusion Pump", 900.0, 2, "equipment", "MedEquip Plus"),
        ]
    }

    #[test]
    fn test_default_query_hides_out_of_stock_and_over_max_price() {
        let names: Vec<String> = ProductQuery::default().apply(&sample()).into_iter().map(|p| p.name).collect();
        assert_eq!(names, vec!["Gauze Pads", "Oximeter"]);
    }

    #[test]
    fn test_filters_compose() {
        let query = ProductQuery {
            search: "OXI".to_string(),
            category: Some("equipment".to_string()),
            supplier: Some("MedEquip Plus".to_string()),
            in_stock_only: false,
            ..ProductQuery::default()
        };
        let found = query.apply(&sample());
        assert_eq!(found.len(), 1);
        assert_eq!(found[0].id, ProductId::new(3));

        let query = ProductQuery {
            supplier: Some("VitalCare".to_string()),
            ..ProductQuery::default()
        };
        assert!(query.apply(&sample()).is_empty());
    }

    #[test]
    fn test_price_range_is_inclusive() {
        let query = ProductQuery {
            min_price: 12.0,
            max_price: 35.0,
            in_stock_only: false,
            ..ProductQuery::default()
        };
        assert_eq!(query.apply(&sample()).len(), 3);
    }

    #[test]
    fn test_sort_orders() {
        let base = ProductQuery {
            in_stock_only: false,
            max_price: 1000.0,
            ..ProductQuery::default()
        };
        let ids = |sort: SortOrder| -> Vec<u64> {
            ProductQuery { sort, ..base.clone() }
                .apply(&sample())
                .iter()
                .map(|p| p.id.value())
                .collect()
        };
        assert_eq!(ids(SortOrder::Relevance), vec![1, 2, 3, 4]);
        assert_eq!(ids(SortOrder::PriceLowToHigh), vec![1, 2, 3, 4]);
        assert_eq!(ids(SortOrder::PriceHighToLow), vec![4, 3, 2, 1]);
        assert_eq!(ids(SortOrder::Newest), vec![4, 3, 2, 1]);
        assert_eq!(ids(SortOrder::Availability), vec![1, 3, 4, 2]);
    }

    #[test]
    fn test_sort_order_str_round_trip() {
        for order in SortOrder::all() {
            assert_eq!(SortOrder::from_value(order.as_str()), order);
        }
        assert_eq!(SortOrder::from_value("bogus"), SortOrder::Relevance);
    }

    #[test]
    fn test_active_catalog_falls_back_to_demo() {
        let demo = demo_catalog();
        let imported = sample();
        assert_eq!(active_catalog(&imported, &demo, CatalogSource::Imported), imported);
        assert_eq!(active_catalog(&imported, &demo, CatalogSource::Demo), demo);
        assert_eq!(active_catalog(&[], &demo, CatalogSource::Imported), demo);
        assert_eq!(CatalogSource::Imported.toggled(), CatalogSource::Demo);
    }

    #[test]
    fn test_distinct_options() {
        assert_eq!(
            distinct_categories(&sample()),
            vec!["equipment", "medical-supplies", "ppe"]
        );
        assert_eq!(distinct_suppliers(&sample()).len(), 3);
    }
}
