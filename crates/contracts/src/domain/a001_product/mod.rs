pub mod aggregate;
pub mod demo;
pub mod query;

pub use aggregate::{Product, ProductId, StockStatus, DEFAULT_LOW_STOCK_THRESHOLD, PLACEHOLDER_IMAGE};
pub use demo::{category_label, demo_catalog};
pub use query::{
    active_catalog, distinct_categories, distinct_suppliers, CatalogSource, ProductQuery, SortOrder,
    DEFAULT_MAX_PRICE,
};
