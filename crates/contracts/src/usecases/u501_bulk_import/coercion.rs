use super::grid::CellValue;
use super::mapping::{FieldMapping, TargetField};
use super::settings::ImportSettings;
use crate::domain::a001_product::{Product, ProductId};

/// Hands out product ids for one import batch: a millisecond clock base
/// plus the row index, so ids are unique within the batch.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct BatchIds {
    base: u64,
}

impl BatchIds {
    pub fn starting_at(base: u64) -> Self {
        Self { base }
    }

    pub fn from_clock() -> Self {
        let millis = chrono::Utc::now().timestamp_millis().max(0) as u64;
        Self::starting_at(millis)
    }

    pub fn id_for_row(&self, row_index: usize) -> ProductId {
        ProductId::new(self.base.saturating_add(row_index as u64))
    }
}

/// Builds one catalog record from a data row.
///
/// Numeric fields never fail: unreadable, non-finite and negative values
/// become 0. Text fields take the cell as written. Fields without a mapping,
/// or mapped to a header that is not in `headers`, keep their defaults.
pub fn coerce_row(
    row: &[CellValue],
    mapping: &FieldMapping,
    headers: &[String],
    id: ProductId,
    settings: &ImportSettings,
) -> Product {
    let mut product = Product::blank(id);
    product.image = settings.placeholder_image.clone();

    for (field, header) in mapping.iter() {
        let Some(idx) = headers.iter().position(|h| h == header) else {
            continue;
        };
        let cell = row.get(idx).unwrap_or(&CellValue::Empty);

        match field {
            TargetField::Name => product.name = cell.as_text(),
            TargetField::Description => product.description = Some(cell.as_text()),
            TargetField::Price => product.price = number(cell),
            TargetField::CompareAtPrice => product.compare_at_price = Some(number(cell)),
            TargetField::Category => product.category = cell.as_text(),
            TargetField::Subcategory => product.subcategory = Some(cell.as_text()),
            TargetField::Supplier => product.supplier = cell.as_text(),
            TargetField::Stock => product.stock = whole_number(cell),
            TargetField::Sku => product.sku = cell.as_text(),
            TargetField::Brand => product.brand = Some(cell.as_text()),
            TargetField::Uom => product.uom = Some(cell.as_text()),
            TargetField::UomQuantity => product.uom_quantity = Some(number(cell)),
        }
    }

    product
}

fn number(cell: &CellValue) -> f64 {
    match cell.as_number() {
        Some(n) if n > 0.0 => n,
        _ => 0.0,
    }
}

fn whole_number(cell: &CellValue) -> u32 {
    // `as` saturates at u32::MAX
    number(cell).trunc() as u32
}

#[cfg(test)]
mod tests {
    use super::*;

    fn headers() -> Vec<String> {
        ["Item", "SKU", "Cost", "Qty"].iter().map(|s| s.to_string()).collect()
    }

    fn gauze_mapping() -> FieldMapping {
        FieldMapping::new()
            .with(TargetField::Name, "Item")
            .with(TargetField::Sku, "SKU")
            .with(TargetField::Price, "Cost")
            .with(TargetField::Stock, "Qty")
    }

    #[test]
    fn test_gauze_row() {
        let row = vec![
            CellValue::text("Gauze"),
            CellValue::text("G-100"),
            CellValue::text("5.99"),
            CellValue::text("200"),
        ];
        let p = coerce_row(&row, &gauze_mapping(), &headers(), ProductId::new(1), &ImportSettings::default());
        assert_eq!(p.name, "Gauze");
        assert_eq!(p.sku, "G-100");
        assert_eq!(p.price, 5.99);
        assert_eq!(p.stock, 200);
        assert_eq!(p.category, "");
        assert_eq!(p.supplier, "");
        assert_eq!(p.description, None);
        assert_eq!(p.image, "/placeholder.svg");
        assert!(!p.is_best_seller);
        assert_eq!(p.available_from, 1);
    }

    #[test]
    fn test_bad_numbers_become_zero() {
        let mapping = FieldMapping::new()
            .with(TargetField::Price, "Cost")
            .with(TargetField::Stock, "Qty")
            .with(TargetField::CompareAtPrice, "Item");
        let row = vec![
            CellValue::text("abc"),
            CellValue::Empty,
            CellValue::Number(f64::NAN),
            CellValue::text("-4"),
        ];
        let p = coerce_row(&row, &mapping, &headers(), ProductId::new(1), &ImportSettings::default());
        assert_eq!(p.price, 0.0);
        assert_eq!(p.stock, 0);
        assert_eq!(p.compare_at_price, Some(0.0));
    }

    #[test]
    fn test_number_cells_and_stock_truncation() {
        let row = vec![
            CellValue::Number(42.0),
            CellValue::Number(1001.0),
            CellValue::text("12.50 USD"),
            CellValue::Number(7.9),
        ];
        let p = coerce_row(&row, &gauze_mapping(), &headers(), ProductId::new(1), &ImportSettings::default());
        assert_eq!(p.name, "42");
        assert_eq!(p.sku, "1001");
        assert_eq!(p.price, 12.5);
        assert_eq!(p.stock, 7);
    }

    #[test]
    fn test_mapped_optionals_are_present_even_when_blank() {
        let mapping = FieldMapping::new()
            .with(TargetField::Brand, "SKU")
            .with(TargetField::Uom, "Item");
        let row = vec![CellValue::Empty, CellValue::text("Acme"), CellValue::Empty, CellValue::Empty];
        let p = coerce_row(&row, &mapping, &headers(), ProductId::new(1), &ImportSettings::default());
        assert_eq!(p.brand.as_deref(), Some("Acme"));
        assert_eq!(p.uom.as_deref(), Some(""));
        assert_eq!(p.uom_display(), "Each");
    }

    #[test]
    fn test_mapping_to_missing_header_is_ignored() {
        let mapping = FieldMapping::new().with(TargetField::Name, "Nope");
        let row = vec![CellValue::text("x"); 4];
        let p = coerce_row(&row, &mapping, &headers(), ProductId::new(1), &ImportSettings::default());
        assert_eq!(p.name, "");
    }

    #[test]
    fn test_batch_ids_are_unique_within_batch() {
        let ids = BatchIds::starting_at(1_700_000_000_000);
        assert_eq!(ids.id_for_row(0), ProductId::new(1_700_000_000_000));
        assert_eq!(ids.id_for_row(3), ProductId::new(1_700_000_000_003));
        assert!(BatchIds::from_clock().id_for_row(0).value() > 0);
    }
}
