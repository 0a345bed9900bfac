//! Built-in demo dataset shown when no catalog has been imported yet.

use super::aggregate::{Product, ProductId, PLACEHOLDER_IMAGE};
use once_cell::sync::Lazy;

pub const DEMO_CATEGORIES: &[(&str, &str)] = &[
    ("pharmaceuticals", "Pharmaceuticals"),
    ("medical-supplies", "Medical Supplies"),
    ("equipment", "Equipment"),
    ("ppe", "PPE"),
];

pub const DEMO_SUPPLIERS: &[&str] = &[
    "MedSupply Co.",
    "PharmaDirect",
    "Healthcare Supplies",
    "MedEquip Plus",
    "VitalCare",
];

#[allow(clippy::too_many_arguments)]
fn demo(
    id: u64,
    name: &str,
    description: &str,
    price: f64,
    compare_at_price: Option<f64>,
    category: &str,
    subcategory: &str,
    supplier: &str,
    stock: u32,
    sku: &str,
    is_best_seller: bool,
    available_from: u32,
    brand: &str,
    uom: Option<(&str, f64)>,
) -> Product {
    Product {
        id: ProductId::new(id),
        name: name.to_string(),
        description: Some(description.to_string()),
        price,
        compare_at_price,
        image: PLACEHOLDER_IMAGE.to_string(),
        category: category.to_string(),
        subcategory: Some(subcategory.to_string()),
        supplier: supplier.to_string(),
        stock,
        sku: sku.to_string(),
        is_best_seller,
        available_from,
        brand: Some(brand.to_string()),
        uom: uom.map(|(u, _)| u.to_string()),
        uom_quantity: uom.map(|(_, q)| q),
    }
}

static DEMO_CATALOG: Lazy<Vec<Product>> = Lazy::new(|| {
    vec![
        demo(
            1,
            "Nitrile Examination Gloves",
            "Powder-free, latex-free nitrile gloves for general examination use.",
            24.99,
            Some(29.99),
            "ppe",
            "Gloves",
            "MedSupply Co.",
            320,
            "NG-100-M",
            true,
            4,
            "SafeTouch",
            Some(("Box", 100.0)),
        ),
        demo(
            2,
            "Amoxicillin 500mg Capsules",
            "Broad-spectrum penicillin antibiotic capsules.",
            18.50,
            None,
            "pharmaceuticals",
            "Antibiotics",
            "PharmaDirect",
            85,
            "AMX-500-30",
            true,
            3,
            "Generic Rx",
            Some(("Bottle", 30.0)),
        ),
        demo(
            3,
            "Sterile Gauze Pads 4x4",
            "12-ply sterile cotton gauze pads, individually wrapped.",
            12.75,
            Some(14.00),
            "medical-supplies",
            "Wound Care",
            "Healthcare Supplies",
            540,
            "GZ-44-12",
            false,
            5,
            "CareWrap",
            Some(("Box", 50.0)),
        ),
        demo(
            4,
            "Digital Blood Pressure Monitor",
            "Upper-arm automatic monitor with irregular heartbeat detection.",
            89.00,
            Some(109.00),
            "equipment",
            "Diagnostics",
            "MedEquip Plus",
            7,
            "BPM-200",
            false,
            2,
            "VitalSense",
            None,
        ),
        demo(
            5,
            "Surgical Face Masks",
            "Three-layer ASTM level 2 disposable masks with ear loops.",
            15.99,
            None,
            "ppe",
            "Masks",
            "VitalCare",
            0,
            "SFM-L2-50",
            false,
            6,
            "AirShield",
            Some(("Box", 50.0)),
        ),
        demo(
            6,
            "Ibuprofen 200mg Tablets",
            "Non-steroidal anti-inflammatory pain reliever.",
            6.49,
            None,
            "pharmaceuticals",
            "Analgesics",
            "PharmaDirect",
            1200,
            "IBU-200-100",
            true,
            5,
            "Generic OTC",
            Some(("Bottle", 100.0)),
        ),
        demo(
            7,
            "Disposable Syringes 5ml",
            "Luer-lock sterile syringes without needle.",
            21.00,
            None,
            "medical-supplies",
            "Injection",
            "MedSupply Co.",
            260,
            "SYR-5-LL",
            false,
            3,
            "PrecisionMed",
            Some(("Box", 100.0)),
        ),
        demo(
            8,
            "Pulse Oximeter",
            "Fingertip SpO2 and pulse rate monitor with OLED display.",
            34.95,
            Some(39.95),
            "equipment",
            "Diagnostics",
            "MedEquip Plus",
            45,
            "POX-10",
            true,
            4,
            "VitalSense",
            None,
        ),
        demo(
            9,
            "Alcohol Prep Pads",
            "70% isopropyl alcohol saturated pads, medium size.",
            4.25,
            None,
            "medical-supplies",
            "Antiseptics",
            "Healthcare Supplies",
            3,
            "APP-200",
            false,
            5,
            "CareWrap",
            Some(("Box", 200.0)),
        ),
        demo(
            10,
            "Isolation Gowns",
            "Fluid-resistant AAMI level 2 gowns with knit cuffs.",
            42.00,
            None,
            "ppe",
            "Gowns",
            "VitalCare",
            120,
            "ISG-L2-10",
            false,
            2,
            "AirShield",
            Some(("Pack", 10.0)),
        ),
    ]
});

/// Static demo catalog; cloned on demand so callers own their copy.
pub fn demo_catalog() -> Vec<Product> {
    DEMO_CATALOG.clone()
}

/// Display label for a demo category key, falling back to the key itself.
pub fn category_label(key: &str) -> &str {
    DEMO_CATEGORIES
        .iter()
        .find(|(k, _)| *k == key)
        .map(|(_, label)| *label)
        .unwrap_or(key)
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashSet;

    #[test]
    fn test_demo_ids_are_unique() {
        let catalog = demo_catalog();
        let ids: HashSet<_> = catalog.iter().map(|p| p.id).collect();
        assert_eq!(ids.len(), catalog.len());
    }

    #[test]
    fn test_demo_uses_known_categories_and_suppliers() {
        for p in demo_catalog() {
            assert!(DEMO_CATEGORIES.iter().any(|(k, _)| *k == p.category));
            assert!(DEMO_SUPPLIERS.contains(&p.supplier.as_str()));
        }
    }

    #[test]
    fn test_category_label() {
        assert_eq!(category_label("ppe"), "PPE");
        assert_eq!(category_label("Wound Care"), "Wound Care");
    }
}
