//! Tab titles, keyed by tab key.

use contracts::usecases::common::UseCaseMetadata;
use contracts::usecases::u501_bulk_import::BulkImport;

/// Readable title for a tab key; empty for unknown keys.
pub fn tab_label_for_key(key: &str) -> &'static str {
    match key {
        // ── Aggregates ──────────────────────────────────────────────────
        "a001_product" => "Products",

        // ── Use Cases (u5xx) ────────────────────────────────────────────
        "u501_bulk_import" => BulkImport::display_name(),

        _ => "",
    }
}
