//! Bulk catalog import: spreadsheet → column mapping → preview → persisted catalog.

pub mod coercion;
pub mod error;
pub mod grid;
pub mod mapping;
pub mod reader;
pub mod settings;
pub mod store;
pub mod wizard;

pub use coercion::{coerce_row, BatchIds};
pub use error::{ImportError, StoreError};
pub use grid::{CellValue, RawGrid};
pub use mapping::{FieldMapping, TargetField};
pub use reader::parse_spreadsheet;
pub use settings::ImportSettings;
pub use store::{CatalogStore, KeyValueStorage, MemoryStorage, SlotCatalogStore};
pub use wizard::{ImportOutcome, ImportWizard, UploadSummary, WizardStage};

use crate::usecases::common::UseCaseMetadata;

pub struct BulkImport;

impl UseCaseMetadata for BulkImport {
    fn usecase_index() -> &'static str {
        "u501"
    }

    fn usecase_name() -> &'static str {
        "bulk_import"
    }

    fn display_name() -> &'static str {
        "Bulk Product Upload"
    }

    fn description() -> &'static str {
        "Import your product catalog from CSV or Excel files"
    }
}
