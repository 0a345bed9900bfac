use super::coercion::{coerce_row, BatchIds};
use super::error::{ImportError, StoreError};
use super::grid::RawGrid;
use super::mapping::{FieldMapping, TargetField};
use super::reader::parse_spreadsheet;
use super::settings::ImportSettings;
use super::store::CatalogStore;
use crate::domain::a001_product::Product;
use serde::{Deserialize, Serialize};
use std::fmt;
use uuid::Uuid;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum WizardStage {
    #[default]
    Upload,
    Mapping,
    Preview,
    Complete,
}

impl WizardStage {
    pub fn all() -> [WizardStage; 4] {
        [
            WizardStage::Upload,
            WizardStage::Mapping,
            WizardStage::Preview,
            WizardStage::Complete,
        ]
    }

    pub fn label(&self) -> &'static str {
        match self {
            WizardStage::Upload => "Upload",
            WizardStage::Mapping => "Map Fields",
            WizardStage::Preview => "Preview",
            WizardStage::Complete => "Complete",
        }
    }

    /// 1-based step number for the progress header.
    pub fn step(&self) -> usize {
        match self {
            WizardStage::Upload => 1,
            WizardStage::Mapping => 2,
            WizardStage::Preview => 3,
            WizardStage::Complete => 4,
        }
    }
}

impl fmt::Display for WizardStage {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.label())
    }
}

/// What the upload step reports back to the user.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct UploadSummary {
    pub file_name: String,
    pub row_count: usize,
    pub column_count: usize,
}

/// Result of a commit. A storage failure does not undo the import; it is
/// carried here so the UI can show it next to the success message.
#[derive(Debug)]
pub struct ImportOutcome {
    pub batch_id: Uuid,
    pub records: usize,
    pub storage_warning: Option<StoreError>,
}

/// Upload → Mapping → Preview → Complete.
///
/// Every transition checks the current stage first; a call in the wrong
/// stage returns [`ImportError::InvalidStage`] and leaves the wizard as it was.
#[derive(Debug, Clone, Default)]
pub struct ImportWizard {
    settings: ImportSettings,
    stage: WizardStage,
    file_name: Option<String>,
    grid: Option<RawGrid>,
    mapping: FieldMapping,
    ids: Option<BatchIds>,
    preview: Vec<Product>,
    imported_count: usize,
}

impl ImportWizard {
    pub fn new(settings: ImportSettings) -> Self {
        Self {
            settings,
            ..Self::default()
        }
    }

    fn require(&self, action: &'static str, stage: WizardStage) -> Result<(), ImportError> {
        if self.stage == stage {
            Ok(())
        } else {
            Err(ImportError::InvalidStage {
                action,
                stage: self.stage,
            })
        }
    }

    /// Decodes the file and proposes a mapping. On failure the wizard stays
    /// in Upload so the user can pick another file.
    pub fn load_file(&mut self, file_name: &str, bytes: &[u8]) -> Result<UploadSummary, ImportError> {
        self.require("upload", WizardStage::Upload)?;

        let grid = match parse_spreadsheet(bytes) {
            Ok(grid) => grid,
            Err(e) => {
                log::warn!("Upload of '{}' rejected: {}", file_name, e);
                return Err(e);
            }
        };

        let mapping = FieldMapping::auto_detect(&grid.headers);
        log::info!(
            "Loaded '{}': {} rows, {} columns, {} fields detected",
            file_name,
            grid.row_count(),
            grid.column_count(),
            mapping.len()
        );

        let summary = UploadSummary {
            file_name: file_name.to_string(),
            row_count: grid.row_count(),
            column_count: grid.column_count(),
        };
        self.file_name = Some(file_name.to_string());
        self.grid = Some(grid);
        self.mapping = mapping;
        self.stage = WizardStage::Mapping;
        Ok(summary)
    }

    /// Points `field` at `header`, or skips the field with `None`.
    pub fn set_mapping(&mut self, field: TargetField, header: Option<&str>) -> Result<(), ImportError> {
        self.require("change mapping", WizardStage::Mapping)?;

        if let Some(header) = header {
            if !self.grid.as_ref().is_some_and(|g| g.has_header(header)) {
                return Err(ImportError::UnknownHeader(header.to_string()));
            }
        }
        self.mapping.set(field, header.map(str::to_string));
        Ok(())
    }

    /// Mapping → Upload drops the file; Preview → Mapping keeps it.
    pub fn back(&mut self) -> Result<WizardStage, ImportError> {
        match self.stage {
            WizardStage::Mapping => {
                self.file_name = None;
                self.grid = None;
                self.mapping = FieldMapping::new();
                self.stage = WizardStage::Upload;
            }
            WizardStage::Preview => {
                self.preview.clear();
                self.ids = None;
                self.stage = WizardStage::Mapping;
            }
            stage => {
                return Err(ImportError::InvalidStage {
                    action: "go back",
                    stage,
                })
            }
        }
        Ok(self.stage)
    }

    /// Coerces the first `preview_rows` rows and moves to Preview.
    pub fn generate_preview(&mut self) -> Result<&[Product], ImportError> {
        self.require("preview", WizardStage::Mapping)?;

        let missing = self.unmapped_required();
        if !missing.is_empty() {
            log::warn!(
                "Previewing with unmapped required fields: {}",
                missing.iter().map(|f| f.label()).collect::<Vec<_>>().join(", ")
            );
        }

        let ids = BatchIds::from_clock();
        self.preview = self.coerce_rows(ids, self.settings.preview_rows);
        self.ids = Some(ids);
        self.stage = WizardStage::Preview;
        log::debug!("Preview built with {} records", self.preview.len());
        Ok(&self.preview)
    }

    /// Coerces every row and writes the whole set to `store`.
    pub fn commit<S: CatalogStore + ?Sized>(&mut self, store: &mut S) -> Result<ImportOutcome, ImportError> {
        self.require("import", WizardStage::Preview)?;

        let ids = self.ids.unwrap_or_else(BatchIds::from_clock);
        let records = self.coerce_rows(ids, usize::MAX);
        let batch_id = Uuid::new_v4();

        let storage_warning = match store.commit(&records) {
            Ok(()) => {
                log::info!("Import {} committed {} products", batch_id, records.len());
                None
            }
            Err(e) => {
                log::warn!("Import {} could not be saved: {}", batch_id, e);
                Some(e)
            }
        };

        self.imported_count = records.len();
        self.stage = WizardStage::Complete;
        Ok(ImportOutcome {
            batch_id,
            records: records.len(),
            storage_warning,
        })
    }

    /// Back to an empty Upload step, from any stage.
    pub fn reset(&mut self) {
        *self = Self::new(self.settings.clone());
    }

    fn coerce_rows(&self, ids: BatchIds, limit: usize) -> Vec<Product> {
        let Some(grid) = &self.grid else {
            return Vec::new();
        };
        grid.rows
            .iter()
            .take(limit)
            .enumerate()
            .map(|(idx, row)| coerce_row(row, &self.mapping, &grid.headers, ids.id_for_row(idx), &self.settings))
            .collect()
    }

    pub fn stage(&self) -> WizardStage {
        self.stage
    }

    pub fn settings(&self) -> &ImportSettings {
        &self.settings
    }

    pub fn file_name(&self) -> Option<&str> {
        self.file_name.as_deref()
    }

    pub fn headers(&self) -> &[String] {
        self.grid.as_ref().map(|g| g.headers.as_slice()).unwrap_or_default()
    }

    pub fn row_count(&self) -> usize {
        self.grid.as_ref().map(RawGrid::row_count).unwrap_or(0)
    }

    pub fn mapping(&self) -> &FieldMapping {
        &self.mapping
    }

    pub fn preview(&self) -> &[Product] {
        &self.preview
    }

    pub fn imported_count(&self) -> usize {
        self.imported_count
    }

    /// Required fields still without a column. Shown as a warning only.
    pub fn unmapped_required(&self) -> Vec<TargetField> {
        self.mapping.unmapped_required()
    }
}
