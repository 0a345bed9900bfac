use super::wizard::WizardStage;
use thiserror::Error;

/// Failures of the import pipeline. None of them is fatal: the wizard
/// stays usable and the user is asked to act again.
#[derive(Debug, Clone, PartialEq, Error)]
pub enum ImportError {
    #[error("Please make sure the file is a valid Excel or CSV file ({reason})")]
    Unreadable { reason: String },

    #[error("The file does not contain any rows")]
    EmptyFile,

    #[error("Column '{0}' is not present in the uploaded file")]
    UnknownHeader(String),

    #[error("'{action}' is not available in the {stage} step")]
    InvalidStage {
        action: &'static str,
        stage: WizardStage,
    },
}

impl ImportError {
    pub fn unreadable(reason: impl Into<String>) -> Self {
        Self::Unreadable {
            reason: reason.into(),
        }
    }
}

/// Failures of the persisted catalog slot.
#[derive(Debug, Error)]
pub enum StoreError {
    #[error("Local storage is not available")]
    Unavailable,

    #[error("Failed to write catalog: {0}")]
    Write(String),

    #[error("Failed to serialize catalog: {0}")]
    Serialize(#[from] serde_json::Error),
}
