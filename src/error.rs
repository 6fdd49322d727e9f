// ⚠️ Errors - fatal conditions only
// Data-quality problems never end up here: they are ImportIssues (see report.rs)

use std::path::PathBuf;
use thiserror::Error;

/// Errors that abort a migration run
#[derive(Error, Debug)]
pub enum MigrationError {
    #[error("Failed to open source {}: {message}", path.display())]
    OpenSource { path: PathBuf, message: String },

    #[error("Failed to read rows from {}: {message}", path.display())]
    ReadSource { path: PathBuf, message: String },

    #[error("Unsupported source format: {} (expected xlsx, xlsm, xlsb, xls, ods or csv)", path.display())]
    UnsupportedFormat { path: PathBuf },

    #[error("Worksheet not found: {name}")]
    SheetNotFound { name: String },

    #[error("Workbook has no worksheets: {}", path.display())]
    EmptyWorkbook { path: PathBuf },

    #[error("Failed to write {}: {source}", path.display())]
    WriteOutput {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("Failed to serialize import report: {0}")]
    Serialize(#[from] serde_json::Error),
}

pub type Result<T> = std::result::Result<T, MigrationError>;
