//! Export errors

use std::path::PathBuf;

/// Errors while rendering or writing an export
#[derive(Debug, thiserror::Error)]
pub enum ExportError {
    /// CSV writer failure
    #[error("csv error: {0}")]
    Csv(#[from] csv::Error),

    /// Workbook writer failure
    #[error("xlsx error: {0}")]
    Xlsx(#[from] rust_xlsxwriter::XlsxError),

    /// PDF assembly failure
    #[error("pdf error: {0}")]
    Pdf(#[from] lopdf::Error),

    /// Output could not be written
    #[error("io error writing {path}: {source}")]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    /// Unrecognised format name
    #[error("unknown export format: '{0}' (expected csv, xlsx or pdf)")]
    UnknownFormat(String),
}

impl ExportError {
    /// Create IO error for path
    pub fn io_error(path: impl Into<PathBuf>, source: std::io::Error) -> Self {
        Self::Io {
            path: path.into(),
            source,
        }
    }
}
