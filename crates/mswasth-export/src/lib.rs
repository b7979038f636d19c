//! Mswasth Export - tabular renderers for the record collection
//!
//! Every renderer turns the full collection into a single document:
//! - header row: the field names of the first record
//! - one row per record, values in field order
//! - an empty collection renders a document with no header and no rows
//!
//! Formats:
//! - [`CsvRenderer`] - comma-delimited, RFC 4180 quoting
//! - [`XlsxRenderer`] - one worksheet named `Policies`
//! - [`PdfRenderer`] - A4 landscape table with a repeated header band

#![warn(missing_docs)]
#![warn(unreachable_pub)]

pub mod delimited;
pub mod document;
pub mod error;
pub mod format;
pub mod workbook;

pub use delimited::CsvRenderer;
pub use document::{PdfLayout, PdfRenderer};
pub use error::ExportError;
pub use format::{export_to_file, renderer_for, ExportFormat, Renderer, DEFAULT_FILE_STEM};
pub use workbook::{XlsxRenderer, SHEET_NAME};

use mswasth_record::PolicyRecord;

/// Version of this crate
pub const VERSION: &str = env!("CARGO_PKG_VERSION");

/// Result type for export operations
pub type Result<T> = std::result::Result<T, ExportError>;

/// Header names and display rows shared by all renderers
pub(crate) fn table_of(records: &[PolicyRecord]) -> (Vec<&'static str>, Vec<Vec<String>>) {
    let Some(first) = records.first() else {
        return (Vec::new(), Vec::new());
    };
    let headers = first.entries().map(|(name, _)| name).collect();
    let rows = records
        .iter()
        .map(|record| record.entries().map(|(_, value)| value).collect())
        .collect();
    (headers, rows)
}
