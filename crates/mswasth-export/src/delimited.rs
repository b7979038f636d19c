//! CSV rendering

use crate::{table_of, ExportError, Renderer, Result};
use mswasth_record::PolicyRecord;

/// Comma-delimited text, `\n` line endings
///
/// Values containing the delimiter, quotes or line breaks are quoted.
#[derive(Debug, Clone, Copy, Default)]
pub struct CsvRenderer;

impl CsvRenderer {
    /// Create a renderer
    #[must_use]
    pub fn new() -> Self {
        Self
    }
}

impl Renderer for CsvRenderer {
    fn render(&self, records: &[PolicyRecord]) -> Result<Vec<u8>> {
        let (headers, rows) = table_of(records);
        let mut writer = csv::WriterBuilder::new()
            .terminator(csv::Terminator::Any(b'\n'))
            .from_writer(Vec::new());

        if !headers.is_empty() {
            writer.write_record(&headers)?;
        }
        for row in &rows {
            writer.write_record(row)?;
        }
        writer
            .into_inner()
            .map_err(|e| ExportError::io_error("<csv buffer>", e.into_error()))
    }
}
