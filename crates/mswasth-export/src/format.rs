//! Format selection and file output

use crate::{CsvRenderer, ExportError, PdfRenderer, Result, XlsxRenderer};
use mswasth_record::PolicyRecord;
use std::fmt;
use std::path::Path;
use std::str::FromStr;

/// File stem used when no output path is given
pub const DEFAULT_FILE_STEM: &str = "policies";

/// Renders the record collection into one document
pub trait Renderer {
    /// Document bytes for `records`
    fn render(&self, records: &[PolicyRecord]) -> Result<Vec<u8>>;
}

/// Supported export formats
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ExportFormat {
    /// Comma-separated values
    Csv,
    /// Excel workbook
    Xlsx,
    /// PDF table
    Pdf,
}

impl ExportFormat {
    /// All formats
    pub const ALL: [ExportFormat; 3] = [ExportFormat::Csv, ExportFormat::Xlsx, ExportFormat::Pdf];

    /// File extension without the dot
    #[inline]
    #[must_use]
    pub fn extension(&self) -> &'static str {
        match self {
            ExportFormat::Csv => "csv",
            ExportFormat::Xlsx => "xlsx",
            ExportFormat::Pdf => "pdf",
        }
    }

    /// MIME type of the rendered document
    #[must_use]
    pub fn mime_type(&self) -> &'static str {
        match self {
            ExportFormat::Csv => "text/csv;charset=utf-8",
            ExportFormat::Xlsx => "application/vnd.openxmlformats-officedocument.spreadsheetml.sheet",
            ExportFormat::Pdf => "application/pdf",
        }
    }

    /// Default output file name, e.g. `policies.csv`
    #[must_use]
    pub fn default_file_name(&self) -> String {
        format!("{DEFAULT_FILE_STEM}.{}", self.extension())
    }
}

impl fmt::Display for ExportFormat {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.extension())
    }
}

impl FromStr for ExportFormat {
    type Err = ExportError;

    fn from_str(s: &str) -> std::result::Result<Self, Self::Err> {
        match s.trim().trim_start_matches('.').to_ascii_lowercase().as_str() {
            "csv" => Ok(ExportFormat::Csv),
            "xlsx" => Ok(ExportFormat::Xlsx),
            "pdf" => Ok(ExportFormat::Pdf),
            _ => Err(ExportError::UnknownFormat(s.to_string())),
        }
    }
}

/// Renderer with default settings for `format`
#[must_use]
pub fn renderer_for(format: ExportFormat) -> Box<dyn Renderer> {
    match format {
        ExportFormat::Csv => Box::new(CsvRenderer::new()),
        ExportFormat::Xlsx => Box::new(XlsxRenderer::new()),
        ExportFormat::Pdf => Box::new(PdfRenderer::new()),
    }
}

/// Render `records` as `format` and write the document to `path`
pub fn export_to_file(records: &[PolicyRecord], format: ExportFormat, path: impl AsRef<Path>) -> Result<()> {
    let path = path.as_ref();
    let bytes = renderer_for(format).render(records)?;
    std::fs::write(path, &bytes).map_err(|e| ExportError::io_error(path, e))?;
    tracing::info!(
        format = %format,
        records = records.len(),
        bytes = bytes.len(),
        path = %path.display(),
        "exported policy records"
    );
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn format_names_parse_loosely() {
        assert_eq!("CSV".parse::<ExportFormat>().unwrap(), ExportFormat::Csv);
        assert_eq!(".xlsx".parse::<ExportFormat>().unwrap(), ExportFormat::Xlsx);
        assert!(matches!("docx".parse::<ExportFormat>(), Err(ExportError::UnknownFormat(_))));
    }

    #[test]
    fn default_file_names() {
        let names: Vec<_> = ExportFormat::ALL.iter().map(ExportFormat::default_file_name).collect();
        assert_eq!(names, ["policies.csv", "policies.xlsx", "policies.pdf"]);
    }
}
