//! XLSX rendering

use crate::{Renderer, Result};
use mswasth_record::{Field, PolicyRecord};
use rust_xlsxwriter::{Format, Workbook};

/// Name of the single worksheet
pub const SHEET_NAME: &str = "Policies";

/// One-sheet workbook; premium and tenure are written as numbers
#[derive(Debug, Clone, Copy, Default)]
pub struct XlsxRenderer {
    bold_header: bool,
}

impl XlsxRenderer {
    /// Plain header row
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Render the header row in bold
    #[inline]
    #[must_use]
    pub fn with_bold_header(mut self, bold: bool) -> Self {
        self.bold_header = bold;
        self
    }
}

impl Renderer for XlsxRenderer {
    fn render(&self, records: &[PolicyRecord]) -> Result<Vec<u8>> {
        let mut workbook = Workbook::new();
        let sheet = workbook.add_worksheet();
        sheet.set_name(SHEET_NAME)?;

        if !records.is_empty() {
            let header_format = if self.bold_header {
                Format::new().set_bold()
            } else {
                Format::new()
            };
            for (col, field) in (0u16..).zip(Field::ALL) {
                sheet.write_string_with_format(0, col, field.name(), &header_format)?;
            }

            for (row, record) in (1u32..).zip(records) {
                for (col, field) in (0u16..).zip(Field::ALL) {
                    match numeric_value(record, field) {
                        Some(number) => {
                            sheet.write_number(row, col, number)?;
                        }
                        None => {
                            let text = record.display(field);
                            if !text.is_empty() {
                                sheet.write_string(row, col, &text)?;
                            }
                        }
                    }
                }
            }
        }

        let bytes = workbook.save_to_buffer()?;
        tracing::debug!(rows = records.len(), bytes = bytes.len(), "rendered workbook");
        Ok(bytes)
    }
}

fn numeric_value(record: &PolicyRecord, field: Field) -> Option<f64> {
    match field {
        Field::Premium => record.premium,
        Field::Tenure => record.tenure.map(f64::from),
        _ => None,
    }
}
