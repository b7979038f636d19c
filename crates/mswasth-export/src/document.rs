//! PDF rendering
//!
//! The table is laid out by hand with the standard Helvetica fonts:
//!
//! ```text
//!  ┌────────────────────────────────────────────┐  ← top margin
//!  │ id │ partnerName │ productDetails │ ...    │  ← header band (filled)
//!  ├────┼─────────────┼────────────────┼────────┤
//!  │ .. │ ..          │ ..             │        │  ← body rows, striped
//!  └────────────────────────────────────────────┘
//! ```
//!
//! Column widths are proportional to the longest value in each column and
//! cell text wraps within its column. When the next row would cross the
//! bottom margin a new page starts and the header band is drawn again. A row
//! taller than a whole page is split, its remaining lines continuing on the
//! next page.

use crate::{table_of, Renderer, Result};
use lopdf::content::{Content, Operation};
use lopdf::{dictionary, Document, Object, ObjectId, Stream, StringFormat};
use mswasth_record::PolicyRecord;

/// Page geometry and styling for [`PdfRenderer`]
#[derive(Debug, Clone, PartialEq)]
pub struct PdfLayout {
    /// Page width in points
    pub page_width: f32,
    /// Page height in points
    pub page_height: f32,
    /// Space above the table
    pub margin_top: f32,
    /// Space below the table
    pub margin_bottom: f32,
    /// Space left and right of the table
    pub margin_side: f32,
    /// Body font size
    pub font_size: f32,
    /// Header font size
    pub header_font_size: f32,
    /// Padding inside each cell
    pub cell_padding: f32,
    /// Header band fill colour
    pub header_fill: [u8; 3],
    /// Fill of every other body row
    pub stripe_fill: [u8; 3],
}

impl Default for PdfLayout {
    /// A4 landscape
    fn default() -> Self {
        Self {
            page_width: 841.89,
            page_height: 595.28,
            margin_top: 20.0,
            margin_bottom: 20.0,
            margin_side: 14.0,
            font_size: 6.0,
            header_font_size: 7.0,
            cell_padding: 2.0,
            header_fill: [22, 160, 133],
            stripe_fill: [245, 245, 245],
        }
    }
}

impl PdfLayout {
    fn line_height(size: f32) -> f32 {
        size * 1.15
    }

    // Average Helvetica glyph advance as a fraction of the font size.
    fn chars_that_fit(width: f32, size: f32) -> usize {
        let usable = (width / (size * 0.5)).floor();
        if usable < 1.0 {
            1
        } else {
            usable as usize
        }
    }
}

/// A4 landscape table of every field
#[derive(Debug, Clone, Default)]
pub struct PdfRenderer {
    layout: PdfLayout,
}

impl PdfRenderer {
    /// Renderer with the default layout
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Replace the layout
    #[inline]
    #[must_use]
    pub fn with_layout(mut self, layout: PdfLayout) -> Self {
        self.layout = layout;
        self
    }

    /// Layout in use
    #[inline]
    #[must_use]
    pub fn layout(&self) -> &PdfLayout {
        &self.layout
    }

    /// Lay out the table into per-page content streams
    pub(crate) fn paginate(&self, headers: &[&str], rows: &[Vec<String>]) -> Vec<Vec<Operation>> {
        if headers.is_empty() {
            return vec![Vec::new()];
        }
        let layout = &self.layout;
        let widths = self.column_widths(headers, rows);

        let header_cells: Vec<Vec<String>> = headers
            .iter()
            .zip(&widths)
            .map(|(h, w)| wrap(h, PdfLayout::chars_that_fit(w - 2.0 * layout.cell_padding, layout.header_font_size)))
            .collect();

        let mut pages = Vec::new();
        let mut ops = Vec::new();
        let body_top = self.draw_header(&mut ops, &header_cells, &widths);
        let page_lines = self.lines_that_fit(body_top - layout.margin_bottom);
        let mut y = body_top;
        let mut fresh_page = true;
        let mut stripe = false;

        for row in rows {
            let mut cells: Vec<Vec<String>> = row
                .iter()
                .zip(&widths)
                .map(|(v, w)| wrap(v, PdfLayout::chars_that_fit(w - 2.0 * layout.cell_padding, layout.font_size)))
                .collect();

            loop {
                let tallest = cells.iter().map(Vec::len).max().unwrap_or(0).max(1);
                let room = self.lines_that_fit(y - layout.margin_bottom);
                if tallest <= room {
                    y = self.draw_row(&mut ops, &cells, &widths, y, stripe);
                    fresh_page = false;
                    break;
                }
                if !fresh_page && (tallest <= page_lines || room == 0) {
                    pages.push(std::mem::take(&mut ops));
                    y = self.draw_header(&mut ops, &header_cells, &widths);
                    fresh_page = true;
                    stripe = false;
                    continue;
                }
                // Taller than a whole page: draw what fits and carry the rest over.
                let take = room.max(1);
                let rest: Vec<Vec<String>> = cells
                    .iter_mut()
                    .map(|lines| lines.split_off(take.min(lines.len())))
                    .collect();
                self.draw_row(&mut ops, &cells, &widths, y, stripe);
                pages.push(std::mem::take(&mut ops));
                y = self.draw_header(&mut ops, &header_cells, &widths);
                fresh_page = true;
                cells = rest;
            }
            stripe = !stripe;
        }
        pages.push(ops);
        pages
    }

    /// Body lines that fit in `space` points, padding included
    #[allow(clippy::cast_possible_truncation, clippy::cast_sign_loss)]
    fn lines_that_fit(&self, space: f32) -> usize {
        let lines = ((space - 2.0 * self.layout.cell_padding) / PdfLayout::line_height(self.layout.font_size)).floor();
        if lines < 1.0 {
            0
        } else {
            lines as usize
        }
    }

    /// Draws one body row with its top at `y`; returns the y below it
    fn draw_row(&self, ops: &mut Vec<Operation>, cells: &[Vec<String>], widths: &[f32], y: f32, stripe: bool) -> f32 {
        let layout = &self.layout;
        let height = self.row_height(cells, layout.font_size);
        if stripe {
            fill_rect(ops, layout.stripe_fill, layout.margin_side, y - height, widths.iter().sum(), height);
        }
        self.draw_cells(ops, cells, widths, y, layout.font_size, "F1", [0, 0, 0]);
        y - height
    }

    fn column_widths(&self, headers: &[&str], rows: &[Vec<String>]) -> Vec<f32> {
        let weights: Vec<f32> = (0..headers.len())
            .map(|col| {
                let longest = rows
                    .iter()
                    .filter_map(|row| row.get(col))
                    .map(|v| v.chars().count())
                    .chain(std::iter::once(headers[col].chars().count()))
                    .max()
                    .unwrap_or(0);
                longest.clamp(4, 30) as f32
            })
            .collect();
        let total: f32 = weights.iter().sum();
        let usable = self.layout.page_width - 2.0 * self.layout.margin_side;
        weights.iter().map(|w| usable * w / total).collect()
    }

    fn row_height(&self, cells: &[Vec<String>], size: f32) -> f32 {
        let lines = cells.iter().map(Vec::len).max().unwrap_or(1).max(1);
        lines as f32 * PdfLayout::line_height(size) + 2.0 * self.layout.cell_padding
    }

    /// Draws the header band at the top of a fresh page; returns the y below it
    fn draw_header(&self, ops: &mut Vec<Operation>, cells: &[Vec<String>], widths: &[f32]) -> f32 {
        let layout = &self.layout;
        let top = layout.page_height - layout.margin_top;
        let height = self.row_height(cells, layout.header_font_size);
        fill_rect(ops, layout.header_fill, layout.margin_side, top - height, widths.iter().sum(), height);
        self.draw_cells(ops, cells, widths, top, layout.header_font_size, "F2", [255, 255, 255]);
        top - height
    }

    #[allow(clippy::too_many_arguments)]
    fn draw_cells(
        &self,
        ops: &mut Vec<Operation>,
        cells: &[Vec<String>],
        widths: &[f32],
        top: f32,
        size: f32,
        font: &str,
        color: [u8; 3],
    ) {
        let pad = self.layout.cell_padding;
        let leading = PdfLayout::line_height(size);
        ops.push(Operation::new("BT", vec![]));
        ops.push(Operation::new("Tf", vec![font.into(), Object::Real(size)]));
        ops.push(Operation::new("rg", rgb(color)));

        let mut x = self.layout.margin_side;
        for (lines, width) in cells.iter().zip(widths) {
            for (i, line) in lines.iter().enumerate() {
                let baseline = top - pad - size - i as f32 * leading;
                ops.push(Operation::new("Tm", vec![
                    Object::Integer(1),
                    Object::Integer(0),
                    Object::Integer(0),
                    Object::Integer(1),
                    Object::Real(x + pad),
                    Object::Real(baseline),
                ]));
                ops.push(Operation::new("Tj", vec![win_ansi(line)]));
            }
            x += width;
        }
        ops.push(Operation::new("ET", vec![]));
    }
}

impl Renderer for PdfRenderer {
    fn render(&self, records: &[PolicyRecord]) -> Result<Vec<u8>> {
        let (headers, rows) = table_of(records);
        let pages = self.paginate(&headers, &rows);
        let page_count = pages.len();

        let mut doc = Document::with_version("1.5");
        let pages_id = doc.new_object_id();
        let body_font = doc.add_object(standard_font("Helvetica"));
        let header_font = doc.add_object(standard_font("Helvetica-Bold"));
        let resources_id = doc.add_object(dictionary! {
            "Font" => dictionary! {
                "F1" => body_font,
                "F2" => header_font,
            },
        });

        let mut kids: Vec<Object> = Vec::with_capacity(page_count);
        for operations in pages {
            let content = Content { operations }.encode()?;
            let content_id = doc.add_object(Stream::new(dictionary! {}, content));
            let page_id: ObjectId = doc.add_object(dictionary! {
                "Type" => "Page",
                "Parent" => pages_id,
                "Contents" => content_id,
            });
            kids.push(page_id.into());
        }

        let pages_dict = dictionary! {
            "Type" => "Pages",
            "Kids" => kids,
            "Count" => i64::try_from(page_count).unwrap_or(i64::MAX),
            "Resources" => resources_id,
            "MediaBox" => vec![
                Object::Integer(0),
                Object::Integer(0),
                Object::Real(self.layout.page_width),
                Object::Real(self.layout.page_height),
            ],
        };
        doc.objects.insert(pages_id, Object::Dictionary(pages_dict));

        let catalog_id = doc.add_object(dictionary! {
            "Type" => "Catalog",
            "Pages" => pages_id,
        });
        doc.trailer.set("Root", catalog_id);
        doc.compress();

        let mut bytes = Vec::new();
        doc.save_to(&mut bytes).map_err(lopdf::Error::from)?;
        tracing::debug!(rows = records.len(), pages = page_count, bytes = bytes.len(), "rendered pdf");
        Ok(bytes)
    }
}

fn standard_font(name: &str) -> lopdf::Dictionary {
    dictionary! {
        "Type" => "Font",
        "Subtype" => "Type1",
        "BaseFont" => Object::Name(name.as_bytes().to_vec()),
        "Encoding" => "WinAnsiEncoding",
    }
}

fn fill_rect(ops: &mut Vec<Operation>, color: [u8; 3], x: f32, y: f32, width: f32, height: f32) {
    ops.push(Operation::new("rg", rgb(color)));
    ops.push(Operation::new("re", vec![
        Object::Real(x),
        Object::Real(y),
        Object::Real(width),
        Object::Real(height),
    ]));
    ops.push(Operation::new("f", vec![]));
}

fn rgb(color: [u8; 3]) -> Vec<Object> {
    color.iter().map(|c| Object::Real(f32::from(*c) / 255.0)).collect()
}

/// Latin-1 bytes for the standard fonts; other characters become `?`
fn win_ansi(text: &str) -> Object {
    let bytes = text
        .chars()
        .map(|c| u8::try_from(u32::from(c)).unwrap_or(b'?'))
        .collect();
    Object::String(bytes, StringFormat::Literal)
}

/// Break `text` into lines of at most `width` characters, preferring spaces
fn wrap(text: &str, width: usize) -> Vec<String> {
    let mut lines = Vec::new();
    let mut current = String::new();
    for word in text.split_whitespace() {
        let mut word = word;
        loop {
            let needed = if current.is_empty() {
                word.chars().count()
            } else {
                current.chars().count() + 1 + word.chars().count()
            };
            if needed <= width {
                if !current.is_empty() {
                    current.push(' ');
                }
                current.push_str(word);
                break;
            }
            if !current.is_empty() {
                lines.push(std::mem::take(&mut current));
                continue;
            }
            let split = word.char_indices().nth(width).map_or(word.len(), |(i, _)| i);
            lines.push(word[..split].to_string());
            word = &word[split..];
            if word.is_empty() {
                break;
            }
        }
    }
    if !current.is_empty() {
        lines.push(current);
    }
    lines
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn wrap_prefers_word_boundaries() {
        assert_eq!(wrap("Asha Rani Das", 9), vec!["Asha Rani", "Das"]);
        assert_eq!(wrap("abcdefghij", 4), vec!["abcd", "efgh", "ij"]);
        assert!(wrap("", 4).is_empty());
    }

    #[test]
    fn non_latin_text_is_replaced() {
        let Object::String(bytes, _) = win_ansi("Dé₹") else {
            panic!("expected a string object");
        };
        assert_eq!(bytes, vec![b'D', 0xE9, b'?']);
    }

    #[test]
    fn empty_table_is_one_blank_page() {
        let pages = PdfRenderer::new().paginate(&[], &[]);
        assert_eq!(pages.len(), 1);
        assert!(pages[0].is_empty());
    }

    #[test]
    fn long_tables_break_onto_new_pages_with_header() {
        let headers = ["a", "b"];
        let rows: Vec<Vec<String>> = (0..200).map(|i| vec![i.to_string(), "x".to_string()]).collect();
        let pages = PdfRenderer::new().paginate(&headers, &rows);

        assert!(pages.len() > 1);
        for page in &pages {
            let bold = page
                .iter()
                .filter(|op| {
                    op.operator == "Tf" && matches!(op.operands.first(), Some(Object::Name(name)) if name.as_slice() == b"F2")
                })
                .count();
            assert_eq!(bold, 1);
        }
    }

    fn real(object: &Object) -> f32 {
        match object {
            Object::Real(v) => *v,
            Object::Integer(v) => *v as f32,
            other => panic!("expected a number, got {other:?}"),
        }
    }

    #[test]
    fn overlong_row_continues_on_following_pages() {
        let renderer = PdfRenderer::new();
        let bottom = renderer.layout().margin_bottom;
        let remarks = format!("{}END", "word ".repeat(20_000));
        let rows = vec![
            vec!["1".to_string(), "short".to_string()],
            vec!["2".to_string(), remarks],
            vec!["3".to_string(), "after".to_string()],
        ];
        let pages = renderer.paginate(&["id", "remarks"], &rows);
        assert!(pages.len() > 2);

        for op in pages.iter().flatten() {
            match op.operator.as_str() {
                "Tm" => assert!(real(&op.operands[5]) >= bottom, "text below the margin: {op:?}"),
                "re" => assert!(real(&op.operands[1]) >= bottom - 0.01, "fill below the margin: {op:?}"),
                _ => {}
            }
        }

        let words: usize = pages
            .iter()
            .flatten()
            .filter(|op| op.operator == "Tj")
            .filter_map(|op| match op.operands.first() {
                Some(Object::String(bytes, _)) => Some(String::from_utf8_lossy(bytes).matches("word").count()),
                _ => None,
            })
            .sum();
        assert_eq!(words, 20_000);

        let page_with = |wanted: &dyn Fn(&str) -> bool| {
            pages.iter().position(|page| {
                page.iter().any(|op| {
                    op.operator == "Tj"
                        && matches!(op.operands.first(), Some(Object::String(bytes, _)) if wanted(&String::from_utf8_lossy(bytes)))
                })
            })
        };
        let end = page_with(&|t| t.ends_with("END")).unwrap();
        let after = page_with(&|t| t == "after").unwrap();
        assert!(end > 0);
        assert!(after >= end);
    }
}
