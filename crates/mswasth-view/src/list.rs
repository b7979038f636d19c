//! List view state

use crate::pipeline::{clamp_page, filter, page_count, sort, PAGE_SIZE};
use crate::sorting::SortConfig;
use mswasth_record::{Field, PolicyRecord};

/// Columns shown in the record table, in display order
pub const TABLE_COLUMNS: [Field; 6] = [
    Field::CustomerName,
    Field::PartnerName,
    Field::ProductDetails,
    Field::Premium,
    Field::EnrolmentDate,
    Field::MobileNumber,
];

/// One rendered page of the list
#[derive(Debug, Clone, PartialEq)]
pub struct PageView<'a> {
    /// Records on this page, in display order
    pub rows: Vec<&'a PolicyRecord>,
    /// Current page, 1-based and clamped
    pub page: usize,
    /// Total number of pages, at least one
    pub total_pages: usize,
    /// Number of records matching the search
    pub total_matches: usize,
}

impl PageView<'_> {
    /// Whether a previous page exists
    #[inline]
    #[must_use]
    pub fn has_prev(&self) -> bool {
        self.page > 1
    }

    /// Whether a next page exists
    #[inline]
    #[must_use]
    pub fn has_next(&self) -> bool {
        self.page < self.total_pages
    }

    /// 1-based index of the first row on this page, 0 when empty
    #[must_use]
    pub fn first_row(&self) -> usize {
        if self.rows.is_empty() {
            0
        } else {
            (self.page - 1) * PAGE_SIZE + 1
        }
    }
}

/// Search term, sort and page for the record list
///
/// Changing the search term or the sort returns to the first page. The page
/// number is clamped against the collection at render time, so it stays valid
/// after deletions shrink the list.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ListView {
    search: String,
    sort: SortConfig,
    page: usize,
}

impl ListView {
    /// Empty search, no sort, first page
    #[must_use]
    pub fn new() -> Self {
        Self {
            search: String::new(),
            sort: SortConfig::default(),
            page: 1,
        }
    }

    /// Start from a given sort
    #[inline]
    #[must_use]
    pub fn with_sort(mut self, sort: SortConfig) -> Self {
        self.sort = sort;
        self
    }

    /// Current search term
    #[inline]
    #[must_use]
    pub fn search(&self) -> &str {
        &self.search
    }

    /// Current sort
    #[inline]
    #[must_use]
    pub fn sort(&self) -> SortConfig {
        self.sort
    }

    /// Requested page (may exceed the page count until the next render)
    #[inline]
    #[must_use]
    pub fn page(&self) -> usize {
        self.page.max(1)
    }

    /// Replace the search term and return to page one
    pub fn set_search(&mut self, term: impl Into<String>) {
        self.search = term.into();
        self.page = 1;
    }

    /// Column-header click; returns to page one
    pub fn request_sort(&mut self, field: Field) {
        self.sort = self.sort.request(field);
        self.page = 1;
    }

    /// Advance one page, stopping at the last
    pub fn next_page(&mut self, records: &[PolicyRecord]) {
        let total = page_count(filter(records, &self.search).len());
        self.page = (self.page() + 1).min(total);
    }

    /// Go back one page, stopping at the first
    pub fn prev_page(&mut self) {
        self.page = self.page().saturating_sub(1).max(1);
    }

    /// Jump to a page; out-of-range values are clamped on render
    pub fn go_to_page(&mut self, page: usize) {
        self.page = page.max(1);
    }

    /// Run filter, sort and paginate over `records`
    pub fn render<'a>(&mut self, records: &'a [PolicyRecord]) -> PageView<'a> {
        let mut matches = filter(records, &self.search);
        sort(&mut matches, self.sort);

        let total_matches = matches.len();
        self.page = clamp_page(self.page, total_matches);
        let start = (self.page - 1) * PAGE_SIZE;
        let rows = matches
            .into_iter()
            .skip(start)
            .take(PAGE_SIZE)
            .collect();

        PageView {
            rows,
            page: self.page,
            total_pages: page_count(total_matches),
            total_matches,
        }
    }
}
