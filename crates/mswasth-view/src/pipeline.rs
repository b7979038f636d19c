//! Filter, sort and paginate stages

use crate::sorting::{compare_by, SortConfig, SortDirection};
use mswasth_record::{Field, PolicyRecord};

/// Rows per page
pub const PAGE_SIZE: usize = 10;

/// Keep records where any field's text contains `term`, ignoring case
///
/// An empty term keeps everything in input order.
#[must_use]
pub fn filter<'a>(records: &'a [PolicyRecord], term: &str) -> Vec<&'a PolicyRecord> {
    if term.is_empty() {
        return records.iter().collect();
    }
    let needle = term.to_lowercase();
    records
        .iter()
        .filter(|record| {
            Field::ALL
                .iter()
                .any(|field| record.display(*field).to_lowercase().contains(&needle))
        })
        .collect()
}

/// Stable sort in place; equal keys keep their relative order
pub fn sort(records: &mut [&PolicyRecord], config: SortConfig) {
    let Some(field) = config.key else {
        return;
    };
    match config.direction {
        SortDirection::Ascending => records.sort_by(|a, b| compare_by(field, a, b)),
        SortDirection::Descending => records.sort_by(|a, b| compare_by(field, b, a)),
    }
}

/// Number of pages for `len` items; never less than one
#[inline]
#[must_use]
pub fn page_count(len: usize) -> usize {
    len.div_ceil(PAGE_SIZE).max(1)
}

/// Clamp a 1-based page number into `[1, page_count(len)]`
#[inline]
#[must_use]
pub fn clamp_page(page: usize, len: usize) -> usize {
    page.clamp(1, page_count(len))
}

/// Items on a 1-based page, after clamping the page number
#[must_use]
pub fn paginate<T>(items: &[T], page: usize) -> &[T] {
    let page = clamp_page(page, items.len());
    let start = (page - 1) * PAGE_SIZE;
    let end = (start + PAGE_SIZE).min(items.len());
    &items[start.min(items.len())..end]
}

#[cfg(test)]
mod tests {
    use super::*;

    fn named(names: &[&str]) -> Vec<PolicyRecord> {
        names
            .iter()
            .map(|n| {
                let mut r = PolicyRecord::empty();
                r.customer_name = (*n).to_string();
                r
            })
            .collect()
    }

    #[test]
    fn filter_is_case_insensitive_across_fields() {
        let mut records = named(&["Asha", "Bikash"]);
        records[1].region = "NORTH-east".to_string();

        let hits = filter(&records, "north");
        assert_eq!(hits.len(), 1);
        assert_eq!(hits[0].customer_name, "Bikash");
    }

    #[test]
    fn filter_matches_numeric_text() {
        let mut records = named(&["A", "B"]);
        records[0].premium = Some(490.0);
        assert_eq!(filter(&records, "49").len(), 1);
    }

    #[test]
    fn descending_sort_keeps_ties_in_input_order() {
        let mut records = named(&["b", "a", "b", "c"]);
        records[0].region = "first".to_string();
        records[2].region = "second".to_string();

        let mut rows: Vec<&PolicyRecord> = records.iter().collect();
        sort(&mut rows, SortConfig::descending(Field::CustomerName));

        let order: Vec<_> = rows.iter().map(|r| (r.customer_name.as_str(), r.region.as_str())).collect();
        assert_eq!(order, vec![("c", ""), ("b", "first"), ("b", "second"), ("a", "")]);
    }

    #[test]
    fn empty_collection_has_one_empty_page() {
        let empty: Vec<PolicyRecord> = Vec::new();
        assert_eq!(page_count(0), 1);
        assert!(paginate(&empty, 1).is_empty());
        assert!(paginate(&empty, 7).is_empty());
    }
}
