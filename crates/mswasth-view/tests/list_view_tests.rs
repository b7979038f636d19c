use mswasth_record::{Field, PolicyRecord};
use mswasth_test_utils::{arb_records, sample_records};
use mswasth_view::{filter, page_count, paginate, sort, ListView, SortConfig, SortDirection, PAGE_SIZE};
use pretty_assertions::assert_eq;
use proptest::prelude::*;

fn ids(rows: &[&PolicyRecord]) -> Vec<String> {
    rows.iter().map(|r| r.id.to_string()).collect()
}

#[test]
fn twenty_five_records_split_into_three_pages() {
    let records = sample_records(25);
    let refs: Vec<&PolicyRecord> = records.iter().collect();

    assert_eq!(page_count(records.len()), 3);
    assert_eq!(ids(paginate(&refs, 1)), ids(&refs[0..10]));
    assert_eq!(ids(paginate(&refs, 3)), ids(&refs[20..25]));
    assert_eq!(paginate(&refs, 3).len(), 5);
}

#[test]
fn page_beyond_the_end_is_clamped() {
    let records = sample_records(25);
    let mut view = ListView::new();
    view.go_to_page(9);

    let page = view.render(&records);
    assert_eq!(page.page, 3);
    assert_eq!(page.rows.len(), 5);
    assert_eq!(page.first_row(), 21);
    assert!(page.has_prev());
    assert!(!page.has_next());
}

#[test]
fn deleting_records_pulls_the_page_back() {
    let mut records = sample_records(21);
    let mut view = ListView::new();
    view.go_to_page(3);
    assert_eq!(view.render(&records).page, 3);

    records.pop();
    assert_eq!(view.render(&records).page, 2);
}

#[test]
fn search_and_sort_changes_return_to_page_one() {
    let records = sample_records(30);
    let mut view = ListView::new();

    view.next_page(&records);
    view.next_page(&records);
    assert_eq!(view.page(), 3);
    view.next_page(&records);
    assert_eq!(view.page(), 3);

    view.set_search("a");
    assert_eq!(view.page(), 1);

    view.go_to_page(2);
    view.request_sort(Field::Premium);
    assert_eq!(view.page(), 1);
    assert_eq!(view.sort(), SortConfig::ascending(Field::Premium));

    view.prev_page();
    assert_eq!(view.page(), 1);
}

#[test]
fn header_clicks_toggle_direction() {
    let mut view = ListView::new();
    view.request_sort(Field::CustomerName);
    view.request_sort(Field::CustomerName);
    assert_eq!(view.sort().direction, SortDirection::Descending);
    view.request_sort(Field::CustomerName);
    assert_eq!(view.sort().direction, SortDirection::Ascending);
}

#[test]
fn search_runs_before_pagination() {
    let mut records = sample_records(40);
    records[33].remarks = "Needle in the stack".to_string();

    let mut view = ListView::new();
    view.go_to_page(4);
    view.set_search("NEEDLE");
    let page = view.render(&records);

    assert_eq!(page.total_matches, 1);
    assert_eq!(page.rows[0].id, records[33].id);
}

proptest! {
    #[test]
    fn prop_empty_search_keeps_everything_in_order(records in arb_records(30)) {
        let hits = filter(&records, "");
        let expected: Vec<&PolicyRecord> = records.iter().collect();
        prop_assert_eq!(ids(&hits), ids(&expected));
    }

    #[test]
    fn prop_sort_is_a_permutation_ordered_by_key(records in arb_records(30)) {
        let mut rows: Vec<&PolicyRecord> = records.iter().collect();
        sort(&mut rows, SortConfig::ascending(Field::CustomerName));

        prop_assert_eq!(rows.len(), records.len());
        for pair in rows.windows(2) {
            prop_assert!(pair[0].customer_name <= pair[1].customer_name);
        }
    }

    #[test]
    fn prop_pages_cover_every_match_once(records in arb_records(45)) {
        let refs: Vec<&PolicyRecord> = records.iter().collect();
        let pages = page_count(refs.len());
        prop_assert!(pages >= 1);

        let mut seen = Vec::new();
        for page in 1..=pages {
            let slice = paginate(&refs, page);
            prop_assert!(slice.len() <= PAGE_SIZE);
            seen.extend(ids(slice));
        }
        prop_assert_eq!(seen, ids(&refs));
    }
}
