use mswasth_catalog::{CatalogError, LookupTable};
use proptest::prelude::*;
use std::io::Write;

#[test]
fn loads_yaml_table_from_disk() {
    let mut file = tempfile::Builder::new().suffix(".yaml").tempfile().unwrap();
    writeln!(
        file,
        "ACME:\n  Basic:\n    - {{ Premium: 250, Tenure: 1, CSE Name: Rita }}\n    - {{ Premium: 450, Tenure: 2, CSE Name: Rita }}"
    )
    .unwrap();

    let table = LookupTable::from_path(file.path()).unwrap();
    assert_eq!(table.len(), 2);
    assert_eq!(table.find_plan("ACME", "Basic", 450.0).unwrap().tenure, 2);
}

#[test]
fn rejects_unknown_extension() {
    let file = tempfile::Builder::new().suffix(".csv").tempfile().unwrap();
    let err = LookupTable::from_path(file.path()).unwrap_err();
    assert!(matches!(err, CatalogError::UnsupportedFormat(ext) if ext == "csv"));
}

#[test]
fn missing_file_is_io_error() {
    let err = LookupTable::from_path("/definitely/not/here.json").unwrap_err();
    assert!(matches!(err, CatalogError::Io { .. }));
}

proptest! {
    #[test]
    fn prop_unknown_partners_have_no_products(partner in "[a-z]{1,12}") {
        // builtin partner names are all upper case or title case with spaces
        let table = LookupTable::builtin();
        prop_assert!(table.products(&partner).is_empty());
    }
}

#[test]
fn every_builtin_triple_is_found() {
    let table = LookupTable::builtin();
    for (partner, product, plan) in table.iter() {
        let found = table.find_plan(partner, product, plan.premium).unwrap();
        assert_eq!(found, plan);
    }
}
