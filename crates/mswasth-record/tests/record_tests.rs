use mswasth_record::{Field, FieldKind, Gender, PolicyRecord, RecordId};
use pretty_assertions::assert_eq;
use proptest::prelude::*;

const STORED_COLLECTION: &str = r#"[
  {"id":"1718012345678","partnerName":"BANGIYA","productDetails":"Combo","premium":"980","tenure":2,
   "cseName":"Jahed","branchName":"Kalna","branchCode":"KL01","region":"East","customerName":"Asha Das",
   "gender":"Female","dateOfBirth":"1990-04-02","mobileNumber":"9800000000","customerId":"C-1",
   "enrolmentDate":"2024-06-10","savingsAcNo":"001122","csbCode":"","d2cCode":"RO-7",
   "nomineeName":"Bikash Das","nomineeDob":"","nomineeRelationship":"Spouse",
   "nomineeMobileNumber":"","nomineeGender":"Male","remarks":""}
]"#;

#[test]
fn reads_collection_written_by_the_browser_portal() {
    let records: Vec<PolicyRecord> = serde_json::from_str(STORED_COLLECTION).unwrap();
    assert_eq!(records.len(), 1);

    let record = &records[0];
    assert_eq!(record.id, RecordId::new("1718012345678"));
    assert_eq!(record.premium, Some(980.0));
    assert_eq!(record.tenure, Some(2));
    assert_eq!(record.gender, Gender::Female);
    assert_eq!(record.nominee_gender, Gender::Male);
    assert_eq!(record.display(Field::D2cCode), "RO-7");
}

#[test]
fn written_keys_match_field_catalogue() {
    let record = PolicyRecord::with_id(RecordId::generate());
    let json = serde_json::to_string(&record).unwrap();
    let value: serde_json::Value = serde_json::from_str(&json).unwrap();
    let mut keys: Vec<&str> = value.as_object().unwrap().keys().map(String::as_str).collect();
    keys.sort_unstable();

    let mut expected: Vec<&str> = Field::ALL.iter().map(Field::name).collect();
    expected.sort_unstable();
    assert_eq!(keys, expected);
}

fn text_fields() -> impl Strategy<Value = Field> {
    proptest::sample::select(
        Field::ALL
            .iter()
            .copied()
            .filter(|f| matches!(f.kind(), FieldKind::Text | FieldKind::Date | FieldKind::Phone | FieldKind::LongText))
            .collect::<Vec<_>>(),
    )
}

proptest! {
    #[test]
    fn prop_text_fields_store_values_verbatim(field in text_fields(), value in ".{0,40}") {
        let mut record = PolicyRecord::empty();
        record.set_text(field, &value).unwrap();
        prop_assert_eq!(record.display(field), value);
    }

    #[test]
    fn prop_whole_premiums_display_without_fraction(premium in 0u32..100_000) {
        let mut record = PolicyRecord::empty();
        record.set_text(Field::Premium, &premium.to_string()).unwrap();
        prop_assert_eq!(record.display(Field::Premium), premium.to_string());
    }
}
