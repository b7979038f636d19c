use mswasth_catalog::LookupTable;
use mswasth_form::{AutofillOutcome, FormEngine, FormError};
use mswasth_record::{Field, PartialRecord};
use mswasth_test_utils::sample_record;
use proptest::prelude::*;
use std::sync::Arc;

fn table() -> Arc<LookupTable> {
    Arc::new(LookupTable::builtin())
}

fn triples() -> Vec<(String, String, f64, u32, String)> {
    LookupTable::builtin()
        .iter()
        .map(|(partner, product, plan)| {
            (
                partner.to_string(),
                product.to_string(),
                plan.premium,
                plan.tenure,
                plan.agent.clone(),
            )
        })
        .collect()
}

#[test]
fn every_table_triple_derives_its_tenure_and_agent() {
    for (partner, product, premium, tenure, agent) in triples() {
        let mut form = FormEngine::create(table());
        form.select_partner(&partner);
        form.select_product(&product);
        form.select_premium(premium.to_string());

        assert_eq!(form.record().tenure, Some(tenure), "{partner}/{product}/{premium}");
        assert_eq!(form.record().cse_name, agent, "{partner}/{product}/{premium}");
    }
}

#[test]
fn edited_record_can_be_resubmitted_unchanged() {
    let record = sample_record(3);
    let form = FormEngine::edit(table(), record.clone());
    assert_eq!(form.submit().unwrap(), record);
}

#[test]
fn stale_extraction_result_is_discarded() {
    let mut form = FormEngine::create(table());
    let slow = form.begin_autofill().unwrap();
    assert_eq!(form.begin_autofill(), Err(FormError::AutofillInProgress));

    form.cancel_autofill();
    let fast = form.begin_autofill().unwrap();

    let fast_result = PartialRecord {
        customer_name: Some("Fast".to_string()),
        ..PartialRecord::default()
    };
    let slow_result = PartialRecord {
        customer_name: Some("Slow".to_string()),
        ..PartialRecord::default()
    };

    let applied: Result<_, String> = form.finish_autofill(fast, Ok(&fast_result));
    assert_eq!(applied, Ok(AutofillOutcome::Applied));
    let stale: Result<_, String> = form.finish_autofill(slow, Ok(&slow_result));
    assert_eq!(stale, Ok(AutofillOutcome::Stale));

    assert_eq!(form.record().customer_name, "Fast");
    assert!(!form.is_autofilling());
}

#[test]
fn failed_extraction_leaves_form_unchanged() {
    let mut form = FormEngine::create(table());
    form.set_field(Field::Region, "East").unwrap();
    let before = form.record().clone();

    let ticket = form.begin_autofill().unwrap();
    let outcome = form.finish_autofill(ticket, Err::<&PartialRecord, _>("quota exceeded"));

    assert_eq!(outcome, Err("quota exceeded"));
    assert_eq!(form.record(), &before);
    assert!(!form.is_autofilling());
}

fn any_field_value() -> impl Strategy<Value = (Field, String)> {
    (
        proptest::sample::select(vec![
            Field::PartnerName,
            Field::ProductDetails,
            Field::Premium,
            Field::Region,
            Field::CustomerName,
            Field::Remarks,
        ]),
        "[A-Za-z0-9 ]{0,12}",
    )
}

proptest! {
    #[test]
    fn prop_unknown_partner_yields_no_products(partner in "[a-z0-9 ]{0,20}") {
        let mut form = FormEngine::create(table());
        form.select_partner(&partner);
        prop_assert!(form.product_options().is_empty());
    }

    #[test]
    fn prop_partner_change_always_clears_dependents(
        steps in proptest::collection::vec(any_field_value(), 0..12),
        idx in 0usize..7,
    ) {
        let mut form = FormEngine::create(table());
        for (field, value) in steps {
            let _ = form.set_field(field, &value);
        }
        let partner = LookupTable::builtin().partners().nth(idx).unwrap().to_string();
        form.select_partner(&partner);

        let record = form.record();
        prop_assert_eq!(&record.product_details, "");
        prop_assert_eq!(record.premium, None);
        prop_assert_eq!(record.tenure, None);
        prop_assert_eq!(&record.cse_name, "");
    }
}
