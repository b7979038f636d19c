//! Testing utilities for the Mswasth workspace
//!
//! Shared record fixtures and proptest strategies.

#![allow(missing_docs)]

use mswasth_catalog::LookupTable;
use mswasth_record::{Gender, PolicyRecord, RecordId};
use proptest::prelude::*;

const CUSTOMERS: [&str; 6] = ["Asha Das", "Bikash Roy", "Chaya Sen", "Dipak Paul", "Esha Ghosh", "Farid Ali"];
const BRANCHES: [&str; 4] = ["Kalna", "Bolpur", "Siliguri", "Tezpur"];
const REGIONS: [&str; 3] = ["East", "North", "North-East"];

/// Deterministic, fully-filled record; `seed` varies names, plans and dates
pub fn sample_record(seed: usize) -> PolicyRecord {
    let table = LookupTable::builtin();
    let triples: Vec<_> = table.iter().collect();
    let (partner, product, plan) = triples[seed % triples.len()];

    PolicyRecord {
        id: RecordId::new(format!("rec-{seed:04}")),
        partner_name: partner.to_string(),
        product_details: product.to_string(),
        premium: Some(plan.premium),
        tenure: Some(plan.tenure),
        cse_name: plan.agent.clone(),
        branch_name: BRANCHES[seed % BRANCHES.len()].to_string(),
        branch_code: format!("BR{:03}", seed % 50),
        region: REGIONS[seed % REGIONS.len()].to_string(),
        customer_name: format!("{} {seed}", CUSTOMERS[seed % CUSTOMERS.len()]),
        gender: Gender::CHOICES[seed % Gender::CHOICES.len()],
        date_of_birth: format!("19{:02}-0{}-1{}", 60 + seed % 40, 1 + seed % 9, seed % 10),
        mobile_number: format!("98{:08}", seed),
        customer_id: format!("CUST-{seed}"),
        enrolment_date: format!("2024-0{}-2{}", 1 + seed % 9, seed % 8),
        savings_ac_no: format!("{:012}", seed * 7919),
        csb_code: String::new(),
        d2c_code: format!("RO-{}", seed % 13),
        nominee_name: format!("Nominee {seed}"),
        nominee_dob: String::new(),
        nominee_relationship: "Spouse".to_string(),
        nominee_mobile_number: String::new(),
        nominee_gender: Gender::Other,
        remarks: String::new(),
    }
}

/// `count` distinct sample records, ids `rec-0000`, `rec-0001`, ...
pub fn sample_records(count: usize) -> Vec<PolicyRecord> {
    (0..count).map(sample_record).collect()
}

/// Strategy over sample records with arbitrary customer names and remarks
pub fn arb_record() -> impl Strategy<Value = PolicyRecord> {
    (0usize..500, "[A-Za-z ]{0,16}", "[ -~]{0,24}").prop_map(|(seed, name, remarks)| {
        let mut record = sample_record(seed);
        record.customer_name = name;
        record.remarks = remarks;
        record
    })
}

/// Strategy over collections with unique identifiers
pub fn arb_records(max: usize) -> impl Strategy<Value = Vec<PolicyRecord>> {
    proptest::collection::vec(arb_record(), 0..max).prop_map(|mut records| {
        for (i, record) in records.iter_mut().enumerate() {
            record.id = RecordId::new(format!("rec-{i:04}"));
        }
        records
    })
}
