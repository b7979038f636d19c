//! Required-field check applied on submit

use mswasth_record::{Field, PolicyRecord};

/// Fields that must hold a value before a record can be saved
pub const REQUIRED_FIELDS: [Field; 12] = [
    Field::PartnerName,
    Field::ProductDetails,
    Field::Premium,
    Field::BranchName,
    Field::BranchCode,
    Field::CustomerName,
    Field::Gender,
    Field::DateOfBirth,
    Field::MobileNumber,
    Field::EnrolmentDate,
    Field::NomineeName,
    Field::NomineeRelationship,
];

/// Required fields that are unset, in form order
#[must_use]
pub fn missing_fields(record: &PolicyRecord) -> Vec<Field> {
    REQUIRED_FIELDS
        .iter()
        .copied()
        .filter(|f| !record.is_set(*f))
        .collect()
}
