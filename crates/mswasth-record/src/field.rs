//! Field catalogue for policy records
//!
//! Every attribute of a [`PolicyRecord`](crate::PolicyRecord) is addressable
//! through [`Field`], which carries its persisted JSON name, its human label
//! and the kind of input that edits it.

use crate::error::FieldError;
use serde::{Deserialize, Serialize};
use std::str::FromStr;

/// Kind of input used to edit a field
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum FieldKind {
    /// Opaque, assigned by the system
    Identifier,
    /// Single-line free text
    Text,
    /// Calendar date (`YYYY-MM-DD`)
    Date,
    /// Telephone number
    Phone,
    /// Number
    Number,
    /// One of a fixed or lookup-driven set of choices
    Choice,
    /// Multi-line free text
    LongText,
}

/// Addressable attribute of a policy record
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub enum Field {
    /// Record identifier
    Id,
    /// Partner institution
    PartnerName,
    /// Product offered by the partner
    ProductDetails,
    /// Premium amount
    Premium,
    /// Policy tenure
    Tenure,
    /// Assigned agent (customer service executive)
    CseName,
    /// Branch name
    BranchName,
    /// Branch code
    BranchCode,
    /// Region
    Region,
    /// Customer name
    CustomerName,
    /// Customer gender
    Gender,
    /// Customer date of birth
    DateOfBirth,
    /// Customer mobile number
    MobileNumber,
    /// Customer id at the partner
    CustomerId,
    /// Enrolment date
    EnrolmentDate,
    /// Savings account number
    SavingsAcNo,
    /// Partner-specific CSB code
    CsbCode,
    /// Partner-specific D2C / RO code
    D2cCode,
    /// Nominee name
    NomineeName,
    /// Nominee date of birth
    NomineeDob,
    /// Nominee relationship to the customer
    NomineeRelationship,
    /// Nominee mobile number
    NomineeMobileNumber,
    /// Nominee gender
    NomineeGender,
    /// Free-text remarks
    Remarks,
}

impl Field {
    /// All fields in declaration (and persisted key) order
    pub const ALL: [Field; 24] = [
        Field::Id,
        Field::PartnerName,
        Field::ProductDetails,
        Field::Premium,
        Field::Tenure,
        Field::CseName,
        Field::BranchName,
        Field::BranchCode,
        Field::Region,
        Field::CustomerName,
        Field::Gender,
        Field::DateOfBirth,
        Field::MobileNumber,
        Field::CustomerId,
        Field::EnrolmentDate,
        Field::SavingsAcNo,
        Field::CsbCode,
        Field::D2cCode,
        Field::NomineeName,
        Field::NomineeDob,
        Field::NomineeRelationship,
        Field::NomineeMobileNumber,
        Field::NomineeGender,
        Field::Remarks,
    ];

    /// Persisted JSON key
    #[must_use]
    pub fn name(&self) -> &'static str {
        match self {
            Field::Id => "id",
            Field::PartnerName => "partnerName",
            Field::ProductDetails => "productDetails",
            Field::Premium => "premium",
            Field::Tenure => "tenure",
            Field::CseName => "cseName",
            Field::BranchName => "branchName",
            Field::BranchCode => "branchCode",
            Field::Region => "region",
            Field::CustomerName => "customerName",
            Field::Gender => "gender",
            Field::DateOfBirth => "dateOfBirth",
            Field::MobileNumber => "mobileNumber",
            Field::CustomerId => "customerId",
            Field::EnrolmentDate => "enrolmentDate",
            Field::SavingsAcNo => "savingsAcNo",
            Field::CsbCode => "csbCode",
            Field::D2cCode => "d2cCode",
            Field::NomineeName => "nomineeName",
            Field::NomineeDob => "nomineeDob",
            Field::NomineeRelationship => "nomineeRelationship",
            Field::NomineeMobileNumber => "nomineeMobileNumber",
            Field::NomineeGender => "nomineeGender",
            Field::Remarks => "remarks",
        }
    }

    /// Human-readable label
    #[must_use]
    pub fn label(&self) -> &'static str {
        match self {
            Field::Id => "ID",
            Field::PartnerName => "Partner Name",
            Field::ProductDetails => "Product Details",
            Field::Premium => "Premium",
            Field::Tenure => "Tenure",
            Field::CseName => "CSE Name",
            Field::BranchName => "Branch Name",
            Field::BranchCode => "Branch Code",
            Field::Region => "Region",
            Field::CustomerName => "Customer Name",
            Field::Gender => "Gender",
            Field::DateOfBirth => "Date of Birth",
            Field::MobileNumber => "Mobile Number",
            Field::CustomerId => "Customer ID",
            Field::EnrolmentDate => "Enrolment Date",
            Field::SavingsAcNo => "Savings A/C No.",
            Field::CsbCode => "CSB Code",
            Field::D2cCode => "D2C Code / RO Code",
            Field::NomineeName => "Nominee Name",
            Field::NomineeDob => "Nominee Date of Birth",
            Field::NomineeRelationship => "Nominee Relationship",
            Field::NomineeMobileNumber => "Nominee Mobile Number",
            Field::NomineeGender => "Nominee Gender",
            Field::Remarks => "Remarks",
        }
    }

    /// Input kind
    #[must_use]
    pub fn kind(&self) -> FieldKind {
        match self {
            Field::Id => FieldKind::Identifier,
            Field::Premium | Field::Tenure => FieldKind::Number,
            Field::DateOfBirth | Field::EnrolmentDate | Field::NomineeDob => FieldKind::Date,
            Field::MobileNumber | Field::NomineeMobileNumber => FieldKind::Phone,
            Field::PartnerName
            | Field::ProductDetails
            | Field::Gender
            | Field::NomineeRelationship
            | Field::NomineeGender => FieldKind::Choice,
            Field::Remarks => FieldKind::LongText,
            _ => FieldKind::Text,
        }
    }

    /// Whether values compare numerically
    #[inline]
    #[must_use]
    pub fn is_numeric(&self) -> bool {
        self.kind() == FieldKind::Number
    }
}

impl std::fmt::Display for Field {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.name())
    }
}

impl FromStr for Field {
    type Err = FieldError;

    /// Accepts the JSON key in any letter case, with `-`/`_` separators ignored
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let wanted: String = s
            .chars()
            .filter(|c| *c != '-' && *c != '_')
            .flat_map(char::to_lowercase)
            .collect();
        Field::ALL
            .iter()
            .copied()
            .find(|field| field.name().to_lowercase() == wanted)
            .ok_or_else(|| FieldError::UnknownField(s.to_string()))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn names_are_unique() {
        let mut names: Vec<_> = Field::ALL.iter().map(Field::name).collect();
        names.sort_unstable();
        names.dedup();
        assert_eq!(names.len(), Field::ALL.len());
    }

    #[test]
    fn from_str_accepts_json_and_kebab_forms() {
        assert_eq!("partnerName".parse::<Field>().unwrap(), Field::PartnerName);
        assert_eq!("partner-name".parse::<Field>().unwrap(), Field::PartnerName);
        assert_eq!("SAVINGS_AC_NO".parse::<Field>().unwrap(), Field::SavingsAcNo);
        assert!("policyNumber".parse::<Field>().is_err());
    }

    #[test]
    fn serde_uses_json_key() {
        assert_eq!(serde_json::to_string(&Field::D2cCode).unwrap(), "\"d2cCode\"");
        assert_eq!(
            serde_json::to_string(&Field::NomineeMobileNumber).unwrap(),
            "\"nomineeMobileNumber\""
        );
    }
}
