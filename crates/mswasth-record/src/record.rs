//! The policy record entity

use crate::error::FieldError;
use crate::field::Field;
use crate::gender::Gender;
use crate::id::RecordId;
use crate::numeric::{self, format_number, parse_number, to_whole};
use crate::partial::PartialRecord;
use crate::text;
use serde::{Deserialize, Serialize};

/// One insurance policy entry
///
/// The serialized shape matches the persisted collection: camelCase keys,
/// unset numbers and genders as `""`. Keys missing from stored JSON read as
/// unset; stored records are never migrated. Reading is lenient so one odd
/// value never rejects the collection: numbers in text fields keep their
/// text form and unrecognised genders read as unset.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct PolicyRecord {
    pub id: RecordId,
    #[serde(deserialize_with = "text::lenient")]
    pub partner_name: String,
    #[serde(deserialize_with = "text::lenient")]
    pub product_details: String,
    #[serde(with = "numeric::optional_f64")]
    pub premium: Option<f64>,
    #[serde(with = "numeric::optional_u32")]
    pub tenure: Option<u32>,
    #[serde(deserialize_with = "text::lenient")]
    pub cse_name: String,
    #[serde(deserialize_with = "text::lenient")]
    pub branch_name: String,
    #[serde(deserialize_with = "text::lenient")]
    pub branch_code: String,
    #[serde(deserialize_with = "text::lenient")]
    pub region: String,
    #[serde(deserialize_with = "text::lenient")]
    pub customer_name: String,
    pub gender: Gender,
    #[serde(deserialize_with = "text::lenient")]
    pub date_of_birth: String,
    #[serde(deserialize_with = "text::lenient")]
    pub mobile_number: String,
    #[serde(deserialize_with = "text::lenient")]
    pub customer_id: String,
    #[serde(deserialize_with = "text::lenient")]
    pub enrolment_date: String,
    #[serde(deserialize_with = "text::lenient")]
    pub savings_ac_no: String,
    #[serde(deserialize_with = "text::lenient")]
    pub csb_code: String,
    #[serde(deserialize_with = "text::lenient")]
    pub d2c_code: String,
    #[serde(deserialize_with = "text::lenient")]
    pub nominee_name: String,
    #[serde(deserialize_with = "text::lenient")]
    pub nominee_dob: String,
    #[serde(deserialize_with = "text::lenient")]
    pub nominee_relationship: String,
    #[serde(deserialize_with = "text::lenient")]
    pub nominee_mobile_number: String,
    pub nominee_gender: Gender,
    #[serde(deserialize_with = "text::lenient")]
    pub remarks: String,
}

impl PolicyRecord {
    /// Record with every field unset, including the identifier
    #[inline]
    #[must_use]
    pub fn empty() -> Self {
        Self::default()
    }

    /// Record with every field unset except the identifier
    #[inline]
    #[must_use]
    pub fn with_id(id: RecordId) -> Self {
        Self {
            id,
            ..Self::default()
        }
    }

    /// String representation of a field, as searched, exported and shown
    #[must_use]
    pub fn display(&self, field: Field) -> String {
        match field {
            Field::Id => self.id.to_string(),
            Field::Premium => self.premium.map(format_number).unwrap_or_default(),
            Field::Tenure => self.tenure.map(|t| t.to_string()).unwrap_or_default(),
            Field::Gender => self.gender.to_string(),
            Field::NomineeGender => self.nominee_gender.to_string(),
            other => self.text(other).map(str::to_string).unwrap_or_default(),
        }
    }

    /// Borrow a plain text field; `None` for identifier, numeric and gender fields
    #[must_use]
    pub fn text(&self, field: Field) -> Option<&str> {
        let value = match field {
            Field::PartnerName => &self.partner_name,
            Field::ProductDetails => &self.product_details,
            Field::CseName => &self.cse_name,
            Field::BranchName => &self.branch_name,
            Field::BranchCode => &self.branch_code,
            Field::Region => &self.region,
            Field::CustomerName => &self.customer_name,
            Field::DateOfBirth => &self.date_of_birth,
            Field::MobileNumber => &self.mobile_number,
            Field::CustomerId => &self.customer_id,
            Field::EnrolmentDate => &self.enrolment_date,
            Field::SavingsAcNo => &self.savings_ac_no,
            Field::CsbCode => &self.csb_code,
            Field::D2cCode => &self.d2c_code,
            Field::NomineeName => &self.nominee_name,
            Field::NomineeDob => &self.nominee_dob,
            Field::NomineeRelationship => &self.nominee_relationship,
            Field::NomineeMobileNumber => &self.nominee_mobile_number,
            Field::Remarks => &self.remarks,
            Field::Id | Field::Premium | Field::Tenure | Field::Gender | Field::NomineeGender => {
                return None
            }
        };
        Some(value.as_str())
    }

    fn text_mut(&mut self, field: Field) -> Option<&mut String> {
        let value = match field {
            Field::PartnerName => &mut self.partner_name,
            Field::ProductDetails => &mut self.product_details,
            Field::CseName => &mut self.cse_name,
            Field::BranchName => &mut self.branch_name,
            Field::BranchCode => &mut self.branch_code,
            Field::Region => &mut self.region,
            Field::CustomerName => &mut self.customer_name,
            Field::DateOfBirth => &mut self.date_of_birth,
            Field::MobileNumber => &mut self.mobile_number,
            Field::CustomerId => &mut self.customer_id,
            Field::EnrolmentDate => &mut self.enrolment_date,
            Field::SavingsAcNo => &mut self.savings_ac_no,
            Field::CsbCode => &mut self.csb_code,
            Field::D2cCode => &mut self.d2c_code,
            Field::NomineeName => &mut self.nominee_name,
            Field::NomineeDob => &mut self.nominee_dob,
            Field::NomineeRelationship => &mut self.nominee_relationship,
            Field::NomineeMobileNumber => &mut self.nominee_mobile_number,
            Field::Remarks => &mut self.remarks,
            Field::Id | Field::Premium | Field::Tenure | Field::Gender | Field::NomineeGender => {
                return None
            }
        };
        Some(value)
    }

    /// Assign a field from its literal text form
    ///
    /// Text fields take the value verbatim. Numeric fields parse the value
    /// and clear on empty input. The identifier cannot be assigned.
    ///
    /// # Errors
    /// - [`FieldError::ReadOnly`] for the identifier
    /// - [`FieldError::NotNumeric`] when a numeric field gets non-numeric text
    /// - [`FieldError::InvalidGender`] for an unsupported gender
    pub fn set_text(&mut self, field: Field, value: &str) -> Result<(), FieldError> {
        match field {
            Field::Id => return Err(FieldError::ReadOnly(field)),
            Field::Premium => {
                self.premium = parse_optional(field, value)?;
            }
            Field::Tenure => {
                self.tenure = match parse_optional(field, value)? {
                    Some(n) => Some(to_whole(n).ok_or_else(|| FieldError::not_numeric(field, value))?),
                    None => None,
                };
            }
            Field::Gender => self.gender = value.parse()?,
            Field::NomineeGender => self.nominee_gender = value.parse()?,
            other => {
                if let Some(slot) = self.text_mut(other) {
                    *slot = value.to_string();
                }
            }
        }
        Ok(())
    }

    /// Reset a field to unset
    pub fn clear(&mut self, field: Field) {
        match field {
            Field::Id => {}
            Field::Premium => self.premium = None,
            Field::Tenure => self.tenure = None,
            Field::Gender => self.gender = Gender::Unset,
            Field::NomineeGender => self.nominee_gender = Gender::Unset,
            other => {
                if let Some(slot) = self.text_mut(other) {
                    slot.clear();
                }
            }
        }
    }

    /// Whether a field holds a value
    #[must_use]
    pub fn is_set(&self, field: Field) -> bool {
        match field {
            Field::Premium => self.premium.is_some(),
            Field::Tenure => self.tenure.is_some(),
            Field::Gender => self.gender.is_set(),
            Field::NomineeGender => self.nominee_gender.is_set(),
            other => !self.display(other).is_empty(),
        }
    }

    /// Overwrite the fields present in `partial`, leaving absent ones untouched
    pub fn merge(&mut self, partial: &PartialRecord) {
        partial.apply_to(self);
    }

    /// Field-by-field equality ignoring the identifier
    #[must_use]
    pub fn eq_ignoring_id(&self, other: &Self) -> bool {
        Field::ALL
            .iter()
            .filter(|f| **f != Field::Id)
            .all(|f| self.display(*f) == other.display(*f))
    }

    /// `(field name, display value)` pairs in declaration order
    pub fn entries(&self) -> impl Iterator<Item = (&'static str, String)> + '_ {
        Field::ALL.iter().map(move |f| (f.name(), self.display(*f)))
    }
}

fn parse_optional(field: Field, value: &str) -> Result<Option<f64>, FieldError> {
    if value.trim().is_empty() {
        return Ok(None);
    }
    parse_number(value)
        .map(Some)
        .ok_or_else(|| FieldError::not_numeric(field, value))
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    #[test]
    fn empty_record_displays_blank_everywhere() {
        let record = PolicyRecord::empty();
        for field in Field::ALL {
            assert_eq!(record.display(field), "", "{field}");
        }
    }

    #[test]
    fn set_text_parses_numbers_and_clears_on_blank() {
        let mut record = PolicyRecord::empty();
        record.set_text(Field::Premium, "690").unwrap();
        record.set_text(Field::Tenure, "2").unwrap();
        assert_eq!(record.premium, Some(690.0));
        assert_eq!(record.tenure, Some(2));

        record.set_text(Field::Premium, "").unwrap();
        assert_eq!(record.premium, None);

        assert!(record.set_text(Field::Tenure, "1.5").is_err());
        assert!(record.set_text(Field::Premium, "lots").is_err());
        assert!(record.set_text(Field::Id, "x").is_err());
    }

    #[test]
    fn set_text_keeps_text_verbatim() {
        let mut record = PolicyRecord::empty();
        record.set_text(Field::Remarks, "  spoken, as is  ").unwrap();
        assert_eq!(record.remarks, "  spoken, as is  ");
    }

    #[test]
    fn serializes_with_persisted_shape() {
        let mut record = PolicyRecord::with_id(RecordId::new("1"));
        record.partner_name = "PBGB".to_string();
        record.premium = Some(490.0);

        let json = serde_json::to_value(&record).unwrap();
        assert_eq!(json["id"], "1");
        assert_eq!(json["partnerName"], "PBGB");
        assert_eq!(json["premium"], 490);
        assert_eq!(json["tenure"], "");
        assert_eq!(json["gender"], "");
        assert_eq!(json.as_object().unwrap().len(), 24);
    }

    #[test]
    fn reads_string_premiums_and_missing_keys() {
        let record: PolicyRecord =
            serde_json::from_str(r#"{"id":"9","premium":"690","tenure":1,"gender":"Female"}"#)
                .unwrap();
        assert_eq!(record.premium, Some(690.0));
        assert_eq!(record.tenure, Some(1));
        assert_eq!(record.gender, Gender::Female);
        assert_eq!(record.remarks, "");
    }

    #[test]
    fn eq_ignoring_id_skips_identifier() {
        let mut a = PolicyRecord::with_id(RecordId::new("a"));
        a.customer_name = "Ravi".to_string();
        let mut b = a.clone();
        b.id = RecordId::new("b");
        assert!(a.eq_ignoring_id(&b));
        b.region = "North".to_string();
        assert!(!a.eq_ignoring_id(&b));
    }
}
