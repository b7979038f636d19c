//! Partial records produced by document extraction

use crate::gender::{self, Gender};
use crate::numeric;
use crate::record::PolicyRecord;
use crate::text;
use serde::{Deserialize, Deserializer, Serialize};

fn lenient_f64<'de, D: Deserializer<'de>>(d: D) -> Result<Option<f64>, D::Error> {
    numeric::optional_f64::deserialize(d)
}

fn lenient_u32<'de, D: Deserializer<'de>>(d: D) -> Result<Option<u32>, D::Error> {
    numeric::optional_u32::deserialize(d)
}

/// Any subset of policy record fields
///
/// The identifier is deliberately absent: merging a partial record can never
/// change which record is being edited. Unknown keys are ignored, and values
/// that do not fit their field's type read as absent.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct PartialRecord {
    #[serde(deserialize_with = "text::optional_lenient", skip_serializing_if = "Option::is_none")]
    pub partner_name: Option<String>,
    #[serde(deserialize_with = "text::optional_lenient", skip_serializing_if = "Option::is_none")]
    pub product_details: Option<String>,
    #[serde(deserialize_with = "lenient_f64", skip_serializing_if = "Option::is_none")]
    pub premium: Option<f64>,
    #[serde(deserialize_with = "lenient_u32", skip_serializing_if = "Option::is_none")]
    pub tenure: Option<u32>,
    #[serde(deserialize_with = "text::optional_lenient", skip_serializing_if = "Option::is_none")]
    pub cse_name: Option<String>,
    #[serde(deserialize_with = "text::optional_lenient", skip_serializing_if = "Option::is_none")]
    pub branch_name: Option<String>,
    #[serde(deserialize_with = "text::optional_lenient", skip_serializing_if = "Option::is_none")]
    pub branch_code: Option<String>,
    #[serde(deserialize_with = "text::optional_lenient", skip_serializing_if = "Option::is_none")]
    pub region: Option<String>,
    #[serde(deserialize_with = "text::optional_lenient", skip_serializing_if = "Option::is_none")]
    pub customer_name: Option<String>,
    #[serde(deserialize_with = "gender::deserialize_lenient", skip_serializing_if = "Option::is_none")]
    pub gender: Option<Gender>,
    #[serde(deserialize_with = "text::optional_lenient", skip_serializing_if = "Option::is_none")]
    pub date_of_birth: Option<String>,
    #[serde(deserialize_with = "text::optional_lenient", skip_serializing_if = "Option::is_none")]
    pub mobile_number: Option<String>,
    #[serde(deserialize_with = "text::optional_lenient", skip_serializing_if = "Option::is_none")]
    pub customer_id: Option<String>,
    #[serde(deserialize_with = "text::optional_lenient", skip_serializing_if = "Option::is_none")]
    pub enrolment_date: Option<String>,
    #[serde(deserialize_with = "text::optional_lenient", skip_serializing_if = "Option::is_none")]
    pub savings_ac_no: Option<String>,
    #[serde(deserialize_with = "text::optional_lenient", skip_serializing_if = "Option::is_none")]
    pub csb_code: Option<String>,
    #[serde(deserialize_with = "text::optional_lenient", skip_serializing_if = "Option::is_none")]
    pub d2c_code: Option<String>,
    #[serde(deserialize_with = "text::optional_lenient", skip_serializing_if = "Option::is_none")]
    pub nominee_name: Option<String>,
    #[serde(deserialize_with = "text::optional_lenient", skip_serializing_if = "Option::is_none")]
    pub nominee_dob: Option<String>,
    #[serde(deserialize_with = "text::optional_lenient", skip_serializing_if = "Option::is_none")]
    pub nominee_relationship: Option<String>,
    #[serde(deserialize_with = "text::optional_lenient", skip_serializing_if = "Option::is_none")]
    pub nominee_mobile_number: Option<String>,
    #[serde(deserialize_with = "gender::deserialize_lenient", skip_serializing_if = "Option::is_none")]
    pub nominee_gender: Option<Gender>,
    #[serde(deserialize_with = "text::optional_lenient", skip_serializing_if = "Option::is_none")]
    pub remarks: Option<String>,
}

impl PartialRecord {
    /// Parse the JSON object returned by an extraction service
    ///
    /// # Errors
    /// Returns the JSON error when the text is not a JSON object.
    pub fn from_json(text: &str) -> Result<Self, serde_json::Error> {
        serde_json::from_str(text)
    }

    /// Whether no field is present
    #[must_use]
    pub fn is_empty(&self) -> bool {
        *self == Self::default()
    }

    /// Number of present fields
    #[must_use]
    pub fn present_count(&self) -> usize {
        serde_json::to_value(self)
            .ok()
            .and_then(|v| v.as_object().map(serde_json::Map::len))
            .unwrap_or(0)
    }

    pub(crate) fn apply_to(&self, record: &mut PolicyRecord) {
        fn put<T: Clone>(slot: &mut T, value: Option<&T>) {
            if let Some(v) = value {
                *slot = v.clone();
            }
        }

        put(&mut record.partner_name, self.partner_name.as_ref());
        put(&mut record.product_details, self.product_details.as_ref());
        if self.premium.is_some() {
            record.premium = self.premium;
        }
        if self.tenure.is_some() {
            record.tenure = self.tenure;
        }
        put(&mut record.cse_name, self.cse_name.as_ref());
        put(&mut record.branch_name, self.branch_name.as_ref());
        put(&mut record.branch_code, self.branch_code.as_ref());
        put(&mut record.region, self.region.as_ref());
        put(&mut record.customer_name, self.customer_name.as_ref());
        put(&mut record.gender, self.gender.as_ref());
        put(&mut record.date_of_birth, self.date_of_birth.as_ref());
        put(&mut record.mobile_number, self.mobile_number.as_ref());
        put(&mut record.customer_id, self.customer_id.as_ref());
        put(&mut record.enrolment_date, self.enrolment_date.as_ref());
        put(&mut record.savings_ac_no, self.savings_ac_no.as_ref());
        put(&mut record.csb_code, self.csb_code.as_ref());
        put(&mut record.d2c_code, self.d2c_code.as_ref());
        put(&mut record.nominee_name, self.nominee_name.as_ref());
        put(&mut record.nominee_dob, self.nominee_dob.as_ref());
        put(&mut record.nominee_relationship, self.nominee_relationship.as_ref());
        put(&mut record.nominee_mobile_number, self.nominee_mobile_number.as_ref());
        put(&mut record.nominee_gender, self.nominee_gender.as_ref());
        put(&mut record.remarks, self.remarks.as_ref());
    }
}
