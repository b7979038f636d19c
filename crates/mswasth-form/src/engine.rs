//! The cascading form state machine

use crate::autofill::{AutofillGuard, AutofillOutcome, AutofillTicket};
use crate::error::FormError;
use crate::required::missing_fields;
use mswasth_catalog::{LookupTable, PremiumPlan};
use mswasth_record::{Field, FieldKind, PartialRecord, PolicyRecord, RecordId};
use std::sync::Arc;

/// Whether the form creates a new record or edits an existing one
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum FormMode {
    /// New entry
    Create,
    /// Existing entry with this identifier
    Edit(RecordId),
}

/// Premium as chosen by the user, before numeric coercion
#[derive(Debug, Clone, PartialEq)]
pub enum PremiumInput {
    /// Already numeric
    Number(f64),
    /// Text from a selection control; coerced before matching
    Text(String),
}

impl PremiumInput {
    fn coerce(&self) -> Option<f64> {
        match self {
            PremiumInput::Number(n) if n.is_finite() => Some(*n),
            PremiumInput::Number(_) => None,
            PremiumInput::Text(s) => {
                let trimmed = s.trim();
                if trimmed.is_empty() {
                    None
                } else {
                    trimmed.parse::<f64>().ok().filter(|n| n.is_finite())
                }
            }
        }
    }
}

impl From<f64> for PremiumInput {
    fn from(n: f64) -> Self {
        Self::Number(n)
    }
}

impl From<u32> for PremiumInput {
    fn from(n: u32) -> Self {
        Self::Number(f64::from(n))
    }
}

impl From<&str> for PremiumInput {
    fn from(s: &str) -> Self {
        Self::Text(s.to_string())
    }
}

impl From<String> for PremiumInput {
    fn from(s: String) -> Self {
        Self::Text(s)
    }
}

/// Selection that is not backed by the lookup table
#[derive(Debug, Clone, PartialEq)]
pub enum LookupConflict {
    /// Partner has no table entries
    UnknownPartner(String),
    /// Partner exists but does not offer the product
    UnknownProduct { partner: String, product: String },
    /// Premium is not one of the product's plans
    UnknownPremium {
        partner: String,
        product: String,
        premium: f64,
    },
}

impl std::fmt::Display for LookupConflict {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            LookupConflict::UnknownPartner(p) => write!(f, "partner '{p}' is not in the lookup table"),
            LookupConflict::UnknownProduct { partner, product } => {
                write!(f, "product '{product}' is not offered by '{partner}'")
            }
            LookupConflict::UnknownPremium {
                partner,
                product,
                premium,
            } => write!(f, "premium {premium} is not a plan of {partner}/{product}"),
        }
    }
}

/// Form state for one create or edit session
#[derive(Debug, Clone)]
pub struct FormEngine {
    table: Arc<LookupTable>,
    mode: FormMode,
    record: PolicyRecord,
    product_options: Vec<String>,
    premium_options: Vec<PremiumPlan>,
    dictation: Option<Field>,
    autofill: AutofillGuard,
}

impl FormEngine {
    /// Blank form with a freshly generated identifier
    #[must_use]
    pub fn create(table: Arc<LookupTable>) -> Self {
        let record = PolicyRecord::with_id(RecordId::generate());
        tracing::debug!(id = %record.id, "opened create form");
        Self {
            table,
            mode: FormMode::Create,
            record,
            product_options: Vec::new(),
            premium_options: Vec::new(),
            dictation: None,
            autofill: AutofillGuard::default(),
        }
    }

    /// Form pre-populated from an existing record
    ///
    /// Option sets are rebuilt from the table for the loaded partner and
    /// product; no field is reset.
    #[must_use]
    pub fn edit(table: Arc<LookupTable>, record: PolicyRecord) -> Self {
        let product_options = table.products(&record.partner_name);
        let premium_options = table
            .plans(&record.partner_name, &record.product_details)
            .to_vec();
        tracing::debug!(id = %record.id, "opened edit form");
        Self {
            table,
            mode: FormMode::Edit(record.id.clone()),
            record,
            product_options,
            premium_options,
            dictation: None,
            autofill: AutofillGuard::default(),
        }
    }

    /// Create or edit
    #[inline]
    #[must_use]
    pub fn mode(&self) -> &FormMode {
        &self.mode
    }

    /// Whether an existing record is being edited
    #[inline]
    #[must_use]
    pub fn is_editing(&self) -> bool {
        matches!(self.mode, FormMode::Edit(_))
    }

    /// Current record state
    #[inline]
    #[must_use]
    pub fn record(&self) -> &PolicyRecord {
        &self.record
    }

    /// Lookup table backing the selections
    #[inline]
    #[must_use]
    pub fn table(&self) -> &LookupTable {
        &self.table
    }

    /// Selectable partners
    #[must_use]
    pub fn partner_options(&self) -> Vec<&str> {
        self.table.partners().collect()
    }

    /// Products allowed for the selected partner
    #[inline]
    #[must_use]
    pub fn product_options(&self) -> &[String] {
        &self.product_options
    }

    /// Premium plans allowed for the selected partner and product
    #[inline]
    #[must_use]
    pub fn premium_options(&self) -> &[PremiumPlan] {
        &self.premium_options
    }

    /// Change partner: clears every dependent selection and reloads products
    pub fn select_partner(&mut self, partner: &str) {
        self.record.partner_name = partner.to_string();
        self.product_options = self.table.products(partner);
        self.record.product_details.clear();
        self.clear_premium_selection();
        self.premium_options.clear();
        tracing::debug!(partner, products = self.product_options.len(), "partner selected");
    }

    /// Change product: clears premium, tenure and agent and reloads premiums
    pub fn select_product(&mut self, product: &str) {
        self.record.product_details = product.to_string();
        self.premium_options = self
            .table
            .plans(&self.record.partner_name, product)
            .to_vec();
        self.clear_premium_selection();
        tracing::debug!(product, premiums = self.premium_options.len(), "product selected");
    }

    /// Change premium: derives tenure and agent from the matching plan
    ///
    /// The input is coerced to a number and matched numerically against the
    /// current premium options. Without a match tenure and agent are unset.
    pub fn select_premium(&mut self, premium: impl Into<PremiumInput>) {
        let premium = premium.into().coerce();
        self.record.premium = premium;

        let plan = premium.and_then(|p| self.premium_options.iter().find(|plan| plan.matches(p)));
        match plan {
            Some(plan) => {
                self.record.tenure = Some(plan.tenure);
                self.record.cse_name.clone_from(&plan.agent);
            }
            None => {
                self.record.tenure = None;
                self.record.cse_name.clear();
            }
        }
        tracing::debug!(premium = ?premium, derived = plan.is_some(), "premium selected");
    }

    fn clear_premium_selection(&mut self) {
        self.record.premium = None;
        self.record.tenure = None;
        self.record.cse_name.clear();
    }

    /// Generic field change
    ///
    /// Partner, product and premium go through their cascading transitions;
    /// every other field is assigned independently.
    ///
    /// # Errors
    /// Returns [`FormError::Field`] when the value does not fit the field.
    pub fn set_field(&mut self, field: Field, value: &str) -> Result<(), FormError> {
        match field {
            Field::PartnerName => self.select_partner(value),
            Field::ProductDetails => self.select_product(value),
            Field::Premium => self.select_premium(value),
            other => self.record.set_text(other, value)?,
        }
        Ok(())
    }

    /// Merge an extraction result without running the cascade
    ///
    /// Option sets are left as they are. A pre-filled partner, product or
    /// premium that the table does not know stays inert until the user
    /// reselects; see [`FormEngine::lookup_conflicts`].
    pub fn apply_prefill(&mut self, partial: &PartialRecord) {
        self.record.merge(partial);
        tracing::debug!(fields = partial.present_count(), "applied prefill");
    }

    /// Selections that the lookup table does not back
    #[must_use]
    pub fn lookup_conflicts(&self) -> Vec<LookupConflict> {
        let partner = &self.record.partner_name;
        let product = &self.record.product_details;
        let mut conflicts = Vec::new();

        if partner.is_empty() {
            return conflicts;
        }
        if !self.table.has_partner(partner) {
            conflicts.push(LookupConflict::UnknownPartner(partner.clone()));
            return conflicts;
        }
        if product.is_empty() {
            return conflicts;
        }
        if self.table.plans(partner, product).is_empty() {
            conflicts.push(LookupConflict::UnknownProduct {
                partner: partner.clone(),
                product: product.clone(),
            });
            return conflicts;
        }
        if let Some(premium) = self.record.premium {
            if !self.table.contains(partner, product, premium) {
                conflicts.push(LookupConflict::UnknownPremium {
                    partner: partner.clone(),
                    product: product.clone(),
                    premium,
                });
            }
        }
        conflicts
    }

    /// Whether `field` can receive dictated text
    #[must_use]
    pub fn accepts_dictation(field: Field) -> bool {
        match field.kind() {
            FieldKind::Text | FieldKind::Date | FieldKind::Phone | FieldKind::LongText => true,
            FieldKind::Number => field == Field::Tenure,
            FieldKind::Identifier | FieldKind::Choice => false,
        }
    }

    /// Designate the field that receives the next utterance
    ///
    /// # Errors
    /// Returns [`FormError::DictationUnsupported`] for selection fields.
    pub fn begin_dictation(&mut self, field: Field) -> Result<(), FormError> {
        if !Self::accepts_dictation(field) {
            return Err(FormError::DictationUnsupported(field));
        }
        self.dictation = Some(field);
        Ok(())
    }

    /// Field awaiting dictation, if any
    #[inline]
    #[must_use]
    pub fn dictation_target(&self) -> Option<Field> {
        self.dictation
    }

    /// Drop the dictation designation
    pub fn cancel_dictation(&mut self) {
        self.dictation = None;
    }

    /// Write a recognized utterance verbatim into the active field
    ///
    /// Returns the field written, or `None` when no field was active. The
    /// designation is cleared either way.
    ///
    /// # Errors
    /// Returns [`FormError::Field`] when the active field is numeric and the
    /// utterance is not a number.
    pub fn accept_utterance(&mut self, utterance: &str) -> Result<Option<Field>, FormError> {
        let Some(field) = self.dictation.take() else {
            return Ok(None);
        };
        self.record.set_text(field, utterance)?;
        Ok(Some(field))
    }

    /// Start an extraction request
    ///
    /// # Errors
    /// Returns [`FormError::AutofillInProgress`] while another is outstanding.
    pub fn begin_autofill(&mut self) -> Result<AutofillTicket, FormError> {
        self.autofill.begin().ok_or(FormError::AutofillInProgress)
    }

    /// Complete an extraction request with its result
    ///
    /// A successful result is merged only when `ticket` is still the
    /// outstanding request; failures just close the request.
    pub fn finish_autofill<E>(
        &mut self,
        ticket: AutofillTicket,
        result: Result<&PartialRecord, E>,
    ) -> Result<AutofillOutcome, E> {
        if !self.autofill.settle(ticket) {
            tracing::warn!(ticket = ticket.sequence(), "discarding stale extraction result");
            return Ok(AutofillOutcome::Stale);
        }
        let partial = result?;
        self.apply_prefill(partial);
        Ok(AutofillOutcome::Applied)
    }

    /// Abandon the outstanding extraction; its result will be discarded
    pub fn cancel_autofill(&mut self) {
        self.autofill.cancel();
    }

    /// Whether an extraction is outstanding
    #[inline]
    #[must_use]
    pub fn is_autofilling(&self) -> bool {
        self.autofill.is_busy()
    }

    /// Check required fields and produce the record to save
    ///
    /// # Errors
    /// Returns [`FormError::MissingRequired`] listing unfilled fields.
    pub fn submit(&self) -> Result<PolicyRecord, FormError> {
        let missing = missing_fields(&self.record);
        if missing.is_empty() {
            Ok(self.record.clone())
        } else {
            Err(FormError::MissingRequired(missing))
        }
    }
}
