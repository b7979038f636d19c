//! Application controller
//!
//! Owns the persisted collection and preferences plus all transient UI
//! state. Every user-visible action is a named transition:
//!
//! ```text
//!            add_new / edit(id)
//!   List ─────────────────────────▶ Form
//!    ▲  ◀──── save_form (ok) ─────── │
//!    │  ◀──── close_form ─────────── │
//!    │
//!    └─ request_delete(_all) ─▶ pending confirmation ─▶ confirm | cancel
//! ```
//!
//! Toasts are fire-and-forget: showing one replaces the previous, and each
//! expires [`TOAST_TTL`](crate::TOAST_TTL) after it was shown unless a newer
//! one has replaced it.

use crate::toast::{Severity, Toast};
use crate::{PortalConfig, PortalError};
use mswasth_catalog::{is_known_theme, LookupTable, DEFAULT_THEME};
use mswasth_extract::{ExtractError, Extractor};
use mswasth_form::{AutofillOutcome, AutofillTicket, FormEngine, FormMode};
use mswasth_record::{PartialRecord, PolicyRecord, RecordId};
use mswasth_store::{FileStore, KeyValueStore, Persisted, PolicyRepository, THEME_KEY};
use mswasth_view::{ListView, PageView};
use std::sync::Arc;
use std::time::Instant;

/// Toast after creating a record
pub const MSG_ADDED: &str = "New policy added successfully!";
/// Toast after editing a record
pub const MSG_UPDATED: &str = "Policy updated successfully!";
/// Toast after deleting one record
pub const MSG_DELETED: &str = "Policy deleted.";
/// Toast after deleting every record
pub const MSG_DELETED_ALL: &str = "All policies deleted.";
/// Toast when autofill is requested without an image
pub const MSG_NO_IMAGE: &str = "Please upload an image first.";
/// Toast after a successful extraction
pub const MSG_EXTRACTED: &str = "Data extracted successfully!";

/// Which screen is active
#[derive(Debug, Clone)]
pub enum ViewMode {
    /// Record table
    List,
    /// Data-entry form
    Form(Box<FormEngine>),
}

/// Destructive action awaiting confirmation
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum PendingConfirmation {
    /// Delete one record
    DeleteOne(RecordId),
    /// Delete every record
    DeleteAll,
}

impl PendingConfirmation {
    /// Question put to the user
    #[must_use]
    pub fn prompt(&self) -> &'static str {
        match self {
            PendingConfirmation::DeleteOne(_) => "Are you sure you want to delete this entry?",
            PendingConfirmation::DeleteAll => {
                "Are you sure you want to delete ALL entries? This action cannot be undone."
            }
        }
    }
}

/// The policy desk
#[derive(Debug)]
pub struct App {
    repository: PolicyRepository,
    theme: Persisted<String>,
    table: Arc<LookupTable>,
    list: ListView,
    mode: ViewMode,
    toast: Option<Toast>,
    toast_seq: u64,
    pending: Option<PendingConfirmation>,
}

impl App {
    /// App over `store` with the given lookup table
    pub fn new(store: Arc<dyn KeyValueStore>, table: Arc<LookupTable>) -> Self {
        let repository = PolicyRepository::load(Arc::clone(&store));
        let theme = Persisted::load(store, THEME_KEY, DEFAULT_THEME.to_string());
        Self {
            repository,
            theme,
            table,
            list: ListView::new(),
            mode: ViewMode::List,
            toast: None,
            toast_seq: 0,
            pending: None,
        }
    }

    /// App over the configured data directory and lookup table
    pub fn open(config: &PortalConfig) -> Result<Self, PortalError> {
        let store = FileStore::open(&config.data_dir)?;
        let table = config.load_lookup_table()?;
        tracing::info!(
            data_dir = %config.data_dir.display(),
            partners = table.partners().count(),
            "opened policy desk"
        );
        Ok(Self::new(Arc::new(store), Arc::new(table)))
    }

    /// Stored records in insertion order
    #[inline]
    #[must_use]
    pub fn records(&self) -> &[PolicyRecord] {
        self.repository.all()
    }

    /// Record by identifier
    #[must_use]
    pub fn record(&self, id: &RecordId) -> Option<&PolicyRecord> {
        self.repository.get(id)
    }

    /// Lookup table in use
    #[inline]
    #[must_use]
    pub fn table(&self) -> &Arc<LookupTable> {
        &self.table
    }

    /// Current theme name
    #[inline]
    #[must_use]
    pub fn theme(&self) -> &str {
        self.theme.get()
    }

    /// Active screen
    #[inline]
    #[must_use]
    pub fn mode(&self) -> &ViewMode {
        &self.mode
    }

    /// Open form, if any
    #[must_use]
    pub fn form(&self) -> Option<&FormEngine> {
        match &self.mode {
            ViewMode::Form(form) => Some(form.as_ref()),
            ViewMode::List => None,
        }
    }

    /// Open form for editing
    pub fn form_mut(&mut self) -> Result<&mut FormEngine, PortalError> {
        match &mut self.mode {
            ViewMode::Form(form) => Ok(form.as_mut()),
            ViewMode::List => Err(PortalError::NoFormOpen),
        }
    }

    /// List view state
    #[inline]
    #[must_use]
    pub fn list(&self) -> &ListView {
        &self.list
    }

    /// List view state for search, sort and paging transitions
    #[inline]
    pub fn list_mut(&mut self) -> &mut ListView {
        &mut self.list
    }

    /// Render the current list page
    pub fn page(&mut self) -> PageView<'_> {
        self.list.render(self.repository.all())
    }

    /// Visible toast
    #[inline]
    #[must_use]
    pub fn toast(&self) -> Option<&Toast> {
        self.toast.as_ref()
    }

    /// Action awaiting confirmation
    #[inline]
    #[must_use]
    pub fn pending(&self) -> Option<&PendingConfirmation> {
        self.pending.as_ref()
    }

    /// Whether delete-all is offered (only for a non-empty collection)
    #[inline]
    #[must_use]
    pub fn can_delete_all(&self) -> bool {
        !self.repository.is_empty()
    }

    /// Open a blank form
    pub fn add_new(&mut self) {
        self.mode = ViewMode::Form(Box::new(FormEngine::create(Arc::clone(&self.table))));
    }

    /// Open the form on an existing record
    pub fn edit(&mut self, id: &RecordId) -> Result<(), PortalError> {
        let record = self
            .repository
            .get(id)
            .cloned()
            .ok_or_else(|| PortalError::UnknownRecord(id.clone()))?;
        self.mode = ViewMode::Form(Box::new(FormEngine::edit(Arc::clone(&self.table), record)));
        Ok(())
    }

    /// Leave the form without saving
    pub fn close_form(&mut self) {
        self.mode = ViewMode::List;
    }

    /// Save the open form and return to the list
    ///
    /// New records get a fresh identifier; edits replace the stored record in
    /// place. On failure the form stays open. Storage failures are also
    /// reported as an error toast.
    pub fn save_form(&mut self) -> Result<RecordId, PortalError> {
        let form = self.form_mut()?;
        let record = form.submit()?;
        let mode = form.mode().clone();

        let saved = match mode {
            FormMode::Create => self.repository.insert_new(record).map(|id| (id, MSG_ADDED)),
            FormMode::Edit(id) => self.repository.replace(record).map(|()| (id, MSG_UPDATED)),
        };
        match saved {
            Ok((id, message)) => {
                self.mode = ViewMode::List;
                self.show_toast(message, Severity::Success);
                Ok(id)
            }
            Err(e) => {
                self.show_toast(e.to_string(), Severity::Error);
                Err(e.into())
            }
        }
    }

    /// Ask to delete one record
    pub fn request_delete(&mut self, id: RecordId) -> &PendingConfirmation {
        self.pending.insert(PendingConfirmation::DeleteOne(id))
    }

    /// Ask to delete every record; `None` when there is nothing to delete
    pub fn request_delete_all(&mut self) -> Option<&PendingConfirmation> {
        if !self.can_delete_all() {
            return None;
        }
        Some(self.pending.insert(PendingConfirmation::DeleteAll))
    }

    /// Carry out the pending action; no-op without one
    pub fn confirm(&mut self) -> Result<Option<PendingConfirmation>, PortalError> {
        let Some(pending) = self.pending.take() else {
            return Ok(None);
        };
        match &pending {
            PendingConfirmation::DeleteOne(id) => {
                self.repository.delete(id)?;
                self.show_toast(MSG_DELETED, Severity::Success);
            }
            PendingConfirmation::DeleteAll => {
                self.repository.delete_all()?;
                self.show_toast(MSG_DELETED_ALL, Severity::Success);
            }
        }
        Ok(Some(pending))
    }

    /// Drop the pending action
    pub fn cancel(&mut self) {
        self.pending = None;
    }

    /// Change and persist the theme
    pub fn set_theme(&mut self, name: &str) -> Result<(), PortalError> {
        if !is_known_theme(name) {
            return Err(PortalError::UnknownTheme(name.to_string()));
        }
        self.theme.replace(name.to_string())?;
        tracing::info!(theme = name, "theme changed");
        Ok(())
    }

    /// Show a toast, replacing any visible one; returns its id
    pub fn show_toast(&mut self, message: impl Into<String>, severity: Severity) -> u64 {
        self.toast_seq += 1;
        let toast = Toast {
            id: self.toast_seq,
            message: message.into(),
            severity,
            issued_at: Instant::now(),
        };
        tracing::debug!(id = toast.id, %severity, message = %toast.message, "toast");
        self.toast = Some(toast);
        self.toast_seq
    }

    /// Clear the toast only if it is still the one with `id`
    pub fn expire_toast(&mut self, id: u64) {
        if self.toast.as_ref().is_some_and(|t| t.id == id) {
            self.toast = None;
        }
    }

    /// Close the visible toast
    pub fn dismiss_toast(&mut self) {
        self.toast = None;
    }

    /// Expire the toast if it has outlived its lifetime at `now`
    pub fn tick(&mut self, now: Instant) {
        if self.toast.as_ref().is_some_and(|t| t.is_expired(now)) {
            self.toast = None;
        }
    }

    /// Start an extraction for the open form
    pub fn begin_autofill(&mut self) -> Result<AutofillTicket, PortalError> {
        Ok(self.form_mut()?.begin_autofill()?)
    }

    /// Deliver an extraction result to the open form
    ///
    /// Stale results are dropped silently. Success and failure are both
    /// reported as toasts; a failure leaves the form untouched.
    pub fn finish_autofill(
        &mut self,
        ticket: AutofillTicket,
        result: Result<PartialRecord, ExtractError>,
    ) -> Result<AutofillOutcome, PortalError> {
        let form = self.form_mut()?;
        let partial = match result {
            Ok(partial) => partial,
            Err(e) => {
                if form.finish_autofill(ticket, Err(())) == Ok(AutofillOutcome::Stale) {
                    return Ok(AutofillOutcome::Stale);
                }
                self.show_toast(e.to_string(), Severity::Error);
                return Err(e.into());
            }
        };

        if form.finish_autofill(ticket, Ok::<_, ()>(&partial)) == Ok(AutofillOutcome::Stale) {
            return Ok(AutofillOutcome::Stale);
        }
        for conflict in form.lookup_conflicts() {
            tracing::warn!(%conflict, "extracted selection is not in the lookup table");
        }
        self.show_toast(MSG_EXTRACTED, Severity::Success);
        Ok(AutofillOutcome::Applied)
    }

    /// Extract `image` (bytes and MIME type) into the open form
    ///
    /// Without an image only an info toast is shown and `None` is returned.
    pub async fn autofill(
        &mut self,
        extractor: &dyn Extractor,
        image: Option<(&[u8], &str)>,
    ) -> Result<Option<AutofillOutcome>, PortalError> {
        self.form_mut()?;
        let Some((bytes, mime_type)) = image else {
            self.show_toast(MSG_NO_IMAGE, Severity::Info);
            return Ok(None);
        };
        let ticket = self.begin_autofill()?;
        let result = extractor.extract(bytes, mime_type).await;
        self.finish_autofill(ticket, result).map(Some)
    }
}
