use mswasth_catalog::{LookupTable, DEFAULT_THEME};
use mswasth_core::{
    App, PendingConfirmation, PortalConfig, PortalError, Severity, ViewMode, MSG_ADDED, MSG_DELETED,
    MSG_DELETED_ALL, MSG_EXTRACTED, MSG_NO_IMAGE, MSG_UPDATED, TOAST_TTL,
};
use mswasth_extract::{ExtractError, Extractor};
use mswasth_form::{AutofillOutcome, FormEngine, FormError};
use mswasth_record::{Field, PartialRecord, PolicyRecord, RecordId};
use mswasth_store::{KeyValueStore, MemoryStore, StoreError, POLICIES_KEY, THEME_KEY};
use mswasth_test_utils::{sample_record, sample_records};
use pretty_assertions::assert_eq;
use std::sync::Arc;

fn app_with(records: &[PolicyRecord]) -> (Arc<MemoryStore>, App) {
    let store = Arc::new(
        MemoryStore::new().with_entry(POLICIES_KEY, serde_json::to_string(records).unwrap()),
    );
    let app = App::new(store.clone(), Arc::new(LookupTable::builtin()));
    (store, app)
}

fn fill_from(form: &mut FormEngine, record: &PolicyRecord) {
    for field in Field::ALL {
        if field == Field::Id || !record.is_set(field) {
            continue;
        }
        form.set_field(field, &record.display(field)).unwrap();
    }
}

fn toast_text(app: &App) -> Option<(&str, Severity)> {
    app.toast().map(|t| (t.message.as_str(), t.severity))
}

/// Accepts loads, refuses every write
struct ReadOnlyStore;

impl KeyValueStore for ReadOnlyStore {
    fn load(&self, _key: &str) -> mswasth_store::Result<Option<String>> {
        Ok(None)
    }

    fn save(&self, key: &str, _value: &str) -> mswasth_store::Result<()> {
        Err(StoreError::io_error(
            key,
            std::io::Error::new(std::io::ErrorKind::PermissionDenied, "read-only"),
        ))
    }

    fn remove(&self, _key: &str) -> mswasth_store::Result<()> {
        Ok(())
    }
}

/// Returns a fixed extraction result
struct StubExtractor(Result<PartialRecord, &'static str>);

#[async_trait::async_trait]
impl Extractor for StubExtractor {
    async fn extract(&self, _image: &[u8], _mime_type: &str) -> mswasth_extract::Result<PartialRecord> {
        match &self.0 {
            Ok(partial) => Ok(partial.clone()),
            Err(message) => Err(ExtractError::Remote {
                status: 500,
                message: (*message).to_string(),
            }),
        }
    }
}

#[test]
fn new_record_is_appended_under_the_id_shown_in_the_form() {
    let (store, mut app) = app_with(&sample_records(2));
    app.add_new();
    fill_from(app.form_mut().unwrap(), &sample_record(9));
    let shown = app.form().unwrap().record().id.clone();

    let id = app.save_form().unwrap();

    assert_eq!(id, shown);

    assert!(matches!(app.mode(), ViewMode::List));
    assert_eq!(app.records().len(), 3);
    assert_eq!(app.records()[2].id, id);
    assert!(app.records()[2].eq_ignoring_id(&sample_record(9)));
    assert_eq!(toast_text(&app), Some((MSG_ADDED, Severity::Success)));

    let persisted: Vec<PolicyRecord> = serde_json::from_str(&store.load(POLICIES_KEY).unwrap().unwrap()).unwrap();
    assert_eq!(persisted, app.records());
}

#[test]
fn missing_required_fields_keep_form_open() {
    let (_store, mut app) = app_with(&[]);
    app.add_new();
    app.form_mut().unwrap().set_field(Field::CustomerName, "Asha Das").unwrap();

    let err = app.save_form().unwrap_err();

    assert!(matches!(err, PortalError::Form(FormError::MissingRequired(_))));
    assert_eq!(app.form().unwrap().record().customer_name, "Asha Das");
    assert!(app.records().is_empty());
    assert!(app.toast().is_none());
}

#[test]
fn edit_replaces_record_in_place() {
    let (_store, mut app) = app_with(&sample_records(3));
    let id = RecordId::new("rec-0001");

    app.edit(&id).unwrap();
    assert!(app.form().unwrap().is_editing());
    app.form_mut().unwrap().set_field(Field::Remarks, "called back").unwrap();
    assert_eq!(app.save_form().unwrap(), id);

    assert_eq!(app.records().len(), 3);
    assert_eq!(app.records()[1].id, id);
    assert_eq!(app.records()[1].remarks, "called back");
    assert_eq!(toast_text(&app), Some((MSG_UPDATED, Severity::Success)));
}

#[test]
fn editing_unknown_record_fails() {
    let (_store, mut app) = app_with(&sample_records(1));
    let err = app.edit(&RecordId::new("missing")).unwrap_err();
    assert!(matches!(err, PortalError::UnknownRecord(_)));
    assert!(app.form().is_none());
}

#[test]
fn closing_form_discards_changes() {
    let (_store, mut app) = app_with(&sample_records(1));
    app.edit(&RecordId::new("rec-0000")).unwrap();
    app.form_mut().unwrap().set_field(Field::Region, "West").unwrap();
    app.close_form();

    assert!(app.form().is_none());
    assert_eq!(app.records()[0], sample_record(0));
    assert!(matches!(app.form_mut(), Err(PortalError::NoFormOpen)));
}

#[test]
fn storage_failure_is_reported_and_form_stays_open() {
    let mut app = App::new(Arc::new(ReadOnlyStore), Arc::new(LookupTable::builtin()));
    app.add_new();
    fill_from(app.form_mut().unwrap(), &sample_record(4));

    let err = app.save_form().unwrap_err();

    assert!(matches!(err, PortalError::Store(StoreError::Io { .. })));
    assert!(app.form().is_some());
    assert!(app.records().is_empty());
    assert_eq!(app.toast().unwrap().severity, Severity::Error);
}

#[test]
fn delete_waits_for_confirmation() {
    let (_store, mut app) = app_with(&sample_records(3));
    let id = RecordId::new("rec-0002");

    let prompt = app.request_delete(id.clone()).prompt();
    assert_eq!(prompt, "Are you sure you want to delete this entry?");
    app.cancel();
    assert_eq!(app.confirm().unwrap(), None);
    assert_eq!(app.records().len(), 3);

    app.request_delete(id.clone());
    assert_eq!(app.confirm().unwrap(), Some(PendingConfirmation::DeleteOne(id.clone())));
    assert!(app.record(&id).is_none());
    assert_eq!(app.records().len(), 2);
    assert_eq!(toast_text(&app), Some((MSG_DELETED, Severity::Success)));
}

#[test]
fn delete_all_is_offered_only_with_records() {
    let (_store, mut empty) = app_with(&[]);
    assert!(!empty.can_delete_all());
    assert!(empty.request_delete_all().is_none());

    let (store, mut app) = app_with(&sample_records(4));
    assert!(app.can_delete_all());
    assert_eq!(
        app.request_delete_all().map(PendingConfirmation::prompt),
        Some("Are you sure you want to delete ALL entries? This action cannot be undone.")
    );
    app.confirm().unwrap();

    assert!(app.records().is_empty());
    assert_eq!(store.load(POLICIES_KEY).unwrap().as_deref(), Some("[]"));
    assert_eq!(toast_text(&app), Some((MSG_DELETED_ALL, Severity::Success)));
}

#[test]
fn newer_toast_survives_older_expiry() {
    let (_store, mut app) = app_with(&[]);
    let first = app.show_toast("first", Severity::Info);
    let second = app.show_toast("second", Severity::Success);
    assert_ne!(first, second);

    app.expire_toast(first);
    assert_eq!(toast_text(&app), Some(("second", Severity::Success)));

    app.expire_toast(second);
    assert!(app.toast().is_none());
}

#[test]
fn toast_expires_after_its_lifetime() {
    let (_store, mut app) = app_with(&[]);
    app.show_toast("saved", Severity::Success);
    let issued = app.toast().unwrap().issued_at;

    app.tick(issued);
    assert!(app.toast().is_some());

    app.tick(issued + TOAST_TTL);
    assert!(app.toast().is_none());
}

#[test]
fn theme_persists_and_rejects_unknown_names() {
    let store = Arc::new(MemoryStore::new());
    let table = Arc::new(LookupTable::builtin());

    let mut app = App::new(store.clone(), table.clone());
    assert_eq!(app.theme(), DEFAULT_THEME);
    app.set_theme("dracula").unwrap();

    let err = app.set_theme("sparkles").unwrap_err();
    assert!(matches!(err, PortalError::UnknownTheme(name) if name == "sparkles"));

    let reopened = App::new(store.clone(), table);
    assert_eq!(reopened.theme(), "dracula");
    assert_eq!(store.load(THEME_KEY).unwrap().as_deref(), Some("\"dracula\""));
}

#[test]
fn list_page_follows_collection() {
    let (_store, mut app) = app_with(&sample_records(12));
    app.list_mut().go_to_page(2);
    {
        let page = app.page();
        assert_eq!(page.total_pages, 2);
        assert_eq!(page.rows.len(), 2);
    }

    app.request_delete(RecordId::new("rec-0011"));
    app.confirm().unwrap();
    app.request_delete(RecordId::new("rec-0010"));
    app.confirm().unwrap();

    let page = app.page();
    assert_eq!(page.page, 1);
    assert_eq!(page.rows.len(), 10);
}

#[tokio::test]
async fn autofill_merges_extracted_fields() {
    let (_store, mut app) = app_with(&[]);
    app.add_new();
    app.form_mut().unwrap().set_field(Field::Remarks, "walk-in").unwrap();

    let extractor = StubExtractor(Ok(PartialRecord {
        customer_name: Some("Chaya Sen".to_string()),
        branch_code: Some("BR7".to_string()),
        ..PartialRecord::default()
    }));
    let outcome = app.autofill(&extractor, Some((b"img".as_slice(), "image/png"))).await.unwrap();

    assert_eq!(outcome, Some(AutofillOutcome::Applied));
    let record = app.form().unwrap().record();
    assert_eq!(record.customer_name, "Chaya Sen");
    assert_eq!(record.branch_code, "BR7");
    assert_eq!(record.remarks, "walk-in");
    assert_eq!(toast_text(&app), Some((MSG_EXTRACTED, Severity::Success)));
    assert!(!app.form().unwrap().is_autofilling());
}

#[tokio::test]
async fn autofill_failure_leaves_form_untouched() {
    let (_store, mut app) = app_with(&[]);
    app.add_new();
    let before = app.form().unwrap().record().clone();

    let extractor = StubExtractor(Err("Failed to process image with the Gemini API."));
    let err = app
        .autofill(&extractor, Some((b"img".as_slice(), "image/png")))
        .await
        .unwrap_err();

    assert!(matches!(err, PortalError::Extract(ExtractError::Remote { status: 500, .. })));
    assert_eq!(app.form().unwrap().record(), &before);
    assert_eq!(
        toast_text(&app),
        Some(("Failed to process image with the Gemini API.", Severity::Error))
    );
    assert!(!app.form().unwrap().is_autofilling());
}

#[tokio::test]
async fn autofill_without_image_only_notifies() {
    let (_store, mut app) = app_with(&[]);
    app.add_new();

    let extractor = StubExtractor(Err("unreachable"));
    let outcome = app.autofill(&extractor, None).await.unwrap();

    assert_eq!(outcome, None);
    assert_eq!(toast_text(&app), Some((MSG_NO_IMAGE, Severity::Info)));
}

#[test]
fn cancelled_autofill_result_is_discarded() {
    let (_store, mut app) = app_with(&[]);
    app.add_new();
    let ticket = app.begin_autofill().unwrap();
    app.form_mut().unwrap().cancel_autofill();

    let partial = PartialRecord {
        region: Some("North".to_string()),
        ..PartialRecord::default()
    };
    assert_eq!(app.finish_autofill(ticket, Ok(partial)).unwrap(), AutofillOutcome::Stale);
    assert_eq!(app.form().unwrap().record().region, "");
    assert!(app.toast().is_none());
}

#[test]
fn autofill_needs_an_open_form() {
    let (_store, mut app) = app_with(&[]);
    assert!(matches!(app.begin_autofill(), Err(PortalError::NoFormOpen)));
}

#[test]
fn file_backed_app_reopens_with_saved_records() {
    let dir = tempfile::tempdir().unwrap();
    let config = PortalConfig::new().with_data_dir(dir.path());

    let mut app = App::open(&config).unwrap();
    app.add_new();
    fill_from(app.form_mut().unwrap(), &sample_record(3));
    let id = app.save_form().unwrap();

    let reopened = App::open(&config).unwrap();
    assert!(reopened.record(&id).unwrap().eq_ignoring_id(&sample_record(3)));
}
