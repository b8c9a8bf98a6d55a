mod common;

use common::utils::{contact_form, scratch_dir, survey_form};
use form_builder::error::{FormError, ValidationError};
use form_builder::model::{FormDefinition, Submission, SubmissionValue};
use form_builder::storage::definitions::SAVED_FORMS_KEY;
use form_builder::storage::port::key_digest;
use form_builder::storage::submissions::{DISPLAY_LIMIT, log_key};
use form_builder::storage::{DefinitionStore, FileStore, KeyValueStore, MemoryStore, SubmissionLog};

fn entry(n: usize) -> Submission {
    [("Email", SubmissionValue::from(format!("user{}@example.com", n)))]
        .into_iter()
        .collect()
}

// ============================================================================
// Definition store
// ============================================================================

#[test]
fn save_then_load_and_list() {
    let mut store = DefinitionStore::new(MemoryStore::new());
    store.save(&contact_form()).unwrap();
    store.save(&survey_form()).unwrap();

    assert_eq!(store.list().unwrap(), vec!["Contact", "Survey"]);
    assert_eq!(store.load("Survey").unwrap(), survey_form());
    assert!(store.contains("Contact").unwrap());
}

#[test]
fn duplicate_title_is_rejected_and_store_unchanged() {
    let mut store = DefinitionStore::new(MemoryStore::new());
    store.save(&contact_form()).unwrap();
    let before = store.all().unwrap();

    let mut other = survey_form();
    other.form_title = "Contact".into();
    let err = store.save(&other).unwrap_err();

    assert_eq!(
        err.validation(),
        Some(&ValidationError::DuplicateTitle("Contact".into()))
    );
    assert_eq!(store.all().unwrap(), before);
}

#[test]
fn empty_title_is_rejected_before_touching_storage() {
    let mut store = DefinitionStore::new(MemoryStore::new());
    let err = store.save(&FormDefinition::new("  ", vec![])).unwrap_err();

    assert_eq!(err.validation(), Some(&ValidationError::EmptyTitle));
    assert!(store.into_inner().is_empty());
}

#[test]
fn load_unknown_title_is_not_found() {
    let store = DefinitionStore::new(MemoryStore::new());
    assert!(matches!(store.load("Nope"), Err(FormError::NotFound(t)) if t == "Nope"));
    assert!(store.list().unwrap().is_empty());
}

#[test]
fn corrupt_definition_list_is_reported() {
    let mut storage = MemoryStore::new();
    storage.set(SAVED_FORMS_KEY, "not json").unwrap();
    let store = DefinitionStore::new(storage);

    assert!(matches!(store.list(), Err(FormError::Corrupt { key, .. }) if key == SAVED_FORMS_KEY));
}

#[test]
fn definitions_persist_as_json_array() {
    let mut storage = MemoryStore::new();
    DefinitionStore::new(&mut storage).save(&contact_form()).unwrap();

    let raw = storage.get(SAVED_FORMS_KEY).unwrap().unwrap();
    let value: serde_json::Value = serde_json::from_str(&raw).unwrap();
    assert_eq!(value[0]["formTitle"], "Contact");
    assert_eq!(value[0]["fields"][0]["mandatory"], true);
}

// ============================================================================
// Submission log
// ============================================================================

#[test]
fn append_is_ordered_and_keyed_by_title() {
    let mut log = SubmissionLog::new(MemoryStore::new());
    log.append("Contact", entry(1)).unwrap();
    log.append("Contact", entry(2)).unwrap();
    log.append("Survey", entry(9)).unwrap();

    assert_eq!(log.load("Contact").unwrap(), vec![entry(1), entry(2)]);
    assert_eq!(log.load("Survey").unwrap(), vec![entry(9)]);
    assert!(log.load("Other").unwrap().is_empty());
}

#[test]
fn recent_keeps_last_ten_in_append_order() {
    let mut log = SubmissionLog::new(MemoryStore::new());
    for n in 1..=11 {
        log.append("Contact", entry(n)).unwrap();
    }

    let recent = log.recent("Contact", DISPLAY_LIMIT).unwrap();
    assert_eq!(recent.len(), 10);
    assert_eq!(recent, (2..=11).map(entry).collect::<Vec<_>>());
    assert_eq!(log.load("Contact").unwrap().len(), 11);
}

#[test]
fn log_key_cannot_collide_with_definition_list() {
    assert_ne!(log_key(SAVED_FORMS_KEY), SAVED_FORMS_KEY);

    let mut storage = MemoryStore::new();
    DefinitionStore::new(&mut storage).save(&contact_form()).unwrap();
    SubmissionLog::new(&mut storage).append(SAVED_FORMS_KEY, entry(1)).unwrap();

    assert_eq!(DefinitionStore::new(&mut storage).list().unwrap(), vec!["Contact"]);
}

// ============================================================================
// File store
// ============================================================================

#[test]
fn file_store_roundtrips_values() {
    let dir = scratch_dir("file-store-roundtrip");
    let mut store = FileStore::open(&dir).unwrap();

    assert_eq!(store.get("missing").unwrap(), None);
    store.set("Contact / Form?", "[1,2]").unwrap();
    assert_eq!(store.get("Contact / Form?").unwrap().as_deref(), Some("[1,2]"));

    let expected = dir.join(format!("{}.json", key_digest("Contact / Form?")));
    assert_eq!(store.path_for("Contact / Form?"), expected);
    assert!(expected.exists());
}

#[test]
fn file_store_survives_reopen() {
    let dir = scratch_dir("file-store-reopen");
    {
        let mut store = DefinitionStore::new(FileStore::open(&dir).unwrap());
        store.save(&contact_form()).unwrap();
        SubmissionLog::new(FileStore::open(&dir).unwrap())
            .append("Contact", entry(1))
            .unwrap();
    }

    let store = DefinitionStore::new(FileStore::open(&dir).unwrap());
    assert_eq!(store.load("Contact").unwrap(), contact_form());
    let log = SubmissionLog::new(FileStore::open(&dir).unwrap());
    assert_eq!(log.load("Contact").unwrap(), vec![entry(1)]);
}

#[test]
fn key_digest_is_sha1_hex() {
    assert_eq!(key_digest("abc"), "a9993e364706816aba3e25717850c26c9cd0d89d");
}
