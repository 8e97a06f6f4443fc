//! Integration tests for the file-backed preference store.

use std::fs;

use formfit_cli::prefs::FileStore;
use formfit_core::i18n::{PreferenceStore, Translator, LANGUAGE_KEY};
use formfit_core::Language;
use tempfile::TempDir;

#[test]
fn test_missing_file_starts_empty() {
    let dir = TempDir::new().unwrap();
    let store = FileStore::open(dir.path().join("prefs.json"));
    assert_eq!(store.get(LANGUAGE_KEY), None);
}

#[test]
fn test_language_survives_reopen() {
    let dir = TempDir::new().unwrap();
    let path = dir.path().join("prefs.json");

    let mut translator = Translator::new(FileStore::open(&path));
    translator.set_language(Language::Hi).unwrap();

    let reopened = Translator::new(FileStore::open(&path));
    assert_eq!(reopened.language(), Language::Hi);
    assert_eq!(reopened.t("download"), "डाउनलोड");
}

#[test]
fn test_file_is_json_object() {
    let dir = TempDir::new().unwrap();
    let path = dir.path().join("prefs.json");

    let mut store = FileStore::open(&path);
    store.set(LANGUAGE_KEY, "hi").unwrap();

    let value: serde_json::Value = serde_json::from_str(&fs::read_to_string(&path).unwrap()).unwrap();
    assert_eq!(value["language"], "hi");
}

#[test]
fn test_malformed_file_ignored() {
    let dir = TempDir::new().unwrap();
    let path = dir.path().join("prefs.json");
    fs::write(&path, "not json").unwrap();

    let translator = Translator::new(FileStore::open(&path));
    assert_eq!(translator.language(), Language::En);
}

#[test]
fn test_unwritable_path_keeps_state() {
    let dir = TempDir::new().unwrap();
    let path = dir.path().join("missing-dir").join("prefs.json");

    let mut store = FileStore::open(&path);
    assert!(store.set(LANGUAGE_KEY, "hi").is_err());
    assert_eq!(store.get(LANGUAGE_KEY), None);
}
