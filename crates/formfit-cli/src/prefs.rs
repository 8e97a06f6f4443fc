//! Preferences saved as a flat JSON object on disk.

use std::collections::BTreeMap;
use std::fs;
use std::io;
use std::path::{Path, PathBuf};

use formfit_core::i18n::{PreferenceStore, StoreError};
use tracing::{debug, warn};

/// Default preference file, relative to the working directory.
pub const DEFAULT_PREFS_FILE: &str = ".formfit-preferences.json";

/// A [`PreferenceStore`] backed by a JSON file.
///
/// Every `set` rewrites the whole file.
#[derive(Debug, Clone)]
pub struct FileStore {
    path: PathBuf,
    values: BTreeMap<String, String>,
}

impl FileStore {
    /// Load the file at `path`.
    ///
    /// A missing file starts empty. An unreadable or malformed file also
    /// starts empty, with a warning.
    pub fn open(path: impl Into<PathBuf>) -> Self {
        let path = path.into();
        let values = match read_preferences(&path) {
            Ok(Some(text)) => serde_json::from_str(&text).unwrap_or_else(|e| {
                warn!(path = %path.display(), error = %e, "ignoring malformed preference file");
                BTreeMap::new()
            }),
            Ok(None) => BTreeMap::new(),
            Err(e) => {
                warn!(path = %path.display(), error = %e, "cannot read preference file");
                BTreeMap::new()
            }
        };
        debug!(path = %path.display(), entries = values.len(), "preferences loaded");
        Self { path, values }
    }

    pub fn path(&self) -> &Path {
        &self.path
    }
}

/// `Ok(None)` when the file does not exist.
fn read_preferences(path: &Path) -> io::Result<Option<String>> {
    match fs::read_to_string(path) {
        Ok(text) => Ok(Some(text)),
        Err(e) if e.kind() == io::ErrorKind::NotFound => Ok(None),
        Err(e) => Err(e),
    }
}

impl PreferenceStore for FileStore {
    fn get(&self, key: &str) -> Option<String> {
        self.values.get(key).cloned()
    }

    fn set(&mut self, key: &str, value: &str) -> Result<(), StoreError> {
        let mut values = self.values.clone();
        values.insert(key.to_string(), value.to_string());
        let json =
            serde_json::to_string_pretty(&values).map_err(|e| StoreError::Write(e.to_string()))?;
        fs::write(&self.path, json).map_err(|e| {
            StoreError::Write(format!("{}: {e}", self.path.display()))
        })?;
        self.values = values;
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;

    #[test]
    fn test_missing_file_is_not_an_error() {
        let dir = TempDir::new().unwrap();
        assert!(read_preferences(&dir.path().join("absent.json")).unwrap().is_none());
    }

    #[test]
    fn test_unreadable_path_is_reported() {
        let dir = TempDir::new().unwrap();
        // A directory exists but cannot be read as a file
        assert!(read_preferences(dir.path()).is_err());

        let store = FileStore::open(dir.path());
        assert_eq!(store.get("language"), None);
    }

    #[test]
    fn test_existing_file_is_read() {
        let dir = TempDir::new().unwrap();
        let path = dir.path().join("prefs.json");
        fs::write(&path, r#"{"language":"hi"}"#).unwrap();

        assert_eq!(
            read_preferences(&path).unwrap().as_deref(),
            Some(r#"{"language":"hi"}"#)
        );
        assert_eq!(FileStore::open(&path).get("language").as_deref(), Some("hi"));
    }
}
