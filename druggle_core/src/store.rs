//! Durable key-value storage for progress counters.
//!
//! The file-backed store keeps every key in one JSON object, written with
//! file locking and an atomic rename so concurrent players never see a
//! half-written file.

use crate::{Error, Result};
use fs2::FileExt;
use serde_json::{Map, Value};
use std::collections::{BTreeMap, HashMap};
use std::fs::File;
use std::io::{Read, Write};
use std::path::{Path, PathBuf};
use tempfile::NamedTempFile;

/// Minimal string key-value store
pub trait KeyValueStore {
    fn get(&self, key: &str) -> Result<Option<String>>;
    fn set(&mut self, key: &str, value: &str) -> Result<()>;
}

/// In-memory store for tests and dry runs
#[derive(Clone, Debug, Default)]
pub struct MemoryStore {
    entries: HashMap<String, String>,
}

impl MemoryStore {
    pub fn new() -> Self {
        Self::default()
    }
}

impl KeyValueStore for MemoryStore {
    fn get(&self, key: &str) -> Result<Option<String>> {
        Ok(self.entries.get(key).cloned())
    }

    fn set(&mut self, key: &str, value: &str) -> Result<()> {
        self.entries.insert(key.to_string(), value.to_string());
        Ok(())
    }
}

/// JSON-file-backed store with file locking
pub struct FileStore {
    path: PathBuf,
}

impl FileStore {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    /// Read all entries with a shared lock
    ///
    /// A missing file is empty. An unreadable or corrupted file logs a warning
    /// and is treated as empty. Non-string values are kept as their JSON text
    /// so one bad entry never hides the others.
    fn read_entries(&self) -> Result<BTreeMap<String, String>> {
        let path = &self.path;
        if !path.exists() {
            tracing::debug!("No progress file at {:?}", path);
            return Ok(BTreeMap::new());
        }

        let file = match File::open(path) {
            Ok(f) => f,
            Err(e) => {
                tracing::warn!("Unable to open progress file {:?}: {}. Using defaults.", path, e);
                return Ok(BTreeMap::new());
            }
        };

        if let Err(e) = file.lock_shared() {
            tracing::warn!("Unable to lock progress file {:?}: {}. Using defaults.", path, e);
            return Ok(BTreeMap::new());
        }

        let mut contents = String::new();
        let mut reader = std::io::BufReader::new(&file);
        if let Err(e) = reader.read_to_string(&mut contents) {
            let _ = file.unlock();
            tracing::warn!("Failed to read progress file {:?}: {}. Using defaults.", path, e);
            return Ok(BTreeMap::new());
        }

        file.unlock()?;

        let object = match serde_json::from_str::<Map<String, Value>>(&contents) {
            Ok(object) => object,
            Err(e) => {
                tracing::warn!("Failed to parse progress file {:?}: {}. Using defaults.", path, e);
                return Ok(BTreeMap::new());
            }
        };

        let entries = object
            .into_iter()
            .map(|(key, value)| match value {
                Value::String(s) => (key, s),
                other => {
                    tracing::warn!("Progress entry {:?} is not a string: {}", key, other);
                    (key, other.to_string())
                }
            })
            .collect();
        Ok(entries)
    }

    /// Atomically replace the file contents
    ///
    /// Writes to a temp file in the same directory under an exclusive lock,
    /// syncs it, then renames it over the original.
    fn write_entries(&self, entries: &BTreeMap<String, String>) -> Result<()> {
        let parent = self
            .path
            .parent()
            .ok_or_else(|| Error::Store(format!("progress path {:?} has no parent", self.path)))?;
        std::fs::create_dir_all(parent)?;

        let temp = NamedTempFile::new_in(parent)?;
        temp.as_file().lock_exclusive()?;

        {
            let mut writer = std::io::BufWriter::new(temp.as_file());
            let contents = serde_json::to_string_pretty(entries)?;
            writer.write_all(contents.as_bytes())?;
            writer.flush()?;
        }

        temp.as_file().sync_all()?;
        temp.as_file().unlock()?;
        temp.persist(&self.path).map_err(|e| Error::Io(e.error))?;

        tracing::debug!("Saved progress to {:?}", self.path);
        Ok(())
    }
}

impl KeyValueStore for FileStore {
    fn get(&self, key: &str) -> Result<Option<String>> {
        Ok(self.read_entries()?.remove(key))
    }

    fn set(&mut self, key: &str, value: &str) -> Result<()> {
        let mut entries = self.read_entries()?;
        entries.insert(key.to_string(), value.to_string());
        self.write_entries(&entries)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_memory_store_roundtrip() {
        let mut store = MemoryStore::new();
        assert_eq!(store.get("streak").unwrap(), None);
        store.set("streak", "3").unwrap();
        assert_eq!(store.get("streak").unwrap(), Some("3".into()));
    }

    #[test]
    fn test_file_store_persists_across_instances() {
        let temp_dir = tempfile::tempdir().unwrap();
        let path = temp_dir.path().join("progress.json");

        let mut store = FileStore::new(&path);
        store.set("streak", "2").unwrap();
        store.set("achievements", r#"["first_win"]"#).unwrap();

        let reopened = FileStore::new(&path);
        assert_eq!(reopened.get("streak").unwrap(), Some("2".into()));
        assert_eq!(
            reopened.get("achievements").unwrap(),
            Some(r#"["first_win"]"#.into())
        );
    }

    #[test]
    fn test_missing_file_is_empty() {
        let temp_dir = tempfile::tempdir().unwrap();
        let store = FileStore::new(temp_dir.path().join("nope.json"));
        assert_eq!(store.get("streak").unwrap(), None);
    }

    #[test]
    fn test_corrupted_file_is_empty_and_recoverable() {
        let temp_dir = tempfile::tempdir().unwrap();
        let path = temp_dir.path().join("progress.json");
        std::fs::write(&path, "{ invalid json }").unwrap();

        let mut store = FileStore::new(&path);
        assert_eq!(store.get("streak").unwrap(), None);

        store.set("streak", "1").unwrap();
        assert_eq!(store.get("streak").unwrap(), Some("1".into()));
    }

    #[test]
    fn test_non_string_entry_keeps_other_keys() {
        let temp_dir = tempfile::tempdir().unwrap();
        let path = temp_dir.path().join("progress.json");
        std::fs::write(&path, r#"{"streak":"7","achievements":["first_win"],"level":3}"#).unwrap();

        let mut store = FileStore::new(&path);
        assert_eq!(store.get("streak").unwrap(), Some("7".into()));
        assert_eq!(
            store.get("achievements").unwrap(),
            Some(r#"["first_win"]"#.into())
        );
        assert_eq!(store.get("level").unwrap(), Some("3".into()));

        // Rewriting one key leaves the others intact
        store.set("streak", "8").unwrap();
        let reopened = FileStore::new(&path);
        assert_eq!(reopened.get("streak").unwrap(), Some("8".into()));
        assert_eq!(reopened.get("level").unwrap(), Some("3".into()));
    }

    #[test]
    fn test_creates_parent_directories() {
        let temp_dir = tempfile::tempdir().unwrap();
        let path = temp_dir.path().join("nested/dir/progress.json");

        let mut store = FileStore::new(&path);
        store.set("streak", "0").unwrap();
        assert!(path.exists());
    }

    #[test]
    fn test_atomic_save_leaves_no_temp_files() {
        let temp_dir = tempfile::tempdir().unwrap();
        let path = temp_dir.path().join("progress.json");

        let mut store = FileStore::new(&path);
        store.set("streak", "5").unwrap();

        let extras: Vec<_> = std::fs::read_dir(temp_dir.path())
            .unwrap()
            .filter_map(|e| e.ok())
            .filter(|e| e.file_name() != "progress.json")
            .collect();
        assert!(
            extras.is_empty(),
            "Expected only progress.json, found extras: {:?}",
            extras
        );
    }
}
