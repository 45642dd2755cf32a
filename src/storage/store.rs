//! Key-value stores backing session persistence
//!
//! Keys are `/`-separated; the first segment acts as a namespace.
//! ```text
//! {root}/
//! ├── session/
//! │   ├── deck.json
//! │   └── ...
//! └── history/
//!     └── shown.json
//! ```

use std::collections::BTreeMap;
use std::fs;
use std::io::ErrorKind;
use std::path::{Path, PathBuf};

use thiserror::Error;

#[derive(Error, Debug)]
pub enum StorageError {
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),

    #[error("Data directory not found")]
    DataDirNotFound,

    #[error("Invalid key: {0}")]
    InvalidKey(String),
}

pub type Result<T> = std::result::Result<T, StorageError>;

/// String values under string keys, last write wins
pub trait KeyValueStore {
    fn get(&self, key: &str) -> Result<Option<String>>;

    fn set(&mut self, key: &str, value: &str) -> Result<()>;

    /// Removing a missing key is not an error
    fn remove(&mut self, key: &str) -> Result<()>;
}

/// One JSON file per key under a root directory
pub struct FileStore {
    root: PathBuf,
}

impl FileStore {
    pub fn new(root: PathBuf) -> Self {
        Self { root }
    }

    /// Get the default data directory
    pub fn default_data_dir() -> Result<PathBuf> {
        dirs::data_local_dir()
            .map(|p| p.join("flashdrill"))
            .ok_or(StorageError::DataDirNotFound)
    }

    /// Get the file backing a key
    fn key_path(&self, key: &str) -> Result<PathBuf> {
        let mut path = self.root.clone();
        for segment in key.split('/') {
            if segment.is_empty() || segment == "." || segment == ".." {
                return Err(StorageError::InvalidKey(key.to_string()));
            }
            path.push(segment);
        }
        path.set_extension("json");
        Ok(path)
    }

    /// Sibling file a value is written to before being renamed into place
    fn temp_path(path: &Path) -> PathBuf {
        let name = path
            .file_name()
            .map(|n| n.to_string_lossy().into_owned())
            .unwrap_or_default();
        path.with_file_name(format!(".{}.tmp", name))
    }
}

impl KeyValueStore for FileStore {
    fn get(&self, key: &str) -> Result<Option<String>> {
        let path = self.key_path(key)?;
        match fs::read_to_string(&path) {
            Ok(content) => Ok(Some(content)),
            Err(e) if e.kind() == ErrorKind::NotFound => Ok(None),
            Err(e) => Err(e.into()),
        }
    }

    fn set(&mut self, key: &str, value: &str) -> Result<()> {
        let path = self.key_path(key)?;
        if let Some(parent) = path.parent() {
            fs::create_dir_all(parent)?;
        }
        // A reader sees either the old value or the new one, never a partial write
        let temp_path = Self::temp_path(&path);
        fs::write(&temp_path, value)?;
        fs::rename(&temp_path, &path)?;
        Ok(())
    }

    fn remove(&mut self, key: &str) -> Result<()> {
        let path = self.key_path(key)?;
        match fs::remove_file(&path) {
            Ok(()) => Ok(()),
            Err(e) if e.kind() == ErrorKind::NotFound => Ok(()),
            Err(e) => Err(e.into()),
        }
    }
}

/// Volatile store; nothing survives the process
#[derive(Debug, Default, Clone)]
pub struct MemoryStore {
    entries: BTreeMap<String, String>,
}

impl MemoryStore {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
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

    fn remove(&mut self, key: &str) -> Result<()> {
        self.entries.remove(key);
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;

    fn create_test_store() -> (FileStore, TempDir) {
        let temp_dir = TempDir::new().unwrap();
        let store = FileStore::new(temp_dir.path().to_path_buf());
        (store, temp_dir)
    }

    #[test]
    fn test_file_store_roundtrip() {
        let (mut store, temp) = create_test_store();

        assert_eq!(store.get("session/deck").unwrap(), None);
        store.set("session/deck", "[]").unwrap();
        assert_eq!(store.get("session/deck").unwrap().as_deref(), Some("[]"));
        assert!(temp.path().join("session").join("deck.json").exists());

        store.set("session/deck", "[1]").unwrap();
        assert_eq!(store.get("session/deck").unwrap().as_deref(), Some("[1]"));
    }

    #[test]
    fn test_file_store_write_leaves_no_temp_file() {
        let (mut store, temp) = create_test_store();
        store.set("session/deck", "[]").unwrap();
        store.set("session/deck", "[2]").unwrap();

        let session_dir = temp.path().join("session");
        let names: Vec<String> = fs::read_dir(&session_dir)
            .unwrap()
            .map(|entry| entry.unwrap().file_name().to_string_lossy().into_owned())
            .collect();
        assert_eq!(names, vec!["deck.json"]);
        assert_eq!(
            FileStore::temp_path(&session_dir.join("deck.json")),
            session_dir.join(".deck.json.tmp")
        );
    }

    #[test]
    fn test_file_store_replaces_stale_temp_file() {
        let (mut store, temp) = create_test_store();
        let session_dir = temp.path().join("session");
        fs::create_dir_all(&session_dir).unwrap();
        // Left behind by an interrupted write
        fs::write(session_dir.join(".deck.json.tmp"), "[{trunc").unwrap();

        store.set("session/deck", "[3]").unwrap();
        assert_eq!(store.get("session/deck").unwrap().as_deref(), Some("[3]"));
        assert!(!session_dir.join(".deck.json.tmp").exists());
    }

    #[test]
    fn test_file_store_remove_missing() {
        let (mut store, _temp) = create_test_store();
        store.remove("history/shown").unwrap();

        store.set("history/shown", "[]").unwrap();
        store.remove("history/shown").unwrap();
        assert_eq!(store.get("history/shown").unwrap(), None);
    }

    #[test]
    fn test_file_store_rejects_traversal() {
        let (mut store, _temp) = create_test_store();
        assert!(matches!(
            store.set("../escape", "x"),
            Err(StorageError::InvalidKey(_))
        ));
        assert!(matches!(
            store.get("session//deck"),
            Err(StorageError::InvalidKey(_))
        ));
    }

    #[test]
    fn test_memory_store() {
        let mut store = MemoryStore::new();
        assert!(store.is_empty());
        store.set("a", "1").unwrap();
        store.set("b", "2").unwrap();
        store.remove("a").unwrap();
        assert_eq!(store.len(), 1);
        assert_eq!(store.get("b").unwrap().as_deref(), Some("2"));
    }
}
