//! Key-value save stores.

use crate::SnapshotError;
use std::collections::BTreeMap;
use std::fs;
use std::io::ErrorKind;
use std::path::{Path, PathBuf};
use tracing::debug;

/// String values by string key.
pub trait SaveStore {
    fn get(&self, key: &str) -> Result<Option<String>, SnapshotError>;
    fn put(&mut self, key: &str, value: String) -> Result<(), SnapshotError>;
    /// Returns whether the key existed.
    fn remove(&mut self, key: &str) -> Result<bool, SnapshotError>;
}

#[derive(Clone, Debug, Default)]
pub struct MemoryStore {
    entries: BTreeMap<String, String>,
}

impl MemoryStore {
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}

impl SaveStore for MemoryStore {
    fn get(&self, key: &str) -> Result<Option<String>, SnapshotError> {
        Ok(self.entries.get(key).cloned())
    }

    fn put(&mut self, key: &str, value: String) -> Result<(), SnapshotError> {
        self.entries.insert(key.to_string(), value);
        Ok(())
    }

    fn remove(&mut self, key: &str) -> Result<bool, SnapshotError> {
        Ok(self.entries.remove(key).is_some())
    }
}

/// One `<key>.json` file per key inside a directory.
#[derive(Clone, Debug)]
pub struct DirStore {
    root: PathBuf,
}

impl DirStore {
    /// Open a store, creating the directory when needed.
    pub fn open(root: impl AsRef<Path>) -> Result<Self, SnapshotError> {
        let root = root.as_ref().to_path_buf();
        fs::create_dir_all(&root)?;
        Ok(Self { root })
    }

    pub fn root(&self) -> &Path {
        &self.root
    }

    fn path(&self, key: &str) -> Result<PathBuf, SnapshotError> {
        let valid = !key.is_empty()
            && key
                .chars()
                .all(|c| c.is_ascii_alphanumeric() || c == '_' || c == '-');
        if !valid {
            return Err(SnapshotError::InvalidKey(key.to_string()));
        }
        Ok(self.root.join(format!("{key}.json")))
    }
}

impl SaveStore for DirStore {
    fn get(&self, key: &str) -> Result<Option<String>, SnapshotError> {
        match fs::read_to_string(self.path(key)?) {
            Ok(body) => Ok(Some(body)),
            Err(e) if e.kind() == ErrorKind::NotFound => Ok(None),
            Err(e) => Err(e.into()),
        }
    }

    fn put(&mut self, key: &str, value: String) -> Result<(), SnapshotError> {
        let path = self.path(key)?;
        // Atomic replace.
        let tmp = path.with_extension("json.tmp");
        fs::write(&tmp, value)?;
        fs::rename(&tmp, &path)?;
        debug!(path = %path.display(), "store entry written");
        Ok(())
    }

    fn remove(&mut self, key: &str) -> Result<bool, SnapshotError> {
        match fs::remove_file(self.path(key)?) {
            Ok(()) => Ok(true),
            Err(e) if e.kind() == ErrorKind::NotFound => Ok(false),
            Err(e) => Err(e.into()),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::tempdir;

    #[test]
    fn memory_store_basics() {
        let mut store = MemoryStore::default();
        assert!(store.is_empty());
        store.put("a", "1".into()).unwrap();
        store.put("a", "2".into()).unwrap();
        assert_eq!(store.get("a").unwrap().as_deref(), Some("2"));
        assert_eq!(store.len(), 1);
        assert!(store.remove("a").unwrap());
        assert!(store.get("a").unwrap().is_none());
    }

    #[test]
    fn dir_store_persists_across_handles() {
        let dir = tempdir().unwrap();
        let mut store = DirStore::open(dir.path().join("saves")).unwrap();
        store.put("gameState_anna", "{}".into()).unwrap();
        assert!(dir.path().join("saves/gameState_anna.json").exists());

        let reopened = DirStore::open(dir.path().join("saves")).unwrap();
        assert_eq!(reopened.get("gameState_anna").unwrap().as_deref(), Some("{}"));
        assert!(reopened.get("scores").unwrap().is_none());
    }

    #[test]
    fn dir_store_rejects_path_like_keys() {
        let dir = tempdir().unwrap();
        let mut store = DirStore::open(dir.path()).unwrap();
        assert!(matches!(
            store.put("../escape", "x".into()),
            Err(SnapshotError::InvalidKey(_))
        ));
        assert!(matches!(store.get(""), Err(SnapshotError::InvalidKey(_))));
    }

    #[test]
    fn dir_store_remove_reports_existence() {
        let dir = tempdir().unwrap();
        let mut store = DirStore::open(dir.path()).unwrap();
        store.put("k", "v".into()).unwrap();
        assert!(store.remove("k").unwrap());
        assert!(!store.remove("k").unwrap());
    }
}
