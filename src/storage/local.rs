//! Local filesystem storage backend
//!
//! Each key lives in `<base_dir>/<key>.json`. Writes go through a temporary
//! file and a rename so a crash mid-write never leaves a torn value behind.

use super::{validate_key, KeyValueStore, StorageError};
use std::path::{Path, PathBuf};

/// Local filesystem storage backend
#[derive(Debug, Clone)]
pub struct LocalStorage {
    /// Directory holding one file per key
    base_dir: PathBuf,
}

impl LocalStorage {
    /// Create a local storage backend rooted at `base_dir`
    ///
    /// The directory is created lazily on the first write.
    pub fn with_base_dir(base_dir: impl Into<PathBuf>) -> Self {
        Self {
            base_dir: base_dir.into(),
        }
    }

    pub fn base_dir(&self) -> &Path {
        &self.base_dir
    }

    /// Resolve a key to its file path
    fn resolve(&self, key: &str) -> Result<PathBuf, StorageError> {
        validate_key(key)?;
        Ok(self.base_dir.join(format!("{}.json", key)))
    }
}

impl KeyValueStore for LocalStorage {
    fn get(&self, key: &str) -> Result<Option<String>, StorageError> {
        let path = self.resolve(key)?;

        match std::fs::read_to_string(&path) {
            Ok(data) => Ok(Some(data)),
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => Ok(None),
            Err(e) => Err(StorageError::from(e)),
        }
    }

    fn set(&mut self, key: &str, value: &str) -> Result<(), StorageError> {
        let path = self.resolve(key)?;

        std::fs::create_dir_all(&self.base_dir)?;

        let tmp = path.with_extension("json.tmp");
        std::fs::write(&tmp, value)?;
        std::fs::rename(&tmp, &path)?;
        log::trace!("wrote {} bytes to {}", value.len(), path.display());
        Ok(())
    }

    fn remove(&mut self, key: &str) -> Result<(), StorageError> {
        let path = self.resolve(key)?;

        match std::fs::remove_file(&path) {
            Ok(()) => Ok(()),
            // Not found is OK for delete
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => Ok(()),
            Err(e) => Err(StorageError::from(e)),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;

    fn setup_test_dir() -> (TempDir, LocalStorage) {
        let dir = TempDir::new().unwrap();
        let storage = LocalStorage::with_base_dir(dir.path());
        (dir, storage)
    }

    #[test]
    fn test_set_and_get() {
        let (dir, mut storage) = setup_test_dir();

        storage.set("orvian_projects", "[]").unwrap();
        assert_eq!(storage.get("orvian_projects").unwrap().as_deref(), Some("[]"));
        assert!(dir.path().join("orvian_projects.json").exists());
        assert!(!dir.path().join("orvian_projects.json.tmp").exists());
    }

    #[test]
    fn test_get_missing_is_none() {
        let (_dir, storage) = setup_test_dir();
        assert_eq!(storage.get("nothing_here").unwrap(), None);
    }

    #[test]
    fn test_overwrite() {
        let (_dir, mut storage) = setup_test_dir();
        storage.set("k", "one").unwrap();
        storage.set("k", "two").unwrap();
        assert_eq!(storage.get("k").unwrap().as_deref(), Some("two"));
    }

    #[test]
    fn test_remove() {
        let (dir, mut storage) = setup_test_dir();

        storage.set("delete_me", "x").unwrap();
        storage.remove("delete_me").unwrap();
        assert!(!dir.path().join("delete_me.json").exists());

        // Removing again should be OK
        storage.remove("delete_me").unwrap();
    }

    #[test]
    fn test_creates_base_dir() {
        let dir = TempDir::new().unwrap();
        let nested = dir.path().join("deep").join("nested");
        let mut storage = LocalStorage::with_base_dir(&nested);

        storage.set("k", "data").unwrap();
        assert_eq!(storage.get("k").unwrap().as_deref(), Some("data"));
        assert_eq!(storage.base_dir(), nested.as_path());
    }

    #[test]
    fn test_rejects_path_like_keys() {
        let (_dir, mut storage) = setup_test_dir();
        assert!(matches!(
            storage.set("../escape", "x"),
            Err(StorageError::InvalidKey(_))
        ));
    }
}
