//! In-memory storage backend
//!
//! Used for ephemeral sessions and tests. An optional quota (bytes across
//! all keys and values) mimics a full browser storage area.

use super::{validate_key, KeyValueStore, StorageError};
use std::collections::HashMap;

#[derive(Debug, Clone, Default)]
pub struct MemoryStorage {
    entries: HashMap<String, String>,
    quota: Option<u64>,
}

impl MemoryStorage {
    pub fn new() -> Self {
        Self::default()
    }

    /// Storage that refuses writes which would exceed `limit` bytes
    pub fn with_quota(limit: u64) -> Self {
        Self {
            entries: HashMap::new(),
            quota: Some(limit),
        }
    }

    /// Bytes currently used by keys and values
    pub fn used(&self) -> u64 {
        self.entries
            .iter()
            .map(|(k, v)| (k.len() + v.len()) as u64)
            .sum()
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}

impl KeyValueStore for MemoryStorage {
    fn get(&self, key: &str) -> Result<Option<String>, StorageError> {
        validate_key(key)?;
        Ok(self.entries.get(key).cloned())
    }

    fn set(&mut self, key: &str, value: &str) -> Result<(), StorageError> {
        validate_key(key)?;
        if let Some(limit) = self.quota {
            let replaced = self
                .entries
                .get(key)
                .map_or(0, |old| (key.len() + old.len()) as u64);
            let used = self.used() - replaced + (key.len() + value.len()) as u64;
            if used > limit {
                return Err(StorageError::QuotaExceeded { used, limit });
            }
        }
        self.entries.insert(key.to_string(), value.to_string());
        Ok(())
    }

    fn remove(&mut self, key: &str) -> Result<(), StorageError> {
        validate_key(key)?;
        self.entries.remove(key);
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_roundtrip_and_remove() {
        let mut storage = MemoryStorage::new();
        assert_eq!(storage.get("k").unwrap(), None);
        storage.set("k", "v").unwrap();
        assert_eq!(storage.get("k").unwrap().as_deref(), Some("v"));
        storage.remove("k").unwrap();
        storage.remove("k").unwrap();
        assert!(storage.is_empty());
    }

    #[test]
    fn test_quota() {
        let mut storage = MemoryStorage::with_quota(10);
        storage.set("k", "12345").unwrap();
        assert_eq!(storage.used(), 6);

        // Replacing an entry only counts the difference
        storage.set("k", "123456789").unwrap();

        let err = storage.set("k", "1234567890").unwrap_err();
        assert_eq!(err, StorageError::QuotaExceeded { used: 11, limit: 10 });
        assert_eq!(storage.get("k").unwrap().as_deref(), Some("123456789"));
    }
}
