//! Storage Abstraction Layer
//!
//! Durable state is a flat, synchronous string key-value store, the native
//! counterpart of browser local storage:
//! - `local`: one file per key under a data directory
//! - `memory`: a HashMap, with an optional byte quota
//!
//! Values are JSON documents; encoding and decoding is the caller's business.

pub mod local;
pub mod memory;

pub use local::LocalStorage;
pub use memory::MemoryStorage;

use thiserror::Error;

/// Key holding the JSON array of all projects
pub const PROJECTS_KEY: &str = "orvian_projects";

/// Key holding the signed-in user record
pub const USER_KEY: &str = "orvian_user";

/// Storage error types
#[derive(Debug, Clone, PartialEq, Error)]
pub enum StorageError {
    /// Permission denied
    #[error("permission denied: {0}")]
    PermissionDenied(String),
    /// I/O error
    #[error("I/O error: {0}")]
    IoError(String),
    /// Quota exceeded
    #[error("quota exceeded: {used} / {limit} bytes")]
    QuotaExceeded { used: u64, limit: u64 },
    /// Key contains characters that cannot be stored
    #[error("invalid storage key: {0:?}")]
    InvalidKey(String),
    /// Serialization/deserialization error
    #[error("serialization error: {0}")]
    SerdeError(String),
}

impl From<std::io::Error> for StorageError {
    fn from(e: std::io::Error) -> Self {
        match e.kind() {
            std::io::ErrorKind::PermissionDenied => StorageError::PermissionDenied(e.to_string()),
            _ => StorageError::IoError(e.to_string()),
        }
    }
}

impl From<serde_json::Error> for StorageError {
    fn from(e: serde_json::Error) -> Self {
        StorageError::SerdeError(e.to_string())
    }
}

/// A synchronous string key-value store
///
/// A missing key is `Ok(None)`, never an error. Removing a missing key
/// succeeds.
pub trait KeyValueStore {
    fn get(&self, key: &str) -> Result<Option<String>, StorageError>;
    fn set(&mut self, key: &str, value: &str) -> Result<(), StorageError>;
    fn remove(&mut self, key: &str) -> Result<(), StorageError>;
}

impl std::fmt::Debug for dyn KeyValueStore {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str("KeyValueStore")
    }
}

/// Keys are restricted so every backend can store them verbatim (file names)
pub fn validate_key(key: &str) -> Result<(), StorageError> {
    let ok = !key.is_empty()
        && key
            .bytes()
            .all(|b| b.is_ascii_alphanumeric() || b == b'_' || b == b'-');
    if ok {
        Ok(())
    } else {
        Err(StorageError::InvalidKey(key.to_string()))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_validate_key() {
        assert!(validate_key(PROJECTS_KEY).is_ok());
        assert!(validate_key(USER_KEY).is_ok());
        assert!(validate_key("a-b_c9").is_ok());
        assert!(validate_key("").is_err());
        assert!(validate_key("../etc/passwd").is_err());
        assert!(validate_key("with space").is_err());
    }

    #[test]
    fn test_io_error_mapping() {
        let denied = std::io::Error::new(std::io::ErrorKind::PermissionDenied, "nope");
        assert!(matches!(StorageError::from(denied), StorageError::PermissionDenied(_)));
        let other = std::io::Error::new(std::io::ErrorKind::Other, "disk on fire");
        assert!(matches!(StorageError::from(other), StorageError::IoError(_)));
    }
}
