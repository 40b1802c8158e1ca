//! Key-value persistence
//!
//! Everything the game remembers between visits is a flat scalar string
//! under a fixed key: LocalStorage on web, a plain map elsewhere.

use std::collections::HashMap;
use std::fmt;

/// Storage keys
pub mod keys {
    pub const HIGH_SCORE: &str = "snakeHighScore";
    pub const SPEED: &str = "gameSpeed";
    pub const CHARACTER: &str = "selectedCat";
}

/// Storage backend failure
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum StorageError {
    /// No storage available (private browsing, blocked, native stub)
    Unavailable,
    /// Backend rejected the operation (quota, security error)
    Backend(String),
}

impl fmt::Display for StorageError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Unavailable => write!(f, "storage unavailable"),
            Self::Backend(msg) => write!(f, "storage error: {msg}"),
        }
    }
}

impl std::error::Error for StorageError {}

/// Minimal string key-value store
pub trait KeyValueStore {
    fn get(&self, key: &str) -> Result<Option<String>, StorageError>;
    fn set(&mut self, key: &str, value: &str) -> Result<(), StorageError>;
}

/// In-memory store (native builds and tests)
#[derive(Debug, Clone, Default)]
pub struct MemoryStore {
    entries: HashMap<String, String>,
}

impl MemoryStore {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_entry(mut self, key: &str, value: &str) -> Self {
        self.entries.insert(key.to_string(), value.to_string());
        self
    }
}

impl KeyValueStore for MemoryStore {
    fn get(&self, key: &str) -> Result<Option<String>, StorageError> {
        Ok(self.entries.get(key).cloned())
    }

    fn set(&mut self, key: &str, value: &str) -> Result<(), StorageError> {
        self.entries.insert(key.to_string(), value.to_string());
        Ok(())
    }
}

/// Browser LocalStorage
#[cfg(target_arch = "wasm32")]
#[derive(Debug, Default)]
pub struct LocalStorage;

#[cfg(target_arch = "wasm32")]
impl LocalStorage {
    fn storage() -> Result<web_sys::Storage, StorageError> {
        web_sys::window()
            .and_then(|w| w.local_storage().ok())
            .flatten()
            .ok_or(StorageError::Unavailable)
    }
}

#[cfg(target_arch = "wasm32")]
impl KeyValueStore for LocalStorage {
    fn get(&self, key: &str) -> Result<Option<String>, StorageError> {
        Self::storage()?
            .get_item(key)
            .map_err(|e| StorageError::Backend(format!("{e:?}")))
    }

    fn set(&mut self, key: &str, value: &str) -> Result<(), StorageError> {
        Self::storage()?
            .set_item(key, value)
            .map_err(|e| StorageError::Backend(format!("{e:?}")))
    }
}

/// Read a value and parse it, treating missing, unreadable or malformed
/// entries as absent
pub fn load_parsed<T: std::str::FromStr>(store: &impl KeyValueStore, key: &str) -> Option<T> {
    match store.get(key) {
        Ok(Some(raw)) => match raw.trim().parse() {
            Ok(value) => Some(value),
            Err(_) => {
                log::warn!("Ignoring malformed {key:?} entry: {raw:?}");
                None
            }
        },
        Ok(None) => None,
        Err(e) => {
            log::warn!("Could not read {key:?}: {e}");
            None
        }
    }
}

#[cfg(test)]
pub(crate) mod tests {
    use super::*;

    /// Store whose backend is gone
    #[derive(Debug, Default)]
    pub struct BrokenStore;

    impl KeyValueStore for BrokenStore {
        fn get(&self, _key: &str) -> Result<Option<String>, StorageError> {
            Err(StorageError::Unavailable)
        }

        fn set(&mut self, _key: &str, _value: &str) -> Result<(), StorageError> {
            Err(StorageError::Backend("QuotaExceededError".into()))
        }
    }

    #[test]
    fn test_memory_store_roundtrip() {
        let mut store = MemoryStore::new();
        assert_eq!(store.get(keys::SPEED), Ok(None));
        store.set(keys::SPEED, "7").unwrap();
        assert_eq!(store.get(keys::SPEED), Ok(Some("7".to_string())));
    }

    #[test]
    fn test_load_parsed() {
        let store = MemoryStore::new()
            .with_entry(keys::HIGH_SCORE, "120")
            .with_entry(keys::SPEED, "fast");
        assert_eq!(load_parsed::<u64>(&store, keys::HIGH_SCORE), Some(120));
        assert_eq!(load_parsed::<u8>(&store, keys::SPEED), None);
        assert_eq!(load_parsed::<u8>(&store, keys::CHARACTER), None);
        assert_eq!(load_parsed::<u64>(&BrokenStore, keys::HIGH_SCORE), None);
    }
}
