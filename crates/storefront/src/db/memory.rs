//! In-process key-value backend.

use std::collections::HashMap;
use std::sync::RwLock;

use super::{KeyValueStore, PersistenceError};

/// Process-local store backed by a map.
///
/// Values survive for as long as the `MemoryStore` lives, which makes it a
/// stand-in for the durable backend in tests.
#[derive(Debug, Default)]
pub struct MemoryStore {
    entries: RwLock<HashMap<String, String>>,
}

impl MemoryStore {
    /// Create an empty store.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Number of keys currently held.
    #[must_use]
    pub fn len(&self) -> usize {
        self.entries.read().map(|map| map.len()).unwrap_or(0)
    }

    /// Whether the store holds no keys.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }
}

impl KeyValueStore for MemoryStore {
    fn load(&self, key: &str) -> Result<Option<String>, PersistenceError> {
        let entries = self
            .entries
            .read()
            .map_err(|_| PersistenceError::LockPoisoned)?;
        Ok(entries.get(key).cloned())
    }

    fn save(&self, key: &str, raw: &str) -> Result<(), PersistenceError> {
        self.entries
            .write()
            .map_err(|_| PersistenceError::LockPoisoned)?
            .insert(key.to_string(), raw.to_string());
        Ok(())
    }

    fn clear(&self, key: &str) -> Result<(), PersistenceError> {
        self.entries
            .write()
            .map_err(|_| PersistenceError::LockPoisoned)?
            .remove(key);
        Ok(())
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;

    #[test]
    fn test_save_load_clear() {
        let store = MemoryStore::new();
        assert!(store.is_empty());

        store.save("cart", "[]").unwrap();
        assert_eq!(store.load("cart").unwrap().as_deref(), Some("[]"));
        assert_eq!(store.len(), 1);

        store.save("cart", "[1]").unwrap();
        assert_eq!(store.load("cart").unwrap().as_deref(), Some("[1]"));

        store.clear("cart").unwrap();
        assert!(store.load("cart").unwrap().is_none());
    }

    #[test]
    fn test_clear_missing_key_is_ok() {
        let store = MemoryStore::new();
        assert!(store.clear("nothing").is_ok());
    }
}
