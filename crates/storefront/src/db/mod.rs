//! Persistence adapter for storefront state.
//!
//! # Key layout
//!
//! Each stateful component owns exactly one key:
//!
//! - `catalog` - ordered list of catalog items
//! - `cart` - ordered list of cart lines
//! - `session` - authentication state of the session gate
//!
//! Values are JSON documents (field-named, not positional), so an added or
//! removed field either still parses or fails cleanly into the
//! "absent or corrupt, use the default" path.
//!
//! # Backends
//!
//! - [`RedbStore`] - durable, single-file embedded database
//! - [`MemoryStore`] - process-local map for tests and throwaway sessions
//!
//! Components never see backend errors. [`load_snapshot`] and
//! [`save_snapshot`] log failures and report them as "absent" or `false`.

mod memory;
mod redb_store;

use std::path::Path;
use std::sync::Arc;

use serde::Serialize;
use serde::de::DeserializeOwned;
use thiserror::Error;

pub use memory::MemoryStore;
pub use redb_store::RedbStore;

/// Errors raised by a persistence backend.
#[derive(Debug, Error)]
pub enum PersistenceError {
    /// The backing database failed to read or write.
    #[error("storage backend error: {0}")]
    Backend(String),

    /// An in-process lock was poisoned by a panicking writer.
    #[error("storage lock poisoned")]
    LockPoisoned,
}

/// Synchronous key-value substrate.
///
/// Writes must be durable for the lifetime of the backend by the time
/// `save` or `clear` returns.
pub trait KeyValueStore {
    /// Read the raw value stored under `key`, if any.
    ///
    /// # Errors
    ///
    /// Returns `PersistenceError` if the backend cannot be read.
    fn load(&self, key: &str) -> Result<Option<String>, PersistenceError>;

    /// Store `raw` under `key`, replacing any previous value.
    ///
    /// # Errors
    ///
    /// Returns `PersistenceError` if the write cannot be committed.
    fn save(&self, key: &str, raw: &str) -> Result<(), PersistenceError>;

    /// Remove `key`. Removing a missing key is not an error.
    ///
    /// # Errors
    ///
    /// Returns `PersistenceError` if the removal cannot be committed.
    fn clear(&self, key: &str) -> Result<(), PersistenceError>;
}

impl<T: KeyValueStore + ?Sized> KeyValueStore for &T {
    fn load(&self, key: &str) -> Result<Option<String>, PersistenceError> {
        (**self).load(key)
    }

    fn save(&self, key: &str, raw: &str) -> Result<(), PersistenceError> {
        (**self).save(key, raw)
    }

    fn clear(&self, key: &str) -> Result<(), PersistenceError> {
        (**self).clear(key)
    }
}

impl<T: KeyValueStore + ?Sized> KeyValueStore for Arc<T> {
    fn load(&self, key: &str) -> Result<Option<String>, PersistenceError> {
        (**self).load(key)
    }

    fn save(&self, key: &str, raw: &str) -> Result<(), PersistenceError> {
        (**self).save(key, raw)
    }

    fn clear(&self, key: &str) -> Result<(), PersistenceError> {
        (**self).clear(key)
    }
}

/// Open the durable store at `path`, creating the file if needed.
///
/// # Errors
///
/// Returns `PersistenceError::Backend` if the database cannot be opened.
pub fn open_store(path: impl AsRef<Path>) -> Result<RedbStore, PersistenceError> {
    RedbStore::open(path)
}

/// Load and parse the snapshot stored under `key`.
///
/// Returns `None` when the key is absent, the backend cannot be read, or the
/// stored value does not parse as `T`. Failures are logged, never returned.
pub fn load_snapshot<T, S>(store: &S, key: &str) -> Option<T>
where
    T: DeserializeOwned,
    S: KeyValueStore + ?Sized,
{
    load_raw(store, key).and_then(|raw| parse_snapshot(key, &raw))
}

/// Read the raw value under `key`, logging a backend failure as absent.
pub fn load_raw<S>(store: &S, key: &str) -> Option<String>
where
    S: KeyValueStore + ?Sized,
{
    match store.load(key) {
        Ok(raw) => raw,
        Err(e) => {
            tracing::warn!(key, error = %e, "Failed to read snapshot, treating as absent");
            None
        }
    }
}

/// Parse a raw value read from `key`, logging a corrupt one as absent.
pub fn parse_snapshot<T: DeserializeOwned>(key: &str, raw: &str) -> Option<T> {
    match serde_json::from_str(raw) {
        Ok(value) => Some(value),
        Err(e) => {
            tracing::warn!(key, error = %e, "Corrupt snapshot, treating as absent");
            None
        }
    }
}

/// Serialize `value` and store it under `key`.
///
/// Returns `false` if serialization or the write failed. The failure is
/// logged and the in-memory state stays authoritative until the next write.
pub fn save_snapshot<T, S>(store: &S, key: &str, value: &T) -> bool
where
    T: Serialize + ?Sized,
    S: KeyValueStore + ?Sized,
{
    let raw = match serde_json::to_string(value) {
        Ok(raw) => raw,
        Err(e) => {
            tracing::error!(key, error = %e, "Failed to serialize snapshot");
            return false;
        }
    };

    match store.save(key, &raw) {
        Ok(()) => true,
        Err(e) => {
            tracing::error!(key, error = %e, "Failed to persist snapshot");
            false
        }
    }
}

/// Remove the snapshot stored under `key`, logging any failure.
pub fn clear_snapshot<S>(store: &S, key: &str) -> bool
where
    S: KeyValueStore + ?Sized,
{
    match store.clear(key) {
        Ok(()) => true,
        Err(e) => {
            tracing::error!(key, error = %e, "Failed to clear snapshot");
            false
        }
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;

    /// Backend that fails every call.
    struct BrokenStore;

    impl KeyValueStore for BrokenStore {
        fn load(&self, _key: &str) -> Result<Option<String>, PersistenceError> {
            Err(PersistenceError::Backend("disk on fire".to_string()))
        }

        fn save(&self, _key: &str, _raw: &str) -> Result<(), PersistenceError> {
            Err(PersistenceError::Backend("disk on fire".to_string()))
        }

        fn clear(&self, _key: &str) -> Result<(), PersistenceError> {
            Err(PersistenceError::Backend("disk on fire".to_string()))
        }
    }

    #[test]
    fn test_snapshot_roundtrip() {
        let store = MemoryStore::new();
        assert!(save_snapshot(&store, "numbers", &vec![1, 2, 3]));
        let loaded: Option<Vec<i32>> = load_snapshot(&store, "numbers");
        assert_eq!(loaded, Some(vec![1, 2, 3]));
    }

    #[test]
    fn test_missing_snapshot_is_none() {
        let store = MemoryStore::new();
        let loaded: Option<Vec<i32>> = load_snapshot(&store, "numbers");
        assert!(loaded.is_none());
    }

    #[test]
    fn test_corrupt_snapshot_is_none() {
        let store = MemoryStore::new();
        store.save("numbers", "{not json").unwrap();
        let loaded: Option<Vec<i32>> = load_snapshot(&store, "numbers");
        assert!(loaded.is_none());
    }

    #[test]
    fn test_wrong_shape_is_none() {
        let store = MemoryStore::new();
        store.save("numbers", r#"{"a": 1}"#).unwrap();
        let loaded: Option<Vec<i32>> = load_snapshot(&store, "numbers");
        assert!(loaded.is_none());
    }

    #[test]
    fn test_backend_failures_are_absorbed() {
        let loaded: Option<Vec<i32>> = load_snapshot(&BrokenStore, "numbers");
        assert!(loaded.is_none());
        assert!(!save_snapshot(&BrokenStore, "numbers", &vec![1]));
        assert!(!clear_snapshot(&BrokenStore, "numbers"));
    }

    #[test]
    fn test_shared_through_arc() {
        let store = Arc::new(MemoryStore::new());
        let other = Arc::clone(&store);
        assert!(save_snapshot(&store, "k", "v"));
        let loaded: Option<String> = load_snapshot(&other, "k");
        assert_eq!(loaded.as_deref(), Some("v"));
    }
}
