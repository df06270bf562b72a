//! # redb-backed key-value storage
//!
//! A durable store on a single redb database file. Every `save` and
//! `clear` runs in its own write transaction and is committed before the
//! call returns, so a value that was saved survives a process restart.

use std::path::Path;

use redb::{Database, ReadableDatabase, ReadableTable, TableDefinition};

use super::{KeyValueStore, PersistenceError};

/// Table for snapshots: key string -> serialized JSON document
const SNAPSHOTS: TableDefinition<&str, &str> = TableDefinition::new("snapshots");

/// Durable key-value store using redb.
pub struct RedbStore {
    db: Database,
}

impl std::fmt::Debug for RedbStore {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("RedbStore").finish_non_exhaustive()
    }
}

fn backend<E: std::fmt::Display>(e: E) -> PersistenceError {
    PersistenceError::Backend(e.to_string())
}

impl RedbStore {
    /// Open or create a database at the given path.
    ///
    /// # Errors
    ///
    /// Returns `PersistenceError::Backend` if the file cannot be opened or
    /// the snapshot table cannot be created.
    pub fn open(path: impl AsRef<Path>) -> Result<Self, PersistenceError> {
        let db = Database::create(path.as_ref()).map_err(backend)?;

        // Create the table up front so reads never hit a missing table
        let write_txn = db.begin_write().map_err(backend)?;
        {
            let _ = write_txn.open_table(SNAPSHOTS).map_err(backend)?;
        }
        write_txn.commit().map_err(backend)?;

        tracing::debug!(path = %path.as_ref().display(), "Opened redb store");
        Ok(Self { db })
    }
}

impl KeyValueStore for RedbStore {
    fn load(&self, key: &str) -> Result<Option<String>, PersistenceError> {
        let read_txn = self.db.begin_read().map_err(backend)?;
        let table = read_txn.open_table(SNAPSHOTS).map_err(backend)?;
        let value = table
            .get(key)
            .map_err(backend)?
            .map(|guard| guard.value().to_string());
        Ok(value)
    }

    fn save(&self, key: &str, raw: &str) -> Result<(), PersistenceError> {
        let write_txn = self.db.begin_write().map_err(backend)?;
        {
            let mut table = write_txn.open_table(SNAPSHOTS).map_err(backend)?;
            table.insert(key, raw).map_err(backend)?;
        }
        write_txn.commit().map_err(backend)
    }

    fn clear(&self, key: &str) -> Result<(), PersistenceError> {
        let write_txn = self.db.begin_write().map_err(backend)?;
        {
            let mut table = write_txn.open_table(SNAPSHOTS).map_err(backend)?;
            table.remove(key).map_err(backend)?;
        }
        write_txn.commit().map_err(backend)
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;

    #[test]
    fn test_values_survive_reopen() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("market.redb");

        {
            let store = RedbStore::open(&path).unwrap();
            store.save("catalog", "[]").unwrap();
            store.save("cart", "[1]").unwrap();
            store.clear("cart").unwrap();
        }

        let store = RedbStore::open(&path).unwrap();
        assert_eq!(store.load("catalog").unwrap().as_deref(), Some("[]"));
        assert!(store.load("cart").unwrap().is_none());
    }

    #[test]
    fn test_overwrite_replaces_value() {
        let dir = tempfile::tempdir().unwrap();
        let store = RedbStore::open(dir.path().join("market.redb")).unwrap();

        store.save("session", "a").unwrap();
        store.save("session", "b").unwrap();
        assert_eq!(store.load("session").unwrap().as_deref(), Some("b"));
    }

    #[test]
    fn test_clear_missing_key_is_ok() {
        let dir = tempfile::tempdir().unwrap();
        let store = RedbStore::open(dir.path().join("market.redb")).unwrap();
        assert!(store.clear("nothing").is_ok());
    }
}
