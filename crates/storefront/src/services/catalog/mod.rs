//! Catalog store.
//!
//! Owns the canonical, insertion-ordered list of sellable items and writes
//! the full list to the `catalog` key after every mutation. On startup the
//! persisted snapshot is the source of truth; if it is missing or unusable
//! the store falls back to a seed catalog and persists that immediately.

mod seed;

use std::collections::HashSet;

use chrono::Utc;
use tracing::instrument;

use laptop_market_core::{Item, ItemId, NewItem};

pub use seed::default_catalog;

use crate::db::{KeyValueStore, load_snapshot, save_snapshot};
use crate::models::keys;

/// Where the catalog contents came from on the last `initialize`.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CatalogOrigin {
    /// Restored from the persisted snapshot.
    Persisted,
    /// Snapshot missing or unusable; the seed catalog was written instead.
    Seeded,
}

/// In-memory catalog with write-through persistence.
pub struct CatalogStore<S> {
    store: S,
    seed: Vec<Item>,
    items: Vec<Item>,
    revision: u64,
    last_issued_id: i64,
}

impl<S> std::fmt::Debug for CatalogStore<S> {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("CatalogStore")
            .field("items", &self.items.len())
            .field("revision", &self.revision)
            .finish_non_exhaustive()
    }
}

impl<S: KeyValueStore> CatalogStore<S> {
    /// Create a store that seeds from [`default_catalog`].
    ///
    /// The store is empty until [`initialize`](Self::initialize) is called.
    #[must_use]
    pub fn new(store: S) -> Self {
        Self::with_seed(store, default_catalog())
    }

    /// Create a store with a custom seed catalog.
    ///
    /// Duplicate ids in `seed` keep their first occurrence.
    #[must_use]
    pub fn with_seed(store: S, seed: Vec<Item>) -> Self {
        Self {
            store,
            seed: dedup_by_id(seed),
            items: Vec::new(),
            revision: 0,
            last_issued_id: 0,
        }
    }

    /// Load the persisted catalog, or seed it.
    ///
    /// A snapshot that is missing, fails to parse, is empty, or contains
    /// duplicate ids is replaced by the seed catalog, which is persisted
    /// right away. Calling this again re-reads the snapshot and replaces the
    /// in-memory state.
    #[instrument(skip(self))]
    pub fn initialize(&mut self) -> CatalogOrigin {
        let restored = load_snapshot::<Vec<Item>, _>(&self.store, keys::CATALOG)
            .filter(|items| {
                if items.is_empty() {
                    tracing::warn!("Persisted catalog is empty, reseeding");
                    return false;
                }
                if has_duplicate_ids(items) {
                    tracing::warn!("Persisted catalog has duplicate ids, reseeding");
                    return false;
                }
                true
            });

        self.revision += 1;
        if let Some(items) = restored {
            tracing::info!(count = items.len(), "Catalog restored from snapshot");
            self.items = items;
            CatalogOrigin::Persisted
        } else {
            self.items.clone_from(&self.seed);
            tracing::info!(count = self.items.len(), "Catalog seeded from defaults");
            self.persist();
            CatalogOrigin::Seeded
        }
    }

    /// Add a new item under a freshly issued id and return it.
    #[instrument(skip(self, new_item), fields(name = %new_item.name))]
    pub fn create(&mut self, new_item: NewItem) -> Item {
        let id = self.next_id();
        let item = new_item.with_id(id);
        tracing::debug!(id = %item.id, "Catalog item created");

        self.items.push(item.clone());
        self.touch();
        item
    }

    /// Replace the item with the same id, keeping its position.
    ///
    /// Returns `false` and changes nothing if no such item exists.
    #[instrument(skip(self, item), fields(id = %item.id))]
    pub fn update(&mut self, item: Item) -> bool {
        let Some(slot) = self.items.iter_mut().find(|existing| existing.id == item.id) else {
            tracing::debug!("Update for unknown item ignored");
            return false;
        };

        *slot = item;
        self.touch();
        true
    }

    /// Remove the item with the given id.
    ///
    /// Returns `false` and changes nothing if no such item exists.
    #[instrument(skip(self))]
    pub fn delete(&mut self, id: &ItemId) -> bool {
        let before = self.items.len();
        self.items.retain(|item| &item.id != id);
        if self.items.len() == before {
            tracing::debug!("Delete for unknown item ignored");
            return false;
        }

        self.touch();
        true
    }

    /// Replace the whole catalog. Duplicate ids keep their first occurrence.
    #[instrument(skip(self, items), fields(count = items.len()))]
    pub fn replace_all(&mut self, items: Vec<Item>) {
        self.items = dedup_by_id(items);
        self.touch();
    }

    /// Current items in insertion order.
    #[must_use]
    pub fn list(&self) -> &[Item] {
        &self.items
    }

    /// Look up an item by id.
    #[must_use]
    pub fn get(&self, id: &ItemId) -> Option<&Item> {
        self.items.iter().find(|item| &item.id == id)
    }

    /// Number of items.
    #[must_use]
    pub fn len(&self) -> usize {
        self.items.len()
    }

    /// Whether the catalog holds no items.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.items.is_empty()
    }

    /// Counter bumped on every change to the item list.
    #[must_use]
    pub const fn revision(&self) -> u64 {
        self.revision
    }

    /// Write the current list to the persistence key.
    pub fn persist(&self) -> bool {
        save_snapshot(&self.store, keys::CATALOG, &self.items)
    }

    fn touch(&mut self) {
        self.revision += 1;
        self.persist();
    }

    /// Issue a millisecond-timestamp id that is strictly greater than the
    /// previous one and not already present in the catalog.
    fn next_id(&mut self) -> ItemId {
        let mut candidate = Utc::now()
            .timestamp_millis()
            .max(self.last_issued_id.saturating_add(1));

        let taken: HashSet<&str> = self.items.iter().map(|item| item.id.as_str()).collect();
        while taken.contains(candidate.to_string().as_str()) {
            candidate = candidate.saturating_add(1);
        }

        self.last_issued_id = candidate;
        ItemId::new(candidate.to_string())
    }
}

fn has_duplicate_ids(items: &[Item]) -> bool {
    let mut seen = HashSet::with_capacity(items.len());
    !items.iter().all(|item| seen.insert(&item.id))
}

fn dedup_by_id(items: Vec<Item>) -> Vec<Item> {
    let mut seen = HashSet::with_capacity(items.len());
    items
        .into_iter()
        .filter(|item| seen.insert(item.id.clone()))
        .collect()
}
