//! Memoized catalog views.
//!
//! Entries are keyed by catalog revision and query, so a mutation of the
//! catalog naturally misses the cache instead of serving a stale view.

use std::sync::Arc;

use moka::sync::Cache;

use laptop_market_core::Item;

use super::{QuerySpec, view};

/// Cache key for a computed view.
#[derive(Debug, Clone, Hash, PartialEq, Eq)]
struct ViewKey {
    revision: u64,
    spec: QuerySpec,
}

/// Bounded cache of derived catalog views.
#[derive(Clone)]
pub struct ViewCache {
    cache: Cache<ViewKey, Arc<[Item]>>,
}

impl std::fmt::Debug for ViewCache {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("ViewCache")
            .field("entries", &self.cache.entry_count())
            .finish()
    }
}

impl ViewCache {
    /// Create a cache holding at most `capacity` views.
    #[must_use]
    pub fn new(capacity: u64) -> Self {
        Self {
            cache: Cache::builder().max_capacity(capacity).build(),
        }
    }

    /// Return the cached view for `(revision, spec)`, computing it from
    /// `items` on a miss.
    ///
    /// `items` must be the catalog contents at `revision`.
    pub fn get_or_compute(&self, revision: u64, items: &[Item], spec: &QuerySpec) -> Arc<[Item]> {
        let key = ViewKey {
            revision,
            spec: spec.clone(),
        };
        self.cache.get_with(key, || {
            tracing::trace!(revision, "View cache miss");
            view(items, spec).into_iter().cloned().collect()
        })
    }

    /// Drop every cached view.
    pub fn invalidate_all(&self) {
        self.cache.invalidate_all();
        self.cache.run_pending_tasks();
    }

    /// Number of cached views.
    #[must_use]
    pub fn len(&self) -> u64 {
        self.cache.run_pending_tasks();
        self.cache.entry_count()
    }

    /// Whether no views are cached.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }
}
