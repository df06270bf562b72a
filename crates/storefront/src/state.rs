//! Storefront state shared with the presentation layer.
//!
//! `Storefront` owns one instance of every stateful component, all writing
//! to the same injected key-value store. It is the only surface a front end
//! should call: it never hands out the store or the persistence keys.

use std::num::NonZeroU32;
use std::sync::Arc;

use rust_decimal::Decimal;
use tracing::instrument;

use laptop_market_core::{CartLine, Item, ItemId, NewItem};

use crate::config::MarketConfig;
use crate::db::KeyValueStore;
use crate::error::{AppError, Result};
use crate::models::CurrentUser;
use crate::search::{Facets, QuerySpec, ViewCache, facets};
use crate::services::catalog::default_catalog;
use crate::services::{
    CartAggregator, CartError, CatalogOrigin, CatalogStore, CredentialGate, SessionGate,
};

/// Catalog, cart and session gate over one persistence backend.
pub struct Storefront<S: ?Sized> {
    catalog: CatalogStore<Arc<S>>,
    cart: CartAggregator<Arc<S>>,
    gate: CredentialGate<Arc<S>>,
    views: ViewCache,
}

impl<S: ?Sized> std::fmt::Debug for Storefront<S> {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Storefront")
            .field("catalog", &self.catalog)
            .field("cart", &self.cart)
            .field("gate", &self.gate)
            .field("views", &self.views)
            .finish()
    }
}

impl<S: KeyValueStore + ?Sized> Storefront<S> {
    /// Build a storefront seeded with the default catalog.
    ///
    /// Nothing is loaded until [`initialize`](Self::initialize) is called.
    #[must_use]
    pub fn new(store: Arc<S>, config: &MarketConfig) -> Self {
        Self::with_seed(store, config, default_catalog())
    }

    /// Build a storefront with a custom seed catalog.
    #[must_use]
    pub fn with_seed(store: Arc<S>, config: &MarketConfig, seed: Vec<Item>) -> Self {
        Self {
            catalog: CatalogStore::with_seed(Arc::clone(&store), seed),
            cart: CartAggregator::new(Arc::clone(&store)),
            gate: CredentialGate::new(store, config.admin.clone()),
            views: ViewCache::new(config.view_cache_capacity),
        }
    }

    /// Load every component from its persisted snapshot.
    ///
    /// Safe to call again: state is re-read and replaced.
    #[instrument(skip(self))]
    pub fn initialize(&mut self) -> CatalogOrigin {
        let origin = self.catalog.initialize();
        self.cart.initialize();
        self.gate.initialize();
        self.views.invalidate_all();
        origin
    }

    /// Flush catalog and cart to storage and drop cached views.
    #[instrument(skip(self))]
    pub fn teardown(&mut self) -> bool {
        let catalog_saved = self.catalog.persist();
        let cart_saved = self.cart.persist();
        self.views.invalidate_all();
        catalog_saved && cart_saved
    }

    // =========================================================================
    // Catalog
    // =========================================================================

    /// All items in insertion order.
    #[must_use]
    pub fn list(&self) -> &[Item] {
        self.catalog.list()
    }

    /// Look up an item by id.
    #[must_use]
    pub fn item(&self, id: &ItemId) -> Option<&Item> {
        self.catalog.get(id)
    }

    /// Filtered, sorted view of the catalog.
    #[must_use]
    pub fn view(&self, spec: &QuerySpec) -> Arc<[Item]> {
        self.views
            .get_or_compute(self.catalog.revision(), self.catalog.list(), spec)
    }

    /// Brand, condition and price values present in the catalog.
    #[must_use]
    pub fn facets(&self) -> Facets {
        facets(self.catalog.list())
    }

    /// Add a listing and return it with its new id.
    pub fn create_item(&mut self, new_item: NewItem) -> Item {
        self.catalog.create(new_item)
    }

    /// Replace a listing. Unknown ids are ignored and return `false`.
    pub fn update_item(&mut self, item: Item) -> bool {
        self.catalog.update(item)
    }

    /// Remove a listing. Unknown ids are ignored and return `false`.
    ///
    /// Cart lines already holding a copy of the item are left alone.
    pub fn delete_item(&mut self, id: &ItemId) -> bool {
        self.catalog.delete(id)
    }

    // =========================================================================
    // Cart
    // =========================================================================

    /// Add one unit of the catalog item with the given id.
    ///
    /// # Errors
    ///
    /// Returns `AppError::NotFound` if the id is not in the catalog, or
    /// `AppError::Cart` if the item is out of stock.
    pub fn add_to_cart(&mut self, id: &ItemId) -> Result<NonZeroU32> {
        let item = self
            .catalog
            .get(id)
            .ok_or_else(|| AppError::NotFound(format!("item {id}")))?;
        Ok(self.cart.add(item)?)
    }

    /// Add one unit of `item`, which need not come from this catalog.
    ///
    /// # Errors
    ///
    /// Returns `CartError::OutOfStock` if the item is not in stock.
    pub fn add_item_to_cart(&mut self, item: &Item) -> std::result::Result<NonZeroU32, CartError> {
        self.cart.add(item)
    }

    /// Remove a cart line. Unknown ids return `false`.
    pub fn remove_from_cart(&mut self, line_id: &ItemId) -> bool {
        self.cart.remove(line_id)
    }

    /// Set a cart line's quantity; zero or less removes it.
    pub fn set_cart_quantity(&mut self, line_id: &ItemId, quantity: i64) -> bool {
        self.cart.set_quantity(line_id, quantity)
    }

    /// Empty the cart.
    pub fn clear_cart(&mut self) {
        self.cart.clear();
    }

    /// Cart lines in the order they were first added.
    #[must_use]
    pub fn cart_lines(&self) -> &[CartLine] {
        self.cart.lines()
    }

    /// Sum of `price * quantity` over the cart.
    #[must_use]
    pub fn order_total(&self) -> Decimal {
        self.cart.order_total()
    }

    /// Total number of units in the cart.
    #[must_use]
    pub fn item_count(&self) -> u64 {
        self.cart.item_count()
    }

    // =========================================================================
    // Session
    // =========================================================================

    /// Check credentials and open a session on success.
    pub fn authenticate(&mut self, username: &str, password: &str) -> bool {
        self.gate.authenticate(username, password)
    }

    /// Close the current session.
    pub fn logout(&mut self) {
        self.gate.logout();
    }

    /// The signed-in user, if any.
    #[must_use]
    pub fn current_user(&self) -> Option<&CurrentUser> {
        self.gate.current_user()
    }

    #[must_use]
    pub fn is_authenticated(&self) -> bool {
        self.gate.is_authenticated()
    }

    /// Fail with `AppError::Unauthorized` unless a user is signed in.
    ///
    /// # Errors
    ///
    /// Returns `AppError::Unauthorized` when signed out.
    pub fn require_user(&self) -> Result<&CurrentUser> {
        self.gate
            .current_user()
            .ok_or_else(|| AppError::Unauthorized("sign in first".to_string()))
    }
}
