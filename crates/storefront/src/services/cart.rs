//! Cart aggregator.
//!
//! Holds at most one line per item id. Adding an item that already has a
//! line bumps its quantity instead of creating a second line. The cart is
//! persisted under its own key after every mutation and never touches the
//! catalog: lines carry a copy of the item taken when they were created.

use std::num::NonZeroU32;

use rust_decimal::Decimal;
use thiserror::Error;
use tracing::instrument;

use laptop_market_core::{CartLine, Item, ItemId};

use crate::db::{KeyValueStore, load_snapshot, save_snapshot};
use crate::models::keys;

/// Business-rule rejections reported by the cart.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum CartError {
    /// The item is not in stock and cannot be added.
    #[error("item {0} is out of stock")]
    OutOfStock(ItemId),
}

/// Ordered collection of cart lines with write-through persistence.
pub struct CartAggregator<S> {
    store: S,
    lines: Vec<CartLine>,
}

impl<S> std::fmt::Debug for CartAggregator<S> {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("CartAggregator")
            .field("lines", &self.lines.len())
            .finish_non_exhaustive()
    }
}

impl<S: KeyValueStore> CartAggregator<S> {
    /// Create an empty cart. Call [`initialize`](Self::initialize) to load
    /// the persisted one.
    #[must_use]
    pub const fn new(store: S) -> Self {
        Self {
            store,
            lines: Vec::new(),
        }
    }

    /// Load the persisted cart, or start empty.
    ///
    /// Missing or corrupt data yields an empty cart; nothing is written.
    /// Lines sharing an id in the stored data are merged by adding their
    /// quantities.
    #[instrument(skip(self))]
    pub fn initialize(&mut self) {
        let lines =
            load_snapshot::<Vec<CartLine>, _>(&self.store, keys::CART).unwrap_or_default();
        self.lines = merge_duplicate_lines(lines);
        tracing::info!(lines = self.lines.len(), "Cart loaded");
    }

    /// Add one unit of `item` and return the line's new quantity.
    ///
    /// # Errors
    ///
    /// Returns `CartError::OutOfStock` if `item.in_stock` is false. The cart
    /// is left untouched in that case.
    #[instrument(skip(self, item), fields(id = %item.id))]
    pub fn add(&mut self, item: &Item) -> Result<NonZeroU32, CartError> {
        if !item.is_available() {
            tracing::debug!("Rejected add of out-of-stock item");
            return Err(CartError::OutOfStock(item.id.clone()));
        }

        let quantity = if let Some(line) = self
            .lines
            .iter_mut()
            .find(|line| line.line_id() == &item.id)
        {
            line.quantity = line.quantity.saturating_add(1);
            line.quantity
        } else {
            self.lines.push(CartLine::new(item.clone()));
            NonZeroU32::MIN
        };

        self.persist();
        Ok(quantity)
    }

    /// Drop the line entirely, whatever its quantity.
    ///
    /// Returns `false` if there was no such line.
    #[instrument(skip(self))]
    pub fn remove(&mut self, line_id: &ItemId) -> bool {
        let before = self.lines.len();
        self.lines.retain(|line| line.line_id() != line_id);
        if self.lines.len() == before {
            return false;
        }

        self.persist();
        true
    }

    /// Set a line's quantity. Zero or negative removes the line; values
    /// beyond `u32::MAX` saturate.
    ///
    /// Returns `false` if there was no such line.
    #[instrument(skip(self))]
    pub fn set_quantity(&mut self, line_id: &ItemId, quantity: i64) -> bool {
        if quantity <= 0 {
            return self.remove(line_id);
        }

        let Some(quantity) = NonZeroU32::new(u32::try_from(quantity).unwrap_or(u32::MAX)) else {
            return self.remove(line_id);
        };
        let Some(line) = self.lines.iter_mut().find(|line| line.line_id() == line_id) else {
            return false;
        };

        line.quantity = quantity;
        self.persist();
        true
    }

    /// Empty the cart and persist the empty state.
    #[instrument(skip(self))]
    pub fn clear(&mut self) {
        self.lines.clear();
        self.persist();
    }

    /// Lines in the order they were first added.
    #[must_use]
    pub fn lines(&self) -> &[CartLine] {
        &self.lines
    }

    /// Look up a line by id.
    #[must_use]
    pub fn line(&self, line_id: &ItemId) -> Option<&CartLine> {
        self.lines.iter().find(|line| line.line_id() == line_id)
    }

    /// Number of distinct lines.
    #[must_use]
    pub fn line_count(&self) -> usize {
        self.lines.len()
    }

    /// Whether the cart has no lines.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.lines.is_empty()
    }

    /// Sum of line totals; zero for an empty cart.
    #[must_use]
    pub fn order_total(&self) -> Decimal {
        order_total(&self.lines)
    }

    /// Sum of quantities across all lines.
    #[must_use]
    pub fn item_count(&self) -> u64 {
        item_count(&self.lines)
    }

    /// Write the current lines to the persistence key.
    pub fn persist(&self) -> bool {
        save_snapshot(&self.store, keys::CART, &self.lines)
    }
}

/// `price * quantity` for a single line.
#[must_use]
pub fn line_total(line: &CartLine) -> Decimal {
    line.line_total()
}

/// Sum of [`line_total`] over `lines`, saturating at `Decimal::MAX`.
#[must_use]
pub fn order_total(lines: &[CartLine]) -> Decimal {
    lines
        .iter()
        .map(CartLine::line_total)
        .fold(Decimal::ZERO, Decimal::saturating_add)
}

/// Sum of quantities over `lines`.
#[must_use]
pub fn item_count(lines: &[CartLine]) -> u64 {
    lines.iter().map(|line| u64::from(line.quantity())).sum()
}

fn merge_duplicate_lines(lines: Vec<CartLine>) -> Vec<CartLine> {
    let mut merged: Vec<CartLine> = Vec::with_capacity(lines.len());
    for line in lines {
        if let Some(existing) = merged
            .iter_mut()
            .find(|existing| existing.line_id() == line.line_id())
        {
            tracing::warn!(id = %line.line_id(), "Merging duplicate cart line");
            existing.quantity = existing.quantity.saturating_add(line.quantity.get());
        } else {
            merged.push(line);
        }
    }
    merged
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use laptop_market_core::{Condition, NewItem, Price};

    use super::*;
    use crate::db::MemoryStore;

    fn item(id: &str, price: u64, in_stock: bool) -> Item {
        NewItem {
            name: format!("Laptop {id}"),
            brand: "Dell".to_string(),
            price: Price::from_units(price),
            condition: Condition::New,
            in_stock,
            ..NewItem::default()
        }
        .with_id(ItemId::new(id))
    }

    fn open_cart(store: &MemoryStore) -> CartAggregator<&MemoryStore> {
        let mut cart = CartAggregator::new(store);
        cart.initialize();
        cart
    }

    #[test]
    fn test_starts_empty_without_snapshot() {
        let store = MemoryStore::new();
        let cart = open_cart(&store);
        assert!(cart.is_empty());
        assert_eq!(cart.order_total(), Decimal::ZERO);
        assert_eq!(cart.item_count(), 0);
        // Never seeds a default cart
        assert!(store.load(keys::CART).unwrap().is_none());
    }

    #[test]
    fn test_repeat_add_merges() {
        let store = MemoryStore::new();
        let mut cart = open_cart(&store);
        let a = item("a", 100, true);

        assert_eq!(cart.add(&a).unwrap().get(), 1);
        assert_eq!(cart.add(&a).unwrap().get(), 2);
        assert_eq!(cart.line_count(), 1);
        assert_eq!(cart.order_total(), Decimal::from(200));
    }

    #[test]
    fn test_out_of_stock_rejected() {
        let store = MemoryStore::new();
        let mut cart = open_cart(&store);
        cart.add(&item("a", 100, true)).unwrap();

        let b = item("b", 200, false);
        assert_eq!(cart.add(&b), Err(CartError::OutOfStock(ItemId::new("b"))));
        assert_eq!(cart.line_count(), 1);
        assert_eq!(cart.order_total(), Decimal::from(100));
    }

    #[test]
    fn test_snapshot_is_copied_at_add_time() {
        let store = MemoryStore::new();
        let mut cart = open_cart(&store);
        let mut a = item("a", 100, true);
        cart.add(&a).unwrap();

        a.price = Price::from_units(999);
        cart.add(&a).unwrap();

        let line = cart.line(&ItemId::new("a")).unwrap();
        assert_eq!(line.price(), Price::from_units(100));
        assert_eq!(line.quantity(), 2);
    }

    #[test]
    fn test_set_quantity() {
        let store = MemoryStore::new();
        let mut cart = open_cart(&store);
        cart.add(&item("a", 100, true)).unwrap();
        cart.add(&item("b", 50, true)).unwrap();

        assert!(cart.set_quantity(&ItemId::new("a"), 4));
        assert_eq!(cart.item_count(), 5);
        assert_eq!(cart.order_total(), Decimal::from(450));

        assert!(cart.set_quantity(&ItemId::new("b"), 0));
        assert_eq!(cart.line_count(), 1);

        assert!(cart.set_quantity(&ItemId::new("a"), -3));
        assert!(cart.is_empty());
    }

    #[test]
    fn test_set_quantity_saturates() {
        let store = MemoryStore::new();
        let mut cart = open_cart(&store);
        cart.add(&item("a", 1, true)).unwrap();

        assert!(cart.set_quantity(&ItemId::new("a"), i64::MAX));
        assert_eq!(cart.line(&ItemId::new("a")).unwrap().quantity(), u32::MAX);
    }

    #[test]
    fn test_unknown_line_is_noop() {
        let store = MemoryStore::new();
        let mut cart = open_cart(&store);
        cart.add(&item("a", 100, true)).unwrap();

        assert!(!cart.remove(&ItemId::new("zzz")));
        assert!(!cart.set_quantity(&ItemId::new("zzz"), 3));
        assert!(!cart.set_quantity(&ItemId::new("zzz"), 0));
        assert_eq!(cart.line_count(), 1);
    }

    #[test]
    fn test_clear_persists_empty_cart() {
        let store = MemoryStore::new();
        let mut cart = open_cart(&store);
        cart.add(&item("a", 100, true)).unwrap();
        cart.clear();

        assert!(cart.is_empty());
        assert_eq!(store.load(keys::CART).unwrap().as_deref(), Some("[]"));
    }

    #[test]
    fn test_persisted_across_instances() {
        let store = MemoryStore::new();
        {
            let mut cart = open_cart(&store);
            cart.add(&item("a", 100, true)).unwrap();
            cart.add(&item("a", 100, true)).unwrap();
            cart.add(&item("b", 25, true)).unwrap();
        }

        let cart = open_cart(&store);
        assert_eq!(cart.line_count(), 2);
        assert_eq!(cart.item_count(), 3);
        assert_eq!(cart.order_total(), Decimal::from(225));
    }

    #[test]
    fn test_corrupt_snapshot_loads_empty() {
        let store = MemoryStore::new();
        store.save(keys::CART, "not json").unwrap();
        assert!(open_cart(&store).is_empty());
    }

    #[test]
    fn test_duplicate_stored_lines_are_merged() {
        let store = MemoryStore::new();
        let mut line = CartLine::new(item("a", 10, true));
        line.quantity = NonZeroU32::new(2).unwrap();
        let stored = vec![line.clone(), CartLine::new(item("b", 5, true)), line];
        save_snapshot(&store, keys::CART, &stored);

        let cart = open_cart(&store);
        assert_eq!(cart.line_count(), 2);
        assert_eq!(cart.line(&ItemId::new("a")).unwrap().quantity(), 4);
        assert_eq!(cart.lines().first().unwrap().line_id().as_str(), "a");
    }

    #[test]
    fn test_free_functions_match_methods() {
        let store = MemoryStore::new();
        let mut cart = open_cart(&store);
        cart.add(&item("a", 100, true)).unwrap();
        cart.set_quantity(&ItemId::new("a"), 3);

        let line = cart.line(&ItemId::new("a")).unwrap();
        assert_eq!(line_total(line), Decimal::from(300));
        assert_eq!(order_total(cart.lines()), cart.order_total());
        assert_eq!(item_count(cart.lines()), 3);
        assert_eq!(order_total(&[]), Decimal::ZERO);
    }

    #[test]
    fn test_huge_totals_saturate() {
        let store = MemoryStore::new();
        let mut cart = open_cart(&store);
        let mut expensive = item("b", 0, true);
        expensive.price =
            Price::new(Decimal::from_str_exact("20000000000000000000").unwrap()).unwrap();

        cart.add(&expensive).unwrap();
        cart.add(&item("a", 100, true)).unwrap();
        assert!(cart.set_quantity(&ItemId::new("b"), i64::MAX));

        assert_eq!(cart.line(&ItemId::new("b")).unwrap().quantity(), u32::MAX);
        assert_eq!(cart.order_total(), Decimal::MAX);

        let reopened = open_cart(&store);
        assert_eq!(reopened.order_total(), Decimal::MAX);
    }
}
