//! Integration tests for the laptop marketplace.
//!
//! # Running Tests
//!
//! ```bash
//! cargo test -p laptop-market-integration-tests
//! ```
//!
//! # Test Categories
//!
//! - `catalog_lifecycle` - Seeding, mutations and recovery of the catalog
//! - `cart_checkout` - Cart aggregation and totals through the storefront
//! - `session_gate` - Sign-in state across restarts
//! - `property_tests` - proptest invariants of the query engine and cart
//!
//! This crate only holds shared fixtures; the tests live in `tests/`.

use std::path::Path;
use std::sync::Arc;

use proptest::prelude::*;

use laptop_market_core::{Condition, Item, ItemId, NewItem, Price};
use laptop_market_storefront::Storefront;
use laptop_market_storefront::config::MarketConfig;
use laptop_market_storefront::db::{MemoryStore, RedbStore, open_store};

/// A laptop with the given id, price and stock flag. Other fields are filler.
#[must_use]
pub fn laptop(id: &str, price: u64, in_stock: bool) -> Item {
    NewItem {
        name: format!("Laptop {id}"),
        brand: "Acme".to_string(),
        price: Price::from_units(price),
        processor: "Intel i5".to_string(),
        memory_size: "8GB".to_string(),
        storage_size: "256GB SSD".to_string(),
        screen_spec: "14\" FHD".to_string(),
        condition: Condition::New,
        rating: 4.0,
        review_count: 10,
        in_stock,
        ..NewItem::default()
    }
    .with_id(ItemId::new(id))
}

/// Storefront over a fresh in-memory store, initialized with the default catalog.
#[must_use]
pub fn memory_storefront() -> (Arc<MemoryStore>, Storefront<MemoryStore>) {
    let store = Arc::new(MemoryStore::new());
    let mut storefront = Storefront::new(Arc::clone(&store), &MarketConfig::default());
    storefront.initialize();
    (store, storefront)
}

/// Storefront over the redb file at `path`, initialized with `seed`.
///
/// # Panics
///
/// Panics if the database cannot be opened.
#[must_use]
#[allow(clippy::unwrap_used)]
pub fn redb_storefront(path: &Path, seed: Vec<Item>) -> Storefront<RedbStore> {
    let store = Arc::new(open_store(path).unwrap());
    let mut storefront = Storefront::with_seed(store, &MarketConfig::default(), seed);
    storefront.initialize();
    storefront
}

// =============================================================================
// proptest strategies
// =============================================================================

/// Any condition.
pub fn arb_condition() -> impl Strategy<Value = Condition> {
    prop::sample::select(Condition::ALL.to_vec())
}

/// A small brand vocabulary so brand filters actually match something.
pub fn arb_brand() -> impl Strategy<Value = String> {
    prop::sample::select(vec!["Apple", "Dell", "HP", "Lenovo", "ASUS"]).prop_map(str::to_string)
}

/// An item with a whole-dollar price below 5000.
pub fn arb_item() -> impl Strategy<Value = Item> {
    (
        "[0-9]{1,6}",
        "[A-Za-z ]{1,12}",
        arb_brand(),
        0u64..5000,
        prop::sample::select(vec!["M2", "Intel i7", "AMD Ryzen 7"]),
        arb_condition(),
        0u32..=50,
        any::<bool>(),
    )
        .prop_map(
            |(id, name, brand, price, processor, condition, rating, in_stock)| {
                NewItem {
                    name,
                    brand,
                    price: Price::from_units(price),
                    processor: processor.to_string(),
                    condition,
                    rating: f64::from(rating) / 10.0,
                    in_stock,
                    ..NewItem::default()
                }
                .with_id(ItemId::new(id))
            },
        )
}

/// A catalog of up to `max` items with distinct ids.
pub fn arb_catalog(max: usize) -> impl Strategy<Value = Vec<Item>> {
    prop::collection::vec(arb_item(), 0..max).prop_map(|items| {
        let mut seen = std::collections::HashSet::new();
        items
            .into_iter()
            .filter(|item| seen.insert(item.id.clone()))
            .collect()
    })
}
