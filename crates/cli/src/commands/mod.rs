//! CLI command implementations.
//!
//! Commands write their results to stdout. Diagnostics go through `tracing`
//! on stderr.

#![allow(clippy::print_stdout)]

use std::sync::Arc;

use laptop_market_core::Item;
use laptop_market_storefront::Storefront;
use laptop_market_storefront::config::MarketConfig;
use laptop_market_storefront::db::{RedbStore, open_store};
use laptop_market_storefront::error::AppError;
use laptop_market_storefront::services::CatalogOrigin;

pub mod auth;
pub mod browse;
pub mod cart;
pub mod catalog;

/// Open the configured store and load every component from it.
pub fn open(config: &MarketConfig) -> Result<Storefront<RedbStore>, AppError> {
    let store = Arc::new(open_store(&config.data_path)?);
    let mut storefront = Storefront::new(store, config);
    if storefront.initialize() == CatalogOrigin::Seeded {
        tracing::info!(path = %config.data_path.display(), "Seeded default catalog");
    }
    Ok(storefront)
}

fn print_items<'a>(items: impl IntoIterator<Item = &'a Item>) {
    let mut shown = 0_usize;
    for item in items {
        println!("{}", format_item(item));
        shown += 1;
    }
    if shown == 0 {
        println!("(no matching laptops)");
    }
}

fn format_item(item: &Item) -> String {
    let stock = if item.in_stock { "" } else { "  [out of stock]" };
    format!(
        "{:>14}  {:<24} {:<10} {:>10}  {:<11} {} / {} / {} / {}  {:.1}* ({}){stock}",
        item.id,
        item.name,
        item.brand,
        item.price.to_string(),
        item.condition.as_str(),
        item.processor,
        item.memory_size,
        item.storage_size,
        item.screen_spec,
        item.rating,
        item.review_count,
    )
}
