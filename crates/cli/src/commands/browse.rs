//! Read-only catalog views.

use laptop_market_storefront::Storefront;
use laptop_market_storefront::db::KeyValueStore;
use laptop_market_storefront::search::QuerySpec;

use super::print_items;

pub fn browse<S: KeyValueStore + ?Sized>(storefront: &Storefront<S>, query: &QuerySpec) {
    let view = storefront.view(query);
    tracing::debug!(matched = view.len(), sort = %query.sort, "Catalog view");
    print_items(view.iter());
}

pub fn facets<S: KeyValueStore + ?Sized>(storefront: &Storefront<S>) {
    let facets = storefront.facets();
    println!("brands:     {}", facets.brands.join(", "));
    let conditions: Vec<&str> = facets.conditions.iter().map(|c| c.as_str()).collect();
    println!("conditions: {}", conditions.join(", "));
    match facets.price_bounds {
        Some((low, high)) => println!("price:      {low} - {high}"),
        None => println!("price:      (empty catalog)"),
    }
}
