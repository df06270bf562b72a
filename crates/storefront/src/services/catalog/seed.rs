//! Built-in catalog used on first run.

use laptop_market_core::{Condition, Item, ItemId, NewItem, Price};

const PLACEHOLDER_IMAGE: &str = "/placeholder.svg?height=300&width=400";

#[allow(clippy::too_many_arguments)]
fn laptop(
    id: &str,
    name: &str,
    brand: &str,
    price: u64,
    processor: &str,
    memory_size: &str,
    storage_size: &str,
    screen_spec: &str,
    condition: Condition,
    rating: f64,
    review_count: u32,
    in_stock: bool,
) -> Item {
    NewItem {
        name: name.to_string(),
        brand: brand.to_string(),
        price: Price::from_units(price),
        processor: processor.to_string(),
        memory_size: memory_size.to_string(),
        storage_size: storage_size.to_string(),
        screen_spec: screen_spec.to_string(),
        condition,
        image_ref: PLACEHOLDER_IMAGE.to_string(),
        rating,
        review_count,
        in_stock,
    }
    .with_id(ItemId::new(id))
}

/// The default catalog: eight laptops with ids `"1"` through `"8"`.
#[must_use]
#[rustfmt::skip]
pub fn default_catalog() -> Vec<Item> {
    vec![
        laptop("1", "MacBook Pro 16\"", "Apple", 2499, "M2 Pro", "16GB", "512GB SSD", "16.2\" Retina", Condition::New, 4.8, 124, true),
        laptop("2", "ThinkPad X1 Carbon", "Lenovo", 1899, "Intel i7-12th Gen", "16GB", "1TB SSD", "14\" WQHD", Condition::New, 4.6, 89, true),
        laptop("3", "XPS 13", "Dell", 1299, "Intel i5-12th Gen", "8GB", "256GB SSD", "13.4\" FHD+", Condition::New, 4.4, 67, true),
        laptop("4", "Surface Laptop 5", "Microsoft", 1599, "Intel i7-12th Gen", "16GB", "512GB SSD", "13.5\" PixelSense", Condition::New, 4.5, 45, true),
        laptop("5", "MacBook Air M2", "Apple", 1199, "M2", "8GB", "256GB SSD", "13.6\" Liquid Retina", Condition::Refurbished, 4.7, 156, true),
        laptop("6", "ROG Zephyrus G14", "ASUS", 1799, "AMD Ryzen 9", "32GB", "1TB SSD", "14\" QHD", Condition::New, 4.6, 78, false),
        laptop("7", "Pavilion 15", "HP", 899, "Intel i5-11th Gen", "8GB", "512GB SSD", "15.6\" FHD", Condition::Used, 4.2, 34, true),
        laptop("8", "Legion 5 Pro", "Lenovo", 1699, "AMD Ryzen 7", "16GB", "512GB SSD", "16\" WQXGA", Condition::New, 4.5, 92, true),
    ]
}

#[cfg(test)]
mod tests {
    use std::collections::HashSet;

    use super::*;

    #[test]
    fn test_default_catalog_ids_are_unique() {
        let catalog = default_catalog();
        let ids: HashSet<_> = catalog.iter().map(|item| item.id.clone()).collect();
        assert_eq!(ids.len(), catalog.len());
        assert_eq!(catalog.len(), 8);
    }

    #[test]
    fn test_default_catalog_has_out_of_stock_item() {
        assert!(default_catalog().iter().any(|item| !item.in_stock));
    }
}
