//! Catalog item records.

use serde::{Deserialize, Serialize};

use super::{Condition, ItemId, Price};

/// A sellable laptop configuration in the catalog.
///
/// Serialized with camelCase field names. The older field names `ram`,
/// `storage`, `screen`, `image` and `reviews` are still accepted when
/// reading so snapshots written before the rename keep loading.
///
/// `rating` (0.0 to 5.0) and `review_count` are display attributes; catalog
/// operations never change them on their own.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Item {
    pub id: ItemId,
    pub name: String,
    pub brand: String,
    pub price: Price,
    pub processor: String,
    #[serde(alias = "ram")]
    pub memory_size: String,
    #[serde(alias = "storage")]
    pub storage_size: String,
    #[serde(alias = "screen")]
    pub screen_spec: String,
    pub condition: Condition,
    #[serde(alias = "image")]
    pub image_ref: String,
    pub rating: f64,
    #[serde(alias = "reviews")]
    pub review_count: u32,
    pub in_stock: bool,
}

impl Item {
    /// Whether the item can currently be added to a cart.
    #[must_use]
    pub const fn is_available(&self) -> bool {
        self.in_stock
    }

    /// Strip the identifier, e.g. to re-submit an item as a new listing.
    #[must_use]
    pub fn into_new(self) -> NewItem {
        NewItem {
            name: self.name,
            brand: self.brand,
            price: self.price,
            processor: self.processor,
            memory_size: self.memory_size,
            storage_size: self.storage_size,
            screen_spec: self.screen_spec,
            condition: self.condition,
            image_ref: self.image_ref,
            rating: self.rating,
            review_count: self.review_count,
            in_stock: self.in_stock,
        }
    }
}

/// An item that has not been assigned an identifier yet.
///
/// The catalog turns this into an [`Item`] on create.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct NewItem {
    pub name: String,
    pub brand: String,
    pub price: Price,
    pub processor: String,
    #[serde(alias = "ram")]
    pub memory_size: String,
    #[serde(alias = "storage")]
    pub storage_size: String,
    #[serde(alias = "screen")]
    pub screen_spec: String,
    pub condition: Condition,
    #[serde(alias = "image")]
    pub image_ref: String,
    pub rating: f64,
    #[serde(alias = "reviews")]
    pub review_count: u32,
    pub in_stock: bool,
}

impl NewItem {
    /// Attach an identifier.
    #[must_use]
    pub fn with_id(self, id: ItemId) -> Item {
        Item {
            id,
            name: self.name,
            brand: self.brand,
            price: self.price,
            processor: self.processor,
            memory_size: self.memory_size,
            storage_size: self.storage_size,
            screen_spec: self.screen_spec,
            condition: self.condition,
            image_ref: self.image_ref,
            rating: self.rating,
            review_count: self.review_count,
            in_stock: self.in_stock,
        }
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;

    fn sample() -> NewItem {
        NewItem {
            name: "XPS 13".to_string(),
            brand: "Dell".to_string(),
            price: Price::from_units(1299),
            processor: "Intel i5-12th Gen".to_string(),
            memory_size: "8GB".to_string(),
            storage_size: "256GB SSD".to_string(),
            screen_spec: "13.4\" FHD+".to_string(),
            condition: Condition::New,
            image_ref: "/placeholder.svg".to_string(),
            rating: 4.4,
            review_count: 67,
            in_stock: true,
        }
    }

    #[test]
    fn test_with_id_then_into_new() {
        let item = sample().with_id(ItemId::new("3"));
        assert_eq!(item.id.as_str(), "3");
        assert_eq!(item.into_new(), sample());
    }

    #[test]
    fn test_serialized_field_names() {
        let item = sample().with_id(ItemId::new("3"));
        let value = serde_json::to_value(&item).unwrap();
        assert_eq!(value["memorySize"], "8GB");
        assert_eq!(value["reviewCount"], 67);
        assert_eq!(value["inStock"], true);
        assert_eq!(value["condition"], "new");
    }

    #[test]
    fn test_legacy_field_names_accepted() {
        let json = r#"{
            "id": "7",
            "name": "Pavilion 15",
            "brand": "HP",
            "price": 899,
            "processor": "Intel i5-11th Gen",
            "ram": "8GB",
            "storage": "512GB SSD",
            "screen": "15.6\" FHD",
            "condition": "used",
            "image": "/placeholder.svg",
            "rating": 4.2,
            "reviews": 34,
            "inStock": true
        }"#;
        let item: Item = serde_json::from_str(json).unwrap();
        assert_eq!(item.memory_size, "8GB");
        assert_eq!(item.review_count, 34);
        assert_eq!(item.condition, Condition::Used);
        assert!(item.is_available());
    }

    #[test]
    fn test_missing_field_rejected() {
        let json = r#"{"id": "1", "name": "Nameless"}"#;
        assert!(serde_json::from_str::<Item>(json).is_err());
    }
}
