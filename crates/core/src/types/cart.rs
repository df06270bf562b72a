//! Cart line records.

use std::num::NonZeroU32;

use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

use super::{Item, ItemId, Price};

/// One aggregated cart entry: a snapshot of an item plus a quantity.
///
/// The snapshot is copied when the line is created and is not refreshed if
/// the catalog item changes later. The line is identified by the id of the
/// item it was created from.
///
/// On the wire the item fields are flattened next to `quantity`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CartLine {
    #[serde(flatten)]
    pub item: Item,
    pub quantity: NonZeroU32,
}

impl CartLine {
    /// Start a new line with a quantity of one.
    #[must_use]
    pub const fn new(item: Item) -> Self {
        Self {
            item,
            quantity: NonZeroU32::MIN,
        }
    }

    /// Identifier of the line, equal to the originating item's id.
    #[must_use]
    pub const fn line_id(&self) -> &ItemId {
        &self.item.id
    }

    /// Unit price captured when the line was created.
    #[must_use]
    pub const fn price(&self) -> Price {
        self.item.price
    }

    /// Quantity as a plain integer.
    #[must_use]
    pub const fn quantity(&self) -> u32 {
        self.quantity.get()
    }

    /// `price * quantity`, saturating at `Decimal::MAX`.
    #[must_use]
    pub fn line_total(&self) -> Decimal {
        self.item.price.times(self.quantity.get())
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;
    use crate::{Condition, NewItem};

    fn item(id: &str, price: u64) -> Item {
        NewItem {
            name: format!("Laptop {id}"),
            brand: "Lenovo".to_string(),
            price: Price::from_units(price),
            condition: Condition::New,
            in_stock: true,
            ..NewItem::default()
        }
        .with_id(ItemId::new(id))
    }

    #[test]
    fn test_new_line_has_quantity_one() {
        let line = CartLine::new(item("2", 1899));
        assert_eq!(line.quantity(), 1);
        assert_eq!(line.line_id().as_str(), "2");
    }

    #[test]
    fn test_line_total() {
        let mut line = CartLine::new(item("2", 1899));
        line.quantity = NonZeroU32::new(3).unwrap();
        assert_eq!(line.line_total(), Decimal::from(5697));
    }

    #[test]
    fn test_line_total_saturates() {
        let mut expensive = item("2", 0);
        expensive.price = Price::new(Decimal::from_str_exact("20000000000000000000").unwrap()).unwrap();
        let mut line = CartLine::new(expensive);
        line.quantity = NonZeroU32::MAX;
        assert_eq!(line.line_total(), Decimal::MAX);
    }

    #[test]
    fn test_wire_format_is_flat() {
        let line = CartLine::new(item("2", 1899));
        let value = serde_json::to_value(&line).unwrap();
        assert_eq!(value["id"], "2");
        assert_eq!(value["quantity"], 1);
        assert!(value.get("item").is_none());

        let parsed: CartLine = serde_json::from_value(value).unwrap();
        assert_eq!(parsed, line);
    }

    #[test]
    fn test_zero_quantity_rejected() {
        let mut value = serde_json::to_value(CartLine::new(item("2", 1899))).unwrap();
        value["quantity"] = serde_json::json!(0);
        assert!(serde_json::from_value::<CartLine>(value).is_err());
    }
}
