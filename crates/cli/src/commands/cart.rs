//! Cart commands.

use laptop_market_core::ItemId;
use laptop_market_storefront::Storefront;
use laptop_market_storefront::db::KeyValueStore;
use laptop_market_storefront::error::AppError;

pub fn show<S: KeyValueStore + ?Sized>(storefront: &Storefront<S>) {
    let lines = storefront.cart_lines();
    if lines.is_empty() {
        println!("Cart is empty");
        return;
    }
    for line in lines {
        println!(
            "{:>14}  {:<24} {:>10} x {:<3} {:>12}",
            line.line_id(),
            line.item.name,
            line.price().to_string(),
            line.quantity(),
            format!("${:.2}", line.line_total()),
        );
    }
    println!(
        "{} item(s), total ${:.2}",
        storefront.item_count(),
        storefront.order_total()
    );
}

pub fn add<S: KeyValueStore + ?Sized>(
    storefront: &mut Storefront<S>,
    id: &ItemId,
) -> Result<(), AppError> {
    let quantity = storefront.add_to_cart(id)?;
    println!("{id} x {quantity} in cart");
    Ok(())
}

pub fn remove<S: KeyValueStore + ?Sized>(
    storefront: &mut Storefront<S>,
    id: &ItemId,
) -> Result<(), AppError> {
    if storefront.remove_from_cart(id) {
        Ok(())
    } else {
        Err(AppError::NotFound(format!("cart line {id}")))
    }
}

pub fn set<S: KeyValueStore + ?Sized>(
    storefront: &mut Storefront<S>,
    id: &ItemId,
    quantity: i64,
) -> Result<(), AppError> {
    if storefront.set_cart_quantity(id, quantity) {
        Ok(())
    } else {
        Err(AppError::NotFound(format!("cart line {id}")))
    }
}

pub fn clear<S: KeyValueStore + ?Sized>(storefront: &mut Storefront<S>) {
    storefront.clear_cart();
}
