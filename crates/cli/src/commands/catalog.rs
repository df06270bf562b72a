//! Catalog listing commands.
//!
//! `add`, `update` and `delete` require a signed-in session.

use rust_decimal::Decimal;

use laptop_market_core::{Condition, Item, ItemId, NewItem, Price};
use laptop_market_storefront::Storefront;
use laptop_market_storefront::db::KeyValueStore;
use laptop_market_storefront::error::AppError;

use super::{format_item, print_items};

/// Fields of a new listing.
#[derive(clap::Args)]
pub struct ListingArgs {
    #[arg(long)]
    name: String,

    #[arg(long)]
    brand: String,

    #[arg(long, value_parser = parse_price)]
    price: Price,

    #[arg(long, default_value = "")]
    processor: String,

    /// e.g. `16GB`
    #[arg(long, default_value = "")]
    memory: String,

    /// e.g. `512GB SSD`
    #[arg(long, default_value = "")]
    storage: String,

    #[arg(long, default_value = "")]
    screen: String,

    #[arg(long, default_value = "new")]
    condition: Condition,

    #[arg(long, default_value = "")]
    image: String,

    #[arg(long, default_value_t = 0.0)]
    rating: f64,

    #[arg(long, default_value_t = 0)]
    reviews: u32,

    /// List the item as out of stock
    #[arg(long)]
    out_of_stock: bool,
}

/// Fields to change on an existing listing. Omitted fields keep their value.
#[derive(clap::Args)]
pub struct ListingChanges {
    #[arg(long)]
    name: Option<String>,

    #[arg(long)]
    brand: Option<String>,

    #[arg(long, value_parser = parse_price)]
    price: Option<Price>,

    #[arg(long)]
    processor: Option<String>,

    #[arg(long)]
    memory: Option<String>,

    #[arg(long)]
    storage: Option<String>,

    #[arg(long)]
    screen: Option<String>,

    #[arg(long)]
    condition: Option<Condition>,

    #[arg(long)]
    image: Option<String>,

    #[arg(long)]
    rating: Option<f64>,

    #[arg(long)]
    reviews: Option<u32>,

    /// `true` or `false`
    #[arg(long)]
    in_stock: Option<bool>,
}

fn parse_price(raw: &str) -> Result<Price, String> {
    let amount: Decimal = raw.parse().map_err(|e| format!("{e}"))?;
    Price::new(amount).map_err(|e| e.to_string())
}

impl From<ListingArgs> for NewItem {
    fn from(args: ListingArgs) -> Self {
        Self {
            name: args.name,
            brand: args.brand,
            price: args.price,
            processor: args.processor,
            memory_size: args.memory,
            storage_size: args.storage,
            screen_spec: args.screen,
            condition: args.condition,
            image_ref: args.image,
            rating: args.rating.clamp(0.0, 5.0),
            review_count: args.reviews,
            in_stock: !args.out_of_stock,
        }
    }
}

impl ListingChanges {
    fn apply(self, mut item: Item) -> Item {
        if let Some(name) = self.name {
            item.name = name;
        }
        if let Some(brand) = self.brand {
            item.brand = brand;
        }
        if let Some(price) = self.price {
            item.price = price;
        }
        if let Some(processor) = self.processor {
            item.processor = processor;
        }
        if let Some(memory) = self.memory {
            item.memory_size = memory;
        }
        if let Some(storage) = self.storage {
            item.storage_size = storage;
        }
        if let Some(screen) = self.screen {
            item.screen_spec = screen;
        }
        if let Some(condition) = self.condition {
            item.condition = condition;
        }
        if let Some(image) = self.image {
            item.image_ref = image;
        }
        if let Some(rating) = self.rating {
            item.rating = rating.clamp(0.0, 5.0);
        }
        if let Some(reviews) = self.reviews {
            item.review_count = reviews;
        }
        if let Some(in_stock) = self.in_stock {
            item.in_stock = in_stock;
        }
        item
    }
}

pub fn list<S: KeyValueStore + ?Sized>(storefront: &Storefront<S>) {
    print_items(storefront.list());
}

pub fn add<S: KeyValueStore + ?Sized>(
    storefront: &mut Storefront<S>,
    args: ListingArgs,
) -> Result<(), AppError> {
    storefront.require_user()?;
    let item = storefront.create_item(args.into());
    tracing::info!(id = %item.id, "Listing created");
    println!("{}", format_item(&item));
    Ok(())
}

pub fn update<S: KeyValueStore + ?Sized>(
    storefront: &mut Storefront<S>,
    id: &ItemId,
    changes: ListingChanges,
) -> Result<(), AppError> {
    storefront.require_user()?;
    let current = storefront
        .item(id)
        .cloned()
        .ok_or_else(|| AppError::NotFound(format!("item {id}")))?;

    let updated = changes.apply(current);
    storefront.update_item(updated.clone());
    println!("{}", format_item(&updated));
    Ok(())
}

pub fn delete<S: KeyValueStore + ?Sized>(
    storefront: &mut Storefront<S>,
    id: &ItemId,
) -> Result<(), AppError> {
    storefront.require_user()?;
    if !storefront.delete_item(id) {
        return Err(AppError::NotFound(format!("item {id}")));
    }
    tracing::info!(%id, "Listing deleted");
    Ok(())
}
