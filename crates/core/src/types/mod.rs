//! Core types for the laptop marketplace.
//!
//! This module provides type-safe wrappers for the catalog and cart domain.

pub mod cart;
pub mod id;
pub mod item;
pub mod price;
pub mod status;

pub use cart::CartLine;
pub use id::ItemId;
pub use item::{Item, NewItem};
pub use price::{Price, PriceError};
pub use status::{Condition, ConditionError};
