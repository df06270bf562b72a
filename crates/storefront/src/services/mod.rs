//! Business logic services for the storefront.
//!
//! # Services
//!
//! - `catalog` - Catalog store (create, update, delete, list; seeded on first run)
//! - `cart` - Cart aggregator (merging adds, quantities, totals)
//! - `auth` - Session gate (credential check with persisted sign-in state)
//!
//! Each service owns exactly one persistence key and receives the store it
//! writes to through its constructor.

pub mod auth;
pub mod cart;
pub mod catalog;

pub use auth::{CredentialGate, Credentials, SessionGate};
pub use cart::{CartAggregator, CartError};
pub use catalog::{CatalogOrigin, CatalogStore};
