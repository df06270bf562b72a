//! Domain models for the storefront.
//!
//! Catalog and cart records live in `laptop_market_core`; this module holds
//! the storefront-only types and the persistence key layout.

pub mod session;

pub use session::{CurrentUser, SessionRecord};

/// Persistence keys, one per stateful component.
pub mod keys {
    /// Key holding the ordered list of catalog items.
    pub const CATALOG: &str = "catalog";

    /// Key holding the ordered list of cart lines.
    pub const CART: &str = "cart";

    /// Key holding the session gate's authentication state.
    pub const SESSION: &str = "session";
}
