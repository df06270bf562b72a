//! Opaque item identifier.

use core::fmt;

use serde::{Deserialize, Serialize};

/// Stable, opaque identifier of a catalog item.
///
/// Identifiers are plain strings on the wire. The catalog issues numeric
/// strings for the seed data and millisecond timestamps for created items,
/// but callers must not rely on any particular shape.
///
/// A cart line is keyed by the `ItemId` of the item it was created from.
///
/// ```
/// use laptop_market_core::ItemId;
///
/// let id = ItemId::new("42");
/// assert_eq!(id.as_str(), "42");
/// assert_eq!(id.to_string(), "42");
/// ```
#[derive(Debug, Clone, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct ItemId(String);

impl ItemId {
    /// Create an identifier from any string-like value.
    #[must_use]
    pub fn new(id: impl Into<String>) -> Self {
        Self(id.into())
    }

    /// Get the identifier as a string slice.
    #[must_use]
    pub fn as_str(&self) -> &str {
        &self.0
    }

    /// Consume the identifier and return the inner string.
    #[must_use]
    pub fn into_inner(self) -> String {
        self.0
    }
}

impl fmt::Display for ItemId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

impl AsRef<str> for ItemId {
    fn as_ref(&self) -> &str {
        &self.0
    }
}

impl From<&str> for ItemId {
    fn from(id: &str) -> Self {
        Self(id.to_string())
    }
}

impl From<String> for ItemId {
    fn from(id: String) -> Self {
        Self(id)
    }
}

impl From<ItemId> for String {
    fn from(id: ItemId) -> Self {
        id.0
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;

    #[test]
    fn test_display_matches_inner() {
        let id = ItemId::from("1700000000000");
        assert_eq!(format!("{id}"), "1700000000000");
    }

    #[test]
    fn test_serde_is_transparent() {
        let id = ItemId::new("7");
        let json = serde_json::to_string(&id).unwrap();
        assert_eq!(json, "\"7\"");

        let parsed: ItemId = serde_json::from_str(&json).unwrap();
        assert_eq!(parsed, id);
    }

    #[test]
    fn test_equality_is_exact() {
        assert_ne!(ItemId::new("a"), ItemId::new("A"));
        assert_eq!(ItemId::new("a"), ItemId::from(String::from("a")));
    }
}
