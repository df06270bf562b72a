//! Status enums for catalog items.

use serde::{Deserialize, Serialize};

/// Error returned when parsing an unknown [`Condition`].
#[derive(thiserror::Error, Debug, Clone, PartialEq, Eq)]
#[error("invalid condition: {0} (expected new, used or refurbished)")]
pub struct ConditionError(pub String);

/// Physical condition of a listed laptop.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize, Default)]
#[serde(rename_all = "snake_case")]
pub enum Condition {
    /// Factory sealed.
    #[default]
    New,
    /// Previously owned, sold as-is.
    Used,
    /// Previously owned, restored by the seller.
    Refurbished,
}

impl Condition {
    /// All conditions, in display order.
    pub const ALL: [Self; 3] = [Self::New, Self::Used, Self::Refurbished];

    /// Wire name of the condition.
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::New => "new",
            Self::Used => "used",
            Self::Refurbished => "refurbished",
        }
    }
}

impl std::fmt::Display for Condition {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

impl std::str::FromStr for Condition {
    type Err = ConditionError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "new" => Ok(Self::New),
            "used" => Ok(Self::Used),
            "refurbished" => Ok(Self::Refurbished),
            _ => Err(ConditionError(s.to_string())),
        }
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_matches_display() {
        for condition in Condition::ALL {
            let parsed: Condition = condition.to_string().parse().unwrap();
            assert_eq!(parsed, condition);
        }
    }

    #[test]
    fn test_parse_is_exact() {
        assert!("New".parse::<Condition>().is_err());
        assert!("broken".parse::<Condition>().is_err());
    }

    #[test]
    fn test_serde_wire_names() {
        let json = serde_json::to_string(&Condition::Refurbished).unwrap();
        assert_eq!(json, "\"refurbished\"");
        assert!(serde_json::from_str::<Condition>("\"mint\"").is_err());
    }
}
