//! Unified error handling.
//!
//! Provides a unified `AppError` type for callers of the storefront such as
//! the CLI. Lower layers keep their own error enums; recoverable conditions
//! (corrupt snapshots, unknown ids) never reach this type.

use thiserror::Error;

use crate::config::ConfigError;
use crate::db::PersistenceError;
use crate::services::CartError;

/// Application-level error type for the storefront.
#[derive(Debug, Error)]
pub enum AppError {
    /// Configuration could not be loaded.
    #[error("Configuration error: {0}")]
    Config(#[from] ConfigError),

    /// The persistence backend could not be opened.
    #[error("Storage error: {0}")]
    Persistence(#[from] PersistenceError),

    /// The cart rejected the operation.
    #[error("Cart error: {0}")]
    Cart(#[from] CartError),

    /// Resource not found.
    #[error("Not found: {0}")]
    NotFound(String),

    /// User is not authenticated.
    #[error("Unauthorized: {0}")]
    Unauthorized(String),

    /// Bad request from the caller.
    #[error("Bad request: {0}")]
    BadRequest(String),
}

impl AppError {
    /// Process exit code for this error, loosely following `sysexits.h`.
    #[must_use]
    pub const fn exit_code(&self) -> i32 {
        match self {
            Self::BadRequest(_) => 64,
            Self::NotFound(_) | Self::Cart(_) => 65,
            Self::Unauthorized(_) => 77,
            Self::Config(_) => 78,
            Self::Persistence(_) => 74,
        }
    }
}

/// Result type alias for `AppError`.
pub type Result<T> = std::result::Result<T, AppError>;

#[cfg(test)]
mod tests {
    use laptop_market_core::ItemId;

    use super::*;

    #[test]
    fn test_app_error_display() {
        let err = AppError::NotFound("item 123".to_string());
        assert_eq!(err.to_string(), "Not found: item 123");

        let err = AppError::BadRequest("invalid price".to_string());
        assert_eq!(err.to_string(), "Bad request: invalid price");

        let err = AppError::from(CartError::OutOfStock(ItemId::new("6")));
        assert_eq!(err.to_string(), "Cart error: item 6 is out of stock");
    }

    #[test]
    fn test_app_error_exit_codes() {
        assert_eq!(AppError::BadRequest("x".to_string()).exit_code(), 64);
        assert_eq!(AppError::NotFound("x".to_string()).exit_code(), 65);
        assert_eq!(AppError::Unauthorized("x".to_string()).exit_code(), 77);
        assert_eq!(
            AppError::Persistence(PersistenceError::LockPoisoned).exit_code(),
            74
        );
    }
}
