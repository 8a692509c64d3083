//! Unified error type for the storefront library.
//!
//! Each concern keeps its own `thiserror` enum (`ConfigError`, `ApiError`,
//! `SearchError`, `OrderError`); this module folds them into one
//! `StorefrontError` for callers that drive the whole session.

use thiserror::Error;

use crate::client::ApiError;
use crate::config::ConfigError;
use crate::order::OrderError;
use crate::search::SearchError;

/// Library-level error type for the storefront.
#[derive(Debug, Error)]
pub enum StorefrontError {
    /// Configuration loading failed.
    #[error("Config error: {0}")]
    Config(#[from] ConfigError),

    /// Storefront API operation failed.
    #[error("API error: {0}")]
    Api(#[from] ApiError),

    /// Search index operation failed.
    #[error("Search error: {0}")]
    Search(#[from] SearchError),

    /// Order submission failed.
    #[error("Order error: {0}")]
    Order(#[from] OrderError),
}

/// Result type alias for `StorefrontError`.
pub type Result<T> = std::result::Result<T, StorefrontError>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_storefront_error_display() {
        let err = StorefrontError::Config(ConfigError::MissingEnvVar(
            "CHARCOAL_RESTAURANT_ID".to_string(),
        ));
        assert_eq!(
            err.to_string(),
            "Config error: Missing environment variable: CHARCOAL_RESTAURANT_ID"
        );
    }
}
