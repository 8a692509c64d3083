//! Storefront configuration loaded from environment variables.
//!
//! # Environment Variables
//!
//! ## Required
//! - `CHARCOAL_RESTAURANT_ID` - Restaurant identifier sent with every order
//!
//! ## Optional
//! - `CHARCOAL_API_BASE_URL` - API origin (default: `http://localhost:3000/api`)
//! - `CHARCOAL_MENU_PATH` - Menu resource path (default: `/menu`)
//! - `CHARCOAL_CONTENT_PATH` - Site-content resource path (default: `/site-content`)
//! - `CHARCOAL_CART_PATH` - Cart resource path (default: `/cart`)
//! - `CHARCOAL_ORDER_PATH` - Order resource path (default: `/orders`)
//! - `CHARCOAL_USE_LOCAL_DATA` - Serve bundled datasets instead of the network (default: false)
//! - `CHARCOAL_REMOTE_CART` - Mirror cart mutations to the cart endpoint (default: false)
//! - `CHARCOAL_CART_FILE` - JSON file path for local cart persistence (default: none)

use std::path::PathBuf;

use thiserror::Error;
use url::Url;

/// Configuration errors that can occur during loading.
#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("Missing environment variable: {0}")]
    MissingEnvVar(String),
    #[error("Invalid environment variable {0}: {1}")]
    InvalidEnvVar(String, String),
}

/// Storefront client configuration.
#[derive(Debug, Clone)]
pub struct StorefrontConfig {
    /// API origin, no trailing slash (e.g. `http://localhost:3000/api`)
    pub api_base_url: String,
    /// Menu resource path, leading slash
    pub menu_path: String,
    /// Site-content resource path, leading slash
    pub content_path: String,
    /// Cart resource path, leading slash
    pub cart_path: String,
    /// Order resource path, leading slash
    pub order_path: String,
    /// Restaurant identifier sent with every order
    pub restaurant_id: String,
    /// Serve bundled datasets instead of hitting the network
    pub use_local_data: bool,
    /// Mirror cart mutations to the remote cart endpoint
    pub remote_cart: bool,
    /// JSON file for local cart persistence; ignored when `remote_cart` is set
    pub cart_file: Option<PathBuf>,
}

impl StorefrontConfig {
    /// Load configuration from environment variables.
    ///
    /// Calls `dotenvy::dotenv()` to load from `.env` file if present.
    ///
    /// # Errors
    ///
    /// Returns `ConfigError` if required variables are missing or the base
    /// URL does not parse.
    pub fn from_env() -> Result<Self, ConfigError> {
        // Load .env file if present (ignore errors if not found)
        let _ = dotenvy::dotenv();

        let api_base_url = get_env_or_default("CHARCOAL_API_BASE_URL", "http://localhost:3000/api");
        Url::parse(&api_base_url).map_err(|e| {
            ConfigError::InvalidEnvVar("CHARCOAL_API_BASE_URL".to_string(), e.to_string())
        })?;

        Ok(Self {
            api_base_url: api_base_url.trim_end_matches('/').to_string(),
            menu_path: get_env_or_default("CHARCOAL_MENU_PATH", "/menu"),
            content_path: get_env_or_default("CHARCOAL_CONTENT_PATH", "/site-content"),
            cart_path: get_env_or_default("CHARCOAL_CART_PATH", "/cart"),
            order_path: get_env_or_default("CHARCOAL_ORDER_PATH", "/orders"),
            restaurant_id: get_required_env("CHARCOAL_RESTAURANT_ID")?,
            use_local_data: get_bool_env("CHARCOAL_USE_LOCAL_DATA"),
            remote_cart: get_bool_env("CHARCOAL_REMOTE_CART"),
            cart_file: get_optional_env("CHARCOAL_CART_FILE").map(PathBuf::from),
        })
    }

    /// Full URL of the menu resource.
    #[must_use]
    pub fn menu_url(&self) -> String {
        format!("{}{}", self.api_base_url, self.menu_path)
    }

    /// Full URL of the site-content resource.
    #[must_use]
    pub fn content_url(&self) -> String {
        format!("{}{}", self.api_base_url, self.content_path)
    }

    /// Full URL of one named site-content section.
    #[must_use]
    pub fn content_section_url(&self, section: &str) -> String {
        format!("{}{}/{section}", self.api_base_url, self.content_path)
    }

    /// Full URL of the cart resource.
    #[must_use]
    pub fn cart_url(&self) -> String {
        format!("{}{}", self.api_base_url, self.cart_path)
    }

    /// Full URL of the order resource.
    #[must_use]
    pub fn order_url(&self) -> String {
        format!("{}{}", self.api_base_url, self.order_path)
    }
}

// =============================================================================
// Helper Functions
// =============================================================================

/// Get a required environment variable.
fn get_required_env(key: &str) -> Result<String, ConfigError> {
    std::env::var(key).map_err(|_| ConfigError::MissingEnvVar(key.to_string()))
}

/// Get an optional environment variable.
fn get_optional_env(key: &str) -> Option<String> {
    std::env::var(key).ok()
}

/// Get an environment variable with a default value.
fn get_env_or_default(key: &str, default: &str) -> String {
    std::env::var(key).unwrap_or_else(|_| default.to_string())
}

/// Get a boolean switch. Accepts `1`/`true`/`yes` (case-insensitive);
/// anything else, including an unset variable, is false.
fn get_bool_env(key: &str) -> bool {
    std::env::var(key).is_ok_and(|v| {
        let v = v.trim().to_lowercase();
        v == "1" || v == "true" || v == "yes"
    })
}
