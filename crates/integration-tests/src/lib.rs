//! Integration tests for Charcoal.
//!
//! # Running Tests
//!
//! ```bash
//! cargo test -p charcoal-integration-tests
//! ```
//!
//! Tests run against the bundled datasets (`CHARCOAL_USE_LOCAL_DATA`
//! semantics) and need no network or running backend. Tests that exercise
//! the live API are marked `#[ignore]`.

use std::path::PathBuf;
use std::sync::Once;

use charcoal_storefront::config::StorefrontConfig;
use charcoal_storefront::state::AppState;

static TRACING: Once = Once::new();

/// Install a test subscriber once per process. Honors `RUST_LOG`.
pub fn init_tracing() {
    TRACING.call_once(|| {
        let _ = tracing_subscriber::fmt()
            .with_env_filter(tracing_subscriber::EnvFilter::from_default_env())
            .with_test_writer()
            .try_init();
    });
}

/// Configuration pointing at the bundled datasets, no persistence.
#[must_use]
pub fn local_config() -> StorefrontConfig {
    StorefrontConfig {
        api_base_url: "http://localhost:3000/api".to_string(),
        menu_path: "/menu".to_string(),
        content_path: "/site-content".to_string(),
        cart_path: "/cart".to_string(),
        order_path: "/orders".to_string(),
        restaurant_id: "charcoal-main".to_string(),
        use_local_data: true,
        remote_cart: false,
        cart_file: None,
    }
}

/// A fresh session over the bundled datasets.
#[must_use]
pub fn local_session() -> AppState {
    init_tracing();
    AppState::new(local_config())
}

/// A unique temp-file path for cart persistence tests.
#[must_use]
pub fn temp_cart_file(tag: &str) -> PathBuf {
    let path = std::env::temp_dir().join(format!(
        "charcoal-it-{tag}-{}.json",
        std::process::id()
    ));
    let _ = std::fs::remove_file(&path);
    path
}
