//! Site content store.
//!
//! Fetches the editorial content document once per session and maps it to
//! the canonical tree. Until the first successful fetch the store serves the
//! fully-defaulted tree, so consumers can render immediately. Follows the
//! same single-flight and stale-but-available discipline as the catalog
//! store.

mod convert;
pub mod defaults;

use std::sync::atomic::{AtomicU64, Ordering};
use std::sync::{Arc, PoisonError, RwLock};

use charcoal_core::SiteContent;
use tokio::sync::Mutex;
use tracing::{debug, instrument, warn};

use crate::client::{ApiClient, ApiError};
use crate::config::StorefrontConfig;

pub use convert::map_site_content;

/// Bundled content document served when `CHARCOAL_USE_LOCAL_DATA` is set.
const LOCAL_CONTENT: &str = include_str!("../../data/site_content.json");

/// Content state snapshot.
#[derive(Debug, Clone)]
pub struct ContentState {
    pub content: SiteContent,
    /// Whether a fetch has succeeded this session.
    pub loaded: bool,
    pub loading: bool,
    pub error: Option<String>,
}

impl Default for ContentState {
    fn default() -> Self {
        Self {
            content: map_site_content(&serde_json::Value::Null),
            loaded: false,
            loading: false,
            error: None,
        }
    }
}

/// Session content store. Cheaply cloneable; all clones share one state.
#[derive(Clone)]
pub struct ContentStore {
    inner: Arc<ContentStoreInner>,
}

struct ContentStoreInner {
    client: ApiClient,
    content_url: String,
    section_url_base: String,
    use_local_data: bool,
    state: RwLock<ContentState>,
    fetch_lock: Mutex<()>,
    fetch_epoch: AtomicU64,
}

impl ContentStore {
    #[must_use]
    pub fn new(client: ApiClient, config: &StorefrontConfig) -> Self {
        Self {
            inner: Arc::new(ContentStoreInner {
                client,
                content_url: config.content_url(),
                section_url_base: config.content_section_url(""),
                use_local_data: config.use_local_data,
                state: RwLock::new(ContentState::default()),
                fetch_lock: Mutex::new(()),
                fetch_epoch: AtomicU64::new(0),
            }),
        }
    }

    /// Fetch and map the content document, replacing the tree wholesale on
    /// success. Single-flight, like the catalog fetch.
    ///
    /// # Errors
    ///
    /// Returns the fetch error. The same message is recorded on the store's
    /// error flag; the previous tree is left untouched.
    #[instrument(skip(self))]
    pub async fn fetch_content(&self) -> Result<(), ApiError> {
        let epoch = self.inner.fetch_epoch.load(Ordering::Acquire);
        let _guard = self.inner.fetch_lock.lock().await;
        if self.inner.fetch_epoch.load(Ordering::Acquire) != epoch {
            debug!("Content already refreshed by a concurrent fetch");
            return Ok(());
        }

        self.mutate(|state| {
            state.loading = true;
            state.error = None;
        });

        match self.load_payload().await {
            Ok(doc) => {
                let content = map_site_content(&doc);
                self.mutate(|state| {
                    state.content = content;
                    state.loaded = true;
                    state.loading = false;
                });
                self.inner.fetch_epoch.fetch_add(1, Ordering::AcqRel);
                Ok(())
            }
            Err(e) => {
                warn!(error = %e, "Content fetch failed, keeping previous tree");
                self.mutate(|state| {
                    state.loading = false;
                    state.error = Some(e.to_string());
                });
                Err(e)
            }
        }
    }

    /// Fetch one named content section, returned as the raw document.
    ///
    /// Sections are not merged into the canonical tree; callers that want
    /// the typed view should use `fetch_content`.
    ///
    /// # Errors
    ///
    /// Returns an error if the request fails or the body is not valid JSON.
    #[instrument(skip(self))]
    pub async fn fetch_section(&self, section: &str) -> Result<serde_json::Value, ApiError> {
        let url = format!("{}{section}", self.inner.section_url_base);
        self.inner.client.get_json(&url).await
    }

    async fn load_payload(&self) -> Result<serde_json::Value, ApiError> {
        if self.inner.use_local_data {
            debug!("Serving content from bundled dataset");
            return Ok(serde_json::from_str(LOCAL_CONTENT)?);
        }
        self.inner.client.get_json(&self.inner.content_url).await
    }

    /// Snapshot of the canonical tree (defaulted until the first fetch).
    #[must_use]
    pub fn content(&self) -> SiteContent {
        self.read(|state| state.content.clone())
    }

    /// Whether a fetch has succeeded this session.
    #[must_use]
    pub fn is_loaded(&self) -> bool {
        self.read(|state| state.loaded)
    }

    #[must_use]
    pub fn is_loading(&self) -> bool {
        self.read(|state| state.loading)
    }

    #[must_use]
    pub fn error(&self) -> Option<String> {
        self.read(|state| state.error.clone())
    }

    fn read<R>(&self, f: impl FnOnce(&ContentState) -> R) -> R {
        let guard = self
            .inner
            .state
            .read()
            .unwrap_or_else(PoisonError::into_inner);
        f(&guard)
    }

    fn mutate(&self, f: impl FnOnce(&mut ContentState)) {
        let mut guard = self
            .inner
            .state
            .write()
            .unwrap_or_else(PoisonError::into_inner);
        f(&mut guard);
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;

    fn local_store() -> ContentStore {
        let config = StorefrontConfig {
            api_base_url: "http://localhost:3000/api".to_string(),
            menu_path: "/menu".to_string(),
            content_path: "/site-content".to_string(),
            cart_path: "/cart".to_string(),
            order_path: "/orders".to_string(),
            restaurant_id: "charcoal-main".to_string(),
            use_local_data: true,
            remote_cart: false,
            cart_file: None,
        };
        ContentStore::new(ApiClient::new(), &config)
    }

    #[test]
    fn test_default_tree_before_first_fetch() {
        let store = local_store();
        assert!(!store.is_loaded());
        let content = store.content();
        assert_eq!(content.brand.name, defaults::BRAND_NAME);
        assert!(!content.navigation.links.is_empty());
    }

    #[tokio::test]
    async fn test_fetch_content_from_bundled_dataset() {
        let store = local_store();
        store.fetch_content().await.unwrap();

        assert!(store.is_loaded());
        assert!(!store.is_loading());
        assert!(store.error().is_none());

        let content = store.content();
        assert!(!content.hero.banners.is_empty());
        assert!(!content.gallery.images.is_empty());
        assert!(!content.events.items.is_empty());
        assert!(!content.blog.posts.is_empty());
    }
}
