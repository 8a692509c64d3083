//! Menu catalog store.
//!
//! Holds the flattened item list and its derived categories. Fetches are
//! single-flight: while one fetch is running, later callers wait for it and
//! observe the refreshed state instead of issuing a second request. A failed
//! fetch keeps the previous catalog (stale-but-available) and records the
//! error string; retry is simply calling `fetch_menu` again.

mod convert;

use std::sync::atomic::{AtomicU64, Ordering};
use std::sync::{Arc, PoisonError, RwLock};

use charcoal_core::{ItemId, MenuCategory, MenuItem};
use tokio::sync::Mutex;
use tracing::{debug, instrument, warn};

use crate::client::{ApiClient, ApiError};
use crate::config::StorefrontConfig;

pub use convert::{derive_categories, parse_menu_payload};

/// Bundled catalog served when `CHARCOAL_USE_LOCAL_DATA` is set.
const LOCAL_MENU: &str = include_str!("../../data/menu.json");

/// Catalog state snapshot.
#[derive(Debug, Clone, Default)]
pub struct MenuState {
    pub items: Vec<MenuItem>,
    pub categories: Vec<MenuCategory>,
    pub loading: bool,
    pub error: Option<String>,
}

/// Session catalog store. Cheaply cloneable; all clones share one state.
#[derive(Clone)]
pub struct MenuStore {
    inner: Arc<MenuStoreInner>,
}

struct MenuStoreInner {
    client: ApiClient,
    menu_url: String,
    use_local_data: bool,
    state: RwLock<MenuState>,
    fetch_lock: Mutex<()>,
    fetch_epoch: AtomicU64,
}

impl MenuStore {
    #[must_use]
    pub fn new(client: ApiClient, config: &StorefrontConfig) -> Self {
        Self {
            inner: Arc::new(MenuStoreInner {
                client,
                menu_url: config.menu_url(),
                use_local_data: config.use_local_data,
                state: RwLock::new(MenuState::default()),
                fetch_lock: Mutex::new(()),
                fetch_epoch: AtomicU64::new(0),
            }),
        }
    }

    /// Fetch and ingest the catalog, replacing items and categories
    /// wholesale on success.
    ///
    /// At most one fetch runs at a time. A caller that arrives while a fetch
    /// is in flight waits for it; if that fetch succeeded, the late caller
    /// returns without re-fetching.
    ///
    /// # Errors
    ///
    /// Returns the fetch error. The same message is also recorded on the
    /// store's error flag; prior items are left untouched.
    #[instrument(skip(self))]
    pub async fn fetch_menu(&self) -> Result<(), ApiError> {
        let epoch = self.inner.fetch_epoch.load(Ordering::Acquire);
        let _guard = self.inner.fetch_lock.lock().await;
        if self.inner.fetch_epoch.load(Ordering::Acquire) != epoch {
            debug!("Catalog already refreshed by a concurrent fetch");
            return Ok(());
        }

        self.mutate(|state| {
            state.loading = true;
            state.error = None;
        });

        match self.load_payload().await {
            Ok(doc) => {
                let items = parse_menu_payload(&doc);
                let categories = derive_categories(&items);
                debug!(items = items.len(), categories = categories.len(), "Catalog ingested");
                self.mutate(|state| {
                    state.items = items;
                    state.categories = categories;
                    state.loading = false;
                });
                self.inner.fetch_epoch.fetch_add(1, Ordering::AcqRel);
                Ok(())
            }
            Err(e) => {
                warn!(error = %e, "Catalog fetch failed, keeping previous items");
                self.mutate(|state| {
                    state.loading = false;
                    state.error = Some(e.to_string());
                });
                Err(e)
            }
        }
    }

    async fn load_payload(&self) -> Result<serde_json::Value, ApiError> {
        if self.inner.use_local_data {
            debug!("Serving catalog from bundled dataset");
            return Ok(serde_json::from_str(LOCAL_MENU)?);
        }
        self.inner.client.get_json(&self.inner.menu_url).await
    }

    /// Snapshot of the current items.
    #[must_use]
    pub fn items(&self) -> Vec<MenuItem> {
        self.read(|state| state.items.clone())
    }

    /// Snapshot of the derived categories.
    #[must_use]
    pub fn categories(&self) -> Vec<MenuCategory> {
        self.read(|state| state.categories.clone())
    }

    /// Look up one item by id.
    #[must_use]
    pub fn item_by_id(&self, id: ItemId) -> Option<MenuItem> {
        self.read(|state| state.items.iter().find(|i| i.id == id).cloned())
    }

    /// All items in the given category (by category display name).
    #[must_use]
    pub fn items_by_category(&self, category: &str) -> Vec<MenuItem> {
        self.read(|state| {
            state
                .items
                .iter()
                .filter(|i| i.category == category)
                .cloned()
                .collect()
        })
    }

    #[must_use]
    pub fn is_loading(&self) -> bool {
        self.read(|state| state.loading)
    }

    #[must_use]
    pub fn error(&self) -> Option<String> {
        self.read(|state| state.error.clone())
    }

    fn read<R>(&self, f: impl FnOnce(&MenuState) -> R) -> R {
        let guard = self
            .inner
            .state
            .read()
            .unwrap_or_else(PoisonError::into_inner);
        f(&guard)
    }

    fn mutate(&self, f: impl FnOnce(&mut MenuState)) {
        let mut guard = self
            .inner
            .state
            .write()
            .unwrap_or_else(PoisonError::into_inner);
        f(&mut guard);
    }
}
