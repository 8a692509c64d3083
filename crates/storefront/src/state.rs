//! Session state shared across the storefront.
//!
//! One `AppState` holds every store for a browsing session: catalog,
//! content, cart, orders, and search. It is cheaply cloneable via `Arc`, so
//! consumers can hand clones to tasks and UI layers freely.

use std::sync::Arc;

use tracing::{info, instrument};

use crate::cart::{CartBackend, CartStore, LocalCartSlot, RemoteCart};
use crate::client::ApiClient;
use crate::config::StorefrontConfig;
use crate::content::ContentStore;
use crate::error::{Result, StorefrontError};
use crate::menu::MenuStore;
use crate::order::OrderService;
use crate::search::SearchIndex;

/// Session state shared across all consumers.
///
/// This struct is cheaply cloneable via `Arc`; all clones share the same
/// stores.
#[derive(Clone)]
pub struct AppState {
    inner: Arc<AppStateInner>,
}

struct AppStateInner {
    config: StorefrontConfig,
    client: ApiClient,
    menu: MenuStore,
    content: ContentStore,
    cart: CartStore,
    orders: OrderService,
    search: SearchIndex,
}

impl AppState {
    /// Create the session state from an already-loaded configuration.
    ///
    /// The cart backend follows the configuration: `remote_cart` selects the
    /// remote mirror, otherwise `cart_file` selects local file persistence,
    /// otherwise persistence is disabled.
    #[must_use]
    pub fn new(config: StorefrontConfig) -> Self {
        let client = ApiClient::new();

        let backend = if config.remote_cart {
            CartBackend::Remote(RemoteCart::new(client.clone(), &config))
        } else if let Some(path) = config.cart_file.clone() {
            CartBackend::Local(LocalCartSlot::new(path))
        } else {
            CartBackend::Disabled
        };

        let menu = MenuStore::new(client.clone(), &config);
        let content = ContentStore::new(client.clone(), &config);
        let cart = CartStore::new(backend);
        let orders = OrderService::new(client.clone(), &config, cart.clone());
        let search = SearchIndex::new();

        Self {
            inner: Arc::new(AppStateInner {
                config,
                client,
                menu,
                content,
                cart,
                orders,
                search,
            }),
        }
    }

    /// Create the session state from environment variables.
    ///
    /// # Errors
    ///
    /// Returns an error if required configuration is missing or invalid.
    pub fn from_env() -> Result<Self> {
        Ok(Self::new(StorefrontConfig::from_env()?))
    }

    /// Load everything a fresh session needs: catalog and content
    /// concurrently, then the persisted cart, then the search index over the
    /// fetched catalog.
    ///
    /// Cart hydration failures are recorded on the cart's error flag and do
    /// not fail the bootstrap.
    ///
    /// # Errors
    ///
    /// Returns the first catalog or content fetch error, or a search build
    /// error. The stores keep whatever state they reached.
    #[instrument(skip(self))]
    pub async fn bootstrap(&self) -> Result<()> {
        let (menu_result, content_result) = tokio::join!(
            self.inner.menu.fetch_menu(),
            self.inner.content.fetch_content(),
        );
        menu_result.map_err(StorefrontError::from)?;
        content_result.map_err(StorefrontError::from)?;

        self.inner.cart.load_persisted().await;
        self.inner.search.build(&self.inner.menu.items())?;

        info!(
            items = self.inner.menu.items().len(),
            cart_lines = self.inner.cart.lines().len(),
            "Session bootstrapped"
        );
        Ok(())
    }

    /// Get a reference to the storefront configuration.
    #[must_use]
    pub fn config(&self) -> &StorefrontConfig {
        &self.inner.config
    }

    /// Get a reference to the shared HTTP client.
    #[must_use]
    pub fn client(&self) -> &ApiClient {
        &self.inner.client
    }

    /// Get a reference to the catalog store.
    #[must_use]
    pub fn menu(&self) -> &MenuStore {
        &self.inner.menu
    }

    /// Get a reference to the site content store.
    #[must_use]
    pub fn content(&self) -> &ContentStore {
        &self.inner.content
    }

    /// Get a reference to the cart store.
    #[must_use]
    pub fn cart(&self) -> &CartStore {
        &self.inner.cart
    }

    /// Get a reference to the order service.
    #[must_use]
    pub fn orders(&self) -> &OrderService {
        &self.inner.orders
    }

    /// Get a reference to the search index.
    #[must_use]
    pub fn search(&self) -> &SearchIndex {
        &self.inner.search
    }
}
