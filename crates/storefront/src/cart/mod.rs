//! Cart state and session cart store.
//!
//! The reducer core (`CartState`) is pure and synchronous; the store wraps
//! it with change notifications and an optional persistence mirror. Memory
//! is authoritative: persistence failures are logged and swallowed, and the
//! in-memory cart keeps going.

pub mod persistence;

use std::sync::{Arc, PoisonError, RwLock};

use charcoal_core::{CartLine, ItemId};
use rust_decimal::Decimal;
use tokio::sync::watch;
use tracing::{instrument, warn};

pub use persistence::{CartBackend, CartPersistence, LocalCartSlot, PersistError, RemoteCart};

/// The cart reducer state: the line list plus request lifecycle flags.
#[derive(Debug, Clone, Default)]
pub struct CartState {
    items: Vec<CartLine>,
    loading: bool,
    error: Option<String>,
}

impl CartState {
    /// Add a line. If a line with the same id exists, its quantity is
    /// incremented by the incoming quantity; otherwise the line is appended.
    pub fn add_item(&mut self, line: CartLine) {
        if let Some(existing) = self.items.iter_mut().find(|l| l.id == line.id) {
            existing.quantity += line.quantity;
        } else {
            self.items.push(line);
        }
    }

    /// Remove the line with the given id. No-op when absent.
    pub fn remove_item(&mut self, id: ItemId) {
        self.items.retain(|l| l.id != id);
    }

    /// Set the quantity of an existing line as given, including zero and
    /// negative values. No line is created when the id is absent.
    pub fn update_quantity(&mut self, id: ItemId, quantity: i64) {
        if let Some(line) = self.items.iter_mut().find(|l| l.id == id) {
            line.quantity = quantity;
        }
    }

    /// Empty the cart.
    pub fn clear(&mut self) {
        self.items.clear();
    }

    /// Snapshot of the current lines.
    #[must_use]
    pub fn lines(&self) -> Vec<CartLine> {
        self.items.clone()
    }

    /// Sum of `price * quantity` over all lines.
    #[must_use]
    pub fn subtotal(&self) -> Decimal {
        self.items.iter().map(CartLine::line_total).sum()
    }

    /// Sum of quantities over all lines.
    #[must_use]
    pub fn total_quantity(&self) -> i64 {
        self.items.iter().map(|l| l.quantity).sum()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.items.is_empty()
    }
}

/// Session cart store.
///
/// Cheaply cloneable; all clones share one state. Mutations notify watchers
/// with a full line-list snapshot and mirror the operation to the configured
/// persistence backend.
#[derive(Clone)]
pub struct CartStore {
    inner: Arc<CartStoreInner>,
}

struct CartStoreInner {
    state: RwLock<CartState>,
    watch_tx: watch::Sender<Vec<CartLine>>,
    backend: CartBackend,
}

impl Default for CartStore {
    fn default() -> Self {
        Self::new(CartBackend::Disabled)
    }
}

impl CartStore {
    /// Create a cart store with the given persistence backend.
    #[must_use]
    pub fn new(backend: CartBackend) -> Self {
        let (watch_tx, _) = watch::channel(Vec::new());
        Self {
            inner: Arc::new(CartStoreInner {
                state: RwLock::new(CartState::default()),
                watch_tx,
                backend,
            }),
        }
    }

    /// Subscribe to cart changes. Each mutation publishes a full snapshot of
    /// the line list.
    #[must_use]
    pub fn subscribe(&self) -> watch::Receiver<Vec<CartLine>> {
        self.inner.watch_tx.subscribe()
    }

    /// Hydrate the cart from the persistence backend, replacing the current
    /// lines when a persisted cart exists. Backend failures are recorded on
    /// the error flag but never returned.
    #[instrument(skip(self))]
    pub async fn load_persisted(&self) {
        self.mutate(|state| {
            state.loading = true;
            state.error = None;
        });

        match self.inner.backend.load().await {
            Ok(Some(lines)) => {
                self.mutate(|state| {
                    state.items = lines;
                    state.loading = false;
                });
            }
            Ok(None) => {
                self.mutate(|state| state.loading = false);
            }
            Err(e) => {
                warn!(error = %e, "Failed to load persisted cart");
                self.mutate(|state| {
                    state.loading = false;
                    state.error = Some(e.to_string());
                });
            }
        }
    }

    /// Add a line, merging quantities on duplicate id.
    #[instrument(skip(self, line), fields(id = %line.id))]
    pub async fn add_item(&self, line: CartLine) {
        self.mutate(|state| {
            state.add_item(line.clone());
            state.loading = true;
            state.error = None;
        });
        let result = self.inner.backend.add(&line).await;
        self.finish_mirror("add", result);
    }

    /// Remove the line with the given id. No-op when absent.
    #[instrument(skip(self))]
    pub async fn remove_item(&self, id: ItemId) {
        self.mutate(|state| {
            state.remove_item(id);
            state.loading = true;
            state.error = None;
        });
        let result = self.inner.backend.remove(id).await;
        self.finish_mirror("remove", result);
    }

    /// Set the quantity of an existing line as given.
    #[instrument(skip(self))]
    pub async fn update_quantity(&self, id: ItemId, quantity: i64) {
        self.mutate(|state| {
            state.update_quantity(id, quantity);
            state.loading = true;
            state.error = None;
        });
        let result = self.inner.backend.update(id, quantity).await;
        self.finish_mirror("update", result);
    }

    /// Empty the cart.
    #[instrument(skip(self))]
    pub async fn clear(&self) {
        self.mutate(|state| {
            state.clear();
            state.loading = true;
            state.error = None;
        });
        let result = self.inner.backend.clear().await;
        self.finish_mirror("clear", result);
    }

    fn finish_mirror(&self, op: &str, result: Result<(), PersistError>) {
        match result {
            Ok(()) => self.mutate(|state| state.loading = false),
            Err(e) => {
                warn!(error = %e, op, "Failed to mirror cart operation");
                self.mutate(|state| {
                    state.loading = false;
                    state.error = Some(e.to_string());
                });
            }
        }
    }

    /// Snapshot of the current lines.
    #[must_use]
    pub fn lines(&self) -> Vec<CartLine> {
        self.read(CartState::lines)
    }

    /// Sum of `price * quantity` over all lines.
    #[must_use]
    pub fn subtotal(&self) -> Decimal {
        self.read(CartState::subtotal)
    }

    /// Sum of quantities over all lines.
    #[must_use]
    pub fn total_quantity(&self) -> i64 {
        self.read(CartState::total_quantity)
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.read(CartState::is_empty)
    }

    /// Whether a load or mirror operation is in flight.
    #[must_use]
    pub fn is_loading(&self) -> bool {
        self.read(|state| state.loading)
    }

    /// The last persistence error, if any.
    #[must_use]
    pub fn error(&self) -> Option<String> {
        self.read(|state| state.error.clone())
    }

    fn read<R>(&self, f: impl FnOnce(&CartState) -> R) -> R {
        let guard = self
            .inner
            .state
            .read()
            .unwrap_or_else(PoisonError::into_inner);
        f(&guard)
    }

    fn mutate(&self, f: impl FnOnce(&mut CartState)) {
        let snapshot = {
            let mut guard = self
                .inner
                .state
                .write()
                .unwrap_or_else(PoisonError::into_inner);
            f(&mut guard);
            guard.lines()
        };
        // Watchers may all be gone; that is fine
        let _ = self.inner.watch_tx.send(snapshot);
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;
    use rust_decimal_macros::dec;

    fn line(id: i64, price: Decimal, quantity: i64) -> CartLine {
        CartLine {
            id: ItemId::new(id),
            name: format!("Item {id}"),
            price,
            quantity,
            image: String::new(),
        }
    }

    #[test]
    fn test_add_item_merges_duplicate_ids() {
        let mut state = CartState::default();
        state.add_item(line(1, dec!(10), 2));
        state.add_item(line(1, dec!(10), 3));

        let lines = state.lines();
        assert_eq!(lines.len(), 1);
        assert_eq!(lines[0].quantity, 5);
    }

    #[test]
    fn test_add_item_appends_new_ids() {
        let mut state = CartState::default();
        state.add_item(line(1, dec!(10), 1));
        state.add_item(line(2, dec!(5), 1));
        assert_eq!(state.lines().len(), 2);
    }

    #[test]
    fn test_remove_item_is_idempotent() {
        let mut state = CartState::default();
        state.add_item(line(1, dec!(10), 1));
        state.remove_item(ItemId::new(1));
        state.remove_item(ItemId::new(1));
        assert!(state.is_empty());
    }

    #[test]
    fn test_update_quantity_sets_as_given() {
        let mut state = CartState::default();
        state.add_item(line(1, dec!(10), 2));

        state.update_quantity(ItemId::new(1), 7);
        assert_eq!(state.lines()[0].quantity, 7);

        // Zero and negative values are permitted; zero does not remove
        state.update_quantity(ItemId::new(1), 0);
        assert_eq!(state.lines()[0].quantity, 0);
        state.update_quantity(ItemId::new(1), -2);
        assert_eq!(state.lines()[0].quantity, -2);
    }

    #[test]
    fn test_update_quantity_does_not_create_lines() {
        let mut state = CartState::default();
        state.update_quantity(ItemId::new(99), 3);
        assert!(state.is_empty());
    }

    #[test]
    fn test_subtotal_and_total_quantity() {
        let mut state = CartState::default();
        state.add_item(line(1, dec!(10), 2));
        state.add_item(line(2, dec!(5), 1));

        assert_eq!(state.subtotal(), dec!(25));
        assert_eq!(state.total_quantity(), 3);
    }

    #[test]
    fn test_clear_empties_cart() {
        let mut state = CartState::default();
        state.add_item(line(1, dec!(10), 2));
        state.clear();
        assert!(state.is_empty());
        assert_eq!(state.subtotal(), Decimal::ZERO);
    }

    #[tokio::test]
    async fn test_store_mutations_notify_watchers() {
        let store = CartStore::default();
        let mut rx = store.subscribe();

        store.add_item(line(1, dec!(10), 2)).await;
        rx.changed().await.unwrap();
        assert_eq!(rx.borrow().len(), 1);

        store.clear().await;
        rx.changed().await.unwrap();
        assert!(rx.borrow().is_empty());
    }

    #[tokio::test]
    async fn test_store_hydrates_from_local_slot() {
        let path = std::env::temp_dir().join(format!(
            "charcoal-cart-hydrate-{}.json",
            std::process::id()
        ));
        let _ = std::fs::remove_file(&path);
        let slot = LocalCartSlot::new(path);
        slot.add(&line(1, dec!(10), 2)).await.unwrap();

        let store = CartStore::new(CartBackend::Local(slot));
        store.load_persisted().await;

        assert_eq!(store.lines().len(), 1);
        assert_eq!(store.total_quantity(), 2);
        assert!(!store.is_loading());
        assert!(store.error().is_none());
    }

    #[tokio::test]
    async fn test_store_round_trips_through_local_slot() {
        let path = std::env::temp_dir().join(format!(
            "charcoal-cart-roundtrip-{}.json",
            std::process::id()
        ));
        let _ = std::fs::remove_file(&path);

        let store = CartStore::new(CartBackend::Local(LocalCartSlot::new(path.clone())));
        store.add_item(line(1, dec!(10), 1)).await;
        store.add_item(line(2, dec!(4), 2)).await;
        store.remove_item(ItemId::new(1)).await;

        let rehydrated = CartStore::new(CartBackend::Local(LocalCartSlot::new(path)));
        rehydrated.load_persisted().await;
        let lines = rehydrated.lines();
        assert_eq!(lines.len(), 1);
        assert_eq!(lines[0].id, ItemId::new(2));
    }
}
