//! Cart persistence backends.
//!
//! The in-memory cart is authoritative; a backend only mirrors it so a
//! session can be rehydrated later. Every method mirrors one cart operation
//! so the remote backend can forward the operation instead of replaying the
//! whole line list.

use std::path::PathBuf;

use charcoal_core::CartLine;
use charcoal_core::ItemId;
use thiserror::Error;
use tracing::debug;

use crate::client::{ApiClient, ApiError};
use crate::config::StorefrontConfig;

/// Errors from a persistence backend. Callers log these and move on; they
/// are never surfaced to the session.
#[derive(Debug, Error)]
pub enum PersistError {
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),
    #[error("JSON error: {0}")]
    Serde(#[from] serde_json::Error),
    #[error("API error: {0}")]
    Api(#[from] ApiError),
}

/// A cart persistence backend.
pub trait CartPersistence {
    /// Load the persisted line list, if any.
    async fn load(&self) -> Result<Option<Vec<CartLine>>, PersistError>;
    /// Mirror an add (merge-on-duplicate) operation.
    async fn add(&self, line: &CartLine) -> Result<(), PersistError>;
    /// Mirror a remove operation.
    async fn remove(&self, id: ItemId) -> Result<(), PersistError>;
    /// Mirror a quantity update.
    async fn update(&self, id: ItemId, quantity: i64) -> Result<(), PersistError>;
    /// Mirror a clear operation.
    async fn clear(&self) -> Result<(), PersistError>;
}

// =============================================================================
// LocalCartSlot
// =============================================================================

/// A JSON file holding the cart line list.
///
/// Each mirrored operation reads the slot, applies the operation, and writes
/// the result back, so the slot stays consistent even if the process dies
/// between operations.
#[derive(Debug, Clone)]
pub struct LocalCartSlot {
    path: PathBuf,
}

impl LocalCartSlot {
    #[must_use]
    pub const fn new(path: PathBuf) -> Self {
        Self { path }
    }

    async fn read_lines(&self) -> Result<Vec<CartLine>, PersistError> {
        match tokio::fs::read_to_string(&self.path).await {
            Ok(text) => Ok(serde_json::from_str(&text)?),
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => Ok(Vec::new()),
            Err(e) => Err(e.into()),
        }
    }

    async fn write_lines(&self, lines: &[CartLine]) -> Result<(), PersistError> {
        let text = serde_json::to_string(lines)?;
        tokio::fs::write(&self.path, text).await?;
        Ok(())
    }
}

impl CartPersistence for LocalCartSlot {
    async fn load(&self) -> Result<Option<Vec<CartLine>>, PersistError> {
        match tokio::fs::read_to_string(&self.path).await {
            Ok(text) => Ok(Some(serde_json::from_str(&text)?)),
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => Ok(None),
            Err(e) => Err(e.into()),
        }
    }

    async fn add(&self, line: &CartLine) -> Result<(), PersistError> {
        let mut lines = self.read_lines().await?;
        if let Some(existing) = lines.iter_mut().find(|l| l.id == line.id) {
            existing.quantity += line.quantity;
        } else {
            lines.push(line.clone());
        }
        self.write_lines(&lines).await
    }

    async fn remove(&self, id: ItemId) -> Result<(), PersistError> {
        let mut lines = self.read_lines().await?;
        lines.retain(|l| l.id != id);
        self.write_lines(&lines).await
    }

    async fn update(&self, id: ItemId, quantity: i64) -> Result<(), PersistError> {
        let mut lines = self.read_lines().await?;
        if let Some(line) = lines.iter_mut().find(|l| l.id == id) {
            line.quantity = quantity;
        }
        self.write_lines(&lines).await
    }

    async fn clear(&self) -> Result<(), PersistError> {
        self.write_lines(&[]).await
    }
}

// =============================================================================
// RemoteCart
// =============================================================================

/// REST mirror of the cart endpoints.
#[derive(Clone)]
pub struct RemoteCart {
    client: ApiClient,
    /// Cart resource URL; operation URLs are derived by appending
    /// `/add`, `/remove/{id}`, `/update`, `/clear`.
    cart_url: String,
}

impl RemoteCart {
    #[must_use]
    pub fn new(client: ApiClient, config: &StorefrontConfig) -> Self {
        Self {
            client,
            cart_url: config.cart_url(),
        }
    }
}

impl CartPersistence for RemoteCart {
    async fn load(&self) -> Result<Option<Vec<CartLine>>, PersistError> {
        let value = self.client.get_json_fresh(&self.cart_url).await?;
        let lines: Vec<CartLine> = serde_json::from_value(value)?;
        Ok(Some(lines))
    }

    async fn add(&self, line: &CartLine) -> Result<(), PersistError> {
        let url = format!("{}/add", self.cart_url);
        self.client.post_json(&url, line).await?;
        Ok(())
    }

    async fn remove(&self, id: ItemId) -> Result<(), PersistError> {
        let url = format!("{}/remove/{}", self.cart_url, id.as_i64());
        self.client.delete(&url).await?;
        Ok(())
    }

    async fn update(&self, id: ItemId, quantity: i64) -> Result<(), PersistError> {
        let url = format!("{}/update", self.cart_url);
        let body = serde_json::json!({ "id": id, "quantity": quantity });
        self.client.patch_json(&url, &body).await?;
        Ok(())
    }

    async fn clear(&self) -> Result<(), PersistError> {
        let url = format!("{}/clear", self.cart_url);
        self.client.delete(&url).await?;
        Ok(())
    }
}

// =============================================================================
// CartBackend
// =============================================================================

/// The configured persistence backend, or none at all.
#[derive(Clone, Default)]
pub enum CartBackend {
    /// Keep the cart purely in memory.
    #[default]
    Disabled,
    Local(LocalCartSlot),
    Remote(RemoteCart),
}

impl CartPersistence for CartBackend {
    async fn load(&self) -> Result<Option<Vec<CartLine>>, PersistError> {
        match self {
            Self::Disabled => {
                debug!("Cart persistence disabled, nothing to load");
                Ok(None)
            }
            Self::Local(slot) => slot.load().await,
            Self::Remote(remote) => remote.load().await,
        }
    }

    async fn add(&self, line: &CartLine) -> Result<(), PersistError> {
        match self {
            Self::Disabled => Ok(()),
            Self::Local(slot) => slot.add(line).await,
            Self::Remote(remote) => remote.add(line).await,
        }
    }

    async fn remove(&self, id: ItemId) -> Result<(), PersistError> {
        match self {
            Self::Disabled => Ok(()),
            Self::Local(slot) => slot.remove(id).await,
            Self::Remote(remote) => remote.remove(id).await,
        }
    }

    async fn update(&self, id: ItemId, quantity: i64) -> Result<(), PersistError> {
        match self {
            Self::Disabled => Ok(()),
            Self::Local(slot) => slot.update(id, quantity).await,
            Self::Remote(remote) => remote.update(id, quantity).await,
        }
    }

    async fn clear(&self) -> Result<(), PersistError> {
        match self {
            Self::Disabled => Ok(()),
            Self::Local(slot) => slot.clear().await,
            Self::Remote(remote) => remote.clear().await,
        }
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;
    use rust_decimal_macros::dec;

    fn line(id: i64, quantity: i64) -> CartLine {
        CartLine {
            id: ItemId::new(id),
            name: format!("Item {id}"),
            price: dec!(10),
            quantity,
            image: String::new(),
        }
    }

    fn temp_slot(tag: &str) -> LocalCartSlot {
        let path = std::env::temp_dir().join(format!("charcoal-cart-{tag}-{}.json", std::process::id()));
        let _ = std::fs::remove_file(&path);
        LocalCartSlot::new(path)
    }

    #[tokio::test]
    async fn test_local_slot_load_missing_file() {
        let slot = temp_slot("missing");
        assert!(slot.load().await.unwrap().is_none());
    }

    #[tokio::test]
    async fn test_local_slot_add_merges_quantities() {
        let slot = temp_slot("merge");
        slot.add(&line(1, 2)).await.unwrap();
        slot.add(&line(1, 3)).await.unwrap();

        let lines = slot.load().await.unwrap().unwrap();
        assert_eq!(lines.len(), 1);
        assert_eq!(lines[0].quantity, 5);
    }

    #[tokio::test]
    async fn test_local_slot_remove_and_clear() {
        let slot = temp_slot("remove");
        slot.add(&line(1, 1)).await.unwrap();
        slot.add(&line(2, 1)).await.unwrap();

        slot.remove(ItemId::new(1)).await.unwrap();
        let lines = slot.load().await.unwrap().unwrap();
        assert_eq!(lines.len(), 1);
        assert_eq!(lines[0].id, ItemId::new(2));

        slot.clear().await.unwrap();
        assert!(slot.load().await.unwrap().unwrap().is_empty());
    }

    #[tokio::test]
    async fn test_local_slot_update_misses_are_no_ops() {
        let slot = temp_slot("update-miss");
        slot.add(&line(1, 1)).await.unwrap();
        slot.update(ItemId::new(99), 7).await.unwrap();

        let lines = slot.load().await.unwrap().unwrap();
        assert_eq!(lines.len(), 1);
        assert_eq!(lines[0].quantity, 1);
    }

    #[tokio::test]
    async fn test_disabled_backend_is_silent() {
        let backend = CartBackend::Disabled;
        assert!(backend.load().await.unwrap().is_none());
        backend.add(&line(1, 1)).await.unwrap();
        backend.clear().await.unwrap();
    }
}
