//! Integration tests for whole-session bootstrap.
//!
//! These run entirely against the bundled datasets; no network or backend
//! is required.

#![allow(clippy::unwrap_used)]

use charcoal_integration_tests::{local_config, local_session, temp_cart_file};
use charcoal_storefront::search::IndexStatus;
use charcoal_storefront::state::AppState;

#[tokio::test]
async fn test_bootstrap_populates_every_store() {
    let state = local_session();
    state.bootstrap().await.unwrap();

    assert!(!state.menu().items().is_empty());
    assert!(!state.menu().categories().is_empty());
    assert!(state.content().is_loaded());
    assert!(state.cart().is_empty());
    assert_eq!(state.search().status(), IndexStatus::Ready);
    assert_eq!(
        state.search().num_docs(),
        state.menu().items().len() as u64
    );
}

#[tokio::test]
async fn test_bootstrap_is_idempotent() {
    let state = local_session();
    state.bootstrap().await.unwrap();
    let items_before = state.menu().items().len();

    state.bootstrap().await.unwrap();
    assert_eq!(state.menu().items().len(), items_before);
    assert_eq!(state.search().status(), IndexStatus::Ready);
}

#[tokio::test]
async fn test_bootstrap_hydrates_persisted_cart() {
    let path = temp_cart_file("bootstrap-hydrate");
    let mut config = local_config();
    config.cart_file = Some(path.clone());

    // First session: put something in the cart
    let first = AppState::new(config.clone());
    first.bootstrap().await.unwrap();
    first
        .cart()
        .add_item(charcoal_core::CartLine {
            id: charcoal_core::ItemId::new(201),
            name: "Smoked Brisket Plate".to_string(),
            price: rust_decimal_macros::dec!(18.50),
            quantity: 2,
            image: String::new(),
        })
        .await;

    // Second session over the same file picks the cart back up
    let second = AppState::new(config);
    second.bootstrap().await.unwrap();
    assert_eq!(second.cart().total_quantity(), 2);
    assert_eq!(second.cart().subtotal(), rust_decimal_macros::dec!(37.00));
}

#[tokio::test]
async fn test_clones_observe_shared_stores() {
    let state = local_session();
    let clone = state.clone();
    state.bootstrap().await.unwrap();

    assert!(!clone.menu().items().is_empty());
    assert!(clone.content().is_loaded());
    assert_eq!(clone.search().status(), IndexStatus::Ready);
}
