//! Integration tests for catalog ingest over the bundled dataset.

#![allow(clippy::unwrap_used)]

use charcoal_core::ItemId;
use charcoal_integration_tests::local_session;
use rust_decimal_macros::dec;

#[tokio::test]
async fn test_categories_follow_document_order() {
    let state = local_session();
    state.menu().fetch_menu().await.unwrap();

    let names: Vec<String> = state
        .menu()
        .categories()
        .into_iter()
        .map(|c| c.name)
        .collect();
    assert_eq!(names, ["Starters", "Mains", "Sides", "Desserts", "Drinks"]);

    let ids: Vec<String> = state
        .menu()
        .categories()
        .into_iter()
        .map(|c| c.id)
        .collect();
    assert_eq!(ids[0], "starters");
}

#[tokio::test]
async fn test_prices_parse_from_strings_and_numbers() {
    let state = local_session();
    state.menu().fetch_menu().await.unwrap();

    // String price with decimals
    let leeks = state.menu().item_by_id(ItemId::new(101)).unwrap();
    assert_eq!(leeks.price, dec!(9.50));

    // Bare numeric price
    let chicken = state.menu().item_by_id(ItemId::new(202)).unwrap();
    assert_eq!(chicken.price, dec!(21));
}

#[tokio::test]
async fn test_dietary_flags_become_tags() {
    let state = local_session();
    state.menu().fetch_menu().await.unwrap();

    let leeks = state.menu().item_by_id(ItemId::new(101)).unwrap();
    assert!(leeks.tags.contains(&"vegan".to_string()));
    // Vegan implies vegetarian
    assert!(leeks.tags.contains(&"vegetarian".to_string()));
    assert!(leeks.tags.contains(&"gluten-free".to_string()));
    assert!(leeks.tags.contains(&"leeks".to_string()));

    let beets = state.menu().item_by_id(ItemId::new(102)).unwrap();
    assert!(beets.tags.contains(&"vegetarian".to_string()));
    assert!(!beets.tags.contains(&"vegan".to_string()));
}

#[tokio::test]
async fn test_optional_facts_carry_through() {
    let state = local_session();
    state.menu().fetch_menu().await.unwrap();

    let brisket = state.menu().item_by_id(ItemId::new(201)).unwrap();
    assert_eq!(brisket.calories, Some(820));
    assert_eq!(brisket.nutrition.unwrap().protein, "52g");
    assert_eq!(brisket.allergens, ["gluten"]);
    assert!(brisket.pairings.contains(&"Smoked Porter".to_string()));

    // Drinks carry no facts at all and still ingest
    let porter = state.menu().item_by_id(ItemId::new(501)).unwrap();
    assert!(porter.calories.is_none());
    assert!(porter.nutrition.is_none());
    assert!(porter.available);
}

#[tokio::test]
async fn test_items_by_category_partitions_the_catalog() {
    let state = local_session();
    state.menu().fetch_menu().await.unwrap();

    let total: usize = state
        .menu()
        .categories()
        .iter()
        .map(|c| state.menu().items_by_category(&c.name).len())
        .sum();
    assert_eq!(total, state.menu().items().len());
}
