//! Integration tests for site content mapping over the bundled document.

#![allow(clippy::unwrap_used)]

use charcoal_integration_tests::local_session;

#[tokio::test]
async fn test_bundled_document_maps_completely() {
    let state = local_session();
    state.content().fetch_content().await.unwrap();
    let content = state.content().content();

    assert_eq!(content.brand.name, "Charcoal Kitchen");
    assert_eq!(content.brand.logo_icon, "flame");
    assert_eq!(content.navigation.links.len(), 9);
    assert!(content.navigation.links.iter().all(|l| l.enabled));

    assert_eq!(content.hero.banners.len(), 3);
    assert_eq!(content.hero.autoplay_interval_ms, 5000);
    assert_eq!(content.hero.banners[0].title, "Cooked Over Fire");

    assert_eq!(content.story.title, "Fire First");
    assert_eq!(content.story.values.len(), 3);
}

#[tokio::test]
async fn test_collections_get_positional_ids() {
    let state = local_session();
    state.content().fetch_content().await.unwrap();
    let content = state.content().content();

    let gallery_ids: Vec<i64> = content.gallery.images.iter().map(|i| i.id.as_i64()).collect();
    assert_eq!(gallery_ids, [1, 2, 3, 4]);

    let event_ids: Vec<i64> = content.events.items.iter().map(|e| e.id.as_i64()).collect();
    assert_eq!(event_ids, [1, 2, 3]);

    let post = &content.blog.posts[0];
    assert_eq!(post.id.as_i64(), 1);
    assert_eq!(post.excerpt, "The case for a single wood");
    assert_eq!(post.author, "R. Calder");
    assert_eq!(post.read_time, "4 min");
}

#[tokio::test]
async fn test_reservation_and_contact_views() {
    let state = local_session();
    state.content().fetch_content().await.unwrap();
    let content = state.content().content();

    assert_eq!(content.reservation.hours.weekday, "Mon-Fri: 5:00 PM - 10:00 PM");
    assert_eq!(content.reservation.location.street, "14 Ember Lane");
    assert_eq!(content.reservation.phone, "(503) 555-0140");
    assert_eq!(content.reservation.note, "Parties of 8 or more, please call ahead.");

    assert_eq!(content.contact.phone_numbers.len(), 2);
    assert_eq!(content.contact.address.display(), "14 Ember Lane, Portland, OR");

    let location = &content.contact.locations[0];
    assert_eq!(location.name, "Pearl District");
    assert_eq!(location.phone, "(503) 555-0140");
    assert_eq!(
        location.hours,
        "Mon-Fri: 5:00 PM - 10:00 PM; Sat: 12:00 PM - 11:00 PM"
    );
}

#[tokio::test]
#[ignore = "Requires a running content endpoint"]
async fn test_fetch_single_section_from_live_backend() {
    let state = charcoal_storefront::state::AppState::from_env().unwrap();
    let gallery = state.content().fetch_section("gallery").await.unwrap();
    assert!(gallery.is_object() || gallery.is_array());
}

#[tokio::test]
async fn test_tree_is_usable_before_any_fetch() {
    let state = local_session();
    let content = state.content().content();

    // Everything renders from defaults before the first fetch
    assert!(!state.content().is_loaded());
    assert!(!content.brand.name.is_empty());
    assert!(!content.navigation.links.is_empty());
    assert!(!content.footer.copyright.is_empty());
}
