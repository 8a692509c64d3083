//! Site content mappers.
//!
//! One pure mapper per branch of the canonical tree. Each takes the branch's
//! raw JSON (or nothing) and always produces a fully-populated value, pulling
//! missing leaves from the defaults table. Mapping never fails.

use charcoal_core::{
    Address, Blog, BlogPost, BlogPostId, Brand, Contact, Event, EventId, Events, Footer, Gallery,
    GalleryImage, GalleryImageId, Hero, HeroBanner, Hours, Location, LocationId, NavLink,
    Navigation, Reservation, SiteContent, Story, StoryValue,
};
use serde_json::Value;

use super::defaults;

/// Map a raw site-content document to the canonical tree.
#[must_use]
pub fn map_site_content(doc: &Value) -> SiteContent {
    SiteContent {
        brand: map_brand(doc.get("brand")),
        navigation: map_navigation(doc.get("navigation")),
        hero: map_hero(doc.get("hero")),
        story: map_story(doc.get("story")),
        gallery: map_gallery(doc.get("gallery")),
        events: map_events(doc.get("events")),
        blog: map_blog(doc.get("blog")),
        reservation: map_reservation(doc.get("reservation")),
        contact: map_contact(doc.get("contact")),
        footer: map_footer(doc.get("footer")),
    }
}

pub(crate) fn map_brand(raw: Option<&Value>) -> Brand {
    Brand {
        name: str_at(raw, &["name"], defaults::BRAND_NAME),
        logo_icon: str_at(raw, &["logo", "icon"], defaults::LOGO_ICON),
        logo_text: str_at(raw, &["logo", "text"], defaults::LOGO_TEXT),
    }
}

pub(crate) fn map_navigation(raw: Option<&Value>) -> Navigation {
    let links = raw
        .and_then(|v| v.get("links"))
        .and_then(Value::as_array)
        .map(|links| {
            links
                .iter()
                .map(|link| NavLink {
                    label: str_at(Some(link), &["label"], ""),
                    path: str_at(Some(link), &["path"], ""),
                    enabled: bool_at(Some(link), &["isEnabled"], true),
                })
                .collect::<Vec<_>>()
        })
        .filter(|links| !links.is_empty())
        .unwrap_or_else(defaults::default_nav_links);

    Navigation { links }
}

pub(crate) fn map_hero(raw: Option<&Value>) -> Hero {
    let banners = raw
        .and_then(|v| v.get("banners"))
        .and_then(Value::as_array)
        .map(|banners| {
            banners
                .iter()
                .map(|banner| HeroBanner {
                    title: str_at(Some(banner), &["title"], ""),
                    subtitle: str_at(Some(banner), &["subtitle"], ""),
                    image: str_at(Some(banner), &["image"], ""),
                })
                .collect()
        })
        .unwrap_or_default();

    Hero {
        banners,
        autoplay_interval_ms: raw
            .and_then(|v| v.get("autoplayInterval"))
            .and_then(Value::as_u64)
            .unwrap_or(defaults::AUTOPLAY_INTERVAL_MS),
    }
}

pub(crate) fn map_story(raw: Option<&Value>) -> Story {
    let values = raw
        .and_then(|v| v.get("values"))
        .and_then(Value::as_array)
        .map(|values| {
            values
                .iter()
                .map(|value| StoryValue {
                    icon: str_at(Some(value), &["icon"], ""),
                    title: str_at(Some(value), &["title"], ""),
                    description: str_at(Some(value), &["description"], ""),
                })
                .collect()
        })
        .unwrap_or_default();

    Story {
        title: str_at(raw, &["hero", "title"], ""),
        description: str_at(raw, &["hero", "description"], ""),
        image: str_at(raw, &["hero", "image"], ""),
        values,
    }
}

pub(crate) fn map_gallery(raw: Option<&Value>) -> Gallery {
    let images = raw
        .and_then(|v| v.get("images"))
        .and_then(Value::as_array)
        .map(|images| {
            images
                .iter()
                .enumerate()
                .map(|(index, image)| GalleryImage {
                    // Positional ids, 1-based, like the source feed
                    id: GalleryImageId::new(index as i64 + 1),
                    title: str_at(Some(image), &["title"], ""),
                    description: str_at(Some(image), &["description"], ""),
                    image: str_at(Some(image), &["image"], ""),
                })
                .collect()
        })
        .unwrap_or_default();

    Gallery {
        title: str_at(raw, &["section", "title"], ""),
        subtitle: str_at(raw, &["section", "subtitle"], ""),
        images,
    }
}

pub(crate) fn map_events(raw: Option<&Value>) -> Events {
    let items = raw
        .and_then(|v| v.get("items"))
        .and_then(Value::as_array)
        .map(|items| {
            items
                .iter()
                .enumerate()
                .map(|(index, event)| Event {
                    id: EventId::new(index as i64 + 1),
                    title: str_at(Some(event), &["title"], ""),
                    description: str_at(Some(event), &["description"], ""),
                    date: str_at(Some(event), &["date"], ""),
                    time: str_at(Some(event), &["time"], ""),
                    location: str_at(Some(event), &["location"], ""),
                    image: str_at(Some(event), &["image"], ""),
                })
                .collect()
        })
        .unwrap_or_default();

    Events {
        title: str_at(raw, &["section", "title"], ""),
        subtitle: str_at(raw, &["section", "subtitle"], ""),
        items,
    }
}

pub(crate) fn map_blog(raw: Option<&Value>) -> Blog {
    let posts = raw
        .and_then(|v| v.get("posts"))
        .and_then(Value::as_array)
        .map(|posts| {
            posts
                .iter()
                .enumerate()
                .map(|(index, post)| BlogPost {
                    id: BlogPostId::new(index as i64 + 1),
                    title: str_at(Some(post), &["title"], ""),
                    excerpt: str_at(Some(post), &["subtitle"], ""),
                    content: str_at(Some(post), &["content"], ""),
                    author: str_at(Some(post), &["chef"], ""),
                    date: str_at(Some(post), &["date"], ""),
                    image: str_at(Some(post), &["image"], ""),
                    read_time: str_at(Some(post), &["readTime"], ""),
                })
                .collect()
        })
        .unwrap_or_default();

    Blog {
        title: str_at(raw, &["header", "title"], ""),
        description: str_at(raw, &["header", "description"], ""),
        posts,
    }
}

pub(crate) fn map_reservation(raw: Option<&Value>) -> Reservation {
    let info = raw.and_then(|v| v.get("info"));

    Reservation {
        title: str_at(raw, &["header", "title"], defaults::RESERVATION_TITLE),
        description: str_at(raw, &["header", "description"], ""),
        hours: map_labeled_hours(info.and_then(|v| v.get("hours"))),
        location: Address {
            street: str_at(info, &["location", "street"], ""),
            city: str_at(info, &["location", "city"], ""),
            state: str_at(info, &["location", "state"], ""),
            zip: str_at(info, &["location", "zip"], ""),
        },
        phone: str_at(info, &["contact", "phone"], ""),
        note: str_at(info, &["note"], defaults::RESERVATION_NOTE),
    }
}

/// Reservation hours arrive as `{label, time}` pairs per day group; the
/// display string is `label: time`.
fn map_labeled_hours(raw: Option<&Value>) -> Hours {
    let labeled = |group: &str, default: &str| -> String {
        let label = str_at(raw, &[group, "label"], "");
        let time = str_at(raw, &[group, "time"], "");
        if label.is_empty() || time.is_empty() {
            default.to_string()
        } else {
            format!("{label}: {time}")
        }
    };

    Hours {
        weekday: labeled("weekdays", defaults::WEEKDAY_HOURS),
        weekend: labeled("weekends", defaults::WEEKEND_HOURS),
        sunday: labeled("sunday", defaults::SUNDAY_HOURS),
    }
}

pub(crate) fn map_contact(raw: Option<&Value>) -> Contact {
    let cards = raw.and_then(|v| v.get("infoCards"));

    let phone_numbers = strings_at(cards, &["phone", "numbers"]);
    let email_addresses = strings_at(cards, &["email", "addresses"]);
    let address = Address {
        street: str_at(cards, &["address", "street"], ""),
        city: str_at(cards, &["address", "city"], ""),
        state: str_at(cards, &["address", "state"], ""),
        zip: str_at(cards, &["address", "zip"], ""),
    };
    let hours = Hours {
        weekday: str_at(cards, &["hours", "weekday"], defaults::WEEKDAY_HOURS),
        weekend: str_at(cards, &["hours", "weekend"], defaults::WEEKEND_HOURS),
        sunday: str_at(cards, &["hours", "note"], defaults::SUNDAY_HOURS),
    };

    // The feed describes a single location through the address card
    let location = Location {
        id: LocationId::new(1),
        name: str_at(cards, &["address", "label"], defaults::LOCATION_NAME),
        address: address.display(),
        phone: phone_numbers.first().cloned().unwrap_or_default(),
        hours: format!("{}; {}", hours.weekday, hours.weekend),
        image: String::new(),
    };

    Contact {
        title: str_at(raw, &["header", "title"], defaults::CONTACT_TITLE),
        subtitle: str_at(raw, &["header", "subtitle"], ""),
        phone_numbers,
        email_addresses,
        address,
        hours,
        locations: vec![location],
    }
}

pub(crate) fn map_footer(raw: Option<&Value>) -> Footer {
    Footer {
        tagline: str_at(raw, &["tagline"], defaults::FOOTER_TAGLINE),
        copyright: str_at(raw, &["copyright"], defaults::FOOTER_COPYRIGHT),
    }
}

// =============================================================================
// Leaf helpers
// =============================================================================

fn value_at<'a>(raw: Option<&'a Value>, path: &[&str]) -> Option<&'a Value> {
    let mut current = raw?;
    for key in path {
        current = current.get(key)?;
    }
    Some(current)
}

fn str_at(raw: Option<&Value>, path: &[&str], default: &str) -> String {
    value_at(raw, path)
        .and_then(Value::as_str)
        .filter(|s| !s.is_empty())
        .unwrap_or(default)
        .to_string()
}

fn bool_at(raw: Option<&Value>, path: &[&str], default: bool) -> bool {
    value_at(raw, path)
        .and_then(Value::as_bool)
        .unwrap_or(default)
}

fn strings_at(raw: Option<&Value>, path: &[&str]) -> Vec<String> {
    value_at(raw, path)
        .and_then(Value::as_array)
        .map(|values| {
            values
                .iter()
                .filter_map(Value::as_str)
                .map(String::from)
                .collect()
        })
        .unwrap_or_default()
}
