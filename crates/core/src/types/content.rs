//! Canonical site-content tree.
//!
//! A read-mostly structure consumed by display surfaces: hero carousel,
//! story, gallery, events, blog, reservation, contact, and footer. The
//! content ingest step maps a raw payload into this shape and defaults
//! every branch the source omits, so downstream consumers never need
//! null-checks beyond "is this section enabled". Fetched once per session;
//! a re-fetch replaces the tree wholesale.

use serde::{Deserialize, Serialize};

use crate::types::id::{BlogPostId, EventId, GalleryImageId, LocationId};

/// The full site-content tree.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct SiteContent {
    pub brand: Brand,
    pub navigation: Navigation,
    pub hero: Hero,
    pub story: Story,
    pub gallery: Gallery,
    pub events: Events,
    pub blog: Blog,
    pub reservation: Reservation,
    pub contact: Contact,
    pub footer: Footer,
}

/// Brand identity shown in the navigation and footer.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct Brand {
    pub name: String,
    pub logo_icon: String,
    pub logo_text: String,
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct Navigation {
    pub links: Vec<NavLink>,
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct NavLink {
    pub label: String,
    pub path: String,
    pub enabled: bool,
}

/// Hero carousel shown on the landing page.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct Hero {
    pub banners: Vec<HeroBanner>,
    /// Carousel advance interval in milliseconds.
    pub autoplay_interval_ms: u64,
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct HeroBanner {
    pub title: String,
    pub subtitle: String,
    pub image: String,
}

/// About/story section: a hero blurb plus value (team) cards.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct Story {
    pub title: String,
    pub description: String,
    pub image: String,
    pub values: Vec<StoryValue>,
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct StoryValue {
    pub icon: String,
    pub title: String,
    pub description: String,
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct Gallery {
    pub title: String,
    pub subtitle: String,
    pub images: Vec<GalleryImage>,
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct GalleryImage {
    pub id: GalleryImageId,
    pub title: String,
    pub description: String,
    pub image: String,
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct Events {
    pub title: String,
    pub subtitle: String,
    pub items: Vec<Event>,
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct Event {
    pub id: EventId,
    pub title: String,
    pub description: String,
    /// Free-form date string, carried through verbatim from the source.
    pub date: String,
    pub time: String,
    pub location: String,
    pub image: String,
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct Blog {
    pub title: String,
    pub description: String,
    pub posts: Vec<BlogPost>,
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct BlogPost {
    pub id: BlogPostId,
    pub title: String,
    pub excerpt: String,
    pub content: String,
    pub author: String,
    pub date: String,
    pub image: String,
    pub read_time: String,
}

/// Reservation page content: header, hours, location, and form labels.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct Reservation {
    pub title: String,
    pub description: String,
    pub hours: Hours,
    pub location: Address,
    pub phone: String,
    pub note: String,
}

/// Hours of operation as display strings.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct Hours {
    pub weekday: String,
    pub weekend: String,
    pub sunday: String,
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct Address {
    pub street: String,
    pub city: String,
    pub state: String,
    pub zip: String,
}

impl Address {
    /// Single-line display form: `street, city, state`.
    #[must_use]
    pub fn display(&self) -> String {
        format!("{}, {}, {}", self.street, self.city, self.state)
    }
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct Contact {
    pub title: String,
    pub subtitle: String,
    pub phone_numbers: Vec<String>,
    pub email_addresses: Vec<String>,
    pub address: Address,
    pub hours: Hours,
    pub locations: Vec<Location>,
}

/// A physical restaurant location.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct Location {
    pub id: LocationId,
    pub name: String,
    pub address: String,
    pub phone: String,
    pub hours: String,
    pub image: String,
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct Footer {
    pub tagline: String,
    pub copyright: String,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_empty_payload_yields_well_typed_tree() {
        let content: SiteContent = serde_json::from_str("{}").unwrap();
        assert!(content.gallery.images.is_empty());
        assert_eq!(content.gallery.title, "");
        assert!(content.blog.posts.is_empty());
    }

    #[test]
    fn test_address_display() {
        let addr = Address {
            street: "14 Ember Lane".to_string(),
            city: "Portland".to_string(),
            state: "OR".to_string(),
            zip: "97201".to_string(),
        };
        assert_eq!(addr.display(), "14 Ember Lane, Portland, OR");
    }
}
