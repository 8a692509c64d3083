//! Fallback literals for site content.
//!
//! Every branch of the canonical tree has a documented default applied when
//! the source document omits it, so display surfaces never render an empty
//! leaf. Changing a literal here changes what every consumer falls back to.

use charcoal_core::NavLink;

pub const BRAND_NAME: &str = "Charcoal Kitchen";
pub const LOGO_ICON: &str = "flame";
pub const LOGO_TEXT: &str = "Charcoal";

/// Hero carousel advance interval.
pub const AUTOPLAY_INTERVAL_MS: u64 = 5000;

pub const WEEKDAY_HOURS: &str = "Mon-Fri: 5:00 PM - 10:00 PM";
pub const WEEKEND_HOURS: &str = "Sat: 12:00 PM - 11:00 PM";
pub const SUNDAY_HOURS: &str = "Sun: 12:00 PM - 9:00 PM";

pub const RESERVATION_TITLE: &str = "Reserve a Table";
pub const RESERVATION_NOTE: &str = "Parties of 8 or more, please call ahead.";

pub const CONTACT_TITLE: &str = "Get in Touch";
pub const LOCATION_NAME: &str = "Main Location";

pub const FOOTER_TAGLINE: &str = "Fire-first cooking, every night.";
pub const FOOTER_COPYRIGHT: &str = "© Charcoal Kitchen. All rights reserved.";

/// Default navigation links, all enabled.
#[must_use]
pub fn default_nav_links() -> Vec<NavLink> {
    [
        ("Home", "/"),
        ("Menu", "/menu"),
        ("About", "/about"),
        ("Gallery", "/gallery"),
        ("Events", "/events"),
        ("Blog", "/blog"),
        ("Reservation", "/reservation"),
        ("Contact", "/contact"),
        ("Order", "/order"),
    ]
    .into_iter()
    .map(|(label, path)| NavLink {
        label: label.to_string(),
        path: path.to_string(),
        enabled: true,
    })
    .collect()
}
