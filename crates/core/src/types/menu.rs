//! Canonical menu (catalog) model.
//!
//! Menu items are produced wholesale by the catalog ingest step and are
//! immutable for the rest of the session; a re-fetch replaces the whole
//! set. Categories are derived from the distinct `category` values
//! observed across the flattened item list.

use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

use crate::types::id::ItemId;

/// A purchasable menu item.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct MenuItem {
    pub id: ItemId,
    pub name: String,
    #[serde(default)]
    pub description: String,
    pub price: Decimal,
    #[serde(default)]
    pub image: String,
    #[serde(default)]
    pub category: String,
    /// Lower-cased, deduplicated tags merged from subcategory, dietary
    /// flags, and ingredients.
    #[serde(default)]
    pub tags: Vec<String>,
    /// Defaults to true unless the source marks the item unavailable.
    #[serde(default = "default_available")]
    pub available: bool,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub calories: Option<u32>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub nutrition: Option<Nutrition>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub dietary: Option<Dietary>,
    #[serde(default)]
    pub allergens: Vec<String>,
    #[serde(default)]
    pub ingredients: Vec<String>,
    #[serde(default)]
    pub pairings: Vec<String>,
}

const fn default_available() -> bool {
    true
}

/// Optional per-item nutrition facts, carried through verbatim from the
/// source (free-form strings like `"12g"`).
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Nutrition {
    #[serde(default)]
    pub protein: String,
    #[serde(default)]
    pub carbs: String,
    #[serde(default)]
    pub fat: String,
    #[serde(default)]
    pub sat: String,
    #[serde(default)]
    pub unsat: String,
    #[serde(default)]
    pub trans: String,
    #[serde(default)]
    pub sugar: String,
    #[serde(default)]
    pub fiber: String,
}

/// Dietary flags for a menu item.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Dietary {
    #[serde(default, rename = "isVegetarian")]
    pub is_vegetarian: bool,
    #[serde(default, rename = "isVegan")]
    pub is_vegan: bool,
    #[serde(default, rename = "isGlutenFree")]
    pub is_gluten_free: bool,
}

/// A menu category derived from the distinct category values observed in
/// the flattened item list. `id` is the lower-cased, hyphenated form of
/// the display name.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct MenuCategory {
    pub id: String,
    pub name: String,
    pub description: String,
}

impl MenuCategory {
    /// Derive a category from its display name.
    #[must_use]
    pub fn from_name(name: &str) -> Self {
        Self {
            id: name.to_lowercase().split_whitespace().collect::<Vec<_>>().join("-"),
            name: name.to_string(),
            description: format!("{name} menu items"),
        }
    }
}
