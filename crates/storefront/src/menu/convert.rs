//! Catalog ingest adapters.
//!
//! Two payload shapes exist in the wild. Vendor exports deliver a flat
//! array of rows with `sku_id`, `level1_category`, stringly-typed flags and
//! `$`-prefixed prices. The curated document nests items under
//! `{"menu": {"<Category>": [items]}}`. The adapter is selected by
//! inspecting the document; both produce canonical [`MenuItem`]s.
//!
//! Transformation never fails: unparseable fields fall back to defaults
//! (zero price, id 0, empty strings) rather than rejecting the item.

use charcoal_core::{Dietary, ItemId, MenuCategory, MenuItem, Nutrition, parse_money};
use rust_decimal::Decimal;
use serde::Deserialize;
use tracing::warn;

/// Parse a raw menu document into canonical items.
///
/// Unknown document shapes yield an empty list, matching the contract that
/// ingest defaults rather than errors.
#[must_use]
pub fn parse_menu_payload(doc: &serde_json::Value) -> Vec<MenuItem> {
    if let Some(rows) = doc.as_array() {
        return parse_vendor_rows(rows);
    }
    if let Some(menu) = doc.get("menu").and_then(serde_json::Value::as_object) {
        return parse_nested_menu(menu);
    }
    warn!("Unrecognized menu payload shape, producing empty catalog");
    Vec::new()
}

/// Derive categories from the distinct `category` values, in order of first
/// appearance. Empty categories are dropped.
#[must_use]
pub fn derive_categories(items: &[MenuItem]) -> Vec<MenuCategory> {
    let mut seen: Vec<&str> = Vec::new();
    for item in items {
        if !item.category.is_empty() && !seen.contains(&item.category.as_str()) {
            seen.push(&item.category);
        }
    }
    seen.into_iter().map(MenuCategory::from_name).collect()
}

// =============================================================================
// Vendor rows (flat array)
// =============================================================================

#[derive(Debug, Deserialize)]
struct VendorRow {
    #[serde(default)]
    sku_id: String,
    #[serde(default)]
    name: String,
    #[serde(default)]
    description: String,
    #[serde(default)]
    product_description: String,
    #[serde(default)]
    price: Option<String>,
    #[serde(default)]
    level1_category: String,
    #[serde(default)]
    category: String,
    #[serde(default, rename = "subCategory")]
    sub_category: String,
    #[serde(default)]
    is_enabled: String,
    #[serde(default)]
    image: String,
    #[serde(default)]
    dietary: Option<Dietary>,
    #[serde(default)]
    ingredients: Vec<String>,
}

fn parse_vendor_rows(rows: &[serde_json::Value]) -> Vec<MenuItem> {
    rows.iter()
        .filter_map(|raw| match serde_json::from_value::<VendorRow>(raw.clone()) {
            Ok(row) => Some(vendor_row_to_item(row)),
            Err(e) => {
                warn!(error = %e, "Skipping malformed vendor row");
                None
            }
        })
        .collect()
}

fn vendor_row_to_item(row: VendorRow) -> MenuItem {
    let description = if row.description.is_empty() {
        row.product_description.clone()
    } else {
        row.description.clone()
    };
    let category = if row.level1_category.is_empty() {
        row.category.clone()
    } else {
        row.level1_category.clone()
    };
    let tags = extract_tags(&row.sub_category, row.dietary.as_ref(), &row.ingredients);

    MenuItem {
        id: parse_sku_id(&row.sku_id),
        name: row.name,
        description,
        price: parse_money(row.price.as_deref()),
        image: row.image,
        category,
        tags,
        available: row.is_enabled == "true",
        calories: None,
        nutrition: None,
        dietary: row.dietary,
        allergens: Vec::new(),
        ingredients: row.ingredients,
        pairings: Vec::new(),
    }
}

/// Parse a numeric id out of a `CHR`-prefixed SKU, taking the leading
/// digits after the prefix is stripped. Anything unparseable is id 0.
fn parse_sku_id(sku: &str) -> ItemId {
    let digits: String = sku
        .replace("CHR", "")
        .chars()
        .skip_while(|c| !c.is_ascii_digit())
        .take_while(char::is_ascii_digit)
        .collect();
    ItemId::new(digits.parse().unwrap_or(0))
}

// =============================================================================
// Nested document ({"menu": {category: [items]}})
// =============================================================================

#[derive(Debug, Deserialize)]
struct NestedItem {
    #[serde(default)]
    id: Option<i64>,
    #[serde(default)]
    name: String,
    #[serde(default)]
    description: String,
    /// Price arrives as a number or a string, sometimes `$`-prefixed.
    #[serde(default)]
    price: Option<serde_json::Value>,
    #[serde(default)]
    image: String,
    #[serde(default)]
    tags: Vec<String>,
    #[serde(default)]
    available: Option<bool>,
    #[serde(default)]
    calories: Option<u32>,
    #[serde(default, alias = "nutrients")]
    nutrition: Option<Nutrition>,
    #[serde(default)]
    dietary: Option<Dietary>,
    #[serde(default)]
    allergens: Vec<String>,
    #[serde(default)]
    ingredients: Vec<String>,
    #[serde(default)]
    pairings: Vec<String>,
}

fn parse_nested_menu(menu: &serde_json::Map<String, serde_json::Value>) -> Vec<MenuItem> {
    let mut items = Vec::new();
    for (category, entries) in menu {
        let Some(entries) = entries.as_array() else {
            continue;
        };
        for raw in entries {
            match serde_json::from_value::<NestedItem>(raw.clone()) {
                Ok(item) => {
                    if let Some(item) = nested_item_to_item(item, category) {
                        items.push(item);
                    }
                }
                Err(e) => warn!(error = %e, category, "Skipping malformed menu item"),
            }
        }
    }
    items
}

fn nested_item_to_item(item: NestedItem, category: &str) -> Option<MenuItem> {
    // Items without a usable id and name are not addressable by the cart
    let id = item.id.filter(|&v| v != 0)?;
    if item.name.is_empty() {
        return None;
    }

    let mut tags: Vec<String> = item.tags.iter().map(|t| t.to_lowercase()).collect();
    for tag in extract_tags("", item.dietary.as_ref(), &item.ingredients) {
        if !tags.contains(&tag) {
            tags.push(tag);
        }
    }

    Some(MenuItem {
        id: ItemId::new(id),
        name: item.name,
        description: item.description,
        price: price_value(item.price.as_ref()),
        image: item.image,
        category: category.to_string(),
        tags,
        available: item.available.unwrap_or(true),
        calories: item.calories,
        nutrition: item.nutrition,
        dietary: item.dietary,
        allergens: item.allergens,
        ingredients: item.ingredients,
        pairings: item.pairings,
    })
}

fn price_value(value: Option<&serde_json::Value>) -> Decimal {
    match value {
        Some(serde_json::Value::String(s)) => parse_money(Some(s)),
        Some(serde_json::Value::Number(n)) => n
            .as_f64()
            .and_then(|f| Decimal::try_from(f).ok())
            .unwrap_or(Decimal::ZERO),
        _ => Decimal::ZERO,
    }
}

// =============================================================================
// Shared tag extraction
// =============================================================================

/// Build the lower-cased, deduplicated tag list from subcategory, dietary
/// flags, and ingredients, preserving first-seen order.
fn extract_tags(sub_category: &str, dietary: Option<&Dietary>, ingredients: &[String]) -> Vec<String> {
    let mut tags: Vec<String> = Vec::new();
    let mut push = |tag: String| {
        if !tag.is_empty() && !tags.contains(&tag) {
            tags.push(tag);
        }
    };

    if !sub_category.is_empty() {
        push(sub_category.to_lowercase());
    }

    if let Some(dietary) = dietary {
        if dietary.is_vegan {
            push("vegan".to_string());
            push("vegetarian".to_string());
        }
        if dietary.is_vegetarian {
            push("vegetarian".to_string());
        }
        if dietary.is_gluten_free {
            push("gluten-free".to_string());
        }
    }

    for ingredient in ingredients {
        push(ingredient.trim().to_lowercase());
    }

    tags
}
