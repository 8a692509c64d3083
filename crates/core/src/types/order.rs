//! Order submission wire format.
//!
//! An [`OrderPayload`] is derived at submission time from the current cart
//! lines plus customer contact info, and is never persisted client-side
//! beyond the request. Every money field is a string formatted to two
//! decimal places.

use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

use crate::types::cart::CartLine;
use crate::types::price::format_money;

/// Customer contact info entered at checkout.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct CustomerInfo {
    pub name: String,
    pub phone: String,
    pub email: String,
    #[serde(default)]
    pub special_requests: String,
    #[serde(default)]
    pub order_type: OrderType,
}

/// How the order will be fulfilled.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum OrderType {
    #[default]
    Pickup,
    Delivery,
}

/// One line of the order wire format.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct OrderedItem {
    pub name: String,
    pub quantity: i64,
    #[serde(rename = "itemPrice")]
    pub item_price: String,
    /// Free-form modifier description; empty when the item has none.
    #[serde(default)]
    pub modifiers: String,
    pub modifier_price: String,
    pub total_item_price: String,
}

/// The payload POSTed to the order endpoint.
///
/// Invariant: `grand_total` equals the sum of `price * quantity` over all
/// lines, formatted to two decimals.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct OrderPayload {
    pub restaurant_id: String,
    pub name: String,
    pub phone: String,
    pub email: String,
    pub special_requests: String,
    pub order_type: OrderType,
    pub ordered_items: Vec<OrderedItem>,
    pub grand_total: String,
}

impl OrderPayload {
    /// Build a payload from the current cart lines and customer info.
    ///
    /// An empty cart is not rejected here: it produces an empty item list
    /// and a grand total of `"0.00"`. Guarding empty submissions is a
    /// presentation concern.
    #[must_use]
    pub fn build(restaurant_id: &str, lines: &[CartLine], customer: &CustomerInfo) -> Self {
        let ordered_items: Vec<OrderedItem> = lines
            .iter()
            .map(|line| OrderedItem {
                name: line.name.clone(),
                quantity: line.quantity,
                item_price: format_money(line.price),
                modifiers: String::new(),
                modifier_price: format_money(Decimal::ZERO),
                total_item_price: line.line_total_display(),
            })
            .collect();

        let grand_total: Decimal = lines.iter().map(CartLine::line_total).sum();

        Self {
            restaurant_id: restaurant_id.to_string(),
            name: customer.name.clone(),
            phone: customer.phone.clone(),
            email: customer.email.clone(),
            special_requests: customer.special_requests.clone(),
            order_type: customer.order_type,
            ordered_items,
            grand_total: format_money(grand_total),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::types::id::ItemId;
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
    fn test_grand_total_sums_line_totals() {
        let lines = vec![line(1, dec!(10), 2), line(2, dec!(5), 1)];
        let payload = OrderPayload::build("charcoal-main", &lines, &CustomerInfo::default());

        assert_eq!(payload.grand_total, "25.00");
        assert_eq!(payload.ordered_items[0].total_item_price, "20.00");
        assert_eq!(payload.ordered_items[1].total_item_price, "5.00");
    }

    #[test]
    fn test_empty_cart_builds_zero_payload() {
        let payload = OrderPayload::build("charcoal-main", &[], &CustomerInfo::default());
        assert_eq!(payload.grand_total, "0.00");
        assert!(payload.ordered_items.is_empty());
    }

    #[test]
    fn test_money_fields_are_two_decimal_strings() {
        let lines = vec![line(1, dec!(9.5), 3)];
        let payload = OrderPayload::build("charcoal-main", &lines, &CustomerInfo::default());

        assert_eq!(payload.ordered_items[0].item_price, "9.50");
        assert_eq!(payload.ordered_items[0].modifier_price, "0.00");
        assert_eq!(payload.ordered_items[0].total_item_price, "28.50");
        assert_eq!(payload.grand_total, "28.50");
    }

    #[test]
    fn test_order_type_serializes_lowercase() {
        let json = serde_json::to_string(&OrderType::Pickup).unwrap();
        assert_eq!(json, r#""pickup""#);
    }

    #[test]
    fn test_item_price_wire_name() {
        let lines = vec![line(1, dec!(4), 1)];
        let payload = OrderPayload::build("charcoal-main", &lines, &CustomerInfo::default());
        let json = serde_json::to_value(&payload).unwrap();
        assert!(json["ordered_items"][0].get("itemPrice").is_some());
    }
}
