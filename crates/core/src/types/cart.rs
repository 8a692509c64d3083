//! Canonical cart line model.

use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

use crate::types::id::ItemId;
use crate::types::price::format_money;

/// A cart entry for one distinct purchasable item.
///
/// The cart holds at most one line per `id`; adding a duplicate merges
/// quantities instead of creating a second line.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CartLine {
    pub id: ItemId,
    pub name: String,
    pub price: Decimal,
    pub quantity: i64,
    #[serde(default)]
    pub image: String,
}

impl CartLine {
    /// The line total: `price * quantity`.
    #[must_use]
    pub fn line_total(&self) -> Decimal {
        self.price * Decimal::from(self.quantity)
    }

    /// The line total formatted as a two-decimal wire string.
    #[must_use]
    pub fn line_total_display(&self) -> String {
        format_money(self.line_total())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rust_decimal_macros::dec;

    fn line(id: i64, price: Decimal, quantity: i64) -> CartLine {
        CartLine {
            id: ItemId::new(id),
            name: "Smoked Brisket".to_string(),
            price,
            quantity,
            image: String::new(),
        }
    }

    #[test]
    fn test_line_total() {
        assert_eq!(line(1, dec!(10), 3).line_total(), dec!(30));
    }

    #[test]
    fn test_line_total_display() {
        assert_eq!(line(1, dec!(9.5), 2).line_total_display(), "19.00");
    }
}
