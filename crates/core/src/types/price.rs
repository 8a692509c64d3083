//! Money parsing and formatting using decimal arithmetic.
//!
//! Upstream catalog sources deliver prices in several sloppy shapes
//! (`"$12.50"`, `"12.50"`, `12.5`, missing entirely). The catalog
//! transform contract is: parse whatever is there, and default to zero on
//! anything unparseable. The order wire format requires every money field
//! to be a string formatted to exactly two decimal places.

use rust_decimal::Decimal;

/// Parse a source price value into a `Decimal`.
///
/// Strips a leading currency symbol and surrounding whitespace. Invalid or
/// missing input defaults to zero; this function never fails.
#[must_use]
pub fn parse_money(raw: Option<&str>) -> Decimal {
    let Some(raw) = raw else {
        return Decimal::ZERO;
    };

    raw.trim()
        .trim_start_matches('$')
        .trim()
        .parse::<Decimal>()
        .unwrap_or(Decimal::ZERO)
}

/// Format an amount as a two-decimal string (e.g. `"25.00"`).
///
/// This is the wire format for every money field in an order payload.
#[must_use]
pub fn format_money(amount: Decimal) -> String {
    format!("{:.2}", amount.round_dp(2))
}

#[cfg(test)]
mod tests {
    use super::*;
    use rust_decimal_macros::dec;

    #[test]
    fn test_parse_money_with_currency_symbol() {
        assert_eq!(parse_money(Some("$12.50")), dec!(12.50));
    }

    #[test]
    fn test_parse_money_plain() {
        assert_eq!(parse_money(Some("9.75")), dec!(9.75));
    }

    #[test]
    fn test_parse_money_whitespace() {
        assert_eq!(parse_money(Some(" $ 4.25 ")), dec!(4.25));
    }

    #[test]
    fn test_parse_money_missing_defaults_to_zero() {
        assert_eq!(parse_money(None), Decimal::ZERO);
    }

    #[test]
    fn test_parse_money_invalid_defaults_to_zero() {
        assert_eq!(parse_money(Some("market price")), Decimal::ZERO);
        assert_eq!(parse_money(Some("")), Decimal::ZERO);
    }

    #[test]
    fn test_format_money_two_decimals() {
        assert_eq!(format_money(dec!(25)), "25.00");
        assert_eq!(format_money(dec!(9.5)), "9.50");
        assert_eq!(format_money(dec!(0)), "0.00");
    }

    #[test]
    fn test_format_money_rounds() {
        assert_eq!(format_money(dec!(3.999)), "4.00");
    }
}
