//! # Display Formatting
//!
//! Currency and weight strings for invoices and order screens.
//!
//! Amounts use Indian digit grouping: the last three integer digits form
//! one group and everything before is grouped in pairs.
//!
//! ```text
//!   1234567.5  ──►  ₹12,34,567.50   (FractionDigits::Two)
//!   1234567.5  ──►  ₹12,34,567.5    (FractionDigits::UpToTwo)
//!   1234567    ──►  ₹12,34,567      (FractionDigits::UpToTwo)
//! ```

use serde::{Deserialize, Serialize};

use crate::money::{round_to, Money, Weight, MONEY_SCALE, WEIGHT_SCALE};

/// Currency symbol printed before every amount.
pub const RUPEE_SYMBOL: &str = "₹";

/// How many fraction digits a currency string shows.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum FractionDigits {
    /// Always two digits (`₹500.00`). Used on invoices.
    #[default]
    Two,
    /// Zero to two digits, trailing zeros dropped (`₹500`, `₹500.5`).
    /// Used on catalog and order screens.
    UpToTwo,
}

/// Formats an amount as an Indian-locale rupee string.
///
/// ## Example
/// ```rust
/// use swarna_core::format::{format_currency, FractionDigits};
/// use swarna_core::money::Money;
///
/// let amount = Money::from_paise(123456750);
/// assert_eq!(format_currency(amount, FractionDigits::Two), "₹12,34,567.50");
/// assert_eq!(format_currency(amount, FractionDigits::UpToTwo), "₹12,34,567.5");
/// ```
pub fn format_currency(amount: Money, digits: FractionDigits) -> String {
    let rounded = round_to(amount.amount(), MONEY_SCALE);
    let sign = if rounded.is_sign_negative() && !rounded.is_zero() {
        "-"
    } else {
        ""
    };

    let text = rounded.abs().to_string();
    let (whole, fraction) = text.split_once('.').unwrap_or((text.as_str(), ""));

    let fraction = match digits {
        FractionDigits::Two => fraction,
        FractionDigits::UpToTwo => fraction.trim_end_matches('0'),
    };

    if fraction.is_empty() {
        format!("{}{}{}", sign, RUPEE_SYMBOL, group_indian(whole))
    } else {
        format!("{}{}{}.{}", sign, RUPEE_SYMBOL, group_indian(whole), fraction)
    }
}

/// Formats a weight as a fixed three-decimal gram string (`12.345 g`).
pub fn format_weight(weight: Weight) -> String {
    format!("{} g", round_to(weight.value(), WEIGHT_SCALE))
}

/// Inserts Indian grouping separators into a run of ASCII digits.
fn group_indian(digits: &str) -> String {
    if digits.len() <= 3 {
        return digits.to_string();
    }

    let (head, tail) = digits.split_at(digits.len() - 3);
    let mut groups: Vec<&str> = Vec::new();
    let mut end = head.len();
    while end > 0 {
        let start = end.saturating_sub(2);
        groups.push(&head[start..end]);
        end = start;
    }
    groups.reverse();

    format!("{},{}", groups.join(","), tail)
}

#[cfg(test)]
mod tests {
    use super::*;
    use rust_decimal_macros::dec;

    #[test]
    fn test_group_indian() {
        assert_eq!(group_indian("0"), "0");
        assert_eq!(group_indian("999"), "999");
        assert_eq!(group_indian("1000"), "1,000");
        assert_eq!(group_indian("100000"), "1,00,000");
        assert_eq!(group_indian("1234567"), "12,34,567");
        assert_eq!(group_indian("123456789"), "12,34,56,789");
    }

    #[test]
    fn test_format_currency_two_digits() {
        assert_eq!(format_currency(Money::from_rupees(68495), FractionDigits::Two), "₹68,495.00");
        assert_eq!(format_currency(Money::zero(), FractionDigits::Two), "₹0.00");
        assert_eq!(format_currency(Money::new(dec!(0.005)), FractionDigits::Two), "₹0.01");
    }

    #[test]
    fn test_format_currency_up_to_two_digits() {
        assert_eq!(format_currency(Money::from_rupees(68495), FractionDigits::UpToTwo), "₹68,495");
        assert_eq!(format_currency(Money::new(dec!(1500.5)), FractionDigits::UpToTwo), "₹1,500.5");
        assert_eq!(format_currency(Money::new(dec!(1500.25)), FractionDigits::UpToTwo), "₹1,500.25");
    }

    #[test]
    fn test_format_currency_negative() {
        assert_eq!(format_currency(Money::new(dec!(-120000)), FractionDigits::Two), "-₹1,20,000.00");
        // Rounds to zero, so no sign
        assert_eq!(format_currency(Money::new(dec!(-0.001)), FractionDigits::Two), "₹0.00");
    }

    #[test]
    fn test_format_weight() {
        assert_eq!(format_weight(Weight::grams(dec!(10))), "10.000 g");
        assert_eq!(format_weight(Weight::grams(dec!(4.5678))), "4.568 g");
    }
}
