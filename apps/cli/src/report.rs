//! Plain-text rendering of command results.

use std::fmt;

use swarna_core::{format_currency, format_weight, FractionDigits, InvoiceCalculation, Money};

use crate::commands::{ChargeCheck, PriceReport};

/// Width of the label column.
const LABEL_WIDTH: usize = 24;

fn row(f: &mut fmt::Formatter<'_>, label: &str, value: &str) -> fmt::Result {
    writeln!(f, "  {:<width$}{:>18}", label, value, width = LABEL_WIDTH)
}

fn money_row(f: &mut fmt::Formatter<'_>, label: &str, amount: Money, digits: FractionDigits) -> fmt::Result {
    row(f, label, &format_currency(amount, digits))
}

/// Text view of a `price` run.
pub struct PriceView<'a> {
    pub report: &'a PriceReport,
    pub digits: FractionDigits,
}

impl fmt::Display for PriceView<'_> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let d = self.digits;
        writeln!(f, "Rates as of {}", self.report.date)?;

        for item in &self.report.items {
            let b = &item.line.breakdown;
            writeln!(f)?;
            writeln!(
                f,
                "{} [{}] @ {}/g",
                item.label,
                item.category.as_deref().unwrap_or("-"),
                format_currency(item.price_per_gram, d)
            )?;
            money_row(f, "Gold value", b.gold_value, d)?;
            money_row(f, "Wastage", b.wastage_charge, d)?;
            money_row(f, "Making", b.making_charge, d)?;
            money_row(f, "Additional", b.additional_cost, d)?;
            money_row(f, "Stones", b.stone_value, d)?;
            money_row(f, "Subtotal", b.subtotal, d)?;
            money_row(f, "GST", b.gst_amount, d)?;
            money_row(f, "Price", b.payable(), d)?;
            if item.line.quantity > 1 {
                money_row(f, &format!("Line total (x{})", item.line.quantity), item.line.line_total, d)?;
            }
        }

        let s = &self.report.summary;
        let settle = &self.report.settlement;
        writeln!(f)?;
        writeln!(f, "Order ({} pieces)", s.item_count)?;
        row(f, "Gold weight", &format_weight(s.total_gold_weight))?;
        money_row(f, "Subtotal", s.subtotal, d)?;
        money_row(f, "GST", s.total_gst, d)?;
        money_row(f, "Grand total", s.grand_total, d)?;
        if !settle.total_discount_amount.is_zero() {
            money_row(f, "Discount", -settle.total_discount_amount, d)?;
            money_row(f, "Net payable", settle.net_payable, d)?;
        }
        if !settle.advance_amount.is_zero() {
            money_row(f, "Advance", -settle.advance_amount, d)?;
        }
        money_row(f, "Balance due", settle.balance_due, d)
    }
}

/// Text view of an `invoice` run.
pub struct InvoiceView<'a> {
    pub invoice: &'a InvoiceCalculation,
    pub digits: FractionDigits,
}

impl fmt::Display for InvoiceView<'_> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let d = self.digits;
        let inv = self.invoice;

        for (i, item) in inv.items.iter().enumerate() {
            writeln!(f, "Item {}", i + 1)?;
            money_row(f, "Gold", item.gold_cost, d)?;
            money_row(f, "Labour", item.labour_cost, d)?;
            money_row(f, "Additional", item.additional_cost, d)?;
            money_row(f, "GST", item.gst_amount, d)?;
            money_row(f, "Total", item.total, d)?;
        }

        writeln!(f, "Invoice")?;
        row(f, "Gross weight", &format_weight(inv.total_gold_gross_weight))?;
        money_row(f, "Sub total", inv.sub_total, d)?;
        money_row(f, "GST", inv.total_gst, d)?;
        money_row(f, "Making charges", inv.total_making_charges, d)?;
        money_row(f, "Discount", -inv.total_discount_amount, d)?;
        money_row(f, "Total", inv.total_amount, d)?;
        money_row(f, "Advance", -inv.advance_amount, d)?;
        money_row(f, "Grand total", inv.grand_total, d)
    }
}

impl fmt::Display for ChargeCheck {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match (self.valid, &self.reason) {
            (true, _) => f.write_str("valid"),
            (false, Some(reason)) => write!(f, "invalid: {}", reason),
            (false, None) => f.write_str("invalid"),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::commands::{price, PriceRequest};
    use crate::config::{RateEntry, SwarnaConfig};
    use chrono::NaiveDate;

    fn report() -> PriceReport {
        let day = NaiveDate::from_ymd_opt(2024, 3, 1).unwrap();
        let config = SwarnaConfig {
            rates: vec![RateEntry {
                category: "GOLD22".to_string(),
                date: day,
                price_per_gram: Money::from_rupees(6000),
            }],
            ..SwarnaConfig::default()
        };
        let request: PriceRequest = serde_json::from_str(
            r#"{
                "sku": "RNG-001",
                "category": "GOLD22",
                "netWeight": "10",
                "makingChargeType": "percentage",
                "makingChargeValue": "10",
                "wastageChargeType": "per_gram",
                "wastageChargeValue": "50",
                "quantity": 2
            }"#,
        )
        .unwrap();
        price(request, &config, day).unwrap()
    }

    #[test]
    fn test_price_view_formats_indian_currency() {
        let report = report();
        let text = PriceView {
            report: &report,
            digits: FractionDigits::Two,
        }
        .to_string();

        assert!(text.starts_with("Rates as of 2024-03-01"));
        assert!(text.contains("RNG-001 [GOLD22] @ ₹6,000.00/g"));
        assert!(text.contains("₹68,495.00"));
        assert!(text.contains("Line total (x2)"));
        assert!(text.contains("₹1,36,990.00"));
        assert!(text.contains("20.000 g"));
        assert!(!text.contains("Discount"));
    }

    #[test]
    fn test_price_view_up_to_two_digits() {
        let report = report();
        let text = PriceView {
            report: &report,
            digits: FractionDigits::UpToTwo,
        }
        .to_string();
        assert!(text.contains("₹68,495\n"));
        assert!(!text.contains("₹68,495.00"));
    }

    #[test]
    fn test_charge_check_display() {
        let check = ChargeCheck {
            code: "percentage".to_string(),
            charge_type: Some(swarna_core::ChargeType::Percentage),
            value: None,
            valid: false,
            reason: None,
        };
        assert_eq!(check.to_string(), "invalid");
    }
}
