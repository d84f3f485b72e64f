//! # Pricing Strategies
//!
//! The two pricing paths as named variants of one capability.
//!
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │  PricingStrategy                                                        │
//! │  ├── ChargeScheme(PriceInput)       catalog / purchase-order pricing   │
//! │  │      gold on NET weight, making + wastage from charge schemes       │
//! │  │                                                                      │
//! │  └── LabourRate(InvoiceItemData)    customer invoice pricing           │
//! │         gold on GROSS weight, labour rate × NET weight                 │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! The variants are never merged: the same product priced both ways gives
//! different totals, and each entry point depends on its own semantics.

use serde::{Deserialize, Serialize};
use ts_rs::TS;

use crate::invoice::{calculate_item_total, InvoiceItemData};
use crate::money::Money;
use crate::pricing::{calculate_purchase_order_item_price, PriceInput};

/// A priced line, reduced to what both strategies can report.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, TS)]
#[ts(export)]
#[serde(rename_all = "camelCase")]
pub struct LineTotal {
    /// Pre-tax amount for the whole line.
    #[ts(as = "String")]
    pub subtotal: Money,
    #[ts(as = "String")]
    pub gst: Money,
    #[ts(as = "String")]
    pub total: Money,
}

/// A line item tagged with the pricing path that must price it.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "strategy", content = "item", rename_all = "snake_case")]
pub enum PricingStrategy {
    ChargeScheme(PriceInput),
    LabourRate(InvoiceItemData),
}

impl PricingStrategy {
    /// Short name for logs and serialized tags.
    pub fn name(&self) -> &'static str {
        match self {
            PricingStrategy::ChargeScheme(_) => "charge_scheme",
            PricingStrategy::LabourRate(_) => "labour_rate",
        }
    }

    /// Prices the whole line with this variant's own rules.
    pub fn line_total(&self) -> LineTotal {
        match self {
            PricingStrategy::ChargeScheme(input) => {
                let line = calculate_purchase_order_item_price(input);
                LineTotal {
                    subtotal: line.line_subtotal,
                    gst: line.line_gst,
                    total: line.line_total,
                }
            }
            PricingStrategy::LabourRate(item) => {
                let total = calculate_item_total(item);
                LineTotal {
                    subtotal: total.base_amount,
                    gst: total.gst_amount,
                    total: total.total,
                }
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::money::{Rate, Weight};
    use crate::types::ChargeSpec;
    use rust_decimal_macros::dec;

    #[test]
    fn test_strategies_price_the_same_piece_differently() {
        let catalog = PricingStrategy::ChargeScheme(
            PriceInput::new(Weight::grams(dec!(10)), Money::from_rupees(6000))
                .with_making_charge(ChargeSpec::per_gram(dec!(600)))
                .with_gst_rate(Rate::percent(dec!(3))),
        );
        let invoice = PricingStrategy::LabourRate(InvoiceItemData {
            description: String::new(),
            gross_weight: Weight::grams(dec!(12)),
            net_weight: Weight::grams(dec!(10)),
            gold_rate: Money::from_rupees(6000),
            labour_rate: Money::from_rupees(600),
            additional_cost: Money::zero(),
            gst_rate: Rate::percent(dec!(3)),
            quantity: 1,
        });

        assert_eq!(catalog.line_total().subtotal, Money::from_rupees(66000));
        assert_eq!(invoice.line_total().subtotal, Money::from_rupees(78000));
        assert_eq!(catalog.name(), "charge_scheme");
        assert_eq!(invoice.name(), "labour_rate");
    }

    #[test]
    fn test_tagged_json() {
        let json = r#"{"strategy": "charge_scheme", "item": {"netWeight": 1, "pricePerGram": 100}}"#;
        let parsed: PricingStrategy = serde_json::from_str(json).unwrap();
        assert_eq!(parsed.line_total().total, Money::from_rupees(100));
    }
}
