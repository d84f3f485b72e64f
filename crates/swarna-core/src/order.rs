//! # Order Aggregator
//!
//! Sums priced items into an order-level summary.
//!
//! ## Aggregation
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │  for each (breakdown, quantity, net weight):                            │
//! │      total_gold_value     += breakdown.gold_value     × qty             │
//! │      total_making_charges += breakdown.making_charge  × qty             │
//! │      total_wastage        += breakdown.wastage_charge × qty             │
//! │      total_stone_value    += breakdown.stone_value    × qty             │
//! │      total_additional     += breakdown.additional_cost× qty             │
//! │      total_gst            += breakdown.gst_amount     × qty             │
//! │      grand_total          += breakdown.final_price    × qty             │
//! │      total_gold_weight    += net weight               × qty             │
//! │      item_count           += qty                                        │
//! │                                                                         │
//! │  subtotal = sum of the five component totals (recomputed, not copied)   │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```

use serde::{Deserialize, Serialize};
use tracing::trace;
use ts_rs::TS;

use crate::money::{Money, Weight};
use crate::pricing::PriceBreakdown;
use crate::types::DiscountRule;

/// One priced item on an order.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct OrderLine {
    pub breakdown: PriceBreakdown,
    pub quantity: u32,
    pub net_weight: Weight,
}

impl OrderLine {
    pub fn new(breakdown: PriceBreakdown, quantity: u32, net_weight: Weight) -> Self {
        OrderLine {
            breakdown,
            quantity,
            net_weight,
        }
    }
}

/// Order totals. Money rounded to paise, weight to milligrams.
#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize, TS)]
#[ts(export)]
#[serde(rename_all = "camelCase")]
pub struct OrderSummary {
    #[ts(as = "String")]
    pub total_gold_value: Money,
    #[ts(as = "String")]
    pub total_making_charges: Money,
    #[ts(as = "String")]
    pub total_wastage_charges: Money,
    #[ts(as = "String")]
    pub total_stone_value: Money,
    #[ts(as = "String")]
    pub total_additional_costs: Money,
    #[ts(as = "String")]
    pub subtotal: Money,
    #[ts(as = "String")]
    pub total_gst: Money,
    #[ts(as = "String")]
    pub grand_total: Money,
    #[ts(as = "String")]
    pub total_gold_weight: Weight,
    pub item_count: u32,
}

/// Aggregates priced lines into an [`OrderSummary`].
///
/// An empty slice yields an all-zero summary.
pub fn calculate_order_summary(items: &[OrderLine]) -> OrderSummary {
    let mut gold = Money::zero();
    let mut making = Money::zero();
    let mut wastage = Money::zero();
    let mut stone = Money::zero();
    let mut additional = Money::zero();
    let mut gst = Money::zero();
    let mut grand_total = Money::zero();
    let mut weight = Weight::zero();
    let mut item_count: u32 = 0;

    for item in items {
        let qty = item.quantity;
        let b = &item.breakdown;

        gold += b.gold_value * qty;
        making += b.making_charge * qty;
        wastage += b.wastage_charge * qty;
        stone += b.stone_value * qty;
        additional += b.additional_cost * qty;
        gst += b.gst_amount * qty;
        grand_total += b.final_price * qty;
        weight += item.net_weight * qty;
        item_count = item_count.saturating_add(qty);
    }

    let subtotal = gold + making + wastage + stone + additional;

    trace!(
        lines = items.len(),
        item_count,
        grand_total = %grand_total.amount(),
        "Aggregated order"
    );

    OrderSummary {
        total_gold_value: gold.round_paise(),
        total_making_charges: making.round_paise(),
        total_wastage_charges: wastage.round_paise(),
        total_stone_value: stone.round_paise(),
        total_additional_costs: additional.round_paise(),
        subtotal: subtotal.round_paise(),
        total_gst: gst.round_paise(),
        grand_total: grand_total.round_paise(),
        total_gold_weight: weight.round_mg(),
        item_count,
    }
}

// =============================================================================
// Order Settlement
// =============================================================================

/// An order summary after order-level discounts and advance payment.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, TS)]
#[ts(export)]
#[serde(rename_all = "camelCase")]
pub struct OrderSettlement {
    #[ts(as = "String")]
    pub making_charge_discount: Money,
    #[ts(as = "String")]
    pub gold_value_discount: Money,
    #[ts(as = "String")]
    pub total_discount_amount: Money,
    /// Grand total less discounts.
    #[ts(as = "String")]
    pub net_payable: Money,
    #[ts(as = "String")]
    pub advance_amount: Money,
    /// Net payable less advance.
    #[ts(as = "String")]
    pub balance_due: Money,
}

impl OrderSummary {
    /// Applies an order-level discount and subtracts the advance.
    ///
    /// The making discount is taken on `total_making_charges` and the gold
    /// discount on `total_gold_weight` (net weight on this path).
    pub fn apply_discounts(&self, rule: &DiscountRule, advance: Money) -> OrderSettlement {
        let making_discount = rule.making_pct().of(self.total_making_charges);
        let gold_discount = rule.gold_per_gram() * self.total_gold_weight.value();
        let total_discount = making_discount + gold_discount;
        let net_payable = self.grand_total - total_discount;

        OrderSettlement {
            making_charge_discount: making_discount.round_paise(),
            gold_value_discount: gold_discount.round_paise(),
            total_discount_amount: total_discount.round_paise(),
            net_payable: net_payable.round_paise(),
            advance_amount: advance.round_paise(),
            balance_due: (net_payable - advance).round_paise(),
        }
    }
}
