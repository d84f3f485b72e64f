//! # Invoice Calculator
//!
//! The labour-rate pricing path used when generating customer invoices.
//!
//! This is deliberately separate from [`crate::pricing`]: invoice items
//! carry a flat labour rate per gram instead of charge schemes, and the
//! gold cost is taken on GROSS weight while labour is taken on NET weight.
//!
//! ## Invoice Flow
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │  per item:                                                              │
//! │    base  = (gross × gold rate + net × labour rate + additional) × qty   │
//! │    gst   = base × gst rate                                              │
//! │    total = base + gst                                                   │
//! │                                                                         │
//! │  per invoice:                                                           │
//! │    sub total              = Σ item totals                               │
//! │    total making charges   = Σ labour rate × net × qty                   │
//! │    total gold gross weight= Σ gross × qty                               │
//! │    making discount        = total making charges × pct / 100            │
//! │    gold discount          = total gold gross weight × per-gram discount │
//! │    total amount           = sub total - (making + gold discount)        │
//! │    grand total            = total amount - advance                      │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```

use serde::{Deserialize, Serialize};
use tracing::trace;
use ts_rs::TS;

use crate::money::{Money, Rate, Weight};
use crate::types::DiscountRule;

// =============================================================================
// Invoice Item
// =============================================================================

/// One line on a customer invoice.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, TS)]
#[ts(export)]
#[serde(rename_all = "camelCase")]
pub struct InvoiceItemData {
    #[serde(default)]
    pub description: String,

    /// Total item weight including stones.
    #[ts(as = "String")]
    pub gross_weight: Weight,

    /// Metal weight excluding stones.
    #[ts(as = "String")]
    pub net_weight: Weight,

    /// Gold rate per gram applied to gross weight.
    #[ts(as = "String")]
    pub gold_rate: Money,

    /// Labour (making) rate per gram applied to net weight.
    #[ts(as = "String")]
    #[serde(default)]
    pub labour_rate: Money,

    #[ts(as = "String")]
    #[serde(default)]
    pub additional_cost: Money,

    #[ts(as = "String")]
    #[serde(default)]
    pub gst_rate: Rate,

    #[serde(default = "default_quantity")]
    pub quantity: u32,
}

fn default_quantity() -> u32 {
    1
}

impl InvoiceItemData {
    /// Line quantity used in calculations (never below 1).
    #[inline]
    pub fn line_quantity(&self) -> u32 {
        self.quantity.max(1)
    }
}

/// Computed totals for one invoice line (already multiplied by quantity).
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, TS)]
#[ts(export)]
#[serde(rename_all = "camelCase")]
pub struct ItemTotal {
    #[ts(as = "String")]
    pub gold_cost: Money,
    #[ts(as = "String")]
    pub labour_cost: Money,
    #[ts(as = "String")]
    pub additional_cost: Money,
    #[ts(as = "String")]
    pub base_amount: Money,
    #[ts(as = "String")]
    pub gst_amount: Money,
    #[ts(as = "String")]
    pub total: Money,
}

/// Unrounded line figures, shared by the item and invoice totals.
struct LineFigures {
    gold: Money,
    labour: Money,
    additional: Money,
    base: Money,
    gst: Money,
}

impl LineFigures {
    fn of(item: &InvoiceItemData) -> Self {
        let qty = item.line_quantity();
        let gold = (item.gross_weight * item.gold_rate) * qty;
        let labour = (item.net_weight * item.labour_rate) * qty;
        let additional = item.additional_cost * qty;
        let base = gold + labour + additional;
        let gst = item.gst_rate.of(base);

        LineFigures {
            gold,
            labour,
            additional,
            base,
            gst,
        }
    }

    fn total(&self) -> Money {
        self.base + self.gst
    }
}

/// Computes one invoice line: base amount times quantity, plus GST.
///
/// ## Example
/// ```rust
/// use rust_decimal::Decimal;
/// use swarna_core::invoice::{calculate_item_total, InvoiceItemData};
/// use swarna_core::money::{Money, Rate, Weight};
///
/// let item = InvoiceItemData {
///     description: "Bangle".into(),
///     gross_weight: Weight::grams(Decimal::new(12, 0)),
///     net_weight: Weight::grams(Decimal::new(10, 0)),
///     gold_rate: Money::from_rupees(6000),
///     labour_rate: Money::from_rupees(600),
///     additional_cost: Money::zero(),
///     gst_rate: Rate::percent(Decimal::new(3, 0)),
///     quantity: 1,
/// };
///
/// let total = calculate_item_total(&item);
/// assert_eq!(total.base_amount, Money::from_rupees(78000));
/// assert_eq!(total.total, Money::from_rupees(80340));
/// ```
pub fn calculate_item_total(item: &InvoiceItemData) -> ItemTotal {
    let f = LineFigures::of(item);

    ItemTotal {
        gold_cost: f.gold.round_paise(),
        labour_cost: f.labour.round_paise(),
        additional_cost: f.additional.round_paise(),
        base_amount: f.base.round_paise(),
        gst_amount: f.gst.round_paise(),
        total: f.total().round_paise(),
    }
}

// =============================================================================
// Invoice Calculation
// =============================================================================

/// Invoice totals after order-level discount and advance.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, TS)]
#[ts(export)]
#[serde(rename_all = "camelCase")]
pub struct InvoiceCalculation {
    pub items: Vec<ItemTotal>,
    /// Sum of item totals, GST included.
    #[ts(as = "String")]
    pub sub_total: Money,
    #[ts(as = "String")]
    pub total_gst: Money,
    #[ts(as = "String")]
    pub total_making_charges: Money,
    #[ts(as = "String")]
    pub total_gold_gross_weight: Weight,
    #[ts(as = "String")]
    pub making_charge_discount: Money,
    #[ts(as = "String")]
    pub gold_value_discount: Money,
    #[ts(as = "String")]
    pub total_discount_amount: Money,
    /// Sub total less discounts.
    #[ts(as = "String")]
    pub total_amount: Money,
    #[ts(as = "String")]
    pub advance_amount: Money,
    /// Total amount less advance.
    #[ts(as = "String")]
    pub grand_total: Money,
}

/// Computes invoice totals with order-level discounts.
///
/// Never fails; an empty item list yields zero totals (and a negative
/// grand total when an advance is given).
pub fn calculate_invoice_total(
    items: &[InvoiceItemData],
    discount: &DiscountRule,
    advance: Money,
) -> InvoiceCalculation {
    let mut sub_total = Money::zero();
    let mut total_gst = Money::zero();
    let mut total_making = Money::zero();
    let mut total_gross = Weight::zero();
    let mut lines = Vec::with_capacity(items.len());

    for item in items {
        let f = LineFigures::of(item);

        sub_total += f.total();
        total_gst += f.gst;
        total_making += f.labour;
        total_gross += item.gross_weight * item.line_quantity();

        lines.push(calculate_item_total(item));
    }

    let making_discount = discount.making_pct().of(total_making);
    let gold_discount = discount.gold_per_gram() * total_gross.value();
    let total_discount = making_discount + gold_discount;
    let total_amount = sub_total - total_discount;
    let grand_total = total_amount - advance;

    trace!(
        items = items.len(),
        sub_total = %sub_total.amount(),
        discount = %total_discount.amount(),
        grand_total = %grand_total.amount(),
        "Computed invoice total"
    );

    InvoiceCalculation {
        items: lines,
        sub_total: sub_total.round_paise(),
        total_gst: total_gst.round_paise(),
        total_making_charges: total_making.round_paise(),
        total_gold_gross_weight: total_gross.round_mg(),
        making_charge_discount: making_discount.round_paise(),
        gold_value_discount: gold_discount.round_paise(),
        total_discount_amount: total_discount.round_paise(),
        total_amount: total_amount.round_paise(),
        advance_amount: advance.round_paise(),
        grand_total: grand_total.round_paise(),
    }
}
