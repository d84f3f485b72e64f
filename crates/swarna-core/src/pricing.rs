//! # Price Compositor
//!
//! Computes the GST-inclusive price of one catalog item from its weight,
//! today's price per gram and its charge schemes.
//!
//! ## Calculation Flow
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                                                                         │
//! │  net weight × price per gram ──► gold value                             │
//! │                                      │                                  │
//! │                     ┌────────────────┼────────────────┐                 │
//! │                     ▼                                 ▼                 │
//! │              wastage charge                    making charge            │
//! │                     │                                 │                 │
//! │                     └──────► subtotal ◄───────────────┘                 │
//! │                                 ▲   ▲                                   │
//! │                  additional cost┘   └stone value                        │
//! │                                 │                                       │
//! │                        GST = subtotal × rate                            │
//! │                                 │                                       │
//! │             final price = round2(subtotal + GST)                        │
//! │                                 │                                       │
//! │           (optional) rounded final = round(final price)                 │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! ## Rounding Rule
//! Every breakdown field is rounded to paise on its own, but the final
//! price is rounded ONCE from the unrounded subtotal + GST. Summing the
//! rounded fields can therefore differ from `final_price` by a few paise.

use serde::{Deserialize, Serialize};
use tracing::trace;
use ts_rs::TS;

use crate::charge::{making_charge, wastage_charge};
use crate::money::{Money, Rate, Weight};
use crate::types::ChargeSpec;

// =============================================================================
// Price Input
// =============================================================================

/// Everything needed to price one catalog item.
///
/// Built by the caller (usually via [`crate::adapter::ProductRecord`]) right
/// before display or invoicing; never persisted in this form.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, TS)]
#[ts(export)]
#[serde(rename_all = "camelCase")]
pub struct PriceInput {
    /// Metal weight excluding stones, in grams.
    #[ts(as = "String")]
    pub net_weight: Weight,

    /// Today's rate for the item's metal category.
    #[ts(as = "String")]
    pub price_per_gram: Money,

    #[serde(default)]
    pub making_charge: ChargeSpec,

    #[serde(default)]
    pub wastage_charge: ChargeSpec,

    #[ts(as = "String")]
    #[serde(default)]
    pub additional_cost: Money,

    #[ts(as = "String")]
    #[serde(default)]
    pub stone_value: Money,

    /// GST percentage for the item's category.
    #[ts(as = "String")]
    #[serde(default)]
    pub gst_rate: Rate,

    /// Number of pieces. Values below 1 are treated as 1.
    #[serde(default = "default_quantity")]
    pub quantity: u32,

    /// Also emit the final price rounded to a whole rupee.
    #[serde(default)]
    pub round_final_to_rupee: bool,
}

fn default_quantity() -> u32 {
    1
}

impl Default for PriceInput {
    fn default() -> Self {
        PriceInput {
            net_weight: Weight::zero(),
            price_per_gram: Money::zero(),
            making_charge: ChargeSpec::none(),
            wastage_charge: ChargeSpec::none(),
            additional_cost: Money::zero(),
            stone_value: Money::zero(),
            gst_rate: Rate::zero(),
            quantity: default_quantity(),
            round_final_to_rupee: false,
        }
    }
}

impl PriceInput {
    /// Starts an input for `net_weight` grams at `price_per_gram`.
    pub fn new(net_weight: Weight, price_per_gram: Money) -> Self {
        PriceInput {
            net_weight,
            price_per_gram,
            ..PriceInput::default()
        }
    }

    pub fn with_making_charge(mut self, spec: ChargeSpec) -> Self {
        self.making_charge = spec;
        self
    }

    pub fn with_wastage_charge(mut self, spec: ChargeSpec) -> Self {
        self.wastage_charge = spec;
        self
    }

    pub fn with_additional_cost(mut self, cost: Money) -> Self {
        self.additional_cost = cost;
        self
    }

    pub fn with_stone_value(mut self, value: Money) -> Self {
        self.stone_value = value;
        self
    }

    pub fn with_gst_rate(mut self, rate: Rate) -> Self {
        self.gst_rate = rate;
        self
    }

    pub fn with_quantity(mut self, quantity: u32) -> Self {
        self.quantity = quantity;
        self
    }

    pub fn with_round_to_rupee(mut self, round: bool) -> Self {
        self.round_final_to_rupee = round;
        self
    }

    /// Piece count used in calculations (never below 1).
    #[inline]
    pub fn piece_quantity(&self) -> u32 {
        self.quantity.max(1)
    }
}

// =============================================================================
// Price Breakdown
// =============================================================================

/// Per-item price breakdown. All money fields carry exactly 2 decimals.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, TS)]
#[ts(export)]
#[serde(rename_all = "camelCase")]
pub struct PriceBreakdown {
    #[ts(as = "String")]
    pub gold_value: Money,
    #[ts(as = "String")]
    pub wastage_charge: Money,
    #[ts(as = "String")]
    pub making_charge: Money,
    #[ts(as = "String")]
    pub additional_cost: Money,
    #[ts(as = "String")]
    pub stone_value: Money,
    /// Sum of the five components above (rounded after summing).
    #[ts(as = "String")]
    pub subtotal: Money,
    #[ts(as = "String")]
    pub gst_amount: Money,
    /// `round2(subtotal + gst)` computed from unrounded components.
    #[ts(as = "String")]
    pub final_price: Money,
    /// Whole-rupee final price, present when rounding was requested.
    #[ts(as = "Option<String>")]
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub final_price_rounded: Option<Money>,
}

impl PriceBreakdown {
    /// The amount the customer pays for one item: the whole-rupee price
    /// when present, else `final_price`.
    pub fn payable(&self) -> Money {
        self.final_price_rounded.unwrap_or(self.final_price)
    }
}

/// Computes the price breakdown for one item.
///
/// Pure and total: negative or out-of-range inputs are not rejected here
/// (run [`crate::validation::validate_price_input`] first when that
/// matters).
///
/// ## Example
/// ```rust
/// use rust_decimal::Decimal;
/// use swarna_core::money::{Money, Rate, Weight};
/// use swarna_core::pricing::{compute_final_price, PriceInput};
/// use swarna_core::types::ChargeSpec;
///
/// let input = PriceInput::new(Weight::grams(Decimal::new(10, 0)), Money::from_rupees(6000))
///     .with_making_charge(ChargeSpec::percentage(Decimal::new(10, 0)))
///     .with_wastage_charge(ChargeSpec::per_gram(Decimal::new(50, 0)))
///     .with_gst_rate(Rate::percent(Decimal::new(3, 0)));
///
/// let breakdown = compute_final_price(&input);
/// assert_eq!(breakdown.final_price, Money::from_rupees(68495));
/// ```
pub fn compute_final_price(input: &PriceInput) -> PriceBreakdown {
    let pieces = input.piece_quantity();

    let gold_value = input.net_weight * input.price_per_gram;
    let wastage = wastage_charge(gold_value, input.net_weight, pieces, &input.wastage_charge);
    let making = making_charge(gold_value, input.net_weight, pieces, &input.making_charge);

    let subtotal = gold_value + wastage + making + input.additional_cost + input.stone_value;
    let gst_amount = input.gst_rate.of(subtotal);
    let final_price = (subtotal + gst_amount).round_paise();

    let final_price_rounded = input
        .round_final_to_rupee
        .then(|| final_price.round_rupee());

    trace!(
        gold_value = %gold_value.amount(),
        wastage = %wastage.amount(),
        making = %making.amount(),
        subtotal = %subtotal.amount(),
        gst = %gst_amount.amount(),
        final_price = %final_price.amount(),
        "Computed item price"
    );

    PriceBreakdown {
        gold_value: gold_value.round_paise(),
        wastage_charge: wastage.round_paise(),
        making_charge: making.round_paise(),
        additional_cost: input.additional_cost.round_paise(),
        stone_value: input.stone_value.round_paise(),
        subtotal: subtotal.round_paise(),
        gst_amount: gst_amount.round_paise(),
        final_price,
        final_price_rounded,
    }
}

// =============================================================================
// Purchase Order Line
// =============================================================================

/// A priced purchase-order line: one item's breakdown plus line totals.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, TS)]
#[ts(export)]
#[serde(rename_all = "camelCase")]
pub struct PurchaseOrderLinePrice {
    pub breakdown: PriceBreakdown,
    pub quantity: u32,
    #[ts(as = "String")]
    pub line_subtotal: Money,
    #[ts(as = "String")]
    pub line_gst: Money,
    #[ts(as = "String")]
    pub line_total: Money,
}

/// Prices a purchase-order line: the per-item breakdown multiplied by the
/// line quantity.
///
/// ## Per-Piece Wastage
/// `compute_final_price` already multiplies a `PerPiece` wastage charge by
/// the quantity; multiplying the line by the quantity again applies it
/// twice. This matches how existing purchase orders were priced and is kept
/// as-is (see DESIGN.md).
pub fn calculate_purchase_order_item_price(input: &PriceInput) -> PurchaseOrderLinePrice {
    let breakdown = compute_final_price(input);
    let quantity = input.piece_quantity();

    PurchaseOrderLinePrice {
        line_subtotal: breakdown.subtotal.multiply_quantity(quantity).round_paise(),
        line_gst: breakdown.gst_amount.multiply_quantity(quantity).round_paise(),
        line_total: breakdown.final_price.multiply_quantity(quantity).round_paise(),
        quantity,
        breakdown,
    }
}

// =============================================================================
// Unit Tests
// =============================================================================
