//! # Charge Calculator
//!
//! Turns a `{type, value}` charge scheme into a rupee amount.
//!
//! ## Formulas
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │  ChargeType     amount                                                  │
//! │  ───────────    ──────────────────────────────────────────────────      │
//! │  Percentage     gold value × value / 100                                │
//! │  PerGram        net weight × value                                      │
//! │  FixedAmount    value                                                   │
//! │  PerPiece       pieces × value        (wastage only, making → 0)        │
//! │  None           0                                                       │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! The percentage base is always the gold value for BOTH charges, never a
//! running subtotal, so the order the two charges are computed in does not
//! change the result.
//!
//! Amounts are returned unrounded.

use crate::money::{Money, Rate, Weight};
use crate::types::{ChargeKind, ChargeSpec, ChargeType};

/// Computes a charge amount.
///
/// ## Example
/// ```rust
/// use rust_decimal::Decimal;
/// use swarna_core::charge::charge_amount;
/// use swarna_core::money::{Money, Weight};
/// use swarna_core::types::{ChargeKind, ChargeSpec};
///
/// let gold_value = Money::from_rupees(60000);
/// let weight = Weight::grams(Decimal::new(10, 0));
///
/// let making = charge_amount(
///     ChargeKind::Making,
///     gold_value,
///     weight,
///     1,
///     &ChargeSpec::percentage(Decimal::new(10, 0)),
/// );
/// assert_eq!(making, Money::from_rupees(6000));
/// ```
pub fn charge_amount(
    kind: ChargeKind,
    gold_value: Money,
    net_weight: Weight,
    piece_qty: u32,
    spec: &ChargeSpec,
) -> Money {
    if !kind.supports(spec.charge_type) {
        return Money::zero();
    }

    match spec.charge_type {
        ChargeType::Percentage => Rate::percent(spec.value).of(gold_value),
        ChargeType::PerGram => net_weight * Money::new(spec.value),
        ChargeType::FixedAmount => Money::new(spec.value),
        ChargeType::PerPiece => Money::new(spec.value).multiply_quantity(piece_qty),
        ChargeType::None => Money::zero(),
    }
}

/// Making (labour) charge for an item.
#[inline]
pub fn making_charge(gold_value: Money, net_weight: Weight, piece_qty: u32, spec: &ChargeSpec) -> Money {
    charge_amount(ChargeKind::Making, gold_value, net_weight, piece_qty, spec)
}

/// Wastage charge for an item.
#[inline]
pub fn wastage_charge(gold_value: Money, net_weight: Weight, piece_qty: u32, spec: &ChargeSpec) -> Money {
    charge_amount(ChargeKind::Wastage, gold_value, net_weight, piece_qty, spec)
}
