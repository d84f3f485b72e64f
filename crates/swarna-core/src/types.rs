//! # Domain Types
//!
//! Charge configuration and discount types shared by the pricing paths.
//!
//! ## Type Map
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                         Domain Types                                    │
//! │                                                                         │
//! │  ┌─────────────────┐   ┌─────────────────┐   ┌─────────────────┐       │
//! │  │   ChargeType    │   │   ChargeSpec    │   │   ChargeKind    │       │
//! │  │  ─────────────  │   │  ─────────────  │   │  ─────────────  │       │
//! │  │  None           │   │  charge_type    │   │  Making         │       │
//! │  │  Percentage     │   │  value          │   │  Wastage        │       │
//! │  │  PerGram        │   └─────────────────┘   └─────────────────┘       │
//! │  │  FixedAmount    │                                                    │
//! │  │  PerPiece       │   ┌─────────────────────────────────────────┐     │
//! │  └─────────────────┘   │  DiscountRule (order level)             │     │
//! │                        │  making_charge_discount_percentage?     │     │
//! │                        │  gold_value_discount_per_gram?          │     │
//! │                        └─────────────────────────────────────────┘     │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```

use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;
use ts_rs::TS;

use crate::error::CoreError;
use crate::money::{Money, Rate};

// =============================================================================
// Charge Type
// =============================================================================

/// How a making or wastage charge is computed.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize, TS)]
#[ts(export)]
#[serde(rename_all = "snake_case")]
pub enum ChargeType {
    /// No charge; the value is ignored.
    #[default]
    None,
    /// Percentage of the item's gold value.
    Percentage,
    /// Rupees per gram of net weight.
    PerGram,
    /// Flat rupee amount, independent of weight and pieces.
    FixedAmount,
    /// Rupees per piece. Only meaningful for wastage.
    PerPiece,
}

impl ChargeType {
    /// Returns true when the charge contributes nothing.
    #[inline]
    pub fn is_none(&self) -> bool {
        matches!(self, ChargeType::None)
    }

    /// Canonical code used in configuration and JSON.
    pub fn code(&self) -> &'static str {
        match self {
            ChargeType::None => "none",
            ChargeType::Percentage => "percentage",
            ChargeType::PerGram => "per_gram",
            ChargeType::FixedAmount => "fixed_amount",
            ChargeType::PerPiece => "per_piece",
        }
    }
}

impl fmt::Display for ChargeType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.code())
    }
}

/// Accepts the spellings found in catalog data: `per_gram`, `PER_GRAM`,
/// `per-gram`, `PerGram`, `fixed`, `percent`, ...
impl FromStr for ChargeType {
    type Err = CoreError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let normalized: String = s
            .chars()
            .filter(|c| !matches!(c, '_' | '-' | ' '))
            .flat_map(char::to_lowercase)
            .collect();

        match normalized.as_str() {
            "" | "none" => Ok(ChargeType::None),
            "percentage" | "percent" | "%" => Ok(ChargeType::Percentage),
            "pergram" | "gram" => Ok(ChargeType::PerGram),
            "fixedamount" | "fixed" | "flat" => Ok(ChargeType::FixedAmount),
            "perpiece" | "piece" => Ok(ChargeType::PerPiece),
            _ => Err(CoreError::UnknownChargeType(s.to_string())),
        }
    }
}

// =============================================================================
// Charge Kind
// =============================================================================

/// Which of the two configurable charges is being computed.
///
/// `PerPiece` only has a meaning for wastage; a per-piece making charge is
/// a configuration mistake and contributes zero.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ChargeKind {
    Making,
    Wastage,
}

impl ChargeKind {
    /// Returns true when `charge_type` is computed for this kind.
    pub fn supports(&self, charge_type: ChargeType) -> bool {
        !matches!((self, charge_type), (ChargeKind::Making, ChargeType::PerPiece))
    }
}

impl fmt::Display for ChargeKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ChargeKind::Making => write!(f, "making_charge"),
            ChargeKind::Wastage => write!(f, "wastage_charge"),
        }
    }
}

// =============================================================================
// Charge Spec
// =============================================================================

/// A `{type, value}` charge scheme configured on a product.
///
/// ## Invariants
/// - `value` is non-negative
/// - `Percentage` values are at most 100
/// - `None` contributes zero whatever `value` holds
///
/// These are checked by [`crate::validation::validate_charge_spec`], not
/// enforced by construction, so that live recalculation can run on
/// half-entered data.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize, TS)]
#[ts(export)]
#[serde(rename_all = "camelCase")]
pub struct ChargeSpec {
    #[serde(rename = "type", default)]
    pub charge_type: ChargeType,
    #[ts(as = "String")]
    #[serde(default)]
    pub value: Decimal,
}

impl ChargeSpec {
    pub const fn new(charge_type: ChargeType, value: Decimal) -> Self {
        ChargeSpec { charge_type, value }
    }

    /// No charge.
    pub const fn none() -> Self {
        ChargeSpec::new(ChargeType::None, Decimal::ZERO)
    }

    /// Percentage of gold value (`10` = 10%).
    pub const fn percentage(pct: Decimal) -> Self {
        ChargeSpec::new(ChargeType::Percentage, pct)
    }

    /// Rupees per gram of net weight.
    pub const fn per_gram(rupees: Decimal) -> Self {
        ChargeSpec::new(ChargeType::PerGram, rupees)
    }

    /// Flat rupee amount.
    pub const fn fixed(rupees: Decimal) -> Self {
        ChargeSpec::new(ChargeType::FixedAmount, rupees)
    }

    /// Rupees per piece.
    pub const fn per_piece(rupees: Decimal) -> Self {
        ChargeSpec::new(ChargeType::PerPiece, rupees)
    }
}

// =============================================================================
// Discount Rule
// =============================================================================

/// Order-level discount, applied after item totals are summed.
///
/// ## Calculation
/// ```text
/// making discount = total making charges × pct / 100
/// gold discount   = total gold weight × discount per gram
/// total discount  = making discount + gold discount
/// ```
/// Absent fields count as zero.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize, TS)]
#[ts(export)]
#[serde(rename_all = "camelCase")]
pub struct DiscountRule {
    #[ts(as = "Option<String>")]
    #[serde(default)]
    pub making_charge_discount_percentage: Option<Rate>,
    #[ts(as = "Option<String>")]
    #[serde(default)]
    pub gold_value_discount_per_gram: Option<Money>,
}

impl DiscountRule {
    /// A rule that discounts nothing.
    pub const fn none() -> Self {
        DiscountRule {
            making_charge_discount_percentage: None,
            gold_value_discount_per_gram: None,
        }
    }

    pub fn making_pct(&self) -> Rate {
        self.making_charge_discount_percentage.unwrap_or_default()
    }

    pub fn gold_per_gram(&self) -> Money {
        self.gold_value_discount_per_gram.unwrap_or_default()
    }
}

// =============================================================================
// Unit Tests
// =============================================================================
