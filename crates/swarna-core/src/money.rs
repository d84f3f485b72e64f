//! # Money Module
//!
//! Provides the `Money`, `Weight` and `Rate` types used by every pricing
//! calculation.
//!
//! ## Why Decimal?
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │  THE FLOATING POINT PROBLEM                                             │
//! │                                                                         │
//! │  With binary floats:                                                    │
//! │    10.125 g × ₹6,000.10 = 60751.01249999999  ❌ rounds the wrong way    │
//! │                                                                         │
//! │  Jewellery pricing multiplies 3-dp weights by 2-dp rates and then      │
//! │  percentages, so paise-level errors show up on every invoice.          │
//! │                                                                         │
//! │  OUR SOLUTION: base-10 Decimal                                          │
//! │    10.125 × 6000.10 = 60751.0125 exactly → ₹60,751.01                  │
//! │    Rounding happens ONLY where the pricing rules say it does           │
//! │                                                                         │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! ## Usage
//! ```rust
//! use rust_decimal::Decimal;
//! use swarna_core::money::{Money, Rate, Weight};
//!
//! let rate = Money::from_rupees(6000);           // ₹6,000 per gram
//! let weight = Weight::grams(Decimal::new(10, 0)); // 10 g
//! let gold_value = weight * rate;                // ₹60,000
//! let gst = Rate::percent(Decimal::new(3, 0)).of(gold_value);
//! assert_eq!(gst, Money::from_rupees(1800));
//! ```

use rust_decimal::{Decimal, RoundingStrategy};
use serde::{Deserialize, Serialize};
use std::fmt;
use std::iter::Sum;
use std::ops::{Add, AddAssign, Mul, Neg, Sub, SubAssign};

use crate::format::{format_currency, format_weight, FractionDigits};

/// Decimal places carried by monetary values after rounding (paise).
pub const MONEY_SCALE: u32 = 2;

/// Decimal places carried by weights after rounding (milligrams).
pub const WEIGHT_SCALE: u32 = 3;

/// Rounds half away from zero and pins the scale, so `60000` comes back
/// as `60000.00` when `dp` is 2.
pub(crate) fn round_to(value: Decimal, dp: u32) -> Decimal {
    let mut rounded = value.round_dp_with_strategy(dp, RoundingStrategy::MidpointAwayFromZero);
    rounded.rescale(dp);
    rounded
}

// =============================================================================
// Saturating Arithmetic
// =============================================================================
//
// Products of large weights and rates can exceed Decimal's ~7.9e28 range.
// Every operator on Money/Weight/Rate clamps to `Decimal::MAX`/`Decimal::MIN`
// instead of panicking, so the compositor stays total.

fn saturated(negative: bool) -> Decimal {
    if negative {
        Decimal::MIN
    } else {
        Decimal::MAX
    }
}

#[inline]
pub(crate) fn saturating_add(a: Decimal, b: Decimal) -> Decimal {
    a.checked_add(b).unwrap_or_else(|| saturated(a.is_sign_negative()))
}

#[inline]
pub(crate) fn saturating_sub(a: Decimal, b: Decimal) -> Decimal {
    a.checked_sub(b).unwrap_or_else(|| saturated(a.is_sign_negative()))
}

#[inline]
pub(crate) fn saturating_mul(a: Decimal, b: Decimal) -> Decimal {
    a.checked_mul(b)
        .unwrap_or_else(|| saturated(a.is_sign_negative() != b.is_sign_negative()))
}

// =============================================================================
// Money Type
// =============================================================================

/// A monetary value in rupees.
///
/// ## Design Decisions
/// - **Decimal, not paise-as-integer**: intermediate values (gold value,
///   percentage charges, GST) must stay unrounded until the final sum
/// - **Signed**: negative inputs are not rejected by the engine, so
///   negative amounts must be representable
/// - **Transparent serde**: serializes as a decimal string, accepts JSON
///   strings or numbers
///
/// ## Where Money is Used
/// ```text
/// ┌─────────────────────────────────────────────────────────────────────────┐
/// │  price per gram ──► gold value ──┬──► wastage ──┐                       │
/// │                                  └──► making ───┼──► subtotal ──► GST   │
/// │  additional cost ───────────────────────────────┤                       │
/// │  stone value ───────────────────────────────────┘        final price   │
/// └─────────────────────────────────────────────────────────────────────────┘
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct Money(Decimal);

impl Money {
    /// Wraps a rupee amount.
    #[inline]
    pub const fn new(amount: Decimal) -> Self {
        Money(amount)
    }

    /// Creates a whole-rupee amount.
    ///
    /// ## Example
    /// ```rust
    /// use swarna_core::money::Money;
    ///
    /// let price = Money::from_rupees(6000);
    /// assert_eq!(price.to_string(), "₹6,000.00");
    /// ```
    #[inline]
    pub fn from_rupees(rupees: i64) -> Self {
        Money(Decimal::from(rupees))
    }

    /// Creates an amount from paise (1/100 rupee).
    ///
    /// ## Example
    /// ```rust
    /// use swarna_core::money::Money;
    ///
    /// let price = Money::from_paise(1099); // ₹10.99
    /// assert_eq!(price.to_string(), "₹10.99");
    /// ```
    #[inline]
    pub fn from_paise(paise: i64) -> Self {
        Money(Decimal::new(paise, MONEY_SCALE))
    }

    /// Returns zero rupees.
    #[inline]
    pub const fn zero() -> Self {
        Money(Decimal::ZERO)
    }

    /// Returns the underlying decimal amount.
    #[inline]
    pub const fn amount(&self) -> Decimal {
        self.0
    }

    /// Checks if the value is zero.
    #[inline]
    pub fn is_zero(&self) -> bool {
        self.0.is_zero()
    }

    /// Checks if the value is negative (less than zero).
    #[inline]
    pub fn is_negative(&self) -> bool {
        self.0.is_sign_negative() && !self.0.is_zero()
    }

    /// Rounds to paise (2 dp, half away from zero).
    ///
    /// ## Example
    /// ```rust
    /// use rust_decimal::Decimal;
    /// use swarna_core::money::Money;
    ///
    /// let raw = Money::new(Decimal::new(60751_0125, 4)); // 60751.0125
    /// assert_eq!(raw.round_paise(), Money::from_paise(6075101));
    /// ```
    #[inline]
    pub fn round_paise(&self) -> Self {
        Money(round_to(self.0, MONEY_SCALE))
    }

    /// Rounds to the nearest whole rupee.
    #[inline]
    pub fn round_rupee(&self) -> Self {
        Money(round_to(self.0, 0))
    }

    /// Multiplies by a piece or line quantity.
    #[inline]
    pub fn multiply_quantity(&self, qty: u32) -> Self {
        Money(saturating_mul(self.0, Decimal::from(qty)))
    }
}

// =============================================================================
// Weight Type
// =============================================================================

/// A metal weight in grams.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct Weight(Decimal);

impl Weight {
    /// Wraps a gram value.
    #[inline]
    pub const fn grams(grams: Decimal) -> Self {
        Weight(grams)
    }

    /// Returns zero grams.
    #[inline]
    pub const fn zero() -> Self {
        Weight(Decimal::ZERO)
    }

    /// Returns the underlying gram value.
    #[inline]
    pub const fn value(&self) -> Decimal {
        self.0
    }

    /// Checks if the value is zero.
    #[inline]
    pub fn is_zero(&self) -> bool {
        self.0.is_zero()
    }

    /// Rounds to milligrams (3 dp, half away from zero).
    #[inline]
    pub fn round_mg(&self) -> Self {
        Weight(round_to(self.0, WEIGHT_SCALE))
    }

    /// Multiplies by a piece or line quantity.
    #[inline]
    pub fn multiply_quantity(&self, qty: u32) -> Self {
        Weight(saturating_mul(self.0, Decimal::from(qty)))
    }
}

// =============================================================================
// Rate Type
// =============================================================================

/// A percentage rate, stored as the human number (`3` means 3%).
///
/// ## Why not basis points?
/// Making-charge percentages like 12.75% and per-category GST rates are
/// entered as decimals in the catalog; keeping the entered value avoids a
/// lossy conversion step.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct Rate(Decimal);

impl Rate {
    /// Creates a rate from a percentage value.
    #[inline]
    pub const fn percent(pct: Decimal) -> Self {
        Rate(pct)
    }

    /// Zero rate.
    #[inline]
    pub const fn zero() -> Self {
        Rate(Decimal::ZERO)
    }

    /// Returns the percentage value.
    #[inline]
    pub const fn value(&self) -> Decimal {
        self.0
    }

    /// Checks if the rate is zero.
    #[inline]
    pub fn is_zero(&self) -> bool {
        self.0.is_zero()
    }

    /// Applies the rate to an amount without rounding. Saturates at the
    /// Decimal range like every other operator here.
    ///
    /// ## Example
    /// ```rust
    /// use rust_decimal::Decimal;
    /// use swarna_core::money::{Money, Rate};
    ///
    /// let gst = Rate::percent(Decimal::new(3, 0)).of(Money::from_rupees(66500));
    /// assert_eq!(gst, Money::from_rupees(1995));
    /// ```
    #[inline]
    pub fn of(&self, amount: Money) -> Money {
        Money(saturating_mul(amount.0, self.0 / Decimal::ONE_HUNDRED))
    }
}

impl Default for Rate {
    fn default() -> Self {
        Rate::zero()
    }
}

// =============================================================================
// Trait Implementations
// =============================================================================

/// Display uses the invoice format: `₹1,23,456.78`.
impl fmt::Display for Money {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&format_currency(*self, FractionDigits::Two))
    }
}

impl fmt::Display for Weight {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&format_weight(*self))
    }
}

impl fmt::Display for Rate {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}%", self.0.normalize())
    }
}

impl Default for Money {
    fn default() -> Self {
        Money::zero()
    }
}

impl Default for Weight {
    fn default() -> Self {
        Weight::zero()
    }
}

impl Add for Money {
    type Output = Self;

    #[inline]
    fn add(self, other: Self) -> Self {
        Money(saturating_add(self.0, other.0))
    }
}

impl AddAssign for Money {
    #[inline]
    fn add_assign(&mut self, other: Self) {
        self.0 = saturating_add(self.0, other.0);
    }
}

impl Sub for Money {
    type Output = Self;

    #[inline]
    fn sub(self, other: Self) -> Self {
        Money(saturating_sub(self.0, other.0))
    }
}

impl SubAssign for Money {
    #[inline]
    fn sub_assign(&mut self, other: Self) {
        self.0 = saturating_sub(self.0, other.0);
    }
}

impl Neg for Money {
    type Output = Self;

    #[inline]
    fn neg(self) -> Self {
        Money(-self.0)
    }
}

/// Scaling by a plain factor (per-gram discount × grams, etc.).
impl Mul<Decimal> for Money {
    type Output = Self;

    #[inline]
    fn mul(self, factor: Decimal) -> Self {
        Money(saturating_mul(self.0, factor))
    }
}

impl Mul<u32> for Money {
    type Output = Self;

    #[inline]
    fn mul(self, qty: u32) -> Self {
        self.multiply_quantity(qty)
    }
}

impl Sum for Money {
    fn sum<I: Iterator<Item = Self>>(iter: I) -> Self {
        iter.fold(Money::zero(), Add::add)
    }
}

/// Weight × price-per-gram = value.
impl Mul<Money> for Weight {
    type Output = Money;

    #[inline]
    fn mul(self, per_gram: Money) -> Money {
        Money(saturating_mul(self.0, per_gram.0))
    }
}

impl Mul<u32> for Weight {
    type Output = Self;

    #[inline]
    fn mul(self, qty: u32) -> Self {
        self.multiply_quantity(qty)
    }
}

impl Add for Weight {
    type Output = Self;

    #[inline]
    fn add(self, other: Self) -> Self {
        Weight(saturating_add(self.0, other.0))
    }
}

impl AddAssign for Weight {
    #[inline]
    fn add_assign(&mut self, other: Self) {
        self.0 = saturating_add(self.0, other.0);
    }
}

impl Sum for Weight {
    fn sum<I: Iterator<Item = Self>>(iter: I) -> Self {
        iter.fold(Weight::zero(), Add::add)
    }
}

// =============================================================================
// Unit Tests
// =============================================================================
