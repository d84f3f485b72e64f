//! # Validation Module
//!
//! Input checks callers run BEFORE handing data to the calculators.
//!
//! ## Validation Strategy
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                      Validation Layers                                  │
//! │                                                                         │
//! │  Layer 1: Data entry (forms)                                           │
//! │  ├── Range checks as the user types                                    │
//! │  └── validate_charge_configuration() for instant feedback              │
//! │           │                                                             │
//! │           ▼                                                             │
//! │  Layer 2: Save / invoice boundary                                      │
//! │  └── THIS MODULE: validate_price_input(), validate_invoice_item()      │
//! │           │                                                             │
//! │           ▼                                                             │
//! │  Layer 3: Calculators (pricing, order, invoice)                        │
//! │  └── NO checks: total over any input, safe for live recalculation     │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```

use rust_decimal::Decimal;

use crate::error::ValidationError;
use crate::invoice::InvoiceItemData;
use crate::money::{Money, Rate, Weight};
use crate::pricing::PriceInput;
use crate::types::{ChargeKind, ChargeSpec, ChargeType, DiscountRule};
use crate::MAX_PIECE_QUANTITY;

/// Result type for validation operations.
pub type ValidationResult<T> = Result<T, ValidationError>;

// =============================================================================
// Charge Configuration Hook
// =============================================================================

/// Predicate for a charge scheme as entered on a product form.
///
/// ## Rules
/// - No type → valid (value ignored)
/// - A type with a missing or negative value → invalid
/// - `Percentage` above 100 → invalid
/// - Anything else → valid
///
/// ## Example
/// ```rust
/// use rust_decimal::Decimal;
/// use swarna_core::types::ChargeType;
/// use swarna_core::validation::validate_charge_configuration;
///
/// assert!(!validate_charge_configuration(Some(ChargeType::Percentage), Some(Decimal::from(150))));
/// assert!(validate_charge_configuration(Some(ChargeType::Percentage), Some(Decimal::from(50))));
/// assert!(validate_charge_configuration(None, None));
/// ```
pub fn validate_charge_configuration(charge_type: Option<ChargeType>, value: Option<Decimal>) -> bool {
    let charge_type = match charge_type {
        None | Some(ChargeType::None) => return true,
        Some(t) => t,
    };

    match value {
        None => false,
        Some(v) if v.is_sign_negative() && !v.is_zero() => false,
        Some(v) if charge_type == ChargeType::Percentage && v > Decimal::ONE_HUNDRED => false,
        Some(_) => true,
    }
}

/// The same predicate over a free-form type code, as a form submits it.
///
/// A blank code means no charge. A code that names no known type is still
/// a configured charge: it needs a non-negative value, and the calculator
/// prices it as zero.
pub fn validate_charge_code(code: Option<&str>, value: Option<Decimal>) -> bool {
    let code = match code.map(str::trim) {
        None | Some("") => return true,
        Some(code) => code,
    };

    match code.parse::<ChargeType>() {
        Ok(charge_type) => validate_charge_configuration(Some(charge_type), value),
        Err(_) => matches!(value, Some(v) if !v.is_sign_negative() || v.is_zero()),
    }
}

// =============================================================================
// Field Validators
// =============================================================================

/// Validates a metal category code such as `GOLD22` or `SILVER-925`.
///
/// ## Rules
/// - Must not be blank
/// - ASCII letters, digits, `_` and `-` only
pub fn validate_category_code(field: &str, code: &str) -> ValidationResult<()> {
    let code = code.trim();
    if code.is_empty() {
        return Err(ValidationError::Required {
            field: field.to_string(),
        });
    }

    if let Some(c) = code
        .chars()
        .find(|c| !(c.is_ascii_alphanumeric() || *c == '_' || *c == '-'))
    {
        return Err(ValidationError::InvalidFormat {
            field: field.to_string(),
            reason: format!("unexpected character '{}'", c),
        });
    }

    Ok(())
}

/// Validates a GST rate (0–100%).
pub fn validate_gst_rate(rate: Rate) -> ValidationResult<()> {
    validate_percentage("gst_rate", rate.value())
}

/// Validates a weight field (must be > 0).
pub fn validate_weight(field: &str, weight: Weight) -> ValidationResult<()> {
    if weight.value() <= Decimal::ZERO {
        return Err(ValidationError::MustBePositive {
            field: field.to_string(),
        });
    }

    Ok(())
}

/// Validates a money field that may be zero but not negative.
pub fn validate_non_negative(field: &str, amount: Money) -> ValidationResult<()> {
    if amount.is_negative() {
        return Err(ValidationError::MustNotBeNegative {
            field: field.to_string(),
        });
    }

    Ok(())
}

/// Validates a piece / line quantity.
///
/// ## Rules
/// - Must be at least 1
/// - Must not exceed MAX_PIECE_QUANTITY
pub fn validate_quantity(qty: u32) -> ValidationResult<()> {
    if qty == 0 {
        return Err(ValidationError::MustBePositive {
            field: "quantity".to_string(),
        });
    }

    if qty > MAX_PIECE_QUANTITY {
        return Err(ValidationError::OutOfRange {
            field: "quantity".to_string(),
            min: "1".to_string(),
            max: MAX_PIECE_QUANTITY.to_string(),
        });
    }

    Ok(())
}

/// Validates a charge scheme for the charge it configures.
///
/// Stricter than [`validate_charge_configuration`]: it also rejects a
/// per-piece MAKING charge, which the calculator would silently price at 0.
pub fn validate_charge_spec(kind: ChargeKind, spec: &ChargeSpec) -> ValidationResult<()> {
    if spec.charge_type.is_none() {
        return Ok(());
    }

    if !kind.supports(spec.charge_type) {
        return Err(ValidationError::NotAllowed {
            field: format!("{}.type", kind),
            allowed: [
                ChargeType::None,
                ChargeType::Percentage,
                ChargeType::PerGram,
                ChargeType::FixedAmount,
            ]
            .iter()
            .map(|t| t.code().to_string())
            .collect(),
        });
    }

    let field = format!("{}.value", kind);
    if spec.value.is_sign_negative() && !spec.value.is_zero() {
        return Err(ValidationError::MustNotBeNegative { field });
    }

    if spec.charge_type == ChargeType::Percentage {
        validate_percentage(&field, spec.value)?;
    }

    Ok(())
}

fn validate_percentage(field: &str, value: Decimal) -> ValidationResult<()> {
    if value < Decimal::ZERO || value > Decimal::ONE_HUNDRED {
        return Err(ValidationError::OutOfRange {
            field: field.to_string(),
            min: "0".to_string(),
            max: "100".to_string(),
        });
    }

    Ok(())
}

// =============================================================================
// Record Validators
// =============================================================================

/// Validates a full price input. Returns the first failure.
pub fn validate_price_input(input: &PriceInput) -> ValidationResult<()> {
    validate_weight("net_weight", input.net_weight)?;
    validate_non_negative("price_per_gram", input.price_per_gram)?;
    validate_charge_spec(ChargeKind::Making, &input.making_charge)?;
    validate_charge_spec(ChargeKind::Wastage, &input.wastage_charge)?;
    validate_non_negative("additional_cost", input.additional_cost)?;
    validate_non_negative("stone_value", input.stone_value)?;
    validate_gst_rate(input.gst_rate)?;
    validate_quantity(input.quantity)?;
    Ok(())
}

/// Validates one invoice line.
///
/// Net weight may not exceed gross weight.
pub fn validate_invoice_item(item: &InvoiceItemData) -> ValidationResult<()> {
    validate_weight("gross_weight", item.gross_weight)?;
    validate_weight("net_weight", item.net_weight)?;

    if item.net_weight > item.gross_weight {
        return Err(ValidationError::OutOfRange {
            field: "net_weight".to_string(),
            min: "0".to_string(),
            max: item.gross_weight.value().to_string(),
        });
    }

    validate_non_negative("gold_rate", item.gold_rate)?;
    validate_non_negative("labour_rate", item.labour_rate)?;
    validate_non_negative("additional_cost", item.additional_cost)?;
    validate_gst_rate(item.gst_rate)?;
    validate_quantity(item.quantity)?;
    Ok(())
}

/// Validates an order-level discount rule.
pub fn validate_discount_rule(rule: &DiscountRule) -> ValidationResult<()> {
    if let Some(pct) = rule.making_charge_discount_percentage {
        validate_percentage("making_charge_discount_percentage", pct.value())?;
    }

    if let Some(per_gram) = rule.gold_value_discount_per_gram {
        validate_non_negative("gold_value_discount_per_gram", per_gram)?;
    }

    Ok(())
}

// =============================================================================
// Unit Tests
// =============================================================================
