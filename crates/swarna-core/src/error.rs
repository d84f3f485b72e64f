//! # Error Types
//!
//! Domain-specific error types for swarna-core.
//!
//! ## Error Hierarchy
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                         Error Types                                     │
//! │                                                                         │
//! │  swarna-core errors (this file)                                        │
//! │  ├── CoreError        - Boundary failures (rates, categories, codes)   │
//! │  └── ValidationError  - Input validation failures                      │
//! │                                                                         │
//! │  CLI errors (apps/cli)                                                 │
//! │  └── CliError         - IO, parse and config failures                  │
//! │                                                                         │
//! │  NOTE: the price / order / invoice calculations never return errors.   │
//! │  They are total over their inputs; validation happens before them.     │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```

use chrono::NaiveDate;
use thiserror::Error;

// =============================================================================
// Core Error
// =============================================================================

/// Errors raised at the edges of the pricing engine.
#[derive(Debug, Error)]
pub enum CoreError {
    /// A charge-type code from a product record is not recognised.
    #[error("Unknown charge type: '{0}'")]
    UnknownChargeType(String),

    /// No price-of-the-day has been published for a category.
    ///
    /// ## When This Occurs
    /// - Today's rate has not been entered yet
    /// - The product's category code has no rate entries at all
    #[error("No price per gram for category {category} on {date}")]
    PriceNotFound { category: String, date: NaiveDate },

    /// Attempt to delete one of the seed categories.
    #[error("Category {0} is protected and cannot be deleted")]
    ProtectedCategory(String),

    /// Validation error (wraps ValidationError).
    #[error("Validation error: {0}")]
    Validation(#[from] ValidationError),
}

// =============================================================================
// Validation Error
// =============================================================================

/// Input validation errors.
///
/// Raised by the `validate_*` functions callers run at the data-entry
/// boundary, before handing inputs to the calculators.
#[derive(Debug, Error, PartialEq)]
pub enum ValidationError {
    /// A required field is missing.
    #[error("{field} is required")]
    Required { field: String },

    /// Numeric value is out of range.
    #[error("{field} must be between {min} and {max}")]
    OutOfRange {
        field: String,
        min: String,
        max: String,
    },

    /// Value must be positive.
    #[error("{field} must be positive")]
    MustBePositive { field: String },

    /// Value must not be negative.
    #[error("{field} must not be negative")]
    MustNotBeNegative { field: String },

    /// Value is not in allowed set.
    #[error("{field} must be one of: {allowed:?}")]
    NotAllowed { field: String, allowed: Vec<String> },

    /// Invalid format (e.g., a category code with spaces).
    #[error("{field} has invalid format: {reason}")]
    InvalidFormat { field: String, reason: String },
}

// =============================================================================
// Result Type Alias
// =============================================================================

/// Convenience type alias for Results with CoreError.
pub type CoreResult<T> = Result<T, CoreError>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_error_messages() {
        let err = CoreError::PriceNotFound {
            category: "GOLD22".to_string(),
            date: NaiveDate::from_ymd_opt(2024, 3, 1).unwrap(),
        };
        assert_eq!(
            err.to_string(),
            "No price per gram for category GOLD22 on 2024-03-01"
        );
    }

    #[test]
    fn test_validation_error_messages() {
        let err = ValidationError::OutOfRange {
            field: "gst_rate".to_string(),
            min: "0".to_string(),
            max: "100".to_string(),
        };
        assert_eq!(err.to_string(), "gst_rate must be between 0 and 100");
    }

    #[test]
    fn test_validation_converts_to_core_error() {
        let validation_err = ValidationError::Required {
            field: "making_charge.value".to_string(),
        };
        let core_err: CoreError = validation_err.into();
        assert!(matches!(core_err, CoreError::Validation(_)));
    }
}
