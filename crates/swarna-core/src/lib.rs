//! # swarna-core: Pure Pricing Engine for Swarna
//!
//! This crate prices jewellery. It turns an item's weight, the day's gold
//! rate and the product's making/wastage charge schemes into a GST-inclusive
//! price, and rolls many priced items up into order and invoice totals.
//!
//! ## Architecture Position
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                        Swarna Architecture                              │
//! │                                                                         │
//! │  ┌─────────────────────────────────────────────────────────────────┐   │
//! │  │          Callers (catalog screens, order entry, CLI)            │   │
//! │  │   resolve today's rate ──► build input ──► render result        │   │
//! │  └─────────────────────────────┬───────────────────────────────────┘   │
//! │                                │                                        │
//! │  ┌─────────────────────────────▼───────────────────────────────────┐   │
//! │  │               ★ swarna-core (THIS CRATE) ★                      │   │
//! │  │                                                                 │   │
//! │  │   ┌──────────┐  ┌──────────┐  ┌──────────┐  ┌──────────────┐   │   │
//! │  │   │  charge  │─►│ pricing  │─►│  order   │  │   invoice    │   │   │
//! │  │   │ schemes  │  │ per item │  │ summary  │  │ labour rate  │   │   │
//! │  │   └──────────┘  └──────────┘  └──────────┘  └──────────────┘   │   │
//! │  │   adapter • rates • catalog • validation • format • strategy   │   │
//! │  │                                                                 │   │
//! │  │   NO I/O • NO DATABASE • NO NETWORK • PURE FUNCTIONS           │   │
//! │  └─────────────────────────────────────────────────────────────────┘   │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! ## Modules
//!
//! - [`money`] - `Money`, `Weight`, `Rate` over exact decimals
//! - [`types`] - Charge schemes and discount rules
//! - [`charge`] - Making / wastage charge amounts
//! - [`pricing`] - Per-item price breakdown and purchase-order lines
//! - [`order`] - Order summary and order-level settlement
//! - [`invoice`] - Labour-rate invoice totals with discounts
//! - [`strategy`] - The two pricing paths as tagged variants
//! - [`validation`] - Boundary checks run before pricing
//! - [`adapter`] - Loose product records → typed inputs
//! - [`rates`] - Price-of-the-day source trait and in-memory book
//! - [`catalog`] - Protected category codes
//! - [`format`] - Indian-locale currency and weight strings
//! - [`error`] - Domain error types
//!
//! ## Design Principles
//!
//! 1. **Pure Functions**: same input = same output, no hidden state
//! 2. **Total Calculators**: pricing never fails; validation is a separate step
//! 3. **Exact Decimals**: no floating point anywhere in the money path
//! 4. **Round Late**: components round to paise individually, the final
//!    price rounds once from the unrounded sum
//!
//! ## Example Usage
//!
//! ```rust
//! use rust_decimal::Decimal;
//! use swarna_core::{compute_final_price, ChargeSpec, Money, PriceInput, Rate, Weight};
//!
//! let input = PriceInput::new(Weight::grams(Decimal::new(10, 0)), Money::from_rupees(6000))
//!     .with_making_charge(ChargeSpec::percentage(Decimal::new(10, 0)))
//!     .with_wastage_charge(ChargeSpec::per_gram(Decimal::new(50, 0)))
//!     .with_gst_rate(Rate::percent(Decimal::new(3, 0)));
//!
//! let breakdown = compute_final_price(&input);
//! assert_eq!(breakdown.final_price.to_string(), "₹68,495.00");
//! ```

// =============================================================================
// Module Declarations
// =============================================================================

pub mod adapter;
pub mod catalog;
pub mod charge;
pub mod error;
pub mod format;
pub mod invoice;
pub mod money;
pub mod order;
pub mod pricing;
pub mod rates;
pub mod strategy;
pub mod types;
pub mod validation;

// =============================================================================
// Re-exports for Convenience
// =============================================================================

pub use adapter::{DiscountRecord, InvoiceLineRecord, ProductRecord};
pub use catalog::ProtectedCategories;
pub use error::{CoreError, CoreResult, ValidationError};
pub use format::{format_currency, format_weight, FractionDigits};
pub use invoice::{calculate_invoice_total, calculate_item_total, InvoiceCalculation, InvoiceItemData, ItemTotal};
pub use money::{Money, Rate, Weight};
pub use order::{calculate_order_summary, OrderLine, OrderSettlement, OrderSummary};
pub use pricing::{
    calculate_purchase_order_item_price, compute_final_price, PriceBreakdown, PriceInput,
    PurchaseOrderLinePrice,
};
pub use rates::{DailyRateBook, PriceOfDay};
pub use strategy::{LineTotal, PricingStrategy};
pub use types::*;
pub use validation::{validate_charge_code, validate_charge_configuration};

// =============================================================================
// Crate-Level Constants
// =============================================================================

/// Maximum pieces on a single line.
///
/// ## Business Reason
/// Catches typing 1000 instead of 10 on a purchase order.
pub const MAX_PIECE_QUANTITY: u32 = 999;

/// GST on gold jewellery when a category has none configured (3%).
pub const DEFAULT_GST_PERCENT: u32 = 3;
