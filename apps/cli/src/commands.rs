//! # Command Handlers
//!
//! Each subcommand turns its parsed input into a report struct. Rendering
//! lives in `report`; nothing here prints.
//!
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │  price:    ProductRecord[] ──► rate of the day ──► PriceInput          │
//! │            ──► calculate_purchase_order_item_price ──► OrderLine[]     │
//! │            ──► calculate_order_summary ──► apply_discounts             │
//! │                                                                         │
//! │  invoice:  InvoiceLineRecord[] ──► InvoiceItemData[]                   │
//! │            + discount + advance ──► calculate_invoice_total            │
//! │                                                                         │
//! │  validate-charge: type code + value ──► validate_charge_code           │
//! │  check-category:  code ──► validate_category_code                      │
//! │                   ──► ProtectedCategories::ensure_deletable            │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```

use std::path::Path;

use chrono::NaiveDate;
use rust_decimal::Decimal;
use serde::de::{DeserializeOwned, Error as _};
use serde::{Deserialize, Deserializer, Serialize};
use swarna_core::validation::{
    validate_category_code, validate_charge_spec, validate_discount_rule, validate_invoice_item,
    validate_price_input,
};
use swarna_core::{
    calculate_invoice_total, calculate_order_summary, calculate_purchase_order_item_price,
    validate_charge_code, ChargeKind, ChargeSpec, ChargeType, DiscountRecord, DiscountRule,
    InvoiceCalculation, InvoiceItemData, InvoiceLineRecord, Money, OrderLine, OrderSettlement,
    OrderSummary, PriceOfDay, ProductRecord, PurchaseOrderLinePrice,
};
use tracing::{debug, info, warn};

use crate::config::SwarnaConfig;
use crate::error::{CliError, CliResult};

/// Reads and parses a JSON file.
pub fn read_json<T: DeserializeOwned>(path: &Path) -> CliResult<T> {
    let contents = std::fs::read_to_string(path).map_err(|source| CliError::Io {
        path: path.to_path_buf(),
        source,
    })?;
    Ok(serde_json::from_str(&contents)?)
}

// =============================================================================
// price
// =============================================================================

/// Accepted shapes for the `price` input file.
///
/// An object with an `items` key is always an order, so a bad discount or
/// advance is reported as such instead of as a malformed single record.
#[derive(Debug)]
pub enum PriceRequest {
    /// `{ "items": [...], "discount": {...}, "advance": "5000" }`
    Order(OrderRequest),
    /// A bare array of product records.
    Many(Vec<ProductRecord>),
    /// A single product record.
    One(ProductRecord),
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct OrderRequest {
    pub items: Vec<ProductRecord>,
    #[serde(default)]
    pub discount: DiscountRecord,
    #[serde(
        default,
        alias = "advance_amount",
        alias = "advanceAmount",
        deserialize_with = "swarna_core::adapter::lenient_decimal"
    )]
    pub advance: Option<Decimal>,
}

impl<'de> Deserialize<'de> for PriceRequest {
    fn deserialize<D>(deserializer: D) -> Result<Self, D::Error>
    where
        D: Deserializer<'de>,
    {
        let value = serde_json::Value::deserialize(deserializer)?;

        let request = if value.get("items").is_some() {
            serde_json::from_value(value).map(PriceRequest::Order)
        } else if value.is_array() {
            serde_json::from_value(value).map(PriceRequest::Many)
        } else {
            serde_json::from_value(value).map(PriceRequest::One)
        };

        request.map_err(D::Error::custom)
    }
}

impl PriceRequest {
    fn into_parts(self) -> (Vec<ProductRecord>, DiscountRule, Money) {
        match self {
            PriceRequest::Order(order) => (
                order.items,
                order.discount.into_rule(),
                Money::new(order.advance.unwrap_or_default()),
            ),
            PriceRequest::Many(items) => (items, DiscountRule::none(), Money::zero()),
            PriceRequest::One(item) => (vec![item], DiscountRule::none(), Money::zero()),
        }
    }
}

#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct PricedItem {
    pub label: String,
    pub category: Option<String>,
    pub price_per_gram: Money,
    pub line: PurchaseOrderLinePrice,
}

#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct PriceReport {
    pub date: NaiveDate,
    pub items: Vec<PricedItem>,
    pub summary: OrderSummary,
    pub settlement: OrderSettlement,
}

/// Prices every record against the rates published for `date`.
///
/// A record's own `pricePerGram` wins over the rate book. Inputs that fail
/// validation are still priced; the problem is logged.
pub fn price(request: PriceRequest, config: &SwarnaConfig, date: NaiveDate) -> CliResult<PriceReport> {
    let (records, discount, advance) = request.into_parts();
    let rates = config.rate_book();

    info!(items = records.len(), %date, "Pricing products");

    let mut items = Vec::with_capacity(records.len());
    let mut lines = Vec::with_capacity(records.len());

    for record in &records {
        let rate = match record.explicit_price_per_gram() {
            Some(rate) => rate,
            None => {
                let category = record
                    .category_code()
                    .ok_or_else(|| CliError::MissingCategory(record.label().to_string()))?;
                rates.resolve(category, date).map_err(|e| {
                    if let Some((last, rate)) = rates.latest_on_or_before(category, date) {
                        warn!(category, %last, %rate, "No rate published for date; last known rate is older");
                    }
                    e
                })?
            }
        };

        let input = record.into_price_input(rate, config.default_gst(), config.pricing.round_to_rupee);
        if let Err(e) = validate_price_input(&input) {
            warn!(product = record.label(), error = %e, "Pricing input failed validation");
        }

        let line = calculate_purchase_order_item_price(&input);
        debug!(product = record.label(), total = %line.line_total, "Priced line");

        lines.push(OrderLine::new(line.breakdown.clone(), line.quantity, input.net_weight));
        items.push(PricedItem {
            label: record.label().to_string(),
            category: record.category_code().map(str::to_string),
            price_per_gram: rate,
            line,
        });
    }

    if let Err(e) = validate_discount_rule(&discount) {
        warn!(error = %e, "Discount rule failed validation");
    }

    let summary = calculate_order_summary(&lines);
    let settlement = summary.apply_discounts(&discount, advance);

    Ok(PriceReport {
        date,
        items,
        summary,
        settlement,
    })
}

// =============================================================================
// invoice
// =============================================================================

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct InvoiceRequest {
    pub items: Vec<InvoiceLineRecord>,
    #[serde(default)]
    pub discount: DiscountRecord,
    #[serde(
        default,
        alias = "advance_amount",
        alias = "advanceAmount",
        deserialize_with = "swarna_core::adapter::lenient_decimal"
    )]
    pub advance: Option<Decimal>,
}

/// Totals an invoice. Lines without a GST rate use the configured default.
pub fn invoice(request: &InvoiceRequest, config: &SwarnaConfig) -> InvoiceCalculation {
    info!(items = request.items.len(), "Calculating invoice");

    let items: Vec<InvoiceItemData> = request
        .items
        .iter()
        .map(|line| line.into_invoice_item(config.default_gst()))
        .collect();

    for item in &items {
        if let Err(e) = validate_invoice_item(item) {
            warn!(item = %item.description, error = %e, "Invoice line failed validation");
        }
    }

    let discount = request.discount.into_rule();
    if let Err(e) = validate_discount_rule(&discount) {
        warn!(error = %e, "Discount rule failed validation");
    }

    calculate_invoice_total(&items, &discount, Money::new(request.advance.unwrap_or_default()))
}

// =============================================================================
// validate-charge
// =============================================================================

#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ChargeCheck {
    /// The code as entered.
    pub code: String,
    /// The recognised type; `None` for a code no calculator knows.
    pub charge_type: Option<ChargeType>,
    pub value: Option<Decimal>,
    pub valid: bool,
    /// Why the stricter per-charge check failed, when a kind was given.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub reason: Option<String>,
}

/// Checks a charge configuration as a product form would.
///
/// An unknown type code with a non-negative value passes (it prices as no
/// charge). With `kind`, the code must name a type that charge allows and
/// the value is checked against it.
pub fn validate_charge(code: &str, value: Option<Decimal>, kind: Option<ChargeKind>) -> ChargeCheck {
    let parsed = code.parse::<ChargeType>();
    let mut valid = validate_charge_code(Some(code), value);
    let mut reason = None;

    if let Err(e) = &parsed {
        warn!(code, error = %e, "Unknown charge type prices as no charge");
    }

    if let (true, Some(kind)) = (valid, kind) {
        let checked = parsed.as_ref().map_err(|e| e.to_string()).and_then(|t| {
            validate_charge_spec(kind, &ChargeSpec::new(*t, value.unwrap_or_default()))
                .map_err(|e| e.to_string())
        });
        if let Err(e) = checked {
            valid = false;
            reason = Some(e);
        }
    }

    ChargeCheck {
        code: code.trim().to_string(),
        charge_type: parsed.ok(),
        value,
        valid,
        reason,
    }
}

// =============================================================================
// check-category
// =============================================================================

/// Fails with `ProtectedCategory` when `code` may not be deleted, or with a
/// validation error when it is not a well-formed category code.
pub fn check_category(code: &str, config: &SwarnaConfig) -> CliResult<()> {
    validate_category_code("code", code)?;
    config.protected_categories().ensure_deletable(code)?;
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::RateEntry;
    use rust_decimal_macros::dec;

    fn day() -> NaiveDate {
        NaiveDate::from_ymd_opt(2024, 3, 1).unwrap()
    }

    fn config() -> SwarnaConfig {
        SwarnaConfig {
            rates: vec![RateEntry {
                category: "GOLD22".to_string(),
                date: day(),
                price_per_gram: Money::from_rupees(6000),
            }],
            ..SwarnaConfig::default()
        }
    }

    const RING: &str = r#"{
        "sku": "RNG-001",
        "categoryCode": "GOLD22",
        "netWeight": "10",
        "makingChargeType": "percentage",
        "makingChargeValue": "10",
        "wastageChargeType": "per_gram",
        "wastageChargeValue": "50"
    }"#;

    #[test]
    fn test_price_single_record_uses_rate_book() {
        let request: PriceRequest = serde_json::from_str(RING).unwrap();
        let report = price(request, &config(), day()).unwrap();

        assert_eq!(report.items.len(), 1);
        assert_eq!(report.items[0].price_per_gram, Money::from_rupees(6000));
        assert_eq!(report.items[0].line.breakdown.final_price, Money::from_rupees(68495));
        assert_eq!(report.summary.grand_total, Money::from_rupees(68495));
        assert_eq!(report.settlement.balance_due, Money::from_rupees(68495));
    }

    #[test]
    fn test_price_order_with_discount_and_advance() {
        let json = format!(
            r#"{{
                "items": [{RING}],
                "discount": {{"makingChargeDiscountPercentage": "50", "goldValueDiscountPerGram": "10"}},
                "advance": "5000"
            }}"#
        );
        let request: PriceRequest = serde_json::from_str(&json).unwrap();
        let report = price(request, &config(), day()).unwrap();

        assert_eq!(report.settlement.making_charge_discount, Money::from_rupees(3000));
        assert_eq!(report.settlement.gold_value_discount, Money::from_rupees(100));
        assert_eq!(report.settlement.net_payable, Money::from_rupees(65395));
        assert_eq!(report.settlement.balance_due, Money::from_rupees(60395));
    }

    #[test]
    fn test_order_with_bad_advance_reports_the_advance() {
        let json = format!(r#"{{"items": [{RING}], "advance": "5,000"}}"#);
        let err = serde_json::from_str::<PriceRequest>(&json).unwrap_err();
        assert!(err.to_string().contains("invalid decimal: '5,000'"));

        let json = format!(r#"{{"items": [{RING}], "discount": {{"goldValueDiscountPerGram": "ten"}}}}"#);
        let err = serde_json::from_str::<PriceRequest>(&json).unwrap_err();
        assert!(err.to_string().contains("invalid decimal: 'ten'"));
    }

    #[test]
    fn test_price_request_shapes() {
        let json = format!(r#"{{"items": [{RING}, {RING}], "advance_amount": 100}}"#);
        match serde_json::from_str::<PriceRequest>(&json).unwrap() {
            PriceRequest::Order(order) => {
                assert_eq!(order.items.len(), 2);
                assert_eq!(order.advance, Some(dec!(100)));
            }
            other => panic!("expected an order, got {:?}", other),
        }

        let json = format!("[{RING}]");
        let many: PriceRequest = serde_json::from_str(&json).unwrap();
        assert!(matches!(many, PriceRequest::Many(v) if v.len() == 1));
        let one: PriceRequest = serde_json::from_str(RING).unwrap();
        assert!(matches!(one, PriceRequest::One(_)));
    }

    #[test]
    fn test_price_missing_rate_fails() {
        let request: PriceRequest = serde_json::from_str(RING).unwrap();
        let other_day = NaiveDate::from_ymd_opt(2024, 3, 2).unwrap();
        let err = price(request, &config(), other_day).unwrap_err();
        assert!(matches!(err, CliError::Core(swarna_core::CoreError::PriceNotFound { .. })));
    }

    #[test]
    fn test_price_explicit_rate_needs_no_category() {
        let request: PriceRequest =
            serde_json::from_str(r#"[{"name": "Coin", "netWeight": 1, "pricePerGram": "7000"}]"#).unwrap();
        let report = price(request, &SwarnaConfig::default(), day()).unwrap();
        assert_eq!(report.items[0].line.breakdown.gold_value, Money::from_rupees(7000));
        assert_eq!(report.items[0].label, "Coin");

        let request: PriceRequest = serde_json::from_str(r#"[{"name": "Coin", "netWeight": 1}]"#).unwrap();
        let err = price(request, &SwarnaConfig::default(), day()).unwrap_err();
        assert!(matches!(err, CliError::MissingCategory(_)));
    }

    #[test]
    fn test_invoice_request() {
        let request: InvoiceRequest = serde_json::from_str(
            r#"{
                "items": [{
                    "description": "Bangle",
                    "grossWeight": "12",
                    "netWeight": "10",
                    "goldRate": "6000",
                    "labourRate": "600",
                    "gstRate": "3"
                }],
                "advance_amount": "80000"
            }"#,
        )
        .unwrap();
        let calc = invoice(&request, &SwarnaConfig::default());
        assert_eq!(calc.total_amount, Money::from_rupees(80340));
        assert_eq!(calc.grand_total, Money::from_rupees(340));
    }

    #[test]
    fn test_invoice_request_accepts_snake_case_lines() {
        let request: InvoiceRequest = serde_json::from_str(
            r#"{
                "items": [{
                    "description": "Bangle",
                    "gross_weight": 12,
                    "net_weight": 10,
                    "gold_rate": 6000,
                    "labour_rate": 600
                }],
                "discount": {"making_charge_discount_percentage": "50"}
            }"#,
        )
        .unwrap();
        let calc = invoice(&request, &SwarnaConfig::default());

        // 72000 gold + 6000 labour, GST from the configured 3% default
        assert_eq!(calc.total_gst, Money::from_rupees(2340));
        assert_eq!(calc.making_charge_discount, Money::from_rupees(3000));
        assert_eq!(calc.grand_total, Money::from_rupees(77340));
    }

    #[test]
    fn test_validate_charge() {
        assert!(validate_charge("percentage", Some(dec!(50)), None).valid);
        assert!(!validate_charge("percentage", Some(dec!(150)), None).valid);
        assert!(validate_charge("none", None, None).valid);

        let check = validate_charge("per_piece", Some(dec!(100)), Some(ChargeKind::Making));
        assert!(!check.valid);
        assert!(check.reason.is_some());
    }

    #[test]
    fn test_validate_charge_unknown_type() {
        let check = validate_charge("per_carat", Some(dec!(1)), None);
        assert!(check.valid);
        assert_eq!(check.code, "per_carat");
        assert_eq!(check.charge_type, None);

        assert!(!validate_charge("per_carat", Some(dec!(-1)), None).valid);
        assert!(!validate_charge("per_carat", None, None).valid);

        let check = validate_charge("per_carat", Some(dec!(1)), Some(ChargeKind::Wastage));
        assert!(!check.valid);
        assert_eq!(check.reason.as_deref(), Some("Unknown charge type: 'per_carat'"));
    }

    #[test]
    fn test_check_category() {
        let config = SwarnaConfig::default();
        assert!(check_category("DIAMOND", &config).is_ok());
        assert!(matches!(
            check_category("gold24", &config),
            Err(CliError::Core(swarna_core::CoreError::ProtectedCategory(_)))
        ));

        let err = check_category("  ", &config).unwrap_err();
        assert_eq!(err.to_string(), "Validation error: code is required");
        assert_eq!(err.exit_code(), 2);
        assert!(check_category("GOLD 22", &config).is_err());
    }
}
