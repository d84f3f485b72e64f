//! # Record Adapters
//!
//! Normalizes loosely-typed product, invoice-line and discount records into
//! the typed calculator inputs ([`PriceInput`], [`InvoiceItemData`],
//! [`DiscountRule`]).
//!
//! ## Why an Adapter?
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │  Product records arrive from several sources:                           │
//! │                                                                         │
//! │    { "netWeight": "10.500", "makingChargeType": "PERCENTAGE", ... }    │
//! │    { "net_weight": 10.5,    "making_charge_type": "percentage", ... }  │
//! │    { "net_weight": "",      "making_charge_type": null, ... }          │
//! │                                                                         │
//! │  ProductRecord (THIS MODULE) accepts all of them:                       │
//! │    • camelCase or snake_case field names                               │
//! │    • decimals as JSON strings or numbers, blank strings = missing      │
//! │    • free-form charge type codes                                       │
//! │                    │                                                    │
//! │                    ▼                                                    │
//! │  PriceInput: one naming, typed decimals, typed ChargeSpec               │
//! │  The calculators only ever see this. InvoiceLineRecord and              │
//! │  DiscountRecord do the same for invoice lines and discounts.            │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```

use rust_decimal::Decimal;
use serde::de::Error as _;
use serde::{Deserialize, Deserializer};
use tracing::warn;

use crate::invoice::InvoiceItemData;
use crate::money::{Money, Rate, Weight};
use crate::pricing::PriceInput;
use crate::types::{ChargeKind, ChargeSpec, ChargeType, DiscountRule};

/// A product row as it arrives from the catalog or an import file.
#[derive(Debug, Clone, Default, PartialEq, Eq, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ProductRecord {
    #[serde(default, alias = "sku", alias = "product_code")]
    pub code: Option<String>,

    #[serde(default)]
    pub name: Option<String>,

    /// Metal category code used to look up today's rate (e.g. `GOLD22`).
    #[serde(default, alias = "category_code", alias = "categoryCode")]
    pub category: Option<String>,

    #[serde(default, alias = "net_weight", deserialize_with = "lenient_decimal")]
    pub net_weight: Option<Decimal>,

    #[serde(default, alias = "gross_weight", deserialize_with = "lenient_decimal")]
    pub gross_weight: Option<Decimal>,

    #[serde(default, alias = "making_charge_type")]
    pub making_charge_type: Option<String>,

    #[serde(default, alias = "making_charge_value", deserialize_with = "lenient_decimal")]
    pub making_charge_value: Option<Decimal>,

    #[serde(default, alias = "wastage_charge_type")]
    pub wastage_charge_type: Option<String>,

    #[serde(default, alias = "wastage_charge_value", deserialize_with = "lenient_decimal")]
    pub wastage_charge_value: Option<Decimal>,

    #[serde(default, alias = "additional_cost", deserialize_with = "lenient_decimal")]
    pub additional_cost: Option<Decimal>,

    #[serde(default, alias = "stone_value", deserialize_with = "lenient_decimal")]
    pub stone_value: Option<Decimal>,

    /// Explicit rate, overriding the price-of-the-day lookup.
    #[serde(default, alias = "price_per_gram", deserialize_with = "lenient_decimal")]
    pub price_per_gram: Option<Decimal>,

    /// Explicit GST percentage, overriding the configured default.
    #[serde(default, alias = "gst_rate", alias = "gstPercentage", deserialize_with = "lenient_decimal")]
    pub gst_rate: Option<Decimal>,

    #[serde(default)]
    pub quantity: Option<u32>,
}

impl ProductRecord {
    /// Category code, trimmed; `None` when blank.
    pub fn category_code(&self) -> Option<&str> {
        self.category
            .as_deref()
            .map(str::trim)
            .filter(|c| !c.is_empty())
    }

    /// Rate carried on the record itself, if any.
    pub fn explicit_price_per_gram(&self) -> Option<Money> {
        self.price_per_gram.map(Money::new)
    }

    /// Label for logs and reports.
    pub fn label(&self) -> &str {
        self.code
            .as_deref()
            .or(self.name.as_deref())
            .unwrap_or("<unnamed>")
    }

    /// Builds the typed charge scheme for `kind`.
    ///
    /// Unknown type codes degrade to "no charge" with a warning.
    pub fn charge_spec(&self, kind: ChargeKind) -> ChargeSpec {
        let (code, value) = match kind {
            ChargeKind::Making => (&self.making_charge_type, self.making_charge_value),
            ChargeKind::Wastage => (&self.wastage_charge_type, self.wastage_charge_value),
        };

        let charge_type = match code.as_deref() {
            None => ChargeType::None,
            Some(code) => code.parse().unwrap_or_else(|e| {
                warn!(product = self.label(), %kind, error = %e, "Ignoring charge");
                ChargeType::None
            }),
        };

        ChargeSpec::new(charge_type, value.unwrap_or_default())
    }

    /// Normalizes the record into a calculator input.
    ///
    /// `price_per_gram` is the resolved rate for the record's category and
    /// `default_gst` the category's GST rate; a rate or GST carried on the
    /// record wins over both.
    pub fn into_price_input(&self, price_per_gram: Money, default_gst: Rate, round_to_rupee: bool) -> PriceInput {
        PriceInput {
            net_weight: Weight::grams(self.net_weight.unwrap_or_default()),
            price_per_gram: self.explicit_price_per_gram().unwrap_or(price_per_gram),
            making_charge: self.charge_spec(ChargeKind::Making),
            wastage_charge: self.charge_spec(ChargeKind::Wastage),
            additional_cost: Money::new(self.additional_cost.unwrap_or_default()),
            stone_value: Money::new(self.stone_value.unwrap_or_default()),
            gst_rate: self.gst_rate.map(Rate::percent).unwrap_or(default_gst),
            quantity: self.quantity.unwrap_or(1).max(1),
            round_final_to_rupee: round_to_rupee,
        }
    }
}

// =============================================================================
// Invoice Lines and Discounts
// =============================================================================

/// An invoice line as it arrives from a bill-entry screen or import file.
#[derive(Debug, Clone, Default, PartialEq, Eq, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct InvoiceLineRecord {
    #[serde(default, alias = "name")]
    pub description: Option<String>,

    #[serde(default, alias = "gross_weight", deserialize_with = "lenient_decimal")]
    pub gross_weight: Option<Decimal>,

    #[serde(default, alias = "net_weight", deserialize_with = "lenient_decimal")]
    pub net_weight: Option<Decimal>,

    #[serde(default, alias = "gold_rate", deserialize_with = "lenient_decimal")]
    pub gold_rate: Option<Decimal>,

    #[serde(
        default,
        alias = "labour_rate",
        alias = "labor_rate",
        alias = "laborRate",
        deserialize_with = "lenient_decimal"
    )]
    pub labour_rate: Option<Decimal>,

    #[serde(default, alias = "additional_cost", deserialize_with = "lenient_decimal")]
    pub additional_cost: Option<Decimal>,

    #[serde(default, alias = "gst_rate", alias = "gstPercentage", deserialize_with = "lenient_decimal")]
    pub gst_rate: Option<Decimal>,

    #[serde(default)]
    pub quantity: Option<u32>,
}

impl InvoiceLineRecord {
    /// Normalizes the line into an invoice item.
    ///
    /// Gross weight falls back to net weight, and `default_gst` applies
    /// when the line carries no GST rate.
    pub fn into_invoice_item(&self, default_gst: Rate) -> InvoiceItemData {
        let net = self.net_weight.unwrap_or_default();

        InvoiceItemData {
            description: self.description.clone().unwrap_or_default(),
            gross_weight: Weight::grams(self.gross_weight.unwrap_or(net)),
            net_weight: Weight::grams(net),
            gold_rate: Money::new(self.gold_rate.unwrap_or_default()),
            labour_rate: Money::new(self.labour_rate.unwrap_or_default()),
            additional_cost: Money::new(self.additional_cost.unwrap_or_default()),
            gst_rate: self.gst_rate.map(Rate::percent).unwrap_or(default_gst),
            quantity: self.quantity.unwrap_or(1).max(1),
        }
    }
}

/// An order-level discount in either naming style.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct DiscountRecord {
    #[serde(default, alias = "making_charge_discount_percentage", deserialize_with = "lenient_decimal")]
    pub making_charge_discount_percentage: Option<Decimal>,

    #[serde(default, alias = "gold_value_discount_per_gram", deserialize_with = "lenient_decimal")]
    pub gold_value_discount_per_gram: Option<Decimal>,
}

impl DiscountRecord {
    pub fn into_rule(self) -> DiscountRule {
        DiscountRule {
            making_charge_discount_percentage: self.making_charge_discount_percentage.map(Rate::percent),
            gold_value_discount_per_gram: self.gold_value_discount_per_gram.map(Money::new),
        }
    }
}

/// Accepts a decimal as a JSON number or string; blank strings and nulls
/// become `None`.
pub fn lenient_decimal<'de, D>(deserializer: D) -> Result<Option<Decimal>, D::Error>
where
    D: Deserializer<'de>,
{
    #[derive(Deserialize)]
    #[serde(untagged)]
    enum Raw {
        Value(Decimal),
        Text(String),
    }

    match Option::<Raw>::deserialize(deserializer)? {
        None => Ok(None),
        Some(Raw::Value(v)) => Ok(Some(v)),
        Some(Raw::Text(s)) if s.trim().is_empty() => Ok(None),
        Some(Raw::Text(s)) => s
            .trim()
            .parse::<Decimal>()
            .map(Some)
            .map_err(|_| D::Error::custom(format!("invalid decimal: '{}'", s))),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::pricing::compute_final_price;
    use rust_decimal_macros::dec;

    #[test]
    fn test_camel_and_snake_records_normalize_identically() {
        let camel: ProductRecord = serde_json::from_str(
            r#"{
                "sku": "RNG-001",
                "categoryCode": "GOLD22",
                "netWeight": "10.000",
                "makingChargeType": "PERCENTAGE",
                "makingChargeValue": "10",
                "wastageChargeType": "per_gram",
                "wastageChargeValue": 50
            }"#,
        )
        .unwrap();
        let snake: ProductRecord = serde_json::from_str(
            r#"{
                "product_code": "RNG-001",
                "category_code": "GOLD22",
                "net_weight": 10,
                "making_charge_type": "percentage",
                "making_charge_value": 10,
                "wastage_charge_type": "PerGram",
                "wastage_charge_value": "50"
            }"#,
        )
        .unwrap();

        let rate = Money::from_rupees(6000);
        let gst = Rate::percent(dec!(3));
        let a = camel.into_price_input(rate, gst, false);
        let b = snake.into_price_input(rate, gst, false);

        assert_eq!(a, b);
        assert_eq!(camel.category_code(), Some("GOLD22"));
        assert_eq!(compute_final_price(&a).final_price, Money::from_rupees(68495));
    }

    #[test]
    fn test_missing_and_blank_fields_become_zero() {
        let record: ProductRecord = serde_json::from_str(
            r#"{"netWeight": "5", "additionalCost": "", "stoneValue": null}"#,
        )
        .unwrap();
        let input = record.into_price_input(Money::from_rupees(100), Rate::zero(), false);

        assert!(input.additional_cost.is_zero());
        assert!(input.stone_value.is_zero());
        assert_eq!(input.making_charge, ChargeSpec::none());
        assert_eq!(input.quantity, 1);
    }

    #[test]
    fn test_unknown_charge_type_degrades_to_none() {
        let record = ProductRecord {
            making_charge_type: Some("per_carat".to_string()),
            making_charge_value: Some(dec!(400)),
            ..ProductRecord::default()
        };
        assert_eq!(record.charge_spec(ChargeKind::Making).charge_type, ChargeType::None);
    }

    #[test]
    fn test_record_overrides_win() {
        let record = ProductRecord {
            net_weight: Some(dec!(2)),
            price_per_gram: Some(dec!(7000)),
            gst_rate: Some(dec!(5)),
            quantity: Some(0),
            ..ProductRecord::default()
        };
        let input = record.into_price_input(Money::from_rupees(6000), Rate::percent(dec!(3)), true);

        assert_eq!(input.price_per_gram, Money::from_rupees(7000));
        assert_eq!(input.gst_rate, Rate::percent(dec!(5)));
        assert_eq!(input.quantity, 1);
        assert!(input.round_final_to_rupee);
    }

    #[test]
    fn test_invalid_decimal_is_rejected() {
        let result: Result<ProductRecord, _> = serde_json::from_str(r#"{"netWeight": "ten"}"#);
        assert!(result.is_err());
    }

    #[test]
    fn test_invoice_lines_normalize_identically() {
        let camel: InvoiceLineRecord = serde_json::from_str(
            r#"{"grossWeight": "12", "netWeight": 10, "goldRate": "6000", "labourRate": 600, "gstRate": 3}"#,
        )
        .unwrap();
        let snake: InvoiceLineRecord = serde_json::from_str(
            r#"{"gross_weight": 12, "net_weight": "10", "gold_rate": 6000, "labor_rate": "600", "gst_rate": "3"}"#,
        )
        .unwrap();

        let a = camel.into_invoice_item(Rate::zero());
        assert_eq!(a, snake.into_invoice_item(Rate::zero()));
        assert_eq!(a.gross_weight, Weight::grams(dec!(12)));
        assert_eq!(a.labour_rate, Money::from_rupees(600));
        assert_eq!(a.gst_rate, Rate::percent(dec!(3)));
        assert_eq!(a.quantity, 1);
    }

    #[test]
    fn test_invoice_line_defaults() {
        let line: InvoiceLineRecord = serde_json::from_str(
            r#"{"name": "Pendant", "netWeight": "3.5", "goldRate": 6000, "additionalCost": ""}"#,
        )
        .unwrap();
        let item = line.into_invoice_item(Rate::percent(dec!(3)));

        assert_eq!(item.description, "Pendant");
        assert_eq!(item.gross_weight, Weight::grams(dec!(3.5)));
        assert!(item.labour_rate.is_zero());
        assert!(item.additional_cost.is_zero());
        assert_eq!(item.gst_rate, Rate::percent(dec!(3)));
    }

    #[test]
    fn test_discount_record_naming_styles() {
        let camel: DiscountRecord = serde_json::from_str(
            r#"{"makingChargeDiscountPercentage": "50", "goldValueDiscountPerGram": 10}"#,
        )
        .unwrap();
        let snake: DiscountRecord = serde_json::from_str(
            r#"{"making_charge_discount_percentage": 50, "gold_value_discount_per_gram": "10"}"#,
        )
        .unwrap();
        assert_eq!(camel, snake);

        let rule = camel.into_rule();
        assert_eq!(rule.making_pct(), Rate::percent(dec!(50)));
        assert_eq!(rule.gold_per_gram(), Money::from_rupees(10));
        assert_eq!(DiscountRecord::default().into_rule(), DiscountRule::none());
    }
}
