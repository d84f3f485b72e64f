//! # Swarna Configuration
//!
//! Shop-level settings for the CLI: default GST, rounding, display format,
//! protected categories and the published rates of the day.
//!
//! ## Configuration Sources
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                    Configuration Priority                               │
//! │                                                                         │
//! │  1. Environment Variables (highest priority)                           │
//! │     SWARNA_GST_RATE=3                                                  │
//! │     SWARNA_ROUND_TO_RUPEE=true                                         │
//! │     SWARNA_CURRENCY_DIGITS=up_to_two                                   │
//! │                                                                         │
//! │  2. TOML Config File                                                   │
//! │     --config <path> (must exist), else                                 │
//! │     ~/.config/swarna/swarna.toml (Linux)                               │
//! │                                                                         │
//! │  3. Default Values (lowest priority)                                   │
//! │     3% GST, no rupee rounding, two fraction digits                     │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! ## Configuration File Format
//! ```toml
//! [pricing]
//! default_gst_rate = 3
//! round_to_rupee = false
//!
//! [display]
//! fraction_digits = "two"   # two | up_to_two
//!
//! [catalog]
//! protected_categories = ["GOLD22", "GOLD24", "SILVER", "PLATINUM"]
//!
//! [[rates]]
//! category = "GOLD22"
//! date = "2024-03-01"
//! price_per_gram = "6000.00"
//! ```

use std::path::PathBuf;

use chrono::NaiveDate;
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use swarna_core::catalog::DEFAULT_PROTECTED_CATEGORIES;
use swarna_core::validation::{validate_category_code, validate_gst_rate, validate_non_negative};
use swarna_core::{DailyRateBook, FractionDigits, Money, ProtectedCategories, Rate, DEFAULT_GST_PERCENT};
use tracing::{debug, info, warn};

use crate::error::{CliError, CliResult};

// =============================================================================
// Sections
// =============================================================================

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PricingSettings {
    /// GST percentage applied when a product carries none.
    #[serde(default = "default_gst_rate")]
    pub default_gst_rate: Decimal,

    /// Round final prices to whole rupees.
    #[serde(default)]
    pub round_to_rupee: bool,
}

fn default_gst_rate() -> Decimal {
    Decimal::from(DEFAULT_GST_PERCENT)
}

impl Default for PricingSettings {
    fn default() -> Self {
        PricingSettings {
            default_gst_rate: default_gst_rate(),
            round_to_rupee: false,
        }
    }
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct DisplaySettings {
    #[serde(default)]
    pub fraction_digits: FractionDigits,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CatalogSettings {
    #[serde(default = "default_protected_categories")]
    pub protected_categories: Vec<String>,
}

fn default_protected_categories() -> Vec<String> {
    DEFAULT_PROTECTED_CATEGORIES.iter().map(|c| c.to_string()).collect()
}

impl Default for CatalogSettings {
    fn default() -> Self {
        CatalogSettings {
            protected_categories: default_protected_categories(),
        }
    }
}

/// One published price-of-the-day.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RateEntry {
    pub category: String,
    pub date: NaiveDate,
    pub price_per_gram: Money,
}

// =============================================================================
// SwarnaConfig
// =============================================================================

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct SwarnaConfig {
    #[serde(default)]
    pub pricing: PricingSettings,

    #[serde(default)]
    pub display: DisplaySettings,

    #[serde(default)]
    pub catalog: CatalogSettings,

    #[serde(default)]
    pub rates: Vec<RateEntry>,
}

impl SwarnaConfig {
    /// Loads configuration from file, environment, and defaults.
    ///
    /// ## Load Order (later overrides earlier)
    /// 1. Default values
    /// 2. Config file (swarna.toml)
    /// 3. Environment variables
    ///
    /// An explicit `config_path` must exist; a missing default file just
    /// means defaults.
    pub fn load(config_path: Option<PathBuf>) -> CliResult<Self> {
        let mut config = Self::default();

        match config_path {
            Some(path) => config = Self::read_file(path)?,
            None => match Self::default_config_path() {
                Some(path) if path.exists() => config = Self::read_file(path)?,
                Some(path) => debug!(?path, "Config file not found, using defaults"),
                None => debug!("No config directory, using defaults"),
            },
        }

        config.apply_env_overrides();
        config.validate()?;

        Ok(config)
    }

    /// Loads config or returns default if load fails.
    pub fn load_or_default(config_path: Option<PathBuf>) -> Self {
        Self::load(config_path).unwrap_or_else(|e| {
            warn!("Failed to load config: {}. Using defaults.", e);
            Self::default()
        })
    }

    fn read_file(path: PathBuf) -> CliResult<Self> {
        info!(?path, "Loading config from file");
        let contents = std::fs::read_to_string(&path).map_err(|source| CliError::Io { path, source })?;
        Self::from_toml(&contents)
    }

    pub fn from_toml(contents: &str) -> CliResult<Self> {
        Ok(toml::from_str(contents)?)
    }

    /// Validates the configuration.
    pub fn validate(&self) -> CliResult<()> {
        validate_gst_rate(self.default_gst())?;

        for entry in &self.rates {
            validate_category_code("category", &entry.category)
                .map_err(|e| CliError::InvalidConfig(format!("rate on {}: {}", entry.date, e)))?;
            validate_non_negative("price_per_gram", entry.price_per_gram)?;
        }

        for code in &self.catalog.protected_categories {
            validate_category_code("protected_categories", code)
                .map_err(|e| CliError::InvalidConfig(e.to_string()))?;
        }

        Ok(())
    }

    fn apply_env_overrides(&mut self) {
        self.apply_overrides_from(|key| std::env::var(key).ok());
    }

    /// Applies overrides from a key lookup (the process environment in
    /// production). Unparseable values are ignored with a warning.
    fn apply_overrides_from<F>(&mut self, lookup: F)
    where
        F: Fn(&str) -> Option<String>,
    {
        if let Some(rate) = lookup("SWARNA_GST_RATE") {
            match rate.trim().parse::<Decimal>() {
                Ok(r) => {
                    debug!(gst_rate = %r, "Overriding default GST rate from environment");
                    self.pricing.default_gst_rate = r;
                }
                Err(_) => warn!(value = %rate, "Ignoring invalid SWARNA_GST_RATE"),
            }
        }

        if let Some(round) = lookup("SWARNA_ROUND_TO_RUPEE") {
            match round.trim().to_lowercase().as_str() {
                "1" | "true" | "yes" => self.pricing.round_to_rupee = true,
                "0" | "false" | "no" => self.pricing.round_to_rupee = false,
                _ => warn!(value = %round, "Ignoring invalid SWARNA_ROUND_TO_RUPEE"),
            }
        }

        if let Some(digits) = lookup("SWARNA_CURRENCY_DIGITS") {
            match digits.trim().to_lowercase().as_str() {
                "two" | "2" => self.display.fraction_digits = FractionDigits::Two,
                "up_to_two" | "uptotwo" => self.display.fraction_digits = FractionDigits::UpToTwo,
                _ => warn!(value = %digits, "Unknown currency digits in environment"),
            }
        }
    }

    /// Returns the default config file path.
    fn default_config_path() -> Option<PathBuf> {
        directories::ProjectDirs::from("in", "swarna", "swarna")
            .map(|dirs| dirs.config_dir().join("swarna.toml"))
    }

    // =========================================================================
    // Convenience Methods
    // =========================================================================

    pub fn default_gst(&self) -> Rate {
        Rate::percent(self.pricing.default_gst_rate)
    }

    pub fn fraction_digits(&self) -> FractionDigits {
        self.display.fraction_digits
    }

    /// Builds the in-memory rate book from the `[[rates]]` entries.
    pub fn rate_book(&self) -> DailyRateBook {
        self.rates
            .iter()
            .map(|r| (r.category.clone(), r.date, r.price_per_gram))
            .collect()
    }

    pub fn protected_categories(&self) -> ProtectedCategories {
        ProtectedCategories::new(&self.catalog.protected_categories)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rust_decimal_macros::dec;
    use std::collections::HashMap;
    use swarna_core::PriceOfDay;

    const SAMPLE: &str = r#"
        [pricing]
        default_gst_rate = 3
        round_to_rupee = true

        [display]
        fraction_digits = "up_to_two"

        [catalog]
        protected_categories = ["GOLD22", "diamond"]

        [[rates]]
        category = "GOLD22"
        date = "2024-03-01"
        price_per_gram = "6000.00"

        [[rates]]
        category = "SILVER"
        date = "2024-03-01"
        price_per_gram = 78.5
    "#;

    #[test]
    fn test_default_config() {
        let config = SwarnaConfig::default();
        assert_eq!(config.default_gst(), Rate::percent(dec!(3)));
        assert!(!config.pricing.round_to_rupee);
        assert_eq!(config.fraction_digits(), FractionDigits::Two);
        assert!(config.protected_categories().is_protected("platinum"));
        assert!(config.rate_book().is_empty());
        assert!(config.validate().is_ok());
    }

    #[test]
    fn test_parse_full_file() {
        let config = SwarnaConfig::from_toml(SAMPLE).unwrap();
        assert!(config.pricing.round_to_rupee);
        assert_eq!(config.fraction_digits(), FractionDigits::UpToTwo);
        assert!(config.protected_categories().is_protected("DIAMOND"));
        assert!(!config.protected_categories().is_protected("SILVER"));

        let book = config.rate_book();
        let day = NaiveDate::from_ymd_opt(2024, 3, 1).unwrap();
        assert_eq!(book.price_per_gram("gold22", day), Some(Money::from_rupees(6000)));
        assert_eq!(book.price_per_gram("SILVER", day), Some(Money::new(dec!(78.5))));
    }

    #[test]
    fn test_missing_sections_use_defaults() {
        let config = SwarnaConfig::from_toml("[pricing]\nround_to_rupee = true\n").unwrap();
        assert_eq!(config.pricing.default_gst_rate, dec!(3));
        assert_eq!(config.catalog, CatalogSettings::default());
    }

    #[test]
    fn test_validation() {
        let mut config = SwarnaConfig::default();
        config.pricing.default_gst_rate = dec!(120);
        assert!(config.validate().is_err());

        let mut config = SwarnaConfig::from_toml(SAMPLE).unwrap();
        config.rates[0].price_per_gram = Money::from_rupees(-1);
        assert!(config.validate().is_err());

        config.rates[0].price_per_gram = Money::from_rupees(6000);
        config.rates[0].category = "  ".to_string();
        let err = config.validate().unwrap_err();
        assert!(matches!(err, CliError::InvalidConfig(_)));
        assert_eq!(err.to_string(), "Invalid configuration: rate on 2024-03-01: category is required");

        config.rates[0].category = "GOLD/22".to_string();
        assert!(config.validate().is_err());
    }

    #[test]
    fn test_protected_category_codes_are_validated() {
        let mut config = SwarnaConfig::default();
        config.catalog.protected_categories.push("rose gold".to_string());
        let err = config.validate().unwrap_err();
        assert_eq!(
            err.to_string(),
            "Invalid configuration: protected_categories has invalid format: unexpected character ' '"
        );
    }

    #[test]
    fn test_env_overrides() {
        let env: HashMap<&str, &str> = [
            ("SWARNA_GST_RATE", "5"),
            ("SWARNA_ROUND_TO_RUPEE", "yes"),
            ("SWARNA_CURRENCY_DIGITS", "up_to_two"),
        ]
        .into_iter()
        .collect();

        let mut config = SwarnaConfig::default();
        config.apply_overrides_from(|key| env.get(key).map(|v| v.to_string()));

        assert_eq!(config.default_gst(), Rate::percent(dec!(5)));
        assert!(config.pricing.round_to_rupee);
        assert_eq!(config.fraction_digits(), FractionDigits::UpToTwo);
    }

    #[test]
    fn test_invalid_env_values_are_ignored() {
        let mut config = SwarnaConfig::default();
        config.apply_overrides_from(|key| match key {
            "SWARNA_GST_RATE" => Some("three".to_string()),
            "SWARNA_ROUND_TO_RUPEE" => Some("maybe".to_string()),
            _ => None,
        });
        assert_eq!(config, SwarnaConfig::default());
    }

    #[test]
    fn test_load_missing_explicit_file_fails() {
        let path = std::env::temp_dir().join("swarna-test-does-not-exist.toml");
        let err = SwarnaConfig::load(Some(path.clone())).unwrap_err();
        match &err {
            CliError::Io { path: p, source } => {
                assert_eq!(p, &path);
                assert_eq!(source.kind(), std::io::ErrorKind::NotFound);
            }
            other => panic!("expected an Io error, got {:?}", other),
        }
        assert_eq!(err.exit_code(), 1);

        let config = SwarnaConfig::load_or_default(Some(path));
        assert_eq!(config.rates.len(), 0);
    }

    #[test]
    fn test_load_explicit_file() {
        let path = std::env::temp_dir().join(format!("swarna-test-{}.toml", std::process::id()));
        std::fs::write(&path, SAMPLE).unwrap();
        let config = SwarnaConfig::load(Some(path.clone()));
        std::fs::remove_file(&path).unwrap();

        let config = config.unwrap();
        assert_eq!(config.rates.len(), 2);
        assert_eq!(config.protected_categories().iter().count(), 2);
    }
}
