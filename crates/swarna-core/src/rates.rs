//! # Price of the Day
//!
//! The engine never fetches rates. Callers inject a [`PriceOfDay`] source
//! and resolve the rate for an item's category before pricing it.
//!
//! ```text
//!   (category, date) ──► PriceOfDay ──► price per gram ──► PriceInput
//! ```

use chrono::NaiveDate;
use std::collections::BTreeMap;

use crate::error::{CoreError, CoreResult};
use crate::money::Money;

/// A source of daily per-gram rates.
pub trait PriceOfDay {
    /// Rate published for `category` on exactly `date`.
    fn price_per_gram(&self, category: &str, date: NaiveDate) -> Option<Money>;

    /// Like [`PriceOfDay::price_per_gram`] but with a typed error.
    fn resolve(&self, category: &str, date: NaiveDate) -> CoreResult<Money> {
        self.price_per_gram(category, date)
            .ok_or_else(|| CoreError::PriceNotFound {
                category: category.to_string(),
                date,
            })
    }
}

/// In-memory rate book keyed by (category, date).
///
/// Category codes are matched case-insensitively.
#[derive(Debug, Clone, Default)]
pub struct DailyRateBook {
    rates: BTreeMap<(String, NaiveDate), Money>,
}

impl DailyRateBook {
    pub fn new() -> Self {
        Self::default()
    }

    /// Records a rate, replacing any existing entry for the same day.
    pub fn insert(&mut self, category: &str, date: NaiveDate, price_per_gram: Money) {
        self.rates.insert((normalize(category), date), price_per_gram);
    }

    /// Most recent rate published on or before `date`.
    ///
    /// Used for display ("last known rate"); pricing uses the exact day.
    pub fn latest_on_or_before(&self, category: &str, date: NaiveDate) -> Option<(NaiveDate, Money)> {
        let key = normalize(category);
        self.rates
            .range((key.clone(), NaiveDate::MIN)..=(key, date))
            .next_back()
            .map(|((_, d), rate)| (*d, *rate))
    }

    pub fn len(&self) -> usize {
        self.rates.len()
    }

    pub fn is_empty(&self) -> bool {
        self.rates.is_empty()
    }
}

impl PriceOfDay for DailyRateBook {
    fn price_per_gram(&self, category: &str, date: NaiveDate) -> Option<Money> {
        self.rates.get(&(normalize(category), date)).copied()
    }
}

impl FromIterator<(String, NaiveDate, Money)> for DailyRateBook {
    fn from_iter<I: IntoIterator<Item = (String, NaiveDate, Money)>>(iter: I) -> Self {
        let mut book = DailyRateBook::new();
        for (category, date, rate) in iter {
            book.insert(&category, date, rate);
        }
        book
    }
}

fn normalize(category: &str) -> String {
    category.trim().to_ascii_uppercase()
}

#[cfg(test)]
mod tests {
    use super::*;

    fn day(d: u32) -> NaiveDate {
        NaiveDate::from_ymd_opt(2024, 3, d).unwrap()
    }

    fn book() -> DailyRateBook {
        vec![
            ("GOLD22".to_string(), day(1), Money::from_rupees(6000)),
            ("gold22".to_string(), day(3), Money::from_rupees(6050)),
            ("SILVER".to_string(), day(1), Money::from_rupees(78)),
        ]
        .into_iter()
        .collect()
    }

    #[test]
    fn test_exact_lookup_is_case_insensitive() {
        let book = book();
        assert_eq!(book.len(), 3);
        assert_eq!(book.price_per_gram("Gold22", day(3)), Some(Money::from_rupees(6050)));
        assert_eq!(book.price_per_gram("GOLD22", day(2)), None);
    }

    #[test]
    fn test_resolve_reports_missing_rate() {
        let err = book().resolve("PLATINUM", day(1)).unwrap_err();
        assert!(matches!(err, CoreError::PriceNotFound { .. }));
    }

    #[test]
    fn test_latest_on_or_before() {
        let book = book();
        assert_eq!(
            book.latest_on_or_before("GOLD22", day(2)),
            Some((day(1), Money::from_rupees(6000)))
        );
        assert_eq!(
            book.latest_on_or_before("GOLD22", day(9)),
            Some((day(3), Money::from_rupees(6050)))
        );
        assert_eq!(book.latest_on_or_before("SILVER", NaiveDate::MIN), None);
        assert_eq!(book.latest_on_or_before("PLATINUM", day(9)), None);
    }

    #[test]
    fn test_insert_replaces_same_day() {
        let mut book = book();
        book.insert("SILVER", day(1), Money::from_rupees(80));
        assert_eq!(book.price_per_gram("silver", day(1)), Some(Money::from_rupees(80)));
        assert_eq!(book.len(), 3);
    }
}
