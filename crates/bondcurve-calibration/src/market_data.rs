//! Observable market quotes used to calibrate curves.

use bondcurve_core::types::{Date, QuoteId};
use serde::{Deserialize, Serialize};
use std::collections::HashMap;

use crate::error::{CalibrationError, CalibrationResult};

/// Quotes observed on a valuation date.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct MarketData {
    valuation_date: Date,
    values: HashMap<QuoteId, f64>,
}

impl MarketData {
    /// Market data with no quotes.
    #[must_use]
    pub fn empty(valuation_date: Date) -> Self {
        Self {
            valuation_date,
            values: HashMap::new(),
        }
    }

    /// Market data from a quote map.
    #[must_use]
    pub fn of(valuation_date: Date, values: HashMap<QuoteId, f64>) -> Self {
        Self {
            valuation_date,
            values,
        }
    }

    /// Adds or replaces a quote.
    #[must_use]
    pub fn with_value(mut self, id: QuoteId, value: f64) -> Self {
        self.values.insert(id, value);
        self
    }

    /// The valuation date.
    #[must_use]
    pub fn valuation_date(&self) -> Date {
        self.valuation_date
    }

    /// Looks up a quote.
    pub fn value(&self, id: &QuoteId) -> CalibrationResult<f64> {
        self.values
            .get(id)
            .copied()
            .ok_or_else(|| CalibrationError::MissingMarketData(id.clone()))
    }

    /// Returns true if the quote is present.
    #[must_use]
    pub fn contains(&self, id: &QuoteId) -> bool {
        self.values.contains_key(id)
    }

    /// Iterates over all quotes.
    pub fn iter(&self) -> impl Iterator<Item = (&QuoteId, f64)> {
        self.values.iter().map(|(id, value)| (id, *value))
    }

    /// Number of quotes.
    #[must_use]
    pub fn len(&self) -> usize {
        self.values.len()
    }

    /// Returns true if there are no quotes.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.values.is_empty()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_lookup_and_override() {
        let date = Date::from_ymd(2017, 12, 11).unwrap();
        let id = QuoteId::of("OG", "UK_REPO_1W").unwrap();
        let data = MarketData::empty(date).with_value(id.clone(), 0.00565);
        assert_eq!(data.value(&id).unwrap(), 0.00565);

        let bumped = data.clone().with_value(id.clone(), 0.00575);
        assert_eq!(bumped.value(&id).unwrap(), 0.00575);
        assert_eq!(data.value(&id).unwrap(), 0.00565);
        assert_eq!(bumped.len(), 1);
    }

    #[test]
    fn test_missing_quote() {
        let date = Date::from_ymd(2017, 12, 11).unwrap();
        let id = QuoteId::of("OG", "US_REPO_1W").unwrap();
        assert_eq!(
            MarketData::empty(date).value(&id),
            Err(CalibrationError::MissingMarketData(id))
        );
    }

    #[test]
    fn test_json_keys_are_quote_ids() {
        let date = Date::from_ymd(2017, 12, 11).unwrap();
        let id = QuoteId::of("OG", "UK_REPO_1M").unwrap();
        let data = MarketData::empty(date).with_value(id.clone(), 0.0059);
        let json = serde_json::to_string(&data).unwrap();
        assert!(json.contains("\"OG~UK_REPO_1M\":0.0059"));
        let back: MarketData = serde_json::from_str(&json).unwrap();
        assert_eq!(back, data);
    }
}
