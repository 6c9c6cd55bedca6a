//! Amounts of money in one or several currencies.

use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;
use std::fmt;

use super::Currency;

/// An amount in a single currency.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct CurrencyAmount {
    /// Currency of the amount.
    pub currency: Currency,
    /// The amount.
    pub amount: f64,
}

impl CurrencyAmount {
    /// Creates an amount.
    #[must_use]
    pub fn new(currency: Currency, amount: f64) -> Self {
        Self { currency, amount }
    }

    /// A zero amount.
    #[must_use]
    pub fn zero(currency: Currency) -> Self {
        Self::new(currency, 0.0)
    }

    /// Scales the amount.
    #[must_use]
    pub fn multiplied_by(&self, factor: f64) -> Self {
        Self::new(self.currency, self.amount * factor)
    }
}

impl fmt::Display for CurrencyAmount {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{} {}", self.currency, self.amount)
    }
}

/// Amounts in several currencies, kept one entry per currency.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct MultiCurrencyAmount {
    amounts: BTreeMap<Currency, f64>,
}

impl MultiCurrencyAmount {
    /// An empty amount.
    #[must_use]
    pub fn empty() -> Self {
        Self::default()
    }

    /// Adds an amount, summing with any existing amount in the same currency.
    #[must_use]
    pub fn plus(mut self, amount: CurrencyAmount) -> Self {
        *self.amounts.entry(amount.currency).or_insert(0.0) += amount.amount;
        self
    }

    /// Amount in a currency, zero when absent.
    #[must_use]
    pub fn amount(&self, currency: Currency) -> f64 {
        self.amounts.get(&currency).copied().unwrap_or(0.0)
    }

    /// Currencies present.
    pub fn currencies(&self) -> impl Iterator<Item = Currency> + '_ {
        self.amounts.keys().copied()
    }

    /// Number of currencies present.
    #[must_use]
    pub fn len(&self) -> usize {
        self.amounts.len()
    }

    /// True when no currency is present.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.amounts.is_empty()
    }

    /// Scales every amount.
    #[must_use]
    pub fn multiplied_by(&self, factor: f64) -> Self {
        Self {
            amounts: self.amounts.iter().map(|(c, a)| (*c, a * factor)).collect(),
        }
    }
}

impl From<CurrencyAmount> for MultiCurrencyAmount {
    fn from(amount: CurrencyAmount) -> Self {
        Self::empty().plus(amount)
    }
}

impl FromIterator<CurrencyAmount> for MultiCurrencyAmount {
    fn from_iter<I: IntoIterator<Item = CurrencyAmount>>(iter: I) -> Self {
        iter.into_iter().fold(Self::empty(), Self::plus)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_relative_eq;

    #[test]
    fn test_multi_currency_sums_same_currency() {
        let total: MultiCurrencyAmount = [
            CurrencyAmount::new(Currency::GBP, 1.5),
            CurrencyAmount::new(Currency::USD, 2.0),
            CurrencyAmount::new(Currency::GBP, 0.5),
        ]
        .into_iter()
        .collect();
        assert_eq!(total.len(), 2);
        assert_relative_eq!(total.amount(Currency::GBP), 2.0);
        assert_relative_eq!(total.multiplied_by(2.0).amount(Currency::USD), 4.0);
        assert_eq!(total.amount(Currency::EUR), 0.0);
    }
}
