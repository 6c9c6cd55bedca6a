//! Direction of a trade.

use serde::{Deserialize, Serialize};

/// Whether the trade buys or sells the product.
///
/// For a repo, `Buy` is the cash lender: it pays the notional at the start and
/// receives notional plus interest at the end.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, Default)]
pub enum BuySell {
    /// Buy.
    #[default]
    Buy,
    /// Sell.
    Sell,
}

impl BuySell {
    /// Chooses the direction from the sign of a quantity; zero counts as buy.
    #[must_use]
    pub fn of_quantity(quantity: f64) -> Self {
        if quantity < 0.0 {
            BuySell::Sell
        } else {
            BuySell::Buy
        }
    }

    /// Applies the direction to an amount: positive for buy, negative for sell.
    #[must_use]
    pub fn normalize(&self, amount: f64) -> f64 {
        match self {
            BuySell::Buy => amount.abs(),
            BuySell::Sell => -amount.abs(),
        }
    }

    /// Returns true for `Buy`.
    #[must_use]
    pub fn is_buy(&self) -> bool {
        matches!(self, BuySell::Buy)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_normalize() {
        assert_eq!(BuySell::Buy.normalize(-5.0), 5.0);
        assert_eq!(BuySell::Sell.normalize(5.0), -5.0);
        assert_eq!(BuySell::of_quantity(-1.0), BuySell::Sell);
        assert_eq!(BuySell::of_quantity(0.0), BuySell::Buy);
    }
}
