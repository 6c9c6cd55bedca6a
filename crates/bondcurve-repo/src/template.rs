//! Repo trade templates.

use bondcurve_core::types::{BuySell, Date, Tenor};
use serde::{Deserialize, Serialize};

use crate::convention::RepoConvention;
use crate::error::RepoResult;
use crate::product::SecurityPosition;
use crate::trade::RepoTrade;

/// A convention, a tenor and collateral: everything except the economics.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RepoTemplate {
    /// Period from spot date to end date.
    pub tenor: Tenor,
    /// Collateral positions.
    pub collateral: Vec<SecurityPosition>,
    /// Market convention.
    pub convention: RepoConvention,
}

impl RepoTemplate {
    /// Creates a template.
    #[must_use]
    pub fn of(tenor: Tenor, collateral: Vec<SecurityPosition>, convention: RepoConvention) -> Self {
        Self {
            tenor,
            collateral,
            convention,
        }
    }

    /// Creates a trade from the template.
    pub fn create_trade(
        &self,
        trade_date: Date,
        buy_sell: BuySell,
        notional: f64,
        rate: f64,
    ) -> RepoResult<RepoTrade> {
        self.convention.create_trade(
            trade_date,
            self.tenor,
            self.collateral.clone(),
            buy_sell,
            notional,
            rate,
        )
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use bondcurve_core::calendars::HolidayCalendar;
    use bondcurve_core::types::SecurityId;

    #[test]
    fn test_create_trade() {
        let template = RepoTemplate::of(
            Tenor::months(1),
            vec![SecurityPosition::of(SecurityId::of("OG", "US_GOVT_10Y").unwrap())],
            RepoConvention::usd_repo(HolidayCalendar::weekends("USNY")),
        );
        let trade = template
            .create_trade(Date::from_ymd(2017, 12, 11).unwrap(), BuySell::Buy, 1.0e6, 0.0131)
            .unwrap();
        assert_eq!(trade.product.start_date(), Date::from_ymd(2017, 12, 12).unwrap());
        assert_eq!(trade.product.end_date(), Date::from_ymd(2018, 1, 12).unwrap());
        assert_eq!(trade.product.rate(), 0.0131);
    }
}
