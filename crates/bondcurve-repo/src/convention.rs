//! Market conventions for repos.

use bondcurve_core::calendars::{BusinessDayAdjustment, BusinessDayConvention, DaysAdjustment, HolidayCalendar};
use bondcurve_core::daycounts::DayCountConvention;
use bondcurve_core::types::{BuySell, Currency, Date, Tenor};
use serde::{Deserialize, Serialize};

use crate::error::{RepoError, RepoResult};
use crate::product::{Repo, SecurityPosition};
use crate::trade::{RepoTrade, TradeInfo};

/// How a repo of a given market is dated and accrues.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RepoConvention {
    /// Convention name.
    pub name: String,
    /// Cash currency.
    pub currency: Currency,
    /// Adjustment applied to start and end dates.
    pub business_day_adjustment: BusinessDayAdjustment,
    /// Accrual day count.
    pub day_count: DayCountConvention,
    /// Offset from trade date to start date.
    pub spot_date_offset: DaysAdjustment,
}

impl RepoConvention {
    /// Creates a convention.
    #[must_use]
    pub fn new(
        name: impl Into<String>,
        currency: Currency,
        business_day_adjustment: BusinessDayAdjustment,
        day_count: DayCountConvention,
        spot_date_offset: DaysAdjustment,
    ) -> Self {
        Self {
            name: name.into(),
            currency,
            business_day_adjustment,
            day_count,
            spot_date_offset,
        }
    }

    /// Sterling gilt repo: ACT/360, following, T+1 on the given calendar.
    #[must_use]
    pub fn gbp_repo(calendar: HolidayCalendar) -> Self {
        Self::standard("GBP-REPO", Currency::GBP, calendar)
    }

    /// US Treasury repo: ACT/360, following, T+1 on the given calendar.
    #[must_use]
    pub fn usd_repo(calendar: HolidayCalendar) -> Self {
        Self::standard("USD-REPO", Currency::USD, calendar)
    }

    fn standard(name: &str, currency: Currency, calendar: HolidayCalendar) -> Self {
        Self::new(
            name,
            currency,
            BusinessDayAdjustment::new(BusinessDayConvention::Following, calendar.clone()),
            DayCountConvention::Act360,
            DaysAdjustment::business_days(1, calendar),
        )
    }

    /// Start date of a repo traded on `trade_date`.
    pub fn calculate_spot_date(&self, trade_date: Date) -> RepoResult<Date> {
        Ok(self.spot_date_offset.adjust(trade_date)?)
    }

    /// Creates a spot-starting trade for a tenor.
    pub fn create_trade(
        &self,
        trade_date: Date,
        tenor: Tenor,
        collateral: Vec<SecurityPosition>,
        buy_sell: BuySell,
        notional: f64,
        rate: f64,
    ) -> RepoResult<RepoTrade> {
        let start_date = self.calculate_spot_date(trade_date)?;
        let end_date = tenor.add_to(start_date)?;
        self.to_trade(trade_date, start_date, end_date, collateral, buy_sell, notional, rate)
    }

    /// Creates a trade between explicit dates.
    pub fn to_trade(
        &self,
        trade_date: Date,
        start_date: Date,
        end_date: Date,
        collateral: Vec<SecurityPosition>,
        buy_sell: BuySell,
        notional: f64,
        rate: f64,
    ) -> RepoResult<RepoTrade> {
        self.to_trade_with_info(
            TradeInfo::of(trade_date),
            start_date,
            end_date,
            collateral,
            buy_sell,
            notional,
            rate,
        )
    }

    /// Creates a trade between explicit dates with full trade info.
    ///
    /// # Errors
    ///
    /// Fails if the trade date is after the start date or the product is
    /// invalid.
    pub fn to_trade_with_info(
        &self,
        info: TradeInfo,
        start_date: Date,
        end_date: Date,
        collateral: Vec<SecurityPosition>,
        buy_sell: BuySell,
        notional: f64,
        rate: f64,
    ) -> RepoResult<RepoTrade> {
        if let Some(trade_date) = info.trade_date {
            if trade_date > start_date {
                return Err(RepoError::TradeDateAfterStart {
                    trade_date,
                    start_date,
                });
            }
        }
        let product = Repo::builder()
            .buy_sell(buy_sell)
            .collateral(collateral)
            .currency(self.currency)
            .notional(notional)
            .start_date(start_date)
            .end_date(end_date)
            .business_day_adjustment(self.business_day_adjustment.clone())
            .day_count(self.day_count)
            .rate(rate)
            .build()?;
        Ok(RepoTrade::new(info, product))
    }
}
