//! Curve nodes built from repo quotes.
//!
//! A node couples one calibrating instrument with one curve parameter. The
//! node's trade is a repo traded on the valuation date at the quoted rate, and
//! the parameter is pinned to the trade's end date unless a fixed date is
//! given.

use bondcurve_core::types::{BuySell, Date, QuoteId};
use bondcurve_curves::metadata::{ParameterMetadata, ValueType};
use bondcurve_repo::reference_data::ReferenceData;
use bondcurve_repo::template::RepoTemplate;
use bondcurve_repo::trade::{RepoTrade, ResolvedRepoTrade};
use serde::{Deserialize, Serialize};
use std::collections::BTreeSet;

use crate::error::CalibrationResult;
use crate::market_data::MarketData;

/// Where a node sits on the curve.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, Default)]
pub enum CurveNodeDate {
    /// The end date of the node trade.
    #[default]
    End,
    /// An explicit date.
    Fixed(Date),
}

/// A curve node whose instrument is a spot-starting repo.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RepoCurveNode {
    template: RepoTemplate,
    rate_id: QuoteId,
    additional_spread: f64,
    label: String,
    date: CurveNodeDate,
}

impl RepoCurveNode {
    /// Creates a node quoted by `rate_id`, labelled with the template tenor.
    #[must_use]
    pub fn of(template: RepoTemplate, rate_id: QuoteId) -> Self {
        let label = template.tenor.to_string();
        Self {
            template,
            rate_id,
            additional_spread: 0.0,
            label,
            date: CurveNodeDate::End,
        }
    }

    /// Sets a spread added to the quoted rate.
    #[must_use]
    pub fn with_additional_spread(mut self, spread: f64) -> Self {
        self.additional_spread = spread;
        self
    }

    /// Sets the label.
    #[must_use]
    pub fn with_label(mut self, label: impl Into<String>) -> Self {
        self.label = label.into();
        self
    }

    /// Sets the node date.
    #[must_use]
    pub fn with_date(mut self, date: CurveNodeDate) -> Self {
        self.date = date;
        self
    }

    /// The trade template.
    #[must_use]
    pub fn template(&self) -> &RepoTemplate {
        &self.template
    }

    /// The quote giving the repo rate.
    #[must_use]
    pub fn rate_id(&self) -> &QuoteId {
        &self.rate_id
    }

    /// Spread added to the quoted rate.
    #[must_use]
    pub fn additional_spread(&self) -> f64 {
        self.additional_spread
    }

    /// The node label.
    #[must_use]
    pub fn label(&self) -> &str {
        &self.label
    }

    /// Quotes this node reads.
    #[must_use]
    pub fn requirements(&self) -> BTreeSet<QuoteId> {
        BTreeSet::from([self.rate_id.clone()])
    }

    /// The date the node's parameter is pinned to.
    pub fn date(&self, valuation_date: Date, ref_data: &ReferenceData) -> CalibrationResult<Date> {
        match self.date {
            CurveNodeDate::Fixed(date) => Ok(date),
            CurveNodeDate::End => {
                let trade = self
                    .template
                    .create_trade(valuation_date, BuySell::Buy, 1.0, 0.0)?;
                Ok(trade.resolve(ref_data)?.product.end_date)
            }
        }
    }

    /// Parameter metadata for the node.
    pub fn metadata(
        &self,
        valuation_date: Date,
        ref_data: &ReferenceData,
    ) -> CalibrationResult<ParameterMetadata> {
        let date = self.date(valuation_date, ref_data)?;
        Ok(ParameterMetadata::tenor_date(
            self.template.tenor,
            date,
            self.label.clone(),
        ))
    }

    /// Starting value of the node's parameter.
    ///
    /// Rate curves start from the quote. Discount factor curves start from
    /// the quote compounded over the approximate tenor length.
    pub fn initial_guess(
        &self,
        market_data: &MarketData,
        value_type: ValueType,
    ) -> CalibrationResult<f64> {
        let rate = market_data.value(&self.rate_id)?;
        Ok(match value_type {
            ValueType::DiscountFactor => (-rate * self.template.tenor.approximate_years()).exp(),
            ValueType::ZeroRate | ValueType::ForwardRate | ValueType::YearFraction => rate,
        })
    }

    /// The node trade for a signed quantity.
    ///
    /// A non-negative quantity buys, a negative one sells, and the notional is
    /// the absolute quantity. The rate is the quote plus the additional spread.
    pub fn trade(
        &self,
        quantity: f64,
        market_data: &MarketData,
        _ref_data: &ReferenceData,
    ) -> CalibrationResult<RepoTrade> {
        let rate = market_data.value(&self.rate_id)? + self.additional_spread;
        Ok(self.template.create_trade(
            market_data.valuation_date(),
            BuySell::of_quantity(quantity),
            quantity.abs(),
            rate,
        )?)
    }

    /// The resolved node trade for a signed quantity.
    pub fn resolved_trade(
        &self,
        quantity: f64,
        market_data: &MarketData,
        ref_data: &ReferenceData,
    ) -> CalibrationResult<ResolvedRepoTrade> {
        Ok(self
            .trade(quantity, market_data, ref_data)?
            .resolve(ref_data)?)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_relative_eq;
    use bondcurve_core::calendars::HolidayCalendar;
    use bondcurve_core::types::{LegalEntityId, SecurityId, Tenor};
    use bondcurve_repo::convention::RepoConvention;
    use bondcurve_repo::product::SecurityPosition;
    use bondcurve_repo::reference_data::SimpleLegalEntitySecurity;

    use crate::error::CalibrationError;

    fn val_date() -> Date {
        Date::from_ymd(2017, 12, 11).unwrap()
    }

    fn gilt() -> SecurityId {
        SecurityId::of("OG", "UK_GOVT_10Y").unwrap()
    }

    fn ref_data() -> ReferenceData {
        ReferenceData::empty().with_security(
            gilt(),
            SimpleLegalEntitySecurity::new(LegalEntityId::of("OG", "UK_GOVT").unwrap()),
        )
    }

    fn node(tenor: Tenor) -> RepoCurveNode {
        let template = RepoTemplate::of(
            tenor,
            vec![SecurityPosition::of_net(gilt(), 1.0)],
            RepoConvention::gbp_repo(HolidayCalendar::weekends("GBLO")),
        );
        RepoCurveNode::of(template, QuoteId::of("OG", format!("UK_REPO_{tenor}")).unwrap())
    }

    fn market_data(node: &RepoCurveNode, rate: f64) -> MarketData {
        MarketData::empty(val_date()).with_value(node.rate_id().clone(), rate)
    }

    #[test]
    fn test_defaults() {
        let node = node(Tenor::weeks(1));
        assert_eq!(node.label(), "1W");
        assert_eq!(node.additional_spread(), 0.0);
        assert_eq!(node.requirements().len(), 1);
        assert!(node.requirements().contains(node.rate_id()));
    }

    #[test]
    fn test_end_date() {
        // spot is Tuesday 12 Dec, one month later is Friday 12 Jan
        let node = node(Tenor::months(1));
        assert_eq!(
            node.date(val_date(), &ref_data()).unwrap(),
            Date::from_ymd(2018, 1, 12).unwrap()
        );
        let fixed = Date::from_ymd(2018, 1, 15).unwrap();
        let pinned = node.with_date(CurveNodeDate::Fixed(fixed));
        assert_eq!(pinned.date(val_date(), &ref_data()).unwrap(), fixed);
        let metadata = pinned.metadata(val_date(), &ref_data()).unwrap();
        assert_eq!(metadata.date, Some(fixed));
        assert_eq!(metadata.tenor, Some(Tenor::months(1)));
        assert_eq!(metadata.label, "1M");
    }

    #[test]
    fn test_initial_guess() {
        let node = node(Tenor::months(3));
        let data = market_data(&node, 0.006);
        assert_eq!(node.initial_guess(&data, ValueType::ZeroRate).unwrap(), 0.006);
        assert_relative_eq!(
            node.initial_guess(&data, ValueType::DiscountFactor).unwrap(),
            (-0.006_f64 * 0.25).exp()
        );
    }

    #[test]
    fn test_trade_direction_and_rate() {
        let node = node(Tenor::weeks(1)).with_additional_spread(0.0001);
        let data = market_data(&node, 0.00565);

        let bought = node.resolved_trade(2.0, &data, &ref_data()).unwrap();
        assert_relative_eq!(bought.product.notional, 2.0);
        assert_relative_eq!(bought.product.rate, 0.00575);
        assert_eq!(bought.info.trade_date, Some(val_date()));
        assert_eq!(bought.product.start_date, Date::from_ymd(2017, 12, 12).unwrap());

        let sold = node.resolved_trade(-3.0, &data, &ref_data()).unwrap();
        assert_relative_eq!(sold.product.notional, -3.0);
    }

    #[test]
    fn test_missing_quote() {
        let node = node(Tenor::weeks(1));
        let data = MarketData::empty(val_date());
        assert_eq!(
            node.trade(1.0, &data, &ref_data()).unwrap_err(),
            CalibrationError::MissingMarketData(node.rate_id().clone())
        );
    }
}
