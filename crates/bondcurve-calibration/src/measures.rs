//! Calibration measures.
//!
//! A measure turns a calibrating trade into the scalar the root finder drives
//! to zero, plus its sensitivity to the curve parameters. Three measures are
//! provided for repos:
//!
//! | Measure | Value | Sensitivity |
//! |---------|-------|-------------|
//! | [`CalibrationMeasure::RepoParSpread`] | par spread | par spread sensitivity |
//! | [`CalibrationMeasure::RepoMarketQuote`] | par rate | par rate sensitivity mapped to market quotes |
//! | [`CalibrationMeasure::RepoPresentValue`] | present value | PV sensitivity mapped to market quotes |
//!
//! [`CalibrationMeasures`] is a registry holding at most one measure per
//! trade kind. Its [`derivative`](CalibrationMeasures::derivative) lays the
//! sensitivity out as one full-width row of the calibration Jacobian.

use std::collections::BTreeMap;
use std::fmt;

use bondcurve_curves::jacobian::{total_parameter_count, CurveParameterSize};
use bondcurve_curves::market_quote::MarketQuoteSensitivityCalculator;
use bondcurve_curves::provider::LegalEntityDiscountingProvider;
use bondcurve_curves::sensitivity::CurrencyParameterSensitivities;
use bondcurve_core::types::CurveName;
use bondcurve_repo::pricing::DiscountingRepoTradePricer;
use bondcurve_repo::trade::ResolvedRepoTrade;
use serde::{Deserialize, Serialize};

use crate::error::{CalibrationError, CalibrationResult};

/// The kinds of trade that can calibrate curves.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub enum TradeKind {
    /// Repurchase agreement.
    Repo,
}

impl fmt::Display for TradeKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            TradeKind::Repo => f.write_str("RepoTrade"),
        }
    }
}

/// A resolved trade used as a calibration instrument.
#[derive(Debug, Clone, PartialEq)]
pub enum CalibrationTrade {
    /// A resolved repo trade.
    Repo(ResolvedRepoTrade),
}

impl CalibrationTrade {
    /// The kind of the trade.
    #[must_use]
    pub fn kind(&self) -> TradeKind {
        match self {
            CalibrationTrade::Repo(_) => TradeKind::Repo,
        }
    }
}

impl From<ResolvedRepoTrade> for CalibrationTrade {
    fn from(trade: ResolvedRepoTrade) -> Self {
        CalibrationTrade::Repo(trade)
    }
}

/// A calibration measure for one trade kind.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum CalibrationMeasure {
    /// Repo par spread, zero at par.
    RepoParSpread,
    /// Repo par rate, equal to the quote at par.
    RepoMarketQuote,
    /// Repo present value, zero at par.
    RepoPresentValue,
}

impl CalibrationMeasure {
    const PRICER: DiscountingRepoTradePricer = DiscountingRepoTradePricer::DEFAULT;
    const MQ_CALC: MarketQuoteSensitivityCalculator = MarketQuoteSensitivityCalculator::DEFAULT;

    /// Name of the measure.
    #[must_use]
    pub fn name(&self) -> &'static str {
        match self {
            CalibrationMeasure::RepoParSpread => "RepoParSpreadDiscounting",
            CalibrationMeasure::RepoMarketQuote => "RepoMarketQuoteDiscounting",
            CalibrationMeasure::RepoPresentValue => "RepoPresentValueDiscounting",
        }
    }

    /// The trade kind handled by the measure.
    #[must_use]
    pub fn trade_kind(&self) -> TradeKind {
        match self {
            CalibrationMeasure::RepoParSpread
            | CalibrationMeasure::RepoMarketQuote
            | CalibrationMeasure::RepoPresentValue => TradeKind::Repo,
        }
    }

    /// Whether the sensitivity is expressed against market quotes.
    ///
    /// Such measures need the calibration Jacobian of every curve they
    /// touch, so they cannot produce residuals for the solve itself.
    #[must_use]
    pub fn is_market_quote_based(&self) -> bool {
        matches!(
            self,
            CalibrationMeasure::RepoMarketQuote | CalibrationMeasure::RepoPresentValue
        )
    }

    /// Value of the trade.
    pub fn value(
        &self,
        trade: &CalibrationTrade,
        provider: &LegalEntityDiscountingProvider,
    ) -> CalibrationResult<f64> {
        let CalibrationTrade::Repo(repo) = self.accept(trade)?;
        let value = match self {
            CalibrationMeasure::RepoParSpread => Self::PRICER.par_spread(repo, provider)?,
            CalibrationMeasure::RepoMarketQuote => Self::PRICER.par_rate(repo, provider)?,
            CalibrationMeasure::RepoPresentValue => Self::PRICER.present_value(repo, provider)?.amount,
        };
        Ok(value)
    }

    /// Sensitivity of the value to the curve parameters.
    pub fn sensitivities(
        &self,
        trade: &CalibrationTrade,
        provider: &LegalEntityDiscountingProvider,
    ) -> CalibrationResult<CurrencyParameterSensitivities> {
        let CalibrationTrade::Repo(repo) = self.accept(trade)?;
        let sensitivities = match self {
            CalibrationMeasure::RepoParSpread => {
                let point = Self::PRICER.par_spread_sensitivity(repo, provider)?;
                provider.parameter_sensitivity(&point)?
            }
            CalibrationMeasure::RepoMarketQuote => {
                let point = Self::PRICER.par_rate_sensitivity(repo, provider)?;
                let parameter = provider.parameter_sensitivity(&point)?;
                Self::MQ_CALC.sensitivity(&parameter, provider)?
            }
            CalibrationMeasure::RepoPresentValue => {
                let point = Self::PRICER.present_value_sensitivity(repo, provider)?;
                let parameter = provider.parameter_sensitivity(&point)?;
                Self::MQ_CALC.sensitivity(&parameter, provider)?
            }
        };
        Ok(sensitivities)
    }

    fn accept<'a>(&self, trade: &'a CalibrationTrade) -> CalibrationResult<&'a CalibrationTrade> {
        if trade.kind() == self.trade_kind() {
            Ok(trade)
        } else {
            Err(CalibrationError::unsupported_trade_type(trade.kind().to_string()))
        }
    }
}

impl fmt::Display for CalibrationMeasure {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

/// A set of calibration measures, at most one per trade kind.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CalibrationMeasures {
    name: String,
    measures: BTreeMap<TradeKind, CalibrationMeasure>,
}

impl CalibrationMeasures {
    /// Name of the par spread registry.
    pub const PAR_SPREAD: &'static str = "ParSpread";
    /// Name of the market quote registry.
    pub const MARKET_QUOTE: &'static str = "MarketQuote";
    /// Name of the present value registry.
    pub const PRESENT_VALUE: &'static str = "PresentValue";

    /// Creates a registry.
    ///
    /// # Errors
    ///
    /// Fails with [`CalibrationError::DuplicateTradeType`] if two measures
    /// handle the same trade kind.
    pub fn of(
        name: impl Into<String>,
        measures: impl IntoIterator<Item = CalibrationMeasure>,
    ) -> CalibrationResult<Self> {
        let name = name.into();
        let mut by_kind = BTreeMap::new();
        for measure in measures {
            if by_kind.insert(measure.trade_kind(), measure).is_some() {
                return Err(CalibrationError::DuplicateTradeType {
                    registry: name,
                    trade_type: measure.trade_kind().to_string(),
                });
            }
        }
        Ok(Self {
            name,
            measures: by_kind,
        })
    }

    fn single(name: &str, measure: CalibrationMeasure) -> Self {
        Self {
            name: name.to_string(),
            measures: BTreeMap::from([(measure.trade_kind(), measure)]),
        }
    }

    /// Calibrates to par spread; the standard choice.
    #[must_use]
    pub fn par_spread() -> Self {
        Self::single(Self::PAR_SPREAD, CalibrationMeasure::RepoParSpread)
    }

    /// Calibrates to the quoted rate.
    #[must_use]
    pub fn market_quote() -> Self {
        Self::single(Self::MARKET_QUOTE, CalibrationMeasure::RepoMarketQuote)
    }

    /// Measures present value, used for PV sensitivity to market quotes.
    #[must_use]
    pub fn present_value() -> Self {
        Self::single(Self::PRESENT_VALUE, CalibrationMeasure::RepoPresentValue)
    }

    /// Looks up one of the standard registries by name.
    pub fn by_name(name: &str) -> CalibrationResult<Self> {
        match name {
            Self::PAR_SPREAD => Ok(Self::par_spread()),
            Self::MARKET_QUOTE => Ok(Self::market_quote()),
            Self::PRESENT_VALUE => Ok(Self::present_value()),
            other => Err(CalibrationError::config(format!(
                "unknown calibration measures '{other}', expected one of {}, {}, {}",
                Self::PAR_SPREAD,
                Self::MARKET_QUOTE,
                Self::PRESENT_VALUE
            ))),
        }
    }

    /// The registry name.
    #[must_use]
    pub fn name(&self) -> &str {
        &self.name
    }

    /// Whether every measure can provide residuals for a solve.
    #[must_use]
    pub fn supports_calibration(&self) -> bool {
        !self.measures.values().any(CalibrationMeasure::is_market_quote_based)
    }

    /// Trade kinds with a registered measure.
    pub fn trade_kinds(&self) -> impl Iterator<Item = TradeKind> + '_ {
        self.measures.keys().copied()
    }

    fn measure(&self, trade: &CalibrationTrade) -> CalibrationResult<CalibrationMeasure> {
        self.measures
            .get(&trade.kind())
            .copied()
            .ok_or_else(|| CalibrationError::unsupported_trade_type(trade.kind().to_string()))
    }

    /// Value of a trade under its registered measure.
    pub fn value(
        &self,
        trade: &CalibrationTrade,
        provider: &LegalEntityDiscountingProvider,
    ) -> CalibrationResult<f64> {
        self.measure(trade)?.value(trade, provider)
    }

    /// Sensitivities of a trade under its registered measure.
    pub fn sensitivities(
        &self,
        trade: &CalibrationTrade,
        provider: &LegalEntityDiscountingProvider,
    ) -> CalibrationResult<CurrencyParameterSensitivities> {
        self.measure(trade)?.sensitivities(trade, provider)
    }

    /// One row of the calibration Jacobian.
    ///
    /// Sensitivities to the same curve in different currencies are summed.
    /// The row holds one slice per entry of `curve_order`; curves the trade
    /// does not depend on contribute zeros.
    pub fn derivative(
        &self,
        trade: &CalibrationTrade,
        provider: &LegalEntityDiscountingProvider,
        curve_order: &[CurveParameterSize],
    ) -> CalibrationResult<Vec<f64>> {
        let sensitivities = self.sensitivities(trade, provider)?;

        let mut by_curve: BTreeMap<&CurveName, Vec<f64>> = BTreeMap::new();
        for entry in sensitivities.iter() {
            let summed = by_curve.entry(&entry.curve_name).or_default();
            if summed.len() < entry.sensitivity.len() {
                summed.resize(entry.sensitivity.len(), 0.0);
            }
            for (total, value) in summed.iter_mut().zip(&entry.sensitivity) {
                *total += value;
            }
        }

        let mut row = Vec::with_capacity(total_parameter_count(curve_order));
        for size in curve_order {
            match by_curve.get(&size.name) {
                Some(values) if values.len() == size.parameter_count => row.extend_from_slice(values),
                Some(values) => {
                    return Err(CalibrationError::ParameterCountMismatch {
                        expected: size.parameter_count,
                        actual: values.len(),
                    })
                }
                None => row.resize(row.len() + size.parameter_count, 0.0),
            }
        }
        Ok(row)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_relative_eq;
    use std::sync::Arc;

    use bondcurve_core::calendars::HolidayCalendar;
    use bondcurve_core::daycounts::DayCountConvention;
    use bondcurve_core::types::{BuySell, Currency, Date, LegalEntityId, RepoGroup, SecurityId};
    use bondcurve_curves::discount_factors::ZeroRateDiscountFactors;
    use bondcurve_curves::metadata::CurveMetadata;
    use bondcurve_curves::nodal::InterpolatedNodalCurve;
    use bondcurve_curves::CurveError;
    use bondcurve_repo::convention::RepoConvention;
    use bondcurve_repo::product::SecurityPosition;
    use bondcurve_repo::reference_data::{ReferenceData, SimpleLegalEntitySecurity};

    fn val_date() -> Date {
        Date::from_ymd(2017, 12, 11).unwrap()
    }

    fn uk_govt() -> LegalEntityId {
        LegalEntityId::of("OG", "UK_GOVT").unwrap()
    }

    fn gilt() -> SecurityId {
        SecurityId::of("OG", "UK_GOVT_10Y").unwrap()
    }

    fn provider() -> LegalEntityDiscountingProvider {
        let metadata = CurveMetadata::zero_rates(CurveName::of("UK_REPO"), DayCountConvention::Act365Fixed);
        let curve = InterpolatedNodalCurve::new(metadata, vec![0.02, 0.1, 0.3], vec![0.0055, 0.006, 0.0062])
            .unwrap();
        let dfs = ZeroRateDiscountFactors::new(Currency::GBP, val_date(), Arc::new(curve)).unwrap();
        LegalEntityDiscountingProvider::builder(val_date())
            .repo_curve_group(uk_govt(), RepoGroup::of("UK_GROUP"))
            .repo_curve(RepoGroup::of("UK_GROUP"), Currency::GBP, dfs)
            .build()
            .unwrap()
    }

    fn trade() -> CalibrationTrade {
        let ref_data = ReferenceData::empty().with_security(gilt(), SimpleLegalEntitySecurity::new(uk_govt()));
        let convention = RepoConvention::gbp_repo(HolidayCalendar::weekends("GBLO"));
        let start = Date::from_ymd(2017, 12, 12).unwrap();
        let end = Date::from_ymd(2018, 1, 12).unwrap();
        convention
            .to_trade(val_date(), start, end, vec![SecurityPosition::of_net(gilt(), 1.0)], BuySell::Buy, 1.0, 0.0059)
            .unwrap()
            .resolve(&ref_data)
            .unwrap()
            .into()
    }

    fn order() -> Vec<CurveParameterSize> {
        vec![
            CurveParameterSize::new(CurveName::of("UK_REPO"), 3),
            CurveParameterSize::new(CurveName::of("US_REPO"), 4),
        ]
    }

    #[test]
    fn test_par_spread_value() {
        let provider = provider();
        let trade = trade();
        let CalibrationTrade::Repo(repo) = &trade;
        let expected = DiscountingRepoTradePricer::DEFAULT.par_spread(repo, &provider).unwrap();
        let measures = CalibrationMeasures::par_spread();
        assert_eq!(measures.value(&trade, &provider).unwrap(), expected);
        assert_eq!(measures.name(), "ParSpread");
    }

    #[test]
    fn test_market_quote_value_is_par_rate() {
        let provider = provider();
        let trade = trade();
        let par_spread = CalibrationMeasures::par_spread().value(&trade, &provider).unwrap();
        let par_rate = CalibrationMeasures::market_quote().value(&trade, &provider).unwrap();
        assert_relative_eq!(par_rate - par_spread, 0.0059, epsilon = 1e-15);
    }

    #[test]
    fn test_derivative_zero_fills_other_curves() {
        let provider = provider();
        let trade = trade();
        let measures = CalibrationMeasures::par_spread();
        let row = measures.derivative(&trade, &provider, &order()).unwrap();
        assert_eq!(row.len(), 7);
        assert!(row[3..].iter().all(|v| *v == 0.0));

        let sensitivities = measures.sensitivities(&trade, &provider).unwrap();
        let uk = sensitivities.get(&CurveName::of("UK_REPO"), Currency::GBP).unwrap();
        assert_eq!(&row[..3], uk.sensitivity.as_slice());
        assert!(row[..3].iter().any(|v| *v != 0.0));
    }

    #[test]
    fn test_derivative_matches_finite_difference() {
        let provider = provider();
        let trade = trade();
        let measures = CalibrationMeasures::par_spread();
        let row = measures.derivative(&trade, &provider, &order()[..1]).unwrap();

        let dfs = provider.repo_curves()[&(RepoGroup::of("UK_GROUP"), Currency::GBP)].clone();
        let base = dfs.curve().parameters();
        let eps = 1e-7;
        for i in 0..3 {
            let bumped = |shift: f64| {
                let mut params = base.clone();
                params[i] += shift;
                let curve = dfs.curve().with_parameters(params).unwrap();
                let bumped_provider = provider
                    .to_builder()
                    .repo_curve(RepoGroup::of("UK_GROUP"), Currency::GBP, dfs.with_curve(curve).unwrap())
                    .build()
                    .unwrap();
                measures.value(&trade, &bumped_provider).unwrap()
            };
            let fd = (bumped(eps) - bumped(-eps)) / (2.0 * eps);
            assert_relative_eq!(row[i], fd, epsilon = 1e-7);
        }
    }

    #[test]
    fn test_market_quote_needs_jacobian() {
        let err = CalibrationMeasures::market_quote()
            .sensitivities(&trade(), &provider())
            .unwrap_err();
        assert_eq!(
            err,
            CalibrationError::Curve(CurveError::MissingJacobian {
                name: CurveName::of("UK_REPO")
            })
        );
    }

    #[test]
    fn test_unsupported_trade_type() {
        let empty = CalibrationMeasures::of("Empty", Vec::<CalibrationMeasure>::new()).unwrap();
        let err = empty.value(&trade(), &provider()).unwrap_err();
        assert_eq!(err, CalibrationError::unsupported_trade_type("RepoTrade"));
        assert_eq!(err.to_string(), "Trade type 'RepoTrade' is not supported for calibration");
        assert!(empty.derivative(&trade(), &provider(), &order()).is_err());
    }

    #[test]
    fn test_registry_construction() {
        let err = CalibrationMeasures::of(
            "Mixed",
            [CalibrationMeasure::RepoParSpread, CalibrationMeasure::RepoPresentValue],
        )
        .unwrap_err();
        assert!(matches!(err, CalibrationError::DuplicateTradeType { .. }));

        assert_eq!(CalibrationMeasures::by_name("PresentValue").unwrap(), CalibrationMeasures::present_value());
        assert!(matches!(
            CalibrationMeasures::by_name("Yield"),
            Err(CalibrationError::Config { .. })
        ));
        let kinds: Vec<_> = CalibrationMeasures::market_quote().trade_kinds().collect();
        assert_eq!(kinds, vec![TradeKind::Repo]);
    }

    #[test]
    fn test_only_par_spread_supports_calibration() {
        assert!(CalibrationMeasures::par_spread().supports_calibration());
        assert!(!CalibrationMeasures::market_quote().supports_calibration());
        assert!(!CalibrationMeasures::present_value().supports_calibration());
    }
}
