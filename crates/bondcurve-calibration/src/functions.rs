//! Residual and Jacobian functions handed to the root finder.
//!
//! Both functions close over immutable trades, measures and a generator. Each
//! evaluation builds a fresh discounting context from the parameter vector,
//! so evaluations never share mutable state. With the `parallel` feature the
//! trades are priced on the rayon thread pool.

use nalgebra::{DMatrix, DVector};

use bondcurve_curves::jacobian::{total_parameter_count, CurveParameterSize};

use crate::error::CalibrationResult;
use crate::generator::ProviderGenerator;
use crate::measures::{CalibrationMeasures, CalibrationTrade};

#[cfg(feature = "parallel")]
fn map_trades<T, F>(trades: &[CalibrationTrade], f: F) -> CalibrationResult<Vec<T>>
where
    T: Send,
    F: Fn(&CalibrationTrade) -> CalibrationResult<T> + Sync + Send,
{
    use rayon::prelude::*;

    trades.par_iter().map(f).collect()
}

#[cfg(not(feature = "parallel"))]
fn map_trades<T, F>(trades: &[CalibrationTrade], f: F) -> CalibrationResult<Vec<T>>
where
    F: Fn(&CalibrationTrade) -> CalibrationResult<T>,
{
    trades.iter().map(f).collect()
}

/// Maps a parameter vector to the measure value of each trade.
#[derive(Debug)]
pub struct CalibrationValue<'a, G> {
    trades: &'a [CalibrationTrade],
    measures: &'a CalibrationMeasures,
    generator: &'a G,
}

impl<'a, G: ProviderGenerator> CalibrationValue<'a, G> {
    /// Creates the function.
    #[must_use]
    pub fn new(trades: &'a [CalibrationTrade], measures: &'a CalibrationMeasures, generator: &'a G) -> Self {
        Self {
            trades,
            measures,
            generator,
        }
    }

    /// One value per trade, in trade order.
    pub fn evaluate(&self, x: &DVector<f64>) -> CalibrationResult<DVector<f64>> {
        let provider = self.generator.generate_plain(x.as_slice())?;
        let values = map_trades(self.trades, |trade| self.measures.value(trade, &provider))?;
        Ok(DVector::from_vec(values))
    }
}

/// Maps a parameter vector to the Jacobian of the trade values.
///
/// Rows follow the trades and columns follow the curve order. The matrix is
/// square only when there is one trade per parameter.
#[derive(Debug)]
pub struct CalibrationDerivative<'a, G> {
    trades: &'a [CalibrationTrade],
    measures: &'a CalibrationMeasures,
    generator: &'a G,
    curve_order: &'a [CurveParameterSize],
}

impl<'a, G: ProviderGenerator> CalibrationDerivative<'a, G> {
    /// Creates the function.
    #[must_use]
    pub fn new(
        trades: &'a [CalibrationTrade],
        measures: &'a CalibrationMeasures,
        generator: &'a G,
        curve_order: &'a [CurveParameterSize],
    ) -> Self {
        Self {
            trades,
            measures,
            generator,
            curve_order,
        }
    }

    /// The Jacobian at `x`.
    pub fn evaluate(&self, x: &DVector<f64>) -> CalibrationResult<DMatrix<f64>> {
        let provider = self.generator.generate_plain(x.as_slice())?;
        let rows = map_trades(self.trades, |trade| {
            self.measures.derivative(trade, &provider, self.curve_order)
        })?;
        let columns = total_parameter_count(self.curve_order);
        let flat: Vec<f64> = rows.into_iter().flatten().collect();
        Ok(DMatrix::from_row_slice(self.trades.len(), columns, &flat))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_relative_eq;
    use std::collections::HashMap;

    use bondcurve_core::calendars::HolidayCalendar;
    use bondcurve_core::daycounts::DayCountConvention;
    use bondcurve_core::types::{
        Currency, CurveGroupName, CurveName, Date, LegalEntityId, QuoteId, RepoGroup, SecurityId, Tenor,
    };
    use bondcurve_curves::jacobian::JacobianCalibrationMatrix;
    use bondcurve_curves::provider::LegalEntityDiscountingProvider;
    use bondcurve_repo::convention::RepoConvention;
    use bondcurve_repo::product::SecurityPosition;
    use bondcurve_repo::reference_data::{ReferenceData, SimpleLegalEntitySecurity};
    use bondcurve_repo::template::RepoTemplate;

    use crate::definition::InterpolatedNodalCurveDefinition;
    use crate::entries::RepoCurveEntry;
    use crate::error::CalibrationError;
    use crate::generator::LegalEntityDiscountingProviderGenerator;
    use crate::group::LegalEntityDiscountingCurveGroupDefinition;
    use crate::market_data::MarketData;
    use crate::node::RepoCurveNode;

    const QUOTES: [f64; 3] = [0.00565, 0.0059, 0.00605];

    struct Fixture {
        trades: Vec<CalibrationTrade>,
        generator: LegalEntityDiscountingProviderGenerator,
        order: Vec<CurveParameterSize>,
    }

    fn fixture() -> Fixture {
        let val_date = Date::from_ymd(2017, 12, 11).unwrap();
        let uk_govt = LegalEntityId::of("OG", "UK_GOVT").unwrap();
        let gilt = SecurityId::of("OG", "UK_GOVT_10Y").unwrap();
        let ref_data = ReferenceData::empty().with_security(gilt.clone(), SimpleLegalEntitySecurity::new(uk_govt.clone()));
        let convention = RepoConvention::gbp_repo(HolidayCalendar::weekends("GBLO"));

        let mut market_data = MarketData::empty(val_date);
        let mut nodes = Vec::new();
        for (tenor, quote) in [Tenor::weeks(1), Tenor::months(1), Tenor::months(3)].into_iter().zip(QUOTES) {
            let id = QuoteId::of("OG", format!("UK_REPO_{tenor}")).unwrap();
            market_data = market_data.with_value(id.clone(), quote);
            let template = RepoTemplate::of(tenor, vec![SecurityPosition::of_net(gilt.clone(), 1.0)], convention.clone());
            nodes.push(RepoCurveNode::of(template, id));
        }
        let group = LegalEntityDiscountingCurveGroupDefinition::builder(CurveGroupName::of("UK"))
            .repo_curve_group(uk_govt, RepoGroup::of("UK_GROUP"))
            .repo_curve_entry(RepoCurveEntry::of(
                CurveName::of("UK_REPO"),
                [(RepoGroup::of("UK_GROUP"), Currency::GBP)],
            ))
            .curve_definition(InterpolatedNodalCurveDefinition::new(
                CurveName::of("UK_REPO"),
                DayCountConvention::Act365Fixed,
                nodes,
            ))
            .build()
            .unwrap();

        let known = LegalEntityDiscountingProvider::empty(val_date);
        Fixture {
            trades: group.resolved_trades(&market_data, &ref_data).unwrap(),
            generator: LegalEntityDiscountingProviderGenerator::of(known, &group, &ref_data).unwrap(),
            order: group.curve_order(),
        }
    }

    #[test]
    fn test_value_is_par_spread_per_trade() {
        let f = fixture();
        let measures = CalibrationMeasures::par_spread();
        let value = CalibrationValue::new(&f.trades, &measures, &f.generator);
        let x = DVector::from_vec(QUOTES.to_vec());
        let residuals = value.evaluate(&x).unwrap();
        assert_eq!(residuals.len(), 3);

        let provider = f.generator.generate_plain(x.as_slice()).unwrap();
        for (i, trade) in f.trades.iter().enumerate() {
            assert_eq!(residuals[i], measures.value(trade, &provider).unwrap());
        }
    }

    #[test]
    fn test_derivative_matches_bumped_values() {
        let f = fixture();
        let measures = CalibrationMeasures::par_spread();
        let value = CalibrationValue::new(&f.trades, &measures, &f.generator);
        let derivative = CalibrationDerivative::new(&f.trades, &measures, &f.generator, &f.order);

        let x = DVector::from_vec(vec![0.0055, 0.006, 0.0062]);
        let jacobian = derivative.evaluate(&x).unwrap();
        assert_eq!(jacobian.shape(), (3, 3));

        let eps = 1e-7;
        for j in 0..3 {
            let mut up = x.clone();
            up[j] += eps;
            let mut down = x.clone();
            down[j] -= eps;
            let fd = (value.evaluate(&up).unwrap() - value.evaluate(&down).unwrap()) / (2.0 * eps);
            for i in 0..3 {
                assert_relative_eq!(jacobian[(i, j)], fd[i], epsilon = 1e-6);
            }
        }
    }

    #[test]
    fn test_wrong_length_is_reported() {
        let f = fixture();
        let measures = CalibrationMeasures::par_spread();
        let value = CalibrationValue::new(&f.trades, &measures, &f.generator);
        let err = value.evaluate(&DVector::zeros(2)).unwrap_err();
        assert_eq!(
            err,
            CalibrationError::ParameterCountMismatch {
                expected: 3,
                actual: 2
            }
        );
    }

    struct FlatGenerator(LegalEntityDiscountingProviderGenerator);

    impl ProviderGenerator for FlatGenerator {
        fn generate(
            &self,
            parameters: &[f64],
            jacobians: &HashMap<CurveName, JacobianCalibrationMatrix>,
            pv_sensitivities: &HashMap<CurveName, Vec<f64>>,
        ) -> CalibrationResult<LegalEntityDiscountingProvider> {
            let level = parameters.iter().sum::<f64>() / parameters.len() as f64;
            self.0
                .generate(&vec![level; parameters.len()], jacobians, pv_sensitivities)
        }
    }

    #[test]
    fn test_functions_accept_any_generator() {
        let f = fixture();
        let measures = CalibrationMeasures::par_spread();
        let generator = FlatGenerator(f.generator);
        let value = CalibrationValue::new(&f.trades, &measures, &generator);
        let flat = value.evaluate(&DVector::from_vec(vec![0.004, 0.006, 0.008])).unwrap();
        let level = value.evaluate(&DVector::from_element(3, 0.006)).unwrap();
        assert_eq!(flat, level);
    }
}
