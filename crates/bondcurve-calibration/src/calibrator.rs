//! Calibration of legal entity curve groups.

use std::collections::HashMap;

use nalgebra::DVector;

use bondcurve_core::types::CurveName;
use bondcurve_curves::jacobian::{split_by_order, CurveParameterSize, JacobianCalibrationMatrix};
use bondcurve_curves::provider::LegalEntityDiscountingProvider;
use bondcurve_curves::CurveError;
use bondcurve_math::linear_algebra::invert;
use bondcurve_math::solvers::{MultiRootFinder, NewtonVectorRootFinder};
use bondcurve_repo::reference_data::ReferenceData;

use crate::error::{CalibrationError, CalibrationResult};
use crate::functions::{CalibrationDerivative, CalibrationValue};
use crate::generator::{LegalEntityDiscountingProviderGenerator, ProviderGenerator};
use crate::group::LegalEntityDiscountingCurveGroupDefinition;
use crate::market_data::MarketData;
use crate::measures::{CalibrationMeasures, CalibrationTrade};

/// Calibrates the curves of a legal entity curve group to market quotes.
///
/// Each node trade is priced with `measures` and the root finder drives the
/// resulting residuals to zero. After the solve, the calibrator optionally
/// attaches the Jacobian of the curve parameters to the market quotes and
/// the sensitivity of each node's present value to its own quote, computed
/// with `pv_measures`.
///
/// # Example
///
/// ```rust,ignore
/// let calibrator = LegalEntityDiscountingCurveCalibrator::standard();
/// let provider = calibrator.calibrate(&group, &market_data, &ref_data)?;
/// ```
#[derive(Debug, Clone)]
pub struct LegalEntityDiscountingCurveCalibrator<R = NewtonVectorRootFinder> {
    root_finder: R,
    measures: CalibrationMeasures,
    pv_measures: CalibrationMeasures,
}

impl LegalEntityDiscountingCurveCalibrator {
    /// Newton root finder with default tolerances, par spread residuals and
    /// present value sensitivities.
    #[must_use]
    pub fn standard() -> Self {
        Self::of(
            NewtonVectorRootFinder::default(),
            CalibrationMeasures::par_spread(),
            CalibrationMeasures::present_value(),
        )
    }
}

impl Default for LegalEntityDiscountingCurveCalibrator {
    fn default() -> Self {
        Self::standard()
    }
}

impl<R: MultiRootFinder> LegalEntityDiscountingCurveCalibrator<R> {
    /// Creates a calibrator.
    #[must_use]
    pub fn of(root_finder: R, measures: CalibrationMeasures, pv_measures: CalibrationMeasures) -> Self {
        Self {
            root_finder,
            measures,
            pv_measures,
        }
    }

    /// The root finder.
    #[must_use]
    pub fn root_finder(&self) -> &R {
        &self.root_finder
    }

    /// Measures used for the calibration residuals.
    #[must_use]
    pub fn measures(&self) -> &CalibrationMeasures {
        &self.measures
    }

    /// Measures used for the present value sensitivity to market quotes.
    #[must_use]
    pub fn pv_measures(&self) -> &CalibrationMeasures {
        &self.pv_measures
    }

    /// Calibrates a group with no previously calibrated curves.
    pub fn calibrate(
        &self,
        group: &LegalEntityDiscountingCurveGroupDefinition,
        market_data: &MarketData,
        ref_data: &ReferenceData,
    ) -> CalibrationResult<LegalEntityDiscountingProvider> {
        let known = LegalEntityDiscountingProvider::empty(market_data.valuation_date());
        self.calibrate_with_known(group, &known, market_data, ref_data)
    }

    /// Calibrates groups in order, each on top of the previous result.
    pub fn calibrate_groups(
        &self,
        groups: &[LegalEntityDiscountingCurveGroupDefinition],
        known: &LegalEntityDiscountingProvider,
        market_data: &MarketData,
        ref_data: &ReferenceData,
    ) -> CalibrationResult<LegalEntityDiscountingProvider> {
        let mut provider = known.clone();
        for group in groups {
            provider = self.calibrate_with_known(group, &provider, market_data, ref_data)?;
        }
        Ok(provider)
    }

    /// Calibrates a group on top of `known`.
    ///
    /// Curves in `known` are fixed inputs. The returned context holds them
    /// plus the curves of `group`.
    ///
    /// # Errors
    ///
    /// Returns [`CalibrationError::NonSquareSystem`] when the filtered group
    /// has a different number of node trades and parameters, and
    /// [`CalibrationError::CalibrationFailed`] when the root finder does not
    /// converge.
    pub fn calibrate_with_known(
        &self,
        group: &LegalEntityDiscountingCurveGroupDefinition,
        known: &LegalEntityDiscountingProvider,
        market_data: &MarketData,
        ref_data: &ReferenceData,
    ) -> CalibrationResult<LegalEntityDiscountingProvider> {
        let valuation_date = market_data.valuation_date();
        if known.valuation_date() != valuation_date {
            return Err(CurveError::ValuationDateMismatch {
                expected: valuation_date,
                got: known.valuation_date(),
            }
            .into());
        }

        let group = group.filtered(valuation_date, ref_data)?;
        let generator = LegalEntityDiscountingProviderGenerator::of(known.clone(), &group, ref_data)?;
        let trades = group.resolved_trades(market_data, ref_data)?;
        let guesses = group.initial_guesses(market_data)?;
        let order = group.curve_order();

        let parameters = guesses.len();
        if trades.len() != parameters {
            return Err(CalibrationError::NonSquareSystem {
                group: group.name().clone(),
                instruments: trades.len(),
                parameters,
            });
        }

        tracing::info!(
            group = %group.name(),
            curves = order.len(),
            parameters,
            "calibrating curve group"
        );

        let value = CalibrationValue::new(&trades, &self.measures, &generator);
        let derivative = CalibrationDerivative::new(&trades, &self.measures, &generator, &order);
        let result = self
            .root_finder
            .find_root(
                |x: &DVector<f64>| value.evaluate(x),
                |x: &DVector<f64>| derivative.evaluate(x),
                DVector::from_vec(guesses),
            )
            .map_err(|err| match err {
                CalibrationError::Math(source) => {
                    tracing::warn!(group = %group.name(), error = %source, "curve group did not calibrate");
                    CalibrationError::CalibrationFailed {
                        group: group.name().clone(),
                        source,
                    }
                }
                other => other,
            })?;

        tracing::info!(
            group = %group.name(),
            iterations = result.iterations,
            residual = result.residual,
            "curve group calibrated"
        );

        let root = result.root;
        let compute_pv = group.compute_pv_sensitivity_to_market_quote();
        if !group.compute_jacobian() && !compute_pv {
            return generator.generate_plain(root.as_slice());
        }

        let jacobians = curve_jacobians(&derivative, &root, &order)?;
        let provider = generator.generate(root.as_slice(), &jacobians, &HashMap::new())?;
        if !compute_pv {
            return Ok(provider);
        }

        let sensitivities = self.pv_sensitivity_to_market_quote(&trades, &provider, &order)?;
        generator.generate(root.as_slice(), &jacobians, &sensitivities)
    }

    /// Sensitivity of each node trade's present value to its own quote.
    fn pv_sensitivity_to_market_quote(
        &self,
        trades: &[CalibrationTrade],
        provider: &LegalEntityDiscountingProvider,
        order: &[CurveParameterSize],
    ) -> CalibrationResult<HashMap<CurveName, Vec<f64>>> {
        let mut diagonal = Vec::with_capacity(trades.len());
        for (i, trade) in trades.iter().enumerate() {
            let row = self.pv_measures.derivative(trade, provider, order)?;
            diagonal.push(row[i]);
        }
        Ok(split_by_order(order, &diagonal)?.into_iter().collect())
    }
}

/// Inverse of the calibration Jacobian at the root, split into row blocks
/// by curve.
fn curve_jacobians<G: ProviderGenerator>(
    derivative: &CalibrationDerivative<'_, G>,
    root: &DVector<f64>,
    order: &[CurveParameterSize],
) -> CalibrationResult<HashMap<CurveName, JacobianCalibrationMatrix>> {
    let inverse = invert(&derivative.evaluate(root)?)?;
    let mut jacobians = HashMap::with_capacity(order.len());
    let mut start = 0;
    for size in order {
        let rows = inverse.rows(start, size.parameter_count).into_owned();
        start += size.parameter_count;
        jacobians.insert(
            size.name.clone(),
            JacobianCalibrationMatrix::new(order.to_vec(), rows)?,
        );
    }
    Ok(jacobians)
}
