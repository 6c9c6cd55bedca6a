//! Market quote sensitivities.

use bondcurve_core::types::CurveName;

use crate::error::{CurveError, CurveResult};
use crate::metadata::ParameterMetadata;
use crate::provider::LegalEntityDiscountingProvider;
use crate::sensitivity::{CurrencyParameterSensitivities, CurrencyParameterSensitivity};

/// Converts curve parameter sensitivities into market quote sensitivities.
///
/// For each input entry the curve's calibration Jacobian is looked up; the
/// row of parameter sensitivities is multiplied by the Jacobian and the
/// result split across the curves of the calibration group. Entries landing
/// on the same curve and currency are summed.
#[derive(Debug, Clone, Copy, Default)]
pub struct MarketQuoteSensitivityCalculator;

impl MarketQuoteSensitivityCalculator {
    /// The default calculator.
    pub const DEFAULT: Self = Self;

    /// Maps parameter sensitivities onto market quotes.
    ///
    /// # Errors
    ///
    /// Returns `CurveError::CurveNotFound` if an entry names a curve absent
    /// from the provider, and `CurveError::MissingJacobian` if that curve was
    /// not calibrated with a Jacobian.
    pub fn sensitivity(
        &self,
        parameter_sensitivities: &CurrencyParameterSensitivities,
        provider: &LegalEntityDiscountingProvider,
    ) -> CurveResult<CurrencyParameterSensitivities> {
        let mut result = CurrencyParameterSensitivities::empty();
        for entry in parameter_sensitivities.iter() {
            let curve = provider
                .find_curve(&entry.curve_name)
                .ok_or_else(|| CurveError::CurveNotFound {
                    name: entry.curve_name.clone(),
                })?;
            let jacobian = curve
                .metadata()
                .jacobian()
                .ok_or_else(|| CurveError::MissingJacobian {
                    name: entry.curve_name.clone(),
                })?;
            let quote_sensitivity = jacobian.multiply_row(&entry.sensitivity)?;
            for (name, values) in jacobian.split_values(&quote_sensitivity)? {
                let metadata = parameter_metadata(provider, &name);
                result = result.combined_with_entry(CurrencyParameterSensitivity::new(
                    name,
                    entry.currency,
                    metadata,
                    values,
                ));
            }
        }
        log::debug!(
            "mapped {} parameter sensitivities to {} market quote sensitivities",
            parameter_sensitivities.len(),
            result.len()
        );
        Ok(result)
    }
}

fn parameter_metadata(
    provider: &LegalEntityDiscountingProvider,
    name: &CurveName,
) -> Vec<ParameterMetadata> {
    provider
        .find_curve(name)
        .map(|curve| curve.metadata().parameter_metadata.clone())
        .unwrap_or_default()
}
