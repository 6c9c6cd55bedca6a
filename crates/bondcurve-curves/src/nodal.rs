//! Interpolated nodal curves.

use std::sync::Arc;

use bondcurve_math::interpolation::{Interpolator, LinearInterpolator};

use crate::error::{CurveError, CurveResult};
use crate::metadata::CurveMetadata;
use crate::traits::Curve;

/// A curve defined by y values at fixed x nodes.
///
/// The y values are the curve parameters. Values between nodes are linearly
/// interpolated; values outside the node range are flat extrapolated from the
/// nearest node.
#[derive(Debug, Clone)]
pub struct InterpolatedNodalCurve {
    metadata: CurveMetadata,
    interpolator: LinearInterpolator,
}

impl InterpolatedNodalCurve {
    /// Creates a curve from nodes.
    ///
    /// # Errors
    ///
    /// Returns an error if the nodes are empty, not strictly increasing, of
    /// different lengths, or if the metadata carries a parameter description
    /// count different from the node count.
    pub fn new(metadata: CurveMetadata, x_values: Vec<f64>, y_values: Vec<f64>) -> CurveResult<Self> {
        let interpolator = LinearInterpolator::new(x_values, y_values)?;
        Self::check_metadata(&metadata, interpolator.x_values().len())?;
        Ok(Self {
            metadata,
            interpolator,
        })
    }

    fn check_metadata(metadata: &CurveMetadata, parameter_count: usize) -> CurveResult<()> {
        let described = metadata.parameter_metadata.len();
        if described != 0 && described != parameter_count {
            return Err(CurveError::invalid_curve(format!(
                "curve '{}' has {} parameters but {} parameter descriptions",
                metadata.name, parameter_count, described
            )));
        }
        Ok(())
    }

    /// The x values of the nodes.
    #[must_use]
    pub fn x_values(&self) -> &[f64] {
        self.interpolator.x_values()
    }

    /// The y values of the nodes.
    #[must_use]
    pub fn y_values(&self) -> &[f64] {
        self.interpolator.y_values()
    }
}

impl Curve for InterpolatedNodalCurve {
    fn metadata(&self) -> &CurveMetadata {
        &self.metadata
    }

    fn parameter_count(&self) -> usize {
        self.interpolator.y_values().len()
    }

    fn parameter(&self, index: usize) -> Option<f64> {
        self.interpolator.y_values().get(index).copied()
    }

    fn y_value(&self, x: f64) -> f64 {
        self.interpolator.interpolate(x)
    }

    fn y_value_parameter_sensitivity(&self, x: f64) -> Vec<f64> {
        self.interpolator.node_sensitivity(x)
    }

    fn with_metadata(&self, metadata: CurveMetadata) -> Arc<dyn Curve> {
        Arc::new(Self {
            metadata,
            interpolator: self.interpolator.clone(),
        })
    }

    fn with_parameters(&self, parameters: Vec<f64>) -> CurveResult<Arc<dyn Curve>> {
        let count = self.parameter_count();
        if parameters.len() != count {
            return Err(CurveError::dimension_mismatch(count, parameters.len()));
        }
        Ok(Arc::new(Self {
            metadata: self.metadata.clone(),
            interpolator: self.interpolator.with_y_values(parameters)?,
        }))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_relative_eq;
    use bondcurve_core::daycounts::DayCountConvention;
    use bondcurve_core::types::CurveName;

    use crate::metadata::ParameterMetadata;

    fn curve() -> InterpolatedNodalCurve {
        let md = CurveMetadata::zero_rates(CurveName::of("C"), DayCountConvention::Act365Fixed);
        InterpolatedNodalCurve::new(md, vec![0.1, 0.5, 1.0], vec![0.01, 0.02, 0.015]).unwrap()
    }

    #[test]
    fn test_values_and_extrapolation() {
        let c = curve();
        assert_relative_eq!(c.y_value(0.3), 0.015, epsilon = 1e-15);
        assert_relative_eq!(c.y_value(0.0), 0.01);
        assert_relative_eq!(c.y_value(3.0), 0.015);
        assert_eq!(c.parameter_count(), 3);
        assert_eq!(c.parameter(1), Some(0.02));
        assert_eq!(c.parameter(3), None);
        assert_eq!(c.parameters(), vec![0.01, 0.02, 0.015]);
    }

    #[test]
    fn test_parameter_sensitivity_matches_bump() {
        let c = curve();
        let x = 0.7;
        let sens = c.y_value_parameter_sensitivity(x);
        let base = c.y_value(x);
        for i in 0..3 {
            let mut params = c.parameters();
            params[i] += 1e-6;
            let bumped = c.with_parameters(params).unwrap();
            assert_relative_eq!((bumped.y_value(x) - base) / 1e-6, sens[i], epsilon = 1e-8);
        }
    }

    #[test]
    fn test_with_parameters_checks_length() {
        assert_eq!(
            curve().with_parameters(vec![0.0]).unwrap_err(),
            CurveError::dimension_mismatch(3, 1)
        );
    }

    #[test]
    fn test_with_metadata_keeps_nodes() {
        let c = curve();
        let md = c.metadata().clone().with_pv_sensitivity_to_market_quote(vec![1.0, 2.0, 3.0]);
        let updated = c.with_metadata(md);
        assert_eq!(updated.parameters(), c.parameters());
        assert!(updated.metadata().pv_sensitivity_to_market_quote().is_some());
    }

    #[test]
    fn test_parameter_metadata_count_checked() {
        let md = CurveMetadata::zero_rates(CurveName::of("C"), DayCountConvention::Act365Fixed)
            .with_parameter_metadata(vec![ParameterMetadata::labelled("1W")]);
        assert!(matches!(
            InterpolatedNodalCurve::new(md, vec![0.1, 0.2], vec![0.0, 0.0]),
            Err(CurveError::InvalidCurve { .. })
        ));
    }
}
