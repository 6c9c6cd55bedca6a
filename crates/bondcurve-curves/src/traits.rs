//! The core curve abstraction.

use std::fmt;
use std::sync::Arc;

use bondcurve_core::types::CurveName;

use crate::error::CurveResult;
use crate::metadata::CurveMetadata;

/// A parameterised curve `y = f(x)`.
///
/// Curves are immutable. Calibration produces new curves through
/// [`Curve::with_parameters`] and attaches its output through
/// [`Curve::with_metadata`].
///
/// # Required Methods
///
/// - [`metadata`](Curve::metadata): name, axis types and calibration info
/// - [`parameter_count`](Curve::parameter_count) and
///   [`parameter`](Curve::parameter): the calibrated parameters
/// - [`y_value`](Curve::y_value): the curve value at `x`
/// - [`y_value_parameter_sensitivity`](Curve::y_value_parameter_sensitivity):
///   `dy/dp_i` at `x`, one entry per parameter
pub trait Curve: Send + Sync + fmt::Debug {
    /// Returns the curve metadata.
    fn metadata(&self) -> &CurveMetadata;

    /// Returns the curve name.
    fn name(&self) -> &CurveName {
        &self.metadata().name
    }

    /// Returns the number of parameters.
    fn parameter_count(&self) -> usize;

    /// Returns the parameter at `index`, or `None` when out of range.
    fn parameter(&self, index: usize) -> Option<f64>;

    /// Returns all parameters in order.
    fn parameters(&self) -> Vec<f64> {
        (0..self.parameter_count())
            .filter_map(|i| self.parameter(i))
            .collect()
    }

    /// Returns the y value at `x`.
    fn y_value(&self, x: f64) -> f64;

    /// Returns the sensitivity of the y value at `x` to each parameter.
    fn y_value_parameter_sensitivity(&self, x: f64) -> Vec<f64>;

    /// Returns a copy of this curve with different metadata.
    fn with_metadata(&self, metadata: CurveMetadata) -> Arc<dyn Curve>;

    /// Returns a copy of this curve with different parameters.
    ///
    /// # Errors
    ///
    /// Returns an error if the number of parameters differs.
    fn with_parameters(&self, parameters: Vec<f64>) -> CurveResult<Arc<dyn Curve>>;
}
