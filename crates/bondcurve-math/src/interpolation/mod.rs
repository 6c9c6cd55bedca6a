//! Interpolation on curve nodes.
//!
//! Calibration needs both the interpolated value and its derivative with
//! respect to every node value, so each interpolator reports node
//! sensitivities alongside values.

mod linear;

pub use linear::LinearInterpolator;

/// Trait for interpolators that are defined on the whole real line.
///
/// Values outside the node range come from the interpolator's extrapolation
/// rule, so evaluation never fails once the interpolator is built.
pub trait Interpolator: Send + Sync {
    /// Returns the interpolated value at x.
    fn interpolate(&self, x: f64) -> f64;

    /// Returns `d y(x) / d y_i` for every node `i`.
    fn node_sensitivity(&self, x: f64) -> Vec<f64>;

    /// Returns the x values of the nodes.
    fn x_values(&self) -> &[f64];

    /// Returns the y values of the nodes.
    fn y_values(&self) -> &[f64];
}
