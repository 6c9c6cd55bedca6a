//! Linear interpolation with flat extrapolation.

use super::Interpolator;
use crate::error::{MathError, MathResult};

/// Linear interpolation between nodes, flat beyond the first and last node.
///
/// A single node gives a constant function.
///
/// # Example
///
/// ```rust
/// use bondcurve_math::interpolation::{Interpolator, LinearInterpolator};
///
/// let interp = LinearInterpolator::new(vec![1.0, 2.0], vec![0.01, 0.03]).unwrap();
/// assert!((interp.interpolate(1.5) - 0.02).abs() < 1e-15);
/// assert_eq!(interp.interpolate(0.0), 0.01);
/// assert_eq!(interp.node_sensitivity(1.25), vec![0.75, 0.25]);
/// ```
#[derive(Debug, Clone, PartialEq)]
pub struct LinearInterpolator {
    xs: Vec<f64>,
    ys: Vec<f64>,
}

impl LinearInterpolator {
    /// Creates a new linear interpolator.
    ///
    /// # Arguments
    ///
    /// * `xs` - X coordinates, strictly increasing
    /// * `ys` - Y coordinates
    ///
    /// # Errors
    ///
    /// Returns an error if there are no points, if the lengths differ or if
    /// the x values are not strictly increasing.
    pub fn new(xs: Vec<f64>, ys: Vec<f64>) -> MathResult<Self> {
        if xs.is_empty() {
            return Err(MathError::insufficient_data(1, 0));
        }
        if xs.len() != ys.len() {
            return Err(MathError::invalid_input(format!(
                "xs and ys must have same length: {} vs {}",
                xs.len(),
                ys.len()
            )));
        }
        if let Some(i) = (1..xs.len()).find(|&i| xs[i] <= xs[i - 1]) {
            return Err(MathError::invalid_input(format!(
                "x values must be strictly increasing: x[{}] = {} <= x[{}] = {}",
                i,
                xs[i],
                i - 1,
                xs[i - 1]
            )));
        }
        Ok(Self { xs, ys })
    }

    /// Returns a copy with new y values on the same x grid.
    pub fn with_y_values(&self, ys: Vec<f64>) -> MathResult<Self> {
        Self::new(self.xs.clone(), ys)
    }

    /// Locates x: `Left`/`Right` outside the nodes, otherwise the segment
    /// start index and the weight of the segment end.
    fn locate(&self, x: f64) -> Position {
        let n = self.xs.len();
        if n == 1 || x <= self.xs[0] {
            return Position::Left;
        }
        if x >= self.xs[n - 1] {
            return Position::Right;
        }
        // first index with xs[i] > x; x is strictly inside so 1 <= upper < n
        let upper = self.xs.partition_point(|&v| v <= x);
        let i = upper - 1;
        let t = (x - self.xs[i]) / (self.xs[i + 1] - self.xs[i]);
        Position::Inside(i, t)
    }
}

enum Position {
    Left,
    Right,
    Inside(usize, f64),
}

impl Interpolator for LinearInterpolator {
    fn interpolate(&self, x: f64) -> f64 {
        match self.locate(x) {
            Position::Left => self.ys[0],
            Position::Right => self.ys[self.ys.len() - 1],
            Position::Inside(i, t) => self.ys[i] + t * (self.ys[i + 1] - self.ys[i]),
        }
    }

    fn node_sensitivity(&self, x: f64) -> Vec<f64> {
        let mut sensitivity = vec![0.0; self.xs.len()];
        match self.locate(x) {
            Position::Left => sensitivity[0] = 1.0,
            Position::Right => sensitivity[self.xs.len() - 1] = 1.0,
            Position::Inside(i, t) => {
                sensitivity[i] = 1.0 - t;
                sensitivity[i + 1] = t;
            }
        }
        sensitivity
    }

    fn x_values(&self) -> &[f64] {
        &self.xs
    }

    fn y_values(&self) -> &[f64] {
        &self.ys
    }
}
