//! Root finding for systems of equations.
//!
//! Curve calibration reduces to finding `x` with `f(x) = 0` where `f` maps
//! the curve parameters to instrument residuals and `J(x)` is its Jacobian.
//! Both functions are supplied by the caller and may fail, in which case the
//! caller's error is returned unchanged.
//!
//! # Example
//!
//! ```rust
//! use bondcurve_math::solvers::{MultiRootFinder, NewtonVectorRootFinder, SolverConfig};
//! use bondcurve_math::MathError;
//! use nalgebra::{DMatrix, DVector};
//!
//! // x^2 + y^2 = 4, x = y
//! let f = |v: &DVector<f64>| -> Result<DVector<f64>, MathError> {
//!     Ok(DVector::from_vec(vec![v[0] * v[0] + v[1] * v[1] - 4.0, v[0] - v[1]]))
//! };
//! let j = |v: &DVector<f64>| -> Result<DMatrix<f64>, MathError> {
//!     Ok(DMatrix::from_row_slice(2, 2, &[2.0 * v[0], 2.0 * v[1], 1.0, -1.0]))
//! };
//!
//! let solver = NewtonVectorRootFinder::new(SolverConfig::default());
//! let result = solver.find_root(f, j, DVector::from_vec(vec![1.0, 0.5])).unwrap();
//! assert!((result.root[0] - 2.0_f64.sqrt()).abs() < 1e-10);
//! ```

mod newton;

pub use newton::NewtonVectorRootFinder;

use nalgebra::{DMatrix, DVector};

use crate::error::MathError;

/// Default absolute tolerance on the residual max-norm.
pub const DEFAULT_ABSOLUTE_TOLERANCE: f64 = 1e-12;

/// Default relative tolerance on the step size.
pub const DEFAULT_RELATIVE_TOLERANCE: f64 = 1e-12;

/// Default maximum iterations.
pub const DEFAULT_MAX_ITERATIONS: u32 = 100;

/// Configuration for vector root finders.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct SolverConfig {
    /// Convergence when the residual max-norm falls below this value.
    pub absolute_tolerance: f64,
    /// Convergence when the step max-norm falls below this value times
    /// `1 + |x|` and the residual is already small.
    pub relative_tolerance: f64,
    /// Maximum number of Jacobian evaluations.
    pub max_iterations: u32,
}

impl Default for SolverConfig {
    fn default() -> Self {
        Self {
            absolute_tolerance: DEFAULT_ABSOLUTE_TOLERANCE,
            relative_tolerance: DEFAULT_RELATIVE_TOLERANCE,
            max_iterations: DEFAULT_MAX_ITERATIONS,
        }
    }
}

impl SolverConfig {
    /// Creates a new solver configuration.
    #[must_use]
    pub fn new(absolute_tolerance: f64, relative_tolerance: f64, max_iterations: u32) -> Self {
        Self {
            absolute_tolerance,
            relative_tolerance,
            max_iterations,
        }
    }

    /// Sets the absolute tolerance.
    #[must_use]
    pub fn with_absolute_tolerance(mut self, tolerance: f64) -> Self {
        self.absolute_tolerance = tolerance;
        self
    }

    /// Sets the relative tolerance.
    #[must_use]
    pub fn with_relative_tolerance(mut self, tolerance: f64) -> Self {
        self.relative_tolerance = tolerance;
        self
    }

    /// Sets the maximum iterations.
    #[must_use]
    pub fn with_max_iterations(mut self, max_iterations: u32) -> Self {
        self.max_iterations = max_iterations;
        self
    }
}

/// Result of a vector root search.
#[derive(Debug, Clone, PartialEq)]
pub struct MultiRootResult {
    /// The root found.
    pub root: DVector<f64>,
    /// Number of Jacobian evaluations used.
    pub iterations: u32,
    /// Residual max-norm at the root.
    pub residual: f64,
}

/// Trait for solvers of `f(x) = 0` with `f: R^n -> R^n`.
pub trait MultiRootFinder: Send + Sync {
    /// Finds a root starting from `initial_guess`.
    ///
    /// # Arguments
    ///
    /// * `f` - Residual function
    /// * `jacobian` - Jacobian of `f`, rows indexed by residual, columns by parameter
    /// * `initial_guess` - Starting point
    ///
    /// # Errors
    ///
    /// Errors from `f` or `jacobian` are returned as-is. Non-convergence and
    /// singular Jacobians are reported as [`MathError`] converted into `E`.
    fn find_root<F, J, E>(
        &self,
        f: F,
        jacobian: J,
        initial_guess: DVector<f64>,
    ) -> Result<MultiRootResult, E>
    where
        F: Fn(&DVector<f64>) -> Result<DVector<f64>, E>,
        J: Fn(&DVector<f64>) -> Result<DMatrix<f64>, E>,
        E: From<MathError>;

    /// Returns the name of the solver.
    fn name(&self) -> &'static str;
}
