//! # BondCurve Math
//!
//! Numerical building blocks for curve calibration:
//!
//! - **Interpolation**: linear interpolation with flat extrapolation and
//!   analytic node sensitivities
//! - **Linear Algebra**: dense solves and inverses on `nalgebra` matrices
//! - **Solvers**: multi-dimensional Newton root finding driven by
//!   caller-supplied value and Jacobian functions

#![warn(missing_docs)]
#![warn(clippy::all)]
#![warn(clippy::pedantic)]
#![allow(clippy::module_name_repetitions)]
#![allow(clippy::missing_errors_doc)]
#![allow(clippy::missing_panics_doc)]
#![allow(clippy::must_use_candidate)]
#![allow(clippy::doc_markdown)]
#![allow(clippy::cast_precision_loss)]
#![allow(clippy::similar_names)]
#![allow(clippy::many_single_char_names)]
#![allow(clippy::needless_pass_by_value)]
#![allow(clippy::uninlined_format_args)]

pub mod error;
pub mod interpolation;
pub mod linear_algebra;
pub mod solvers;

/// Prelude module for convenient imports.
pub mod prelude {
    pub use crate::error::{MathError, MathResult};
    pub use crate::interpolation::{Interpolator, LinearInterpolator};
    pub use crate::linear_algebra::{invert, solve_linear_system};
    pub use crate::solvers::{MultiRootFinder, MultiRootResult, NewtonVectorRootFinder, SolverConfig};
}

pub use error::{MathError, MathResult};
