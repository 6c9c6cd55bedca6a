//! Linear algebra utilities.
//!
//! Thin wrappers over `nalgebra` that report dimension problems and
//! singularity as [`MathError`] values instead of panicking or returning
//! `Option`.

use crate::error::{MathError, MathResult};
use nalgebra::{DMatrix, DVector};

/// Pivot magnitude below which a matrix is treated as singular.
const SINGULARITY_THRESHOLD: f64 = 1e-14;

fn ensure_square(matrix: &DMatrix<f64>) -> MathResult<usize> {
    let n = matrix.nrows();
    if n != matrix.ncols() {
        return Err(MathError::DimensionMismatch {
            rows1: n,
            cols1: matrix.ncols(),
            rows2: matrix.ncols(),
            cols2: n,
        });
    }
    Ok(n)
}

/// Solves a linear system Ax = b using LU decomposition with partial pivoting.
pub fn solve_linear_system(a: &DMatrix<f64>, b: &DVector<f64>) -> MathResult<DVector<f64>> {
    let n = ensure_square(a)?;
    if n != b.len() {
        return Err(MathError::DimensionMismatch {
            rows1: n,
            cols1: n,
            rows2: b.len(),
            cols2: 1,
        });
    }
    let lu = a.clone().lu();
    let u = lu.u();
    if (0..n).any(|i| u[(i, i)].abs() < SINGULARITY_THRESHOLD) {
        return Err(MathError::SingularMatrix);
    }
    lu.solve(b).ok_or(MathError::SingularMatrix)
}

/// Inverts a square matrix.
pub fn invert(matrix: &DMatrix<f64>) -> MathResult<DMatrix<f64>> {
    ensure_square(matrix)?;
    if matrix.nrows() == 0 {
        return Ok(matrix.clone());
    }
    matrix.clone().try_inverse().ok_or(MathError::SingularMatrix)
}

/// Max-norm of a vector, zero for an empty vector.
#[must_use]
pub fn max_norm(v: &DVector<f64>) -> f64 {
    v.iter().fold(0.0_f64, |acc, x| acc.max(x.abs()))
}
