//! Calibration Jacobians.

use bondcurve_core::types::CurveName;
use nalgebra::DMatrix;
use serde::{Deserialize, Serialize};

use crate::error::{CurveError, CurveResult};

/// Name and parameter count of one curve in a calibration order.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct CurveParameterSize {
    /// The curve name.
    pub name: CurveName,
    /// Number of parameters of the curve.
    pub parameter_count: usize,
}

impl CurveParameterSize {
    /// Creates a new entry.
    #[must_use]
    pub fn new(name: CurveName, parameter_count: usize) -> Self {
        Self {
            name,
            parameter_count,
        }
    }
}

/// Total parameter count of an ordered list of curves.
#[must_use]
pub fn total_parameter_count(order: &[CurveParameterSize]) -> usize {
    order.iter().map(|c| c.parameter_count).sum()
}

/// Sensitivity of one curve's parameters to the market quotes of its group.
///
/// Rows correspond to the curve's parameters and columns to the parameters of
/// every curve in `curve_order`, concatenated in that order. Column `j` is
/// therefore the derivative with respect to the `j`-th quote of the group.
#[derive(Debug, Clone, PartialEq)]
pub struct JacobianCalibrationMatrix {
    curve_order: Vec<CurveParameterSize>,
    matrix: DMatrix<f64>,
}

impl JacobianCalibrationMatrix {
    /// Creates the matrix, checking that the columns match the curve order.
    pub fn new(curve_order: Vec<CurveParameterSize>, matrix: DMatrix<f64>) -> CurveResult<Self> {
        let total = total_parameter_count(&curve_order);
        if matrix.ncols() != total {
            return Err(CurveError::dimension_mismatch(total, matrix.ncols()));
        }
        Ok(Self {
            curve_order,
            matrix,
        })
    }

    /// Curves covered by the columns, in order.
    #[must_use]
    pub fn curve_order(&self) -> &[CurveParameterSize] {
        &self.curve_order
    }

    /// The matrix.
    #[must_use]
    pub fn matrix(&self) -> &DMatrix<f64> {
        &self.matrix
    }

    /// Number of columns.
    #[must_use]
    pub fn total_parameter_count(&self) -> usize {
        self.matrix.ncols()
    }

    /// Multiplies a row vector of length `rows` by the matrix.
    pub fn multiply_row(&self, row: &[f64]) -> CurveResult<Vec<f64>> {
        if row.len() != self.matrix.nrows() {
            return Err(CurveError::dimension_mismatch(self.matrix.nrows(), row.len()));
        }
        let result = (0..self.matrix.ncols())
            .map(|j| row.iter().enumerate().map(|(i, v)| v * self.matrix[(i, j)]).sum())
            .collect();
        Ok(result)
    }

    /// Splits a vector laid out in curve order into one slice per curve.
    pub fn split_values(&self, values: &[f64]) -> CurveResult<Vec<(CurveName, Vec<f64>)>> {
        split_by_order(&self.curve_order, values)
    }
}

/// Splits a vector laid out in `order` into one owned slice per curve.
pub fn split_by_order(
    order: &[CurveParameterSize],
    values: &[f64],
) -> CurveResult<Vec<(CurveName, Vec<f64>)>> {
    let total = total_parameter_count(order);
    if values.len() != total {
        return Err(CurveError::dimension_mismatch(total, values.len()));
    }
    let mut start = 0;
    let mut split = Vec::with_capacity(order.len());
    for entry in order {
        let end = start + entry.parameter_count;
        split.push((entry.name.clone(), values[start..end].to_vec()));
        start = end;
    }
    Ok(split)
}
