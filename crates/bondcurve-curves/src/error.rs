//! Error types for curve and discounting operations.

use bondcurve_core::error::CoreError;
use bondcurve_core::types::{Currency, CurveName, Date};
use bondcurve_math::MathError;
use thiserror::Error;

/// A specialized Result type for curve operations.
pub type CurveResult<T> = Result<T, CurveError>;

/// Error types for curve operations.
#[derive(Error, Debug, Clone, PartialEq)]
pub enum CurveError {
    /// No group is mapped to the requested security or legal entity.
    #[error("No {kind} curve group found for '{id}'")]
    MissingGroup {
        /// Either `repo` or `issuer`.
        kind: &'static str,
        /// Identifier that was looked up.
        id: String,
    },

    /// A group is mapped but no curve exists for the currency.
    #[error("No {kind} curve found for group '{group}' and currency {currency}")]
    MissingCurve {
        /// Either `repo` or `issuer`.
        kind: &'static str,
        /// The group name.
        group: String,
        /// The requested currency.
        currency: Currency,
    },

    /// No curve with the given name exists in the context.
    #[error("Curve '{name}' not found")]
    CurveNotFound {
        /// The curve name.
        name: CurveName,
    },

    /// The curve carries no calibration Jacobian.
    #[error("Curve '{name}' has no calibration Jacobian; market quote sensitivity is unavailable")]
    MissingJacobian {
        /// The curve name.
        name: CurveName,
    },

    /// The valuation date of discount factors differs from the context.
    #[error("Valuation date mismatch: expected {expected}, got {got}")]
    ValuationDateMismatch {
        /// Valuation date of the context.
        expected: Date,
        /// Valuation date of the discount factors.
        got: Date,
    },

    /// Vector lengths do not line up.
    #[error("Dimension mismatch: expected {expected}, got {actual}")]
    DimensionMismatch {
        /// Expected length.
        expected: usize,
        /// Actual length.
        actual: usize,
    },

    /// Curve definition or metadata is not usable.
    #[error("Invalid curve: {reason}")]
    InvalidCurve {
        /// Description of the problem.
        reason: String,
    },

    /// Numerical failure.
    #[error("Math error: {0}")]
    Math(#[from] MathError),

    /// Date or calendar failure.
    #[error("Core error: {0}")]
    Core(#[from] CoreError),
}

impl CurveError {
    /// Creates an invalid curve error.
    #[must_use]
    pub fn invalid_curve(reason: impl Into<String>) -> Self {
        Self::InvalidCurve {
            reason: reason.into(),
        }
    }

    /// Creates a dimension mismatch error.
    #[must_use]
    pub fn dimension_mismatch(expected: usize, actual: usize) -> Self {
        Self::DimensionMismatch { expected, actual }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_error_display() {
        let err = CurveError::MissingCurve {
            kind: "repo",
            group: "UK_GROUP".to_string(),
            currency: Currency::USD,
        };
        assert_eq!(
            err.to_string(),
            "No repo curve found for group 'UK_GROUP' and currency USD"
        );

        let err: CurveError = MathError::SingularMatrix.into();
        assert!(err.to_string().contains("Singular"));
    }
}
