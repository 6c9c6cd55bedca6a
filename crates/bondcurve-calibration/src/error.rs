//! Error types for curve calibration.

use bondcurve_core::error::CoreError;
use bondcurve_core::types::{CurveGroupName, CurveName, QuoteId};
use bondcurve_curves::CurveError;
use bondcurve_math::MathError;
use bondcurve_repo::RepoError;
use thiserror::Error;

/// A specialized Result type for calibration operations.
pub type CalibrationResult<T> = Result<T, CalibrationError>;

/// Errors that can occur when defining or calibrating curve groups.
#[derive(Error, Debug, Clone, PartialEq)]
pub enum CalibrationError {
    /// No calibration measure is registered for the trade type.
    #[error("Trade type '{trade_type}' is not supported for calibration")]
    UnsupportedTradeType {
        /// Name of the trade type.
        trade_type: String,
    },

    /// Two measures in one registry handle the same trade type.
    #[error("Registry '{registry}' has more than one measure for trade type '{trade_type}'")]
    DuplicateTradeType {
        /// Registry name.
        registry: String,
        /// Name of the trade type.
        trade_type: String,
    },

    /// Parameter vector length differs from the total parameter count.
    #[error("Expected {expected} curve parameters, got {actual}")]
    ParameterCountMismatch {
        /// Total parameter count of the curve definitions.
        expected: usize,
        /// Length of the supplied vector.
        actual: usize,
    },

    /// A curve entry names a curve with no definition.
    #[error("Curve '{name}' has no definition in the curve group")]
    CurveNotFound {
        /// The curve name.
        name: CurveName,
    },

    /// A quote needed by a curve node is absent from the market data.
    #[error("No market data for quote '{0}'")]
    MissingMarketData(QuoteId),

    /// The number of instruments differs from the number of parameters.
    #[error(
        "Curve group '{group}' has {instruments} instruments for {parameters} parameters"
    )]
    NonSquareSystem {
        /// The curve group.
        group: CurveGroupName,
        /// Number of calibration instruments.
        instruments: usize,
        /// Number of curve parameters.
        parameters: usize,
    },

    /// The root finder did not converge.
    #[error("Calibration of curve group '{group}' failed: {source}")]
    CalibrationFailed {
        /// The curve group.
        group: CurveGroupName,
        /// Root finder failure.
        source: MathError,
    },

    /// Invalid curve or curve group definition.
    #[error("Invalid definition: {reason}")]
    InvalidDefinition {
        /// Description of what's invalid.
        reason: String,
    },

    /// Invalid calibrator configuration.
    #[error("Configuration error: {reason}")]
    Config {
        /// Description of the problem.
        reason: String,
    },

    /// Linear algebra or root finding failure.
    #[error("Math error: {0}")]
    Math(#[from] MathError),

    /// Curve construction or lookup failure.
    #[error("Curve error: {0}")]
    Curve(#[from] CurveError),

    /// Trade creation, resolution or pricing failure.
    #[error("Repo error: {0}")]
    Repo(#[from] RepoError),

    /// Date or identifier failure.
    #[error("Core error: {0}")]
    Core(#[from] CoreError),
}

impl CalibrationError {
    /// Creates an unsupported trade type error.
    #[must_use]
    pub fn unsupported_trade_type(trade_type: impl Into<String>) -> Self {
        Self::UnsupportedTradeType {
            trade_type: trade_type.into(),
        }
    }

    /// Creates an invalid definition error.
    #[must_use]
    pub fn invalid_definition(reason: impl Into<String>) -> Self {
        Self::InvalidDefinition {
            reason: reason.into(),
        }
    }

    /// Creates a configuration error.
    #[must_use]
    pub fn config(reason: impl Into<String>) -> Self {
        Self::Config {
            reason: reason.into(),
        }
    }
}
