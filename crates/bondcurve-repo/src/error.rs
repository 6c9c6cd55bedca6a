//! Error types for repo operations.

use bondcurve_core::error::CoreError;
use bondcurve_core::types::{Date, SecurityId};
use bondcurve_curves::CurveError;
use thiserror::Error;

/// A specialized Result type for repo operations.
pub type RepoResult<T> = Result<T, RepoError>;

/// Errors that can occur when building, resolving or pricing repos.
#[derive(Error, Debug, Clone, PartialEq)]
pub enum RepoError {
    /// Invalid repo specification.
    #[error("Invalid repo specification: {reason}")]
    InvalidSpec {
        /// Description of what's invalid.
        reason: String,
    },

    /// Missing required field.
    #[error("Missing required field: {field}")]
    MissingField {
        /// The missing field name.
        field: &'static str,
    },

    /// Security not present in reference data.
    #[error("Security '{security_id}' not found in reference data")]
    SecurityNotFound {
        /// The security id.
        security_id: SecurityId,
    },

    /// Collateral securities map to more than one issuer, or to none.
    #[error("Collateral must be based on the unique legal entity")]
    NonUniqueCollateralIssuer,

    /// Trade date falls after the start date.
    #[error("Trade date {trade_date} must not be after start date {start_date}")]
    TradeDateAfterStart {
        /// The trade date.
        trade_date: Date,
        /// The start date.
        start_date: Date,
    },

    /// Discount curve lookup or sensitivity failure.
    #[error("Curve error: {0}")]
    Curve(#[from] CurveError),

    /// Date or calendar failure.
    #[error("Core error: {0}")]
    Core(#[from] CoreError),
}

impl RepoError {
    /// Creates an invalid specification error.
    #[must_use]
    pub fn invalid_spec(reason: impl Into<String>) -> Self {
        Self::InvalidSpec {
            reason: reason.into(),
        }
    }
}
