//! Curve metadata.
//!
//! Metadata names a curve, describes its axes and carries per-parameter
//! labels. After calibration it also carries the Jacobian of the curve
//! parameters with respect to the market quotes and, optionally, the present
//! value sensitivity of each node trade to its own quote.

use bondcurve_core::daycounts::DayCountConvention;
use bondcurve_core::types::{CurveName, Date, Tenor};
use serde::{Deserialize, Serialize};
use std::fmt;

use crate::jacobian::JacobianCalibrationMatrix;

/// What the values on a curve axis represent.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum ValueType {
    /// Year fraction from the valuation date.
    YearFraction,
    /// Continuously compounded zero rate.
    ZeroRate,
    /// Forward rate.
    ForwardRate,
    /// Discount factor.
    DiscountFactor,
}

impl fmt::Display for ValueType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            ValueType::YearFraction => "YearFraction",
            ValueType::ZeroRate => "ZeroRate",
            ValueType::ForwardRate => "ForwardRate",
            ValueType::DiscountFactor => "DiscountFactor",
        };
        f.write_str(name)
    }
}

/// Describes a single curve parameter, usually the node built from one quote.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct ParameterMetadata {
    /// Human readable label, e.g. `1W`.
    pub label: String,
    /// Date the parameter is pinned to, if any.
    pub date: Option<Date>,
    /// Tenor the parameter was built from, if any.
    pub tenor: Option<Tenor>,
}

impl ParameterMetadata {
    /// Metadata carrying only a label.
    #[must_use]
    pub fn labelled(label: impl Into<String>) -> Self {
        Self {
            label: label.into(),
            date: None,
            tenor: None,
        }
    }

    /// Metadata for a tenor node pinned to a date.
    #[must_use]
    pub fn tenor_date(tenor: Tenor, date: Date, label: impl Into<String>) -> Self {
        Self {
            label: label.into(),
            date: Some(date),
            tenor: Some(tenor),
        }
    }
}

/// Calibration output attached to a curve.
#[derive(Debug, Clone, PartialEq, Default)]
pub struct CurveInfo {
    /// Sensitivity of this curve's parameters to every quote of its group.
    pub jacobian: Option<JacobianCalibrationMatrix>,
    /// Present value sensitivity of each node trade to its own quote.
    pub pv_sensitivity_to_market_quote: Option<Vec<f64>>,
}

/// Metadata describing a curve.
#[derive(Debug, Clone, PartialEq)]
pub struct CurveMetadata {
    /// Curve name, unique within a discounting context.
    pub name: CurveName,
    /// Meaning of the x values.
    pub x_value_type: ValueType,
    /// Meaning of the y values.
    pub y_value_type: ValueType,
    /// Day count used to turn dates into x values.
    pub day_count: Option<DayCountConvention>,
    /// One entry per parameter, possibly empty.
    pub parameter_metadata: Vec<ParameterMetadata>,
    /// Calibration output.
    pub info: CurveInfo,
}

impl CurveMetadata {
    /// Metadata for a zero rate curve on year fractions.
    #[must_use]
    pub fn zero_rates(name: CurveName, day_count: DayCountConvention) -> Self {
        Self {
            name,
            x_value_type: ValueType::YearFraction,
            y_value_type: ValueType::ZeroRate,
            day_count: Some(day_count),
            parameter_metadata: Vec::new(),
            info: CurveInfo::default(),
        }
    }

    /// Sets the y value type.
    #[must_use]
    pub fn with_y_value_type(mut self, value_type: ValueType) -> Self {
        self.y_value_type = value_type;
        self
    }

    /// Sets the parameter metadata.
    #[must_use]
    pub fn with_parameter_metadata(mut self, metadata: Vec<ParameterMetadata>) -> Self {
        self.parameter_metadata = metadata;
        self
    }

    /// Attaches a calibration Jacobian.
    #[must_use]
    pub fn with_jacobian(mut self, jacobian: JacobianCalibrationMatrix) -> Self {
        self.info.jacobian = Some(jacobian);
        self
    }

    /// Attaches node present value sensitivities to market quotes.
    #[must_use]
    pub fn with_pv_sensitivity_to_market_quote(mut self, values: Vec<f64>) -> Self {
        self.info.pv_sensitivity_to_market_quote = Some(values);
        self
    }

    /// The calibration Jacobian, if one is attached.
    #[must_use]
    pub fn jacobian(&self) -> Option<&JacobianCalibrationMatrix> {
        self.info.jacobian.as_ref()
    }

    /// Node present value sensitivities, if attached.
    #[must_use]
    pub fn pv_sensitivity_to_market_quote(&self) -> Option<&[f64]> {
        self.info.pv_sensitivity_to_market_quote.as_deref()
    }
}
