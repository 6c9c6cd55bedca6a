//! Curve definitions.
//!
//! A definition is the declarative form of a calibrated curve: a name, a day
//! count and an ordered list of nodes. It turns into a concrete curve once a
//! parameter vector is known.

use std::collections::BTreeSet;
use std::sync::Arc;

use bondcurve_core::daycounts::DayCountConvention;
use bondcurve_core::types::{CurveName, Date};
use bondcurve_curves::jacobian::CurveParameterSize;
use bondcurve_curves::metadata::{CurveMetadata, ValueType};
use bondcurve_curves::nodal::InterpolatedNodalCurve;
use bondcurve_curves::traits::Curve;
use bondcurve_repo::reference_data::ReferenceData;
use serde::{Deserialize, Serialize};

use crate::error::{CalibrationError, CalibrationResult};
use crate::market_data::MarketData;
use crate::node::RepoCurveNode;

/// A zero rate curve on year fraction nodes, linearly interpolated with flat
/// extrapolation on both sides.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct InterpolatedNodalCurveDefinition {
    name: CurveName,
    day_count: DayCountConvention,
    #[serde(default = "default_y_value_type")]
    y_value_type: ValueType,
    nodes: Vec<RepoCurveNode>,
}

fn default_y_value_type() -> ValueType {
    ValueType::ZeroRate
}

impl InterpolatedNodalCurveDefinition {
    /// Creates a zero rate curve definition.
    #[must_use]
    pub fn new(name: CurveName, day_count: DayCountConvention, nodes: Vec<RepoCurveNode>) -> Self {
        Self {
            name,
            day_count,
            y_value_type: default_y_value_type(),
            nodes,
        }
    }

    /// Sets the y value type.
    ///
    /// Only zero rate curves can be calibrated; a group holding any other
    /// type fails to build.
    #[must_use]
    pub fn with_y_value_type(mut self, value_type: ValueType) -> Self {
        self.y_value_type = value_type;
        self
    }

    /// The curve name.
    #[must_use]
    pub fn name(&self) -> &CurveName {
        &self.name
    }

    /// Day count turning node dates into year fractions.
    #[must_use]
    pub fn day_count(&self) -> DayCountConvention {
        self.day_count
    }

    /// The y value type.
    #[must_use]
    pub fn y_value_type(&self) -> ValueType {
        self.y_value_type
    }

    /// The nodes in parameter order.
    #[must_use]
    pub fn nodes(&self) -> &[RepoCurveNode] {
        &self.nodes
    }

    /// Number of curve parameters, one per node.
    #[must_use]
    pub fn parameter_count(&self) -> usize {
        self.nodes.len()
    }

    /// Name and parameter count.
    #[must_use]
    pub fn to_curve_parameter_size(&self) -> CurveParameterSize {
        CurveParameterSize::new(self.name.clone(), self.parameter_count())
    }

    /// Starting parameters, one per node.
    pub fn initial_guess(&self, market_data: &MarketData) -> CalibrationResult<Vec<f64>> {
        self.nodes
            .iter()
            .map(|node| node.initial_guess(market_data, self.y_value_type))
            .collect()
    }

    /// Metadata of the curve built from this definition.
    pub fn metadata(
        &self,
        valuation_date: Date,
        ref_data: &ReferenceData,
    ) -> CalibrationResult<CurveMetadata> {
        let parameter_metadata = self
            .nodes
            .iter()
            .map(|node| node.metadata(valuation_date, ref_data))
            .collect::<CalibrationResult<Vec<_>>>()?;
        Ok(CurveMetadata::zero_rates(self.name.clone(), self.day_count)
            .with_y_value_type(self.y_value_type)
            .with_parameter_metadata(parameter_metadata))
    }

    /// Builds the curve for a parameter vector.
    ///
    /// Node x values are the year fractions from the valuation date to the
    /// node dates recorded in `metadata`.
    pub fn curve(
        &self,
        valuation_date: Date,
        metadata: CurveMetadata,
        parameters: &[f64],
    ) -> CalibrationResult<Arc<dyn Curve>> {
        if parameters.len() != self.parameter_count() {
            return Err(CalibrationError::ParameterCountMismatch {
                expected: self.parameter_count(),
                actual: parameters.len(),
            });
        }
        let x_values = metadata
            .parameter_metadata
            .iter()
            .map(|param| {
                param
                    .date
                    .map(|date| self.day_count.year_fraction(valuation_date, date))
                    .ok_or_else(|| {
                        CalibrationError::invalid_definition(format!(
                            "node '{}' of curve '{}' has no date",
                            param.label, self.name
                        ))
                    })
            })
            .collect::<CalibrationResult<Vec<_>>>()?;
        let curve = InterpolatedNodalCurve::new(metadata, x_values, parameters.to_vec())?;
        Ok(Arc::new(curve))
    }

    /// Drops nodes that cannot be calibrated at `valuation_date`.
    ///
    /// A node is dropped if its date is on or before the valuation date, or
    /// if an earlier kept node has the same date.
    pub fn filtered(&self, valuation_date: Date, ref_data: &ReferenceData) -> CalibrationResult<Self> {
        let mut seen = BTreeSet::new();
        let mut nodes = Vec::with_capacity(self.nodes.len());
        for node in &self.nodes {
            let date = node.date(valuation_date, ref_data)?;
            if date > valuation_date && seen.insert(date) {
                nodes.push(node.clone());
            }
        }
        Ok(Self {
            nodes,
            ..self.clone()
        })
    }
}
