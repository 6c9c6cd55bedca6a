//! Calibrator configuration.

use std::path::Path;

use serde::{Deserialize, Serialize};

use bondcurve_math::solvers::{
    NewtonVectorRootFinder, SolverConfig, DEFAULT_ABSOLUTE_TOLERANCE, DEFAULT_MAX_ITERATIONS,
    DEFAULT_RELATIVE_TOLERANCE,
};

use crate::calibrator::LegalEntityDiscountingCurveCalibrator;
use crate::error::{CalibrationError, CalibrationResult};
use crate::measures::CalibrationMeasures;

/// Calibrator configuration.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CalibratorConfig {
    /// Residual max-norm at which the solve stops
    #[serde(default = "default_absolute_tolerance")]
    pub absolute_tolerance: f64,

    /// Step size, relative to the parameters, at which the solve stops
    #[serde(default = "default_relative_tolerance")]
    pub relative_tolerance: f64,

    /// Iteration limit
    #[serde(default = "default_max_iterations")]
    pub max_iterations: u32,

    /// Registry used for the residuals
    #[serde(default = "default_measures")]
    pub measures: String,

    /// Registry used for the PV sensitivity to market quotes
    #[serde(default = "default_pv_measures")]
    pub pv_measures: String,
}

fn default_absolute_tolerance() -> f64 {
    DEFAULT_ABSOLUTE_TOLERANCE
}

fn default_relative_tolerance() -> f64 {
    DEFAULT_RELATIVE_TOLERANCE
}

fn default_max_iterations() -> u32 {
    DEFAULT_MAX_ITERATIONS
}

fn default_measures() -> String {
    CalibrationMeasures::PAR_SPREAD.to_string()
}

fn default_pv_measures() -> String {
    CalibrationMeasures::PRESENT_VALUE.to_string()
}

impl Default for CalibratorConfig {
    fn default() -> Self {
        Self {
            absolute_tolerance: default_absolute_tolerance(),
            relative_tolerance: default_relative_tolerance(),
            max_iterations: default_max_iterations(),
            measures: default_measures(),
            pv_measures: default_pv_measures(),
        }
    }
}

impl CalibratorConfig {
    /// Parses configuration from TOML.
    pub fn from_toml_str(content: &str) -> CalibrationResult<Self> {
        toml::from_str(content).map_err(|e| CalibrationError::config(e.to_string()))
    }

    /// Loads configuration from a TOML file.
    pub fn from_file(path: impl AsRef<Path>) -> CalibrationResult<Self> {
        let path = path.as_ref();
        let content = std::fs::read_to_string(path)
            .map_err(|e| CalibrationError::config(format!("{}: {e}", path.display())))?;
        Self::from_toml_str(&content)
    }

    /// Root finder configuration.
    #[must_use]
    pub fn solver_config(&self) -> SolverConfig {
        SolverConfig::new(self.absolute_tolerance, self.relative_tolerance, self.max_iterations)
    }

    /// Builds the calibrator.
    ///
    /// Fails when either registry name is unknown, a tolerance is not
    /// positive, or the residual registry measures against market quotes.
    pub fn build(&self) -> CalibrationResult<LegalEntityDiscountingCurveCalibrator> {
        if !(self.absolute_tolerance > 0.0 && self.relative_tolerance > 0.0) {
            return Err(CalibrationError::config("tolerances must be positive"));
        }
        let measures = CalibrationMeasures::by_name(&self.measures)?;
        if !measures.supports_calibration() {
            return Err(CalibrationError::config(format!(
                "calibration measures '{}' depend on market quote sensitivities and cannot drive a solve",
                self.measures
            )));
        }
        Ok(LegalEntityDiscountingCurveCalibrator::of(
            NewtonVectorRootFinder::new(self.solver_config()),
            measures,
            CalibrationMeasures::by_name(&self.pv_measures)?,
        ))
    }
}
