//! Builds discounting contexts from calibration parameter vectors.
//!
//! The generator holds everything about a curve group that does not depend on
//! the parameters: the known context from earlier groups, the curve
//! definitions and their metadata, and the routing tables. Each call to
//! [`ProviderGenerator::generate`] slices the parameter vector by curve,
//! builds the curves and layers them over a copy of the known context.

use std::collections::{BTreeSet, HashMap};

use bondcurve_core::types::{
    Currency, CurveName, LegalEntityGroup, LegalEntityId, RepoGroup, SecurityId,
};
use bondcurve_curves::discount_factors::ZeroRateDiscountFactors;
use bondcurve_curves::jacobian::{CurveParameterSize, JacobianCalibrationMatrix};
use bondcurve_curves::metadata::CurveMetadata;
use bondcurve_curves::provider::LegalEntityDiscountingProvider;
use bondcurve_repo::reference_data::ReferenceData;

use crate::definition::InterpolatedNodalCurveDefinition;
use crate::error::{CalibrationError, CalibrationResult};
use crate::group::LegalEntityDiscountingCurveGroupDefinition;

/// Creates a discounting context from a parameter vector.
pub trait ProviderGenerator: Send + Sync {
    /// Builds the context, attaching calibration output to the curves.
    ///
    /// # Arguments
    ///
    /// * `parameters` - All curve parameters, laid out in curve order
    /// * `jacobians` - Jacobian to attach, by curve name
    /// * `pv_sensitivities` - Node PV sensitivities to attach, by curve name
    fn generate(
        &self,
        parameters: &[f64],
        jacobians: &HashMap<CurveName, JacobianCalibrationMatrix>,
        pv_sensitivities: &HashMap<CurveName, Vec<f64>>,
    ) -> CalibrationResult<LegalEntityDiscountingProvider>;

    /// Builds the context without calibration output.
    fn generate_plain(&self, parameters: &[f64]) -> CalibrationResult<LegalEntityDiscountingProvider> {
        self.generate(parameters, &HashMap::new(), &HashMap::new())
    }
}

/// Generator for one legal entity curve group.
#[derive(Debug, Clone)]
pub struct LegalEntityDiscountingProviderGenerator {
    known: LegalEntityDiscountingProvider,
    curve_definitions: Vec<InterpolatedNodalCurveDefinition>,
    curve_metadata: Vec<CurveMetadata>,
    repo_curve_security_groups: HashMap<SecurityId, RepoGroup>,
    repo_curve_groups: HashMap<LegalEntityId, RepoGroup>,
    issuer_curve_groups: HashMap<LegalEntityId, LegalEntityGroup>,
    repo_curve_buckets: HashMap<CurveName, BTreeSet<(RepoGroup, Currency)>>,
    issuer_curve_buckets: HashMap<CurveName, BTreeSet<(LegalEntityGroup, Currency)>>,
}

impl LegalEntityDiscountingProviderGenerator {
    /// Creates a generator for `group` on top of `known`.
    ///
    /// Curve metadata is computed once, at the valuation date of `known`.
    pub fn of(
        known: LegalEntityDiscountingProvider,
        group: &LegalEntityDiscountingCurveGroupDefinition,
        ref_data: &ReferenceData,
    ) -> CalibrationResult<Self> {
        let curve_metadata = group.metadata(known.valuation_date(), ref_data)?;
        let repo_curve_buckets = group
            .repo_curve_entries()
            .iter()
            .map(|entry| (entry.curve_name.clone(), entry.repo_curve_groups.clone()))
            .collect();
        let issuer_curve_buckets = group
            .issuer_curve_entries()
            .iter()
            .map(|entry| (entry.curve_name.clone(), entry.issuer_curve_groups.clone()))
            .collect();
        Ok(Self {
            known,
            curve_definitions: group.curve_definitions().to_vec(),
            curve_metadata,
            repo_curve_security_groups: group.repo_curve_security_groups().clone(),
            repo_curve_groups: group.repo_curve_groups().clone(),
            issuer_curve_groups: group.issuer_curve_groups().clone(),
            repo_curve_buckets,
            issuer_curve_buckets,
        })
    }

    /// The context the generated curves are layered over.
    #[must_use]
    pub fn known(&self) -> &LegalEntityDiscountingProvider {
        &self.known
    }

    /// Name and size of each generated curve, in parameter order.
    #[must_use]
    pub fn curve_order(&self) -> Vec<CurveParameterSize> {
        self.curve_definitions
            .iter()
            .map(InterpolatedNodalCurveDefinition::to_curve_parameter_size)
            .collect()
    }

    /// Total number of parameters.
    #[must_use]
    pub fn total_parameter_count(&self) -> usize {
        self.curve_definitions
            .iter()
            .map(InterpolatedNodalCurveDefinition::parameter_count)
            .sum()
    }
}

impl ProviderGenerator for LegalEntityDiscountingProviderGenerator {
    fn generate(
        &self,
        parameters: &[f64],
        jacobians: &HashMap<CurveName, JacobianCalibrationMatrix>,
        pv_sensitivities: &HashMap<CurveName, Vec<f64>>,
    ) -> CalibrationResult<LegalEntityDiscountingProvider> {
        let expected = self.total_parameter_count();
        if parameters.len() != expected {
            return Err(CalibrationError::ParameterCountMismatch {
                expected,
                actual: parameters.len(),
            });
        }

        let valuation_date = self.known.valuation_date();
        let mut builder = self
            .curve_definitions
            .iter()
            .fold(self.known.to_builder(), |builder, definition| {
                builder.without_curve(definition.name())
            });
        let mut offset = 0;
        for (definition, metadata) in self.curve_definitions.iter().zip(&self.curve_metadata) {
            let name = definition.name();
            let count = definition.parameter_count();
            let slice = &parameters[offset..offset + count];
            offset += count;

            let mut metadata = metadata.clone();
            if let Some(jacobian) = jacobians.get(name) {
                metadata = metadata.with_jacobian(jacobian.clone());
            }
            if let Some(sensitivity) = pv_sensitivities.get(name) {
                metadata = metadata.with_pv_sensitivity_to_market_quote(sensitivity.clone());
            }
            let curve = definition.curve(valuation_date, metadata, slice)?;

            for (group, currency) in self.repo_curve_buckets.get(name).into_iter().flatten() {
                let dfs = ZeroRateDiscountFactors::new(*currency, valuation_date, curve.clone())?;
                builder = builder.repo_curve(group.clone(), *currency, dfs);
            }
            for (group, currency) in self.issuer_curve_buckets.get(name).into_iter().flatten() {
                let dfs = ZeroRateDiscountFactors::new(*currency, valuation_date, curve.clone())?;
                builder = builder.issuer_curve(group.clone(), *currency, dfs);
            }
        }

        for (security, group) in &self.repo_curve_security_groups {
            builder = builder.repo_curve_security_group(security.clone(), group.clone());
        }
        for (legal_entity, group) in &self.repo_curve_groups {
            builder = builder.repo_curve_group(legal_entity.clone(), group.clone());
        }
        for (legal_entity, group) in &self.issuer_curve_groups {
            builder = builder.issuer_curve_group(legal_entity.clone(), group.clone());
        }

        let provider = builder.build()?;
        tracing::debug!(
            curves = self.curve_definitions.len(),
            jacobians = jacobians.len(),
            "generated discounting context"
        );
        Ok(provider)
    }
}
