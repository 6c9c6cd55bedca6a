//! Curve group definitions.
//!
//! A curve group bundles the curves calibrated together with the tables that
//! route securities and legal entities to them:
//!
//! - security → repo group, consulted first for repo discounting
//! - legal entity → repo group
//! - legal entity → issuer group
//! - curve entries placing each calibrated curve under (group, currency)
//!   buckets
//!
//! The order of the curve definitions fixes the layout of the calibration
//! parameter vector: curve 0's nodes first, then curve 1's, and so on.

use std::collections::{HashMap, HashSet};

use bondcurve_core::types::{
    CurveGroupName, CurveName, Date, LegalEntityGroup, LegalEntityId, RepoGroup, SecurityId,
};
use bondcurve_curves::jacobian::CurveParameterSize;
use bondcurve_curves::metadata::{CurveMetadata, ValueType};
use bondcurve_repo::reference_data::ReferenceData;

use crate::definition::InterpolatedNodalCurveDefinition;
use crate::entries::{IssuerCurveEntry, RepoCurveEntry};
use crate::error::{CalibrationError, CalibrationResult};
use crate::market_data::MarketData;
use crate::measures::CalibrationTrade;

/// Curves calibrated together and the tables routing entities to them.
#[derive(Debug, Clone, PartialEq)]
pub struct LegalEntityDiscountingCurveGroupDefinition {
    name: CurveGroupName,
    repo_curve_security_groups: HashMap<SecurityId, RepoGroup>,
    repo_curve_groups: HashMap<LegalEntityId, RepoGroup>,
    issuer_curve_groups: HashMap<LegalEntityId, LegalEntityGroup>,
    repo_curve_entries: Vec<RepoCurveEntry>,
    issuer_curve_entries: Vec<IssuerCurveEntry>,
    curve_definitions: Vec<InterpolatedNodalCurveDefinition>,
    compute_jacobian: bool,
    compute_pv_sensitivity_to_market_quote: bool,
}

impl LegalEntityDiscountingCurveGroupDefinition {
    /// Starts building a group definition.
    #[must_use]
    pub fn builder(name: CurveGroupName) -> LegalEntityDiscountingCurveGroupDefinitionBuilder {
        LegalEntityDiscountingCurveGroupDefinitionBuilder::new(name)
    }

    /// The group name.
    #[must_use]
    pub fn name(&self) -> &CurveGroupName {
        &self.name
    }

    /// Security to repo group table.
    #[must_use]
    pub fn repo_curve_security_groups(&self) -> &HashMap<SecurityId, RepoGroup> {
        &self.repo_curve_security_groups
    }

    /// Legal entity to repo group table.
    #[must_use]
    pub fn repo_curve_groups(&self) -> &HashMap<LegalEntityId, RepoGroup> {
        &self.repo_curve_groups
    }

    /// Legal entity to issuer group table.
    #[must_use]
    pub fn issuer_curve_groups(&self) -> &HashMap<LegalEntityId, LegalEntityGroup> {
        &self.issuer_curve_groups
    }

    /// Repo curve entries.
    #[must_use]
    pub fn repo_curve_entries(&self) -> &[RepoCurveEntry] {
        &self.repo_curve_entries
    }

    /// Issuer curve entries.
    #[must_use]
    pub fn issuer_curve_entries(&self) -> &[IssuerCurveEntry] {
        &self.issuer_curve_entries
    }

    /// Curve definitions in parameter order.
    #[must_use]
    pub fn curve_definitions(&self) -> &[InterpolatedNodalCurveDefinition] {
        &self.curve_definitions
    }

    /// Whether calibration attaches Jacobians to the curves.
    #[must_use]
    pub fn compute_jacobian(&self) -> bool {
        self.compute_jacobian
    }

    /// Whether calibration attaches node PV sensitivities to market quotes.
    #[must_use]
    pub fn compute_pv_sensitivity_to_market_quote(&self) -> bool {
        self.compute_pv_sensitivity_to_market_quote
    }

    /// Finds a curve definition by name.
    #[must_use]
    pub fn find_curve_definition(&self, name: &CurveName) -> Option<&InterpolatedNodalCurveDefinition> {
        self.curve_definitions.iter().find(|def| def.name() == name)
    }

    /// Finds a repo curve entry by curve name.
    #[must_use]
    pub fn find_repo_curve_entry(&self, name: &CurveName) -> Option<&RepoCurveEntry> {
        self.repo_curve_entries
            .iter()
            .find(|entry| &entry.curve_name == name)
    }

    /// Finds an issuer curve entry by curve name.
    #[must_use]
    pub fn find_issuer_curve_entry(&self, name: &CurveName) -> Option<&IssuerCurveEntry> {
        self.issuer_curve_entries
            .iter()
            .find(|entry| &entry.curve_name == name)
    }

    /// Metadata of every curve, in definition order.
    pub fn metadata(
        &self,
        valuation_date: Date,
        ref_data: &ReferenceData,
    ) -> CalibrationResult<Vec<CurveMetadata>> {
        self.curve_definitions
            .iter()
            .map(|def| def.metadata(valuation_date, ref_data))
            .collect()
    }

    /// Total number of parameters across all curves.
    #[must_use]
    pub fn total_parameter_count(&self) -> usize {
        self.curve_definitions
            .iter()
            .map(InterpolatedNodalCurveDefinition::parameter_count)
            .sum()
    }

    /// Name and size of each curve, in parameter order.
    #[must_use]
    pub fn curve_order(&self) -> Vec<CurveParameterSize> {
        self.curve_definitions
            .iter()
            .map(InterpolatedNodalCurveDefinition::to_curve_parameter_size)
            .collect()
    }

    /// The node trades of every curve, each with quantity one, in parameter
    /// order.
    pub fn resolved_trades(
        &self,
        market_data: &MarketData,
        ref_data: &ReferenceData,
    ) -> CalibrationResult<Vec<CalibrationTrade>> {
        self.curve_definitions
            .iter()
            .flat_map(InterpolatedNodalCurveDefinition::nodes)
            .map(|node| {
                node.resolved_trade(1.0, market_data, ref_data)
                    .map(CalibrationTrade::Repo)
            })
            .collect()
    }

    /// The initial guesses of every curve, in parameter order.
    pub fn initial_guesses(&self, market_data: &MarketData) -> CalibrationResult<Vec<f64>> {
        let mut guesses = Vec::with_capacity(self.total_parameter_count());
        for def in &self.curve_definitions {
            guesses.extend(def.initial_guess(market_data)?);
        }
        Ok(guesses)
    }

    /// A copy with each curve definition filtered for `valuation_date`.
    pub fn filtered(&self, valuation_date: Date, ref_data: &ReferenceData) -> CalibrationResult<Self> {
        let curve_definitions = self
            .curve_definitions
            .iter()
            .map(|def| def.filtered(valuation_date, ref_data))
            .collect::<CalibrationResult<Vec<_>>>()?;
        Ok(Self {
            curve_definitions,
            ..self.clone()
        })
    }
}

/// Builder for [`LegalEntityDiscountingCurveGroupDefinition`].
#[derive(Debug, Clone)]
pub struct LegalEntityDiscountingCurveGroupDefinitionBuilder {
    definition: LegalEntityDiscountingCurveGroupDefinition,
}

impl LegalEntityDiscountingCurveGroupDefinitionBuilder {
    /// Creates a builder. Jacobians are computed and PV sensitivities are not,
    /// unless changed.
    #[must_use]
    pub fn new(name: CurveGroupName) -> Self {
        Self {
            definition: LegalEntityDiscountingCurveGroupDefinition {
                name,
                repo_curve_security_groups: HashMap::new(),
                repo_curve_groups: HashMap::new(),
                issuer_curve_groups: HashMap::new(),
                repo_curve_entries: Vec::new(),
                issuer_curve_entries: Vec::new(),
                curve_definitions: Vec::new(),
                compute_jacobian: true,
                compute_pv_sensitivity_to_market_quote: false,
            },
        }
    }

    /// Routes a security to a repo group.
    #[must_use]
    pub fn repo_curve_security_group(mut self, security: SecurityId, group: RepoGroup) -> Self {
        self.definition
            .repo_curve_security_groups
            .insert(security, group);
        self
    }

    /// Routes a legal entity to a repo group.
    #[must_use]
    pub fn repo_curve_group(mut self, legal_entity: LegalEntityId, group: RepoGroup) -> Self {
        self.definition.repo_curve_groups.insert(legal_entity, group);
        self
    }

    /// Routes a legal entity to an issuer group.
    #[must_use]
    pub fn issuer_curve_group(mut self, legal_entity: LegalEntityId, group: LegalEntityGroup) -> Self {
        self.definition
            .issuer_curve_groups
            .insert(legal_entity, group);
        self
    }

    /// Adds a repo curve entry.
    #[must_use]
    pub fn repo_curve_entry(mut self, entry: RepoCurveEntry) -> Self {
        self.definition.repo_curve_entries.push(entry);
        self
    }

    /// Adds an issuer curve entry.
    #[must_use]
    pub fn issuer_curve_entry(mut self, entry: IssuerCurveEntry) -> Self {
        self.definition.issuer_curve_entries.push(entry);
        self
    }

    /// Appends a curve definition; definitions keep insertion order.
    #[must_use]
    pub fn curve_definition(mut self, definition: InterpolatedNodalCurveDefinition) -> Self {
        self.definition.curve_definitions.push(definition);
        self
    }

    /// Sets whether Jacobians are computed.
    #[must_use]
    pub fn compute_jacobian(mut self, compute: bool) -> Self {
        self.definition.compute_jacobian = compute;
        self
    }

    /// Sets whether node PV sensitivities to market quotes are computed.
    #[must_use]
    pub fn compute_pv_sensitivity_to_market_quote(mut self, compute: bool) -> Self {
        self.definition.compute_pv_sensitivity_to_market_quote = compute;
        self
    }

    /// Builds the definition.
    ///
    /// # Errors
    ///
    /// Fails if two curve definitions or two entries of the same kind share a
    /// name, or if an entry names a curve with no definition.
    pub fn build(self) -> CalibrationResult<LegalEntityDiscountingCurveGroupDefinition> {
        let definition = self.definition;

        let mut names = HashSet::new();
        for def in &definition.curve_definitions {
            if def.y_value_type() != ValueType::ZeroRate {
                return Err(CalibrationError::invalid_definition(format!(
                    "curve '{}' has y value type {}, only {} curves can be calibrated",
                    def.name(),
                    def.y_value_type(),
                    ValueType::ZeroRate
                )));
            }
            if !names.insert(def.name()) {
                return Err(CalibrationError::invalid_definition(format!(
                    "curve '{}' is defined more than once in group '{}'",
                    def.name(),
                    definition.name
                )));
            }
        }

        let repo_names = definition.repo_curve_entries.iter().map(|e| &e.curve_name);
        let issuer_names = definition.issuer_curve_entries.iter().map(|e| &e.curve_name);
        check_entries("repo", repo_names, &names)?;
        check_entries("issuer", issuer_names, &names)?;

        Ok(definition)
    }
}

fn check_entries<'a>(
    kind: &str,
    entry_names: impl Iterator<Item = &'a CurveName>,
    defined: &HashSet<&CurveName>,
) -> CalibrationResult<()> {
    let mut seen = HashSet::new();
    for name in entry_names {
        if !seen.insert(name) {
            return Err(CalibrationError::invalid_definition(format!(
                "{kind} curve entry '{name}' appears more than once"
            )));
        }
        if !defined.contains(name) {
            return Err(CalibrationError::CurveNotFound { name: name.clone() });
        }
    }
    Ok(())
}
