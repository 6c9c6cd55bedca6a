//! The legal-entity discounting context.
//!
//! Repo curves are keyed by [`RepoGroup`] and currency; issuer curves by
//! [`LegalEntityGroup`] and currency. Securities and legal entities are
//! mapped to groups, so a bond's repo curve is found by first looking up the
//! security's group and then, failing that, the issuer's group.

use std::collections::{BTreeMap, HashMap};
use std::sync::Arc;

use bondcurve_core::types::{
    Currency, CurveName, Date, LegalEntityGroup, LegalEntityId, RepoGroup, SecurityId,
};

use crate::discount_factors::{GroupDiscountFactors, ZeroRateDiscountFactors};
use crate::error::{CurveError, CurveResult};
use crate::sensitivity::{CurrencyParameterSensitivities, CurveGroupKey, PointSensitivities};
use crate::traits::Curve;

/// What a repo is discounted against.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub enum DiscountingEntity {
    /// The collateral security; resolved through the security group map.
    Security(SecurityId),
    /// The legal entity; resolved through the legal entity group map.
    LegalEntity(LegalEntityId),
}

/// Discount curves keyed by repo and issuer groups.
#[derive(Debug, Clone)]
pub struct LegalEntityDiscountingProvider {
    valuation_date: Date,
    repo_curve_security_groups: HashMap<SecurityId, RepoGroup>,
    repo_curve_groups: HashMap<LegalEntityId, RepoGroup>,
    repo_curves: HashMap<(RepoGroup, Currency), ZeroRateDiscountFactors>,
    issuer_curve_groups: HashMap<LegalEntityId, LegalEntityGroup>,
    issuer_curves: HashMap<(LegalEntityGroup, Currency), ZeroRateDiscountFactors>,
}

impl LegalEntityDiscountingProvider {
    /// Starts an empty builder.
    #[must_use]
    pub fn builder(valuation_date: Date) -> LegalEntityDiscountingProviderBuilder {
        LegalEntityDiscountingProviderBuilder::new(valuation_date)
    }

    /// An empty context.
    #[must_use]
    pub fn empty(valuation_date: Date) -> Self {
        Self {
            valuation_date,
            repo_curve_security_groups: HashMap::new(),
            repo_curve_groups: HashMap::new(),
            repo_curves: HashMap::new(),
            issuer_curve_groups: HashMap::new(),
            issuer_curves: HashMap::new(),
        }
    }

    /// A builder pre-populated with this context.
    #[must_use]
    pub fn to_builder(&self) -> LegalEntityDiscountingProviderBuilder {
        LegalEntityDiscountingProviderBuilder {
            provider: self.clone(),
        }
    }

    /// The valuation date.
    #[must_use]
    pub fn valuation_date(&self) -> Date {
        self.valuation_date
    }

    /// Security to repo group mapping.
    #[must_use]
    pub fn repo_curve_security_groups(&self) -> &HashMap<SecurityId, RepoGroup> {
        &self.repo_curve_security_groups
    }

    /// Legal entity to repo group mapping.
    #[must_use]
    pub fn repo_curve_groups(&self) -> &HashMap<LegalEntityId, RepoGroup> {
        &self.repo_curve_groups
    }

    /// Repo discount factors by group and currency.
    #[must_use]
    pub fn repo_curves(&self) -> &HashMap<(RepoGroup, Currency), ZeroRateDiscountFactors> {
        &self.repo_curves
    }

    /// Legal entity to issuer group mapping.
    #[must_use]
    pub fn issuer_curve_groups(&self) -> &HashMap<LegalEntityId, LegalEntityGroup> {
        &self.issuer_curve_groups
    }

    /// Issuer discount factors by group and currency.
    #[must_use]
    pub fn issuer_curves(&self) -> &HashMap<(LegalEntityGroup, Currency), ZeroRateDiscountFactors> {
        &self.issuer_curves
    }

    /// Repo discount factors for a legal entity.
    pub fn repo_curve_discount_factors(
        &self,
        legal_entity: &LegalEntityId,
        currency: Currency,
    ) -> CurveResult<GroupDiscountFactors> {
        let group = self
            .repo_curve_groups
            .get(legal_entity)
            .ok_or_else(|| missing_group("repo", legal_entity))?;
        self.repo_group_discount_factors(group, currency)
    }

    /// Repo discount factors for a security, falling back to its issuer.
    pub fn repo_curve_discount_factors_for_security(
        &self,
        security: &SecurityId,
        legal_entity: &LegalEntityId,
        currency: Currency,
    ) -> CurveResult<GroupDiscountFactors> {
        match self.repo_curve_security_groups.get(security) {
            Some(group) => self.repo_group_discount_factors(group, currency),
            None => self.repo_curve_discount_factors(legal_entity, currency),
        }
    }

    /// Repo discount factors for a discounting entity.
    ///
    /// A security is looked up only in the security group map.
    pub fn discount_factors(
        &self,
        entity: &DiscountingEntity,
        currency: Currency,
    ) -> CurveResult<GroupDiscountFactors> {
        match entity {
            DiscountingEntity::Security(security) => {
                let group = self
                    .repo_curve_security_groups
                    .get(security)
                    .ok_or_else(|| missing_group("repo", security))?;
                self.repo_group_discount_factors(group, currency)
            }
            DiscountingEntity::LegalEntity(legal_entity) => {
                self.repo_curve_discount_factors(legal_entity, currency)
            }
        }
    }

    /// Issuer discount factors for a legal entity.
    pub fn issuer_curve_discount_factors(
        &self,
        legal_entity: &LegalEntityId,
        currency: Currency,
    ) -> CurveResult<GroupDiscountFactors> {
        let group = self
            .issuer_curve_groups
            .get(legal_entity)
            .ok_or_else(|| missing_group("issuer", legal_entity))?;
        let key = CurveGroupKey::Issuer(group.clone());
        let dfs = self.discount_factors_for_key(&key, currency)?;
        Ok(GroupDiscountFactors::new(key, dfs.clone()))
    }

    fn repo_group_discount_factors(
        &self,
        group: &RepoGroup,
        currency: Currency,
    ) -> CurveResult<GroupDiscountFactors> {
        let key = CurveGroupKey::Repo(group.clone());
        let dfs = self.discount_factors_for_key(&key, currency)?;
        Ok(GroupDiscountFactors::new(key, dfs.clone()))
    }

    /// Discount factors for a group key and currency.
    pub fn discount_factors_for_key(
        &self,
        key: &CurveGroupKey,
        currency: Currency,
    ) -> CurveResult<&ZeroRateDiscountFactors> {
        let found = match key {
            CurveGroupKey::Repo(group) => self.repo_curves.get(&(group.clone(), currency)),
            CurveGroupKey::Issuer(group) => self.issuer_curves.get(&(group.clone(), currency)),
        };
        found.ok_or_else(|| {
            let (kind, group) = match key {
                CurveGroupKey::Repo(g) => ("repo", g.to_string()),
                CurveGroupKey::Issuer(g) => ("issuer", g.to_string()),
            };
            CurveError::MissingCurve {
                kind,
                group,
                currency,
            }
        })
    }

    /// Converts point sensitivities into curve parameter sensitivities.
    pub fn parameter_sensitivity(
        &self,
        sensitivities: &PointSensitivities,
    ) -> CurveResult<CurrencyParameterSensitivities> {
        let mut result = CurrencyParameterSensitivities::empty();
        for point in sensitivities.iter() {
            let dfs = self.discount_factors_for_key(&point.group, point.curve_currency)?;
            result = result.combined_with_entry(dfs.parameter_sensitivity(point));
        }
        Ok(result)
    }

    /// Finds a curve by name.
    #[must_use]
    pub fn find_curve(&self, name: &CurveName) -> Option<Arc<dyn Curve>> {
        self.repo_curves
            .values()
            .chain(self.issuer_curves.values())
            .map(ZeroRateDiscountFactors::curve)
            .find(|curve| curve.name() == name)
            .cloned()
    }

    /// Every curve in the context, by name.
    #[must_use]
    pub fn curves(&self) -> BTreeMap<CurveName, Arc<dyn Curve>> {
        self.repo_curves
            .values()
            .chain(self.issuer_curves.values())
            .map(|dfs| (dfs.curve().name().clone(), Arc::clone(dfs.curve())))
            .collect()
    }
}

fn missing_group(kind: &'static str, id: &impl ToString) -> CurveError {
    CurveError::MissingGroup {
        kind,
        id: id.to_string(),
    }
}

/// Builder for [`LegalEntityDiscountingProvider`].
#[derive(Debug, Clone)]
pub struct LegalEntityDiscountingProviderBuilder {
    provider: LegalEntityDiscountingProvider,
}

impl LegalEntityDiscountingProviderBuilder {
    /// Creates an empty builder.
    #[must_use]
    pub fn new(valuation_date: Date) -> Self {
        Self {
            provider: LegalEntityDiscountingProvider::empty(valuation_date),
        }
    }

    /// Maps a security to a repo group.
    #[must_use]
    pub fn repo_curve_security_group(mut self, security: SecurityId, group: RepoGroup) -> Self {
        self.provider.repo_curve_security_groups.insert(security, group);
        self
    }

    /// Maps a legal entity to a repo group.
    #[must_use]
    pub fn repo_curve_group(mut self, legal_entity: LegalEntityId, group: RepoGroup) -> Self {
        self.provider.repo_curve_groups.insert(legal_entity, group);
        self
    }

    /// Adds or replaces a repo curve.
    #[must_use]
    pub fn repo_curve(mut self, group: RepoGroup, currency: Currency, dfs: ZeroRateDiscountFactors) -> Self {
        self.provider.repo_curves.insert((group, currency), dfs);
        self
    }

    /// Maps a legal entity to an issuer group.
    #[must_use]
    pub fn issuer_curve_group(mut self, legal_entity: LegalEntityId, group: LegalEntityGroup) -> Self {
        self.provider.issuer_curve_groups.insert(legal_entity, group);
        self
    }

    /// Adds or replaces an issuer curve.
    #[must_use]
    pub fn issuer_curve(
        mut self,
        group: LegalEntityGroup,
        currency: Currency,
        dfs: ZeroRateDiscountFactors,
    ) -> Self {
        self.provider.issuer_curves.insert((group, currency), dfs);
        self
    }

    /// Removes every repo and issuer curve with the given name.
    ///
    /// Group mappings are kept.
    #[must_use]
    pub fn without_curve(mut self, name: &CurveName) -> Self {
        self.provider.repo_curves.retain(|_, dfs| dfs.curve().name() != name);
        self.provider.issuer_curves.retain(|_, dfs| dfs.curve().name() != name);
        self
    }

    /// Builds the context.
    ///
    /// # Errors
    ///
    /// Returns `CurveError::ValuationDateMismatch` if any discount factors
    /// use a different valuation date.
    pub fn build(self) -> CurveResult<LegalEntityDiscountingProvider> {
        let expected = self.provider.valuation_date;
        let mismatch = self
            .provider
            .repo_curves
            .values()
            .chain(self.provider.issuer_curves.values())
            .map(ZeroRateDiscountFactors::valuation_date)
            .find(|d| *d != expected);
        if let Some(got) = mismatch {
            return Err(CurveError::ValuationDateMismatch { expected, got });
        }
        Ok(self.provider)
    }
}
