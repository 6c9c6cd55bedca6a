//! Reference data for resolving collateral.

use std::collections::HashMap;

use bondcurve_core::types::{LegalEntityId, SecurityId};
use serde::{Deserialize, Serialize};

use crate::error::{RepoError, RepoResult};

/// A security whose only relevant attribute is its issuer.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct SimpleLegalEntitySecurity {
    /// The issuer.
    pub legal_entity_id: LegalEntityId,
}

impl SimpleLegalEntitySecurity {
    /// Creates the security.
    #[must_use]
    pub fn new(legal_entity_id: LegalEntityId) -> Self {
        Self { legal_entity_id }
    }
}

/// Security reference data keyed by security id.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct ReferenceData {
    securities: HashMap<SecurityId, SimpleLegalEntitySecurity>,
}

impl ReferenceData {
    /// Reference data with no securities.
    #[must_use]
    pub fn empty() -> Self {
        Self::default()
    }

    /// Adds or replaces a security.
    #[must_use]
    pub fn with_security(mut self, id: SecurityId, security: SimpleLegalEntitySecurity) -> Self {
        self.securities.insert(id, security);
        self
    }

    /// Looks up a security.
    pub fn security(&self, id: &SecurityId) -> RepoResult<&SimpleLegalEntitySecurity> {
        self.securities
            .get(id)
            .ok_or_else(|| RepoError::SecurityNotFound {
                security_id: id.clone(),
            })
    }

    /// Number of securities.
    #[must_use]
    pub fn len(&self) -> usize {
        self.securities.len()
    }

    /// True when no security is present.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.securities.is_empty()
    }
}

impl FromIterator<(SecurityId, SimpleLegalEntitySecurity)> for ReferenceData {
    fn from_iter<I: IntoIterator<Item = (SecurityId, SimpleLegalEntitySecurity)>>(iter: I) -> Self {
        Self {
            securities: iter.into_iter().collect(),
        }
    }
}
