//! Curve group entries.
//!
//! An entry says which (group, currency) buckets of a discounting context a
//! calibrated curve fills. One curve may fill several buckets.

use bondcurve_core::types::{Currency, CurveName, LegalEntityGroup, RepoGroup};
use serde::{Deserialize, Serialize};
use std::collections::BTreeSet;

/// Places a curve under repo groups.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct RepoCurveEntry {
    /// The curve name.
    pub curve_name: CurveName,
    /// Repo group and currency pairs discounted with the curve.
    pub repo_curve_groups: BTreeSet<(RepoGroup, Currency)>,
}

impl RepoCurveEntry {
    /// Creates an entry.
    #[must_use]
    pub fn of(
        curve_name: CurveName,
        repo_curve_groups: impl IntoIterator<Item = (RepoGroup, Currency)>,
    ) -> Self {
        Self {
            curve_name,
            repo_curve_groups: repo_curve_groups.into_iter().collect(),
        }
    }
}

/// Places a curve under issuer groups.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct IssuerCurveEntry {
    /// The curve name.
    pub curve_name: CurveName,
    /// Issuer group and currency pairs discounted with the curve.
    pub issuer_curve_groups: BTreeSet<(LegalEntityGroup, Currency)>,
}

impl IssuerCurveEntry {
    /// Creates an entry.
    #[must_use]
    pub fn of(
        curve_name: CurveName,
        issuer_curve_groups: impl IntoIterator<Item = (LegalEntityGroup, Currency)>,
    ) -> Self {
        Self {
            curve_name,
            issuer_curve_groups: issuer_curve_groups.into_iter().collect(),
        }
    }
}
