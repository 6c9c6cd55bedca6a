//! Repo trades.

use bondcurve_core::types::{Date, StandardId};
use serde::{Deserialize, Serialize};

use crate::error::RepoResult;
use crate::product::{Repo, ResolvedRepo};
use crate::reference_data::ReferenceData;

/// Trade-level attributes.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct TradeInfo {
    /// Trade identifier.
    pub id: Option<StandardId>,
    /// Trade date.
    pub trade_date: Option<Date>,
}

impl TradeInfo {
    /// Info with only a trade date.
    #[must_use]
    pub fn of(trade_date: Date) -> Self {
        Self {
            id: None,
            trade_date: Some(trade_date),
        }
    }

    /// Sets the identifier.
    #[must_use]
    pub fn with_id(mut self, id: StandardId) -> Self {
        self.id = Some(id);
        self
    }
}

/// A trade in a repo.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RepoTrade {
    /// Trade attributes.
    pub info: TradeInfo,
    /// The product.
    pub product: Repo,
}

impl RepoTrade {
    /// Creates a trade.
    #[must_use]
    pub fn new(info: TradeInfo, product: Repo) -> Self {
        Self { info, product }
    }

    /// Resolves the product against reference data.
    pub fn resolve(&self, ref_data: &ReferenceData) -> RepoResult<ResolvedRepoTrade> {
        Ok(ResolvedRepoTrade {
            info: self.info.clone(),
            product: self.product.resolve(ref_data)?,
        })
    }
}

/// A repo trade ready for pricing.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ResolvedRepoTrade {
    /// Trade attributes.
    pub info: TradeInfo,
    /// The resolved product.
    pub product: ResolvedRepo,
}
