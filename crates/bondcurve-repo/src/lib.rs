//! # BondCurve Repo
//!
//! Repurchase agreements collateralised by government securities.
//!
//! This crate provides:
//!
//! - **Products**: [`Repo`] and its resolved form [`ResolvedRepo`], with the
//!   collateral issuer looked up in [`ReferenceData`]
//! - **Trades**: [`RepoTrade`] and [`ResolvedRepoTrade`]
//! - **Conventions**: [`RepoConvention`] (spot lag, accrual day count and
//!   date adjustment) and [`RepoTemplate`] (a convention plus a tenor)
//! - **Pricing**: [`DiscountingRepoProductPricer`] and
//!   [`DiscountingRepoTradePricer`], discounting both legs on the repo curve
//!   of the collateral issuer
//!
//! ## Example
//!
//! ```rust
//! use bondcurve_core::prelude::*;
//! use bondcurve_repo::prelude::*;
//!
//! let gblo = HolidayCalendar::weekends("GBLO");
//! let convention = RepoConvention::gbp_repo(gblo);
//! let gilt = SecurityId::of("OG", "UK_GOVT_10Y").unwrap();
//! let uk_govt = LegalEntityId::of("OG", "UK_GOVT").unwrap();
//! let ref_data = ReferenceData::empty()
//!     .with_security(gilt.clone(), SimpleLegalEntitySecurity::new(uk_govt.clone()));
//!
//! let trade_date = Date::from_ymd(2017, 12, 11).unwrap();
//! let trade = convention
//!     .create_trade(trade_date, Tenor::months(1), vec![SecurityPosition::of(gilt)], BuySell::Buy, 1.0e7, 0.0059)
//!     .unwrap();
//! let resolved = trade.resolve(&ref_data).unwrap();
//! assert_eq!(resolved.product.legal_entity_id, uk_govt);
//! assert_eq!(resolved.product.start_date, Date::from_ymd(2017, 12, 12).unwrap());
//! ```

#![warn(missing_docs)]
#![warn(clippy::all)]
#![warn(clippy::pedantic)]
#![allow(clippy::module_name_repetitions)]
#![allow(clippy::missing_errors_doc)]
#![allow(clippy::must_use_candidate)]
#![allow(clippy::doc_markdown)]
#![allow(clippy::too_many_arguments)]
#![allow(clippy::needless_pass_by_value)]
#![allow(clippy::uninlined_format_args)]

pub mod convention;
pub mod error;
pub mod pricing;
pub mod product;
pub mod reference_data;
pub mod template;
pub mod trade;

/// Prelude module for convenient imports.
pub mod prelude {
    pub use crate::convention::RepoConvention;
    pub use crate::error::{RepoError, RepoResult};
    pub use crate::pricing::{DiscountingRepoProductPricer, DiscountingRepoTradePricer};
    pub use crate::product::{Repo, RepoBuilder, ResolvedRepo, SecurityPosition};
    pub use crate::reference_data::{ReferenceData, SimpleLegalEntitySecurity};
    pub use crate::template::RepoTemplate;
    pub use crate::trade::{RepoTrade, ResolvedRepoTrade, TradeInfo};
}

pub use convention::RepoConvention;
pub use error::{RepoError, RepoResult};
pub use pricing::{DiscountingRepoProductPricer, DiscountingRepoTradePricer};
pub use product::{Repo, ResolvedRepo, SecurityPosition};
pub use reference_data::{ReferenceData, SimpleLegalEntitySecurity};
pub use template::RepoTemplate;
pub use trade::{RepoTrade, ResolvedRepoTrade, TradeInfo};
