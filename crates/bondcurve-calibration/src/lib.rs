//! # BondCurve Calibration
//!
//! Calibration of legal entity repo and issuer curves to market quotes.
//!
//! This crate provides:
//!
//! - **Curve Definitions**: [`RepoCurveNode`] and
//!   [`InterpolatedNodalCurveDefinition`], one parameter per node
//! - **Curve Groups**: [`LegalEntityDiscountingCurveGroupDefinition`], the
//!   curves of a group and the repo and issuer buckets each curve fills
//! - **Measures**: [`CalibrationMeasures`] registries (par spread, market
//!   quote, present value) dispatching on the trade kind
//! - **Calibration**: [`LegalEntityDiscountingCurveCalibrator`], a Newton
//!   solve over the node trades with optional Jacobian and PV sensitivity
//!   output attached to the calibrated curves
//! - **Calculations**: [`RepoMeasureCalculations`] for pricing and PV01
//!   against a calibrated context
//!
//! Enable the `parallel` feature to price node trades on the rayon pool.
//!
//! ## Quick Start
//!
//! ```rust
//! use bondcurve_calibration::prelude::*;
//! use bondcurve_core::prelude::*;
//! use bondcurve_repo::prelude::*;
//!
//! let val_date = Date::from_ymd(2017, 12, 11).unwrap();
//! let gilt = SecurityId::of("OG", "UK_GOVT_10Y").unwrap();
//! let uk_govt = LegalEntityId::of("OG", "UK_GOVT").unwrap();
//! let ref_data = ReferenceData::empty()
//!     .with_security(gilt.clone(), SimpleLegalEntitySecurity::new(uk_govt.clone()));
//! let convention = RepoConvention::gbp_repo(HolidayCalendar::weekends("GBLO"));
//!
//! let mut market_data = MarketData::empty(val_date);
//! let mut nodes = Vec::new();
//! for (tenor, rate) in [(Tenor::weeks(1), 0.00565), (Tenor::months(3), 0.00605)] {
//!     let quote = QuoteId::of("OG", format!("UK_REPO_{tenor}")).unwrap();
//!     market_data = market_data.with_value(quote.clone(), rate);
//!     let template = RepoTemplate::of(tenor, vec![SecurityPosition::of(gilt.clone())], convention.clone());
//!     nodes.push(RepoCurveNode::of(template, quote));
//! }
//!
//! let group = LegalEntityDiscountingCurveGroupDefinition::builder(CurveGroupName::of("UK"))
//!     .repo_curve_group(uk_govt.clone(), RepoGroup::of("UK_GROUP"))
//!     .repo_curve_entry(RepoCurveEntry::of(
//!         CurveName::of("UK_REPO"),
//!         [(RepoGroup::of("UK_GROUP"), Currency::GBP)],
//!     ))
//!     .curve_definition(InterpolatedNodalCurveDefinition::new(
//!         CurveName::of("UK_REPO"),
//!         DayCountConvention::Act365Fixed,
//!         nodes,
//!     ))
//!     .build()
//!     .unwrap();
//!
//! let provider = LegalEntityDiscountingCurveCalibrator::standard()
//!     .calibrate(&group, &market_data, &ref_data)
//!     .unwrap();
//! assert!(provider.repo_curve_discount_factors(&uk_govt, Currency::GBP).is_ok());
//! ```

#![warn(missing_docs)]
#![warn(clippy::all)]
#![warn(clippy::pedantic)]
#![allow(clippy::module_name_repetitions)]
#![allow(clippy::missing_errors_doc)]
#![allow(clippy::must_use_candidate)]
#![allow(clippy::doc_markdown)]
#![allow(clippy::cast_precision_loss)]
#![allow(clippy::needless_pass_by_value)]
#![allow(clippy::uninlined_format_args)]

pub mod calculations;
pub mod calibrator;
pub mod config;
pub mod definition;
pub mod entries;
pub mod error;
pub mod functions;
pub mod generator;
pub mod group;
pub mod market_data;
pub mod measures;
pub mod node;

/// Prelude module for convenient imports.
pub mod prelude {
    pub use crate::calculations::RepoMeasureCalculations;
    pub use crate::calibrator::LegalEntityDiscountingCurveCalibrator;
    pub use crate::config::CalibratorConfig;
    pub use crate::definition::InterpolatedNodalCurveDefinition;
    pub use crate::entries::{IssuerCurveEntry, RepoCurveEntry};
    pub use crate::error::{CalibrationError, CalibrationResult};
    pub use crate::generator::{LegalEntityDiscountingProviderGenerator, ProviderGenerator};
    pub use crate::group::{
        LegalEntityDiscountingCurveGroupDefinition, LegalEntityDiscountingCurveGroupDefinitionBuilder,
    };
    pub use crate::market_data::MarketData;
    pub use crate::measures::{CalibrationMeasure, CalibrationMeasures, CalibrationTrade, TradeKind};
    pub use crate::node::{CurveNodeDate, RepoCurveNode};
}

pub use calculations::RepoMeasureCalculations;
pub use calibrator::LegalEntityDiscountingCurveCalibrator;
pub use config::CalibratorConfig;
pub use definition::InterpolatedNodalCurveDefinition;
pub use error::{CalibrationError, CalibrationResult};
pub use group::LegalEntityDiscountingCurveGroupDefinition;
pub use market_data::MarketData;
pub use measures::CalibrationMeasures;
pub use node::RepoCurveNode;
