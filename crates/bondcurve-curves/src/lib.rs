//! # BondCurve Curves
//!
//! Curves and the discounting context used to price repo and issuer cash flows.
//!
//! - **Curve Trait**: [`Curve`], a parameterised function of year fraction
//!   with analytic sensitivity to its own parameters
//! - **Nodal Curves**: [`InterpolatedNodalCurve`], zero rates on year
//!   fraction nodes with linear interpolation and flat extrapolation
//! - **Discount Factors**: [`ZeroRateDiscountFactors`] converting zero
//!   rates into discount factors and point sensitivities
//! - **Discounting Context**: [`LegalEntityDiscountingProvider`], curves
//!   keyed by repo group or issuer group and currency, resolved from
//!   securities and legal entities
//! - **Sensitivities**: point and parameter sensitivities, and the
//!   [`MarketQuoteSensitivityCalculator`] that maps parameter sensitivities
//!   to market quotes using calibration Jacobians
//!
//! ## Quick Start
//!
//! ```rust
//! use std::sync::Arc;
//! use bondcurve_core::prelude::*;
//! use bondcurve_curves::prelude::*;
//!
//! let val_date = Date::from_ymd(2017, 12, 11).unwrap();
//! let metadata = CurveMetadata::zero_rates(CurveName::of("UK_REPO"), DayCountConvention::Act365Fixed);
//! let curve = InterpolatedNodalCurve::new(metadata, vec![0.1, 0.5], vec![0.005, 0.006]).unwrap();
//! let dfs = ZeroRateDiscountFactors::new(Currency::GBP, val_date, Arc::new(curve)).unwrap();
//!
//! let uk_govt = LegalEntityId::of("OG", "UK_GOVT").unwrap();
//! let provider = LegalEntityDiscountingProvider::builder(val_date)
//!     .repo_curve_group(uk_govt.clone(), RepoGroup::of("UK_GROUP"))
//!     .repo_curve(RepoGroup::of("UK_GROUP"), Currency::GBP, dfs)
//!     .build()
//!     .unwrap();
//!
//! let df = provider
//!     .repo_curve_discount_factors(&uk_govt, Currency::GBP)
//!     .unwrap()
//!     .discount_factor(Date::from_ymd(2018, 3, 12).unwrap());
//! assert!(df < 1.0 && df > 0.99);
//! ```

#![warn(missing_docs)]
#![warn(clippy::all)]
#![warn(clippy::pedantic)]
#![allow(clippy::module_name_repetitions)]
#![allow(clippy::missing_errors_doc)]
#![allow(clippy::must_use_candidate)]
#![allow(clippy::doc_markdown)]
#![allow(clippy::cast_precision_loss)]
#![allow(clippy::uninlined_format_args)]

pub mod discount_factors;
pub mod error;
pub mod jacobian;
pub mod market_quote;
pub mod metadata;
pub mod nodal;
pub mod provider;
pub mod sensitivity;
pub mod traits;

/// Prelude module for convenient imports.
pub mod prelude {
    pub use crate::discount_factors::{GroupDiscountFactors, ZeroRateDiscountFactors};
    pub use crate::error::{CurveError, CurveResult};
    pub use crate::jacobian::{CurveParameterSize, JacobianCalibrationMatrix};
    pub use crate::market_quote::MarketQuoteSensitivityCalculator;
    pub use crate::metadata::{CurveInfo, CurveMetadata, ParameterMetadata, ValueType};
    pub use crate::nodal::InterpolatedNodalCurve;
    pub use crate::provider::{
        DiscountingEntity, LegalEntityDiscountingProvider, LegalEntityDiscountingProviderBuilder,
    };
    pub use crate::sensitivity::{
        CurrencyParameterSensitivities, CurrencyParameterSensitivity, CurveGroupKey,
        PointSensitivities, ZeroRateSensitivity,
    };
    pub use crate::traits::Curve;
}

pub use discount_factors::ZeroRateDiscountFactors;
pub use error::{CurveError, CurveResult};
pub use market_quote::MarketQuoteSensitivityCalculator;
pub use nodal::InterpolatedNodalCurve;
pub use provider::LegalEntityDiscountingProvider;
pub use traits::Curve;
