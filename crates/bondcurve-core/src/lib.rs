//! # BondCurve Core
//!
//! Core types shared by every BondCurve crate.
//!
//! - **Types**: `Date`, `Tenor`, `Currency`, identifiers for legal entities,
//!   securities, quotes and curve groups, and currency amounts
//! - **Day Counts**: ACT/360 and ACT/365F year fractions
//! - **Calendars**: holiday calendars, business day conventions and
//!   the date adjustments built on top of them
//!
//! ## Example
//!
//! ```rust
//! use bondcurve_core::prelude::*;
//!
//! let trade_date = Date::from_ymd(2017, 12, 11).unwrap();
//! let calendar = HolidayCalendar::weekends("GBLO");
//! let spot = DaysAdjustment::business_days(1, calendar).adjust(trade_date).unwrap();
//! let end = Tenor::months(1).add_to(spot).unwrap();
//! let yf = DayCountConvention::Act360.year_fraction(spot, end);
//! assert!(yf > 0.08 && yf < 0.09);
//! ```

#![warn(missing_docs)]
#![warn(clippy::all)]
#![warn(clippy::pedantic)]
#![allow(clippy::module_name_repetitions)]
#![allow(clippy::missing_errors_doc)]
#![allow(clippy::missing_panics_doc)]
#![allow(clippy::must_use_candidate)]
#![allow(clippy::doc_markdown)]
#![allow(clippy::cast_precision_loss)]
#![allow(clippy::cast_possible_truncation)]
#![allow(clippy::cast_possible_wrap)]
#![allow(clippy::cast_sign_loss)]
#![allow(clippy::cast_lossless)]
#![allow(clippy::return_self_not_must_use)]
#![allow(clippy::trivially_copy_pass_by_ref)]
#![allow(clippy::uninlined_format_args)]

pub mod calendars;
pub mod daycounts;
pub mod error;
pub mod types;

/// Prelude module for convenient imports.
pub mod prelude {
    pub use crate::calendars::{
        BusinessDayAdjustment, BusinessDayConvention, Calendar, DaysAdjustment, HolidayCalendar,
    };
    pub use crate::daycounts::{DayCount, DayCountConvention};
    pub use crate::error::{CoreError, CoreResult};
    pub use crate::types::{
        BuySell, Currency, CurrencyAmount, CurveGroupName, CurveName, Date, LegalEntityGroup,
        LegalEntityId, MultiCurrencyAmount, QuoteId, RepoGroup, SecurityId, StandardId, Tenor,
    };
}

// Re-export commonly used types at crate root
pub use error::{CoreError, CoreResult};
pub use types::{Currency, Date, Tenor};
