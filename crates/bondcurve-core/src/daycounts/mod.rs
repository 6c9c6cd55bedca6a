//! Day count conventions.
//!
//! Repo accrual uses ACT/360 in the money markets covered here, while
//! calibrated curves measure time in ACT/365F year fractions from the
//! valuation date.
//!
//! - [`Act360`]: Actual/360
//! - [`Act365Fixed`]: Actual/365 Fixed
//!
//! ```rust
//! use bondcurve_core::daycounts::{DayCount, Act360};
//! use bondcurve_core::Date;
//!
//! let start = Date::from_ymd(2025, 1, 1).unwrap();
//! let end = Date::from_ymd(2025, 4, 1).unwrap();
//! assert_eq!(Act360.day_count(start, end), 90);
//! assert_eq!(Act360.year_fraction(start, end), 0.25);
//! ```

mod act360;
mod act365;

pub use act360::Act360;
pub use act365::Act365Fixed;

use serde::{Deserialize, Serialize};
use std::fmt;

use crate::types::Date;

/// Trait for day count conventions.
///
/// Both conventions here count actual days, so year fractions are signed:
/// an end date before the start date yields a negative fraction.
pub trait DayCount: Send + Sync {
    /// Market name of the convention (e.g. "ACT/360").
    fn name(&self) -> &'static str;

    /// Year fraction between two dates.
    fn year_fraction(&self, start: Date, end: Date) -> f64;

    /// Number of days between two dates according to the convention.
    fn day_count(&self, start: Date, end: Date) -> i64;
}

/// Runtime-selectable day count convention.
///
/// Used in conventions and curve definitions so they stay serializable.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum DayCountConvention {
    /// Actual/360.
    #[serde(rename = "ACT/360", alias = "Act360")]
    Act360,
    /// Actual/365 Fixed.
    #[serde(rename = "ACT/365F", alias = "Act365Fixed")]
    Act365Fixed,
}

impl DayCountConvention {
    /// Returns the convention as a trait object.
    #[must_use]
    pub fn to_day_count(&self) -> &'static dyn DayCount {
        match self {
            DayCountConvention::Act360 => &Act360,
            DayCountConvention::Act365Fixed => &Act365Fixed,
        }
    }

    /// Year fraction between two dates.
    #[must_use]
    pub fn year_fraction(&self, start: Date, end: Date) -> f64 {
        self.to_day_count().year_fraction(start, end)
    }

    /// Market name of the convention.
    #[must_use]
    pub fn name(&self) -> &'static str {
        self.to_day_count().name()
    }
}

impl fmt::Display for DayCountConvention {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_relative_eq;

    #[test]
    fn test_convention_dispatch() {
        let start = Date::from_ymd(2017, 12, 11).unwrap();
        let end = Date::from_ymd(2018, 3, 12).unwrap();
        assert_relative_eq!(DayCountConvention::Act360.year_fraction(start, end), 91.0 / 360.0);
        assert_relative_eq!(
            DayCountConvention::Act365Fixed.year_fraction(start, end),
            91.0 / 365.0
        );
        assert_eq!(DayCountConvention::Act365Fixed.to_string(), "ACT/365F");
    }

    #[test]
    fn test_serde_market_names() {
        let json = serde_json::to_string(&DayCountConvention::Act360).unwrap();
        assert_eq!(json, "\"ACT/360\"");
        let dc: DayCountConvention = serde_json::from_str("\"ACT/365F\"").unwrap();
        assert_eq!(dc, DayCountConvention::Act365Fixed);
    }
}
