//! Actual/365 Fixed day count convention.

use super::DayCount;
use crate::types::Date;

/// Actual/365 Fixed: actual days over a 365-day year, leap years included.
///
/// Used as the time axis of calibrated curves.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct Act365Fixed;

impl DayCount for Act365Fixed {
    fn name(&self) -> &'static str {
        "ACT/365F"
    }

    fn year_fraction(&self, start: Date, end: Date) -> f64 {
        self.day_count(start, end) as f64 / 365.0
    }

    fn day_count(&self, start: Date, end: Date) -> i64 {
        start.days_between(&end)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_relative_eq;

    #[test]
    fn test_act365f_leap_year_still_365() {
        let start = Date::from_ymd(2016, 1, 1).unwrap();
        let end = Date::from_ymd(2017, 1, 1).unwrap();
        assert_eq!(Act365Fixed.day_count(start, end), 366);
        assert_relative_eq!(Act365Fixed.year_fraction(start, end), 366.0 / 365.0);
    }
}
