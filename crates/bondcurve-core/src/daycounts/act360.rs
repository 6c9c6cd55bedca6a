//! Actual/360 day count convention.

use super::DayCount;
use crate::types::Date;

/// Actual/360: actual days over a 360-day year.
///
/// Standard accrual basis for GBP and USD repo.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct Act360;

impl DayCount for Act360 {
    fn name(&self) -> &'static str {
        "ACT/360"
    }

    fn year_fraction(&self, start: Date, end: Date) -> f64 {
        self.day_count(start, end) as f64 / 360.0
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
    fn test_act360_one_week() {
        let start = Date::from_ymd(2017, 12, 12).unwrap();
        let end = Date::from_ymd(2017, 12, 19).unwrap();
        assert_eq!(Act360.day_count(start, end), 7);
        assert_relative_eq!(Act360.year_fraction(start, end), 7.0 / 360.0);
    }

    #[test]
    fn test_act360_negative() {
        let start = Date::from_ymd(2017, 12, 19).unwrap();
        let end = Date::from_ymd(2017, 12, 12).unwrap();
        assert_relative_eq!(Act360.year_fraction(start, end), -7.0 / 360.0);
    }
}
