//! Business day calendars and date adjustments.
//!
//! Holiday data is supplied by the caller: a [`HolidayCalendar`] is a named
//! set of holidays on top of Saturday/Sunday weekends.

mod adjustment;
mod conventions;

pub use adjustment::{BusinessDayAdjustment, DaysAdjustment};
pub use conventions::BusinessDayConvention;

use serde::{Deserialize, Serialize};
use std::collections::BTreeSet;

use crate::error::CoreResult;
use crate::types::Date;

/// Trait for business day calendars.
pub trait Calendar: Send + Sync {
    /// Returns the name of the calendar.
    fn name(&self) -> &str;

    /// Returns true if the date is a business day.
    fn is_business_day(&self, date: Date) -> bool;

    /// Returns true if the date is a holiday or weekend.
    fn is_holiday(&self, date: Date) -> bool {
        !self.is_business_day(date)
    }

    /// Adjusts a date according to the given business day convention.
    fn adjust(&self, date: Date, convention: BusinessDayConvention) -> CoreResult<Date> {
        conventions::adjust(date, convention, self)
    }

    /// Moves a date by a number of business days.
    ///
    /// Zero days returns the date unchanged, even on a holiday.
    fn add_business_days(&self, date: Date, days: i32) -> Date {
        let mut result = date;
        let mut remaining = days.unsigned_abs();
        let direction: i64 = if days >= 0 { 1 } else { -1 };
        while remaining > 0 {
            result = result.add_days(direction);
            if self.is_business_day(result) {
                remaining -= 1;
            }
        }
        result
    }

    /// Returns the next business day on or after the given date.
    fn next_or_same(&self, date: Date) -> Date {
        let mut result = date;
        while !self.is_business_day(result) {
            result = result.add_days(1);
        }
        result
    }

    /// Returns the previous business day on or before the given date.
    fn previous_or_same(&self, date: Date) -> Date {
        let mut result = date;
        while !self.is_business_day(result) {
            result = result.add_days(-1);
        }
        result
    }
}

/// A named calendar: weekends plus an explicit holiday list.
///
/// # Example
///
/// ```rust
/// use bondcurve_core::calendars::{Calendar, HolidayCalendar};
/// use bondcurve_core::Date;
///
/// let christmas = Date::from_ymd(2017, 12, 25).unwrap();
/// let cal = HolidayCalendar::weekends("GBLO").with_holidays([christmas]);
/// assert!(!cal.is_business_day(christmas));
/// assert_eq!(cal.add_business_days(Date::from_ymd(2017, 12, 22).unwrap(), 1),
///            Date::from_ymd(2017, 12, 26).unwrap());
/// ```
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct HolidayCalendar {
    name: String,
    #[serde(default)]
    holidays: BTreeSet<Date>,
}

impl HolidayCalendar {
    /// A calendar whose only non-business days are weekends.
    #[must_use]
    pub fn weekends(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            holidays: BTreeSet::new(),
        }
    }

    /// Adds holidays to the calendar.
    #[must_use]
    pub fn with_holidays(mut self, holidays: impl IntoIterator<Item = Date>) -> Self {
        self.holidays.extend(holidays);
        self
    }

    /// The holidays, excluding weekends.
    pub fn holidays(&self) -> impl Iterator<Item = &Date> {
        self.holidays.iter()
    }
}

impl Default for HolidayCalendar {
    fn default() -> Self {
        Self::weekends("WEEKENDS")
    }
}

impl Calendar for HolidayCalendar {
    fn name(&self) -> &str {
        &self.name
    }

    fn is_business_day(&self, date: Date) -> bool {
        !date.is_weekend() && !self.holidays.contains(&date)
    }
}
