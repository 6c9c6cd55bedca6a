//! Date adjustments bound to a calendar.

use serde::{Deserialize, Serialize};

use super::{BusinessDayConvention, Calendar, HolidayCalendar};
use crate::error::CoreResult;
use crate::types::Date;

/// A business day convention applied on a specific calendar.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct BusinessDayAdjustment {
    /// The convention.
    pub convention: BusinessDayConvention,
    /// The calendar defining business days.
    pub calendar: HolidayCalendar,
}

impl BusinessDayAdjustment {
    /// Creates an adjustment.
    #[must_use]
    pub fn new(convention: BusinessDayConvention, calendar: HolidayCalendar) -> Self {
        Self {
            convention,
            calendar,
        }
    }

    /// An adjustment that leaves every date unchanged.
    #[must_use]
    pub fn none() -> Self {
        Self::new(BusinessDayConvention::Unadjusted, HolidayCalendar::default())
    }

    /// Adjusts the date.
    pub fn adjust(&self, date: Date) -> CoreResult<Date> {
        self.calendar.adjust(date, self.convention)
    }
}

/// Shift by a number of business days, used for spot lags.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct DaysAdjustment {
    /// Number of business days to add; may be negative.
    pub days: i32,
    /// The calendar used to count business days.
    pub calendar: HolidayCalendar,
}

impl DaysAdjustment {
    /// A shift of `days` business days on `calendar`.
    #[must_use]
    pub fn business_days(days: i32, calendar: HolidayCalendar) -> Self {
        Self { days, calendar }
    }

    /// Applies the shift.
    ///
    /// A zero shift still rolls a non-business day forward to the next
    /// business day.
    pub fn adjust(&self, date: Date) -> CoreResult<Date> {
        if self.days == 0 {
            return Ok(self.calendar.next_or_same(date));
        }
        Ok(self.calendar.add_business_days(date, self.days))
    }
}
