//! Business day adjustment conventions.

use serde::{Deserialize, Serialize};
use std::fmt;

use super::Calendar;
use crate::error::CoreResult;
use crate::types::Date;

/// How to move a date that falls on a non-business day.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, Default)]
pub enum BusinessDayConvention {
    /// Leave the date as it is.
    Unadjusted,

    /// Move to the following business day.
    #[default]
    Following,

    /// Move to the following business day unless that crosses into the next
    /// month, in which case move to the preceding business day.
    ModifiedFollowing,

    /// Move to the preceding business day.
    Preceding,
}

impl fmt::Display for BusinessDayConvention {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            BusinessDayConvention::Unadjusted => "Unadjusted",
            BusinessDayConvention::Following => "Following",
            BusinessDayConvention::ModifiedFollowing => "Modified Following",
            BusinessDayConvention::Preceding => "Preceding",
        };
        f.write_str(name)
    }
}

/// Adjusts a date according to the given business day convention.
pub fn adjust<C: Calendar + ?Sized>(
    date: Date,
    convention: BusinessDayConvention,
    calendar: &C,
) -> CoreResult<Date> {
    if calendar.is_business_day(date) {
        return Ok(date);
    }
    let adjusted = match convention {
        BusinessDayConvention::Unadjusted => date,
        BusinessDayConvention::Following => calendar.next_or_same(date),
        BusinessDayConvention::ModifiedFollowing => {
            let following = calendar.next_or_same(date);
            if following.month() == date.month() {
                following
            } else {
                calendar.previous_or_same(date)
            }
        }
        BusinessDayConvention::Preceding => calendar.previous_or_same(date),
    };
    log::trace!("adjusted {date} to {adjusted} using {convention} on {}", calendar.name());
    Ok(adjusted)
}
