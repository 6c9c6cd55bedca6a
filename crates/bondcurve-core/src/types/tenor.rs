//! Tenors such as `1W`, `3M` or `2Y`.

use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

use super::Date;
use crate::error::{CoreError, CoreResult};

/// A period expressed in a single unit.
///
/// Tenors serialize as their market label, so `Tenor::months(3)` round trips
/// through configuration as `"3M"`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(try_from = "String", into = "String")]
pub enum Tenor {
    /// Calendar days.
    Days(u32),
    /// Weeks of seven days.
    Weeks(u32),
    /// Calendar months.
    Months(u32),
    /// Calendar years.
    Years(u32),
}

impl Tenor {
    /// A tenor of `n` days.
    #[must_use]
    pub fn days(n: u32) -> Self {
        Tenor::Days(n)
    }

    /// A tenor of `n` weeks.
    #[must_use]
    pub fn weeks(n: u32) -> Self {
        Tenor::Weeks(n)
    }

    /// A tenor of `n` months.
    #[must_use]
    pub fn months(n: u32) -> Self {
        Tenor::Months(n)
    }

    /// A tenor of `n` years.
    #[must_use]
    pub fn years(n: u32) -> Self {
        Tenor::Years(n)
    }

    /// Adds the tenor to a date without business day adjustment.
    pub fn add_to(&self, date: Date) -> CoreResult<Date> {
        match *self {
            Tenor::Days(n) => Ok(date.add_days(i64::from(n))),
            Tenor::Weeks(n) => Ok(date.add_days(7 * i64::from(n))),
            Tenor::Months(n) => date.add_months(n as i32),
            Tenor::Years(n) => date.add_years(n as i32),
        }
    }

    /// Total number of months when the tenor is month or year based.
    #[must_use]
    pub fn total_months(&self) -> Option<u32> {
        match *self {
            Tenor::Months(n) => Some(n),
            Tenor::Years(n) => Some(12 * n),
            Tenor::Days(_) | Tenor::Weeks(_) => None,
        }
    }

    /// Rough length in years, used only for seeding solvers.
    ///
    /// Month-based tenors use months / 12; day-based tenors use days / 365.
    #[must_use]
    pub fn approximate_years(&self) -> f64 {
        match *self {
            Tenor::Days(n) => f64::from(n) / 365.0,
            Tenor::Weeks(n) => f64::from(7 * n) / 365.0,
            Tenor::Months(n) => f64::from(n) / 12.0,
            Tenor::Years(n) => f64::from(n),
        }
    }
}

impl fmt::Display for Tenor {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match *self {
            Tenor::Days(n) => write!(f, "{n}D"),
            Tenor::Weeks(n) => write!(f, "{n}W"),
            Tenor::Months(n) => write!(f, "{n}M"),
            Tenor::Years(n) => write!(f, "{n}Y"),
        }
    }
}

impl FromStr for Tenor {
    type Err = CoreError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let upper = s.trim().to_ascii_uppercase();
        let s = upper.strip_prefix('P').unwrap_or(&upper);
        if s.len() < 2 {
            return Err(CoreError::invalid_tenor(format!("'{s}' is too short")));
        }
        let (amount, unit) = s.split_at(s.len() - 1);
        let n: u32 = amount
            .parse()
            .map_err(|_| CoreError::invalid_tenor(format!("'{amount}' is not a count")))?;
        match unit {
            "D" => Ok(Tenor::Days(n)),
            "W" => Ok(Tenor::Weeks(n)),
            "M" => Ok(Tenor::Months(n)),
            "Y" => Ok(Tenor::Years(n)),
            other => Err(CoreError::invalid_tenor(format!("unknown unit '{other}'"))),
        }
    }
}

impl TryFrom<String> for Tenor {
    type Error = CoreError;

    fn try_from(value: String) -> Result<Self, Self::Error> {
        value.parse()
    }
}

impl From<Tenor> for String {
    fn from(tenor: Tenor) -> Self {
        tenor.to_string()
    }
}
