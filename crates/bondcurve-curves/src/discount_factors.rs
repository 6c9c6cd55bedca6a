//! Discount factors backed by zero rate curves.

use std::sync::Arc;

use bondcurve_core::daycounts::DayCountConvention;
use bondcurve_core::types::{Currency, Date};

use crate::error::{CurveError, CurveResult};
use crate::metadata::ValueType;
use crate::sensitivity::{CurrencyParameterSensitivity, CurveGroupKey, ZeroRateSensitivity};
use crate::traits::Curve;

/// Discount factors from a continuously compounded zero rate curve.
///
/// With `t` the year fraction from the valuation date under the curve's day
/// count, `df(t) = exp(-z(t) * t)`.
#[derive(Debug, Clone)]
pub struct ZeroRateDiscountFactors {
    currency: Currency,
    valuation_date: Date,
    day_count: DayCountConvention,
    curve: Arc<dyn Curve>,
}

impl ZeroRateDiscountFactors {
    /// Wraps a zero rate curve.
    ///
    /// # Errors
    ///
    /// Returns `CurveError::InvalidCurve` unless the curve maps year fractions
    /// to zero rates and names a day count.
    pub fn new(currency: Currency, valuation_date: Date, curve: Arc<dyn Curve>) -> CurveResult<Self> {
        let metadata = curve.metadata();
        if metadata.x_value_type != ValueType::YearFraction {
            return Err(CurveError::invalid_curve(format!(
                "curve '{}' x values must be YearFraction, got {}",
                metadata.name, metadata.x_value_type
            )));
        }
        if metadata.y_value_type != ValueType::ZeroRate {
            return Err(CurveError::invalid_curve(format!(
                "curve '{}' y values must be ZeroRate, got {}",
                metadata.name, metadata.y_value_type
            )));
        }
        let day_count = metadata.day_count.ok_or_else(|| {
            CurveError::invalid_curve(format!("curve '{}' has no day count", metadata.name))
        })?;
        Ok(Self {
            currency,
            valuation_date,
            day_count,
            curve,
        })
    }

    /// The curve currency.
    #[must_use]
    pub fn currency(&self) -> Currency {
        self.currency
    }

    /// The valuation date.
    #[must_use]
    pub fn valuation_date(&self) -> Date {
        self.valuation_date
    }

    /// The underlying curve.
    #[must_use]
    pub fn curve(&self) -> &Arc<dyn Curve> {
        &self.curve
    }

    /// Year fraction from the valuation date, negative for earlier dates.
    #[must_use]
    pub fn relative_year_fraction(&self, date: Date) -> f64 {
        self.day_count.year_fraction(self.valuation_date, date)
    }

    /// Zero rate at a date.
    #[must_use]
    pub fn zero_rate(&self, date: Date) -> f64 {
        self.curve.y_value(self.relative_year_fraction(date))
    }

    /// Discount factor at a date.
    #[must_use]
    pub fn discount_factor(&self, date: Date) -> f64 {
        self.discount_factor_at(self.relative_year_fraction(date))
    }

    /// Discount factor at a year fraction.
    #[must_use]
    pub fn discount_factor_at(&self, year_fraction: f64) -> f64 {
        (-self.curve.y_value(year_fraction) * year_fraction).exp()
    }

    /// Sensitivity of the discount factor at `date` to the zero rate at the
    /// same point, tagged with `group`.
    #[must_use]
    pub fn zero_rate_point_sensitivity(&self, group: CurveGroupKey, date: Date) -> ZeroRateSensitivity {
        let yf = self.relative_year_fraction(date);
        let df = self.discount_factor_at(yf);
        ZeroRateSensitivity::of(group, self.currency, yf, -yf * df)
    }

    /// Maps a point sensitivity onto the curve parameters.
    #[must_use]
    pub fn parameter_sensitivity(&self, point: &ZeroRateSensitivity) -> CurrencyParameterSensitivity {
        let unit = self.curve.y_value_parameter_sensitivity(point.year_fraction);
        CurrencyParameterSensitivity::new(
            self.curve.name().clone(),
            point.currency,
            self.curve.metadata().parameter_metadata.clone(),
            unit.into_iter().map(|v| v * point.sensitivity).collect(),
        )
    }

    /// A copy using a different curve.
    pub fn with_curve(&self, curve: Arc<dyn Curve>) -> CurveResult<Self> {
        Self::new(self.currency, self.valuation_date, curve)
    }
}

/// Discount factors resolved for a repo or issuer group.
///
/// Point sensitivities produced here carry the group so that the context can
/// route them back to the right curve.
#[derive(Debug, Clone)]
pub struct GroupDiscountFactors {
    group: CurveGroupKey,
    discount_factors: ZeroRateDiscountFactors,
}

impl GroupDiscountFactors {
    /// Creates the wrapper.
    #[must_use]
    pub fn new(group: CurveGroupKey, discount_factors: ZeroRateDiscountFactors) -> Self {
        Self {
            group,
            discount_factors,
        }
    }

    /// The group.
    #[must_use]
    pub fn group(&self) -> &CurveGroupKey {
        &self.group
    }

    /// The underlying discount factors.
    #[must_use]
    pub fn discount_factors(&self) -> &ZeroRateDiscountFactors {
        &self.discount_factors
    }

    /// The curve currency.
    #[must_use]
    pub fn currency(&self) -> Currency {
        self.discount_factors.currency()
    }

    /// Discount factor at a date.
    #[must_use]
    pub fn discount_factor(&self, date: Date) -> f64 {
        self.discount_factors.discount_factor(date)
    }

    /// Point sensitivity of the discount factor at a date.
    #[must_use]
    pub fn zero_rate_point_sensitivity(&self, date: Date) -> ZeroRateSensitivity {
        self.discount_factors
            .zero_rate_point_sensitivity(self.group.clone(), date)
    }
}
