//! Point and parameter sensitivities.
//!
//! Pricers report how a value moves with the zero rate at a given year
//! fraction on a given curve ([`ZeroRateSensitivity`]). The discounting
//! context turns these into sensitivities to curve parameters
//! ([`CurrencyParameterSensitivity`]), which calibration Jacobians can map
//! further onto market quotes.

use std::fmt;

use bondcurve_core::types::{
    Currency, CurrencyAmount, CurveName, LegalEntityGroup, MultiCurrencyAmount, RepoGroup,
};

use crate::metadata::ParameterMetadata;

/// Identifies a curve slot in the legal-entity discounting context.
#[derive(Debug, Clone, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub enum CurveGroupKey {
    /// A repo curve group.
    Repo(RepoGroup),
    /// An issuer curve group.
    Issuer(LegalEntityGroup),
}

impl fmt::Display for CurveGroupKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            CurveGroupKey::Repo(group) => write!(f, "repo:{group}"),
            CurveGroupKey::Issuer(group) => write!(f, "issuer:{group}"),
        }
    }
}

/// Sensitivity to the zero rate of one curve at one year fraction.
#[derive(Debug, Clone, PartialEq)]
pub struct ZeroRateSensitivity {
    /// Group of the curve.
    pub group: CurveGroupKey,
    /// Currency of the curve.
    pub curve_currency: Currency,
    /// Year fraction of the point.
    pub year_fraction: f64,
    /// Currency the sensitivity is expressed in.
    pub currency: Currency,
    /// The sensitivity value.
    pub sensitivity: f64,
}

impl ZeroRateSensitivity {
    /// Creates a sensitivity expressed in the curve currency.
    #[must_use]
    pub fn of(group: CurveGroupKey, curve_currency: Currency, year_fraction: f64, sensitivity: f64) -> Self {
        Self {
            group,
            curve_currency,
            year_fraction,
            currency: curve_currency,
            sensitivity,
        }
    }

    /// Scales the sensitivity.
    #[must_use]
    pub fn multiplied_by(&self, factor: f64) -> Self {
        Self {
            sensitivity: self.sensitivity * factor,
            ..self.clone()
        }
    }
}

/// A collection of point sensitivities.
#[derive(Debug, Clone, PartialEq, Default)]
pub struct PointSensitivities {
    sensitivities: Vec<ZeroRateSensitivity>,
}

impl PointSensitivities {
    /// No sensitivity.
    #[must_use]
    pub fn empty() -> Self {
        Self::default()
    }

    /// Builds from a list of sensitivities.
    #[must_use]
    pub fn of(sensitivities: Vec<ZeroRateSensitivity>) -> Self {
        Self { sensitivities }
    }

    /// Concatenates two collections.
    #[must_use]
    pub fn combined_with(mut self, other: PointSensitivities) -> Self {
        self.sensitivities.extend(other.sensitivities);
        self
    }

    /// Scales every sensitivity.
    #[must_use]
    pub fn multiplied_by(&self, factor: f64) -> Self {
        self.sensitivities.iter().map(|s| s.multiplied_by(factor)).collect()
    }

    /// Iterates the sensitivities.
    pub fn iter(&self) -> impl Iterator<Item = &ZeroRateSensitivity> {
        self.sensitivities.iter()
    }

    /// Number of sensitivities.
    #[must_use]
    pub fn len(&self) -> usize {
        self.sensitivities.len()
    }

    /// True when there is no sensitivity.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.sensitivities.is_empty()
    }
}

impl From<ZeroRateSensitivity> for PointSensitivities {
    fn from(sensitivity: ZeroRateSensitivity) -> Self {
        Self::of(vec![sensitivity])
    }
}

impl FromIterator<ZeroRateSensitivity> for PointSensitivities {
    fn from_iter<I: IntoIterator<Item = ZeroRateSensitivity>>(iter: I) -> Self {
        Self::of(iter.into_iter().collect())
    }
}

/// Sensitivity to the parameters of one curve in one currency.
#[derive(Debug, Clone, PartialEq)]
pub struct CurrencyParameterSensitivity {
    /// The curve.
    pub curve_name: CurveName,
    /// Currency the values are expressed in.
    pub currency: Currency,
    /// Parameter descriptions, possibly empty.
    pub parameter_metadata: Vec<ParameterMetadata>,
    /// One value per parameter.
    pub sensitivity: Vec<f64>,
}

impl CurrencyParameterSensitivity {
    /// Creates a sensitivity.
    #[must_use]
    pub fn new(
        curve_name: CurveName,
        currency: Currency,
        parameter_metadata: Vec<ParameterMetadata>,
        sensitivity: Vec<f64>,
    ) -> Self {
        Self {
            curve_name,
            currency,
            parameter_metadata,
            sensitivity,
        }
    }

    /// Number of parameters.
    #[must_use]
    pub fn parameter_count(&self) -> usize {
        self.sensitivity.len()
    }

    /// Sum over parameters.
    #[must_use]
    pub fn total(&self) -> f64 {
        self.sensitivity.iter().sum()
    }

    /// Scales every value.
    #[must_use]
    pub fn multiplied_by(&self, factor: f64) -> Self {
        Self {
            sensitivity: self.sensitivity.iter().map(|v| v * factor).collect(),
            ..self.clone()
        }
    }

    fn same_key(&self, other: &Self) -> bool {
        self.curve_name == other.curve_name && self.currency == other.currency
    }

    fn add_values(&mut self, other: CurrencyParameterSensitivity) {
        if other.sensitivity.len() > self.sensitivity.len() {
            self.sensitivity.resize(other.sensitivity.len(), 0.0);
        }
        for (acc, v) in self.sensitivity.iter_mut().zip(&other.sensitivity) {
            *acc += v;
        }
        if self.parameter_metadata.len() < other.parameter_metadata.len() {
            self.parameter_metadata = other.parameter_metadata;
        }
    }
}

/// Parameter sensitivities across curves and currencies.
///
/// Holds at most one entry per (curve, currency); combining adds values of
/// matching entries parameter by parameter.
#[derive(Debug, Clone, PartialEq, Default)]
pub struct CurrencyParameterSensitivities {
    entries: Vec<CurrencyParameterSensitivity>,
}

impl CurrencyParameterSensitivities {
    /// No sensitivity.
    #[must_use]
    pub fn empty() -> Self {
        Self::default()
    }

    /// Builds from entries, merging duplicates.
    #[must_use]
    pub fn of(entries: Vec<CurrencyParameterSensitivity>) -> Self {
        entries
            .into_iter()
            .fold(Self::empty(), Self::combined_with_entry)
    }

    /// Adds one entry.
    #[must_use]
    pub fn combined_with_entry(mut self, entry: CurrencyParameterSensitivity) -> Self {
        match self.entries.iter_mut().find(|e| e.same_key(&entry)) {
            Some(existing) => existing.add_values(entry),
            None => self.entries.push(entry),
        }
        self
    }

    /// Adds every entry of another collection.
    #[must_use]
    pub fn combined_with(self, other: CurrencyParameterSensitivities) -> Self {
        other
            .entries
            .into_iter()
            .fold(self, Self::combined_with_entry)
    }

    /// The entry for a curve and currency.
    #[must_use]
    pub fn get(&self, curve_name: &CurveName, currency: Currency) -> Option<&CurrencyParameterSensitivity> {
        self.entries
            .iter()
            .find(|e| &e.curve_name == curve_name && e.currency == currency)
    }

    /// Iterates the entries.
    pub fn iter(&self) -> impl Iterator<Item = &CurrencyParameterSensitivity> {
        self.entries.iter()
    }

    /// Number of entries.
    #[must_use]
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    /// True when there is no entry.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Scales every entry.
    #[must_use]
    pub fn multiplied_by(&self, factor: f64) -> Self {
        Self {
            entries: self.entries.iter().map(|e| e.multiplied_by(factor)).collect(),
        }
    }

    /// Sum of all values per currency.
    #[must_use]
    pub fn total(&self) -> MultiCurrencyAmount {
        self.entries.iter().fold(MultiCurrencyAmount::empty(), |acc, e| {
            acc.plus(CurrencyAmount::new(e.currency, e.total()))
        })
    }

    /// Consumes the collection, returning its entries.
    #[must_use]
    pub fn into_entries(self) -> Vec<CurrencyParameterSensitivity> {
        self.entries
    }
}

impl IntoIterator for CurrencyParameterSensitivities {
    type Item = CurrencyParameterSensitivity;
    type IntoIter = std::vec::IntoIter<CurrencyParameterSensitivity>;

    fn into_iter(self) -> Self::IntoIter {
        self.entries.into_iter()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_relative_eq;

    fn entry(name: &str, ccy: Currency, values: Vec<f64>) -> CurrencyParameterSensitivity {
        CurrencyParameterSensitivity::new(CurveName::of(name), ccy, Vec::new(), values)
    }

    #[test]
    fn test_point_sensitivities() {
        let key = CurveGroupKey::Repo(RepoGroup::of("UK_GROUP"));
        let s = ZeroRateSensitivity::of(key.clone(), Currency::GBP, 0.25, -100.0);
        assert_eq!(s.currency, Currency::GBP);
        let points = PointSensitivities::from(s.clone()).combined_with(PointSensitivities::of(vec![s]));
        assert_eq!(points.len(), 2);
        let scaled = points.multiplied_by(2.0);
        assert!(scaled.iter().all(|p| p.sensitivity == -200.0 && p.group == key));
        assert!(PointSensitivities::empty().is_empty());
    }

    #[test]
    fn test_merge_same_curve() {
        let merged = CurrencyParameterSensitivities::of(vec![
            entry("A", Currency::GBP, vec![1.0, 2.0]),
            entry("B", Currency::GBP, vec![5.0]),
            entry("A", Currency::GBP, vec![0.5, 0.5]),
            entry("A", Currency::USD, vec![1.0, 1.0]),
        ]);
        assert_eq!(merged.len(), 3);
        let a = merged.get(&CurveName::of("A"), Currency::GBP).unwrap();
        assert_eq!(a.sensitivity, vec![1.5, 2.5]);
        assert!(merged.get(&CurveName::of("B"), Currency::USD).is_none());
    }

    #[test]
    fn test_total_and_scale() {
        let s = CurrencyParameterSensitivities::of(vec![
            entry("A", Currency::GBP, vec![1.0, 2.0]),
            entry("B", Currency::USD, vec![5.0]),
        ]);
        let total = s.multiplied_by(2.0).total();
        assert_relative_eq!(total.amount(Currency::GBP), 6.0);
        assert_relative_eq!(total.amount(Currency::USD), 10.0);
    }
}
