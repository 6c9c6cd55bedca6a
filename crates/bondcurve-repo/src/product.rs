//! Repo products.
//!
//! A repo exchanges cash against collateral at the start date and reverses
//! the exchange, with interest, at the end date. The buyer lends cash: it
//! pays the notional at the start and receives notional plus interest at the
//! end.

use std::collections::BTreeSet;

use bondcurve_core::calendars::BusinessDayAdjustment;
use bondcurve_core::daycounts::DayCountConvention;
use bondcurve_core::types::{BuySell, Currency, Date, LegalEntityId, SecurityId};
use serde::{Deserialize, Serialize};

use crate::error::{RepoError, RepoResult};
use crate::reference_data::ReferenceData;

/// A position in a collateral security.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SecurityPosition {
    /// The security.
    pub security_id: SecurityId,
    /// Long quantity.
    pub long_quantity: f64,
    /// Short quantity.
    pub short_quantity: f64,
}

impl SecurityPosition {
    /// A position of unit long quantity.
    #[must_use]
    pub fn of(security_id: SecurityId) -> Self {
        Self::of_net(security_id, 1.0)
    }

    /// A position from a net quantity.
    #[must_use]
    pub fn of_net(security_id: SecurityId, net_quantity: f64) -> Self {
        Self {
            security_id,
            long_quantity: net_quantity.max(0.0),
            short_quantity: (-net_quantity).max(0.0),
        }
    }

    /// Long minus short quantity.
    #[must_use]
    pub fn net_quantity(&self) -> f64 {
        self.long_quantity - self.short_quantity
    }
}

/// A repo with unadjusted dates.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Repo {
    buy_sell: BuySell,
    collateral: Vec<SecurityPosition>,
    currency: Currency,
    notional: f64,
    start_date: Date,
    end_date: Date,
    business_day_adjustment: Option<BusinessDayAdjustment>,
    day_count: DayCountConvention,
    rate: f64,
}

impl Repo {
    /// Starts a builder.
    #[must_use]
    pub fn builder() -> RepoBuilder {
        RepoBuilder::default()
    }

    /// Buy (lend cash) or sell (borrow cash).
    #[must_use]
    pub fn buy_sell(&self) -> BuySell {
        self.buy_sell
    }

    /// The collateral positions.
    #[must_use]
    pub fn collateral(&self) -> &[SecurityPosition] {
        &self.collateral
    }

    /// The cash currency.
    #[must_use]
    pub fn currency(&self) -> Currency {
        self.currency
    }

    /// The notional, always non-negative.
    #[must_use]
    pub fn notional(&self) -> f64 {
        self.notional
    }

    /// Unadjusted start date.
    #[must_use]
    pub fn start_date(&self) -> Date {
        self.start_date
    }

    /// Unadjusted end date.
    #[must_use]
    pub fn end_date(&self) -> Date {
        self.end_date
    }

    /// Adjustment applied to both dates on resolution.
    #[must_use]
    pub fn business_day_adjustment(&self) -> Option<&BusinessDayAdjustment> {
        self.business_day_adjustment.as_ref()
    }

    /// Accrual day count.
    #[must_use]
    pub fn day_count(&self) -> DayCountConvention {
        self.day_count
    }

    /// The repo rate.
    #[must_use]
    pub fn rate(&self) -> f64 {
        self.rate
    }

    /// Currencies referred to by the repo.
    #[must_use]
    pub fn all_currencies(&self) -> BTreeSet<Currency> {
        BTreeSet::from([self.currency])
    }

    /// Resolves the repo against reference data.
    ///
    /// # Errors
    ///
    /// Fails if a collateral security is missing from the reference data, if
    /// the collateral does not map to exactly one issuer, or if a date cannot
    /// be adjusted.
    pub fn resolve(&self, ref_data: &ReferenceData) -> RepoResult<ResolvedRepo> {
        let security_ids: Vec<SecurityId> = self
            .collateral
            .iter()
            .map(|p| p.security_id.clone())
            .collect();
        let legal_entities = security_ids
            .iter()
            .map(|id| ref_data.security(id).map(|s| s.legal_entity_id.clone()))
            .collect::<RepoResult<BTreeSet<LegalEntityId>>>()?;
        if legal_entities.len() != 1 {
            return Err(RepoError::NonUniqueCollateralIssuer);
        }
        let legal_entity_id = legal_entities
            .into_iter()
            .next()
            .ok_or(RepoError::NonUniqueCollateralIssuer)?;

        let (start_date, end_date) = match &self.business_day_adjustment {
            Some(bda) => (bda.adjust(self.start_date)?, bda.adjust(self.end_date)?),
            None => (self.start_date, self.end_date),
        };
        let year_fraction = self.day_count.year_fraction(start_date, end_date);
        log::trace!(
            "resolved repo {} -> {} ({:.6}y) on {}",
            start_date,
            end_date,
            year_fraction,
            legal_entity_id
        );

        Ok(ResolvedRepo {
            currency: self.currency,
            notional: self.buy_sell.normalize(self.notional),
            start_date,
            end_date,
            year_fraction,
            rate: self.rate,
            security_ids,
            legal_entity_id,
        })
    }
}

/// Builder for [`Repo`].
#[derive(Debug, Clone, Default)]
pub struct RepoBuilder {
    buy_sell: BuySell,
    collateral: Vec<SecurityPosition>,
    currency: Option<Currency>,
    notional: Option<f64>,
    start_date: Option<Date>,
    end_date: Option<Date>,
    business_day_adjustment: Option<BusinessDayAdjustment>,
    day_count: Option<DayCountConvention>,
    rate: Option<f64>,
}

impl RepoBuilder {
    /// Sets buy or sell.
    #[must_use]
    pub fn buy_sell(mut self, buy_sell: BuySell) -> Self {
        self.buy_sell = buy_sell;
        self
    }

    /// Sets the collateral.
    #[must_use]
    pub fn collateral(mut self, collateral: Vec<SecurityPosition>) -> Self {
        self.collateral = collateral;
        self
    }

    /// Sets the currency.
    #[must_use]
    pub fn currency(mut self, currency: Currency) -> Self {
        self.currency = Some(currency);
        self
    }

    /// Sets the notional.
    #[must_use]
    pub fn notional(mut self, notional: f64) -> Self {
        self.notional = Some(notional);
        self
    }

    /// Sets the unadjusted start date.
    #[must_use]
    pub fn start_date(mut self, date: Date) -> Self {
        self.start_date = Some(date);
        self
    }

    /// Sets the unadjusted end date.
    #[must_use]
    pub fn end_date(mut self, date: Date) -> Self {
        self.end_date = Some(date);
        self
    }

    /// Sets the date adjustment.
    #[must_use]
    pub fn business_day_adjustment(mut self, adjustment: BusinessDayAdjustment) -> Self {
        self.business_day_adjustment = Some(adjustment);
        self
    }

    /// Sets the day count.
    #[must_use]
    pub fn day_count(mut self, day_count: DayCountConvention) -> Self {
        self.day_count = Some(day_count);
        self
    }

    /// Sets the rate.
    #[must_use]
    pub fn rate(mut self, rate: f64) -> Self {
        self.rate = Some(rate);
        self
    }

    /// Builds the repo.
    ///
    /// # Errors
    ///
    /// Fails if a field is missing, the notional is negative or not finite,
    /// or the start date is not before the end date.
    pub fn build(self) -> RepoResult<Repo> {
        let currency = self.currency.ok_or(RepoError::MissingField { field: "currency" })?;
        let notional = self.notional.ok_or(RepoError::MissingField { field: "notional" })?;
        let start_date = self.start_date.ok_or(RepoError::MissingField { field: "start_date" })?;
        let end_date = self.end_date.ok_or(RepoError::MissingField { field: "end_date" })?;
        let day_count = self.day_count.ok_or(RepoError::MissingField { field: "day_count" })?;
        let rate = self.rate.ok_or(RepoError::MissingField { field: "rate" })?;

        if !notional.is_finite() || notional < 0.0 {
            return Err(RepoError::invalid_spec(format!(
                "notional must be non-negative, got {notional}"
            )));
        }
        if start_date >= end_date {
            return Err(RepoError::invalid_spec(format!(
                "start date {start_date} must be before end date {end_date}"
            )));
        }
        if self.collateral.is_empty() {
            return Err(RepoError::MissingField { field: "collateral" });
        }

        Ok(Repo {
            buy_sell: self.buy_sell,
            collateral: self.collateral,
            currency,
            notional,
            start_date,
            end_date,
            business_day_adjustment: self.business_day_adjustment,
            day_count,
            rate,
        })
    }
}

/// A repo with adjusted dates, signed notional and a known issuer.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ResolvedRepo {
    /// The cash currency.
    pub currency: Currency,
    /// Signed notional: positive when lending cash.
    pub notional: f64,
    /// Adjusted start date.
    pub start_date: Date,
    /// Adjusted end date.
    pub end_date: Date,
    /// Accrual year fraction between the adjusted dates.
    pub year_fraction: f64,
    /// The repo rate.
    pub rate: f64,
    /// Collateral securities.
    pub security_ids: Vec<SecurityId>,
    /// Issuer of the collateral.
    pub legal_entity_id: LegalEntityId,
}

impl ResolvedRepo {
    /// Interest paid at the end date.
    #[must_use]
    pub fn interest(&self) -> f64 {
        self.notional * self.rate * self.year_fraction
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_relative_eq;
    use bondcurve_core::calendars::{BusinessDayConvention, HolidayCalendar};

    use crate::reference_data::SimpleLegalEntitySecurity;

    fn gilt() -> SecurityId {
        SecurityId::of("OG", "UK_GOVT_10Y").unwrap()
    }

    fn uk_govt() -> LegalEntityId {
        LegalEntityId::of("OG", "UK_GOVT").unwrap()
    }

    fn ref_data() -> ReferenceData {
        ReferenceData::empty()
            .with_security(gilt(), SimpleLegalEntitySecurity::new(uk_govt()))
            .with_security(
                SecurityId::of("OG", "US_GOVT_10Y").unwrap(),
                SimpleLegalEntitySecurity::new(LegalEntityId::of("OG", "US_GOVT").unwrap()),
            )
    }

    fn builder() -> RepoBuilder {
        Repo::builder()
            .buy_sell(BuySell::Sell)
            .collateral(vec![SecurityPosition::of(gilt())])
            .currency(Currency::GBP)
            .notional(1.0e6)
            .start_date(Date::from_ymd(2017, 12, 16).unwrap())
            .end_date(Date::from_ymd(2018, 1, 16).unwrap())
            .day_count(DayCountConvention::Act360)
            .rate(0.01)
    }

    #[test]
    fn test_resolve() {
        let bda = BusinessDayAdjustment::new(BusinessDayConvention::Following, HolidayCalendar::weekends("GBLO"));
        let repo = builder().business_day_adjustment(bda).build().unwrap();
        let resolved = repo.resolve(&ref_data()).unwrap();
        // 2017-12-16 is a Saturday
        assert_eq!(resolved.start_date, Date::from_ymd(2017, 12, 18).unwrap());
        assert_eq!(resolved.end_date, Date::from_ymd(2018, 1, 16).unwrap());
        assert_relative_eq!(resolved.year_fraction, 29.0 / 360.0);
        assert_relative_eq!(resolved.notional, -1.0e6);
        assert_relative_eq!(resolved.interest(), -1.0e6 * 0.01 * 29.0 / 360.0);
        assert_eq!(resolved.legal_entity_id, uk_govt());
        assert_eq!(resolved.security_ids, vec![gilt()]);
    }

    #[test]
    fn test_collateral_must_share_issuer() {
        let repo = builder()
            .collateral(vec![
                SecurityPosition::of(gilt()),
                SecurityPosition::of(SecurityId::of("OG", "US_GOVT_10Y").unwrap()),
            ])
            .build()
            .unwrap();
        let err = repo.resolve(&ref_data()).unwrap_err();
        assert_eq!(err.to_string(), "Collateral must be based on the unique legal entity");
    }

    #[test]
    fn test_unknown_collateral() {
        let repo = builder()
            .collateral(vec![SecurityPosition::of(SecurityId::of("OG", "X").unwrap())])
            .build()
            .unwrap();
        assert!(matches!(repo.resolve(&ref_data()), Err(RepoError::SecurityNotFound { .. })));
    }

    #[test]
    fn test_validation() {
        assert!(matches!(
            builder().notional(-1.0).build(),
            Err(RepoError::InvalidSpec { .. })
        ));
        assert!(matches!(
            builder().end_date(Date::from_ymd(2017, 12, 16).unwrap()).build(),
            Err(RepoError::InvalidSpec { .. })
        ));
        assert_eq!(
            Repo::builder().build(),
            Err(RepoError::MissingField { field: "currency" })
        );
    }

    #[test]
    fn test_security_position() {
        let p = SecurityPosition::of_net(gilt(), -5.0);
        assert_eq!(p.long_quantity, 0.0);
        assert_eq!(p.short_quantity, 5.0);
        assert_eq!(p.net_quantity(), -5.0);
    }
}
