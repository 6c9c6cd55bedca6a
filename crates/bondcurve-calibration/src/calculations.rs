//! Measures of repo trades priced against a calibrated context.

use bondcurve_core::types::{CurrencyAmount, MultiCurrencyAmount};
use bondcurve_curves::provider::LegalEntityDiscountingProvider;
use bondcurve_curves::sensitivity::CurrencyParameterSensitivities;
use bondcurve_repo::pricing::DiscountingRepoTradePricer;
use bondcurve_repo::trade::ResolvedRepoTrade;

use crate::error::CalibrationResult;

/// Repo trade measures for one discounting context.
#[derive(Debug, Clone, Copy, Default)]
pub struct RepoMeasureCalculations {
    trade_pricer: DiscountingRepoTradePricer,
}

impl RepoMeasureCalculations {
    /// Calculations using the default trade pricer.
    pub const DEFAULT: Self = Self {
        trade_pricer: DiscountingRepoTradePricer::DEFAULT,
    };

    /// One basis point.
    pub const ONE_BASIS_POINT: f64 = 1e-4;

    /// Creates calculations around a trade pricer.
    #[must_use]
    pub fn new(trade_pricer: DiscountingRepoTradePricer) -> Self {
        Self { trade_pricer }
    }

    /// Present value.
    pub fn present_value(
        &self,
        trade: &ResolvedRepoTrade,
        provider: &LegalEntityDiscountingProvider,
    ) -> CalibrationResult<CurrencyAmount> {
        Ok(self.trade_pricer.present_value(trade, provider)?)
    }

    /// PV change for a 1bp shift of every calibrated parameter, summed per
    /// currency.
    pub fn pv01_calibrated_sum(
        &self,
        trade: &ResolvedRepoTrade,
        provider: &LegalEntityDiscountingProvider,
    ) -> CalibrationResult<MultiCurrencyAmount> {
        Ok(self.pv01_calibrated_bucketed(trade, provider)?.total())
    }

    /// PV change for a 1bp shift of each calibrated parameter.
    pub fn pv01_calibrated_bucketed(
        &self,
        trade: &ResolvedRepoTrade,
        provider: &LegalEntityDiscountingProvider,
    ) -> CalibrationResult<CurrencyParameterSensitivities> {
        let points = self.trade_pricer.present_value_sensitivity(trade, provider)?;
        let parameters = provider.parameter_sensitivity(&points)?;
        Ok(parameters.multiplied_by(Self::ONE_BASIS_POINT))
    }

    /// Par rate.
    pub fn par_rate(
        &self,
        trade: &ResolvedRepoTrade,
        provider: &LegalEntityDiscountingProvider,
    ) -> CalibrationResult<f64> {
        Ok(self.trade_pricer.par_rate(trade, provider)?)
    }

    /// Par spread.
    pub fn par_spread(
        &self,
        trade: &ResolvedRepoTrade,
        provider: &LegalEntityDiscountingProvider,
    ) -> CalibrationResult<f64> {
        Ok(self.trade_pricer.par_spread(trade, provider)?)
    }

    /// Currency exposure.
    pub fn currency_exposure(
        &self,
        trade: &ResolvedRepoTrade,
        provider: &LegalEntityDiscountingProvider,
    ) -> CalibrationResult<MultiCurrencyAmount> {
        Ok(self.trade_pricer.currency_exposure(trade, provider)?)
    }

    /// Cash settling on the valuation date.
    pub fn current_cash(
        &self,
        trade: &ResolvedRepoTrade,
        provider: &LegalEntityDiscountingProvider,
    ) -> CurrencyAmount {
        self.trade_pricer.current_cash(trade, provider)
    }
}
