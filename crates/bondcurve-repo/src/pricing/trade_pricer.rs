use bondcurve_core::types::{CurrencyAmount, MultiCurrencyAmount};
use bondcurve_curves::provider::LegalEntityDiscountingProvider;
use bondcurve_curves::sensitivity::PointSensitivities;

use super::DiscountingRepoProductPricer;
use crate::error::RepoResult;
use crate::trade::ResolvedRepoTrade;

/// Prices a resolved repo trade by delegating to the product pricer.
#[derive(Debug, Clone, Copy, Default)]
pub struct DiscountingRepoTradePricer {
    product_pricer: DiscountingRepoProductPricer,
}

impl DiscountingRepoTradePricer {
    /// The default pricer.
    pub const DEFAULT: Self = Self {
        product_pricer: DiscountingRepoProductPricer::DEFAULT,
    };

    /// Creates a pricer around a product pricer.
    #[must_use]
    pub fn new(product_pricer: DiscountingRepoProductPricer) -> Self {
        Self { product_pricer }
    }

    /// The product pricer.
    #[must_use]
    pub fn product_pricer(&self) -> &DiscountingRepoProductPricer {
        &self.product_pricer
    }

    /// Present value of the trade.
    pub fn present_value(
        &self,
        trade: &ResolvedRepoTrade,
        provider: &LegalEntityDiscountingProvider,
    ) -> RepoResult<CurrencyAmount> {
        self.product_pricer.present_value(&trade.product, provider)
    }

    /// Present value sensitivity of the trade.
    pub fn present_value_sensitivity(
        &self,
        trade: &ResolvedRepoTrade,
        provider: &LegalEntityDiscountingProvider,
    ) -> RepoResult<PointSensitivities> {
        self.product_pricer
            .present_value_sensitivity(&trade.product, provider)
    }

    /// Par rate of the trade.
    pub fn par_rate(
        &self,
        trade: &ResolvedRepoTrade,
        provider: &LegalEntityDiscountingProvider,
    ) -> RepoResult<f64> {
        self.product_pricer.par_rate(&trade.product, provider)
    }

    /// Par rate sensitivity of the trade.
    pub fn par_rate_sensitivity(
        &self,
        trade: &ResolvedRepoTrade,
        provider: &LegalEntityDiscountingProvider,
    ) -> RepoResult<PointSensitivities> {
        self.product_pricer.par_rate_sensitivity(&trade.product, provider)
    }

    /// Par spread of the trade.
    pub fn par_spread(
        &self,
        trade: &ResolvedRepoTrade,
        provider: &LegalEntityDiscountingProvider,
    ) -> RepoResult<f64> {
        self.product_pricer.par_spread(&trade.product, provider)
    }

    /// Par spread sensitivity of the trade.
    pub fn par_spread_sensitivity(
        &self,
        trade: &ResolvedRepoTrade,
        provider: &LegalEntityDiscountingProvider,
    ) -> RepoResult<PointSensitivities> {
        self.product_pricer
            .par_spread_sensitivity(&trade.product, provider)
    }

    /// Currency exposure, equal to the present value.
    pub fn currency_exposure(
        &self,
        trade: &ResolvedRepoTrade,
        provider: &LegalEntityDiscountingProvider,
    ) -> RepoResult<MultiCurrencyAmount> {
        Ok(self.present_value(trade, provider)?.into())
    }

    /// Cash flowing on the valuation date.
    ///
    /// The buyer pays the notional on the start date and receives notional
    /// plus interest on the end date.
    pub fn current_cash(
        &self,
        trade: &ResolvedRepoTrade,
        provider: &LegalEntityDiscountingProvider,
    ) -> CurrencyAmount {
        let product = &trade.product;
        let valuation_date = provider.valuation_date();
        if product.start_date == valuation_date {
            CurrencyAmount::new(product.currency, -product.notional)
        } else if product.end_date == valuation_date {
            CurrencyAmount::new(product.currency, product.notional + product.interest())
        } else {
            CurrencyAmount::zero(product.currency)
        }
    }
}
