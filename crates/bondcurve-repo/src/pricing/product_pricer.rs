use bondcurve_core::types::CurrencyAmount;
use bondcurve_curves::discount_factors::GroupDiscountFactors;
use bondcurve_curves::provider::LegalEntityDiscountingProvider;
use bondcurve_curves::sensitivity::PointSensitivities;

use crate::error::RepoResult;
use crate::product::ResolvedRepo;

/// Prices a resolved repo product by discounting.
#[derive(Debug, Clone, Copy, Default)]
pub struct DiscountingRepoProductPricer;

impl DiscountingRepoProductPricer {
    /// The default pricer.
    pub const DEFAULT: Self = Self;

    fn discount_factors(
        product: &ResolvedRepo,
        provider: &LegalEntityDiscountingProvider,
    ) -> RepoResult<GroupDiscountFactors> {
        Ok(provider.repo_curve_discount_factors(&product.legal_entity_id, product.currency)?)
    }

    fn initial_amount(product: &ResolvedRepo, provider: &LegalEntityDiscountingProvider) -> f64 {
        if provider.valuation_date() > product.start_date {
            0.0
        } else {
            product.notional
        }
    }

    /// Present value of the product.
    pub fn present_value(
        &self,
        product: &ResolvedRepo,
        provider: &LegalEntityDiscountingProvider,
    ) -> RepoResult<CurrencyAmount> {
        if provider.valuation_date() > product.end_date {
            return Ok(CurrencyAmount::zero(product.currency));
        }
        let dfs = Self::discount_factors(product, provider)?;
        let df_start = dfs.discount_factor(product.start_date);
        let df_end = dfs.discount_factor(product.end_date);
        let pv_start = Self::initial_amount(product, provider) * df_start;
        let pv_end = (product.notional + product.interest()) * df_end;
        Ok(CurrencyAmount::new(product.currency, pv_end - pv_start))
    }

    /// Sensitivity of the present value to the zero rates of the repo curve.
    ///
    /// Empty once the valuation date is after the end date.
    pub fn present_value_sensitivity(
        &self,
        product: &ResolvedRepo,
        provider: &LegalEntityDiscountingProvider,
    ) -> RepoResult<PointSensitivities> {
        if provider.valuation_date() > product.end_date {
            return Ok(PointSensitivities::empty());
        }
        // backward sweep
        let df_end_bar = product.notional + product.interest();
        let df_start_bar = -Self::initial_amount(product, provider);
        let dfs = Self::discount_factors(product, provider)?;
        let start = dfs
            .zero_rate_point_sensitivity(product.start_date)
            .multiplied_by(df_start_bar);
        let end = dfs
            .zero_rate_point_sensitivity(product.end_date)
            .multiplied_by(df_end_bar);
        Ok(PointSensitivities::of(vec![start, end]))
    }

    /// Rate at which the present value is zero.
    pub fn par_rate(
        &self,
        product: &ResolvedRepo,
        provider: &LegalEntityDiscountingProvider,
    ) -> RepoResult<f64> {
        let dfs = Self::discount_factors(product, provider)?;
        let df_start = dfs.discount_factor(product.start_date);
        let df_end = dfs.discount_factor(product.end_date);
        Ok((df_start / df_end - 1.0) / product.year_fraction)
    }

    /// Sensitivity of the par rate; equal to the par spread sensitivity.
    pub fn par_rate_sensitivity(
        &self,
        product: &ResolvedRepo,
        provider: &LegalEntityDiscountingProvider,
    ) -> RepoResult<PointSensitivities> {
        self.par_spread_sensitivity(product, provider)
    }

    /// Par rate minus the contract rate.
    pub fn par_spread(
        &self,
        product: &ResolvedRepo,
        provider: &LegalEntityDiscountingProvider,
    ) -> RepoResult<f64> {
        Ok(self.par_rate(product, provider)? - product.rate)
    }

    /// Sensitivity of the par spread to the zero rates of the repo curve.
    pub fn par_spread_sensitivity(
        &self,
        product: &ResolvedRepo,
        provider: &LegalEntityDiscountingProvider,
    ) -> RepoResult<PointSensitivities> {
        let accrual_inv = 1.0 / product.year_fraction;
        let dfs = Self::discount_factors(product, provider)?;
        let df_start = dfs.discount_factor(product.start_date);
        let df_end_inv = 1.0 / dfs.discount_factor(product.end_date);
        let start = dfs
            .zero_rate_point_sensitivity(product.start_date)
            .multiplied_by(df_end_inv * accrual_inv);
        let end = dfs
            .zero_rate_point_sensitivity(product.end_date)
            .multiplied_by(-df_start * df_end_inv * df_end_inv * accrual_inv);
        Ok(PointSensitivities::of(vec![start, end]))
    }
}
