//! End-to-end repo pricing: convention, resolution and discounting.

use std::sync::Arc;

use approx::assert_relative_eq;
use bondcurve_core::prelude::*;
use bondcurve_curves::prelude::*;
use bondcurve_repo::prelude::*;

fn val_date() -> Date {
    Date::from_ymd(2017, 12, 11).unwrap()
}

fn uk_govt() -> LegalEntityId {
    LegalEntityId::of("OG", "UK_GOVT").unwrap()
}

fn gilt() -> SecurityId {
    SecurityId::of("OG", "UK_GOVT_10Y").unwrap()
}

fn ref_data() -> ReferenceData {
    ReferenceData::empty().with_security(gilt(), SimpleLegalEntitySecurity::new(uk_govt()))
}

fn provider(valuation_date: Date) -> LegalEntityDiscountingProvider {
    let md = CurveMetadata::zero_rates(CurveName::of("UK_REPO"), DayCountConvention::Act365Fixed);
    let curve = InterpolatedNodalCurve::new(md, vec![0.02, 0.1, 0.25], vec![0.0056, 0.0059, 0.0061]).unwrap();
    let dfs = ZeroRateDiscountFactors::new(Currency::GBP, valuation_date, Arc::new(curve)).unwrap();
    LegalEntityDiscountingProvider::builder(valuation_date)
        .repo_curve_group(uk_govt(), RepoGroup::of("UK_GROUP"))
        .repo_curve(RepoGroup::of("UK_GROUP"), Currency::GBP, dfs)
        .build()
        .unwrap()
}

fn trade(buy_sell: BuySell, notional: f64) -> ResolvedRepoTrade {
    let convention = RepoConvention::gbp_repo(HolidayCalendar::weekends("GBLO"));
    convention
        .create_trade(val_date(), Tenor::months(2), vec![SecurityPosition::of(gilt())], buy_sell, notional, -0.005)
        .unwrap()
        .resolve(&ref_data())
        .unwrap()
}

#[test]
fn test_buy_and_sell_are_opposite() {
    let p = provider(val_date());
    let pricer = DiscountingRepoTradePricer::DEFAULT;
    let buy = pricer.present_value(&trade(BuySell::Buy, 5.0e7), &p).unwrap();
    let sell = pricer.present_value(&trade(BuySell::Sell, 5.0e7), &p).unwrap();
    assert_relative_eq!(buy.amount, -sell.amount, epsilon = 1e-6);
    // lending at a rate below the curve loses money
    assert!(buy.amount < 0.0);
}

#[test]
fn test_currency_exposure_equals_pv() {
    let p = provider(val_date());
    let pricer = DiscountingRepoTradePricer::DEFAULT;
    let t = trade(BuySell::Sell, 5.0e7);
    let pv = pricer.present_value(&t, &p).unwrap();
    let ce = pricer.currency_exposure(&t, &p).unwrap();
    assert_eq!(ce.len(), 1);
    assert_relative_eq!(ce.amount(Currency::GBP), pv.amount);
}

#[test]
fn test_current_cash() {
    let pricer = DiscountingRepoTradePricer::DEFAULT;
    let t = trade(BuySell::Buy, 1.0e7);
    let product = &t.product;

    let on_start = pricer.current_cash(&t, &provider(product.start_date));
    assert_relative_eq!(on_start.amount, -1.0e7);

    let on_end = pricer.current_cash(&t, &provider(product.end_date));
    assert_relative_eq!(on_end.amount, 1.0e7 + product.interest());

    let between = pricer.current_cash(&t, &provider(product.start_date.add_days(1)));
    assert_eq!(between.amount, 0.0);
    assert_eq!(between.currency, Currency::GBP);
}

#[test]
fn test_market_quote_sensitivity_requires_jacobian() {
    let p = provider(val_date());
    let pricer = DiscountingRepoTradePricer::DEFAULT;
    let t = trade(BuySell::Buy, 1.0e7);
    let point = pricer.present_value_sensitivity(&t, &p).unwrap();
    let param = p.parameter_sensitivity(&point).unwrap();
    assert_eq!(param.len(), 1);
    let err = MarketQuoteSensitivityCalculator::DEFAULT
        .sensitivity(&param, &p)
        .unwrap_err();
    assert!(matches!(err, CurveError::MissingJacobian { .. }));
}
