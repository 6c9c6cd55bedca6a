//! End-to-end calibration of UK and US government repo curves.

use approx::assert_abs_diff_eq;
use bondcurve_calibration::prelude::*;
use bondcurve_core::prelude::*;
use bondcurve_curves::prelude::*;
use bondcurve_math::solvers::NewtonVectorRootFinder;
use bondcurve_repo::prelude::*;

const TOLERANCE_PV: f64 = 1.0e-12;
const TOLERANCE_JACOBIAN: f64 = 1.0e-4;
const TOLERANCE_PV_SENSITIVITY: f64 = 1.0e-5;
const BUMP: f64 = 1.0e-7;

const UK_QUOTES: [(Tenor, f64); 3] = [
    (Tenor::Weeks(1), 0.00565),
    (Tenor::Months(1), 0.0059),
    (Tenor::Months(3), 0.00605),
];

const US_QUOTES: [(Tenor, f64); 4] = [
    (Tenor::Weeks(1), 0.0142),
    (Tenor::Weeks(2), 0.0131),
    (Tenor::Months(1), 0.0125),
    (Tenor::Months(3), 0.0124),
];

fn init_tracing() {
    let _ = tracing_subscriber::fmt()
        .with_env_filter(tracing_subscriber::EnvFilter::from_default_env())
        .with_test_writer()
        .try_init();
}

fn val_date() -> Date {
    Date::from_ymd(2017, 12, 11).unwrap()
}

fn uk_govt() -> LegalEntityId {
    LegalEntityId::of("OG", "UK_GOVT").unwrap()
}

fn us_govt() -> LegalEntityId {
    LegalEntityId::of("OG", "US_GOVT").unwrap()
}

fn gilt() -> SecurityId {
    SecurityId::of("OG", "UK_GOVT_10Y").unwrap()
}

fn treasury() -> SecurityId {
    SecurityId::of("OG", "US_GOVT_10Y").unwrap()
}

fn ref_data() -> ReferenceData {
    ReferenceData::empty()
        .with_security(gilt(), SimpleLegalEntitySecurity::new(uk_govt()))
        .with_security(treasury(), SimpleLegalEntitySecurity::new(us_govt()))
}

fn quote_id(curve: &str, tenor: Tenor) -> QuoteId {
    QuoteId::of("OG", format!("{curve}_{tenor}")).unwrap()
}

fn market_data() -> MarketData {
    let uk = UK_QUOTES.iter().map(|(t, r)| (quote_id("UK_REPO", *t), *r));
    let us = US_QUOTES.iter().map(|(t, r)| (quote_id("US_REPO", *t), *r));
    uk.chain(us)
        .fold(MarketData::empty(val_date()), |md, (id, rate)| md.with_value(id, rate))
}

fn curve_definition(
    curve: &str,
    quotes: &[(Tenor, f64)],
    collateral: SecurityId,
    convention: &RepoConvention,
) -> InterpolatedNodalCurveDefinition {
    let nodes = quotes
        .iter()
        .map(|(tenor, _)| {
            let template = RepoTemplate::of(*tenor, vec![SecurityPosition::of(collateral.clone())], convention.clone());
            RepoCurveNode::of(template, quote_id(curve, *tenor))
        })
        .collect();
    InterpolatedNodalCurveDefinition::new(CurveName::of(curve), DayCountConvention::Act365Fixed, nodes)
}

fn uk_definition() -> InterpolatedNodalCurveDefinition {
    let convention = RepoConvention::gbp_repo(HolidayCalendar::weekends("GBLO"));
    curve_definition("UK_REPO", &UK_QUOTES, gilt(), &convention)
}

fn us_definition() -> InterpolatedNodalCurveDefinition {
    let convention = RepoConvention::usd_repo(HolidayCalendar::weekends("USNY"));
    curve_definition("US_REPO", &US_QUOTES, treasury(), &convention)
}

fn uk_entry() -> RepoCurveEntry {
    RepoCurveEntry::of(CurveName::of("UK_REPO"), [(RepoGroup::of("UK_GROUP"), Currency::GBP)])
}

fn us_entry() -> RepoCurveEntry {
    RepoCurveEntry::of(CurveName::of("US_REPO"), [(RepoGroup::of("US_GROUP"), Currency::USD)])
}

fn uk_group() -> LegalEntityDiscountingCurveGroupDefinition {
    LegalEntityDiscountingCurveGroupDefinition::builder(CurveGroupName::of("UK"))
        .repo_curve_group(uk_govt(), RepoGroup::of("UK_GROUP"))
        .repo_curve_entry(uk_entry())
        .curve_definition(uk_definition())
        .compute_pv_sensitivity_to_market_quote(true)
        .build()
        .unwrap()
}

fn us_group() -> LegalEntityDiscountingCurveGroupDefinition {
    LegalEntityDiscountingCurveGroupDefinition::builder(CurveGroupName::of("US"))
        .repo_curve_group(us_govt(), RepoGroup::of("US_GROUP"))
        .repo_curve_entry(us_entry())
        .curve_definition(us_definition())
        .compute_pv_sensitivity_to_market_quote(true)
        .build()
        .unwrap()
}

fn combined_group() -> LegalEntityDiscountingCurveGroupDefinition {
    LegalEntityDiscountingCurveGroupDefinition::builder(CurveGroupName::of("UK_US"))
        .repo_curve_group(uk_govt(), RepoGroup::of("UK_GROUP"))
        .repo_curve_group(us_govt(), RepoGroup::of("US_GROUP"))
        .repo_curve_entry(uk_entry())
        .repo_curve_entry(us_entry())
        .curve_definition(uk_definition())
        .curve_definition(us_definition())
        .compute_pv_sensitivity_to_market_quote(true)
        .build()
        .unwrap()
}

fn assert_nodes_at_par(
    group: &LegalEntityDiscountingCurveGroupDefinition,
    market_data: &MarketData,
    provider: &LegalEntityDiscountingProvider,
) {
    let calcs = RepoMeasureCalculations::DEFAULT;
    for trade in group.resolved_trades(market_data, &ref_data()).unwrap() {
        let CalibrationTrade::Repo(trade) = trade;
        let pv = calcs.present_value(&trade, provider).unwrap();
        assert_abs_diff_eq!(pv.amount, 0.0, epsilon = TOLERANCE_PV);
    }
}

#[test]
fn test_calibrate_single_group() {
    init_tracing();
    let md = market_data();
    let group = combined_group();
    let provider = LegalEntityDiscountingCurveCalibrator::standard()
        .calibrate(&group, &md, &ref_data())
        .unwrap();

    assert_nodes_at_par(&group, &md, &provider);
    assert_eq!(provider.curves().len(), 2);

    // the two curves do not depend on each other's quotes
    let uk = provider.find_curve(&CurveName::of("UK_REPO")).unwrap();
    let jacobian = uk.metadata().jacobian().unwrap();
    assert_eq!(jacobian.matrix().shape(), (3, 7));
    for row in 0..3 {
        for col in 3..7 {
            assert_abs_diff_eq!(jacobian.matrix()[(row, col)], 0.0, epsilon = 1e-14);
        }
    }
}

#[test]
fn test_calibrate_groups_in_sequence() {
    init_tracing();
    let md = market_data();
    let calibrator = LegalEntityDiscountingCurveCalibrator::standard();
    let known = LegalEntityDiscountingProvider::empty(val_date());
    let provider = calibrator
        .calibrate_groups(&[uk_group(), us_group()], &known, &md, &ref_data())
        .unwrap();

    assert_nodes_at_par(&uk_group(), &md, &provider);
    assert_nodes_at_par(&us_group(), &md, &provider);

    // the second group's Jacobian covers only its own quotes
    let us = provider.find_curve(&CurveName::of("US_REPO")).unwrap();
    let jacobian = us.metadata().jacobian().unwrap();
    assert_eq!(jacobian.curve_order().len(), 1);
    assert_eq!(jacobian.matrix().shape(), (4, 4));

    // calibrating together gives the same curves
    let together = calibrator.calibrate(&combined_group(), &md, &ref_data()).unwrap();
    for name in ["UK_REPO", "US_REPO"] {
        let a = provider.find_curve(&CurveName::of(name)).unwrap().parameters();
        let b = together.find_curve(&CurveName::of(name)).unwrap().parameters();
        for (x, y) in a.iter().zip(&b) {
            assert_abs_diff_eq!(*x, *y, epsilon = 1e-10);
        }
    }
}

#[test]
fn test_jacobian_matches_recalibration() {
    let md = market_data();
    let group = uk_group();
    let calibrator = LegalEntityDiscountingCurveCalibrator::standard();
    let provider = calibrator.calibrate(&group, &md, &ref_data()).unwrap();
    let curve = provider.find_curve(&CurveName::of("UK_REPO")).unwrap();
    let jacobian = curve.metadata().jacobian().unwrap().matrix().clone();

    for (j, (tenor, rate)) in UK_QUOTES.iter().enumerate() {
        let id = quote_id("UK_REPO", *tenor);
        let up = calibrator
            .calibrate(&group, &md.clone().with_value(id.clone(), rate + BUMP), &ref_data())
            .unwrap();
        let down = calibrator
            .calibrate(&group, &md.clone().with_value(id, rate - BUMP), &ref_data())
            .unwrap();
        let up = up.find_curve(&CurveName::of("UK_REPO")).unwrap().parameters();
        let down = down.find_curve(&CurveName::of("UK_REPO")).unwrap().parameters();
        for i in 0..UK_QUOTES.len() {
            let fd = (up[i] - down[i]) / (2.0 * BUMP);
            assert_abs_diff_eq!(jacobian[(i, j)], fd, epsilon = TOLERANCE_JACOBIAN);
        }
    }
}

#[test]
fn test_pv_sensitivity_matches_recalibration() {
    let md = market_data();
    let group = us_group();
    let calibrator = LegalEntityDiscountingCurveCalibrator::standard();
    let provider = calibrator.calibrate(&group, &md, &ref_data()).unwrap();
    let curve = provider.find_curve(&CurveName::of("US_REPO")).unwrap();
    let sensitivities = curve.metadata().pv_sensitivity_to_market_quote().unwrap().to_vec();
    assert_eq!(sensitivities.len(), US_QUOTES.len());

    let calcs = RepoMeasureCalculations::DEFAULT;
    let trades = group.resolved_trades(&md, &ref_data()).unwrap();
    for (i, (tenor, rate)) in US_QUOTES.iter().enumerate() {
        let CalibrationTrade::Repo(trade) = &trades[i];
        let id = quote_id("US_REPO", *tenor);
        let up = calibrator
            .calibrate(&group, &md.clone().with_value(id.clone(), rate + BUMP), &ref_data())
            .unwrap();
        let down = calibrator
            .calibrate(&group, &md.clone().with_value(id, rate - BUMP), &ref_data())
            .unwrap();
        let fd = (calcs.present_value(trade, &up).unwrap().amount - calcs.present_value(trade, &down).unwrap().amount)
            / (2.0 * BUMP);
        assert_abs_diff_eq!(sensitivities[i], fd, epsilon = TOLERANCE_PV_SENSITIVITY);
        // a higher quote raises the curve and lowers the value of lending
        assert!(sensitivities[i] < 0.0);
    }
}

#[test]
fn test_quote_space_measures_need_a_jacobian() {
    let calibrator = LegalEntityDiscountingCurveCalibrator::of(
        NewtonVectorRootFinder::default(),
        CalibrationMeasures::present_value(),
        CalibrationMeasures::present_value(),
    );
    assert!(!calibrator.measures().supports_calibration());
    let err = calibrator
        .calibrate(&uk_group(), &market_data(), &ref_data())
        .unwrap_err();
    assert!(matches!(
        err,
        CalibrationError::Curve(CurveError::MissingJacobian { .. })
    ));
}

#[test]
fn test_unsupported_trade_type() {
    let empty = CalibrationMeasures::of("Empty", Vec::<CalibrationMeasure>::new()).unwrap();
    let calibrator = LegalEntityDiscountingCurveCalibrator::of(
        NewtonVectorRootFinder::default(),
        empty,
        CalibrationMeasures::present_value(),
    );
    let err = calibrator
        .calibrate(&uk_group(), &market_data(), &ref_data())
        .unwrap_err();
    assert_eq!(err, CalibrationError::unsupported_trade_type("RepoTrade"));
    assert_eq!(
        err.to_string(),
        "Trade type 'RepoTrade' is not supported for calibration"
    );
}

#[test]
fn test_missing_curve_for_collateral_issuer() {
    // US collateral in a group that only knows the UK issuer
    let convention = RepoConvention::usd_repo(HolidayCalendar::weekends("USNY"));
    let group = LegalEntityDiscountingCurveGroupDefinition::builder(CurveGroupName::of("BROKEN"))
        .repo_curve_group(uk_govt(), RepoGroup::of("UK_GROUP"))
        .repo_curve_entry(RepoCurveEntry::of(
            CurveName::of("US_REPO"),
            [(RepoGroup::of("UK_GROUP"), Currency::USD)],
        ))
        .curve_definition(curve_definition("US_REPO", &US_QUOTES, treasury(), &convention))
        .build()
        .unwrap();
    let err = LegalEntityDiscountingCurveCalibrator::standard()
        .calibrate(&group, &market_data(), &ref_data())
        .unwrap_err();
    assert!(matches!(
        err,
        CalibrationError::Repo(_) | CalibrationError::Curve(_)
    ));
}
