//! Property tests for the closed-form engine.
//!
//! # Test Categories
//!
//! 1. **Put-call parity**: C - P = S·e^(-qT) - K·e^(-rT) for any valid contract
//! 2. **Greeks bounds**: delta ranges and non-negative gamma/vega
//! 3. **Degenerate inputs**: finite output everywhere on the boundary

use approx::assert_relative_eq;
use chrono::{TimeZone, Utc};
use pricer_core::contract::{Contract, OptionKind};
use pricer_models::analytical::{price_analytical, AnalyticalPricer};
use proptest::prelude::*;

fn build(
    kind: OptionKind,
    spot: f64,
    strike: f64,
    rate: f64,
    dividend: f64,
    vol: f64,
    years: f64,
) -> Contract {
    Contract::builder()
        .underlying("PROP")
        .kind(kind)
        .strike(strike)
        .spot(spot)
        .rate(rate)
        .dividend_yield(dividend)
        .volatility(vol)
        .valuation_time(Utc.with_ymd_and_hms(2025, 6, 2, 0, 0, 0).unwrap())
        .expiry_in_years(years)
        .build()
        .unwrap()
}

// ============================================================================
// Put-Call Parity
// ============================================================================

proptest! {
    #![proptest_config(ProptestConfig::with_cases(512))]

    #[test]
    fn prop_put_call_parity(
        spot in 1.0f64..500.0,
        strike in 1.0f64..500.0,
        rate in -0.02f64..0.15,
        dividend in 0.0f64..0.08,
        vol in 0.0f64..1.5,
        years in 0.0f64..5.0,
    ) {
        let call = build(OptionKind::Call, spot, strike, rate, dividend, vol, years);
        let put = build(OptionKind::Put, spot, strike, rate, dividend, vol, years);
        let t = call.time_to_expiration();

        // Parity holds for the closed form, not for the intrinsic branch
        prop_assume!(t >= 1.0 / 365.0);

        let lhs = price_analytical(&call) - price_analytical(&put);
        let rhs = spot * (-dividend * t).exp() - strike * (-rate * t).exp();
        let scale = spot.max(strike);
        prop_assert!(
            (lhs - rhs).abs() <= 1e-9 * scale,
            "lhs = {}, rhs = {}", lhs, rhs
        );
    }

    #[test]
    fn prop_greeks_bounds(
        spot in 1.0f64..500.0,
        strike in 1.0f64..500.0,
        rate in -0.02f64..0.15,
        vol in 0.0f64..1.5,
        years in 0.0f64..5.0,
    ) {
        let pricer = AnalyticalPricer::new();
        let call = pricer.greeks(&build(OptionKind::Call, spot, strike, rate, 0.0, vol, years));
        let put = pricer.greeks(&build(OptionKind::Put, spot, strike, rate, 0.0, vol, years));

        prop_assert!((0.0..=1.0).contains(&call.delta));
        prop_assert!((-1.0..=0.0).contains(&put.delta));
        prop_assert!(call.gamma >= 0.0 && put.gamma >= 0.0);
        prop_assert!(call.vega >= 0.0 && put.vega >= 0.0);
        prop_assert!(call.rho >= 0.0 && put.rho <= 0.0);
    }

    #[test]
    fn prop_price_within_no_arbitrage_bounds(
        spot in 1.0f64..500.0,
        strike in 1.0f64..500.0,
        vol in 0.0f64..1.5,
        years in 0.0f64..5.0,
    ) {
        let call = build(OptionKind::Call, spot, strike, 0.03, 0.0, vol, years);
        let price = price_analytical(&call);
        prop_assert!(price.is_finite());
        prop_assert!(price >= -1e-9);
        prop_assert!(price <= spot + 1e-9);
    }
}

// ============================================================================
// Concrete Scenarios
// ============================================================================

#[test]
fn test_concrete_scenario_call() {
    let c = build(OptionKind::Call, 195.0, 200.0, 0.05, 0.0, 0.25, 90.0 / 365.0);
    assert_relative_eq!(price_analytical(&c), 8.49, epsilon = 0.01);
}

#[test]
fn test_deep_moneyness_delta_limits() {
    let pricer = AnalyticalPricer::new();
    let deep_itm = pricer.greeks(&build(OptionKind::Call, 300.0, 100.0, 0.05, 0.0, 0.2, 0.5));
    let deep_otm = pricer.greeks(&build(OptionKind::Call, 30.0, 100.0, 0.05, 0.0, 0.2, 0.5));

    assert!(deep_itm.delta > 0.999);
    assert!(deep_otm.delta < 1e-6);
}

#[test]
fn test_zero_volatility_exact_forward_value() {
    let t = 0.75;
    let (spot, strike, rate, dividend) = (110.0, 100.0, 0.04, 0.02);
    let c = build(OptionKind::Call, spot, strike, rate, dividend, 0.0, t);

    let expected = (spot * (-dividend * t).exp() - strike * (-rate * t).exp()).max(0.0);
    assert_eq!(price_analytical(&c), expected);

    let g = AnalyticalPricer::new().greeks(&c);
    assert_eq!(g.gamma, 0.0);
    assert_eq!(g.vega, 0.0);
}

#[test]
fn test_below_threshold_delta_is_indicator() {
    let pricer = AnalyticalPricer::new();
    let t = 0.9 / 365.0;

    let itm_call = pricer.greeks(&build(OptionKind::Call, 101.0, 100.0, 0.05, 0.0, 0.4, t));
    let otm_call = pricer.greeks(&build(OptionKind::Call, 99.0, 100.0, 0.05, 0.0, 0.4, t));
    let itm_put = pricer.greeks(&build(OptionKind::Put, 99.0, 100.0, 0.05, 0.0, 0.4, t));

    assert_eq!(itm_call.delta, 1.0);
    assert_eq!(otm_call.delta, 0.0);
    assert_eq!(itm_put.delta, -1.0);
}
