//! Monte Carlo against the closed form.
//!
//! # Test Categories
//!
//! 1. **Concrete scenario**: the 90-day call prices to 8.4926 both ways
//! 2. **Convergence**: standard error shrinks by √10 per tenfold paths, and
//!    so does the average error against the closed form
//! 3. **Numerical Greeks**: simulated sensitivities with common random numbers

use approx::assert_abs_diff_eq;
use chrono::{TimeZone, Utc};
use pricer_core::contract::{Contract, OptionKind};
use pricer_models::analytical::price_analytical;
use pricer_pricing::compare::compare_methods;
use pricer_pricing::greeks::{greeks_analytical, greeks_numerical};
use pricer_pricing::mc::{MonteCarloPricer, SimulationConfig};

fn scenario(kind: OptionKind) -> Contract {
    Contract::builder()
        .underlying("SCN")
        .kind(kind)
        .strike(200.0)
        .spot(195.0)
        .rate(0.05)
        .volatility(0.25)
        .valuation_time(Utc.with_ymd_and_hms(2025, 1, 2, 0, 0, 0).unwrap())
        .expiry_in_years(90.0 / 365.0)
        .build()
        .unwrap()
}

fn engine(n_paths: usize, n_steps: usize, seed: u64) -> MonteCarloPricer {
    MonteCarloPricer::new(
        SimulationConfig::builder()
            .n_paths(n_paths)
            .n_steps(n_steps)
            .seed(seed)
            .build()
            .unwrap(),
    )
}

// ============================================================================
// Concrete Scenario
// ============================================================================

#[test]
fn test_concrete_scenario_analytical() {
    assert_abs_diff_eq!(price_analytical(&scenario(OptionKind::Call)), 8.4926, epsilon = 1e-3);
}

#[test]
fn test_concrete_scenario_simulation() {
    let result = engine(100_000, 252, 42)
        .simulate(&scenario(OptionKind::Call))
        .unwrap();

    assert!(result.std_error <= 0.05, "std_error = {}", result.std_error);
    assert!(
        (result.price - 8.4926).abs() <= 0.10,
        "price = {} ± {}",
        result.price,
        result.std_error
    );
}

#[test]
fn test_compare_methods_put() {
    let cmp = compare_methods(&scenario(OptionKind::Put), 50_000, Some(2024)).unwrap();
    assert!(cmp.simulation.std_error > 0.0);
    assert!(
        cmp.difference.abs() <= 4.0 * cmp.simulation.std_error,
        "difference {} with std_error {}",
        cmp.difference,
        cmp.simulation.std_error
    );
}

// ============================================================================
// Convergence
// ============================================================================

#[test]
fn test_standard_error_scales_with_root_paths() {
    let contract = scenario(OptionKind::Call);
    let analytical = price_analytical(&contract);

    let results: Vec<_> = [1_000, 10_000, 100_000]
        .into_iter()
        .map(|n| engine(n, 12, 7).simulate(&contract).unwrap())
        .collect();

    for pair in results.windows(2) {
        let ratio = pair[0].std_error / pair[1].std_error;
        assert!(
            (2.5..4.0).contains(&ratio),
            "std error ratio {} not near √10",
            ratio
        );
    }

    let finest = &results[2];
    assert!((finest.price - analytical).abs() <= 4.0 * finest.std_error);
}

#[test]
fn test_error_against_closed_form_shrinks_with_paths() {
    let contract = scenario(OptionKind::Call);
    let analytical = price_analytical(&contract);
    let seeds = 1..=16_u64;

    let mean_errors: Vec<f64> = [1_000, 10_000, 100_000]
        .into_iter()
        .map(|n_paths| {
            let total: f64 = seeds
                .clone()
                .map(|seed| {
                    let result = engine(n_paths, 12, seed).simulate(&contract).unwrap();
                    let error = (result.price - analytical).abs();
                    assert!(
                        error <= 5.0 * result.std_error,
                        "{} paths, seed {}: error {} with std_error {}",
                        n_paths,
                        seed,
                        error,
                        result.std_error
                    );
                    error
                })
                .sum();
            total / seeds.clone().count() as f64
        })
        .collect();

    for pair in mean_errors.windows(2) {
        assert!(
            pair[1] < pair[0],
            "mean absolute error did not shrink: {:?}",
            mean_errors
        );
    }
}

// ============================================================================
// Numerical Greeks on the Simulation Engine
// ============================================================================

#[test]
fn test_simulated_greeks_track_closed_form() {
    let contract = Contract::builder()
        .kind(OptionKind::Call)
        .strike(100.0)
        .spot(100.0)
        .rate(0.05)
        .volatility(0.2)
        .valuation_time(Utc.with_ymd_and_hms(2025, 1, 2, 0, 0, 0).unwrap())
        .expiry_in_years(1.0)
        .build()
        .unwrap();

    let simulated = greeks_numerical(&engine(50_000, 20, 99), &contract, None).unwrap();
    let exact = greeks_analytical(&contract);

    assert_abs_diff_eq!(simulated.delta, exact.delta, epsilon = 0.02);
    assert_abs_diff_eq!(simulated.vega, exact.vega, epsilon = 1.5);
    assert_abs_diff_eq!(simulated.rho, exact.rho, epsilon = 2.0);
    assert_abs_diff_eq!(simulated.theta, exact.theta, epsilon = 0.5);
    assert!(simulated.gamma.is_finite());
}
