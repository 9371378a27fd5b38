//! Integration tests for module exports.
//!
//! Verify that public modules and types are reachable via absolute paths and
//! via the crate-root re-exports.

use chrono::{Duration, TimeZone, Utc};
use proptest::prelude::*;

/// Contract model is reachable from both the module and the crate root.
#[test]
fn test_contract_module_exports() {
    use pricer_core::contract::ContractBuilder;
    use pricer_core::{Contract, OptionKind};

    let builder: ContractBuilder = Contract::builder();
    let contract = builder
        .kind(OptionKind::Call)
        .strike(100.0)
        .spot(100.0)
        .volatility(0.2)
        .expiry_in_years(1.0)
        .build()
        .unwrap();

    assert_eq!(contract.kind(), OptionKind::Call);
}

/// Trait module is accessible via absolute path.
#[test]
fn test_traits_module_exports() {
    use pricer_core::traits::priceable::PricingFunction;
    use pricer_core::traits::Float;
    use pricer_core::types::error::PricingError;
    use pricer_core::Contract;

    struct Spot;

    impl PricingFunction for Spot {
        fn price(&self, contract: &Contract) -> Result<f64, PricingError> {
            Ok(contract.spot())
        }
    }

    let contract = Contract::builder()
        .kind(pricer_core::OptionKind::Put)
        .strike(50.0)
        .spot(55.0)
        .volatility(0.3)
        .expiry_in_years(0.25)
        .build()
        .unwrap();
    assert_eq!(Spot.price(&contract).unwrap(), 55.0);

    fn generic_sqrt<T: Float>(x: T) -> T {
        x.sqrt()
    }
    assert_eq!(generic_sqrt(4.0_f64), 2.0);
}

/// Types module is accessible via absolute path.
#[test]
fn test_types_module_exports() {
    use pricer_core::types::time::{year_fraction, DEFAULT_MIN_TIME_TO_EXPIRY};
    use pricer_core::types::{PricingError, SolverError, ValidationError};

    let start = Utc.with_ymd_and_hms(2025, 1, 1, 0, 0, 0).unwrap();
    let end = start + Duration::days(365);
    assert!((year_fraction(start, end) - 1.0).abs() < 1e-12);
    assert!(DEFAULT_MIN_TIME_TO_EXPIRY > 0.0);

    let _: PricingError = ValidationError::InvalidSpot { spot: -1.0 }.into();
    let _ = SolverError::MaxIterationsExceeded { iterations: 1 };
}

/// Solvers are accessible via absolute path.
#[test]
fn test_math_module_exports() {
    use pricer_core::math::solvers::{BrentSolver, SolverConfig};

    let solver = BrentSolver::new(SolverConfig::default());
    let root = solver.find_root(|x| x - 0.25, 0.0, 1.0).unwrap();
    assert!((root - 0.25).abs() < 1e-9);
}

proptest! {
    /// Any finite positive strike/spot and non-negative vol builds, and the
    /// derived time to expiration matches the requested span.
    #[test]
    fn prop_valid_contracts_build(
        strike in 0.01f64..10_000.0,
        spot in 0.01f64..10_000.0,
        vol in 0.0f64..3.0,
        rate in -0.05f64..0.2,
        years in 0.0f64..30.0,
    ) {
        let valuation = Utc.with_ymd_and_hms(2025, 1, 1, 0, 0, 0).unwrap();
        let contract = pricer_core::Contract::builder()
            .kind(pricer_core::OptionKind::Call)
            .strike(strike)
            .spot(spot)
            .volatility(vol)
            .rate(rate)
            .valuation_time(valuation)
            .expiry_in_years(years)
            .build()
            .unwrap();

        prop_assert!((contract.time_to_expiration() - years).abs() < 1e-9);
        prop_assert!(contract.intrinsic_value() >= 0.0);
    }

    /// Non-positive strikes are always rejected, never clamped.
    #[test]
    fn prop_non_positive_strike_rejected(strike in -1_000.0f64..=0.0) {
        let result = pricer_core::Contract::builder()
            .kind(pricer_core::OptionKind::Put)
            .strike(strike)
            .spot(100.0)
            .volatility(0.2)
            .expiry_in_years(1.0)
            .build();

        let is_invalid_strike = matches!(
            result,
            Err(pricer_core::ValidationError::InvalidStrike { .. })
        );
        prop_assert!(is_invalid_strike);
    }
}
