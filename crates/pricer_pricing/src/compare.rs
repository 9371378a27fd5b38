//! Side-by-side analytical and simulated prices for European options.

use pricer_core::contract::Contract;
use pricer_models::analytical::price_analytical;
use tracing::info;

use crate::mc::{MonteCarloPricer, SimulationArgumentError, SimulationConfig, SimulationResult};

/// Analytical price against a Monte Carlo estimate of the same contract.
#[derive(Clone, Debug, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize))]
pub struct MethodComparison {
    /// Closed-form price.
    pub analytical: f64,
    /// Simulation estimate.
    pub simulation: SimulationResult,
    /// `simulation.price - analytical`.
    pub difference: f64,
    /// `|difference| / analytical` in percent; `None` when the analytical
    /// price is 0.
    pub relative_error_pct: Option<f64>,
    /// Whether `|difference| <= 1.96 · std_error`.
    pub within_confidence: bool,
}

/// Prices a European `contract` both ways.
///
/// # Examples
///
/// ```rust
/// use pricer_core::contract::{Contract, OptionKind};
/// use pricer_pricing::compare::compare_methods;
///
/// let contract = Contract::builder()
///     .kind(OptionKind::Call)
///     .strike(100.0)
///     .spot(100.0)
///     .rate(0.05)
///     .volatility(0.2)
///     .expiry_in_years(1.0)
///     .build()
///     .unwrap();
///
/// let cmp = compare_methods(&contract, 20_000, Some(7)).unwrap();
/// assert!(cmp.difference.abs() < 0.5);
/// ```
pub fn compare_methods(
    contract: &Contract,
    n_paths: usize,
    seed: Option<u64>,
) -> Result<MethodComparison, SimulationArgumentError> {
    let mut config = SimulationConfig::default().with_n_paths(n_paths)?;
    if let Some(seed) = seed {
        config = config.with_seed(seed);
    }

    let analytical = price_analytical(contract);
    let simulation = MonteCarloPricer::new(config).simulate(contract)?;
    let difference = simulation.price - analytical;
    let relative_error_pct = (analytical != 0.0).then(|| difference.abs() / analytical * 100.0);
    let within_confidence = difference.abs() <= simulation.confidence_95();

    info!(
        underlying = contract.underlying(),
        analytical,
        simulated = simulation.price,
        std_error = simulation.std_error,
        within_confidence,
        "compared pricing methods"
    );

    Ok(MethodComparison {
        analytical,
        simulation,
        difference,
        relative_error_pct,
        within_confidence,
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::{TimeZone, Utc};
    use pricer_core::contract::OptionKind;

    fn contract(vol: f64) -> Contract {
        Contract::builder()
            .kind(OptionKind::Call)
            .strike(100.0)
            .spot(100.0)
            .rate(0.05)
            .volatility(vol)
            .valuation_time(Utc.with_ymd_and_hms(2025, 1, 2, 0, 0, 0).unwrap())
            .expiry_in_years(1.0)
            .build()
            .unwrap()
    }

    #[test]
    fn test_fields_are_consistent() {
        let cmp = compare_methods(&contract(0.2), 10_000, Some(42)).unwrap();
        assert_eq!(cmp.difference, cmp.simulation.price - cmp.analytical);
        let pct = cmp.relative_error_pct.unwrap();
        assert!((pct - cmp.difference.abs() / cmp.analytical * 100.0).abs() < 1e-12);
        assert_eq!(
            cmp.within_confidence,
            cmp.difference.abs() <= 1.96 * cmp.simulation.std_error
        );
        assert_eq!(cmp.simulation.seed, 42);
    }

    #[test]
    fn test_rejects_zero_paths() {
        assert!(matches!(
            compare_methods(&contract(0.2), 0, None),
            Err(SimulationArgumentError::InvalidPathCount(0))
        ));
    }
}
