//! Closed-form Greeks for contracts.

use pricer_core::contract::Contract;
use pricer_models::analytical::AnalyticalPricer;

use super::GreeksResult;

/// Analytical Greeks with the default degenerate-input threshold.
///
/// # Examples
///
/// ```rust
/// use pricer_core::contract::{Contract, OptionKind};
/// use pricer_pricing::greeks::{greeks_analytical, GreeksMethod};
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
/// let greeks = greeks_analytical(&contract);
/// assert_eq!(greeks.method, GreeksMethod::Analytical);
/// assert!((greeks.delta - 0.6368).abs() < 1e-3);
/// ```
pub fn greeks_analytical(contract: &Contract) -> GreeksResult {
    greeks_analytical_with(&AnalyticalPricer::new(), contract)
}

/// Analytical Greeks under a specific pricer configuration.
pub fn greeks_analytical_with(pricer: &AnalyticalPricer, contract: &Contract) -> GreeksResult {
    GreeksResult::from_analytical(pricer.greeks(contract))
}
