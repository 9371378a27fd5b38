//! Portfolio valuation and Greek aggregation.
//!
//! Each position is valued independently, in parallel:
//!
//! - **European** positions use the closed form and analytical Greeks
//! - **Asian** and **barrier** positions use the Monte Carlo engine with
//!   finite-difference Greeks, on a fixed seed shared by every position
//!
//! Per-unit results are scaled by the signed quantity and summed in position
//! order, so the totals do not depend on the thread count. The aggregation
//! is linear: there is no netting beyond summation.

use chrono::{DateTime, Utc};
use pricer_core::contract::Contract;
use pricer_models::analytical::AnalyticalPricer;
use pricer_pricing::greeks::{greeks_analytical_with, greeks_numerical, GreeksResult};
use pricer_pricing::mc::{MonteCarloPricer, SimulationConfig};
use pricer_pricing::path_dependent::OptionStyle;
use rayon::prelude::*;
use tracing::{debug, info};

use crate::portfolio::{Portfolio, PortfolioError, Position};

/// Seed used for simulated positions when the configuration has none.
pub const DEFAULT_PORTFOLIO_SEED: u64 = 42;

/// Valuation of one position.
#[derive(Debug, Clone, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize))]
pub struct PositionRisk {
    /// Index of the position in the portfolio.
    pub index: usize,
    /// Underlying identifier.
    pub underlying: String,
    /// Signed quantity.
    pub quantity: f64,
    /// Option style.
    pub style: OptionStyle,
    /// Price of one unit.
    pub unit_price: f64,
    /// Standard error of `unit_price` (simulated positions only).
    pub std_error: Option<f64>,
    /// `quantity × unit_price`.
    pub value: f64,
    /// Greeks of one unit.
    pub unit_greeks: GreeksResult,
    /// Greeks scaled by the quantity.
    pub greeks: GreeksResult,
}

/// Portfolio totals and the per-position breakdown.
#[derive(Debug, Clone, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize))]
pub struct PortfolioSummary {
    /// Σ quantity × price.
    pub net_value: f64,
    /// Σ quantity × delta.
    pub net_delta: f64,
    /// Σ quantity × gamma.
    pub net_gamma: f64,
    /// Σ quantity × vega.
    pub net_vega: f64,
    /// Σ quantity × theta (per year).
    pub net_theta: f64,
    /// Σ quantity × rho.
    pub net_rho: f64,
    /// Per-position results in portfolio order.
    pub positions: Vec<PositionRisk>,
}

impl PortfolioSummary {
    /// Summary of a portfolio with no positions.
    pub fn empty() -> Self {
        Self {
            net_value: 0.0,
            net_delta: 0.0,
            net_gamma: 0.0,
            net_vega: 0.0,
            net_theta: 0.0,
            net_rho: 0.0,
            positions: Vec::new(),
        }
    }

    fn accumulate(mut self, risk: PositionRisk) -> Self {
        self.net_value += risk.value;
        self.net_delta += risk.greeks.delta;
        self.net_gamma += risk.greeks.gamma;
        self.net_vega += risk.greeks.vega;
        self.net_theta += risk.greeks.theta;
        self.net_rho += risk.greeks.rho;
        self.positions.push(risk);
        self
    }
}

/// Valuation settings for portfolio analysis.
///
/// # Examples
///
/// ```
/// use pricer_pricing::mc::SimulationConfig;
/// use pricer_risk::RiskEngine;
///
/// let engine = RiskEngine::new()
///     .with_simulation(SimulationConfig::builder().n_paths(20_000).seed(7).build().unwrap())
///     .with_bump(0.005);
/// assert_eq!(engine.simulation().seed(), Some(7));
/// ```
#[derive(Debug, Clone, PartialEq)]
pub struct RiskEngine {
    analytical: AnalyticalPricer,
    simulation: SimulationConfig,
    bump: Option<f64>,
}

impl Default for RiskEngine {
    fn default() -> Self {
        Self::new()
    }
}

impl RiskEngine {
    /// Default closed-form pricer, default simulation settings seeded with
    /// [`DEFAULT_PORTFOLIO_SEED`], default bump.
    pub fn new() -> Self {
        Self {
            analytical: AnalyticalPricer::new(),
            simulation: SimulationConfig::default().with_seed(DEFAULT_PORTFOLIO_SEED),
            bump: None,
        }
    }

    /// Replaces the closed-form pricer (for its expiry threshold).
    pub fn with_analytical(mut self, analytical: AnalyticalPricer) -> Self {
        self.analytical = analytical;
        self
    }

    /// Replaces the simulation settings. An unseeded configuration is pinned
    /// to one entropy seed per analysis.
    pub fn with_simulation(mut self, simulation: SimulationConfig) -> Self {
        self.simulation = simulation;
        self
    }

    /// Relative bump for finite-difference Greeks.
    pub fn with_bump(mut self, bump: f64) -> Self {
        self.bump = Some(bump);
        self
    }

    /// Simulation settings for non-European positions.
    #[inline]
    pub fn simulation(&self) -> &SimulationConfig {
        &self.simulation
    }

    /// Values every position and sums the results.
    ///
    /// # Errors
    /// - `ZeroQuantity` / `NonFiniteQuantity` for a bad quantity, checked
    ///   before any pricing
    /// - `Simulation` for an invalid barrier request
    /// - `Pricing` if an engine fails
    pub fn analyze(&self, portfolio: &Portfolio) -> Result<PortfolioSummary, PortfolioError> {
        for (index, position) in portfolio.positions().iter().enumerate() {
            let quantity = position.quantity();
            if !quantity.is_finite() {
                return Err(PortfolioError::NonFiniteQuantity { index, quantity });
            }
            if quantity == 0.0 {
                return Err(PortfolioError::ZeroQuantity { index });
            }
        }

        // Un-pinned contracts all see the same clock reading
        let valuation_time = Utc::now();
        let simulation = MonteCarloPricer::new(self.simulation.clone()).seeded();
        let risks = portfolio
            .positions()
            .par_iter()
            .enumerate()
            .map(|(index, position)| {
                self.value_position(index, position, valuation_time, &simulation)
            })
            .collect::<Result<Vec<_>, _>>()?;

        let summary = risks
            .into_iter()
            .fold(PortfolioSummary::empty(), PortfolioSummary::accumulate);

        info!(
            positions = summary.positions.len(),
            net_value = summary.net_value,
            net_delta = summary.net_delta,
            net_gamma = summary.net_gamma,
            net_vega = summary.net_vega,
            "portfolio analysed"
        );
        Ok(summary)
    }

    fn value_position(
        &self,
        index: usize,
        position: &Position,
        valuation_time: DateTime<Utc>,
        simulation: &MonteCarloPricer,
    ) -> Result<PositionRisk, PortfolioError> {
        let contract = position.contract().pinned_at(valuation_time);
        let (unit_price, std_error, unit_greeks) = if position.is_analytical() {
            let price = self.analytical.price_contract(&contract);
            (price, None, greeks_analytical_with(&self.analytical, &contract))
        } else {
            let pricer = simulation
                .clone()
                .with_style(position.style(), position.barrier())
                .map_err(|source| PortfolioError::Simulation { index, source })?;
            let result = pricer
                .simulate(&contract)
                .map_err(|source| PortfolioError::Simulation { index, source })?;
            let greeks = greeks_numerical(&pricer, &contract, self.bump)
                .map_err(|source| PortfolioError::Pricing { index, source })?;
            (result.price, Some(result.std_error), greeks)
        };

        let quantity = position.quantity();
        debug!(
            index,
            underlying = contract.underlying(),
            style = %position.style(),
            method = %unit_greeks.method,
            quantity,
            unit_price,
            "position valued"
        );

        Ok(PositionRisk {
            index,
            underlying: contract.underlying().to_string(),
            quantity,
            style: position.style(),
            unit_price,
            std_error,
            value: quantity * unit_price,
            unit_greeks,
            greeks: unit_greeks.scaled(quantity),
        })
    }
}

/// Analyses `portfolio` with the default [`RiskEngine`].
pub fn analyze(portfolio: &Portfolio) -> Result<PortfolioSummary, PortfolioError> {
    RiskEngine::new().analyze(portfolio)
}

/// Analyses European `(quantity, contract)` pairs.
///
/// # Examples
///
/// ```
/// use pricer_core::contract::{Contract, OptionKind};
/// use pricer_risk::analyze_portfolio;
///
/// let call = Contract::builder()
///     .kind(OptionKind::Call)
///     .strike(450.0)
///     .spot(450.0)
///     .rate(0.05)
///     .volatility(0.2)
///     .expiry_in_years(30.0 / 365.0)
///     .build()
///     .unwrap();
/// let put = Contract::builder()
///     .kind(OptionKind::Put)
///     .strike(440.0)
///     .spot(450.0)
///     .rate(0.05)
///     .volatility(0.2)
///     .expiry_in_years(30.0 / 365.0)
///     .build()
///     .unwrap();
///
/// let summary = analyze_portfolio(&[(100.0, call), (-50.0, put)]).unwrap();
/// assert!(summary.net_delta > 0.0);
/// assert_eq!(summary.positions.len(), 2);
/// ```
pub fn analyze_portfolio(pairs: &[(f64, Contract)]) -> Result<PortfolioSummary, PortfolioError> {
    analyze(&Portfolio::from_pairs(pairs))
}
